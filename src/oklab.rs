/// A color in Ottosson's OKLab space. `l` is lightness in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OKLab {
    pub l: f32,
    pub a: f32,
    pub b: f32,
}

impl OKLab {
    /// Project an 8-bit sRGB color, ignoring alpha.
    #[allow(clippy::excessive_precision)]
    pub fn from_rgba(px: rgb::RGBA8) -> Self {
        let [r, g, b] = [px.r, px.g, px.b].map(linear_srgb::default::srgb_u8_to_linear);

        let lms = [
            (0.4122214708 * r + 0.5363325363 * g + 0.0514459929 * b).cbrt(),
            (0.2119034982 * r + 0.6806995451 * g + 0.1073969566 * b).cbrt(),
            (0.0883024619 * r + 0.2817188376 * g + 0.6299787005 * b).cbrt(),
        ];

        Self {
            l: 0.2104542553 * lms[0] + 0.7936177850 * lms[1] - 0.0040720468 * lms[2],
            a: 1.9779984951 * lms[0] - 2.4285922050 * lms[1] + 0.4505937099 * lms[2],
            b: 0.0259040371 * lms[0] + 0.7827717662 * lms[1] - 0.8086757660 * lms[2],
        }
    }

    /// Euclidean distance; OKLab is close enough to uniform that this tracks perceived difference.
    pub fn distance(self, other: Self) -> f32 {
        let (dl, da, db) = (self.l - other.l, self.a - other.a, self.b - other.b);
        (dl * dl + da * da + db * db).sqrt()
    }
}
