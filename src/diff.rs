use crate::color::Color;
use crate::oklab::OKLab;

/// Perceptual distance between two palette colors.
///
/// Cleanup only compares results with `<` and against
/// [`CleanupConfig::max_difference`](crate::CleanupConfig::max_difference),
/// so any deterministic metric on a consistent scale works.
pub trait ColorDiff {
    fn diff(&self, a: &Color, b: &Color) -> f32;
}

impl<F> ColorDiff for F
where
    F: Fn(&Color, &Color) -> f32,
{
    fn diff(&self, a: &Color, b: &Color) -> f32 {
        self(a, b)
    }
}

/// Default metric: OKLab Euclidean distance plus alpha difference, both on a 0..100 scale.
///
/// Colors that cannot be decoded are infinitely far from everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct OklabDiff;

impl ColorDiff for OklabDiff {
    fn diff(&self, a: &Color, b: &Color) -> f32 {
        let (Some(pa), Some(pb)) = (a.to_rgba(), b.to_rgba()) else {
            return f32::INFINITY;
        };
        let alpha = (pa.a as f32 - pb.a as f32).abs() / 255.0;
        (OKLab::from_rgba(pa).distance(OKLab::from_rgba(pb)) + alpha) * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(s: &str) -> Color {
        Color::parse(s).unwrap()
    }

    #[test]
    fn identical_colors_have_zero_difference() {
        assert!(OklabDiff.diff(&c("#336699ff"), &c("#336699ff")) < 1e-4);
    }

    #[test]
    fn case_does_not_change_distance() {
        assert!(OklabDiff.diff(&c("#aabbccdd"), &c("#AABBCCDD")) < 1e-4);
    }

    #[test]
    fn near_shades_fall_under_default_threshold() {
        assert!(OklabDiff.diff(&c("#808080ff"), &c("#838080ff")) < 12.0);
        assert!(OklabDiff.diff(&c("#000000ff"), &c("#ffffffff")) > 12.0);
    }

    #[test]
    fn alpha_counts_toward_difference() {
        let opaque = OklabDiff.diff(&c("#808080ff"), &c("#808080ff"));
        let clear = OklabDiff.diff(&c("#808080ff"), &c("#80808000"));
        assert!(clear > opaque + 50.0);
    }

    #[test]
    fn undecodable_is_infinitely_far() {
        let seed = Color::new_unchecked("teal");
        assert_eq!(OklabDiff.diff(&seed, &c("#008080ff")), f32::INFINITY);
    }

    #[test]
    fn closures_are_metrics() {
        let constant = |_: &Color, _: &Color| 3.0_f32;
        assert_eq!(constant.diff(&c("#00000000"), &c("#ffffffff")), 3.0);
    }
}
