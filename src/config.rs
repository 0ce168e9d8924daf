/// Thresholds that drive [`Palette::cleanup`](crate::Palette::cleanup).
#[derive(Debug, Clone, PartialEq)]
pub struct CleanupConfig {
    /// Palettes with fewer colors than this are left alone.
    pub min_palette_size: usize,
    /// Colors used more than this many times are anchors: never folded, and the only fold targets.
    pub anchor_weight: u32,
    /// A low-usage color is folded only when its nearest anchor is at most this far away.
    pub max_difference: f32,
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self {
            min_palette_size: 6,
            anchor_weight: 8,
            max_difference: 12.0,
        }
    }
}

impl CleanupConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min_palette_size(mut self, n: usize) -> Self {
        self.min_palette_size = n;
        self
    }

    pub fn anchor_weight(mut self, w: u32) -> Self {
        self.anchor_weight = w;
        self
    }

    pub fn max_difference(mut self, d: f32) -> Self {
        self.max_difference = d;
        self
    }

    /// Whether a color with this usage count is protected from folding.
    pub fn is_anchor(&self, weight: u32) -> bool {
        weight > self.anchor_weight
    }
}
