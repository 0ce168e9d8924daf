use std::collections::{HashMap, HashSet};
use std::fmt;

use indexmap::{IndexMap, IndexSet};
use log::{debug, trace};

use crate::color::Color;
use crate::config::CleanupConfig;
use crate::diff::{ColorDiff, OklabDiff};
use crate::error::PaletteError;
use crate::observer::{SubscriptionId, Subscriptions};

/// A usage-weighted set of colors with a selection index.
///
/// Colors keep insertion order; that order is the projection that
/// [`index`](Palette::index) points into. [`cleanup`](Palette::cleanup) folds
/// rarely used colors into close, frequently used ones and remembers each fold,
/// so looking up a folded color still lands on the color that replaced it.
pub struct Palette {
    colors: IndexSet<Color>,
    /// Never pruned: weights outlive removal from `colors`.
    weights: HashMap<Color, u32>,
    /// Folded color → the color it was merged into, in fold order.
    replacements: IndexMap<Color, Color>,
    index: usize,
    config: CleanupConfig,
    diff: Box<dyn ColorDiff>,
    subscriptions: Subscriptions,
}

/// One color merged away by [`Palette::cleanup`].
#[derive(Debug, Clone, PartialEq)]
pub struct Fold {
    pub color: Color,
    pub weight: u32,
    pub target: Color,
    pub difference: f32,
}

/// Outcome of a [`Palette::cleanup`] pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CleanupReport {
    pub folds: Vec<Fold>,
    pub size_before: usize,
    pub size_after: usize,
}

impl CleanupReport {
    /// Whether the pass left the palette unchanged.
    pub fn is_noop(&self) -> bool {
        self.folds.is_empty()
    }
}

impl Palette {
    /// Seed a palette. Seed colors are not validated and start with no usage weight;
    /// duplicates collapse onto their first occurrence.
    pub fn new<I, S>(colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            colors: colors.into_iter().map(Color::new_unchecked).collect(),
            weights: HashMap::new(),
            replacements: IndexMap::new(),
            index: 0,
            config: CleanupConfig::default(),
            diff: Box::new(OklabDiff),
            subscriptions: Subscriptions::default(),
        }
    }

    pub fn with_config(mut self, config: CleanupConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the color-difference metric used by cleanup.
    pub fn with_diff(mut self, diff: impl ColorDiff + 'static) -> Self {
        self.diff = Box::new(diff);
        self
    }

    pub fn config(&self) -> &CleanupConfig {
        &self.config
    }

    /// Number of live colors.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Live colors in projection order.
    pub fn iter(&self) -> impl Iterator<Item = &Color> {
        self.colors.iter()
    }

    /// The array projection of the live colors.
    pub fn to_vec(&self) -> Vec<Color> {
        self.colors.iter().cloned().collect()
    }

    pub fn contains(&self, color: &str) -> bool {
        self.colors.contains(color)
    }

    /// Current selection index. Meaningless while the palette is empty.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The currently selected color, if the palette is not empty.
    pub fn selected(&self) -> Option<&Color> {
        self.colors.get_index(self.index)
    }

    /// How many times `color` was added. Zero for seed colors never added.
    pub fn weight(&self, color: &str) -> u32 {
        self.weights.get(color).copied().unwrap_or(0)
    }

    /// The color `color` was directly folded into, if any.
    pub fn replacement(&self, color: &str) -> Option<&Color> {
        self.replacements.get(color)
    }

    /// All recorded folds, oldest first.
    pub fn replacements(&self) -> impl Iterator<Item = (&Color, &Color)> {
        self.replacements.iter()
    }

    /// Record one use of `color`, adding it if new.
    pub fn add_color(&mut self, color: &str) -> Result<(), PaletteError> {
        let color = Color::parse(color)?;
        let weight = self.weights.entry(color.clone()).or_insert(0);
        *weight = weight.saturating_add(1);
        // A folded color that comes back is live again, not an alias.
        self.replacements.shift_remove(color.as_str());
        self.colors.insert(color);
        self.notify();
        Ok(())
    }

    /// Fold low-usage colors into their nearest anchor, in a single pass.
    ///
    /// Colors are visited in projection order over a snapshot taken at the start.
    /// A fold removes the color immediately, so later candidates see the reduced set.
    /// Observers are notified even when the palette is too small to clean.
    pub fn cleanup(&mut self) -> CleanupReport {
        let size_before = self.colors.len();

        if size_before < self.config.min_palette_size {
            debug!(
                "will not clean up palettes with less than {} colors",
                self.config.min_palette_size
            );
            self.notify();
            return CleanupReport {
                folds: Vec::new(),
                size_before,
                size_after: size_before,
            };
        }

        debug!("palette size before cleanup = {size_before}");
        trace!("{:?}", self.colors);

        let selected = self.selected().cloned();
        let snapshot = self.to_vec();
        let mut folds = Vec::new();

        for color in snapshot {
            let weight = self.weight(color.as_str());
            if self.config.is_anchor(weight) {
                continue;
            }

            let Some((target, difference)) = self.nearest_anchor(&color) else {
                continue;
            };
            if difference > self.config.max_difference {
                continue;
            }

            debug!("{weight} x {color} -(±{difference})-> {target}");

            self.colors.shift_remove(&color);
            self.replacements.insert(color.clone(), target.clone());
            folds.push(Fold {
                color,
                weight,
                target,
                difference,
            });
        }

        if let Some(selected) = selected {
            self.index = self.find_index(selected.as_str()).unwrap_or(0);
        }

        let size_after = self.colors.len();
        debug!("palette size after cleanup = {size_after}");
        trace!("{:?}", self.colors);

        self.notify();

        CleanupReport {
            folds,
            size_before,
            size_after,
        }
    }

    /// Closest live anchor to `color`. Ties keep the first anchor in projection order.
    fn nearest_anchor(&self, color: &Color) -> Option<(Color, f32)> {
        let mut best: Option<&Color> = None;
        let mut best_diff = f32::MAX;

        for candidate in &self.colors {
            if candidate == color || !self.config.is_anchor(self.weight(candidate.as_str())) {
                continue;
            }
            let d = self.diff.diff(color, candidate);
            if d < best_diff {
                best_diff = d;
                best = Some(candidate);
            }
        }

        best.map(|target| (target.clone(), best_diff))
    }

    /// Follow the replacement chain from `color` to a live color.
    pub fn resolve<'a>(&'a self, color: &'a str) -> Result<&'a Color, PaletteError> {
        let mut current = color;
        let mut visited = HashSet::new();

        loop {
            if let Some(live) = self.colors.get(current) {
                return Ok(live);
            }
            if !visited.insert(current) {
                return Err(PaletteError::ReplacementCycle(color.to_owned()));
            }
            match self.replacements.get(current) {
                Some(next) => current = next.as_str(),
                None => return Err(PaletteError::NotFound(color.to_owned())),
            }
        }
    }

    /// Projection index of `color`, or of the live color it was folded into.
    pub fn find_index(&self, color: &str) -> Result<usize, PaletteError> {
        let live = self.resolve(color)?;
        self.colors
            .get_index_of(live)
            .ok_or_else(|| PaletteError::NotFound(color.to_owned()))
    }

    /// Select `color` (resolving folds).
    pub fn set_color(&mut self, color: &str) -> Result<(), PaletteError> {
        self.index = self.find_index(color)?;
        self.notify();
        Ok(())
    }

    pub fn set_index(&mut self, index: usize) -> Result<(), PaletteError> {
        if index >= self.colors.len() {
            return Err(PaletteError::IndexOutOfRange {
                index,
                len: self.colors.len(),
            });
        }
        self.index = index;
        self.notify();
        Ok(())
    }

    /// Index of the color to select by default.
    ///
    /// The first fully transparent color wins outright; otherwise the most used
    /// color, earliest on ties. Returns 0 for an empty palette.
    pub fn default_index(&self) -> usize {
        let mut default = 0;
        let mut max_weight = 0;

        for (i, color) in self.colors.iter().enumerate() {
            if color.is_transparent() {
                return i;
            }
            let weight = self.weight(color.as_str());
            if weight > max_weight {
                default = i;
                max_weight = weight;
            }
        }

        default
    }

    /// Register an observer, called with the palette after every change.
    pub fn subscribe(&mut self, callback: impl Fn(&Palette) + 'static) -> SubscriptionId {
        self.subscriptions.insert(Box::new(callback))
    }

    /// Remove an observer. Returns whether it was still registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscriptions.remove(id)
    }

    /// Call every observer in registration order.
    pub fn notify(&self) {
        trace!("notifying {} palette observers", self.subscriptions.len());
        for callback in self.subscriptions.iter() {
            callback(self);
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(std::iter::empty::<String>())
    }
}

impl fmt::Debug for Palette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Palette")
            .field("colors", &self.colors)
            .field("weights", &self.weights)
            .field("replacements", &self.replacements)
            .field("index", &self.index)
            .field("config", &self.config)
            .field("subscriptions", &self.subscriptions)
            .finish_non_exhaustive()
    }
}
