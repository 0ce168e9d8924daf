//! Usage-weighted color palettes.
//!
//! A [`Palette`] records how often each `#RRGGBBAA` color is used. [`Palette::cleanup`]
//! merges rarely used colors into perceptually close, frequently used ones, and the
//! selection survives those merges: looking up a merged color lands on its replacement.
//!
//! ```
//! use colorfold::Palette;
//!
//! let mut palette = Palette::default();
//! palette.add_color("#336699ff")?;
//! palette.set_color("#336699ff")?;
//! assert_eq!(palette.index(), 0);
//! # Ok::<(), colorfold::PaletteError>(())
//! ```

#![forbid(unsafe_code)]

pub mod color;
pub mod config;
pub mod diff;
pub mod error;
pub mod observer;
pub mod oklab;
pub mod palette;

pub use color::Color;
pub use config::CleanupConfig;
pub use diff::{ColorDiff, OklabDiff};
pub use error::PaletteError;
pub use observer::SubscriptionId;
pub use palette::{CleanupReport, Fold, Palette};
