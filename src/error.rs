use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaletteError {
    #[error("color {0} is not in the correct format")]
    InvalidFormat(String),

    #[error("palette index {index} out of range (palette has {len} colors)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("color {0} is not in palette")]
    NotFound(String),

    #[error("replacement chain starting at {0} loops back on itself")]
    ReplacementCycle(String),
}
