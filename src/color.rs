use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use crate::error::PaletteError;

/// A palette color in `#RRGGBBAA` form.
///
/// Colors are opaque identifiers: two colors are equal only when their
/// strings are identical, so `#AABBCCDD` and `#aabbccdd` are distinct entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Color(String);

impl Color {
    /// Parse and validate a color. Accepts exactly `#` followed by eight hex digits.
    pub fn parse(s: &str) -> Result<Self, PaletteError> {
        if is_valid(s) {
            Ok(Self(String::from(s)))
        } else {
            Err(PaletteError::InvalidFormat(String::from(s)))
        }
    }

    /// Wrap a string without validating it.
    ///
    /// Seed colors handed to [`Palette::new`](crate::Palette::new) go through here.
    pub fn new_unchecked(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the alpha byte is `00`.
    pub fn is_transparent(&self) -> bool {
        self.0.ends_with("00")
    }

    /// Decode the channels. Returns `None` for unvalidated strings that are not `#RRGGBBAA`.
    pub fn to_rgba(&self) -> Option<rgb::RGBA8> {
        if !is_valid(&self.0) {
            return None;
        }
        let hex = &self.0[1..];
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(rgb::RGBA8 {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
            a: channel(6)?,
        })
    }
}

fn is_valid(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 9 && bytes[0] == b'#' && bytes[1..].iter().all(u8::is_ascii_hexdigit)
}

impl FromStr for Color {
    type Err = PaletteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for Color {
    type Error = PaletteError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Color {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Color {
    fn borrow(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_eight_hex_digits_any_case() {
        assert!(Color::parse("#aabbccdd").is_ok());
        assert!(Color::parse("#AABBCC00").is_ok());
        assert!(Color::parse("#0123456f").is_ok());
    }

    #[test]
    fn rejects_malformed() {
        for bad in ["", "#", "aabbccdd", "#aabbcc", "#aabbccdde", "#gghhiijj", " #aabbccdd", "#aabbcc d"] {
            assert_eq!(
                Color::parse(bad),
                Err(PaletteError::InvalidFormat(bad.into())),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn equality_is_exact_string() {
        let lower = Color::parse("#aabbccdd").unwrap();
        let upper = Color::parse("#AABBCCDD").unwrap();
        assert_ne!(lower, upper);
        assert_eq!(lower.to_rgba(), upper.to_rgba());
    }

    #[test]
    fn transparency_checks_alpha_suffix() {
        assert!(Color::parse("#11223300").unwrap().is_transparent());
        assert!(!Color::parse("#11223301").unwrap().is_transparent());
    }

    #[test]
    fn decodes_channels() {
        let c = Color::parse("#ff8001C0").unwrap();
        assert_eq!(c.to_rgba(), Some(rgb::RGBA8 { r: 255, g: 128, b: 1, a: 192 }));
        assert_eq!(Color::new_unchecked("red").to_rgba(), None);
    }
}
