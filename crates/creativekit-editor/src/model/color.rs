//! RGBA color parsed from hex literals.

use serde::{Deserialize, Serialize};

use creativekit_core::SceneError;

/// An 8-bit RGBA color.
///
/// Serializes as a `#rrggbb` / `#rrggbbaa` hex string, matching the style
/// configuration payloads the dashboard exchanges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel, 255 = opaque.
    pub a: u8,
}

impl Color {
    /// Opaque white.
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    /// Opaque black.
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    /// Creates an opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Creates a color with explicit alpha.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parses `#rgb`, `#rrggbb`, or `#rrggbbaa` literals.
    pub fn from_hex(literal: &str) -> Result<Self, SceneError> {
        let invalid = || SceneError::InvalidColor {
            literal: literal.to_string(),
        };
        let hex = literal.strip_prefix('#').ok_or_else(invalid)?;

        let parse = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());

        match hex.len() {
            3 => {
                let channel = |i: usize| {
                    let d = &hex[i..i + 1];
                    parse(&format!("{d}{d}"))
                };
                Ok(Color::rgb(channel(0)?, channel(1)?, channel(2)?))
            }
            6 => Ok(Color::rgb(
                parse(&hex[0..2])?,
                parse(&hex[2..4])?,
                parse(&hex[4..6])?,
            )),
            8 => Ok(Color::rgba(
                parse(&hex[0..2])?,
                parse(&hex[2..4])?,
                parse(&hex[4..6])?,
                parse(&hex[6..8])?,
            )),
            _ => Err(invalid()),
        }
    }

    /// Formats as a hex literal, omitting the alpha byte when opaque.
    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl TryFrom<String> for Color {
    type Error = SceneError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_six_digit() {
        let c = Color::from_hex("#1a1a2e").unwrap();
        assert_eq!((c.r, c.g, c.b, c.a), (0x1a, 0x1a, 0x2e, 255));
    }

    #[test]
    fn test_parse_short_form() {
        assert_eq!(Color::from_hex("#fff").unwrap(), Color::WHITE);
    }

    #[test]
    fn test_parse_with_alpha() {
        let c = Color::from_hex("#00d4ff80").unwrap();
        assert_eq!(c.a, 0x80);
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(Color::from_hex("1a1a2e").is_err());
        assert!(Color::from_hex("#12345").is_err());
        assert!(Color::from_hex("#zzzzzz").is_err());
    }

    #[test]
    fn test_hex_roundtrip() {
        let c = Color::from_hex("#f15bb5").unwrap();
        assert_eq!(c.to_hex(), "#f15bb5");
    }
}
