//! Styled text blocks.

use serde::{Deserialize, Serialize};

use super::Color;

/// Font weight supported by the style panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    /// Light face, serialized as the CSS keyword.
    #[serde(rename = "lighter")]
    Light,
    /// Regular face.
    Normal,
    /// Bold face.
    #[default]
    Bold,
}

/// Horizontal alignment of wrapped lines within the wrap box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    /// Lines start at the left edge of the wrap box.
    Left,
    /// Lines are centered in the wrap box.
    #[default]
    Center,
    /// Lines end at the right edge of the wrap box.
    Right,
}

/// Drop shadow painted behind the glyphs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextShadow {
    /// Shadow color.
    pub color: Color,
    /// Blur radius in pixels.
    pub blur: f64,
    /// Horizontal offset in pixels.
    pub offset_x: f64,
    /// Vertical offset in pixels.
    pub offset_y: f64,
}

/// Outline painted beneath the glyph fill.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextStroke {
    /// Stroke color.
    pub color: Color,
    /// Stroke width in pixels.
    pub width: f64,
}

/// A styled text block.
///
/// Text wraps at `wrap_width` surface units; lines never overflow it. The
/// shadow and stroke fields are present only when the corresponding effect
/// is enabled in the style configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextObject {
    /// The text content.
    pub text: String,
    /// Requested font family name.
    pub font_family: String,
    /// Font size in surface units.
    pub font_size: f64,
    /// Face weight.
    pub weight: FontWeight,
    /// Fill color.
    pub fill: Color,
    /// Line alignment within the wrap box.
    pub align: TextAlign,
    /// Wrap box width in surface units.
    pub wrap_width: f64,
    /// Optional drop shadow.
    pub shadow: Option<TextShadow>,
    /// Optional outline.
    pub stroke: Option<TextStroke>,
}

impl TextObject {
    /// Creates an undecorated text block with default family, weight,
    /// fill, and alignment.
    pub fn plain(text: impl Into<String>, font_size: f64, wrap_width: f64) -> Self {
        Self {
            text: text.into(),
            font_family: "Space Grotesk".to_string(),
            font_size,
            weight: FontWeight::default(),
            fill: Color::WHITE,
            align: TextAlign::default(),
            wrap_width,
            shadow: None,
            stroke: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_has_no_decoration() {
        let obj = TextObject::plain("SALE", 32.0, 256.0);
        assert!(obj.shadow.is_none());
        assert!(obj.stroke.is_none());
        assert_eq!(obj.align, TextAlign::Center);
        assert_eq!(obj.weight, FontWeight::Bold);
    }

    #[test]
    fn test_weight_serializes_as_css_keyword() {
        assert_eq!(
            serde_json::to_string(&FontWeight::Light).unwrap(),
            "\"lighter\""
        );
        assert_eq!(
            serde_json::to_string(&FontWeight::Bold).unwrap(),
            "\"bold\""
        );
    }
}
