//! Text style configuration.
//!
//! The style panel edits a [`TextStyleConfig`]; [`TextStyleConfig::compile`]
//! turns it into a [`TextObject`] for the surface. Shadow and stroke blocks
//! always carry their parameters so the panel keeps tuned values while an
//! effect is toggled off; the compiled object only carries an effect when it
//! is enabled.

use serde::{Deserialize, Serialize};

use creativekit_core::constants::{FONT_SIZE_PRESETS, TEXT_WRAP_RATIO};
use creativekit_core::SceneError;

use crate::model::{Color, FontWeight, TextAlign, TextObject, TextShadow, TextStroke};

/// Drop shadow settings as edited in the style panel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShadowConfig {
    /// Whether the shadow is applied.
    pub enabled: bool,
    /// Shadow color.
    pub color: Color,
    /// Blur radius in pixels.
    pub blur: f64,
    /// Horizontal offset in pixels.
    pub offset_x: f64,
    /// Vertical offset in pixels.
    pub offset_y: f64,
}

impl Default for ShadowConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            color: Color::BLACK,
            blur: 4.0,
            offset_x: 2.0,
            offset_y: 2.0,
        }
    }
}

/// Outline settings as edited in the style panel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokeConfig {
    /// Whether the outline is applied.
    pub enabled: bool,
    /// Stroke color.
    pub color: Color,
    /// Stroke width in pixels.
    pub width: f64,
}

impl Default for StrokeConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            color: Color::BLACK,
            width: 2.0,
        }
    }
}

/// Full text style as edited in the style panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyleConfig {
    /// Text content.
    pub text: String,
    /// Requested font family.
    pub font_family: String,
    /// Font size in surface units.
    pub font_size: f64,
    /// Face weight.
    pub font_weight: FontWeight,
    /// Fill color.
    pub color: Color,
    /// Line alignment.
    pub text_align: TextAlign,
    /// Drop shadow block.
    pub shadow: ShadowConfig,
    /// Outline block.
    pub stroke: StrokeConfig,
}

impl Default for TextStyleConfig {
    fn default() -> Self {
        Self {
            text: "Your Text Here".to_string(),
            font_family: "Space Grotesk".to_string(),
            font_size: 24.0,
            font_weight: FontWeight::Bold,
            color: Color::WHITE,
            text_align: TextAlign::Center,
            shadow: ShadowConfig::default(),
            stroke: StrokeConfig::default(),
        }
    }
}

impl TextStyleConfig {
    /// Compiles the configuration into a text object for a surface of the
    /// given width. Content is trimmed; whitespace-only content is an error.
    pub fn compile(&self, surface_width: u32) -> Result<TextObject, SceneError> {
        let text = self.text.trim();
        if text.is_empty() {
            return Err(SceneError::EmptyText);
        }

        Ok(TextObject {
            text: text.to_string(),
            font_family: self.font_family.clone(),
            font_size: self.font_size,
            weight: self.font_weight,
            fill: self.color,
            align: self.text_align,
            wrap_width: surface_width as f64 * TEXT_WRAP_RATIO,
            shadow: self.shadow.enabled.then(|| TextShadow {
                color: self.shadow.color,
                blur: self.shadow.blur,
                offset_x: self.shadow.offset_x,
                offset_y: self.shadow.offset_y,
            }),
            stroke: self.stroke.enabled.then(|| TextStroke {
                color: self.stroke.color,
                width: self.stroke.width,
            }),
        })
    }
}

/// The discrete sizes offered by the size picker.
pub fn font_size_presets() -> &'static [u32] {
    &FONT_SIZE_PRESETS
}

/// The nearest preset at or above the given size, or the largest preset.
pub fn next_preset_up(size: f64) -> u32 {
    FONT_SIZE_PRESETS
        .iter()
        .copied()
        .find(|&p| (p as f64) > size)
        .unwrap_or(FONT_SIZE_PRESETS[FONT_SIZE_PRESETS.len() - 1])
}

/// The nearest preset below the given size, or the smallest preset.
pub fn next_preset_down(size: f64) -> u32 {
    FONT_SIZE_PRESETS
        .iter()
        .rev()
        .copied()
        .find(|&p| (p as f64) < size)
        .unwrap_or(FONT_SIZE_PRESETS[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_style_panel() {
        let config = TextStyleConfig::default();
        assert_eq!(config.font_family, "Space Grotesk");
        assert_eq!(config.font_size, 24.0);
        assert_eq!(config.font_weight, FontWeight::Bold);
        assert_eq!(config.color, Color::WHITE);
        assert_eq!(config.text_align, TextAlign::Center);
        assert!(!config.shadow.enabled);
        assert!(!config.stroke.enabled);
    }

    #[test]
    fn test_compile_sets_wrap_width() {
        let obj = TextStyleConfig::default().compile(320).unwrap();
        assert_eq!(obj.wrap_width, 256.0);
    }

    #[test]
    fn test_compile_trims_and_rejects_whitespace() {
        let mut config = TextStyleConfig::default();
        config.text = "  SALE  ".to_string();
        assert_eq!(config.compile(320).unwrap().text, "SALE");

        config.text = "   ".to_string();
        assert!(matches!(config.compile(320), Err(SceneError::EmptyText)));
    }

    #[test]
    fn test_disabled_effects_are_absent() {
        let obj = TextStyleConfig::default().compile(320).unwrap();
        assert!(obj.shadow.is_none());
        assert!(obj.stroke.is_none());
    }

    #[test]
    fn test_enabled_effects_carry_settings() {
        let mut config = TextStyleConfig::default();
        config.shadow.enabled = true;
        config.stroke.enabled = true;
        let obj = config.compile(320).unwrap();

        let shadow = obj.shadow.unwrap();
        assert_eq!((shadow.blur, shadow.offset_x, shadow.offset_y), (4.0, 2.0, 2.0));
        assert_eq!(obj.stroke.unwrap().width, 2.0);
    }

    #[test]
    fn test_preset_stepping() {
        assert_eq!(next_preset_up(24.0), 28);
        assert_eq!(next_preset_down(24.0), 20);
        assert_eq!(next_preset_up(72.0), 72);
        assert_eq!(next_preset_down(12.0), 12);
    }
}
