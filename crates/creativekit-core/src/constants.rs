//! Editor-wide constants.
//!
//! Shared values used across the surface, interaction, and styling layers.
//! Values match the behavior of the hosted creative dashboard.

/// Grid cell size in surface units; snapped coordinates are multiples of this.
pub const GRID_SIZE: f64 = 20.0;

/// Lowest permitted display zoom, in percent.
pub const MIN_ZOOM_PERCENT: u32 = 50;

/// Highest permitted display zoom, in percent.
pub const MAX_ZOOM_PERCENT: u32 = 200;

/// Zoom step applied by the zoom in/out controls, in percentage points.
pub const ZOOM_STEP_PERCENT: u32 = 10;

/// Maximum bounding box (square) a dropped asset is scaled to fit within.
pub const ASSET_MAX_SIZE: f64 = 120.0;

/// Fraction of the surface width used as the wrap width for new text objects.
pub const TEXT_WRAP_RATIO: f64 = 0.8;

/// Characters of text content shown in a layer entry before truncation.
pub const LAYER_NAME_MAX_CHARS: usize = 15;

/// Default surface background fill.
pub const DEFAULT_BACKGROUND_COLOR: &str = "#1a1a2e";

/// Default surface dimensions (portrait story format).
pub const DEFAULT_SURFACE_WIDTH: u32 = 320;
/// Default surface dimensions (portrait story format).
pub const DEFAULT_SURFACE_HEIGHT: u32 = 568;

/// Default resolution multiplier for bitmap export.
pub const DEFAULT_EXPORT_MULTIPLIER: u32 = 2;

/// Suggested filename for exported creatives.
pub const EXPORT_FILE_NAME: &str = "creative-export.png";

/// Discrete font sizes offered by the text style picker, in points.
pub const FONT_SIZE_PRESETS: [u32; 14] = [12, 14, 16, 18, 20, 24, 28, 32, 36, 42, 48, 56, 64, 72];

/// Drag-and-drop payload key carrying an asset URL.
pub const DROP_ASSET_URL_KEY: &str = "assetUrl";
