//! Placed bitmap objects.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// A placed bitmap, either the background or a dropped asset.
///
/// The natural size is the decoded pixel size; the owning [`SceneObject`]'s
/// scale factors map it into surface units. Decoded pixels are kept out of
/// serialization, a deserialized scene re-fetches from `source_url`.
///
/// [`SceneObject`]: super::SceneObject
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageObject {
    /// URL the pixels were fetched from.
    pub source_url: String,
    /// Decoded width in pixels.
    pub natural_width: u32,
    /// Decoded height in pixels.
    pub natural_height: u32,
    /// Decoded RGBA pixels, shared with the loader.
    #[serde(skip)]
    pub pixels: Option<Arc<image::RgbaImage>>,
}

impl ImageObject {
    /// Creates an image object from decoded pixels.
    pub fn new(source_url: impl Into<String>, pixels: Arc<image::RgbaImage>) -> Self {
        Self {
            source_url: source_url.into(),
            natural_width: pixels.width(),
            natural_height: pixels.height(),
            pixels: Some(pixels),
        }
    }
}
