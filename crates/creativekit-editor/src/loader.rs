//! Asynchronous image fetching and decoding.
//!
//! The surface never talks to a transport directly; it consumes the
//! [`ImageSource`] seam. Fetch and decode failures are reported but never
//! mutate scene state, a failed load simply leaves the surface as it was.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::debug;

use creativekit_core::LoadError;

use crate::model::Color;

/// A fetched and decoded image, ready to place on the surface.
#[derive(Debug, Clone)]
pub struct FetchedImage {
    pixels: Arc<image::RgbaImage>,
}

impl FetchedImage {
    /// Wraps already-decoded pixels.
    pub fn from_rgba(pixels: image::RgbaImage) -> Self {
        Self {
            pixels: Arc::new(pixels),
        }
    }

    /// Decodes raw encoded bytes (PNG, JPEG, ...).
    pub fn decode(url: &str, bytes: &[u8]) -> Result<Self, LoadError> {
        let decoded = image::load_from_memory(bytes).map_err(|e| LoadError::Decode {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        debug!(url, width = decoded.width(), height = decoded.height(), "decoded image");
        Ok(Self::from_rgba(decoded.to_rgba8()))
    }

    /// Natural width in pixels.
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Natural height in pixels.
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Shared handle to the decoded pixels.
    pub fn pixels(&self) -> Arc<image::RgbaImage> {
        Arc::clone(&self.pixels)
    }
}

/// Seam between the surface and whatever serves image bytes.
#[async_trait]
pub trait ImageSource: Send + Sync {
    /// Fetches and decodes the image at `url`.
    async fn fetch(&self, url: &str) -> Result<FetchedImage, LoadError>;
}

/// Image source backed by a directory on disk. Treats the URL as a path
/// relative to the root.
#[derive(Debug)]
pub struct FileImageSource {
    root: PathBuf,
}

impl FileImageSource {
    /// Creates a source rooted at the given directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl ImageSource for FileImageSource {
    async fn fetch(&self, url: &str) -> Result<FetchedImage, LoadError> {
        let path = self.root.join(url);
        let bytes = tokio::fs::read(&path).await.map_err(|e| LoadError::Fetch {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        FetchedImage::decode(url, &bytes)
    }
}

/// In-memory image source for tests and previews.
#[derive(Debug, Default)]
pub struct MemoryImageSource {
    images: RwLock<HashMap<String, FetchedImage>>,
}

impl MemoryImageSource {
    /// Creates an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an already-decoded image under a URL.
    pub fn insert(&self, url: impl Into<String>, image: FetchedImage) {
        self.images.write().insert(url.into(), image);
    }

    /// Registers a solid-color image of the given size.
    pub fn insert_solid(&self, url: impl Into<String>, width: u32, height: u32, color: Color) {
        let pixel = image::Rgba([color.r, color.g, color.b, color.a]);
        let pixels = image::RgbaImage::from_pixel(width, height, pixel);
        self.insert(url, FetchedImage::from_rgba(pixels));
    }
}

#[async_trait]
impl ImageSource for MemoryImageSource {
    async fn fetch(&self, url: &str) -> Result<FetchedImage, LoadError> {
        self.images
            .read()
            .get(url)
            .cloned()
            .ok_or_else(|| LoadError::Fetch {
                url: url.to_string(),
                reason: "not registered".to_string(),
            })
    }
}
