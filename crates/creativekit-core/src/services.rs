//! Traits for the hosted collaborators the editor talks to.
//!
//! The editor core never owns a wire protocol; it consumes these seams. The
//! asset catalog resolves stored uploads to public URLs, the generation
//! service produces creative backgrounds, and the attention service scores a
//! rendered creative. Implementations live with the hosting application;
//! tests use in-memory fakes.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ServiceError;

/// Kind of a stored asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    /// Product shot or other raster upload.
    Image,
    /// Brand logo upload.
    Logo,
}

/// A stored asset as listed by the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetRecord {
    /// Catalog identifier.
    pub id: String,
    /// Resolved public URL; the editor consumes only this.
    pub url: String,
    /// Kind of the asset.
    pub kind: AssetKind,
}

/// Asset storage/catalog collaborator.
#[async_trait]
pub trait AssetCatalog: Send + Sync {
    /// Lists all stored assets.
    async fn list_assets(&self) -> Result<Vec<AssetRecord>, ServiceError>;

    /// Deletes a stored asset by id.
    async fn delete_asset(&self, id: &str) -> Result<(), ServiceError>;
}

/// Parameters for a creative generation request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationParams {
    /// Freeform prompt describing the creative.
    pub prompt: String,
    /// Target format, e.g. "story" or "square".
    pub format: Option<String>,
    /// Brand palette hint as hex colors.
    pub brand_colors: Vec<String>,
}

/// Result of a creative generation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedCreative {
    /// URL of the generated background image.
    pub image_url: String,
    /// Model-provided description of the result.
    pub description: String,
}

/// Generative-AI collaborator producing creative backgrounds.
#[async_trait]
pub trait GenerationService: Send + Sync {
    /// Generates a creative background for the given parameters.
    async fn generate(&self, params: &GenerationParams) -> Result<GeneratedCreative, ServiceError>;
}

/// One attention zone in normalized 0-1 coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttentionRegion {
    /// Left edge, 0-1 of canvas width.
    pub x: f64,
    /// Top edge, 0-1 of canvas height.
    pub y: f64,
    /// Width, 0-1 of canvas width.
    pub width: f64,
    /// Height, 0-1 of canvas height.
    pub height: f64,
    /// Predicted attention intensity, 0-1.
    pub intensity: f64,
    /// Human-readable zone label.
    pub label: String,
}

/// Full attention analysis for one rendered creative.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttentionAnalysis {
    /// Attention zones, strongest first.
    pub regions: Vec<AttentionRegion>,
    /// Predicted click-through rate in percent.
    pub ctr_prediction: f64,
    /// Model-provided improvement suggestions.
    pub insights: Vec<String>,
}

/// Attention-analysis collaborator.
///
/// Consumers must not fail the user on a service error; they degrade to the
/// deterministic fallback data instead (see the editor's heatmap module).
#[async_trait]
pub trait AttentionService: Send + Sync {
    /// Scores the creative at the given URL.
    async fn analyze(&self, image_url: &str) -> Result<AttentionAnalysis, ServiceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_record_roundtrip() {
        let record = AssetRecord {
            id: "a1".to_string(),
            url: "https://cdn.example/a1.png".to_string(),
            kind: AssetKind::Logo,
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"logo\""));
        let back: AssetRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back.url, record.url);
    }

    #[test]
    fn test_region_deserializes_from_service_payload() {
        let json = r#"{"x":0.3,"y":0.15,"width":0.4,"height":0.25,"intensity":0.95,"label":"Primary Focus"}"#;
        let region: AttentionRegion = serde_json::from_str(json).unwrap();
        assert_eq!(region.label, "Primary Focus");
        assert!(region.intensity > 0.9);
    }
}
