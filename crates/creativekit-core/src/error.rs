//! Error handling for CreativeKit
//!
//! Provides error types for the layers of the editor:
//! - Scene errors (surface construction and object operations)
//! - Load errors (bitmap fetch/decode)
//! - Service errors (external generation/analysis collaborators)
//!
//! All error types use `thiserror` for ergonomic error handling. The design
//! keeps failures local and recoverable: a failed load leaves the surface
//! untouched, out-of-range inputs are clamped by the callers rather than
//! rejected here, and service failures degrade to fallback data.

use thiserror::Error;

/// Scene error type
///
/// Represents errors raised by the scene surface itself. These are rare by
/// design; most surface operations clamp or no-op instead of failing.
#[derive(Error, Debug, Clone)]
pub enum SceneError {
    /// Surface constructed with non-positive dimensions
    #[error("Invalid surface dimensions {width}x{height}")]
    InvalidDimensions {
        /// Requested width in surface units.
        width: i64,
        /// Requested height in surface units.
        height: i64,
    },

    /// Operation referenced an object id that is not on the surface
    #[error("Object {id} not found on surface")]
    ObjectNotFound {
        /// The missing object id.
        id: u64,
    },

    /// Text styling produced no content
    #[error("Text content is empty")]
    EmptyText,

    /// Color string could not be parsed
    #[error("Invalid color literal '{literal}'")]
    InvalidColor {
        /// The rejected literal.
        literal: String,
    },

    /// Raster export failed
    #[error("Export failed: {reason}")]
    ExportFailed {
        /// Description of the failure.
        reason: String,
    },
}

/// Load error type
///
/// Represents errors while fetching or decoding a bitmap. Load failures are
/// non-fatal: the surface state is left exactly as it was before the call.
#[derive(Error, Debug, Clone)]
pub enum LoadError {
    /// The source could not produce bytes for the URL
    #[error("Failed to fetch '{url}': {reason}")]
    Fetch {
        /// The requested URL.
        url: String,
        /// Description of the failure.
        reason: String,
    },

    /// Bytes were fetched but could not be decoded as an image
    #[error("Failed to decode '{url}': {reason}")]
    Decode {
        /// The requested URL.
        url: String,
        /// Description of the failure.
        reason: String,
    },
}

/// Service error type
///
/// Represents failures of the hosted collaborators (asset catalog, creative
/// generation, attention analysis). Attention-analysis consumers degrade to
/// deterministic fallback data instead of surfacing these to the user.
#[derive(Error, Debug, Clone)]
pub enum ServiceError {
    /// The service could not be reached
    #[error("Service unavailable: {reason}")]
    Unavailable {
        /// Description of the failure.
        reason: String,
    },

    /// The service answered with a payload that could not be interpreted
    #[error("Invalid service response: {reason}")]
    InvalidResponse {
        /// Description of the failure.
        reason: String,
    },

    /// The service rejected the request
    #[error("Request rejected: {reason}")]
    Rejected {
        /// Reason given by the service.
        reason: String,
    },
}

/// Main error type for CreativeKit
///
/// A unified error type that can represent any error from all layers.
/// This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// Scene error
    #[error(transparent)]
    Scene(#[from] SceneError),

    /// Load error
    #[error(transparent)]
    Load(#[from] LoadError),

    /// Service error
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a load error
    pub fn is_load_error(&self) -> bool {
        matches!(self, Error::Load(_))
    }

    /// Check if this is a scene error
    pub fn is_scene_error(&self) -> bool {
        matches!(self, Error::Scene(_))
    }

    /// Check if this is a service error
    pub fn is_service_error(&self) -> bool {
        matches!(self, Error::Service(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        let err: Error = LoadError::Fetch {
            url: "assets/bg.png".to_string(),
            reason: "not found".to_string(),
        }
        .into();
        assert!(err.is_load_error());
        assert!(!err.is_scene_error());

        let err: Error = SceneError::InvalidDimensions {
            width: 0,
            height: 568,
        }
        .into();
        assert!(err.is_scene_error());
    }

    #[test]
    fn test_error_display() {
        let err = SceneError::ObjectNotFound { id: 7 };
        assert_eq!(err.to_string(), "Object 7 not found on surface");
    }
}
