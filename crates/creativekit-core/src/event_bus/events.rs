//! Event type definitions for the editor event bus.
//!
//! Events are organized by category and designed to be cloneable and
//! serializable for logging/replay. Payloads carry ids, not object state:
//! the surface remains the single source of truth and observers re-derive
//! whatever they display.

use serde::{Deserialize, Serialize};

/// Root event enum for all editor events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EditorEvent {
    /// Scene surface mutations (add/remove/reorder/move/visibility)
    Scene(SceneEvent),
    /// Layer panel round-trip commands
    Layer(LayerEvent),
    /// Bitmap export lifecycle
    Export(ExportEvent),
    /// External service activity (generation, attention analysis)
    Service(ServiceEvent),
}

impl EditorEvent {
    /// Get the category of this event
    pub fn category(&self) -> EventCategory {
        match self {
            EditorEvent::Scene(_) => EventCategory::Scene,
            EditorEvent::Layer(_) => EventCategory::Layer,
            EditorEvent::Export(_) => EventCategory::Export,
            EditorEvent::Service(_) => EventCategory::Service,
        }
    }

    /// Get a short description of this event for logging
    pub fn description(&self) -> String {
        match self {
            EditorEvent::Scene(e) => e.description(),
            EditorEvent::Layer(e) => e.description(),
            EditorEvent::Export(e) => e.description(),
            EditorEvent::Service(e) => e.description(),
        }
    }
}

/// Event category for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    /// Scene surface mutation events.
    Scene,
    /// Layer panel command events.
    Layer,
    /// Bitmap export events.
    Export,
    /// External service events.
    Service,
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventCategory::Scene => write!(f, "Scene"),
            EventCategory::Layer => write!(f, "Layer"),
            EventCategory::Export => write!(f, "Export"),
            EventCategory::Service => write!(f, "Service"),
        }
    }
}

/// Scene surface mutation events
///
/// Every structural mutation and per-drag move publishes one of these.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SceneEvent {
    /// An object was appended to the top of the z-order.
    ObjectAdded {
        /// Id of the new object.
        id: u64,
        /// Kind tag ("image" or "text").
        kind: String,
    },
    /// An object was removed.
    ObjectRemoved {
        /// Id of the removed object.
        id: u64,
    },
    /// An object moved (one drag tick).
    ObjectMoved {
        /// Id of the moved object.
        id: u64,
        /// Applied x coordinate (post-snap).
        x: f64,
        /// Applied y coordinate (post-snap).
        y: f64,
    },
    /// The z-order changed.
    OrderChanged,
    /// The background was replaced; all prior objects were cleared.
    BackgroundReplaced {
        /// Id of the new background object.
        id: u64,
    },
    /// The surface was reset to its empty state.
    Cleared,
    /// The active selection changed.
    SelectionChanged {
        /// Ids currently selected, back-to-front.
        selected: Vec<u64>,
    },
    /// The display zoom changed.
    ZoomChanged {
        /// New zoom in percent, already clamped.
        percent: u32,
    },
    /// An object's visibility flag flipped.
    VisibilityChanged {
        /// Target object id.
        id: u64,
        /// New visibility.
        visible: bool,
    },
    /// An object's locked state flipped.
    LockChanged {
        /// Target object id.
        id: u64,
        /// New locked state.
        locked: bool,
    },
}

impl SceneEvent {
    fn description(&self) -> String {
        match self {
            SceneEvent::ObjectAdded { id, kind } => format!("Added {} object {}", kind, id),
            SceneEvent::ObjectRemoved { id } => format!("Removed object {}", id),
            SceneEvent::ObjectMoved { id, x, y } => {
                format!("Moved object {} to ({:.1}, {:.1})", id, x, y)
            }
            SceneEvent::OrderChanged => "Z-order changed".to_string(),
            SceneEvent::BackgroundReplaced { id } => format!("Background replaced by object {}", id),
            SceneEvent::Cleared => "Surface cleared".to_string(),
            SceneEvent::SelectionChanged { selected } => {
                format!("Selection changed ({} objects)", selected.len())
            }
            SceneEvent::ZoomChanged { percent } => format!("Zoom set to {}%", percent),
            SceneEvent::VisibilityChanged { id, visible } => {
                format!("Object {} visibility -> {}", id, visible)
            }
            SceneEvent::LockChanged { id, locked } => format!("Object {} locked -> {}", id, locked),
        }
    }
}

/// Layer panel command events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum LayerEvent {
    /// The panel re-derived its entry list.
    Recomputed {
        /// Number of entries after recomputation.
        count: usize,
    },
    /// A full drag-to-reorder was applied.
    Reordered {
        /// New top-to-bottom order of object ids.
        order: Vec<u64>,
    },
}

impl LayerEvent {
    fn description(&self) -> String {
        match self {
            LayerEvent::Recomputed { count } => format!("Layer list recomputed ({} entries)", count),
            LayerEvent::Reordered { order } => format!("Layers reordered ({} entries)", order.len()),
        }
    }
}

/// Bitmap export events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ExportEvent {
    /// An export completed.
    Completed {
        /// Output width in pixels.
        width: u32,
        /// Output height in pixels.
        height: u32,
        /// Encoded size in bytes.
        bytes: usize,
    },
    /// An export failed.
    Failed {
        /// Description of the failure.
        reason: String,
    },
}

impl ExportEvent {
    fn description(&self) -> String {
        match self {
            ExportEvent::Completed {
                width,
                height,
                bytes,
            } => format!("Exported {}x{} ({} bytes)", width, height, bytes),
            ExportEvent::Failed { reason } => format!("Export failed: {}", reason),
        }
    }
}

/// External service events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ServiceEvent {
    /// Attention analysis finished (possibly with fallback data).
    AttentionAnalyzed {
        /// Analyzed image URL.
        url: String,
        /// Whether the deterministic fallback set was used.
        fallback: bool,
    },
    /// A creative generation round-trip finished.
    CreativeGenerated {
        /// URL of the generated image.
        url: String,
    },
}

impl ServiceEvent {
    fn description(&self) -> String {
        match self {
            ServiceEvent::AttentionAnalyzed { url, fallback } => {
                if *fallback {
                    format!("Attention analysis for {} (fallback data)", url)
                } else {
                    format!("Attention analysis for {}", url)
                }
            }
            ServiceEvent::CreativeGenerated { url } => format!("Creative generated: {}", url),
        }
    }
}

/// Filter to receive only specific event types
#[derive(Debug, Clone, Default)]
pub enum EventFilter {
    /// Receive all events.
    #[default]
    All,
    /// Receive events matching any of these categories.
    Categories(Vec<EventCategory>),
}

impl EventFilter {
    /// Check if an event matches this filter
    pub fn matches(&self, event: &EditorEvent) -> bool {
        match self {
            EventFilter::All => true,
            EventFilter::Categories(categories) => categories.contains(&event.category()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_mapping() {
        let ev = EditorEvent::Scene(SceneEvent::OrderChanged);
        assert_eq!(ev.category(), EventCategory::Scene);

        let ev = EditorEvent::Export(ExportEvent::Failed {
            reason: "oom".to_string(),
        });
        assert_eq!(ev.category(), EventCategory::Export);
    }

    #[test]
    fn test_filter_matches() {
        let ev = EditorEvent::Scene(SceneEvent::Cleared);

        assert!(EventFilter::All.matches(&ev));
        assert!(EventFilter::Categories(vec![EventCategory::Scene]).matches(&ev));
        assert!(!EventFilter::Categories(vec![EventCategory::Layer]).matches(&ev));
        assert!(
            EventFilter::Categories(vec![EventCategory::Layer, EventCategory::Scene]).matches(&ev)
        );
    }

    #[test]
    fn test_descriptions_are_stable() {
        let ev = EditorEvent::Scene(SceneEvent::ObjectAdded {
            id: 3,
            kind: "text".to_string(),
        });
        assert_eq!(ev.description(), "Added text object 3");
    }
}
