//! # CreativeKit Editor
//!
//! This crate provides the canvas scene-graph editor behind the creative
//! dashboard: a drawable surface holding a background image, placed assets,
//! and styled text objects, with selection, z-order manipulation,
//! grid-snapped dragging, and lossless bitmap export.
//!
//! ## Core Components
//!
//! ### Scene
//! - **Model**: image and text objects with transform and style attributes
//! - **Object store**: ordered object list; list position is the z-order
//! - **Scene surface**: single source of truth for objects, selection, zoom
//! - **Selection manager**: selection flags and the primary selection
//!
//! ### Editing
//! - **Interaction controller**: pointer drags, external drops, zoom steps
//! - **Layer panel projection**: observer-facing layer list kept in sync
//!   through the surface's event feed
//! - **Text styling**: compiles a style configuration into a text object
//!
//! ### Output
//! - **Renderer**: tiny-skia compositing and PNG export
//! - **Heatmap**: attention-region overlay with deterministic fallback data
//!
//! ## Architecture
//!
//! ```text
//! SceneSurface (object list, selection, zoom)
//!   ├── ObjectStore (draw order = z-order)
//!   ├── SelectionManager
//!   └── EventBus (change feed, from creativekit-core)
//!
//! InteractionController ──mutations──> SceneSurface
//! TextStyleConfig ──compile──> SceneSurface::add_text
//! LayerPanel <──events── SceneSurface <──commands── LayerPanel
//! Renderer reads the surface and exports PNG
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use creativekit_editor::{SceneSurface, model::Color};
//!
//! let mut surface = SceneSurface::new(320, 568, Color::from_hex("#1a1a2e")?)?;
//! surface.load_background(&source, "bg.png").await?;
//! let png = surface.export_png(2)?;
//! ```

pub mod font_manager;
pub mod heatmap;
pub mod interaction;
pub mod layers;
pub mod loader;
pub mod model;
pub mod object_store;
pub mod renderer;
pub mod selection_manager;
pub mod surface;
pub mod text_style;

pub use heatmap::{analyze_or_fallback, fallback_analysis, render_attention_overlay};
pub use interaction::{DropPayload, InteractionController};
pub use layers::{LayerEntry, LayerKind, LayerPanel};
pub use loader::{FetchedImage, FileImageSource, ImageSource, MemoryImageSource};
pub use model::{Color, ImageObject, ObjectKind, SceneObject, TextAlign, TextObject};
pub use object_store::ObjectStore;
pub use renderer::{render_preview, render_scene};
pub use selection_manager::SelectionManager;
pub use surface::{LoadTicket, SceneSurface};
pub use text_style::{ShadowConfig, StrokeConfig, TextStyleConfig};
