//! Scene object model: placeable items with transform and style attributes.

mod color;
mod image;
mod text;

pub use color::Color;
pub use image::ImageObject;
pub use text::{FontWeight, TextAlign, TextObject, TextShadow, TextStroke};

use serde::{Deserialize, Serialize};

/// Variant payload of a scene object.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ObjectKind {
    /// A placed bitmap (background or asset).
    Image(ImageObject),
    /// A styled text block.
    Text(TextObject),
}

impl ObjectKind {
    /// Short tag for events and layer entries.
    pub fn tag(&self) -> &'static str {
        match self {
            ObjectKind::Image(_) => "image",
            ObjectKind::Text(_) => "text",
        }
    }
}

/// A placeable item on the scene surface.
///
/// Position is the object's center in surface-local coordinates (origin
/// anchor is `center` for all objects). Z-order is not stored here; the
/// object store's list position is the z-order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneObject {
    /// Stable identifier, assigned at creation and never reused.
    pub id: u64,
    /// Center x in surface units.
    pub x: f64,
    /// Center y in surface units.
    pub y: f64,
    /// Horizontal scale factor.
    pub scale_x: f64,
    /// Vertical scale factor.
    pub scale_y: f64,
    /// Whether the object is painted.
    pub visible: bool,
    /// Whether the object can become the active selection.
    pub selectable: bool,
    /// Whether the object receives pointer input.
    pub evented: bool,
    /// Whether the object is in the active-selection set.
    #[serde(skip)]
    pub selected: bool,
    /// Variant payload.
    pub kind: ObjectKind,
}

impl SceneObject {
    /// Creates an object centered at (x, y) with uniform scale.
    pub fn new(id: u64, kind: ObjectKind, x: f64, y: f64, scale: f64) -> Self {
        Self {
            id,
            x,
            y,
            scale_x: scale,
            scale_y: scale,
            visible: true,
            selectable: true,
            evented: true,
            selected: false,
            kind,
        }
    }

    /// True when both interactivity flags are off.
    pub fn locked(&self) -> bool {
        !self.selectable && !self.evented
    }

    /// Flips both interactivity flags together as a single "locked" concept.
    pub fn set_locked(&mut self, locked: bool) {
        self.selectable = !locked;
        self.evented = !locked;
    }
}
