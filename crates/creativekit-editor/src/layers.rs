//! Layer panel projection.
//!
//! The panel is a read model over the surface: a list of entries in
//! top-first order (the reverse of the draw order) that the host renders
//! directly. It never caches object state across mutations; a dirty flag set
//! by the surface's event feed tells it when to re-derive. Panel commands
//! are thin wrappers over surface commands, so the surface stays the single
//! source of truth.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use creativekit_core::constants::LAYER_NAME_MAX_CHARS;
use creativekit_core::{
    EditorEvent, EventCategory, EventFilter, LayerEvent, SceneError, SubscriptionId,
};

use crate::model::ObjectKind;
use crate::surface::SceneSurface;

/// Kind of a layer entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerKind {
    /// Entry backed by an image object.
    Image,
    /// Entry backed by a text object.
    Text,
}

/// One row of the layer panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerEntry {
    /// Backing object id; stable across reorders and recomputes.
    pub id: u64,
    /// Display name derived from the object.
    pub name: String,
    /// Kind of the backing object.
    pub kind: LayerKind,
    /// Visibility flag mirrored from the object.
    pub visible: bool,
    /// Locked flag mirrored from the object.
    pub locked: bool,
}

/// Observer-facing layer list for one surface.
#[derive(Debug, Default)]
pub struct LayerPanel {
    entries: Vec<LayerEntry>,
    selected: Vec<u64>,
    dirty: Arc<AtomicBool>,
    subscription: Option<SubscriptionId>,
}

impl LayerPanel {
    /// Creates a detached panel.
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes to the surface's scene feed so mutations mark the panel
    /// dirty. Call [`refresh`](Self::refresh) to re-derive the entries.
    pub fn attach(&mut self, surface: &SceneSurface) {
        self.dirty = Arc::new(AtomicBool::new(true));
        let dirty = Arc::clone(&self.dirty);
        let id = surface.events().subscribe(
            EventFilter::Categories(vec![EventCategory::Scene]),
            move |_| {
                dirty.store(true, Ordering::SeqCst);
            },
        );
        self.subscription = Some(id);
    }

    /// Removes the subscription installed by [`attach`](Self::attach).
    pub fn detach(&mut self, surface: &SceneSurface) -> bool {
        match self.subscription.take() {
            Some(id) => surface.events().unsubscribe(id),
            None => false,
        }
    }

    /// Whether the entries are out of date.
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Re-derives the entry list from the surface, top layer first.
    pub fn refresh(&mut self, surface: &SceneSurface) {
        let mut entries: Vec<LayerEntry> = surface
            .store()
            .iter()
            .enumerate()
            .map(|(index, obj)| {
                // Positional labels count the overall stack, bottom first.
                let position = index + 1;
                let (kind, name) = match &obj.kind {
                    ObjectKind::Image(_) => (LayerKind::Image, format!("Image {position}")),
                    ObjectKind::Text(text) => {
                        (LayerKind::Text, text_entry_name(&text.text, position))
                    }
                };
                LayerEntry {
                    id: obj.id,
                    name,
                    kind,
                    visible: obj.visible,
                    locked: obj.locked(),
                }
            })
            .collect();
        entries.reverse();

        self.entries = entries;
        self.selected = surface.selected_ids();
        self.dirty.store(false, Ordering::SeqCst);

        surface
            .events()
            .publish(EditorEvent::Layer(LayerEvent::Recomputed {
                count: self.entries.len(),
            }))
            .ok();
    }

    /// The entries, top layer first.
    pub fn entries(&self) -> &[LayerEntry] {
        &self.entries
    }

    /// Ids selected at the last refresh.
    pub fn selected(&self) -> &[u64] {
        &self.selected
    }

    // ----- commands --------------------------------------------------------

    /// Toggles a layer's visibility.
    pub fn toggle_visibility(&self, surface: &mut SceneSurface, id: u64) -> Result<bool, SceneError> {
        surface.toggle_visibility(id)
    }

    /// Toggles a layer's locked state.
    pub fn toggle_lock(&self, surface: &mut SceneSurface, id: u64) -> Result<bool, SceneError> {
        surface.toggle_lock(id)
    }

    /// Moves a layer up in the panel (toward the top of the stack).
    pub fn move_up(&self, surface: &mut SceneSurface, id: u64) -> bool {
        surface.bring_forward(id)
    }

    /// Moves a layer down in the panel (toward the bottom of the stack).
    pub fn move_down(&self, surface: &mut SceneSurface, id: u64) -> bool {
        surface.send_backward(id)
    }

    /// Deletes a layer.
    pub fn delete(&self, surface: &mut SceneSurface, id: u64) -> Result<(), SceneError> {
        surface.remove_object(id)
    }

    /// Selects a layer on the surface. Locked layers are a no-op.
    pub fn select(&self, surface: &mut SceneSurface, id: u64) -> bool {
        surface.select_object(id)
    }

    /// Applies a full drag-to-reorder: `top_to_bottom` lists every layer id
    /// in the desired panel order. Ids missing from the surface are skipped.
    pub fn reorder(&self, surface: &mut SceneSurface, top_to_bottom: &[u64]) {
        // Raising each id to the front, bottom-most first, reproduces the
        // requested stacking exactly.
        for &id in top_to_bottom.iter().rev() {
            surface.bring_to_front(id);
        }
        surface
            .events()
            .publish(EditorEvent::Layer(LayerEvent::Reordered {
                order: top_to_bottom.to_vec(),
            }))
            .ok();
    }
}

/// Display name for a text layer: the leading characters of the content, or
/// a positional fallback for empty content.
fn text_entry_name(content: &str, position: usize) -> String {
    if content.is_empty() {
        format!("Text {position}")
    } else {
        content.chars().take(LAYER_NAME_MAX_CHARS).collect()
    }
}
