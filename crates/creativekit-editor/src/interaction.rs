//! Pointer, keyboard, and drop handling.
//!
//! Translates host gestures into surface commands. The controller carries no
//! scene state of its own; it tracks only whether a selection exists, via a
//! subscription on the surface's event feed, so the host can enable or
//! disable its delete affordance without polling.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::debug;

use creativekit_core::constants::{DROP_ASSET_URL_KEY, ZOOM_STEP_PERCENT};
use creativekit_core::{
    EditorEvent, EventCategory, EventFilter, LoadError, SceneEvent, SubscriptionId,
};

use crate::loader::ImageSource;
use crate::surface::SceneSurface;

/// Key-value payload of an external drag-and-drop.
///
/// Hosts put the dragged asset's URL under [`DROP_ASSET_URL_KEY`]; payloads
/// without that key are silently ignored.
#[derive(Debug, Clone, Default)]
pub struct DropPayload {
    entries: HashMap<String, String>,
}

impl DropPayload {
    /// Creates an empty payload.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a payload carrying one asset URL.
    pub fn asset(url: impl Into<String>) -> Self {
        let mut payload = Self::new();
        payload.set(DROP_ASSET_URL_KEY, url);
        payload
    }

    /// Sets a key-value entry.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Looks up an entry.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

/// Translates host gestures into surface commands.
#[derive(Debug, Default)]
pub struct InteractionController {
    has_selection: Arc<AtomicBool>,
    subscription: Option<SubscriptionId>,
}

impl InteractionController {
    /// Creates a detached controller.
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes to the surface's selection feed. Call once per surface;
    /// re-attaching replaces the previous subscription state.
    pub fn attach(&mut self, surface: &SceneSurface) {
        self.has_selection = Arc::new(AtomicBool::new(!surface.selected_ids().is_empty()));
        let flag = Arc::clone(&self.has_selection);
        let id = surface.events().subscribe(
            EventFilter::Categories(vec![EventCategory::Scene]),
            move |event| {
                if let EditorEvent::Scene(SceneEvent::SelectionChanged { selected }) = event {
                    flag.store(!selected.is_empty(), Ordering::SeqCst);
                }
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

    /// Whether the delete affordance should be enabled.
    pub fn delete_enabled(&self) -> bool {
        self.has_selection.load(Ordering::SeqCst)
    }

    /// One drag tick: moves the object under the pointer to (x, y), which
    /// the surface snaps. Locked objects do not receive pointer input, so
    /// the drag is refused for them.
    pub fn drag_to(&self, surface: &mut SceneSurface, id: u64, x: f64, y: f64) -> bool {
        match surface.store().get(id) {
            Some(obj) if obj.evented => {}
            _ => return false,
        }
        surface.move_object(id, x, y).is_ok()
    }

    /// Steps the zoom up. Idempotent at the upper clamp.
    pub fn zoom_in(&self, surface: &mut SceneSurface) -> u32 {
        let current = surface.zoom_percent();
        surface.set_zoom(current + ZOOM_STEP_PERCENT)
    }

    /// Steps the zoom down. Idempotent at the lower clamp.
    pub fn zoom_out(&self, surface: &mut SceneSurface) -> u32 {
        let current = surface.zoom_percent();
        surface.set_zoom(current.saturating_sub(ZOOM_STEP_PERCENT))
    }

    /// Deletes the selection. Safe no-op with nothing selected.
    pub fn delete_selected(&self, surface: &mut SceneSurface) -> Vec<u64> {
        surface.remove_selected()
    }

    /// Extracts the asset URL from a drop payload, if present.
    pub fn drop_payload_url<'a>(&self, payload: &'a DropPayload) -> Option<&'a str> {
        payload.get(DROP_ASSET_URL_KEY)
    }

    /// Handles an external drop: fetches the payload's asset and places it
    /// on the surface. Payloads without an asset URL are ignored.
    pub async fn drop_asset(
        &self,
        surface: &mut SceneSurface,
        source: &dyn ImageSource,
        payload: &DropPayload,
    ) -> Result<Option<u64>, LoadError> {
        let Some(url) = self.drop_payload_url(payload) else {
            debug!("ignoring drop without asset url");
            return Ok(None);
        };
        let url = url.to_string();
        surface.add_image(source, &url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Color;
    use crate::text_style::TextStyleConfig;

    fn surface() -> SceneSurface {
        SceneSurface::new(320, 568, Color::from_hex("#1a1a2e").unwrap()).unwrap()
    }

    #[test]
    fn test_delete_enabled_follows_selection() {
        let mut s = surface();
        let mut controller = InteractionController::new();
        controller.attach(&s);
        assert!(!controller.delete_enabled());

        s.add_text(&TextStyleConfig::default()).unwrap();
        assert!(controller.delete_enabled());

        controller.delete_selected(&mut s);
        assert!(!controller.delete_enabled());

        // After detaching, later selections no longer reach the flag.
        assert!(controller.detach(&s));
        s.add_text(&TextStyleConfig::default()).unwrap();
        assert!(!controller.delete_enabled());
    }

    #[test]
    fn test_delete_flag_follows_reset_and_background_replace() {
        let mut s = surface();
        let mut controller = InteractionController::new();
        controller.attach(&s);

        s.add_text(&TextStyleConfig::default()).unwrap();
        assert!(controller.delete_enabled());
        s.reset();
        assert!(!controller.delete_enabled());

        s.add_text(&TextStyleConfig::default()).unwrap();
        assert!(controller.delete_enabled());
        let ticket = s.begin_load();
        let image = crate::loader::FetchedImage::from_rgba(image::RgbaImage::new(8, 8));
        s.apply_background(ticket, image, "bg.png").unwrap();
        assert!(!controller.delete_enabled());
    }

    #[test]
    fn test_locked_object_refuses_drag() {
        let mut s = surface();
        let id = s.add_text(&TextStyleConfig::default()).unwrap();
        s.toggle_lock(id).unwrap();

        let controller = InteractionController::new();
        assert!(!controller.drag_to(&mut s, id, 40.0, 40.0));
        assert_eq!(s.store().get(id).unwrap().x, 160.0);
    }

    #[test]
    fn test_zoom_steps_are_idempotent_at_clamps() {
        let mut s = surface();
        let controller = InteractionController::new();

        s.set_zoom(200);
        assert_eq!(controller.zoom_in(&mut s), 200);

        s.set_zoom(50);
        assert_eq!(controller.zoom_out(&mut s), 50);

        s.set_zoom(100);
        assert_eq!(controller.zoom_in(&mut s), 110);
        assert_eq!(controller.zoom_out(&mut s), 100);
    }

    #[tokio::test]
    async fn test_drop_without_asset_key_is_ignored() {
        let mut s = surface();
        let controller = InteractionController::new();
        let source = crate::loader::MemoryImageSource::new();

        let mut payload = DropPayload::new();
        payload.set("text/plain", "hello");
        let placed = controller
            .drop_asset(&mut s, &source, &payload)
            .await
            .unwrap();
        assert_eq!(placed, None);
        assert_eq!(s.object_count(), 0);
    }

    #[tokio::test]
    async fn test_drop_places_asset() {
        let mut s = surface();
        let controller = InteractionController::new();
        let source = crate::loader::MemoryImageSource::new();
        source.insert_solid("shoe.png", 240, 240, Color::WHITE);

        let placed = controller
            .drop_asset(&mut s, &source, &DropPayload::asset("shoe.png"))
            .await
            .unwrap();
        assert!(placed.is_some());
        assert_eq!(s.object_count(), 1);
    }
}
