//! The scene surface, single source of truth for one editing session.
//!
//! All mutations flow through this type. Each mutation publishes an event on
//! the surface's bus so projections (layer panel, toolbars) stay in sync
//! without polling. Asynchronous image loads are split into two phases: the
//! caller takes a [`LoadTicket`] before awaiting the fetch and presents it
//! with the decoded image afterwards. A ticket taken before a reset is stale
//! and its completion is discarded, so a slow fetch can never resurrect
//! objects into a surface the user has already cleared.

use std::sync::Arc;

use tracing::{debug, info, warn};

use creativekit_core::constants::{
    ASSET_MAX_SIZE, DEFAULT_BACKGROUND_COLOR, DEFAULT_SURFACE_HEIGHT, DEFAULT_SURFACE_WIDTH,
    GRID_SIZE, MAX_ZOOM_PERCENT, MIN_ZOOM_PERCENT,
};
use creativekit_core::{
    EditorEvent, EventBus, ExportEvent, LoadError, SceneError, SceneEvent,
};

use crate::loader::{FetchedImage, ImageSource};
use crate::model::{Color, ImageObject, ObjectKind, SceneObject};
use crate::object_store::ObjectStore;
use crate::renderer;
use crate::selection_manager::SelectionManager;
use crate::text_style::TextStyleConfig;

/// Proof that a load began against the current surface generation.
///
/// Taken synchronously before awaiting a fetch; presented to the apply
/// phase afterwards. A ticket outlived by a [`SceneSurface::reset`] is
/// stale and the apply phase discards it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    epoch: u64,
}

/// One editing session's scene state.
pub struct SceneSurface {
    store: ObjectStore,
    selection: SelectionManager,
    width: u32,
    height: u32,
    background: Color,
    zoom_percent: u32,
    show_grid: bool,
    snap_to_grid: bool,
    grid_size: f64,
    epoch: u64,
    events: Arc<EventBus>,
}

impl SceneSurface {
    /// Creates an empty surface. Dimensions must be positive.
    pub fn new(width: u32, height: u32, background: Color) -> Result<Self, SceneError> {
        if width == 0 || height == 0 {
            return Err(SceneError::InvalidDimensions {
                width: width as i64,
                height: height as i64,
            });
        }
        info!(width, height, "creating scene surface");
        Ok(Self {
            store: ObjectStore::new(),
            selection: SelectionManager::new(),
            width,
            height,
            background,
            zoom_percent: 100,
            // Snapping starts on; the grid itself starts hidden.
            show_grid: false,
            snap_to_grid: true,
            grid_size: GRID_SIZE,
            epoch: 0,
            events: Arc::new(EventBus::new()),
        })
    }

    /// Creates a surface in the default story format with the default
    /// background fill.
    pub fn story_format() -> Self {
        let background = Color::from_hex(DEFAULT_BACKGROUND_COLOR).unwrap_or(Color::BLACK);
        Self::new(DEFAULT_SURFACE_WIDTH, DEFAULT_SURFACE_HEIGHT, background)
            .expect("default surface dimensions are valid")
    }

    /// Surface width in units.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Surface height in units.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Current background fill.
    pub fn background(&self) -> Color {
        self.background
    }

    /// Current display zoom in percent.
    pub fn zoom_percent(&self) -> u32 {
        self.zoom_percent
    }

    /// Whether the alignment grid is drawn in previews.
    pub fn show_grid(&self) -> bool {
        self.show_grid
    }

    /// Shows or hides the preview grid. Display-only, never exported.
    pub fn set_show_grid(&mut self, show: bool) {
        self.show_grid = show;
    }

    /// Whether drags snap to the grid.
    pub fn snap_to_grid(&self) -> bool {
        self.snap_to_grid
    }

    /// Enables or disables grid snapping for subsequent moves.
    pub fn set_snap_to_grid(&mut self, snap: bool) {
        self.snap_to_grid = snap;
    }

    /// Grid cell size in surface units.
    pub fn grid_size(&self) -> f64 {
        self.grid_size
    }

    /// The surface's event bus, for subscribing projections.
    pub fn events(&self) -> &Arc<EventBus> {
        &self.events
    }

    /// Read access to the object store.
    pub fn store(&self) -> &ObjectStore {
        &self.store
    }

    /// Number of objects on the surface.
    pub fn object_count(&self) -> usize {
        self.store.len()
    }

    // ----- async loading ---------------------------------------------------

    /// Opens a load against the current surface generation.
    pub fn begin_load(&self) -> LoadTicket {
        LoadTicket { epoch: self.epoch }
    }

    /// Installs a fetched image as the background.
    ///
    /// Replacing the background clears every object on the surface first
    /// and restores the default background fill; the new background becomes
    /// the sole object. It stays an ordinary object that can be selected,
    /// dragged, and deleted. Returns the new object's id, or `None` when
    /// the ticket is stale.
    pub fn apply_background(
        &mut self,
        ticket: LoadTicket,
        image: FetchedImage,
        url: &str,
    ) -> Option<u64> {
        if ticket.epoch != self.epoch {
            warn!(url, "discarding stale background load");
            return None;
        }

        let had_selection = self.selection.selected_count(&self.store) > 0;
        self.store.clear();
        self.selection.deselect_all(&mut self.store);
        self.background = Color::from_hex(DEFAULT_BACKGROUND_COLOR).unwrap_or(Color::BLACK);

        let scale = f64::max(
            self.width as f64 / image.width() as f64,
            self.height as f64 / image.height() as f64,
        );
        let id = self.store.generate_id();
        let object = SceneObject::new(
            id,
            ObjectKind::Image(ImageObject::new(url, image.pixels())),
            self.width as f64 / 2.0,
            self.height as f64 / 2.0,
            scale,
        );
        self.store.insert(object);

        info!(url, id, scale, "background replaced");
        self.publish(SceneEvent::BackgroundReplaced { id });
        if had_selection {
            self.publish_selection();
        }
        Some(id)
    }

    /// Places a fetched image as an asset at the surface center.
    ///
    /// The asset is scaled to fit a square of [`ASSET_MAX_SIZE`] units,
    /// appended to the top of the z-order, and becomes the sole selection.
    /// Returns the new object's id, or `None` when the ticket is stale.
    pub fn apply_asset(
        &mut self,
        ticket: LoadTicket,
        image: FetchedImage,
        url: &str,
    ) -> Option<u64> {
        if ticket.epoch != self.epoch {
            warn!(url, "discarding stale asset load");
            return None;
        }

        let scale = f64::min(
            ASSET_MAX_SIZE / image.width() as f64,
            ASSET_MAX_SIZE / image.height() as f64,
        );
        let id = self.store.generate_id();
        let object = SceneObject::new(
            id,
            ObjectKind::Image(ImageObject::new(url, image.pixels())),
            self.width as f64 / 2.0,
            self.height as f64 / 2.0,
            scale,
        );
        self.store.insert(object);
        self.selection.select_only(&mut self.store, id);

        debug!(url, id, scale, "asset placed");
        self.publish(SceneEvent::ObjectAdded {
            id,
            kind: "image".to_string(),
        });
        self.publish_selection();
        Some(id)
    }

    /// Fetches an image and installs it as the background.
    ///
    /// Returns `Ok(None)` when the surface was reset while the fetch was in
    /// flight. A fetch or decode failure leaves the surface untouched.
    pub async fn load_background(
        &mut self,
        source: &dyn ImageSource,
        url: &str,
    ) -> Result<Option<u64>, LoadError> {
        let ticket = self.begin_load();
        let image = source.fetch(url).await?;
        Ok(self.apply_background(ticket, image, url))
    }

    /// Fetches an image and places it as an asset.
    ///
    /// Returns `Ok(None)` when the surface was reset while the fetch was in
    /// flight. A fetch or decode failure leaves the surface untouched.
    pub async fn add_image(
        &mut self,
        source: &dyn ImageSource,
        url: &str,
    ) -> Result<Option<u64>, LoadError> {
        let ticket = self.begin_load();
        let image = source.fetch(url).await?;
        Ok(self.apply_asset(ticket, image, url))
    }

    // ----- text ------------------------------------------------------------

    /// Compiles a style configuration into a text object at the surface
    /// center. The new object becomes the sole selection.
    pub fn add_text(&mut self, config: &TextStyleConfig) -> Result<u64, SceneError> {
        let text = config.compile(self.width)?;
        let id = self.store.generate_id();
        let object = SceneObject::new(
            id,
            ObjectKind::Text(text),
            self.width as f64 / 2.0,
            self.height as f64 / 2.0,
            1.0,
        );
        self.store.insert(object);
        self.selection.select_only(&mut self.store, id);

        debug!(id, "text object added");
        self.publish(SceneEvent::ObjectAdded {
            id,
            kind: "text".to_string(),
        });
        self.publish_selection();
        Ok(id)
    }

    // ----- selection -------------------------------------------------------

    /// Makes the given object the sole selection. Returns false and leaves
    /// the selection unchanged for a locked or unknown object.
    pub fn select_object(&mut self, id: u64) -> bool {
        let changed = self.selection.select_only(&mut self.store, id);
        if changed {
            self.publish_selection();
        }
        changed
    }

    /// Clears the selection.
    pub fn clear_selection(&mut self) {
        if self.selection.selected_count(&self.store) == 0 {
            return;
        }
        self.selection.deselect_all(&mut self.store);
        self.publish_selection();
    }

    /// Selected ids in draw order.
    pub fn selected_ids(&self) -> Vec<u64> {
        self.selection.selected_ids(&self.store)
    }

    /// The most recently selected object.
    pub fn primary_selection(&self) -> Option<u64> {
        self.selection.primary()
    }

    // ----- removal and reset ----------------------------------------------

    /// Removes every selected object. Safe no-op with nothing selected.
    pub fn remove_selected(&mut self) -> Vec<u64> {
        let removed = self.selection.remove_selected(&mut self.store);
        for &id in &removed {
            self.publish(SceneEvent::ObjectRemoved { id });
        }
        if !removed.is_empty() {
            self.publish_selection();
        }
        removed
    }

    /// Removes one object by id.
    pub fn remove_object(&mut self, id: u64) -> Result<(), SceneError> {
        let removed = self
            .store
            .remove(id)
            .ok_or(SceneError::ObjectNotFound { id })?;
        if self.selection.primary() == Some(id) {
            self.selection.deselect_all(&mut self.store);
        }
        self.publish(SceneEvent::ObjectRemoved { id });
        if removed.selected {
            self.publish_selection();
        }
        Ok(())
    }

    /// Returns the surface to its empty state: no objects, default
    /// background, 100% zoom. In-flight loads become stale.
    pub fn reset(&mut self) {
        let had_selection = self.selection.selected_count(&self.store) > 0;
        self.store.clear();
        self.selection.deselect_all(&mut self.store);
        self.background =
            Color::from_hex(DEFAULT_BACKGROUND_COLOR).unwrap_or(Color::BLACK);
        self.zoom_percent = 100;
        self.epoch += 1;
        info!(epoch = self.epoch, "surface reset");
        self.publish(SceneEvent::Cleared);
        if had_selection {
            self.publish_selection();
        }
    }

    // ----- z-order ---------------------------------------------------------

    /// Moves an object one step toward the top. No-op at the top.
    pub fn bring_forward(&mut self, id: u64) -> bool {
        let moved = self.store.bring_forward(id);
        if moved {
            self.publish(SceneEvent::OrderChanged);
        }
        moved
    }

    /// Moves an object one step toward the bottom. No-op at the bottom.
    pub fn send_backward(&mut self, id: u64) -> bool {
        let moved = self.store.send_backward(id);
        if moved {
            self.publish(SceneEvent::OrderChanged);
        }
        moved
    }

    /// Moves an object to the top of the stack.
    pub fn bring_to_front(&mut self, id: u64) -> bool {
        let moved = self.store.bring_to_front(id);
        if moved {
            self.publish(SceneEvent::OrderChanged);
        }
        moved
    }

    // ----- view ------------------------------------------------------------

    /// Sets the display zoom, clamped to the permitted range. Returns the
    /// applied value. Display-only; object coordinates are unaffected.
    pub fn set_zoom(&mut self, percent: u32) -> u32 {
        let clamped = percent.clamp(MIN_ZOOM_PERCENT, MAX_ZOOM_PERCENT);
        if clamped != self.zoom_percent {
            self.zoom_percent = clamped;
            self.publish(SceneEvent::ZoomChanged { percent: clamped });
        }
        clamped
    }

    // ----- per-object mutations --------------------------------------------

    /// Moves an object's center, snapping to the grid when snapping is on.
    /// Returns the applied coordinates, which may be negative; objects may
    /// sit partly or wholly outside the surface.
    pub fn move_object(&mut self, id: u64, x: f64, y: f64) -> Result<(f64, f64), SceneError> {
        let (x, y) = if self.snap_to_grid {
            (self.snap(x), self.snap(y))
        } else {
            (x, y)
        };
        let object = self
            .store
            .get_mut(id)
            .ok_or(SceneError::ObjectNotFound { id })?;
        object.x = x;
        object.y = y;
        self.publish(SceneEvent::ObjectMoved { id, x, y });
        Ok((x, y))
    }

    /// Flips an object's visibility. Hidden objects keep their z-order slot
    /// and selection state. Returns the new visibility.
    pub fn toggle_visibility(&mut self, id: u64) -> Result<bool, SceneError> {
        let object = self
            .store
            .get_mut(id)
            .ok_or(SceneError::ObjectNotFound { id })?;
        object.visible = !object.visible;
        let visible = object.visible;
        self.publish(SceneEvent::VisibilityChanged { id, visible });
        Ok(visible)
    }

    /// Flips an object's locked state. Locking a selected object drops it
    /// from the selection. Returns the new locked state.
    pub fn toggle_lock(&mut self, id: u64) -> Result<bool, SceneError> {
        let locked = {
            let object = self
                .store
                .get_mut(id)
                .ok_or(SceneError::ObjectNotFound { id })?;
            let locked = !object.locked();
            object.set_locked(locked);
            locked
        };
        if locked {
            let was_selected = self
                .store
                .get_mut(id)
                .map(|o| std::mem::take(&mut o.selected))
                .unwrap_or(false);
            if was_selected {
                if self.selection.primary() == Some(id) {
                    self.selection.deselect_all(&mut self.store);
                }
                self.publish_selection();
            }
        }
        self.publish(SceneEvent::LockChanged { id, locked });
        Ok(locked)
    }

    // ----- export ----------------------------------------------------------

    /// Renders the scene and encodes it as PNG at `multiplier` times the
    /// surface resolution. The preview grid and selection chrome are never
    /// part of the output.
    pub fn export_png(&self, multiplier: u32) -> Result<Vec<u8>, SceneError> {
        let result = renderer::render_scene(self, multiplier).and_then(|pixmap| {
            pixmap.encode_png().map_err(|e| SceneError::ExportFailed {
                reason: e.to_string(),
            })
        });
        match &result {
            Ok(bytes) => {
                self.events
                    .publish(EditorEvent::Export(ExportEvent::Completed {
                        width: self.width * multiplier,
                        height: self.height * multiplier,
                        bytes: bytes.len(),
                    }))
                    .ok();
            }
            Err(e) => {
                self.events
                    .publish(EditorEvent::Export(ExportEvent::Failed {
                        reason: e.to_string(),
                    }))
                    .ok();
            }
        }
        result
    }

    // ----- internals -------------------------------------------------------

    fn snap(&self, value: f64) -> f64 {
        (value / self.grid_size).round() * self.grid_size
    }

    fn publish(&self, event: SceneEvent) {
        self.events.publish(EditorEvent::Scene(event)).ok();
    }

    fn publish_selection(&self) {
        self.publish(SceneEvent::SelectionChanged {
            selected: self.selection.selected_ids(&self.store),
        });
    }
}

impl std::fmt::Debug for SceneSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneSurface")
            .field("size", &(self.width, self.height))
            .field("objects", &self.store.len())
            .field("zoom_percent", &self.zoom_percent)
            .field("epoch", &self.epoch)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface() -> SceneSurface {
        SceneSurface::new(320, 568, Color::from_hex("#1a1a2e").unwrap()).unwrap()
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        let err = SceneSurface::new(0, 568, Color::BLACK).unwrap_err();
        assert!(matches!(
            err,
            SceneError::InvalidDimensions { width: 0, .. }
        ));
    }

    #[test]
    fn test_snap_rounds_to_grid_multiples() {
        let mut s = surface();
        let id = s.add_text(&TextStyleConfig::default()).unwrap();

        let (x, y) = s.move_object(id, 33.0, 47.0).unwrap();
        assert_eq!((x, y), (40.0, 40.0));

        // Negative coordinates snap too; off-surface placement is allowed.
        let (x, _) = s.move_object(id, -31.0, 0.0).unwrap();
        assert_eq!(x, -40.0);
    }

    #[test]
    fn test_snap_disabled_keeps_exact_coordinates() {
        let mut s = surface();
        let id = s.add_text(&TextStyleConfig::default()).unwrap();
        s.set_snap_to_grid(false);
        let (x, y) = s.move_object(id, 33.5, 47.25).unwrap();
        assert_eq!((x, y), (33.5, 47.25));
    }

    #[test]
    fn test_zoom_clamps_to_range() {
        let mut s = surface();
        assert_eq!(s.set_zoom(500), 200);
        assert_eq!(s.set_zoom(10), 50);
        assert_eq!(s.set_zoom(130), 130);
    }

    #[test]
    fn test_new_text_is_sole_selection() {
        let mut s = surface();
        let a = s.add_text(&TextStyleConfig::default()).unwrap();
        let b = s.add_text(&TextStyleConfig::default()).unwrap();
        assert_ne!(a, b);
        assert_eq!(s.selected_ids(), vec![b]);
    }

    #[test]
    fn test_reset_restores_defaults_and_bumps_epoch() {
        let mut s = surface();
        s.add_text(&TextStyleConfig::default()).unwrap();
        s.set_zoom(150);
        let ticket = s.begin_load();

        s.reset();
        assert_eq!(s.object_count(), 0);
        assert_eq!(s.zoom_percent(), 100);

        // The pre-reset ticket is stale now.
        let image = FetchedImage::from_rgba(image::RgbaImage::new(8, 8));
        assert_eq!(s.apply_asset(ticket, image, "late.png"), None);
        assert_eq!(s.object_count(), 0);
    }

    #[test]
    fn test_background_replace_clears_scene() {
        let mut s = surface();
        s.add_text(&TextStyleConfig::default()).unwrap();
        s.add_text(&TextStyleConfig::default()).unwrap();

        let ticket = s.begin_load();
        let image = FetchedImage::from_rgba(image::RgbaImage::new(800, 600));
        let id = s.apply_background(ticket, image, "bg.png").unwrap();

        assert_eq!(s.object_count(), 1);
        let bg = s.store().get(id).unwrap();
        // Cover fit: max(320/800, 568/600).
        assert!((bg.scale_x - 568.0 / 600.0).abs() < 1e-9);
    }

    #[test]
    fn test_background_stays_editable() {
        let mut s = surface();
        let ticket = s.begin_load();
        let image = FetchedImage::from_rgba(image::RgbaImage::new(800, 600));
        let id = s.apply_background(ticket, image, "bg.png").unwrap();

        // The background is an ordinary object: select, drag, delete.
        assert!(s.select_object(id));
        let (x, y) = s.move_object(id, 93.0, 47.0).unwrap();
        assert_eq!((x, y), (100.0, 40.0));
        assert_eq!(s.remove_selected(), vec![id]);
        assert_eq!(s.object_count(), 0);
    }

    #[test]
    fn test_background_replace_restores_default_fill() {
        let mut s = SceneSurface::new(320, 568, Color::from_hex("#ff0000").unwrap()).unwrap();
        let ticket = s.begin_load();
        let image = FetchedImage::from_rgba(image::RgbaImage::new(800, 600));
        s.apply_background(ticket, image, "bg.png").unwrap();
        assert_eq!(s.background(), Color::from_hex("#1a1a2e").unwrap());
    }

    #[test]
    fn test_asset_fits_within_bounding_square() {
        let mut s = surface();
        let ticket = s.begin_load();
        let image = FetchedImage::from_rgba(image::RgbaImage::new(1000, 500));
        let id = s.apply_asset(ticket, image, "wide.png").unwrap();

        let obj = s.store().get(id).unwrap();
        assert!((obj.scale_x - 0.12).abs() < 1e-9);
        assert_eq!(s.selected_ids(), vec![id]);
    }

    #[test]
    fn test_locked_object_cannot_be_selected() {
        let mut s = surface();
        let id = s.add_text(&TextStyleConfig::default()).unwrap();
        s.toggle_lock(id).unwrap();
        assert!(!s.select_object(id));
        assert!(s.selected_ids().is_empty());
    }

    #[test]
    fn test_hidden_object_keeps_slot_and_selection() {
        let mut s = surface();
        let a = s.add_text(&TextStyleConfig::default()).unwrap();
        let b = s.add_text(&TextStyleConfig::default()).unwrap();
        assert!(!s.toggle_visibility(b).unwrap());
        assert_eq!(s.store().draw_order(), &[a, b]);
        assert_eq!(s.selected_ids(), vec![b]);
        assert!(s.toggle_visibility(b).unwrap());
    }

    #[test]
    fn test_clearing_mutations_publish_empty_selection() {
        use creativekit_core::{EventCategory, EventFilter};
        use std::sync::atomic::{AtomicUsize, Ordering};

        let mut s = surface();
        let empties = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&empties);
        s.events().subscribe(
            EventFilter::Categories(vec![EventCategory::Scene]),
            move |event| {
                if let EditorEvent::Scene(SceneEvent::SelectionChanged { selected }) = event {
                    if selected.is_empty() {
                        counter.fetch_add(1, Ordering::SeqCst);
                    }
                }
            },
        );

        s.add_text(&TextStyleConfig::default()).unwrap();
        s.reset();
        assert_eq!(empties.load(Ordering::SeqCst), 1);

        let id = s.add_text(&TextStyleConfig::default()).unwrap();
        s.remove_object(id).unwrap();
        assert_eq!(empties.load(Ordering::SeqCst), 2);

        s.add_text(&TextStyleConfig::default()).unwrap();
        let ticket = s.begin_load();
        let image = FetchedImage::from_rgba(image::RgbaImage::new(8, 8));
        s.apply_background(ticket, image, "bg.png").unwrap();
        assert_eq!(empties.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_remove_selected_with_empty_selection_is_noop() {
        let mut s = surface();
        s.add_text(&TextStyleConfig::default()).unwrap();
        s.clear_selection();
        assert!(s.remove_selected().is_empty());
        assert_eq!(s.object_count(), 1);
    }
}
