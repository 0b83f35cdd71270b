//! Asynchronous load behavior: completion order, staleness, failures.

use creativekit_editor::model::Color;
use creativekit_editor::{ImageSource, MemoryImageSource, SceneSurface};

fn story_surface() -> SceneSurface {
    SceneSurface::new(320, 568, Color::from_hex("#1a1a2e").unwrap()).unwrap()
}

#[tokio::test]
async fn load_background_places_cover_fit_image() {
    let mut surface = story_surface();
    let source = MemoryImageSource::new();
    source.insert_solid("bg.png", 800, 600, Color::BLACK);

    let id = surface.load_background(&source, "bg.png").await.unwrap();
    assert!(id.is_some());
    assert_eq!(surface.object_count(), 1);
}

#[tokio::test]
async fn completion_order_decides_stacking() {
    let mut surface = story_surface();
    let source = MemoryImageSource::new();
    source.insert_solid("a.png", 100, 100, Color::WHITE);
    source.insert_solid("b.png", 100, 100, Color::BLACK);

    // Both loads begin before either completes; the apply order, not the
    // begin order, decides the stacking.
    let ticket_a = surface.begin_load();
    let ticket_b = surface.begin_load();
    let image_a = source.fetch("a.png").await.unwrap();
    let image_b = source.fetch("b.png").await.unwrap();

    let b = surface.apply_asset(ticket_b, image_b, "b.png").unwrap();
    let a = surface.apply_asset(ticket_a, image_a, "a.png").unwrap();

    assert_eq!(surface.store().draw_order(), &[b, a]);
}

#[tokio::test]
async fn reset_invalidates_inflight_loads() {
    let mut surface = story_surface();
    let source = MemoryImageSource::new();
    source.insert_solid("slow.png", 100, 100, Color::WHITE);

    let ticket = surface.begin_load();
    let image = source.fetch("slow.png").await.unwrap();
    surface.reset();

    assert_eq!(surface.apply_asset(ticket, image, "slow.png"), None);
    assert_eq!(surface.object_count(), 0);

    // A ticket taken after the reset works normally.
    let ticket = surface.begin_load();
    let image = source.fetch("slow.png").await.unwrap();
    assert!(surface.apply_asset(ticket, image, "slow.png").is_some());
}

#[tokio::test]
async fn stale_background_cannot_clobber_new_session() {
    let mut surface = story_surface();
    let source = MemoryImageSource::new();
    source.insert_solid("old-bg.png", 800, 600, Color::BLACK);
    source.insert_solid("new-bg.png", 640, 640, Color::WHITE);

    let stale = surface.begin_load();
    let old_image = source.fetch("old-bg.png").await.unwrap();

    surface.reset();
    let id = surface.load_background(&source, "new-bg.png").await.unwrap().unwrap();

    // The pre-reset background completion arrives last and is discarded.
    assert_eq!(surface.apply_background(stale, old_image, "old-bg.png"), None);
    assert_eq!(surface.store().draw_order(), &[id]);
}

#[tokio::test]
async fn failed_fetch_leaves_surface_untouched() {
    let mut surface = story_surface();
    let source = MemoryImageSource::new();
    source.insert_solid("bg.png", 800, 600, Color::BLACK);
    surface.load_background(&source, "bg.png").await.unwrap();

    let before = surface.store().draw_order().to_vec();
    let err = surface.add_image(&source, "missing.png").await;
    assert!(err.is_err());
    assert_eq!(surface.store().draw_order(), before.as_slice());
    assert_eq!(surface.object_count(), 1);
}
