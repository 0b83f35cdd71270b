//! Property tests for grid snapping and zoom clamping.

use proptest::prelude::*;

use creativekit_editor::model::Color;
use creativekit_editor::text_style::TextStyleConfig;
use creativekit_editor::SceneSurface;

fn surface_with_object() -> (SceneSurface, u64) {
    let mut surface = SceneSurface::new(320, 568, Color::from_hex("#1a1a2e").unwrap()).unwrap();
    let id = surface.add_text(&TextStyleConfig::default()).unwrap();
    (surface, id)
}

proptest! {
    #[test]
    fn snapped_coordinates_are_grid_multiples(
        x in -2000.0f64..2000.0,
        y in -2000.0f64..2000.0,
    ) {
        let (mut surface, id) = surface_with_object();
        let (sx, sy) = surface.move_object(id, x, y).unwrap();

        let grid = surface.grid_size();
        prop_assert!((sx / grid - (sx / grid).round()).abs() < 1e-9);
        prop_assert!((sy / grid - (sy / grid).round()).abs() < 1e-9);
        // Snapping moves a point by at most half a cell per axis.
        prop_assert!((sx - x).abs() <= grid / 2.0 + 1e-9);
        prop_assert!((sy - y).abs() <= grid / 2.0 + 1e-9);
    }

    #[test]
    fn snapping_is_idempotent(
        x in -2000.0f64..2000.0,
        y in -2000.0f64..2000.0,
    ) {
        let (mut surface, id) = surface_with_object();
        let first = surface.move_object(id, x, y).unwrap();
        let second = surface.move_object(id, first.0, first.1).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn unsnapped_moves_are_exact(
        x in -2000.0f64..2000.0,
        y in -2000.0f64..2000.0,
    ) {
        let (mut surface, id) = surface_with_object();
        surface.set_snap_to_grid(false);
        let applied = surface.move_object(id, x, y).unwrap();
        prop_assert_eq!(applied, (x, y));
    }

    #[test]
    fn zoom_is_always_clamped(percent in 0u32..1000) {
        let (mut surface, _) = surface_with_object();
        let applied = surface.set_zoom(percent);
        prop_assert!((50..=200).contains(&applied));
        prop_assert_eq!(applied, surface.zoom_percent());
    }
}
