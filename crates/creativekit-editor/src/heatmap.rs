//! Attention heatmap overlay.
//!
//! Renders attention regions as radial-gradient hotspots over a transparent
//! pixmap the host composites above the preview. When the attention service
//! is unavailable the analysis degrades to a deterministic fallback set, so
//! the feature never blocks on a collaborator.

use tiny_skia::{
    FillRule, GradientStop, Paint, PathBuilder, Pixmap, Point, RadialGradient, SpreadMode,
    Transform,
};
use tracing::warn;

use creativekit_core::{
    AttentionAnalysis, AttentionRegion, AttentionService, EditorEvent, EventBus, ServiceEvent,
};

/// Maps intensity to a hue from blue (cold, 240) to red (hot, 0).
fn intensity_hue(intensity: f64) -> f64 {
    (1.0 - intensity) * 240.0
}

/// HSL to RGB for fully saturated, half-lightness heatmap colors.
fn hue_to_rgb(hue: f64) -> (u8, u8, u8) {
    let h = (hue / 60.0).rem_euclid(6.0);
    let x = 1.0 - (h.rem_euclid(2.0) - 1.0).abs();
    let (r, g, b) = match h as u32 {
        0 => (1.0, x, 0.0),
        1 => (x, 1.0, 0.0),
        2 => (0.0, 1.0, x),
        3 => (0.0, x, 1.0),
        4 => (x, 0.0, 1.0),
        _ => (1.0, 0.0, x),
    };
    ((r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8)
}

/// Renders attention regions into a transparent overlay of the given pixel
/// size. Regions are painted strongest-last so hot zones stay readable.
pub fn render_attention_overlay(
    regions: &[AttentionRegion],
    width: u32,
    height: u32,
) -> Option<Pixmap> {
    let mut pixmap = Pixmap::new(width, height)?;

    let mut ordered: Vec<&AttentionRegion> = regions.iter().collect();
    ordered.sort_by(|a, b| a.intensity.total_cmp(&b.intensity));

    for region in ordered {
        let w = region.width * width as f64;
        let h = region.height * height as f64;
        let cx = (region.x * width as f64 + w / 2.0) as f32;
        let cy = (region.y * height as f64 + h / 2.0) as f32;
        let radius = (w.max(h) / 1.5) as f32;
        if radius <= 0.0 {
            continue;
        }

        let (r, g, b) = hue_to_rgb(intensity_hue(region.intensity));
        let alpha = |f: f64| ((region.intensity * f).clamp(0.0, 1.0) * 255.0) as u8;
        let stops = vec![
            GradientStop::new(0.0, tiny_skia::Color::from_rgba8(r, g, b, alpha(0.6))),
            GradientStop::new(0.5, tiny_skia::Color::from_rgba8(r, g, b, alpha(0.3))),
            GradientStop::new(1.0, tiny_skia::Color::from_rgba8(r, g, b, 0)),
        ];
        let Some(shader) = RadialGradient::new(
            Point::from_xy(cx, cy),
            Point::from_xy(cx, cy),
            radius,
            stops,
            SpreadMode::Pad,
            Transform::identity(),
        ) else {
            continue;
        };

        let paint = Paint {
            shader,
            anti_alias: true,
            ..Paint::default()
        };

        let Some(circle) = PathBuilder::from_circle(cx, cy, radius) else {
            continue;
        };
        pixmap.fill_path(&circle, &paint, FillRule::Winding, Transform::identity(), None);
    }

    Some(pixmap)
}

/// The deterministic region set used when the attention service fails.
pub fn fallback_regions() -> Vec<AttentionRegion> {
    let region = |x, y, width, height, intensity, label: &str| AttentionRegion {
        x,
        y,
        width,
        height,
        intensity,
        label: label.to_string(),
    };
    vec![
        region(0.3, 0.15, 0.4, 0.25, 0.95, "Primary Focus"),
        region(0.25, 0.7, 0.5, 0.15, 0.85, "CTA Zone"),
        region(0.05, 0.05, 0.2, 0.1, 0.6, "Brand Area"),
        region(0.1, 0.4, 0.3, 0.2, 0.5, "Secondary"),
        region(0.6, 0.45, 0.3, 0.2, 0.45, "Secondary"),
    ]
}

/// The full fallback analysis, regions plus canned insights.
pub fn fallback_analysis() -> AttentionAnalysis {
    AttentionAnalysis {
        regions: fallback_regions(),
        ctr_prediction: 2.4,
        insights: vec![
            "Strong visual hierarchy detected in the upper third".to_string(),
            "CTA placement benefits from high attention density".to_string(),
            "Consider increasing contrast in secondary zones".to_string(),
            "Brand area may need a larger safe margin".to_string(),
        ],
    }
}

/// Runs the attention service, degrading to the fallback analysis on any
/// failure. The boolean reports whether fallback data was used.
pub async fn analyze_or_fallback(
    service: &dyn AttentionService,
    events: &EventBus,
    image_url: &str,
) -> (AttentionAnalysis, bool) {
    let (analysis, fallback) = match service.analyze(image_url).await {
        Ok(analysis) => (analysis, false),
        Err(e) => {
            warn!(image_url, error = %e, "attention analysis failed, using fallback data");
            (fallback_analysis(), true)
        }
    };
    events
        .publish(EditorEvent::Service(ServiceEvent::AttentionAnalyzed {
            url: image_url.to_string(),
            fallback,
        }))
        .ok();
    (analysis, fallback)
}
