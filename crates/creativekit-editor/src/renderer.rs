//! Scene rasterization using tiny-skia.
//!
//! Two entry points: [`render_scene`] produces the clean composition used
//! for export (no grid, no selection chrome) at an integer resolution
//! multiplier, and [`render_preview`] produces the on-screen frame with the
//! alignment grid and selection outlines on top.
//!
//! Text is rasterized glyph-by-glyph with rusttype coverage blended into
//! the pixmap. When the requested font cannot be resolved the text box is
//! laid out with approximate metrics and glyph painting is skipped, so
//! layout-dependent behavior stays deterministic on headless systems.

use rusttype::{point as rt_point, Font, Scale};
use tiny_skia::{IntSize, Paint, PathBuilder, Pixmap, PixmapPaint, Rect, Stroke, Transform};

use creativekit_core::SceneError;

use crate::font_manager;
use crate::model::{Color, ImageObject, ObjectKind, SceneObject, TextAlign, TextObject};
use crate::surface::SceneSurface;

fn to_skia(color: Color) -> tiny_skia::Color {
    tiny_skia::Color::from_rgba8(color.r, color.g, color.b, color.a)
}

fn grid_color() -> tiny_skia::Color {
    tiny_skia::Color::from_rgba8(255, 255, 255, 26)
}

fn selection_color() -> tiny_skia::Color {
    tiny_skia::Color::from_rgba8(0, 212, 255, 255)
}

/// Renders the clean composition at `multiplier` times the surface size.
pub fn render_scene(surface: &SceneSurface, multiplier: u32) -> Result<Pixmap, SceneError> {
    if multiplier == 0 {
        return Err(SceneError::ExportFailed {
            reason: "zero resolution multiplier".to_string(),
        });
    }
    let width = surface.width() * multiplier;
    let height = surface.height() * multiplier;
    let mut pixmap = Pixmap::new(width, height).ok_or_else(|| SceneError::ExportFailed {
        reason: format!("cannot allocate {}x{} pixmap", width, height),
    })?;
    pixmap.fill(to_skia(surface.background()));

    let m = multiplier as f32;
    for object in surface.store().iter() {
        if !object.visible {
            continue;
        }
        match &object.kind {
            ObjectKind::Image(img) => draw_image(&mut pixmap, object, img, m),
            ObjectKind::Text(text) => draw_text(&mut pixmap, object, text, m),
        }
    }
    Ok(pixmap)
}

/// Renders the on-screen frame: the scene plus grid and selection chrome.
pub fn render_preview(surface: &SceneSurface) -> Result<Pixmap, SceneError> {
    let mut pixmap = render_scene(surface, 1)?;
    if surface.show_grid() {
        draw_grid(&mut pixmap, surface.grid_size() as f32);
    }
    for object in surface.store().iter() {
        if object.selected {
            draw_selection_outline(&mut pixmap, object);
        }
    }
    Ok(pixmap)
}

// ----- images ---------------------------------------------------------------

fn draw_image(pixmap: &mut Pixmap, object: &SceneObject, img: &ImageObject, m: f32) {
    let Some(pixels) = &img.pixels else {
        return;
    };
    let Some(src) = premultiplied_pixmap(pixels) else {
        return;
    };

    let sx = object.scale_x as f32 * m;
    let sy = object.scale_y as f32 * m;
    let tx = (object.x as f32 - img.natural_width as f32 * object.scale_x as f32 / 2.0) * m;
    let ty = (object.y as f32 - img.natural_height as f32 * object.scale_y as f32 / 2.0) * m;
    let transform = Transform::from_row(sx, 0.0, 0.0, sy, tx, ty);

    pixmap.draw_pixmap(0, 0, src.as_ref(), &PixmapPaint::default(), transform, None);
}

fn premultiplied_pixmap(pixels: &image::RgbaImage) -> Option<Pixmap> {
    let mut data = Vec::with_capacity(pixels.as_raw().len());
    for px in pixels.pixels() {
        let [r, g, b, a] = px.0;
        let c = tiny_skia::ColorU8::from_rgba(r, g, b, a).premultiply();
        data.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    Pixmap::from_vec(data, IntSize::from_wh(pixels.width(), pixels.height())?)
}

// ----- text -----------------------------------------------------------------

struct TextLayout {
    /// Lines with their measured widths, in device pixels.
    lines: Vec<(String, f32)>,
    line_height: f32,
    ascent: f32,
}

impl TextLayout {
    fn total_height(&self) -> f32 {
        self.lines.len() as f32 * self.line_height
    }
}

fn measure_line(font: Option<&Font<'_>>, text: &str, size: f32) -> f32 {
    match font {
        Some(font) => {
            let scale = Scale::uniform(size);
            font.layout(text, scale, rt_point(0.0, 0.0))
                .map(|g| g.unpositioned().h_metrics().advance_width)
                .sum()
        }
        // Approximate advance for layout without a rasterizable face.
        None => text.chars().count() as f32 * size * 0.6,
    }
}

fn layout_text(text: &TextObject, font: Option<&Font<'_>>, m: f32) -> TextLayout {
    let size = text.font_size as f32 * m;
    let wrap_width = text.wrap_width as f32 * m;

    let (line_height, ascent) = match font {
        Some(font) => {
            let vm = font.v_metrics(Scale::uniform(size));
            (vm.ascent - vm.descent + vm.line_gap, vm.ascent)
        }
        None => (size * 1.2, size * 0.8),
    };

    let mut lines: Vec<(String, f32)> = Vec::new();
    for paragraph in text.text.split('\n') {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{current} {word}")
            };
            if measure_line(font, &candidate, size) <= wrap_width || current.is_empty() {
                current = candidate;
            } else {
                let width = measure_line(font, &current, size);
                lines.push((current, width));
                current = word.to_string();
            }
        }
        let width = measure_line(font, &current, size);
        lines.push((current, width));
    }

    TextLayout {
        lines,
        line_height,
        ascent,
    }
}

fn line_origin_x(align: TextAlign, box_left: f32, wrap_width: f32, line_width: f32) -> f32 {
    match align {
        TextAlign::Left => box_left,
        TextAlign::Center => box_left + (wrap_width - line_width) / 2.0,
        TextAlign::Right => box_left + wrap_width - line_width,
    }
}

fn draw_text(pixmap: &mut Pixmap, object: &SceneObject, text: &TextObject, m: f32) {
    let font = font_manager::get_font_for(&text.font_family, text.weight);
    let layout = layout_text(text, font, m);
    let Some(font) = font else {
        return;
    };

    let size = text.font_size as f32 * m;
    let wrap_width = text.wrap_width as f32 * m;
    let box_left = object.x as f32 * m - wrap_width / 2.0;
    let top = object.y as f32 * m - layout.total_height() / 2.0;

    if let Some(shadow) = &text.shadow {
        let dx = shadow.offset_x as f32 * m;
        let dy = shadow.offset_y as f32 * m;
        let radius = (shadow.blur as f32 * m / 2.0).round() as i32;
        draw_blurred_pass(
            pixmap, font, &layout, size, box_left, top, text.align, wrap_width, shadow.color, dx,
            dy, radius,
        );
    }

    if let Some(stroke) = &text.stroke {
        // Painted beneath the fill: offset copies around a circle stand in
        // for a true glyph outline.
        let radius = stroke.width as f32 * m / 2.0;
        for step in 0..8 {
            let angle = step as f32 * std::f32::consts::FRAC_PI_4;
            let dx = radius * angle.cos();
            let dy = radius * angle.sin();
            draw_glyph_pass(
                pixmap, font, &layout, size, box_left, top, text.align, wrap_width, stroke.color,
                dx, dy,
            );
        }
    }

    draw_glyph_pass(
        pixmap, font, &layout, size, box_left, top, text.align, wrap_width, text.fill, 0.0, 0.0,
    );
}

#[allow(clippy::too_many_arguments)]
fn draw_glyph_pass(
    pixmap: &mut Pixmap,
    font: &Font<'_>,
    layout: &TextLayout,
    size: f32,
    box_left: f32,
    top: f32,
    align: TextAlign,
    wrap_width: f32,
    color: Color,
    dx: f32,
    dy: f32,
) {
    let scale = Scale::uniform(size);
    for (i, (line, line_width)) in layout.lines.iter().enumerate() {
        let origin_x = line_origin_x(align, box_left, wrap_width, *line_width) + dx;
        let baseline = top + i as f32 * layout.line_height + layout.ascent + dy;
        for glyph in font.layout(line, scale, rt_point(origin_x, baseline)) {
            if let Some(bb) = glyph.pixel_bounding_box() {
                glyph.draw(|gx, gy, v| {
                    let px = gx as i32 + bb.min.x;
                    let py = gy as i32 + bb.min.y;
                    blend_pixel(pixmap, px, py, color, v);
                });
            }
        }
    }
}

/// Shadow pass: glyph coverage collected into a mask, box-blurred twice,
/// then composited in the shadow color.
#[allow(clippy::too_many_arguments)]
fn draw_blurred_pass(
    pixmap: &mut Pixmap,
    font: &Font<'_>,
    layout: &TextLayout,
    size: f32,
    box_left: f32,
    top: f32,
    align: TextAlign,
    wrap_width: f32,
    color: Color,
    dx: f32,
    dy: f32,
    radius: i32,
) {
    let width = pixmap.width() as i32;
    let height = pixmap.height() as i32;
    let mut mask = vec![0.0f32; (width * height) as usize];

    let scale = Scale::uniform(size);
    for (i, (line, line_width)) in layout.lines.iter().enumerate() {
        let origin_x = line_origin_x(align, box_left, wrap_width, *line_width) + dx;
        let baseline = top + i as f32 * layout.line_height + layout.ascent + dy;
        for glyph in font.layout(line, scale, rt_point(origin_x, baseline)) {
            if let Some(bb) = glyph.pixel_bounding_box() {
                glyph.draw(|gx, gy, v| {
                    let px = gx as i32 + bb.min.x;
                    let py = gy as i32 + bb.min.y;
                    if px >= 0 && px < width && py >= 0 && py < height {
                        let idx = (py * width + px) as usize;
                        mask[idx] = mask[idx].max(v);
                    }
                });
            }
        }
    }

    if radius > 0 {
        box_blur(&mut mask, width, height, radius);
        box_blur(&mut mask, width, height, radius);
    }

    for py in 0..height {
        for px in 0..width {
            let v = mask[(py * width + px) as usize];
            if v > 0.0 {
                blend_pixel(pixmap, px, py, color, v);
            }
        }
    }
}

fn box_blur(mask: &mut [f32], width: i32, height: i32, radius: i32) {
    let window = (2 * radius + 1) as f32;
    let mut scratch = vec![0.0f32; mask.len()];

    // Horizontal pass.
    for y in 0..height {
        let row = (y * width) as usize;
        let mut sum: f32 = (-radius..=radius)
            .map(|x| mask[row + x.clamp(0, width - 1) as usize])
            .sum();
        for x in 0..width {
            scratch[row + x as usize] = sum / window;
            let leaving = (x - radius).clamp(0, width - 1) as usize;
            let entering = (x + radius + 1).clamp(0, width - 1) as usize;
            sum += mask[row + entering] - mask[row + leaving];
        }
    }

    // Vertical pass.
    for x in 0..width {
        let mut sum: f32 = (-radius..=radius)
            .map(|y| scratch[(y.clamp(0, height - 1) * width + x) as usize])
            .sum();
        for y in 0..height {
            mask[(y * width + x) as usize] = sum / window;
            let leaving = (y - radius).clamp(0, height - 1);
            let entering = (y + radius + 1).clamp(0, height - 1);
            sum += scratch[(entering * width + x) as usize]
                - scratch[(leaving * width + x) as usize];
        }
    }
}

fn blend_pixel(pixmap: &mut Pixmap, px: i32, py: i32, color: Color, coverage: f32) {
    let width = pixmap.width() as i32;
    let height = pixmap.height() as i32;
    if px < 0 || px >= width || py < 0 || py >= height {
        return;
    }
    let alpha = coverage * color.a as f32 / 255.0;
    if alpha <= 0.0 {
        return;
    }
    let alpha = alpha.min(1.0);

    let idx = ((py * width + px) * 4) as usize;
    let data = pixmap.data_mut();
    // Source-over in premultiplied space.
    let blend = |src: u8, dst: u8| -> u8 {
        let src = src as f32 / 255.0 * alpha;
        let dst = dst as f32 / 255.0;
        ((src + dst * (1.0 - alpha)) * 255.0).round() as u8
    };
    data[idx] = blend(color.r, data[idx]);
    data[idx + 1] = blend(color.g, data[idx + 1]);
    data[idx + 2] = blend(color.b, data[idx + 2]);
    data[idx + 3] = blend(255, data[idx + 3]);
}

// ----- preview chrome -------------------------------------------------------

fn draw_grid(pixmap: &mut Pixmap, cell: f32) {
    if cell <= 0.0 {
        return;
    }
    let width = pixmap.width() as f32;
    let height = pixmap.height() as f32;

    let mut pb = PathBuilder::new();
    let mut x = cell;
    while x < width {
        pb.move_to(x, 0.0);
        pb.line_to(x, height);
        x += cell;
    }
    let mut y = cell;
    while y < height {
        pb.move_to(0.0, y);
        pb.line_to(width, y);
        y += cell;
    }
    let Some(path) = pb.finish() else {
        return;
    };

    let mut paint = Paint::default();
    paint.set_color(grid_color());
    paint.anti_alias = false;
    let stroke = Stroke {
        width: 1.0,
        ..Default::default()
    };
    pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
}

fn draw_selection_outline(pixmap: &mut Pixmap, object: &SceneObject) {
    let (w, h) = match &object.kind {
        ObjectKind::Image(img) => (
            img.natural_width as f32 * object.scale_x as f32,
            img.natural_height as f32 * object.scale_y as f32,
        ),
        ObjectKind::Text(text) => {
            let font = font_manager::get_font_for(&text.font_family, text.weight);
            let layout = layout_text(text, font, 1.0);
            (text.wrap_width as f32, layout.total_height())
        }
    };
    let Some(rect) = Rect::from_xywh(object.x as f32 - w / 2.0, object.y as f32 - h / 2.0, w, h)
    else {
        return;
    };

    let path = PathBuilder::from_rect(rect);
    let mut paint = Paint::default();
    paint.set_color(selection_color());
    paint.anti_alias = true;
    let stroke = Stroke {
        width: 2.0,
        ..Default::default()
    };
    pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
}
