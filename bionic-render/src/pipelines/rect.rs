//! Rect pipeline — fills a rotated box and paints its blurred drop shadow.
//!
//! Boxes are drawn in their local frame: the rectangle is centered on the
//! origin and the caller's transform carries it to the box center and
//! rotation.

use tiny_skia::{FilterQuality, Paint, Pixmap, PixmapPaint, Point, Rect, Transform};

use bionic_core::Color;

use crate::renderer::RenderError;

/// Box-blur passes approximating a gaussian.
const BLUR_PASSES: usize = 3;

/// Canvas-style drop shadow: color, blur extent and device-space offset.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DropShadow {
    pub color: Color,
    /// Blur extent as a canvas `shadowBlur`; the gaussian sigma is half of it.
    pub blur: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

impl DropShadow {
    /// rgba(0,0,0,0.15), blur 40, 20 px down.
    pub const BRAND: DropShadow = DropShadow {
        color: Color::rgba(0, 0, 0, 38),
        blur: 40.0,
        offset_x: 0.0,
        offset_y: 20.0,
    };

    pub fn sigma(&self) -> f32 {
        self.blur / 2.0
    }

    /// Radius of each box-blur pass so that the passes add up to `sigma`.
    pub fn box_radius(&self) -> usize {
        let sigma = self.sigma().max(0.0);
        ((12.0 * sigma * sigma / BLUR_PASSES as f32 + 1.0).sqrt() / 2.0)
            .round()
            .max(0.0) as usize
    }
}

impl Default for DropShadow {
    fn default() -> Self {
        Self::BRAND
    }
}

/// Centered local rectangle of a box, `None` when it has no area.
pub fn box_rect(width: f64, height: f64) -> Option<Rect> {
    if width <= 0.0 || height <= 0.0 {
        return None;
    }
    let (w, h) = (width as f32, height as f32);
    Rect::from_xywh(-w / 2.0, -h / 2.0, w, h)
}

fn solid_paint(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, color.a);
    paint.anti_alias = true;
    paint
}

/// Fill a box with its background color.
pub fn fill_box(target: &mut Pixmap, rect: Rect, color: Color, transform: Transform) {
    target.fill_rect(rect, &solid_paint(color), transform, None);
}

/// Paint the shadow a box would cast, beneath where the box will be filled.
///
/// The rectangle is drawn into a scratch layer covering its blurred
/// footprint, blurred there and composited at the shadow color's alpha.
pub fn draw_shadow(
    target: &mut Pixmap,
    rect: Rect,
    shadow: &DropShadow,
    transform: Transform,
) -> Result<(), RenderError> {
    if shadow.color.a == 0 {
        return Ok(());
    }
    let shadow_transform = transform.post_translate(shadow.offset_x, shadow.offset_y);
    let radius = shadow.box_radius();

    let mut corners = [
        Point::from_xy(rect.left(), rect.top()),
        Point::from_xy(rect.right(), rect.top()),
        Point::from_xy(rect.right(), rect.bottom()),
        Point::from_xy(rect.left(), rect.bottom()),
    ];
    shadow_transform.map_points(&mut corners);

    let margin = (radius * BLUR_PASSES) as f32;
    let min_x = corners.iter().map(|p| p.x).fold(f32::INFINITY, f32::min) - margin;
    let min_y = corners.iter().map(|p| p.y).fold(f32::INFINITY, f32::min) - margin;
    let max_x = corners.iter().map(|p| p.x).fold(f32::NEG_INFINITY, f32::max) + margin;
    let max_y = corners.iter().map(|p| p.y).fold(f32::NEG_INFINITY, f32::max) + margin;

    let left = min_x.floor();
    let top = min_y.floor();
    let width = (max_x.ceil() - left) as u32;
    let height = (max_y.ceil() - top) as u32;

    let mut layer =
        Pixmap::new(width, height).ok_or(RenderError::SurfaceUnavailable { width, height })?;
    let opaque = Color::rgb(shadow.color.r, shadow.color.g, shadow.color.b);
    layer.fill_rect(
        rect,
        &solid_paint(opaque),
        shadow_transform.post_translate(-left, -top),
        None,
    );
    box_blur(layer.data_mut(), width as usize, height as usize, radius, BLUR_PASSES);

    let paint = PixmapPaint {
        opacity: f32::from(shadow.color.a) / 255.0,
        quality: FilterQuality::Nearest,
        ..PixmapPaint::default()
    };
    target.draw_pixmap(
        left as i32,
        top as i32,
        layer.as_ref(),
        &paint,
        Transform::identity(),
        None,
    );
    Ok(())
}

/// Blur premultiplied RGBA in place with `passes` separable box blurs.
/// Pixels outside the buffer count as transparent.
pub fn box_blur(data: &mut [u8], width: usize, height: usize, radius: usize, passes: usize) {
    if radius == 0 || width == 0 || height == 0 {
        return;
    }
    let mut scratch = vec![0u8; data.len()];
    for _ in 0..passes {
        for y in 0..height {
            blur_line(data, &mut scratch, y * width * 4, 4, width, radius);
        }
        for x in 0..width {
            blur_line(&scratch, data, x * 4, width * 4, height, radius);
        }
    }
}

/// One running-sum box blur over a strided line of RGBA pixels.
fn blur_line(src: &[u8], dst: &mut [u8], start: usize, stride: usize, len: usize, radius: usize) {
    let window = (2 * radius + 1) as u32;
    for channel in 0..4 {
        let at = |i: usize| start + i * stride + channel;
        let mut sum: u32 = (0..=radius.min(len - 1)).map(|i| u32::from(src[at(i)])).sum();
        for i in 0..len {
            dst[at(i)] = ((sum + window / 2) / window) as u8;
            if i + radius + 1 < len {
                sum += u32::from(src[at(i + radius + 1)]);
            }
            if i >= radius {
                sum -= u32::from(src[at(i - radius)]);
            }
        }
    }
}

// ===================================================================
// Tests
// ===================================================================
