//! Text pipeline — paints a measured glyph run inside its box.
//!
//! Glyph coverage comes from the same [`GlyphSource`] that measured the
//! run, so ink lands exactly where the measurer put the pen.

use std::collections::HashMap;

use tiny_skia::{FilterQuality, Pixmap, PixmapPaint, Transform};

use bionic_core::Color;
use bionic_layout::PlacedBox;
use bionic_text::{FontSpec, GlyphMask, GlyphSource, VerticalMetrics};

use crate::renderer::RenderError;

/// Pen and baseline of a run in box-local coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RunOrigin {
    /// Left edge of the first glyph cell.
    pub pen_x: f64,
    pub baseline_y: f64,
}

impl RunOrigin {
    /// The run starts one padding in from the left edge. The middle of the
    /// em box sits on the box's middle line, then the baseline is pushed
    /// down by `baseline_shift`.
    pub fn for_box(
        placed: &PlacedBox,
        padding: f64,
        vertical: VerticalMetrics,
        baseline_shift: f64,
    ) -> Self {
        Self {
            pen_x: -placed.frame.width / 2.0 + padding,
            baseline_y: vertical.middle_baseline() + baseline_shift,
        }
    }
}

/// Build a premultiplied pixmap of `mask` tinted with `color`.
pub fn tint_mask(mask: &GlyphMask, color: Color) -> Result<Pixmap, RenderError> {
    let mut pixmap = Pixmap::new(mask.width, mask.height).ok_or(
        RenderError::SurfaceUnavailable {
            width: mask.width,
            height: mask.height,
        },
    )?;
    let scale = |value: u8, alpha: u32| ((u32::from(value) * alpha + 127) / 255) as u8;
    for (px, &coverage) in pixmap.data_mut().chunks_exact_mut(4).zip(&mask.coverage) {
        let alpha = (u32::from(coverage) * u32::from(color.a) + 127) / 255;
        px[0] = scale(color.r, alpha);
        px[1] = scale(color.g, alpha);
        px[2] = scale(color.b, alpha);
        px[3] = alpha as u8;
    }
    Ok(pixmap)
}

/// Paint every glyph of `placed.run` with the box's text color.
///
/// `transform` maps box-local coordinates to the canvas. Returns the number
/// of glyphs that produced ink.
pub fn paint_run<G: GlyphSource + ?Sized>(
    target: &mut Pixmap,
    placed: &PlacedBox,
    origin: RunOrigin,
    font: &FontSpec,
    glyphs: &mut G,
    transform: Transform,
) -> Result<u32, RenderError> {
    let paint = PixmapPaint {
        quality: FilterQuality::Bilinear,
        ..PixmapPaint::default()
    };
    // Masks are reused within a run; runs are never cached across passes.
    let mut tinted: HashMap<char, Option<(Pixmap, i32, i32)>> = HashMap::new();
    let mut painted = 0;

    for glyph in placed.run.glyphs() {
        if !tinted.contains_key(&glyph.ch) {
            let entry = match glyphs.mask(glyph.ch, font)? {
                Some(mask) if !mask.is_empty() => {
                    Some((tint_mask(&mask, placed.colors.text)?, mask.left, mask.top))
                }
                _ => None,
            };
            tinted.insert(glyph.ch, entry);
        }
        let Some(Some((pixmap, left, top))) = tinted.get(&glyph.ch) else {
            continue;
        };

        let x = origin.pen_x + glyph.x_offset + f64::from(*left);
        let y = origin.baseline_y + f64::from(*top);
        target.draw_pixmap(
            0,
            0,
            pixmap.as_ref(),
            &paint,
            transform.pre_translate(x as f32, y as f32),
            None,
        );
        painted += 1;
    }
    Ok(painted)
}

// ===================================================================
// Tests
// ===================================================================
