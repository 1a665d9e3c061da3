//! Rasterizer that turns a [`HeadlineScene`] into an RGBA pixmap for one
//! export mode.

use thiserror::Error;
use tiny_skia::{Color as SkiaColor, Pixmap, Transform};

use bionic_core::ExportMode;
use bionic_layout::{HeadlineScene, LayoutError};
use bionic_text::{GlyphSource, TextError};

use crate::pipelines::rect::{self, DropShadow};
use crate::pipelines::text::{self, RunOrigin};

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Pixel surface unavailable ({width}x{height})")]
    SurfaceUnavailable { width: u32, height: u32 },
    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),
    #[error("Text error: {0}")]
    Text(#[from] TextError),
    #[error("PNG encoding failed: {0}")]
    Encode(String),
}

/// Statistics of one raster pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RasterStats {
    pub boxes_drawn: u32,
    pub glyphs_drawn: u32,
    pub shadows_drawn: u32,
}

/// Finished export raster.
#[derive(Clone, Debug)]
pub struct RasterImage {
    pixmap: Pixmap,
    pub stats: RasterStats,
}

impl RasterImage {
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Straight (non-premultiplied) RGBA of one pixel.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let px = self.pixmap.pixel(x, y)?.demultiply();
        Some([px.red(), px.green(), px.blue(), px.alpha()])
    }

    /// Straight RGBA bytes, row-major.
    pub fn to_rgba(&self) -> Vec<u8> {
        self.pixmap
            .pixels()
            .iter()
            .flat_map(|px| {
                let c = px.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect()
    }

    /// Lossless PNG with alpha.
    pub fn encode_png(&self) -> Result<Vec<u8>, RenderError> {
        self.pixmap
            .encode_png()
            .map_err(|e| RenderError::Encode(e.to_string()))
    }
}

/// CPU rasterizer for headline scenes.
///
/// Draws into a fresh pixmap on every call; nothing is kept between
/// exports.
#[derive(Clone, Debug, Default)]
pub struct Rasterizer {
    shadow: DropShadow,
}

impl Rasterizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_shadow(mut self, shadow: DropShadow) -> Self {
        self.shadow = shadow;
        self
    }

    /// Rasterize `scene` for `mode`.
    ///
    /// `glyphs` must be the source the scene was measured with. Any failure
    /// drops the pixmap; no partial image is returned.
    pub fn render<G: GlyphSource + ?Sized>(
        &self,
        scene: &HeadlineScene,
        mode: ExportMode,
        glyphs: &mut G,
    ) -> Result<RasterImage, RenderError> {
        let (width, height) = (scene.canvas_width, scene.canvas_height);
        let mut pixmap =
            Pixmap::new(width, height).ok_or(RenderError::SurfaceUnavailable { width, height })?;
        pixmap.fill(SkiaColor::TRANSPARENT);

        let background = scene.background_color;
        if mode.is_opaque() && !background.is_transparent() {
            pixmap.fill(SkiaColor::from_rgba8(
                background.r,
                background.g,
                background.b,
                background.a,
            ));
        }

        let mut stats = RasterStats::default();
        let metrics = &scene.metrics;
        let vertical = glyphs.vertical_metrics(&scene.font)?;

        for placed in scene.paint_order() {
            if !mode.draws(placed.index()) {
                continue;
            }
            let (cx, cy) = placed.center();
            let transform = Transform::from_translate(cx as f32, cy as f32)
                .pre_rotate(placed.frame.rotation.to_degrees() as f32);

            if let Some(rect) = rect::box_rect(placed.frame.width, placed.frame.height) {
                if mode.is_opaque() {
                    rect::draw_shadow(&mut pixmap, rect, &self.shadow, transform)?;
                    stats.shadows_drawn += 1;
                }
                rect::fill_box(&mut pixmap, rect, placed.colors.background, transform);
            }

            let origin =
                RunOrigin::for_box(placed, metrics.box_padding, vertical, scene.baseline_shift);
            stats.glyphs_drawn +=
                text::paint_run(&mut pixmap, placed, origin, &scene.font, glyphs, transform)?;
            stats.boxes_drawn += 1;
        }

        log::debug!(
            "Rasterized {:?}: {} boxes, {} glyphs, {} shadows",
            mode,
            stats.boxes_drawn,
            stats.glyphs_drawn,
            stats.shadows_drawn
        );

        Ok(RasterImage { pixmap, stats })
    }
}

// ===================================================================
// Tests
// ===================================================================
