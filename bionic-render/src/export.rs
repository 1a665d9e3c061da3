//! Export session — one export at a time, after the fonts are ready.
//!
//! A request that arrives while another export is still running is
//! dropped (`Ok(None)`), matching a disabled export button. The in-flight
//! flag is released on success and on failure alike.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use bionic_core::{ExportMode, LayoutConfig};
use bionic_layout::HeadlineLayout;
use bionic_text::{FontReadiness, GlyphSource};

use crate::renderer::{RasterImage, Rasterizer, RenderError};

const FILE_PREFIX: &str = "bionic-hd-";

/// `bionic-hd-{unix_millis}{suffix}.png`
pub fn export_file_name(unix_millis: u128, mode: ExportMode) -> String {
    format!("{FILE_PREFIX}{unix_millis}{}.png", mode.suffix())
}

fn unix_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis())
        .unwrap_or_default()
}

/// One finished export.
#[derive(Clone, Debug)]
pub struct ExportedAsset {
    pub mode: ExportMode,
    pub file_name: String,
    pub png: Vec<u8>,
    pub image: RasterImage,
}

/// Clears the in-flight flag when dropped.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct ExportSession<'b> {
    layout: HeadlineLayout<'b>,
    rasterizer: Rasterizer,
    readiness: FontReadiness,
    in_flight: AtomicBool,
}

impl<'b> ExportSession<'b> {
    pub fn new(layout: HeadlineLayout<'b>, readiness: FontReadiness) -> Self {
        Self {
            layout,
            rasterizer: Rasterizer::new(),
            readiness,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn with_rasterizer(mut self, rasterizer: Rasterizer) -> Self {
        self.rasterizer = rasterizer;
        self
    }

    pub fn layout(&self) -> &HeadlineLayout<'b> {
        &self.layout
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    fn begin(&self) -> Option<InFlight<'_>> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlight(&self.in_flight))
    }

    /// Export `config` as `mode`.
    ///
    /// Waits for font readiness, measures afresh, rasterizes and encodes.
    /// Returns `Ok(None)` without doing anything if an export is running.
    pub async fn export<G: GlyphSource + ?Sized>(
        &self,
        config: &LayoutConfig,
        mode: ExportMode,
        glyphs: &mut G,
    ) -> Result<Option<ExportedAsset>, RenderError> {
        let Some(_guard) = self.begin() else {
            log::debug!("Export {mode:?} ignored: another export is in flight");
            return Ok(None);
        };

        if !self.readiness.is_ready() {
            log::info!("Waiting for fonts before export");
        }
        self.readiness.wait().await?;

        let scene = self.layout.compute(config, glyphs)?;
        let image = self.rasterizer.render(&scene, mode, glyphs)?;
        let png = image.encode_png()?;
        let file_name = export_file_name(unix_millis(), mode);

        log::info!("Exported {} ({} bytes)", file_name, png.len());
        Ok(Some(ExportedAsset {
            mode,
            file_name,
            png,
            image,
        }))
    }
}

// ===================================================================
// Tests
// ===================================================================
