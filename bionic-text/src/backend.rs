//! Glyph source contract shared by the measurer and the rasterizer.
//!
//! A glyph source answers two questions about a single character at a
//! given font: how far the pen advances, and what coverage mask to paint.
//! Sources are queried fresh on every pass; nothing above this trait caches
//! widths, so a source whose fonts finish loading is picked up immediately.

use crate::error::TextError;
use crate::fonts::FontSpec;

/// Alpha coverage of one glyph, positioned relative to the pen on the
/// baseline (`top` is negative for glyphs that rise above it).
#[derive(Clone, Debug, PartialEq)]
pub struct GlyphMask {
    pub left: i32,
    pub top: i32,
    pub width: u32,
    pub height: u32,
    /// Row-major coverage, one byte per pixel.
    pub coverage: Vec<u8>,
}

impl GlyphMask {
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Ascent and descent of a font in pixels, both measured away from the
/// baseline (descent is positive below it).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VerticalMetrics {
    pub ascent: f64,
    pub descent: f64,
}

impl VerticalMetrics {
    /// Baseline offset that puts the middle of the em box on `y = 0`.
    pub fn middle_baseline(&self) -> f64 {
        (self.ascent - self.descent) / 2.0
    }
}

/// Font backend: per-character advance widths and coverage masks.
pub trait GlyphSource {
    /// Advance width of `ch` in pixels. Never negative.
    fn advance(&mut self, ch: char, font: &FontSpec) -> Result<f64, TextError>;

    /// Coverage mask of `ch`, or `None` for blank glyphs such as spaces.
    fn mask(&mut self, ch: char, font: &FontSpec) -> Result<Option<GlyphMask>, TextError>;

    /// Ascent and descent of the face `font` resolves to.
    fn vertical_metrics(&mut self, font: &FontSpec) -> Result<VerticalMetrics, TextError>;
}

// ── Fixed-advance source ────────────────────────────────────────────

/// Deterministic glyph source with synthetic metrics.
///
/// Every visible character advances `advance_em` and paints a solid
/// cap-height block; spaces advance `space_em` and paint nothing. The em
/// box spans `ascent_em` above and `descent_em` below the baseline. Useful
/// for tests, benchmarks, and headless bring-up without installed fonts.
#[derive(Clone, Debug)]
pub struct FixedAdvanceGlyphs {
    pub advance_em: f64,
    pub space_em: f64,
    pub cap_height_em: f64,
    pub ascent_em: f64,
    pub descent_em: f64,
    loaded: bool,
    queries: u64,
}

impl Default for FixedAdvanceGlyphs {
    fn default() -> Self {
        Self {
            advance_em: 0.6,
            space_em: 0.25,
            cap_height_em: 0.72,
            ascent_em: 0.8,
            descent_em: 0.2,
            loaded: true,
            queries: 0,
        }
    }
}

impl FixedAdvanceGlyphs {
    pub fn new() -> Self {
        Self::default()
    }

    /// A source whose fonts have not loaded yet: every query fails.
    pub fn unloaded() -> Self {
        Self {
            loaded: false,
            ..Self::default()
        }
    }

    pub fn set_loaded(&mut self, loaded: bool) {
        self.loaded = loaded;
    }

    /// Number of advance/mask/metrics queries answered or refused so far.
    pub fn queries(&self) -> u64 {
        self.queries
    }

    fn check(&mut self) -> Result<(), TextError> {
        self.queries += 1;
        if self.loaded {
            Ok(())
        } else {
            Err(TextError::GlyphMeasurementUnavailable(
                "fixed-advance fonts not loaded".into(),
            ))
        }
    }
}

fn is_blank(ch: char) -> bool {
    ch.is_whitespace()
}

impl GlyphSource for FixedAdvanceGlyphs {
    fn advance(&mut self, ch: char, font: &FontSpec) -> Result<f64, TextError> {
        self.check()?;
        let em = if is_blank(ch) { self.space_em } else { self.advance_em };
        Ok(em * font.size_px)
    }

    fn mask(&mut self, ch: char, font: &FontSpec) -> Result<Option<GlyphMask>, TextError> {
        self.check()?;
        if is_blank(ch) {
            return Ok(None);
        }
        let advance = self.advance_em * font.size_px;
        let width = (advance * 0.8).round().max(1.0) as u32;
        let height = (self.cap_height_em * font.size_px).round().max(1.0) as u32;
        Ok(Some(GlyphMask {
            left: (advance * 0.1).round() as i32,
            top: -(height as i32),
            width,
            height,
            coverage: vec![255; (width * height) as usize],
        }))
    }

    fn vertical_metrics(&mut self, font: &FontSpec) -> Result<VerticalMetrics, TextError> {
        self.check()?;
        Ok(VerticalMetrics {
            ascent: self.ascent_em * font.size_px,
            descent: self.descent_em * font.size_px,
        })
    }
}

// ===================================================================
// Tests
// ===================================================================
