//! cosmic-text glyph source — measures and rasterizes single characters
//! with a `FontSystem` (font database + shaping) and a `SwashCache`
//! (glyph rasterization).
//!
//! Characters are shaped one at a time, matching the per-character
//! placement of the measurer: no kerning or ligatures cross character
//! boundaries.

use std::path::Path;

use cosmic_text::{
    fontdb, Attrs, Buffer, Family, FontSystem, Metrics, Shaping, SwashCache, SwashContent, Weight,
};

use crate::backend::{GlyphMask, GlyphSource, VerticalMetrics};
use crate::error::TextError;
use crate::fonts::{is_generic_family, FontSpec};

/// Glyph source backed by cosmic-text.
pub struct CosmicGlyphs {
    pub font_system: FontSystem,
    pub swash_cache: SwashCache,
    /// Refuse to measure when the primary family is not loaded, instead of
    /// silently measuring a fallback face.
    pub require_family: bool,
}

impl CosmicGlyphs {
    /// Glyph source with system font discovery.
    pub fn new() -> Self {
        Self {
            font_system: FontSystem::new(),
            swash_cache: SwashCache::new(),
            require_family: false,
        }
    }

    /// Glyph source with an empty font database. Every query fails until
    /// fonts are loaded with [`CosmicGlyphs::load_font_data`].
    pub fn empty() -> Self {
        Self {
            font_system: FontSystem::new_with_locale_and_db(
                String::from("en-US"),
                fontdb::Database::new(),
            ),
            swash_cache: SwashCache::new(),
            require_family: false,
        }
    }

    pub fn with_required_family(mut self, required: bool) -> Self {
        self.require_family = required;
        self
    }

    pub fn load_font_data(&mut self, data: Vec<u8>) {
        self.font_system.db_mut().load_font_data(data);
    }

    pub fn load_font_file(&mut self, path: impl AsRef<Path>) -> Result<(), TextError> {
        let path = path.as_ref();
        self.font_system
            .db_mut()
            .load_font_file(path)
            .map_err(|source| TextError::FontLoad {
                path: path.display().to_string(),
                source,
            })
    }

    pub fn face_count(&self) -> usize {
        self.font_system.db().faces().count()
    }

    pub fn has_family(&self, name: &str) -> bool {
        self.font_system.db().faces().any(|face| {
            face.families
                .iter()
                .any(|(family, _)| family.eq_ignore_ascii_case(name))
        })
    }

    /// Sorted, deduplicated family names in the database.
    pub fn loaded_families(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .font_system
            .db()
            .faces()
            .flat_map(|face| face.families.iter().map(|(name, _)| name.clone()))
            .collect();
        names.sort();
        names.dedup();
        names
    }

    fn ensure_available(&self, font: &FontSpec) -> Result<(), TextError> {
        if self.face_count() == 0 {
            return Err(TextError::GlyphMeasurementUnavailable(
                "no font faces loaded".into(),
            ));
        }
        let primary = font.primary_family();
        if self.require_family && !is_generic_family(primary) && !self.has_family(primary) {
            return Err(TextError::GlyphMeasurementUnavailable(format!(
                "font family '{primary}' is not loaded"
            )));
        }
        Ok(())
    }

    /// Shape a single character into a one-line buffer.
    fn shape_char(&mut self, ch: char, font: &FontSpec) -> Buffer {
        let size = font.size_px as f32;
        let metrics = Metrics::new(size, size);

        let family = match font.primary_family() {
            "sans-serif" => Family::SansSerif,
            "serif" => Family::Serif,
            "monospace" => Family::Monospace,
            "cursive" => Family::Cursive,
            "fantasy" => Family::Fantasy,
            concrete => Family::Name(concrete),
        };
        let attrs = Attrs::new().family(family).weight(Weight(font.weight));

        let mut text = [0u8; 4];
        let text = ch.encode_utf8(&mut text);

        let mut buffer = Buffer::new(&mut self.font_system, metrics);
        buffer.set_size(&mut self.font_system, None, None);
        buffer.set_text(&mut self.font_system, text, attrs, Shaping::Advanced);
        buffer.shape_until_scroll(&mut self.font_system, false);
        buffer
    }
}

impl Default for CosmicGlyphs {
    fn default() -> Self {
        Self::new()
    }
}

impl GlyphSource for CosmicGlyphs {
    fn advance(&mut self, ch: char, font: &FontSpec) -> Result<f64, TextError> {
        self.ensure_available(font)?;
        let buffer = self.shape_char(ch, font);
        let width: f32 = buffer
            .layout_runs()
            .flat_map(|run| run.glyphs.iter())
            .map(|glyph| glyph.w)
            .sum();
        Ok(f64::from(width.max(0.0)))
    }

    fn mask(&mut self, ch: char, font: &FontSpec) -> Result<Option<GlyphMask>, TextError> {
        self.ensure_available(font)?;
        let buffer = self.shape_char(ch, font);

        for run in buffer.layout_runs() {
            for glyph in run.glyphs.iter() {
                let physical = glyph.physical((0.0, 0.0), 1.0);
                let image = self
                    .swash_cache
                    .get_image(&mut self.font_system, physical.cache_key);
                let image = match image {
                    Some(img) => img,
                    None => continue, // whitespace or missing glyph
                };
                if image.placement.width == 0 || image.placement.height == 0 {
                    continue;
                }

                let coverage = match image.content {
                    SwashContent::Mask => image.data.clone(),
                    // RGBA: keep alpha.
                    SwashContent::Color => image.data.chunks_exact(4).map(|px| px[3]).collect(),
                    SwashContent::SubpixelMask => {
                        image.data.chunks_exact(4).map(|px| px[1]).collect()
                    }
                };

                return Ok(Some(GlyphMask {
                    left: physical.x + image.placement.left,
                    top: physical.y - image.placement.top,
                    width: image.placement.width,
                    height: image.placement.height,
                    coverage,
                }));
            }
        }
        Ok(None)
    }

    fn vertical_metrics(&mut self, font: &FontSpec) -> Result<VerticalMetrics, TextError> {
        self.ensure_available(font)?;
        // The face a capital resolves to stands in for the whole run.
        let buffer = self.shape_char('H', font);
        let font_id = buffer
            .layout_runs()
            .flat_map(|run| run.glyphs.iter())
            .map(|glyph| glyph.font_id)
            .next()
            .ok_or_else(|| {
                TextError::GlyphMeasurementUnavailable(format!(
                    "no face resolves '{}'",
                    font.primary_family()
                ))
            })?;
        let face = self.font_system.get_font(font_id).ok_or_else(|| {
            TextError::GlyphMeasurementUnavailable("resolved face failed to load".into())
        })?;
        let metrics = face.as_swash().metrics(&[]).scale(font.size_px as f32);
        Ok(VerticalMetrics {
            ascent: f64::from(metrics.ascent),
            descent: f64::from(metrics.descent),
        })
    }
}

// ===================================================================
// Tests
// ===================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// System glyph source, or `None` on machines without fonts.
    fn system_glyphs() -> Option<CosmicGlyphs> {
        let glyphs = CosmicGlyphs::new();
        if glyphs.face_count() == 0 {
            eprintln!("no system fonts installed; skipping");
            return None;
        }
        Some(glyphs)
    }

    fn sans(size: f64) -> FontSpec {
        FontSpec::new("sans-serif", 900, size)
    }

    #[test]
    fn test_empty_database_is_unavailable() {
        let mut glyphs = CosmicGlyphs::empty();
        assert_eq!(glyphs.face_count(), 0);
        assert!(matches!(
            glyphs.advance('A', &sans(100.0)),
            Err(TextError::GlyphMeasurementUnavailable(_))
        ));
        assert!(glyphs.mask('A', &sans(100.0)).is_err());
    }

    #[test]
    fn test_missing_font_file() {
        let mut glyphs = CosmicGlyphs::empty();
        assert!(matches!(
            glyphs.load_font_file("/no/such/font.ttf"),
            Err(TextError::FontLoad { .. })
        ));
    }

    #[test]
    fn test_required_family_refuses_fallback() {
        let Some(glyphs) = system_glyphs() else { return };
        let mut glyphs = glyphs.with_required_family(true);
        let font = FontSpec::new("NoSuchFamilyXyz, sans-serif", 900, 100.0);
        assert!(matches!(
            glyphs.advance('A', &font),
            Err(TextError::GlyphMeasurementUnavailable(_))
        ));
        // Generic families are always acceptable.
        assert!(glyphs.advance('A', &sans(100.0)).is_ok());
    }

    #[test]
    fn test_advance_positive_and_scales() {
        let Some(mut glyphs) = system_glyphs() else { return };
        let small = glyphs.advance('H', &sans(40.0)).unwrap();
        let large = glyphs.advance('H', &sans(200.0)).unwrap();
        assert!(small > 0.0);
        assert!(large > small);
    }

    #[test]
    fn test_advance_is_deterministic() {
        let Some(mut glyphs) = system_glyphs() else { return };
        let a = glyphs.advance('W', &sans(100.0)).unwrap();
        let b = glyphs.advance('W', &sans(100.0)).unwrap();
        assert_eq!(a.to_bits(), b.to_bits());
    }

    #[test]
    fn test_vertical_metrics_scale_with_size() {
        let Some(mut glyphs) = system_glyphs() else { return };
        let small = glyphs.vertical_metrics(&sans(50.0)).unwrap();
        let large = glyphs.vertical_metrics(&sans(100.0)).unwrap();
        assert!(small.ascent > 0.0);
        assert!(small.descent >= 0.0);
        assert!((large.ascent - 2.0 * small.ascent).abs() < 1e-3);
        assert!(CosmicGlyphs::empty().vertical_metrics(&sans(50.0)).is_err());
    }

    #[test]
    fn test_mask_for_visible_glyph() {
        let Some(mut glyphs) = system_glyphs() else { return };
        let mask = glyphs.mask('H', &sans(64.0)).unwrap().expect("H has ink");
        assert!(!mask.is_empty());
        assert_eq!(mask.coverage.len(), (mask.width * mask.height) as usize);
        // Capitals rise above the baseline.
        assert!(mask.top < 0);
        assert!(glyphs.mask(' ', &sans(64.0)).unwrap().is_none());
    }
}
