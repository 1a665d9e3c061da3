//! Text measurer — per-character advance placement with tracking and
//! word spacing.
//!
//! Each character advances by its glyph width plus `size · letter_em`,
//! spaces additionally by `size · word_em`. Offsets are recorded before the
//! advance is added, so the first character sits at 0. Negative spacing is
//! allowed and simply pulls glyphs together.

use crate::backend::GlyphSource;
use crate::error::TextError;
use crate::fonts::FontSpec;

/// Text measured when the input is empty.
const EMPTY_TEXT_STANDIN: &str = " ";

/// One positioned character of a run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlyphPlacement {
    pub ch: char,
    /// Pen position before this character, relative to the run start.
    pub x_offset: f64,
    pub advance: f64,
}

/// Ordered glyph placements of one line.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GlyphRun {
    glyphs: Vec<GlyphPlacement>,
}

impl GlyphRun {
    pub fn glyphs(&self) -> &[GlyphPlacement] {
        &self.glyphs
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Last offset + last advance, or 0 for an empty run.
    pub fn width(&self) -> f64 {
        self.glyphs
            .last()
            .map(|g| g.x_offset + g.advance)
            .unwrap_or(0.0)
    }

    /// The measured text.
    pub fn text(&self) -> String {
        self.glyphs.iter().map(|g| g.ch).collect()
    }
}

/// Characters that receive word spacing.
pub fn is_word_separator(ch: char) -> bool {
    matches!(ch, ' ' | '\u{00a0}')
}

/// Measure `text` into a [`GlyphRun`].
///
/// Fails as soon as the glyph source cannot answer; widths are never
/// replaced with zero.
pub fn measure<G: GlyphSource + ?Sized>(
    text: &str,
    font: &FontSpec,
    letter_spacing_em: f64,
    word_spacing_em: f64,
    glyphs: &mut G,
) -> Result<GlyphRun, TextError> {
    let text = if text.is_empty() { EMPTY_TEXT_STANDIN } else { text };
    let tracking = font.size_px * letter_spacing_em;
    let word_gap = font.size_px * word_spacing_em;

    let mut placements = Vec::with_capacity(text.chars().count());
    let mut pen = 0.0;
    for ch in text.chars() {
        let mut advance = glyphs.advance(ch, font)? + tracking;
        if is_word_separator(ch) {
            advance += word_gap;
        }
        placements.push(GlyphPlacement {
            ch,
            x_offset: pen,
            advance,
        });
        pen += advance;
    }

    Ok(GlyphRun { glyphs: placements })
}

// ===================================================================
// Tests
// ===================================================================
