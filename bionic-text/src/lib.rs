//! # bionic-text
//!
//! Typography for the headline engine: the glyph source contract, a
//! cosmic-text implementation of it, font loading, and the text measurer
//! that turns a line into a positioned [`GlyphRun`].
//!
//! ## Architecture
//!
//! ```text
//! GlyphSource (CosmicGlyphs | FixedAdvanceGlyphs)
//!     │  advance(ch) / mask(ch)
//!     ▼
//! measure(text, font, spacing) ──► GlyphRun { (ch, x_offset, advance)* }
//!     │                                   │
//!     ▼                                   ▼
//!  layout (box widths)            rasterizer (glyph painting)
//! ```
//!
//! - **`backend`** — `GlyphSource` trait, `GlyphMask`, deterministic source.
//! - **`engine`** — cosmic-text backed source.
//! - **`fonts`** — font descriptors, file loading, readiness signal.
//! - **`measure`** — per-character advance placement.

pub mod backend;
pub mod engine;
pub mod error;
pub mod fonts;
pub mod measure;

// Re-exports for ergonomic use.
pub use backend::{FixedAdvanceGlyphs, GlyphMask, GlyphSource, VerticalMetrics};
pub use engine::CosmicGlyphs;
pub use error::TextError;
pub use fonts::{read_font_files, FontReadiness, FontReadySignal, FontSpec};
pub use measure::{is_word_separator, measure, GlyphPlacement, GlyphRun};
