//! Raster pipelines: box fills with their drop shadow, and glyph runs.

pub mod rect;
pub mod text;
