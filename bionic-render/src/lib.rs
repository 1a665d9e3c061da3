//! # bionic-render
//!
//! Offline rasterization of headline scenes, built on `tiny-skia`.
//!
//! ## Architecture
//!
//! ```text
//!  LayoutConfig
//!       │
//!       ▼
//!  HeadlineLayout (bionic-layout)   ◀─── fresh measurement per export
//!       │
//!       ▼
//!  Rasterizer.render(scene, mode)   ◀─── background, shadows, boxes, glyphs
//!       │
//!       ▼
//!  RasterImage.encode_png()
//! ```
//!
//! ## Crate modules
//!
//! - [`pipelines`] — box fill + drop shadow, glyph run painting
//! - [`renderer`] — the rasterizer and its output image
//! - [`export`] — guarded, font-aware export session

pub mod export;
pub mod pipelines;
pub mod renderer;

// Re-exports for convenience
pub use export::{export_file_name, ExportSession, ExportedAsset};
pub use pipelines::rect::DropShadow;
pub use renderer::{RasterImage, RasterStats, Rasterizer, RenderError};
