//! # bionic-layout
//!
//! Geometry of the stacked headline. Everything positional is decided
//! here; the rasterizer and the preview projector only draw what
//! [`HeadlineScene`] says.
//!
//! ```text
//! LayoutConfig ──► metrics::derive ──► measure ×2 ──► placement::place
//!                                                          │
//!                                                   HeadlineScene
//!                                                   ┌──────┴──────┐
//!                                           preview::project   bionic-render
//! ```
//!
//! - **`metrics`** — cap height, padding, stack offset, bionic shift.
//! - **`placement`** — box centers, rotations and z-order.
//! - **`engine`** — the per-pass pipeline and `LayoutError`.
//! - **`preview`** — taffy flexbox projection for the live preview.

pub mod engine;
pub mod metrics;
pub mod placement;
pub mod preview;

pub use engine::{HeadlineLayout, HeadlineScene, LayoutError};
pub use metrics::{derive, DerivedMetrics};
pub use placement::{box_width, place, BoxFrame, PlacedBox};
pub use preview::{preview_scale, project, GridOverlay, PreviewNode, PreviewOptions, PreviewScene};
