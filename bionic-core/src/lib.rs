//! # bionic-core
//!
//! Shared data model of the stacked-headline generator: brand constants,
//! the per-request layout configuration, export modes and the theme table.
//!
//! ## Modules
//!
//! - [`brand`] — palette, ratios and typography, frozen process-wide.
//! - [`config`] — `LayoutConfig` snapshot and its enumerations.
//! - [`theme`] — (theme, box) → colors lookup.
//! - [`error`] — configuration errors.

pub mod brand;
pub mod config;
pub mod error;
pub mod theme;

pub use brand::{BrandConstants, Color, Palette, PaletteColor, Typeface};
pub use config::{
    Alignment, BoxIndex, Composition, ExportMode, HeadlineStyle, LayoutConfig, Spacing,
    Stacking, PLACEHOLDER_TEXT,
};
pub use error::ConfigError;
pub use theme::{BoxColors, Theme};
