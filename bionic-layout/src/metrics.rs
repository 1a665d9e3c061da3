//! Metrics deriver — every length of the headline follows from the font
//! size and the brand ratios.

use serde::Serialize;

use bionic_core::{Alignment, BrandConstants, Composition, HeadlineStyle};

/// Scalar metrics of one render pass, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedMetrics {
    pub cap_height: f64,
    pub box_padding: f64,
    /// `cap_height + 2 · box_padding`.
    pub total_box_height: f64,
    pub dist_unit: f64,
    pub shift_px: f64,
    pub rotation_compensation: f64,
    /// Signed gap between the boxes; negative means they overlap.
    pub box_stack_offset: f64,
    /// Extra x offset of box 2; zero unless composition is offset.
    pub horizontal_shift: f64,
}

/// Derive the metrics for a font size (already clamped by the caller).
pub fn derive(
    font_size_px: f64,
    style: HeadlineStyle,
    composition: Composition,
    alignment: Alignment,
    brand: &BrandConstants,
) -> DerivedMetrics {
    let cap_height = font_size_px * brand.cap_height_ratio;
    let box_padding = cap_height * brand.padding_ratio;
    let total_box_height = cap_height + box_padding * 2.0;
    let dist_unit = cap_height * brand.offset_ratio;
    let shift_px = cap_height * brand.shift_ratio;

    let rotation_compensation =
        (brand.rotation_radians().sin() * brand.rotation_compensation_scale).abs();

    let box_stack_offset = match style {
        HeadlineStyle::Standard => dist_unit + rotation_compensation,
        HeadlineStyle::Overlapping => -dist_unit + rotation_compensation,
    };

    let horizontal_shift = match (composition, alignment) {
        (Composition::Offset, Alignment::Left) => shift_px,
        (Composition::Offset, Alignment::Right) => -shift_px,
        _ => 0.0,
    };

    DerivedMetrics {
        cap_height,
        box_padding,
        total_box_height,
        dist_unit,
        shift_px,
        rotation_compensation,
        box_stack_offset,
        horizontal_shift,
    }
}

// ===================================================================
// Tests
// ===================================================================
