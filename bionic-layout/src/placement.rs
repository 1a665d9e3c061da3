//! Box placement solver: centers, rotations and z-order of the two boxes
//! around the canvas center.
//!
//! Box 1 sits above the center and box 2 below it, each half of
//! `total_box_height + box_stack_offset` away. Horizontally both boxes are
//! aligned inside a group as wide as the wider box; box 2 additionally
//! carries the horizontal shift.

use bionic_core::{Alignment, BoxColors, BoxIndex, Stacking};
use bionic_text::GlyphRun;

use crate::metrics::DerivedMetrics;

/// Geometry of one box before colors and glyphs are attached.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxFrame {
    pub index: BoxIndex,
    pub center_x: f64,
    pub center_y: f64,
    /// Radians, positive is clockwise in canvas space.
    pub rotation: f64,
    pub width: f64,
    pub height: f64,
    /// Paint order; the higher value is drawn last.
    pub z_order: u8,
}

/// A fully resolved box, ready for the rasterizer or the preview.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedBox {
    pub frame: BoxFrame,
    pub colors: BoxColors,
    pub run: GlyphRun,
}

impl PlacedBox {
    pub fn index(&self) -> BoxIndex {
        self.frame.index
    }

    pub fn center(&self) -> (f64, f64) {
        (self.frame.center_x, self.frame.center_y)
    }
}

/// Width of a box holding a run of `run_width` pixels. Never negative,
/// even when heavy negative tracking collapses the run.
pub fn box_width(run_width: f64, metrics: &DerivedMetrics) -> f64 {
    (run_width + metrics.box_padding * 2.0).max(0.0)
}

/// Solve both frames.
///
/// `widths` are the final box widths (see [`box_width`]), `center` is the
/// canvas center and `angle` the brand rotation in radians.
pub fn place(
    widths: [f64; 2],
    metrics: &DerivedMetrics,
    alignment: Alignment,
    stacking: Stacking,
    center: (f64, f64),
    angle: f64,
) -> [BoxFrame; 2] {
    let (cx, cy) = center;
    let group_width = widths[0].max(widths[1]);
    let half_span = (metrics.total_box_height + metrics.box_stack_offset) / 2.0;
    let top = stacking.top();

    let frame = |index: BoxIndex, width: f64| {
        let aligned_x = match alignment {
            Alignment::Left => cx - group_width / 2.0 + width / 2.0,
            Alignment::Center => cx,
            Alignment::Right => cx + group_width / 2.0 - width / 2.0,
        };
        let (center_x, center_y, rotation) = match index {
            BoxIndex::One => (aligned_x, cy - half_span, angle),
            BoxIndex::Two => (aligned_x + metrics.horizontal_shift, cy + half_span, -angle),
        };
        BoxFrame {
            index,
            center_x,
            center_y,
            rotation,
            width,
            height: metrics.total_box_height,
            z_order: u8::from(index == top),
        }
    };

    [frame(BoxIndex::One, widths[0]), frame(BoxIndex::Two, widths[1])]
}

// ===================================================================
// Tests
// ===================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::derive;
    use bionic_core::{BrandConstants, Composition, HeadlineStyle};

    const CENTER: (f64, f64) = (960.0, 540.0);

    fn metrics(composition: Composition, alignment: Alignment) -> DerivedMetrics {
        derive(
            100.0,
            HeadlineStyle::Overlapping,
            composition,
            alignment,
            &BrandConstants::default(),
        )
    }

    fn angle() -> f64 {
        BrandConstants::default().rotation_radians()
    }

    #[test]
    fn test_center_alignment_shares_x() {
        let m = metrics(Composition::Range, Alignment::Center);
        let [a, b] = place([500.0, 800.0], &m, Alignment::Center, Stacking::Box2Top, CENTER, angle());
        assert_eq!(a.center_x, 960.0);
        assert_eq!(b.center_x, 960.0);
    }

    #[test]
    fn test_vertical_symmetry_about_center() {
        let m = metrics(Composition::Range, Alignment::Center);
        let [a, b] = place([500.0, 800.0], &m, Alignment::Center, Stacking::Box2Top, CENTER, angle());
        assert!(((a.center_y + b.center_y) / 2.0 - 540.0).abs() < 1e-9);
        let expected_gap = m.total_box_height + m.box_stack_offset;
        assert!((b.center_y - a.center_y - expected_gap).abs() < 1e-9);
        assert!(a.center_y < b.center_y);
    }

    #[test]
    fn test_left_alignment_shares_left_edge() {
        let m = metrics(Composition::Range, Alignment::Left);
        let [a, b] = place([500.0, 800.0], &m, Alignment::Left, Stacking::Box2Top, CENTER, angle());
        let left_a = a.center_x - a.width / 2.0;
        let left_b = b.center_x - b.width / 2.0;
        assert!((left_a - left_b).abs() < 1e-9);
        assert!((left_a - (960.0 - 400.0)).abs() < 1e-9);
    }

    #[test]
    fn test_right_alignment_shares_right_edge() {
        let m = metrics(Composition::Range, Alignment::Right);
        let [a, b] = place([500.0, 800.0], &m, Alignment::Right, Stacking::Box2Top, CENTER, angle());
        let right_a = a.center_x + a.width / 2.0;
        let right_b = b.center_x + b.width / 2.0;
        assert!((right_a - right_b).abs() < 1e-9);
        assert!((right_a - 1360.0).abs() < 1e-9);
    }

    #[test]
    fn test_offset_shift_moves_only_second_box() {
        let range = metrics(Composition::Range, Alignment::Left);
        let offset = metrics(Composition::Offset, Alignment::Left);
        let [a0, b0] = place([500.0, 800.0], &range, Alignment::Left, Stacking::Box2Top, CENTER, angle());
        let [a1, b1] = place([500.0, 800.0], &offset, Alignment::Left, Stacking::Box2Top, CENTER, angle());
        assert_eq!(a0.center_x, a1.center_x);
        assert!((b1.center_x - b0.center_x - 61.2).abs() < 1e-9);
    }

    #[test]
    fn test_mirror_symmetry_left_right() {
        let left_m = metrics(Composition::Offset, Alignment::Left);
        let right_m = metrics(Composition::Offset, Alignment::Right);
        let widths = [420.0, 910.0];
        let left = place(widths, &left_m, Alignment::Left, Stacking::Box1Top, CENTER, angle());
        let right = place(widths, &right_m, Alignment::Right, Stacking::Box1Top, CENTER, angle());
        for (l, r) in left.iter().zip(right.iter()) {
            assert!(((l.center_x - 960.0) + (r.center_x - 960.0)).abs() < 1e-9);
            assert_eq!(l.center_y, r.center_y);
        }
    }

    #[test]
    fn test_rotations_are_opposite() {
        let m = metrics(Composition::Range, Alignment::Center);
        let [a, b] = place([10.0, 10.0], &m, Alignment::Center, Stacking::Box2Top, CENTER, angle());
        assert!(a.rotation > 0.0);
        assert_eq!(b.rotation, -a.rotation);
    }

    #[test]
    fn test_stacking_changes_only_z_order() {
        let m = metrics(Composition::Offset, Alignment::Right);
        let two_top = place([300.0, 600.0], &m, Alignment::Right, Stacking::Box2Top, CENTER, angle());
        let one_top = place([300.0, 600.0], &m, Alignment::Right, Stacking::Box1Top, CENTER, angle());
        assert_eq!(two_top[1].z_order, 1);
        assert_eq!(two_top[0].z_order, 0);
        assert_eq!(one_top[0].z_order, 1);
        assert_eq!(one_top[1].z_order, 0);
        for (x, y) in two_top.iter().zip(one_top.iter()) {
            assert_eq!(x.center_x, y.center_x);
            assert_eq!(x.center_y, y.center_y);
            assert_eq!(x.rotation, y.rotation);
            assert_eq!(x.width, y.width);
        }
    }

    #[test]
    fn test_box_width_clamped() {
        let m = metrics(Composition::Range, Alignment::Center);
        assert_eq!(box_width(100.0, &m), 172.0);
        assert_eq!(box_width(-500.0, &m), 0.0);
    }
}
