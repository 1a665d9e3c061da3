//! Layout pass — resolves colors, derives metrics, measures both lines and
//! places the boxes into one [`HeadlineScene`].

use bionic_core::{
    theme, Alignment, BoxIndex, BrandConstants, Color, LayoutConfig, PaletteColor, Spacing,
};
use bionic_text::{measure, FontSpec, GlyphSource, TextError};
use taffy::TaffyError;
use thiserror::Error;

use crate::metrics::{self, DerivedMetrics};
use crate::placement::{self, PlacedBox};

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("Text error: {0}")]
    Text(#[from] TextError),
    #[error("Taffy error: {0}")]
    Taffy(#[from] TaffyError),
}

/// Result of one layout pass: everything the rasterizer and the preview
/// projector need, with no further font access.
#[derive(Clone, Debug, PartialEq)]
pub struct HeadlineScene {
    pub font: FontSpec,
    pub spacing: Spacing,
    pub metrics: DerivedMetrics,
    pub alignment: Alignment,
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub canvas_background: PaletteColor,
    pub background_color: Color,
    /// Downward nudge of the glyph baseline inside each box.
    pub baseline_shift: f64,
    /// Indexed by box: `boxes[0]` is box 1.
    pub boxes: [PlacedBox; 2],
}

impl HeadlineScene {
    pub fn placed(&self, index: BoxIndex) -> &PlacedBox {
        match index {
            BoxIndex::One => &self.boxes[0],
            BoxIndex::Two => &self.boxes[1],
        }
    }

    /// Boxes in ascending z-order, i.e. the order they are painted in.
    pub fn paint_order(&self) -> [&PlacedBox; 2] {
        let [a, b] = &self.boxes;
        if a.frame.z_order <= b.frame.z_order {
            [a, b]
        } else {
            [b, a]
        }
    }
}

/// Runs the headline pipeline: clamp, derive metrics, measure, place.
///
/// Holds no state between passes; every call measures afresh.
pub struct HeadlineLayout<'b> {
    brand: &'b BrandConstants,
    family: Option<String>,
}

impl<'b> HeadlineLayout<'b> {
    pub fn new(brand: &'b BrandConstants) -> Self {
        Self { brand, family: None }
    }

    /// Measure with a different family chain than the brand typeface.
    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.family = Some(family.into());
        self
    }

    pub fn brand(&self) -> &BrandConstants {
        self.brand
    }

    pub fn font_for(&self, font_size_px: f64) -> FontSpec {
        let family = self
            .family
            .clone()
            .unwrap_or_else(|| self.brand.typeface.family.clone());
        FontSpec::new(family, self.brand.typeface.weight, font_size_px)
    }

    /// Compute the scene for one configuration snapshot.
    pub fn compute<G: GlyphSource + ?Sized>(
        &self,
        config: &LayoutConfig,
        glyphs: &mut G,
    ) -> Result<HeadlineScene, LayoutError> {
        let brand = self.brand;
        let font_size_px = brand.clamp_font_size(config.font_size_px);
        if font_size_px != config.font_size_px {
            log::warn!(
                "fontSizePx {} outside [{}, {}], using {}",
                config.font_size_px,
                brand.min_font_size_px,
                brand.max_font_size_px,
                font_size_px
            );
        }

        let metrics = metrics::derive(
            font_size_px,
            config.style,
            config.composition,
            config.alignment,
            brand,
        );
        let font = self.font_for(font_size_px);
        let spacing = config.effective_spacing(brand);
        if spacing.is_negative() {
            log::warn!(
                "Negative spacing (letter={}em, word={}em) compresses the runs",
                spacing.letter_em,
                spacing.word_em
            );
        }

        let run1 = measure(
            config.text(BoxIndex::One),
            &font,
            spacing.letter_em,
            spacing.word_em,
            glyphs,
        )?;
        let run2 = measure(
            config.text(BoxIndex::Two),
            &font,
            spacing.letter_em,
            spacing.word_em,
            glyphs,
        )?;

        let widths = [
            placement::box_width(run1.width(), &metrics),
            placement::box_width(run2.width(), &metrics),
        ];
        let [frame1, frame2] = placement::place(
            widths,
            &metrics,
            config.alignment,
            config.stacking,
            brand.canvas_center(),
            brand.rotation_radians(),
        );

        log::debug!(
            "Layout pass: size={} widths=({:.2}, {:.2}) offset={:.3} shift={:.2}",
            font_size_px,
            widths[0],
            widths[1],
            metrics.box_stack_offset,
            metrics.horizontal_shift
        );

        let boxes = [
            PlacedBox {
                frame: frame1,
                colors: theme::resolve(brand, config.theme, BoxIndex::One),
                run: run1,
            },
            PlacedBox {
                frame: frame2,
                colors: theme::resolve(brand, config.theme, BoxIndex::Two),
                run: run2,
            },
        ];

        Ok(HeadlineScene {
            font,
            spacing,
            metrics,
            alignment: config.alignment,
            canvas_width: brand.canvas_width,
            canvas_height: brand.canvas_height,
            canvas_background: config.canvas_background,
            background_color: brand.color(config.canvas_background),
            baseline_shift: font_size_px * brand.optical_baseline_ratio,
            boxes,
        })
    }
}

// ===================================================================
// Tests
// ===================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use bionic_core::{Composition, HeadlineStyle, Stacking, Theme};
    use bionic_text::FixedAdvanceGlyphs;

    fn promotional() -> LayoutConfig {
        LayoutConfig {
            text1: "PROMOTIONAL".into(),
            text2: "HEADING STYLE".into(),
            style: HeadlineStyle::Overlapping,
            composition: Composition::Range,
            stacking: Stacking::Box2Top,
            alignment: Alignment::Center,
            theme: Theme::Primary,
            canvas_background: PaletteColor::White,
            font_size_px: 100.0,
            letter_spacing_em: 0.02,
            word_spacing_em: 0.30,
            spacing_locked: true,
        }
    }

    fn compute(config: &LayoutConfig) -> HeadlineScene {
        let brand = BrandConstants::default();
        let mut glyphs = FixedAdvanceGlyphs::new();
        HeadlineLayout::new(&brand).compute(config, &mut glyphs).unwrap()
    }

    #[test]
    fn test_promotional_scene() {
        let scene = compute(&promotional());
        let m = scene.metrics;
        assert_eq!(m.total_box_height, 144.0);

        let b1 = scene.placed(BoxIndex::One);
        let b2 = scene.placed(BoxIndex::Two);
        let expected_dy = (144.0 + m.box_stack_offset) / 2.0;
        assert!((b1.frame.center_y - (540.0 - expected_dy)).abs() < 1e-9);
        assert!((b2.frame.center_y - (540.0 + expected_dy)).abs() < 1e-9);
        assert_eq!(b1.frame.center_x, 960.0);
        assert_eq!(b2.frame.center_x, 960.0);
        assert_eq!(b2.frame.z_order, 1);

        // 11 glyphs × (60 + 2) + 2 × 36
        assert!((b1.frame.width - 754.0).abs() < 1e-9);
        let brand = BrandConstants::default();
        assert_eq!(b1.colors.background, brand.color(PaletteColor::Orange));
        assert_eq!(b2.colors.background, brand.color(PaletteColor::Navy));
        assert!((scene.baseline_shift - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_font_size_is_clamped() {
        let mut config = promotional();
        config.font_size_px = 500.0;
        let scene = compute(&config);
        assert_eq!(scene.font.size_px, 200.0);
        assert_eq!(scene.metrics.cap_height, 144.0);

        config.font_size_px = 5.0;
        assert_eq!(compute(&config).font.size_px, 40.0);
    }

    #[test]
    fn test_compute_is_idempotent() {
        let config = promotional();
        assert_eq!(compute(&config), compute(&config));
    }

    #[test]
    fn test_empty_text_keeps_box_alive() {
        let mut config = promotional();
        config.text1.clear();
        let scene = compute(&config);
        let b1 = scene.placed(BoxIndex::One);
        assert_eq!(b1.run.text(), " ");
        assert!(b1.frame.width > 2.0 * scene.metrics.box_padding);
    }

    #[test]
    fn test_locked_spacing_ignores_stored_values() {
        let mut config = promotional();
        config.letter_spacing_em = 0.5;
        let locked = compute(&config);
        config.spacing_locked = false;
        let unlocked = compute(&config);
        assert_eq!(locked.spacing.letter_em, 0.02);
        assert_eq!(unlocked.spacing.letter_em, 0.5);
        assert!(unlocked.boxes[0].frame.width > locked.boxes[0].frame.width);
    }

    #[test]
    fn test_paint_order_follows_stacking() {
        let mut config = promotional();
        let scene = compute(&config);
        assert_eq!(scene.paint_order()[1].index(), BoxIndex::Two);

        config.stacking = Stacking::Box1Top;
        let scene = compute(&config);
        assert_eq!(scene.paint_order()[1].index(), BoxIndex::One);
    }

    #[test]
    fn test_unavailable_glyphs_fail_the_pass() {
        let brand = BrandConstants::default();
        let mut glyphs = FixedAdvanceGlyphs::unloaded();
        let result = HeadlineLayout::new(&brand).compute(&promotional(), &mut glyphs);
        assert!(matches!(result, Err(LayoutError::Text(_))));
    }

    #[test]
    fn test_font_family_override() {
        let brand = BrandConstants::default();
        let layout = HeadlineLayout::new(&brand).with_font_family("DejaVu Sans");
        assert_eq!(layout.font_for(80.0).family, "DejaVu Sans");
        assert_eq!(layout.font_for(80.0).weight, 900);
    }
}
