//! Live preview projector — lays the scene out as a flexbox tree so a
//! browser-like host can show it with ordinary boxes and transforms.
//!
//! The tree mirrors the markup of the preview: a full-canvas root that
//! centers a column group, the group aligning its two boxes left, center or
//! right. Box 2 carries the stack offset as its top margin and the bionic
//! shift as a translation. The resulting centers match the placement
//! solver, which is what keeps the preview and the export in step.

use serde::Serialize;
use taffy::prelude::*;
use taffy::TaffyTree;

use bionic_core::{Alignment, BoxIndex, BrandConstants};

use crate::engine::{HeadlineScene, LayoutError};
use crate::placement::PlacedBox;

/// Viewport width reserved for the control panel.
const PANEL_WIDTH_PX: f64 = 450.0;
/// Upper bound of the preview scale before the asset zoom is applied.
const MAX_PREVIEW_SCALE: f64 = 0.6;
const GRID_SPACING_PX: u32 = 100;
const FRONT_Z_INDEX: i32 = 40;
const BACK_Z_INDEX: i32 = 20;

/// Scale of the 1920 px canvas inside a viewport of `viewport_width`.
pub fn preview_scale(viewport_width: f64, asset_scale: f64, canvas_width: u32) -> f64 {
    let fit = (viewport_width - PANEL_WIDTH_PX) / f64::from(canvas_width);
    MAX_PREVIEW_SCALE.min(fit) * asset_scale
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PreviewOptions {
    pub viewport_width: f64,
    pub asset_scale: f64,
    pub show_grid: bool,
}

impl Default for PreviewOptions {
    fn default() -> Self {
        Self {
            viewport_width: 1920.0,
            asset_scale: 1.0,
            show_grid: false,
        }
    }
}

/// Layout guide drawn over the preview.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridOverlay {
    pub spacing_px: u32,
    pub center_lines: bool,
    pub color: String,
}

/// One box as the preview host draws it, in unscaled canvas pixels.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewNode {
    pub index: BoxIndex,
    /// Untransformed top-left corner from the flex layout.
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    pub translate_x: f64,
    pub rotation_degrees: f64,
    /// CSS transform; translation is applied in canvas space.
    pub transform: String,
    pub z_index: i32,
    pub background: String,
    pub color: String,
    pub text: String,
    pub font_family: String,
    pub font_weight: u16,
    pub font_size_px: f64,
    pub letter_spacing_em: f64,
    pub word_spacing_em: f64,
    pub padding_x: f64,
    /// Top padding nudging the glyphs down by the optical baseline shift.
    pub padding_top: f64,
}

impl PreviewNode {
    /// Center after the translation.
    pub fn center(&self) -> (f64, f64) {
        (
            self.left + self.width / 2.0 + self.translate_x,
            self.top + self.height / 2.0,
        )
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewScene {
    pub width: u32,
    pub height: u32,
    /// `None` when the canvas is transparent (host shows a checkerboard).
    pub background: Option<String>,
    pub scale: f64,
    pub grid: Option<GridOverlay>,
    pub nodes: Vec<PreviewNode>,
}

impl PreviewScene {
    pub fn node(&self, index: BoxIndex) -> Option<&PreviewNode> {
        self.nodes.iter().find(|n| n.index == index)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

fn group_alignment(alignment: Alignment) -> AlignItems {
    match alignment {
        Alignment::Left => AlignItems::FlexStart,
        Alignment::Center => AlignItems::Center,
        Alignment::Right => AlignItems::FlexEnd,
    }
}

fn box_style(placed: &PlacedBox, margin_top: f64) -> Style {
    Style {
        size: Size {
            width: Dimension::length(placed.frame.width as f32),
            height: Dimension::length(placed.frame.height as f32),
        },
        margin: taffy::Rect {
            left: LengthPercentageAuto::length(0.0),
            right: LengthPercentageAuto::length(0.0),
            top: LengthPercentageAuto::length(margin_top as f32),
            bottom: LengthPercentageAuto::length(0.0),
        },
        flex_shrink: 0.0,
        ..Style::default()
    }
}

/// Project a scene into preview nodes.
pub fn project(
    scene: &HeadlineScene,
    brand: &BrandConstants,
    options: &PreviewOptions,
) -> Result<PreviewScene, LayoutError> {
    let canvas_w = scene.canvas_width as f32;
    let canvas_h = scene.canvas_height as f32;
    let [first, second] = &scene.boxes;

    let mut taffy: TaffyTree = TaffyTree::new();
    taffy.disable_rounding();

    let first_node = taffy.new_leaf(box_style(first, 0.0))?;
    let second_node = taffy.new_leaf(box_style(second, scene.metrics.box_stack_offset))?;
    let group = taffy.new_with_children(
        Style {
            display: Display::Flex,
            flex_direction: FlexDirection::Column,
            align_items: Some(group_alignment(scene.alignment)),
            flex_shrink: 0.0,
            ..Style::default()
        },
        &[first_node, second_node],
    )?;
    let root = taffy.new_with_children(
        Style {
            display: Display::Flex,
            size: Size {
                width: Dimension::length(canvas_w),
                height: Dimension::length(canvas_h),
            },
            justify_content: Some(JustifyContent::Center),
            align_items: Some(AlignItems::Center),
            ..Style::default()
        },
        &[group],
    )?;

    taffy.compute_layout(
        root,
        Size {
            width: AvailableSpace::Definite(canvas_w),
            height: AvailableSpace::Definite(canvas_h),
        },
    )?;

    let origin = taffy.layout(group)?.location;
    let mut nodes = Vec::with_capacity(2);
    for (placed, node) in [(first, first_node), (second, second_node)] {
        let location = taffy.layout(node)?.location;
        let translate_x = match placed.index() {
            BoxIndex::One => 0.0,
            BoxIndex::Two => scene.metrics.horizontal_shift,
        };
        let rotation_degrees = placed.frame.rotation.to_degrees();
        nodes.push(PreviewNode {
            index: placed.index(),
            left: f64::from(origin.x + location.x),
            top: f64::from(origin.y + location.y),
            width: placed.frame.width,
            height: placed.frame.height,
            translate_x,
            rotation_degrees,
            transform: format!("translateX({translate_x}px) rotate({rotation_degrees}deg)"),
            z_index: if placed.frame.z_order > 0 { FRONT_Z_INDEX } else { BACK_Z_INDEX },
            background: placed.colors.background.to_hex(),
            color: placed.colors.text.to_hex(),
            text: placed.run.text(),
            font_family: scene.font.family.clone(),
            font_weight: scene.font.weight,
            font_size_px: scene.font.size_px,
            letter_spacing_em: scene.spacing.letter_em,
            word_spacing_em: scene.spacing.word_em,
            padding_x: scene.metrics.box_padding,
            padding_top: scene.baseline_shift,
        });
    }

    let background = if scene.background_color.is_transparent() {
        None
    } else {
        Some(scene.background_color.to_hex())
    };
    let grid = options.show_grid.then(|| GridOverlay {
        spacing_px: GRID_SPACING_PX,
        center_lines: true,
        color: brand.palette.orange.to_hex(),
    });

    log::debug!("Preview projected: {} nodes", nodes.len());

    Ok(PreviewScene {
        width: scene.canvas_width,
        height: scene.canvas_height,
        background,
        scale: preview_scale(options.viewport_width, options.asset_scale, scene.canvas_width),
        grid,
        nodes,
    })
}

// ===================================================================
// Tests
// ===================================================================
