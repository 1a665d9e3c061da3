//! Layout configuration — the immutable snapshot handed to the engine for
//! one preview pass or one export.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::brand::{BrandConstants, PaletteColor};
use crate::error::ConfigError;
use crate::theme::Theme;

/// Text used in place of an empty line so a box never collapses.
pub const PLACEHOLDER_TEXT: &str = " ";

// ── Enumerations ────────────────────────────────────────────────────

/// Implements `FromStr` + `Display` over a fixed list of accepted names.
/// The first name of each variant is the canonical one.
macro_rules! named_variants {
    ($ty:ident, $kind:literal, { $($variant:ident => [$($name:literal),+]),+ $(,)? }) => {
        impl $ty {
            pub fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant => named_variants!(@first $($name),+),)+
                }
            }
        }

        impl FromStr for $ty {
            type Err = ConfigError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim().to_lowercase();
                $(
                    if [$($name),+].contains(&wanted.as_str()) {
                        return Ok(Self::$variant);
                    }
                )+
                Err(ConfigError::UnknownVariant { kind: $kind, value: s.to_string() })
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }
    };
    (@first $first:literal $(, $rest:literal)*) => { $first };
}

/// Whether the two boxes sit apart or overlap.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HeadlineStyle {
    Standard,
    #[default]
    Overlapping,
}

named_variants!(HeadlineStyle, "style", {
    Standard => ["standard"],
    Overlapping => ["overlapping", "overlap"],
});

/// Horizontal relationship between the two lines.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Composition {
    /// Both lines share the group alignment.
    #[default]
    Range,
    /// The second line is indented (bionic shift).
    Offset,
}

named_variants!(Composition, "composition", {
    Range => ["range", "centered"],
    Offset => ["offset", "shift"],
});

/// Which box is painted on top. Never affects position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Stacking {
    Box1Top,
    #[default]
    Box2Top,
}

named_variants!(Stacking, "stacking", {
    Box1Top => ["box1top", "box1"],
    Box2Top => ["box2top", "box2"],
});

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Alignment {
    Left,
    #[default]
    Center,
    Right,
}

named_variants!(Alignment, "alignment", {
    Left => ["left"],
    Center => ["center", "centre"],
    Right => ["right"],
});

/// Which layers an export draws and whether it fills the canvas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExportMode {
    /// Both boxes, canvas background and drop shadows.
    #[default]
    Master,
    /// Box 1 only on a transparent canvas.
    Layer1,
    /// Box 2 only on a transparent canvas.
    Layer2,
    /// Both boxes on a transparent canvas.
    Combo,
}

named_variants!(ExportMode, "export mode", {
    Master => ["master"],
    Layer1 => ["layer1"],
    Layer2 => ["layer2"],
    Combo => ["combo"],
});

impl ExportMode {
    pub const ALL: [ExportMode; 4] = [
        ExportMode::Master,
        ExportMode::Layer1,
        ExportMode::Layer2,
        ExportMode::Combo,
    ];

    /// File name suffix, e.g. `-layer1`.
    pub fn suffix(&self) -> &'static str {
        match self {
            Self::Master => "-master",
            Self::Layer1 => "-layer1",
            Self::Layer2 => "-layer2",
            Self::Combo => "-combo",
        }
    }

    pub fn draws(&self, index: BoxIndex) -> bool {
        match self {
            Self::Master | Self::Combo => true,
            Self::Layer1 => index == BoxIndex::One,
            Self::Layer2 => index == BoxIndex::Two,
        }
    }

    /// Only the master export paints the canvas background and shadows.
    pub fn is_opaque(&self) -> bool {
        matches!(self, Self::Master)
    }
}

/// Identifies one of the two headline boxes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BoxIndex {
    #[serde(rename = "box1")]
    One,
    #[serde(rename = "box2")]
    Two,
}

impl BoxIndex {
    pub const BOTH: [BoxIndex; 2] = [BoxIndex::One, BoxIndex::Two];

    pub fn number(&self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
        }
    }
}

impl Stacking {
    /// The box painted last.
    pub fn top(&self) -> BoxIndex {
        match self {
            Self::Box1Top => BoxIndex::One,
            Self::Box2Top => BoxIndex::Two,
        }
    }
}

// ── Spacing ─────────────────────────────────────────────────────────

/// Tracking and word spacing in em, as fed to the text measurer.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spacing {
    pub letter_em: f64,
    pub word_em: f64,
}

impl Spacing {
    pub fn brand_default(brand: &BrandConstants) -> Self {
        Self {
            letter_em: brand.default_letter_spacing_em,
            word_em: brand.default_word_spacing_em,
        }
    }

    pub fn is_negative(&self) -> bool {
        self.letter_em < 0.0 || self.word_em < 0.0
    }
}

// ── LayoutConfig ────────────────────────────────────────────────────

/// One render or export request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutConfig {
    pub text1: String,
    pub text2: String,
    pub style: HeadlineStyle,
    pub composition: Composition,
    pub stacking: Stacking,
    pub alignment: Alignment,
    #[serde(rename = "themeId")]
    pub theme: Theme,
    pub canvas_background: PaletteColor,
    pub font_size_px: f64,
    pub letter_spacing_em: f64,
    pub word_spacing_em: f64,
    /// When set, the brand spacing is used regardless of the stored values.
    pub spacing_locked: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        let brand = BrandConstants::global();
        Self {
            text1: String::from("PROMOTIONAL"),
            text2: String::from("HEADING STYLE"),
            style: HeadlineStyle::default(),
            composition: Composition::default(),
            stacking: Stacking::default(),
            alignment: Alignment::default(),
            theme: Theme::default(),
            canvas_background: PaletteColor::White,
            font_size_px: 100.0,
            letter_spacing_em: brand.default_letter_spacing_em,
            word_spacing_em: brand.default_word_spacing_em,
            spacing_locked: true,
        }
    }
}

impl LayoutConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Text of a box, with the placeholder substituted for an empty line.
    pub fn text(&self, index: BoxIndex) -> &str {
        let raw = match index {
            BoxIndex::One => &self.text1,
            BoxIndex::Two => &self.text2,
        };
        if raw.is_empty() {
            PLACEHOLDER_TEXT
        } else {
            raw
        }
    }

    /// Spacing the measurer must use for this request.
    ///
    /// Locking does not touch the stored values, so unlocking brings the
    /// user's last spacing back.
    pub fn effective_spacing(&self, brand: &BrandConstants) -> Spacing {
        if self.spacing_locked {
            Spacing::brand_default(brand)
        } else {
            Spacing {
                letter_em: self.letter_spacing_em,
                word_em: self.word_spacing_em,
            }
        }
    }

    /// Explicit reset action: overwrite the stored spacing with the brand defaults.
    pub fn reset_spacing(&mut self, brand: &BrandConstants) {
        let spacing = Spacing::brand_default(brand);
        self.letter_spacing_em = spacing.letter_em;
        self.word_spacing_em = spacing.word_em;
    }

    /// Check the declared parameter domains.
    ///
    /// The engine itself assumes validated input; this is for collaborators
    /// that want to reject rather than clamp.
    pub fn validate(&self, brand: &BrandConstants) -> Result<(), ConfigError> {
        let size = self.font_size_px;
        if !size.is_finite() || size < brand.min_font_size_px || size > brand.max_font_size_px {
            return Err(ConfigError::InvalidConfiguration(format!(
                "fontSizePx {size} outside [{}, {}]",
                brand.min_font_size_px, brand.max_font_size_px
            )));
        }
        if !self.letter_spacing_em.is_finite() || !self.word_spacing_em.is_finite() {
            return Err(ConfigError::InvalidConfiguration(
                "spacing must be finite".into(),
            ));
        }
        Ok(())
    }

    /// Copy with the font size clamped into the brand domain.
    pub fn clamped(mut self, brand: &BrandConstants) -> Self {
        let clamped = brand.clamp_font_size(self.font_size_px);
        if clamped != self.font_size_px {
            log::warn!(
                "fontSizePx {} clamped to {}",
                self.font_size_px,
                clamped
            );
            self.font_size_px = clamped;
        }
        self
    }
}

// ===================================================================
// Tests
// ===================================================================
