//! Brand constants — the fixed ratios, palette and typography every
//! headline is derived from.
//!
//! A single frozen instance is shared process-wide through
//! [`BrandConstants::global`]. Callers that need a different brand (tests,
//! a JSON override loaded at startup) build their own value and pass it by
//! reference; nothing in the engine mutates it.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

// ── Color ───────────────────────────────────────────────────────────

/// Straight (non-premultiplied) RGBA color, 8 bits per channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(literal: &str) -> Result<Self, ConfigError> {
        let digits = literal.strip_prefix('#').unwrap_or(literal);
        let channel = |i: usize| {
            digits
                .get(i..i + 2)
                .and_then(|s| u8::from_str_radix(s, 16).ok())
                .ok_or_else(|| ConfigError::InvalidColor(literal.to_string()))
        };
        match digits.len() {
            6 => Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Ok(Self::rgba(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => Err(ConfigError::InvalidColor(literal.to_string())),
        }
    }

    /// `#rrggbb` for opaque colors, `#rrggbbaa` otherwise.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

// ── Palette ─────────────────────────────────────────────────────────

/// Named entries of the brand palette.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaletteColor {
    Navy,
    Orange,
    Blue,
    Grey,
    White,
    Black,
    Transparent,
    Success,
    Alert,
}

impl PaletteColor {
    pub const ALL: [PaletteColor; 9] = [
        PaletteColor::Navy,
        PaletteColor::Orange,
        PaletteColor::Blue,
        PaletteColor::Grey,
        PaletteColor::White,
        PaletteColor::Black,
        PaletteColor::Transparent,
        PaletteColor::Success,
        PaletteColor::Alert,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Navy => "navy",
            Self::Orange => "orange",
            Self::Blue => "blue",
            Self::Grey => "grey",
            Self::White => "white",
            Self::Black => "black",
            Self::Transparent => "transparent",
            Self::Success => "success",
            Self::Alert => "alert",
        }
    }
}

impl FromStr for PaletteColor {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.name() == wanted)
            .ok_or(ConfigError::UnknownVariant {
                kind: "palette color",
                value: s.to_string(),
            })
    }
}

impl fmt::Display for PaletteColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Concrete values for every [`PaletteColor`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    pub navy: Color,
    pub orange: Color,
    pub blue: Color,
    pub grey: Color,
    pub white: Color,
    pub black: Color,
    pub success: Color,
    pub alert: Color,
}

impl Palette {
    pub const BIONIC: Palette = Palette {
        navy: Color::rgb(0x18, 0x28, 0x65),
        orange: Color::rgb(0xff, 0x67, 0x41),
        blue: Color::rgb(0x0a, 0x6b, 0xff),
        grey: Color::rgb(0xf3, 0xf3, 0xf3),
        white: Color::rgb(0xff, 0xff, 0xff),
        black: Color::rgb(0x00, 0x00, 0x00),
        success: Color::rgb(0x30, 0xb6, 0x4a),
        alert: Color::rgb(0xd4, 0x25, 0x1c),
    };

    pub fn get(&self, color: PaletteColor) -> Color {
        match color {
            PaletteColor::Navy => self.navy,
            PaletteColor::Orange => self.orange,
            PaletteColor::Blue => self.blue,
            PaletteColor::Grey => self.grey,
            PaletteColor::White => self.white,
            PaletteColor::Black => self.black,
            PaletteColor::Transparent => Color::TRANSPARENT,
            PaletteColor::Success => self.success,
            PaletteColor::Alert => self.alert,
        }
    }
}

// ── Typography ──────────────────────────────────────────────────────

/// Brand typeface used by both the preview and the export.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Typeface {
    /// CSS-style family chain; the first entry is the brand face.
    pub family: String,
    /// Weight (100–900).
    pub weight: u16,
}

// ── Constants ───────────────────────────────────────────────────────

/// Immutable brand configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandConstants {
    /// Cap height as a fraction of the font size.
    pub cap_height_ratio: f64,
    /// Box padding as a fraction of the cap height (1/2 cap).
    pub padding_ratio: f64,
    /// Inter-box distance unit as a fraction of the cap height (1/4 cap).
    pub offset_ratio: f64,
    /// Second-line indent for the offset composition.
    pub shift_ratio: f64,
    /// Box rotation in degrees (box 1 positive, box 2 negative).
    pub rotation_angle_degrees: f64,
    /// Empirical factor applied to `|sin(angle)|` to get the rotation compensation.
    pub rotation_compensation_scale: f64,
    /// Vertical optical correction for the typeface, as a fraction of the font size.
    pub optical_baseline_ratio: f64,
    pub palette: Palette,
    pub typeface: Typeface,
    pub default_letter_spacing_em: f64,
    pub default_word_spacing_em: f64,
    pub min_font_size_px: f64,
    pub max_font_size_px: f64,
    /// Export resolution.
    pub canvas_width: u32,
    pub canvas_height: u32,
}

impl Default for BrandConstants {
    fn default() -> Self {
        Self {
            cap_height_ratio: 0.72,
            padding_ratio: 0.50,
            offset_ratio: 0.25,
            shift_ratio: 0.85,
            rotation_angle_degrees: 1.5,
            rotation_compensation_scale: 400.0,
            optical_baseline_ratio: 0.05,
            palette: Palette::BIONIC,
            typeface: Typeface {
                family: String::from("Poppins, sans-serif"),
                weight: 900,
            },
            default_letter_spacing_em: 0.02,
            default_word_spacing_em: 0.30,
            min_font_size_px: 40.0,
            max_font_size_px: 200.0,
            canvas_width: 1920,
            canvas_height: 1080,
        }
    }
}

static GLOBAL: OnceLock<BrandConstants> = OnceLock::new();

impl BrandConstants {
    /// The process-wide brand, initialised on first access.
    pub fn global() -> &'static BrandConstants {
        GLOBAL.get_or_init(BrandConstants::default)
    }

    /// Install a custom brand as the process-wide instance.
    ///
    /// Only succeeds before the first call to [`BrandConstants::global`];
    /// afterwards the brand is frozen and the rejected value is handed back.
    pub fn install(brand: BrandConstants) -> Result<&'static BrandConstants, BrandConstants> {
        GLOBAL.set(brand)?;
        log::info!("Brand constants installed");
        Ok(Self::global())
    }

    /// Load a brand override from JSON. Missing fields are an error.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn color(&self, color: PaletteColor) -> Color {
        self.palette.get(color)
    }

    /// Rotation angle in radians.
    pub fn rotation_radians(&self) -> f64 {
        self.rotation_angle_degrees.to_radians()
    }

    /// Canvas center in pixels.
    pub fn canvas_center(&self) -> (f64, f64) {
        (
            f64::from(self.canvas_width) / 2.0,
            f64::from(self.canvas_height) / 2.0,
        )
    }

    /// Clamp a font size into the supported domain.
    pub fn clamp_font_size(&self, font_size_px: f64) -> f64 {
        font_size_px.clamp(self.min_font_size_px, self.max_font_size_px)
    }
}

// ===================================================================
// Tests
// ===================================================================
