use std::path::PathBuf;

use clap::Parser;

use bionic_core::{
    Alignment, BrandConstants, Composition, ExportMode, HeadlineStyle, LayoutConfig,
    PaletteColor, Stacking, Theme,
};

#[derive(Parser, Debug)]
#[command(name = "bionic", version, about = "Stacked headline generator")]
pub struct Cli {
    #[arg(long, help = "Layout snapshot (JSON) to start from")]
    pub config: Option<PathBuf>,
    #[arg(long, help = "Brand constants override (JSON)")]
    pub brand: Option<PathBuf>,

    #[arg(long)]
    pub text1: Option<String>,
    #[arg(long)]
    pub text2: Option<String>,
    #[arg(long, help = "Keep the text case instead of upper-casing")]
    pub keep_case: bool,

    #[arg(long, help = "standard | overlapping")]
    pub style: Option<HeadlineStyle>,
    #[arg(long, help = "range | offset")]
    pub composition: Option<Composition>,
    #[arg(long, help = "box1Top | box2Top")]
    pub stacking: Option<Stacking>,
    #[arg(long, help = "left | center | right")]
    pub alignment: Option<Alignment>,
    #[arg(long, help = "primary | alt | blue | grey")]
    pub theme: Option<Theme>,
    #[arg(long, help = "Palette color or 'transparent'")]
    pub background: Option<PaletteColor>,
    #[arg(long, help = "Font size in pixels, clamped to the brand range")]
    pub font_size: Option<f64>,

    #[arg(long, allow_hyphen_values = true, help = "Tracking in em (needs --unlock-spacing)")]
    pub letter_spacing: Option<f64>,
    #[arg(long, allow_hyphen_values = true, help = "Word spacing in em (needs --unlock-spacing)")]
    pub word_spacing: Option<f64>,
    #[arg(long, help = "Use the given spacing instead of the brand defaults")]
    pub unlock_spacing: bool,
    #[arg(long, help = "Reset stored spacing to the brand defaults")]
    pub reset_spacing: bool,

    #[arg(long = "mode", help = "master | layer1 | layer2 | combo (repeatable)")]
    pub modes: Vec<ExportMode>,
    #[arg(long, default_value = ".", help = "Directory for exported PNGs")]
    pub out_dir: PathBuf,

    #[arg(long = "font", help = "Font file to load instead of system fonts (repeatable)")]
    pub fonts: Vec<PathBuf>,
    #[arg(long, help = "Font family chain to measure with")]
    pub family: Option<String>,
    #[arg(long, help = "Deterministic glyph metrics, no font files")]
    pub fixed_metrics: bool,

    #[arg(long, help = "Write the projected preview scene as JSON")]
    pub preview_json: Option<PathBuf>,
    #[arg(long, default_value_t = 1920.0)]
    pub viewport_width: f64,
    #[arg(long, default_value_t = 1.0)]
    pub asset_scale: f64,
    #[arg(long, help = "Include the layout grid in the preview scene")]
    pub grid: bool,
}

impl Cli {
    /// Apply the flags on top of `config`.
    pub fn apply(&self, mut config: LayoutConfig, brand: &BrandConstants) -> LayoutConfig {
        if let Some(text) = &self.text1 {
            config.text1 = text.clone();
        }
        if let Some(text) = &self.text2 {
            config.text2 = text.clone();
        }
        if !self.keep_case {
            config.text1 = config.text1.to_uppercase();
            config.text2 = config.text2.to_uppercase();
        }

        if let Some(style) = self.style {
            config.style = style;
        }
        if let Some(composition) = self.composition {
            config.composition = composition;
        }
        if let Some(stacking) = self.stacking {
            config.stacking = stacking;
        }
        if let Some(alignment) = self.alignment {
            config.alignment = alignment;
        }
        if let Some(theme) = self.theme {
            config.theme = theme;
        }
        if let Some(background) = self.background {
            config.canvas_background = background;
        }
        if let Some(size) = self.font_size {
            config.font_size_px = size;
        }

        if self.reset_spacing {
            config.reset_spacing(brand);
        }
        if let Some(letter) = self.letter_spacing {
            config.letter_spacing_em = letter;
        }
        if let Some(word) = self.word_spacing {
            config.word_spacing_em = word;
        }
        if self.unlock_spacing {
            config.spacing_locked = false;
        }
        if config.spacing_locked && (self.letter_spacing.is_some() || self.word_spacing.is_some()) {
            log::warn!("Spacing is locked to the brand defaults; pass --unlock-spacing to use it");
        }

        config.clamped(brand)
    }

    pub fn export_modes(&self) -> Vec<ExportMode> {
        if self.modes.is_empty() {
            vec![ExportMode::Master]
        } else {
            self.modes.clone()
        }
    }
}

// ===================================================================
// Tests
// ===================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("bionic").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_flags_override_config() {
        let brand = BrandConstants::default();
        let cli = parse(&[
            "--text1", "launch", "--style", "standard", "--alignment", "right",
            "--theme", "grey", "--background", "transparent", "--font-size", "500",
        ]);
        let config = cli.apply(LayoutConfig::default(), &brand);
        assert_eq!(config.text1, "LAUNCH");
        assert_eq!(config.style, HeadlineStyle::Standard);
        assert_eq!(config.alignment, Alignment::Right);
        assert_eq!(config.theme, Theme::Grey);
        assert_eq!(config.canvas_background, PaletteColor::Transparent);
        assert_eq!(config.font_size_px, 200.0);
    }

    #[test]
    fn test_keep_case() {
        let brand = BrandConstants::default();
        let cli = parse(&["--text2", "Mixed Case", "--keep-case"]);
        assert_eq!(cli.apply(LayoutConfig::default(), &brand).text2, "Mixed Case");
    }

    #[test]
    fn test_negative_spacing_unlocked() {
        let brand = BrandConstants::default();
        let cli = parse(&["--word-spacing", "-0.3", "--unlock-spacing"]);
        let config = cli.apply(LayoutConfig::default(), &brand);
        assert!(!config.spacing_locked);
        assert_eq!(config.word_spacing_em, -0.3);
        assert_eq!(config.effective_spacing(&brand).word_em, -0.3);
    }

    #[test]
    fn test_modes_default_to_master() {
        assert_eq!(parse(&[]).export_modes(), vec![ExportMode::Master]);
        assert_eq!(
            parse(&["--mode", "layer1", "--mode", "combo"]).export_modes(),
            vec![ExportMode::Layer1, ExportMode::Combo]
        );
        assert!(Cli::try_parse_from(["bionic", "--mode", "poster"]).is_err());
    }
}
