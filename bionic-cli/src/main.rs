//! `bionic` — renders stacked headline assets from the command line.

mod cli;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use bionic_core::{BrandConstants, LayoutConfig};
use bionic_layout::{project, HeadlineLayout, PreviewOptions};
use bionic_render::ExportSession;
use bionic_text::{
    read_font_files, CosmicGlyphs, FixedAdvanceGlyphs, FontReadiness, FontReadySignal,
    GlyphSource, TextError,
};

use crate::cli::Cli;

type Glyphs = Box<dyn GlyphSource + Send>;

fn load_brand(path: Option<&Path>) -> Result<&'static BrandConstants> {
    let Some(path) = path else {
        return Ok(BrandConstants::global());
    };
    let json = fs::read_to_string(path)
        .with_context(|| format!("reading brand file {}", path.display()))?;
    let brand = BrandConstants::from_json(&json)
        .with_context(|| format!("parsing brand file {}", path.display()))?;
    Ok(BrandConstants::install(brand).unwrap_or_else(|_| {
        log::warn!("Brand already initialised; ignoring {}", path.display());
        BrandConstants::global()
    }))
}

fn load_config(path: Option<&Path>) -> Result<LayoutConfig> {
    match path {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            LayoutConfig::from_json(&json)
                .with_context(|| format!("parsing config {}", path.display()))
        }
        None => Ok(LayoutConfig::default()),
    }
}

/// Build the glyph source off the async runtime and fire `signal` once it
/// can answer queries.
fn load_glyphs(
    fixed: bool,
    fonts: Vec<PathBuf>,
    signal: FontReadySignal,
) -> tokio::task::JoinHandle<Result<Glyphs, TextError>> {
    tokio::task::spawn_blocking(move || {
        let glyphs: Glyphs = if fixed {
            info!("Using fixed glyph metrics");
            Box::new(FixedAdvanceGlyphs::new())
        } else if fonts.is_empty() {
            let glyphs = CosmicGlyphs::new();
            info!("Loaded {} system font faces", glyphs.face_count());
            Box::new(glyphs)
        } else {
            let mut glyphs = CosmicGlyphs::empty();
            for data in read_font_files(&fonts)? {
                glyphs.load_font_data(data);
            }
            info!(
                "Loaded {} font faces: {}",
                glyphs.face_count(),
                glyphs.loaded_families().join(", ")
            );
            Box::new(glyphs)
        };
        signal.ready();
        Ok(glyphs)
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    info!("Starting bionic...");

    // The brand must be settled before anything reads the global default.
    let brand = load_brand(cli.brand.as_deref())?;
    let config = cli.apply(load_config(cli.config.as_deref())?, brand);

    let (signal, readiness) = FontReadiness::pending();
    let loader = load_glyphs(cli.fixed_metrics, cli.fonts.clone(), signal);

    let mut layout = HeadlineLayout::new(brand);
    if let Some(family) = &cli.family {
        layout = layout.with_font_family(family.clone());
    }
    let session = ExportSession::new(layout, readiness);

    let mut glyphs = loader
        .await
        .context("font loader panicked")?
        .context("loading fonts")?;

    if let Some(path) = &cli.preview_json {
        let scene = session.layout().compute(&config, glyphs.as_mut())?;
        let options = PreviewOptions {
            viewport_width: cli.viewport_width,
            asset_scale: cli.asset_scale,
            show_grid: cli.grid,
        };
        let preview = project(&scene, brand, &options)?;
        fs::write(path, preview.to_json()?)
            .with_context(|| format!("writing preview {}", path.display()))?;
        info!("Preview scene written to {}", path.display());
    }

    fs::create_dir_all(&cli.out_dir)
        .with_context(|| format!("creating {}", cli.out_dir.display()))?;

    for mode in cli.export_modes() {
        let Some(asset) = session
            .export(&config, mode, glyphs.as_mut())
            .await
            .with_context(|| format!("exporting {mode}"))?
        else {
            continue;
        };
        let path = cli.out_dir.join(&asset.file_name);
        fs::write(&path, &asset.png).with_context(|| format!("writing {}", path.display()))?;
        info!("Wrote {}", path.display());
    }

    Ok(())
}
