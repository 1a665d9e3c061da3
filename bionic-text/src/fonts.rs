//! Font descriptors, font file loading and the one-shot readiness signal
//! the export path waits on.
//!
//! ## Readiness
//!
//! ```text
//! FontReadySignal ──ready()──▸ watch(bool) ──▸ FontReadiness::wait()
//!        │                                          ▲
//!        └── dropped without ready() ───────────────┘  (error)
//! ```
//!
//! The live preview never waits; only exports do.

use std::path::Path;
use std::time::Instant;

use tokio::sync::watch;

use crate::error::TextError;

// ── Font descriptor ─────────────────────────────────────────────────

/// Font a glyph source is queried with.
#[derive(Clone, Debug, PartialEq)]
pub struct FontSpec {
    /// CSS-style family chain, e.g. `"Poppins, sans-serif"`.
    pub family: String,
    /// Weight (100–900).
    pub weight: u16,
    /// Size in pixels.
    pub size_px: f64,
}

impl FontSpec {
    pub fn new(family: impl Into<String>, weight: u16, size_px: f64) -> Self {
        Self {
            family: family.into(),
            weight,
            size_px,
        }
    }

    /// Family names in fallback order, unquoted and trimmed.
    pub fn family_chain(&self) -> Vec<&str> {
        let chain: Vec<&str> = self
            .family
            .split(',')
            .map(|s| s.trim().trim_matches('"').trim_matches('\''))
            .filter(|s| !s.is_empty())
            .collect();
        if chain.is_empty() {
            vec!["sans-serif"]
        } else {
            chain
        }
    }

    /// First family of the chain — the one the brand asks for.
    pub fn primary_family(&self) -> &str {
        self.family_chain()[0]
    }
}

/// Generic CSS family keywords.
pub fn is_generic_family(name: &str) -> bool {
    matches!(
        name.to_ascii_lowercase().as_str(),
        "serif" | "sans-serif" | "monospace" | "cursive" | "fantasy"
    )
}

// ── Loading ─────────────────────────────────────────────────────────

/// Read font files into memory. Blocking I/O; run it off the async path.
pub fn read_font_files<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<Vec<u8>>, TextError> {
    let start = Instant::now();
    let mut blobs = Vec::with_capacity(paths.len());
    for path in paths {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|source| TextError::FontLoad {
            path: path.display().to_string(),
            source,
        })?;
        log::debug!("Read font {} ({} bytes)", path.display(), data.len());
        blobs.push(data);
    }
    log::info!(
        "Read {} font file(s) in {:.1}ms",
        blobs.len(),
        start.elapsed().as_secs_f64() * 1000.0
    );
    Ok(blobs)
}

// ── Readiness ───────────────────────────────────────────────────────

/// Sending half: flipped once when fonts are available.
#[derive(Debug)]
pub struct FontReadySignal {
    tx: watch::Sender<bool>,
}

impl FontReadySignal {
    pub fn ready(self) {
        self.tx.send_replace(true);
        log::info!("Fonts ready");
    }
}

/// Receiving half, cheap to clone.
#[derive(Clone, Debug)]
pub struct FontReadiness {
    rx: watch::Receiver<bool>,
}

impl FontReadiness {
    /// Readiness that is already satisfied.
    pub fn ready() -> Self {
        let (_tx, rx) = watch::channel(true);
        Self { rx }
    }

    /// Readiness that resolves once the returned signal fires.
    pub fn pending() -> (FontReadySignal, Self) {
        let (tx, rx) = watch::channel(false);
        (FontReadySignal { tx }, Self { rx })
    }

    pub fn is_ready(&self) -> bool {
        *self.rx.borrow()
    }

    /// Wait until fonts are ready.
    ///
    /// Fails if the signal is dropped without firing; no timeout.
    pub async fn wait(&self) -> Result<(), TextError> {
        if self.is_ready() {
            return Ok(());
        }
        let mut rx = self.rx.clone();
        if rx.wait_for(|ready| *ready).await.is_err() {
            return Err(TextError::GlyphMeasurementUnavailable(
                "font loading was abandoned".into(),
            ));
        }
        Ok(())
    }
}

// ===================================================================
// Tests
// ===================================================================
