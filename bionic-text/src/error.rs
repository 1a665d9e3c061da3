use thiserror::Error;

#[derive(Error, Debug)]
pub enum TextError {
    /// The glyph source cannot answer yet, e.g. fonts are still loading.
    #[error("Glyph measurement unavailable: {0}")]
    GlyphMeasurementUnavailable(String),

    #[error("Failed to load font '{path}': {source}")]
    FontLoad {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
