use std::path::PathBuf;

/// Errors surfaced by the windowed host. The geometry core never fails.
#[derive(Debug, thiserror::Error)]
pub enum ClinometerError {
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("pixel surface error: {0}")]
    Pixels(#[from] pixels::Error),

    #[error("failed to resize pixel buffer: {0}")]
    Texture(#[from] pixels::TextureError),

    #[error("failed to read font {path}: {source}")]
    FontRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("font file {0} is not a usable TrueType/OpenType font")]
    InvalidFont(PathBuf),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
