use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransformError {
    #[error("Failed to {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("No input files given")]
    NoInputs,

    #[error("No valid page ranges (expected e.g. 1-3, 5)")]
    NoValidRanges,

    #[error("No pages selected")]
    NoPagesSelected,

    #[error("No signature provided")]
    MissingSignature,

    #[error("{} already exists", .0.display())]
    DestinationExists(PathBuf),
}

impl TransformError {
    pub(crate) fn io(context: impl Into<String>) -> impl FnOnce(std::io::Error) -> Self {
        let context = context.into();
        move |source| TransformError::Io { context, source }
    }
}

/// Failures of the external HTML-to-PDF renderer
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to start renderer '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Renderer '{program}' exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: String,
        stderr: String,
    },

    #[error("Renderer produced no output")]
    NoOutput,

    #[error("Renderer I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
