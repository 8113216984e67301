//! Error types

mod api;
mod config;
mod validation;

pub use api::*;
pub use config::*;
pub use validation::*;

/// Top-level error for the admin layer.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Data-access failure.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A draft failed validation before it was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A table was configured inconsistently.
    #[error("table setup error: {0}")]
    View(#[from] gridview::ViewError),

    /// A confirmed row action failed; the message was already reported.
    #[error("{0}")]
    Action(String),

    /// Arguments could not be parsed.
    #[error(transparent)]
    Cli(#[from] clap::Error),

    /// Command-line misuse.
    #[error("{0}")]
    Usage(String),

    /// Terminal I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Creates a usage error.
    pub fn usage(message: impl Into<String>) -> Self {
        Self::Usage(message.into())
    }
}
