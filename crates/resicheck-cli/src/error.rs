use resicheck::core::io::error::ParseError;
use resicheck::core::topology::registry::CatalogLoadError;
use resicheck::report::ReportError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Catalog(#[from] CatalogLoadError),

    #[error(transparent)]
    Report(#[from] ReportError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse file '{path}': {source}", path = path.display())]
    FileParsing {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("Failed to read '{path}': {source}", path = path.display())]
    Input {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to check '{path}' [{code}]: {source}", path = path.display(), code = source.code())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error("{failed} of {total} input(s) could not be parsed")]
    Unparsed { failed: usize, total: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid argument: {0}")]
    Argument(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
