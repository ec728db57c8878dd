use miette::Diagnostic;
use thiserror::Error;

use crate::stream::EventKind;

/// Main error type for stockpile operations
#[derive(Error, Diagnostic, Debug)]
pub enum StockpileError {
    #[error("IO error: {0}")]
    #[diagnostic(code(stockpile::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(stockpile::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Malformed XML in #{id}: {message}")]
    #[diagnostic(
        code(stockpile::xml),
        help("Every input must be a well-formed XML document")
    )]
    MalformedXml { id: String, message: String },

    #[error("Invalid document id '{id}': {reason}")]
    #[diagnostic(code(stockpile::id))]
    InvalidIdentifier {
        id: String,
        reason: String,
        #[help]
        help: Option<String>,
    },

    #[error("{processor} processor cannot process {kind} events")]
    #[diagnostic(
        code(stockpile::processor),
        help("Check `accepts` before calling `process`")
    )]
    ProcessorContract {
        processor: &'static str,
        kind: EventKind,
    },

    #[error("Failed to write XML: {message}")]
    #[diagnostic(code(stockpile::write))]
    Serialize { message: String },

    #[error("Parse error: {message}")]
    #[diagnostic(code(stockpile::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Build error: {message}")]
    #[diagnostic(code(stockpile::build))]
    Build {
        message: String,
        #[help]
        help: Option<String>,
    },
}

pub type Result<T> = std::result::Result<T, StockpileError>;
