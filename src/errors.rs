use std::path::PathBuf;
use thiserror::Error;

/// Errors raised at the fallible edges of the crate.
///
/// Tree operations themselves never fail: they degrade to documented fallback
/// values. Only parsing of external input and settings loading report errors.
#[derive(Error, Debug)]
pub enum SheetError {
    #[error("invalid topic id {id:?}: expected {expected} characters, got {actual}")]
    InvalidTopicId {
        id: String,
        expected: usize,
        actual: usize,
    },

    #[error("unknown structure class: {0}")]
    UnknownStructureClass(String),

    #[error("config error: {message}")]
    Config { message: String },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type SheetResult<T> = Result<T, SheetError>;
