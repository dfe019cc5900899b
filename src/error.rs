use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ReportError>;

/// Everything that can stop a report run. None of these are recovered.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("input file not found or unreadable: {}", path.display())]
    InputNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed row at line {line}: {reason}")]
    MalformedRow { line: u64, reason: String },

    #[error("failed reading input: {0}")]
    Read(#[source] csv::Error),

    #[error("display unavailable: {0}")]
    DisplayUnavailable(String),
}
