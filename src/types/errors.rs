use std::io;
use thiserror::Error;

/// Errors produced while loading a catalog document from disk.
///
/// Parsing itself is total (malformed lines are skipped); only acquiring the
/// text can fail.
#[derive(Debug, Error)]
pub enum MatrixReadError {
    #[error("Not a valid .dbc file: {path}")]
    InvalidExtension { path: String },
    #[error("Failed to open '{path}'. \nError: {source}")]
    OpenFile {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("Failed while reading '{path}'. \nError: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
}

/// Errors produced while loading a trace document from disk.
#[derive(Debug, Error)]
pub enum TraceReadError {
    #[error("Failed to open '{path}'. \nError: {source}")]
    OpenFile {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("Failed while reading '{path}'. \nError: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
}
