//! Error type for the SVG backend.
//!
//! Errors never cross the host boundary as panics: the session's entry
//! points turn them into a `false` status plus a log line.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SvgError {
    #[error("cannot open output '{name}': {source}")]
    SinkUnavailable {
        name: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write '{name}': {source}")]
    Write {
        name: String,
        #[source]
        source: std::io::Error,
    },
    #[error("no output target set")]
    NoOutput,
    #[error("session is not active")]
    NotActive,
    #[error("invalid session options: {0}")]
    InvalidOptions(#[from] serde_json::Error),
}
