//! Error types for the resolver pipeline.

use std::time::Duration;

use crate::types::stage::StageKind;

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the pipeline and its session driver.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The inbound request failed validation.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The session's input surface never reached its ready state.
    #[error("input surface not ready within {0:?}")]
    ReadinessTimeout(Duration),

    /// The completion marker never appeared in the output surface.
    #[error("completion marker not observed within {0:?}")]
    CompletionTimeout(Duration),

    /// Opening, writing to, or reading from the remote session failed.
    #[error("session error: {0}")]
    Session(String),

    /// The run was cancelled while waiting on the remote session.
    #[error("cancelled")]
    Cancelled,

    /// A pipeline stage failed, aborting the remaining stages.
    #[error("{stage} stage failed: {source}")]
    StageFailed {
        stage: StageKind,
        source: Box<Error>,
    },
}

impl Error {
    /// The innermost error kind, unwrapping any stage wrapper.
    pub fn root_cause(&self) -> &Error {
        match self {
            Error::StageFailed { source, .. } => source.root_cause(),
            other => other,
        }
    }
}
