//! Remote session capability and the traits adapters implement.

pub mod driver;
pub mod poll;

use async_trait::async_trait;
use uuid::Uuid;

use crate::types::{Model, Result};

/// One live remote conversation.
///
/// Implemented by an adapter for whatever automation mechanism reaches the
/// target (a driven browser tab, a test double). The probe methods
/// `is_ready` and `is_complete` run against live session state and must be
/// idempotent and side-effect-free; `submit` and `close` are the only
/// mutating operations.
#[async_trait]
pub trait RemoteSession: Send + Sync {
    /// Opaque handle identifying this session.
    fn handle(&self) -> Uuid;

    /// True once the input surface's placeholder equals the known
    /// ready-state label.
    async fn is_ready(&self) -> Result<bool>;

    /// Write `text` to the input surface in one atomic write and trigger
    /// submission.
    async fn submit(&self, text: &str) -> Result<()>;

    /// True once the output surface contains the completion marker. A
    /// heuristic proxy for "generation finished", not a semantic guarantee.
    async fn is_complete(&self) -> Result<bool>;

    /// Full rendered answer text, text blocks in document order.
    async fn extract_text(&self) -> Result<String>;

    /// Terminate the session. The handle is invalid afterwards whether or
    /// not termination succeeded.
    async fn close(&self) -> Result<()>;
}

/// Opens new remote sessions scoped to a model variant.
#[async_trait]
pub trait SessionOpener: Send + Sync {
    async fn open(&self, model: Model) -> Result<Box<dyn RemoteSession>>;
}

/// Join extracted text blocks into one answer string: trim each block, drop
/// empty ones, join with newlines.
pub fn join_text_blocks<I, S>(blocks: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    blocks
        .into_iter()
        .filter_map(|block| {
            let trimmed = block.as_ref().trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        })
        .collect::<Vec<_>>()
        .join("\n")
}
