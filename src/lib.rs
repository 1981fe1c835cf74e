//! smartgpt - multi-agent resolver pipeline for web chat sessions.
//!
//! Submits one question to several independent agent sessions, runs a
//! critique pass over the combined answers, then a synthesis pass that
//! produces one improved final answer. The remote chat target is reached
//! through the [`RemoteSession`] capability trait, so any automation
//! mechanism (a driven browser tab, a test double) can back the pipeline.
//!
//! # Example
//!
//! ```rust
//! use smartgpt::prompts;
//!
//! let prompt = prompts::build_agent_prompt("What is 2+2?");
//! assert!(prompt.contains("step by step"));
//! ```
//!
//! # Modules
//!
//! - [`types`] - Requests, stage results, errors
//! - [`session`] - Session capability traits, polling, and the driver
//! - [`prompts`] - Per-stage prompt assembly
//! - [`pipeline`] - The agents -> critique -> synthesis orchestrator
//! - [`target`] - Where the remote target lives and how its surfaces look

pub mod pipeline;
pub mod prompts;
pub mod session;
pub mod target;
pub mod types;

// Re-export the public surface at the crate root for convenience
pub use pipeline::{Pipeline, PipelineOutcome};
pub use session::driver::{DriverConfig, SessionDriver, SessionReply};
pub use session::poll::{DEFAULT_POLL_INTERVAL, WaitError, wait_until};
pub use session::{RemoteSession, SessionOpener, join_text_blocks};
pub use target::TargetLayout;
pub use types::{Error, Model, Request, Result, StageKind, StageResult};
