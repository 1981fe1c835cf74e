//! Type definitions for the resolver pipeline.

pub mod error;
pub mod request;
pub mod stage;

// Re-export commonly used types
pub use error::{Error, Result};
pub use request::{Model, Request};
pub use stage::{StageKind, StageResult};
