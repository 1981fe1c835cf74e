//! Where the remote target lives and how its surfaces are identified.

use serde::{Deserialize, Serialize};

use crate::types::Model;

/// Stable description of the remote chat target's surfaces.
///
/// Adapters implementing [`crate::session::RemoteSession`] use this to find
/// the input surface, decide readiness, and detect completion. The defaults
/// match the public chat frontend the pipeline was built against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetLayout {
    /// Base URL; the model query suffix is appended per session.
    pub base_url: String,
    /// Selector for the input surface.
    pub input_selector: String,
    /// Placeholder text the input surface shows once it accepts input.
    pub ready_placeholder: String,
    /// Selector matching the output surface's text blocks.
    pub output_selector: String,
    /// Substring that appears in the output surface only after generation
    /// has finished.
    pub completion_marker: String,
}

impl Default for TargetLayout {
    fn default() -> Self {
        Self {
            base_url: "https://chat.openai.com/".to_string(),
            input_selector: "textarea[data-id=\"root\"]".to_string(),
            ready_placeholder: "Send a message.".to_string(),
            output_selector: "p".to_string(),
            completion_marker: "Regenerate response".to_string(),
        }
    }
}

impl TargetLayout {
    /// URL for a new session scoped to `model`.
    pub fn session_url(&self, model: Model) -> String {
        format!("{}{}", self.base_url, model.query_suffix())
    }
}
