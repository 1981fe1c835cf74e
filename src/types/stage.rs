//! Stage results and orchestrator-local pipeline state.

use serde::Serialize;
use uuid::Uuid;

use crate::types::request::Request;

/// Which pipeline stage produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StageKind {
    Agent,
    Critique,
    Synthesis,
}

impl std::fmt::Display for StageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StageKind::Agent => f.write_str("agent"),
            StageKind::Critique => f.write_str("critique"),
            StageKind::Synthesis => f.write_str("synthesis"),
        }
    }
}

/// One stage's extracted answer, tagged with the session that produced it.
#[derive(Debug, Clone, Serialize)]
pub struct StageResult {
    pub stage: StageKind,
    pub text: String,
    pub session: Uuid,
}

/// Per-run pipeline state.
///
/// Created when a request is accepted and dropped when the run completes or
/// fails; mutated only by the orchestrator. Critique is set only after all
/// agent results are in, synthesis only after critique.
#[derive(Debug)]
pub(crate) struct PipelineState {
    pub request: Request,
    pub agent_results: Vec<StageResult>,
    pub critique: Option<StageResult>,
    pub synthesis: Option<StageResult>,
}

impl PipelineState {
    pub fn new(request: Request) -> Self {
        let slots = request.agents;
        Self {
            request,
            agent_results: Vec::with_capacity(slots),
            critique: None,
            synthesis: None,
        }
    }

    pub fn push_agent(&mut self, result: StageResult) {
        debug_assert!(self.critique.is_none());
        self.agent_results.push(result);
    }

    pub fn set_critique(&mut self, result: StageResult) {
        debug_assert_eq!(self.agent_results.len(), self.request.agents);
        self.critique = Some(result);
    }

    pub fn set_synthesis(&mut self, result: StageResult) {
        debug_assert!(self.critique.is_some());
        self.synthesis = Some(result);
    }

    /// Agent answer texts in collection order.
    pub fn agent_answers(&self) -> Vec<&str> {
        self.agent_results.iter().map(|r| r.text.as_str()).collect()
    }
}
