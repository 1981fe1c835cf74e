//! Pipeline orchestration: agents, then critique, then synthesis.

use std::future::Future;
use std::sync::Arc;

use tracing::{error, info};

use crate::prompts;
use crate::session::SessionOpener;
use crate::session::driver::{SessionDriver, SessionReply};
use crate::types::stage::PipelineState;
use crate::types::{Error, Request, Result, StageKind, StageResult};

/// Everything a completed run produced.
///
/// The terminal answer is `synthesis.text`. The synthesis session is still
/// open (so the conversation can continue from the final state) and its
/// handle is `synthesis.session`; adopting or closing it is the caller's
/// choice.
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub agent_results: Vec<StageResult>,
    pub critique: StageResult,
    pub synthesis: StageResult,
}

impl PipelineOutcome {
    /// The pipeline's terminal answer.
    pub fn answer(&self) -> &str {
        &self.synthesis.text
    }
}

/// Runs the full agents -> critique -> synthesis pipeline over a driver.
///
/// Stages run strictly sequentially: agent sessions one at a time in slot
/// order, then one critique session over all agent answers, then one
/// synthesis session. The first stage error aborts the run; already
/// collected answers are discarded and no stage is retried.
pub struct Pipeline {
    driver: SessionDriver,
}

impl Pipeline {
    pub fn new(driver: SessionDriver) -> Self {
        Self { driver }
    }

    /// A pipeline with default driver timing over `opener`.
    pub fn with_opener(opener: Arc<dyn SessionOpener>) -> Self {
        Self::new(SessionDriver::new(opener))
    }

    pub fn driver(&self) -> &SessionDriver {
        &self.driver
    }

    /// Run `request` through every stage and return the combined outcome.
    ///
    /// # Errors
    /// `InvalidRequest` for an empty question or a zero agent count;
    /// otherwise `StageFailed` naming the stage that aborted the run and
    /// carrying the underlying error.
    pub async fn run(&self, request: Request) -> Result<PipelineOutcome> {
        request.validate()?;
        info!(model = %request.model, agents = request.agents, "pipeline started");

        let mut state = PipelineState::new(request);

        let agent_prompt = prompts::build_agent_prompt(&state.request.question);
        for slot in 0..state.request.agents {
            let reply = self
                .stage(
                    StageKind::Agent,
                    self.driver
                        .run_session(&agent_prompt, state.request.model, true),
                )
                .await?;
            info!(slot, session = %reply.session, "agent answer collected");
            state.push_agent(stage_result(StageKind::Agent, reply));
        }

        let critique_prompt =
            prompts::build_critique_prompt(&state.request.question, &state.agent_answers());
        let reply = self
            .stage(
                StageKind::Critique,
                self.driver
                    .run_session(&critique_prompt, state.request.model, true),
            )
            .await?;
        info!(session = %reply.session, "critique collected");
        let critique = stage_result(StageKind::Critique, reply);

        let synthesis_prompt = prompts::build_synthesis_prompt(
            &state.request.question,
            &state.agent_answers(),
            &critique.text,
        );
        state.set_critique(critique);
        // The synthesis session stays open so the caller can keep chatting.
        let reply = self
            .stage(
                StageKind::Synthesis,
                self.driver
                    .run_session(&synthesis_prompt, state.request.model, false),
            )
            .await?;
        info!(session = %reply.session, "synthesis collected, pipeline finished");
        state.set_synthesis(stage_result(StageKind::Synthesis, reply));

        let PipelineState {
            agent_results,
            critique,
            synthesis,
            ..
        } = state;
        match (critique, synthesis) {
            (Some(critique), Some(synthesis)) => Ok(PipelineOutcome {
                agent_results,
                critique,
                synthesis,
            }),
            _ => Err(Error::Session(
                "pipeline finished without critique or synthesis".to_string(),
            )),
        }
    }

    async fn stage(
        &self,
        kind: StageKind,
        exchange: impl Future<Output = Result<SessionReply>>,
    ) -> Result<SessionReply> {
        exchange.await.map_err(|source| {
            error!(stage = %kind, error = %source, "stage failed, aborting pipeline");
            Error::StageFailed {
                stage: kind,
                source: Box::new(source),
            }
        })
    }
}

fn stage_result(stage: StageKind, reply: SessionReply) -> StageResult {
    StageResult {
        stage,
        text: reply.text,
        session: reply.session,
    }
}
