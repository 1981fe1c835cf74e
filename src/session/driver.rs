//! Drives one remote session through a full prompt/response exchange.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::session::poll::{DEFAULT_POLL_INTERVAL, WaitError, wait_until};
use crate::session::{RemoteSession, SessionOpener};
use crate::types::{Error, Model, Result};

/// Timing configuration for a session exchange.
#[derive(Debug, Clone)]
pub struct DriverConfig {
    /// Cap on waiting for the input surface to accept text.
    pub ready_timeout: Duration,
    /// Cap on waiting for the completion marker after submission.
    pub completion_timeout: Duration,
    /// Fixed inter-poll delay for both gates.
    pub poll_interval: Duration,
    /// Pause around mutations, giving the target time to settle.
    pub settle_delay: Duration,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            ready_timeout: Duration::from_secs(120),
            completion_timeout: Duration::from_secs(120),
            poll_interval: DEFAULT_POLL_INTERVAL,
            settle_delay: Duration::from_secs(2),
        }
    }
}

impl DriverConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ready_timeout(mut self, timeout: Duration) -> Self {
        self.ready_timeout = timeout;
        self
    }

    pub fn with_completion_timeout(mut self, timeout: Duration) -> Self {
        self.completion_timeout = timeout;
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }
}

/// The answer extracted from one completed session exchange.
#[derive(Debug, Clone)]
pub struct SessionReply {
    pub text: String,
    pub session: Uuid,
}

/// Runs a single prompt through a fresh remote session.
///
/// Each call to [`SessionDriver::run_session`] owns exactly one remote
/// session for its duration. The call is all-or-nothing: either the full
/// answer text comes back or an error does, never partial progress.
pub struct SessionDriver {
    opener: Arc<dyn SessionOpener>,
    config: DriverConfig,
    cancel: CancellationToken,
}

impl SessionDriver {
    pub fn new(opener: Arc<dyn SessionOpener>) -> Self {
        Self {
            opener,
            config: DriverConfig::default(),
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_config(mut self, config: DriverConfig) -> Self {
        self.config = config;
        self
    }

    /// Token that stops any in-flight polling when triggered. Waits that
    /// observe it fail with [`Error::Cancelled`] instead of a timeout.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Open a session scoped to `model`, submit `prompt`, wait until
    /// generation finishes and extract the answer.
    ///
    /// With `close_on_finish` the session is terminated after extraction; a
    /// termination failure is logged but does not fail the call, since the
    /// handle is invalid afterwards either way.
    ///
    /// # Errors
    /// `ReadinessTimeout` if the input surface never accepts text,
    /// `CompletionTimeout` if the completion marker never appears,
    /// `Session` for open/write/extract failures, `Cancelled` if the
    /// driver's token fires mid-wait.
    pub async fn run_session(
        &self,
        prompt: &str,
        model: Model,
        close_on_finish: bool,
    ) -> Result<SessionReply> {
        let session = self.opener.open(model).await?;
        let handle = session.handle();
        debug!(%handle, %model, "session opened");

        self.wait(|| session.is_ready(), self.config.ready_timeout)
            .await
            .map_err(|e| match e {
                WaitError::Timeout(t) => Error::ReadinessTimeout(t),
                WaitError::Cancelled => Error::Cancelled,
                WaitError::Probe(e) => e,
            })?;
        self.settle().await;

        session.submit(prompt).await?;
        debug!(%handle, chars = prompt.len(), "prompt submitted");
        self.settle().await;

        self.wait(|| session.is_complete(), self.config.completion_timeout)
            .await
            .map_err(|e| match e {
                WaitError::Timeout(t) => Error::CompletionTimeout(t),
                WaitError::Cancelled => Error::Cancelled,
                WaitError::Probe(e) => e,
            })?;
        self.settle().await;

        let text = session.extract_text().await?;
        if text.trim().is_empty() {
            return Err(Error::Session(format!(
                "session {handle} produced no answer text"
            )));
        }

        if close_on_finish {
            if let Err(e) = session.close().await {
                warn!(%handle, error = %e, "failed to close session");
            }
        }

        info!(%handle, chars = text.len(), "answer extracted");
        Ok(SessionReply {
            text,
            session: handle,
        })
    }

    async fn wait<F, Fut>(&self, probe: F, timeout: Duration) -> std::result::Result<(), WaitError>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = Result<bool>>,
    {
        wait_until(probe, timeout, self.config.poll_interval, &self.cancel).await
    }

    async fn settle(&self) {
        if !self.config.settle_delay.is_zero() {
            sleep(self.config.settle_delay).await;
        }
    }
}
