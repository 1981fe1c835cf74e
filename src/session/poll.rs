//! Fixed-interval polling against live session state.

use std::future::Future;
use std::time::Duration;

use tokio::time::{Instant, sleep};
use tokio_util::sync::CancellationToken;

use crate::types::Error;

/// Default inter-poll delay.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(300);

/// Why a wait did not complete.
#[derive(Debug)]
pub enum WaitError {
    /// The condition was not observed before the deadline.
    Timeout(Duration),
    /// The cancellation token fired while waiting.
    Cancelled,
    /// The probe itself failed against the remote session.
    Probe(Error),
}

/// Poll `probe` every `interval` until it reports true or `timeout` elapses.
///
/// The probe runs once immediately, then after each interval. There is no
/// backoff: the target's update cadence is unpredictable and a fixed short
/// interval keeps added latency bounded.
pub async fn wait_until<F, Fut>(
    mut probe: F,
    timeout: Duration,
    interval: Duration,
    cancel: &CancellationToken,
) -> Result<(), WaitError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = crate::types::Result<bool>>,
{
    let deadline = Instant::now() + timeout;

    loop {
        if cancel.is_cancelled() {
            return Err(WaitError::Cancelled);
        }

        match probe().await {
            Ok(true) => return Ok(()),
            Ok(false) => {}
            Err(e) => return Err(WaitError::Probe(e)),
        }

        if Instant::now() + interval > deadline {
            return Err(WaitError::Timeout(timeout));
        }

        tokio::select! {
            _ = cancel.cancelled() => return Err(WaitError::Cancelled),
            _ = sleep(interval) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test(start_paused = true)]
    async fn resolves_on_nth_call() {
        let calls = Arc::new(AtomicUsize::new(0));
        let probe_calls = Arc::clone(&calls);
        let cancel = CancellationToken::new();

        let result = wait_until(
            move || {
                let calls = Arc::clone(&probe_calls);
                async move { Ok(calls.fetch_add(1, Ordering::SeqCst) + 1 >= 3) }
            },
            Duration::from_secs(1),
            Duration::from_millis(10),
            &cancel,
        )
        .await;

        assert!(result.is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn times_out_near_configured_timeout() {
        let cancel = CancellationToken::new();
        let timeout = Duration::from_millis(100);
        let interval = Duration::from_millis(30);
        let start = Instant::now();

        let result = wait_until(
            || async { Ok(false) },
            timeout,
            interval,
            &cancel,
        )
        .await;

        assert!(matches!(result, Err(WaitError::Timeout(t)) if t == timeout));
        let elapsed = start.elapsed();
        assert!(elapsed <= timeout);
        assert!(elapsed + interval >= timeout);
    }

    #[tokio::test(start_paused = true)]
    async fn cancellation_preempts_probing() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let calls = Arc::new(AtomicUsize::new(0));
        let probe_calls = Arc::clone(&calls);

        let result = wait_until(
            move || {
                let calls = Arc::clone(&probe_calls);
                async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(false)
                }
            },
            Duration::from_secs(120),
            Duration::from_millis(300),
            &cancel,
        )
        .await;

        assert!(matches!(result, Err(WaitError::Cancelled)));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn cancellation_interrupts_the_poll_sleep() {
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();

        tokio::spawn(async move {
            sleep(Duration::from_millis(25)).await;
            trigger.cancel();
        });

        let start = Instant::now();
        let result = wait_until(
            || async { Ok(false) },
            Duration::from_secs(120),
            Duration::from_secs(10),
            &cancel,
        )
        .await;

        assert!(matches!(result, Err(WaitError::Cancelled)));
        assert!(start.elapsed() < Duration::from_secs(10));
    }

    #[tokio::test(start_paused = true)]
    async fn probe_errors_propagate() {
        let cancel = CancellationToken::new();

        let result = wait_until(
            || async { Err(Error::Session("probe lost the session".to_string())) },
            Duration::from_secs(1),
            Duration::from_millis(10),
            &cancel,
        )
        .await;

        assert!(matches!(result, Err(WaitError::Probe(Error::Session(_)))));
    }
}
