//! Result polling.
//!
//! Predictions are computed asynchronously by the backend, so the client
//! re-fetches the session at a fixed interval until it is processed or the
//! attempt budget runs out. There is no backoff. Every wait point observes a
//! `CancellationToken` so a superseded session stops polling promptly.

use std::future::Future;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::client::ApiClient;
use super::error::{ApiError, ApiResult};
use super::types::{PredictionResponse, PredictionResult, SessionId};
use crate::config::PollingConfig;

/// Attempt budget and spacing for a poll loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollOptions {
    pub max_attempts: u32,
    pub interval: Duration,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            max_attempts: 30,
            interval: Duration::from_millis(1000),
        }
    }
}

impl From<&PollingConfig> for PollOptions {
    fn from(config: &PollingConfig) -> Self {
        Self {
            max_attempts: config.max_attempts,
            interval: Duration::from_millis(config.interval_ms),
        }
    }
}

impl PollOptions {
    /// Total wall-clock budget, as reported in the timeout message.
    pub fn budget(&self) -> Duration {
        self.interval * self.max_attempts
    }
}

/// Anything that can report the current state of a session.
pub trait PredictionSource {
    fn fetch_prediction(
        &self,
        session_id: SessionId,
    ) -> impl Future<Output = ApiResult<PredictionResponse>> + Send;
}

impl PredictionSource for ApiClient {
    fn fetch_prediction(
        &self,
        session_id: SessionId,
    ) -> impl Future<Output = ApiResult<PredictionResponse>> + Send {
        self.get_prediction(session_id)
    }
}

/// Polls until the session is processed.
///
/// Fetch errors abort immediately. After `max_attempts` unprocessed answers
/// (each followed by one `interval` sleep) the poll fails with a timeout.
///
/// # Errors
/// Returns the first fetch error, a `Timeout` when attempts are exhausted,
/// `Cancelled` when `cancel` fires, or a conversion error for a malformed
/// processed result.
pub async fn poll_for_result<S>(
    source: &S,
    session_id: SessionId,
    options: &PollOptions,
    cancel: &CancellationToken,
) -> ApiResult<PredictionResult>
where
    S: PredictionSource + ?Sized,
{
    debug!(session_id, max_attempts = options.max_attempts, "polling for results");

    for attempt in 1..=options.max_attempts {
        let response = tokio::select! {
            () = cancel.cancelled() => return Err(ApiError::cancelled()),
            response = source.fetch_prediction(session_id) => response?,
        };

        debug!(session_id, attempt, status = %response.status, "poll attempt");

        if response.is_processed() {
            return response.into_result(session_id);
        }

        tokio::select! {
            () = cancel.cancelled() => return Err(ApiError::cancelled()),
            () = tokio::time::sleep(options.interval) => {}
        }
    }

    Err(ApiError::timeout(format!(
        "Timeout: Results not ready after {} seconds",
        options.budget().as_secs_f64()
    )))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;
    use crate::api::{ApiErrorKind, PredictionStatus, Reported, RiskLevel};

    /// Answers `pending` until `ready_after` fetches have been made.
    struct ScriptedSource {
        calls: AtomicU32,
        ready_after: Option<u32>,
        fail_on: Option<u32>,
    }

    impl ScriptedSource {
        fn never_ready() -> Self {
            Self {
                calls: AtomicU32::new(0),
                ready_after: None,
                fail_on: None,
            }
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl PredictionSource for ScriptedSource {
        async fn fetch_prediction(&self, session_id: SessionId) -> ApiResult<PredictionResponse> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if self.fail_on == Some(call) {
                return Err(ApiError::http_status(404, r#"{"detail":"Session not found"}"#));
            }
            let processed = self.ready_after.is_some_and(|n| call >= n);
            Ok(PredictionResponse {
                session_id,
                status: Reported::Known(if processed {
                    PredictionStatus::Processed
                } else {
                    PredictionStatus::Pending
                }),
                fatigue_score: processed.then_some(63.0),
                risk_level: processed.then_some(Reported::Known(RiskLevel::Medium)),
                predicted_action: processed
                    .then(|| Reported::Known(crate::api::PredictedAction::Monitor)),
                confidence: processed.then_some(0.81),
                processed_at: None,
                processing_time_ms: None,
                error: None,
            })
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_poll_times_out_after_exactly_max_attempts() {
        let source = ScriptedSource::never_ready();
        let started = tokio::time::Instant::now();

        let err = poll_for_result(
            &source,
            42,
            &PollOptions::default(),
            &CancellationToken::new(),
        )
        .await
        .unwrap_err();

        assert_eq!(err.kind, ApiErrorKind::Timeout);
        assert_eq!(err.message, "Timeout: Results not ready after 30 seconds");
        assert_eq!(source.calls(), 30);
        assert!(started.elapsed() >= Duration::from_secs(30));
    }

    #[tokio::test(start_paused = true)]
    async fn test_poll_returns_once_processed() {
        let source = ScriptedSource {
            ready_after: Some(3),
            ..ScriptedSource::never_ready()
        };

        let result = poll_for_result(
            &source,
            42,
            &PollOptions::default(),
            &CancellationToken::new(),
        )
        .await
        .unwrap();

        assert_eq!(source.calls(), 3);
        assert_eq!(result.session_id, 42);
        assert!((result.fatigue_score - 63.0).abs() < f64::EPSILON);
    }

    #[tokio::test(start_paused = true)]
    async fn test_poll_aborts_on_first_http_error() {
        let source = ScriptedSource {
            fail_on: Some(2),
            ..ScriptedSource::never_ready()
        };

        let err = poll_for_result(
            &source,
            42,
            &PollOptions::default(),
            &CancellationToken::new(),
        )
        .await
        .unwrap_err();

        assert_eq!(err.kind, ApiErrorKind::HttpStatus);
        assert_eq!(err.message, "Session not found");
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_poll_stops_when_cancelled() {
        let source = Arc::new(ScriptedSource::never_ready());
        let cancel = CancellationToken::new();

        let handle = {
            let source = Arc::clone(&source);
            let cancel = cancel.clone();
            tokio::spawn(async move {
                poll_for_result(source.as_ref(), 42, &PollOptions::default(), &cancel).await
            })
        };

        tokio::time::sleep(Duration::from_millis(2500)).await;
        cancel.cancel();

        let err = handle.await.unwrap().unwrap_err();
        assert!(err.is_cancelled());
        assert_eq!(source.calls(), 3);
    }

    #[test]
    fn test_budget_message_scales_with_options() {
        let options = PollOptions {
            max_attempts: 3,
            interval: Duration::from_millis(10),
        };
        assert_eq!(options.budget(), Duration::from_millis(30));
    }
}
