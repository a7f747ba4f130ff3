use fatigue_core::api::{
    ApiClient, ApiError, PollOptions, SessionId, SessionRequest, poll_for_result,
};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::events::UiEvent;

/// Sends a session to `POST /predict`.
pub async fn submit_session(
    client: ApiClient,
    request: SessionRequest,
    cancel: CancellationToken,
) -> UiEvent {
    let result = tokio::select! {
        () = cancel.cancelled() => Err(ApiError::cancelled()),
        result = client.submit_session(&request) => result,
    };
    match &result {
        Ok(queued) => info!(session_id = queued.session_id, "session queued"),
        Err(err) if err.is_cancelled() => {}
        Err(err) => warn!(error = %err, "session submit failed"),
    }
    UiEvent::SessionQueued(result)
}

/// Polls until `session_id` is processed, times out, or is cancelled.
pub async fn poll_session(
    client: ApiClient,
    session_id: SessionId,
    options: PollOptions,
    cancel: CancellationToken,
) -> UiEvent {
    let result = poll_for_result(&client, session_id, &options, &cancel).await;
    match &result {
        Ok(prediction) => info!(
            session_id,
            score = prediction.fatigue_score,
            risk = %prediction.risk_level,
            action = %prediction.predicted_action,
            "prediction ready"
        ),
        Err(err) if err.is_cancelled() => info!(session_id, "poll cancelled"),
        Err(err) => warn!(session_id, error = %err, "poll failed"),
    }
    UiEvent::PollFinished { session_id, result }
}
