use fatigue_core::api::{ApiClient, ApiError, FeedbackRequest};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::events::UiEvent;

/// Sends feedback to `POST /feedback`.
pub async fn submit_feedback(
    client: ApiClient,
    request: FeedbackRequest,
    cancel: CancellationToken,
) -> UiEvent {
    let result = tokio::select! {
        () = cancel.cancelled() => Err(ApiError::cancelled()),
        result = client.submit_feedback(&request) => result,
    };
    match &result {
        Ok(_) => info!(
            session_id = request.session_id,
            correct = request.correct,
            label = %request.user_label,
            "feedback saved"
        ),
        Err(err) => warn!(session_id = request.session_id, error = %err, "feedback failed"),
    }
    UiEvent::FeedbackSent(result)
}
