//! Scripted feedback submission.

use anyhow::{Context, Result};
use enum_map::EnumMap;
use fatigue_core::api::{ApiClient, PredictedAction, RiskLevel, SessionId};
use fatigue_core::config::Config;
use fatigue_core::feedback::{
    ActiveSession, FEEDBACK_SAVED_NOTICE, FeedbackDraft, Outcome, build_feedback,
};
use tracing::info;

pub struct FeedbackRunOptions<'a> {
    pub config: &'a Config,
    pub api_url: Option<&'a str>,
    pub session_id: SessionId,
    pub predicted_action: PredictedAction,
    pub verdict: Option<bool>,
    pub correct_action: Option<PredictedAction>,
    pub estimated_fatigue: Option<RiskLevel>,
    pub comment: &'a str,
    pub outcomes: &'a [Outcome],
}

pub async fn run(options: FeedbackRunOptions<'_>) -> Result<()> {
    let session = ActiveSession {
        session_id: options.session_id,
        predicted_action: options.predicted_action.into(),
    };
    let mut outcomes = EnumMap::default();
    for outcome in options.outcomes {
        outcomes[*outcome] = true;
    }
    let draft = FeedbackDraft {
        correct: options.verdict,
        correct_action: options.correct_action,
        estimated_fatigue: options.estimated_fatigue,
        outcomes,
        comment: options.comment.to_string(),
    };
    let request = build_feedback(Some(&session), &draft)?;

    let client = ApiClient::from_config(options.config, options.api_url)?;
    client
        .submit_feedback(&request)
        .await
        .context("Failed to submit feedback")?;
    info!(
        session_id = request.session_id,
        correct = request.correct,
        label = %request.user_label,
        "feedback saved"
    );

    println!("{FEEDBACK_SAVED_NOTICE}");
    Ok(())
}
