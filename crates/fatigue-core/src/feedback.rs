//! Coach feedback on a prediction.
//!
//! A `FeedbackDraft` mirrors the feedback form. `build_feedback` validates
//! it against the active session and produces the request body, or the
//! prompt to show the user when something required is missing. Validation
//! never touches the network.

use std::fmt;
use std::sync::LazyLock;

use enum_map::{Enum, EnumMap, enum_map};

use crate::api::{
    FeedbackRequest, PredictedAction, PredictionResult, Reported, RiskLevel, SessionId,
    WireValue,
};

/// Notice shown after feedback is accepted.
pub const FEEDBACK_SAVED_NOTICE: &str = "✅ Feedback saved! Retrain agent will process it.";

/// Estimated fatigue bucket -> numeric score sent as the user label.
static FATIGUE_BUCKET_SCORES: LazyLock<EnumMap<RiskLevel, u8>> = LazyLock::new(|| {
    enum_map! {
        RiskLevel::Low => 20,
        RiskLevel::Medium => 50,
        RiskLevel::High => 70,
        RiskLevel::Critical => 90,
    }
});

pub fn bucket_score(bucket: RiskLevel) -> u8 {
    FATIGUE_BUCKET_SCORES[bucket]
}

/// What was observed after the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Enum)]
pub enum Outcome {
    Injured,
    Exhausted,
    PerformedWell,
}

impl WireValue for Outcome {
    fn all() -> &'static [Self] {
        &[Outcome::Injured, Outcome::Exhausted, Outcome::PerformedWell]
    }

    fn as_str(self) -> &'static str {
        match self {
            Outcome::Injured => "injured",
            Outcome::Exhausted => "exhausted",
            Outcome::PerformedWell => "performed_well",
        }
    }
}

impl Outcome {
    pub fn label(self) -> &'static str {
        match self {
            Outcome::Injured => "Injured",
            Outcome::Exhausted => "Exhausted",
            Outcome::PerformedWell => "Performed well",
        }
    }
}

impl std::str::FromStr for Outcome {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::api::parse_wire(s).ok_or_else(|| {
            format!("unknown outcome '{s}' (expected one of: injured, exhausted, performed_well)")
        })
    }
}

/// The session feedback refers to: set by a Results transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveSession {
    pub session_id: SessionId,
    pub predicted_action: Reported<PredictedAction>,
}

impl From<&PredictionResult> for ActiveSession {
    fn from(result: &PredictionResult) -> Self {
        Self {
            session_id: result.session_id,
            predicted_action: result.predicted_action.clone(),
        }
    }
}

/// Feedback form contents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedbackDraft {
    /// `None` until the user answers "was the prediction correct?".
    pub correct: Option<bool>,
    pub correct_action: Option<PredictedAction>,
    pub estimated_fatigue: Option<RiskLevel>,
    pub outcomes: EnumMap<Outcome, bool>,
    pub comment: String,
}

impl FeedbackDraft {
    /// Whether the correction fields apply.
    pub fn needs_correction(&self) -> bool {
        self.correct == Some(false)
    }
}

/// Reasons a feedback submission is blocked locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackValidation {
    NoSession,
    MissingVerdict,
    MissingCorrection,
}

impl fmt::Display for FeedbackValidation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedbackValidation::NoSession => write!(f, "No session to provide feedback for"),
            FeedbackValidation::MissingVerdict => {
                write!(f, "Please select whether the prediction was correct")
            }
            FeedbackValidation::MissingCorrection => write!(
                f,
                "Please select both correct action and estimated fatigue level"
            ),
        }
    }
}

impl std::error::Error for FeedbackValidation {}

/// Validates a draft and builds the request body.
///
/// A correct verdict labels the session with its predicted action. An
/// incorrect one requires a corrected action and a fatigue bucket, and labels
/// the session with the bucket's numeric score.
///
/// # Errors
/// Returns the prompt to show when there is no active session or a required
/// field is missing.
pub fn build_feedback(
    session: Option<&ActiveSession>,
    draft: &FeedbackDraft,
) -> Result<FeedbackRequest, FeedbackValidation> {
    let session = session.ok_or(FeedbackValidation::NoSession)?;
    let correct = draft.correct.ok_or(FeedbackValidation::MissingVerdict)?;

    let user_label = if correct {
        session.predicted_action.as_str().to_string()
    } else {
        let (Some(_action), Some(bucket)) = (draft.correct_action, draft.estimated_fatigue) else {
            return Err(FeedbackValidation::MissingCorrection);
        };
        bucket_score(bucket).to_string()
    };

    Ok(FeedbackRequest {
        session_id: session.session_id,
        correct,
        user_label,
        comment: compose_comment(&draft.comment, &draft.outcomes),
    })
}

/// Joins the free-text comment and selected outcomes.
///
/// `"tired | Outcome: injured, exhausted"`; `None` when both are empty.
pub fn compose_comment(comment: &str, outcomes: &EnumMap<Outcome, bool>) -> Option<String> {
    let selected: Vec<&str> = outcomes
        .iter()
        .filter(|(_, on)| **on)
        .map(|(outcome, _)| outcome.as_str())
        .collect();

    let mut full = comment.trim().to_string();
    if !selected.is_empty() {
        if !full.is_empty() {
            full.push_str(" | ");
        }
        full.push_str("Outcome: ");
        full.push_str(&selected.join(", "));
    }

    (!full.is_empty()).then_some(full)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> ActiveSession {
        ActiveSession {
            session_id: 42,
            predicted_action: Reported::Known(PredictedAction::Monitor),
        }
    }

    #[test]
    fn test_no_session_blocks_submission() {
        let draft = FeedbackDraft {
            correct: Some(true),
            ..FeedbackDraft::default()
        };
        assert_eq!(
            build_feedback(None, &draft),
            Err(FeedbackValidation::NoSession)
        );
        assert_eq!(
            FeedbackValidation::NoSession.to_string(),
            "No session to provide feedback for"
        );
    }

    #[test]
    fn test_correct_verdict_labels_with_predicted_action() {
        let draft = FeedbackDraft {
            correct: Some(true),
            ..FeedbackDraft::default()
        };
        let request = build_feedback(Some(&session()), &draft).unwrap();
        assert_eq!(request.session_id, 42);
        assert!(request.correct);
        assert_eq!(request.user_label, "monitor");
        assert_eq!(request.comment, None);
    }

    #[test]
    fn test_incorrect_without_action_is_blocked() {
        let draft = FeedbackDraft {
            correct: Some(false),
            correct_action: None,
            estimated_fatigue: Some(RiskLevel::High),
            ..FeedbackDraft::default()
        };
        assert_eq!(
            build_feedback(Some(&session()), &draft),
            Err(FeedbackValidation::MissingCorrection)
        );
    }

    #[test]
    fn test_incorrect_without_bucket_is_blocked() {
        let draft = FeedbackDraft {
            correct: Some(false),
            correct_action: Some(PredictedAction::MustRest),
            ..FeedbackDraft::default()
        };
        assert_eq!(
            build_feedback(Some(&session()), &draft),
            Err(FeedbackValidation::MissingCorrection)
        );
    }

    #[test]
    fn test_missing_verdict_is_blocked() {
        assert_eq!(
            build_feedback(Some(&session()), &FeedbackDraft::default()),
            Err(FeedbackValidation::MissingVerdict)
        );
    }

    #[test]
    fn test_incorrect_labels_with_bucket_score() {
        let draft = FeedbackDraft {
            correct: Some(false),
            correct_action: Some(PredictedAction::RestRecommended),
            estimated_fatigue: Some(RiskLevel::High),
            ..FeedbackDraft::default()
        };
        let request = build_feedback(Some(&session()), &draft).unwrap();
        assert!(!request.correct);
        assert_eq!(request.user_label, "70");
    }

    #[test]
    fn test_bucket_table() {
        let scores: Vec<u8> = RiskLevel::all().iter().map(|b| bucket_score(*b)).collect();
        assert_eq!(scores, vec![20, 50, 70, 90]);
    }

    #[test]
    fn test_comment_composition() {
        let mut outcomes = EnumMap::default();
        assert_eq!(compose_comment("  ", &outcomes), None);
        assert_eq!(
            compose_comment(" heavy legs ", &outcomes).as_deref(),
            Some("heavy legs")
        );

        outcomes[Outcome::Exhausted] = true;
        outcomes[Outcome::Injured] = true;
        assert_eq!(
            compose_comment("", &outcomes).as_deref(),
            Some("Outcome: injured, exhausted")
        );
        assert_eq!(
            compose_comment("heavy legs", &outcomes).as_deref(),
            Some("heavy legs | Outcome: injured, exhausted")
        );
    }
}
