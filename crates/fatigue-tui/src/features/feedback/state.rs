//! Feedback form state.

use std::time::{Duration, Instant};

use fatigue_core::api::{PredictedAction, RiskLevel, WireValue};
use fatigue_core::feedback::{FEEDBACK_SAVED_NOTICE, FeedbackDraft, Outcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackField {
    Verdict,
    CorrectAction,
    EstimatedFatigue,
    Outcome(Outcome),
    Comment,
    Submit,
}

/// Success notice with its expiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: &'static str,
    pub until: Instant,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeedbackState {
    pub draft: FeedbackDraft,
    pub focus: FeedbackField,
    /// Validation or submission failure shown under the form.
    pub error: Option<String>,
    pub notice: Option<Notice>,
}

impl Default for FeedbackState {
    fn default() -> Self {
        Self {
            draft: FeedbackDraft::default(),
            focus: FeedbackField::Verdict,
            error: None,
            notice: None,
        }
    }
}

impl FeedbackState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Focusable rows; correction pickers only appear for an incorrect verdict.
    pub fn visible_fields(&self) -> Vec<FeedbackField> {
        let mut fields = vec![FeedbackField::Verdict];
        if self.draft.needs_correction() {
            fields.push(FeedbackField::CorrectAction);
            fields.push(FeedbackField::EstimatedFatigue);
        }
        fields.extend(Outcome::all().iter().map(|o| FeedbackField::Outcome(*o)));
        fields.push(FeedbackField::Comment);
        fields.push(FeedbackField::Submit);
        fields
    }

    pub fn focus_next(&mut self) {
        self.move_focus(1);
    }

    pub fn focus_prev(&mut self) {
        self.move_focus(-1);
    }

    fn move_focus(&mut self, step: isize) {
        let fields = self.visible_fields();
        let current = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
        let next = (current as isize + step).rem_euclid(fields.len() as isize) as usize;
        self.focus = fields[next];
    }

    /// Cycles the focused picker or toggles the focused outcome.
    pub fn adjust(&mut self, forward: bool) {
        match self.focus {
            FeedbackField::Verdict => {
                self.draft.correct = match (self.draft.correct, forward) {
                    (None, true) | (Some(false), true) => Some(true),
                    (Some(true), true) | (None, false) | (Some(true), false) => Some(false),
                    (Some(false), false) => Some(true),
                };
            }
            FeedbackField::CorrectAction => {
                self.draft.correct_action = Some(cycle_option(self.draft.correct_action, forward));
            }
            FeedbackField::EstimatedFatigue => {
                self.draft.estimated_fatigue =
                    Some(cycle_option(self.draft.estimated_fatigue, forward));
            }
            FeedbackField::Outcome(outcome) => {
                self.draft.outcomes[outcome] = !self.draft.outcomes[outcome];
            }
            FeedbackField::Comment | FeedbackField::Submit => return,
        }
        self.error = None;
    }

    pub fn show_saved_notice(&mut self, now: Instant, duration: Duration) {
        self.error = None;
        self.notice = Some(Notice {
            text: FEEDBACK_SAVED_NOTICE,
            until: now + duration,
        });
    }

    /// Clears an expired notice together with the form. Returns whether it did.
    pub fn expire_notice(&mut self, now: Instant) -> bool {
        if self.notice.as_ref().is_some_and(|n| now >= n.until) {
            self.reset();
            true
        } else {
            false
        }
    }
}

fn cycle_option<T: WireValue + PartialEq>(current: Option<T>, forward: bool) -> T {
    let all = T::all();
    let Some(current) = current else {
        return if forward { all[0] } else { all[all.len() - 1] };
    };
    let idx = all.iter().position(|v| *v == current).unwrap_or(0);
    if forward {
        all[(idx + 1) % all.len()]
    } else {
        all[(idx + all.len() - 1) % all.len()]
    }
}

/// Picker label for a fatigue bucket, e.g. `High (70)`.
pub fn bucket_label(bucket: RiskLevel) -> String {
    let name = match bucket {
        RiskLevel::Low => "Low",
        RiskLevel::Medium => "Medium",
        RiskLevel::High => "High",
        RiskLevel::Critical => "Critical",
    };
    format!("{name} ({})", fatigue_core::feedback::bucket_score(bucket))
}

pub fn correct_action_label(action: Option<PredictedAction>) -> &'static str {
    action.map_or("select", fatigue_core::display::action_label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_correction_fields_follow_verdict() {
        let mut state = FeedbackState::default();
        assert!(!state.visible_fields().contains(&FeedbackField::CorrectAction));

        state.adjust(false);
        assert_eq!(state.draft.correct, Some(false));
        assert!(state.visible_fields().contains(&FeedbackField::CorrectAction));

        state.adjust(true);
        assert_eq!(state.draft.correct, Some(true));
        assert!(!state.visible_fields().contains(&FeedbackField::EstimatedFatigue));
    }

    #[test]
    fn test_pickers_start_at_ends() {
        let mut state = FeedbackState {
            focus: FeedbackField::CorrectAction,
            ..FeedbackState::default()
        };
        state.adjust(true);
        assert_eq!(state.draft.correct_action, Some(PredictedAction::Cleared));
        state.adjust(false);
        assert_eq!(state.draft.correct_action, Some(PredictedAction::MustRest));

        state.focus = FeedbackField::EstimatedFatigue;
        state.adjust(false);
        assert_eq!(state.draft.estimated_fatigue, Some(RiskLevel::Critical));
    }

    #[test]
    fn test_notice_expiry_resets_form() {
        let now = Instant::now();
        let mut state = FeedbackState::default();
        state.draft.comment = "heavy legs".to_string();
        state.show_saved_notice(now, Duration::from_secs(3));

        assert!(!state.expire_notice(now + Duration::from_secs(2)));
        assert_eq!(state.draft.comment, "heavy legs");

        assert!(state.expire_notice(now + Duration::from_secs(3)));
        assert_eq!(state, FeedbackState::default());
    }

    #[test]
    fn test_bucket_labels() {
        assert_eq!(bucket_label(RiskLevel::High), "High (70)");
        assert_eq!(correct_action_label(None), "select");
        assert_eq!(
            correct_action_label(Some(PredictedAction::Monitor)),
            "Monitor Closely"
        );
    }
}
