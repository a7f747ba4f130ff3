//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.

use std::time::Instant;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use fatigue_core::feedback::build_feedback;

use crate::common::TaskKind;
use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::features::feedback::{self, FeedbackAction};
use crate::features::form::{self, FormAction};
use crate::features::session::SessionView;
use crate::state::{AppState, Pane};

/// The main reducer function.
///
/// Takes the current state and an event, mutates state, and returns effects
/// for the runtime to execute.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => {
            app.spinner_frame = app.spinner_frame.wrapping_add(1);
            app.feedback.expire_notice(Instant::now());
            vec![]
        }
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event),
        UiEvent::TaskStarted { kind, started } => {
            if app.tasks.state_mut(kind).on_started(&started) {
                vec![]
            } else {
                vec![UiEffect::CancelTask {
                    kind,
                    token: started.cancel,
                }]
            }
        }
        UiEvent::TaskCompleted { kind, completed } => {
            if app.tasks.state_mut(kind).finish_if_active(completed.id) {
                update(app, *completed.result)
            } else {
                vec![]
            }
        }
        UiEvent::SessionQueued(result) => match result {
            Ok(queued) => {
                let session_id = queued.session_id;
                app.session = SessionView::Loading { session_id };
                let mut effects = drop_feedback(app);
                let task = app.task_seq.next_id();
                app.tasks.poll.reserve(task);
                effects.push(UiEffect::StartPoll { task, session_id });
                effects
            }
            Err(err) => {
                app.session = SessionView::Error {
                    message: err.message,
                };
                vec![]
            }
        },
        UiEvent::PollFinished { session_id, result } => {
            if !app.session.is_loading_for(session_id) {
                return vec![];
            }
            match result {
                Ok(prediction) => {
                    app.session = SessionView::results(&prediction);
                    app.feedback.reset();
                }
                Err(err) if err.is_cancelled() => {}
                Err(err) => {
                    app.session = SessionView::Error {
                        message: err.message,
                    };
                }
            }
            vec![]
        }
        UiEvent::FeedbackSent(result) => {
            match result {
                Ok(_) => app
                    .feedback
                    .show_saved_notice(Instant::now(), app.feedback_notice),
                Err(err) => {
                    app.feedback.error = Some(format!("Failed to submit feedback: {}", err.message));
                }
            }
            vec![]
        }
        UiEvent::AgentStatusLoaded(result) => {
            app.status_line.apply(result);
            vec![]
        }
    }
}

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => handle_key(app, key),
        Event::Paste(text) => {
            match app.pane {
                Pane::Form => form::handle_paste(&mut app.form, &text),
                Pane::Feedback => feedback::handle_paste(&mut app.feedback, &text),
            }
            vec![]
        }
        _ => vec![],
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c' | 'q') => quit(app),
            KeyCode::Char('r') => reset(app),
            KeyCode::Char('o') => {
                app.form.toggle_advanced();
                app.pane = Pane::Form;
                vec![]
            }
            KeyCode::Char('f') => {
                app.pane = match app.pane {
                    Pane::Form if app.session.active_session().is_some() => Pane::Feedback,
                    _ => Pane::Form,
                };
                vec![]
            }
            _ => vec![],
        };
    }

    match app.pane {
        Pane::Feedback if key.code == KeyCode::Esc => {
            app.pane = Pane::Form;
            vec![]
        }
        Pane::Feedback => match feedback::handle_key(&mut app.feedback, key) {
            FeedbackAction::Submit => submit_feedback(app),
            FeedbackAction::None => vec![],
        },
        Pane::Form => match form::handle_key(&mut app.form, key) {
            FormAction::Submit => submit_session(app),
            FormAction::None => vec![],
        },
    }
}

/// Validates the form and starts a submit. Ignored while a prediction is in
/// flight; validation failures only set the form error.
fn submit_session(app: &mut AppState) -> Vec<UiEffect> {
    if app.is_predicting() {
        return vec![];
    }
    match app.form.to_request() {
        Ok(request) => {
            app.form.error = None;
            let task = app.task_seq.next_id();
            app.tasks.submit.reserve(task);
            vec![UiEffect::SubmitSession { task, request }]
        }
        Err(invalid) => {
            app.form.error = Some(invalid);
            vec![]
        }
    }
}

fn submit_feedback(app: &mut AppState) -> Vec<UiEffect> {
    if app.tasks.feedback.is_running() || app.feedback.notice.is_some() {
        return vec![];
    }
    match build_feedback(app.session.active_session(), &app.feedback.draft) {
        Ok(request) => {
            app.feedback.error = None;
            let task = app.task_seq.next_id();
            app.tasks.feedback.reserve(task);
            vec![UiEffect::SubmitFeedback { task, request }]
        }
        Err(invalid) => {
            app.feedback.error = Some(invalid.to_string());
            vec![]
        }
    }
}

/// Back to Idle from Results or Error; anything in flight is abandoned.
fn reset(app: &mut AppState) -> Vec<UiEffect> {
    if !app.session.can_reset() {
        return vec![];
    }
    let mut effects = cancel_tasks(app, &[TaskKind::Submit, TaskKind::Poll]);
    effects.extend(drop_feedback(app));
    app.session = SessionView::Idle;
    app.form.reset();
    effects
}

/// Clears the feedback form once its session is superseded.
fn drop_feedback(app: &mut AppState) -> Vec<UiEffect> {
    app.feedback.reset();
    app.pane = Pane::Form;
    cancel_tasks(app, &[TaskKind::Feedback])
}

fn quit(app: &mut AppState) -> Vec<UiEffect> {
    let mut effects = cancel_tasks(app, &[TaskKind::Submit, TaskKind::Poll, TaskKind::Feedback]);
    effects.push(UiEffect::Quit);
    effects
}

fn cancel_tasks(app: &mut AppState, kinds: &[TaskKind]) -> Vec<UiEffect> {
    kinds
        .iter()
        .filter_map(|kind| {
            let state = app.tasks.state_mut(*kind);
            if !state.is_running() {
                return None;
            }
            let token = state.cancel.take();
            state.clear();
            Some(UiEffect::CancelTask { kind: *kind, token })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use fatigue_core::api::{
        ApiError, ApiErrorKind, PredictedAction, PredictionResult, PredictionStatus,
        QueueResponse, Reported, RiskLevel, SessionId,
    };
    use fatigue_core::session::FormValidation;
    use serde_json::json;
    use tokio_util::sync::CancellationToken;

    use super::*;
    use crate::common::{TaskCompleted, TaskId, TaskStarted};
    use crate::features::feedback::FeedbackField;
    use crate::features::statusline::AgentIndicator;

    fn app() -> AppState {
        let mut app = AppState::new("http://localhost:8000", Duration::from_secs(3));
        app.form.player_name = "Ana".to_string();
        app.form.distance_km = "8.2".to_string();
        app.form.sprint_count = "12".to_string();
        app
    }

    fn key(code: KeyCode) -> UiEvent {
        UiEvent::Terminal(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    fn ctrl(c: char) -> UiEvent {
        UiEvent::Terminal(Event::Key(KeyEvent::new(
            KeyCode::Char(c),
            KeyModifiers::CONTROL,
        )))
    }

    fn complete(app: &mut AppState, kind: TaskKind, id: TaskId, result: UiEvent) -> Vec<UiEffect> {
        update(
            app,
            UiEvent::TaskCompleted {
                kind,
                completed: TaskCompleted {
                    id,
                    result: Box::new(result),
                },
            },
        )
    }

    fn queued(session_id: SessionId) -> UiEvent {
        UiEvent::SessionQueued(Ok(QueueResponse {
            session_id,
            status: Some("queued".to_string()),
            message: None,
            timestamp: None,
            estimated_wait_time_ms: None,
        }))
    }

    fn prediction(session_id: SessionId) -> PredictionResult {
        PredictionResult {
            session_id,
            fatigue_score: 63.0,
            risk_level: Reported::Known(RiskLevel::Medium),
            predicted_action: Reported::Known(PredictedAction::Monitor),
            confidence: 0.81,
            processed_at: None,
            status: Reported::Known(PredictionStatus::Processed),
        }
    }

    fn submit(app: &mut AppState) -> TaskId {
        let effects = update(app, key(KeyCode::Enter));
        match effects.as_slice() {
            [UiEffect::SubmitSession { task, .. }] => *task,
            other => panic!("expected SubmitSession, got {other:?}"),
        }
    }

    /// Drives a submit through to Results for `session_id`.
    fn to_results(app: &mut AppState, session_id: SessionId) {
        let submit_task = submit(app);
        let effects = complete(app, TaskKind::Submit, submit_task, queued(session_id));
        let poll_task = match effects.as_slice() {
            [UiEffect::StartPoll { task, session_id: id }] => {
                assert_eq!(*id, session_id);
                *task
            }
            other => panic!("expected StartPoll, got {other:?}"),
        };
        complete(
            app,
            TaskKind::Poll,
            poll_task,
            UiEvent::PollFinished {
                session_id,
                result: Ok(prediction(session_id)),
            },
        );
    }

    #[test]
    fn test_invalid_form_makes_no_request() {
        let mut app = app();
        app.form.player_name.clear();
        let effects = update(&mut app, key(KeyCode::Enter));
        assert!(effects.is_empty());
        assert_eq!(app.form.error, Some(FormValidation::MissingPlayerName));
        assert_eq!(app.session, SessionView::Idle);
        assert!(!app.is_predicting());
    }

    #[test]
    fn test_submit_disabled_while_predicting() {
        let mut app = app();
        submit(&mut app);
        assert!(app.is_predicting());
        assert!(update(&mut app, key(KeyCode::Enter)).is_empty());
    }

    #[test]
    fn test_happy_path_reaches_results() {
        let mut app = app();
        let submit_task = submit(&mut app);
        complete(&mut app, TaskKind::Submit, submit_task, queued(42));
        assert_eq!(app.session, SessionView::Loading { session_id: 42 });
        assert!(app.is_predicting());

        let poll_task = app.tasks.poll.active.unwrap();
        complete(
            &mut app,
            TaskKind::Poll,
            poll_task,
            UiEvent::PollFinished {
                session_id: 42,
                result: Ok(prediction(42)),
            },
        );
        let SessionView::Results { display, active } = &app.session else {
            panic!("expected results, got {:?}", app.session);
        };
        assert_eq!(display.score_label, "63");
        assert_eq!(display.confidence_label, "81%");
        assert_eq!(active.session_id, 42);
        assert!(!app.is_predicting());
    }

    #[test]
    fn test_submit_failure_shows_server_detail() {
        let mut app = app();
        let task = submit(&mut app);
        complete(
            &mut app,
            TaskKind::Submit,
            task,
            UiEvent::SessionQueued(Err(ApiError::http_status(
                503,
                r#"{"detail":"Queue service not available"}"#,
            ))),
        );
        assert_eq!(
            app.session,
            SessionView::Error {
                message: "Queue service not available".to_string()
            }
        );
        assert!(!app.is_predicting());
    }

    #[test]
    fn test_poll_timeout_shows_error() {
        let mut app = app();
        let task = submit(&mut app);
        complete(&mut app, TaskKind::Submit, task, queued(9));
        let poll_task = app.tasks.poll.active.unwrap();
        complete(
            &mut app,
            TaskKind::Poll,
            poll_task,
            UiEvent::PollFinished {
                session_id: 9,
                result: Err(ApiError::timeout(
                    "Timeout: Results not ready after 30 seconds",
                )),
            },
        );
        assert_eq!(
            app.session,
            SessionView::Error {
                message: "Timeout: Results not ready after 30 seconds".to_string()
            }
        );
    }

    #[test]
    fn test_reset_only_from_results_or_error() {
        let mut app = app();
        assert!(update(&mut app, ctrl('r')).is_empty());
        assert_eq!(app.form.player_name, "Ana");

        let task = submit(&mut app);
        complete(&mut app, TaskKind::Submit, task, queued(5));
        update(&mut app, ctrl('r'));
        assert_eq!(app.session, SessionView::Loading { session_id: 5 });
    }

    #[test]
    fn test_reset_restores_form_and_hides_advanced() {
        let mut app = app();
        app.form.toggle_advanced();
        to_results(&mut app, 42);

        update(&mut app, ctrl('r'));
        assert_eq!(app.session, SessionView::Idle);
        assert!(app.form.player_name.is_empty());
        assert!(!app.form.show_advanced);
        assert_eq!(app.pane, Pane::Form);
    }

    #[test]
    fn test_stale_submit_after_reset_is_ignored() {
        let mut app = app();
        app.session = SessionView::Error {
            message: "boom".to_string(),
        };
        let stale = submit(&mut app);
        let token = CancellationToken::new();
        update(
            &mut app,
            UiEvent::TaskStarted {
                kind: TaskKind::Submit,
                started: TaskStarted {
                    id: stale,
                    cancel: Some(token.clone()),
                },
            },
        );

        let effects = update(&mut app, ctrl('r'));
        assert!(matches!(
            effects.as_slice(),
            [UiEffect::CancelTask { kind: TaskKind::Submit, token: Some(_) }]
        ));
        assert_eq!(app.session, SessionView::Idle);

        let effects = complete(&mut app, TaskKind::Submit, stale, queued(77));
        assert!(effects.is_empty());
        assert_eq!(app.session, SessionView::Idle);
    }

    #[test]
    fn test_late_start_of_superseded_task_is_cancelled() {
        let mut app = app();
        let effects = update(
            &mut app,
            UiEvent::TaskStarted {
                kind: TaskKind::Poll,
                started: TaskStarted {
                    id: TaskId(99),
                    cancel: Some(CancellationToken::new()),
                },
            },
        );
        assert!(matches!(
            effects.as_slice(),
            [UiEffect::CancelTask { kind: TaskKind::Poll, token: Some(_) }]
        ));
    }

    #[test]
    fn test_poll_result_for_other_session_is_ignored() {
        let mut app = app();
        app.session = SessionView::Loading { session_id: 2 };
        update(
            &mut app,
            UiEvent::PollFinished {
                session_id: 1,
                result: Ok(prediction(1)),
            },
        );
        assert_eq!(app.session, SessionView::Loading { session_id: 2 });
    }

    #[test]
    fn test_cancelled_poll_keeps_view() {
        let mut app = app();
        app.session = SessionView::Loading { session_id: 2 };
        update(
            &mut app,
            UiEvent::PollFinished {
                session_id: 2,
                result: Err(ApiError::cancelled()),
            },
        );
        assert_eq!(app.session, SessionView::Loading { session_id: 2 });
    }

    #[test]
    fn test_feedback_pane_requires_results() {
        let mut app = app();
        update(&mut app, ctrl('f'));
        assert_eq!(app.pane, Pane::Form);

        to_results(&mut app, 42);
        update(&mut app, ctrl('f'));
        assert_eq!(app.pane, Pane::Feedback);
        update(&mut app, key(KeyCode::Esc));
        assert_eq!(app.pane, Pane::Form);
    }

    #[test]
    fn test_incorrect_feedback_needs_correction() {
        let mut app = app();
        to_results(&mut app, 42);
        update(&mut app, ctrl('f'));

        // Verdict: No
        update(&mut app, key(KeyCode::Left));
        let effects = update(&mut app, key(KeyCode::Enter));
        assert!(effects.is_empty());
        assert_eq!(
            app.feedback.error.as_deref(),
            Some("Please select both correct action and estimated fatigue level")
        );
        assert!(!app.tasks.feedback.is_running());
    }

    #[test]
    fn test_incorrect_feedback_sends_bucket_score() {
        let mut app = app();
        to_results(&mut app, 42);
        update(&mut app, ctrl('f'));

        update(&mut app, key(KeyCode::Left));
        app.feedback.focus = FeedbackField::CorrectAction;
        update(&mut app, key(KeyCode::Right));
        app.feedback.focus = FeedbackField::EstimatedFatigue;
        update(&mut app, key(KeyCode::Right));
        update(&mut app, key(KeyCode::Right));
        update(&mut app, key(KeyCode::Right));

        let effects = update(&mut app, key(KeyCode::Enter));
        let [UiEffect::SubmitFeedback { request, .. }] = effects.as_slice() else {
            panic!("expected SubmitFeedback, got {effects:?}");
        };
        assert_eq!(request.session_id, 42);
        assert!(!request.correct);
        assert_eq!(request.user_label, "70");
    }

    #[test]
    fn test_feedback_notice_clears_form() {
        let mut app = app();
        app.feedback_notice = Duration::ZERO;
        to_results(&mut app, 42);
        update(&mut app, ctrl('f'));

        update(&mut app, key(KeyCode::Right));
        let effects = update(&mut app, key(KeyCode::Enter));
        let [UiEffect::SubmitFeedback { task, request }] = effects.as_slice() else {
            panic!("expected SubmitFeedback, got {effects:?}");
        };
        assert_eq!(request.user_label, "monitor");
        let task = *task;

        complete(
            &mut app,
            TaskKind::Feedback,
            task,
            UiEvent::FeedbackSent(Ok(json!({"status": "saved"}))),
        );
        assert_eq!(
            app.feedback.notice.as_ref().map(|n| n.text),
            Some("✅ Feedback saved! Retrain agent will process it.")
        );

        update(&mut app, UiEvent::Tick);
        assert!(app.feedback.notice.is_none());
        assert_eq!(app.feedback.draft.correct, None);
    }

    #[test]
    fn test_feedback_failure_message() {
        let mut app = app();
        to_results(&mut app, 42);
        update(&mut app, ctrl('f'));
        update(&mut app, key(KeyCode::Right));
        let effects = update(&mut app, key(KeyCode::Enter));
        let [UiEffect::SubmitFeedback { task, .. }] = effects.as_slice() else {
            panic!("expected SubmitFeedback, got {effects:?}");
        };
        let task = *task;

        complete(
            &mut app,
            TaskKind::Feedback,
            task,
            UiEvent::FeedbackSent(Err(ApiError::http_status(500, ""))),
        );
        assert_eq!(
            app.feedback.error.as_deref(),
            Some("Failed to submit feedback: HTTP 500")
        );
        assert_eq!(app.feedback.draft.correct, Some(true));
    }

    #[test]
    fn test_status_failure_only_changes_indicator() {
        let mut app = app();
        to_results(&mut app, 42);
        let before = app.session.clone();

        update(
            &mut app,
            UiEvent::AgentStatusLoaded(Err(ApiError::new(ApiErrorKind::Network, "refused"))),
        );
        assert_eq!(app.status_line.indicator, AgentIndicator::ConnectionError);
        assert_eq!(app.session, before);
    }

    #[test]
    fn test_quit_cancels_running_tasks() {
        let mut app = app();
        submit(&mut app);
        let effects = update(&mut app, ctrl('c'));
        assert!(matches!(
            effects.as_slice(),
            [
                UiEffect::CancelTask { kind: TaskKind::Submit, .. },
                UiEffect::Quit
            ]
        ));
    }
}
