//! Feedback form reducer.

use crossterm::event::{KeyCode, KeyEvent};

use super::state::{FeedbackField, FeedbackState};
use crate::common::text::sanitize_single_line;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackAction {
    None,
    Submit,
}

/// Handles a key while the feedback form has focus.
pub fn handle_key(state: &mut FeedbackState, key: KeyEvent) -> FeedbackAction {
    match key.code {
        KeyCode::Tab | KeyCode::Down => state.focus_next(),
        KeyCode::BackTab | KeyCode::Up => state.focus_prev(),
        KeyCode::Left => state.adjust(false),
        KeyCode::Right => state.adjust(true),
        KeyCode::Enter => match state.focus {
            FeedbackField::Outcome(_) => state.adjust(true),
            _ => return FeedbackAction::Submit,
        },
        KeyCode::Char(' ') if matches!(state.focus, FeedbackField::Outcome(_)) => {
            state.adjust(true);
        }
        KeyCode::Backspace if state.focus == FeedbackField::Comment => {
            state.draft.comment.pop();
        }
        KeyCode::Char(c) if state.focus == FeedbackField::Comment => {
            state.draft.comment.push(c);
        }
        _ => {}
    }
    FeedbackAction::None
}

pub fn handle_paste(state: &mut FeedbackState, text: &str) {
    if state.focus == FeedbackField::Comment {
        state.draft.comment.push_str(&sanitize_single_line(text));
    }
}
