//! Session form reducer.

use crossterm::event::{KeyCode, KeyEvent};

use super::state::{FormField, FormState};
use crate::common::text::sanitize_single_line;

/// What the caller should do after a form key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    None,
    Submit,
}

/// Handles a key while the form has focus.
///
/// Control-modified keys are handled by the global reducer before this.
pub fn handle_key(form: &mut FormState, key: KeyEvent) -> FormAction {
    match key.code {
        KeyCode::Tab | KeyCode::Down => form.focus_next(),
        KeyCode::BackTab | KeyCode::Up => form.focus_prev(),
        KeyCode::Left => {
            form.adjust(false);
        }
        KeyCode::Right => {
            form.adjust(true);
        }
        KeyCode::Enter => match form.focus {
            FormField::AdvancedToggle => form.toggle_advanced(),
            FormField::InjuryIllness => {
                form.adjust(true);
            }
            _ => return FormAction::Submit,
        },
        KeyCode::Char(' ') if form.focus == FormField::AdvancedToggle => form.toggle_advanced(),
        KeyCode::Char(' ') if form.focus == FormField::InjuryIllness => {
            form.adjust(true);
        }
        KeyCode::Backspace => {
            if let Some(buf) = form.focused_text_mut() {
                buf.pop();
                form.error = None;
            }
        }
        KeyCode::Char(c) if form.accepts_char(c) => {
            if let Some(buf) = form.focused_text_mut() {
                buf.push(c);
                form.error = None;
            }
        }
        _ => {}
    }
    FormAction::None
}

/// Inserts pasted text into the focused text input, keeping only the
/// characters that field accepts.
pub fn handle_paste(form: &mut FormState, text: &str) {
    let accepted: String = sanitize_single_line(text)
        .chars()
        .filter(|c| form.accepts_char(*c))
        .collect();
    if let Some(buf) = form.focused_text_mut() {
        buf.push_str(&accepted);
    }
}
