//! Pure view/render functions for the TUI.
//!
//! Functions here take `&AppState`, draw to a ratatui Frame, and never
//! mutate state or return effects.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::features::feedback::render_feedback;
use crate::features::form::render_form;
use crate::features::session::{SessionView, render_session};
use crate::features::statusline::render_status_line;
use crate::state::{AppState, Pane};

/// Height of the title bar.
const STATUS_HEIGHT: u16 = 1;

/// Height of the key hint bar.
const HINTS_HEIGHT: u16 = 1;

/// Width of the session form column.
const FORM_WIDTH: u16 = 48;

/// Height of the results card above the feedback panel.
const RESULTS_HEIGHT: u16 = 12;

/// Renders the entire TUI to the frame.
pub fn render(app: &AppState, frame: &mut Frame) {
    let [status_area, body_area, hints_area] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(STATUS_HEIGHT),
            Constraint::Min(1),
            Constraint::Length(HINTS_HEIGHT),
        ])
        .areas(frame.area());

    render_status_line(&app.status_line, &app.api_base_url, frame, status_area);

    let [form_area, session_area] = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(FORM_WIDTH), Constraint::Min(20)])
        .areas(body_area);

    render_form(
        &app.form,
        app.pane == Pane::Form,
        app.is_predicting(),
        frame,
        form_area,
    );

    if matches!(app.session, SessionView::Results { .. }) {
        let [results_area, feedback_area] = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(RESULTS_HEIGHT), Constraint::Min(3)])
            .areas(session_area);
        render_session(&app.session, app.spinner_frame, frame, results_area);
        render_feedback(
            &app.feedback,
            app.pane == Pane::Feedback,
            app.tasks.feedback.is_running(),
            frame,
            feedback_area,
        );
    } else {
        render_session(&app.session, app.spinner_frame, frame, session_area);
    }

    render_hints(app, frame, hints_area);
}

fn render_hints(app: &AppState, frame: &mut Frame, area: ratatui::layout::Rect) {
    let mut hints = vec![
        ("Tab", "next"),
        ("←/→", "change"),
        ("Enter", "submit"),
        ("^O", "advanced"),
    ];
    if app.session.active_session().is_some() {
        hints.push(("^F", "feedback"));
    }
    if app.session.can_reset() {
        hints.push(("^R", "reset"));
    }
    hints.push(("^Q", "quit"));

    let mut spans = vec![Span::raw(" ")];
    for (key, action) in hints {
        spans.push(Span::styled(key, Style::default().fg(Color::Cyan)));
        spans.push(Span::styled(
            format!(" {action}  "),
            Style::default().fg(Color::DarkGray),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
