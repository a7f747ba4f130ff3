use fatigue_core::api::WireValue;
use fatigue_core::feedback::Outcome;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use super::state::{FeedbackField, FeedbackState, bucket_label, correct_action_label};
use crate::common::text::tail_to_width;

const LABEL_WIDTH: usize = 16;

pub fn render_feedback(
    state: &FeedbackState,
    focused: bool,
    busy: bool,
    frame: &mut Frame,
    area: Rect,
) {
    let value_width = (area.width as usize).saturating_sub(LABEL_WIDTH + 6);
    let mut lines: Vec<Line<'static>> = Vec::new();

    if let Some(notice) = &state.notice {
        lines.push(Line::from(Span::styled(
            format!("  {}", notice.text),
            Style::default().fg(Color::Green),
        )));
    } else {
        for field in state.visible_fields() {
            let active = focused && state.focus == field;
            let line = match field {
                FeedbackField::Verdict => {
                    let value = match state.draft.correct {
                        None => "select",
                        Some(true) => "👍 Yes",
                        Some(false) => "👎 No",
                    };
                    row(active, "Was it correct?", picker(value, active))
                }
                FeedbackField::CorrectAction => row(
                    active,
                    "Correct action",
                    picker(correct_action_label(state.draft.correct_action), active),
                ),
                FeedbackField::EstimatedFatigue => {
                    let value = state
                        .draft
                        .estimated_fatigue
                        .map_or_else(|| "select".to_string(), bucket_label);
                    row(active, "Fatigue level", picker(&value, active))
                }
                FeedbackField::Outcome(outcome) => {
                    let mark = if state.draft.outcomes[outcome] { "[x]" } else { "[ ]" };
                    let label = if outcome == Outcome::all()[0] { "Outcome" } else { "" };
                    row(active, label, Span::raw(format!("{mark} {}", outcome.label())))
                }
                FeedbackField::Comment => {
                    let value = if state.draft.comment.is_empty() {
                        Span::styled("optional", Style::default().fg(Color::DarkGray))
                    } else {
                        Span::raw(tail_to_width(&state.draft.comment, value_width).to_string())
                    };
                    row(active, "Comment", value)
                }
                FeedbackField::Submit => {
                    if busy {
                        Line::from(Span::styled(
                            "  ⏳ Sending...",
                            Style::default().fg(Color::DarkGray),
                        ))
                    } else {
                        submit_button(active)
                    }
                }
            };
            lines.push(line);
        }
    }

    if let Some(error) = &state.error {
        lines.push(Line::from(Span::styled(
            format!("  {error}"),
            Style::default().fg(Color::Red),
        )));
    }

    let border = if focused { Color::Cyan } else { Color::DarkGray };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(" Feedback (Ctrl+F) ");
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        area,
    );
}

fn row(active: bool, label: &str, value: Span<'static>) -> Line<'static> {
    let marker = if active { "› " } else { "  " };
    let label_style = if active {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    Line::from(vec![
        Span::styled(marker.to_string(), Style::default().fg(Color::Cyan)),
        Span::styled(format!("{label:<width$}", width = LABEL_WIDTH), label_style),
        value,
    ])
}

fn picker(value: &str, active: bool) -> Span<'static> {
    if active {
        Span::raw(format!("‹ {value} ›"))
    } else {
        Span::raw(value.to_string())
    }
}

fn submit_button(active: bool) -> Line<'static> {
    let style = if active {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Cyan)
    };
    Line::from(vec![
        Span::raw("  "),
        Span::styled(" 📤 Submit Feedback ", style),
    ])
}
