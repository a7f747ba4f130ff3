//! Session form rendering.

use fatigue_core::api::{ActivityType, Position};
use fatigue_core::session::SCALE_RANGE;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use super::state::{FormField, FormState};
use crate::common::text::tail_to_width;

const LABEL_WIDTH: usize = 14;

/// Renders the session form panel.
///
/// `focused` highlights the active row; `busy` replaces the submit button
/// with a progress label.
pub fn render_form(form: &FormState, focused: bool, busy: bool, frame: &mut Frame, area: Rect) {
    let value_width = (area.width as usize).saturating_sub(LABEL_WIDTH + 6);
    let mut lines: Vec<Line<'static>> = Vec::new();

    let text = |raw: &str, hint: &str| -> Span<'static> {
        if raw.is_empty() {
            Span::styled(hint.to_string(), Style::default().fg(Color::DarkGray))
        } else {
            Span::raw(tail_to_width(raw, value_width).to_string())
        }
    };

    for field in form.visible_fields() {
        let active = focused && form.focus == *field;
        let line = match field {
            FormField::PlayerName => row(active, "Player", text(&form.player_name, "name")),
            FormField::Position => row(active, "Position", select(position_label(form.position), active)),
            FormField::Activity => row(active, "Activity", select(activity_label(form.activity), active)),
            FormField::SleepHours => row(
                active,
                "Sleep",
                Span::raw(format!("{} hours", display_or_dash(&form.sleep_hours))),
            ),
            FormField::StressLevel => row(active, "Stress", slider(form.stress_level)),
            FormField::DistanceKm => row(active, "Distance km", text(&form.distance_km, "0.0")),
            FormField::SprintCount => row(active, "Sprints", text(&form.sprint_count, "0")),
            FormField::AdvancedToggle => {
                let label = if form.show_advanced {
                    "➖ Hide Advanced Fields"
                } else {
                    "➕ Advanced Fields (Optional)"
                };
                button(active, label)
            }
            FormField::Soreness => row(active, "Soreness", slider(form.soreness)),
            FormField::Rpe => row(active, "RPE", slider(form.rpe)),
            FormField::InjuryIllness => row(
                active,
                "Injury/illness",
                Span::raw(if form.injury_illness { "[x]" } else { "[ ]" }),
            ),
            FormField::Submit => {
                lines.push(Line::default());
                if busy {
                    Line::from(Span::styled(
                        "  ⏳ Analyzing...",
                        Style::default().fg(Color::DarkGray),
                    ))
                } else {
                    button(active, "🔍 Analyze Fatigue")
                }
            }
        };
        lines.push(line);
    }

    if let Some(error) = &form.error {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            format!("  {error}"),
            Style::default().fg(Color::Red),
        )));
    }

    let border = if focused { Color::Cyan } else { Color::DarkGray };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(" Session ");
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

fn button(active: bool, label: &str) -> Line<'static> {
    let style = if active {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Cyan)
    };
    Line::from(vec![Span::raw("  "), Span::styled(format!(" {label} "), style)])
}

fn select(label: &str, active: bool) -> Span<'static> {
    if active {
        Span::raw(format!("‹ {label} ›"))
    } else {
        Span::raw(label.to_string())
    }
}

fn slider(value: u8) -> Span<'static> {
    let max = *SCALE_RANGE.end() as usize;
    let filled = usize::from(value).min(max);
    Span::raw(format!(
        "{}{} {value}",
        "■".repeat(filled),
        "·".repeat(max - filled)
    ))
}

fn display_or_dash(raw: &str) -> &str {
    if raw.trim().is_empty() { "-" } else { raw }
}

fn position_label(position: Position) -> &'static str {
    match position {
        Position::Goalkeeper => "Goalkeeper",
        Position::Defender => "Defender",
        Position::Midfielder => "Midfielder",
        Position::Forward => "Forward",
    }
}

fn activity_label(activity: ActivityType) -> &'static str {
    match activity {
        ActivityType::Practice => "Practice",
        ActivityType::Game => "Game",
    }
}
