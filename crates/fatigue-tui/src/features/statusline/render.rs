use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::state::{AgentIndicator, StatusLineState};
use crate::common::text::truncate_with_ellipsis;

/// Longest API URL shown before truncation.
const MAX_URL_WIDTH: usize = 40;

/// Renders the title bar: app name and API on the left, agent indicator and
/// metrics on the right.
pub fn render_status_line(state: &StatusLineState, api_url: &str, frame: &mut Frame, area: Rect) {
    let left = Line::from(vec![
        Span::styled(
            " ⚡ FatigueAgent ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            truncate_with_ellipsis(api_url, MAX_URL_WIDTH),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    frame.render_widget(Paragraph::new(left), area);

    let color = match state.indicator {
        AgentIndicator::Checking => Color::DarkGray,
        AgentIndicator::Active => Color::Green,
        AgentIndicator::Offline => Color::Yellow,
        AgentIndicator::ConnectionError => Color::Red,
    };
    let mut spans = Vec::new();
    if let Some(m) = &state.metrics {
        spans.push(Span::styled(
            format!(
                "processed {} · queue {} · {:.0} ms · review {} · retrain {}  ",
                m.processed_count,
                m.queue_size,
                m.avg_processing_time_ms,
                m.review_needed_count,
                m.retrain_count
            ),
            Style::default().fg(Color::DarkGray),
        ));
    }
    spans.push(Span::styled("● ", Style::default().fg(color)));
    spans.push(Span::styled(
        format!("{} ", state.indicator.text()),
        Style::default().fg(color),
    ));
    frame.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Right),
        area,
    );
}
