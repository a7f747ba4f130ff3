//! Session view rendering, one function per `SessionView` variant.

use std::sync::LazyLock;

use enum_map::{EnumMap, enum_map};
use fatigue_core::api::RiskLevel;
use fatigue_core::display::{GAUGE_ARC_LENGTH, ResultDisplay, session_label};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Line as CanvasLine, Points};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use super::state::SessionView;

const SPINNER_FRAMES: &[&str] = &["◐", "◓", "◑", "◒"];

/// Radius of the gauge arc in canvas units.
const GAUGE_RADIUS: f64 = 80.0;

/// Points used to draw the half circle.
const GAUGE_STEPS: usize = 90;

const GAUGE_WIDTH: u16 = 30;

static RISK_COLORS: LazyLock<EnumMap<RiskLevel, Color>> = LazyLock::new(|| {
    enum_map! {
        RiskLevel::Low => Color::Green,
        RiskLevel::Medium => Color::Yellow,
        RiskLevel::High => Color::LightRed,
        RiskLevel::Critical => Color::Red,
    }
});

fn risk_color(risk: Option<RiskLevel>) -> Color {
    risk.map_or(Color::Yellow, |level| RISK_COLORS[level])
}

/// Renders the session panel for the current view.
pub fn render_session(view: &SessionView, spinner_frame: usize, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Prediction ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    match view {
        SessionView::Idle => render_idle(frame, inner),
        SessionView::Loading { session_id } => {
            render_loading(&session_label(*session_id), spinner_frame, frame, inner);
        }
        SessionView::Results { display, .. } => render_results(display, frame, inner),
        SessionView::Error { message } => render_error(message, frame, inner),
    }
}

fn render_idle(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::default(),
        Line::from("👋 Ready when you are"),
        Line::default(),
        Line::from(Span::styled(
            "Fill in the session form and press Enter to analyze fatigue.",
            Style::default().fg(Color::Gray),
        )),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        area,
    );
}

fn render_loading(session: &str, spinner_frame: usize, frame: &mut Frame, area: Rect) {
    let spinner = SPINNER_FRAMES[spinner_frame % SPINNER_FRAMES.len()];
    let lines = vec![
        Line::default(),
        Line::from(vec![
            Span::styled(format!("{spinner} "), Style::default().fg(Color::Cyan)),
            Span::raw("Analyzing session "),
            Span::styled(
                session.to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::default(),
        Line::from(Span::styled(
            "The agent is processing your data...",
            Style::default().fg(Color::Gray),
        )),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

fn render_error(message: &str, frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::default(),
        Line::from(Span::styled(
            "❌ Something went wrong",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from(message.to_string()),
        Line::default(),
        Line::from(Span::styled(
            "Press Ctrl+R to try again.",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        area,
    );
}

fn render_results(display: &ResultDisplay, frame: &mut Frame, area: Rect) {
    let [gauge_area, details_area] = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(GAUGE_WIDTH), Constraint::Min(20)])
        .areas(area);

    let [arc_area, score_area] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(2)])
        .areas(gauge_area);

    let color = risk_color(display.risk);
    frame.render_widget(gauge_canvas(display, color), arc_area);
    frame.render_widget(
        Paragraph::new(vec![
            Line::from(Span::styled(
                display.score_label.clone(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "fatigue score",
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .alignment(Alignment::Center),
        score_area,
    );

    let label = |text: &str| Span::styled(format!("{text:<12}"), Style::default().fg(Color::Gray));
    let lines = vec![
        Line::from(vec![label("Session"), Span::raw(display.session_label.clone())]),
        Line::default(),
        Line::from(vec![
            label("Risk"),
            Span::styled(
                format!("{} {}", display.risk_icon, display.risk_label),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            label("Action"),
            Span::raw(format!("{} {}", display.action.icon, display.action.label)),
        ]),
        Line::from(vec![
            label("Confidence"),
            Span::raw(display.confidence_label.clone()),
        ]),
        Line::from(vec![
            label("Processed"),
            Span::raw(display.processed_at.clone()),
        ]),
    ];
    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }),
        details_area,
    );
}

/// Half-circle gauge: the filled share of the arc follows the dash offset and
/// the needle follows the rotation angle (-90 = left, 0 = up, 90 = right).
fn gauge_canvas(
    display: &ResultDisplay,
    color: Color,
) -> Canvas<'static, impl Fn(&mut ratatui::widgets::canvas::Context<'_>)> {
    let filled_share = 1.0 - display.gauge.arc_offset / GAUGE_ARC_LENGTH;
    let mut filled = Vec::new();
    let mut empty = Vec::new();
    for step in 0..=GAUGE_STEPS {
        let share = step as f64 / GAUGE_STEPS as f64;
        let theta = std::f64::consts::PI * (1.0 - share);
        let point = (GAUGE_RADIUS * theta.cos(), GAUGE_RADIUS * theta.sin());
        if share <= filled_share {
            filled.push(point);
        } else {
            empty.push(point);
        }
    }

    let needle = display.gauge.angle_deg.to_radians();
    let tip = (
        GAUGE_RADIUS * 0.85 * needle.sin(),
        GAUGE_RADIUS * 0.85 * needle.cos(),
    );

    Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([-GAUGE_RADIUS - 5.0, GAUGE_RADIUS + 5.0])
        .y_bounds([-5.0, GAUGE_RADIUS + 5.0])
        .paint(move |ctx| {
            ctx.draw(&Points {
                coords: &empty,
                color: Color::DarkGray,
            });
            ctx.draw(&Points {
                coords: &filled,
                color,
            });
            ctx.draw(&CanvasLine::new(0.0, 0.0, tip.0, tip.1, Color::White));
        })
}

#[cfg(test)]
mod tests {
    use fatigue_core::api::{PredictionResult, PredictionStatus, PredictedAction, Reported};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_results_view_shows_display_fields() {
        let result = PredictionResult {
            session_id: 42,
            fatigue_score: 63.0,
            risk_level: Reported::Known(RiskLevel::Medium),
            predicted_action: Reported::Known(PredictedAction::Monitor),
            confidence: 0.81,
            processed_at: None,
            status: Reported::Known(PredictionStatus::Processed),
        };
        let view = SessionView::results(&result);

        let mut terminal = Terminal::new(TestBackend::new(90, 14)).unwrap();
        terminal
            .draw(|frame| render_session(&view, 0, frame, frame.area()))
            .unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("#42"));
        assert!(text.contains("63"));
        assert!(text.contains("MEDIUM"));
        assert!(text.contains("Monitor Closely"));
        assert!(text.contains("81%"));
    }

    #[test]
    fn test_loading_view_shows_session_id() {
        let mut terminal = Terminal::new(TestBackend::new(60, 8)).unwrap();
        terminal
            .draw(|frame| {
                render_session(&SessionView::Loading { session_id: 7 }, 1, frame, frame.area());
            })
            .unwrap();
        assert!(buffer_text(&terminal).contains("#7"));
    }

    #[test]
    fn test_unknown_risk_uses_warning_color() {
        assert_eq!(risk_color(None), Color::Yellow);
        assert_eq!(risk_color(Some(RiskLevel::Low)), Color::Green);
    }
}
