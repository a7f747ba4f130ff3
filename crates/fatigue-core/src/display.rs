//! Presentation of prediction results.
//!
//! Maps a `PredictionResult` to the strings and geometry shown by the UI.
//! The icon and label tables are `EnumMap`s, so adding a variant to
//! `RiskLevel` or `PredictedAction` fails to compile until the table is
//! extended. Values outside the known set render with a fallback instead of
//! failing.

use std::sync::LazyLock;

use chrono::{DateTime, Local, NaiveDateTime};
use enum_map::{EnumMap, enum_map};

use crate::api::{PredictedAction, PredictionResult, Reported, RiskLevel};

/// Full length of the gauge arc (half circle, r = 80).
pub const GAUGE_ARC_LENGTH: f64 = 251.2;

/// Icon shown for risk levels outside the known set.
pub const FALLBACK_RISK_ICON: &str = "⚠️";

/// Icon shown for actions outside the known set.
pub const FALLBACK_ACTION_ICON: &str = "💡";

static RISK_ICONS: LazyLock<EnumMap<RiskLevel, &'static str>> = LazyLock::new(|| {
    enum_map! {
        RiskLevel::Low => "✅",
        RiskLevel::Medium => "⚠️",
        RiskLevel::High => "🔴",
        RiskLevel::Critical => "🚨",
    }
});

static ACTIONS: LazyLock<EnumMap<PredictedAction, (&'static str, &'static str)>> =
    LazyLock::new(|| {
        enum_map! {
            PredictedAction::Cleared => ("✅", "Cleared to Play"),
            PredictedAction::Monitor => ("👀", "Monitor Closely"),
            PredictedAction::ReduceIntensity => ("⚡", "Reduce Training Intensity"),
            PredictedAction::RestRecommended => ("🛌", "Rest Recommended"),
            PredictedAction::MustRest => ("🚫", "Must Rest - High Risk"),
        }
    });

/// Needle rotation and arc dash offset for a fatigue score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaugeGeometry {
    /// -90 (score 0) to 90 (score 100) degrees.
    pub angle_deg: f64,
    /// `GAUGE_ARC_LENGTH` (empty) down to 0 (full).
    pub arc_offset: f64,
}

pub fn gauge_geometry(score: f64) -> GaugeGeometry {
    let fraction = score / 100.0;
    GaugeGeometry {
        angle_deg: -90.0 + fraction * 180.0,
        arc_offset: GAUGE_ARC_LENGTH - fraction * GAUGE_ARC_LENGTH,
    }
}

pub fn risk_icon(risk: &Reported<RiskLevel>) -> &'static str {
    risk.known().map_or(FALLBACK_RISK_ICON, |level| RISK_ICONS[level])
}

/// Icon and human label for an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionDisplay {
    pub icon: &'static str,
    pub label: String,
}

pub fn action_display(action: &Reported<PredictedAction>) -> ActionDisplay {
    match action.known() {
        Some(known) => {
            let (icon, label) = ACTIONS[known];
            ActionDisplay {
                icon,
                label: label.to_string(),
            }
        }
        None => ActionDisplay {
            icon: FALLBACK_ACTION_ICON,
            label: action.as_str().to_string(),
        },
    }
}

/// Human label of a known action, for pickers.
pub fn action_label(action: PredictedAction) -> &'static str {
    ACTIONS[action].1
}

/// Confidence as a whole percentage (0.81 -> 81).
pub fn confidence_percent(confidence: f64) -> i64 {
    (confidence * 100.0).round() as i64
}

/// Formats a processed-at timestamp as local wall-clock time.
///
/// RFC 3339 timestamps are converted to local time; naive timestamps are
/// taken as already local. Missing values render as `-`, unparseable ones
/// verbatim.
pub fn format_processed_at(raw: Option<&str>) -> String {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return "-".to_string();
    };

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed.with_timezone(&Local).format("%H:%M:%S").to_string();
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return naive.format("%H:%M:%S").to_string();
    }
    raw.to_string()
}

/// Everything the results view shows, precomputed from a result.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultDisplay {
    /// `#<id>`
    pub session_label: String,
    pub score: f64,
    /// Rounded score, e.g. `63`.
    pub score_label: String,
    pub gauge: GaugeGeometry,
    pub risk: Option<RiskLevel>,
    pub risk_icon: &'static str,
    /// Uppercased risk level, e.g. `MEDIUM`.
    pub risk_label: String,
    pub action: ActionDisplay,
    pub confidence_percent: i64,
    /// e.g. `81%`
    pub confidence_label: String,
    pub processed_at: String,
}

impl ResultDisplay {
    pub fn from_result(result: &PredictionResult) -> Self {
        let confidence_percent = confidence_percent(result.confidence);
        Self {
            session_label: session_label(result.session_id),
            score: result.fatigue_score,
            score_label: format!("{}", result.fatigue_score.round() as i64),
            gauge: gauge_geometry(result.fatigue_score),
            risk: result.risk_level.known(),
            risk_icon: risk_icon(&result.risk_level),
            risk_label: result.risk_level.as_str().to_uppercase(),
            action: action_display(&result.predicted_action),
            confidence_percent,
            confidence_label: format!("{confidence_percent}%"),
            processed_at: format_processed_at(result.processed_at.as_deref()),
        }
    }
}

/// `#<id>` label used for sessions throughout the UI.
pub fn session_label(session_id: i64) -> String {
    format!("#{session_id}")
}
