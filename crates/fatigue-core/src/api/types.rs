//! Request and response payloads for the prediction API.

use std::fmt;
use std::str::FromStr;

use enum_map::Enum;
use serde::{Deserialize, Serialize};

use super::error::{ApiError, ApiResult};

/// Server-assigned identifier of a submitted session.
pub type SessionId = i64;

/// Enum values that travel over the wire as fixed lowercase strings.
pub trait WireValue: Copy + Sized + 'static {
    /// Every variant, in display order.
    fn all() -> &'static [Self];

    /// The exact string the API uses for this variant.
    fn as_str(self) -> &'static str;
}

/// Looks up a variant by its wire string.
pub fn parse_wire<T: WireValue>(value: &str) -> Option<T> {
    let value = value.trim();
    T::all().iter().copied().find(|v| v.as_str() == value)
}

/// A server-reported value that may fall outside the known set.
///
/// Unknown strings are kept verbatim instead of failing deserialization so
/// the UI can render a fallback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reported<T> {
    Known(T),
    Unknown(String),
}

impl<T: WireValue> Reported<T> {
    pub fn known(&self) -> Option<T> {
        match self {
            Reported::Known(value) => Some(*value),
            Reported::Unknown(_) => None,
        }
    }

    /// The raw wire string, whether known or not.
    pub fn as_str(&self) -> &str {
        match self {
            Reported::Known(value) => value.as_str(),
            Reported::Unknown(raw) => raw,
        }
    }
}

impl<T: WireValue> fmt::Display for Reported<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<T> From<T> for Reported<T> {
    fn from(value: T) -> Self {
        Reported::Known(value)
    }
}

// ============================================================================
// Enums
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Goalkeeper,
    Defender,
    Midfielder,
    Forward,
}

impl WireValue for Position {
    fn all() -> &'static [Self] {
        &[
            Position::Goalkeeper,
            Position::Defender,
            Position::Midfielder,
            Position::Forward,
        ]
    }

    fn as_str(self) -> &'static str {
        match self {
            Position::Goalkeeper => "goalkeeper",
            Position::Defender => "defender",
            Position::Midfielder => "midfielder",
            Position::Forward => "forward",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityType {
    Practice,
    /// Competitive fixture. "match" is accepted as an input synonym.
    #[serde(alias = "match")]
    Game,
}

impl WireValue for ActivityType {
    fn all() -> &'static [Self] {
        &[ActivityType::Practice, ActivityType::Game]
    }

    fn as_str(self) -> &'static str {
        match self {
            ActivityType::Practice => "practice",
            ActivityType::Game => "game",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Enum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl WireValue for RiskLevel {
    fn all() -> &'static [Self] {
        &[
            RiskLevel::Low,
            RiskLevel::Medium,
            RiskLevel::High,
            RiskLevel::Critical,
        ]
    }

    fn as_str(self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
            RiskLevel::Critical => "critical",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Enum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictedAction {
    Cleared,
    Monitor,
    ReduceIntensity,
    RestRecommended,
    MustRest,
}

impl WireValue for PredictedAction {
    fn all() -> &'static [Self] {
        &[
            PredictedAction::Cleared,
            PredictedAction::Monitor,
            PredictedAction::ReduceIntensity,
            PredictedAction::RestRecommended,
            PredictedAction::MustRest,
        ]
    }

    fn as_str(self) -> &'static str {
        match self {
            PredictedAction::Cleared => "cleared",
            PredictedAction::Monitor => "monitor",
            PredictedAction::ReduceIntensity => "reduce_intensity",
            PredictedAction::RestRecommended => "rest_recommended",
            PredictedAction::MustRest => "must_rest",
        }
    }
}

/// Processing state of a submitted session.
///
/// Everything except `Processed` means the result is not ready yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PredictionStatus {
    Pending,
    Queued,
    Processing,
    Processed,
}

impl WireValue for PredictionStatus {
    fn all() -> &'static [Self] {
        &[
            PredictionStatus::Pending,
            PredictionStatus::Queued,
            PredictionStatus::Processing,
            PredictionStatus::Processed,
        ]
    }

    fn as_str(self) -> &'static str {
        match self {
            PredictionStatus::Pending => "pending",
            PredictionStatus::Queued => "queued",
            PredictionStatus::Processing => "processing",
            PredictionStatus::Processed => "processed",
        }
    }
}

macro_rules! impl_from_str {
    ($($ty:ty => $what:literal),* $(,)?) => {
        $(
            impl FromStr for $ty {
                type Err = String;

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    parse_wire(s).ok_or_else(|| {
                        let expected: Vec<&str> =
                            <$ty>::all().iter().map(|v| v.as_str()).collect();
                        format!("unknown {} '{}' (expected one of: {})", $what, s, expected.join(", "))
                    })
                }
            }
        )*
    };
}

impl_from_str!(
    Position => "position",
    RiskLevel => "risk level",
    PredictedAction => "action",
    PredictionStatus => "status",
);

impl FromStr for ActivityType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim() == "match" {
            return Ok(ActivityType::Game);
        }
        parse_wire(s).ok_or_else(|| {
            format!("unknown activity '{s}' (expected one of: practice, game, match)")
        })
    }
}

// ============================================================================
// Payloads
// ============================================================================

/// Body of `POST /predict`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRequest {
    pub player_name: String,
    pub position: Position,
    pub activity_type: ActivityType,
    pub sleep_hours: f64,
    pub stress_level: u8,
    pub distance_km: f64,
    pub sprint_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub soreness: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rpe: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub injury_illness: Option<bool>,
}

/// Response of `POST /predict`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QueueResponse {
    pub session_id: SessionId,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub estimated_wait_time_ms: Option<f64>,
}

/// Raw response of `GET /predictions/{id}`.
///
/// Result fields are only populated once `status` is `processed`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PredictionResponse {
    pub session_id: SessionId,
    pub status: Reported<PredictionStatus>,
    #[serde(default)]
    pub fatigue_score: Option<f64>,
    #[serde(default)]
    pub risk_level: Option<Reported<RiskLevel>>,
    #[serde(default)]
    pub predicted_action: Option<Reported<PredictedAction>>,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub processed_at: Option<String>,
    #[serde(default)]
    pub processing_time_ms: Option<f64>,
    #[serde(default)]
    pub error: Option<String>,
}

impl PredictionResponse {
    pub fn is_processed(&self) -> bool {
        self.status.known() == Some(PredictionStatus::Processed)
    }

    /// Converts a processed response into a complete result.
    ///
    /// # Errors
    /// Fails when the response belongs to another session or a result field
    /// is missing.
    pub fn into_result(self, expected: SessionId) -> ApiResult<PredictionResult> {
        if self.session_id != expected {
            return Err(ApiError::session_mismatch(expected, self.session_id));
        }

        let missing = |field: &str| {
            ApiError::parse(format!(
                "Processed result for session #{expected} is missing {field}"
            ))
        };

        Ok(PredictionResult {
            session_id: self.session_id,
            fatigue_score: self.fatigue_score.ok_or_else(|| missing("fatigue_score"))?,
            risk_level: self.risk_level.ok_or_else(|| missing("risk_level"))?,
            predicted_action: self
                .predicted_action
                .ok_or_else(|| missing("predicted_action"))?,
            confidence: self.confidence.ok_or_else(|| missing("confidence"))?,
            processed_at: self.processed_at,
            status: self.status,
        })
    }
}

/// A processed prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub session_id: SessionId,
    /// 0-100.
    pub fatigue_score: f64,
    pub risk_level: Reported<RiskLevel>,
    pub predicted_action: Reported<PredictedAction>,
    /// 0-1.
    pub confidence: f64,
    pub processed_at: Option<String>,
    pub status: Reported<PredictionStatus>,
}

/// Body of `POST /feedback`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackRequest {
    pub session_id: SessionId,
    pub correct: bool,
    pub user_label: String,
    pub comment: Option<String>,
}

/// Response of `GET /agent/status`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AgentStatus {
    pub is_running: bool,
    pub processed_count: u64,
    pub avg_processing_time_ms: f64,
    pub queue_size: u64,
    pub avg_fatigue_score: f64,
    pub avg_confidence: f64,
    pub exploration_count: u64,
    pub review_needed_count: u64,
    pub retrain_count: u64,
}
