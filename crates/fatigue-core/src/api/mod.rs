//! Prediction API: wire types, HTTP client and the result poll loop.
//!
//! ## Module Structure
//!
//! - `types.rs`: request/response payloads and the enums they carry
//! - `error.rs`: `ApiError` and its categories
//! - `client.rs`: reqwest-backed `ApiClient` for the four endpoints
//! - `poll.rs`: fixed-interval, fixed-attempt polling with cancellation

mod client;
mod error;
mod poll;
mod types;

pub use client::{ApiClient, USER_AGENT};
pub use error::{ApiError, ApiErrorKind, ApiResult};
pub use poll::{PollOptions, PredictionSource, poll_for_result};
pub use types::{
    ActivityType, AgentStatus, FeedbackRequest, Position, PredictedAction, PredictionResponse,
    PredictionResult, PredictionStatus, QueueResponse, Reported, RiskLevel, SessionId,
    SessionRequest, WireValue, parse_wire,
};
