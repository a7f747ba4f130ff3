//! Feedback feature slice.
//!
//! Shown under a processed result. Validation and the request body come
//! from `fatigue_core::feedback`; this slice owns the form, focus and the
//! self-clearing success notice.

mod render;
mod state;
mod update;

pub use render::render_feedback;
pub use state::{FeedbackField, FeedbackState, Notice};
pub use update::{FeedbackAction, handle_key, handle_paste};
