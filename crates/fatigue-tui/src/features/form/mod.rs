//! Session form feature slice.
//!
//! ## Module Structure
//!
//! - `state.rs`: `FormState`, field focus order, request building
//! - `update.rs`: key and paste handling
//! - `render.rs`: form panel rendering

mod render;
mod state;
mod update;

pub use render::render_form;
pub use state::{FormField, FormState};
pub use update::{FormAction, handle_key, handle_paste};
