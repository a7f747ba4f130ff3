//! Inbox channel types.
//!
//! Handlers send `UiEvent`s to the inbox; the runtime drains it each loop.

use tokio::sync::mpsc;

use crate::events::UiEvent;

pub type UiEventSender = mpsc::UnboundedSender<UiEvent>;
pub type UiEventReceiver = mpsc::UnboundedReceiver<UiEvent>;
