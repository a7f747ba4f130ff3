//! TUI runtime - owns terminal, runs event loop, executes effects.
//!
//! All side effects happen here. The reducer stays pure and returns
//! `UiEffect`s; this module turns them into spawned handler tasks.
//!
//! ## Inbox Pattern
//!
//! - Handlers send `UiEvent`s to `inbox_tx`
//! - Runtime drains `inbox_rx` each loop
//! - The agent status loop feeds the same inbox
//!
//! Structure:
//! - `mod.rs`: Core runtime (TuiRuntime, event loop, effect dispatch)
//! - `inbox.rs`: Inbox channel types
//! - `handlers/`: Effect handler implementations (HTTP calls, polling, status)

mod handlers;
mod inbox;

use std::future::Future;
use std::io::Stdout;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use fatigue_core::api::{ApiClient, PollOptions};
use fatigue_core::config::Config;
use inbox::{UiEventReceiver, UiEventSender};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::common::{TaskCompleted, TaskId, TaskKind, TaskStarted};
use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::AppState;
use crate::{render, terminal, update};

/// Tick cadence right after keyboard input (~60fps).
pub const FRAME_DURATION: Duration = Duration::from_millis(16);

/// Tick cadence while a request is in flight; drives the spinner.
pub const BUSY_POLL_DURATION: Duration = Duration::from_millis(80);

/// Tick cadence when nothing is happening.
pub const IDLE_POLL_DURATION: Duration = Duration::from_millis(100);

/// Full-screen TUI runtime.
///
/// Terminal state is restored on drop and on panic.
pub struct TuiRuntime {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    pub state: AppState,
    client: ApiClient,
    poll_options: PollOptions,
    status_interval: Duration,
    /// Inbox sender - handlers send events here.
    inbox_tx: UiEventSender,
    /// Inbox receiver - runtime drains this each loop.
    inbox_rx: UiEventReceiver,
    /// Last time a Tick event was emitted.
    last_tick: Instant,
    /// Last time a terminal event was received (for fast tick during interaction).
    last_terminal_event: Instant,
    /// Stops the agent status loop.
    shutdown: CancellationToken,
}

impl TuiRuntime {
    /// Creates a runtime talking to `client`.
    ///
    /// # Errors
    /// Returns an error if the terminal cannot be set up.
    pub fn new(config: &Config, client: ApiClient) -> Result<Self> {
        // Set up panic hook BEFORE entering alternate screen
        terminal::install_panic_hook();
        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;

        let state = AppState::new(client.base_url(), config.feedback_notice_duration());
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();

        let now = Instant::now();
        Ok(Self {
            terminal,
            state,
            client,
            poll_options: PollOptions::from(&config.polling),
            status_interval: config.status_refresh_interval(),
            inbox_tx,
            inbox_rx,
            last_tick: now,
            last_terminal_event: now,
            shutdown: CancellationToken::new(),
        })
    }

    /// Runs the main event loop until the user quits.
    ///
    /// # Errors
    /// Returns an error if terminal I/O fails.
    pub fn run(&mut self) -> Result<()> {
        info!(api = %self.client.base_url(), "tui started");
        self.spawn_status_refresh();

        let result = self.event_loop();

        self.shutdown.cancel();
        info!("tui stopped");
        result
    }

    fn event_loop(&mut self) -> Result<()> {
        let mut dirty = true;

        while !self.state.should_quit {
            let events = self.collect_events()?;

            for event in events {
                if matches!(&event, UiEvent::Terminal(_)) {
                    self.last_terminal_event = Instant::now();
                }

                // Only Tick triggers render; other events batch until the next one.
                let marks_dirty = matches!(&event, UiEvent::Tick);

                let before = self.state.session.name();
                let effects = update::update(&mut self.state, event);
                let after = self.state.session.name();
                if before != after {
                    debug!(from = before, to = after, "session view changed");
                }
                if marks_dirty {
                    dirty = true;
                }
                self.execute_effects(effects);
            }

            if dirty {
                self.terminal.draw(|frame| {
                    render::render(&self.state, frame);
                })?;
                dirty = false;
            }
        }

        Ok(())
    }

    // ========================================================================
    // Event Collection
    // ========================================================================

    /// Collects inbox events, terminal input, and the next Tick when due.
    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        let tick_interval = if self.last_terminal_event.elapsed() < IDLE_POLL_DURATION {
            FRAME_DURATION
        } else if self.state.tasks.is_any_running() {
            BUSY_POLL_DURATION
        } else {
            IDLE_POLL_DURATION
        };

        while let Ok(ev) = self.inbox_rx.try_recv() {
            events.push(ev);
        }

        let time_until_tick = tick_interval.saturating_sub(self.last_tick.elapsed());
        let poll_duration = if events.is_empty() {
            time_until_tick
        } else {
            Duration::ZERO
        };

        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            while event::poll(Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        if self.last_tick.elapsed() >= tick_interval {
            events.push(UiEvent::Tick);
            self.last_tick = Instant::now();
        }

        Ok(events)
    }

    // ========================================================================
    // Effect Dispatch
    // ========================================================================

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    fn execute_effect(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::Quit => {
                self.state.should_quit = true;
            }
            UiEffect::SubmitSession { task, request } => {
                let client = self.client.clone();
                self.spawn_task(TaskKind::Submit, task, move |cancel| {
                    handlers::submit_session(client, request, cancel)
                });
            }
            UiEffect::StartPoll { task, session_id } => {
                let client = self.client.clone();
                let options = self.poll_options;
                self.spawn_task(TaskKind::Poll, task, move |cancel| {
                    handlers::poll_session(client, session_id, options, cancel)
                });
            }
            UiEffect::SubmitFeedback { task, request } => {
                let client = self.client.clone();
                self.spawn_task(TaskKind::Feedback, task, move |cancel| {
                    handlers::submit_feedback(client, request, cancel)
                });
            }
            UiEffect::CancelTask { kind, token } => {
                if let Some(token) = token {
                    debug!(?kind, "cancelling task");
                    token.cancel();
                }
            }
        }
    }

    /// Spawns an async task with a uniform TaskStarted/TaskCompleted lifecycle.
    fn spawn_task<F, Fut>(&self, kind: TaskKind, id: TaskId, f: F)
    where
        F: FnOnce(CancellationToken) -> Fut + Send + 'static,
        Fut: Future<Output = UiEvent> + Send + 'static,
    {
        let tx = self.inbox_tx.clone();
        let cancel = CancellationToken::new();
        let started = TaskStarted {
            id,
            cancel: Some(cancel.clone()),
        };
        let _ = tx.send(UiEvent::TaskStarted { kind, started });
        tokio::spawn(async move {
            let inner = f(cancel).await;
            let completed = TaskCompleted {
                id,
                result: Box::new(inner),
            };
            let _ = tx.send(UiEvent::TaskCompleted { kind, completed });
        });
    }

    fn spawn_status_refresh(&self) {
        tokio::spawn(handlers::status_refresh_loop(
            self.client.clone(),
            self.status_interval,
            self.inbox_tx.clone(),
            self.shutdown.clone(),
        ));
    }
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        self.shutdown.cancel();
        let _ = terminal::restore_terminal();
    }
}
