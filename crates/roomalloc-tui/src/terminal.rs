//! Terminal driver: crossterm input, ratatui output.
//!
//! Implements [`Driver`] for a real terminal. Input arrives on crossterm's
//! async [`EventStream`], bounded by the runtime's wait budget so a held
//! stepper keeps firing; rendering goes through ratatui; accepted-edit
//! snapshots are logged and the latest one is kept for the exit report.

use std::{
    io::stdout,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::{Duration, Instant},
};

use crossterm::{
    event::{
        Event, EventStream, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::supports_keyboard_enhancement,
};
use futures::StreamExt;
use ratatui::DefaultTerminal;
use roomalloc_app::{App, AppEvent, Driver};
use roomalloc_core::AllocationSnapshot;
use tracing::{debug, info, warn};

use crate::{input::KeyInput, ui};

/// Terminal driver failures.
#[derive(Debug, thiserror::Error)]
pub enum TerminalError {
    /// Underlying terminal or input I/O failed.
    #[error("terminal I/O: {0}")]
    Io(#[from] std::io::Error),

    /// The input event stream ended.
    #[error("input stream closed")]
    InputClosed,

    /// Snapshot could not be serialized for the report log.
    #[error("snapshot serialization: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// [`Driver`] implementation over a real terminal.
pub struct TerminalDriver {
    terminal: DefaultTerminal,
    events: EventStream,
    input: KeyInput,
    enhanced: bool,
    last_report: Arc<Mutex<Option<AllocationSnapshot>>>,
}

impl TerminalDriver {
    /// Enter raw mode and the alternate screen.
    ///
    /// Key release reporting is enabled when the terminal supports it;
    /// without it the press-and-hold repeat timer stays disarmed and
    /// terminal autorepeat drives held steppers instead.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be initialized.
    pub fn new() -> Result<Self, TerminalError> {
        let terminal = ratatui::try_init()?;

        let enhanced = supports_keyboard_enhancement().unwrap_or(false);
        if enhanced {
            execute!(
                stdout(),
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
        }
        debug!(enhanced, "terminal initialized");

        Ok(Self {
            terminal,
            events: EventStream::new(),
            input: KeyInput::new(enhanced),
            enhanced,
            last_report: Arc::default(),
        })
    }

    /// Shared handle to the most recent reported snapshot.
    ///
    /// Clone before handing the driver to the runtime; read after it
    /// returns to emit the exit report.
    pub fn last_report(&self) -> Arc<Mutex<Option<AllocationSnapshot>>> {
        Arc::clone(&self.last_report)
    }

    fn draw(&mut self, app: &App) -> Result<(), TerminalError> {
        let entry = self.input.entry().clone();
        self.terminal.draw(|frame| ui::draw(frame, app, &entry))?;
        Ok(())
    }

    fn locked(&self) -> MutexGuard<'_, Option<AllocationSnapshot>> {
        self.last_report.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Driver for TerminalDriver {
    type Error = TerminalError;
    type Instant = Instant;

    async fn poll_event(
        &mut self,
        app: &App,
        wait: Option<Duration>,
    ) -> Result<Vec<AppEvent>, TerminalError> {
        let next = match wait {
            Some(wait) => match tokio::time::timeout(wait, self.events.next()).await {
                Ok(next) => next,
                // Wait budget elapsed: let the runtime fire repeat ticks.
                Err(_) => return Ok(Vec::new()),
            },
            None => self.events.next().await,
        };

        let Some(event) = next else {
            return Err(TerminalError::InputClosed);
        };

        match event? {
            Event::Key(key) => {
                let events = self.input.map(key);
                if events.is_empty() {
                    // Entry-buffer edits produce no app event but must
                    // still show up on screen.
                    self.draw(app)?;
                }
                Ok(events)
            },
            Event::Resize(..) => {
                self.draw(app)?;
                Ok(Vec::new())
            },
            _ => Ok(Vec::new()),
        }
    }

    fn render(&mut self, app: &App) -> Result<(), TerminalError> {
        self.draw(app)
    }

    fn report(&mut self, snapshot: &AllocationSnapshot) -> Result<(), TerminalError> {
        let serialized = serde_json::to_string(snapshot)?;
        info!(target: "roomalloc::report", allocation = %serialized, "allocation changed");
        *self.locked() = Some(snapshot.clone());
        Ok(())
    }

    fn now(&self) -> Instant {
        Instant::now()
    }

    fn stop(&mut self) {
        if self.enhanced {
            if let Err(err) = execute!(stdout(), PopKeyboardEnhancementFlags) {
                warn!(%err, "failed to pop keyboard enhancement flags");
            }
        }
        ratatui::restore();
    }
}
