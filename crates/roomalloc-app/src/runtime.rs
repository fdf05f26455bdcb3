//! Generic orchestration loop.
//!
//! Owns the [`App`] state machine, the driver, and the repeat timer, and
//! routes events between them: stepper press/release manage the timer,
//! everything else flows into [`App::handle`], and the resulting actions
//! are executed through the [`Driver`].
//!
//! Edits are strictly sequential - each one is fully validated and
//! applied (or rejected) before the next event is looked at. The engine
//! never needs a lock because this loop is the only writer.

use std::time::Duration;

use tracing::trace;

use crate::{App, AppAction, AppEvent, Driver, RepeatTimer};

/// Generic runtime driving an [`App`] through a [`Driver`].
pub struct Runtime<D: Driver> {
    app: App,
    driver: D,
    repeat: RepeatTimer<D::Instant>,
}

impl<D: Driver> Runtime<D> {
    /// Create a runtime over an app and a driver.
    pub fn new(app: App, driver: D) -> Self {
        Self { app, driver, repeat: RepeatTimer::new() }
    }

    /// Run until a quit event, rendering after every processed batch.
    ///
    /// # Errors
    ///
    /// Propagates driver failures; the driver is stopped first.
    pub async fn run(mut self) -> Result<(), D::Error> {
        self.driver.render(&self.app)?;

        loop {
            let wait = self.wait_budget();
            let events = match self.driver.poll_event(&self.app, wait).await {
                Ok(events) => events,
                Err(err) => {
                    self.driver.stop();
                    return Err(err);
                },
            };

            let mut actions = Vec::new();

            // Due repeat ticks fire before new input is interpreted, so a
            // release arriving in this batch still cancels later ticks
            // only, never the ones already due.
            let now = self.driver.now();
            while let Some(direction) = self.repeat.poll(now) {
                trace!(?direction, "repeat tick");
                actions.extend(self.app.step(direction));
            }

            for event in events {
                match event {
                    AppEvent::StepperPressed { direction } => {
                        let step = self.repeat.press(direction, self.driver.now());
                        actions.extend(self.app.step(step));
                    },
                    AppEvent::StepperReleased => self.repeat.cancel(),
                    AppEvent::FocusNext | AppEvent::FocusPrev => {
                        // Focus leaving the control cancels a held stepper.
                        self.repeat.cancel();
                        actions.extend(self.app.handle(event));
                    },
                    other => actions.extend(self.app.handle(other)),
                }
            }

            if let Err(err) = self.execute(actions) {
                self.driver.stop();
                return Err(err);
            }
            if self.app.is_quitting() {
                self.driver.stop();
                return Ok(());
            }
        }
    }

    /// How long the driver may block before the next repeat tick is due.
    fn wait_budget(&self) -> Option<Duration> {
        let deadline = self.repeat.deadline()?;
        let now = self.driver.now();
        Some(if deadline > now { deadline - now } else { Duration::ZERO })
    }

    fn execute(&mut self, actions: Vec<AppAction>) -> Result<(), D::Error> {
        for action in actions {
            match action {
                AppAction::Render => self.driver.render(&self.app)?,
                AppAction::Report(snapshot) => self.driver.report(&snapshot)?,
                // Quit is reflected in `App::is_quitting`.
                AppAction::Quit => {},
            }
        }
        Ok(())
    }
}
