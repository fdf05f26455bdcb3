//! Driver trait for abstracting I/O operations.
//!
//! The [`Driver`] trait decouples the application runtime from specific
//! I/O implementations. Each frontend implements the trait to provide
//! platform-specific input, rendering, and reporting, while the generic
//! [`crate::Runtime`] handles all orchestration.

use std::{
    future::Future,
    ops::{Add, Sub},
    time::Duration,
};

use roomalloc_core::AllocationSnapshot;

use crate::{App, AppEvent};

/// Abstracts I/O operations for the application runtime.
///
/// Implementations provide platform-specific I/O while the generic
/// [`crate::Runtime`] handles orchestration logic. This ensures the same
/// orchestration code runs in the production TUI and in simulation.
pub trait Driver: Send {
    /// Platform-specific error type.
    type Error: std::error::Error + Send + 'static;

    /// Time instant type. Enables virtual time in simulation.
    type Instant: Copy
        + Ord
        + Send
        + Sync
        + Sub<Output = Duration>
        + Add<Duration, Output = Self::Instant>;

    /// Poll for input and return events to process.
    ///
    /// Returns an empty vector if no input arrived within `wait`; `None`
    /// means block until input is available. The runtime passes the
    /// repeat-timer deadline as `wait` so held steppers keep firing.
    ///
    /// # Errors
    ///
    /// Returns an error if the input source fails.
    fn poll_event(
        &mut self,
        app: &App,
        wait: Option<Duration>,
    ) -> impl Future<Output = Result<Vec<AppEvent>, Self::Error>> + Send;

    /// Render the application state.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    fn render(&mut self, app: &App) -> Result<(), Self::Error>;

    /// Forward an allocation snapshot to the external consumer.
    ///
    /// Called after every accepted edit.
    ///
    /// # Errors
    ///
    /// Returns an error if the consumer cannot be reached.
    fn report(&mut self, snapshot: &AllocationSnapshot) -> Result<(), Self::Error>;

    /// Current time instant.
    fn now(&self) -> Self::Instant;

    /// Tear down platform resources.
    fn stop(&mut self);
}
