//! Scripted driver over virtual time.
//!
//! [`SimDriver`] implements [`Driver`] against a pre-built timeline of
//! events. Time only moves when the runtime polls: either forward to the
//! next scripted event or by the runtime's wait budget, whichever comes
//! first. Repeat-timer ticks therefore interleave with scripted input
//! exactly as they would against a real clock, but reproducibly.

use std::{
    collections::VecDeque,
    ops::{Add, AddAssign, Sub},
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use roomalloc_app::{App, AppEvent, Driver};
use roomalloc_core::AllocationSnapshot;
use tracing::trace;

/// Virtual clock instant with millisecond scripting granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SimInstant(Duration);

impl SimInstant {
    /// The start of simulated time.
    pub const EPOCH: Self = Self(Duration::ZERO);

    /// An instant `millis` after the epoch.
    pub fn from_millis(millis: u64) -> Self {
        Self(Duration::from_millis(millis))
    }
}

impl Add<Duration> for SimInstant {
    type Output = Self;

    fn add(self, rhs: Duration) -> Self {
        Self(self.0 + rhs)
    }
}

impl AddAssign<Duration> for SimInstant {
    fn add_assign(&mut self, rhs: Duration) {
        self.0 += rhs;
    }
}

impl Sub for SimInstant {
    type Output = Duration;

    fn sub(self, rhs: Self) -> Duration {
        self.0 - rhs.0
    }
}

/// Simulation driver failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SimError {
    /// The script ran out while the runtime still wanted input.
    ///
    /// Scripts must end with [`AppEvent::Quit`].
    #[error("script exhausted with no quit event")]
    ScriptExhausted,
}

/// Everything the driver observed, for test assertions.
#[derive(Debug, Default)]
pub struct SimLog {
    /// Snapshot taken at each render, in order.
    pub renders: Vec<AllocationSnapshot>,
    /// Snapshot forwarded at each report, in order.
    pub reports: Vec<AllocationSnapshot>,
    /// Whether the runtime tore the driver down.
    pub stopped: bool,
}

/// Scripted [`Driver`] implementation with a virtual clock.
#[derive(Debug)]
pub struct SimDriver {
    script: VecDeque<(SimInstant, AppEvent)>,
    clock: SimInstant,
    log: Arc<Mutex<SimLog>>,
}

impl SimDriver {
    /// A driver with an empty script at the epoch.
    pub fn new() -> Self {
        Self { script: VecDeque::new(), clock: SimInstant::EPOCH, log: Arc::default() }
    }

    /// Schedule `event` at `millis` after the epoch.
    ///
    /// Entries must be appended in non-decreasing time order.
    pub fn at(mut self, millis: u64, event: AppEvent) -> Self {
        let at = SimInstant::from_millis(millis);
        debug_assert!(self.script.back().is_none_or(|(last, _)| *last <= at));
        self.script.push_back((at, event));
        self
    }

    /// Shared handle to the observation log.
    ///
    /// Clone before handing the driver to a runtime.
    pub fn log(&self) -> Arc<Mutex<SimLog>> {
        Arc::clone(&self.log)
    }

    fn locked(log: &Arc<Mutex<SimLog>>) -> MutexGuard<'_, SimLog> {
        log.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for SimDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl Driver for SimDriver {
    type Error = SimError;
    type Instant = SimInstant;

    async fn poll_event(
        &mut self,
        _app: &App,
        wait: Option<Duration>,
    ) -> Result<Vec<AppEvent>, SimError> {
        let next_at = self.script.front().map(|(at, _)| *at);

        let Some(next_at) = next_at else {
            // Nothing scripted: a bounded wait elapses, an unbounded one
            // would hang forever.
            let Some(wait) = wait else {
                return Err(SimError::ScriptExhausted);
            };
            self.clock += wait;
            return Ok(Vec::new());
        };

        if let Some(wait) = wait {
            let budget_end = self.clock + wait;
            if next_at > budget_end {
                // The repeat deadline comes first.
                self.clock = budget_end;
                return Ok(Vec::new());
            }
        }

        self.clock = self.clock.max(next_at);
        let mut events = Vec::new();
        while let Some((at, _)) = self.script.front() {
            if *at > self.clock {
                break;
            }
            if let Some((_, event)) = self.script.pop_front() {
                events.push(event);
            }
        }
        trace!(clock = ?self.clock, count = events.len(), "delivering scripted events");
        Ok(events)
    }

    fn render(&mut self, app: &App) -> Result<(), SimError> {
        Self::locked(&self.log).renders.push(app.allocations().snapshot());
        Ok(())
    }

    fn report(&mut self, snapshot: &AllocationSnapshot) -> Result<(), SimError> {
        Self::locked(&self.log).reports.push(snapshot.clone());
        Ok(())
    }

    fn now(&self) -> SimInstant {
        self.clock
    }

    fn stop(&mut self) {
        Self::locked(&self.log).stopped = true;
    }
}
