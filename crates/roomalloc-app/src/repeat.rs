//! Press-and-hold repeat for stepper controls.
//!
//! A held stepper re-issues the same single-step edit at a fixed interval,
//! starting immediately on press. The timer is a plain value compared
//! against a caller-supplied `now`, so the harness drives it with virtual
//! time and production uses [`std::time::Instant`]. Cancellation is
//! deterministic: once cancelled, no queued step ever fires.

use std::{ops::Add, time::Duration};

use crate::StepDirection;

/// Interval between repeated steps while a stepper is held.
pub const REPEAT_INTERVAL: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Armed<I> {
    direction: StepDirection,
    next_fire: I,
}

/// Repeat timer for a held stepper control.
///
/// At most one stepper is held at a time (single pointer, single logical
/// writer), so pressing while armed simply re-arms with the new
/// direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RepeatTimer<I> {
    armed: Option<Armed<I>>,
}

impl<I> RepeatTimer<I>
where
    I: Copy + Ord + Add<Duration, Output = I>,
{
    /// An idle timer.
    pub fn new() -> Self {
        Self { armed: None }
    }

    /// Arm the timer for a press at `now`.
    ///
    /// Returns the direction of the step to fire immediately; the next
    /// repeat is due one [`REPEAT_INTERVAL`] later.
    pub fn press(&mut self, direction: StepDirection, now: I) -> StepDirection {
        self.armed = Some(Armed { direction, next_fire: now + REPEAT_INTERVAL });
        direction
    }

    /// Return a due step and re-arm, or `None` if nothing is due.
    pub fn poll(&mut self, now: I) -> Option<StepDirection> {
        let armed = self.armed.as_mut()?;
        if now < armed.next_fire {
            return None;
        }
        armed.next_fire = now + REPEAT_INTERVAL;
        Some(armed.direction)
    }

    /// When the next repeat is due, if armed.
    pub fn deadline(&self) -> Option<I> {
        self.armed.map(|armed| armed.next_fire)
    }

    /// Disarm on release or on focus leaving the control.
    pub fn cancel(&mut self) {
        self.armed = None;
    }

    /// Whether a stepper is currently held.
    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;

    #[test]
    fn press_fires_immediately_and_schedules_next() {
        let base = Instant::now();
        let mut timer = RepeatTimer::new();

        assert_eq!(timer.press(StepDirection::Up, base), StepDirection::Up);
        assert_eq!(timer.deadline(), Some(base + REPEAT_INTERVAL));
    }

    #[test]
    fn poll_fires_only_at_the_deadline() {
        let base = Instant::now();
        let mut timer = RepeatTimer::new();
        timer.press(StepDirection::Down, base);

        assert_eq!(timer.poll(base + Duration::from_millis(100)), None);
        assert_eq!(timer.poll(base + REPEAT_INTERVAL), Some(StepDirection::Down));

        // Re-armed relative to the poll that fired.
        let fired_at = base + REPEAT_INTERVAL;
        assert_eq!(timer.deadline(), Some(fired_at + REPEAT_INTERVAL));
    }

    #[test]
    fn cancel_drops_queued_steps() {
        let base = Instant::now();
        let mut timer = RepeatTimer::new();
        timer.press(StepDirection::Up, base);
        timer.cancel();

        assert!(!timer.is_armed());
        assert_eq!(timer.poll(base + Duration::from_secs(10)), None);
    }

    #[test]
    fn repress_replaces_direction() {
        let base = Instant::now();
        let mut timer = RepeatTimer::new();
        timer.press(StepDirection::Up, base);
        timer.press(StepDirection::Down, base + Duration::from_millis(50));

        let due = base + Duration::from_millis(50) + REPEAT_INTERVAL;
        assert_eq!(timer.poll(due), Some(StepDirection::Down));
    }

    #[test]
    fn idle_timer_never_fires() {
        let mut timer: RepeatTimer<Instant> = RepeatTimer::new();
        assert_eq!(timer.poll(Instant::now()), None);
        assert_eq!(timer.deadline(), None);
    }
}
