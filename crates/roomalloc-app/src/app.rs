//! App state machine.
//!
//! Owns the [`AllocationSet`] and the focus cursor, and translates
//! [`AppEvent`]s into declarative [`AppAction`]s. No I/O happens here;
//! the same transitions run under the production TUI and the simulation
//! harness.
//!
//! Rejected edits follow the silent-revert policy: the state is left
//! untouched, the rejection is logged at debug level, and the only action
//! produced is a re-render showing the retained value.

use roomalloc_core::{AllocationError, AllocationSet, EditOutcome, GuestCategory};
use tracing::{debug, warn};

use crate::{AppAction, AppEvent, StepDirection};

/// Cursor over the `2 * room_count` editable fields.
///
/// Fields are ordered the way they render: room 0 adults, room 0
/// children, room 1 adults, and so on. Movement wraps at both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldCursor {
    index: usize,
    field_count: usize,
}

impl FieldCursor {
    fn new(room_count: usize) -> Self {
        Self { index: 0, field_count: room_count * 2 }
    }

    /// Room the focused field belongs to.
    pub fn room(&self) -> usize {
        self.index / 2
    }

    /// Category of the focused field.
    pub fn category(&self) -> GuestCategory {
        if self.index % 2 == 0 { GuestCategory::Adult } else { GuestCategory::Child }
    }

    /// Whether the given field is the focused one.
    pub fn is_focused(&self, room: usize, category: GuestCategory) -> bool {
        self.room() == room && self.category() == category
    }

    fn next(&mut self) {
        self.index = (self.index + 1) % self.field_count;
    }

    fn prev(&mut self) {
        self.index = (self.index + self.field_count - 1) % self.field_count;
    }
}

/// Application state: the allocation set plus the focus cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct App {
    set: AllocationSet,
    cursor: FieldCursor,
    quitting: bool,
}

impl App {
    /// Create an app over a fresh allocation set.
    ///
    /// # Errors
    ///
    /// Returns [`AllocationError`] when the configuration cannot produce
    /// a valid initial set.
    pub fn new(total_guests: u32, room_count: u32) -> Result<Self, AllocationError> {
        let set = AllocationSet::new(total_guests, room_count)?;
        let cursor = FieldCursor::new(set.room_count());
        Ok(Self { set, cursor, quitting: false })
    }

    /// The current allocation set.
    pub fn allocations(&self) -> &AllocationSet {
        &self.set
    }

    /// The focus cursor, for rendering the highlighted field.
    pub fn cursor(&self) -> &FieldCursor {
        &self.cursor
    }

    /// Whether a quit event has been processed.
    pub fn is_quitting(&self) -> bool {
        self.quitting
    }

    /// Process one event and return the actions to execute.
    ///
    /// [`AppEvent::StepperPressed`] and [`AppEvent::StepperReleased`] are
    /// normally intercepted by the runtime's repeat timer; handled here
    /// directly they degrade to a single step and a no-op, so a driver
    /// without a runtime still behaves sensibly.
    pub fn handle(&mut self, event: AppEvent) -> Vec<AppAction> {
        match event {
            AppEvent::FocusNext => {
                self.cursor.next();
                vec![AppAction::Render]
            },
            AppEvent::FocusPrev => {
                self.cursor.prev();
                vec![AppAction::Render]
            },
            AppEvent::Step { direction } | AppEvent::StepperPressed { direction } => {
                self.step(direction)
            },
            AppEvent::StepperReleased => Vec::new(),
            AppEvent::SetValue { value } => self.apply_edit(value),
            AppEvent::Quit => {
                self.quitting = true;
                vec![AppAction::Quit]
            },
        }
    }

    /// Apply one step to the focused field.
    ///
    /// Used by [`crate::Runtime`] for repeat-timer ticks as well as for
    /// plain [`AppEvent::Step`] events.
    pub fn step(&mut self, direction: StepDirection) -> Vec<AppAction> {
        let current = self.focused_value();
        let target = match direction {
            StepDirection::Up => current + 1,
            StepDirection::Down => match current.checked_sub(1) {
                Some(target) => target,
                None => {
                    debug!(room = self.cursor.room(), "step below zero ignored");
                    return vec![AppAction::Render];
                },
            },
        };
        self.apply_edit(target)
    }

    fn focused_value(&self) -> u32 {
        self.set.rooms()[self.cursor.room()].value_of(self.cursor.category())
    }

    fn apply_edit(&mut self, value: u32) -> Vec<AppAction> {
        let room = self.cursor.room();
        let category = self.cursor.category();

        match self.set.set_value(room, category, value) {
            Ok(EditOutcome::Applied { unallocated }) => {
                debug!(room, ?category, value, unallocated, "edit applied");
                vec![AppAction::Render, AppAction::Report(self.set.snapshot())]
            },
            Ok(EditOutcome::Rejected { reason }) => {
                debug!(room, ?category, value, ?reason, "edit rejected");
                vec![AppAction::Render]
            },
            Err(err) => {
                warn!(%err, "edit dropped");
                vec![AppAction::Render]
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use roomalloc_core::AllocationSnapshot;

    use super::*;

    fn app_of(guests: u32, rooms: u32) -> App {
        match App::new(guests, rooms) {
            Ok(app) => app,
            Err(err) => unreachable!("valid configuration: {err}"),
        }
    }

    fn last_report(actions: &[AppAction]) -> Option<&AllocationSnapshot> {
        actions.iter().rev().find_map(|action| match action {
            AppAction::Report(snapshot) => Some(snapshot),
            _ => None,
        })
    }

    #[test]
    fn focus_starts_on_first_room_adults() {
        let app = app_of(6, 2);
        assert_eq!(app.cursor().room(), 0);
        assert_eq!(app.cursor().category(), GuestCategory::Adult);
    }

    #[test]
    fn focus_wraps_both_directions() {
        let mut app = app_of(6, 2);

        app.handle(AppEvent::FocusPrev);
        assert_eq!(app.cursor().room(), 1);
        assert_eq!(app.cursor().category(), GuestCategory::Child);

        app.handle(AppEvent::FocusNext);
        assert_eq!(app.cursor().room(), 0);
        assert_eq!(app.cursor().category(), GuestCategory::Adult);
    }

    #[test]
    fn accepted_step_renders_and_reports() {
        let mut app = app_of(6, 2);

        let actions = app.handle(AppEvent::Step { direction: StepDirection::Up });
        assert_eq!(actions[0], AppAction::Render);
        let Some(snapshot) = last_report(&actions) else {
            unreachable!("accepted edit must report");
        };
        assert_eq!(snapshot.unallocated, 3);
        assert_eq!(app.allocations().rooms()[0].adults(), 2);
    }

    #[test]
    fn rejected_step_renders_without_report() {
        // Adults already at the floor of one.
        let mut app = app_of(6, 2);

        let actions = app.handle(AppEvent::Step { direction: StepDirection::Down });
        assert_eq!(actions, vec![AppAction::Render]);
        assert_eq!(app.allocations().rooms()[0].adults(), 1);
    }

    #[test]
    fn set_value_on_focused_field_is_bounds_checked() {
        let mut app = app_of(6, 2);
        app.handle(AppEvent::FocusNext); // room 0 children

        // Bound: min(4 + 0, 4 - 1) = 3.
        let actions = app.handle(AppEvent::SetValue { value: 3 });
        assert!(last_report(&actions).is_some());
        assert_eq!(app.allocations().rooms()[0].children(), 3);

        let actions = app.handle(AppEvent::SetValue { value: 9 });
        assert_eq!(actions, vec![AppAction::Render]);
        assert_eq!(app.allocations().rooms()[0].children(), 3);
    }

    #[test]
    fn stepper_events_degrade_without_a_runtime() {
        let mut app = app_of(6, 2);

        let actions = app.handle(AppEvent::StepperPressed { direction: StepDirection::Up });
        assert!(last_report(&actions).is_some());
        assert_eq!(app.handle(AppEvent::StepperReleased), Vec::new());
        assert_eq!(app.allocations().rooms()[0].adults(), 2);
    }

    #[test]
    fn quit_sets_flag_and_emits_quit() {
        let mut app = app_of(6, 2);
        assert!(!app.is_quitting());

        let actions = app.handle(AppEvent::Quit);
        assert_eq!(actions, vec![AppAction::Quit]);
        assert!(app.is_quitting());
    }

    proptest! {
        /// The cursor always points at a real field and prev undoes next.
        #[test]
        fn cursor_stays_in_range(rooms in 1u32..=6, moves in prop::collection::vec(prop::bool::ANY, 0..64)) {
            let mut app = app_of(rooms * 4, rooms);

            for forward in moves {
                let before = *app.cursor();
                if forward {
                    app.handle(AppEvent::FocusNext);
                } else {
                    app.handle(AppEvent::FocusPrev);
                }
                prop_assert!(app.cursor().room() < rooms as usize);

                let mut cursor = *app.cursor();
                if forward { cursor.prev() } else { cursor.next() }
                prop_assert_eq!(cursor, before);
            }
        }
    }
}
