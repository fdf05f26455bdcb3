//! UI events
//!
//! Inputs delivered by a [`crate::Driver`] for the App state machine (and
//! the runtime's repeat timer) to process.

/// Direction of a single-step edit on the focused field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepDirection {
    /// Increment by one.
    Up,
    /// Decrement by one.
    Down,
}

/// Inputs produced by a driver for the application to process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// Move focus to the next editable field.
    FocusNext,

    /// Move focus to the previous editable field.
    FocusPrev,

    /// Apply one step to the focused field.
    Step {
        /// Increment or decrement.
        direction: StepDirection,
    },

    /// A stepper control was pressed and is being held.
    ///
    /// The runtime fires one immediate step and arms the repeat timer.
    StepperPressed {
        /// Increment or decrement.
        direction: StepDirection,
    },

    /// The held stepper control was released (or the pointer left it).
    StepperReleased,

    /// Set the focused field to an explicit value.
    ///
    /// Drivers only emit this for syntactically valid integers; malformed
    /// text never crosses this boundary.
    SetValue {
        /// Requested value for the focused field.
        value: u32,
    },

    /// Quit the application.
    Quit,
}
