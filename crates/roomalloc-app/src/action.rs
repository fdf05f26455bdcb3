//! UI actions
//!
//! Actions produced by the App state machine for the runtime to execute.

use roomalloc_core::AllocationSnapshot;

/// Actions produced by the App state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    /// Render the UI.
    Render,

    /// Forward the allocation state to the external consumer.
    ///
    /// Emitted after every accepted edit. Only valid states are
    /// reachable, so the snapshot never reports over-allocation.
    Report(AllocationSnapshot),

    /// Quit the application.
    Quit,
}
