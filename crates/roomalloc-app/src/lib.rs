//! Application layer for the room allocation widget
//!
//! Pure state machines and a generic runtime for UI orchestration, enabling
//! deterministic simulation testing with the same code that runs in
//! production.
//!
//! # Components
//!
//! - [`App`]: Application state (allocations, focus cursor)
//! - [`Driver`]: Trait for platform-specific I/O abstraction
//! - [`RepeatTimer`]: Press-and-hold repeat for stepper controls
//! - [`Runtime`]: Generic orchestration loop using Driver

mod action;
mod app;
mod driver;
mod event;
mod repeat;
mod runtime;

pub use action::AppAction;
pub use app::{App, FieldCursor};
pub use driver::Driver;
pub use event::{AppEvent, StepDirection};
pub use repeat::{REPEAT_INTERVAL, RepeatTimer};
pub use runtime::Runtime;
