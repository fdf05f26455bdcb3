//! Terminal UI for the room allocation widget
//!
//! A thin shell over [`roomalloc_app::Driver`] that provides
//! terminal-specific I/O. All orchestration logic lives in the generic
//! [`roomalloc_app::Runtime`]

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod config;
pub mod input;
pub mod terminal;
pub mod ui;

pub use config::Config;
pub use input::{EntryState, KeyInput};
pub use roomalloc_app::{App, AppAction, AppEvent, Driver, Runtime, StepDirection};
pub use terminal::{TerminalDriver, TerminalError};
