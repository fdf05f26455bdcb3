//! Deterministic simulation harness for the room allocation widget.
//!
//! A scripted [`SimDriver`] over virtual time drives the same
//! [`roomalloc_app::Runtime`] that runs in production, and a naive
//! [`ReferenceModel`] provides the oracle for model-based property tests.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod model;
pub mod sim_driver;

pub use model::{Edit, ReferenceModel};
pub use sim_driver::{SimDriver, SimError, SimInstant, SimLog};
