//! Roomalloc allocation engine
//!
//! Pure state-transition logic for distributing guests across hotel rooms,
//! completely decoupled from I/O. This enables deterministic testing and
//! keeps every capacity rule in one place.
//!
//! # Architecture
//!
//! The engine is a deterministic state machine over an [`AllocationSet`].
//! It is isolated from I/O, time, and scheduling: edits arrive as plain
//! values, validation is resolved locally, and the caller receives either
//! the applied transition or a declarative [`EditOutcome::Rejected`] naming
//! the violated limit. Nothing else is mutated on rejection.
//!
//! A runtime or test harness is responsible for collecting raw input,
//! suppressing malformed text at its own boundary, and calling
//! [`AllocationSet::set_value`] only with syntactically valid integers.
//!
//! # Components
//!
//! - [`allocation`]: The [`AllocationSet`] state machine and its bounds
//! - [`error`]: Allocation error types

pub mod allocation;
pub mod error;

pub use allocation::{
    ADULT_MINIMUM, Allocation, AllocationSet, AllocationSnapshot, CHILD_MINIMUM, EditOutcome,
    GuestCategory, ROOM_CAPACITY, RejectReason,
};
pub use error::AllocationError;
