//! Allocation error types.

/// Errors returned by the allocation engine.
///
/// These are caller contract violations, not edit rejections: an edit with
/// an out-of-range *value* is a normal [`crate::EditOutcome::Rejected`],
/// while the variants here mean the request could never be valid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AllocationError {
    /// An allocation set needs at least one room.
    #[error("allocation set needs at least one room")]
    NoRooms,

    /// Fewer guests than rooms: the one-adult-per-room rule cannot hold.
    #[error("{guests} guests cannot fill {rooms} rooms with one adult each")]
    InsufficientGuests {
        /// Total guests requested.
        guests: u32,
        /// Number of rooms requested.
        rooms: u32,
    },

    /// Room index outside the set.
    #[error("room index {index} out of range for {rooms} rooms")]
    UnknownRoom {
        /// The offending index.
        index: usize,
        /// Number of rooms in the set.
        rooms: usize,
    },
}
