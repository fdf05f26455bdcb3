//! Allocation state machine for guest-to-room distribution.
//!
//! This module implements the allocation engine - maintaining one
//! [`Allocation`] per room and answering, for any room and guest category,
//! "what is the maximum legal value right now".
//!
//! # Architecture: Validate-Then-Apply
//!
//! Every edit goes through the same two steps:
//! - [`AllocationSet::compute_bound`] derives the inclusive maximum for the
//!   targeted room/category from the live state
//! - [`AllocationSet::set_value`] applies the edit only when it lies within
//!   `[minimum, bound]`, otherwise returns [`EditOutcome::Rejected`] and
//!   mutates nothing
//!
//! Bounds are recomputed from scratch on each call rather than cached, so
//! no editing order can observe stale limits.
//!
//! # Bounds
//!
//! For a room holding `current` of the edited category and `other` of the
//! opposite category:
//!
//! ```text
//! bound = min(unallocated + current, ROOM_CAPACITY - other)
//! ```
//!
//! `ROOM_CAPACITY - other` is the physical ceiling given what already
//! occupies the room. `unallocated + current` is the global ceiling: how
//! high the category could go if every unassigned guest joined it, with the
//! room's own contribution added back since `unallocated` already excludes
//! it. Both constraints must hold, hence `min`.
//!
//! # Invariants
//!
//! After construction and after every accepted edit:
//! - every room holds at least one adult
//! - no room exceeds [`ROOM_CAPACITY`] occupants
//! - the sum of all occupants never exceeds the guest total, so
//!   [`AllocationSet::unallocated`] never goes negative

use serde::Serialize;

use crate::error::AllocationError;

/// Fixed maximum occupants (adults + children) per room.
pub const ROOM_CAPACITY: u32 = 4;

/// Every room must keep at least this many adults.
pub const ADULT_MINIMUM: u32 = 1;

/// Children may go down to zero.
pub const CHILD_MINIMUM: u32 = 0;

/// Guest category within a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GuestCategory {
    /// Adult occupant (age 20+). Floor of one per room.
    Adult,
    /// Child occupant. Floor of zero.
    Child,
}

impl GuestCategory {
    /// Inclusive minimum legal value for this category in any room.
    pub fn minimum(self) -> u32 {
        match self {
            Self::Adult => ADULT_MINIMUM,
            Self::Child => CHILD_MINIMUM,
        }
    }

    /// The opposite category.
    pub fn other(self) -> Self {
        match self {
            Self::Adult => Self::Child,
            Self::Child => Self::Adult,
        }
    }
}

/// One room's current occupancy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Allocation {
    adults: u32,
    children: u32,
}

impl Default for Allocation {
    /// A freshly created room: one adult, no children.
    fn default() -> Self {
        Self { adults: ADULT_MINIMUM, children: CHILD_MINIMUM }
    }
}

impl Allocation {
    /// Adults in the room.
    pub fn adults(&self) -> u32 {
        self.adults
    }

    /// Children in the room.
    pub fn children(&self) -> u32 {
        self.children
    }

    /// Total occupants in the room.
    pub fn occupants(&self) -> u32 {
        self.adults + self.children
    }

    /// Current value of the given category.
    pub fn value_of(&self, category: GuestCategory) -> u32 {
        match category {
            GuestCategory::Adult => self.adults,
            GuestCategory::Child => self.children,
        }
    }

    fn set(&mut self, category: GuestCategory, value: u32) {
        match category {
            GuestCategory::Adult => self.adults = value,
            GuestCategory::Child => self.children = value,
        }
    }
}

/// Result of an edit attempt.
///
/// Validation failures are resolved locally: the caller receives the
/// violated limit and the set is left untouched. Nothing propagates upward
/// except successful state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// The edit was applied; exactly one room's one category changed.
    Applied {
        /// Guests still unassigned after the edit.
        unallocated: u32,
    },

    /// The edit was out of range; the prior value is retained.
    Rejected {
        /// The limit the requested value violated.
        reason: RejectReason,
    },
}

/// Why an edit was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Requested value below the category floor.
    BelowMinimum {
        /// The inclusive floor for this category.
        minimum: u32,
    },

    /// Requested value above the current bound.
    AboveBound {
        /// The inclusive maximum at the time of the edit.
        bound: u32,
    },
}

/// Serializable view of the current allocation state.
///
/// Handed to observers after every accepted edit. Only reachable states
/// are representable, so `unallocated` is always the true non-negative
/// remainder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AllocationSnapshot {
    /// Total guests to distribute.
    pub total_guests: u32,
    /// Guests not yet assigned to any room.
    pub unallocated: u32,
    /// Per-room occupancy, in room order.
    pub rooms: Vec<Allocation>,
}

/// Ordered set of per-room allocations with a fixed guest total.
///
/// The room count is fixed at creation; index position is the room's
/// identity for the lifetime of the set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationSet {
    rooms: Vec<Allocation>,
    total_guests: u32,
}

impl AllocationSet {
    /// Create a set of `room_count` rooms, each defaulted to one adult and
    /// no children.
    ///
    /// # Errors
    ///
    /// Returns [`AllocationError::NoRooms`] for a zero room count and
    /// [`AllocationError::InsufficientGuests`] when `total_guests` cannot
    /// cover one adult per room.
    pub fn new(total_guests: u32, room_count: u32) -> Result<Self, AllocationError> {
        if room_count == 0 {
            return Err(AllocationError::NoRooms);
        }
        if total_guests < room_count {
            return Err(AllocationError::InsufficientGuests {
                guests: total_guests,
                rooms: room_count,
            });
        }

        Ok(Self { rooms: vec![Allocation::default(); room_count as usize], total_guests })
    }

    /// Total guests to distribute.
    pub fn total_guests(&self) -> u32 {
        self.total_guests
    }

    /// Number of rooms in the set.
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Per-room allocations, in room order.
    pub fn rooms(&self) -> &[Allocation] {
        &self.rooms
    }

    /// The allocation for one room.
    ///
    /// # Errors
    ///
    /// Returns [`AllocationError::UnknownRoom`] for an index outside the
    /// set.
    pub fn room(&self, room_index: usize) -> Result<&Allocation, AllocationError> {
        self.rooms.get(room_index).ok_or(AllocationError::UnknownRoom {
            index: room_index,
            rooms: self.rooms.len(),
        })
    }

    /// Guests currently assigned across all rooms.
    pub fn allocated(&self) -> u32 {
        self.rooms.iter().map(Allocation::occupants).sum()
    }

    /// Guests not yet assigned to any room.
    pub fn unallocated(&self) -> u32 {
        self.total_guests - self.allocated()
    }

    /// Inclusive maximum legal value for `category` in the given room
    /// right now.
    ///
    /// When [`Self::unallocated`] is zero this equals the current value,
    /// which disables increments everywhere until a decrement elsewhere
    /// frees capacity.
    ///
    /// # Errors
    ///
    /// Returns [`AllocationError::UnknownRoom`] for an index outside the
    /// set.
    pub fn compute_bound(
        &self,
        room_index: usize,
        category: GuestCategory,
    ) -> Result<u32, AllocationError> {
        let room = self.room(room_index)?;
        let current = room.value_of(category);
        let other = room.value_of(category.other());

        let global_ceiling = self.unallocated() + current;
        let physical_ceiling = ROOM_CAPACITY - other;

        Ok(global_ceiling.min(physical_ceiling))
    }

    /// Apply an edit setting `category` in the given room to `value`.
    ///
    /// Accepted iff `value` lies within `[minimum, bound]` inclusive.
    /// Setting a field to its current value is trivially in range and is
    /// an accepted no-op. On rejection no field changes, including rooms
    /// and categories not targeted by the edit.
    ///
    /// # Errors
    ///
    /// Returns [`AllocationError::UnknownRoom`] for an index outside the
    /// set. Out-of-range *values* are not errors; they surface as
    /// [`EditOutcome::Rejected`].
    pub fn set_value(
        &mut self,
        room_index: usize,
        category: GuestCategory,
        value: u32,
    ) -> Result<EditOutcome, AllocationError> {
        let bound = self.compute_bound(room_index, category)?;
        let minimum = category.minimum();

        if value < minimum {
            return Ok(EditOutcome::Rejected { reason: RejectReason::BelowMinimum { minimum } });
        }
        if value > bound {
            return Ok(EditOutcome::Rejected { reason: RejectReason::AboveBound { bound } });
        }

        let Some(room) = self.rooms.get_mut(room_index) else {
            // compute_bound already validated the index
            return Err(AllocationError::UnknownRoom { index: room_index, rooms: self.rooms.len() });
        };
        room.set(category, value);

        debug_assert!(self.allocated() <= self.total_guests);
        Ok(EditOutcome::Applied { unallocated: self.unallocated() })
    }

    /// Serializable view of the current state for observers.
    pub fn snapshot(&self) -> AllocationSnapshot {
        AllocationSnapshot {
            total_guests: self.total_guests,
            unallocated: self.unallocated(),
            rooms: self.rooms.clone(),
        }
    }
}
