//! Reference model for model-based testing.
//!
//! A deliberately naive implementation of the allocation rules: instead of
//! deriving bounds, it tries the candidate state and accepts the edit iff
//! every invariant holds afterwards. The engine's closed-form bound is
//! claimed to be exactly equivalent; the model-based suite checks that
//! claim against random edit sequences.

use roomalloc_core::{ADULT_MINIMUM, GuestCategory, ROOM_CAPACITY};

/// One edit request, as generated by the property suites.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edit {
    /// Target room index.
    pub room: usize,
    /// Target category.
    pub category: GuestCategory,
    /// Requested value.
    pub value: u32,
}

/// Declarative reference implementation of the allocation rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceModel {
    total_guests: u32,
    rooms: Vec<(u32, u32)>,
}

impl ReferenceModel {
    /// A model with every room at one adult, no children.
    pub fn new(total_guests: u32, room_count: u32) -> Self {
        Self { total_guests, rooms: vec![(ADULT_MINIMUM, 0); room_count as usize] }
    }

    /// Per-room `(adults, children)` pairs.
    pub fn rooms(&self) -> &[(u32, u32)] {
        &self.rooms
    }

    /// Apply an edit iff the resulting state satisfies every invariant.
    ///
    /// Returns whether the edit was accepted. Unknown rooms are never
    /// accepted.
    pub fn apply(&mut self, edit: Edit) -> bool {
        let Some(&(adults, children)) = self.rooms.get(edit.room) else {
            return false;
        };
        let candidate = match edit.category {
            GuestCategory::Adult => (edit.value, children),
            GuestCategory::Child => (adults, edit.value),
        };

        if !self.valid_after(edit.room, candidate) {
            return false;
        }
        self.rooms[edit.room] = candidate;
        true
    }

    fn valid_after(&self, room: usize, candidate: (u32, u32)) -> bool {
        let mut allocated = 0;
        for (index, &(adults, children)) in self.rooms.iter().enumerate() {
            let (adults, children) = if index == room { candidate } else { (adults, children) };
            if adults < ADULT_MINIMUM || adults + children > ROOM_CAPACITY {
                return false;
            }
            allocated += adults + children;
        }
        allocated <= self.total_guests
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_edits_within_capacity() {
        let mut model = ReferenceModel::new(6, 2);
        assert!(model.apply(Edit { room: 0, category: GuestCategory::Adult, value: 2 }));
        assert_eq!(model.rooms(), &[(2, 0), (1, 0)]);
    }

    #[test]
    fn rejects_room_overflow() {
        let mut model = ReferenceModel::new(10, 2);
        assert!(model.apply(Edit { room: 0, category: GuestCategory::Adult, value: 4 }));
        assert!(!model.apply(Edit { room: 0, category: GuestCategory::Child, value: 1 }));
    }

    #[test]
    fn rejects_guest_total_overflow() {
        let mut model = ReferenceModel::new(2, 2);
        assert!(!model.apply(Edit { room: 1, category: GuestCategory::Child, value: 1 }));
    }

    #[test]
    fn rejects_adultless_room_and_unknown_room() {
        let mut model = ReferenceModel::new(6, 2);
        assert!(!model.apply(Edit { room: 0, category: GuestCategory::Adult, value: 0 }));
        assert!(!model.apply(Edit { room: 9, category: GuestCategory::Adult, value: 1 }));
    }
}
