//! Availability filter
//!
//! Splits the catalog by party size: cabins scale to groups, rooms are
//! sized for one or two guests. Offering an undersized room to a larger
//! party is never legal, so the two lists are mutually exclusive.

use shared::models::{AccommodationRef, Cabin, Room};

/// The subset of the catalog that is legally assignable
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AvailableUnits {
    pub cabins: Vec<Cabin>,
    pub rooms: Vec<Room>,
}

impl AvailableUnits {
    /// True when nothing can be assigned; the wizard must surface
    /// "no availability" and block the step
    pub fn is_empty(&self) -> bool {
        self.cabins.is_empty() && self.rooms.is_empty()
    }

    /// Whether a previously made selection is still in the filtered set
    pub fn contains(&self, selection: &AccommodationRef) -> bool {
        match selection {
            AccommodationRef::None => false,
            AccommodationRef::Cabin(id) => self.cabins.iter().any(|c| c.id == *id),
            AccommodationRef::Room(id) => self.rooms.iter().any(|r| r.id == *id),
        }
    }
}

/// Compute the assignable subset for a party of `guest_count`
///
/// More than one guest means companions are present: only in-service cabins
/// with sufficient capacity qualify and the room list is empty. A single
/// guest gets in-service rooms only (room capacity is not enforced beyond
/// the default occupancy of 2) and the cabin list is empty.
pub fn filter_available(guest_count: u32, cabins: &[Cabin], rooms: &[Room]) -> AvailableUnits {
    if guest_count > 1 {
        AvailableUnits {
            cabins: cabins
                .iter()
                .filter(|c| c.status.is_in_service() && c.capacity >= guest_count)
                .cloned()
                .collect(),
            rooms: Vec::new(),
        }
    } else {
        AvailableUnits {
            cabins: Vec::new(),
            rooms: rooms
                .iter()
                .filter(|r| r.status.is_in_service())
                .cloned()
                .collect(),
        }
    }
}
