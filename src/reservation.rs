// Customer and reservation records, plus the ordered ledger of active bookings

use crate::inventory::Room;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub name: String,
    pub contact: String,
    pub id_type: String,
}

impl Customer {
    pub fn new(
        name: impl Into<String>,
        contact: impl Into<String>,
        id_type: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            contact: contact.into(),
            id_type: id_type.into(),
        }
    }
}

/// An active booking.
///
/// `room` is a copy of the room taken at booking time, so the record stays
/// inspectable independently of the inventory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reservation {
    pub room: Room,
    pub customer: Customer,
}

impl Reservation {
    pub fn new(room: Room, customer: Customer) -> Self {
        Self { room, customer }
    }

    pub fn room_number(&self) -> u32 {
        self.room.number
    }
}

// Active reservations in booking order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    entries: Vec<Reservation>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, reservation: Reservation) {
        self.entries.push(reservation);
    }

    /// Removes every entry for `room_number` and returns how many were dropped.
    pub fn remove_room(&mut self, room_number: u32) -> usize {
        let before = self.entries.len();
        self.entries
            .retain(|reservation| reservation.room_number() != room_number);
        before - self.entries.len()
    }

    pub fn contains_room(&self, room_number: u32) -> bool {
        self.entries
            .iter()
            .any(|reservation| reservation.room_number() == room_number)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Reservation> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a Ledger {
    type Item = &'a Reservation;
    type IntoIter = std::slice::Iter<'a, Reservation>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<Reservation> for Ledger {
    fn from_iter<I: IntoIterator<Item = Reservation>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
