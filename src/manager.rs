// Reservation manager
// Owns the room inventory and the ledger and keeps them consistent: a room is
// occupied exactly when the ledger holds a reservation for it.

use std::fmt;

use thiserror::Error;

use crate::config::ValidationRules;
use crate::inventory::{Room, RoomInventory};
use crate::reservation::{Customer, Ledger, Reservation};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReservationError {
    #[error("Invalid contact number. Contact number must be {expected} digits.")]
    InvalidContact { expected: usize, actual: usize },

    #[error("Invalid ID type. Available options are {allowed}.")]
    InvalidIdType { given: String, allowed: String },

    #[error("Sorry, room {0} is not available or does not exist.")]
    RoomUnavailable(u32),

    #[error("Sorry, room {0} is already available or does not exist.")]
    RoomNotOccupied(u32),
}

// Result of a successful checkout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkout {
    pub room_number: u32,
    pub released_reservations: usize,
}

/// Outcome of replaying persisted reservations against a fresh inventory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestoreReport {
    pub restored: usize,
    /// Extra entries for a room that an earlier entry already occupied.
    pub duplicates: usize,
    /// Entries naming rooms the inventory does not have. These are dropped.
    pub orphaned: Vec<Reservation>,
}

/// One line of the availability listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoomStatus<'a> {
    pub number: u32,
    pub room_type: &'a str,
    pub capacity: u32,
    pub available: bool,
}

impl<'a> From<&'a Room> for RoomStatus<'a> {
    fn from(room: &'a Room) -> Self {
        Self {
            number: room.number,
            room_type: &room.room_type,
            capacity: room.capacity,
            available: room.available,
        }
    }
}

impl fmt::Display for RoomStatus<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Room Number: {}, Type: {}, Capacity: {} ({})",
            self.number,
            self.room_type,
            self.capacity,
            if self.available { "Available" } else { "Occupied" }
        )
    }
}

#[derive(Debug, Clone)]
pub struct ReservationManager {
    inventory: RoomInventory,
    ledger: Ledger,
    rules: ValidationRules,
}

impl ReservationManager {
    pub fn new(inventory: RoomInventory, rules: ValidationRules) -> Self {
        Self {
            inventory,
            ledger: Ledger::new(),
            rules,
        }
    }

    pub fn inventory(&self) -> &RoomInventory {
        &self.inventory
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn rules(&self) -> &ValidationRules {
        &self.rules
    }

    /// Books the first available room numbered `room_number`.
    ///
    /// Checks run in order (contact, id type, room) and stop at the first
    /// failure. Nothing is mutated unless the booking succeeds. On success the
    /// returned value is a copy of the new ledger entry.
    pub fn reserve(
        &mut self,
        room_number: u32,
        customer_name: &str,
        customer_contact: &str,
        id_type: &str,
    ) -> Result<Reservation, ReservationError> {
        if !self.rules.accepts_contact(customer_contact) {
            tracing::debug!(room_number, "rejected reservation: bad contact length");
            return Err(ReservationError::InvalidContact {
                expected: self.rules.contact_length,
                actual: customer_contact.chars().count(),
            });
        }

        if !self.rules.accepts_id_type(id_type) {
            tracing::debug!(room_number, id_type, "rejected reservation: unknown id type");
            return Err(ReservationError::InvalidIdType {
                given: id_type.to_string(),
                allowed: self.rules.id_type_list(),
            });
        }

        let room = match self.inventory.find_mut_by_status(room_number, true) {
            Some(room) => room,
            None => {
                tracing::debug!(room_number, "rejected reservation: room not bookable");
                return Err(ReservationError::RoomUnavailable(room_number));
            }
        };
        room.available = false;

        let reservation = Reservation::new(
            room.clone(),
            Customer::new(customer_name, customer_contact, id_type),
        );
        self.ledger.push(reservation.clone());

        tracing::info!(
            room_number,
            room_type = %reservation.room.room_type,
            "room reserved"
        );
        Ok(reservation)
    }

    /// Frees the first occupied room numbered `room_number` and drops every
    /// ledger entry for that number.
    pub fn checkout(&mut self, room_number: u32) -> Result<Checkout, ReservationError> {
        let room = self
            .inventory
            .find_mut_by_status(room_number, false)
            .ok_or(ReservationError::RoomNotOccupied(room_number))?;
        room.available = true;

        let released_reservations = self.ledger.remove_room(room_number);
        if released_reservations != 1 {
            tracing::warn!(
                room_number,
                released_reservations,
                "checkout released an unexpected number of reservations"
            );
        }

        tracing::info!(room_number, "room checked out");
        Ok(Checkout {
            room_number,
            released_reservations,
        })
    }

    /// Status of every room in inventory order.
    pub fn list_availability(&self) -> impl Iterator<Item = RoomStatus<'_>> + '_ {
        self.inventory.iter().map(RoomStatus::from)
    }

    /// Replays persisted reservations so that rooms booked in a previous run
    /// show as occupied again.
    pub fn restore(
        &mut self,
        reservations: impl IntoIterator<Item = Reservation>,
    ) -> RestoreReport {
        let mut report = RestoreReport::default();

        for reservation in reservations {
            let room_number = reservation.room_number();

            if let Some(room) = self.inventory.find_mut_by_status(room_number, true) {
                room.available = false;
                report.restored += 1;
            } else if self.ledger.contains_room(room_number) {
                tracing::warn!(room_number, "duplicate persisted reservation kept");
                report.duplicates += 1;
            } else {
                tracing::warn!(
                    room_number,
                    customer = %reservation.customer.name,
                    "persisted reservation names an unknown room, dropping it"
                );
                report.orphaned.push(reservation);
                continue;
            }

            self.ledger.push(reservation);
        }

        tracing::info!(
            restored = report.restored,
            duplicates = report.duplicates,
            orphaned = report.orphaned.len(),
            "restored reservations"
        );
        report
    }
}
