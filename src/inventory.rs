// Room inventory
// Rooms are created once at startup from seed blocks and never removed.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum InventoryError {
    #[error("Room block starting at {start} has zero capacity")]
    ZeroCapacity { start: u32 },

    #[error("Room block starting at {start} with {count} rooms overflows room numbering")]
    NumberOverflow { start: u32, count: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub number: u32,
    pub room_type: String,
    pub capacity: u32,
    pub available: bool,
}

impl Room {
    pub fn new(number: u32, room_type: impl Into<String>, capacity: u32) -> Self {
        Self {
            number,
            room_type: room_type.into(),
            capacity,
            available: true,
        }
    }
}

// A run of consecutively numbered rooms sharing type and capacity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomBlock {
    pub start: u32,
    pub room_type: String,
    pub capacity: u32,
    pub count: u32,
}

impl RoomBlock {
    pub fn new(start: u32, room_type: impl Into<String>, capacity: u32, count: u32) -> Self {
        Self {
            start,
            room_type: room_type.into(),
            capacity,
            count,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RoomInventory {
    rooms: Vec<Room>,
}

impl RoomInventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an inventory by appending each block in order.
    pub fn from_blocks<'a>(
        blocks: impl IntoIterator<Item = &'a RoomBlock>,
    ) -> Result<Self, InventoryError> {
        let mut inventory = Self::new();
        for block in blocks {
            inventory.add_room_block(block.start, &block.room_type, block.capacity, block.count)?;
        }
        Ok(inventory)
    }

    /// Appends `count` available rooms numbered `start..start + count`.
    ///
    /// Room numbers are not de-duplicated against rooms already present.
    pub fn add_room_block(
        &mut self,
        start: u32,
        room_type: &str,
        capacity: u32,
        count: u32,
    ) -> Result<(), InventoryError> {
        if capacity == 0 {
            return Err(InventoryError::ZeroCapacity { start });
        }
        if count > 0 && start.checked_add(count - 1).is_none() {
            return Err(InventoryError::NumberOverflow { start, count });
        }

        self.rooms.reserve(count as usize);
        for offset in 0..count {
            self.rooms.push(Room::new(start + offset, room_type, capacity));
        }

        tracing::debug!(start, count, room_type, capacity, "added room block");
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Room> + '_ {
        self.rooms.iter()
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    // First room carrying this number, whatever its state
    pub fn find(&self, number: u32) -> Option<&Room> {
        self.rooms.iter().find(|room| room.number == number)
    }

    /// First room with `number` whose availability equals `available`.
    pub fn find_mut_by_status(&mut self, number: u32, available: bool) -> Option<&mut Room> {
        self.rooms
            .iter_mut()
            .find(|room| room.number == number && room.available == available)
    }
}
