// Main library file for the hotel reservation tracker

// Export modules for each part of the system
pub mod config;
pub mod inventory;
pub mod manager;
pub mod persistence;
pub mod reservation;
pub mod shell;

// Re-export key types for convenience
pub use config::{AppConfig, ConfigError, ValidationRules};
pub use inventory::{InventoryError, Room, RoomBlock, RoomInventory};
pub use manager::{Checkout, ReservationError, ReservationManager, RestoreReport, RoomStatus};
pub use persistence::{LoadOutcome, PersistenceError, ReservationStore};
pub use reservation::{Customer, Ledger, Reservation};
pub use shell::{Command, Shell};
