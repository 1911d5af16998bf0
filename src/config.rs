// Application configuration
// Defaults reproduce the stock hotel: 13 rooms, reservations.txt, 10 character contacts.

use std::env;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::inventory::{InventoryError, RoomBlock, RoomInventory};
use crate::manager::ReservationManager;

pub const DEFAULT_RESERVATIONS_FILE: &str = "reservations.txt";
pub const DEFAULT_CONTACT_LENGTH: usize = 10;
pub const DEFAULT_ID_TYPES: [&str; 3] = ["Aadhar", "Passport", "Driver's License"];

// Environment variables read by `AppConfig::from_env`
pub const CONFIG_FILE_ENV: &str = "HOTEL_CONFIG";
pub const RESERVATIONS_FILE_ENV: &str = "HOTEL_RESERVATIONS_FILE";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error reading {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("JSON parse error in {path}: {message}")]
    JsonParseError { path: PathBuf, message: String },

    #[error("Invalid room inventory: {0}")]
    InventoryError(#[from] InventoryError),
}

/// Field rules checked by `ReservationManager::reserve`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationRules {
    /// Exact number of characters a contact must have.
    pub contact_length: usize,
    /// Accepted identification documents, matched exactly.
    pub id_types: Vec<String>,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            contact_length: DEFAULT_CONTACT_LENGTH,
            id_types: DEFAULT_ID_TYPES.iter().map(|id| id.to_string()).collect(),
        }
    }
}

impl ValidationRules {
    pub fn accepts_contact(&self, contact: &str) -> bool {
        contact.chars().count() == self.contact_length
    }

    pub fn accepts_id_type(&self, id_type: &str) -> bool {
        self.id_types.iter().any(|allowed| allowed == id_type)
    }

    /// Accepted id types as prose, e.g. `Aadhar, Passport, and Driver's License`.
    pub fn id_type_list(&self) -> String {
        match self.id_types.as_slice() {
            [] => String::new(),
            [only] => only.clone(),
            [first, second] => format!("{} and {}", first, second),
            [rest @ .., last] => format!("{}, and {}", rest.join(", "), last),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub reservations_file: PathBuf,
    pub validation: ValidationRules,
    pub room_blocks: Vec<RoomBlock>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            reservations_file: PathBuf::from(DEFAULT_RESERVATIONS_FILE),
            validation: ValidationRules::default(),
            room_blocks: vec![
                RoomBlock::new(101, "Single", 1, 5),
                RoomBlock::new(201, "Double", 2, 5),
                RoomBlock::new(301, "Suite", 4, 3),
            ],
        }
    }
}

impl AppConfig {
    /// Reads a JSON config file. Missing keys fall back to defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::IoError {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content).map_err(|message| ConfigError::JsonParseError {
            path: path.to_path_buf(),
            message,
        })
    }

    fn from_json(content: &str) -> Result<Self, String> {
        serde_json::from_str(content).map_err(|e| e.to_string())
    }

    /// Builds configuration from the environment.
    ///
    /// - `HOTEL_CONFIG`: optional path to a JSON config file
    /// - `HOTEL_RESERVATIONS_FILE`: overrides the reservation file path
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(
            env::var_os(CONFIG_FILE_ENV).map(PathBuf::from),
            env::var_os(RESERVATIONS_FILE_ENV).map(PathBuf::from),
        )
    }

    // Values already read from the environment
    fn from_vars(
        config_file: Option<PathBuf>,
        reservations_file: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let mut config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        if let Some(path) = reservations_file {
            config.reservations_file = path;
        }

        Ok(config)
    }

    pub fn build_inventory(&self) -> Result<RoomInventory, ConfigError> {
        Ok(RoomInventory::from_blocks(&self.room_blocks)?)
    }

    pub fn build_manager(&self) -> Result<ReservationManager, ConfigError> {
        let inventory = self.build_inventory()?;
        Ok(ReservationManager::new(inventory, self.validation.clone()))
    }
}
