use thiserror::Error;

use crate::core::types::Bounds;

#[derive(Error, Debug)]
pub enum ArenaError {
    #[error("Coordinates ({x}, {y}) outside bounds: {bounds}")]
    OutOfBounds { x: i32, y: i32, bounds: Bounds },

    #[error("Invalid NPC name {0:?}: names may not contain '\"'")]
    InvalidName(String),

    #[error("Unknown species: {0}")]
    UnknownSpecies(String),

    #[error("Roster line {line}: {reason}")]
    Roster { line: usize, reason: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ArenaError>;
