//! The closed set of creature kinds and their movement parameters

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::error::ArenaError;

/// Species enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Species {
    Dragon,
    Frog,
    Bull,
}

/// Per-species movement parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpeciesParams {
    /// Maximum displacement per axis per movement tick
    pub step: i32,
    /// Real-time proximity threshold for queuing a battle
    pub kill_distance: i32,
}

pub const DRAGON_PARAMS: SpeciesParams = SpeciesParams {
    step: 50,
    kill_distance: 30,
};
pub const BULL_PARAMS: SpeciesParams = SpeciesParams {
    step: 30,
    kill_distance: 10,
};
pub const FROG_PARAMS: SpeciesParams = SpeciesParams {
    step: 1,
    kill_distance: 10,
};

impl Species {
    pub const ALL: [Species; 3] = [Species::Dragon, Species::Frog, Species::Bull];

    pub fn params(&self) -> SpeciesParams {
        match self {
            Species::Dragon => DRAGON_PARAMS,
            Species::Frog => FROG_PARAMS,
            Species::Bull => BULL_PARAMS,
        }
    }

    /// Lowercase tag used by the roster format
    pub fn as_str(&self) -> &'static str {
        match self {
            Species::Dragon => "dragon",
            Species::Frog => "frog",
            Species::Bull => "bull",
        }
    }

    /// Capitalised name, used as the base name for spawned NPCs
    pub fn display_name(&self) -> &'static str {
        match self {
            Species::Dragon => "Dragon",
            Species::Frog => "Frog",
            Species::Bull => "Bull",
        }
    }

    /// Map glyph
    pub fn symbol(&self) -> char {
        match self {
            Species::Dragon => 'D',
            Species::Frog => 'F',
            Species::Bull => 'B',
        }
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Species {
    type Err = ArenaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dragon" => Ok(Species::Dragon),
            "frog" => Ok(Species::Frog),
            "bull" => Ok(Species::Bull),
            other => Err(ArenaError::UnknownSpecies(other.to_string())),
        }
    }
}
