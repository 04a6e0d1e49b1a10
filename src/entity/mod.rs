pub mod naming;
pub mod npc;
pub mod species;

pub use naming::NameRegistry;
pub use npc::{Npc, NpcHandle};
pub use species::{Species, SpeciesParams};
