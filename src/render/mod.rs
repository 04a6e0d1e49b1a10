//! Text rendering of the arena
//!
//! Every function here works on a snapshot of handles and returns a
//! `String`. Nothing in this module takes a registry lock or prints, so the
//! caller formats first and hands the finished text to the console.

pub mod map;
pub mod report;

use crate::core::types::Position;
use crate::entity::{NpcHandle, Species};

pub use map::render_map;
pub use report::{npc_listing, survivors_report};

/// What the renderer needs to know about one NPC
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marker {
    pub position: Position,
    pub species: Species,
    pub alive: bool,
}

/// Collect markers for `npcs` into a reusable buffer.
pub fn collect_markers(npcs: &[NpcHandle], buffer: &mut Vec<Marker>) {
    buffer.clear();
    buffer.extend(npcs.iter().map(|npc| Marker {
        position: npc.position(),
        species: npc.species(),
        alive: npc.is_alive(),
    }));
}
