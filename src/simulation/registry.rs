//! Shared NPC registry
//!
//! Many readers or one writer. Traversals (movement pass, collision scan,
//! display snapshots) take the read lock; add, remove and clear take the
//! write lock. Nothing here sleeps or does I/O while a guard is alive.

use std::sync::RwLock;

use crate::core::sync::{read, write};
use crate::entity::{Npc, NpcHandle};

#[derive(Debug, Default)]
pub struct Registry {
    npcs: RwLock<Vec<NpcHandle>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, npc: NpcHandle) {
        write(&self.npcs).push(npc);
    }

    pub fn extend(&self, npcs: impl IntoIterator<Item = NpcHandle>) {
        write(&self.npcs).extend(npcs);
    }

    /// Drop every NPC matching `predicate`; returns how many were dropped
    pub fn remove_if<F>(&self, predicate: F) -> usize
    where
        F: Fn(&Npc) -> bool,
    {
        let mut npcs = write(&self.npcs);
        let before = npcs.len();
        npcs.retain(|npc| !predicate(npc));
        before - npcs.len()
    }

    /// Cleanup sweep: physically remove everything flagged dead
    pub fn remove_dead(&self) -> usize {
        // Skip the write lock when there is nothing to sweep.
        if read(&self.npcs).iter().all(|npc| npc.is_alive()) {
            return 0;
        }
        self.remove_if(|npc| !npc.is_alive())
    }

    /// Ordered copy of the current handles
    pub fn snapshot(&self) -> Vec<NpcHandle> {
        read(&self.npcs).clone()
    }

    /// Run `f` over the entities under the read lock
    pub fn with_entities<R>(&self, f: impl FnOnce(&[NpcHandle]) -> R) -> R {
        let npcs = read(&self.npcs);
        f(&npcs)
    }

    pub fn count_alive(&self) -> usize {
        read(&self.npcs).iter().filter(|npc| npc.is_alive()).count()
    }

    pub fn len(&self) -> usize {
        read(&self.npcs).len()
    }

    pub fn is_empty(&self) -> bool {
        read(&self.npcs).is_empty()
    }

    pub fn clear(&self) {
        write(&self.npcs).clear();
    }
}
