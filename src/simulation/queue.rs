//! Pending battle pairings
//!
//! The movement loop produces, the combat loop consumes. The queue has its
//! own lock so neither side waits on the registry to hand over work.

use std::collections::VecDeque;
use std::sync::Mutex;

use crate::core::sync::lock;
use crate::entity::NpcHandle;

/// A proposed (attacker, defender) duel. Holds both handles so it stays
/// valid after the registry drops either participant.
#[derive(Debug, Clone)]
pub struct BattleTask {
    pub attacker: NpcHandle,
    pub defender: NpcHandle,
}

/// FIFO with no priority and no deduplication
#[derive(Debug, Default)]
pub struct BattleQueue {
    tasks: Mutex<VecDeque<BattleTask>>,
}

impl BattleQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, attacker: NpcHandle, defender: NpcHandle) {
        lock(&self.tasks).push_back(BattleTask { attacker, defender });
    }

    /// Enqueue a batch under a single lock acquisition, preserving order
    pub fn push_all(&self, pairs: impl IntoIterator<Item = (NpcHandle, NpcHandle)>) {
        let mut tasks = lock(&self.tasks);
        tasks.extend(
            pairs
                .into_iter()
                .map(|(attacker, defender)| BattleTask { attacker, defender }),
        );
    }

    pub fn try_pop(&self) -> Option<BattleTask> {
        lock(&self.tasks).pop_front()
    }

    /// Discard everything pending; returns how many tasks were dropped
    pub fn clear(&self) -> usize {
        let mut tasks = lock(&self.tasks);
        let dropped = tasks.len();
        tasks.clear();
        dropped
    }

    pub fn len(&self) -> usize {
        lock(&self.tasks).len()
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.tasks).is_empty()
    }
}
