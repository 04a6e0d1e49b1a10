//! Kill notification sinks
//!
//! Observers are attached to an NPC when it is registered and are invoked
//! synchronously, from whichever thread confirmed the kill. The victim
//! handle stays readable even after the registry has dropped it.

pub mod console;
pub mod file;

use std::sync::Mutex;

use crate::core::sync::lock;
use crate::entity::NpcHandle;

pub use console::{Console, ConsoleObserver};
pub use file::FileObserver;

pub trait KillObserver: Send + Sync {
    fn on_kill(&self, killer: &NpcHandle, victim: &NpcHandle);
}

/// Observer that remembers every (killer, victim) pair by name.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    kills: Mutex<Vec<(String, String)>>,
}

impl RecordingObserver {
    pub fn kills(&self) -> Vec<(String, String)> {
        lock(&self.kills).clone()
    }

    pub fn count(&self) -> usize {
        lock(&self.kills).len()
    }
}

impl KillObserver for RecordingObserver {
    fn on_kill(&self, killer: &NpcHandle, victim: &NpcHandle) {
        lock(&self.kills).push((killer.name().to_string(), victim.name().to_string()));
    }
}
