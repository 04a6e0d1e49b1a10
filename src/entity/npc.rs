//! A single creature on the grid
//!
//! NPCs are shared as [`NpcHandle`]s between the registry, queued battle
//! tasks and kill observers. All mutable state uses interior mutability so
//! the movement loop can update positions while only holding the registry's
//! read lock.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::core::sync::lock;
use crate::core::types::{Bounds, Position, DICE_SIDES};
use crate::entity::species::{Species, SpeciesParams};
use crate::observer::KillObserver;

pub type NpcHandle = Arc<Npc>;

pub struct Npc {
    name: String,
    species: Species,
    position: Mutex<Position>,
    alive: AtomicBool,
    rng: Mutex<ChaCha8Rng>,
    observers: Mutex<Vec<Arc<dyn KillObserver>>>,
}

impl Npc {
    pub fn new(species: Species, name: impl Into<String>, position: Position, seed: u64) -> Self {
        Self {
            name: name.into(),
            species,
            position: Mutex::new(position),
            alive: AtomicBool::new(true),
            rng: Mutex::new(ChaCha8Rng::seed_from_u64(seed)),
            observers: Mutex::new(Vec::new()),
        }
    }

    /// Convenience constructor returning a shared handle
    pub fn spawn(species: Species, name: impl Into<String>, position: Position, seed: u64) -> NpcHandle {
        Arc::new(Self::new(species, name, position, seed))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn species(&self) -> Species {
        self.species
    }

    pub fn params(&self) -> SpeciesParams {
        self.species.params()
    }

    pub fn position(&self) -> Position {
        *lock(&self.position)
    }

    pub fn distance_to(&self, other: &Npc) -> f64 {
        self.position().distance(&other.position())
    }

    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }

    /// Flip the liveness flag to dead.
    ///
    /// Returns `true` only for the call that performed the transition, so
    /// racing killers can tell which one actually landed the blow.
    pub fn kill(&self) -> bool {
        self.alive
            .compare_exchange(true, false, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Uniform roll in `1..=DICE_SIDES` from this NPC's own generator
    pub fn roll_dice(&self) -> u32 {
        lock(&self.rng).gen_range(1..=DICE_SIDES)
    }

    /// Random displacement of up to `step` per axis, then clamp into `bounds`.
    /// Dead NPCs stay where they fell.
    pub fn step(&self, bounds: Bounds) {
        if !self.is_alive() {
            return;
        }
        let step = self.params().step;
        let (dx, dy) = {
            let mut rng = lock(&self.rng);
            (rng.gen_range(-step..=step), rng.gen_range(-step..=step))
        };
        let mut position = lock(&self.position);
        *position = bounds.clamp(position.offset(dx, dy));
    }

    pub fn subscribe(&self, observer: Arc<dyn KillObserver>) {
        lock(&self.observers).push(observer);
    }

    pub fn observer_count(&self) -> usize {
        lock(&self.observers).len()
    }

    /// Tell every observer on this NPC that it killed `victim`.
    pub fn notify_kill(self: &Arc<Self>, victim: &NpcHandle) {
        // Clone the list so no lock is held while observers run.
        let observers = lock(&self.observers).clone();
        for observer in observers {
            observer.on_kill(self, victim);
        }
    }

    /// `<species> "<name>" (x, y)` with a `[DEAD]` marker once killed
    pub fn info(&self) -> String {
        let mut info = format!("{} \"{}\" {}", self.species, self.name, self.position());
        if !self.is_alive() {
            info.push_str(" [DEAD]");
        }
        info
    }
}

impl fmt::Debug for Npc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Npc")
            .field("name", &self.name)
            .field("species", &self.species)
            .field("position", &self.position())
            .field("alive", &self.is_alive())
            .finish()
    }
}
