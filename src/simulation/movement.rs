//! Movement loop
//!
//! Each tick runs two read-locked passes over the registry: first every
//! living NPC takes a random step and is clamped onto the simulation grid,
//! then an all-pairs scan queues a battle for every attacker that has a
//! defender inside its species kill distance. All moves of a tick finish
//! before its scan starts.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::combat::pairs_within;
use crate::core::types::Bounds;
use crate::simulation::pacing::{guarded, pause, LoopStats};
use crate::simulation::queue::BattleQueue;
use crate::simulation::registry::Registry;

pub struct MovementLoop {
    registry: Arc<Registry>,
    queue: Arc<BattleQueue>,
    running: Arc<AtomicBool>,
    interval: Duration,
    bounds: Bounds,
}

impl MovementLoop {
    pub fn new(
        registry: Arc<Registry>,
        queue: Arc<BattleQueue>,
        running: Arc<AtomicBool>,
        interval: Duration,
    ) -> Self {
        Self {
            registry,
            queue,
            running,
            interval,
            bounds: Bounds::SIMULATION,
        }
    }

    pub fn spawn(self) -> io::Result<JoinHandle<LoopStats>> {
        thread::Builder::new()
            .name("arena-movement".into())
            .spawn(move || self.run())
    }

    /// Main loop. Runs until the running flag is cleared.
    pub fn run(self) -> LoopStats {
        let mut stats = LoopStats::default();
        tracing::debug!("Movement loop started");
        loop {
            if !self.is_running() {
                break;
            }
            if let Some(queued) = guarded("movement", &mut stats, || self.tick()) {
                if queued > 0 {
                    tracing::trace!(queued, "Battles queued");
                }
            }
            if !self.is_running() {
                break;
            }
            pause(&self.running, self.interval);
        }
        tracing::debug!(ticks = stats.ticks, faults = stats.faults, "Movement loop exited");
        stats
    }

    /// One move pass followed by one collision scan. Returns the number of
    /// battle tasks queued.
    pub fn tick(&self) -> usize {
        if !self.move_all() {
            return 0;
        }
        if !self.is_running() {
            return 0;
        }
        self.scan()
    }

    /// Step every living NPC. Returns false if shutdown interrupted the pass.
    pub fn move_all(&self) -> bool {
        self.registry.with_entities(|npcs| {
            for npc in npcs {
                if !self.is_running() {
                    return false;
                }
                if npc.is_alive() {
                    npc.step(self.bounds);
                }
            }
            true
        })
    }

    /// Queue every in-range pairing. Returns the number of tasks pushed.
    pub fn scan(&self) -> usize {
        let pairs = self
            .registry
            .with_entities(|npcs| pairs_within(npcs, |npc| f64::from(npc.params().kill_distance)));
        let count = pairs.len();
        // Registry guard is already released here.
        self.queue.push_all(pairs);
        count
    }

    fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Position;
    use crate::entity::{Npc, Species};

    fn setup(running: bool) -> (Arc<Registry>, Arc<BattleQueue>, MovementLoop) {
        let registry = Arc::new(Registry::new());
        let queue = Arc::new(BattleQueue::new());
        let movement = MovementLoop::new(
            registry.clone(),
            queue.clone(),
            Arc::new(AtomicBool::new(running)),
            Duration::from_millis(1),
        );
        (registry, queue, movement)
    }

    #[test]
    fn test_moves_clamp_into_grid() {
        let (registry, _queue, movement) = setup(true);
        registry.add(Npc::spawn(Species::Dragon, "D", Position::new(450, 10), 1));
        registry.add(Npc::spawn(Species::Bull, "B", Position::new(0, 0), 2));
        for _ in 0..50 {
            assert!(movement.move_all());
            for npc in registry.snapshot() {
                assert!(npc.position().is_within_simulation_bounds());
            }
        }
    }

    #[test]
    fn test_scan_pushes_reciprocal_pairs() {
        let (registry, queue, movement) = setup(true);
        registry.add(Npc::spawn(Species::Bull, "Bull", Position::new(10, 10), 1));
        registry.add(Npc::spawn(Species::Frog, "Frog", Position::new(12, 10), 2));
        assert_eq!(movement.scan(), 2);

        let first = queue.try_pop().unwrap();
        assert_eq!(first.attacker.name(), "Bull");
        assert_eq!(first.defender.name(), "Frog");
        let second = queue.try_pop().unwrap();
        assert_eq!(second.attacker.name(), "Frog");
        assert!(queue.try_pop().is_none());
    }

    #[test]
    fn test_stopped_loop_does_nothing() {
        let (registry, queue, movement) = setup(false);
        let npc = Npc::spawn(Species::Dragon, "D", Position::new(50, 50), 1);
        registry.add(npc.clone());
        registry.add(Npc::spawn(Species::Bull, "B", Position::new(50, 50), 2));

        assert_eq!(movement.tick(), 0);
        assert_eq!(npc.position(), Position::new(50, 50));
        assert!(queue.is_empty());

        let stats = movement.run();
        assert_eq!(stats.ticks, 0);
    }
}
