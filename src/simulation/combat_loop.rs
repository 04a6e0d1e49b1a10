//! Combat loop
//!
//! Drains at most one battle task per tick, resolves it with a dice duel,
//! then sweeps dead NPCs out of the registry whether or not a task ran.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::combat::{resolve_duel, DuelOutcome};
use crate::observer::Console;
use crate::simulation::pacing::{guarded, pause, LoopStats};
use crate::simulation::queue::BattleQueue;
use crate::simulation::registry::Registry;

pub struct CombatLoop {
    registry: Arc<Registry>,
    queue: Arc<BattleQueue>,
    running: Arc<AtomicBool>,
    console: Arc<Console>,
    interval: Duration,
}

impl CombatLoop {
    pub fn new(
        registry: Arc<Registry>,
        queue: Arc<BattleQueue>,
        running: Arc<AtomicBool>,
        console: Arc<Console>,
        interval: Duration,
    ) -> Self {
        Self {
            registry,
            queue,
            running,
            console,
            interval,
        }
    }

    pub fn spawn(self) -> io::Result<JoinHandle<LoopStats>> {
        thread::Builder::new()
            .name("arena-combat".into())
            .spawn(move || self.run())
    }

    pub fn run(self) -> LoopStats {
        let mut stats = LoopStats::default();
        tracing::debug!("Combat loop started");
        loop {
            if !self.running.load(Ordering::Acquire) {
                break;
            }
            guarded("combat", &mut stats, || self.tick());
            if !self.running.load(Ordering::Acquire) {
                break;
            }
            pause(&self.running, self.interval);
        }
        tracing::debug!(ticks = stats.ticks, faults = stats.faults, "Combat loop exited");
        stats
    }

    /// Resolve the oldest pending task, if any, then run the cleanup sweep.
    pub fn tick(&self) -> Option<DuelOutcome> {
        let outcome = self.queue.try_pop().map(|task| {
            let outcome = resolve_duel(&task.attacker, &task.defender);
            let (attacker, defender) = (task.attacker.name(), task.defender.name());
            match outcome {
                DuelOutcome::Kill { attack, defense } => {
                    tracing::debug!(attacker, defender, attack, defense, "Kill");
                    self.console.line(&format!(
                        "BATTLE: {attacker} killed {defender} ({attack} vs {defense})"
                    ));
                }
                DuelOutcome::Miss { attack, defense } => {
                    tracing::debug!(attacker, defender, attack, defense, "Miss");
                    self.console.line(&format!(
                        "BATTLE: {attacker} missed {defender} ({attack} vs {defense})"
                    ));
                }
                DuelOutcome::Stale | DuelOutcome::Ineligible => {}
            }
            outcome
        });

        let removed = self.registry.remove_dead();
        if removed > 0 {
            tracing::trace!(removed, "Swept dead NPCs");
        }
        outcome
    }
}
