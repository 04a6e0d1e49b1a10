//! Arena controller
//!
//! Owns the shared registry and battle queue, the NPC factory, and the two
//! background loops. Lifecycle: Stopped -> Running (`start`) -> Stopped
//! (`stop` or `reset`). Dropping the arena stops it.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Instant;

use crate::combat::{fight, FightReport};
use crate::core::config::SimulationConfig;
use crate::core::error::Result;
use crate::core::sync::lock;
use crate::core::types::Bounds;
use crate::entity::{NpcHandle, Species};
use crate::factory::{persistence, NpcFactory};
use crate::observer::{Console, ConsoleObserver, FileObserver, KillObserver};
use crate::render;
use crate::simulation::combat_loop::CombatLoop;
use crate::simulation::movement::MovementLoop;
use crate::simulation::pacing::LoopStats;
use crate::simulation::queue::BattleQueue;
use crate::simulation::registry::Registry;

struct Workers {
    movement: JoinHandle<LoopStats>,
    combat: JoinHandle<LoopStats>,
}

/// Loop counters from the most recent run, collected when `stop` joins
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub movement: LoopStats,
    pub combat: LoopStats,
}

pub struct Arena {
    config: SimulationConfig,
    registry: Arc<Registry>,
    queue: Arc<BattleQueue>,
    running: Arc<AtomicBool>,
    workers: Mutex<Option<Workers>>,
    last_run: Mutex<Option<RunStats>>,
    started_at: Mutex<Instant>,
    factory: Mutex<NpcFactory>,
    console: Arc<Console>,
    observers: Vec<Arc<dyn KillObserver>>,
}

impl Arena {
    /// Arena printing to stdout and logging kills to the configured battle log
    pub fn new(config: SimulationConfig) -> Self {
        let console = Arc::new(Console::stdout());
        let observers: Vec<Arc<dyn KillObserver>> = vec![
            Arc::new(ConsoleObserver::new(console.clone())),
            Arc::new(FileObserver::new(config.battle_log_path.clone())),
        ];
        Self::with_parts(config, console, observers)
    }

    /// Arena with an explicit console and observer set
    pub fn with_parts(
        config: SimulationConfig,
        console: Arc<Console>,
        observers: Vec<Arc<dyn KillObserver>>,
    ) -> Self {
        let factory = match config.seed {
            Some(seed) => NpcFactory::with_seed(Bounds::EDITOR, seed),
            None => NpcFactory::new(Bounds::EDITOR),
        };
        Self {
            config,
            registry: Arc::new(Registry::new()),
            queue: Arc::new(BattleQueue::new()),
            running: Arc::new(AtomicBool::new(false)),
            workers: Mutex::new(None),
            last_run: Mutex::new(None),
            started_at: Mutex::new(Instant::now()),
            factory: Mutex::new(factory),
            console,
            observers,
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn console(&self) -> &Arc<Console> {
        &self.console
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Spawn the movement and combat loops. Returns `false` if already running.
    pub fn start(&self) -> Result<bool> {
        let mut workers = lock(&self.workers);
        if workers.is_some() {
            return Ok(false);
        }

        *lock(&self.started_at) = Instant::now();
        self.running.store(true, Ordering::Release);

        let movement = MovementLoop::new(
            self.registry.clone(),
            self.queue.clone(),
            self.running.clone(),
            self.config.move_interval(),
        )
        .spawn();
        let movement = match movement {
            Ok(handle) => handle,
            Err(e) => {
                self.running.store(false, Ordering::Release);
                return Err(e.into());
            }
        };

        let combat = CombatLoop::new(
            self.registry.clone(),
            self.queue.clone(),
            self.running.clone(),
            self.console.clone(),
            self.config.combat_interval(),
        )
        .spawn();
        let combat = match combat {
            Ok(handle) => handle,
            Err(e) => {
                self.running.store(false, Ordering::Release);
                movement.thread().unpark();
                let _ = movement.join();
                return Err(e.into());
            }
        };

        *workers = Some(Workers { movement, combat });
        tracing::info!(npcs = self.registry.len(), "Simulation started");
        Ok(true)
    }

    /// Stop both loops and drain the queue. Returns `false` if not running.
    pub fn stop(&self) -> bool {
        let mut workers = lock(&self.workers);
        let Some(handles) = workers.take() else {
            return false;
        };

        self.running.store(false, Ordering::Release);
        handles.movement.thread().unpark();
        handles.combat.thread().unpark();
        thread::sleep(self.config.stop_grace());

        let mut run = RunStats::default();
        for (name, handle, slot) in [
            ("movement", handles.movement, &mut run.movement),
            ("combat", handles.combat, &mut run.combat),
        ] {
            match handle.join() {
                Ok(stats) => {
                    tracing::debug!(
                        loop_name = name,
                        ticks = stats.ticks,
                        faults = stats.faults,
                        "Loop joined"
                    );
                    *slot = stats;
                }
                Err(_) => tracing::error!(loop_name = name, "Loop thread panicked"),
            }
        }
        *lock(&self.last_run) = Some(run);

        let dropped = self.queue.clear();
        tracing::info!(dropped, alive = self.registry.count_alive(), "Simulation stopped");
        true
    }

    /// Stop, then clear NPCs, pending battles and the naming scope.
    pub fn reset(&self) {
        self.stop();
        self.registry.clear();
        self.queue.clear();
        lock(&self.factory).clear_names();
        *lock(&self.started_at) = Instant::now();
        tracing::info!("Arena reset");
    }

    /// Create and register one NPC with the arena's observers attached.
    pub fn add_npc(&self, species: Species, base_name: &str, x: i32, y: i32) -> Result<NpcHandle> {
        let npc = lock(&self.factory).create(species, base_name, x, y)?;
        self.register(npc.clone());
        tracing::info!(name = npc.name(), %species, x, y, "NPC added");
        Ok(npc)
    }

    /// Reset, switch to simulation bounds and spawn `count` random NPCs.
    pub fn initialize(&self, count: usize) -> usize {
        self.reset();
        let npcs = {
            let mut factory = lock(&self.factory);
            factory.set_bounds(Bounds::SIMULATION);
            factory.spawn_random(count)
        };
        let spawned = npcs.len();
        for npc in &npcs {
            self.attach_observers(npc);
        }
        self.registry.extend(npcs);
        tracing::info!(spawned, "Arena initialized");
        spawned
    }

    /// Synchronous, dice-free battle sweep over a snapshot of the registry.
    pub fn fight(&self, range: f64) -> FightReport {
        let mut npcs = self.registry.snapshot();
        let report = fight(&mut npcs, range);
        self.registry.remove_dead();
        tracing::info!(
            range,
            kills = report.kills.len(),
            survivors = self.registry.len(),
            "Fight finished"
        );
        report
    }

    /// Replace the current NPCs with the contents of a roster file.
    pub fn load_from_file(&self, path: &Path) -> usize {
        self.reset();
        let npcs = persistence::load_file(path, &mut lock(&self.factory));
        let loaded = npcs.len();
        for npc in &npcs {
            self.attach_observers(npc);
        }
        self.registry.extend(npcs);
        tracing::info!(path = %path.display(), loaded, "Roster loaded");
        loaded
    }

    /// Write living NPCs to a roster file; returns how many were written
    pub fn save_to_file(&self, path: &Path) -> Result<usize> {
        let saved = persistence::save_file(path, &self.registry.snapshot())?;
        tracing::info!(path = %path.display(), saved, "Roster saved");
        Ok(saved)
    }

    /// Counters of the last completed run; `None` before the first `stop`
    pub fn last_run_stats(&self) -> Option<RunStats> {
        *lock(&self.last_run)
    }

    pub fn snapshot(&self) -> Vec<NpcHandle> {
        self.registry.snapshot()
    }

    pub fn npc_count(&self) -> usize {
        self.registry.len()
    }

    pub fn alive_count(&self) -> usize {
        self.registry.count_alive()
    }

    pub fn pending_battles(&self) -> usize {
        self.queue.len()
    }

    /// Whole seconds since the last start or reset
    pub fn elapsed_secs(&self) -> u64 {
        lock(&self.started_at).elapsed().as_secs()
    }

    pub fn bounds(&self) -> Bounds {
        lock(&self.factory).bounds()
    }

    pub fn set_bounds(&self, bounds: Bounds) {
        lock(&self.factory).set_bounds(bounds);
    }

    pub fn render_map(&self) -> String {
        render::render_map(&self.snapshot(), self.elapsed_secs())
    }

    pub fn survivors_report(&self) -> String {
        render::survivors_report(&self.snapshot())
    }

    pub fn npc_listing(&self) -> String {
        render::npc_listing(&self.snapshot())
    }

    fn register(&self, npc: NpcHandle) {
        self.attach_observers(&npc);
        self.registry.add(npc);
    }

    fn attach_observers(&self, npc: &NpcHandle) {
        for observer in &self.observers {
            npc.subscribe(observer.clone());
        }
    }
}

impl Drop for Arena {
    fn drop(&mut self) {
        self.stop();
    }
}
