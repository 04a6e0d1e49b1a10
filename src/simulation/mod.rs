//! Real-time simulation: shared state, background loops and the controller

pub mod combat_loop;
pub mod controller;
pub mod movement;
pub mod pacing;
pub mod queue;
pub mod registry;

pub use combat_loop::CombatLoop;
pub use controller::{Arena, RunStats};
pub use movement::MovementLoop;
pub use pacing::LoopStats;
pub use queue::{BattleQueue, BattleTask};
pub use registry::Registry;
