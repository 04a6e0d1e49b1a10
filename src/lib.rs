//! NPC Arena - concurrent creature battle simulation

pub mod combat;
pub mod core;
pub mod entity;
pub mod factory;
pub mod observer;
pub mod render;
pub mod simulation;
