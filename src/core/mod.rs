pub mod config;
pub mod error;
pub mod sync;
pub mod types;
