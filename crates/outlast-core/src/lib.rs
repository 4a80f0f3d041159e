//! Outlast Core - Survival Simulation Engine
//!
//! A real-time 2D survival loop: the player gathers wood, stone and metal,
//! crafts and places walls, fights roaming wolves, and slowly starves unless
//! hunger and thirst are kept up.
//!
//! # Architecture
//!
//! - **Components**: plain data records (harvestables, structures, enemies,
//!   items, inventory)
//! - **World**: owns the collections, prunes the dead, answers collision
//!   queries
//! - **Systems**: per-tick logic over world collections (enemy AI)
//! - **Player**: movement, vitals and the attack / build action pipeline
//! - **Engine**: drives a tick and hands out read-only snapshots
//!
//! Everything is single-threaded and advanced synchronously by
//! [`SimulationEngine::update`]; the presentation layer only feeds
//! [`InputSnapshot`]s in and reads state out.
//!
//! # Example
//!
//! ```rust,no_run
//! use outlast_core::prelude::*;
//!
//! # fn main() -> Result<(), outlast_core::config::ConfigError> {
//! let mut engine = SimulationEngine::new(SimConfig::load("tuning.json")?)?;
//! engine.generate();
//!
//! loop {
//!     let input = InputSnapshot::idle(Vec2::new(1600.0, 1500.0)).with_forward();
//!     engine.update(1.0 / 60.0, &input); // 60 FPS
//! }
//! # }
//! ```

pub mod components;
pub mod config;
pub mod engine;
pub mod generation;
pub mod geometry;
pub mod input;
pub mod player;
pub mod systems;
pub mod world;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::components::*;
    pub use crate::config::SimConfig;
    pub use crate::engine::{SimulationEngine, Snapshot, TickReport};
    pub use crate::geometry::{Rect, Vec2};
    pub use crate::input::InputSnapshot;
    pub use crate::player::{ActionOutcome, AttackOutcome, CraftError, PlacementRejection, Player};
    pub use crate::world::{Blocker, Collider, World};
}
