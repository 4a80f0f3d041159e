//! Component definitions for the simulation.
//!
//! Components are plain data records. Behavior that spans several of them
//! lives in systems, the world and the player.

mod enemy;
mod harvestable;
mod item;
mod resources;
mod structure;

pub use enemy::*;
pub use harvestable::*;
pub use item::*;
pub use resources::*;
pub use structure::*;
