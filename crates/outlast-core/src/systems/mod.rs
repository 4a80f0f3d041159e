//! Systems - logic that runs over world collections each tick

mod enemy_ai;

pub use enemy_ai::*;
