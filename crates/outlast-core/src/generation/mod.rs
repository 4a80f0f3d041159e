//! Generation - procedural population of the world

mod terrain;
mod wildlife;

pub use terrain::*;
pub use wildlife::*;
