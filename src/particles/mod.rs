mod particle_store;
mod star_registry;

pub use particle_store::*;
pub use star_registry::*;
