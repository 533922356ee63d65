//! World management - chunks, generation, snapshots

mod chunk;
pub mod generation;
mod snapshot;
#[allow(clippy::module_inception)]
mod world;

pub use chunk::{Chunk, CHUNK_SIZE};
pub use generation::{WorldGenerator, BASE_SURFACE};
pub use snapshot::{WorldSnapshot, MAX_CHUNK_WIDTH, MAX_WORLD_HEIGHT};
pub use world::{World, WORLD_HEIGHT};

/// Size of one tile in world pixel units
pub const TILE_SIZE: i32 = 32;
