//! # Gascraft2D - 2D side-view voxel sandbox
//!
//! A chunked, procedurally generated tile world with mining, placement,
//! crafting and a day/night cycle. This crate holds the game core; a
//! renderer reads state from [`session::GameSession`] and feeds it input.

pub mod blocks;
pub mod config;
pub mod entity;
pub mod persistence;
pub mod physics;
pub mod session;
pub mod world;

/// Common imports for internal use
pub mod prelude {
    pub use crate::blocks::{BlockDef, BlockId};
    pub use crate::entity::{InputState, Inventory, MoveInput, Player};
    pub use crate::session::GameSession;
    pub use crate::world::{Chunk, World, CHUNK_SIZE, TILE_SIZE};
    pub use glam::{IVec2, Vec2};
}
