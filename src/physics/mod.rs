//! Tile collision and player kinematics

mod collision;
mod player_physics;

pub use collision::{solid_tiles_overlapping, Rect};
pub use player_physics::PlayerPhysicsSystem;
