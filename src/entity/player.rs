use glam::Vec2;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::input::MoveInput;
use crate::persistence::lenient;
use crate::physics::{PlayerPhysicsSystem, Rect};
use crate::world::{World, TILE_SIZE};

/// Direction the player sprite faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

/// Persisted player state. Ground contact and facing are recomputed by the
/// next physics step and are not saved.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
}

impl PlayerSnapshot {
    /// Decode from arbitrary JSON; each field falls back independently
    /// (position to `fallback`, velocity to zero)
    pub fn from_value(value: &Value, fallback: Vec2) -> Self {
        Self {
            x: lenient::f32_field(value, "x").unwrap_or(fallback.x),
            y: lenient::f32_field(value, "y").unwrap_or(fallback.y),
            vx: lenient::f32_field(value, "vx").unwrap_or(0.0),
            vy: lenient::f32_field(value, "vy").unwrap_or(0.0),
        }
    }
}

/// The player entity: a kinematic box in world pixel units (y grows downward)
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Top-left corner of the collision box
    pub position: Vec2,
    pub velocity: Vec2,
    pub on_ground: bool,
    pub facing: Facing,
    /// Walk animation phase, advances while moving
    pub walk_cycle: f32,
}

impl Player {
    pub const WIDTH: i32 = (TILE_SIZE * 72) / 100; // pixels
    pub const HEIGHT: i32 = (TILE_SIZE * 162) / 100; // pixels

    pub const SPEED: f32 = 290.0; // px/s
    pub const ACCEL_GROUND: f32 = 11.5; // approach rate per second
    pub const ACCEL_AIR: f32 = 6.5;
    pub const FRICTION: f32 = 9.5; // idle decay per second on ground
    pub const GRAVITY: f32 = 1320.0; // px/s² (downward)
    pub const JUMP_FORCE: f32 = 545.0; // px/s (upward)
    pub const MAX_FALL_SPEED: f32 = 1200.0; // Terminal velocity

    /// Positions are kept within +-POSITION_LIMIT pixels so the collision
    /// box and its tile span stay representable as `i32`
    pub const POSITION_LIMIT: f32 = 1.0e9;

    /// Create a new player at the specified position
    pub fn new(position: Vec2) -> Self {
        Player {
            position,
            velocity: Vec2::ZERO,
            on_ground: false,
            facing: Facing::Right,
            walk_cycle: 0.0,
        }
    }

    /// Collision box snapped to whole pixels
    pub fn rect(&self) -> Rect {
        Rect::new(
            self.position.x.floor() as i32,
            self.position.y.floor() as i32,
            Self::WIDTH,
            Self::HEIGHT,
        )
    }

    /// Centre of the collision box in world pixels
    pub fn center(&self) -> Vec2 {
        self.position + Vec2::new(Self::WIDTH as f32, Self::HEIGHT as f32) * 0.5
    }

    /// Tile containing the centre of the collision box
    pub fn tile_position(&self) -> (i32, i32) {
        let center = self.center();
        let tile = TILE_SIZE as f32;
        (
            (center.x / tile).floor() as i32,
            (center.y / tile).floor() as i32,
        )
    }

    /// Advance physics by `dt` seconds with the held movement keys
    pub fn update(&mut self, world: &mut World, input: MoveInput, dt: f32) {
        PlayerPhysicsSystem::update(self, world, input, dt);
    }

    pub fn to_snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            x: self.position.x,
            y: self.position.y,
            vx: self.velocity.x,
            vy: self.velocity.y,
        }
    }

    /// Restore position and velocity; derived state starts fresh.
    /// Positions beyond `POSITION_LIMIT` are pulled back to it.
    pub fn from_snapshot(snapshot: &PlayerSnapshot) -> Self {
        let limit = Self::POSITION_LIMIT;
        let mut player = Self::new(Vec2::new(
            snapshot.x.clamp(-limit, limit),
            snapshot.y.clamp(-limit, limit),
        ));
        player.velocity = Vec2::new(snapshot.vx, snapshot.vy);
        player
    }
}
