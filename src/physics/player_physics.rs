//! Player physics system - movement, gravity, jumping, collision

use super::collision::{solid_tiles_overlapping, Rect};
use crate::entity::input::MoveInput;
use crate::entity::player::{Facing, Player};
use crate::world::World;

/// Player physics system - axis-separated kinematics against solid tiles
pub struct PlayerPhysicsSystem;

impl PlayerPhysicsSystem {
    /// Horizontal speed below which a grounded, idle player stops outright
    const STOP_THRESHOLD: f32 = 4.0;
    /// Walk animation cycles per second at full input
    const WALK_CYCLE_RATE: f32 = 9.0;

    /// Advance the player by one step of `dt` seconds.
    ///
    /// Movement is resolved per axis: X first, then Y. This is not a swept
    /// test, so very large `dt` can tunnel through a single tile.
    pub fn update(player: &mut Player, world: &mut World, input: MoveInput, dt: f32) {
        // 1. Horizontal intent
        let move_input = input.horizontal();
        let target_vx = move_input * Player::SPEED;
        let accel = if player.on_ground {
            Player::ACCEL_GROUND
        } else {
            Player::ACCEL_AIR
        };
        player.velocity.x += (target_vx - player.velocity.x) * (accel * dt).min(1.0);

        // 2. Ground friction when idle
        if move_input == 0.0 && player.on_ground {
            player.velocity.x *= (1.0 - Player::FRICTION * dt).max(0.0);
            if player.velocity.x.abs() < Self::STOP_THRESHOLD {
                player.velocity.x = 0.0;
            }
        }

        // 3. Jump
        if input.jump() && player.on_ground {
            player.velocity.y = -Player::JUMP_FORCE;
            player.on_ground = false;
            log::trace!("Player jumped");
        }

        // 4. Gravity, clamped to terminal velocity
        player.velocity.y = (player.velocity.y + Player::GRAVITY * dt).min(Player::MAX_FALL_SPEED);

        // 5. X axis
        player.position.x = Self::clamp_position(player.position.x + player.velocity.x * dt);
        Self::resolve_x(player, world);

        // 6. Y axis
        player.position.y = Self::clamp_position(player.position.y + player.velocity.y * dt);
        Self::resolve_y(player, world);

        // 7. Facing and walk animation
        if move_input != 0.0 {
            player.facing = if move_input > 0.0 {
                Facing::Right
            } else {
                Facing::Left
            };
            player.walk_cycle += dt * Self::WALK_CYCLE_RATE * move_input.abs();
        }

        log::trace!(
            "Player: pos {:?} vel {:?} on_ground {}",
            player.position,
            player.velocity,
            player.on_ground
        );
    }

    #[inline]
    fn clamp_position(value: f32) -> f32 {
        value.clamp(-Player::POSITION_LIMIT, Player::POSITION_LIMIT)
    }

    fn resolve_x(player: &mut Player, world: &mut World) {
        let mut rect = player.rect();
        for tile in solid_tiles_overlapping(world, &rect) {
            if !rect.intersects(&tile) {
                continue;
            }
            if player.velocity.x > 0.0 {
                rect.set_right(tile.left());
            } else if player.velocity.x < 0.0 {
                rect.x = tile.right();
            }
            player.position.x = rect.x as f32;
            player.velocity.x = 0.0;
        }
    }

    fn resolve_y(player: &mut Player, world: &mut World) {
        let mut rect = player.rect();
        player.on_ground = false;
        for tile in solid_tiles_overlapping(world, &rect) {
            if !rect.intersects(&tile) {
                continue;
            }
            if player.velocity.y > 0.0 {
                rect.set_bottom(tile.top());
                player.on_ground = true;
            } else if player.velocity.y < 0.0 {
                rect.y = tile.bottom();
            }
            player.position.y = rect.y as f32;
            player.velocity.y = 0.0;
        }
    }
}
