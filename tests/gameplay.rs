//! Cross-module scenarios: terrain, physics, mining and crafting together

use gascraft2d::blocks::BlockId;
use gascraft2d::config::GameConfig;
use gascraft2d::entity::{InputState, MoveInput, Player};
use gascraft2d::physics::solid_tiles_overlapping;
use gascraft2d::session::GameSession;
use gascraft2d::world::{World, CHUNK_SIZE, TILE_SIZE};
use glam::{IVec2, Vec2};

const DT: f32 = 1.0 / 60.0;

fn session(seed: u64) -> GameSession {
    GameSession::new(GameConfig {
        seed: Some(seed),
        ..GameConfig::default()
    })
}

#[test]
fn test_player_settles_on_generated_terrain() {
    let mut s = session(2024);
    let input = InputState::default();

    let mut grounded = false;
    for _ in 0..300 {
        s.update(DT, &input);
        grounded |= s.player().on_ground;
    }

    let player = s.player();
    assert!(grounded);
    assert!(player.position.x.is_finite() && player.position.y.is_finite());
    // resting within the world rows
    let height = s.world().height() as i32 * TILE_SIZE;
    assert!(player.rect().bottom() <= height);
}

#[test]
fn test_walking_keeps_player_out_of_solids() {
    let floor_row = 20;
    let mut world = World::new(31);
    for x in -2..80 {
        for y in 0..floor_row {
            world.set_block(x, y, BlockId::Air);
        }
        world.set_block(x, floor_row, BlockId::Stone);
    }
    // a one-tile step to hop over
    world.set_block(12, floor_row - 1, BlockId::Stone);

    let mut player = Player::new(Vec2::new(0.0, 0.0));
    for _ in 0..300 {
        player.update(&mut world, MoveInput::RIGHT | MoveInput::JUMP, DT);
        let rect = player.rect();
        let overlaps = solid_tiles_overlapping(&mut world, &rect)
            .iter()
            .any(|tile| tile.intersects(&rect));
        assert!(!overlaps, "player box overlaps terrain at {:?}", rect);
    }

    assert!(player.position.x > (12 * TILE_SIZE) as f32);
    assert!(player.rect().bottom() <= floor_row * TILE_SIZE);
}

#[test]
fn test_mine_dirt_then_craft_it_into_stone() {
    let mut s = session(5);
    let stone_before = s.inventory().count_item(BlockId::Stone);

    // mine four dirt blocks placed next to the player
    for i in 0..4 {
        let target = s.player_block_pos() + IVec2::new(2, -1 + i % 3);
        s.world_mut().set_block(target.x, target.y, BlockId::Dirt);
        let input = InputState {
            target_tile: Some(target),
            primary_pressed: true,
            ..InputState::default()
        };
        let mut broke = false;
        for _ in 0..60 {
            s.player_mut().velocity = Vec2::ZERO;
            if s.update(DT, &input).is_some() {
                broke = true;
                break;
            }
        }
        assert!(broke, "dirt block {} did not break", i);
        s.update(DT, &InputState::default());
    }
    assert_eq!(s.inventory().count_item(BlockId::Dirt), 52);

    assert!(s.craft(0));
    assert_eq!(s.inventory().count_item(BlockId::Dirt), 48);
    assert_eq!(s.inventory().count_item(BlockId::Stone), stone_before + 1);
}

#[test]
fn test_generation_is_deterministic_across_worlds() {
    let mut a = World::new(77);
    let mut b = World::new(77);
    let x = CHUNK_SIZE as i32 * 3 + 5;
    a.get_block(x, 0);
    b.get_block(x, 0);

    let index = a.chunk_index(x);
    assert_eq!(a.chunk(index), b.chunk(index));
}

#[test]
fn test_visible_blocks_respect_bounds() {
    let mut world = World::new(11);
    world.set_block(1, 30, BlockId::Ore);
    world.set_block(200, 30, BlockId::Ore);

    let blocks: Vec<_> = world.iter_visible_blocks(0, 10, 0, 179).collect();
    assert!(blocks.contains(&(1, 30, BlockId::Ore)));
    assert!(!blocks.iter().any(|&(x, _, _)| x == 200));
    assert!(blocks.iter().all(|&(x, y, _)| (0..=10).contains(&x) && (0..=179).contains(&y)));
}
