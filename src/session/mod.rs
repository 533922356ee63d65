//! Game session - the rules layered on top of world, player and inventory
//!
//! The session owns all mutable game state and advances it one fixed step
//! at a time. Rendering and input devices stay outside: callers hand in an
//! [`InputState`] and read state back through the accessors.

mod crafting;
mod day_cycle;
mod mining;

pub use crafting::{Recipe, RecipeItem, RECIPES};
pub use day_cycle::DayCycle;
pub use mining::{MineEvent, MiningState};

use glam::{IVec2, Vec2};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;

use crate::blocks::BlockId;
use crate::config::GameConfig;
use crate::entity::{InputState, Inventory, Player};
use crate::persistence::SaveGame;
use crate::physics::Rect;
use crate::world::{World, TILE_SIZE};

/// New world seeds are drawn from `0..=MAX_NEW_WORLD_SEED`
const MAX_NEW_WORLD_SEED: u64 = 999_999_999;
/// Tile column the player spawns in
const SPAWN_COLUMN: i32 = 0;
/// Rows above the surface the player spawns at
const SPAWN_HEIGHT_ABOVE_SURFACE: i32 = 4;

pub struct GameSession {
    config: GameConfig,
    world: World,
    player: Player,
    inventory: Inventory,
    day: DayCycle,
    mining: MiningState,
    recipes: &'static [Recipe],
    /// Picks seeds for new worlds; terrain has its own deterministic noise
    seed_rng: Xoshiro256StarStar,
    last_secondary: bool,

    /// A menu, inventory or crafting panel is open. Only the day cycle runs.
    pub paused: bool,
}

impl GameSession {
    /// Start a session on a fresh world. A configured seed is used for the
    /// first world and also seeds the generator for later ones.
    pub fn new(config: GameConfig) -> Self {
        let mut seed_rng = match config.seed {
            Some(seed) => Xoshiro256StarStar::seed_from_u64(seed),
            None => Xoshiro256StarStar::seed_from_u64(rand::random()),
        };
        let first_seed = config
            .seed
            .unwrap_or_else(|| seed_rng.random_range(0..=MAX_NEW_WORLD_SEED));

        let world = World::new(first_seed);
        let player = Self::spawn_player(&world);
        let day = DayCycle::new(config.day_length);
        log::info!("New session, world seed {}", first_seed);

        Self {
            config,
            world,
            player,
            inventory: Inventory::starter(),
            day,
            mining: MiningState::new(),
            recipes: RECIPES,
            seed_rng,
            last_secondary: false,
            paused: false,
        }
    }

    /// Replace the world with a freshly seeded one and respawn the player
    /// with the starting inventory
    pub fn new_world(&mut self) {
        let seed = self.seed_rng.random_range(0..=MAX_NEW_WORLD_SEED);
        self.new_world_with_seed(seed);
    }

    pub fn new_world_with_seed(&mut self, seed: u64) {
        self.world = World::new(seed);
        self.player = Self::spawn_player(&self.world);
        self.inventory = Inventory::starter();
        self.mining.reset();
        self.last_secondary = false;
        log::info!("New world, seed {}", seed);
    }

    fn spawn_player(world: &World) -> Player {
        let surface = world.surface_height(SPAWN_COLUMN);
        Player::new(Vec2::new(
            (SPAWN_COLUMN * TILE_SIZE) as f32,
            ((surface - SPAWN_HEIGHT_ABOVE_SURFACE) * TILE_SIZE) as f32,
        ))
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn inventory_mut(&mut self) -> &mut Inventory {
        &mut self.inventory
    }

    pub fn day(&self) -> &DayCycle {
        &self.day
    }

    pub fn mining(&self) -> &MiningState {
        &self.mining
    }

    pub fn recipes(&self) -> &'static [Recipe] {
        self.recipes
    }

    /// Tile containing the centre of the player's box
    pub fn player_block_pos(&self) -> IVec2 {
        let (x, y) = self.player.tile_position();
        IVec2::new(x, y)
    }

    /// Whether a tile is within reach of the player on both axes
    pub fn can_reach(&self, world_x: i32, world_y: i32) -> bool {
        let origin = self.player_block_pos();
        let reach = self.config.reach as i64;
        (world_x as i64 - origin.x as i64).abs() <= reach
            && (world_y as i64 - origin.y as i64).abs() <= reach
    }

    /// Advance the session by `dt` seconds. Returns the block broken this
    /// step, if any.
    pub fn update(&mut self, dt: f32, input: &InputState) -> Option<MineEvent> {
        self.day.advance(dt);
        if self.paused {
            return None;
        }

        self.player.update(&mut self.world, input.movement, dt);
        let event = self.update_mining(dt, input);
        self.update_placement(input);
        event
    }

    fn update_mining(&mut self, dt: f32, input: &InputState) -> Option<MineEvent> {
        let target = match input.target_tile {
            Some(target) if input.primary_pressed => target,
            _ => {
                self.mining.reset();
                return None;
            }
        };
        if !self.can_reach(target.x, target.y) {
            self.mining.reset();
            return None;
        }

        let block = self.world.get_block(target.x, target.y);
        let def = block.def();
        if block.is_air() || def.unbreakable {
            self.mining.reset();
            return None;
        }
        if !self.mining.advance(target, def.break_time, dt) {
            return None;
        }

        self.world.set_block(target.x, target.y, BlockId::Air);
        let drop = def.drop_item();
        let stored = self.inventory.add_item(drop, 1);
        log::debug!(
            "[MINE] Mined {} at ({}, {}){}",
            def.name,
            target.x,
            target.y,
            if stored { "" } else { ", inventory full" }
        );
        Some(MineEvent {
            position: target,
            block,
            drop,
            stored,
        })
    }

    /// Placement fires on the press edge of the secondary button only
    fn update_placement(&mut self, input: &InputState) {
        let pressed = input.secondary_pressed && !self.last_secondary;
        self.last_secondary = input.secondary_pressed;
        if !pressed {
            return;
        }
        if let Some(target) = input.target_tile {
            self.place_block(target.x, target.y);
        }
    }

    /// Place one of the selected hotbar block at a tile. Fails if the tile
    /// is out of reach, occupied, or overlaps the player.
    pub fn place_block(&mut self, world_x: i32, world_y: i32) -> bool {
        if !self.can_reach(world_x, world_y) || !self.world.get_block(world_x, world_y).is_air() {
            return false;
        }
        if self.inventory.selected_block().is_none() {
            return false;
        }
        if Rect::tile(world_x, world_y).intersects(&self.player.rect()) {
            return false;
        }
        let Some(block) = self.inventory.consume_selected(1) else {
            return false;
        };
        self.world.set_block(world_x, world_y, block);
        log::debug!("[PLACE] {} at ({}, {})", block, world_x, world_y);
        true
    }

    /// Craft the recipe at `index`. Unknown indices and missing inputs
    /// return false without touching the inventory.
    pub fn craft(&mut self, index: usize) -> bool {
        match self.recipes.get(index) {
            Some(recipe) => recipe.craft(&mut self.inventory),
            None => false,
        }
    }

    pub fn select_hotbar(&mut self, index: usize) {
        self.inventory.select_hotbar(index);
    }

    pub fn scroll_hotbar(&mut self, delta: i32) {
        self.inventory.scroll_hotbar(delta);
    }

    /// Capture the persisted state
    pub fn to_save(&self) -> SaveGame {
        SaveGame {
            world: self.world.to_snapshot(),
            player: self.player.to_snapshot(),
            inventory: self.inventory.to_snapshot(),
            day_timer: self.day.timer(),
        }
    }

    /// Replace world, player, inventory and time of day from a save
    pub fn apply_save(&mut self, save: &SaveGame) {
        self.world = World::from_snapshot(&save.world);
        self.player = Player::from_snapshot(&save.player);
        self.inventory = Inventory::from_snapshot(&save.inventory);
        self.day.set_timer(save.day_timer);
        self.mining.reset();
        self.last_secondary = false;
        log::info!(
            "Restored session, world seed {}, {} chunks",
            self.world.seed(),
            self.world.chunk_count()
        );
    }
}
