//! Terrain generation from layered sinusoidal noise
//!
//! Every noise function is a fixed combination of phase-shifted sine/cosine
//! terms of the world seed, so a chunk is a pure function of `(seed, index)`.
//! Changing any constant here changes the terrain of existing saves.

use crate::blocks::BlockId;
use crate::world::chunk::Chunk;

/// Row the terrain surface oscillates around
pub const BASE_SURFACE: i32 = 72;

/// Surface never rises above this row
const MIN_SURFACE_ROW: i32 = 22;
/// Surface always leaves at least this many rows below it
const SURFACE_BOTTOM_MARGIN: i32 = 24;

/// Rows below the surface that use the soft surface material
const SOFT_LAYER_DEPTH: i32 = 2;
/// Caves and ore only appear deeper than this below the surface
const CAVE_MIN_DEPTH: i32 = 5;
const CAVE_THRESHOLD: f64 = 0.75;
const ORE_THRESHOLD: f64 = 0.82;
/// Ore only appears this many rows below `BASE_SURFACE`
const ORE_MIN_DEPTH: i32 = 5;

const TREE_SALT: f64 = 999.0;
const TREE_THRESHOLD: f64 = 0.84;
/// The next column must be below this for a tree to spawn (no adjacent trunks)
const TREE_NEIGHBOR_THRESHOLD: f64 = 0.6;
const TREE_MIN_TRUNK: i32 = 3;
/// Trunk cells must stay below this row
const TRUNK_MIN_ROW: i32 = 2;
/// Crown cells must stay below this row
const CROWN_MIN_ROW: i32 = 1;

/// Deterministic chunk generator for one world seed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldGenerator {
    pub seed: u64,
}

impl WorldGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    #[inline]
    fn seed_f(&self) -> f64 {
        self.seed as f64
    }

    /// Band-limited 1D noise in [0, 1]
    fn noise(&self, x: f64, scale: f64, salt: f64) -> f64 {
        let seed = self.seed_f();
        let v = x / scale;
        let a = (v * 1.41 + (seed + salt) * 0.0013).sin();
        let b = (v * 0.49 + (seed + salt * 2.0) * 0.00071).sin();
        let c = (v * 2.21 + (seed - salt) * 0.00191).cos();
        (a * 0.6 + b * 0.3 + c * 0.1 + 1.0) * 0.5
    }

    fn cave_noise(&self, world_x: i32, world_y: i32) -> f64 {
        let seed = self.seed_f();
        let (x, y) = (world_x as f64, world_y as f64);
        let a = (x * 0.081 + seed * 0.0041).sin();
        let b = (y * 0.095 - seed * 0.0037).cos();
        let c = ((x + y) * 0.061 + seed * 0.0027).sin();
        (a + b + c + 3.0) / 6.0
    }

    fn ore_noise(&self, world_x: i32, world_y: i32) -> f64 {
        let seed = self.seed_f();
        let (x, y) = (world_x as f64, world_y as f64);
        let a = (x * 0.19 + seed * 0.0053).sin();
        let b = (y * 0.17 - seed * 0.0044).cos();
        let c = ((x - y) * 0.083 + seed * 0.0019).cos();
        (a + b + c + 3.0) / 6.0
    }

    /// Surface row for a column (smaller is higher up)
    pub fn surface_height(&self, world_x: i32, world_height: usize) -> i32 {
        let x = world_x as f64;
        let macro_band = self.noise(x, 130.0, 110.0);
        let medium = self.noise(x, 48.0, 321.0);
        let detail = self.noise(x, 18.0, 690.0);
        let offset = (macro_band - 0.5) * 26.0 + (medium - 0.5) * 14.0 + (detail - 0.5) * 7.0;
        let height = BASE_SURFACE + offset as i32;
        height
            .min(world_height as i32 - SURFACE_BOTTOM_MARGIN)
            .max(MIN_SURFACE_ROW)
    }

    /// Material for a cell at or below the surface
    fn material_at(&self, world_x: i32, world_y: i32, surface: i32, floor_row: i32) -> BlockId {
        if world_y == floor_row {
            return BlockId::Bedrock;
        }

        let mut block = if world_y <= surface + SOFT_LAYER_DEPTH {
            BlockId::Dirt
        } else {
            BlockId::Stone
        };

        if world_y > surface + CAVE_MIN_DEPTH {
            if self.cave_noise(world_x, world_y) > CAVE_THRESHOLD {
                return BlockId::Air;
            }
            if self.ore_noise(world_x, world_y) > ORE_THRESHOLD
                && world_y > BASE_SURFACE + ORE_MIN_DEPTH
            {
                block = BlockId::Ore;
            }
        }

        block
    }

    /// Generate a complete chunk for the given chunk index
    pub fn generate_chunk(&self, index: i32, width: usize, height: usize) -> Chunk {
        let mut chunk = Chunk::new(index, width, height);
        let floor_row = height as i32 - 1;

        let columns: Vec<(i32, i32)> = chunk
            .columns()
            .map(|wx| (wx, self.surface_height(wx, height)))
            .collect();

        for &(wx, surface) in &columns {
            for wy in surface.max(0)..height as i32 {
                let block = self.material_at(wx, wy, surface, floor_row);
                chunk.set(wx, wy, block);
            }
        }

        for &(wx, surface) in &columns {
            self.grow_tree(&mut chunk, wx, surface);
        }

        chunk
    }

    /// Plant a tree on this column if the tree noise allows it
    fn grow_tree(&self, chunk: &mut Chunk, world_x: i32, surface: i32) {
        let x = world_x as f64;
        if self.noise(x, 13.0, TREE_SALT) <= TREE_THRESHOLD
            || self.noise(x + 1.0, 13.0, TREE_SALT) >= TREE_NEIGHBOR_THRESHOLD
        {
            return;
        }
        let trunk_height = self.trunk_height(world_x);
        plant_tree(chunk, world_x, surface, trunk_height);
    }

    /// Trunk length in tiles for a tree rooted on this column
    fn trunk_height(&self, world_x: i32) -> i32 {
        TREE_MIN_TRUNK + (self.noise(world_x as f64 * 2.0, 13.0, TREE_SALT) * 3.0) as i32
    }
}

/// Write a trunk above `surface` topped by a diamond crown, all wood.
/// Cells near the world top and crown cells outside the chunk's own columns
/// are discarded.
fn plant_tree(chunk: &mut Chunk, world_x: i32, surface: i32, trunk_height: i32) {
    for i in 0..trunk_height {
        let wy = surface - 1 - i;
        if wy > TRUNK_MIN_ROW {
            chunk.set(world_x, wy, BlockId::Wood);
        }
    }

    let crown_y = surface - 1 - trunk_height;
    for ox in -2..=2i32 {
        for oy in -2..=1i32 {
            if ox.abs() + oy.abs() > 3 {
                continue;
            }
            let ly = crown_y + oy;
            if let Some(lx) = world_x.checked_add(ox) {
                if ly > CROWN_MIN_ROW {
                    chunk.set(lx, ly, BlockId::Wood);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::chunk::CHUNK_SIZE;

    const HEIGHT: usize = 180;

    #[test]
    fn test_deterministic_generation() {
        let gen1 = WorldGenerator::new(42);
        let gen2 = WorldGenerator::new(42);

        for index in [-3, 0, 7] {
            let chunk1 = gen1.generate_chunk(index, CHUNK_SIZE, HEIGHT);
            let chunk2 = gen2.generate_chunk(index, CHUNK_SIZE, HEIGHT);
            assert_eq!(chunk1, chunk2, "Mismatch in chunk {}", index);
        }
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = WorldGenerator::new(1).generate_chunk(0, CHUNK_SIZE, HEIGHT);
        let b = WorldGenerator::new(987_654_321).generate_chunk(0, CHUNK_SIZE, HEIGHT);
        assert_ne!(a, b);
    }

    #[test]
    fn test_noise_is_normalized() {
        let gen = WorldGenerator::new(123_456);
        for x in -500..500 {
            let n = gen.noise(x as f64, 48.0, 321.0);
            assert!((0.0..=1.0).contains(&n));
            let c = gen.cave_noise(x, x / 3);
            assert!((0.0..=1.0).contains(&c));
            let o = gen.ore_noise(x, -x);
            assert!((0.0..=1.0).contains(&o));
        }
    }

    #[test]
    fn test_surface_height_is_clamped() {
        let gen = WorldGenerator::new(5);
        for x in -2000..2000 {
            let surface = gen.surface_height(x, HEIGHT);
            assert!((MIN_SURFACE_ROW..=HEIGHT as i32 - SURFACE_BOTTOM_MARGIN).contains(&surface));
        }
    }

    #[test]
    fn test_bedrock_floor() {
        let gen = WorldGenerator::new(42);
        let chunk = gen.generate_chunk(3, CHUNK_SIZE, HEIGHT);
        for wx in chunk.columns() {
            assert_eq!(chunk.get(wx, HEIGHT as i32 - 1), BlockId::Bedrock);
        }
    }

    #[test]
    fn test_soft_surface_layer() {
        let gen = WorldGenerator::new(99);
        let chunk = gen.generate_chunk(0, CHUNK_SIZE, HEIGHT);
        for wx in 0..CHUNK_SIZE as i32 {
            let surface = gen.surface_height(wx, HEIGHT);
            for wy in surface..=surface + SOFT_LAYER_DEPTH {
                let block = chunk.get(wx, wy);
                // trees may overwrite the surface only above it
                assert_eq!(block, BlockId::Dirt, "column {} row {}", wx, wy);
            }
            // nothing but tree wood above the surface
            for wy in 0..surface {
                let block = chunk.get(wx, wy);
                assert!(block == BlockId::Air || block == BlockId::Wood);
            }
        }
    }

    #[test]
    fn test_caves_and_ore_only_deep() {
        let gen = WorldGenerator::new(2024);
        for index in -4..4 {
            let chunk = gen.generate_chunk(index, CHUNK_SIZE, HEIGHT);
            for (wx, wy, block) in chunk.blocks() {
                if block == BlockId::Ore {
                    assert!(wy > BASE_SURFACE + ORE_MIN_DEPTH);
                    assert!(wy > gen.surface_height(wx, HEIGHT) + CAVE_MIN_DEPTH);
                }
            }
        }
    }

    #[test]
    fn test_generates_caves_somewhere() {
        let gen = WorldGenerator::new(7);
        let mut carved = 0;
        for index in 0..16 {
            let chunk = gen.generate_chunk(index, CHUNK_SIZE, HEIGHT);
            for wx in chunk.columns() {
                let surface = gen.surface_height(wx, HEIGHT);
                for wy in surface..HEIGHT as i32 {
                    if chunk.get(wx, wy).is_air() {
                        carved += 1;
                    }
                }
            }
        }
        assert!(carved > 0, "expected at least one cave cell");
    }

    #[test]
    fn test_tree_shape() {
        let mut chunk = Chunk::new(0, CHUNK_SIZE, HEIGHT);
        plant_tree(&mut chunk, 8, 30, 4);

        // trunk fills the four rows above the surface
        for wy in 26..30 {
            assert_eq!(chunk.get(8, wy), BlockId::Wood);
        }
        assert_eq!(chunk.get(8, 30), BlockId::Air);

        // diamond crown centred on row 25: 3 + 5 + 5 + 5 cells
        let crown: Vec<_> = chunk.blocks().filter(|&(_, y, _)| y <= 26).collect();
        assert_eq!(crown.len(), 18);
        for (x, y, _) in crown {
            assert!((x - 8).abs() <= 2 && (23..=26).contains(&y));
            assert!((x - 8).abs() + (y - 25).abs() <= 3);
        }
        assert_eq!(chunk.get(6, 23), BlockId::Air);
        assert_eq!(chunk.get(7, 23), BlockId::Wood);
        assert_eq!(chunk.count_non_air(), 4 + 18 - 1);
    }

    #[test]
    fn test_tree_near_world_top_is_cut() {
        let mut chunk = Chunk::new(0, CHUNK_SIZE, HEIGHT);
        plant_tree(&mut chunk, 8, 6, 3);

        // trunk rows 5, 4 and 3 stay below TRUNK_MIN_ROW
        for wy in 3..6 {
            assert_eq!(chunk.get(8, wy), BlockId::Wood);
        }
        // crown centred on row 2 keeps rows 2 and 3 only
        assert!(chunk.blocks().all(|(_, y, _)| y > CROWN_MIN_ROW));
        assert_eq!(chunk.get(8, 2), BlockId::Wood);
        assert_eq!(chunk.get(8, 1), BlockId::Air);

        let mut low = Chunk::new(0, CHUNK_SIZE, HEIGHT);
        plant_tree(&mut low, 8, 4, 4);
        assert_eq!(low.blocks().collect::<Vec<_>>(), vec![(8, 3, BlockId::Wood)]);
    }

    #[test]
    fn test_crown_outside_chunk_is_discarded() {
        let mut chunk = Chunk::new(1, CHUNK_SIZE, HEIGHT);
        plant_tree(&mut chunk, 16, 30, 3);
        assert!(chunk.blocks().all(|(x, _, _)| x >= 16));
        assert_eq!(chunk.get(16, 26), BlockId::Wood);
    }

    #[test]
    fn test_trunk_height_range() {
        let gen = WorldGenerator::new(31);
        for x in -300..300 {
            let h = gen.trunk_height(x);
            assert!((TREE_MIN_TRUNK..=TREE_MIN_TRUNK + 3).contains(&h));
        }
    }

    #[test]
    fn test_generation_at_column_extremes() {
        let gen = WorldGenerator::new(1);
        let last = gen.generate_chunk(i32::MAX / CHUNK_SIZE as i32, CHUNK_SIZE, HEIGHT);
        assert_eq!(last.get(i32::MAX, HEIGHT as i32 - 1), BlockId::Bedrock);

        let first = gen.generate_chunk(i32::MIN / CHUNK_SIZE as i32, CHUNK_SIZE, HEIGHT);
        assert_eq!(first.get(i32::MIN, HEIGHT as i32 - 1), BlockId::Bedrock);
    }
}
