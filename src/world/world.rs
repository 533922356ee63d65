//! World - lazily generated chunks and block access

use ahash::AHashMap;

use super::chunk::{Chunk, CHUNK_SIZE};
use super::generation::WorldGenerator;
use super::snapshot::WorldSnapshot;
use crate::blocks::BlockId;

/// Default number of tile rows
pub const WORLD_HEIGHT: usize = 180;

/// The game world, composed of full-height chunks along the x axis.
///
/// A chunk is generated the first time any of its cells is read or written
/// and is kept for the rest of the session.
#[derive(Debug, Clone)]
pub struct World {
    generator: WorldGenerator,
    chunk_width: usize,
    height: usize,
    /// Generated chunks, keyed by chunk index
    chunks: AHashMap<i32, Chunk>,
}

impl World {
    pub fn new(seed: u64) -> Self {
        Self::with_dimensions(seed, CHUNK_SIZE, WORLD_HEIGHT)
    }

    pub fn with_dimensions(seed: u64, chunk_width: usize, height: usize) -> Self {
        assert!(chunk_width > 0, "chunk width must be positive");
        assert!(height > 0, "world height must be positive");
        Self {
            generator: WorldGenerator::new(seed),
            chunk_width,
            height,
            chunks: AHashMap::new(),
        }
    }

    pub fn seed(&self) -> u64 {
        self.generator.seed
    }

    pub fn chunk_width(&self) -> usize {
        self.chunk_width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Chunk index owning a world column
    #[inline]
    pub fn chunk_index(&self, world_x: i32) -> i32 {
        world_x.div_euclid(self.chunk_width as i32)
    }

    #[inline]
    fn row_in_bounds(&self, world_y: i32) -> bool {
        world_y >= 0 && (world_y as usize) < self.height
    }

    /// Terrain surface row for a column (pure function of seed and x)
    pub fn surface_height(&self, world_x: i32) -> i32 {
        self.generator.surface_height(world_x, self.height)
    }

    pub fn is_generated(&self, index: i32) -> bool {
        self.chunks.contains_key(&index)
    }

    /// Number of chunks generated (or restored) so far
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    pub fn chunk(&self, index: i32) -> Option<&Chunk> {
        self.chunks.get(&index)
    }

    /// Iterate generated chunks in no particular order
    pub fn chunks(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.values()
    }

    /// Generate a chunk if it does not exist yet; returns it either way
    pub fn generate_chunk(&mut self, index: i32) -> &mut Chunk {
        let generator = self.generator;
        let (width, height) = (self.chunk_width, self.height);
        self.chunks.entry(index).or_insert_with(|| {
            let chunk = generator.generate_chunk(index, width, height);
            log::debug!(
                "[GEN] Chunk {} generated - {} non-air cells",
                index,
                chunk.count_non_air()
            );
            chunk
        })
    }

    /// Generate every missing chunk in `min_chunk..=max_chunk`
    pub fn ensure_chunks(&mut self, min_chunk: i32, max_chunk: i32) {
        for index in min_chunk..=max_chunk {
            self.generate_chunk(index);
        }
    }

    /// Get block at world coordinates. Rows outside the world are air.
    pub fn get_block(&mut self, world_x: i32, world_y: i32) -> BlockId {
        if !self.row_in_bounds(world_y) {
            return BlockId::Air;
        }
        let index = self.chunk_index(world_x);
        self.generate_chunk(index).get(world_x, world_y)
    }

    /// Set block at world coordinates. Rows outside the world are ignored.
    pub fn set_block(&mut self, world_x: i32, world_y: i32, block: BlockId) {
        if !self.row_in_bounds(world_y) {
            return;
        }
        let index = self.chunk_index(world_x);
        self.generate_chunk(index).set(world_x, world_y, block);
    }

    /// Non-air blocks inside the inclusive rectangle, generating the covering chunks first
    pub fn iter_visible_blocks(
        &mut self,
        min_x: i32,
        max_x: i32,
        min_y: i32,
        max_y: i32,
    ) -> impl Iterator<Item = (i32, i32, BlockId)> + '_ {
        let min_chunk = self.chunk_index(min_x);
        let max_chunk = self.chunk_index(max_x);
        self.ensure_chunks(min_chunk, max_chunk);

        let chunks = &self.chunks;
        (min_chunk..=max_chunk)
            .filter_map(move |index| chunks.get(&index))
            .flat_map(|chunk| chunk.blocks())
            .filter(move |&(x, y, _)| x >= min_x && x <= max_x && y >= min_y && y <= max_y)
    }

    /// Capture seed, dimensions and every generated chunk's non-air cells
    pub fn to_snapshot(&self) -> WorldSnapshot {
        let mut snapshot = WorldSnapshot {
            seed: self.seed(),
            chunk_size: self.chunk_width,
            height: self.height,
            chunks: Default::default(),
        };
        for (&index, chunk) in &self.chunks {
            let cells = chunk
                .blocks()
                .map(|(x, y, block)| [x as i64, y as i64, block.raw() as i64])
                .collect();
            snapshot.chunks.insert(index, cells);
        }
        snapshot
    }

    /// Rebuild a world from a snapshot.
    ///
    /// Chunks present in the snapshot are restored verbatim (they are never
    /// regenerated). Cells with unknown ids or coordinates outside their chunk
    /// are dropped, and unusable dimensions fall back to the defaults.
    pub fn from_snapshot(snapshot: &WorldSnapshot) -> Self {
        let (chunk_width, height) = snapshot.sanitized_dimensions();
        let mut world = Self::with_dimensions(snapshot.seed, chunk_width, height);
        let mut dropped = 0usize;

        for (&index, cells) in &snapshot.chunks {
            let mut chunk = Chunk::new(index, world.chunk_width, world.height);
            for &[x, y, raw] in cells {
                let block = u8::try_from(raw).ok().and_then(BlockId::from_raw);
                let (Ok(x), Ok(y), Some(block)) = (i32::try_from(x), i32::try_from(y), block) else {
                    dropped += 1;
                    continue;
                };
                if !chunk.set(x, y, block) {
                    dropped += 1;
                }
            }
            world.chunks.insert(index, chunk);
        }

        if dropped > 0 {
            log::warn!("Dropped {} malformed cells while restoring world", dropped);
        }
        log::info!(
            "Restored world seed {} with {} chunks",
            world.seed(),
            world.chunks.len()
        );
        world
    }
}
