//! Chunk - one vertical slice of the world, `width` columns by `height` rows

use crate::blocks::BlockId;

/// Default number of tile columns per chunk
pub const CHUNK_SIZE: usize = 16;

/// A full-height column block of tiles.
///
/// Cells are stored row-major in a flat array (`index = y * width + local_x`);
/// air cells are simply `BlockId::Air`.
#[derive(Clone, Debug, PartialEq)]
pub struct Chunk {
    /// Chunk index (in chunk space, not tile space)
    pub index: i32,
    width: usize,
    height: usize,
    cells: Vec<BlockId>,
}

impl Chunk {
    pub fn new(index: i32, width: usize, height: usize) -> Self {
        debug_assert!(width > 0 && height > 0);
        Self {
            index,
            width,
            height,
            cells: vec![BlockId::Air; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// World x of the first column in this chunk. Wider than `i32` because
    /// chunks at the ends of the index range extend past the world columns.
    #[inline]
    pub fn origin_x(&self) -> i64 {
        self.index as i64 * self.width as i64
    }

    /// World columns covered by this chunk that are addressable as `i32`
    pub fn columns(&self) -> impl Iterator<Item = i32> {
        let origin_x = self.origin_x();
        (0..self.width as i64).filter_map(move |i| i32::try_from(origin_x + i).ok())
    }

    /// Convert world coordinates to a cell offset, if they fall inside this chunk
    #[inline]
    fn offset(&self, world_x: i32, world_y: i32) -> Option<usize> {
        let local_x = world_x as i64 - self.origin_x();
        if local_x < 0 || local_x >= self.width as i64 {
            return None;
        }
        if world_y < 0 || world_y >= self.height as i32 {
            return None;
        }
        Some(world_y as usize * self.width + local_x as usize)
    }

    /// Whether the world coordinate lies inside this chunk's columns and rows
    pub fn contains(&self, world_x: i32, world_y: i32) -> bool {
        self.offset(world_x, world_y).is_some()
    }

    /// Get block at world coordinates. Cells outside the chunk read as air.
    #[inline]
    pub fn get(&self, world_x: i32, world_y: i32) -> BlockId {
        self.offset(world_x, world_y)
            .map_or(BlockId::Air, |i| self.cells[i])
    }

    /// Set block at world coordinates. Returns false if outside the chunk.
    #[inline]
    pub fn set(&mut self, world_x: i32, world_y: i32, block: BlockId) -> bool {
        match self.offset(world_x, world_y) {
            Some(i) => {
                self.cells[i] = block;
                true
            }
            None => false,
        }
    }

    /// Count non-air cells (for logging and snapshots)
    pub fn count_non_air(&self) -> usize {
        self.cells.iter().filter(|b| !b.is_air()).count()
    }

    /// Iterate all non-air cells as `(world_x, world_y, block)`
    pub fn blocks(&self) -> impl Iterator<Item = (i32, i32, BlockId)> + '_ {
        let origin_x = self.origin_x();
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, block)| !block.is_air())
            .filter_map(move |(i, &block)| {
                let x = i32::try_from(origin_x + (i % width) as i64).ok()?;
                let y = (i / width) as i32;
                Some((x, y, block))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_access() {
        let mut chunk = Chunk::new(2, CHUNK_SIZE, 40);
        assert_eq!(chunk.origin_x(), 32);

        assert!(chunk.set(32, 0, BlockId::Dirt));
        assert!(chunk.set(47, 39, BlockId::Stone));
        assert_eq!(chunk.get(32, 0), BlockId::Dirt);
        assert_eq!(chunk.get(47, 39), BlockId::Stone);
        assert_eq!(chunk.count_non_air(), 2);
    }

    #[test]
    fn test_outside_cells_are_rejected() {
        let mut chunk = Chunk::new(-1, CHUNK_SIZE, 40);
        assert!(chunk.contains(-16, 0));
        assert!(!chunk.contains(0, 0));
        assert!(!chunk.set(0, 5, BlockId::Dirt));
        assert!(!chunk.set(-3, 40, BlockId::Dirt));
        assert_eq!(chunk.get(-3, -1), BlockId::Air);
    }

    #[test]
    fn test_blocks_yields_world_coordinates() {
        let mut chunk = Chunk::new(-1, CHUNK_SIZE, 10);
        chunk.set(-1, 9, BlockId::Wood);
        chunk.set(-16, 2, BlockId::Ore);

        let mut blocks: Vec<_> = chunk.blocks().collect();
        blocks.sort();
        assert_eq!(blocks, vec![(-16, 2, BlockId::Ore), (-1, 9, BlockId::Wood)]);
    }

    #[test]
    fn test_chunks_at_the_ends_of_the_index_range() {
        let mut last = Chunk::new(i32::MAX / CHUNK_SIZE as i32, CHUNK_SIZE, 10);
        assert_eq!(last.columns().last(), Some(i32::MAX));
        assert!(last.set(i32::MAX, 3, BlockId::Stone));
        assert_eq!(last.blocks().collect::<Vec<_>>(), vec![(i32::MAX, 3, BlockId::Stone)]);

        // every column lies beyond i32: nothing is addressable, nothing panics
        let mut far = Chunk::new(2_000_000_000, CHUNK_SIZE, 10);
        assert_eq!(far.columns().count(), 0);
        assert!(!far.set(5, 5, BlockId::Stone));
        assert_eq!(far.get(i32::MAX, 5), BlockId::Air);
        assert_eq!(far.blocks().count(), 0);

        let first = Chunk::new(i32::MIN, 1, 10);
        assert_eq!(first.columns().collect::<Vec<_>>(), vec![i32::MIN]);
    }
}
