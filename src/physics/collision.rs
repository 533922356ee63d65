//! Integer rectangles and tile overlap queries

use crate::world::{World, TILE_SIZE};

/// Axis-aligned rectangle in world pixel units (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle covering one tile
    pub fn tile(tile_x: i32, tile_y: i32) -> Self {
        Self::new(tile_x * TILE_SIZE, tile_y * TILE_SIZE, TILE_SIZE, TILE_SIZE)
    }

    #[inline]
    pub fn left(&self) -> i32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> i32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub fn set_right(&mut self, right: i32) {
        self.x = right - self.w;
    }

    pub fn set_bottom(&mut self, bottom: i32) {
        self.y = bottom - self.h;
    }

    /// Strict overlap; touching edges do not count
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}

/// Solid tiles covered by `rect`, column by column
pub fn solid_tiles_overlapping(world: &mut World, rect: &Rect) -> Vec<Rect> {
    let min_tx = rect.left().div_euclid(TILE_SIZE);
    let max_tx = (rect.right() - 1).div_euclid(TILE_SIZE);
    let min_ty = rect.top().div_euclid(TILE_SIZE);
    let max_ty = (rect.bottom() - 1).div_euclid(TILE_SIZE);

    let mut solids = Vec::new();
    for tx in min_tx..=max_tx {
        for ty in min_ty..=max_ty {
            if world.get_block(tx, ty).is_solid() {
                solids.push(Rect::tile(tx, ty));
            }
        }
    }
    solids
}
