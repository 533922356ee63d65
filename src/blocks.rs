//! Block registry - static definitions for every tile type

use serde::{Deserialize, Serialize};
use std::fmt;

/// Break time used for blocks that can never be mined
pub const UNBREAKABLE_BREAK_TIME: f32 = 9999.0;

/// Tile occupant type. Air is the absence of a block.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
#[repr(u8)]
pub enum BlockId {
    #[default]
    Air = 0,
    Dirt = 1,
    Stone = 2,
    Ore = 3,
    Wood = 4,
    Bedrock = 5,
}

impl BlockId {
    pub const ALL: [BlockId; 6] = [
        BlockId::Air,
        BlockId::Dirt,
        BlockId::Stone,
        BlockId::Ore,
        BlockId::Wood,
        BlockId::Bedrock,
    ];

    /// Decode a raw id (e.g. from a save file). Unknown ids yield `None`.
    pub fn from_raw(raw: u8) -> Option<Self> {
        Self::ALL.get(raw as usize).copied()
    }

    /// Raw numeric id as stored in save files
    #[inline]
    pub fn raw(self) -> u8 {
        self as u8
    }

    #[inline]
    pub fn is_air(self) -> bool {
        self == BlockId::Air
    }

    /// Registry entry for this block
    #[inline]
    pub fn def(self) -> &'static BlockDef {
        &BLOCKS[self as usize]
    }

    /// Solid blocks participate in player collision
    #[inline]
    pub fn is_solid(self) -> bool {
        self.def().solid
    }
}

impl From<BlockId> for u8 {
    fn from(id: BlockId) -> Self {
        id.raw()
    }
}

/// Raw id that does not name any registered block
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unknown block id {0}")]
pub struct UnknownBlockId(pub u8);

impl TryFrom<u8> for BlockId {
    type Error = UnknownBlockId;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        BlockId::from_raw(raw).ok_or(UnknownBlockId(raw))
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.def().name)
    }
}

/// Immutable definition of a block type
#[derive(Debug, Clone, PartialEq)]
pub struct BlockDef {
    pub id: BlockId,
    pub name: &'static str,
    /// Base fill color (RGB)
    pub color: [u8; 3],
    /// Accent color used by the renderer for edges and mining particles
    pub glow: [u8; 3],
    /// Seconds of continuous mining needed to break the block
    pub break_time: f32,
    pub solid: bool,
    pub placeable: bool,
    pub unbreakable: bool,
    /// Item yielded when mined. `None` drops the block itself.
    pub drop_id: Option<BlockId>,
}

impl BlockDef {
    /// Block added to the inventory when this block is mined
    pub fn drop_item(&self) -> BlockId {
        self.drop_id.unwrap_or(self.id)
    }
}

const NEON_CYAN: [u8; 3] = [0, 255, 255];
const NEON_GREEN: [u8; 3] = [0, 255, 100];
const NEON_ORANGE: [u8; 3] = [255, 128, 0];
const NEON_RED: [u8; 3] = [255, 50, 50];
const NEON_BLUE: [u8; 3] = [90, 140, 255];

/// Registry table, indexed by `BlockId as usize`
static BLOCKS: [BlockDef; 6] = [
    BlockDef {
        id: BlockId::Air,
        name: "Air",
        color: [0, 0, 0],
        glow: [0, 0, 0],
        break_time: 0.0,
        solid: false,
        placeable: false,
        unbreakable: false,
        drop_id: None,
    },
    BlockDef {
        id: BlockId::Dirt,
        name: "Dirt",
        color: [90, 60, 25],
        glow: NEON_ORANGE,
        break_time: 0.24,
        solid: true,
        placeable: true,
        unbreakable: false,
        drop_id: None,
    },
    BlockDef {
        id: BlockId::Stone,
        name: "Stone",
        color: [60, 70, 90],
        glow: NEON_BLUE,
        break_time: 0.65,
        solid: true,
        placeable: true,
        unbreakable: false,
        drop_id: None,
    },
    BlockDef {
        id: BlockId::Ore,
        name: "Ore",
        color: [50, 100, 130],
        glow: NEON_CYAN,
        break_time: 0.95,
        solid: true,
        placeable: true,
        unbreakable: false,
        drop_id: None,
    },
    BlockDef {
        id: BlockId::Wood,
        name: "Wood",
        color: [30, 90, 40],
        glow: NEON_GREEN,
        break_time: 0.38,
        solid: true,
        placeable: true,
        unbreakable: false,
        drop_id: None,
    },
    BlockDef {
        id: BlockId::Bedrock,
        name: "Bedrock",
        color: [80, 0, 0],
        glow: NEON_RED,
        break_time: UNBREAKABLE_BREAK_TIME,
        solid: true,
        placeable: true,
        unbreakable: true,
        drop_id: None,
    },
];
