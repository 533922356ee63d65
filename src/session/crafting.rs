//! Crafting recipes
//!
//! Crafting is transactional: inputs are checked up front and either all
//! are consumed or nothing changes.

use crate::blocks::BlockId;
use crate::entity::Inventory;

/// One input or output line of a recipe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecipeItem {
    pub block_id: BlockId,
    pub count: u32,
}

impl RecipeItem {
    pub const fn new(block_id: BlockId, count: u32) -> Self {
        Self { block_id, count }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recipe {
    pub name: &'static str,
    pub inputs: &'static [RecipeItem],
    pub output: RecipeItem,
}

/// Every recipe in the game, in menu order
pub const RECIPES: &[Recipe] = &[
    Recipe {
        name: "Compacted Stone",
        inputs: &[RecipeItem::new(BlockId::Dirt, 4)],
        output: RecipeItem::new(BlockId::Stone, 1),
    },
    Recipe {
        name: "Refined Ore",
        inputs: &[
            RecipeItem::new(BlockId::Stone, 3),
            RecipeItem::new(BlockId::Ore, 1),
        ],
        output: RecipeItem::new(BlockId::Ore, 2),
    },
];

impl Recipe {
    pub fn can_craft(&self, inventory: &Inventory) -> bool {
        self.inputs
            .iter()
            .all(|input| inventory.has_items(input.block_id, input.count))
    }

    /// Consume the inputs and add the output. Returns false, leaving the
    /// inventory untouched, when any input is short.
    pub fn craft(&self, inventory: &mut Inventory) -> bool {
        if !self.can_craft(inventory) {
            return false;
        }
        for input in self.inputs {
            inventory.remove_items(input.block_id, input.count);
        }
        if !inventory.add_item(self.output.block_id, self.output.count) {
            log::debug!("[CRAFT] {}: inventory full, output partly lost", self.name);
        }
        log::debug!("[CRAFT] {}", self.name);
        true
    }
}
