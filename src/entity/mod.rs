pub mod input;
pub mod inventory;
pub mod player;

pub use input::{InputState, MoveInput};
pub use inventory::{
    Inventory, InventorySnapshot, ItemStack, PanelRect, HOTBAR_SLOTS, INVENTORY_SLOTS, MAX_STACK,
};
pub use player::{Facing, Player, PlayerSnapshot};
