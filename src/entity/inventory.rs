use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::blocks::BlockId;
use crate::persistence::lenient;

/// Total slots in the inventory
pub const INVENTORY_SLOTS: usize = 27;
/// The first `HOTBAR_SLOTS` slots form the hotbar
pub const HOTBAR_SLOTS: usize = 9;
/// Maximum items in one stack
pub const MAX_STACK: u32 = 999;

/// A stack of blocks in an inventory slot (or held by the cursor)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ItemStack {
    pub block_id: BlockId,
    pub count: u32,
}

impl ItemStack {
    /// Create a new item stack
    pub fn new(block_id: BlockId, count: u32) -> Self {
        ItemStack { block_id, count }
    }

    /// Free space left in this stack
    pub fn headroom(&self) -> u32 {
        MAX_STACK.saturating_sub(self.count)
    }

    /// Add items to this stack, returns amount that didn't fit
    pub fn add(&mut self, amount: u32) -> u32 {
        let to_add = amount.min(self.headroom());
        self.count += to_add;
        amount - to_add
    }

    /// Remove items from this stack, returns amount actually removed
    pub fn remove(&mut self, amount: u32) -> u32 {
        let to_remove = amount.min(self.count);
        self.count -= to_remove;
        to_remove
    }

    /// Check if this stack is empty
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Check if this stack is full
    pub fn is_full(&self) -> bool {
        self.count >= MAX_STACK
    }

    /// Decode `{block_id, count}`; anything else (air, unknown ids, zero counts) is `None`
    fn from_value(value: &Value) -> Option<Self> {
        let raw = lenient::int_field(value, "block_id")?;
        let block_id = u8::try_from(raw).ok().and_then(BlockId::from_raw)?;
        let count = lenient::int_field(value, "count")?;
        if block_id.is_air() || count < 1 {
            return None;
        }
        Some(ItemStack::new(block_id, count.min(MAX_STACK as i64) as u32))
    }
}

/// Screen rectangle of the panel hosting the slot grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl PanelRect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

const SLOT_SIZE: i32 = 52;
const SLOT_PAD: i32 = 8;
const SLOT_MARGIN: i32 = 20;

/// Persisted inventory: selected hotbar index and all slots
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventorySnapshot {
    pub selected_hotbar: usize,
    pub slots: Vec<Option<ItemStack>>,
}

impl InventorySnapshot {
    /// Decode from arbitrary JSON, coercing malformed fields and entries
    pub fn from_value(value: &Value) -> Self {
        let selected_hotbar = lenient::usize_field(value, "selected_hotbar")
            .unwrap_or(0)
            .min(HOTBAR_SLOTS - 1);
        let slots = value
            .get("slots")
            .and_then(Value::as_array)
            .map(|list| list.iter().map(ItemStack::from_value).collect())
            .unwrap_or_default();
        Self {
            selected_hotbar,
            slots,
        }
    }
}

/// Player inventory: 27 slots, a selected hotbar slot and a stack held by the cursor
#[derive(Debug, Clone, PartialEq)]
pub struct Inventory {
    slots: [Option<ItemStack>; INVENTORY_SLOTS],
    selected_hotbar: usize,
    dragging: Option<ItemStack>,
}

impl Inventory {
    /// Create an empty inventory
    pub fn new() -> Self {
        Inventory {
            slots: [None; INVENTORY_SLOTS],
            selected_hotbar: 0,
            dragging: None,
        }
    }

    /// Inventory a new world starts with
    pub fn starter() -> Self {
        let mut inventory = Self::new();
        inventory.add_item(BlockId::Dirt, 48);
        inventory.add_item(BlockId::Stone, 16);
        inventory.add_item(BlockId::Wood, 16);
        inventory
    }

    /// Add items, topping up existing stacks first and then filling empty slots
    /// left to right. Returns false if not everything fit; whatever fit is kept.
    pub fn add_item(&mut self, block_id: BlockId, amount: u32) -> bool {
        if block_id.is_air() || amount == 0 {
            return false;
        }
        let mut remaining = amount;

        for stack in self.slots.iter_mut().flatten() {
            if stack.block_id == block_id && !stack.is_full() {
                remaining = stack.add(remaining);
                if remaining == 0 {
                    return true;
                }
            }
        }

        for slot in self.slots.iter_mut().filter(|slot| slot.is_none()) {
            let to_add = remaining.min(MAX_STACK);
            *slot = Some(ItemStack::new(block_id, to_add));
            remaining -= to_add;
            if remaining == 0 {
                return true;
            }
        }

        log::debug!(
            "[INV] Inventory full, {} of {} {} did not fit",
            remaining,
            amount,
            block_id
        );
        false
    }

    /// Take `amount` from the selected hotbar slot.
    /// Returns the block taken, or `None` if the slot holds fewer than `amount`.
    pub fn consume_selected(&mut self, amount: u32) -> Option<BlockId> {
        let slot = &mut self.slots[self.selected_hotbar];
        let stack = slot.as_mut()?;
        if stack.count < amount {
            return None;
        }
        let block_id = stack.block_id;
        stack.remove(amount);
        if stack.is_empty() {
            *slot = None;
        }
        Some(block_id)
    }

    /// Block in the selected hotbar slot, if it can be placed
    pub fn selected_block(&self) -> Option<BlockId> {
        self.slots[self.selected_hotbar]
            .map(|stack| stack.block_id)
            .filter(|block| block.def().placeable)
    }

    /// Count how many of a specific block are in the inventory
    pub fn count_item(&self, block_id: BlockId) -> u32 {
        self.slots
            .iter()
            .flatten()
            .filter(|stack| stack.block_id == block_id)
            .map(|stack| stack.count)
            .sum()
    }

    /// Check if the inventory contains at least the specified amount of a block
    pub fn has_items(&self, block_id: BlockId, amount: u32) -> bool {
        self.count_item(block_id) >= amount
    }

    /// Remove `amount` items across slots in order. Nothing is removed unless
    /// the full amount is available.
    pub fn remove_items(&mut self, block_id: BlockId, amount: u32) -> bool {
        if !self.has_items(block_id, amount) {
            return false;
        }
        let mut remaining = amount;

        for slot in &mut self.slots {
            if remaining == 0 {
                break;
            }
            if let Some(stack) = slot {
                if stack.block_id == block_id {
                    remaining -= stack.remove(remaining);
                    if stack.is_empty() {
                        *slot = None;
                    }
                }
            }
        }

        true
    }

    /// Pick up, drop, merge or swap with the cursor stack.
    ///
    /// Panics if `index` is not a valid slot.
    pub fn click_slot(&mut self, index: usize) {
        let slot = &mut self.slots[index];

        let Some(held) = self.dragging.as_mut() else {
            self.dragging = slot.take();
            return;
        };

        match slot {
            None => {
                *slot = self.dragging.take();
            }
            Some(existing) if existing.block_id == held.block_id && !existing.is_full() => {
                let overflow = existing.add(held.count);
                held.count = overflow;
                if held.is_empty() {
                    self.dragging = None;
                }
            }
            Some(existing) => {
                std::mem::swap(existing, held);
            }
        }
    }

    /// Map a screen point to a slot index for the hotbar strip (`full == false`)
    /// or the three-row inventory grid (`full == true`)
    pub fn slot_from_point(x: i32, y: i32, panel: PanelRect, full: bool) -> Option<usize> {
        let cols = HOTBAR_SLOTS as i32;
        let rows = if full {
            (INVENTORY_SLOTS / HOTBAR_SLOTS) as i32
        } else {
            1
        };
        let grid_x = panel.x + SLOT_MARGIN;
        let grid_height = if full {
            rows * (SLOT_SIZE + SLOT_PAD) + SLOT_MARGIN
        } else {
            SLOT_SIZE + SLOT_MARGIN
        };
        let grid_y = panel.y + panel.height - grid_height;

        let (dx, dy) = (x - grid_x, y - grid_y);
        if dx < 0 || dy < 0 {
            return None;
        }
        let (col, row) = (dx / (SLOT_SIZE + SLOT_PAD), dy / (SLOT_SIZE + SLOT_PAD));
        let inside_slot =
            dx % (SLOT_SIZE + SLOT_PAD) < SLOT_SIZE && dy % (SLOT_SIZE + SLOT_PAD) < SLOT_SIZE;
        if col >= cols || row >= rows || !inside_slot {
            return None;
        }
        Some((row * cols + col) as usize)
    }

    pub fn selected_hotbar(&self) -> usize {
        self.selected_hotbar
    }

    /// Select a hotbar slot. Panics if `index` is not a hotbar slot.
    pub fn select_hotbar(&mut self, index: usize) {
        assert!(index < HOTBAR_SLOTS, "hotbar index {} out of range", index);
        self.selected_hotbar = index;
    }

    /// Move the hotbar selection by `delta`, wrapping around
    pub fn scroll_hotbar(&mut self, delta: i32) {
        let len = HOTBAR_SLOTS as i32;
        self.selected_hotbar = (self.selected_hotbar as i32 + delta).rem_euclid(len) as usize;
    }

    pub fn slot(&self, index: usize) -> Option<&ItemStack> {
        self.slots[index].as_ref()
    }

    /// Replace a slot's contents (for tooling and tests).
    /// Zero-count stacks are stored as empty.
    pub fn set_slot(&mut self, index: usize, stack: Option<ItemStack>) {
        self.slots[index] = stack.filter(|s| !s.is_empty() && !s.block_id.is_air());
    }

    pub fn slots(&self) -> &[Option<ItemStack>] {
        &self.slots
    }

    /// Stack currently held by the cursor
    pub fn dragging(&self) -> Option<&ItemStack> {
        self.dragging.as_ref()
    }

    /// Get the number of empty slots
    pub fn empty_slot_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_none()).count()
    }

    pub fn to_snapshot(&self) -> InventorySnapshot {
        InventorySnapshot {
            selected_hotbar: self.selected_hotbar,
            slots: self.slots.to_vec(),
        }
    }

    /// Restore from a snapshot, padding or truncating to exactly 27 slots.
    /// The cursor stack is not persisted.
    pub fn from_snapshot(snapshot: &InventorySnapshot) -> Self {
        let mut inventory = Self::new();
        inventory.selected_hotbar = snapshot.selected_hotbar.min(HOTBAR_SLOTS - 1);
        for (index, stack) in snapshot.slots.iter().take(INVENTORY_SLOTS).enumerate() {
            let stack = stack.map(|s| ItemStack::new(s.block_id, s.count.min(MAX_STACK)));
            inventory.set_slot(index, stack);
        }
        inventory
    }
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new()
    }
}
