//! Mining progress tracking

use glam::IVec2;

use crate::blocks::BlockId;

/// Lower bound on break time so instant blocks still take a few frames
const MIN_BREAK_TIME: f32 = 0.05;

/// A block broken this tick, for effects and sound
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MineEvent {
    pub position: IVec2,
    /// Block that was removed
    pub block: BlockId,
    /// Item given to the player
    pub drop: BlockId,
    /// False if the inventory had no room for the drop
    pub stored: bool,
}

/// Progress towards breaking the block under the cursor
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MiningState {
    target: Option<IVec2>,
    progress: f32,
}

impl MiningState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn target(&self) -> Option<IVec2> {
        self.target
    }

    /// Fraction in `[0, 1)` of the current target mined so far
    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn reset(&mut self) {
        self.target = None;
        self.progress = 0.0;
    }

    /// Keep mining `target` for `dt` seconds. Switching targets restarts
    /// progress. Returns true once the block breaks, after which the state
    /// is reset.
    pub fn advance(&mut self, target: IVec2, break_time: f32, dt: f32) -> bool {
        if self.target != Some(target) {
            self.target = Some(target);
            self.progress = 0.0;
        }
        self.progress += dt / break_time.max(MIN_BREAK_TIME);
        if self.progress >= 1.0 {
            self.reset();
            return true;
        }
        false
    }
}
