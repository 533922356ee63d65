//! Player input state, already decoded from whatever device produced it

use bitflags::bitflags;
use glam::IVec2;

bitflags! {
    /// Movement keys held this frame
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MoveInput: u8 {
        const LEFT = 1 << 0;
        const RIGHT = 1 << 1;
        const JUMP = 1 << 2;
    }
}

impl MoveInput {
    /// Net horizontal intent: -1 (left), 0 or 1 (right)
    pub fn horizontal(self) -> f32 {
        let mut intent = 0.0;
        if self.contains(MoveInput::LEFT) {
            intent -= 1.0;
        }
        if self.contains(MoveInput::RIGHT) {
            intent += 1.0;
        }
        intent
    }

    pub fn jump(self) -> bool {
        self.contains(MoveInput::JUMP)
    }
}

/// Everything the session needs from input for one tick
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub movement: MoveInput,

    /// Tile under the cursor, in world tile coordinates
    pub target_tile: Option<IVec2>,
    /// Mine button held
    pub primary_pressed: bool,
    /// Place button held
    pub secondary_pressed: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_movement(movement: MoveInput) -> Self {
        Self {
            movement,
            ..Self::default()
        }
    }
}
