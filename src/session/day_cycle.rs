//! Day/night timer

use std::f32::consts::TAU;

use crate::config::DEFAULT_DAY_LENGTH;

/// Looping day timer; `daylight` drives sky and block tinting
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayCycle {
    timer: f32,
    length: f32,
}

impl DayCycle {
    /// `length` is the full cycle in seconds; unusable values fall back to the default
    pub fn new(length: f32) -> Self {
        let length = if length.is_finite() && length > 0.0 {
            length
        } else {
            DEFAULT_DAY_LENGTH
        };
        Self { timer: 0.0, length }
    }

    pub fn advance(&mut self, dt: f32) {
        self.timer = self.wrap(self.timer + dt);
    }

    /// Seconds into the current cycle, always in `[0, length)`
    pub fn timer(&self) -> f32 {
        self.timer
    }

    pub fn set_timer(&mut self, timer: f32) {
        self.timer = if timer.is_finite() {
            self.wrap(timer)
        } else {
            0.0
        };
    }

    /// `rem_euclid` rounds tiny negative values up to `length` itself
    fn wrap(&self, timer: f32) -> f32 {
        let wrapped = timer.rem_euclid(self.length);
        if wrapped >= self.length {
            0.0
        } else {
            wrapped
        }
    }

    pub fn length(&self) -> f32 {
        self.length
    }

    /// Fraction of the cycle elapsed
    pub fn phase(&self) -> f32 {
        self.timer / self.length
    }

    /// 1.0 at noon, 0.0 at midnight
    pub fn daylight(&self) -> f32 {
        ((self.phase() * TAU).sin() + 1.0) * 0.5
    }
}

impl Default for DayCycle {
    fn default() -> Self {
        Self::new(DEFAULT_DAY_LENGTH)
    }
}
