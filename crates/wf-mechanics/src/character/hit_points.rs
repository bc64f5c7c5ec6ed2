//! Hit points clamped to `0..=max`.

use serde::{Deserialize, Serialize};

/// Current and maximum hit points.
///
/// The current value never leaves `0..=max`, and `max` is never below 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitPoints {
    current: i32,
    max: i32,
}

impl HitPoints {
    /// Create hit points, clamping both values into range.
    pub fn new(current: i32, max: i32) -> Self {
        let max = max.max(1);
        Self {
            current: current.clamp(0, max),
            max,
        }
    }

    /// Full hit points for the given maximum.
    pub fn full(max: i32) -> Self {
        Self::new(max, max)
    }

    /// Current hit points.
    pub fn current(&self) -> i32 {
        self.current
    }

    /// Maximum hit points.
    pub fn max(&self) -> i32 {
        self.max
    }

    /// Add `delta` (negative for damage) and clamp. Returns the new value.
    pub fn adjust(&mut self, delta: i32) -> i32 {
        self.current = self.current.saturating_add(delta).clamp(0, self.max);
        self.current
    }

    /// Change the maximum (kept at least 1) and re-clamp the current value.
    pub fn set_max(&mut self, max: i32) {
        self.max = max.max(1);
        self.current = self.current.min(self.max);
    }

    /// Whether the character has been reduced to zero.
    pub fn is_down(&self) -> bool {
        self.current == 0
    }
}

impl std::fmt::Display for HitPoints {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.current, self.max)
    }
}
