//! Per-tick input snapshot handed in by the presentation layer.

use serde::{Deserialize, Serialize};

use crate::geometry::Vec2;

/// Held state of the controls for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InputSnapshot {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    /// Primary pointer button (use / attack)
    pub primary: bool,
    /// Secondary pointer button; not bound to an action in the core
    pub secondary: bool,
    /// Pointer position in world coordinates
    pub pointer: Vec2,
}

impl InputSnapshot {
    /// Nothing held, pointer at `pointer`.
    pub fn idle(pointer: Vec2) -> Self {
        Self {
            pointer,
            ..Self::default()
        }
    }

    pub fn with_forward(mut self) -> Self {
        self.forward = true;
        self
    }

    pub fn with_primary(mut self) -> Self {
        self.primary = true;
        self
    }

    /// (forward, strafe) axes in -1..=1; opposite keys cancel.
    pub fn movement_axes(&self) -> (f32, f32) {
        let mut forward = 0.0;
        let mut strafe = 0.0;
        if self.forward {
            forward += 1.0;
        }
        if self.back {
            forward -= 1.0;
        }
        if self.left {
            strafe -= 1.0;
        }
        if self.right {
            strafe += 1.0;
        }
        (forward, strafe)
    }
}
