//! Points and surface sizes in device pixels.

use serde::{Deserialize, Serialize};

/// A position on the device surface.  Origin is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Floors both coordinates at 0; negative positions are not representable on the wire.
    pub fn floored(self) -> Self {
        Self {
            x: self.x.max(0),
            y: self.y.max(0),
        }
    }

    /// Clamps the point into `[0, width] x [0, height]`.
    pub fn clamped_to(self, surface: Size) -> Self {
        Self {
            x: self.x.clamp(0, i32::from(surface.width)),
            y: self.y.clamp(0, i32::from(surface.height)),
        }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// Width and height of the surface that touch coordinates refer to.
///
/// Both are carried as `u16` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: u16,
    pub height: u16,
}

impl Size {
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}
