//! Orientation transforms applied to rule offsets.
//!
//! Uses the Y-up convention of [`Cell`]: a 90° rotation is counter-clockwise,
//! so `(1, 0)` (right) becomes `(0, 1)` (above).

use serde::{Deserialize, Serialize};
use tilestack_core::Cell;

/// A geometric remapping of a rule's neighbor offsets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Transform {
    #[default]
    Identity,
    Rotate90,
    Rotate180,
    Rotate270,
    /// Flip across the vertical axis (`x` is negated)
    MirrorX,
    /// Flip across the horizontal axis (`y` is negated)
    MirrorY,
    /// Flip across both axes
    MirrorXY,
}

impl Transform {
    /// The 2×2 integer matrix `[[a, b], [c, d]]` mapping `(x, y)` to
    /// `(a*x + b*y, c*x + d*y)`
    pub const fn matrix(self) -> [[i32; 2]; 2] {
        match self {
            Transform::Identity => [[1, 0], [0, 1]],
            Transform::Rotate90 => [[0, -1], [1, 0]],
            Transform::Rotate180 => [[-1, 0], [0, -1]],
            Transform::Rotate270 => [[0, 1], [-1, 0]],
            Transform::MirrorX => [[-1, 0], [0, 1]],
            Transform::MirrorY => [[1, 0], [0, -1]],
            Transform::MirrorXY => [[-1, 0], [0, -1]],
        }
    }

    /// Apply the transform to an offset. Exact: every matrix entry is -1, 0 or 1.
    /// `None` if a coordinate leaves the `i32` range, which only happens for
    /// offsets at `i32::MIN`.
    pub fn apply(self, offset: Cell) -> Option<Cell> {
        let [[a, b], [c, d]] = self.matrix();
        let x = a.checked_mul(offset.x)?.checked_add(b.checked_mul(offset.y)?)?;
        let y = c.checked_mul(offset.x)?.checked_add(d.checked_mul(offset.y)?)?;
        Some(Cell::new(x, y))
    }

    /// Counter-clockwise rotation in degrees (mirrors report 0)
    pub fn rotation_degrees(self) -> u16 {
        match self {
            Transform::Rotate90 => 90,
            Transform::Rotate180 => 180,
            Transform::Rotate270 => 270,
            _ => 0,
        }
    }

    /// Whether the output tile should be drawn flipped horizontally / vertically
    pub fn flips(self) -> (bool, bool) {
        match self {
            Transform::MirrorX => (true, false),
            Transform::MirrorY => (false, true),
            Transform::MirrorXY => (true, true),
            _ => (false, false),
        }
    }
}

/// Which orientations of a rule may be tried besides the identity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransformPolicy {
    /// Identity only
    #[default]
    Fixed,
    /// Identity, then 90°, 180° and 270°
    Rotated,
    MirrorX,
    MirrorY,
    MirrorXY,
}

impl TransformPolicy {
    /// Candidate transforms in the order they are tried
    pub const fn candidates(self) -> &'static [Transform] {
        match self {
            TransformPolicy::Fixed => &[Transform::Identity],
            TransformPolicy::Rotated => &[
                Transform::Identity,
                Transform::Rotate90,
                Transform::Rotate180,
                Transform::Rotate270,
            ],
            TransformPolicy::MirrorX => &[Transform::Identity, Transform::MirrorX],
            TransformPolicy::MirrorY => &[Transform::Identity, Transform::MirrorY],
            TransformPolicy::MirrorXY => &[Transform::Identity, Transform::MirrorXY],
        }
    }
}
