//! # Block Side Module
//!
//! This module defines the six faces of a voxel block, their neighbour offsets
//! and outward normals.

use cgmath::{Point3, Vector3};

/// Represents the six possible faces of a voxel block.
///
/// The discriminants give the fixed face order used by the mesher:
/// [RIGHT, LEFT, TOP, BOTTOM, FRONT, BACK]
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum BlockSide {
    /// The right face (facing positive X)
    RIGHT = 0,

    /// The left face (facing negative X)
    LEFT = 1,

    /// The top face (facing positive Y)
    TOP = 2,

    /// The bottom face (facing negative Y)
    BOTTOM = 3,

    /// The front face (facing positive Z)
    FRONT = 4,

    /// The back face (facing negative Z)
    BACK = 5,
}

impl BlockSide {
    /// Returns an array containing all six block faces in mesher order.
    ///
    /// The order is: [RIGHT, LEFT, TOP, BOTTOM, FRONT, BACK]
    ///
    /// # Returns
    /// An array containing all `BlockSide` variants.
    pub fn all() -> [BlockSide; 6] {
        [
            BlockSide::RIGHT,
            BlockSide::LEFT,
            BlockSide::TOP,
            BlockSide::BOTTOM,
            BlockSide::FRONT,
            BlockSide::BACK,
        ]
    }

    /// The outward unit normal of this face.
    pub fn normal(self) -> Vector3<i32> {
        match self {
            BlockSide::RIGHT => Vector3::new(1, 0, 0),
            BlockSide::LEFT => Vector3::new(-1, 0, 0),
            BlockSide::TOP => Vector3::new(0, 1, 0),
            BlockSide::BOTTOM => Vector3::new(0, -1, 0),
            BlockSide::FRONT => Vector3::new(0, 0, 1),
            BlockSide::BACK => Vector3::new(0, 0, -1),
        }
    }

    /// The cell sharing this face with the block at `position`.
    pub fn neighbor_of(self, position: Point3<i32>) -> Point3<i32> {
        position + self.normal()
    }

    /// Whether this face points along the Y axis.
    pub fn is_vertical_axis(self) -> bool {
        matches!(self, BlockSide::TOP | BlockSide::BOTTOM)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discriminants_follow_face_order() {
        for (index, side) in BlockSide::all().into_iter().enumerate() {
            assert_eq!(side as usize, index);
        }
    }

    #[test]
    fn test_normals_are_unique_unit_vectors() {
        let sides = BlockSide::all();
        for (index, side) in sides.into_iter().enumerate() {
            let normal = side.normal();
            assert_eq!(normal.x.abs() + normal.y.abs() + normal.z.abs(), 1);
            for other in &sides[index + 1..] {
                assert_ne!(other.normal(), normal);
            }
        }
    }

    #[test]
    fn test_neighbor_of() {
        let position = Point3::new(3, -2, 7);
        assert_eq!(BlockSide::TOP.neighbor_of(position), Point3::new(3, -1, 7));
        assert_eq!(BlockSide::BACK.neighbor_of(position), Point3::new(3, -2, 6));
    }
}
