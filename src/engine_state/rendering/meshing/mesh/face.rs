use cgmath::{Point3, Vector3};

use crate::engine_state::voxels::block::{block_side::BlockSide, TextureKey};

/// Corners of the unit cube, indexed 0 through 7.
const CUBE_CORNERS: [[f32; 3]; 8] = [
    [0.0, 0.0, 0.0],
    [1.0, 0.0, 0.0],
    [1.0, 1.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, 0.0, 1.0],
    [1.0, 0.0, 1.0],
    [1.0, 1.0, 1.0],
    [0.0, 1.0, 1.0],
];

/// The four cube corners of each face, in `BlockSide` order.
const FACE_CORNERS: [[usize; 4]; 6] = [
    [1, 5, 6, 2], // RIGHT
    [4, 0, 3, 7], // LEFT
    [3, 2, 6, 7], // TOP
    [4, 5, 1, 0], // BOTTOM
    [4, 5, 6, 7], // FRONT
    [1, 0, 3, 2], // BACK
];

/// Texture coordinates of an unrotated face.
const BASE_TEX_COORDS: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

/// Represents a single textured quad of the mesh.
///
/// A face is four corner points in world space with one UV pair per corner, and
/// the texture key the quad is drawn with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    /// Corner positions in world space
    pub corners: [Point3<f32>; 4],
    /// UV coordinates, one per corner
    pub tex_coords: [[f32; 2]; 4],
    /// Texture the quad is drawn with
    pub texture: TextureKey,
    /// Which side of the block this face represents
    pub block_side: BlockSide,
}

/// Texture coordinates rotated left by `rotation` quarter turns.
pub fn rotated_tex_coords(rotation: u8) -> [[f32; 2]; 4] {
    let mut tex_coords = BASE_TEX_COORDS;
    tex_coords.rotate_left(usize::from(rotation % 4));
    tex_coords
}

impl Face {
    /// Creates the quad for one face of the unit block at `position`.
    ///
    /// # Arguments
    /// * `position` - The block position
    /// * `block_side` - Which face of the block
    /// * `texture` - The texture to draw it with
    /// * `rotation` - Quarter turns of the texture, in `0..4`
    ///
    /// # Returns
    /// A new `Face` with world-space corners.
    pub fn new(
        position: Point3<i32>,
        block_side: BlockSide,
        texture: TextureKey,
        rotation: u8,
    ) -> Self {
        let origin = Point3::new(position.x as f32, position.y as f32, position.z as f32);
        Self::scaled(origin, 1.0, block_side, texture, rotation)
    }

    /// Creates the quad for one face of a cube of edge `size` whose minimum corner
    /// is `origin`.
    pub fn scaled(
        origin: Point3<f32>,
        size: f32,
        block_side: BlockSide,
        texture: TextureKey,
        rotation: u8,
    ) -> Self {
        let corners = FACE_CORNERS[block_side as usize].map(|corner| {
            let [x, y, z] = CUBE_CORNERS[corner];
            origin + Vector3::new(x, y, z) * size
        });

        Face {
            corners,
            tex_coords: rotated_tex_coords(rotation),
            texture,
            block_side,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_shifts_tex_coords() {
        assert_eq!(rotated_tex_coords(0), BASE_TEX_COORDS);
        assert_eq!(
            rotated_tex_coords(1),
            [[1.0, 0.0], [1.0, 1.0], [0.0, 1.0], [0.0, 0.0]]
        );
        assert_eq!(
            rotated_tex_coords(3),
            [[0.0, 1.0], [0.0, 0.0], [1.0, 0.0], [1.0, 1.0]]
        );
    }

    #[test]
    fn test_top_face_corners() {
        let face = Face::new(Point3::new(2, 3, -4), BlockSide::TOP, TextureKey::Stone, 0);
        assert_eq!(
            face.corners,
            [
                Point3::new(2.0, 4.0, -4.0),
                Point3::new(3.0, 4.0, -4.0),
                Point3::new(3.0, 4.0, -3.0),
                Point3::new(2.0, 4.0, -3.0),
            ]
        );
    }

    #[test]
    fn test_faces_lie_on_their_plane() {
        for side in BlockSide::all() {
            let face = Face::new(Point3::new(0, 0, 0), side, TextureKey::Dirt, 0);
            let normal = side.normal().cast::<f32>().unwrap();
            // Offset of the face plane from the block's origin along the normal.
            let plane = if normal.x + normal.y + normal.z > 0.0 { 1.0 } else { 0.0 };
            for corner in face.corners {
                let along = corner.x * normal.x.abs() + corner.y * normal.y.abs() + corner.z * normal.z.abs();
                assert_eq!(along, plane, "{side:?}");
            }
        }
    }
}
