//! Mesh generation for voxel rendering.
//!
//! This module converts the world into textured quads for the external renderer.
//! Only faces that can be seen are emitted:
//!
//! 1. A face next to air is always visible
//! 2. A transparent block shows faces towards any different, non-air block
//! 3. An opaque block shows faces towards transparent blocks
//!
//! Everything else is culled. The quads are grouped by texture key, and textures
//! of natural blocks are rotated per position with a coordinate hash so large
//! areas do not show an obvious tiling pattern.
//!
//! # Architecture
//! - `MeshManager`: owns the world mesh and the breaking overlay and rebuilds them
//! - `breaking_overlay`: crack quads drawn over the block being mined
//! - `mesh/`: quad and batch data structures
//!
//! # Performance Considerations
//! - The whole mesh is rebuilt when the world changes, never patched
//! - Only blocks within the render window around the avatar are visited

use cgmath::Point3;
use log::debug;

pub mod breaking_overlay;
pub mod mesh;

pub use mesh::*;

use crate::{
    config::RenderConfig,
    engine_state::voxels::{
        block::{block_side::BlockSide, block_type::BlockType, TextureKey},
        world::{BlockPosition, World},
    },
};

/// Multipliers of the texture rotation hash, one per axis.
const ROTATION_HASH_X: i64 = 521;
const ROTATION_HASH_Y: i64 = 97;
const ROTATION_HASH_Z: i64 = 643;

/// Deterministic texture rotation for a block position, in `0..4`.
pub fn texture_rotation(x: i32, y: i32, z: i32) -> u8 {
    let hash = i64::from(x) * ROTATION_HASH_X
        + i64::from(y) * ROTATION_HASH_Y
        + i64::from(z) * ROTATION_HASH_Z;
    hash.rem_euclid(4) as u8
}

/// Texture rotation of one face of a block.
///
/// Grass only rotates its top face; non-rotatable blocks never rotate.
pub fn face_rotation(block_type: BlockType, side: BlockSide, position: BlockPosition) -> u8 {
    let rotates = match block_type {
        BlockType::GrassBlock => side == BlockSide::TOP,
        other => other.is_rotatable(),
    };
    if rotates {
        texture_rotation(position.x, position.y, position.z)
    } else {
        0
    }
}

/// Decides whether the face of `block` towards `neighbor` is drawn.
///
/// # Arguments
/// * `block` - The block owning the face
/// * `neighbor` - The block on the other side of the face, `None` for air
pub fn is_face_visible(block: BlockType, neighbor: Option<BlockType>) -> bool {
    match neighbor {
        None => true,
        Some(neighbor) if block.is_transparent() => neighbor != block,
        Some(neighbor) => neighbor.is_transparent(),
    }
}

/// Builds the mesh of every block within the render window around `center`.
///
/// # Arguments
/// * `world` - The world to mesh
/// * `center` - The avatar's feet position; the window is centred on its floored cell
/// * `render` - Extent of the render window
///
/// # Returns
/// A new `Mesh` with one batch per texture key.
pub fn build_world_mesh(world: &World, center: Point3<f32>, render: &RenderConfig) -> Mesh {
    let origin = Point3::new(
        center.x.floor() as i32,
        center.y.floor() as i32,
        center.z.floor() as i32,
    );
    let mut mesh = Mesh::new();

    for (position, block_type) in world.iter() {
        if (position.x - origin.x).abs() >= render.horizontal_distance
            || (position.y - origin.y).abs() >= render.vertical_distance
            || (position.z - origin.z).abs() >= render.horizontal_distance
        {
            continue;
        }

        for side in BlockSide::all() {
            if !is_face_visible(block_type, world.get(side.neighbor_of(position))) {
                continue;
            }
            let face = Face::new(
                position,
                side,
                TextureKey::for_face(block_type, side),
                face_rotation(block_type, side, position),
            );
            mesh.add_face(&face);
        }
    }

    mesh
}

/// Owns the meshes handed to the renderer.
#[derive(Debug, Default)]
pub struct MeshManager {
    world_mesh: Mesh,
    breaking_overlay: Mesh,
    render: RenderConfig,
}

impl MeshManager {
    /// Creates a manager with empty meshes.
    pub fn new(render: RenderConfig) -> Self {
        MeshManager {
            world_mesh: Mesh::new(),
            breaking_overlay: Mesh::new(),
            render,
        }
    }

    /// Replaces the world mesh with a fresh build around `center`.
    pub fn rebuild(&mut self, world: &World, center: Point3<f32>) {
        self.world_mesh = build_world_mesh(world, center, &self.render);
        debug!(
            "Rebuilt world mesh: {} faces in {} texture batches",
            self.world_mesh.face_count(),
            self.world_mesh.batches().count()
        );
    }

    /// Shows cracks on `target` at `stage`, or clears them with `None`.
    pub fn set_breaking_overlay(&mut self, target: Option<(BlockPosition, u8)>) {
        self.breaking_overlay = match target {
            Some((position, stage)) => breaking_overlay::build_breaking_overlay(position, stage),
            None => Mesh::new(),
        };
    }

    /// The current world mesh.
    pub fn world_mesh(&self) -> &Mesh {
        &self.world_mesh
    }

    /// The crack overlay of the block being mined, empty when nothing is mined.
    pub fn breaking_overlay(&self) -> &Mesh {
        &self.breaking_overlay
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin() -> Point3<f32> {
        Point3::new(0.5, 0.0, 0.5)
    }

    #[test]
    fn test_rotation_is_pure_and_in_range() {
        for x in -20..20 {
            for y in -5..5 {
                for z in -20..20 {
                    let rotation = texture_rotation(x, y, z);
                    assert!(rotation < 4);
                    assert_eq!(rotation, texture_rotation(x, y, z));
                }
            }
        }
        assert_eq!(texture_rotation(1, 0, 0), 1);
        assert_eq!(texture_rotation(0, 1, 0), 1);
        assert_eq!(texture_rotation(0, 0, 1), 3);
        assert_eq!(texture_rotation(-1, 0, 0), 3);
        assert!(texture_rotation(i32::MAX, i32::MIN, i32::MAX) < 4);
    }

    #[test]
    fn test_face_rotation_rules() {
        let position = Point3::new(1, 0, 0);
        assert_eq!(face_rotation(BlockType::GrassBlock, BlockSide::TOP, position), 1);
        assert_eq!(face_rotation(BlockType::GrassBlock, BlockSide::RIGHT, position), 0);
        assert_eq!(face_rotation(BlockType::Stone, BlockSide::RIGHT, position), 1);
        assert_eq!(face_rotation(BlockType::OakPlanks, BlockSide::TOP, position), 0);
    }

    #[test]
    fn test_visibility_rules() {
        assert!(is_face_visible(BlockType::Stone, None));
        assert!(!is_face_visible(BlockType::Stone, Some(BlockType::Dirt)));
        assert!(is_face_visible(BlockType::Stone, Some(BlockType::OakLeaves)));
        assert!(!is_face_visible(BlockType::OakLeaves, Some(BlockType::OakLeaves)));
        assert!(is_face_visible(BlockType::OakLeaves, Some(BlockType::BirchLeaves)));
        assert!(is_face_visible(BlockType::OakLeaves, Some(BlockType::Stone)));
    }

    #[test]
    fn test_single_block_has_six_faces() {
        let mut world = World::new();
        world.set(Point3::new(0, 0, 0), BlockType::Stone);

        let mesh = build_world_mesh(&world, origin(), &RenderConfig::default());
        assert_eq!(mesh.face_count(), 6);
        assert_eq!(mesh.batch(TextureKey::Stone).unwrap().face_count(), 6);
    }

    #[test]
    fn test_shared_opaque_faces_are_culled() {
        let mut world = World::new();
        world.set(Point3::new(0, 0, 0), BlockType::Stone);
        world.set(Point3::new(1, 0, 0), BlockType::Dirt);

        let mesh = build_world_mesh(&world, origin(), &RenderConfig::default());
        assert_eq!(mesh.face_count(), 10);

        let stone = mesh.batch(TextureKey::Stone).unwrap();
        // No stone quad may lie on the shared plane x = 1.
        for quad in stone.vertices.chunks(4) {
            assert!(!quad.iter().all(|vertex| vertex.position[0] == 1.0));
        }
    }

    #[test]
    fn test_opaque_face_next_to_leaves_is_drawn() {
        let mut world = World::new();
        world.set(Point3::new(0, 0, 0), BlockType::Stone);
        world.set(Point3::new(0, 1, 0), BlockType::OakLeaves);

        let mesh = build_world_mesh(&world, origin(), &RenderConfig::default());
        assert_eq!(mesh.batch(TextureKey::Stone).unwrap().face_count(), 6);
        // The leaves hide nothing from the stone, but their own bottom face is drawn too.
        assert_eq!(mesh.batch(TextureKey::OakLeaves).unwrap().face_count(), 6);
    }

    #[test]
    fn test_render_window_is_exclusive() {
        let mut world = World::new();
        world.set(Point3::new(31, 0, 0), BlockType::Sand);
        world.set(Point3::new(33, 0, 0), BlockType::Gravel);
        world.set(Point3::new(0, -52, 0), BlockType::Gravel);
        world.set(Point3::new(0, 51, 0), BlockType::Sand);

        let mesh = build_world_mesh(&world, origin(), &RenderConfig::default());
        assert_eq!(mesh.batch(TextureKey::Sand).unwrap().face_count(), 12);
        assert!(mesh.batch(TextureKey::Gravel).is_none());
    }

    #[test]
    fn test_culling_sees_blocks_outside_render_window() {
        let mut world = World::new();
        world.set(Point3::new(31, 0, 0), BlockType::Sand);
        world.set(Point3::new(32, 0, 0), BlockType::Gravel);

        let mesh = build_world_mesh(&world, origin(), &RenderConfig::default());
        // The +X face is hidden by gravel that is itself outside the window.
        assert_eq!(mesh.batch(TextureKey::Sand).unwrap().face_count(), 5);
        assert!(mesh.batch(TextureKey::Gravel).is_none());
    }

    #[test]
    fn test_empty_world_gives_empty_mesh() {
        let mut manager = MeshManager::new(RenderConfig::default());
        manager.rebuild(&World::new(), origin());
        assert!(manager.world_mesh().is_empty());
    }

    #[test]
    fn test_rotation_is_applied_to_tex_coords() {
        let mut world = World::new();
        let position = Point3::new(1, 0, 0);
        world.set(position, BlockType::Dirt);

        let mesh = build_world_mesh(&world, origin(), &RenderConfig::default());
        let dirt = mesh.batch(TextureKey::Dirt).unwrap();
        let expected = rotated_tex_coords(texture_rotation(1, 0, 0));
        assert_eq!(dirt.vertices[0].tex_coords, expected[0]);
        assert_eq!(dirt.vertices[1].tex_coords, expected[1]);
    }
}
