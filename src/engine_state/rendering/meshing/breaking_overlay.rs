//! Crack overlay for the block being mined.
//!
//! The overlay is a cube slightly larger than the block so its faces are drawn
//! over the block's own faces without z-fighting.

use cgmath::Point3;

use super::mesh::{Face, Mesh};
use crate::engine_state::voxels::{
    block::{block_side::BlockSide, TextureKey, DESTROY_STAGE_COUNT},
    world::BlockPosition,
};

/// Distance the overlay extends past each side of the block.
const OVERLAY_INSET: f32 = 0.001;

/// Builds the six crack quads for `position` at break `stage`.
///
/// # Arguments
/// * `position` - The block being mined
/// * `stage` - Break progress in `0..DESTROY_STAGE_COUNT`, clamped
pub fn build_breaking_overlay(position: BlockPosition, stage: u8) -> Mesh {
    let stage = stage.min(DESTROY_STAGE_COUNT - 1);
    let origin = Point3::new(
        position.x as f32 - OVERLAY_INSET,
        position.y as f32 - OVERLAY_INSET,
        position.z as f32 - OVERLAY_INSET,
    );
    let size = 1.0 + 2.0 * OVERLAY_INSET;

    let mut mesh = Mesh::new();
    for side in BlockSide::all() {
        mesh.add_face(&Face::scaled(origin, size, side, TextureKey::DestroyStage(stage), 0));
    }
    mesh
}
