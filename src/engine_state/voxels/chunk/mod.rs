//! # Chunk Module
//!
//! Chunks are 16x16 columns of the world on the X/Z plane, unbounded in Y. They
//! are the unit of procedural generation and streaming. Block data itself lives
//! in the [`World`](super::world::World); a chunk is only a coordinate.
//!
//! ## Submodules
//! - `chunk_generation`: seeded terrain, ore and tree placement for one chunk
//! - `tree_generation`: growth checks and shapes for individual trees
//! - `chunk_streaming`: keeps the chunks around the avatar generated

use cgmath::{Point2, Point3};

use super::world::BlockPosition;

pub mod chunk_generation;
pub mod chunk_streaming;
pub mod tree_generation;

/// The width and depth of a chunk in blocks.
pub const CHUNK_DIMENSION: i32 = 16;

/// Chunk coordinate: `x` and `y` hold the chunk's X and Z indices.
pub type ChunkCoord = Point2<i32>;

/// Returns the chunk containing a block position, using floor division so
/// negative coordinates map to negative chunks.
pub fn chunk_coord_of(position: BlockPosition) -> ChunkCoord {
    Point2::new(
        position.x.div_euclid(CHUNK_DIMENSION),
        position.z.div_euclid(CHUNK_DIMENSION),
    )
}

/// Returns the chunk containing a continuous world position.
pub fn chunk_coord_of_point(position: Point3<f32>) -> ChunkCoord {
    Point2::new(
        (position.x / CHUNK_DIMENSION as f32).floor() as i32,
        (position.z / CHUNK_DIMENSION as f32).floor() as i32,
    )
}

/// The world-space block X/Z of a chunk's first column.
pub fn chunk_origin(chunk: ChunkCoord) -> (i32, i32) {
    (chunk.x * CHUNK_DIMENSION, chunk.y * CHUNK_DIMENSION)
}
