//! Mesh data structures for voxel rendering.
//!
//! # Architecture
//! - [`Mesh`]: quads grouped into one vertex/index batch per texture key
//! - [`Face`]: a single textured quad with world-space corners
//!
//! # Usage
//! ```
//! use cgmath::Point3;
//! use voxel_sandbox::engine_state::{
//!     rendering::meshing::mesh::{Face, Mesh},
//!     voxels::block::{block_side::BlockSide, TextureKey},
//! };
//!
//! let mut mesh = Mesh::new();
//! mesh.add_face(&Face::new(Point3::new(0, 0, 0), BlockSide::TOP, TextureKey::Stone, 0));
//! assert_eq!(mesh.face_count(), 1);
//! ```

mod face;
mod mesh;

pub use face::{rotated_tex_coords, Face};
pub use mesh::*;
