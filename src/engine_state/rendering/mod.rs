//! Rendering data for the voxel engine.
//!
//! The engine does not talk to a graphics API. It produces textured quads batched
//! by texture key, which an external renderer uploads and draws.

pub mod meshing;
mod vertex;

// Re-export commonly used types
pub use meshing::MeshManager;
pub use vertex::Vertex;
