//! Vertex data structures for voxel rendering.
//!
//! This module defines the vertex format handed to the external renderer.

use cgmath::Point3;

/// A vertex of a block face quad.
///
/// The texture is not part of the vertex: quads are batched per texture key.
///
/// # Memory Layout
/// - Position: 3x f32 (12 bytes)
/// - Texture Coordinates: [f32; 2] (8 bytes)
///
/// Total size: 20 bytes
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Position in world space
    pub position: [f32; 3],
    /// UV texture coordinates (normalized 0.0-1.0)
    pub tex_coords: [f32; 2],
}

impl Vertex {
    /// Creates a new vertex.
    ///
    /// # Arguments
    /// * `position` - The 3D position of the vertex in world space
    /// * `tex_coords` - UV coordinates in `[0, 1]`
    ///
    /// # Returns
    /// A new `Vertex` instance
    pub fn new(position: Point3<f32>, tex_coords: [f32; 2]) -> Self {
        Vertex {
            position: position.into(),
            tex_coords,
        }
    }
}
