//! Mesh data structures for voxel rendering.
//!
//! This module turns faces into GPU-friendly vertex and index buffers, batched
//! by texture so the renderer can draw each batch with a single texture bind.

use std::collections::BTreeMap;

use super::face::Face;
use crate::engine_state::{rendering::Vertex, voxels::block::TextureKey};

/// The vertices and indices of every quad drawn with one texture.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct MeshBatch {
    /// The vertex data, four per quad
    pub vertices: Vec<Vertex>,
    /// The index data, six per quad
    pub indices: Vec<u32>,
}

impl MeshBatch {
    /// Number of quads in this batch.
    pub fn face_count(&self) -> usize {
        self.vertices.len() / 4
    }
}

/// A complete world mesh: one batch per texture key.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Mesh {
    batches: BTreeMap<TextureKey, MeshBatch>,
}

impl Mesh {
    /// Creates a new, empty mesh.
    pub fn new() -> Self {
        Mesh {
            batches: BTreeMap::new(),
        }
    }

    /// Appends a face to the batch of its texture.
    pub fn add_face(&mut self, face: &Face) {
        let batch = self.batches.entry(face.texture).or_default();
        let index_offset = batch.vertices.len() as u32;
        batch.vertices.extend(Self::generate_face_vertices(face));
        batch
            .indices
            .extend(Self::generate_face_indices(index_offset));
    }

    /// Generates the four vertices of a face, in corner order.
    pub fn generate_face_vertices(face: &Face) -> [Vertex; 4] {
        [0, 1, 2, 3].map(|i| Vertex::new(face.corners[i], face.tex_coords[i]))
    }

    /// Generates the two triangles of a quad whose first vertex is `offset`.
    pub fn generate_face_indices(offset: u32) -> [u32; 6] {
        [
            offset,
            offset + 1,
            offset + 2,
            offset,
            offset + 2,
            offset + 3,
        ]
    }

    /// The batch for `texture`, if any face uses it.
    pub fn batch(&self, texture: TextureKey) -> Option<&MeshBatch> {
        self.batches.get(&texture)
    }

    /// Iterates over every non-empty batch in texture order.
    pub fn batches(&self) -> impl Iterator<Item = (TextureKey, &MeshBatch)> + '_ {
        self.batches.iter().map(|(texture, batch)| (*texture, batch))
    }

    /// Total number of quads across all batches.
    pub fn face_count(&self) -> usize {
        self.batches.values().map(MeshBatch::face_count).sum()
    }

    /// Whether the mesh holds no quads.
    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::block::block_side::BlockSide;
    use cgmath::Point3;

    #[test]
    fn test_faces_are_batched_by_texture() {
        let mut mesh = Mesh::new();
        mesh.add_face(&Face::new(Point3::new(0, 0, 0), BlockSide::TOP, TextureKey::Stone, 0));
        mesh.add_face(&Face::new(Point3::new(1, 0, 0), BlockSide::TOP, TextureKey::Stone, 2));
        mesh.add_face(&Face::new(Point3::new(0, 0, 0), BlockSide::LEFT, TextureKey::Dirt, 0));

        assert_eq!(mesh.face_count(), 3);
        let stone = mesh.batch(TextureKey::Stone).unwrap();
        assert_eq!(stone.face_count(), 2);
        assert_eq!(stone.indices, vec![0, 1, 2, 0, 2, 3, 4, 5, 6, 4, 6, 7]);
        assert_eq!(mesh.batch(TextureKey::Dirt).unwrap().face_count(), 1);
        assert!(mesh.batch(TextureKey::Sand).is_none());
    }
}
