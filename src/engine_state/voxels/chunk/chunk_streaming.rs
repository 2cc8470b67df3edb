//! # Chunk Streaming
//!
//! Keeps the square of chunks around the avatar generated. The manager records
//! which chunk coordinates have been generated so that each chunk is generated
//! at most once, even if the avatar walks back and forth across chunk borders.
//!
//! Chunks are never evicted: memory grows with the explored area.

use std::collections::HashSet;

use cgmath::Point3;
use log::debug;

use super::{
    chunk_coord_of, chunk_coord_of_point, chunk_generation::ChunkGenerator, ChunkCoord,
};
use crate::engine_state::voxels::world::World;

/// Default radius, in chunks, of the square kept generated around the avatar.
pub const DEFAULT_LOAD_DISTANCE: i32 = 4;

/// Tracks generated chunks and generates missing ones near the avatar.
#[derive(Debug, Clone)]
pub struct ChunkStreamingManager {
    generated_chunks: HashSet<ChunkCoord>,
    load_distance: i32,
}

impl ChunkStreamingManager {
    /// Creates a manager with an empty generated set.
    ///
    /// # Arguments
    /// * `load_distance` - Radius in chunks; `(2 * load_distance + 1)²` chunks are kept generated
    pub fn new(load_distance: i32) -> Self {
        ChunkStreamingManager {
            generated_chunks: HashSet::new(),
            load_distance,
        }
    }

    /// Generates every chunk within the load distance of `position` that has not
    /// been generated yet.
    ///
    /// # Arguments
    /// * `world` - The world to generate into
    /// * `generator` - The terrain generator
    /// * `position` - The avatar's feet position
    ///
    /// # Returns
    /// `true` if at least one chunk was generated, in which case the caller should
    /// mark the mesh dirty.
    pub fn ensure_chunks_around(
        &mut self,
        world: &mut World,
        generator: &ChunkGenerator,
        position: Point3<f32>,
    ) -> bool {
        let center = chunk_coord_of_point(position);
        let mut generated_any = false;

        for cx in center.x - self.load_distance..=center.x + self.load_distance {
            for cz in center.y - self.load_distance..=center.y + self.load_distance {
                let chunk = ChunkCoord::new(cx, cz);
                if self.mark_generated(chunk) {
                    generator.generate_chunk(world, cx, cz);
                    generated_any = true;
                }
            }
        }

        if generated_any {
            debug!(
                "Chunk coverage around ({}, {}) complete, {} chunks generated in total",
                center.x,
                center.y,
                self.generated_chunks.len()
            );
        }
        generated_any
    }

    /// Records `chunk` as generated.
    ///
    /// # Returns
    /// `true` if the chunk was not recorded before.
    pub fn mark_generated(&mut self, chunk: ChunkCoord) -> bool {
        self.generated_chunks.insert(chunk)
    }

    /// Whether `chunk` has already been generated.
    pub fn is_generated(&self, chunk: ChunkCoord) -> bool {
        self.generated_chunks.contains(&chunk)
    }

    /// Number of generated chunks.
    pub fn generated_count(&self) -> usize {
        self.generated_chunks.len()
    }

    /// Replaces the generated set with the chunks that contain at least one block
    /// of `world`. Used after loading a snapshot so saved terrain is not
    /// generated over.
    pub fn rebuild_from_world(&mut self, world: &World) {
        self.generated_chunks = world
            .iter()
            .map(|(position, _)| chunk_coord_of(position))
            .collect();
    }
}

impl Default for ChunkStreamingManager {
    fn default() -> Self {
        ChunkStreamingManager::new(DEFAULT_LOAD_DISTANCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::{
        block::block_type::BlockType, chunk::chunk_generation::DEFAULT_BASE_Y,
    };

    #[test]
    fn test_covers_square_around_avatar() {
        let mut world = World::new();
        let generator = ChunkGenerator::new(1, DEFAULT_BASE_Y);
        let mut streaming = ChunkStreamingManager::new(1);

        assert!(streaming.ensure_chunks_around(
            &mut world,
            &generator,
            Point3::new(0.5, 15.0, 0.5)
        ));
        assert_eq!(streaming.generated_count(), 9);
        for cx in -1..=1 {
            for cz in -1..=1 {
                assert!(streaming.is_generated(ChunkCoord::new(cx, cz)));
            }
        }
        assert!(!streaming.is_generated(ChunkCoord::new(2, 0)));
    }

    #[test]
    fn test_chunks_are_generated_once() {
        let mut world = World::new();
        let generator = ChunkGenerator::new(1, DEFAULT_BASE_Y);
        let mut streaming = ChunkStreamingManager::new(1);
        let position = Point3::new(0.5, 15.0, 0.5);

        streaming.ensure_chunks_around(&mut world, &generator, position);
        // A player edit must survive another coverage pass.
        world.remove(Point3::new(0, 8, 0));

        assert!(!streaming.ensure_chunks_around(&mut world, &generator, position));
        assert_eq!(world.get(Point3::new(0, 8, 0)), None);
    }

    #[test]
    fn test_marked_chunk_is_not_generated() {
        let mut world = World::new();
        let generator = ChunkGenerator::new(1, DEFAULT_BASE_Y);
        let mut streaming = ChunkStreamingManager::new(0);

        assert!(streaming.mark_generated(ChunkCoord::new(0, 0)));
        assert!(!streaming.mark_generated(ChunkCoord::new(0, 0)));
        assert!(!streaming.ensure_chunks_around(&mut world, &generator, Point3::new(0.5, 15.0, 0.5)));
        assert!(world.is_empty());
    }

    #[test]
    fn test_moving_generates_only_new_strip() {
        let mut world = World::new();
        let generator = ChunkGenerator::new(1, DEFAULT_BASE_Y);
        let mut streaming = ChunkStreamingManager::new(1);

        streaming.ensure_chunks_around(&mut world, &generator, Point3::new(0.5, 15.0, 0.5));
        streaming.ensure_chunks_around(&mut world, &generator, Point3::new(16.5, 15.0, 0.5));
        assert_eq!(streaming.generated_count(), 12);
    }

    #[test]
    fn test_rebuild_from_world() {
        let mut world = World::new();
        world.set(Point3::new(-1, 3, 0), BlockType::Stone);
        world.set(Point3::new(40, 3, 17), BlockType::Stone);
        let mut streaming = ChunkStreamingManager::new(1);
        streaming.rebuild_from_world(&world);

        assert_eq!(streaming.generated_count(), 2);
        assert!(streaming.is_generated(ChunkCoord::new(-1, 0)));
        assert!(streaming.is_generated(ChunkCoord::new(2, 1)));
    }
}
