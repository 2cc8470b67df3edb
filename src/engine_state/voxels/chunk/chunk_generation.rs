//! # Chunk Generation
//!
//! Fills one 16x16 chunk column with flat layered terrain: stone, a dirt band and
//! a grass surface, with ores rolled into the stone and occasional trees on top.
//!
//! ## Determinism
//!
//! Every chunk draws from its own `fastrand::Rng`, seeded from the world seed and
//! the chunk coordinate. The same seed therefore produces the same chunk no
//! matter in which order chunks are streamed in.

use cgmath::Point3;
use log::info;

use super::{
    chunk_origin,
    tree_generation::{generate_tree, TreeKind},
    ChunkCoord, CHUNK_DIMENSION,
};
use crate::engine_state::voxels::{block::block_type::BlockType, world::World};

/// Default height of the grass surface.
pub const DEFAULT_BASE_Y: i32 = 8;
/// Chance that a chunk attempts to place trees at all.
const TREE_CHANCE: f64 = 0.15;
/// Chance that a placed tree is a birch rather than an oak.
const BIRCH_CHANCE: f64 = 0.3;
/// Distance from the chunk border within which no trunk is placed.
const TREE_MARGIN: i32 = 2;
/// Upper bound of an ore roll; a roll succeeds when it is at most the ore's rarity.
const ORE_ROLL_RANGE: u32 = 1000;

/// One entry of the ore table.
#[derive(Copy, Clone, Debug)]
struct OreBand {
    ore: BlockType,
    min_y: i32,
    max_y: i32,
    rarity: u32,
}

/// Generates terrain for chunks of a single world.
#[derive(Clone, Debug)]
pub struct ChunkGenerator {
    seed: u64,
    base_y: i32,
}

impl ChunkGenerator {
    /// Creates a generator.
    ///
    /// # Arguments
    /// * `seed` - World seed; the same seed always yields the same terrain
    /// * `base_y` - Height of the grass surface
    pub fn new(seed: u64, base_y: i32) -> Self {
        ChunkGenerator { seed, base_y }
    }

    /// The ore table in roll order. The first successful roll wins.
    fn ore_bands(&self) -> [OreBand; 5] {
        let base_y = self.base_y;
        [
            OreBand { ore: BlockType::CoalOre, min_y: 0, max_y: base_y - 1, rarity: 80 },
            OreBand { ore: BlockType::IronOre, min_y: 2, max_y: base_y - 3, rarity: 50 },
            OreBand { ore: BlockType::GoldOre, min_y: 4, max_y: base_y - 5, rarity: 15 },
            OreBand { ore: BlockType::LapisOre, min_y: 4, max_y: base_y - 5, rarity: 10 },
            OreBand { ore: BlockType::DiamondOre, min_y: 5, max_y: base_y - 6, rarity: 5 },
        ]
    }

    /// Derives the RNG for one chunk from the world seed.
    fn chunk_rng(&self, chunk: ChunkCoord) -> fastrand::Rng {
        let x = chunk.x as i64 as u64;
        let z = chunk.y as i64 as u64;
        let mixed = self.seed
            ^ x.wrapping_mul(0x9E37_79B9_7F4A_7C15)
            ^ z.wrapping_mul(0xC2B2_AE3D_27D4_EB4F).rotate_left(31);
        fastrand::Rng::with_seed(mixed)
    }

    /// Writes the blocks of chunk `(chunk_x, chunk_z)` into `world`.
    ///
    /// Calling this twice for the same chunk overwrites the terrain layers again;
    /// the streaming manager makes sure that does not happen.
    ///
    /// # Arguments
    /// * `world` - The world to fill
    /// * `chunk_x`, `chunk_z` - The chunk coordinate
    pub fn generate_chunk(&self, world: &mut World, chunk_x: i32, chunk_z: i32) {
        let chunk = ChunkCoord::new(chunk_x, chunk_z);
        let mut rng = self.chunk_rng(chunk);
        let (start_x, start_z) = chunk_origin(chunk);
        let base_y = self.base_y;
        let ore_bands = self.ore_bands();

        for dx in 0..CHUNK_DIMENSION {
            for dz in 0..CHUNK_DIMENSION {
                let x = start_x + dx;
                let z = start_z + dz;

                for y in 0..base_y - 4 {
                    world.set(Point3::new(x, y, z), BlockType::Stone);
                }
                for y in base_y - 4..base_y {
                    world.set(Point3::new(x, y, z), BlockType::Dirt);
                }
                world.set(Point3::new(x, base_y, z), BlockType::GrassBlock);

                for y in 1..base_y - 1 {
                    let position = Point3::new(x, y, z);
                    if world.get(position) != Some(BlockType::Stone) {
                        continue;
                    }
                    let ore = ore_bands.iter().find(|band| {
                        (band.min_y..=band.max_y).contains(&y)
                            && rng.u32(1..=ORE_ROLL_RANGE) <= band.rarity
                    });
                    if let Some(band) = ore {
                        world.set(position, band.ore);
                    }
                }
            }
        }

        if rng.f64() < TREE_CHANCE {
            let attempts = rng.u32(1..=3);
            for _ in 0..attempts {
                let x = start_x + rng.i32(TREE_MARGIN..=CHUNK_DIMENSION - 1 - TREE_MARGIN);
                let z = start_z + rng.i32(TREE_MARGIN..=CHUNK_DIMENSION - 1 - TREE_MARGIN);
                if world.get(Point3::new(x, base_y, z)) != Some(BlockType::GrassBlock) {
                    continue;
                }
                let kind = if rng.f64() < BIRCH_CHANCE {
                    TreeKind::Birch
                } else {
                    TreeKind::Oak
                };
                generate_tree(world, &mut rng, x, base_y + 1, z, kind);
            }
        }

        info!("Generated chunk at ({}, {})", chunk_x, chunk_z);
    }
}

impl Default for ChunkGenerator {
    fn default() -> Self {
        ChunkGenerator::new(0, DEFAULT_BASE_Y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_is_grass_everywhere() {
        let mut world = World::new();
        ChunkGenerator::new(42, DEFAULT_BASE_Y).generate_chunk(&mut world, 0, 0);

        for x in 0..CHUNK_DIMENSION {
            for z in 0..CHUNK_DIMENSION {
                assert_eq!(
                    world.get(Point3::new(x, 8, z)),
                    Some(BlockType::GrassBlock),
                    "missing grass at ({x}, 8, {z})"
                );
            }
        }
    }

    #[test]
    fn test_layering() {
        let mut world = World::new();
        ChunkGenerator::new(5, DEFAULT_BASE_Y).generate_chunk(&mut world, -1, 2);
        let (x, z) = (-16 + 4, 32 + 9);

        assert_eq!(world.get(Point3::new(x, 0, z)), Some(BlockType::Stone));
        for y in 4..8 {
            assert_eq!(world.get(Point3::new(x, y, z)), Some(BlockType::Dirt));
        }
        for y in 1..4 {
            let block = world.get(Point3::new(x, y, z));
            assert!(matches!(
                block,
                Some(BlockType::Stone | BlockType::CoalOre | BlockType::IronOre)
            ));
        }
        assert_eq!(world.get(Point3::new(x, -1, z)), None);
    }

    #[test]
    fn test_trunks_stay_inside_margin() {
        for seed in 0..64 {
            let mut world = World::new();
            ChunkGenerator::new(seed, DEFAULT_BASE_Y).generate_chunk(&mut world, 0, 0);

            for (position, block_type) in world.iter() {
                if matches!(block_type, BlockType::OakLog | BlockType::BirchLog) {
                    assert!((2..=13).contains(&position.x), "seed {seed}: {position:?}");
                    assert!((2..=13).contains(&position.z), "seed {seed}: {position:?}");
                }
            }
        }
    }

    #[test]
    fn test_same_seed_same_chunk() {
        let generator = ChunkGenerator::new(1234, DEFAULT_BASE_Y);
        let mut first = World::new();
        let mut second = World::new();
        generator.generate_chunk(&mut first, 3, -7);
        generator.generate_chunk(&mut second, 3, -7);

        assert_eq!(first, second);
    }

    #[test]
    fn test_generation_order_does_not_matter() {
        let generator = ChunkGenerator::new(99, DEFAULT_BASE_Y);
        let mut forward = World::new();
        generator.generate_chunk(&mut forward, 0, 0);
        generator.generate_chunk(&mut forward, 5, 5);
        let mut backward = World::new();
        generator.generate_chunk(&mut backward, 5, 5);
        generator.generate_chunk(&mut backward, 0, 0);

        assert_eq!(forward, backward);
    }
}
