//! # Tree Generation
//!
//! Grows a single oak or birch tree into the world: a vertical log trunk and a
//! roughly spherical canopy of leaves with randomly trimmed corners.

use cgmath::Point3;

use crate::engine_state::voxels::{block::block_type::BlockType, world::World};

/// Shortest possible trunk, in blocks.
pub const MIN_TRUNK_HEIGHT: i32 = 4;
/// Tallest possible trunk, in blocks.
pub const MAX_TRUNK_HEIGHT: i32 = 6;
/// Vertical clearance required in the columns around the trunk.
const CLEARANCE_HEIGHT: i32 = 5;
/// Chance to drop a canopy corner on a radius-2 layer.
const CORNER_TRIM_CHANCE: f64 = 0.5;
/// Chance to drop an edge cell on a radius-2 layer.
const EDGE_TRIM_CHANCE: f64 = 0.2;

/// The tree species, which selects the log and leaf blocks.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TreeKind {
    /// Oak tree
    Oak,
    /// Birch tree
    Birch,
}

impl TreeKind {
    /// The trunk block.
    pub fn log(self) -> BlockType {
        match self {
            TreeKind::Oak => BlockType::OakLog,
            TreeKind::Birch => BlockType::BirchLog,
        }
    }

    /// The canopy block.
    pub fn leaves(self) -> BlockType {
        match self {
            TreeKind::Oak => BlockType::OakLeaves,
            TreeKind::Birch => BlockType::BirchLeaves,
        }
    }
}

/// Checks whether a tree may grow with its lowest log at `base`.
///
/// The trunk column must stand on grass or dirt. Each of the eight surrounding
/// columns must have grass, dirt, air or foliage as ground, and no solid block in
/// the five cells above it.
fn can_grow_at(world: &World, base: Point3<i32>) -> bool {
    for dx in -1..=1 {
        for dz in -1..=1 {
            if dx == 0 && dz == 0 {
                continue;
            }

            let ground = world.get(Point3::new(base.x + dx, base.y - 1, base.z + dz));
            if let Some(ground) = ground {
                if !ground.supports_trees() && !ground.is_transparent() {
                    return false;
                }
            }

            for dy in 0..CLEARANCE_HEIGHT {
                if world.is_solid(Point3::new(base.x + dx, base.y + dy, base.z + dz)) {
                    return false;
                }
            }
        }
    }

    world
        .get(Point3::new(base.x, base.y - 1, base.z))
        .is_some_and(BlockType::supports_trees)
}

/// Attempts to grow a tree whose lowest log sits at `(x, y, z)`.
///
/// # Arguments
/// * `world` - The world to place the tree into
/// * `rng` - Source of randomness for trunk height and canopy shape
/// * `x`, `y`, `z` - Position of the lowest trunk block
/// * `kind` - The tree species
///
/// # Returns
/// `true` if the tree was placed. On `false` the world is left unchanged.
pub fn generate_tree(
    world: &mut World,
    rng: &mut fastrand::Rng,
    x: i32,
    y: i32,
    z: i32,
    kind: TreeKind,
) -> bool {
    let base = Point3::new(x, y, z);
    if !can_grow_at(world, base) {
        return false;
    }

    let trunk_height = rng.i32(MIN_TRUNK_HEIGHT..=MAX_TRUNK_HEIGHT);
    let mut placed_logs: Vec<Point3<i32>> = Vec::with_capacity(trunk_height as usize);
    for dy in 0..trunk_height {
        let log_position = Point3::new(x, y + dy, z);
        if world.is_solid(log_position) {
            for placed in placed_logs {
                world.remove(placed);
            }
            return false;
        }
        world.set(log_position, kind.log());
        placed_logs.push(log_position);
    }

    let trunk_top = y + trunk_height;
    let leaf_base_y = trunk_top - 2;
    let leaf_layers = rng.i32(3..=4);

    for layer in 0..leaf_layers {
        let layer_y = leaf_base_y + layer;
        let radius: i32 = if layer == leaf_layers - 1 || leaf_layers == 1 {
            1
        } else {
            2
        };

        for dx in -radius..=radius {
            for dz in -radius..=radius {
                if dx == 0 && dz == 0 && layer_y < trunk_top {
                    continue;
                }
                if radius == 2 {
                    let corner = dx.abs() == 2 && dz.abs() == 2;
                    if corner && rng.f64() < CORNER_TRIM_CHANCE {
                        continue;
                    }
                    let edge = (dx.abs() == 2 || dz.abs() == 2) && dx.abs() != dz.abs();
                    if edge && rng.f64() < EDGE_TRIM_CHANCE {
                        continue;
                    }
                }

                let leaf_position = Point3::new(x + dx, layer_y, z + dz);
                if world.is_passable(leaf_position) {
                    world.set(leaf_position, kind.leaves());
                }
            }
        }
    }

    true
}
