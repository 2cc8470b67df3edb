//! # World Module
//!
//! This module provides the `World` struct, the sparse block store that is the
//! ground truth of the voxel world.
//!
//! ## Architecture
//!
//! The world maps integer block coordinates directly to block types. Only
//! non-air blocks are stored; any coordinate not present is air. Since there is
//! no fixed extent, any `i32` triple is a valid position and the world grows as
//! chunks are generated.
//!
//! ## Performance Considerations
//!
//! - Lookup, insertion and removal are O(1) amortized using a hash map
//! - Memory grows with the number of stored blocks and is never reclaimed

use cgmath::Point3;
use std::collections::HashMap;

use super::block::block_type::BlockType;

/// Integer coordinate of a block cell.
pub type BlockPosition = Point3<i32>;

/// The sparse voxel world.
///
/// # Examples
///
/// ```
/// use cgmath::Point3;
/// use voxel_sandbox::engine_state::voxels::{block::block_type::BlockType, world::World};
///
/// let mut world = World::new();
/// world.set(Point3::new(0, 0, 0), BlockType::Stone);
/// assert_eq!(world.get(Point3::new(0, 0, 0)), Some(BlockType::Stone));
/// assert_eq!(world.get(Point3::new(0, 1, 0)), None);
/// ```
#[derive(Debug, Default, Clone, PartialEq)]
pub struct World {
    /// Every non-air block, keyed by position.
    blocks: HashMap<BlockPosition, BlockType>,
}

impl World {
    /// Creates a new, empty world.
    ///
    /// # Returns
    ///
    /// A new `World` instance containing only air.
    pub fn new() -> Self {
        World {
            blocks: HashMap::new(),
        }
    }

    /// Returns the block at `position`, or `None` for air.
    pub fn get(&self, position: BlockPosition) -> Option<BlockType> {
        self.blocks.get(&position).copied()
    }

    /// Places `block_type` at `position`, replacing whatever was there.
    pub fn set(&mut self, position: BlockPosition, block_type: BlockType) {
        self.blocks.insert(position, block_type);
    }

    /// Removes the block at `position`.
    ///
    /// # Returns
    ///
    /// The removed block, or `None` if the cell was already air.
    pub fn remove(&mut self, position: BlockPosition) -> Option<BlockType> {
        self.blocks.remove(&position)
    }

    /// Whether any block is stored at `position`.
    pub fn contains(&self, position: BlockPosition) -> bool {
        self.blocks.contains_key(&position)
    }

    /// Whether `position` holds a block that collides and supports standing.
    pub fn is_solid(&self, position: BlockPosition) -> bool {
        self.get(position)
            .is_some_and(|block_type| !block_type.is_transparent())
    }

    /// Whether the avatar may occupy `position`: air or a transparent block.
    pub fn is_passable(&self, position: BlockPosition) -> bool {
        !self.is_solid(position)
    }

    /// Number of stored blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Whether the world holds no blocks at all.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Iterates over every stored block.
    pub fn iter(&self) -> impl Iterator<Item = (BlockPosition, BlockType)> + '_ {
        self.blocks
            .iter()
            .map(|(position, block_type)| (*position, *block_type))
    }
}
