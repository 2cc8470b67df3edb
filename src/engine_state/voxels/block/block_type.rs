//! # Block Type Module
//!
//! This module defines the closed set of block types in the voxel world together
//! with their static metadata: name, transparency, break time and texture rotation.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Enumerates all block types that can exist in the world.
///
/// Air is not a block type: an empty cell is simply absent from the world.
/// Serialized by its snake_case name, which is also the name used in world snapshots.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockType {
    /// Plain stone, the bulk of the underground.
    Stone,
    /// Dirt layer beneath the surface.
    Dirt,
    /// Surface block with a grass top, grass sides and a dirt bottom.
    GrassBlock,
    /// Sand
    Sand,
    /// Gravel
    Gravel,
    /// Cobblestone
    Cobblestone,
    /// Oak trunk, with ring textures top and bottom.
    OakLog,
    /// Oak foliage, transparent.
    OakLeaves,
    /// Oak planks
    OakPlanks,
    /// Birch trunk, with ring textures top and bottom.
    BirchLog,
    /// Birch foliage, transparent.
    BirchLeaves,
    /// Birch planks
    BirchPlanks,
    /// Coal ore
    CoalOre,
    /// Iron ore
    IronOre,
    /// Gold ore
    GoldOre,
    /// Diamond ore
    DiamondOre,
    /// Lapis ore
    LapisOre,
    /// Crafting table, with a distinct top, front and sides.
    CraftingTable,
}

/// Static metadata of a block type, as one record.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BlockProperties {
    /// Snapshot name
    pub name: &'static str,
    /// Does not occlude neighbours and never collides
    pub transparent: bool,
    /// Survival break time in seconds
    pub break_time: f32,
    /// Texture rotates with position
    pub rotatable: bool,
}

/// Lookup from snapshot name to block type.
static BLOCK_TYPE_BY_NAME: phf::Map<&'static str, BlockType> = phf::phf_map! {
    "stone" => BlockType::Stone,
    "dirt" => BlockType::Dirt,
    "grass_block" => BlockType::GrassBlock,
    "sand" => BlockType::Sand,
    "gravel" => BlockType::Gravel,
    "cobblestone" => BlockType::Cobblestone,
    "oak_log" => BlockType::OakLog,
    "oak_leaves" => BlockType::OakLeaves,
    "oak_planks" => BlockType::OakPlanks,
    "birch_log" => BlockType::BirchLog,
    "birch_leaves" => BlockType::BirchLeaves,
    "birch_planks" => BlockType::BirchPlanks,
    "coal_ore" => BlockType::CoalOre,
    "iron_ore" => BlockType::IronOre,
    "gold_ore" => BlockType::GoldOre,
    "diamond_ore" => BlockType::DiamondOre,
    "lapis_ore" => BlockType::LapisOre,
    "crafting_table" => BlockType::CraftingTable,
};

impl BlockType {
    /// Every block type, in declaration order.
    pub const ALL: [BlockType; 18] = [
        BlockType::Stone,
        BlockType::Dirt,
        BlockType::GrassBlock,
        BlockType::Sand,
        BlockType::Gravel,
        BlockType::Cobblestone,
        BlockType::OakLog,
        BlockType::OakLeaves,
        BlockType::OakPlanks,
        BlockType::BirchLog,
        BlockType::BirchLeaves,
        BlockType::BirchPlanks,
        BlockType::CoalOre,
        BlockType::IronOre,
        BlockType::GoldOre,
        BlockType::DiamondOre,
        BlockType::LapisOre,
        BlockType::CraftingTable,
    ];

    /// The snapshot name of this block type.
    pub fn name(self) -> &'static str {
        match self {
            BlockType::Stone => "stone",
            BlockType::Dirt => "dirt",
            BlockType::GrassBlock => "grass_block",
            BlockType::Sand => "sand",
            BlockType::Gravel => "gravel",
            BlockType::Cobblestone => "cobblestone",
            BlockType::OakLog => "oak_log",
            BlockType::OakLeaves => "oak_leaves",
            BlockType::OakPlanks => "oak_planks",
            BlockType::BirchLog => "birch_log",
            BlockType::BirchLeaves => "birch_leaves",
            BlockType::BirchPlanks => "birch_planks",
            BlockType::CoalOre => "coal_ore",
            BlockType::IronOre => "iron_ore",
            BlockType::GoldOre => "gold_ore",
            BlockType::DiamondOre => "diamond_ore",
            BlockType::LapisOre => "lapis_ore",
            BlockType::CraftingTable => "crafting_table",
        }
    }

    /// Looks a block type up by its snapshot name.
    ///
    /// # Arguments
    /// * `name` - A snake_case block name such as `"grass_block"`
    ///
    /// # Returns
    /// The matching block type, or `EngineError::UnknownBlockType`.
    pub fn from_name(name: &str) -> Result<Self, EngineError> {
        BLOCK_TYPE_BY_NAME
            .get(name)
            .copied()
            .ok_or_else(|| EngineError::UnknownBlockType(name.to_string()))
    }

    /// Whether the block lets light and sight through.
    ///
    /// Transparent blocks are rendered but never collide and never count as
    /// support for standing.
    pub fn is_transparent(self) -> bool {
        matches!(self, BlockType::OakLeaves | BlockType::BirchLeaves)
    }

    /// Seconds of continuous survival-mode mining needed to break the block.
    pub fn break_time(self) -> f32 {
        match self {
            BlockType::Dirt | BlockType::Sand => 0.5,
            BlockType::GrassBlock | BlockType::Gravel => 0.6,
            BlockType::OakLeaves | BlockType::BirchLeaves => 0.2,
            BlockType::Stone => 1.5,
            BlockType::Cobblestone
            | BlockType::OakLog
            | BlockType::OakPlanks
            | BlockType::BirchLog
            | BlockType::BirchPlanks => 2.0,
            BlockType::CraftingTable => 2.5,
            BlockType::CoalOre
            | BlockType::IronOre
            | BlockType::GoldOre
            | BlockType::DiamondOre
            | BlockType::LapisOre => 3.0,
        }
    }

    /// Whether the block's texture is rotated per position to break up tiling.
    ///
    /// Grass only rotates its top face; callers check the face separately.
    pub fn is_rotatable(self) -> bool {
        matches!(
            self,
            BlockType::GrassBlock
                | BlockType::Dirt
                | BlockType::Sand
                | BlockType::Stone
                | BlockType::OakLeaves
                | BlockType::BirchLeaves
                | BlockType::Gravel
                | BlockType::CoalOre
                | BlockType::IronOre
                | BlockType::GoldOre
                | BlockType::DiamondOre
                | BlockType::LapisOre
        )
    }

    /// All static metadata of the block type.
    pub fn properties(self) -> BlockProperties {
        BlockProperties {
            name: self.name(),
            transparent: self.is_transparent(),
            break_time: self.break_time(),
            rotatable: self.is_rotatable(),
        }
    }

    /// Whether a tree may grow with this block as ground.
    pub fn supports_trees(self) -> bool {
        matches!(self, BlockType::GrassBlock | BlockType::Dirt)
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
