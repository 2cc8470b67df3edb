//! # Block Module
//!
//! This module provides the block-related functionality for the voxel engine:
//! block type definitions, block faces, and the texture key assigned to each face.
//!
//! Texture keys are only names; loading the image behind a key is the job of
//! the external asset loader, which can resolve a key with [`TextureKey::file_stem`].

use block_side::BlockSide;
use block_type::BlockType;

pub mod block_side;
pub mod block_type;

/// Number of crack overlay stages shown while a block is being mined.
pub const DESTROY_STAGE_COUNT: u8 = 10;

const DESTROY_STAGE_NAMES: [&str; DESTROY_STAGE_COUNT as usize] = [
    "destroy_stage_0",
    "destroy_stage_1",
    "destroy_stage_2",
    "destroy_stage_3",
    "destroy_stage_4",
    "destroy_stage_5",
    "destroy_stage_6",
    "destroy_stage_7",
    "destroy_stage_8",
    "destroy_stage_9",
];

/// Identifies one texture of the block atlas.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TextureKey {
    /// Grass block top
    GrassBlockTop,
    /// Grass block side
    GrassBlockSide,
    /// Grass block bottom, drawn with the dirt image
    GrassBlockBottom,
    /// Dirt
    Dirt,
    /// Stone
    Stone,
    /// Cobblestone
    Cobblestone,
    /// Sand
    Sand,
    /// Gravel
    Gravel,
    /// Oak log rings
    OakLogTop,
    /// Oak log bark
    OakLogSide,
    /// Oak leaves
    OakLeaves,
    /// Oak planks
    OakPlanks,
    /// Birch log rings
    BirchLogTop,
    /// Birch log bark
    BirchLogSide,
    /// Birch leaves
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
    /// Crafting table top
    CraftingTableTop,
    /// Crafting table side
    CraftingTableSide,
    /// Crafting table front
    CraftingTableFront,
    /// Crack overlay for a break stage in `0..DESTROY_STAGE_COUNT`
    DestroyStage(u8),
}

impl TextureKey {
    /// The identifier of this texture, as used by the renderer.
    pub fn name(self) -> &'static str {
        match self {
            TextureKey::GrassBlockTop => "grass_block_top",
            TextureKey::GrassBlockSide => "grass_block_side",
            TextureKey::GrassBlockBottom => "grass_block_bottom",
            TextureKey::Dirt => "dirt",
            TextureKey::Stone => "stone",
            TextureKey::Cobblestone => "cobblestone",
            TextureKey::Sand => "sand",
            TextureKey::Gravel => "gravel",
            TextureKey::OakLogTop => "oak_log_top",
            TextureKey::OakLogSide => "oak_log_side",
            TextureKey::OakLeaves => "oak_leaves",
            TextureKey::OakPlanks => "oak_planks",
            TextureKey::BirchLogTop => "birch_log_top",
            TextureKey::BirchLogSide => "birch_log_side",
            TextureKey::BirchLeaves => "birch_leaves",
            TextureKey::BirchPlanks => "birch_planks",
            TextureKey::CoalOre => "coal_ore",
            TextureKey::IronOre => "iron_ore",
            TextureKey::GoldOre => "gold_ore",
            TextureKey::DiamondOre => "diamond_ore",
            TextureKey::LapisOre => "lapis_ore",
            TextureKey::CraftingTableTop => "crafting_table_top",
            TextureKey::CraftingTableSide => "crafting_table_side",
            TextureKey::CraftingTableFront => "crafting_table_front",
            TextureKey::DestroyStage(stage) => {
                DESTROY_STAGE_NAMES[usize::from(stage.min(DESTROY_STAGE_COUNT - 1))]
            }
        }
    }

    /// The image file stem (without extension) the asset loader should read for this key.
    ///
    /// Most keys share their image name; a few faces reuse another block's image.
    pub fn file_stem(self) -> &'static str {
        match self {
            TextureKey::GrassBlockBottom => "dirt",
            TextureKey::OakLogSide => "oak_log",
            TextureKey::BirchLogSide => "birch_log",
            other => other.name(),
        }
    }

    /// Picks the texture for one face of a block.
    ///
    /// # Arguments
    /// * `block_type` - The block being drawn
    /// * `side` - The face being drawn
    ///
    /// # Returns
    /// The texture key for that face.
    pub fn for_face(block_type: BlockType, side: BlockSide) -> TextureKey {
        match block_type {
            BlockType::GrassBlock => match side {
                BlockSide::TOP => TextureKey::GrassBlockTop,
                BlockSide::BOTTOM => TextureKey::GrassBlockBottom,
                _ => TextureKey::GrassBlockSide,
            },
            BlockType::OakLog if side.is_vertical_axis() => TextureKey::OakLogTop,
            BlockType::OakLog => TextureKey::OakLogSide,
            BlockType::BirchLog if side.is_vertical_axis() => TextureKey::BirchLogTop,
            BlockType::BirchLog => TextureKey::BirchLogSide,
            BlockType::CraftingTable => match side {
                BlockSide::TOP => TextureKey::CraftingTableTop,
                BlockSide::BOTTOM => TextureKey::OakPlanks,
                BlockSide::FRONT => TextureKey::CraftingTableFront,
                _ => TextureKey::CraftingTableSide,
            },
            BlockType::Stone => TextureKey::Stone,
            BlockType::Dirt => TextureKey::Dirt,
            BlockType::Sand => TextureKey::Sand,
            BlockType::Gravel => TextureKey::Gravel,
            BlockType::Cobblestone => TextureKey::Cobblestone,
            BlockType::OakLeaves => TextureKey::OakLeaves,
            BlockType::OakPlanks => TextureKey::OakPlanks,
            BlockType::BirchLeaves => TextureKey::BirchLeaves,
            BlockType::BirchPlanks => TextureKey::BirchPlanks,
            BlockType::CoalOre => TextureKey::CoalOre,
            BlockType::IronOre => TextureKey::IronOre,
            BlockType::GoldOre => TextureKey::GoldOre,
            BlockType::DiamondOre => TextureKey::DiamondOre,
            BlockType::LapisOre => TextureKey::LapisOre,
        }
    }
}
