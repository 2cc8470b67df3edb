//! # Voxel World
//!
//! This module contains the world data of the engine: what blocks exist, where
//! they are, how new terrain is produced and how the world is persisted.
//!
//! ## Architecture
//!
//! * **Block**: closed set of block types with static properties and face textures
//! * **World**: sparse map from integer position to block type, the ground truth
//! * **Chunk**: 16x16 column coordinates, terrain generation and streaming
//! * **Snapshot**: JSON persistence of the full world
//!
//! ## Data Flow
//!
//! 1. The streaming manager notices ungenerated chunks near the avatar
//! 2. The chunk generator writes their blocks into the world
//! 3. The engine marks the mesh dirty
//! 4. Mining and placement edit the world directly and mark the mesh dirty

pub mod block;
pub mod chunk;
pub mod snapshot;
pub mod world;
