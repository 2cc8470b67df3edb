//! # World Snapshots
//!
//! Full-world persistence as a JSON object mapping `"x,y,z"` keys to block names:
//!
//! ```json
//! {
//!   "0,8,0": "grass_block",
//!   "-3,2,17": "iron_ore"
//! }
//! ```
//!
//! Loading never fails from the caller's point of view: a missing, empty or
//! malformed file yields an empty world and a log entry, and the game starts
//! fresh. Saving reports I/O errors to the caller.

use std::{collections::BTreeMap, fs, io::ErrorKind, path::Path};

use cgmath::Point3;
use log::{error, info, warn};
use serde::{Deserialize, Serialize};

use super::{
    block::block_type::BlockType,
    world::{BlockPosition, World},
};
use crate::error::{EngineError, EngineResult};

/// Serialized form of a world.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorldSnapshot {
    blocks: BTreeMap<String, String>,
}

/// Formats a block position as a snapshot key.
pub fn format_block_key(position: BlockPosition) -> String {
    format!("{},{},{}", position.x, position.y, position.z)
}

/// Parses a `"x,y,z"` snapshot key.
///
/// # Returns
/// The block position, or `EngineError::InvalidBlockKey` if the key does not
/// consist of exactly three comma separated integers.
pub fn parse_block_key(key: &str) -> EngineResult<BlockPosition> {
    let invalid = || EngineError::InvalidBlockKey(key.to_string());
    let mut parts = key.split(',').map(|part| part.trim().parse::<i32>());

    let x = parts.next().ok_or_else(invalid)?.map_err(|_| invalid())?;
    let y = parts.next().ok_or_else(invalid)?.map_err(|_| invalid())?;
    let z = parts.next().ok_or_else(invalid)?.map_err(|_| invalid())?;
    if parts.next().is_some() {
        return Err(invalid());
    }
    Ok(Point3::new(x, y, z))
}

impl WorldSnapshot {
    /// Captures every block of `world`.
    pub fn from_world(world: &World) -> Self {
        WorldSnapshot {
            blocks: world
                .iter()
                .map(|(position, block_type)| {
                    (format_block_key(position), block_type.name().to_string())
                })
                .collect(),
        }
    }

    /// Parses a snapshot document.
    ///
    /// Fails if the document is not a JSON object of strings; keys and block
    /// names are checked by [`WorldSnapshot::into_world`].
    pub fn from_json(json: &str) -> EngineResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Renders the snapshot as indented JSON.
    pub fn to_json(&self) -> EngineResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Number of blocks in the snapshot.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Whether the snapshot holds no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Rebuilds the world. A single malformed key or unknown block name rejects
    /// the whole snapshot.
    pub fn into_world(self) -> EngineResult<World> {
        let mut world = World::new();
        for (key, name) in self.blocks {
            world.set(parse_block_key(&key)?, BlockType::from_name(&name)?);
        }
        Ok(world)
    }
}

/// Reads and validates a snapshot file.
fn read_world(path: &Path) -> EngineResult<World> {
    let contents = fs::read_to_string(path).map_err(|source| EngineError::io(path, source))?;
    WorldSnapshot::from_json(&contents)?.into_world()
}

/// Loads the world stored at `path`, falling back to an empty world.
///
/// # Arguments
/// * `path` - Snapshot file to read
///
/// # Returns
/// The stored world, or an empty world if the file is missing or malformed.
pub fn load_world(path: impl AsRef<Path>) -> World {
    let path = path.as_ref();
    match read_world(path) {
        Ok(world) => {
            info!("Loaded {} blocks from {:?}", world.len(), path);
            world
        }
        Err(EngineError::Io { source, .. }) if source.kind() == ErrorKind::NotFound => {
            info!("No world snapshot at {:?}, starting a new world", path);
            World::new()
        }
        Err(EngineError::Io { source, .. }) => {
            error!("Could not read world snapshot {:?}: {}", path, source);
            World::new()
        }
        Err(err) => {
            warn!("Discarding malformed world snapshot {:?}: {}", path, err);
            World::new()
        }
    }
}

/// Writes every block of `world` to `path`, creating parent directories.
pub fn save_world(path: impl AsRef<Path>, world: &World) -> EngineResult<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| EngineError::io(parent, source))?;
    }

    let json = WorldSnapshot::from_world(world).to_json()?;
    fs::write(path, json).map_err(|source| EngineError::io(path, source))?;
    info!("Saved {} blocks to {:?}", world.len(), path);
    Ok(())
}
