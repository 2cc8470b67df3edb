//! # Engine Configuration
//!
//! Tunable parameters of the engine grouped by subsystem. Every field has a
//! default, so a configuration file only needs to list what it changes:
//!
//! ```json
//! {
//!   "world": { "seed": 7, "chunk_load_distance": 2 },
//!   "physics": { "gravity": -9.8 }
//! }
//! ```

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    engine_state::{
        player_state::GameMode,
        voxels::chunk::{chunk_generation::DEFAULT_BASE_Y, chunk_streaming::DEFAULT_LOAD_DISTANCE},
    },
    error::{EngineError, EngineResult},
};

/// Seed used when the configuration does not name one.
pub const DEFAULT_SEED: u64 = 0x5EED_CAFE;

/// Top-level engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// World generation and streaming
    pub world: WorldConfig,
    /// Mesh extraction window
    pub render: RenderConfig,
    /// Avatar movement and collision
    pub physics: PhysicsConfig,
    /// Mining and placement reach
    pub interaction: InteractionConfig,
}

/// World generation and streaming settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Seed for terrain, ores and trees
    pub seed: u64,
    /// Height of the grass surface
    pub base_y: i32,
    /// Radius in chunks kept generated around the avatar
    pub chunk_load_distance: i32,
    /// Initial feet position of the avatar
    pub spawn_position: [f32; 3],
    /// Initial game mode
    pub game_mode: GameMode,
}

impl Default for WorldConfig {
    fn default() -> Self {
        WorldConfig {
            seed: DEFAULT_SEED,
            base_y: DEFAULT_BASE_Y,
            chunk_load_distance: DEFAULT_LOAD_DISTANCE,
            spawn_position: [0.5, 15.0, 0.5],
            game_mode: GameMode::Survival,
        }
    }
}

/// Extent of the box around the avatar whose blocks are meshed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Blocks are meshed while `|dx| < horizontal_distance` and `|dz| < horizontal_distance`
    pub horizontal_distance: i32,
    /// Blocks are meshed while `|dy| < vertical_distance`
    pub vertical_distance: i32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            horizontal_distance: 32,
            vertical_distance: 52,
        }
    }
}

/// Avatar movement constants. Distances in blocks, times in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Vertical acceleration, negative is down
    pub gravity: f32,
    /// Fastest downward speed reached by falling
    pub terminal_velocity: f32,
    /// Upward speed applied by a jump
    pub jump_force: f32,
    /// Minimum time between two jumps
    pub jump_cooldown: f64,
    /// Window in which a second jump press toggles creative flight
    pub double_tap_time: f64,
    /// Walking speed
    pub move_speed: f32,
    /// Speed factor while sprinting
    pub sprint_multiplier: f32,
    /// Speed factor while sneaking
    pub sneak_multiplier: f32,
    /// Creative flight speed
    pub fly_speed: f32,
    /// Width and depth of the avatar box
    pub player_width: f32,
    /// Height of the avatar box
    pub player_height: f32,
    /// Eye height as a fraction of the avatar height
    pub eye_height_factor: f32,
    /// How far the eye drops while sneaking in survival
    pub sneak_camera_offset: f32,
    /// Longest simulated tick
    pub max_dt: f32,
    /// Survival avatars below this height are rescued
    pub fall_reset_y: f32,
    /// Height rescued avatars are moved to before searching for ground
    pub safe_y: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        PhysicsConfig {
            gravity: -20.0,
            terminal_velocity: 50.0,
            jump_force: 8.0,
            jump_cooldown: 0.3,
            double_tap_time: 0.3,
            move_speed: 5.0,
            sprint_multiplier: 1.6,
            sneak_multiplier: 0.5,
            fly_speed: 10.0,
            player_width: 0.6,
            player_height: 1.8,
            eye_height_factor: 0.85,
            sneak_camera_offset: 0.25,
            max_dt: 0.1,
            fall_reset_y: -60.0,
            safe_y: 30.0,
        }
    }
}

/// Reach of the targeting ray.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// Reach for highlighting and placing
    pub reach: f32,
    /// Reach for mining
    pub mining_reach: f32,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        InteractionConfig {
            reach: 8.0,
            mining_reach: 5.0,
        }
    }
}

fn require_positive(field: &'static str, value: f32) -> EngineResult<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(EngineError::InvalidConfig {
            field,
            reason: format!("must be a positive number, got {value}"),
        })
    }
}

impl EngineConfig {
    /// Parses a configuration document and validates it.
    pub fn from_json(json: &str) -> EngineResult<Self> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a configuration file and validates it.
    ///
    /// # Arguments
    /// * `path` - JSON configuration file
    pub fn load(path: impl AsRef<Path>) -> EngineResult<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| EngineError::io(path, source))?;
        Self::from_json(&contents)
    }

    /// Checks that every value is usable.
    pub fn validate(&self) -> EngineResult<()> {
        if self.world.chunk_load_distance < 0 {
            return Err(EngineError::InvalidConfig {
                field: "world.chunk_load_distance",
                reason: format!("must not be negative, got {}", self.world.chunk_load_distance),
            });
        }
        if self.world.base_y < 5 {
            return Err(EngineError::InvalidConfig {
                field: "world.base_y",
                reason: format!("must leave room for the stone and dirt layers, got {}", self.world.base_y),
            });
        }
        if self.render.horizontal_distance <= 0 || self.render.vertical_distance <= 0 {
            return Err(EngineError::InvalidConfig {
                field: "render",
                reason: "render distances must be positive".to_string(),
            });
        }

        let physics = &self.physics;
        require_positive("physics.terminal_velocity", physics.terminal_velocity)?;
        require_positive("physics.jump_force", physics.jump_force)?;
        require_positive("physics.move_speed", physics.move_speed)?;
        require_positive("physics.sprint_multiplier", physics.sprint_multiplier)?;
        require_positive("physics.sneak_multiplier", physics.sneak_multiplier)?;
        require_positive("physics.fly_speed", physics.fly_speed)?;
        require_positive("physics.player_width", physics.player_width)?;
        require_positive("physics.player_height", physics.player_height)?;
        require_positive("physics.max_dt", physics.max_dt)?;
        if physics.gravity > 0.0 {
            return Err(EngineError::InvalidConfig {
                field: "physics.gravity",
                reason: format!("must point down, got {}", physics.gravity),
            });
        }
        if !(0.0..=1.0).contains(&physics.eye_height_factor) {
            return Err(EngineError::InvalidConfig {
                field: "physics.eye_height_factor",
                reason: format!("must be within [0, 1], got {}", physics.eye_height_factor),
            });
        }
        if physics.fall_reset_y >= physics.safe_y {
            return Err(EngineError::InvalidConfig {
                field: "physics.fall_reset_y",
                reason: "must be below physics.safe_y".to_string(),
            });
        }

        require_positive("interaction.reach", self.interaction.reach)?;
        require_positive("interaction.mining_reach", self.interaction.mining_reach)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_document_keeps_defaults() {
        let config = EngineConfig::from_json(
            r#"{ "world": { "seed": 7 }, "physics": { "gravity": -9.5 } }"#,
        )
        .unwrap();

        assert_eq!(config.world.seed, 7);
        assert_eq!(config.world.chunk_load_distance, DEFAULT_LOAD_DISTANCE);
        assert_eq!(config.physics.gravity, -9.5);
        assert_eq!(config.physics.jump_force, 8.0);
        assert_eq!(config.render, RenderConfig::default());
    }

    #[test]
    fn test_game_mode_by_name() {
        let config = EngineConfig::from_json(r#"{ "world": { "game_mode": "creative" } }"#).unwrap();
        assert_eq!(config.world.game_mode, GameMode::Creative);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let result = EngineConfig::from_json(r#"{ "physics": { "player_height": 0.0 } }"#);
        assert!(matches!(
            result,
            Err(EngineError::InvalidConfig { field: "physics.player_height", .. })
        ));

        let result = EngineConfig::from_json(r#"{ "physics": { "gravity": 3.0 } }"#);
        assert!(matches!(
            result,
            Err(EngineError::InvalidConfig { field: "physics.gravity", .. })
        ));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("engine.json");
        fs::write(&path, r#"{ "interaction": { "reach": 6.0 } }"#).unwrap();

        let config = EngineConfig::load(&path).unwrap();
        assert_eq!(config.interaction.reach, 6.0);
        assert!(matches!(
            EngineConfig::load(dir.path().join("missing.json")),
            Err(EngineError::Io { .. })
        ));
    }
}
