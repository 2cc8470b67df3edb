//! # Player State Management
//!
//! This module holds the avatar: where it is, how it is looking and moving, and
//! which movement modes are active.
//!
//! ## Core Components
//! - `PlayerState`: position, velocity, orientation and movement flags
//! - `aabb`: the avatar's bounding box and voxel collision tests
//! - `physics`: per-tick movement, gravity, jumping and flight
//! - `targeting`: the ray cast from the eye used for mining and placing

use cgmath::{Deg, Point3, Vector3};
use serde::{Deserialize, Serialize};

use crate::config::PhysicsConfig;

use super::voxels::chunk::{chunk_coord_of_point, ChunkCoord};

pub mod aabb;
pub mod physics;
pub mod targeting;

/// Pitch limit in degrees, just short of straight up or down.
pub const MAX_PITCH: f32 = 89.9;

/// The rule set the avatar plays under.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    /// Gravity, timed mining and falling hazards
    #[default]
    Survival,
    /// Flight, instant mining
    Creative,
}

/// The avatar.
///
/// The position is the centre of the bottom of the avatar's box (its feet).
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerState {
    /// Feet position in world space
    pub position: Point3<f32>,
    /// Current velocity; only the vertical component persists between ticks
    pub velocity: Vector3<f32>,
    /// Horizontal rotation; 0 looks along negative Z
    pub yaw: Deg<f32>,
    /// Vertical rotation, clamped to `[-MAX_PITCH, MAX_PITCH]`
    pub pitch: Deg<f32>,
    /// Active rule set
    pub game_mode: GameMode,
    /// Standing on a solid block
    pub on_ground: bool,
    /// Creative flight active
    pub flying: bool,
    /// Sneaking this tick
    pub sneaking: bool,
    /// Sprint requested and not cancelled
    pub sprinting: bool,
    /// Engine time of the last jump
    pub last_jump_time: f64,
    /// Engine time of the last jump press in creative mode
    pub last_jump_press_time: f64,
}

impl PlayerState {
    /// Creates an avatar at rest at `position`, looking along negative Z.
    pub fn new(position: Point3<f32>, game_mode: GameMode) -> Self {
        PlayerState {
            position,
            velocity: Vector3::new(0.0, 0.0, 0.0),
            yaw: Deg(0.0),
            pitch: Deg(0.0),
            game_mode,
            on_ground: false,
            flying: false,
            sneaking: false,
            sprinting: false,
            last_jump_time: f64::NEG_INFINITY,
            last_jump_press_time: f64::NEG_INFINITY,
        }
    }

    /// Turns the view by the given amounts, clamping the pitch.
    pub fn rotate(&mut self, delta_yaw: Deg<f32>, delta_pitch: Deg<f32>) {
        self.yaw += delta_yaw;
        self.pitch += delta_pitch;
        self.pitch = Deg(self.pitch.0.clamp(-MAX_PITCH, MAX_PITCH));
    }

    /// The eye position used for the camera and the targeting ray.
    pub fn eye_position(&self, physics: &PhysicsConfig) -> Point3<f32> {
        let mut eye_height = physics.player_height * physics.eye_height_factor;
        if self.sneaking && self.game_mode == GameMode::Survival {
            eye_height -= physics.sneak_camera_offset;
        }
        self.position + Vector3::new(0.0, eye_height, 0.0)
    }

    /// The unit vector the avatar is looking along.
    pub fn view_direction(&self) -> Vector3<f64> {
        targeting::view_direction(self.yaw, self.pitch)
    }

    /// The chunk the avatar is standing in.
    pub fn chunk_position(&self) -> ChunkCoord {
        chunk_coord_of_point(self.position)
    }

    /// Switches rule set and clears every movement mode.
    pub fn set_game_mode(&mut self, game_mode: GameMode) {
        self.game_mode = game_mode;
        self.sprinting = false;
        self.sneaking = false;
        self.flying = false;
        self.on_ground = false;
        if game_mode == GameMode::Creative {
            self.velocity = Vector3::new(0.0, 0.0, 0.0);
        }
    }
}
