//! Avatar movement and collision resolution.
//!
//! Movement is resolved one axis at a time, X then Z then Y. A move along an
//! axis is applied only if the box at the destination is free, so the avatar
//! slides along walls instead of stopping dead. Vertical collisions snap the
//! avatar onto the floor or just under the ceiling.

use cgmath::{Point3, Vector2};
use log::{info, warn};

use super::{
    aabb::{collides, PlayerDimensions},
    GameMode, PlayerState,
};
use crate::{config::PhysicsConfig, engine_state::voxels::world::World};

/// Distance below the feet checked for ground contact.
const GROUND_CHECK_DEPTH: f32 = 0.01;
/// Distance below the feet at which the sneak ledge guard looks for support.
const LEDGE_CHECK_DEPTH: f32 = 0.1;
/// Clearance kept between the head and a ceiling after bumping into it.
const CEILING_GAP: f32 = 0.01;
/// Survival avatars below this height are treated as stuck.
const STUCK_BELOW_Y: f32 = -5.0;
/// How far above the feet the safe-spot search starts.
const SAFE_SPOT_SEARCH_ABOVE: i32 = 5;
/// Lowest feet height considered by the safe-spot search.
const SAFE_SPOT_SEARCH_FLOOR: i32 = -9;
/// Extra height added when the fallback height is occupied too.
const FALLBACK_PUSH_UP: f32 = 5.0;

/// Movement actions held during one tick.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MovementInput {
    /// Walk along the view direction
    pub forward: bool,
    /// Walk against the view direction
    pub backward: bool,
    /// Strafe left
    pub left: bool,
    /// Strafe right
    pub right: bool,
    /// Jump key held; ascends while flying
    pub jump: bool,
    /// Sneak key held; descends while flying
    pub sneak: bool,
}

/// Outcome of [`ensure_player_on_surface`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SurfaceRecovery {
    /// The world is empty; nothing was checked.
    EmptyWorld,
    /// The avatar was not stuck and was left alone.
    NotStuck,
    /// The avatar was moved to a free spot in its own column.
    Relocated(Point3<f32>),
    /// No free spot was found; the avatar was moved to the fallback height.
    Fallback(Point3<f32>),
}

/// Horizontal unit direction for the held movement keys, or zero.
///
/// # Arguments
/// * `yaw_radians` - Horizontal view rotation
/// * `input` - The held movement keys
pub fn horizontal_direction(yaw_radians: f32, input: &MovementInput) -> Vector2<f32> {
    let (sin_yaw, cos_yaw) = yaw_radians.sin_cos();
    let mut direction = Vector2::new(0.0, 0.0);
    if input.forward {
        direction += Vector2::new(-sin_yaw, -cos_yaw);
    }
    if input.backward {
        direction += Vector2::new(sin_yaw, cos_yaw);
    }
    if input.left {
        direction += Vector2::new(-cos_yaw, sin_yaw);
    }
    if input.right {
        direction += Vector2::new(cos_yaw, -sin_yaw);
    }

    let length = (direction.x * direction.x + direction.y * direction.y).sqrt();
    if length > 0.0 {
        direction / length
    } else {
        direction
    }
}

/// Speed for this tick. Cancels sprinting where the current mode forbids it.
fn movement_speed(player: &mut PlayerState, input: &MovementInput, physics: &PhysicsConfig) -> f32 {
    let mut speed = physics.move_speed;
    match player.game_mode {
        GameMode::Survival => {
            if player.sneaking {
                speed *= physics.sneak_multiplier;
                player.sprinting = false;
            } else if player.sprinting && player.on_ground && input.forward {
                speed *= physics.sprint_multiplier;
            } else if player.sprinting {
                player.sprinting = false;
            }
        }
        GameMode::Creative => {
            if player.sneaking && !player.flying {
                speed *= physics.sneak_multiplier;
                player.sprinting = false;
            } else {
                speed = physics.fly_speed;
                if player.sprinting {
                    speed *= physics.sprint_multiplier;
                }
            }
        }
    }
    speed
}

/// Handles a jump press at engine time `now`.
///
/// In survival, jumps from the ground after the cooldown. In creative, the same
/// jump applies on the ground; otherwise a second press within the double-tap
/// window toggles flight.
pub fn handle_jump_press(world: &World, player: &mut PlayerState, physics: &PhysicsConfig, now: f64) {
    let can_jump = player.on_ground && now - player.last_jump_time > physics.jump_cooldown;
    match player.game_mode {
        GameMode::Survival => {
            if can_jump {
                jump(player, physics, now);
            }
        }
        GameMode::Creative => {
            if !player.flying && player.on_ground {
                if can_jump {
                    jump(player, physics, now);
                }
            } else if now - player.last_jump_press_time < physics.double_tap_time {
                player.flying = !player.flying;
                info!("Creative flight toggled: {}", player.flying);
                if !player.flying {
                    player.on_ground = false;
                    let dimensions = PlayerDimensions::from_config(physics);
                    let below = player.position - cgmath::Vector3::new(0.0, GROUND_CHECK_DEPTH, 0.0);
                    if collides(world, below, dimensions) {
                        player.on_ground = true;
                        player.velocity.y = 0.0;
                    }
                }
            }
            player.last_jump_press_time = now;
        }
    }
}

fn jump(player: &mut PlayerState, physics: &PhysicsConfig, now: f64) {
    player.velocity.y = physics.jump_force;
    player.on_ground = false;
    player.last_jump_time = now;
}

/// Applies sprint key edges: a press starts sprinting unless sneaking, a release stops it.
pub fn handle_sprint_input(player: &mut PlayerState, pressed: bool, released: bool) {
    if pressed && !player.sneaking {
        player.sprinting = true;
    }
    if released {
        player.sprinting = false;
    }
}

/// Advances the avatar by one tick.
///
/// # Arguments
/// * `world` - The world to collide against
/// * `player` - The avatar to move
/// * `input` - Movement keys held this tick
/// * `physics` - Movement constants
/// * `dt` - Tick length in seconds, already clamped by the caller
pub fn step_player(
    world: &World,
    player: &mut PlayerState,
    input: &MovementInput,
    physics: &PhysicsConfig,
    dt: f32,
) {
    let dimensions = PlayerDimensions::from_config(physics);

    player.sneaking = player.on_ground && !player.flying && input.sneak;
    let speed = movement_speed(player, input, physics);

    let direction = horizontal_direction(cgmath::Rad::from(player.yaw).0, input);
    let mut dx = direction.x * speed * dt;
    let mut dz = direction.y * speed * dt;
    let mut dy_flight = 0.0;
    if player.game_mode == GameMode::Creative && player.flying {
        if input.jump {
            dy_flight += speed * dt;
        }
        if input.sneak {
            dy_flight -= speed * dt;
        }
    }

    let guard_ledges = player.sneaking && player.on_ground;
    let support_y = (player.position.y - LEDGE_CHECK_DEPTH).floor() as i32;

    let next_x = player.position.x + dx;
    if guard_ledges {
        let check_x = if dx != 0.0 {
            next_x + dimensions.half_width().copysign(dx)
        } else {
            next_x
        };
        let below = Point3::new(check_x.floor() as i32, support_y, player.position.z.floor() as i32);
        if !world.is_solid(below) {
            dx = 0.0;
        }
    }
    let candidate = Point3::new(player.position.x + dx, player.position.y, player.position.z);
    if !collides(world, candidate, dimensions) {
        player.position.x = candidate.x;
    }

    let next_z = player.position.z + dz;
    if guard_ledges {
        let check_z = if dz != 0.0 {
            next_z + dimensions.half_width().copysign(dz)
        } else {
            next_z
        };
        let below = Point3::new(player.position.x.floor() as i32, support_y, check_z.floor() as i32);
        if !world.is_solid(below) {
            dz = 0.0;
        }
    }
    let candidate = Point3::new(player.position.x, player.position.y, player.position.z + dz);
    if !collides(world, candidate, dimensions) {
        player.position.z = candidate.z;
    }

    if player.game_mode == GameMode::Creative && player.flying {
        step_flight(world, player, dimensions, dy_flight);
    } else {
        step_gravity(world, player, dimensions, physics, dt);
    }
}

fn step_flight(world: &World, player: &mut PlayerState, dimensions: PlayerDimensions, dy: f32) {
    player.on_ground = false;
    player.velocity.y = 0.0;

    let target_y = player.position.y + dy;
    let target = Point3::new(player.position.x, target_y, player.position.z);
    if !collides(world, target, dimensions) {
        player.position.y = target_y;
    } else if dy < 0.0 {
        player.position.y = target_y.floor() + 1.0;
        let below = Point3::new(player.position.x, player.position.y - GROUND_CHECK_DEPTH, player.position.z);
        if collides(world, below, dimensions) {
            player.flying = false;
            player.on_ground = true;
            info!("Landed, creative flight ended");
        }
    } else if dy > 0.0 {
        player.position.y = (target_y + dimensions.height).floor() - dimensions.height - CEILING_GAP;
    }
}

fn step_gravity(
    world: &World,
    player: &mut PlayerState,
    dimensions: PlayerDimensions,
    physics: &PhysicsConfig,
    dt: f32,
) {
    player.velocity.y += physics.gravity * dt;
    player.velocity.y = player.velocity.y.max(-physics.terminal_velocity);

    let target_y = player.position.y + player.velocity.y * dt;
    player.on_ground = false;

    let target = Point3::new(player.position.x, target_y, player.position.z);
    if !collides(world, target, dimensions) {
        player.position.y = target_y;
    } else if player.velocity.y <= 0.0 {
        player.position.y = target_y.floor() + 1.0;
        player.on_ground = true;
        player.velocity.y = 0.0;
    } else {
        player.position.y = (target_y + dimensions.height).floor() - dimensions.height - CEILING_GAP;
        player.velocity.y = 0.0;
    }
}

/// Whether the avatar's feet or head cell holds a solid block, or a survival
/// avatar has sunk below the world.
fn is_stuck(world: &World, player: &PlayerState, dimensions: PlayerDimensions) -> bool {
    let x = player.position.x.floor() as i32;
    let z = player.position.z.floor() as i32;
    let feet_y = player.position.y.floor() as i32;
    let head_y = (player.position.y + dimensions.height - CEILING_GAP).floor() as i32;

    world.is_solid(Point3::new(x, feet_y, z))
        || world.is_solid(Point3::new(x, head_y, z))
        || (player.game_mode == GameMode::Survival && player.position.y < STUCK_BELOW_Y)
}

/// Moves the avatar out of solid blocks, searching its own column for a spot with
/// solid ground below and free space for feet and head.
///
/// If no spot exists the avatar is moved up to `physics.safe_y`, and further up if
/// that is occupied as well.
pub fn ensure_player_on_surface(
    world: &World,
    player: &mut PlayerState,
    physics: &PhysicsConfig,
) -> SurfaceRecovery {
    if world.is_empty() {
        return SurfaceRecovery::EmptyWorld;
    }

    let dimensions = PlayerDimensions::from_config(physics);
    if !is_stuck(world, player, dimensions) {
        return SurfaceRecovery::NotStuck;
    }

    warn!(
        "Player stuck or out of bounds at {:?}, searching for a safe spot",
        player.position
    );
    let x = player.position.x.floor() as i32;
    let z = player.position.z.floor() as i32;
    let start_y = player.position.y.floor() as i32 + SAFE_SPOT_SEARCH_ABOVE;

    for feet_y in (SAFE_SPOT_SEARCH_FLOOR..=start_y).rev() {
        let ground = world.is_solid(Point3::new(x, feet_y - 1, z));
        let feet_free = world.is_passable(Point3::new(x, feet_y, z));
        let head_free = world.is_passable(Point3::new(x, feet_y + 1, z));
        if ground && feet_free && head_free {
            player.position = Point3::new(x as f32 + 0.5, feet_y as f32, z as f32 + 0.5);
            player.velocity = cgmath::Vector3::new(0.0, 0.0, 0.0);
            if player.game_mode == GameMode::Survival {
                player.on_ground = true;
            }
            info!("Moved player to safe spot {:?}", player.position);
            return SurfaceRecovery::Relocated(player.position);
        }
    }

    player.position.y = physics.safe_y;
    player.velocity = cgmath::Vector3::new(0.0, 0.0, 0.0);
    player.on_ground = false;
    warn!(
        "No safe spot found, moved player to fallback height {:?}",
        player.position
    );
    if is_stuck(world, player, dimensions) {
        player.position.y += FALLBACK_PUSH_UP;
        warn!("Fallback height is occupied, pushed player up to {:?}", player.position);
    }
    SurfaceRecovery::Fallback(player.position)
}

/// Rescues a survival avatar that fell below `physics.fall_reset_y`.
///
/// # Returns
/// `true` if the avatar was moved, in which case the mesh must be rebuilt.
pub fn recover_from_fall(world: &World, player: &mut PlayerState, physics: &PhysicsConfig) -> bool {
    if player.game_mode != GameMode::Survival || player.position.y >= physics.fall_reset_y {
        return false;
    }

    warn!("Player fell out of the world at {:?}, resetting position", player.position);
    player.position.y = physics.safe_y;
    player.velocity = cgmath::Vector3::new(0.0, 0.0, 0.0);
    player.on_ground = false;
    ensure_player_on_surface(world, player, physics);
    true
}
