//! Axis-aligned bounding boxes for avatar collision.
//!
//! The avatar is a box of `width × height × width` anchored at its feet and
//! centred on X/Z. Collision is tested against the unit cubes of solid blocks
//! with strict inequalities, so touching a block face does not count.

use cgmath::Point3;

use crate::{
    config::PhysicsConfig,
    engine_state::voxels::world::{BlockPosition, World},
};

/// Axis-Aligned Bounding Box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner
    pub min: Point3<f32>,
    /// Maximum corner
    pub max: Point3<f32>,
}

/// Size of the avatar box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerDimensions {
    /// Extent along X and Z
    pub width: f32,
    /// Extent along Y
    pub height: f32,
}

impl PlayerDimensions {
    /// Reads the avatar size from the physics configuration.
    pub fn from_config(physics: &PhysicsConfig) -> Self {
        PlayerDimensions {
            width: physics.player_width,
            height: physics.player_height,
        }
    }

    /// Half of the width.
    pub fn half_width(&self) -> f32 {
        self.width / 2.0
    }
}

impl Default for PlayerDimensions {
    fn default() -> Self {
        PlayerDimensions::from_config(&PhysicsConfig::default())
    }
}

impl Aabb {
    /// The avatar box for feet at `position`.
    pub fn for_player(position: Point3<f32>, dimensions: PlayerDimensions) -> Self {
        let half_width = dimensions.half_width();
        Aabb {
            min: Point3::new(position.x - half_width, position.y, position.z - half_width),
            max: Point3::new(
                position.x + half_width,
                position.y + dimensions.height,
                position.z + half_width,
            ),
        }
    }

    /// The unit cube of a block cell.
    pub fn for_block(position: BlockPosition) -> Self {
        let min = Point3::new(position.x as f32, position.y as f32, position.z as f32);
        Aabb {
            min,
            max: Point3::new(min.x + 1.0, min.y + 1.0, min.z + 1.0),
        }
    }

    /// Strict overlap test: boxes that only share a face do not intersect.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
            && self.min.z < other.max.z
            && self.max.z > other.min.z
    }

    /// Every block cell the box may touch, from the floor of its minimum corner
    /// up to, but excluding, the ceiling of its maximum corner.
    pub fn cells(&self) -> impl Iterator<Item = BlockPosition> {
        let (x0, x1) = (self.min.x.floor() as i32, self.max.x.ceil() as i32);
        let (y0, y1) = (self.min.y.floor() as i32, self.max.y.ceil() as i32);
        let (z0, z1) = (self.min.z.floor() as i32, self.max.z.ceil() as i32);
        (x0..x1).flat_map(move |x| {
            (y0..y1).flat_map(move |y| (z0..z1).map(move |z| Point3::new(x, y, z)))
        })
    }
}

/// Whether an avatar with feet at `position` would overlap any solid block.
///
/// Transparent blocks never collide.
pub fn collides(world: &World, position: Point3<f32>, dimensions: PlayerDimensions) -> bool {
    let player = Aabb::for_player(position, dimensions);
    player
        .cells()
        .filter(|cell| world.is_solid(*cell))
        .any(|cell| player.intersects(&Aabb::for_block(cell)))
}
