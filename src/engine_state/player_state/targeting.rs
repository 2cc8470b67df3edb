//! Ray casting from the avatar's eye to find the targeted block.
//!
//! The ray is marched in fixed steps rather than traversed cell by cell. The
//! face normal of a hit is taken from the cell the ray came from; when the very
//! first sample is already inside a block, it is guessed from where that sample
//! sits inside the cell.

use cgmath::{Deg, Point3, Rad, Vector3};

use crate::engine_state::voxels::world::{BlockPosition, World};

/// Distance between ray samples.
const STEP: f64 = 0.05;

/// The block struck by a targeting ray.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RaycastHit {
    /// The struck block
    pub position: BlockPosition,
    /// Unit normal of the face the ray entered through
    pub normal: Vector3<i32>,
}

impl RaycastHit {
    /// The cell in front of the struck face, where a new block would go.
    pub fn placement_position(&self) -> BlockPosition {
        self.position + self.normal
    }
}

/// The unit view direction for a yaw and pitch.
///
/// Yaw 0 and pitch 0 look along negative Z; positive pitch looks up.
pub fn view_direction(yaw: Deg<f32>, pitch: Deg<f32>) -> Vector3<f64> {
    let yaw = Rad::from(yaw).0 as f64;
    let pitch = Rad::from(pitch).0 as f64;
    Vector3::new(pitch.cos() * -yaw.sin(), pitch.sin(), pitch.cos() * -yaw.cos())
}

/// Marches a ray from `eye` along the view and returns the first block hit
/// within `max_distance`. Any stored block stops the ray, leaves included.
///
/// # Arguments
/// * `world` - The world to search
/// * `eye` - The ray origin
/// * `yaw` - Horizontal view rotation
/// * `pitch` - Vertical view rotation
/// * `max_distance` - Reach in blocks
///
/// # Returns
/// The hit block and face normal, or `None` if nothing is in reach.
pub fn cast(
    world: &World,
    eye: Point3<f32>,
    yaw: Deg<f32>,
    pitch: Deg<f32>,
    max_distance: f32,
) -> Option<RaycastHit> {
    let direction = view_direction(yaw, pitch);
    let origin = Point3::new(eye.x as f64, eye.y as f64, eye.z as f64);
    let steps = (max_distance as f64 / STEP).floor() as u32;
    let mut previous_cell: Option<BlockPosition> = None;

    for i in 0..=steps {
        let point = origin + direction * (i as f64 * STEP);
        let cell = floor_cell(point);

        if world.contains(cell) {
            let normal = match previous_cell {
                Some(previous) => normal_from_previous_cell(previous - cell),
                None => normal_from_hit_point(point, cell),
            };
            let normal = if normal == Vector3::new(0, 0, 0) {
                Vector3::new(0, 1, 0)
            } else {
                normal
            };
            return Some(RaycastHit { position: cell, normal });
        }
        previous_cell = Some(cell);
    }
    None
}

fn floor_cell(point: Point3<f64>) -> BlockPosition {
    Point3::new(
        point.x.floor() as i32,
        point.y.floor() as i32,
        point.z.floor() as i32,
    )
}

/// Index of the dominant axis, X winning only strictly over both others and Y
/// only strictly over Z.
fn dominant_axis(x: f64, y: f64, z: f64) -> usize {
    if x > y && x > z {
        0
    } else if y > z {
        1
    } else {
        2
    }
}

/// The unit normal along the largest component of `previous - hit`.
fn normal_from_previous_cell(diff: Vector3<i32>) -> Vector3<i32> {
    let axis = dominant_axis(
        diff.x.abs() as f64,
        diff.y.abs() as f64,
        diff.z.abs() as f64,
    );
    let mut normal = Vector3::new(0, 0, 0);
    normal[axis] = if diff[axis] < 0 { -1 } else { 1 };
    normal
}

/// Guesses the face from the sample's offset to the cell centre along the
/// dominant axis, pointing against that offset.
fn normal_from_hit_point(point: Point3<f64>, cell: BlockPosition) -> Vector3<i32> {
    let offset = Vector3::new(
        point.x - cell.x as f64 - 0.5,
        point.y - cell.y as f64 - 0.5,
        point.z - cell.z as f64 - 0.5,
    );
    let axis = dominant_axis(offset.x.abs(), offset.y.abs(), offset.z.abs());
    let mut normal = Vector3::new(0, 0, 0);
    normal[axis] = if offset[axis] < 0.0 { 1 } else { -1 };
    normal
}
