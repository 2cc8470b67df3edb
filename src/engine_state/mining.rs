//! # Mining Progress
//!
//! Survival-mode block breaking. Holding attack on a block accumulates time;
//! once the block's break time has passed it is removed. Progress is reported in
//! ten break stages which drive the crack overlay.
//!
//! Looking away, releasing attack, or the block changing under the crosshair
//! cancels the progress.

use log::debug;

use super::voxels::{
    block::{block_type::BlockType, DESTROY_STAGE_COUNT},
    world::{BlockPosition, World},
};

/// Outcome of advancing the mining progress by one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MiningTick {
    /// Nothing is being mined.
    Idle,
    /// Mining continues at the given break stage.
    Progress {
        /// The block being mined
        position: BlockPosition,
        /// Break stage in `0..DESTROY_STAGE_COUNT`
        stage: u8,
    },
    /// The block was removed from the world.
    Completed {
        /// Where the block was
        position: BlockPosition,
        /// What the block was
        block_type: BlockType,
    },
    /// Mining stopped before the block broke.
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct MiningTarget {
    position: BlockPosition,
    block_type: BlockType,
    started_at: f64,
    stage: u8,
}

/// The block currently being broken, if any.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct MiningProgress {
    target: Option<MiningTarget>,
}

/// Whether the block can never be mined: the stone floor at `y = 0`.
pub fn is_unbreakable(position: BlockPosition, block_type: BlockType) -> bool {
    block_type == BlockType::Stone && position.y == 0
}

/// Break stage for `elapsed` seconds of mining a block that takes `break_time`.
pub fn break_stage(elapsed: f64, break_time: f32) -> u8 {
    if break_time <= 0.0 {
        return DESTROY_STAGE_COUNT - 1;
    }
    let stage = (elapsed / break_time as f64 * DESTROY_STAGE_COUNT as f64).floor();
    stage.clamp(0.0, (DESTROY_STAGE_COUNT - 1) as f64) as u8
}

impl MiningProgress {
    /// Creates an idle mining state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts mining `position` at time `now`.
    ///
    /// Attacking the block that is already being mined keeps its progress.
    ///
    /// # Returns
    /// `true` if mining started on a new block.
    pub fn begin(&mut self, position: BlockPosition, block_type: BlockType, now: f64) -> bool {
        if self.target.map(|target| target.position) == Some(position) {
            return false;
        }
        debug!("Started mining {} at {:?}", block_type, position);
        self.target = Some(MiningTarget {
            position,
            block_type,
            started_at: now,
            stage: 0,
        });
        true
    }

    /// Drops any progress.
    pub fn cancel(&mut self) {
        self.target = None;
    }

    /// The block being mined and its current stage.
    pub fn current(&self) -> Option<(BlockPosition, u8)> {
        self.target.map(|target| (target.position, target.stage))
    }

    /// Whether a block is being mined.
    pub fn is_active(&self) -> bool {
        self.target.is_some()
    }

    /// Advances mining to time `now`.
    ///
    /// # Arguments
    /// * `world` - The world; the block is removed from it on completion
    /// * `now` - Engine time in seconds
    /// * `attack_held` - Whether the attack action is still held
    /// * `current_target` - The block under the crosshair this tick
    pub fn tick(
        &mut self,
        world: &mut World,
        now: f64,
        attack_held: bool,
        current_target: Option<BlockPosition>,
    ) -> MiningTick {
        let Some(target) = self.target.as_mut() else {
            return MiningTick::Idle;
        };

        if !attack_held
            || current_target != Some(target.position)
            || world.get(target.position) != Some(target.block_type)
        {
            debug!("Mining at {:?} cancelled", target.position);
            self.target = None;
            return MiningTick::Cancelled;
        }

        let elapsed = now - target.started_at;
        let break_time = target.block_type.break_time();
        if elapsed >= break_time as f64 {
            let position = target.position;
            let block_type = target.block_type;
            world.remove(position);
            self.target = None;
            return MiningTick::Completed { position, block_type };
        }

        target.stage = break_stage(elapsed, break_time);
        MiningTick::Progress {
            position: target.position,
            stage: target.stage,
        }
    }
}
