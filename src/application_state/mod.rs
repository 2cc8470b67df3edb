//! # Application State Management
//!
//! This module drives the engine from a host loop:
//! - Input handling through the input manager
//! - Fixed-step ticking at 60 Hz regardless of the frame rate
//! - A scripted headless demo used by the binary
//!
//! The renderer is external; a windowed host would forward its key bindings to
//! [`InputManager::intake_action`] and draw [`EngineState::mesh`] every frame.

pub mod input_manager;
pub mod input_state;

use cgmath::Deg;
use input_manager::InputManager;
use input_state::InputAction;
use log::{debug, info};

use crate::engine_state::{voxels::block::block_type::BlockType, EngineEvent, EngineState};

/// Length of one engine tick in seconds.
pub const TICK_DURATION: f32 = 1.0 / 60.0;

/// Most ticks run for a single frame, so a stalled host does not spiral.
const MAX_TICKS_PER_FRAME: u32 = 8;

/// Totals reported at the end of a headless run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Frames driven
    pub frames: u32,
    /// Engine ticks run
    pub ticks: u32,
    /// Mesh rebuilds performed
    pub mesh_rebuilds: u32,
    /// Blocks mined
    pub blocks_mined: u32,
    /// Blocks placed
    pub blocks_placed: u32,
}

/// The running application: the engine plus the input and timing around it.
pub struct ApplicationState {
    /// The core game engine state and logic
    pub engine_state: EngineState,

    /// Manages input state and event processing
    pub input_manager: InputManager,

    /// Wall-clock start of the current run
    pub last_wait_time: web_time::Instant,

    /// Frame time not yet consumed by whole ticks
    accumulator: f32,
}

impl ApplicationState {
    /// Wraps an engine with idle input.
    pub fn new(engine_state: EngineState) -> Self {
        Self {
            engine_state,
            input_manager: InputManager::new(),
            last_wait_time: web_time::Instant::now(),
            accumulator: 0.0,
        }
    }

    /// Runs as many fixed ticks as `frame_time` covers, feeding the input
    /// gathered since the last tick to the first of them.
    ///
    /// Frames shorter than a tick leave their input in the input manager, so
    /// presses and mouse motion carry over to the frame that does tick.
    ///
    /// # Arguments
    /// * `frame_time` - Seconds since the previous frame
    ///
    /// # Returns
    /// The number of ticks run.
    pub fn advance(&mut self, frame_time: f32) -> u32 {
        self.accumulator += frame_time.max(0.0);
        if self.accumulator < TICK_DURATION {
            return 0;
        }

        let input = self.input_manager.get_and_reset_processed_input();
        self.engine_state.set_input_commands(input);

        let mut ticks = 0;
        while self.accumulator >= TICK_DURATION && ticks < MAX_TICKS_PER_FRAME {
            self.engine_state.update(TICK_DURATION);
            self.accumulator -= TICK_DURATION;
            ticks += 1;
        }
        if ticks == MAX_TICKS_PER_FRAME {
            self.accumulator = 0.0;
        }
        ticks
    }

    /// Runs a scripted session without a window: walk, look down, mine the block
    /// underfoot, then put down a block of planks.
    ///
    /// # Arguments
    /// * `frames` - Number of 60 Hz frames to drive
    pub fn run_demo(&mut self, frames: u32) -> RunSummary {
        let mut summary = RunSummary {
            frames,
            ..RunSummary::default()
        };
        self.engine_state.set_selected_block(Some(BlockType::OakPlanks));
        self.last_wait_time = web_time::Instant::now();

        for frame in 0..frames {
            self.script_input(frame, frames);
            summary.ticks += self.advance(TICK_DURATION);
            if self.engine_state.rebuild_mesh_if_dirty() {
                summary.mesh_rebuilds += 1;
            }

            for event in self.engine_state.drain_events() {
                debug!("Engine event: {:?}", event);
                match event {
                    EngineEvent::BlockMined { .. } => summary.blocks_mined += 1,
                    EngineEvent::BlockPlaced { .. } => summary.blocks_placed += 1,
                    _ => {}
                }
            }
        }

        info!(
            "Demo finished in {:.2?}: {} ticks, {} mesh rebuilds, {} mined, {} placed, player at {:?}",
            self.last_wait_time.elapsed(),
            summary.ticks,
            summary.mesh_rebuilds,
            summary.blocks_mined,
            summary.blocks_placed,
            self.engine_state.player().position
        );
        summary
    }

    fn script_input(&mut self, frame: u32, frames: u32) {
        let walking_until = frames / 3;
        let mining_until = frames * 5 / 6;

        self.input_manager
            .intake_action(InputAction::Forward, frame < walking_until);
        self.input_manager
            .intake_action(InputAction::Sprint, frame < walking_until / 2);

        if frame == walking_until {
            self.engine_state.look(Deg(0.0), Deg(-90.0));
        }
        self.input_manager.intake_action(
            InputAction::Attack,
            frame >= walking_until && frame < mining_until,
        );
        self.input_manager
            .intake_action(InputAction::Place, frame == mining_until + 1);
    }
}
