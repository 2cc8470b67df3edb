//! # Engine State Module
//!
//! The core engine module that owns the voxel world and everything acting on it.
//!
//! ## Key Components
//!
//! * `EngineState` - The main state container for the engine
//! * `mining` - Timed survival-mode block breaking
//! * `player_state` - The avatar, its physics and its targeting ray
//! * `rendering` - Visible-face mesh extraction and the crack overlay
//! * `voxels` - Block types, the block store, chunk generation and snapshots
//!
//! ## Architecture
//!
//! The `EngineState` struct is the single explicit context of the engine. It
//! exclusively owns the block store, the generated-chunk set, the avatar, the
//! dirty flag and the meshes; there is no global state. Hosts feed it input with
//! [`EngineState::set_input_commands`], advance it with [`EngineState::update`],
//! and read the resulting mesh after [`EngineState::rebuild_mesh_if_dirty`].
//!
//! ## Performance Considerations
//!
//! * The mesh is rebuilt wholesale, and only when the dirty flag is set
//! * Chunks are generated once and never evicted
//! * All engine time comes from the accumulated tick clock, so a fixed sequence
//!   of ticks always produces the same world

use std::path::Path;

use cgmath::{Deg, Point3};
use log::{debug, info};

use crate::{
    application_state::input_state::{InputAction, ProcessedInputState},
    config::EngineConfig,
    error::EngineResult,
};
use mining::{is_unbreakable, MiningProgress, MiningTick};
use player_state::{
    aabb::{Aabb, PlayerDimensions},
    physics::{self, MovementInput, SurfaceRecovery},
    targeting::{self, RaycastHit},
    GameMode, PlayerState,
};
use rendering::{meshing::mesh::Mesh, MeshManager};
use voxels::{
    block::block_type::BlockType,
    chunk::{
        chunk_generation::ChunkGenerator, chunk_streaming::ChunkStreamingManager, ChunkCoord,
    },
    snapshot,
    world::{BlockPosition, World},
};

pub mod mining;
pub mod player_state;
pub mod rendering;
pub mod voxels;

/// Degrees of view rotation per unit of mouse movement.
pub const MOUSE_SENSITIVITY: f32 = 0.15;

/// Something that happened inside the engine that a host may want to react to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EngineEvent {
    /// A block was removed by mining.
    BlockMined {
        /// Where the block was
        position: BlockPosition,
        /// What the block was
        block_type: BlockType,
        /// The mode it was mined in; only survival mining yields an item
        game_mode: GameMode,
    },
    /// A block was placed.
    BlockPlaced {
        /// Where the block now is
        position: BlockPosition,
        /// What was placed
        block_type: BlockType,
    },
    /// Place was used on a crafting table instead of placing a block.
    CraftingTableUsed(BlockPosition),
    /// Creative flight started (`true`) or ended (`false`).
    FlightToggled(bool),
    /// The game mode changed.
    GameModeChanged(GameMode),
    /// The avatar was moved out of solid blocks or back up after falling.
    PlayerRecovered(Point3<f32>),
}

/// The main state container for the voxel engine
///
/// # Examples
///
/// ```
/// use voxel_sandbox::config::EngineConfig;
/// use voxel_sandbox::engine_state::EngineState;
///
/// let mut engine_state = EngineState::new(EngineConfig::default());
///
/// // Main game loop
/// for _ in 0..3 {
///     engine_state.update(1.0 / 60.0);
///     engine_state.rebuild_mesh_if_dirty();
/// }
/// assert!(engine_state.mesh().face_count() > 0);
/// ```
#[derive(Debug)]
pub struct EngineState {
    /// Engine configuration
    config: EngineConfig,
    /// The block store
    world: World,
    /// Terrain generator for new chunks
    generator: ChunkGenerator,
    /// Tracks which chunks have been generated
    streaming: ChunkStreamingManager,
    /// The avatar
    player: PlayerState,
    /// Current player actions derived from input
    player_actions: PlayerAction,
    /// World mesh and crack overlay
    mesh_manager: MeshManager,
    /// The block being broken in survival mode
    mining: MiningProgress,
    /// Block type placed by the place action, chosen by the host's hotbar
    selected_block: Option<BlockType>,
    /// Whether the world mesh is stale
    dirty: bool,
    /// Engine clock in seconds
    elapsed: f64,
    /// Chunk the avatar stood in after the last tick
    current_player_chunk_position: ChunkCoord,
    /// Events not yet drained by the host
    events: Vec<EngineEvent>,
}

impl EngineState {
    /// Creates an engine with an empty world, generates the chunks around the
    /// spawn point and puts the avatar on the surface.
    pub fn new(config: EngineConfig) -> Self {
        Self::from_snapshot(config, World::new())
    }

    /// Creates an engine around an existing world.
    ///
    /// The generated-chunk set is derived from the world's blocks, so loaded
    /// chunks are not generated again.
    ///
    /// # Arguments
    /// * `config` - Engine configuration
    /// * `world` - A previously saved or hand-built world
    pub fn from_snapshot(config: EngineConfig, world: World) -> Self {
        let generator = ChunkGenerator::new(config.world.seed, config.world.base_y);
        let mut streaming = ChunkStreamingManager::new(config.world.chunk_load_distance);
        streaming.rebuild_from_world(&world);

        let [x, y, z] = config.world.spawn_position;
        let player = PlayerState::new(Point3::new(x, y, z), config.world.game_mode);
        let mesh_manager = MeshManager::new(config.render.clone());

        let mut engine_state = Self {
            current_player_chunk_position: player.chunk_position(),
            config,
            world,
            generator,
            streaming,
            player,
            player_actions: PlayerAction::default(),
            mesh_manager,
            mining: MiningProgress::new(),
            selected_block: None,
            dirty: true,
            elapsed: 0.0,
            events: Vec::new(),
        };

        engine_state.streaming.ensure_chunks_around(
            &mut engine_state.world,
            &engine_state.generator,
            engine_state.player.position,
        );
        engine_state.ensure_player_on_surface();
        info!(
            "Engine ready: {} blocks in {} chunks, player at {:?}",
            engine_state.world.len(),
            engine_state.streaming.generated_count(),
            engine_state.player.position
        );
        engine_state
    }

    /// Creates an engine from a snapshot file, starting with an empty world if the
    /// file is missing or unreadable.
    pub fn load(config: EngineConfig, path: impl AsRef<Path>) -> Self {
        let world = snapshot::load_world(path);
        Self::from_snapshot(config, world)
    }

    /// Writes the whole world to a snapshot file.
    pub fn save_snapshot(&self, path: impl AsRef<Path>) -> EngineResult<()> {
        snapshot::save_world(path, &self.world)
    }

    /// Advances the engine by one tick.
    ///
    /// The tick streams chunks, applies look, jump and sprint input, moves the
    /// avatar, advances mining and handles falling out of the world.
    ///
    /// # Arguments
    /// * `dt` - Seconds since the last tick, clamped to the configured maximum
    pub fn update(&mut self, dt: f32) {
        let dt = dt.min(self.config.physics.max_dt).max(0.0);
        self.elapsed += dt as f64;
        let now = self.elapsed;

        if self.streaming.ensure_chunks_around(
            &mut self.world,
            &self.generator,
            self.player.position,
        ) {
            self.dirty = true;
        }

        if let Some((dx, dy)) = self.player_actions.rotate_view {
            self.look(
                Deg(-(dx as f32) * MOUSE_SENSITIVITY),
                Deg(-(dy as f32) * MOUSE_SENSITIVITY),
            );
        }

        let was_flying = self.player.flying;
        if self.player_actions.jump_pressed {
            physics::handle_jump_press(&self.world, &mut self.player, &self.config.physics, now);
        }
        physics::handle_sprint_input(
            &mut self.player,
            self.player_actions.sprint_pressed,
            self.player_actions.sprint_released,
        );

        let movement = self.player_actions.movement();
        physics::step_player(
            &self.world,
            &mut self.player,
            &movement,
            &self.config.physics,
            dt,
        );
        if self.player.flying != was_flying {
            self.events.push(EngineEvent::FlightToggled(self.player.flying));
        }

        if self.player_actions.attack_pressed {
            self.attack();
        }
        if self.player_actions.place_pressed {
            if let Some(block_type) = self.selected_block {
                self.place_at_target(block_type);
            }
        }
        self.update_mining(now);

        if physics::recover_from_fall(&self.world, &mut self.player, &self.config.physics) {
            self.dirty = true;
            self.events.push(EngineEvent::PlayerRecovered(self.player.position));
        }

        let chunk_position = self.player.chunk_position();
        if chunk_position != self.current_player_chunk_position {
            debug!(
                "Player crossed into chunk ({}, {})",
                chunk_position.x, chunk_position.y
            );
            self.current_player_chunk_position = chunk_position;
            self.dirty = true;
        }

        self.player_actions.clear_edges();
    }

    fn update_mining(&mut self, now: f64) {
        if !self.mining.is_active() {
            return;
        }
        let current_target = self
            .cast_from_eye(self.config.interaction.mining_reach)
            .map(|hit| hit.position);
        let tick = self.mining.tick(
            &mut self.world,
            now,
            self.player_actions.attack_held,
            current_target,
        );

        match tick {
            MiningTick::Idle => {}
            MiningTick::Progress { position, stage } => {
                self.mesh_manager.set_breaking_overlay(Some((position, stage)));
            }
            MiningTick::Completed {
                position,
                block_type,
            } => {
                info!("Broke {} at {:?}", block_type, position);
                self.mesh_manager.set_breaking_overlay(None);
                self.dirty = true;
                self.events.push(EngineEvent::BlockMined {
                    position,
                    block_type,
                    game_mode: self.player.game_mode,
                });
            }
            MiningTick::Cancelled => self.mesh_manager.set_breaking_overlay(None),
        }
    }

    fn ensure_player_on_surface(&mut self) {
        match physics::ensure_player_on_surface(&self.world, &mut self.player, &self.config.physics) {
            SurfaceRecovery::Relocated(position) | SurfaceRecovery::Fallback(position) => {
                self.dirty = true;
                self.events.push(EngineEvent::PlayerRecovered(position));
            }
            SurfaceRecovery::NotStuck | SurfaceRecovery::EmptyWorld => {}
        }
        self.current_player_chunk_position = self.player.chunk_position();
    }

    /// Moves the avatar, then runs the stuck-avatar recovery.
    pub fn teleport(&mut self, position: Point3<f32>) {
        self.player.position = position;
        self.player.velocity = cgmath::Vector3::new(0.0, 0.0, 0.0);
        self.player.on_ground = false;
        self.mining.cancel();
        self.mesh_manager.set_breaking_overlay(None);
        if self
            .streaming
            .ensure_chunks_around(&mut self.world, &self.generator, position)
        {
            self.dirty = true;
        }
        self.ensure_player_on_surface();
        self.dirty = true;
    }

    /// Rebuilds the world mesh if the world changed since the last rebuild.
    ///
    /// # Returns
    /// `true` if a rebuild happened.
    pub fn rebuild_mesh_if_dirty(&mut self) -> bool {
        if !self.dirty {
            return false;
        }
        self.mesh_manager.rebuild(&self.world, self.player.position);
        self.dirty = false;
        true
    }

    /// The world mesh from the last rebuild.
    pub fn mesh(&self) -> &Mesh {
        self.mesh_manager.world_mesh()
    }

    /// Crack quads for the block being mined; empty when nothing is mined.
    pub fn breaking_overlay(&self) -> &Mesh {
        self.mesh_manager.breaking_overlay()
    }

    /// Removes the block at `position`, without reach or bedrock checks.
    ///
    /// # Returns
    /// The removed block type, or `None` if the cell was empty.
    pub fn mine(&mut self, position: BlockPosition) -> Option<BlockType> {
        let removed = self.world.remove(position);
        if removed.is_some() {
            self.dirty = true;
        }
        removed
    }

    /// Places `block_type` at `position` if the cell is empty and the block would
    /// not overlap the avatar.
    ///
    /// # Returns
    /// `true` if the block was placed.
    pub fn place(&mut self, position: BlockPosition, block_type: BlockType) -> bool {
        if self.world.contains(position) {
            return false;
        }
        let dimensions = PlayerDimensions::from_config(&self.config.physics);
        let player_box = Aabb::for_player(self.player.position, dimensions);
        if player_box.intersects(&Aabb::for_block(position)) {
            return false;
        }

        self.world.set(position, block_type);
        self.dirty = true;
        true
    }

    fn cast_from_eye(&self, reach: f32) -> Option<RaycastHit> {
        targeting::cast(
            &self.world,
            self.player.eye_position(&self.config.physics),
            self.player.yaw,
            self.player.pitch,
            reach,
        )
    }

    /// The block and face under the crosshair, within the configured reach.
    pub fn target(&self) -> Option<RaycastHit> {
        self.cast_from_eye(self.config.interaction.reach)
    }

    /// Places `block_type` against the targeted face.
    ///
    /// Targeting a crafting table uses it instead, reported as
    /// [`EngineEvent::CraftingTableUsed`].
    ///
    /// # Returns
    /// `true` if a block was placed.
    pub fn place_at_target(&mut self, block_type: BlockType) -> bool {
        let Some(hit) = self.target() else {
            return false;
        };
        if self.world.get(hit.position) == Some(BlockType::CraftingTable) {
            self.events.push(EngineEvent::CraftingTableUsed(hit.position));
            return false;
        }

        let position = hit.placement_position();
        let placed = self.place(position, block_type);
        if placed {
            self.events.push(EngineEvent::BlockPlaced {
                position,
                block_type,
            });
        }
        placed
    }

    /// Attacks the targeted block: creative removes it at once, survival starts
    /// timed mining that [`EngineState::update`] advances while attack is held.
    ///
    /// # Returns
    /// `true` if a block was removed or mining is under way.
    pub fn attack(&mut self) -> bool {
        let Some(hit) = self.target() else {
            self.mining.cancel();
            self.mesh_manager.set_breaking_overlay(None);
            return false;
        };
        let Some(block_type) = self.world.get(hit.position) else {
            return false;
        };
        if is_unbreakable(hit.position, block_type) {
            return false;
        }

        match self.player.game_mode {
            GameMode::Creative => {
                self.world.remove(hit.position);
                self.dirty = true;
                self.events.push(EngineEvent::BlockMined {
                    position: hit.position,
                    block_type,
                    game_mode: GameMode::Creative,
                });
            }
            GameMode::Survival => {
                if self.mining.begin(hit.position, block_type, self.elapsed) {
                    self.mesh_manager.set_breaking_overlay(Some((hit.position, 0)));
                }
            }
        }
        true
    }

    /// Sets the input commands for the engine state.
    ///
    /// Edge-triggered actions (jump, sprint, attack and place presses) are applied
    /// on the next tick only.
    ///
    /// # Arguments
    /// * `input` - The processed input state to use for setting commands
    pub fn set_input_commands(&mut self, input: ProcessedInputState) {
        self.player_actions = PlayerAction::from_processed_input(&input);
    }

    /// Turns the view; pitch is clamped just short of straight up and down.
    pub fn look(&mut self, delta_yaw: Deg<f32>, delta_pitch: Deg<f32>) {
        self.player.rotate(delta_yaw, delta_pitch);
    }

    /// Switches game mode, resetting every movement mode and any mining.
    pub fn set_game_mode(&mut self, game_mode: GameMode) {
        self.player.set_game_mode(game_mode);
        self.mining.cancel();
        self.mesh_manager.set_breaking_overlay(None);
        self.dirty = true;
        info!("Game mode set to {:?}", game_mode);
        self.events.push(EngineEvent::GameModeChanged(game_mode));
    }

    /// Chooses the block type the place action puts down, or none.
    pub fn set_selected_block(&mut self, block_type: Option<BlockType>) {
        self.selected_block = block_type;
    }

    /// Takes every event recorded since the last call.
    pub fn drain_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.events)
    }

    /// The block store.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// The avatar.
    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    /// The engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Whether the world mesh is stale.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Engine clock in seconds.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Number of chunks generated or loaded so far.
    pub fn generated_chunk_count(&self) -> usize {
        self.streaming.generated_count()
    }

    /// The block being mined and its break stage.
    pub fn mining_progress(&self) -> Option<(BlockPosition, u8)> {
        self.mining.current()
    }
}

/// Represents player actions derived from input
///
/// Held actions stay set for as long as the input is held. Press and release
/// edges are consumed by the first tick after they arrive.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct PlayerAction {
    /// Movement actions - true if key is pressed or held
    move_forward: bool,
    move_backward: bool,
    move_left: bool,
    move_right: bool,
    jump_held: bool,
    sneak_held: bool,
    attack_held: bool,

    /// View rotation - Some if the mouse moved
    rotate_view: Option<(f64, f64)>,

    /// Actions that should only trigger on press, not hold
    jump_pressed: bool,
    sprint_pressed: bool,
    sprint_released: bool,
    attack_pressed: bool,
    place_pressed: bool,
}

impl PlayerAction {
    /// Translates the processed input state into player actions.
    ///
    /// # Arguments
    /// * `input` - The processed input state to translate
    pub fn from_processed_input(input: &ProcessedInputState) -> Self {
        PlayerAction {
            move_forward: input.get_action_state(InputAction::Forward).is_active(),
            move_backward: input.get_action_state(InputAction::Backward).is_active(),
            move_left: input.get_action_state(InputAction::Left).is_active(),
            move_right: input.get_action_state(InputAction::Right).is_active(),
            jump_held: input.get_action_state(InputAction::Jump).is_active(),
            sneak_held: input.get_action_state(InputAction::Sneak).is_active(),
            attack_held: input.get_action_state(InputAction::Attack).is_active(),
            rotate_view: input.get_mouse_delta(),
            jump_pressed: input.get_action_state(InputAction::Jump).is_just_pressed(),
            sprint_pressed: input.get_action_state(InputAction::Sprint).is_just_pressed(),
            sprint_released: input.get_action_state(InputAction::Sprint).is_just_released(),
            attack_pressed: input.get_action_state(InputAction::Attack).is_just_pressed(),
            place_pressed: input.get_action_state(InputAction::Place).is_just_pressed(),
        }
    }

    /// The held movement keys.
    pub fn movement(&self) -> MovementInput {
        MovementInput {
            forward: self.move_forward,
            backward: self.move_backward,
            left: self.move_left,
            right: self.move_right,
            jump: self.jump_held,
            sneak: self.sneak_held,
        }
    }

    fn clear_edges(&mut self) {
        self.rotate_view = None;
        self.jump_pressed = false;
        self.sprint_pressed = false;
        self.sprint_released = false;
        self.attack_pressed = false;
        self.place_pressed = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application_state::input_state::RawInputState;

    fn flat_config() -> EngineConfig {
        let mut config = EngineConfig::default();
        config.world.chunk_load_distance = 1;
        config
    }

    fn settled_engine(config: EngineConfig) -> EngineState {
        let mut engine_state = EngineState::new(config);
        for _ in 0..120 {
            engine_state.update(1.0 / 60.0);
        }
        engine_state
    }

    #[test]
    fn test_new_engine_generates_spawn_area() {
        let engine_state = EngineState::new(flat_config());
        assert_eq!(engine_state.generated_chunk_count(), 9);
        assert!(engine_state.is_dirty());
        assert_eq!(engine_state.world().get(Point3::new(0, 8, 0)), Some(BlockType::GrassBlock));
    }

    #[test]
    fn test_rebuild_clears_dirty_flag() {
        let mut engine_state = EngineState::new(flat_config());
        assert!(engine_state.rebuild_mesh_if_dirty());
        assert!(!engine_state.rebuild_mesh_if_dirty());
        assert!(engine_state.mesh().face_count() > 0);
    }

    #[test]
    fn test_player_lands_on_terrain() {
        let engine_state = settled_engine(flat_config());
        let player = engine_state.player();
        assert!(player.on_ground);
        assert!(player.position.y >= 9.0);
    }

    #[test]
    fn test_place_refuses_occupied_and_player_cells() {
        let mut engine_state = settled_engine(flat_config());
        let feet = engine_state.player().position;
        let feet_cell = Point3::new(feet.x.floor() as i32, feet.y.floor() as i32, feet.z.floor() as i32);

        assert!(!engine_state.place(feet_cell, BlockType::Dirt));
        assert!(!engine_state.place(Point3::new(0, 8, 0), BlockType::Dirt));

        engine_state.rebuild_mesh_if_dirty();
        let free_cell = Point3::new(feet_cell.x + 3, feet_cell.y, feet_cell.z);
        if !engine_state.world().contains(free_cell) {
            assert!(engine_state.place(free_cell, BlockType::Cobblestone));
            assert!(engine_state.is_dirty());
            assert_eq!(engine_state.mine(free_cell), Some(BlockType::Cobblestone));
        }
    }

    #[test]
    fn test_mine_empty_cell_does_not_dirty() {
        let mut engine_state = EngineState::new(flat_config());
        engine_state.rebuild_mesh_if_dirty();
        assert_eq!(engine_state.mine(Point3::new(0, 40, 0)), None);
        assert!(!engine_state.is_dirty());
    }

    #[test]
    fn test_set_game_mode_records_event() {
        let mut engine_state = EngineState::new(flat_config());
        engine_state.rebuild_mesh_if_dirty();
        engine_state.drain_events();

        engine_state.set_game_mode(GameMode::Creative);
        assert!(engine_state.is_dirty());
        assert_eq!(
            engine_state.drain_events(),
            vec![EngineEvent::GameModeChanged(GameMode::Creative)]
        );
        assert!(engine_state.drain_events().is_empty());
    }

    #[test]
    fn test_press_edges_apply_once() {
        let input = ProcessedInputState::holding(&[InputAction::Forward])
            .with_action(InputAction::Jump, RawInputState::Pressed);
        let mut action = PlayerAction::from_processed_input(&input);
        assert!(action.jump_pressed && action.jump_held && action.move_forward);

        action.clear_edges();
        assert!(!action.jump_pressed);
        assert!(action.jump_held && action.move_forward);
    }

    #[test]
    fn test_dt_is_clamped() {
        let mut engine_state = EngineState::new(flat_config());
        engine_state.update(5.0);
        assert!((engine_state.elapsed() - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_bad_max_dt_does_not_panic() {
        let mut config = flat_config();
        config.physics.max_dt = -1.0;
        let mut engine_state = EngineState::new(config);
        engine_state.update(1.0 / 60.0);
        assert_eq!(engine_state.elapsed(), 0.0);

        let mut config = flat_config();
        config.physics.max_dt = f32::NAN;
        let mut engine_state = EngineState::new(config);
        engine_state.update(1.0 / 60.0);
        assert!((engine_state.elapsed() - 1.0 / 60.0).abs() < 1e-6);
    }
}
