#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel Sandbox
//!
//! A single-player voxel world engine: a sparse block store, seeded chunk
//! generation with ores and trees, visible-face mesh extraction, avatar physics
//! with survival and creative modes, and ray targeting for mining and placement.
//!
//! ## Key Modules
//!
//! * `application_state` - Input tracking and the fixed-step host loop
//! * `config` - Tunable engine parameters, loadable from JSON
//! * `engine_state` - The engine itself: world, avatar, meshing and mining
//! * `error` - The error type shared by fallible operations
//!
//! ## Architecture
//!
//! The engine does not open a window or talk to a GPU. It produces textured quads
//! grouped by texture key, which an external renderer draws, and it consumes
//! abstract input actions, which an external host binds to keys.
//!
//! ## Usage
//!
//! ```rust
//! use voxel_sandbox::{config::EngineConfig, engine_state::EngineState};
//!
//! let mut config = EngineConfig::default();
//! config.world.chunk_load_distance = 1;
//! let mut engine_state = EngineState::new(config);
//! engine_state.update(1.0 / 60.0);
//! engine_state.rebuild_mesh_if_dirty();
//! ```

use std::path::PathBuf;

use application_state::ApplicationState;
use config::EngineConfig;
use engine_state::EngineState;
use log::{info, warn};

pub mod application_state;
pub mod config;
pub mod engine_state;
pub mod error;

/// Frames driven by the headless demo.
const DEMO_FRAMES: u32 = 600;

/// Runs the headless demo.
///
/// Command line: `voxel-sandbox [CONFIG_JSON] [SNAPSHOT_JSON]`. A missing or
/// invalid configuration falls back to the defaults. When a snapshot path is
/// given the world is loaded from it, and saved back to it at the end.
pub fn run() {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();

    info!("Logger initialized");

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => load_config_or_default(PathBuf::from(path)),
        None => EngineConfig::default(),
    };
    let snapshot_path = args.next().map(PathBuf::from);

    let engine_state = match &snapshot_path {
        Some(path) => EngineState::load(config, path),
        None => EngineState::new(config),
    };

    let mut state = ApplicationState::new(engine_state);
    state.run_demo(DEMO_FRAMES);

    if let Some(path) = snapshot_path {
        match state.engine_state.save_snapshot(&path) {
            Ok(()) => info!("World saved to {}", path.display()),
            Err(error) => warn!("Could not save world: {error}"),
        }
    }
}

fn load_config_or_default(path: PathBuf) -> EngineConfig {
    match EngineConfig::load(&path) {
        Ok(config) => {
            info!("Loaded configuration from {}", path.display());
            config
        }
        Err(error) => {
            warn!("Using default configuration: {error}");
            EngineConfig::default()
        }
    }
}
