//! # Voxel Sandbox Entry Point
//!
//! Runs the headless engine demo. See `run()` in the library for the arguments.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run --release -- config.json world.json
//! ```

fn main() {
    voxel_sandbox::run();
}
