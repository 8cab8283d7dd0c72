//! Dodgeball - A 2D arena dodging game
//!
//! Core modules:
//! - `sim`: Simulation (entities, collisions, spawning, game state)
//! - `vector`: 2D vector helpers on top of glam
//! - `tuning`: Data-driven game balance
//! - `host`: Boundary surface consumed by the rendering/input host

pub mod host;
pub mod sim;
pub mod tuning;
pub mod vector;

pub use host::GameHost;
pub use tuning::{Tuning, TuningError};
pub use vector::Vector2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep used by the native runner (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Arena dimensions
    pub const WORLD_WIDTH: f32 = 800.0;
    pub const WORLD_HEIGHT: f32 = 600.0;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 15.0;
    pub const PLAYER_SPEED: f32 = 200.0;
    pub const PLAYER_MAX_HEALTH: f32 = 100.0;
    /// Health lost per drone contact (per tick of overlap)
    pub const DRONE_CONTACT_DAMAGE: f32 = 10.0;

    /// Drone defaults
    pub const DRONE_RADIUS: f32 = 12.0;
    pub const CHASER_SPEED: f32 = 150.0;
    pub const PATROLLER_SPEED: f32 = 100.0;
    pub const PATROLLER_FIRE_RATE: f32 = 2.0;
    pub const SHOOTER_SPEED: f32 = 50.0;
    pub const SHOOTER_FIRE_RATE: f32 = 1.0;
    /// Seconds of patrol time between horizontal direction flips
    pub const PATROL_FLIP_PERIOD: f32 = 2.0;

    /// Spawning
    pub const SPAWN_INTERVAL: f32 = 2.0;
    pub const INITIAL_DRONES: u32 = 5;
}
