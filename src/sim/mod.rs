//! Arena simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering
//! and platform dependencies:
//! - Seeded RNG only
//! - Stable iteration order (collection insertion order)
//! - Entities never reach into each other; the orchestrator mediates

pub mod collision;
pub mod drone;
pub mod entity;
pub mod player;
pub mod state;
pub mod tick;

pub use collision::{CollisionResult, circle_collision, resolve_collisions};
pub use drone::{Drone, DroneVariant};
pub use entity::{Body, Contact, Entity, EntityKind, IdAllocator, UpdateContext};
pub use player::{InputFlags, InputKind, Player};
pub use state::{EntitySnapshot, GameEvent, GameState, MAX_EVENTS, Simulation};
