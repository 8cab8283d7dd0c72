//! Game state and core simulation types
//!
//! [`Simulation`] owns the entity collection, the player handle, the seeded
//! RNG and the timers. The per-tick pipeline lives in `tick.rs`.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::drone::{Drone, DroneVariant};
use super::entity::{Entity, EntityKind, IdAllocator};
use super::player::Player;
use crate::tuning::{Tuning, TuningError};

/// Game lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameState {
    /// Waiting for Fire to start a run
    #[default]
    Menu,
    /// Active gameplay
    Playing,
    /// Player died; Fire returns to the menu
    GameOver,
}

/// Something the host may want to react to (sound, effects, HUD)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    StateChanged { from: GameState, to: GameState },
    DroneSpawned { id: u32, variant: DroneVariant, pos: Vec2 },
    /// A drone's fire timer elapsed. No projectile entity is created.
    DroneFired { drone_id: u32, origin: Vec2, direction: Vec2 },
    PlayerHit { drone_id: u32, health: f32 },
    PlayerDied,
}

/// Maximum queued events; the oldest are dropped when the host does not drain
pub const MAX_EVENTS: usize = 256;

/// Read-only per-entity view for rendering
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EntitySnapshot {
    pub id: u32,
    pub kind: EntityKind,
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

/// Arena edge a drone enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

/// The simulation
#[derive(Debug, Clone)]
pub struct Simulation {
    /// Seed the RNG was created from
    pub seed: u64,
    pub(super) tuning: Tuning,
    pub(super) state: GameState,
    /// Insertion-ordered; the player is one element
    pub(super) entities: Vec<Entity>,
    /// Non-owning handle to the player inside `entities`
    pub(super) player_id: Option<u32>,
    pub(super) ids: IdAllocator,
    pub(super) rng: Pcg32,
    /// Seconds accumulated toward the next spawn
    pub(super) spawn_timer: f64,
    /// Ticks advanced while Playing (since the last initialize)
    pub(super) time_ticks: u64,
    pub(super) events: Vec<GameEvent>,
}

impl Simulation {
    /// Create a simulation in the Menu state with default tuning
    pub fn new(seed: u64) -> Self {
        Self::build(Tuning::default(), seed)
    }

    /// Create a simulation with custom tuning, rejecting invalid values
    pub fn with_tuning(tuning: Tuning, seed: u64) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::build(tuning, seed))
    }

    fn build(tuning: Tuning, seed: u64) -> Self {
        Self {
            seed,
            tuning,
            state: GameState::Menu,
            entities: Vec::new(),
            player_id: None,
            ids: IdAllocator::new(),
            rng: Pcg32::seed_from_u64(seed),
            spawn_timer: 0.0,
            time_ticks: 0,
            events: Vec::new(),
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Ticks advanced in the current run
    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    pub fn spawn_timer(&self) -> f32 {
        self.spawn_timer as f32
    }

    /// Arena size (width, height)
    pub fn world_size(&self) -> Vec2 {
        Vec2::new(self.tuning.world_width, self.tuning.world_height)
    }

    pub fn player(&self) -> Option<&Player> {
        let id = self.player_id?;
        self.entities
            .iter()
            .find(|e| e.id() == id)
            .and_then(Entity::as_player)
    }

    pub fn player_mut(&mut self) -> Option<&mut Player> {
        let id = self.player_id?;
        self.entities
            .iter_mut()
            .find(|e| e.id() == id)
            .and_then(Entity::as_player_mut)
    }

    /// Live player health (0 when no run has started)
    pub fn player_health(&self) -> f32 {
        self.player().map_or(0.0, Player::health)
    }

    pub fn drone_count(&self) -> usize {
        self.entities
            .iter()
            .filter(|e| e.kind() == EntityKind::Drone)
            .count()
    }

    /// Rendering snapshot in collection order
    pub fn snapshot(&self) -> Vec<EntitySnapshot> {
        self.entities
            .iter()
            .map(|e| {
                let body = e.body();
                EntitySnapshot {
                    id: body.id,
                    kind: e.kind(),
                    x: body.pos.x,
                    y: body.pos.y,
                    radius: body.radius(),
                }
            })
            .collect()
    }

    /// Take all queued events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Start a fresh run: clear the arena, place the player at the centre and
    /// spawn the initial drones.
    pub fn initialize(&mut self) {
        self.entities.clear();
        self.spawn_timer = 0.0;
        self.time_ticks = 0;

        let center = self.world_size() / 2.0;
        let id = self.ids.next_id();
        self.entities
            .push(Entity::Player(Player::new(id, center, &self.tuning)));
        self.player_id = Some(id);

        for _ in 0..self.tuning.initial_drones {
            self.spawn_random_drone();
        }

        log::info!(
            "Run started (seed {}): player {} with {} drones",
            self.seed,
            id,
            self.tuning.initial_drones
        );
        self.set_state(GameState::Playing);
    }

    /// Spawn a drone of a random variant on a random arena edge
    pub fn spawn_random_drone(&mut self) -> u32 {
        let variant = DroneVariant::ALL[self.rng.random_range(0..DroneVariant::ALL.len())];
        let pos = self.random_edge_point();
        self.spawn_drone_at(variant, pos)
    }

    /// Spawn a drone at an explicit position
    pub fn spawn_drone_at(&mut self, variant: DroneVariant, pos: Vec2) -> u32 {
        let id = self.ids.next_id();
        self.entities
            .push(Entity::Drone(Drone::new(id, pos, variant, &self.tuning)));
        log::debug!("Spawned {:?} drone {} at ({:.0}, {:.0})", variant, id, pos.x, pos.y);
        self.push_event(GameEvent::DroneSpawned { id, variant, pos });
        id
    }

    /// Uniform edge, then a uniform coordinate along it
    fn random_edge_point(&mut self) -> Vec2 {
        let Vec2 { x: w, y: h } = self.world_size();
        let edge = match self.rng.random_range(0..4) {
            0 => Edge::Top,
            1 => Edge::Right,
            2 => Edge::Bottom,
            _ => Edge::Left,
        };
        match edge {
            Edge::Top => Vec2::new(self.rng.random_range(0.0..w), 0.0),
            Edge::Right => Vec2::new(w, self.rng.random_range(0.0..h)),
            Edge::Bottom => Vec2::new(self.rng.random_range(0.0..w), h),
            Edge::Left => Vec2::new(0.0, self.rng.random_range(0.0..h)),
        }
    }

    pub(super) fn set_state(&mut self, to: GameState) {
        let from = self.state;
        if from == to {
            return;
        }
        log::info!("Game state {:?} -> {:?}", from, to);
        self.state = to;
        self.push_event(GameEvent::StateChanged { from, to });
    }

    pub(super) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
        self.trim_events();
    }

    pub(super) fn trim_events(&mut self) {
        if self.events.len() > MAX_EVENTS {
            let excess = self.events.len() - MAX_EVENTS;
            self.events.drain(..excess);
        }
    }
}
