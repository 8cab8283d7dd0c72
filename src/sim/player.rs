//! The player-controlled entity

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Body, Contact, EntityKind};
use super::state::GameEvent;
use crate::tuning::Tuning;
use crate::vector::Vector2Ext;

/// Input channels delivered by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputKind {
    Up,
    Down,
    Left,
    Right,
    Fire,
}

impl InputKind {
    /// Map the host's integer input code (0..=4) to an input kind
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(InputKind::Up),
            1 => Some(InputKind::Down),
            2 => Some(InputKind::Left),
            3 => Some(InputKind::Right),
            4 => Some(InputKind::Fire),
            _ => None,
        }
    }
}

/// Held state of each input channel
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputFlags {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub fire: bool,
}

impl InputFlags {
    pub fn set(&mut self, which: InputKind, pressed: bool) {
        match which {
            InputKind::Up => self.up = pressed,
            InputKind::Down => self.down = pressed,
            InputKind::Left => self.left = pressed,
            InputKind::Right => self.right = pressed,
            InputKind::Fire => self.fire = pressed,
        }
    }

    /// Movement direction (-1/0/+1 per axis, screen coordinates so Up is -y)
    pub fn direction(&self) -> Vec2 {
        let mut dir = Vec2::ZERO;
        if self.up {
            dir.y -= 1.0;
        }
        if self.down {
            dir.y += 1.0;
        }
        if self.left {
            dir.x -= 1.0;
        }
        if self.right {
            dir.x += 1.0;
        }
        dir
    }
}

/// The player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    pub input: InputFlags,
    pub speed: f32,
    health: f32,
    max_health: f32,
    contact_damage: f32,
    score: u32,
}

impl Player {
    pub fn new(id: u32, pos: Vec2, tuning: &Tuning) -> Self {
        Self {
            body: Body::new(id, pos, tuning.player_radius),
            input: InputFlags::default(),
            speed: tuning.player_speed,
            health: tuning.player_max_health,
            max_health: tuning.player_max_health,
            contact_damage: tuning.drone_contact_damage,
            score: 0,
        }
    }

    pub fn health(&self) -> f32 {
        self.health
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_alive(&self) -> bool {
        self.body.is_active()
    }

    /// Overwrite one input flag (last write wins)
    pub fn set_input(&mut self, which: InputKind, pressed: bool) {
        self.input.set(which, pressed);
    }

    /// Steer from the held inputs, then integrate.
    /// Diagonals are normalized so they are no faster than a single axis.
    pub fn update(&mut self, dt: f32) {
        let mut direction = self.input.direction();
        if direction.length_squared() > 0.0 {
            direction.normalize_in_place();
        }
        self.body.vel = direction * self.speed;
        self.body.integrate(dt);
    }

    pub fn on_collision(&mut self, other: &Contact, events: &mut Vec<GameEvent>) {
        match other.kind {
            EntityKind::Drone => {
                self.health -= self.contact_damage;
                log::debug!(
                    "Player hit by drone {} (health {:.1})",
                    other.id,
                    self.health
                );
                events.push(GameEvent::PlayerHit {
                    drone_id: other.id,
                    health: self.health,
                });
                if self.health <= 0.0 && self.body.is_active() {
                    self.body.deactivate();
                    events.push(GameEvent::PlayerDied);
                }
            }
            // Pickup hook: powerups have no effect yet
            EntityKind::Powerup => {}
            EntityKind::Player | EntityKind::Projectile => {}
        }
    }

    /// Restore full health, clear score and reactivate
    pub fn reset(&mut self) {
        self.health = self.max_health;
        self.score = 0;
        self.body.revive();
    }
}
