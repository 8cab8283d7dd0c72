//! Adversary drones
//!
//! Three behaviours, fixed at construction:
//! - Chaser: heads straight for the player, never fires
//! - Patroller: sweeps horizontally, flipping direction on its own timer, fires
//! - Shooter: holds position and fires at the player

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Body, Contact, EntityKind, UpdateContext};
use super::state::GameEvent;
use crate::tuning::Tuning;

/// Drone behaviour variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DroneVariant {
    Chaser,
    Patroller,
    Shooter,
}

impl DroneVariant {
    pub const ALL: [DroneVariant; 3] = [
        DroneVariant::Chaser,
        DroneVariant::Patroller,
        DroneVariant::Shooter,
    ];
}

/// A drone entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Drone {
    pub body: Body,
    pub variant: DroneVariant,
    pub speed: f32,
    /// Seconds between shots (0 = never fires)
    pub fire_rate: f32,
    /// Counts down to the next shot
    pub fire_timer: f32,
    /// Patrol time since the last direction flip (per drone)
    patrol_elapsed: f32,
    patrol_flip_period: f32,
}

impl Drone {
    pub fn new(id: u32, pos: Vec2, variant: DroneVariant, tuning: &Tuning) -> Self {
        let stats = tuning.drone_stats(variant);
        Self {
            body: Body::new(id, pos, tuning.drone_radius),
            variant,
            speed: stats.speed,
            fire_rate: stats.fire_rate,
            fire_timer: 0.0,
            patrol_elapsed: 0.0,
            patrol_flip_period: tuning.patrol_flip_period,
        }
    }

    pub fn fires(&self) -> bool {
        self.fire_rate > 0.0
    }

    pub fn update(&mut self, dt: f32, ctx: &UpdateContext, events: &mut Vec<GameEvent>) {
        match self.variant {
            DroneVariant::Chaser => self.chase(ctx.player_pos),
            DroneVariant::Patroller => {
                self.patrol(dt);
                self.shoot(dt, ctx.player_pos, events);
            }
            DroneVariant::Shooter => self.shoot(dt, ctx.player_pos, events),
        }

        self.body.integrate(dt);
    }

    /// Projectile hits destroy the drone; everything else is handled by the other side
    pub fn on_collision(&mut self, other: &Contact) {
        if other.kind == EntityKind::Projectile {
            log::debug!("Drone {} destroyed by projectile {}", self.body.id, other.id);
            self.body.deactivate();
        }
    }

    fn chase(&mut self, target: Vec2) {
        self.body.vel = (target - self.body.pos).normalize_or_zero() * self.speed;
    }

    fn patrol(&mut self, dt: f32) {
        self.patrol_elapsed += dt;
        if self.patrol_elapsed > self.patrol_flip_period {
            self.body.vel.x = -self.body.vel.x;
            self.patrol_elapsed = 0.0;
        }

        // Kick off (or restart) the sweep when idle
        if self.body.vel.length_squared() < 0.1 {
            self.body.vel = Vec2::X * self.speed;
        }
    }

    fn shoot(&mut self, dt: f32, target: Vec2, events: &mut Vec<GameEvent>) {
        if !self.fires() {
            return;
        }

        self.fire_timer -= dt;
        if self.fire_timer <= 0.0 {
            self.fire_timer = self.fire_rate;
            let direction = (target - self.body.pos).normalize_or_zero();
            events.push(GameEvent::DroneFired {
                drone_id: self.body.id,
                origin: self.body.pos,
                direction,
            });
        }
    }
}
