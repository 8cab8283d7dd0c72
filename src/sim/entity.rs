//! Entity model
//!
//! Every object in the arena is an [`Entity`]: a closed set of variants that
//! share a [`Body`] (id, position, velocity, radius, active flag) and dispatch
//! `update`/`on_collision` per variant.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::drone::Drone;
use super::player::Player;
use super::state::GameEvent;

/// Kind tag of an entity
///
/// `Projectile` and `Powerup` are valid tags that no spawner creates yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Drone,
    Projectile,
    Powerup,
}

/// Hands out entity ids. Ids are never reused for the allocator's lifetime.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IdAllocator {
    next_id: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a new entity ID
    pub fn next_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

/// State shared by every entity variant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    radius: f32,
    active: bool,
}

impl Body {
    /// Create an active, stationary body.
    ///
    /// Panics if `radius` is not a positive finite number.
    pub fn new(id: u32, pos: Vec2, radius: f32) -> Self {
        assert!(
            radius.is_finite() && radius > 0.0,
            "entity {id} needs a positive collision radius, got {radius}"
        );
        Self {
            id,
            pos,
            vel: Vec2::ZERO,
            radius,
            active: true,
        }
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Mark for removal at the next reap. There is no way back except [`Body::revive`].
    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Only the player is ever revived (on reset)
    pub(super) fn revive(&mut self) {
        self.active = true;
    }

    /// Base movement integration
    #[inline]
    pub fn integrate(&mut self, dt: f32) {
        self.pos += self.vel * dt;
    }
}

/// Read-only view of the other party in a collision
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub id: u32,
    pub kind: EntityKind,
    pub pos: Vec2,
}

/// Per-tick read-only context handed to `update`
#[derive(Debug, Clone, Copy, Default)]
pub struct UpdateContext {
    /// Current player position (chase/aim target)
    pub player_pos: Vec2,
}

/// An arena entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Entity {
    Player(Player),
    Drone(Drone),
    Projectile(Body),
    Powerup(Body),
}

impl Entity {
    /// Plain projectile body; nothing in the simulation spawns these yet
    pub fn projectile(id: u32, pos: Vec2, vel: Vec2, radius: f32) -> Self {
        let mut body = Body::new(id, pos, radius);
        body.vel = vel;
        Entity::Projectile(body)
    }

    pub fn powerup(id: u32, pos: Vec2, radius: f32) -> Self {
        Entity::Powerup(Body::new(id, pos, radius))
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Player(_) => EntityKind::Player,
            Entity::Drone(_) => EntityKind::Drone,
            Entity::Projectile(_) => EntityKind::Projectile,
            Entity::Powerup(_) => EntityKind::Powerup,
        }
    }

    pub fn body(&self) -> &Body {
        match self {
            Entity::Player(p) => &p.body,
            Entity::Drone(d) => &d.body,
            Entity::Projectile(b) | Entity::Powerup(b) => b,
        }
    }

    pub fn body_mut(&mut self) -> &mut Body {
        match self {
            Entity::Player(p) => &mut p.body,
            Entity::Drone(d) => &mut d.body,
            Entity::Projectile(b) | Entity::Powerup(b) => b,
        }
    }

    pub fn id(&self) -> u32 {
        self.body().id
    }

    pub fn is_active(&self) -> bool {
        self.body().is_active()
    }

    pub fn as_player(&self) -> Option<&Player> {
        match self {
            Entity::Player(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_player_mut(&mut self) -> Option<&mut Player> {
        match self {
            Entity::Player(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_drone(&self) -> Option<&Drone> {
        match self {
            Entity::Drone(d) => Some(d),
            _ => None,
        }
    }

    /// Snapshot of this entity as seen by a collision partner
    pub fn contact(&self) -> Contact {
        let body = self.body();
        Contact {
            id: body.id,
            kind: self.kind(),
            pos: body.pos,
        }
    }

    /// Advance one tick
    pub fn update(&mut self, dt: f32, ctx: &UpdateContext, events: &mut Vec<GameEvent>) {
        match self {
            Entity::Player(p) => p.update(dt),
            Entity::Drone(d) => d.update(dt, ctx, events),
            Entity::Projectile(b) | Entity::Powerup(b) => b.integrate(dt),
        }
    }

    /// React to overlapping `other`. Only mutates self.
    pub fn on_collision(&mut self, other: &Contact, events: &mut Vec<GameEvent>) {
        match self {
            Entity::Player(p) => p.on_collision(other, events),
            Entity::Drone(d) => d.on_collision(other),
            Entity::Projectile(_) | Entity::Powerup(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_monotonic() {
        let mut ids = IdAllocator::new();
        let a = ids.next_id();
        let b = ids.next_id();
        let c = ids.next_id();
        assert!(a < b && b < c);
    }

    #[test]
    fn test_body_starts_active_and_still() {
        let body = Body::new(7, Vec2::new(1.0, 2.0), 3.0);
        assert!(body.is_active());
        assert_eq!(body.vel, Vec2::ZERO);
        assert_eq!(body.radius(), 3.0);
    }

    #[test]
    #[should_panic(expected = "positive collision radius")]
    fn test_zero_radius_fails_fast() {
        let _ = Body::new(1, Vec2::ZERO, 0.0);
    }

    #[test]
    fn test_constant_velocity_integration() {
        let mut e = Entity::projectile(1, Vec2::new(10.0, -5.0), Vec2::new(30.0, 12.0), 2.0);
        let ctx = UpdateContext::default();
        let mut events = Vec::new();
        for _ in 0..50 {
            e.update(0.02, &ctx, &mut events);
        }
        let expected = Vec2::new(10.0, -5.0) + Vec2::new(30.0, 12.0) * 1.0;
        assert!((e.body().pos - expected).length() < 1e-3);
        assert!(events.is_empty());
    }

    #[test]
    fn test_reserved_kinds_ignore_collisions() {
        let mut powerup = Entity::powerup(2, Vec2::ZERO, 5.0);
        let other = Entity::projectile(3, Vec2::ZERO, Vec2::ZERO, 1.0).contact();
        let mut events = Vec::new();
        powerup.on_collision(&other, &mut events);
        assert!(powerup.is_active());
        assert_eq!(powerup.kind(), EntityKind::Powerup);
    }
}
