//! Circle collision detection and response
//!
//! Every entity is a circle. The sweep is a plain all-pairs O(n²) pass with
//! no spatial partitioning; it is fine for the few dozen entities an arena
//! holds but will not scale to thousands.

use glam::Vec2;

use super::entity::Entity;
use super::state::GameEvent;

/// Result of a circle/circle overlap check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether the circles overlap
    pub hit: bool,
    /// Distance between the centres
    pub distance: f32,
    /// Overlap depth (sum of radii minus distance, 0 on a miss)
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss(distance: f32) -> Self {
        Self {
            hit: false,
            distance,
            penetration: 0.0,
        }
    }
}

/// Check two circles for overlap. Touching circles (distance == r1 + r2) do not collide.
pub fn circle_collision(a_pos: Vec2, a_radius: f32, b_pos: Vec2, b_radius: f32) -> CollisionResult {
    let dist = a_pos.distance(b_pos);
    let min_dist = a_radius + b_radius;
    if dist < min_dist {
        CollisionResult {
            hit: true,
            distance: dist,
            penetration: min_dist - dist,
        }
    } else {
        CollisionResult::miss(dist)
    }
}

/// Run the all-pairs sweep over `entities`.
///
/// For each unordered pair (i < j) with both members active, an overlap calls
/// `on_collision` on both ends: first `a` with `b`, then `b` with `a`. Each
/// side only ever sees a [`Contact`](super::entity::Contact) copy of the other.
/// Activity is re-checked per pair, so an entity deactivated earlier in the
/// sweep takes no further part in it.
///
/// Returns the number of colliding pairs.
pub fn resolve_collisions(entities: &mut [Entity], events: &mut Vec<GameEvent>) -> usize {
    let mut pairs = 0;
    for i in 0..entities.len() {
        for j in (i + 1)..entities.len() {
            let (head, tail) = entities.split_at_mut(j);
            let a = &mut head[i];
            let b = &mut tail[0];

            if !a.is_active() || !b.is_active() {
                continue;
            }

            let result = circle_collision(
                a.body().pos,
                a.body().radius(),
                b.body().pos,
                b.body().radius(),
            );
            if !result.hit {
                continue;
            }
            log::trace!(
                "Entities {} and {} overlap by {:.2} ({:.2} apart)",
                a.id(),
                b.id(),
                result.penetration,
                result.distance
            );

            let a_contact = a.contact();
            let b_contact = b.contact();
            a.on_collision(&b_contact, events);
            b.on_collision(&a_contact, events);
            pairs += 1;
        }
    }
    pairs
}
