//! Simulation tick and input routing
//!
//! One `tick` runs the whole pipeline before returning:
//! update → collide → reap → game-over check → spawn.

use super::collision::resolve_collisions;
use super::entity::UpdateContext;
use super::player::InputKind;
use super::state::{GameState, Simulation};

/// Slack for f32 tick sizes that are not exact in binary (1/60 s sums to just under 2 s)
const SPAWN_TOLERANCE: f64 = 1e-5;

impl Simulation {
    /// Advance the simulation by `dt` seconds.
    ///
    /// Does nothing outside Playing, or when `dt` is negative or not finite.
    pub fn tick(&mut self, dt: f32) {
        if self.state != GameState::Playing {
            return;
        }
        if !dt.is_finite() || dt < 0.0 {
            log::warn!("Ignoring tick with invalid dt {}", dt);
            return;
        }

        self.time_ticks += 1;

        // 1. Update every entity in collection order
        let ctx = UpdateContext {
            player_pos: self.player().map(|p| p.body.pos).unwrap_or_default(),
        };
        for entity in &mut self.entities {
            entity.update(dt, &ctx, &mut self.events);
        }

        // 2. Collisions
        resolve_collisions(&mut self.entities, &mut self.events);

        // 3. Reap (the player stays even when inactive)
        self.reap();

        // 4. Game over
        if self.player().is_some_and(|p| !p.is_alive()) {
            self.set_state(GameState::GameOver);
        }

        // 5. Spawn on a fixed interval, carrying the remainder so the spawn
        //    count over a run does not depend on the tick size
        self.spawn_timer += f64::from(dt);
        let interval = f64::from(self.tuning.spawn_interval);
        while self.spawn_timer + SPAWN_TOLERANCE >= interval {
            self.spawn_timer = (self.spawn_timer - interval).max(0.0);
            self.spawn_random_drone();
        }

        self.trim_events();
    }

    /// Route a host input event through the state machine.
    ///
    /// - Playing: forwarded to the player
    /// - Menu + Fire pressed: start a run
    /// - GameOver + Fire pressed: back to Menu (the arena is reset on the next start)
    pub fn handle_input(&mut self, which: InputKind, pressed: bool) {
        match self.state {
            GameState::Playing => {
                if let Some(player) = self.player_mut() {
                    player.set_input(which, pressed);
                }
            }
            GameState::Menu if which == InputKind::Fire && pressed => self.initialize(),
            GameState::GameOver if which == InputKind::Fire && pressed => {
                self.set_state(GameState::Menu);
            }
            _ => {}
        }
    }

    fn reap(&mut self) {
        let player_id = self.player_id;
        let before = self.entities.len();
        self.entities
            .retain(|e| e.is_active() || Some(e.id()) == player_id);
        let reaped = before - self.entities.len();
        if reaped > 0 {
            log::debug!("Reaped {} inactive entities", reaped);
        }
    }
}
