//! Host boundary
//!
//! The rendering/input host drives the simulation through [`GameHost`]:
//! `init_game`, `tick`, `handle_input` and the read-only queries. On
//! `wasm32` the same surface is exported to JavaScript as `WasmGame`.

use crate::sim::{EntitySnapshot, GameEvent, GameState, InputKind, Simulation};
use crate::tuning::{Tuning, TuningError};

/// Owns the (optional) simulation on behalf of the host
#[derive(Debug, Clone)]
pub struct GameHost {
    seed: u64,
    tuning: Tuning,
    sim: Option<Simulation>,
}

impl GameHost {
    /// Host with default tuning. Nothing runs until [`GameHost::init_game`].
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            tuning: Tuning::default(),
            sim: None,
        }
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self {
            seed,
            tuning,
            sim: None,
        })
    }

    /// Build a fresh simulation and start a run (Playing with the initial drones)
    pub fn init_game(&mut self) {
        let mut sim = match Simulation::with_tuning(self.tuning.clone(), self.seed) {
            Ok(sim) => sim,
            // Tuning was validated on construction
            Err(err) => {
                log::error!("Falling back to default tuning: {}", err);
                Simulation::new(self.seed)
            }
        };
        sim.initialize();
        self.sim = Some(sim);
    }

    pub fn tick(&mut self, dt: f32) {
        if let Some(sim) = self.sim.as_mut() {
            sim.tick(dt);
        }
    }

    pub fn handle_input(&mut self, which: InputKind, pressed: bool) {
        if let Some(sim) = self.sim.as_mut() {
            sim.handle_input(which, pressed);
        }
    }

    /// Integer-coded input (0 = Up, 1 = Down, 2 = Left, 3 = Right, 4 = Fire)
    pub fn handle_input_code(&mut self, code: i32, pressed: bool) {
        match InputKind::from_code(code) {
            Some(which) => self.handle_input(which, pressed),
            None => log::warn!("Ignoring unknown input code {}", code),
        }
    }

    /// Menu until a game has been initialised
    pub fn query_state(&self) -> GameState {
        self.sim.as_ref().map_or(GameState::Menu, Simulation::state)
    }

    pub fn query_entities(&self) -> Vec<EntitySnapshot> {
        self.sim.as_ref().map(Simulation::snapshot).unwrap_or_default()
    }

    pub fn query_player_health(&self) -> f32 {
        self.sim.as_ref().map_or(0.0, Simulation::player_health)
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.sim
            .as_mut()
            .map(Simulation::drain_events)
            .unwrap_or_default()
    }

    pub fn simulation(&self) -> Option<&Simulation> {
        self.sim.as_ref()
    }
}

#[cfg(target_arch = "wasm32")]
mod wasm {
    use wasm_bindgen::prelude::*;

    use super::GameHost;

    /// JavaScript-facing wrapper around [`GameHost`]
    #[wasm_bindgen]
    pub struct WasmGame {
        host: GameHost,
    }

    #[wasm_bindgen]
    impl WasmGame {
        #[wasm_bindgen(constructor)]
        pub fn new() -> WasmGame {
            console_error_panic_hook::set_once();
            // Ignore the error if a logger is already installed
            let _ = console_log::init_with_level(log::Level::Info);

            let seed = js_sys::Date::now() as u64;
            log::info!("Dodgeball host created with seed: {}", seed);
            WasmGame {
                host: GameHost::new(seed),
            }
        }

        #[wasm_bindgen(js_name = initGame)]
        pub fn init_game(&mut self) {
            self.host.init_game();
        }

        pub fn tick(&mut self, dt: f32) {
            self.host.tick(dt);
        }

        #[wasm_bindgen(js_name = handleInput)]
        pub fn handle_input(&mut self, code: i32, pressed: bool) {
            self.host.handle_input_code(code, pressed);
        }

        /// 0 = Menu, 1 = Playing, 2 = GameOver
        #[wasm_bindgen(js_name = queryState)]
        pub fn query_state(&self) -> u8 {
            use crate::sim::GameState;
            match self.host.query_state() {
                GameState::Menu => 0,
                GameState::Playing => 1,
                GameState::GameOver => 2,
            }
        }

        /// Entity snapshot as a JSON array
        #[wasm_bindgen(js_name = queryEntities)]
        pub fn query_entities(&self) -> String {
            serde_json::to_string(&self.host.query_entities()).unwrap_or_else(|err| {
                log::error!("Failed to serialize entities: {}", err);
                "[]".to_string()
            })
        }

        #[wasm_bindgen(js_name = queryPlayerHealth)]
        pub fn query_player_health(&self) -> f32 {
            self.host.query_player_health()
        }

        /// Queued events as a JSON array
        #[wasm_bindgen(js_name = drainEvents)]
        pub fn drain_events(&mut self) -> String {
            serde_json::to_string(&self.host.drain_events()).unwrap_or_else(|err| {
                log::error!("Failed to serialize events: {}", err);
                "[]".to_string()
            })
        }
    }

    impl Default for WasmGame {
        fn default() -> Self {
            Self::new()
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm::WasmGame;
