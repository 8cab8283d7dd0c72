//! Dodgeball entry point
//!
//! On the web the host drives `WasmGame` from JavaScript. Natively this runs a
//! scripted headless session and prints the final snapshot as JSON.
//!
//! Usage: `dodgeball [seed] [tuning.json]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed = match args.next() {
        Some(arg) => match arg.parse::<u64>() {
            Ok(seed) => seed,
            Err(_) => {
                eprintln!("invalid seed `{arg}`, expected an unsigned integer");
                std::process::exit(2);
            }
        },
        None => 12345,
    };

    let tuning = match args.next() {
        Some(path) => match dodgeball::Tuning::load(&path) {
            Ok(tuning) => tuning,
            Err(err) => {
                eprintln!("{path}: {err}");
                std::process::exit(2);
            }
        },
        None => dodgeball::Tuning::default(),
    };

    log::info!("Dodgeball (native) starting with seed {}", seed);
    let summary = match headless::run(seed, tuning) {
        Ok(summary) => summary,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{json}"),
        Err(err) => log::error!("Failed to serialize summary: {}", err),
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use serde::Serialize;

    use dodgeball::consts::{MAX_SUBSTEPS, SIM_DT};
    use dodgeball::sim::{EntitySnapshot, GameEvent, GameState, InputKind};
    use dodgeball::{GameHost, Tuning, TuningError};

    /// Frame length the scripted "display" runs at (slower than the sim)
    const FRAME_DT: f32 = 1.0 / 30.0;
    /// Give up after this many simulated seconds
    const MAX_SECONDS: f32 = 120.0;

    #[derive(Debug, Serialize)]
    pub struct Summary {
        pub seed: u64,
        pub state: GameState,
        pub seconds: f32,
        /// Simulation ticks advanced during the run
        pub ticks: u64,
        pub player_health: f32,
        pub hits_taken: u32,
        pub drones_spawned: u32,
        pub shots_fired: u32,
        pub entities: Vec<EntitySnapshot>,
    }

    /// Start a run, strafe around the arena and stop at game over or the time cap
    pub fn run(seed: u64, tuning: Tuning) -> Result<Summary, TuningError> {
        let mut host = GameHost::with_tuning(seed, tuning)?;
        host.init_game();

        let mut summary = Summary {
            seed,
            state: host.query_state(),
            seconds: 0.0,
            ticks: 0,
            player_health: host.query_player_health(),
            hits_taken: 0,
            drones_spawned: 0,
            shots_fired: 0,
            entities: Vec::new(),
        };

        let mut accumulator = 0.0;
        let mut next_report = 1.0;
        while summary.seconds < MAX_SECONDS && host.query_state() == GameState::Playing {
            steer(&mut host, summary.seconds);

            // Fixed-timestep substeps like a browser frame loop
            accumulator += FRAME_DT;
            let mut substeps = 0;
            while accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                host.tick(SIM_DT);
                accumulator -= SIM_DT;
                substeps += 1;
                summary.seconds += SIM_DT;
            }

            for event in host.drain_events() {
                match event {
                    GameEvent::PlayerHit { .. } => summary.hits_taken += 1,
                    GameEvent::DroneSpawned { .. } => summary.drones_spawned += 1,
                    GameEvent::DroneFired { .. } => summary.shots_fired += 1,
                    GameEvent::StateChanged { .. } | GameEvent::PlayerDied => {}
                }
            }

            if summary.seconds >= next_report {
                next_report += 1.0;
                log::info!(
                    "t={:.0}s health={:.0} entities={}",
                    summary.seconds,
                    host.query_player_health(),
                    host.query_entities().len()
                );
            }
        }

        summary.state = host.query_state();
        summary.ticks = host.simulation().map_or(0, |sim| sim.time_ticks());
        summary.player_health = host.query_player_health();
        summary.entities = host.query_entities();
        Ok(summary)
    }

    /// Circle-ish strafing pattern: change held direction every second
    fn steer(host: &mut GameHost, seconds: f32) {
        const PATTERN: [(InputKind, InputKind); 4] = [
            (InputKind::Up, InputKind::Right),
            (InputKind::Right, InputKind::Down),
            (InputKind::Down, InputKind::Left),
            (InputKind::Left, InputKind::Up),
        ];
        let (a, b) = PATTERN[seconds as usize % PATTERN.len()];
        for kind in [InputKind::Up, InputKind::Down, InputKind::Left, InputKind::Right] {
            host.handle_input(kind, kind == a || kind == b);
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_summary_counts_ticks() {
            let summary = run(7, Tuning::default()).expect("default tuning is valid");
            assert!(summary.ticks > 0);
            assert!((summary.ticks as f32 * SIM_DT - summary.seconds).abs() < 0.05);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is the exported WasmGame, this is just to satisfy the compiler
}
