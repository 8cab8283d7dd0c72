//! Property and scenario tests for the arena simulation

use glam::Vec2;
use proptest::prelude::*;

use dodgeball::GameHost;
use dodgeball::sim::{
    DroneVariant, Entity, EntityKind, GameState, InputKind, Player, Simulation, UpdateContext,
    resolve_collisions,
};
use dodgeball::tuning::Tuning;

/// Drones can touch the player without ending the run
fn harmless_tuning() -> Tuning {
    Tuning {
        drone_contact_damage: 0.0,
        ..Tuning::default()
    }
}

fn started(tuning: Tuning, seed: u64) -> Simulation {
    let mut sim = Simulation::with_tuning(tuning, seed).expect("valid tuning");
    sim.handle_input(InputKind::Fire, true);
    sim
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_constant_velocity_integration(
        vx in -500.0f32..500.0,
        vy in -500.0f32..500.0,
        n in 1u32..200,
        dt in 0.001f32..0.05,
    ) {
        let start = Vec2::new(10.0, 20.0);
        let vel = Vec2::new(vx, vy);
        let mut e = Entity::projectile(0, start, vel, 1.0);
        let ctx = UpdateContext::default();
        let mut events = Vec::new();
        for _ in 0..n {
            e.update(dt, &ctx, &mut events);
        }
        let expected = start + vel * (n as f32 * dt);
        let tolerance = 1e-3 * (1.0 + expected.length());
        prop_assert!((e.body().pos - expected).length() < tolerance);
    }

    #[test]
    fn prop_diagonal_not_faster(up: bool, down: bool, left: bool, right: bool) {
        let tuning = Tuning::default();
        let mut player = Player::new(0, Vec2::ZERO, &tuning);
        player.set_input(InputKind::Up, up);
        player.set_input(InputKind::Down, down);
        player.set_input(InputKind::Left, left);
        player.set_input(InputKind::Right, right);
        player.update(0.1);
        let speed = player.body.vel.length();
        let moving = (up != down) || (left != right);
        if moving {
            prop_assert!((speed - tuning.player_speed).abs() < 1e-3);
        } else {
            prop_assert_eq!(speed, 0.0);
        }
    }

    #[test]
    fn prop_collision_hits_player_once_in_any_order(
        dx in -26.0f32..26.0,
        dy in -26.0f32..26.0,
        player_first: bool,
    ) {
        prop_assume!(Vec2::new(dx, dy).length() < 26.9);
        let tuning = Tuning::default();
        let player = Entity::Player(Player::new(0, Vec2::new(100.0, 100.0), &tuning));
        let drone = Entity::Drone(dodgeball::sim::Drone::new(
            1,
            Vec2::new(100.0 + dx, 100.0 + dy),
            DroneVariant::Chaser,
            &tuning,
        ));
        let mut entities = if player_first { vec![player, drone] } else { vec![drone, player] };
        let mut events = Vec::new();
        prop_assert_eq!(resolve_collisions(&mut entities, &mut events), 1);
        let health = entities.iter().find_map(Entity::as_player).map(Player::health);
        prop_assert_eq!(health, Some(90.0));
        prop_assert!(entities.iter().all(Entity::is_active));
    }

    #[test]
    fn prop_only_player_may_linger_inactive(seed in any::<u64>(), ticks in 1usize..400) {
        let mut sim = started(Tuning::default(), seed);
        for _ in 0..ticks {
            sim.tick(1.0 / 30.0);
            for e in sim.entities() {
                prop_assert!(e.is_active() || e.kind() == EntityKind::Player);
            }
            prop_assert_eq!(sim.entities()[0].kind(), EntityKind::Player);
            if sim.state() != GameState::Playing {
                break;
            }
        }
    }

    #[test]
    fn prop_dead_player_means_game_over(seed in any::<u64>()) {
        let mut sim = started(Tuning::default(), seed);
        for _ in 0..3000 {
            sim.tick(1.0 / 60.0);
            let health = sim.player_health();
            if health <= 0.0 {
                prop_assert_eq!(sim.state(), GameState::GameOver);
                prop_assert!(sim.player().is_some());
                break;
            }
            prop_assert_eq!(sim.state(), GameState::Playing);
        }
    }

    #[test]
    fn prop_spawn_count_is_floor_of_elapsed(
        seed in any::<u64>(),
        // (numerator, denominator) of the tick size in seconds
        (num, den) in prop::sample::select(vec![
            (1u32, 16u32),
            (1, 8),
            (1, 4),
            (1, 2),
            (1, 60),
            (1, 30),
            (2, 125),
        ]),
        ticks in 0u32..720,
    ) {
        let dt = num as f32 / den as f32;
        let mut sim = started(harmless_tuning(), seed);
        for _ in 0..ticks {
            sim.tick(dt);
        }
        // floor(T / 2) in exact integer arithmetic
        let expected = 5 + (ticks * num / (2 * den)) as usize;
        prop_assert_eq!(sim.drone_count(), expected);
    }
}

#[test]
fn test_init_game_one_tick() {
    let mut host = GameHost::new(77);
    host.init_game();
    let before = host.query_entities()[0];
    host.tick(0.016);
    let after = host.query_entities();
    assert_eq!(host.query_state(), GameState::Playing);
    assert_eq!((after[0].x, after[0].y), (before.x, before.y));
    assert_eq!(after.iter().filter(|e| e.kind == EntityKind::Drone).count(), 5);
}

#[test]
fn test_repeated_contact_ends_run_until_fire() {
    let tuning = Tuning {
        initial_drones: 0,
        spawn_interval: 1000.0,
        ..Tuning::default()
    };
    let mut sim = started(tuning, 1);
    let center = sim.world_size() / 2.0;
    sim.spawn_drone_at(DroneVariant::Shooter, center);

    let mut ticks = 0;
    while sim.state() == GameState::Playing {
        sim.tick(0.016);
        ticks += 1;
        assert!(ticks <= 10, "player should die within ten contacts");
    }
    assert_eq!(ticks, 10);
    assert_eq!(sim.state(), GameState::GameOver);

    for _ in 0..100 {
        sim.tick(0.016);
        sim.handle_input(InputKind::Up, true);
    }
    assert_eq!(sim.state(), GameState::GameOver);

    sim.handle_input(InputKind::Fire, true);
    assert_eq!(sim.state(), GameState::Menu);
}

#[test]
fn test_same_seed_same_run() {
    let run = |seed| {
        let mut sim = started(Tuning::default(), seed);
        sim.handle_input(InputKind::Left, true);
        for _ in 0..240 {
            sim.tick(1.0 / 60.0);
        }
        sim.snapshot()
    };
    assert_eq!(run(4242), run(4242));
}
