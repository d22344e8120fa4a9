//! End-to-end runs through the world tick

use pixel_runner::HighScore;
use pixel_runner::consts::SIM_DT;
use pixel_runner::persistence::{MemoryStore, ScoreStore};
use pixel_runner::sim::{
    Bindings, Collider, ContactEvent, DifficultyLevel, GamePhase, LoseReason, TickInput, Wiring,
    World,
};
use pixel_runner::RunnerConfig;

fn world_with(store: MemoryStore) -> World {
    World::new(RunnerConfig::default(), Box::new(store))
}

fn idle() -> TickInput {
    TickInput::default()
}

fn select(level: DifficultyLevel) -> TickInput {
    TickInput {
        select: Some(level),
        ..Default::default()
    }
}

fn run(world: &mut World, ticks: u32) {
    for _ in 0..ticks {
        world.tick(&idle(), SIM_DT);
    }
}

/// Menu world with the player resting on the ground
fn settled() -> World {
    let mut world = world_with(MemoryStore::new());
    run(&mut world, 30);
    assert!(world.player().unwrap().is_grounded());
    world
}

fn banner(world: &World) -> String {
    world
        .hud()
        .banner()
        .map(|b| b.text.clone())
        .unwrap_or_default()
}

#[test]
fn test_select_hard_then_score_for_one_second() {
    let mut world = settled();
    assert_eq!(world.phase(), GamePhase::Menu);

    world.tick(&select(DifficultyLevel::Hard), SIM_DT);
    assert_eq!(world.phase(), GamePhase::Playing);
    assert_eq!(world.session().difficulty, Some(DifficultyLevel::Hard));
    assert_eq!(world.manager().world_speed(), 9.0);
    assert_eq!(world.session().score, 0.0);

    run(&mut world, 60);
    assert!((world.session().score - 20.0).abs() < 0.01);
    assert_eq!(world.phase(), GamePhase::Playing);
    assert!(world.player().unwrap().is_grounded());
}

#[test]
fn test_table_values_after_start() {
    for level in DifficultyLevel::ALL {
        let mut world = settled();
        world.tick(&select(level), SIM_DT);
        assert_eq!(world.manager().world_speed(), level.settings().world_speed);
        assert_eq!(world.manager().spawn_interval(), level.settings().spawn_interval);
    }
}

#[test]
fn test_ground_end_then_obstacle_begin() {
    let mut world = settled();
    world.tick(&select(DifficultyLevel::Medium), SIM_DT);
    run(&mut world, 30);

    world.push_contact(ContactEvent::End(Collider::Ground));
    world.push_contact(ContactEvent::Begin(Collider::Obstacle(7)));
    world.tick(&idle(), SIM_DT);

    assert_eq!(world.phase(), GamePhase::GameOver);
    assert_eq!(world.session().lose_reason, Some(LoseReason::HitObstacle));
    assert!(!world.spawner().unwrap().is_enabled());
    assert!(!world.player().unwrap().is_enabled());
    assert!(banner(&world).contains("hit an obstacle"));

    // A second hit changes nothing
    let first = banner(&world);
    world.push_contact(ContactEvent::Begin(Collider::Obstacle(8)));
    world.tick(&idle(), SIM_DT);
    assert_eq!(banner(&world), first);
}

#[test]
fn test_fall_off_stage_fires_once() {
    let mut world = settled();
    world.tick(&select(DifficultyLevel::Easy), SIM_DT);
    run(&mut world, 60);

    {
        let player = world.player_mut().unwrap();
        // Off the ground's edge so it keeps falling
        player.body.pos.x = 40.0;
        player.body.pos.y = -9.0;
    }
    world.tick(&idle(), SIM_DT);
    assert_eq!(world.phase(), GamePhase::GameOver);
    assert_eq!(world.session().lose_reason, Some(LoseReason::FellOffStage));
    let first = banner(&world);
    let best = world.manager().high_score();
    assert!(first.contains("fell off stage"));

    run(&mut world, 60);
    assert!(world.player().unwrap().pos().y < -8.0);
    assert_eq!(banner(&world), first);
    assert_eq!(world.manager().high_score(), best);
}

#[test]
fn test_score_frozen_after_game_over() {
    let mut world = settled();
    world.tick(&select(DifficultyLevel::Easy), SIM_DT);
    run(&mut world, 30);
    world.push_contact(ContactEvent::Begin(Collider::Obstacle(1)));
    world.tick(&idle(), SIM_DT);

    let score = world.session().score;
    run(&mut world, 30);
    assert_eq!(world.session().score, score);
}

#[test]
fn test_high_score_written_only_when_beaten() {
    let mut store = MemoryStore::new();
    store.set_int(HighScore::STORAGE_KEY, 15);
    let mut world = world_with(store);
    run(&mut world, 30);

    // Easy for 1s -> 10 points, not a record
    world.tick(&select(DifficultyLevel::Easy), SIM_DT);
    run(&mut world, 60);
    world.push_contact(ContactEvent::Begin(Collider::Obstacle(1)));
    world.tick(&idle(), SIM_DT);
    assert_eq!(world.manager().high_score(), 15);
    assert_eq!(world.store().get_int(HighScore::STORAGE_KEY), Some(15));

    // Restart and go for 2s on Easy -> 20 points
    world.tick(
        &TickInput {
            restart: true,
            ..Default::default()
        },
        SIM_DT,
    );
    assert_eq!(world.phase(), GamePhase::Menu);
    run(&mut world, 30);
    world.tick(&select(DifficultyLevel::Easy), SIM_DT);
    run(&mut world, 120);
    world.push_contact(ContactEvent::Begin(Collider::Obstacle(1)));
    world.tick(&idle(), SIM_DT);

    let best = world.manager().high_score();
    assert!(best >= 19 && best <= 20, "best = {}", best);
    assert_eq!(world.store().get_int(HighScore::STORAGE_KEY), Some(i64::from(best)));
}

#[test]
fn test_obstacles_scroll_and_despawn() {
    let mut world = settled();
    world.tick(&select(DifficultyLevel::Hard), SIM_DT);
    // Keep the player out of the way by holding it in the air
    for _ in 0..360 {
        if let Some(player) = world.player_mut() {
            player.body.pos.y = 5.0;
            player.body.vel.y = 0.0;
        }
        world.tick(&idle(), SIM_DT);
        assert!(world.obstacles().iter().all(|o| o.pos.x >= -20.0));
    }
    assert_eq!(world.phase(), GamePhase::Playing);
    // 6s on Hard: several spawned, the first ones already gone
    let first_alive = world.obstacles().iter().map(|o| o.id).min().unwrap_or(0);
    assert!(first_alive > 1);
}

#[test]
fn test_wiring_completed_on_next_tick() {
    let mut world = World::with_bindings(
        RunnerConfig::default(),
        Box::new(MemoryStore::new()),
        Bindings::default(),
    );
    assert_eq!(world.phase(), GamePhase::Uninitialized);

    let bindings = world.standard_bindings();
    *world.bindings_mut() = bindings;
    world.tick(&idle(), SIM_DT);
    assert_eq!(world.manager().wiring(), Wiring::Ready);
    assert_eq!(world.phase(), GamePhase::Menu);
}

#[test]
fn test_world_builds_with_empty_star_bounds() {
    let config: RunnerConfig = serde_json::from_str(
        r#"{ "stars": { "count": 3, "min": [0.0, 1.0], "max": [0.0, 2.0],
            "speeds": [0.04, 0.07], "wrap_at_x": -12.0, "reset_to_x": 12.0 } }"#,
    )
    .unwrap();
    let mut world = World::new(config, Box::new(MemoryStore::new()));
    run(&mut world, 10);
    assert_eq!(world.layers().len(), 3 + 4);
    assert_eq!(world.phase(), GamePhase::Menu);
}

#[test]
fn test_autopilot_starts_and_scores() {
    let mut world = world_with(MemoryStore::new());
    let auto = TickInput {
        autopilot: true,
        ..Default::default()
    };
    world.tick(&auto, SIM_DT);
    assert_eq!(world.phase(), GamePhase::Playing);
    for _ in 0..300 {
        world.tick(&auto, SIM_DT);
    }
    assert!(world.session().score > 0.0);
}
