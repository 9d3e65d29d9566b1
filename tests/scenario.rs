use elfwood::game::{
    BehaviorState, GameConfig, Intent, TickOutcome, VisualState, World,
};
use rstest::{fixture, rstest};

const DT: f32 = 1.0 / 60.0;

fn attack() -> Intent {
    Intent { attack_requested: true, ..Intent::default() }
}

/// Agents that never move, so positions stay where the test put them.
#[fixture]
fn config() -> GameConfig {
    let mut config = GameConfig::default();
    config.agent.speed = 0.0;
    config
}

#[rstest]
fn two_strikes_defeat_an_agent_and_it_is_pruned_one_tick_later(config: GameConfig) {
    let mut world = World::empty(config).unwrap();
    assert_eq!(world.avatar().yaw, 0.0);
    let id = world.spawn_agent(0.0, 2.0).unwrap();
    assert_eq!(world.agents().get(id).unwrap().health(), 30);

    assert_eq!(world.tick(&attack(), DT), TickOutcome::Running);
    let agent = world.agents().get(id).unwrap();
    assert_eq!(agent.health(), 5);
    assert_ne!(agent.state(), BehaviorState::Defeated);

    // Second request once the cooldown has elapsed.
    world.tick(&attack(), 0.5);
    let agent = world.agents().get(id).expect("defeated agent lingers for one tick");
    assert_eq!(agent.health(), 0);
    assert_eq!(agent.state(), BehaviorState::Defeated);

    let snapshot = world.snapshot();
    assert_eq!(snapshot.agents.len(), 1);
    assert_eq!(snapshot.agents[0].visual, VisualState::Defeated);
    assert_eq!(snapshot.agents_remaining(), 0);

    world.tick(&Intent::default(), DT);
    assert!(world.agents().get(id).is_none());
    assert!(world.snapshot().agents.is_empty());
}

#[rstest]
fn held_attack_strikes_once_per_cooldown(config: GameConfig) {
    let mut world = World::empty(config).unwrap();
    let id = world.spawn_agent(0.0, 2.0).unwrap();

    // 20 frames at 60 Hz is a third of a second: inside one cooldown.
    for _ in 0..20 {
        world.tick(&attack(), DT);
    }
    assert_eq!(world.agents().get(id).unwrap().health(), 5);
}

#[rstest]
fn agent_attacks_drive_avatar_to_game_over(config: GameConfig) {
    let mut world = World::empty(config).unwrap();
    world.spawn_agent(0.0, 1.0).unwrap();
    world.spawn_agent(1.0, 0.0).unwrap();

    let mut outcomes = Vec::new();
    for _ in 0..2000 {
        let outcome = world.tick(&Intent::default(), 0.1);
        outcomes.push(outcome);
        if outcome == TickOutcome::Halted {
            break;
        }
    }

    assert_eq!(outcomes.iter().filter(|o| **o == TickOutcome::GameOver).count(), 1);
    assert_eq!(outcomes.last(), Some(&TickOutcome::Halted));
    assert_eq!(world.avatar().health(), 0);
    assert!(world.snapshot().game_over);

    let frozen = world.snapshot();
    let busy = Intent {
        move_forward: true,
        turn_left: true,
        attack_requested: true,
        ..Intent::default()
    };
    for _ in 0..10 {
        assert_eq!(world.tick(&busy, DT), TickOutcome::Halted);
    }
    assert_eq!(world.snapshot(), frozen);
}

#[rstest]
fn walking_away_leaves_a_pursuer_behind() {
    let mut world = World::empty(GameConfig::default()).unwrap();
    let id = world.spawn_agent(0.0, -8.0).unwrap();

    world.tick(&Intent::default(), DT);
    assert_eq!(world.agents().get(id).unwrap().state(), BehaviorState::Pursuing);

    let forward = Intent { move_forward: true, ..Intent::default() };
    for _ in 0..120 {
        world.tick(&forward, DT);
    }
    assert_eq!(world.agents().get(id).unwrap().state(), BehaviorState::Idle);
    assert!(world.avatar().health() == world.avatar().max_health());
}

#[rstest]
fn populated_world_is_reproducible() {
    let a = World::new(GameConfig::default()).unwrap();
    let b = World::new(GameConfig::default()).unwrap();
    assert_eq!(a.trees(), b.trees());
    assert_eq!(a.snapshot(), b.snapshot());
}
