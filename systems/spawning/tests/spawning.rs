use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
};

use balloon_defence_core::{
    Color, Command, DefenderCatalog, DefenderType, EnemyStats, Event, Path, ProjectileStats,
    RoundPhase, RoundRules,
};
use balloon_defence_system_spawning::{Config, Spawning};
use balloon_defence_world::{self as world, query, World, WorldConfig};
use glam::Vec2;

fn new_world(quota: u32) -> World {
    World::new(WorldConfig {
        path: Path::new(vec![Vec2::new(50.0, 300.0), Vec2::new(750.0, 300.0)]).expect("path"),
        catalog: DefenderCatalog::new(vec![DefenderType {
            name: "Basic".to_owned(),
            color: Color::from_rgb(0, 0, 255),
            range: 120.0,
            cooldown_ticks: 60,
            cost: 100,
        }])
        .expect("catalog"),
        enemy: EnemyStats::new(2.0, 15.0).expect("enemy"),
        projectile: ProjectileStats::new(8.0, 5.0).expect("projectile"),
        rounds: RoundRules::new(quota, 2, 100, 25).expect("rounds"),
        starting_balance: 300,
    })
}

/// Runs `ticks` ticks and returns the tick indices on which enemies spawned.
fn spawn_ticks(world: &mut World, spawning: &mut Spawning, ticks: u64) -> Vec<u64> {
    let mut spawned_at = Vec::new();
    for _ in 0..ticks {
        let mut events = Vec::new();
        world::apply(world, Command::Tick, &mut events);

        let round = query::round(world);
        let mut commands = Vec::new();
        spawning.handle(&events, &round, &mut commands);

        for command in commands {
            let mut spawned = Vec::new();
            world::apply(world, command, &mut spawned);
            if spawned
                .iter()
                .any(|event| matches!(event, Event::EnemySpawned { .. }))
            {
                spawned_at.push(query::tick_index(world));
            }
        }
    }
    spawned_at
}

#[test]
fn first_spawn_arrives_once_counter_exceeds_interval() {
    let mut world = new_world(5);
    let mut spawning = Spawning::new(Config::new(40));

    let spawned_at = spawn_ticks(&mut world, &mut spawning, 300);

    assert_eq!(spawned_at, vec![41, 82, 123, 164, 205]);
    let round = query::round(&world);
    assert_eq!(round.spawned, 5);
    assert_eq!(round.phase, RoundPhase::Clearing);
}

#[test]
fn spawning_stops_at_quota() {
    let mut world = new_world(2);
    let mut spawning = Spawning::new(Config::new(1));

    let spawned_at = spawn_ticks(&mut world, &mut spawning, 50);

    assert_eq!(spawned_at.len(), 2);
    assert_eq!(query::enemy_view(&world).len(), 2);
}

#[test]
fn deterministic_replay_produces_identical_sequence() {
    let first = replay();
    let second = replay();

    assert_eq!(first, second, "replay diverged between runs");
    assert_eq!(first.fingerprint(), second.fingerprint());
}

fn replay() -> ReplayOutcome {
    let mut world = new_world(3);
    let mut spawning = Spawning::new(Config::new(7));
    let spawns = spawn_ticks(&mut world, &mut spawning, 40);
    let enemies = query::enemy_view(&world)
        .iter()
        .map(|enemy| (enemy.id.get(), enemy.segment))
        .collect();
    ReplayOutcome { spawns, enemies }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct ReplayOutcome {
    spawns: Vec<u64>,
    enemies: Vec<(u32, usize)>,
}

impl ReplayOutcome {
    fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }
}
