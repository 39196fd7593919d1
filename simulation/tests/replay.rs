use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
};

use balloon_defence_core::DefenderKind;
use balloon_defence_simulation::{Input, Simulation, SimulationConfig, SimulationSnapshot};
use glam::Vec2;

/// Placement schedule applied at fixed ticks.
const SCHEDULE: [(u32, f32, f32, u32); 3] = [
    (0, 125.0, 250.0, 0),
    (150, 260.0, 200.0, 1),
    (700, 540.0, 300.0, 0),
];

fn replay() -> (u64, SimulationSnapshot) {
    let mut simulation = Simulation::new(SimulationConfig::default()).expect("simulation");
    let mut hasher = DefaultHasher::new();

    for tick in 0..1_500 {
        for (at, x, y, kind) in SCHEDULE {
            if at == tick {
                simulation.submit(Input::PlaceDefender {
                    kind: DefenderKind::new(kind),
                    position: Vec2::new(x, y),
                });
            }
        }
        simulation.submit(Input::AdvanceRound);

        for event in simulation.step() {
            format!("{event:?}").hash(&mut hasher);
        }
    }

    (hasher.finish(), simulation.snapshot())
}

#[test]
fn identical_inputs_produce_identical_runs() {
    let (first_hash, first_snapshot) = replay();
    let (second_hash, second_snapshot) = replay();

    assert_eq!(first_hash, second_hash, "event streams diverged");
    assert_eq!(first_snapshot, second_snapshot);
    assert!(
        first_snapshot.round.round > 1,
        "schedule should clear a round"
    );
}

#[test]
fn snapshot_survives_binary_serialization() {
    let (_, snapshot) = replay();

    let bytes = bincode::serialize(&snapshot).expect("serialize");
    let decoded: SimulationSnapshot = bincode::deserialize(&bytes).expect("deserialize");

    assert_eq!(decoded, snapshot);
}
