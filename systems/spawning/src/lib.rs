#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic spawning system responsible for releasing enemies onto the path.

use balloon_defence_core::{Command, Event, RoundSnapshot};

/// Configuration parameters required to construct the spawning system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    interval_ticks: u32,
}

impl Config {
    /// Creates a configuration that spawns once the counter exceeds `interval_ticks`.
    #[must_use]
    pub const fn new(interval_ticks: u32) -> Self {
        Self { interval_ticks }
    }
}

/// Pure system that emits spawn commands while the round has quota left.
///
/// A counter advances on every tick that the round accepts spawns. When it
/// exceeds the configured interval a spawn is requested and the counter resets,
/// so consecutive spawns are `interval_ticks + 1` ticks apart.
#[derive(Debug)]
pub struct Spawning {
    interval_ticks: u32,
    counter: u32,
}

impl Spawning {
    /// Creates a new spawning system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            interval_ticks: config.interval_ticks,
            counter: 0,
        }
    }

    /// Ticks accumulated since the previous spawn.
    #[must_use]
    pub fn counter(&self) -> u32 {
        self.counter
    }

    /// Consumes tick events and the round state to emit spawn commands.
    pub fn handle(&mut self, events: &[Event], round: &RoundSnapshot, out: &mut Vec<Command>) {
        if !round.accepts_spawns() {
            return;
        }

        let ticks = events
            .iter()
            .filter(|event| matches!(event, Event::TimeAdvanced { .. }))
            .count();

        let mut remaining = round.quota.saturating_sub(round.spawned);
        for _ in 0..ticks {
            if remaining == 0 {
                break;
            }

            self.counter = self.counter.saturating_add(1);
            if self.counter > self.interval_ticks {
                self.counter = 0;
                remaining -= 1;
                out.push(Command::SpawnEnemy);
            }
        }
    }
}
