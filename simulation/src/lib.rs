#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Fixed-step orchestration of the Balloon Defence world and its systems.
//!
//! [`Simulation::step`] advances everything by exactly one tick in a fixed
//! order: spawn, move enemies, cool down and fire defenders, move projectiles,
//! resolve hits, and finally evaluate round completion. External input is
//! applied between ticks, never in the middle of one.

mod clock;
mod config;

use std::collections::VecDeque;

use balloon_defence_core::{
    Command, ConfigError, DefenderCatalog, DefenderId, DefenderKind, DefenderTarget, DefenderView,
    EnemyView, Event, Path, PlacementError, ProjectileView, RoundSnapshot,
};
use balloon_defence_system_collision::Collision;
use balloon_defence_system_defender_combat::DefenderCombat;
use balloon_defence_system_defender_targeting::DefenderTargeting;
use balloon_defence_system_movement::Movement;
use balloon_defence_system_projectiles::ProjectileGuidance;
use balloon_defence_system_spawning::Spawning;
use balloon_defence_world::{self as world, query, World};
use glam::Vec2;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

pub use self::{
    clock::FixedStep,
    config::{
        BodyConfig, ConfigLoadError, EconomyConfig, MapPreset, RoundConfig, SimulationConfig,
    },
};

/// External requests queued for the next tick boundary.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Input {
    /// Place a defender of the given catalog kind.
    PlaceDefender {
        /// Catalog entry to build.
        kind: DefenderKind,
        /// Position the defender will occupy.
        position: Vec2,
    },
    /// Start the next round once the current one is cleared.
    AdvanceRound,
}

impl Input {
    fn into_command(self) -> Command {
        match self {
            Self::PlaceDefender { kind, position } => Command::PlaceDefender { kind, position },
            Self::AdvanceRound => Command::AdvanceRound,
        }
    }
}

/// Stable, serializable copy of the state a renderer needs, taken between ticks.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationSnapshot {
    /// Ticks processed so far.
    pub tick: u64,
    /// Current currency balance.
    pub balance: u32,
    /// Round state machine.
    pub round: RoundSnapshot,
    /// Live enemies in spawn order.
    pub enemies: EnemyView,
    /// Placed defenders, including their range.
    pub defenders: DefenderView,
    /// Projectiles in flight.
    pub projectiles: ProjectileView,
}

/// Owns the world and every system, advancing them one tick at a time.
#[derive(Debug)]
pub struct Simulation {
    world: World,
    tick_rate_hz: u32,
    spawning: Spawning,
    movement: Movement,
    targeting: DefenderTargeting,
    combat: DefenderCombat,
    guidance: ProjectileGuidance,
    collision: Collision,
    inputs: VecDeque<Input>,
    targets: Vec<DefenderTarget>,
    commands: Vec<Command>,
    pending_events: Vec<Event>,
    events: Vec<Event>,
}

impl Simulation {
    /// Validates the configuration and builds a simulation in round one.
    pub fn new(config: SimulationConfig) -> Result<Self, ConfigError> {
        let world_config = config.world_config()?;
        info!(
            defenders = world_config.catalog.len(),
            waypoints = world_config.path.waypoints().len(),
            balance = world_config.starting_balance,
            "simulation ready"
        );

        Ok(Self {
            world: World::new(world_config),
            tick_rate_hz: config.tick_rate_hz,
            spawning: Spawning::new(config.spawning_config()),
            movement: Movement::new(),
            targeting: DefenderTargeting::new(),
            combat: DefenderCombat::new(),
            guidance: ProjectileGuidance::new(),
            collision: Collision::new(),
            inputs: VecDeque::new(),
            targets: Vec::new(),
            commands: Vec::new(),
            pending_events: Vec::new(),
            events: Vec::new(),
        })
    }

    /// Read-only access to the authoritative world for [`query`] functions.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Ticks per second the simulation is tuned for.
    #[must_use]
    pub fn tick_rate_hz(&self) -> u32 {
        self.tick_rate_hz
    }

    /// Defender types available for placement.
    #[must_use]
    pub fn catalog(&self) -> &DefenderCatalog {
        query::catalog(&self.world)
    }

    /// Route enemies follow.
    #[must_use]
    pub fn path(&self) -> &Path {
        query::path(&self.world)
    }

    /// Queues an input to be applied at the start of the next [`Simulation::step`].
    pub fn submit(&mut self, input: Input) {
        self.inputs.push_back(input);
    }

    /// Places a defender immediately, between ticks.
    ///
    /// The resulting event is reported at the start of the next step.
    pub fn request_placement(
        &mut self,
        position: Vec2,
        kind: DefenderKind,
    ) -> Result<DefenderId, PlacementError> {
        self.world
            .place_defender(kind, position, &mut self.pending_events)
    }

    /// Starts the next round immediately if the current one has been cleared.
    ///
    /// Returns `false`, changing nothing, while a round is still running.
    pub fn request_advance_round(&mut self) -> bool {
        let start = self.pending_events.len();
        world::apply(
            &mut self.world,
            Command::AdvanceRound,
            &mut self.pending_events,
        );
        self.pending_events[start..]
            .iter()
            .any(|event| matches!(event, Event::RoundStarted { .. }))
    }

    /// Advances the simulation by one tick and returns the events it produced.
    pub fn step(&mut self) -> &[Event] {
        self.events.clear();
        self.events.append(&mut self.pending_events);
        while let Some(input) = self.inputs.pop_front() {
            debug!(?input, "applying queued input");
            world::apply(&mut self.world, input.into_command(), &mut self.events);
        }

        let tick_start = self.events.len();
        world::apply(&mut self.world, Command::Tick, &mut self.events);
        let round = query::round(&self.world);
        self.spawning
            .handle(&self.events[tick_start..], &round, &mut self.commands);
        self.flush_commands();

        let enemies = query::enemy_view(&self.world);
        self.movement.handle(
            &self.events[tick_start..],
            query::path(&self.world),
            &enemies,
            &mut self.commands,
        );
        self.flush_commands();

        world::apply(
            &mut self.world,
            Command::CoolDownDefenders,
            &mut self.events,
        );
        let defenders = query::defender_view(&self.world);
        let enemies = query::enemy_view(&self.world);
        self.targeting
            .handle(&defenders, &enemies, &mut self.targets);
        self.combat
            .handle(&defenders, &self.targets, &mut self.commands);
        self.flush_commands();

        self.guidance.handle(
            &query::projectile_view(&self.world),
            &enemies,
            &mut self.commands,
        );
        self.flush_commands();

        self.collision.handle(
            &query::projectile_view(&self.world),
            &enemies,
            &mut self.commands,
        );
        self.flush_commands();

        world::apply(&mut self.world, Command::SweepProjectiles, &mut self.events);
        world::apply(&mut self.world, Command::EvaluateRound, &mut self.events);
        &self.events
    }

    /// Captures a snapshot of the state observable between ticks.
    #[must_use]
    pub fn snapshot(&self) -> SimulationSnapshot {
        SimulationSnapshot {
            tick: query::tick_index(&self.world),
            balance: query::balance(&self.world),
            round: query::round(&self.world),
            enemies: query::enemy_view(&self.world),
            defenders: query::defender_view(&self.world),
            projectiles: query::projectile_view(&self.world),
        }
    }

    fn flush_commands(&mut self) {
        for command in self.commands.drain(..) {
            world::apply(&mut self.world, command, &mut self.events);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use balloon_defence_core::RoundPhase;

    #[test]
    fn invalid_configuration_is_rejected_at_construction() {
        let config = SimulationConfig {
            defenders: Vec::new(),
            ..SimulationConfig::default()
        };
        assert!(matches!(
            Simulation::new(config),
            Err(ConfigError::EmptyCatalog)
        ));
    }

    #[test]
    fn construction_exposes_route_rate_and_body_stats() {
        let config = SimulationConfig {
            tick_rate_hz: 30,
            map: MapPreset::Curvy,
            ..SimulationConfig::default()
        };
        let simulation = Simulation::new(config).expect("simulation");

        assert_eq!(simulation.tick_rate_hz(), 30);
        assert_eq!(simulation.path().waypoints().len(), 6);
        assert_eq!(simulation.path().start().position, Vec2::new(0.0, 400.0));
        let enemy = query::enemy_stats(simulation.world());
        assert_eq!((enemy.speed(), enemy.radius()), (2.0, 15.0));
        let projectile = query::projectile_stats(simulation.world());
        assert_eq!((projectile.speed(), projectile.radius()), (8.0, 5.0));
    }

    #[test]
    fn placement_events_surface_on_next_step() {
        let mut simulation = Simulation::new(SimulationConfig::default()).expect("simulation");
        let defender = simulation
            .request_placement(Vec2::new(125.0, 250.0), DefenderKind::new(0))
            .expect("affordable");

        let events = simulation.step();
        assert!(matches!(
            events.first(),
            Some(Event::DefenderPlaced { defender: placed, balance: 200, .. })
                if *placed == defender
        ));
        assert!(events.contains(&Event::TimeAdvanced { tick: 1 }));
    }

    #[test]
    fn queued_inputs_apply_before_the_tick() {
        let mut simulation = Simulation::new(SimulationConfig::default()).expect("simulation");
        simulation.submit(Input::AdvanceRound);
        simulation.submit(Input::PlaceDefender {
            kind: DefenderKind::new(2),
            position: Vec2::new(400.0, 300.0),
        });

        let events = simulation.step().to_vec();
        assert_eq!(
            events[0],
            Event::RoundAdvanceRejected {
                phase: RoundPhase::Spawning
            }
        );
        assert!(matches!(events[1], Event::DefenderPlaced { cost: 200, .. }));
        assert_eq!(events[2], Event::TimeAdvanced { tick: 1 });
    }

    #[test]
    fn rejected_placement_leaves_balance_untouched() {
        let mut simulation = Simulation::new(SimulationConfig::default()).expect("simulation");
        assert_eq!(
            simulation.request_placement(Vec2::ZERO, DefenderKind::new(9)),
            Err(PlacementError::UnknownKind)
        );
        assert_eq!(
            simulation.request_placement(Vec2::new(f32::NAN, 0.0), DefenderKind::new(0)),
            Err(PlacementError::InvalidPosition)
        );
        assert_eq!(simulation.snapshot().balance, 300);
        assert!(!simulation.request_advance_round());
    }
}
