#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs the Balloon Defence simulation headlessly.

mod placement;

use std::{path::PathBuf, thread, time::Instant};

use anyhow::{Context, Result};
use balloon_defence_core::Event;
use balloon_defence_simulation::{FixedStep, MapPreset, Simulation, SimulationConfig};
use balloon_defence_world::query;
use clap::{Parser, ValueEnum};
use tracing::{info, warn};

use self::placement::{parse_placement, PlacementArg};

/// Runs the Balloon Defence simulation without a renderer.
#[derive(Debug, Parser)]
#[command(name = "balloon-defence", version)]
struct Cli {
    /// TOML configuration file; built-in defaults are used when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Route preset, overriding the configured route.
    #[arg(long, value_enum)]
    map: Option<MapArg>,
    /// Maximum number of ticks to simulate.
    #[arg(long, default_value_t = 3_600)]
    ticks: u64,
    /// Defender placed before the first tick, as `x,y,kind`. Kind is a catalog
    /// index or name.
    #[arg(long = "place", value_name = "X,Y,KIND", value_parser = parse_placement)]
    placements: Vec<PlacementArg>,
    /// Start the next round as soon as the current one is cleared.
    #[arg(long)]
    auto_advance: bool,
    /// Stop after this many rounds have been cleared.
    #[arg(long)]
    rounds: Option<u32>,
    /// Pace ticks at the configured tick rate instead of running flat out.
    #[arg(long)]
    realtime: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum MapArg {
    Classic,
    Curvy,
}

impl From<MapArg> for MapPreset {
    fn from(value: MapArg) -> Self {
        match value {
            MapArg::Classic => Self::Classic,
            MapArg::Curvy => Self::Curvy,
        }
    }
}

#[derive(Debug, Default)]
struct RunSummary {
    ticks: u64,
    popped: u64,
    rounds_cleared: u32,
}

/// Entry point for the Balloon Defence command-line interface.
fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => SimulationConfig::from_path(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => SimulationConfig::default(),
    };
    if let Some(map) = cli.map {
        config.map = map.into();
        config.path = None;
    }

    let pacing = FixedStep::from_rate(config.tick_rate_hz).context("invalid tick rate")?;
    let mut simulation = Simulation::new(config).context("invalid simulation configuration")?;
    println!("{}", query::welcome_banner(simulation.world()));
    describe_setup(&simulation);

    for placement in &cli.placements {
        let kind = placement
            .resolve(simulation.catalog())
            .with_context(|| format!("unknown defender kind `{}`", placement.kind))?;
        match simulation.request_placement(placement.position, kind) {
            Ok(defender) => info!(
                defender = defender.get(),
                kind = kind.get(),
                "defender placed"
            ),
            Err(reason) => warn!(%reason, kind = %placement.kind, "placement rejected"),
        }
    }

    let summary = run(&mut simulation, &cli, pacing);
    print_summary(&simulation, &summary);
    Ok(())
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .compact()
            .init();
    }
}

fn run(simulation: &mut Simulation, cli: &Cli, mut pacing: FixedStep) -> RunSummary {
    let mut summary = RunSummary::default();
    let mut last = Instant::now();

    while summary.ticks < cli.ticks {
        let due = if cli.realtime {
            let now = Instant::now();
            let due = pacing.accumulate(now - last);
            last = now;
            if due == 0 {
                thread::sleep(pacing.period() / 2);
                continue;
            }
            u64::from(due)
        } else {
            1
        };

        for _ in 0..due.min(cli.ticks - summary.ticks) {
            if step_once(simulation, cli, &mut summary) {
                return summary;
            }
        }
    }

    summary
}

/// Advances one tick, returning `true` once the requested round count is reached.
fn step_once(simulation: &mut Simulation, cli: &Cli, summary: &mut RunSummary) -> bool {
    summary.ticks += 1;

    let mut cleared = false;
    for event in simulation.step() {
        match event {
            Event::EnemyPopped { .. } => summary.popped += 1,
            Event::RoundCompleted { .. } => {
                summary.rounds_cleared += 1;
                cleared = true;
            }
            _ => {}
        }
    }

    if cli
        .rounds
        .is_some_and(|limit| summary.rounds_cleared >= limit)
    {
        return true;
    }

    if cleared && cli.auto_advance {
        let _ = simulation.request_advance_round();
    }
    false
}

fn describe_setup(simulation: &Simulation) {
    let path = simulation.path();
    let route_length: f32 = path
        .waypoints()
        .windows(2)
        .map(|pair| pair[0].distance(pair[1]))
        .sum();
    let enemy = query::enemy_stats(simulation.world());
    let projectile = query::projectile_stats(simulation.world());
    info!(
        tick_rate_hz = simulation.tick_rate_hz(),
        waypoints = path.waypoints().len(),
        route_length,
        enemy_speed = enemy.speed(),
        enemy_radius = enemy.radius(),
        projectile_speed = projectile.speed(),
        defender_types = simulation.catalog().len(),
        "simulation configured"
    );
}

fn print_summary(simulation: &Simulation, summary: &RunSummary) {
    let snapshot = simulation.snapshot();
    println!(
        "tick {} | round {} ({:?}) | balance {} | enemies {} | defenders {} | projectiles {}",
        snapshot.tick,
        snapshot.round.round,
        snapshot.round.phase,
        snapshot.balance,
        snapshot.enemies.len(),
        snapshot.defenders.len(),
        snapshot.projectiles.len(),
    );
    println!(
        "popped {} | rounds cleared {} | ticks run {}",
        summary.popped, summary.rounds_cleared, summary.ticks
    );
}
