//! Startup configuration loaded from TOML.

use std::{fs, path::PathBuf};

use balloon_defence_core::{
    Color, ConfigError, DefenderCatalog, DefenderType, EnemyStats, Path, ProjectileStats,
    RoundRules,
};
use balloon_defence_system_spawning::Config as SpawningConfig;
use balloon_defence_world::WorldConfig;
use glam::Vec2;
use serde::Deserialize;
use thiserror::Error;

/// Errors raised while loading a [`SimulationConfig`].
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    /// The configuration file could not be read.
    #[error("failed to read configuration from {}", .path.display())]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid TOML or does not match the expected layout.
    #[error("failed to parse configuration")]
    Parse(#[from] toml::de::Error),
    /// The values parsed but violate a simulation invariant.
    #[error(transparent)]
    Invalid(#[from] ConfigError),
}

/// Named routes shipped with the simulation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MapPreset {
    /// Right-angled route with five segments.
    #[default]
    Classic,
    /// Gently sloped route crossing the whole field.
    Curvy,
}

impl MapPreset {
    /// Waypoints that make up the preset route.
    #[must_use]
    pub fn waypoints(self) -> Vec<Vec2> {
        let points: &[[f32; 2]] = match self {
            Self::Classic => &[
                [50.0, 300.0],
                [200.0, 300.0],
                [200.0, 100.0],
                [600.0, 100.0],
                [600.0, 500.0],
                [750.0, 500.0],
            ],
            Self::Curvy => &[
                [0.0, 400.0],
                [150.0, 400.0],
                [200.0, 200.0],
                [400.0, 200.0],
                [600.0, 350.0],
                [800.0, 350.0],
            ],
        };
        points.iter().copied().map(Vec2::from).collect()
    }
}

/// Currency settings.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EconomyConfig {
    /// Balance available before the first placement.
    pub starting_balance: u32,
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            starting_balance: 300,
        }
    }
}

/// Round progression and spawn cadence.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RoundConfig {
    /// Enemies spawned during the first round.
    pub initial_quota: u32,
    /// Additional enemies per subsequent round.
    pub quota_increment: u32,
    /// Reward for clearing the first round.
    pub initial_reward: u32,
    /// Additional reward per subsequent round.
    pub reward_increment: u32,
    /// A spawn happens once the tick counter exceeds this value.
    pub spawn_interval_ticks: u32,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            initial_quota: 5,
            quota_increment: 2,
            initial_reward: 100,
            reward_increment: 25,
            spawn_interval_ticks: 40,
        }
    }
}

/// Speed and hit radius of a moving entity, in world units.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BodyConfig {
    /// Distance travelled per tick.
    pub speed: f32,
    /// Radius of the entity.
    pub radius: f32,
}

/// Complete startup configuration for a [`crate::Simulation`].
///
/// Every field has a default, so a TOML document only needs to name the
/// values it overrides.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Ticks per wall-clock second when paced in real time.
    pub tick_rate_hz: u32,
    /// Preset route used unless `path` is provided.
    pub map: MapPreset,
    /// Explicit route overriding the preset.
    pub path: Option<Vec<[f32; 2]>>,
    /// Currency settings.
    pub economy: EconomyConfig,
    /// Round progression.
    pub rounds: RoundConfig,
    /// Enemy movement and hit radius.
    pub enemy: BodyConfig,
    /// Projectile movement and drawn radius.
    pub projectile: BodyConfig,
    /// Defender types in catalog order.
    pub defenders: Vec<DefenderType>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_rate_hz: 60,
            map: MapPreset::Classic,
            path: None,
            economy: EconomyConfig::default(),
            rounds: RoundConfig::default(),
            enemy: BodyConfig {
                speed: 2.0,
                radius: 15.0,
            },
            projectile: BodyConfig {
                speed: 8.0,
                radius: 5.0,
            },
            defenders: default_catalog(),
        }
    }
}

impl SimulationConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigLoadError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses, and validates a TOML file.
    pub fn from_path(path: impl Into<PathBuf>) -> Result<Self, ConfigLoadError> {
        let path = path.into();
        let source = fs::read_to_string(&path).map_err(|source| ConfigLoadError::Io {
            path: path.clone(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Checks every invariant without building a simulation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let _ = self.world_config()?;
        Ok(())
    }

    /// Route enemies follow: the explicit path if set, otherwise the preset.
    #[must_use]
    pub fn waypoints(&self) -> Vec<Vec2> {
        match &self.path {
            Some(points) => points.iter().copied().map(Vec2::from).collect(),
            None => self.map.waypoints(),
        }
    }

    pub(crate) fn world_config(&self) -> Result<WorldConfig, ConfigError> {
        if self.tick_rate_hz == 0 {
            return Err(ConfigError::NonPositiveTickRate);
        }

        Ok(WorldConfig {
            path: Path::new(self.waypoints())?,
            catalog: DefenderCatalog::new(self.defenders.clone())?,
            enemy: EnemyStats::new(self.enemy.speed, self.enemy.radius)?,
            projectile: ProjectileStats::new(self.projectile.speed, self.projectile.radius)?,
            rounds: RoundRules::new(
                self.rounds.initial_quota,
                self.rounds.quota_increment,
                self.rounds.initial_reward,
                self.rounds.reward_increment,
            )?,
            starting_balance: self.economy.starting_balance,
        })
    }

    pub(crate) fn spawning_config(&self) -> SpawningConfig {
        SpawningConfig::new(self.rounds.spawn_interval_ticks)
    }
}

fn default_catalog() -> Vec<DefenderType> {
    vec![
        DefenderType {
            name: "Basic".to_owned(),
            color: Color::from_rgb(0, 0, 255),
            range: 120.0,
            cooldown_ticks: 60,
            cost: 100,
        },
        DefenderType {
            name: "Fast".to_owned(),
            color: Color::from_rgb(0, 255, 0),
            range: 100.0,
            cooldown_ticks: 30,
            cost: 150,
        },
        DefenderType {
            name: "Long Range".to_owned(),
            color: Color::from_rgb(128, 0, 128),
            range: 180.0,
            cooldown_ticks: 80,
            cost: 200,
        },
    ]
}
