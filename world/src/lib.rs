#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Balloon Defence.
//!
//! The [`World`] is the single owner of every enemy, defender, and projectile
//! together with the round state and currency balance. All mutations flow
//! through [`apply`], which validates each [`Command`] against the current
//! state before acting on it, so systems may only propose changes.

mod defenders;
mod projectiles;
mod round;

use balloon_defence_core::{
    Command, DefenderCatalog, DefenderId, DefenderKind, EnemyId, EnemySnapshot, EnemyStats, Event,
    ExpiryReason, Path, PathProgress, PlacementError, ProjectileId, ProjectileStats, RoundRules,
    WELCOME_BANNER,
};
use glam::Vec2;
use tracing::{debug, info, trace};

use self::{
    defenders::DefenderRegistry,
    projectiles::ProjectileStore,
    round::{Economy, RoundState},
};

/// Validated parameters required to construct a [`World`].
#[derive(Clone, Debug)]
pub struct WorldConfig {
    /// Route enemies follow.
    pub path: Path,
    /// Defender types available for placement.
    pub catalog: DefenderCatalog,
    /// Parameters shared by every enemy.
    pub enemy: EnemyStats,
    /// Parameters shared by every projectile.
    pub projectile: ProjectileStats,
    /// Quota and reward progression.
    pub rounds: RoundRules,
    /// Balance available before the first placement.
    pub starting_balance: u32,
}

/// Represents the authoritative Balloon Defence world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    path: Path,
    catalog: DefenderCatalog,
    enemy_stats: EnemyStats,
    projectile_stats: ProjectileStats,
    round_rules: RoundRules,
    enemies: Vec<Enemy>,
    next_enemy_id: EnemyId,
    defenders: DefenderRegistry,
    projectiles: ProjectileStore,
    round: RoundState,
    economy: Economy,
    tick_index: u64,
}

impl World {
    /// Creates a world in the first round with no entities.
    #[must_use]
    pub fn new(config: WorldConfig) -> Self {
        Self {
            banner: WELCOME_BANNER,
            round: RoundState::first(&config.rounds),
            economy: Economy::new(config.starting_balance),
            path: config.path,
            catalog: config.catalog,
            enemy_stats: config.enemy,
            projectile_stats: config.projectile,
            round_rules: config.rounds,
            enemies: Vec::new(),
            next_enemy_id: EnemyId::new(0),
            defenders: DefenderRegistry::new(),
            projectiles: ProjectileStore::new(),
            tick_index: 0,
        }
    }

    fn enemy_index(&self, enemy_id: EnemyId) -> Option<usize> {
        self.enemies
            .binary_search_by_key(&enemy_id, |enemy| enemy.id)
            .ok()
    }

    fn enemy(&self, enemy_id: EnemyId) -> Option<&Enemy> {
        self.enemy_index(enemy_id).map(|index| &self.enemies[index])
    }

    fn spawn_enemy(&mut self, out_events: &mut Vec<Event>) {
        if !self.round.accepts_spawn() {
            debug!(
                round = self.round.number(),
                "spawn request ignored outside spawning window"
            );
            return;
        }

        let id = self.next_enemy_id;
        self.next_enemy_id = EnemyId::new(id.get().wrapping_add(1));
        let progress = self.path.start();
        self.enemies.push(Enemy {
            id,
            progress,
            speed: self.enemy_stats.speed(),
            radius: self.enemy_stats.radius(),
        });
        self.round.record_spawn();
        debug!(
            enemy = id.get(),
            round = self.round.number(),
            "enemy spawned"
        );
        out_events.push(Event::EnemySpawned {
            enemy: id,
            position: progress.position,
        });
    }

    fn move_enemy(
        &mut self,
        enemy_id: EnemyId,
        progress: PathProgress,
        out_events: &mut Vec<Event>,
    ) {
        let last_index = self.path.last_index();
        let Some(index) = self.enemy_index(enemy_id) else {
            return;
        };

        let enemy = &mut self.enemies[index];
        if progress.segment < enemy.progress.segment
            || progress.segment > last_index
            || !progress.position.is_finite()
        {
            return;
        }

        let was_finished = enemy.progress.segment >= last_index;
        enemy.progress = progress;
        if !was_finished && progress.segment == last_index {
            debug!(enemy = enemy_id.get(), "enemy reached the final waypoint");
            out_events.push(Event::EnemyReachedEnd { enemy: enemy_id });
        }
    }

    fn fire_projectile(
        &mut self,
        defender_id: DefenderId,
        target: EnemyId,
        out_events: &mut Vec<Event>,
    ) {
        if self.enemy(target).is_none() {
            return;
        }

        let Some(defender) = self.defenders.get_mut(defender_id) else {
            return;
        };

        if !defender.is_ready() {
            return;
        }

        defender.rearm();
        let origin = defender.position;
        let projectile = self
            .projectiles
            .launch(origin, self.projectile_stats.speed(), target);
        out_events.push(Event::ProjectileFired {
            projectile,
            defender: defender_id,
            target,
        });
    }

    fn resolve_hit(&mut self, projectile_id: ProjectileId, out_events: &mut Vec<Event>) {
        let Some((target, position)) = self
            .projectiles
            .get_mut(projectile_id)
            .filter(|projectile| projectile.active)
            .map(|projectile| (projectile.target, projectile.position))
        else {
            return;
        };

        let Some(index) = self.enemy_index(target) else {
            let _ = self.projectiles.deactivate(projectile_id);
            debug!(
                projectile = projectile_id.get(),
                "hit on an already popped enemy"
            );
            out_events.push(Event::ProjectileExpired {
                projectile: projectile_id,
                reason: ExpiryReason::StaleTarget,
            });
            return;
        };

        let enemy = &self.enemies[index];
        if enemy.progress.position.distance(position) > enemy.radius {
            return;
        }

        let _ = self.projectiles.deactivate(projectile_id);
        let _ = self.enemies.remove(index);
        self.round.record_clear();
        debug!(
            enemy = target.get(),
            projectile = projectile_id.get(),
            "enemy popped"
        );
        out_events.push(Event::EnemyPopped {
            enemy: target,
            projectile: projectile_id,
            round: self.round.number(),
        });
    }

    /// Places a defender, debiting its cost, and reports the outcome as an event.
    ///
    /// Placement is rejected without side effects when the position is not
    /// finite, the kind is not in the catalog, or the balance cannot cover it.
    pub fn place_defender(
        &mut self,
        kind: DefenderKind,
        position: Vec2,
        out_events: &mut Vec<Event>,
    ) -> Result<DefenderId, PlacementError> {
        match self.try_place(kind, position) {
            Ok((defender, cost, balance)) => {
                debug!(
                    defender = defender.get(),
                    kind = kind.get(),
                    cost,
                    balance,
                    "defender placed"
                );
                out_events.push(Event::DefenderPlaced {
                    defender,
                    kind,
                    position,
                    cost,
                    balance,
                });
                Ok(defender)
            }
            Err(reason) => {
                debug!(kind = kind.get(), %reason, "defender placement rejected");
                out_events.push(Event::DefenderPlacementRejected {
                    kind,
                    position,
                    reason,
                });
                Err(reason)
            }
        }
    }

    fn try_place(
        &mut self,
        kind: DefenderKind,
        position: Vec2,
    ) -> Result<(DefenderId, u32, u32), PlacementError> {
        if !position.is_finite() {
            return Err(PlacementError::InvalidPosition);
        }

        let entry = self.catalog.get(kind).ok_or(PlacementError::UnknownKind)?;
        let balance = self.economy.debit(entry.cost)?;
        let id = self.defenders.insert(kind, entry, position);
        Ok((id, entry.cost, balance))
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick => {
            world.tick_index = world.tick_index.saturating_add(1);
            trace!(tick = world.tick_index, "tick");
            out_events.push(Event::TimeAdvanced {
                tick: world.tick_index,
            });
        }
        Command::SpawnEnemy => world.spawn_enemy(out_events),
        Command::MoveEnemy { enemy, progress } => world.move_enemy(enemy, progress, out_events),
        Command::CoolDownDefenders => world.defenders.cool_down_all(),
        Command::FireProjectile { defender, target } => {
            world.fire_projectile(defender, target, out_events);
        }
        Command::MoveProjectile {
            projectile,
            position,
        } => {
            if !position.is_finite() {
                return;
            }
            if let Some(state) = world.projectiles.get_mut(projectile) {
                if state.active {
                    state.position = position;
                }
            }
        }
        Command::ExpireProjectile { projectile, reason } => {
            if world.projectiles.deactivate(projectile) {
                debug!(projectile = projectile.get(), ?reason, "projectile expired");
                out_events.push(Event::ProjectileExpired { projectile, reason });
            }
        }
        Command::ResolveHit { projectile } => world.resolve_hit(projectile, out_events),
        Command::SweepProjectiles => {
            let removed = world.projectiles.sweep();
            if removed > 0 {
                trace!(removed, "swept spent projectiles");
            }
        }
        Command::EvaluateRound => {
            if let Some(reward) = world.round.try_complete(world.enemies.len()) {
                let balance = world.economy.credit(reward);
                info!(
                    round = world.round.number(),
                    reward,
                    balance,
                    "round cleared"
                );
                out_events.push(Event::RoundCompleted {
                    round: world.round.number(),
                    reward,
                    balance,
                });
            }
        }
        Command::PlaceDefender { kind, position } => {
            let _ = world.place_defender(kind, position, out_events);
        }
        Command::AdvanceRound => {
            if world.round.advance(&world.round_rules) {
                let snapshot = world.round.snapshot();
                info!(
                    round = snapshot.round,
                    quota = snapshot.quota,
                    reward = snapshot.reward,
                    "round started"
                );
                out_events.push(Event::RoundStarted {
                    round: snapshot.round,
                    quota: snapshot.quota,
                    reward: snapshot.reward,
                });
            } else {
                out_events.push(Event::RoundAdvanceRejected {
                    phase: world.round.phase(),
                });
            }
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use balloon_defence_core::{
        DefenderCatalog, DefenderView, EnemyStats, EnemyView, Path, ProjectileStats, ProjectileView,
        RoundSnapshot,
    };

    use super::World;

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Provides read-only access to the route enemies follow.
    #[must_use]
    pub fn path(world: &World) -> &Path {
        &world.path
    }

    /// Provides read-only access to the defender catalog.
    #[must_use]
    pub fn catalog(world: &World) -> &DefenderCatalog {
        &world.catalog
    }

    /// Parameters shared by every enemy.
    #[must_use]
    pub fn enemy_stats(world: &World) -> EnemyStats {
        world.enemy_stats
    }

    /// Parameters shared by every projectile.
    #[must_use]
    pub fn projectile_stats(world: &World) -> ProjectileStats {
        world.projectile_stats
    }

    /// Captures a read-only view of the live enemies in spawn order.
    #[must_use]
    pub fn enemy_view(world: &World) -> EnemyView {
        EnemyView::from_snapshots(world.enemies.iter().map(|enemy| enemy.snapshot()).collect())
    }

    /// Captures a read-only view of the placed defenders.
    #[must_use]
    pub fn defender_view(world: &World) -> DefenderView {
        DefenderView::from_snapshots(
            world
                .defenders
                .iter()
                .map(|defender| defender.snapshot())
                .collect(),
        )
    }

    /// Captures a read-only view of the tracked projectiles.
    #[must_use]
    pub fn projectile_view(world: &World) -> ProjectileView {
        ProjectileView::from_snapshots(
            world
                .projectiles
                .iter()
                .map(|projectile| projectile.snapshot())
                .collect(),
        )
    }

    /// Reports the round state machine.
    #[must_use]
    pub fn round(world: &World) -> RoundSnapshot {
        world.round.snapshot()
    }

    /// Reports the current currency balance.
    #[must_use]
    pub fn balance(world: &World) -> u32 {
        world.economy.balance()
    }

    /// Number of ticks processed so far.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }
}

#[derive(Clone, Debug)]
struct Enemy {
    id: EnemyId,
    progress: PathProgress,
    speed: f32,
    radius: f32,
}

impl Enemy {
    fn snapshot(&self) -> EnemySnapshot {
        EnemySnapshot {
            id: self.id,
            position: self.progress.position,
            segment: self.progress.segment,
            speed: self.speed,
            radius: self.radius,
        }
    }
}
