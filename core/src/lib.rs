#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Balloon Defence engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters and the simulation clock
//! submit [`Command`] values describing desired mutations, the world executes
//! those commands via its `apply` entry point, and then broadcasts [`Event`]
//! values describing what actually happened. Systems read immutable views
//! ([`EnemyView`], [`DefenderView`], [`ProjectileView`], [`RoundSnapshot`]) and
//! respond exclusively with new command batches.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Balloon Defence.";

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Advances the simulation clock by exactly one discrete tick.
    Tick,
    /// Requests that a new enemy enter the path at its first waypoint.
    SpawnEnemy,
    /// Requests that an enemy adopt the provided path progress.
    MoveEnemy {
        /// Identifier of the enemy being advanced.
        enemy: EnemyId,
        /// Position and segment the enemy should occupy after moving.
        progress: PathProgress,
    },
    /// Ages every defender's cooldown by a single tick.
    CoolDownDefenders,
    /// Requests that a ready defender launch a projectile at the target.
    FireProjectile {
        /// Defender performing the attack.
        defender: DefenderId,
        /// Enemy the projectile homes onto.
        target: EnemyId,
    },
    /// Requests that a projectile move to the provided position.
    MoveProjectile {
        /// Projectile being advanced.
        projectile: ProjectileId,
        /// Position the projectile should occupy after moving.
        position: Vec2,
    },
    /// Requests that a projectile be deactivated without scoring a hit.
    ExpireProjectile {
        /// Projectile being deactivated.
        projectile: ProjectileId,
        /// Reason the projectile stopped flying.
        reason: ExpiryReason,
    },
    /// Reports that a projectile reached its target's hit radius.
    ResolveHit {
        /// Projectile that connected with its target.
        projectile: ProjectileId,
    },
    /// Discards every inactive projectile from the active set.
    SweepProjectiles,
    /// Evaluates whether the current round has been cleared.
    EvaluateRound,
    /// Requests placement of a defender funded by the economy.
    PlaceDefender {
        /// Catalog entry describing the defender to construct.
        kind: DefenderKind,
        /// World position the defender occupies.
        position: Vec2,
    },
    /// Requests that the next round begin.
    AdvanceRound,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Index of the tick that just began, starting at one.
        tick: u64,
    },
    /// Confirms that an enemy entered the path.
    EnemySpawned {
        /// Identifier assigned to the enemy.
        enemy: EnemyId,
        /// Position of the first waypoint where the enemy appeared.
        position: Vec2,
    },
    /// Announces that an enemy settled onto the final waypoint.
    EnemyReachedEnd {
        /// Identifier of the enemy that stopped advancing.
        enemy: EnemyId,
    },
    /// Confirms that a defender was placed and paid for.
    DefenderPlaced {
        /// Identifier assigned to the defender.
        defender: DefenderId,
        /// Catalog entry the defender was built from.
        kind: DefenderKind,
        /// Position the defender occupies.
        position: Vec2,
        /// Amount debited from the balance.
        cost: u32,
        /// Balance remaining after the debit.
        balance: u32,
    },
    /// Reports that a placement request was refused.
    DefenderPlacementRejected {
        /// Catalog entry requested for placement.
        kind: DefenderKind,
        /// Position provided in the request.
        position: Vec2,
        /// Specific reason the placement failed.
        reason: PlacementError,
    },
    /// Confirms that a defender launched a projectile.
    ProjectileFired {
        /// Identifier assigned to the projectile.
        projectile: ProjectileId,
        /// Defender that fired.
        defender: DefenderId,
        /// Enemy the projectile homes onto.
        target: EnemyId,
    },
    /// Reports that a projectile stopped flying without removing its target.
    ProjectileExpired {
        /// Projectile that was deactivated.
        projectile: ProjectileId,
        /// Reason the projectile stopped.
        reason: ExpiryReason,
    },
    /// Confirms that a projectile removed its target.
    EnemyPopped {
        /// Enemy that was removed.
        enemy: EnemyId,
        /// Projectile credited with the kill.
        projectile: ProjectileId,
        /// Round the kill was attributed to.
        round: u32,
    },
    /// Announces that a round was cleared and its reward credited.
    RoundCompleted {
        /// Number of the round that finished.
        round: u32,
        /// Reward credited to the balance.
        reward: u32,
        /// Balance after the credit.
        balance: u32,
    },
    /// Announces that a new round began spawning.
    RoundStarted {
        /// Number of the round that started.
        round: u32,
        /// Enemies the round will spawn.
        quota: u32,
        /// Reward granted once the round is cleared.
        reward: u32,
    },
    /// Reports that a round advance was requested while a round was running.
    RoundAdvanceRejected {
        /// Phase the round was in when the request arrived.
        phase: RoundPhase,
    },
}

/// Reasons a projectile may stop flying without scoring a hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExpiryReason {
    /// The projectile came within one step of its target without touching it.
    Arrived,
    /// The target had already been removed from the live enemy set.
    StaleTarget,
}

/// Reasons a defender placement request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum PlacementError {
    /// The balance cannot cover the defender's cost.
    #[error("insufficient funds: balance {balance} cannot cover cost {cost}")]
    InsufficientFunds {
        /// Balance at the time of the request.
        balance: u32,
        /// Cost of the requested defender.
        cost: u32,
    },
    /// The requested catalog entry does not exist.
    #[error("unknown defender kind")]
    UnknownKind,
    /// The requested position contains NaN or infinite coordinates.
    #[error("placement position must be finite")]
    InvalidPosition,
}

/// Errors raised when startup configuration violates simulation invariants.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// The path does not describe at least one segment.
    #[error("path requires at least two waypoints, found {found}")]
    PathTooShort {
        /// Number of waypoints supplied.
        found: usize,
    },
    /// A waypoint contains NaN or infinite coordinates.
    #[error("waypoint {index} has a non-finite coordinate")]
    NonFiniteWaypoint {
        /// Position of the offending waypoint in the path.
        index: usize,
    },
    /// The defender catalog contains no entries.
    #[error("defender catalog must contain at least one entry")]
    EmptyCatalog,
    /// A defender type declares a zero cooldown.
    #[error("defender type `{name}` must have a cooldown of at least one tick")]
    NonPositiveCooldown {
        /// Name of the offending catalog entry.
        name: String,
    },
    /// A defender type declares a negative or non-finite range.
    #[error("defender type `{name}` must have a positive, finite range")]
    InvalidRange {
        /// Name of the offending catalog entry.
        name: String,
    },
    /// Rounds would spawn no enemies.
    #[error("round quota must be positive")]
    NonPositiveQuota,
    /// A moving entity was configured with a non-positive or non-finite speed.
    #[error("{entity} speed must be positive and finite")]
    InvalidSpeed {
        /// Entity the speed belongs to.
        entity: &'static str,
    },
    /// A hit radius is negative or non-finite.
    #[error("{entity} radius must be non-negative and finite")]
    InvalidRadius {
        /// Entity the radius belongs to.
        entity: &'static str,
    },
    /// The simulation was configured to run at zero ticks per second.
    #[error("tick rate must be positive")]
    NonPositiveTickRate,
}

/// RGB colour used by presentation layers to draw entities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Color {
    red: u8,
    green: u8,
    blue: u8,
}

impl Color {
    /// Creates a new colour from byte RGB components.
    #[must_use]
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Red component of the colour.
    #[must_use]
    pub const fn red(&self) -> u8 {
        self.red
    }

    /// Green component of the colour.
    #[must_use]
    pub const fn green(&self) -> u8 {
        self.green
    }

    /// Blue component of the colour.
    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.blue
    }
}

impl From<[u8; 3]> for Color {
    fn from([red, green, blue]: [u8; 3]) -> Self {
        Self::from_rgb(red, green, blue)
    }
}

impl From<Color> for [u8; 3] {
    fn from(color: Color) -> Self {
        [color.red, color.green, color.blue]
    }
}

/// Unique identifier assigned to an enemy.
///
/// Identifiers are allocated in spawn order, so ordering by identifier is
/// ordering by spawn time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a defender.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DefenderId(u32);

impl DefenderId {
    /// Creates a new defender identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a projectile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProjectileId(u32);

impl ProjectileId {
    /// Creates a new projectile identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Index of an entry within the [`DefenderCatalog`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DefenderKind(u32);

impl DefenderKind {
    /// Creates a catalog index.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric catalog index.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Position of a mobile entity along the [`Path`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PathProgress {
    /// Current world position.
    pub position: Vec2,
    /// Index of the waypoint the entity last reached.
    pub segment: usize,
}

/// Immutable route that enemies follow from the first to the last waypoint.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Path {
    waypoints: Vec<Vec2>,
}

impl Path {
    /// Creates a path, rejecting routes without a single full segment.
    pub fn new(waypoints: Vec<Vec2>) -> Result<Self, ConfigError> {
        if waypoints.len() < 2 {
            return Err(ConfigError::PathTooShort {
                found: waypoints.len(),
            });
        }

        if let Some(index) = waypoints.iter().position(|point| !point.is_finite()) {
            return Err(ConfigError::NonFiniteWaypoint { index });
        }

        Ok(Self { waypoints })
    }

    /// Ordered waypoints that make up the route.
    #[must_use]
    pub fn waypoints(&self) -> &[Vec2] {
        &self.waypoints
    }

    /// Progress of an entity standing on the first waypoint.
    #[must_use]
    pub fn start(&self) -> PathProgress {
        PathProgress {
            position: self.waypoints[0],
            segment: 0,
        }
    }

    /// Index of the final waypoint.
    #[must_use]
    pub fn last_index(&self) -> usize {
        self.waypoints.len() - 1
    }

    /// Reports whether the provided segment index sits on the final waypoint.
    #[must_use]
    pub fn is_finished(&self, segment: usize) -> bool {
        segment >= self.last_index()
    }

    /// Moves `progress` toward the next waypoint by up to `distance`.
    ///
    /// When the next waypoint is closer than `distance` the entity snaps onto
    /// it and the segment index increments. The excess distance is discarded
    /// rather than carried into the following segment. Progress that already
    /// sits on the final waypoint is returned unchanged.
    #[must_use]
    pub fn advance(&self, progress: PathProgress, distance: f32) -> PathProgress {
        if distance <= 0.0 {
            return progress;
        }

        let Some(next) = self.waypoints.get(progress.segment + 1).copied() else {
            return progress;
        };

        let offset = next - progress.position;
        let remaining = offset.length();
        if remaining < distance {
            return PathProgress {
                position: next,
                segment: progress.segment + 1,
            };
        }

        PathProgress {
            position: progress.position + offset * (distance / remaining),
            segment: progress.segment,
        }
    }
}

/// Immutable catalog entry describing a purchasable defender.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DefenderType {
    /// Human readable name shown by adapters.
    pub name: String,
    /// Colour used when drawing the defender and its range.
    pub color: Color,
    /// Targeting radius measured in world units.
    pub range: f32,
    /// Ticks the defender waits between shots.
    pub cooldown_ticks: u32,
    /// Price debited from the balance on placement.
    pub cost: u32,
}

/// Ordered, validated list of defender types available for placement.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DefenderCatalog {
    entries: Vec<DefenderType>,
}

impl DefenderCatalog {
    /// Validates and wraps the provided catalog entries.
    pub fn new(entries: Vec<DefenderType>) -> Result<Self, ConfigError> {
        if entries.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }

        for entry in &entries {
            if entry.cooldown_ticks == 0 {
                return Err(ConfigError::NonPositiveCooldown {
                    name: entry.name.clone(),
                });
            }
            if !entry.range.is_finite() || entry.range <= 0.0 {
                return Err(ConfigError::InvalidRange {
                    name: entry.name.clone(),
                });
            }
        }

        Ok(Self { entries })
    }

    /// Looks up the catalog entry for the provided kind.
    #[must_use]
    pub fn get(&self, kind: DefenderKind) -> Option<&DefenderType> {
        let index = usize::try_from(kind.get()).ok()?;
        self.entries.get(index)
    }

    /// Finds a catalog entry by name, ignoring ASCII case.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<DefenderKind> {
        self.iter()
            .find(|(_, entry)| entry.name.eq_ignore_ascii_case(name))
            .map(|(kind, _)| kind)
    }

    /// Iterates over entries paired with their kind, in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (DefenderKind, &DefenderType)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(index, entry)| (DefenderKind::new(index as u32), entry))
    }

    /// Number of entries in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Reports whether the catalog is empty. Validated catalogs never are.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Movement and hit parameters shared by every enemy.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct EnemyStats {
    speed: f32,
    radius: f32,
}

impl EnemyStats {
    /// Validates enemy speed (world units per tick) and hit radius.
    pub fn new(speed: f32, radius: f32) -> Result<Self, ConfigError> {
        if !speed.is_finite() || speed <= 0.0 {
            return Err(ConfigError::InvalidSpeed { entity: "enemy" });
        }
        if !radius.is_finite() || radius < 0.0 {
            return Err(ConfigError::InvalidRadius { entity: "enemy" });
        }
        Ok(Self { speed, radius })
    }

    /// Distance travelled per tick.
    #[must_use]
    pub const fn speed(&self) -> f32 {
        self.speed
    }

    /// Radius within which a projectile counts as a hit.
    #[must_use]
    pub const fn radius(&self) -> f32 {
        self.radius
    }
}

/// Flight parameters shared by every projectile.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ProjectileStats {
    speed: f32,
    radius: f32,
}

impl ProjectileStats {
    /// Validates projectile speed (world units per tick) and drawn radius.
    pub fn new(speed: f32, radius: f32) -> Result<Self, ConfigError> {
        if !speed.is_finite() || speed <= 0.0 {
            return Err(ConfigError::InvalidSpeed {
                entity: "projectile",
            });
        }
        if !radius.is_finite() || radius < 0.0 {
            return Err(ConfigError::InvalidRadius {
                entity: "projectile",
            });
        }
        Ok(Self { speed, radius })
    }

    /// Distance travelled per tick.
    #[must_use]
    pub const fn speed(&self) -> f32 {
        self.speed
    }

    /// Radius used by presentation layers.
    #[must_use]
    pub const fn radius(&self) -> f32 {
        self.radius
    }
}

/// Quota and reward progression applied as rounds advance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct RoundRules {
    initial_quota: u32,
    quota_increment: u32,
    initial_reward: u32,
    reward_increment: u32,
}

impl RoundRules {
    /// Validates the round progression parameters.
    pub fn new(
        initial_quota: u32,
        quota_increment: u32,
        initial_reward: u32,
        reward_increment: u32,
    ) -> Result<Self, ConfigError> {
        if initial_quota == 0 {
            return Err(ConfigError::NonPositiveQuota);
        }
        Ok(Self {
            initial_quota,
            quota_increment,
            initial_reward,
            reward_increment,
        })
    }

    /// Enemies spawned during the first round.
    #[must_use]
    pub const fn initial_quota(&self) -> u32 {
        self.initial_quota
    }

    /// Additional enemies spawned by each subsequent round.
    #[must_use]
    pub const fn quota_increment(&self) -> u32 {
        self.quota_increment
    }

    /// Reward credited for clearing the first round.
    #[must_use]
    pub const fn initial_reward(&self) -> u32 {
        self.initial_reward
    }

    /// Additional reward granted by each subsequent round.
    #[must_use]
    pub const fn reward_increment(&self) -> u32 {
        self.reward_increment
    }
}

/// Lifecycle phase of the current round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Enemies are still being released onto the path.
    Spawning,
    /// The quota has been spawned; waiting for every enemy to be popped.
    Clearing,
    /// The round was cleared and rewarded; waiting for an advance request.
    AwaitingNextRound,
}

/// Immutable representation of the round state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSnapshot {
    /// One-based round number.
    pub round: u32,
    /// Enemies the round spawns in total.
    pub quota: u32,
    /// Enemies spawned so far this round.
    pub spawned: u32,
    /// Enemies popped so far this round.
    pub cleared: u32,
    /// Reward credited once the round is cleared.
    pub reward: u32,
    /// Current lifecycle phase.
    pub phase: RoundPhase,
}

impl RoundSnapshot {
    /// Reports whether the round still accepts spawns.
    #[must_use]
    pub const fn accepts_spawns(&self) -> bool {
        matches!(self.phase, RoundPhase::Spawning) && self.spawned < self.quota
    }
}

/// Immutable representation of a single enemy's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnemySnapshot {
    /// Unique identifier assigned to the enemy.
    pub id: EnemyId,
    /// Current world position.
    pub position: Vec2,
    /// Index of the waypoint the enemy last reached.
    pub segment: usize,
    /// Distance travelled per tick.
    pub speed: f32,
    /// Radius within which projectiles connect.
    pub radius: f32,
}

impl EnemySnapshot {
    /// Path progress described by the snapshot.
    #[must_use]
    pub const fn progress(&self) -> PathProgress {
        PathProgress {
            position: self.position,
            segment: self.segment,
        }
    }
}

/// Read-only snapshot describing all live enemies in spawn order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<EnemySnapshot>", into = "Vec<EnemySnapshot>")]
pub struct EnemyView {
    snapshots: Vec<EnemySnapshot>,
}

impl EnemyView {
    /// Creates a new enemy view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<EnemySnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured enemy snapshots in spawn order.
    pub fn iter(&self) -> impl Iterator<Item = &EnemySnapshot> {
        self.snapshots.iter()
    }

    /// Looks up a live enemy by identifier.
    #[must_use]
    pub fn get(&self, id: EnemyId) -> Option<&EnemySnapshot> {
        self.snapshots
            .binary_search_by_key(&id, |snapshot| snapshot.id)
            .ok()
            .map(|index| &self.snapshots[index])
    }

    /// Number of live enemies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether no enemies are alive.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<EnemySnapshot> {
        self.snapshots
    }
}

impl From<Vec<EnemySnapshot>> for EnemyView {
    fn from(snapshots: Vec<EnemySnapshot>) -> Self {
        Self::from_snapshots(snapshots)
    }
}

impl From<EnemyView> for Vec<EnemySnapshot> {
    fn from(view: EnemyView) -> Self {
        view.into_vec()
    }
}

/// Immutable representation of a single defender's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DefenderSnapshot {
    /// Identifier allocated to the defender by the world.
    pub id: DefenderId,
    /// Catalog entry the defender was built from.
    pub kind: DefenderKind,
    /// Position the defender occupies.
    pub position: Vec2,
    /// Targeting radius, exposed for range visualisation.
    pub range: f32,
    /// Colour of the catalog entry.
    pub color: Color,
    /// Ticks left before the defender may fire again.
    pub cooldown_remaining: u32,
    /// Ticks the cooldown is reset to after firing.
    pub cooldown_ticks: u32,
}

impl DefenderSnapshot {
    /// Reports whether the defender may fire this tick.
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        self.cooldown_remaining == 0
    }
}

/// Read-only snapshot describing all placed defenders in placement order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<DefenderSnapshot>", into = "Vec<DefenderSnapshot>")]
pub struct DefenderView {
    snapshots: Vec<DefenderSnapshot>,
}

impl DefenderView {
    /// Creates a new defender view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<DefenderSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured defender snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &DefenderSnapshot> {
        self.snapshots.iter()
    }

    /// Looks up a defender by identifier.
    #[must_use]
    pub fn get(&self, id: DefenderId) -> Option<&DefenderSnapshot> {
        self.snapshots
            .binary_search_by_key(&id, |snapshot| snapshot.id)
            .ok()
            .map(|index| &self.snapshots[index])
    }

    /// Number of placed defenders.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether no defenders have been placed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<DefenderSnapshot> {
        self.snapshots
    }
}

impl From<Vec<DefenderSnapshot>> for DefenderView {
    fn from(snapshots: Vec<DefenderSnapshot>) -> Self {
        Self::from_snapshots(snapshots)
    }
}

impl From<DefenderView> for Vec<DefenderSnapshot> {
    fn from(view: DefenderView) -> Self {
        view.into_vec()
    }
}

/// Immutable representation of a single projectile's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProjectileSnapshot {
    /// Identifier allocated to the projectile by the world.
    pub id: ProjectileId,
    /// Current world position.
    pub position: Vec2,
    /// Distance travelled per tick.
    pub speed: f32,
    /// Enemy the projectile homes onto. It may no longer be alive.
    pub target: EnemyId,
    /// Whether the projectile is still in flight.
    pub active: bool,
}

/// Read-only snapshot describing all projectiles in launch order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<ProjectileSnapshot>", into = "Vec<ProjectileSnapshot>")]
pub struct ProjectileView {
    snapshots: Vec<ProjectileSnapshot>,
}

impl ProjectileView {
    /// Creates a new projectile view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<ProjectileSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured projectile snapshots in launch order.
    pub fn iter(&self) -> impl Iterator<Item = &ProjectileSnapshot> {
        self.snapshots.iter()
    }

    /// Iterator over projectiles that are still in flight.
    pub fn active(&self) -> impl Iterator<Item = &ProjectileSnapshot> {
        self.snapshots.iter().filter(|snapshot| snapshot.active)
    }

    /// Number of tracked projectiles, active or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether no projectiles are tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<ProjectileSnapshot> {
        self.snapshots
    }
}

impl From<Vec<ProjectileSnapshot>> for ProjectileView {
    fn from(snapshots: Vec<ProjectileSnapshot>) -> Self {
        Self::from_snapshots(snapshots)
    }
}

impl From<ProjectileView> for Vec<ProjectileSnapshot> {
    fn from(view: ProjectileView) -> Self {
        view.into_vec()
    }
}

/// Target assignment computed for a single defender.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DefenderTarget {
    /// Defender that acquired the target.
    pub defender: DefenderId,
    /// Enemy selected by the defender.
    pub enemy: EnemyId,
    /// Distance between the defender and the enemy when selected.
    pub distance: f32,
}
