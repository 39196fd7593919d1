#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Homing projectile guidance.
//!
//! Each active projectile steers toward its target's current position. A
//! projectile whose target has already been removed is expired as stale, and
//! one that comes within a single step of its target stops without moving.

use balloon_defence_core::{Command, EnemyView, ExpiryReason, ProjectileView};
use glam::Vec2;

/// Outcome of advancing a projectile by one step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Homing {
    /// The projectile should occupy the provided position.
    Moved(Vec2),
    /// The target is closer than one step; the projectile stops where it is.
    Arrived,
}

/// Steps from `position` toward `target` by `speed`.
#[must_use]
pub fn home(position: Vec2, target: Vec2, speed: f32) -> Homing {
    let offset = target - position;
    let distance = offset.length();
    if distance < speed {
        return Homing::Arrived;
    }

    Homing::Moved(position + offset * (speed / distance))
}

/// Pure system emitting one movement or expiry command per active projectile.
#[derive(Debug, Default)]
pub struct ProjectileGuidance {
    scratch: Vec<Command>,
}

impl ProjectileGuidance {
    /// Creates a new guidance system with an empty scratch buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances every active projectile toward its target.
    pub fn handle(
        &mut self,
        projectiles: &ProjectileView,
        enemies: &EnemyView,
        out: &mut Vec<Command>,
    ) {
        self.scratch.clear();

        for projectile in projectiles.active() {
            let Some(target) = enemies.get(projectile.target) else {
                self.scratch.push(Command::ExpireProjectile {
                    projectile: projectile.id,
                    reason: ExpiryReason::StaleTarget,
                });
                continue;
            };

            let command = match home(projectile.position, target.position, projectile.speed) {
                Homing::Moved(position) => Command::MoveProjectile {
                    projectile: projectile.id,
                    position,
                },
                Homing::Arrived => Command::ExpireProjectile {
                    projectile: projectile.id,
                    reason: ExpiryReason::Arrived,
                },
            };
            self.scratch.push(command);
        }

        out.append(&mut self.scratch);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use balloon_defence_core::{EnemyId, EnemySnapshot, ProjectileId, ProjectileSnapshot};

    fn projectile(id: u32, position: Vec2, target: u32, active: bool) -> ProjectileSnapshot {
        ProjectileSnapshot {
            id: ProjectileId::new(id),
            position,
            speed: 8.0,
            target: EnemyId::new(target),
            active,
        }
    }

    fn enemy(id: u32, position: Vec2) -> EnemySnapshot {
        EnemySnapshot {
            id: EnemyId::new(id),
            position,
            segment: 0,
            speed: 2.0,
            radius: 15.0,
        }
    }

    #[test]
    fn home_steps_exactly_speed_toward_target() {
        assert_eq!(
            home(Vec2::ZERO, Vec2::new(0.0, 40.0), 8.0),
            Homing::Moved(Vec2::new(0.0, 8.0))
        );
    }

    #[test]
    fn home_reports_arrival_inside_one_step() {
        assert_eq!(home(Vec2::ZERO, Vec2::new(3.0, 4.0), 8.0), Homing::Arrived);
        assert_eq!(
            home(Vec2::ZERO, Vec2::new(8.0, 0.0), 8.0),
            Homing::Moved(Vec2::new(8.0, 0.0)),
            "exactly one step away still moves"
        );
    }

    #[test]
    fn handle_expires_stale_and_skips_inactive_projectiles() {
        let mut guidance = ProjectileGuidance::new();
        let projectiles = ProjectileView::from_snapshots(vec![
            projectile(0, Vec2::ZERO, 1, true),
            projectile(1, Vec2::ZERO, 2, true),
            projectile(2, Vec2::ZERO, 1, false),
        ]);
        let enemies = EnemyView::from_snapshots(vec![enemy(1, Vec2::new(100.0, 0.0))]);
        let mut out = Vec::new();

        guidance.handle(&projectiles, &enemies, &mut out);

        assert_eq!(
            out,
            vec![
                Command::MoveProjectile {
                    projectile: ProjectileId::new(0),
                    position: Vec2::new(8.0, 0.0),
                },
                Command::ExpireProjectile {
                    projectile: ProjectileId::new(1),
                    reason: ExpiryReason::StaleTarget,
                },
            ]
        );
    }
}
