#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that detects projectiles touching their targets.

use balloon_defence_core::{Command, EnemyView, ProjectileView};

/// Collision system that proposes hit resolution in projectile launch order.
///
/// Every active projectile whose live target lies within the target's hit
/// radius yields a `Command::ResolveHit`. Several projectiles may report a hit
/// on the same enemy; the world pops the enemy for the first and expires the
/// rest as stale.
#[derive(Debug, Default)]
pub struct Collision {
    scratch: Vec<Command>,
}

impl Collision {
    /// Creates a new collision system with an empty scratch buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits hit commands for projectiles touching their targets.
    pub fn handle(
        &mut self,
        projectiles: &ProjectileView,
        enemies: &EnemyView,
        out: &mut Vec<Command>,
    ) {
        if enemies.is_empty() {
            return;
        }

        self.scratch.clear();
        for projectile in projectiles.active() {
            let Some(enemy) = enemies.get(projectile.target) else {
                continue;
            };

            if projectile.position.distance(enemy.position) <= enemy.radius {
                self.scratch.push(Command::ResolveHit {
                    projectile: projectile.id,
                });
            }
        }

        out.append(&mut self.scratch);
    }
}
