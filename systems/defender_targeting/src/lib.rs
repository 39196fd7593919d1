#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that computes deterministic defender targets from world snapshots.

use balloon_defence_core::{DefenderTarget, DefenderView, EnemyId, EnemyView};
use glam::Vec2;

/// Defender targeting system assigning each defender its first enemy in range.
#[derive(Debug, Default)]
pub struct DefenderTargeting;

impl DefenderTargeting {
    /// Creates a new defender targeting system.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Computes defender targets for the provided world snapshot.
    ///
    /// The output buffer is cleared before populating it with the latest
    /// assignments. Defenders with no enemy in range are omitted.
    pub fn handle(
        &mut self,
        defenders: &DefenderView,
        enemies: &EnemyView,
        out: &mut Vec<DefenderTarget>,
    ) {
        out.clear();

        if defenders.is_empty() || enemies.is_empty() {
            return;
        }

        for defender in defenders.iter() {
            if let Some((enemy, distance)) =
                select_target(defender.position, defender.range, enemies)
            {
                out.push(DefenderTarget {
                    defender: defender.id,
                    enemy,
                    distance,
                });
            }
        }
    }
}

/// Selects the earliest-spawned enemy whose distance to `position` is within `range`.
///
/// The view iterates in spawn order, so ties in distance never matter. The
/// returned distance is the Euclidean distance at the time of selection.
#[must_use]
pub fn select_target(position: Vec2, range: f32, enemies: &EnemyView) -> Option<(EnemyId, f32)> {
    enemies.iter().find_map(|enemy| {
        let distance = position.distance(enemy.position);
        (distance <= range).then_some((enemy.id, distance))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use balloon_defence_core::{Color, DefenderId, DefenderKind, DefenderSnapshot, EnemySnapshot};

    fn defender(id: u32, position: Vec2, range: f32) -> DefenderSnapshot {
        DefenderSnapshot {
            id: DefenderId::new(id),
            kind: DefenderKind::new(0),
            position,
            range,
            color: Color::from_rgb(0, 0, 255),
            cooldown_remaining: 0,
            cooldown_ticks: 60,
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
    fn earlier_spawned_enemy_wins_over_closer_one() {
        let enemies = EnemyView::from_snapshots(vec![
            enemy(2, Vec2::new(50.0, 0.0)),
            enemy(1, Vec2::new(80.0, 0.0)),
        ]);
        assert_eq!(
            select_target(Vec2::ZERO, 100.0, &enemies),
            Some((EnemyId::new(1), 80.0))
        );
    }

    #[test]
    fn range_boundary_is_inclusive() {
        let enemies = EnemyView::from_snapshots(vec![enemy(0, Vec2::new(120.0, 0.0))]);
        assert!(select_target(Vec2::ZERO, 120.0, &enemies).is_some());
        assert!(select_target(Vec2::ZERO, 119.9, &enemies).is_none());
    }

    #[test]
    fn handle_omits_defenders_without_targets() {
        let mut system = DefenderTargeting::new();
        let defenders = DefenderView::from_snapshots(vec![
            defender(0, Vec2::ZERO, 50.0),
            defender(1, Vec2::new(500.0, 0.0), 50.0),
        ]);
        let enemies = EnemyView::from_snapshots(vec![enemy(3, Vec2::new(30.0, 40.0))]);
        let mut out = vec![DefenderTarget {
            defender: DefenderId::new(9),
            enemy: EnemyId::new(9),
            distance: 0.0,
        }];

        system.handle(&defenders, &enemies, &mut out);

        assert_eq!(
            out,
            vec![DefenderTarget {
                defender: DefenderId::new(0),
                enemy: EnemyId::new(3),
                distance: 50.0,
            }]
        );
    }
}
