#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that emits projectile firing commands from targeting data.

use balloon_defence_core::{Command, DefenderTarget, DefenderView};

/// Defender combat system that queues firing commands for ready defenders.
#[derive(Debug, Default)]
pub struct DefenderCombat {
    scratch: Vec<Command>,
}

impl DefenderCombat {
    /// Creates a new defender combat system with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits `Command::FireProjectile` entries for defenders ready to fire.
    pub fn handle(
        &mut self,
        defenders: &DefenderView,
        targets: &[DefenderTarget],
        out: &mut Vec<Command>,
    ) {
        if targets.is_empty() || defenders.is_empty() {
            return;
        }

        self.scratch.clear();

        for target in targets {
            if let Some(snapshot) = defenders.get(target.defender) {
                if snapshot.is_ready() {
                    self.scratch.push(Command::FireProjectile {
                        defender: target.defender,
                        target: target.enemy,
                    });
                }
            }
        }

        out.append(&mut self.scratch);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use balloon_defence_core::{Color, DefenderId, DefenderKind, DefenderSnapshot, EnemyId};
    use glam::Vec2;

    fn snapshot(id: u32, cooldown_remaining: u32) -> DefenderSnapshot {
        DefenderSnapshot {
            id: DefenderId::new(id),
            kind: DefenderKind::new(0),
            position: Vec2::ZERO,
            range: 120.0,
            color: Color::from_rgb(0, 0, 255),
            cooldown_remaining,
            cooldown_ticks: 60,
        }
    }

    fn target(defender: u32, enemy: u32) -> DefenderTarget {
        DefenderTarget {
            defender: DefenderId::new(defender),
            enemy: EnemyId::new(enemy),
            distance: 10.0,
        }
    }

    #[test]
    fn firing_respects_cooldown_readiness() {
        let mut system = DefenderCombat::new();
        let defenders =
            DefenderView::from_snapshots(vec![snapshot(2, 0), snapshot(5, 0), snapshot(7, 12)]);
        let targets = vec![target(2, 4), target(5, 1), target(7, 1)];
        let mut out = Vec::new();

        system.handle(&defenders, &targets, &mut out);

        assert_eq!(
            out,
            vec![
                Command::FireProjectile {
                    defender: DefenderId::new(2),
                    target: EnemyId::new(4),
                },
                Command::FireProjectile {
                    defender: DefenderId::new(5),
                    target: EnemyId::new(1),
                },
            ]
        );
    }

    #[test]
    fn targets_for_unknown_defenders_are_ignored() {
        let mut system = DefenderCombat::new();
        let defenders = DefenderView::from_snapshots(vec![snapshot(1, 0)]);
        let mut out = Vec::new();

        system.handle(&defenders, &[target(3, 0)], &mut out);

        assert!(out.is_empty());
    }
}
