#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic movement system that walks enemies along the path.

use balloon_defence_core::{Command, EnemyView, Event, Path};

/// Pure system that reacts to tick events and proposes enemy steps.
#[derive(Debug, Default)]
pub struct Movement {
    scratch: Vec<Command>,
}

impl Movement {
    /// Creates a new movement system with an empty scratch buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits one `Command::MoveEnemy` per unfinished enemy when a tick elapsed.
    ///
    /// Enemies resting on the final waypoint are left alone; they stay in the
    /// live set until popped.
    pub fn handle(
        &mut self,
        events: &[Event],
        path: &Path,
        enemies: &EnemyView,
        out: &mut Vec<Command>,
    ) {
        if !events
            .iter()
            .any(|event| matches!(event, Event::TimeAdvanced { .. }))
        {
            return;
        }

        self.scratch.clear();
        for enemy in enemies.iter() {
            if path.is_finished(enemy.segment) {
                continue;
            }

            self.scratch.push(Command::MoveEnemy {
                enemy: enemy.id,
                progress: path.advance(enemy.progress(), enemy.speed),
            });
        }

        out.append(&mut self.scratch);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use balloon_defence_core::{EnemyId, EnemySnapshot};
    use glam::Vec2;

    fn path() -> Path {
        Path::new(vec![Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0)]).expect("path")
    }

    fn enemy(id: u32, x: f32, segment: usize) -> EnemySnapshot {
        EnemySnapshot {
            id: EnemyId::new(id),
            position: Vec2::new(x, 0.0),
            segment,
            speed: 2.0,
            radius: 15.0,
        }
    }

    #[test]
    fn idle_without_time_advancing() {
        let mut movement = Movement::new();
        let enemies = EnemyView::from_snapshots(vec![enemy(0, 0.0, 0)]);
        let mut out = Vec::new();
        movement.handle(&[], &path(), &enemies, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn finished_enemies_are_not_moved() {
        let mut movement = Movement::new();
        let enemies = EnemyView::from_snapshots(vec![enemy(0, 4.0, 0), enemy(1, 10.0, 1)]);
        let mut out = Vec::new();
        movement.handle(
            &[Event::TimeAdvanced { tick: 1 }],
            &path(),
            &enemies,
            &mut out,
        );
        assert_eq!(out.len(), 1);
        match &out[0] {
            Command::MoveEnemy { enemy, progress } => {
                assert_eq!(*enemy, EnemyId::new(0));
                assert_eq!(progress.segment, 0);
                assert!((progress.position - Vec2::new(6.0, 0.0)).length() < 1e-5);
            }
            other => panic!("unexpected command emitted: {other:?}"),
        }
    }
}
