//! Storage for projectiles in flight.

use balloon_defence_core::{EnemyId, ProjectileId, ProjectileSnapshot};
use glam::Vec2;

#[derive(Clone, Debug)]
pub(crate) struct ProjectileState {
    pub(crate) id: ProjectileId,
    pub(crate) position: Vec2,
    pub(crate) speed: f32,
    /// Weak reference; the enemy may already have been removed.
    pub(crate) target: EnemyId,
    pub(crate) active: bool,
}

impl ProjectileState {
    pub(crate) fn snapshot(&self) -> ProjectileSnapshot {
        ProjectileSnapshot {
            id: self.id,
            position: self.position,
            speed: self.speed,
            target: self.target,
            active: self.active,
        }
    }
}

/// Launch-ordered projectile collection. Identifiers increase monotonically so
/// the backing vector stays sorted by identifier.
#[derive(Debug)]
pub(crate) struct ProjectileStore {
    entries: Vec<ProjectileState>,
    next_projectile_id: ProjectileId,
}

impl ProjectileStore {
    pub(crate) fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_projectile_id: ProjectileId::new(0),
        }
    }

    pub(crate) fn launch(&mut self, position: Vec2, speed: f32, target: EnemyId) -> ProjectileId {
        let id = self.next_projectile_id;
        self.next_projectile_id = ProjectileId::new(id.get().wrapping_add(1));
        self.entries.push(ProjectileState {
            id,
            position,
            speed,
            target,
            active: true,
        });
        id
    }

    pub(crate) fn get_mut(&mut self, id: ProjectileId) -> Option<&mut ProjectileState> {
        let index = self
            .entries
            .binary_search_by_key(&id, |projectile| projectile.id)
            .ok()?;
        self.entries.get_mut(index)
    }

    /// Marks an active projectile as spent, reporting whether it was in flight.
    pub(crate) fn deactivate(&mut self, id: ProjectileId) -> bool {
        match self.get_mut(id) {
            Some(projectile) if projectile.active => {
                projectile.active = false;
                true
            }
            _ => false,
        }
    }

    /// Discards inactive projectiles, returning how many were removed.
    pub(crate) fn sweep(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|projectile| projectile.active);
        before - self.entries.len()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &ProjectileState> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn launched_projectiles_start_active_with_sequential_ids() {
        let mut store = ProjectileStore::new();
        let first = store.launch(Vec2::ZERO, 8.0, EnemyId::new(3));
        let second = store.launch(Vec2::ONE, 8.0, EnemyId::new(3));
        assert_eq!(first.get() + 1, second.get());
        assert!(store.iter().all(|projectile| projectile.active));
    }

    #[test]
    fn sweep_discards_only_inactive_projectiles() {
        let mut store = ProjectileStore::new();
        let spent = store.launch(Vec2::ZERO, 8.0, EnemyId::new(0));
        let live = store.launch(Vec2::ZERO, 8.0, EnemyId::new(1));
        assert!(store.deactivate(spent));
        assert!(!store.deactivate(spent), "already spent");

        assert_eq!(store.sweep(), 1);
        let remaining: Vec<_> = store.iter().map(|projectile| projectile.id).collect();
        assert_eq!(remaining, vec![live]);
        assert!(store.get_mut(spent).is_none());
    }
}
