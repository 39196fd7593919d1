//! Authoritative defender state management utilities.

use std::collections::BTreeMap;

use balloon_defence_core::{Color, DefenderId, DefenderKind, DefenderSnapshot, DefenderType};
use glam::Vec2;

/// State of a defender stored inside the world.
#[derive(Clone, Debug)]
pub(crate) struct DefenderState {
    pub(crate) id: DefenderId,
    pub(crate) kind: DefenderKind,
    pub(crate) position: Vec2,
    pub(crate) range: f32,
    pub(crate) color: Color,
    pub(crate) cooldown_ticks: u32,
    /// Always within `0..=cooldown_ticks`.
    pub(crate) cooldown_remaining: u32,
}

impl DefenderState {
    pub(crate) fn is_ready(&self) -> bool {
        self.cooldown_remaining == 0
    }

    pub(crate) fn cool_down(&mut self) {
        self.cooldown_remaining = self.cooldown_remaining.saturating_sub(1);
    }

    pub(crate) fn rearm(&mut self) {
        self.cooldown_remaining = self.cooldown_ticks;
    }

    pub(crate) fn snapshot(&self) -> DefenderSnapshot {
        DefenderSnapshot {
            id: self.id,
            kind: self.kind,
            position: self.position,
            range: self.range,
            color: self.color,
            cooldown_remaining: self.cooldown_remaining,
            cooldown_ticks: self.cooldown_ticks,
        }
    }
}

/// Registry that stores defenders and manages identifier allocation.
#[derive(Debug)]
pub(crate) struct DefenderRegistry {
    entries: BTreeMap<DefenderId, DefenderState>,
    next_defender_id: DefenderId,
}

impl DefenderRegistry {
    /// Creates an empty defender registry with a reset identifier counter.
    pub(crate) fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            next_defender_id: DefenderId::new(0),
        }
    }

    /// Stores a freshly placed defender that is ready to fire immediately.
    pub(crate) fn insert(
        &mut self,
        kind: DefenderKind,
        entry: &DefenderType,
        position: Vec2,
    ) -> DefenderId {
        let id = self.next_defender_id;
        self.next_defender_id = DefenderId::new(id.get().wrapping_add(1));
        let _ = self.entries.insert(
            id,
            DefenderState {
                id,
                kind,
                position,
                range: entry.range,
                color: entry.color,
                cooldown_ticks: entry.cooldown_ticks,
                cooldown_remaining: 0,
            },
        );
        id
    }

    pub(crate) fn get_mut(&mut self, id: DefenderId) -> Option<&mut DefenderState> {
        self.entries.get_mut(&id)
    }

    pub(crate) fn cool_down_all(&mut self) {
        for defender in self.entries.values_mut() {
            defender.cool_down();
        }
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &DefenderState> {
        self.entries.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast() -> DefenderType {
        DefenderType {
            name: "Fast".to_owned(),
            color: Color::from_rgb(0, 255, 0),
            range: 100.0,
            cooldown_ticks: 3,
            cost: 150,
        }
    }

    #[test]
    fn registry_allocates_sequential_identifiers() {
        let mut registry = DefenderRegistry::new();
        let first = registry.insert(DefenderKind::new(1), &fast(), Vec2::ZERO);
        let second = registry.insert(DefenderKind::new(1), &fast(), Vec2::ONE);
        assert_eq!(first, DefenderId::new(0));
        assert_eq!(second, DefenderId::new(1));
        assert_eq!(registry.iter().count(), 2);
    }

    #[test]
    fn placed_defender_starts_ready() {
        let mut registry = DefenderRegistry::new();
        let id = registry.insert(DefenderKind::new(1), &fast(), Vec2::ZERO);
        let defender = registry.get_mut(id).expect("defender");
        assert!(defender.is_ready());
        assert_eq!(defender.snapshot().cooldown_ticks, 3);
    }

    #[test]
    fn cooldown_counts_down_and_floors_at_zero() {
        let mut registry = DefenderRegistry::new();
        let id = registry.insert(DefenderKind::new(1), &fast(), Vec2::ZERO);
        registry.get_mut(id).expect("defender").rearm();

        let mut observed = Vec::new();
        for _ in 0..5 {
            registry.cool_down_all();
            observed.push(registry.get_mut(id).expect("defender").cooldown_remaining);
        }

        assert_eq!(observed, vec![2, 1, 0, 0, 0]);
    }
}
