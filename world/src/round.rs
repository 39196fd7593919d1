//! Round lifecycle and the currency balance it rewards.

use balloon_defence_core::{PlacementError, RoundPhase, RoundRules, RoundSnapshot};

/// Round state machine: `Spawning -> Clearing -> AwaitingNextRound -> Spawning`.
#[derive(Clone, Debug)]
pub(crate) struct RoundState {
    round: u32,
    quota: u32,
    spawned: u32,
    cleared: u32,
    reward: u32,
    phase: RoundPhase,
}

impl RoundState {
    pub(crate) fn first(rules: &RoundRules) -> Self {
        Self {
            round: 1,
            quota: rules.initial_quota(),
            spawned: 0,
            cleared: 0,
            reward: rules.initial_reward(),
            phase: RoundPhase::Spawning,
        }
    }

    pub(crate) fn number(&self) -> u32 {
        self.round
    }

    pub(crate) fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub(crate) fn accepts_spawn(&self) -> bool {
        self.phase == RoundPhase::Spawning && self.spawned < self.quota
    }

    pub(crate) fn record_spawn(&mut self) {
        self.spawned += 1;
        if self.spawned >= self.quota {
            self.phase = RoundPhase::Clearing;
        }
    }

    pub(crate) fn record_clear(&mut self) {
        self.cleared = self.cleared.saturating_add(1);
    }

    /// Moves a cleared round into `AwaitingNextRound`, yielding the reward to
    /// credit. Returns `None` on every call but the completing one.
    pub(crate) fn try_complete(&mut self, live_enemies: usize) -> Option<u32> {
        if self.phase != RoundPhase::Clearing {
            return None;
        }

        if self.spawned != self.quota || self.cleared != self.quota || live_enemies != 0 {
            return None;
        }

        self.phase = RoundPhase::AwaitingNextRound;
        Some(self.reward)
    }

    pub(crate) fn advance(&mut self, rules: &RoundRules) -> bool {
        if self.phase != RoundPhase::AwaitingNextRound {
            return false;
        }

        self.round = self.round.saturating_add(1);
        self.quota = self.quota.saturating_add(rules.quota_increment());
        self.reward = self.reward.saturating_add(rules.reward_increment());
        self.spawned = 0;
        self.cleared = 0;
        self.phase = RoundPhase::Spawning;
        true
    }

    pub(crate) fn snapshot(&self) -> RoundSnapshot {
        RoundSnapshot {
            round: self.round,
            quota: self.quota,
            spawned: self.spawned,
            cleared: self.cleared,
            reward: self.reward,
            phase: self.phase,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct Economy {
    balance: u32,
}

impl Economy {
    pub(crate) fn new(balance: u32) -> Self {
        Self { balance }
    }

    pub(crate) fn balance(&self) -> u32 {
        self.balance
    }

    /// Debits `cost` if the balance covers it, returning the new balance.
    pub(crate) fn debit(&mut self, cost: u32) -> Result<u32, PlacementError> {
        let Some(remaining) = self.balance.checked_sub(cost) else {
            return Err(PlacementError::InsufficientFunds {
                balance: self.balance,
                cost,
            });
        };
        self.balance = remaining;
        Ok(remaining)
    }

    pub(crate) fn credit(&mut self, amount: u32) -> u32 {
        self.balance = self.balance.saturating_add(amount);
        self.balance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> RoundRules {
        RoundRules::new(2, 2, 100, 25).expect("valid rules")
    }

    #[test]
    fn spawning_quota_moves_round_into_clearing() {
        let mut round = RoundState::first(&rules());
        round.record_spawn();
        assert!(round.accepts_spawn());
        round.record_spawn();
        assert!(!round.accepts_spawn());
        assert_eq!(round.phase(), RoundPhase::Clearing);
    }

    #[test]
    fn completion_requires_every_condition_and_pays_once() {
        let mut round = RoundState::first(&rules());
        round.record_spawn();
        round.record_spawn();
        round.record_clear();
        assert_eq!(round.try_complete(0), None, "one enemy not yet cleared");

        round.record_clear();
        assert_eq!(round.try_complete(1), None, "an enemy is still alive");
        assert_eq!(round.try_complete(0), Some(100));
        assert_eq!(round.try_complete(0), None, "reward is paid exactly once");
        assert_eq!(round.phase(), RoundPhase::AwaitingNextRound);
    }

    #[test]
    fn advance_only_leaves_awaiting_next_round() {
        let rules = rules();
        let mut round = RoundState::first(&rules);
        assert!(!round.advance(&rules));

        round.record_spawn();
        round.record_spawn();
        round.record_clear();
        round.record_clear();
        let _ = round.try_complete(0);
        assert!(round.advance(&rules));

        let snapshot = round.snapshot();
        assert_eq!(snapshot.round, 2);
        assert_eq!(snapshot.quota, 4);
        assert_eq!(snapshot.reward, 125);
        assert_eq!(snapshot.spawned, 0);
        assert_eq!(snapshot.cleared, 0);
        assert_eq!(snapshot.phase, RoundPhase::Spawning);
    }

    #[test]
    fn debit_is_gated_on_balance() {
        let mut economy = Economy::new(250);
        assert_eq!(economy.debit(100), Ok(150));
        assert_eq!(
            economy.debit(200),
            Err(PlacementError::InsufficientFunds {
                balance: 150,
                cost: 200
            })
        );
        assert_eq!(economy.balance(), 150);
        assert_eq!(economy.credit(100), 250);
    }
}
