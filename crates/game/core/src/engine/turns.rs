use std::collections::VecDeque;

use crate::combatant::{Combatant, CombatantId, Side};

/// The turn that was just handed out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScheduledTurn {
    pub actor: CombatantId,
    pub round: u32,
    /// The queue was rebuilt to produce this turn.
    pub new_round: bool,
}

/// Round-robin turn order: living allies first, then living enemies, rebuilt
/// whenever the current round runs dry.
#[derive(Clone, Debug, Default)]
pub struct TurnScheduler {
    queue: VecDeque<CombatantId>,
    round: u32,
}

impl TurnScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    /// Turns still queued this round, in order. May include combatants that
    /// died after the round started; [`TurnScheduler::next`] skips them.
    pub fn pending(&self) -> impl Iterator<Item = CombatantId> + '_ {
        self.queue.iter().copied()
    }

    /// Rebuilds the queue from everyone currently alive and starts a new
    /// round. Returns the number of queued turns.
    pub fn prepare_round(&mut self, combatants: &[Combatant]) -> usize {
        self.queue.clear();
        for side in [Side::Ally, Side::Enemy] {
            self.queue.extend(
                combatants
                    .iter()
                    .filter(|c| c.alive && c.side == side)
                    .map(|c| c.id),
            );
        }
        self.round += 1;
        self.queue.len()
    }

    /// Pops the next living combatant, rebuilding the round when the queue is
    /// empty. `None` only when nobody is alive.
    pub fn next(&mut self, combatants: &[Combatant]) -> Option<ScheduledTurn> {
        let mut new_round = false;
        loop {
            while let Some(actor) = self.queue.pop_front() {
                let alive = combatants
                    .get(actor.index())
                    .is_some_and(|c| c.alive);
                if alive {
                    return Some(ScheduledTurn {
                        actor,
                        round: self.round,
                        new_round,
                    });
                }
            }

            if new_round || self.prepare_round(combatants) == 0 {
                return None;
            }
            new_round = true;
        }
    }
}
