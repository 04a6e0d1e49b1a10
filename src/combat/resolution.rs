//! Real-time duel resolution
//!
//! A queued pairing is only a proposal: both sides may have died since it
//! was enqueued. Resolution re-checks liveness, applies the predation
//! matrix, then lets each side roll its own die. The attacker must roll
//! strictly higher to kill.

use crate::combat::eligibility::can_kill;
use crate::entity::NpcHandle;

/// Result of one duel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuelOutcome {
    /// One of the participants was already dead
    Stale,
    /// The attacker's species cannot kill the defender's
    Ineligible,
    /// Attacker won the roll and the defender is dead
    Kill { attack: u32, defense: u32 },
    /// Attacker did not out-roll the defender; nothing changes
    Miss { attack: u32, defense: u32 },
}

impl DuelOutcome {
    pub fn is_kill(&self) -> bool {
        matches!(self, DuelOutcome::Kill { .. })
    }
}

/// Resolve one pairing, killing the defender and notifying the attacker's
/// observers on a win.
pub fn resolve_duel(attacker: &NpcHandle, defender: &NpcHandle) -> DuelOutcome {
    if !attacker.is_alive() || !defender.is_alive() {
        return DuelOutcome::Stale;
    }
    if !can_kill(attacker.species(), defender.species()) {
        return DuelOutcome::Ineligible;
    }

    let attack = attacker.roll_dice();
    let defense = defender.roll_dice();
    if attack <= defense {
        return DuelOutcome::Miss { attack, defense };
    }

    // The synchronous fight may have claimed the defender in the meantime.
    if !defender.kill() {
        return DuelOutcome::Stale;
    }
    attacker.notify_kill(defender);
    DuelOutcome::Kill { attack, defense }
}
