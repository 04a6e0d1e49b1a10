//! Synchronous battle sweep (editor mode)
//!
//! Unlike the real-time duel, eligibility alone decides the outcome: no dice.

use crate::combat::eligibility::can_kill;
use crate::combat::proximity::pairs_within;
use crate::entity::NpcHandle;

/// Summary of one sweep
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FightReport {
    /// Eligible pairings found in range, including duplicates on one victim
    pub engagements: usize,
    /// Kills actually applied, as (killer, victim) names
    pub kills: Vec<(String, String)>,
    /// Dead NPCs dropped from the collection
    pub removed: usize,
    /// NPCs left in the collection
    pub survivors: usize,
}

/// Kill every defender that an eligible attacker can reach within `range`,
/// then drop the dead from `npcs`.
///
/// All pairings are recorded before any kill is applied, so a kill does not
/// stop its victim from attacking in the same sweep. A victim claimed by
/// several attackers dies once and only the first attacker is notified.
pub fn fight(npcs: &mut Vec<NpcHandle>, range: f64) -> FightReport {
    let pending: Vec<_> = pairs_within(npcs, |_| range)
        .into_iter()
        .filter(|(attacker, defender)| can_kill(attacker.species(), defender.species()))
        .collect();

    let mut report = FightReport {
        engagements: pending.len(),
        ..FightReport::default()
    };

    for (killer, victim) in &pending {
        if victim.kill() {
            killer.notify_kill(victim);
            report
                .kills
                .push((killer.name().to_string(), victim.name().to_string()));
        }
    }

    let before = npcs.len();
    npcs.retain(|npc| npc.is_alive());
    report.removed = before - npcs.len();
    report.survivors = npcs.len();

    tracing::debug!(
        range,
        engagements = report.engagements,
        kills = report.kills.len(),
        "Fight sweep finished"
    );
    report
}
