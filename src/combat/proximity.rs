//! All-pairs proximity scan

use crate::entity::{Npc, NpcHandle};

/// Every ordered pair `(attacker, defender)` of distinct, living NPCs whose
/// distance is within the attacker's `reach`.
///
/// Reciprocal pairs are both reported. Output order follows the outer loop
/// over attackers, then the inner loop over defenders, by slice index.
pub fn pairs_within<F>(npcs: &[NpcHandle], reach: F) -> Vec<(NpcHandle, NpcHandle)>
where
    F: Fn(&Npc) -> f64,
{
    let mut pairs = Vec::new();
    for (i, attacker) in npcs.iter().enumerate() {
        if !attacker.is_alive() {
            continue;
        }
        let limit = reach(attacker);
        let origin = attacker.position();
        for (j, defender) in npcs.iter().enumerate() {
            if i == j || !defender.is_alive() {
                continue;
            }
            if origin.distance(&defender.position()) <= limit {
                pairs.push((attacker.clone(), defender.clone()));
            }
        }
    }
    pairs
}
