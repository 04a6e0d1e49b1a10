//! Predation matrix
//!
//! Fixed food chain: Dragon eats Bull, Bull eats Frog, Frog eats nobody.

use crate::entity::Species;

/// May an `attacker` of this species kill a `defender` of that species?
pub fn can_kill(attacker: Species, defender: Species) -> bool {
    matches!(
        (attacker, defender),
        (Species::Dragon, Species::Bull) | (Species::Bull, Species::Frog)
    )
}
