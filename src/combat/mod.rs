pub mod eligibility;
pub mod fight;
pub mod proximity;
pub mod resolution;

pub use eligibility::can_kill;
pub use fight::{fight, FightReport};
pub use proximity::pairs_within;
pub use resolution::{resolve_duel, DuelOutcome};
