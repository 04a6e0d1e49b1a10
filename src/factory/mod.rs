//! NPC construction
//!
//! The factory owns the naming scope, the active bounds rectangle and the
//! seed source for per-NPC generators. Everything that puts an NPC into the
//! world (menu, random initialisation, roster loading) goes through it.

pub mod persistence;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::core::error::{ArenaError, Result};
use crate::core::types::{Bounds, Position};
use crate::entity::{NameRegistry, Npc, NpcHandle, Species};

pub use persistence::RosterEntry;

enum SeedSource {
    Entropy,
    Seeded(ChaCha8Rng),
}

pub struct NpcFactory {
    bounds: Bounds,
    names: NameRegistry,
    seeds: SeedSource,
}

impl NpcFactory {
    /// Factory with OS-seeded NPC generators
    pub fn new(bounds: Bounds) -> Self {
        Self {
            bounds,
            names: NameRegistry::new(),
            seeds: SeedSource::Entropy,
        }
    }

    /// Factory whose NPC generators all derive from `seed`
    pub fn with_seed(bounds: Bounds, seed: u64) -> Self {
        Self {
            bounds,
            names: NameRegistry::new(),
            seeds: SeedSource::Seeded(ChaCha8Rng::seed_from_u64(seed)),
        }
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn set_bounds(&mut self, bounds: Bounds) {
        if bounds != self.bounds {
            tracing::debug!(%bounds, "Factory bounds changed");
        }
        self.bounds = bounds;
    }

    pub fn names(&self) -> &NameRegistry {
        &self.names
    }

    pub fn clear_names(&mut self) {
        self.names.clear();
    }

    /// Build a uniquely named NPC at (x, y).
    ///
    /// Fails with [`ArenaError::OutOfBounds`] when the point lies outside
    /// the active bounds, and with [`ArenaError::InvalidName`] when the name
    /// would not survive a roster round trip. The name is only reserved on
    /// success.
    pub fn create(&mut self, species: Species, base_name: &str, x: i32, y: i32) -> Result<NpcHandle> {
        if base_name.contains('"') {
            return Err(ArenaError::InvalidName(base_name.to_string()));
        }
        let position = Position::new(x, y);
        if !self.bounds.contains(position) {
            return Err(ArenaError::OutOfBounds {
                x,
                y,
                bounds: self.bounds,
            });
        }
        let name = self.names.unique(base_name);
        let seed = self.next_seed();
        Ok(Npc::spawn(species, name, position, seed))
    }

    /// Rebuild a stored NPC. The stored name is kept verbatim and the
    /// position is not checked against the active bounds.
    pub fn restore(&mut self, entry: &RosterEntry) -> NpcHandle {
        if !self.names.reserve(&entry.name) {
            tracing::debug!(name = %entry.name, "Restored NPC shares a name already in use");
        }
        let seed = self.next_seed();
        Npc::spawn(entry.species, entry.name.clone(), entry.position, seed)
    }

    /// Spawn `count` NPCs with uniformly random species and positions inside
    /// the active bounds, each named after its species.
    pub fn spawn_random(&mut self, count: usize) -> Vec<NpcHandle> {
        let mut layout = ChaCha8Rng::seed_from_u64(self.next_seed());
        let mut spawned = Vec::with_capacity(count);
        for _ in 0..count {
            let species = Species::random(&mut layout);
            let x = layout.gen_range(0..self.bounds.width);
            let y = layout.gen_range(0..self.bounds.height);
            match self.create(species, species.display_name(), x, y) {
                Ok(npc) => spawned.push(npc),
                Err(e) => tracing::warn!("Random spawn rejected: {}", e),
            }
        }
        spawned
    }

    fn next_seed(&mut self) -> u64 {
        match &mut self.seeds {
            SeedSource::Entropy => rand::random(),
            SeedSource::Seeded(rng) => rng.gen(),
        }
    }
}

impl Default for NpcFactory {
    fn default() -> Self {
        Self::new(Bounds::EDITOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_are_unique_until_cleared() {
        let mut factory = NpcFactory::default();
        let names: Vec<String> = (0..3)
            .map(|_| factory.create(Species::Frog, "Test", 1, 1).unwrap().name().to_string())
            .collect();
        assert_eq!(names, vec!["Test", "Test1", "Test2"]);

        factory.clear_names();
        let again = factory.create(Species::Frog, "Test", 1, 1).unwrap();
        assert_eq!(again.name(), "Test");
    }

    #[test]
    fn test_bounds_are_half_open() {
        let mut factory = NpcFactory::new(Bounds::EDITOR);
        assert!(factory.create(Species::Bull, "Edge", 499, 499).is_ok());
        assert!(matches!(
            factory.create(Species::Bull, "Over", 500, 0),
            Err(ArenaError::OutOfBounds { x: 500, y: 0, .. })
        ));
        assert!(factory.create(Species::Bull, "Neg", 0, -1).is_err());
        // A rejected create does not consume the name.
        assert!(!factory.names().contains("Over"));
    }

    #[test]
    fn test_quoted_names_rejected() {
        let mut factory = NpcFactory::default();
        assert!(matches!(
            factory.create(Species::Bull, "Big \"K\"", 1, 1),
            Err(ArenaError::InvalidName(_))
        ));
        assert!(factory.names().is_empty());
        assert_eq!(factory.create(Species::Bull, "Big K", 1, 1).unwrap().name(), "Big K");
    }

    #[test]
    fn test_simulation_bounds_reject_editor_coordinates() {
        let mut factory = NpcFactory::new(Bounds::EDITOR);
        assert!(factory.create(Species::Dragon, "Far", 300, 300).is_ok());
        factory.set_bounds(Bounds::SIMULATION);
        assert!(factory.create(Species::Dragon, "Far", 300, 300).is_err());
        assert!(factory.create(Species::Dragon, "Near", 99, 0).is_ok());
    }

    #[test]
    fn test_restore_keeps_name_and_position() {
        let mut factory = NpcFactory::new(Bounds::SIMULATION);
        factory.create(Species::Frog, "Kermit", 1, 1).unwrap();
        let entry = RosterEntry {
            species: Species::Frog,
            position: Position::new(400, 400),
            name: "Kermit".to_string(),
        };
        let npc = factory.restore(&entry);
        assert_eq!(npc.name(), "Kermit");
        assert_eq!(npc.position(), Position::new(400, 400));
        // The next fresh "Kermit" gets a suffix.
        assert_eq!(factory.create(Species::Frog, "Kermit", 1, 1).unwrap().name(), "Kermit1");
    }

    #[test]
    fn test_spawn_random_within_bounds() {
        let mut factory = NpcFactory::with_seed(Bounds::SIMULATION, 7);
        let npcs = factory.spawn_random(200);
        assert_eq!(npcs.len(), 200);
        for npc in &npcs {
            assert!(npc.position().is_within_simulation_bounds());
            assert!(npc.name().starts_with(npc.species().display_name()));
        }
    }

    #[test]
    fn test_seeded_factories_agree() {
        let layout = |seed| {
            NpcFactory::with_seed(Bounds::SIMULATION, seed)
                .spawn_random(20)
                .iter()
                .map(|npc| (npc.species(), npc.position()))
                .collect::<Vec<_>>()
        };
        assert_eq!(layout(11), layout(11));
    }
}
