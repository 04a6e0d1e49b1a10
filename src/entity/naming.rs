//! Display-name disambiguation

use ahash::AHashSet;

/// Naming scope that hands out unique display names.
///
/// The scope outlives individual NPCs: a name stays taken after its owner
/// dies, until the scope is cleared on a full reset.
#[derive(Debug, Default)]
pub struct NameRegistry {
    used: AHashSet<String>,
}

impl NameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return `base` if free, otherwise `base` followed by the smallest
    /// positive integer that yields an unused name. The result is reserved.
    pub fn unique(&mut self, base: &str) -> String {
        let mut name = base.to_string();
        let mut counter = 1u32;
        while self.used.contains(&name) {
            name = format!("{base}{counter}");
            counter += 1;
        }
        self.used.insert(name.clone());
        name
    }

    /// Mark an exact name as taken. Returns false if it already was.
    pub fn reserve(&mut self, name: &str) -> bool {
        self.used.insert(name.to_string())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.used.contains(name)
    }

    pub fn len(&self) -> usize {
        self.used.len()
    }

    pub fn is_empty(&self) -> bool {
        self.used.is_empty()
    }

    pub fn clear(&mut self) {
        self.used.clear();
    }
}
