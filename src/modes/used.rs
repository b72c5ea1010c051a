//! Avoid-repeat drawing.
//!
//! Draw uniformly from the pool; while the pick was already asked, redraw,
//! up to `max_attempts` draws in total. If every attempt collides, or the
//! used-set already covers the pool, the set is cleared and the last draw is
//! accepted. Termination is guaranteed; the cost is a rare immediate repeat
//! right after a clear.

use log::warn;
use rustc_hash::FxHashSet;

use crate::core::{Country, GameRng};

/// Names of the countries already asked this session.
#[derive(Clone, Debug, Default)]
pub struct UsedSet {
    names: FxHashSet<String>,
}

impl UsedSet {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn clear(&mut self) {
        self.names.clear();
    }

    /// Mark a country as asked.
    pub fn insert(&mut self, name: &str) {
        self.names.insert(name.to_string());
    }

    /// Draw a country from `pool`, avoiding repeats. `None` only if `pool` is empty.
    pub fn draw<'a>(
        &mut self,
        rng: &mut GameRng,
        pool: &[&'a Country],
        max_attempts: u32,
    ) -> Option<&'a Country> {
        if pool.is_empty() {
            return None;
        }
        if self.names.len() >= pool.len() {
            self.names.clear();
        }

        let mut pick = pool[rng.gen_index(pool.len())];
        let mut attempts = 1;
        while self.contains(&pick.name) && attempts < max_attempts {
            pick = pool[rng.gen_index(pool.len())];
            attempts += 1;
        }

        if self.contains(&pick.name) {
            warn!(
                "No unused country after {} draws; clearing {} used entries",
                attempts,
                self.names.len()
            );
            self.names.clear();
        }

        self.insert(&pick.name);
        Some(pick)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool(names: &[&str]) -> Vec<Country> {
        names.iter().map(|n| Country::new(*n)).collect()
    }

    #[test]
    fn test_empty_pool() {
        let mut used = UsedSet::new();
        let mut rng = GameRng::new(1);
        assert!(used.draw(&mut rng, &[], 100).is_none());
    }

    #[test]
    fn test_draws_cover_pool_without_repeat() {
        let countries = pool(&["A", "B", "C", "D", "E"]);
        let refs: Vec<&Country> = countries.iter().collect();
        let mut used = UsedSet::new();
        let mut rng = GameRng::new(42);

        let mut seen = Vec::new();
        for _ in 0..5 {
            let pick = used.draw(&mut rng, &refs, 100).unwrap();
            assert!(!seen.contains(&pick.name), "{} repeated", pick.name);
            seen.push(pick.name.clone());
        }
        assert_eq!(used.len(), 5);
    }

    #[test]
    fn test_clears_when_pool_covered() {
        let countries = pool(&["A", "B"]);
        let refs: Vec<&Country> = countries.iter().collect();
        let mut used = UsedSet::new();
        let mut rng = GameRng::new(7);

        used.draw(&mut rng, &refs, 100);
        used.draw(&mut rng, &refs, 100);
        assert_eq!(used.len(), 2);

        used.draw(&mut rng, &refs, 100);
        assert_eq!(used.len(), 1);
    }

    #[test]
    fn test_single_attempt_collision_clears() {
        let countries = pool(&["A", "B", "C"]);
        let refs: Vec<&Country> = countries.iter().collect();
        let mut used = UsedSet::new();
        used.insert("A");
        used.insert("B");
        let mut rng = GameRng::new(0);

        // One attempt: either the draw is "C", or it collides and the set resets.
        let pick = used.draw(&mut rng, &refs, 1).unwrap();
        if pick.name == "C" {
            assert_eq!(used.len(), 3);
        } else {
            assert_eq!(used.len(), 1);
            assert!(used.contains(&pick.name));
        }
    }
}
