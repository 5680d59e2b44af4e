//! Immutable, deduplicated catalog of card words

use crate::core::normalize_word;
use crate::error::PuzzleError;
use rand::Rng;
use rand::seq::index;
use rustc_hash::FxHashSet;

/// Read-only pool of distinct words
///
/// Built once at startup and shared by reference with the generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordPool {
    words: Vec<String>,
}

impl WordPool {
    /// Build a pool, normalizing words and dropping invalid entries and
    /// duplicates
    ///
    /// First occurrence wins, so the pool keeps the source order.
    ///
    /// # Examples
    /// ```
    /// use clover::wordlists::WordPool;
    ///
    /// let pool = WordPool::from_words(["Apple", "apple", "bridge", "two words"]);
    /// assert_eq!(pool.words(), ["apple", "bridge"]);
    /// ```
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = FxHashSet::default();
        let mut pool = Vec::new();
        let mut skipped = 0usize;

        for raw in words {
            match normalize_word(raw.as_ref()) {
                Ok(word) if seen.insert(word.clone()) => pool.push(word),
                Ok(_) => skipped += 1,
                Err(e) => {
                    tracing::warn!(error = %e, "skipping word");
                    skipped += 1;
                }
            }
        }

        if skipped > 0 {
            tracing::debug!(kept = pool.len(), skipped, "word pool deduplicated");
        }

        Self { words: pool }
    }

    /// Words in pool order
    #[must_use]
    pub fn words(&self) -> &[String] {
        &self.words
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Draw `count` distinct words uniformly at random without replacement
    ///
    /// Words come back in draw order.
    ///
    /// # Errors
    /// Returns `PuzzleError::PoolExhausted` if `count` exceeds the pool size.
    pub fn sample_unique<R: Rng + ?Sized>(
        &self,
        count: usize,
        rng: &mut R,
    ) -> Result<Vec<&str>, PuzzleError> {
        if count > self.words.len() {
            return Err(PuzzleError::PoolExhausted {
                requested: count,
                available: self.words.len(),
            });
        }

        Ok(index::sample(rng, self.words.len(), count)
            .into_iter()
            .map(|i| self.words[i].as_str())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn pool() -> WordPool {
        WordPool::from_words(["anchor", "bell", "canoe", "dragon", "eagle", "fork"])
    }

    #[test]
    fn from_words_dedupes_and_normalizes() {
        let pool = WordPool::from_words(["Bell", "anchor", "bell ", "", "anchor"]);
        assert_eq!(pool.words(), ["bell", "anchor"]);
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn sample_unique_returns_distinct_pool_words() {
        let pool = pool();
        let mut rng = StdRng::seed_from_u64(7);
        let drawn = pool.sample_unique(4, &mut rng).unwrap();

        assert_eq!(drawn.len(), 4);
        let distinct: FxHashSet<_> = drawn.iter().collect();
        assert_eq!(distinct.len(), 4);
        assert!(drawn.iter().all(|w| pool.words().iter().any(|p| p == w)));
    }

    #[test]
    fn sample_unique_whole_pool() {
        let pool = pool();
        let mut rng = StdRng::seed_from_u64(1);
        let mut drawn = pool.sample_unique(pool.len(), &mut rng).unwrap();
        drawn.sort_unstable();
        assert_eq!(drawn, ["anchor", "bell", "canoe", "dragon", "eagle", "fork"]);
    }

    #[test]
    fn sample_unique_is_reproducible_with_seed() {
        let pool = pool();
        let a = pool
            .sample_unique(3, &mut StdRng::seed_from_u64(42))
            .unwrap();
        let b = pool
            .sample_unique(3, &mut StdRng::seed_from_u64(42))
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn sample_unique_exhausted() {
        let pool = pool();
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            pool.sample_unique(7, &mut rng),
            Err(PuzzleError::PoolExhausted {
                requested: 7,
                available: 6
            })
        ));
    }

    #[test]
    fn sample_zero_from_empty_pool() {
        let pool = WordPool::from_words(Vec::<String>::new());
        assert!(pool.is_empty());
        let mut rng = StdRng::seed_from_u64(0);
        assert!(pool.sample_unique(0, &mut rng).unwrap().is_empty());
    }
}
