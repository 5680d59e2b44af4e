//! Board generation
//!
//! Draws eighty distinct words from a [`WordPool`], deals them into twenty
//! cards, and picks a four-card answer with random rotations.

use crate::core::{
    AnswerEntry, Board, BoardMetadata, CARDS_GENERATED, CARDS_IN_ANSWER, Card, WORDS_PER_CARD,
};
use crate::error::PuzzleError;
use crate::wordlists::WordPool;
use chrono::{DateTime, Utc};
use rand::rngs::{StdRng, ThreadRng};
use rand::seq::index;
use rand::{Rng, SeedableRng};

/// Creates boards from a word pool
///
/// Generic over the random source so tests and `--seed` runs are
/// reproducible.
pub struct BoardGenerator<'a, R: Rng> {
    pool: &'a WordPool,
    rng: R,
}

impl<'a> BoardGenerator<'a, ThreadRng> {
    /// Generator backed by the thread-local RNG
    #[must_use]
    pub fn new(pool: &'a WordPool) -> Self {
        Self::with_rng(pool, rand::rng())
    }
}

impl<'a> BoardGenerator<'a, StdRng> {
    /// Generator with a fixed seed
    #[must_use]
    pub fn seeded(pool: &'a WordPool, seed: u64) -> Self {
        Self::with_rng(pool, StdRng::seed_from_u64(seed))
    }
}

impl<'a, R: Rng> BoardGenerator<'a, R> {
    pub const fn with_rng(pool: &'a WordPool, rng: R) -> Self {
        Self { pool, rng }
    }

    /// Create a new board
    ///
    /// Every word on the board is distinct. The answer references four
    /// distinct cards, each with an independent rotation in `0..4`.
    ///
    /// # Errors
    /// - `PoolExhausted` if the pool holds fewer than 80 words
    /// - `InvalidClues` / `InvalidAuthor` if the metadata is malformed
    pub fn create_board(
        &mut self,
        metadata: BoardMetadata,
        now: DateTime<Utc>,
    ) -> Result<Board, PuzzleError> {
        let words = self
            .pool
            .sample_unique(CARDS_GENERATED * WORDS_PER_CARD, &mut self.rng)?;

        let cards: Vec<Card> = words
            .chunks_exact(WORDS_PER_CARD)
            .map(|chunk| {
                Card::from_normalized(std::array::from_fn(|i| chunk[i].to_string()))
            })
            .collect();

        let indices = index::sample(&mut self.rng, CARDS_GENERATED, CARDS_IN_ANSWER);
        let mut answer = [AnswerEntry::new(0, 0)?; CARDS_IN_ANSWER];
        for (slot, card_index) in answer.iter_mut().zip(indices) {
            let rotation = self.rng.random_range(0..WORDS_PER_CARD);
            *slot = AnswerEntry::new(card_index, rotation)?;
        }

        let board = Board::new(cards, answer, metadata, now)?;
        tracing::debug!(author = board.author(), "generated board");
        Ok(board)
    }
}

/// Create a board with the thread-local RNG
///
/// # Errors
/// See [`BoardGenerator::create_board`].
pub fn create_board(
    pool: &WordPool,
    metadata: BoardMetadata,
    now: DateTime<Utc>,
) -> Result<Board, PuzzleError> {
    BoardGenerator::new(pool).create_board(metadata, now)
}
