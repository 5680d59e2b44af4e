//! Error types for board generation, projection, scoring and storage.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the puzzle core.
#[derive(Debug, Error)]
pub enum PuzzleError {
    // === Generation ===
    /// The word pool cannot supply enough distinct words.
    #[error("word pool exhausted: requested {requested} distinct words, pool has {available}")]
    PoolExhausted { requested: usize, available: usize },

    // === Projection and scoring ===
    /// An answer card is missing from the possible-cards projection.
    ///
    /// This is an internal invariant breach, never a user error.
    #[error("answer card {card_index} missing from possible cards (n = {visible})")]
    CardNotFound { card_index: usize, visible: usize },

    /// Neither an explicit visible-pool size nor a suggested one was available.
    #[error("no visible pool size given and the board has no suggested_num_cards")]
    MissingVisiblePoolSize,

    // === Daily selection ===
    /// No board qualifies for promotion to today's puzzle.
    #[error("no eligible board for the daily puzzle")]
    NoEligibleBoard,

    // === Validation ===
    /// A word failed validation.
    #[error("invalid word '{word}': {reason}")]
    InvalidWord { word: String, reason: &'static str },

    /// A card does not hold exactly the expected number of words.
    #[error("card must have exactly {expected} words, got {actual}")]
    InvalidCard { expected: usize, actual: usize },

    /// A word appears more than once across a board's cards.
    #[error("word '{word}' appears more than once on the board")]
    RepeatedWord { word: String },

    /// A board does not hold exactly the expected number of cards.
    #[error("board must have exactly {expected} cards, got {actual}")]
    InvalidCardCount { expected: usize, actual: usize },

    /// The answer does not reference valid, distinct cards.
    #[error("invalid answer: {reason}")]
    InvalidAnswer { reason: String },

    /// Clues failed validation.
    #[error("invalid clues: {reason}")]
    InvalidClues { reason: String },

    /// Author failed validation.
    #[error("author must be at most {max} characters, got {actual}")]
    InvalidAuthor { max: usize, actual: usize },

    /// A guess could not be parsed.
    #[error("invalid guess '{input}': {reason}")]
    InvalidGuess { input: String, reason: &'static str },

    // === Lookup ===
    /// No board is stored under the given id.
    #[error("board {id} not found")]
    BoardNotFound { id: u64 },

    /// Word list file could not be read.
    #[error("failed to read word list {path}: {source}")]
    WordListRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failure in the backing board or snapshot store.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl PuzzleError {
    /// True when daily selection simply found nothing to promote.
    ///
    /// Distinguishes the expected empty result from infrastructure failures.
    #[must_use]
    pub const fn is_no_eligible_board(&self) -> bool {
        matches!(self, Self::NoEligibleBoard)
    }
}

/// Errors raised by board persistence.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Store file could not be read or written.
    #[error("store I/O failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Store contents could not be (de)serialized.
    #[error("store data is malformed: {0}")]
    Serde(#[from] serde_json::Error),

    /// A write targeted a board the store does not hold.
    #[error("board {id} is missing from the store")]
    Missing { id: u64 },
}

/// Result alias for the puzzle core.
pub type Result<T, E = PuzzleError> = std::result::Result<T, E>;
