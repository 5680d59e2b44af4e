//! Card representation
//!
//! A Card is an ordered group of exactly four words. Card identity is the word
//! sequence itself: two cards are equal only when every word matches in the
//! same order.

use crate::error::PuzzleError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of words printed on each card
pub const WORDS_PER_CARD: usize = 4;

/// Longest word accepted on a card
pub const MAX_WORD_LEN: usize = 20;

/// Normalize and validate a single card word
///
/// Words are trimmed and lowercased. They must be non-empty, contain no
/// whitespace and be at most [`MAX_WORD_LEN`] characters long.
///
/// # Errors
/// Returns `PuzzleError::InvalidWord` when any rule is violated.
///
/// # Examples
/// ```
/// use clover::core::normalize_word;
///
/// assert_eq!(normalize_word("  Anchor ").unwrap(), "anchor");
/// assert!(normalize_word("two words").is_err());
/// ```
pub fn normalize_word(raw: &str) -> Result<String, PuzzleError> {
    let word = raw.trim().to_lowercase();

    let invalid = |reason| PuzzleError::InvalidWord {
        word: raw.to_string(),
        reason,
    };

    if word.is_empty() {
        return Err(invalid("word is empty"));
    }
    if word.chars().count() > MAX_WORD_LEN {
        return Err(invalid("word is longer than 20 characters"));
    }
    if word.chars().any(char::is_whitespace) {
        return Err(invalid("word contains whitespace"));
    }

    Ok(word)
}

/// An ordered group of four words
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Card {
    words: [String; WORDS_PER_CARD],
}

impl Card {
    /// Create a card from exactly four words
    ///
    /// # Errors
    /// Returns `PuzzleError::InvalidCard` if the word count is wrong, or
    /// `PuzzleError::InvalidWord` if a word fails validation.
    ///
    /// # Examples
    /// ```
    /// use clover::core::Card;
    ///
    /// let card = Card::new(["apple", "bridge", "comet", "drum"]).unwrap();
    /// assert_eq!(card.word(2), "comet");
    ///
    /// assert!(Card::new(["apple", "bridge"]).is_err());
    /// ```
    pub fn new<I, S>(words: I) -> Result<Self, PuzzleError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| normalize_word(w.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        let actual = words.len();
        let words: [String; WORDS_PER_CARD] =
            words.try_into().map_err(|_| PuzzleError::InvalidCard {
                expected: WORDS_PER_CARD,
                actual,
            })?;

        Ok(Self { words })
    }

    /// Build a card from words that were already normalized by the word pool
    pub(crate) const fn from_normalized(words: [String; WORDS_PER_CARD]) -> Self {
        Self { words }
    }

    /// Words in printed order
    #[inline]
    #[must_use]
    pub const fn words(&self) -> &[String; WORDS_PER_CARD] {
        &self.words
    }

    /// Word at a specific position (0-3)
    ///
    /// # Panics
    /// Panics if position >= 4
    #[inline]
    #[must_use]
    pub fn word(&self, position: usize) -> &str {
        &self.words[position]
    }

    /// Words cyclically rotated left by `offset`
    ///
    /// Offsets wrap modulo [`WORDS_PER_CARD`].
    #[must_use]
    pub fn rotated_left(&self, offset: usize) -> [&str; WORDS_PER_CARD] {
        std::array::from_fn(|i| self.words[(i + offset) % WORDS_PER_CARD].as_str())
    }
}

impl TryFrom<Vec<String>> for Card {
    type Error = PuzzleError;

    fn try_from(words: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(words)
    }
}

impl From<Card> for Vec<String> {
    fn from(card: Card) -> Self {
        card.words.into()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.words.join(", "))
    }
}
