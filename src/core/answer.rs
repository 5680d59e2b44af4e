//! Answer entries and translated placements
//!
//! An [`AnswerEntry`] points into the full card pool of a board and is never
//! shown to players. A [`Placement`] points into a possible-cards projection
//! and is the only form of the answer that leaves the board.

use super::card::WORDS_PER_CARD;
use crate::error::PuzzleError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One answer slot: a card in the full pool and its word rotation
///
/// Serialized as a `[card_index, rotation]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "(usize, usize)", into = "(usize, usize)")]
pub struct AnswerEntry {
    card_index: usize,
    rotation: usize,
}

impl AnswerEntry {
    /// Create an answer entry
    ///
    /// The card index is checked against the board when the board is built;
    /// only the rotation is checked here.
    ///
    /// # Errors
    /// Returns `PuzzleError::InvalidAnswer` if `rotation >= 4`.
    pub fn new(card_index: usize, rotation: usize) -> Result<Self, PuzzleError> {
        if rotation >= WORDS_PER_CARD {
            return Err(PuzzleError::InvalidAnswer {
                reason: format!("rotation {rotation} is outside 0..{WORDS_PER_CARD}"),
            });
        }
        Ok(Self {
            card_index,
            rotation,
        })
    }

    /// Index into the board's full card pool
    #[inline]
    #[must_use]
    pub const fn card_index(self) -> usize {
        self.card_index
    }

    /// Cyclic left shift applied to the card's words
    #[inline]
    #[must_use]
    pub const fn rotation(self) -> usize {
        self.rotation
    }
}

impl TryFrom<(usize, usize)> for AnswerEntry {
    type Error = PuzzleError;

    fn try_from((card_index, rotation): (usize, usize)) -> Result<Self, Self::Error> {
        Self::new(card_index, rotation)
    }
}

impl From<AnswerEntry> for (usize, usize) {
    fn from(entry: AnswerEntry) -> Self {
        (entry.card_index, entry.rotation)
    }
}

/// A card position within a possible-cards projection plus a rotation
///
/// Used both for the translated answer and for player guesses. Guesses are
/// untrusted, so no range checks are applied; out-of-range values simply
/// never match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(usize, usize)", into = "(usize, usize)")]
pub struct Placement {
    pub position: usize,
    pub rotation: usize,
}

impl Placement {
    #[must_use]
    pub const fn new(position: usize, rotation: usize) -> Self {
        Self { position, rotation }
    }
}

impl From<(usize, usize)> for Placement {
    fn from((position, rotation): (usize, usize)) -> Self {
        Self { position, rotation }
    }
}

impl From<Placement> for (usize, usize) {
    fn from(placement: Placement) -> Self {
        (placement.position, placement.rotation)
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.position, self.rotation)
    }
}

impl FromStr for Placement {
    type Err = PuzzleError;

    /// Parse `"position:rotation"`, e.g. `"3:1"`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason| PuzzleError::InvalidGuess {
            input: s.to_string(),
            reason,
        };

        let (position, rotation) = s
            .trim()
            .split_once(':')
            .ok_or_else(|| invalid("expected position:rotation"))?;

        let position = position
            .trim()
            .parse()
            .map_err(|_| invalid("position is not a number"))?;
        let rotation = rotation
            .trim()
            .parse()
            .map_err(|_| invalid("rotation is not a number"))?;

        Ok(Self { position, rotation })
    }
}

/// Parse a comma-separated guess such as `"4:2, 1:1, 0:1"`
///
/// An empty string is an empty guess.
///
/// # Errors
/// Returns `PuzzleError::InvalidGuess` for the first malformed entry.
pub fn parse_guess(input: &str) -> Result<Vec<Placement>, PuzzleError> {
    input
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::parse)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answer_entry_rejects_bad_rotation() {
        assert!(AnswerEntry::new(5, 3).is_ok());
        assert!(matches!(
            AnswerEntry::new(5, 4),
            Err(PuzzleError::InvalidAnswer { .. })
        ));
    }

    #[test]
    fn answer_entry_serializes_as_pair() {
        let entry = AnswerEntry::new(5, 2).unwrap();
        assert_eq!(serde_json::to_string(&entry).unwrap(), "[5,2]");

        let back: AnswerEntry = serde_json::from_str("[5,2]").unwrap();
        assert_eq!(back, entry);

        assert!(serde_json::from_str::<AnswerEntry>("[5,9]").is_err());
    }

    #[test]
    fn placement_parses() {
        assert_eq!("3:1".parse::<Placement>().unwrap(), Placement::new(3, 1));
        assert_eq!(" 10 : 0 ".parse::<Placement>().unwrap(), Placement::new(10, 0));
        assert!("3".parse::<Placement>().is_err());
        assert!("a:1".parse::<Placement>().is_err());
        assert!("1:b".parse::<Placement>().is_err());
    }

    #[test]
    fn guess_parses_list() {
        let guess = parse_guess("4:2, 1:1,0:1").unwrap();
        assert_eq!(
            guess,
            vec![
                Placement::new(4, 2),
                Placement::new(1, 1),
                Placement::new(0, 1)
            ]
        );
        assert!(parse_guess("").unwrap().is_empty());
        assert!(parse_guess("4:2,x").is_err());
    }

    #[test]
    fn placement_display_round_trips_through_parse() {
        let placement = Placement::new(7, 3);
        assert_eq!(placement.to_string().parse::<Placement>().unwrap(), placement);
    }
}
