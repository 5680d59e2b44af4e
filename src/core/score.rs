//! Guess scoring
//!
//! Each answer slot is scored independently against the guess entry at the
//! same slot:
//! - 0 = Miss (no guess for the slot, or wrong card)
//! - 1 = Exact (right card, right rotation)
//! - 2 = Partial (right card, wrong rotation)

use super::answer::Placement;
use serde::{Deserialize, Serialize};

/// Score for one answer slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Score {
    Miss,
    Exact,
    Partial,
}

impl Score {
    /// Wire code of the score (0, 1 or 2)
    #[inline]
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Miss => 0,
            Self::Exact => 1,
            Self::Partial => 2,
        }
    }

    /// Decode a wire code
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Miss),
            1 => Some(Self::Exact),
            2 => Some(Self::Partial),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_exact(self) -> bool {
        matches!(self, Self::Exact)
    }

    /// Rank used when keeping the best result per slot: Exact beats Partial
    /// beats Miss.
    pub(crate) const fn strength(self) -> u8 {
        match self {
            Self::Miss => 0,
            Self::Partial => 1,
            Self::Exact => 2,
        }
    }
}

impl From<Score> for u8 {
    fn from(score: Score) -> Self {
        score.code()
    }
}

impl TryFrom<u8> for Score {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::from_code(code).ok_or_else(|| format!("unknown score code {code}"))
    }
}

/// Score `guess` against a translated `answer`, slot by slot
///
/// Slots beyond the end of the guess score as misses. Extra guess entries are
/// ignored.
///
/// # Examples
/// ```
/// use clover::core::{Placement, Score, score_guess};
///
/// let answer = [Placement::new(3, 2), Placement::new(1, 1)];
/// let guess = [Placement::new(3, 0)];
///
/// assert_eq!(score_guess(&answer, &guess), [Score::Partial, Score::Miss]);
/// ```
#[must_use]
pub fn score_guess<const N: usize>(answer: &[Placement; N], guess: &[Placement]) -> [Score; N] {
    std::array::from_fn(|i| match guess.get(i) {
        None => Score::Miss,
        Some(g) if *g == answer[i] => Score::Exact,
        Some(g) if g.position == answer[i].position => Score::Partial,
        Some(_) => Score::Miss,
    })
}

/// True when every slot scored an exact match
#[must_use]
pub fn is_solved(scores: &[Score]) -> bool {
    !scores.is_empty() && scores.iter().all(|s| s.is_exact())
}
