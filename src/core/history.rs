//! Guess history for one board
//!
//! Records every scored guess and derives what the player has learned about
//! each answer slot.

use super::answer::Placement;
use super::board::CARDS_IN_ANSWER;
use super::score::{Score, is_solved};
use serde::{Deserialize, Serialize};

/// One submitted guess and its scores
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessRecord {
    pub guess: Vec<Placement>,
    pub scores: [Score; CARDS_IN_ANSWER],
}

/// Best information known about one answer slot
///
/// `best` is the strongest score seen for the slot. `placements` starts at
/// the guess that first produced it and collects every later guess for the
/// slot, whatever it scored. While every guess so far missed, it holds all
/// of them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SlotKnowledge {
    pub best: Option<Score>,
    pub placements: Vec<Placement>,
}

/// Ordered list of guesses made against a board
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessHistory {
    records: Vec<GuessRecord>,
}

impl GuessHistory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a scored guess
    pub fn push(&mut self, guess: Vec<Placement>, scores: [Score; CARDS_IN_ANSWER]) {
        self.records.push(GuessRecord { guess, scores });
    }

    #[must_use]
    pub fn records(&self) -> &[GuessRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether any recorded guess solved the board
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.records.iter().any(|r| is_solved(&r.scores))
    }

    /// Per-slot knowledge accumulated over all guesses
    #[must_use]
    pub fn position_knowledge(&self) -> [SlotKnowledge; CARDS_IN_ANSWER] {
        let mut knowledge: [SlotKnowledge; CARDS_IN_ANSWER] = Default::default();

        for record in &self.records {
            for (slot, (known, &score)) in knowledge.iter_mut().zip(&record.scores).enumerate() {
                let Some(&placement) = record.guess.get(slot) else {
                    continue;
                };

                let current = known.best.map_or(0, Score::strength);
                if score.strength() > current {
                    known.best = Some(score);
                    known.placements = vec![placement];
                } else {
                    known.best.get_or_insert(score);
                    known.placements.push(placement);
                }
            }
        }

        knowledge
    }
}
