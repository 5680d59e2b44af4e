//! Core domain types for Clover puzzles
//!
//! Cards, answers, boards and scoring. Everything here is a pure function of
//! its inputs: no I/O, no clocks, no randomness.

mod answer;
mod board;
mod card;
pub mod display_order;
mod history;
mod score;

pub use answer::{AnswerEntry, Placement, parse_guess};
pub use board::{
    Board, BoardMetadata, CARDS_GENERATED, CARDS_IN_ANSWER, MAX_AUTHOR_LEN, MAX_CLUE_LEN,
    PublicBoard,
};
pub use card::{Card, MAX_WORD_LEN, WORDS_PER_CARD, normalize_word};
pub use history::{GuessHistory, GuessRecord, SlotKnowledge};
pub use score::{Score, is_solved, score_guess};
