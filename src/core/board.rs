//! The puzzle board
//!
//! A board owns a pool of twenty cards and a hidden four-card answer. Players
//! never see the full pool: they see a *possible cards* projection of size `n`
//! that always contains the answer cards, and the answer is translated into
//! positions within that projection before any comparison happens.

use super::answer::{AnswerEntry, Placement};
use super::card::{Card, WORDS_PER_CARD};
use super::display_order::sort_for_display;
use super::score::{Score, score_guess};
use crate::error::PuzzleError;
use chrono::{DateTime, Utc};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of cards in a board's answer
pub const CARDS_IN_ANSWER: usize = 4;

/// Number of cards generated for each board
pub const CARDS_GENERATED: usize = 20;

/// Longest clue accepted
pub const MAX_CLUE_LEN: usize = 20;

/// Longest author name accepted
pub const MAX_AUTHOR_LEN: usize = 50;

/// Author-supplied bookkeeping attached to a board
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardMetadata {
    #[serde(default)]
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clues: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_num_cards: Option<usize>,
}

impl BoardMetadata {
    fn validate(&self) -> Result<(), PuzzleError> {
        let author_len = self.author.chars().count();
        if author_len > MAX_AUTHOR_LEN {
            return Err(PuzzleError::InvalidAuthor {
                max: MAX_AUTHOR_LEN,
                actual: author_len,
            });
        }

        if let Some(clues) = &self.clues {
            if clues.len() > CARDS_IN_ANSWER {
                return Err(PuzzleError::InvalidClues {
                    reason: format!("at most {CARDS_IN_ANSWER} clues, got {}", clues.len()),
                });
            }
            if let Some(long) = clues.iter().find(|c| c.chars().count() > MAX_CLUE_LEN) {
                return Err(PuzzleError::InvalidClues {
                    reason: format!("clue '{long}' is longer than {MAX_CLUE_LEN} characters"),
                });
            }
        }

        Ok(())
    }
}

/// A single puzzle instance
///
/// `cards` and `answer` are fixed at construction. Only bookkeeping fields
/// (clues, author, suggested size, daily marker) change afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BoardRecord")]
pub struct Board {
    cards: Vec<Card>,
    answer: [AnswerEntry; CARDS_IN_ANSWER],
    #[serde(flatten)]
    metadata: BoardMetadata,
    created_time: DateTime<Utc>,
    last_updated_time: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    daily_set_time: Option<DateTime<Utc>>,
}

/// Unvalidated serialized form of [`Board`]
#[derive(Deserialize)]
struct BoardRecord {
    cards: Vec<Card>,
    answer: [AnswerEntry; CARDS_IN_ANSWER],
    #[serde(flatten)]
    metadata: BoardMetadata,
    created_time: DateTime<Utc>,
    last_updated_time: DateTime<Utc>,
    #[serde(default)]
    daily_set_time: Option<DateTime<Utc>>,
}

impl TryFrom<BoardRecord> for Board {
    type Error = PuzzleError;

    fn try_from(record: BoardRecord) -> Result<Self, Self::Error> {
        let mut board = Self::new(
            record.cards,
            record.answer,
            record.metadata,
            record.created_time,
        )?;
        board.last_updated_time = record.last_updated_time;
        board.daily_set_time = record.daily_set_time;
        Ok(board)
    }
}

impl Board {
    /// Create a board, validating every structural invariant
    ///
    /// # Errors
    /// - `InvalidCardCount` if there are not exactly 20 cards
    /// - `RepeatedWord` if any word appears twice across the cards
    /// - `InvalidAnswer` if an answer index is out of range or repeated
    /// - `InvalidClues` / `InvalidAuthor` if the metadata is malformed
    pub fn new(
        cards: Vec<Card>,
        answer: [AnswerEntry; CARDS_IN_ANSWER],
        metadata: BoardMetadata,
        now: DateTime<Utc>,
    ) -> Result<Self, PuzzleError> {
        if cards.len() != CARDS_GENERATED {
            return Err(PuzzleError::InvalidCardCount {
                expected: CARDS_GENERATED,
                actual: cards.len(),
            });
        }

        let mut seen_words = FxHashSet::default();
        if let Some(repeated) = cards
            .iter()
            .flat_map(|card| card.words().iter())
            .find(|word| !seen_words.insert(word.as_str()))
        {
            return Err(PuzzleError::RepeatedWord {
                word: repeated.clone(),
            });
        }

        let mut seen_indices = FxHashSet::default();
        for entry in &answer {
            if entry.card_index() >= CARDS_GENERATED {
                return Err(PuzzleError::InvalidAnswer {
                    reason: format!(
                        "card index {} is outside 0..{CARDS_GENERATED}",
                        entry.card_index()
                    ),
                });
            }
            if !seen_indices.insert(entry.card_index()) {
                return Err(PuzzleError::InvalidAnswer {
                    reason: format!("card index {} appears twice", entry.card_index()),
                });
            }
        }

        metadata.validate()?;

        Ok(Self {
            cards,
            answer,
            metadata,
            created_time: now,
            last_updated_time: now,
            daily_set_time: None,
        })
    }

    /// The full card pool, in generation order
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// The raw answer into the full pool
    ///
    /// Only for trusted callers: untrusted callers must receive
    /// [`Board::answer_from_possible_cards`] instead.
    #[must_use]
    pub const fn answer(&self) -> &[AnswerEntry; CARDS_IN_ANSWER] {
        &self.answer
    }

    #[must_use]
    pub fn author(&self) -> &str {
        &self.metadata.author
    }

    #[must_use]
    pub fn clues(&self) -> Option<&[String]> {
        self.metadata.clues.as_deref()
    }

    #[must_use]
    pub const fn suggested_num_cards(&self) -> Option<usize> {
        self.metadata.suggested_num_cards
    }

    #[must_use]
    pub const fn created_time(&self) -> DateTime<Utc> {
        self.created_time
    }

    #[must_use]
    pub const fn last_updated_time(&self) -> DateTime<Utc> {
        self.last_updated_time
    }

    #[must_use]
    pub const fn daily_set_time(&self) -> Option<DateTime<Utc>> {
        self.daily_set_time
    }

    /// Whether this board may be promoted to a daily puzzle
    ///
    /// Candidates have an author and have never been a daily puzzle.
    #[must_use]
    pub fn is_daily_candidate(&self) -> bool {
        !self.metadata.author.is_empty() && self.daily_set_time.is_none()
    }

    /// Answer cards with their rotation applied, in answer order
    #[must_use]
    pub fn answer_cards(&self) -> [[&str; WORDS_PER_CARD]; CARDS_IN_ANSWER] {
        self.answer
            .map(|entry| self.cards[entry.card_index()].rotated_left(entry.rotation()))
    }

    /// Word pairs each clue must connect
    ///
    /// Clue `i` sits between the second word of rotated answer card `i` and
    /// the first word of rotated answer card `i + 1`, wrapping around.
    #[must_use]
    pub fn clue_word_pairs(&self) -> [(&str, &str); CARDS_IN_ANSWER] {
        let answer_cards = self.answer_cards();
        std::array::from_fn(|i| {
            let next = (i + 1) % CARDS_IN_ANSWER;
            (answer_cards[i][1], answer_cards[next][0])
        })
    }

    /// The player-visible projection of the board for a pool of `n` cards
    ///
    /// Always contains all four answer cards plus the first `n - 4`
    /// non-answer cards in board order (clamped to `0..=16`), sorted into a
    /// stable content-derived display order. The result depends only on
    /// `(cards, answer, n)`.
    #[must_use]
    pub fn possible_cards(&self, n: usize) -> Vec<Card> {
        let answer_cards: Vec<&Card> = self
            .answer
            .iter()
            .map(|entry| &self.cards[entry.card_index()])
            .collect();

        let num_non_answer = n
            .saturating_sub(CARDS_IN_ANSWER)
            .min(self.cards.len() - CARDS_IN_ANSWER);

        let non_answer = self
            .cards
            .iter()
            .filter(|card| !answer_cards.contains(card))
            .take(num_non_answer);

        let mut visible: Vec<Card> = answer_cards
            .iter()
            .copied()
            .chain(non_answer)
            .cloned()
            .collect();

        sort_for_display(&mut visible);
        visible
    }

    /// [`Board::possible_cards`] at the suggested size, if one is set
    #[must_use]
    pub fn suggested_possible_cards(&self) -> Option<Vec<Card>> {
        self.suggested_num_cards().map(|n| self.possible_cards(n))
    }

    /// The answer expressed as positions within `possible_cards(n)`
    ///
    /// Answer order and rotations are preserved.
    ///
    /// # Errors
    /// Returns `PuzzleError::CardNotFound` if an answer card is missing from
    /// the projection. That would mean `possible_cards` is broken.
    pub fn answer_from_possible_cards(
        &self,
        n: usize,
    ) -> Result<[Placement; CARDS_IN_ANSWER], PuzzleError> {
        let possible = self.possible_cards(n);

        let mut translated = [Placement::new(0, 0); CARDS_IN_ANSWER];
        for (slot, entry) in translated.iter_mut().zip(&self.answer) {
            let target = &self.cards[entry.card_index()];
            let position = possible.iter().position(|card| card == target).ok_or_else(|| {
                tracing::error!(
                    card_index = entry.card_index(),
                    visible = n,
                    "answer card missing from possible cards"
                );
                PuzzleError::CardNotFound {
                    card_index: entry.card_index(),
                    visible: n,
                }
            })?;
            *slot = Placement::new(position, entry.rotation());
        }

        Ok(translated)
    }

    /// [`Board::answer_from_possible_cards`] at the suggested size, if one is set
    ///
    /// # Errors
    /// Propagates `CardNotFound` from the translation.
    pub fn answer_from_suggested_cards(
        &self,
    ) -> Result<Option<[Placement; CARDS_IN_ANSWER]>, PuzzleError> {
        self.suggested_num_cards()
            .map(|n| self.answer_from_possible_cards(n))
            .transpose()
    }

    /// Resolve the visible pool size: explicit `n` first, then the suggestion
    ///
    /// # Errors
    /// Returns `PuzzleError::MissingVisiblePoolSize` when neither is set.
    pub fn resolve_num_cards(&self, n: Option<usize>) -> Result<usize, PuzzleError> {
        n.or(self.suggested_num_cards())
            .ok_or(PuzzleError::MissingVisiblePoolSize)
    }

    /// Score a guess against the answer translated for the visible pool size
    ///
    /// # Errors
    /// - `MissingVisiblePoolSize` if `n` is `None` and no size is suggested
    /// - `CardNotFound` if the translation fails
    pub fn check_guess(
        &self,
        guess: &[Placement],
        n: Option<usize>,
    ) -> Result<[Score; CARDS_IN_ANSWER], PuzzleError> {
        let n = self.resolve_num_cards(n)?;
        let answer = self.answer_from_possible_cards(n)?;
        Ok(score_guess(&answer, guess))
    }

    /// Replace the author's clues, name and suggested pool size
    ///
    /// # Errors
    /// Returns `InvalidClues` or `InvalidAuthor` and leaves the board untouched.
    pub fn submit_clues(
        &mut self,
        metadata: BoardMetadata,
        now: DateTime<Utc>,
    ) -> Result<(), PuzzleError> {
        metadata.validate()?;
        self.metadata = metadata;
        self.last_updated_time = now;
        Ok(())
    }

    /// Mark the board as the daily puzzle
    pub(crate) fn set_daily(&mut self, now: DateTime<Utc>) {
        self.daily_set_time = Some(now);
    }

    /// The projection safe to hand to players
    ///
    /// # Errors
    /// Returns `MissingVisiblePoolSize` when `n` cannot be resolved.
    pub fn public_view(&self, n: Option<usize>) -> Result<PublicBoard, PuzzleError> {
        let num_cards = self.resolve_num_cards(n)?;
        Ok(PublicBoard {
            num_cards,
            cards: self.possible_cards(num_cards),
            clues: self.metadata.clues.clone(),
            author: self.metadata.author.clone(),
            suggested_num_cards: self.suggested_num_cards(),
        })
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}'s game with clues: {:?} and answer: {:?}",
            self.metadata.author,
            self.clues(),
            self.answer_cards()
        )
    }
}

/// What a player may see of a board
///
/// Carries no answer information beyond the shuffled possible cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicBoard {
    pub num_cards: usize,
    pub cards: Vec<Card>,
    pub clues: Option<Vec<String>>,
    pub author: String,
    pub suggested_num_cards: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    fn cards() -> Vec<Card> {
        (0..CARDS_GENERATED)
            .map(|i| Card::new([0, 1, 2, 3].map(|j| format!("w{i}x{j}"))).unwrap())
            .collect()
    }

    fn answer() -> [AnswerEntry; CARDS_IN_ANSWER] {
        [(5, 2), (2, 1), (0, 1), (3, 0)].map(|(i, r)| AnswerEntry::new(i, r).unwrap())
    }

    fn board() -> Board {
        Board::new(cards(), answer(), BoardMetadata::default(), now()).unwrap()
    }

    #[test]
    fn new_rejects_wrong_card_count() {
        let mut short = cards();
        short.pop();
        assert!(matches!(
            Board::new(short, answer(), BoardMetadata::default(), now()),
            Err(PuzzleError::InvalidCardCount {
                expected: 20,
                actual: 19
            })
        ));
    }

    #[test]
    fn new_rejects_out_of_range_answer() {
        let mut bad = answer();
        bad[1] = AnswerEntry::new(20, 0).unwrap();
        assert!(matches!(
            Board::new(cards(), bad, BoardMetadata::default(), now()),
            Err(PuzzleError::InvalidAnswer { .. })
        ));
    }

    #[test]
    fn new_rejects_repeated_answer_index() {
        let mut bad = answer();
        bad[3] = AnswerEntry::new(5, 0).unwrap();
        assert!(matches!(
            Board::new(cards(), bad, BoardMetadata::default(), now()),
            Err(PuzzleError::InvalidAnswer { .. })
        ));
    }

    #[test]
    fn new_rejects_duplicate_cards() {
        let mut dup = cards();
        dup[7] = dup[6].clone();
        assert!(matches!(
            Board::new(dup, answer(), BoardMetadata::default(), now()),
            Err(PuzzleError::RepeatedWord { .. })
        ));
    }

    #[test]
    fn new_rejects_word_shared_between_cards() {
        let shared: Vec<Card> = (0..CARDS_GENERATED)
            .map(|i| {
                Card::new([
                    "shared".to_string(),
                    format!("a{i}"),
                    format!("b{i}"),
                    format!("c{i}"),
                ])
                .unwrap()
            })
            .collect();
        let err = Board::new(shared, answer(), BoardMetadata::default(), now()).unwrap_err();
        assert!(matches!(err, PuzzleError::RepeatedWord { ref word } if word == "shared"));

        let mut one_repeat = cards();
        one_repeat[19] = Card::new(["w3x2", "fresh1", "fresh2", "fresh3"]).unwrap();
        assert!(matches!(
            Board::new(one_repeat, answer(), BoardMetadata::default(), now()),
            Err(PuzzleError::RepeatedWord { ref word }) if word == "w3x2"
        ));
    }

    #[test]
    fn loading_rejects_repeated_words() {
        let mut json = serde_json::to_value(board()).unwrap();
        json["cards"][19][0] = serde_json::json!("w0x0");
        assert!(serde_json::from_value::<Board>(json).is_err());
    }

    #[test]
    fn answer_cards_apply_rotation() {
        let board = board();
        let answer_cards = board.answer_cards();
        assert_eq!(answer_cards[0], ["w5x2", "w5x3", "w5x0", "w5x1"]);
        assert_eq!(answer_cards[1], ["w2x1", "w2x2", "w2x3", "w2x0"]);
        assert_eq!(answer_cards[3], ["w3x0", "w3x1", "w3x2", "w3x3"]);
    }

    #[test]
    fn clue_pairs_wrap_around() {
        let b = board();
        let pairs = b.clue_word_pairs();
        assert_eq!(pairs[0], ("w5x3", "w2x1"));
        assert_eq!(pairs[1], ("w2x2", "w0x1"));
        assert_eq!(pairs[3], ("w3x1", "w5x2"));
    }

    #[test]
    fn possible_cards_size_law() {
        let board = board();
        assert_eq!(board.possible_cards(0).len(), 4);
        assert_eq!(board.possible_cards(4).len(), 4);
        assert_eq!(board.possible_cards(5).len(), 5);
        assert_eq!(board.possible_cards(12).len(), 12);
        assert_eq!(board.possible_cards(20).len(), 20);
        assert_eq!(board.possible_cards(500).len(), 20);
    }

    #[test]
    fn possible_cards_takes_non_answer_cards_in_board_order() {
        let board = board();
        let possible = board.possible_cards(6);
        // Non-answer cards in board order are 1, 4, 6, ...
        let cards = board.cards();
        assert!(possible.contains(&cards[1]));
        assert!(possible.contains(&cards[4]));
        assert!(!possible.contains(&cards[6]));
    }

    #[test]
    fn possible_cards_full_board_is_a_permutation() {
        let board = board();
        let mut possible = board.possible_cards(CARDS_GENERATED);
        let mut all = board.cards().to_vec();
        possible.sort();
        all.sort();
        assert_eq!(possible, all);
    }

    #[test]
    fn possible_cards_is_deterministic() {
        let board = board();
        assert_eq!(board.possible_cards(9), board.possible_cards(9));
        assert_eq!(board.possible_cards(9), board.clone().possible_cards(9));
    }

    #[test]
    fn translated_answer_points_at_answer_cards() {
        let board = board();
        for n in [0, 4, 7, 20] {
            let possible = board.possible_cards(n);
            let translated = board.answer_from_possible_cards(n).unwrap();
            for (placement, entry) in translated.iter().zip(board.answer()) {
                assert_eq!(possible[placement.position], board.cards()[entry.card_index()]);
                assert_eq!(placement.rotation, entry.rotation());
            }
        }
    }

    #[test]
    fn check_guess_scenarios() {
        let board = board();
        let t = board.answer_from_possible_cards(8).unwrap();

        let scores = board.check_guess(&t, Some(8)).unwrap();
        assert_eq!(scores.map(Score::code), [1, 1, 1, 1]);

        let mut guess = t;
        guess[0].rotation = 1;
        let scores = board.check_guess(&guess, Some(8)).unwrap();
        assert_eq!(scores.map(Score::code), [2, 1, 1, 1]);

        let scores = board.check_guess(&[t[0]], Some(8)).unwrap();
        assert_eq!(scores.map(Score::code), [1, 0, 0, 0]);
    }

    #[test]
    fn check_guess_requires_pool_size() {
        let board = board();
        assert!(matches!(
            board.check_guess(&[], None),
            Err(PuzzleError::MissingVisiblePoolSize)
        ));
        assert!(board.answer_from_suggested_cards().unwrap().is_none());
        assert!(board.suggested_possible_cards().is_none());
    }

    #[test]
    fn check_guess_falls_back_to_suggested_size() {
        let mut board = board();
        let metadata = BoardMetadata {
            author: "mark".into(),
            clues: Some(vec!["fruit".into(); 4]),
            suggested_num_cards: Some(6),
        };
        board.submit_clues(metadata, now()).unwrap();

        let t = board.answer_from_suggested_cards().unwrap().unwrap();
        assert_eq!(t, board.answer_from_possible_cards(6).unwrap());
        assert_eq!(board.check_guess(&t, None).unwrap(), [Score::Exact; 4]);
        assert_eq!(board.suggested_possible_cards().unwrap().len(), 6);
    }

    #[test]
    fn submit_clues_validates_and_bumps_update_time() {
        let mut board = board();
        let later = now() + chrono::Duration::minutes(3);

        let too_many = BoardMetadata {
            clues: Some(vec!["a".into(); 5]),
            ..BoardMetadata::default()
        };
        assert!(board.submit_clues(too_many, later).is_err());
        assert_eq!(board.last_updated_time(), now());

        let long_author = BoardMetadata {
            author: "x".repeat(51),
            ..BoardMetadata::default()
        };
        assert!(matches!(
            board.submit_clues(long_author, later),
            Err(PuzzleError::InvalidAuthor { .. })
        ));

        let ok = BoardMetadata {
            author: "mark".into(),
            clues: Some(vec!["sky".into(), String::new()]),
            suggested_num_cards: Some(5),
        };
        board.submit_clues(ok, later).unwrap();
        assert_eq!(board.last_updated_time(), later);
        assert_eq!(board.author(), "mark");
        assert_eq!(board.created_time(), now());
    }

    #[test]
    fn daily_candidate_requires_author_and_no_daily_time() {
        let mut board = board();
        assert!(!board.is_daily_candidate());

        let metadata = BoardMetadata {
            author: "mark".into(),
            ..BoardMetadata::default()
        };
        board.submit_clues(metadata, now()).unwrap();
        assert!(board.is_daily_candidate());

        board.set_daily(now());
        assert!(!board.is_daily_candidate());
    }

    #[test]
    fn public_view_hides_answer() {
        let board = board();
        let view = board.public_view(Some(7)).unwrap();
        assert_eq!(view.num_cards, 7);
        assert_eq!(view.cards, board.possible_cards(7));

        let json = serde_json::to_value(&view).unwrap();
        assert!(json.get("answer").is_none());
    }

    #[test]
    fn serde_round_trip_revalidates() {
        let board = board();
        let json = serde_json::to_string(&board).unwrap();
        let back: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(back, board);

        let mut value: serde_json::Value = serde_json::from_str(&json).unwrap();
        value["answer"][0] = serde_json::json!([30, 0]);
        assert!(serde_json::from_value::<Board>(value).is_err());
    }

    #[test]
    fn display_lists_author_and_answer() {
        let text = board().to_string();
        assert!(text.starts_with("'s game with clues: None and answer: "));
        assert!(text.contains("w5x2"));
    }
}
