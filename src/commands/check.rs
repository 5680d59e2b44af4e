//! Guess checking command

use super::fetch_board;
use crate::core::{CARDS_IN_ANSWER, Placement, Score, is_solved, parse_guess};
use crate::error::PuzzleError;
use crate::store::{BoardId, BoardStore};
use serde::Serialize;

/// Scores for one guess against a stored board
#[derive(Debug, Clone, Serialize)]
pub struct CheckResult {
    pub id: BoardId,
    pub num_cards: usize,
    pub guess: Vec<Placement>,
    pub scores: [Score; CARDS_IN_ANSWER],
    pub solved: bool,
}

/// Parse `guess` (`"p:r, p:r, ..."`) and score it against board `id`
///
/// Positions refer to the board's possible cards at size `n`, falling back
/// to the suggested size. Missing trailing placements score as misses.
///
/// # Errors
///
/// Returns an error if:
/// - The guess string is malformed
/// - No board has the given id
/// - No visible pool size can be resolved
pub fn check_board<S: BoardStore>(
    store: &S,
    id: BoardId,
    guess: &str,
    n: Option<usize>,
) -> Result<CheckResult, PuzzleError> {
    let guess = parse_guess(guess)?;
    let board = fetch_board(store, id)?;
    let num_cards = board.resolve_num_cards(n)?;
    let scores = board.check_guess(&guess, Some(num_cards))?;
    let solved = is_solved(&scores);

    tracing::debug!(%id, num_cards, solved, "guess checked");

    Ok(CheckResult {
        id,
        num_cards,
        guess,
        scores,
        solved,
    })
}
