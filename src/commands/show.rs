//! Public board projection command

use super::fetch_board;
use crate::core::PublicBoard;
use crate::error::PuzzleError;
use crate::store::{BoardId, BoardStore};
use serde::Serialize;

/// What a player sees of a stored board
#[derive(Debug, Clone, Serialize)]
pub struct ShowResult {
    pub id: BoardId,
    pub view: PublicBoard,
}

/// Project a stored board for `n` visible cards (or its suggested size)
///
/// # Errors
///
/// Returns an error if:
/// - No board has the given id
/// - `n` is `None` and the board has no suggested size
pub fn show_board<S: BoardStore>(
    store: &S,
    id: BoardId,
    n: Option<usize>,
) -> Result<ShowResult, PuzzleError> {
    let board = fetch_board(store, id)?;
    let view = board.public_view(n)?;
    Ok(ShowResult { id, view })
}
