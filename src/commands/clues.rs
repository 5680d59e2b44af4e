//! Clue submission command

use crate::core::{Board, BoardMetadata};
use crate::error::PuzzleError;
use crate::store::{BoardId, BoardStore};
use chrono::{DateTime, Utc};

/// Replace a stored board's clues, author and suggested size
///
/// Runs in a store transaction; on any error the stored board is unchanged.
///
/// # Errors
///
/// Returns an error if:
/// - No board has the given id
/// - The metadata fails validation
pub fn submit_clues<S: BoardStore>(
    store: &S,
    id: BoardId,
    metadata: BoardMetadata,
    now: DateTime<Utc>,
) -> Result<Board, PuzzleError> {
    store.transaction(|txn| {
        let mut board = txn.get(id).ok_or(PuzzleError::BoardNotFound { id: id.0 })?;
        board.submit_clues(metadata, now)?;
        txn.put(id, board.clone())?;
        tracing::info!(%id, author = board.author(), "clues submitted");
        Ok(board)
    })
}
