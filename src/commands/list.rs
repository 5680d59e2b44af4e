//! Board listing command

use crate::core::Board;
use crate::error::PuzzleError;
use crate::store::{BoardId, BoardStore};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Answer-free summary of a stored board
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardSummary {
    pub id: BoardId,
    pub author: String,
    pub clue_count: usize,
    pub suggested_num_cards: Option<usize>,
    pub last_updated_time: DateTime<Utc>,
    pub daily_set_time: Option<DateTime<Utc>>,
}

impl BoardSummary {
    fn new(id: BoardId, board: &Board) -> Self {
        Self {
            id,
            author: board.author().to_string(),
            clue_count: board.clues().map_or(0, <[String]>::len),
            suggested_num_cards: board.suggested_num_cards(),
            last_updated_time: board.last_updated_time(),
            daily_set_time: board.daily_set_time(),
        }
    }
}

/// Summaries of every stored board, in id order
///
/// # Errors
///
/// Returns a store error if the boards cannot be read.
pub fn list_boards<S: BoardStore>(store: &S) -> Result<Vec<BoardSummary>, PuzzleError> {
    Ok(store
        .list()?
        .iter()
        .map(|(id, board)| BoardSummary::new(*id, board))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{now, store_with_board};
    use crate::commands::{GenerateConfig, generate_board, submit_clues};
    use crate::core::BoardMetadata;
    use crate::wordlists::loader::embedded_pool;

    #[test]
    fn lists_in_id_order() {
        let (store, first) = store_with_board(BoardMetadata::default());
        let second = generate_board(
            &store,
            &embedded_pool(),
            GenerateConfig::default(),
            now(),
        )
        .unwrap()
        .id;

        let ids: Vec<_> = list_boards(&store).unwrap().iter().map(|s| s.id).collect();
        assert_eq!(ids, [first, second]);
    }

    #[test]
    fn summary_reflects_metadata() {
        let (store, id) = store_with_board(BoardMetadata::default());
        let metadata = BoardMetadata {
            author: "oak".into(),
            clues: Some(vec!["one".into(), "two".into()]),
            suggested_num_cards: Some(9),
        };
        submit_clues(&store, id, metadata, now()).unwrap();

        let summary = &list_boards(&store).unwrap()[0];
        assert_eq!(summary.author, "oak");
        assert_eq!(summary.clue_count, 2);
        assert_eq!(summary.suggested_num_cards, Some(9));
        assert!(summary.daily_set_time.is_none());
    }
}
