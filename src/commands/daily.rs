//! Daily puzzle command

use crate::core::PublicBoard;
use crate::daily::DailySelector;
use crate::error::PuzzleError;
use crate::store::{BoardId, BoardStore};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Today's board as players may see it
///
/// Never carries the full card pool or the stored answer.
#[derive(Debug, Clone, Serialize)]
pub struct DailyResult {
    pub id: BoardId,
    /// True when this call promoted the board, false when it was reused
    pub newly_selected: bool,
    pub daily_set_time: Option<DateTime<Utc>>,
    pub author: String,
    /// Public projection at the suggested size, when the board has one
    pub view: Option<PublicBoard>,
}

/// Select (or reuse) today's board
///
/// # Errors
///
/// Returns `NoEligibleBoard` if nothing can be promoted, or a store error.
pub fn run_daily<S: BoardStore>(store: &S, now: DateTime<Utc>) -> Result<DailyResult, PuzzleError> {
    let daily = DailySelector::new(store).daily(now)?;
    let board = &daily.board;
    let view = match board.suggested_num_cards() {
        Some(n) => Some(board.public_view(Some(n))?),
        None => None,
    };
    Ok(DailyResult {
        id: daily.id,
        newly_selected: daily.newly_selected,
        daily_set_time: board.daily_set_time(),
        author: board.author().to_string(),
        view,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::submit_clues;
    use crate::commands::test_support::{now, store_with_board};
    use crate::core::BoardMetadata;

    fn authored_daily(suggested_num_cards: Option<usize>) -> DailyResult {
        let (store, id) = store_with_board(BoardMetadata::default());
        let metadata = BoardMetadata {
            author: "ivy".into(),
            clues: None,
            suggested_num_cards,
        };
        submit_clues(&store, id, metadata, now()).unwrap();
        run_daily(&store, now()).unwrap()
    }

    #[test]
    fn unauthored_store_has_no_daily() {
        let (store, _) = store_with_board(BoardMetadata::default());
        let err = run_daily(&store, now()).unwrap_err();
        assert!(err.is_no_eligible_board());
    }

    #[test]
    fn daily_includes_public_view() {
        let result = authored_daily(Some(7));
        assert!(result.newly_selected);
        assert_eq!(result.author, "ivy");
        assert_eq!(result.daily_set_time, Some(now()));
        assert_eq!(result.view.map(|v| v.cards.len()), Some(7));
    }

    #[test]
    fn serialized_daily_hides_answer_and_pool() {
        for suggested in [Some(6), None] {
            let json = serde_json::to_value(authored_daily(suggested)).unwrap();
            let text = json.to_string();

            assert!(!text.contains("answer"), "answer leaked: {text}");
            assert!(json.get("board").is_none());
            match &json["view"] {
                serde_json::Value::Null => assert!(suggested.is_none()),
                view => assert_eq!(view["cards"].as_array().map(Vec::len), Some(6)),
            }
        }
    }
}
