//! Command implementations
//!
//! Each command takes a [`BoardStore`] and returns a plain result struct;
//! printing lives in [`crate::output`].

pub mod check;
pub mod clues;
pub mod daily;
pub mod generate;
pub mod list;
pub mod show;

pub use check::{CheckResult, check_board};
pub use clues::submit_clues;
pub use daily::{DailyResult, run_daily};
pub use generate::{GenerateConfig, GenerateResult, generate_board};
pub use list::{BoardSummary, list_boards};
pub use show::{ShowResult, show_board};

use crate::core::Board;
use crate::error::PuzzleError;
use crate::store::{BoardId, BoardStore};

/// Fetch a board or fail with `BoardNotFound`
fn fetch_board<S: BoardStore>(store: &S, id: BoardId) -> Result<Board, PuzzleError> {
    store
        .get(id)?
        .ok_or(PuzzleError::BoardNotFound { id: id.0 })
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::core::BoardMetadata;
    use crate::store::{BoardId, MemoryBoardStore};
    use crate::wordlists::loader::embedded_pool;
    use chrono::{DateTime, TimeZone, Utc};

    use super::{GenerateConfig, generate_board};

    pub fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 4, 12, 18, 0, 0).unwrap()
    }

    /// A store holding one seeded board with the given metadata
    pub fn store_with_board(metadata: BoardMetadata) -> (MemoryBoardStore, BoardId) {
        let store = MemoryBoardStore::new();
        let config = GenerateConfig {
            metadata,
            seed: Some(42),
        };
        let result = generate_board(&store, &embedded_pool(), config, now()).unwrap();
        (store, result.id)
    }
}
