//! Daily puzzle selection
//!
//! One board per civil day in a fixed UTC-7 zone. The first query after local
//! midnight promotes the most recently updated authored board that has never
//! been daily; later queries that day return the same board.

use crate::core::Board;
use crate::error::PuzzleError;
use crate::store::{BoardId, BoardStore};
use chrono::{DateTime, Duration, FixedOffset, NaiveTime, TimeZone, Utc};

/// Offset of the daily zone from UTC, in seconds west
pub const DAILY_ZONE_WEST_SECS: i32 = 7 * 3600;

/// The fixed zone whose midnight starts a new daily puzzle
pub const DAILY_ZONE: FixedOffset = match FixedOffset::west_opt(DAILY_ZONE_WEST_SECS) {
    Some(zone) => zone,
    None => panic!("daily zone offset must be within one day"),
};

#[must_use]
pub const fn daily_zone() -> FixedOffset {
    DAILY_ZONE
}

/// Start of `now`'s calendar day in `zone`, as an absolute instant
#[must_use]
pub fn day_start(now: DateTime<Utc>, zone: FixedOffset) -> DateTime<Utc> {
    let local_midnight = now
        .with_timezone(&zone)
        .date_naive()
        .and_time(NaiveTime::MIN);
    let utc_midnight = local_midnight - Duration::seconds(i64::from(zone.local_minus_utc()));
    Utc.from_utc_datetime(&utc_midnight)
}

/// The board chosen for today
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyBoard {
    pub id: BoardId,
    pub board: Board,
    /// True when this call promoted the board, false when it was reused
    pub newly_selected: bool,
}

/// Picks and reuses one board per day
pub struct DailySelector<'a, S: BoardStore> {
    store: &'a S,
    zone: FixedOffset,
}

impl<'a, S: BoardStore> DailySelector<'a, S> {
    /// Selector using the standard UTC-7 day boundary
    #[must_use]
    pub fn new(store: &'a S) -> Self {
        Self::with_zone(store, daily_zone())
    }

    #[must_use]
    pub const fn with_zone(store: &'a S, zone: FixedOffset) -> Self {
        Self { store, zone }
    }

    /// Today's board, promoting a new one on the first call of the day
    ///
    /// The lookup and the promotion run in a single store transaction, so
    /// concurrent callers on a new day all receive the same board.
    ///
    /// # Errors
    /// - `NoEligibleBoard` if nothing is daily today and no candidate exists
    /// - `Store` if the backing store fails
    pub fn daily(&self, now: DateTime<Utc>) -> Result<DailyBoard, PuzzleError> {
        let since = day_start(now, self.zone);

        self.store.transaction(|txn| {
            if let Some((id, board)) = txn.latest_daily_since(since) {
                tracing::debug!(%id, "reusing today's daily board");
                return Ok(DailyBoard {
                    id,
                    board,
                    newly_selected: false,
                });
            }

            let Some((id, mut board)) = txn.latest_daily_candidate() else {
                tracing::warn!(%since, "no eligible board for the daily puzzle");
                return Err(PuzzleError::NoEligibleBoard);
            };

            board.set_daily(now);
            txn.put(id, board.clone())?;
            tracing::info!(%id, author = board.author(), "promoted daily board");

            Ok(DailyBoard {
                id,
                board,
                newly_selected: true,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{AnswerEntry, BoardMetadata, CARDS_GENERATED, Card};
    use crate::store::MemoryBoardStore;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    fn board(author: &str, updated: DateTime<Utc>) -> Board {
        let cards = (0..CARDS_GENERATED)
            .map(|i| Card::new([0, 1, 2, 3].map(|j| format!("d{i}w{j}"))).unwrap())
            .collect();
        let answer = [4, 9, 1, 0].map(|i| AnswerEntry::new(i, 1).unwrap());
        let metadata = BoardMetadata {
            author: author.to_string(),
            ..BoardMetadata::default()
        };
        Board::new(cards, answer, metadata, updated).unwrap()
    }

    #[test]
    fn day_start_uses_utc_minus_seven() {
        // 06:59 UTC is still the previous day in UTC-7
        assert_eq!(
            day_start(at(2024, 6, 2, 6, 59), daily_zone()),
            at(2024, 6, 1, 7, 0)
        );
        assert_eq!(
            day_start(at(2024, 6, 2, 7, 0), daily_zone()),
            at(2024, 6, 2, 7, 0)
        );
        assert_eq!(
            day_start(at(2024, 6, 2, 23, 30), daily_zone()),
            at(2024, 6, 2, 7, 0)
        );
    }

    #[test]
    fn daily_zone_is_seven_hours_behind_utc() {
        assert_eq!(daily_zone().local_minus_utc(), -7 * 3600);
        assert_eq!(DAILY_ZONE, daily_zone());
    }

    #[test]
    fn daily_is_idempotent_within_a_day() {
        crate::logging::init_test_logging();
        let store = MemoryBoardStore::new();
        store.insert(board("a", at(2024, 1, 1, 0, 0))).unwrap();
        store.insert(board("b", at(2024, 1, 2, 0, 0))).unwrap();
        let selector = DailySelector::new(&store);

        let first = selector.daily(at(2024, 3, 1, 12, 0)).unwrap();
        assert!(first.newly_selected);
        assert_eq!(first.board.author(), "b");
        assert_eq!(first.board.daily_set_time(), Some(at(2024, 3, 1, 12, 0)));

        let second = selector.daily(at(2024, 3, 2, 6, 0)).unwrap();
        assert!(!second.newly_selected);
        assert_eq!(second.id, first.id);
        assert_eq!(second.board, first.board);
    }

    #[test]
    fn daily_advances_after_local_midnight() {
        let store = MemoryBoardStore::new();
        store.insert(board("a", at(2024, 1, 1, 0, 0))).unwrap();
        store.insert(board("b", at(2024, 1, 2, 0, 0))).unwrap();
        let selector = DailySelector::new(&store);

        let today = selector.daily(at(2024, 3, 1, 12, 0)).unwrap();
        let tomorrow = selector.daily(at(2024, 3, 2, 7, 0)).unwrap();

        assert!(tomorrow.newly_selected);
        assert_ne!(tomorrow.id, today.id);
        assert_eq!(tomorrow.board.author(), "a");
    }

    #[test]
    fn daily_exhaustion_is_an_error() {
        let store = MemoryBoardStore::new();
        store.insert(board("", at(2024, 1, 1, 0, 0))).unwrap();
        store.insert(board("a", at(2024, 1, 1, 0, 0))).unwrap();
        let selector = DailySelector::new(&store);

        selector.daily(at(2024, 3, 1, 12, 0)).unwrap();
        let err = selector.daily(at(2024, 3, 2, 12, 0)).unwrap_err();
        assert!(err.is_no_eligible_board());
    }

    #[test]
    fn empty_store_has_no_daily() {
        let store = MemoryBoardStore::new();
        let err = DailySelector::new(&store)
            .daily(at(2024, 3, 1, 12, 0))
            .unwrap_err();
        assert!(matches!(err, PuzzleError::NoEligibleBoard));
    }

    #[test]
    fn concurrent_first_callers_share_one_board() {
        crate::logging::init_test_logging();
        let store = MemoryBoardStore::new();
        for day in 1..=8 {
            store.insert(board("author", at(2024, 1, day, 0, 0))).unwrap();
        }
        let now = at(2024, 3, 1, 12, 0);

        let ids: Vec<BoardId> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| scope.spawn(|| DailySelector::new(&store).daily(now).unwrap().id))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert!(ids.windows(2).all(|w| w[0] == w[1]));
        let promoted = store
            .list()
            .unwrap()
            .into_iter()
            .filter(|(_, b)| b.daily_set_time().is_some())
            .count();
        assert_eq!(promoted, 1);
    }
}
