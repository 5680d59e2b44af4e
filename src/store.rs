//! Board persistence
//!
//! [`BoardStore`] is the boundary to whatever holds boards. Reads and writes
//! that must not interleave with other callers go through
//! [`BoardStore::transaction`], which hands the closure exclusive access to a
//! [`BoardTxn`] view.
//!
//! [`MemoryBoardStore`] keeps boards in memory behind a mutex and can be
//! saved to and loaded from a JSON file. [`JsonBoardFile`] pairs it with an
//! exclusive lock on `<store>.lock` so separate processes sharing one file
//! run their load-modify-save cycles one after another.

use crate::core::Board;
use crate::error::{PuzzleError, StoreError};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use fs4::fs_std::FileExt;
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

/// Store-assigned board identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoardId(pub u64);

impl fmt::Display for BoardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Operations available inside a store transaction
pub trait BoardTxn {
    /// Fetch a board by id
    fn get(&self, id: BoardId) -> Option<Board>;

    /// Overwrite an existing board
    ///
    /// # Errors
    /// Returns `StoreError::Missing` if no board has that id.
    fn put(&mut self, id: BoardId, board: Board) -> Result<(), StoreError>;

    /// Most recently promoted board with `daily_set_time >= since`
    fn latest_daily_since(&self, since: DateTime<Utc>) -> Option<(BoardId, Board)>;

    /// Most recently updated board that has an author and was never daily
    fn latest_daily_candidate(&self) -> Option<(BoardId, Board)>;
}

/// Persistence boundary for boards
pub trait BoardStore {
    /// Insert a new board and return its id
    ///
    /// # Errors
    /// Returns a `StoreError` if the backing store fails.
    fn insert(&self, board: Board) -> Result<BoardId, StoreError>;

    /// Fetch a board by id
    ///
    /// # Errors
    /// Returns a `StoreError` if the backing store fails.
    fn get(&self, id: BoardId) -> Result<Option<Board>, StoreError>;

    /// All boards in id order
    ///
    /// # Errors
    /// Returns a `StoreError` if the backing store fails.
    fn list(&self) -> Result<Vec<(BoardId, Board)>, StoreError>;

    /// Run `f` with exclusive access to the store
    ///
    /// No other transaction observes intermediate state. If `f` returns an
    /// error, every write it made is discarded.
    ///
    /// # Errors
    /// Returns whatever `f` returns.
    fn transaction<T, F>(&self, f: F) -> Result<T, PuzzleError>
    where
        F: FnOnce(&mut dyn BoardTxn) -> Result<T, PuzzleError>;
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct MemoryState {
    next_id: u64,
    boards: BTreeMap<BoardId, Board>,
}

impl BoardTxn for MemoryState {
    fn get(&self, id: BoardId) -> Option<Board> {
        self.boards.get(&id).cloned()
    }

    fn put(&mut self, id: BoardId, board: Board) -> Result<(), StoreError> {
        let slot = self
            .boards
            .get_mut(&id)
            .ok_or(StoreError::Missing { id: id.0 })?;
        *slot = board;
        Ok(())
    }

    fn latest_daily_since(&self, since: DateTime<Utc>) -> Option<(BoardId, Board)> {
        self.boards
            .iter()
            .filter_map(|(id, board)| board.daily_set_time().map(|t| (t, *id, board)))
            .filter(|(t, _, _)| *t >= since)
            .max_by_key(|(t, id, _)| (*t, *id))
            .map(|(_, id, board)| (id, board.clone()))
    }

    fn latest_daily_candidate(&self) -> Option<(BoardId, Board)> {
        self.boards
            .iter()
            .filter(|(_, board)| board.is_daily_candidate())
            .max_by_key(|(id, board)| (board.last_updated_time(), **id))
            .map(|(id, board)| (*id, board.clone()))
    }
}

/// In-memory board store guarded by a mutex
#[derive(Debug, Default)]
pub struct MemoryBoardStore {
    state: Mutex<MemoryState>,
}

impl MemoryBoardStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a store saved with [`MemoryBoardStore::save_json`]
    ///
    /// A missing file yields an empty store.
    ///
    /// # Errors
    /// Returns `StoreError::Io` if the file exists but cannot be read, or
    /// `StoreError::Serde` if its contents are malformed.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "store file absent, starting empty");
            return Ok(Self::new());
        }

        let content = fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let state: MemoryState = serde_json::from_str(&content)?;
        tracing::debug!(path = %path.display(), boards = state.boards.len(), "store loaded");

        Ok(Self {
            state: Mutex::new(state),
        })
    }

    /// Write the store to `path` as JSON
    ///
    /// Writes to a sibling temporary file first and renames it into place.
    ///
    /// # Errors
    /// Returns `StoreError::Io` or `StoreError::Serde` on failure.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<(), StoreError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(&*self.state.lock())?;

        let tmp = path.with_extension("json.tmp");
        let io_err = |source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        };
        fs::write(&tmp, json).map_err(io_err)?;
        fs::rename(&tmp, path).map_err(io_err)?;
        Ok(())
    }
}

/// Exclusive advisory lock on a store's sibling `.lock` file
///
/// Released when dropped.
#[derive(Debug)]
pub struct StoreLock {
    file: File,
    path: PathBuf,
}

impl StoreLock {
    /// Lock file used for the store at `store_path`
    #[must_use]
    pub fn lock_path(store_path: &Path) -> PathBuf {
        let mut name = OsString::from(store_path.as_os_str());
        name.push(".lock");
        PathBuf::from(name)
    }

    fn open(store_path: &Path) -> Result<(File, PathBuf), StoreError> {
        let path = Self::lock_path(store_path);
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .read(true)
            .write(true)
            .open(&path)
            .map_err(|source| StoreError::Io {
                path: path.clone(),
                source,
            })?;
        Ok((file, path))
    }

    /// Block until the lock for `store_path` is held
    ///
    /// # Errors
    /// Returns `StoreError::Io` if the lock file cannot be opened or locked.
    pub fn acquire(store_path: &Path) -> Result<Self, StoreError> {
        let (file, path) = Self::open(store_path)?;
        FileExt::lock_exclusive(&file).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;
        tracing::debug!(lock_path = %path.display(), "store lock acquired");
        Ok(Self { file, path })
    }

    /// Take the lock only if nobody else holds it
    ///
    /// # Errors
    /// Returns `StoreError::Io` on I/O failure; contention is `Ok(None)`.
    pub fn try_acquire(store_path: &Path) -> Result<Option<Self>, StoreError> {
        let (file, path) = Self::open(store_path)?;
        match FileExt::try_lock_exclusive(&file) {
            Ok(true) => Ok(Some(Self { file, path })),
            Ok(false) => {
                tracing::debug!(lock_path = %path.display(), "store lock busy");
                Ok(None)
            }
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }
}

impl Drop for StoreLock {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(&self.file) {
            tracing::warn!(
                lock_path = %self.path.display(),
                error = %e,
                "failed to release store lock"
            );
        }
    }
}

/// A JSON store file opened under its lock
///
/// The lock is taken before the file is read and held until this value is
/// dropped, so a save never overwrites changes another process made after
/// this one loaded.
#[derive(Debug)]
pub struct JsonBoardFile {
    store: MemoryBoardStore,
    path: PathBuf,
    _lock: StoreLock,
}

impl JsonBoardFile {
    /// Lock `path` and load the store it holds
    ///
    /// # Errors
    /// Returns `StoreError::Io` if locking or reading fails, or
    /// `StoreError::Serde` if the file is malformed.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let lock = StoreLock::acquire(&path)?;
        let store = MemoryBoardStore::load_json(&path)?;
        Ok(Self {
            store,
            path,
            _lock: lock,
        })
    }

    #[must_use]
    pub const fn store(&self) -> &MemoryBoardStore {
        &self.store
    }

    /// Write the store back while still holding the lock
    ///
    /// # Errors
    /// See [`MemoryBoardStore::save_json`].
    pub fn save(&self) -> Result<(), StoreError> {
        self.store.save_json(&self.path)
    }
}

impl BoardStore for MemoryBoardStore {
    fn insert(&self, board: Board) -> Result<BoardId, StoreError> {
        let mut state = self.state.lock();
        state.next_id += 1;
        let id = BoardId(state.next_id);
        state.boards.insert(id, board);
        tracing::debug!(%id, "board stored");
        Ok(id)
    }

    fn get(&self, id: BoardId) -> Result<Option<Board>, StoreError> {
        Ok(self.state.lock().boards.get(&id).cloned())
    }

    fn list(&self) -> Result<Vec<(BoardId, Board)>, StoreError> {
        Ok(self
            .state
            .lock()
            .boards
            .iter()
            .map(|(id, board)| (*id, board.clone()))
            .collect())
    }

    fn transaction<T, F>(&self, f: F) -> Result<T, PuzzleError>
    where
        F: FnOnce(&mut dyn BoardTxn) -> Result<T, PuzzleError>,
    {
        let mut state = self.state.lock();
        let before = state.clone();
        let result = f(&mut *state);
        if result.is_err() {
            *state = before;
        }
        result
    }
}
