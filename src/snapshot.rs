//! Client state snapshots
//!
//! Clients playing the same board periodically upload an opaque blob of their
//! in-progress state. The core never looks inside it; it only decides which
//! snapshot is still relevant and whether a client should push or pull.

use crate::store::BoardId;
use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// How long a snapshot stays relevant
pub const SNAPSHOT_WINDOW_MINUTES: i64 = 5;

/// Opaque per-board, per-client state blob
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientStateSnapshot {
    pub board: BoardId,
    pub created_time: DateTime<Utc>,
    pub data: serde_json::Value,
    pub client_id: String,
}

/// What a client should do with its local state
#[derive(Debug, Clone, PartialEq)]
pub enum SyncAction {
    /// Upload local state; nobody else has written recently
    Push,
    /// Replace local state with another client's newer snapshot
    Pull(ClientStateSnapshot),
}

/// Decide whether `client_id` should push its state or pull `latest`
#[must_use]
pub fn sync_action(latest: Option<ClientStateSnapshot>, client_id: &str) -> SyncAction {
    match latest {
        Some(snapshot) if snapshot.client_id != client_id => SyncAction::Pull(snapshot),
        _ => SyncAction::Push,
    }
}

/// Append-only snapshot store
#[derive(Debug, Default)]
pub struct SnapshotStore {
    snapshots: Mutex<Vec<ClientStateSnapshot>>,
}

impl SnapshotStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a snapshot
    pub fn insert(
        &self,
        board: BoardId,
        data: serde_json::Value,
        client_id: impl Into<String>,
        now: DateTime<Utc>,
    ) {
        let client_id = client_id.into();
        tracing::debug!(%board, client_id = %client_id, "client state stored");
        self.snapshots.lock().push(ClientStateSnapshot {
            board,
            created_time: now,
            data,
            client_id,
        });
    }

    /// Most recent snapshot for `board` created within the last five minutes
    ///
    /// Later inserts win over earlier ones.
    #[must_use]
    pub fn latest(&self, board: BoardId, now: DateTime<Utc>) -> Option<ClientStateSnapshot> {
        let cutoff = now - Duration::minutes(SNAPSHOT_WINDOW_MINUTES);
        self.snapshots
            .lock()
            .iter()
            .rev()
            .find(|s| s.board == board && s.created_time >= cutoff)
            .cloned()
    }

    /// Drop snapshots that can no longer be returned by [`SnapshotStore::latest`]
    ///
    /// Returns how many were removed.
    pub fn prune(&self, now: DateTime<Utc>) -> usize {
        let cutoff = now - Duration::minutes(SNAPSHOT_WINDOW_MINUTES);
        let mut snapshots = self.snapshots.lock();
        let before = snapshots.len();
        snapshots.retain(|s| s.created_time >= cutoff);
        before - snapshots.len()
    }
}
