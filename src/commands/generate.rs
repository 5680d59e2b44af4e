//! Board generation command

use crate::core::{Board, BoardMetadata};
use crate::error::PuzzleError;
use crate::generator::BoardGenerator;
use crate::store::{BoardId, BoardStore};
use crate::wordlists::WordPool;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Configuration for generating a board
#[derive(Debug, Clone, Default)]
pub struct GenerateConfig {
    pub metadata: BoardMetadata,
    /// Fixed RNG seed for reproducible boards
    pub seed: Option<u64>,
}

/// A freshly generated and stored board
#[derive(Debug, Clone, Serialize)]
pub struct GenerateResult {
    pub id: BoardId,
    pub board: Board,
}

/// Generate a board from `pool` and insert it into `store`
///
/// # Errors
///
/// Returns an error if:
/// - The pool holds fewer than 80 distinct words
/// - The metadata is invalid
/// - The store rejects the insert
pub fn generate_board<S: BoardStore>(
    store: &S,
    pool: &WordPool,
    config: GenerateConfig,
    now: DateTime<Utc>,
) -> Result<GenerateResult, PuzzleError> {
    let board = match config.seed {
        Some(seed) => BoardGenerator::seeded(pool, seed).create_board(config.metadata, now)?,
        None => BoardGenerator::new(pool).create_board(config.metadata, now)?,
    };

    let id = store.insert(board.clone())?;
    tracing::info!(%id, seeded = config.seed.is_some(), "board created");

    Ok(GenerateResult { id, board })
}
