//! Word list loading utilities
//!
//! Builds a [`WordPool`] from a file or from the embedded constant.

use super::{WORDS, WordPool};
use crate::error::PuzzleError;
use std::fs;
use std::path::Path;

/// Load a word pool from a file with one word per line
///
/// Blank lines are ignored; invalid and duplicate words are skipped.
///
/// # Errors
///
/// Returns `PuzzleError::WordListRead` if the file cannot be read.
///
/// # Examples
/// ```no_run
/// use clover::wordlists::loader::load_from_file;
///
/// let pool = load_from_file("data/words.txt").unwrap();
/// println!("Loaded {} words", pool.len());
/// ```
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<WordPool, PuzzleError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| PuzzleError::WordListRead {
        path: path.to_path_buf(),
        source,
    })?;

    let pool = WordPool::from_words(content.lines().filter(|line| !line.trim().is_empty()));
    tracing::info!(path = %path.display(), words = pool.len(), "loaded word list");
    Ok(pool)
}

/// Word pool backed by the embedded default list
#[must_use]
pub fn embedded_pool() -> WordPool {
    WordPool::from_words(WORDS)
}

/// Resolve a `--words` argument: `"all"` is the embedded list, anything else
/// is a file path
///
/// # Errors
///
/// Returns `PuzzleError::WordListRead` if a path is given and cannot be read.
pub fn resolve_pool(source: &str) -> Result<WordPool, PuzzleError> {
    match source {
        "all" | "embedded" => Ok(embedded_pool()),
        path => load_from_file(path),
    }
}
