//! Word pools for board generation
//!
//! Provides the embedded default word list, file loading, and the [`WordPool`]
//! that boards draw their words from.

mod embedded;
pub mod loader;
mod pool;

pub use embedded::{WORDS, WORDS_COUNT};
pub use pool::WordPool;
