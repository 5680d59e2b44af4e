//! Clover
//!
//! A card-matching word puzzle. A board holds twenty four-word cards; four of
//! them, each rotated, form the answer. Players see the answer cards mixed
//! with decoys in a stable shuffled order and try to place and rotate them.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use chrono::Utc;
//! use clover::core::{BoardMetadata, Score};
//! use clover::generator::BoardGenerator;
//! use clover::wordlists::loader::embedded_pool;
//!
//! let pool = embedded_pool();
//! let board = BoardGenerator::seeded(&pool, 7)
//!     .create_board(BoardMetadata::default(), Utc::now())
//!     .unwrap();
//!
//! // Six visible cards: the four answer cards plus two decoys
//! let answer = board.answer_from_possible_cards(6).unwrap();
//! let scores = board.check_guess(&answer, Some(6)).unwrap();
//! assert_eq!(scores, [Score::Exact; 4]);
//! ```

// Core domain types
pub mod core;

// Board generation
pub mod generator;

// Word lists
pub mod wordlists;

// Persistence and daily selection
pub mod daily;
pub mod snapshot;
pub mod store;

pub mod error;
pub mod logging;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;
