//! Terminal output formatting
//!
//! Display utilities for CLI results and share text.

pub mod display;
pub mod formatters;

pub use display::{
    print_answer, print_board_list, print_check_result, print_daily_result,
    print_generate_result, print_position_knowledge, print_show_result,
};
pub use formatters::{score_to_emoji, scores_to_emoji, share_text};
