//! Formatting utilities for terminal output

use crate::core::{Card, GuessHistory, Score};
use std::fmt::Write as _;

/// Format a single score as an emoji square
#[must_use]
pub const fn score_to_emoji(score: Score) -> char {
    match score {
        Score::Exact => '🟩',
        Score::Partial => '🟨',
        Score::Miss => '⬛',
    }
}

/// Format a row of scores as emoji
#[must_use]
pub fn scores_to_emoji(scores: &[Score]) -> String {
    scores.iter().copied().map(score_to_emoji).collect()
}

/// Format a row of scores as their numeric codes, e.g. `"1 2 0 0"`
#[must_use]
pub fn scores_to_codes(scores: &[Score]) -> String {
    scores
        .iter()
        .map(|s| s.code().to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Shareable summary of a finished or in-progress game
///
/// ```text
/// 6 card clover game
/// 🟩🟨⬛⬛
/// 🟩🟩🟩🟩
/// ```
#[must_use]
pub fn share_text(num_cards: usize, history: &GuessHistory, link: Option<&str>) -> String {
    let mut text = format!("{num_cards} card clover game\n");
    for record in history.records() {
        text.push_str(&scores_to_emoji(&record.scores));
        text.push('\n');
    }
    if let Some(link) = link {
        let _ = writeln!(text, "{link}");
    }
    text
}

/// One card on a single line, words upper-cased and padded
#[must_use]
pub fn card_line(card: &Card, width: usize) -> String {
    card.words()
        .iter()
        .map(|w| format!("{:<width$}", w.to_uppercase()))
        .collect::<Vec<_>>()
        .join(" ")
        .trim_end()
        .to_string()
}

/// Width of the longest word across `cards`
#[must_use]
pub fn word_width(cards: &[Card]) -> usize {
    cards
        .iter()
        .flat_map(|c| c.words().iter())
        .map(String::len)
        .max()
        .unwrap_or(0)
}
