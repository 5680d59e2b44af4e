//! Display functions for command results

use super::formatters::{
    card_line, score_to_emoji, scores_to_codes, scores_to_emoji, word_width,
};
use crate::commands::{BoardSummary, CheckResult, DailyResult, GenerateResult, ShowResult};
use crate::core::{Board, GuessHistory, PublicBoard};
use colored::Colorize;

fn rule(ch: &str) -> String {
    ch.repeat(60).cyan().to_string()
}

fn print_public_board(view: &PublicBoard) {
    let width = word_width(&view.cards);
    for (position, card) in view.cards.iter().enumerate() {
        println!("  {:>2}  {}", position.to_string().bright_black(), card_line(card, width));
    }

    if let Some(clues) = &view.clues {
        println!();
        for (i, clue) in clues.iter().enumerate() {
            println!("  Clue {}: {}", i + 1, clue.to_uppercase().bright_yellow().bold());
        }
    }
}

/// Print a newly generated board, answer included
pub fn print_generate_result(result: &GenerateResult) {
    println!("\n{}", rule("═"));
    println!(
        " {} {}",
        "NEW BOARD".bright_cyan().bold(),
        format!("#{}", result.id).bright_yellow().bold()
    );
    println!("{}", rule("═"));
    print_answer(&result.board);
}

/// Print the answer cards and the word pairs each clue must link
pub fn print_answer(board: &Board) {
    println!("\n{}", "Answer:".bold());
    for (slot, words) in board.answer_cards().iter().enumerate() {
        println!("  {}  {}", slot + 1, words.join(" ").to_uppercase());
    }

    println!("\n{}", "Clue pairs:".bold());
    for (slot, (left, right)) in board.clue_word_pairs().iter().enumerate() {
        println!(
            "  {}  {} + {}",
            slot + 1,
            left.to_uppercase().green(),
            right.to_uppercase().green()
        );
    }
}

/// Print the public projection of a board
pub fn print_show_result(result: &ShowResult) {
    let view = &result.view;
    println!("\n{}", rule("─"));
    let author = if view.author.is_empty() {
        "anonymous"
    } else {
        view.author.as_str()
    };
    println!(
        "Board {} by {} ({} cards)",
        format!("#{}", result.id).bright_yellow().bold(),
        author.bold(),
        view.num_cards
    );
    println!("{}", rule("─"));
    print_public_board(view);
}

/// Print the scores for a guess
pub fn print_check_result(result: &CheckResult) {
    let guess = result
        .guess
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    println!(
        "Guess [{}] on board #{} ({} cards)",
        guess, result.id, result.num_cards
    );
    println!(
        "  {}   {}",
        scores_to_emoji(&result.scores),
        scores_to_codes(&result.scores).bright_black()
    );

    if result.solved {
        println!("{}", "✅ Solved!".green().bold());
    }
}

/// Print what the guesses so far reveal about each answer slot
pub fn print_position_knowledge(history: &GuessHistory) {
    println!("\n{}", "What you know:".bold());
    for (slot, known) in history.position_knowledge().iter().enumerate() {
        let Some(best) = known.best else {
            println!("  {}  {}", slot + 1, "no guesses".bright_black());
            continue;
        };
        let tried = known
            .placements
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        println!("  {}  {}  {}", slot + 1, score_to_emoji(best), tried);
    }
}

/// Print today's board
pub fn print_daily_result(result: &DailyResult) {
    let status = if result.newly_selected {
        "selected".green()
    } else {
        "already set".normal()
    };
    println!(
        "Daily board: {} by {} ({status})",
        format!("#{}", result.id).bright_yellow().bold(),
        result.author.bold()
    );

    match &result.view {
        Some(view) => {
            println!("{}", rule("─"));
            print_public_board(view);
        }
        None => println!(
            "{}",
            "No suggested card count; use `show` with -n to view it.".bright_black()
        ),
    }
}

/// Print a table of stored boards
pub fn print_board_list(boards: &[BoardSummary]) {
    if boards.is_empty() {
        println!("{}", "No boards stored.".bright_black());
        return;
    }

    println!(
        "{:>5}  {:<20} {:>5} {:>5}  {:<20} {}",
        "ID".bold(),
        "AUTHOR".bold(),
        "CLUES".bold(),
        "N".bold(),
        "UPDATED".bold(),
        "DAILY".bold()
    );
    for board in boards {
        let n = board
            .suggested_num_cards
            .map_or_else(|| "-".to_string(), |n| n.to_string());
        let daily = board
            .daily_set_time
            .map_or_else(String::new, |t| t.format("%Y-%m-%d").to_string());
        println!(
            "{:>5}  {:<20} {:>5} {:>5}  {:<20} {}",
            board.id,
            board.author,
            board.clue_count,
            n,
            board.last_updated_time.format("%Y-%m-%d %H:%M"),
            daily.green()
        );
    }
}
