//! Clover - CLI
//!
//! Generate, store and play clover boards from the terminal.

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{ArgAction, Parser, Subcommand};
use clover::{
    commands::{
        GenerateConfig, check_board, generate_board, list_boards, run_daily, show_board,
        submit_clues,
    },
    core::{BoardMetadata, GuessHistory},
    logging::{LogConfig, LogFormat, init_logging},
    output::{
        print_board_list, print_check_result, print_daily_result, print_generate_result,
        print_position_knowledge, print_show_result, share_text,
    },
    store::{BoardId, JsonBoardFile, MemoryBoardStore},
    wordlists::loader::resolve_pool,
};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "clover",
    about = "Clover card-matching word puzzle: generate boards, pick the daily game, check guesses",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Word pool: 'all' (default, embedded list) or path to a file with one word per line
    #[arg(short = 'w', long, global = true, default_value = "all")]
    words: String,

    /// JSON file holding stored boards
    #[arg(long, global = true, default_value = "clover-boards.json")]
    store: PathBuf,

    /// Seed for reproducible board generation
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Log output format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,
}

/// Author-facing board metadata flags
#[derive(clap::Args)]
struct MetadataArgs {
    /// Author name (boards need one to become a daily puzzle)
    #[arg(short, long, default_value = "")]
    author: String,

    /// Clue linking an answer word pair; repeat up to four times
    #[arg(short, long = "clue")]
    clues: Vec<String>,

    /// Suggested number of visible cards
    #[arg(short = 'n', long)]
    num_cards: Option<usize>,
}

impl MetadataArgs {
    fn into_metadata(self) -> BoardMetadata {
        BoardMetadata {
            author: self.author,
            clues: (!self.clues.is_empty()).then_some(self.clues),
            suggested_num_cards: self.num_cards,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a new board and store it
    Generate {
        #[command(flatten)]
        metadata: MetadataArgs,
    },

    /// Show the cards a player sees for a stored board
    Show {
        /// Board id
        id: u64,

        /// Number of visible cards (default: the board's suggestion)
        #[arg(short = 'n', long)]
        num_cards: Option<usize>,
    },

    /// Score one or more guesses against a stored board
    Check {
        /// Board id
        id: u64,

        /// Guess as "position:rotation" pairs, e.g. "3:0,1:2,0:1,5:3"; repeatable
        #[arg(short, long = "guess", required = true)]
        guesses: Vec<String>,

        /// Number of visible cards (default: the board's suggestion)
        #[arg(short = 'n', long)]
        num_cards: Option<usize>,

        /// Print share text after the scores
        #[arg(long)]
        share: bool,
    },

    /// Select today's board (UTC-7 day boundary)
    Daily,

    /// Replace a stored board's author, clues and suggested card count
    Clues {
        /// Board id
        id: u64,

        #[command(flatten)]
        metadata: MetadataArgs,
    },

    /// List stored boards
    List,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_config = LogConfig::from_verbosity(cli.verbose).with_format(cli.log_format);
    init_logging(&log_config);

    // Held until the end of main so no other process saves in between
    let store_file = JsonBoardFile::open(&cli.store)
        .with_context(|| format!("failed to load board store {}", cli.store.display()))?;
    let store = store_file.store();

    let mutated = match cli.command {
        Commands::Generate { metadata } => {
            run_generate_command(store, &cli.words, cli.seed, metadata, cli.json)?;
            true
        }
        Commands::Show { id, num_cards } => {
            let result = show_board(store, BoardId(id), num_cards)?;
            emit(cli.json, &result, print_show_result)?;
            false
        }
        Commands::Check {
            id,
            guesses,
            num_cards,
            share,
        } => {
            run_check_command(store, BoardId(id), &guesses, num_cards, share, cli.json)?;
            false
        }
        Commands::Daily => {
            let result = run_daily(store, Utc::now())?;
            emit(cli.json, &result, print_daily_result)?;
            result.newly_selected
        }
        Commands::Clues { id, metadata } => {
            let board = submit_clues(store, BoardId(id), metadata.into_metadata(), Utc::now())?;
            emit(cli.json, &board, |board| println!("Updated board #{id}: {board}"))?;
            true
        }
        Commands::List => {
            let boards = list_boards(store)?;
            emit(cli.json, &boards, |boards| print_board_list(boards))?;
            false
        }
    };

    if mutated {
        store_file
            .save()
            .with_context(|| format!("failed to save board store {}", cli.store.display()))?;
    }

    Ok(())
}

/// Print `value` as JSON or with the human-readable printer
fn emit<T: Serialize + ?Sized>(json: bool, value: &T, print: impl FnOnce(&T)) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        print(value);
    }
    Ok(())
}

fn run_generate_command(
    store: &MemoryBoardStore,
    words: &str,
    seed: Option<u64>,
    metadata: MetadataArgs,
    json: bool,
) -> Result<()> {
    let pool = resolve_pool(words)?;
    let config = GenerateConfig {
        metadata: metadata.into_metadata(),
        seed,
    };
    let result = generate_board(store, &pool, config, Utc::now())?;
    emit(json, &result, print_generate_result)
}

fn run_check_command(
    store: &MemoryBoardStore,
    id: BoardId,
    guesses: &[String],
    num_cards: Option<usize>,
    share: bool,
    json: bool,
) -> Result<()> {
    let mut history = GuessHistory::new();
    let mut results = Vec::with_capacity(guesses.len());

    for guess in guesses {
        let result = check_board(store, id, guess, num_cards)?;
        history.push(result.guess.clone(), result.scores);
        results.push(result);
    }

    if json {
        return emit(true, &results, |_| {});
    }

    for result in &results {
        print_check_result(result);
    }
    if results.len() > 1 {
        print_position_knowledge(&history);
    }
    if share && let Some(first) = results.first() {
        println!();
        print!("{}", share_text(first.num_cards, &history, None));
    }
    Ok(())
}
