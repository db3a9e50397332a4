//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - checks credentials before any request goes out
//! - runs the leaderboard pipeline
//! - prints reports or launches the dashboard
//! - writes JSON files and the players table

use std::collections::HashSet;
use std::path::Path;

use chrono::Local;
use clap::Parser;

use crate::cli::{BoardArgs, Command, DbArgs, IngestArgs};
use crate::config::{ModelCredentials, SportsCredentials};
use crate::data::CricbuzzClient;
use crate::domain::{BoardConfig, FeedKind, MatchFilter, PlayerRecord, RunConfig};
use crate::error::AppError;
use crate::rating::DeepInfraClient;

pub mod pipeline;

/// Entry point for the `horo` binary.
pub fn run() -> Result<(), AppError> {
    // `horo` and `horo --db x.db` behave like `horo board ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Ingest(args) => handle_ingest(args),
        Command::Board(args) => handle_board(args),
        Command::Table(args) => handle_table(args),
        Command::Players(args) => handle_players(args),
    }
}

fn handle_ingest(args: IngestArgs) -> Result<(), AppError> {
    let config = run_config_from_args(&args);

    let sports = SportsCredentials::from_env()?;
    let model = ModelCredentials::from_env()?;
    let feed = CricbuzzClient::new(sports)?;
    let model = DeepInfraClient::new(model)?;

    let today = Local::now().date_naive();
    let output = pipeline::run_ingest(&feed, &model, &config, today)?;

    for m in &output.matches {
        println!("{}", crate::report::format_match_line(&m.summary));
        print!("{}", crate::report::format_ranking_summary(&m.ranking));
        println!("{}", crate::report::format_leaderboard(&m.rows));
    }

    persist_ingest(&output, &config)
}

/// Write the players table, then the JSON files.
///
/// A failed database write leaves the output directory untouched.
pub fn persist_ingest(output: &pipeline::IngestOutput, config: &RunConfig) -> Result<(), AppError> {
    if let Some(db) = &config.db_path {
        crate::io::save_players(db, &output.all_players())?;
        log::info!("Saved: {}", db.display());
    }

    if let Some(dir) = &config.out_dir {
        for m in &output.matches {
            let path = crate::io::write_match_leaderboard(dir, m.summary.match_id, &m.rows)?;
            log::info!("Saved: {}", path.display());
        }
        let summaries: Vec<_> = output.matches.iter().map(|m| m.summary.clone()).collect();
        let path = crate::io::write_match_index(dir, &summaries)?;
        log::info!("Saved: {}", path.display());
    }

    Ok(())
}

fn handle_board(args: BoardArgs) -> Result<(), AppError> {
    crate::tui::run(board_config_from_args(&args))
}

fn handle_table(args: BoardArgs) -> Result<(), AppError> {
    let config = board_config_from_args(&args);
    let players = load_stored_players(&config.db_path)?;
    let model = DeepInfraClient::from_env()?;

    let board = pipeline::rank_players(&model, &players);
    print!("{}", crate::report::format_ranking_summary(&board.ranking));
    println!("{}", crate::report::format_leaderboard(&board.rows));

    if let Some(path) = &config.export {
        crate::io::write_leaderboard_json(path, &board.rows)?;
        log::info!("Saved: {}", path.display());
    }
    Ok(())
}

fn handle_players(args: DbArgs) -> Result<(), AppError> {
    let players = crate::io::read_players(&args.db)?;
    print!("{}", crate::report::format_players(&players));
    Ok(())
}

/// Players from the database; an empty table is as fatal as a missing one.
pub fn load_stored_players(db_path: &Path) -> Result<Vec<PlayerRecord>, AppError> {
    let players = crate::io::read_players(db_path)?;
    if players.is_empty() {
        return Err(AppError::new(3, "No players found in database."));
    }
    Ok(players)
}

pub fn run_config_from_args(args: &IngestArgs) -> RunConfig {
    let filter = match args.league.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => MatchFilter::League(name.to_string()),
        _ => MatchFilter::Today,
    };
    let feeds = if args.feeds.is_empty() {
        FeedKind::ALL.to_vec()
    } else {
        let mut seen = HashSet::new();
        let mut feeds = args.feeds.clone();
        feeds.retain(|feed| seen.insert(*feed));
        feeds
    };

    RunConfig {
        filter,
        feeds,
        out_dir: (!args.no_files).then(|| args.out_dir.clone()),
        db_path: (!args.no_db).then(|| args.db.clone()),
    }
}

pub fn board_config_from_args(args: &BoardArgs) -> BoardConfig {
    BoardConfig {
        db_path: args.db.clone(),
        export: (!args.no_export).then(|| args.export.clone()),
    }
}

/// Rewrite argv so `horo` defaults to `horo board`.
///
/// Rules:
/// - `horo`                      -> `horo board`
/// - `horo --db x.db ...`        -> `horo board --db x.db ...`
/// - `horo --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("board".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "ingest" | "board" | "table" | "players");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "board flags".
    if arg1.starts_with('-') {
        argv.insert(1, "board".to_string());
        return argv;
    }

    argv
}
