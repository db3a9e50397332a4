//! Command-line parsing for the cricket horoscope leaderboard.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! fetch/rank pipeline and its sinks.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::FeedKind;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "horo", version, about = "Cricket horoscope leaderboard (Cricbuzz + DeepInfra)")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch matches, rank each squad by zodiac, and write JSON files and the players table.
    Ingest(IngestArgs),
    /// Launch the terminal dashboard over the stored players.
    ///
    /// Ranks the signs in the `players` table live and shows the leaderboard
    /// next to a per-sign rating chart.
    Board(BoardArgs),
    /// Print the leaderboard for the stored players (useful for scripting).
    Table(BoardArgs),
    /// Print the stored players table.
    Players(DbArgs),
}

/// Options for an ingestion run.
#[derive(Debug, Parser, Clone)]
pub struct IngestArgs {
    /// Process matches from this league/series (substring, case-insensitive) instead of today's.
    #[arg(short = 'l', long)]
    pub league: Option<String>,

    /// Feeds to list (repeatable). Defaults to both `recent` and `upcoming`.
    #[arg(long = "feed", value_enum)]
    pub feeds: Vec<FeedKind>,

    /// Directory for `leaderboard-{matchId}.json` and `matches.json`.
    #[arg(long, default_value = "frontend/public")]
    pub out_dir: PathBuf,

    /// Skip the per-match JSON files.
    #[arg(long)]
    pub no_files: bool,

    /// SQLite database holding the `players` table.
    #[arg(long, default_value = "squads.db")]
    pub db: PathBuf,

    /// Skip writing the `players` table.
    #[arg(long)]
    pub no_db: bool,
}

/// Options for the dashboard and table views.
#[derive(Debug, Parser, Clone)]
pub struct BoardArgs {
    /// SQLite database holding the `players` table.
    #[arg(long, default_value = "squads.db")]
    pub db: PathBuf,

    /// Where to write the ranked leaderboard JSON.
    #[arg(long, default_value = "leaderboard.json")]
    pub export: PathBuf,

    /// Do not write the leaderboard JSON.
    #[arg(long)]
    pub no_export: bool,
}

/// Options for commands that only read the database.
#[derive(Debug, Parser, Clone)]
pub struct DbArgs {
    /// SQLite database holding the `players` table.
    #[arg(long, default_value = "squads.db")]
    pub db: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ingest_defaults() {
        let cli = Cli::parse_from(["horo", "ingest"]);
        let Command::Ingest(args) = cli.command else {
            panic!("expected ingest");
        };
        assert!(args.league.is_none());
        assert!(args.feeds.is_empty());
        assert_eq!(args.out_dir, PathBuf::from("frontend/public"));
        assert_eq!(args.db, PathBuf::from("squads.db"));
        assert!(!args.no_files && !args.no_db);
    }

    #[test]
    fn ingest_league_and_feeds() {
        let cli = Cli::parse_from(["horo", "ingest", "-l", "IPL", "--feed", "upcoming", "--no-db"]);
        let Command::Ingest(args) = cli.command else {
            panic!("expected ingest");
        };
        assert_eq!(args.league.as_deref(), Some("IPL"));
        assert_eq!(args.feeds, vec![FeedKind::Upcoming]);
        assert!(args.no_db);
    }

    #[test]
    fn table_accepts_export_path() {
        let cli = Cli::parse_from(["horo", "table", "--export", "out/board.json"]);
        let Command::Table(args) = cli.command else {
            panic!("expected table");
        };
        assert_eq!(args.export, PathBuf::from("out/board.json"));
    }
}
