//! Cricket data: the remote feed client and the pure transforms around it.
//!
//! - `cricbuzz`: blocking RapidAPI client + response parsing
//! - `matches`: match selection (today / league) and de-duplication
//! - `players`: date-of-birth parsing and player record assembly

pub mod cricbuzz;
pub mod matches;
pub mod players;

pub use cricbuzz::CricbuzzClient;
pub use matches::*;
pub use players::*;

use crate::domain::{FeedKind, MatchSummary, Squad};
use crate::error::AppError;

/// The sports-data service as seen by the pipeline.
pub trait CricketFeed {
    /// List matches on a feed. A rate-limited feed yields an empty list.
    fn list_matches(&self, feed: FeedKind) -> Result<Vec<MatchSummary>, AppError>;

    /// Both squads for a match, support staff already removed.
    fn fetch_squad(&self, match_id: i64) -> Result<(Squad, Squad), AppError>;

    /// Raw date-of-birth text with any trailing annotation removed.
    ///
    /// `None` means "unknown DOB" (request failed or field missing); never fatal.
    fn fetch_date_of_birth(&self, player_id: i64) -> Option<String>;
}
