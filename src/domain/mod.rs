//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the zodiac sign enum and its fixed date-range table (`zodiac`)
//! - fetched entities (`MatchSummary`, `SquadEntry`, `PlayerRecord`)
//! - ranking outputs (`RatingMap`, `LeaderboardRow`, `BoardRow`)
//! - run configuration (`RunConfig`, `MatchFilter`, `FeedKind`)

pub mod types;
pub mod zodiac;

pub use types::*;
pub use zodiac::*;
