//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - built in-memory by the fetch/rank pipeline
//! - exported to the per-match JSON files the web front-end reads
//! - stored in and reloaded from the `players` table

use std::collections::HashMap;
use std::path::PathBuf;

use chrono::{DateTime, Local, NaiveDate};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use super::zodiac::ZodiacSign;

/// Named match listing on the sports-data service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FeedKind {
    Recent,
    Upcoming,
}

impl FeedKind {
    pub const ALL: [FeedKind; 2] = [FeedKind::Recent, FeedKind::Upcoming];

    /// Path segment under `/matches/v1/`.
    pub fn path(self) -> &'static str {
        match self {
            FeedKind::Recent => "recent",
            FeedKind::Upcoming => "upcoming",
        }
    }
}

/// Which listed matches an ingestion run processes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchFilter {
    /// Matches whose local start date is today.
    Today,
    /// Matches whose series name contains this text (case-insensitive).
    League(String),
}

impl MatchFilter {
    pub fn describe(&self) -> String {
        match self {
            MatchFilter::Today => "today".to_string(),
            MatchFilter::League(name) => format!("league '{name}'"),
        }
    }
}

/// One match as listed by a feed.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchSummary {
    pub match_id: i64,
    /// `"Team A vs Team B"`.
    pub teams: String,
    pub start: DateTime<Local>,
    pub series_name: Option<String>,
}

/// Raw roster entry from the match centre, before DOB lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SquadEntry {
    pub id: i64,
    pub name: String,
    /// Lowercased role, e.g. `"batsman"`, `"wk-batsman"`.
    pub role: String,
    pub team: String,
}

impl SquadEntry {
    /// Support staff listed alongside the players.
    pub fn is_staff(&self) -> bool {
        self.role.contains("coach") || self.role.contains("mentor")
    }
}

/// One team's roster for one match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Squad {
    pub team: String,
    pub entries: Vec<SquadEntry>,
}

/// A player with a resolved date of birth and sign.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerRecord {
    pub name: String,
    pub team: String,
    pub date_of_birth: NaiveDate,
    pub zodiac: ZodiacSign,
}

impl PlayerRecord {
    pub fn new(name: impl Into<String>, team: impl Into<String>, date_of_birth: NaiveDate) -> Self {
        Self {
            name: name.into(),
            team: team.into(),
            date_of_birth,
            zodiac: super::zodiac::resolve(date_of_birth),
        }
    }
}

/// Sign → rating derived from one ranking.
///
/// The first ranked sign gets the number of distinct signs that were ranked,
/// each later sign one less. Signs the model left out are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RatingMap {
    ratings: HashMap<ZodiacSign, u32>,
}

impl RatingMap {
    /// Build from an ordering of distinct signs, `total` being how many signs were asked about.
    pub fn from_order(order: &[ZodiacSign], total: usize) -> Self {
        let ratings = order
            .iter()
            .take(total)
            .enumerate()
            .map(|(idx, sign)| (*sign, (total - idx) as u32))
            .collect();
        Self { ratings }
    }

    pub fn get(&self, sign: ZodiacSign) -> Option<u32> {
        self.ratings.get(&sign).copied()
    }

    pub fn len(&self) -> usize {
        self.ratings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty()
    }

    /// Entries sorted by rating, highest first.
    pub fn ranked(&self) -> Vec<(ZodiacSign, u32)> {
        let mut out: Vec<_> = self.ratings.iter().map(|(s, r)| (*s, *r)).collect();
        out.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        out
    }
}

/// A player joined with their sign's rating.
///
/// Field names match the JSON consumed by the web front-end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardRow {
    #[serde(rename = "Player")]
    pub player: String,
    #[serde(rename = "Team")]
    pub team: String,
    #[serde(rename = "DOB", with = "short_date")]
    pub dob: NaiveDate,
    #[serde(rename = "Zodiac")]
    pub zodiac: ZodiacSign,
    /// `None` when the sign was not ranked; serialized as `null`.
    #[serde(rename = "PredictionScale")]
    pub rating: Option<u32>,
}

/// Row of the dashboard/table `leaderboard.json`.
///
/// The home page reads the rating as `Rating`; per-match files use `PredictionScale`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardRow {
    #[serde(rename = "Player")]
    pub player: String,
    #[serde(rename = "Team")]
    pub team: String,
    #[serde(rename = "Zodiac")]
    pub zodiac: ZodiacSign,
    #[serde(rename = "DOB", with = "short_date")]
    pub dob: NaiveDate,
    #[serde(rename = "Rating")]
    pub rating: Option<u32>,
}

impl From<&LeaderboardRow> for BoardRow {
    fn from(row: &LeaderboardRow) -> Self {
        Self {
            player: row.player.clone(),
            team: row.team.clone(),
            zodiac: row.zodiac,
            dob: row.dob,
            rating: row.rating,
        }
    }
}

/// `dd/mm/yy` date representation used in the exported JSON.
mod short_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%d/%m/%y";

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDate::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }
}

/// Configuration for one ingestion run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub filter: MatchFilter,
    pub feeds: Vec<FeedKind>,
    /// Directory for `leaderboard-{id}.json` and `matches.json`; `None` disables file output.
    pub out_dir: Option<PathBuf>,
    /// SQLite file for the `players` table; `None` disables it.
    pub db_path: Option<PathBuf>,
}

/// Configuration for the dashboard and table modes.
#[derive(Debug, Clone)]
pub struct BoardConfig {
    pub db_path: PathBuf,
    /// Where to write `leaderboard.json`; `None` disables the export.
    pub export: Option<PathBuf>,
}
