//! Cricbuzz (RapidAPI) integration: match feeds, match centre squads, player stats.

use std::time::Duration;

use chrono::{DateTime, Local, Utc};
use reqwest::StatusCode;
use reqwest::blocking::{Client, RequestBuilder};
use serde::Deserialize;

use crate::config::SportsCredentials;
use crate::data::CricketFeed;
use crate::domain::{FeedKind, MatchSummary, Squad, SquadEntry};
use crate::error::AppError;

const FEED_TIMEOUT: Duration = Duration::from_secs(10);
const SQUAD_TIMEOUT: Duration = Duration::from_secs(10);
const STATS_TIMEOUT: Duration = Duration::from_secs(15);

pub struct CricbuzzClient {
    client: Client,
    credentials: SportsCredentials,
}

impl CricbuzzClient {
    pub fn new(credentials: SportsCredentials) -> Result<Self, AppError> {
        let client = Client::builder()
            .build()
            .map_err(|e| AppError::new(4, format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { client, credentials })
    }

    pub fn from_env() -> Result<Self, AppError> {
        Self::new(SportsCredentials::from_env()?)
    }

    fn get(&self, path: &str, timeout: Duration) -> RequestBuilder {
        let url = format!("https://{}/{path}", self.credentials.host);
        log::debug!("GET {url}");
        self.client
            .get(url)
            .header("x-rapidapi-host", &self.credentials.host)
            .header("x-rapidapi-key", &self.credentials.key)
            .timeout(timeout)
    }
}

impl CricketFeed for CricbuzzClient {
    fn list_matches(&self, feed: FeedKind) -> Result<Vec<MatchSummary>, AppError> {
        let resp = self
            .get(&format!("matches/v1/{}", feed.path()), FEED_TIMEOUT)
            .send()
            .map_err(|e| AppError::new(4, format!("Cricbuzz '{}' feed request failed: {e}", feed.path())))?;

        if !feed_has_body(feed, resp.status())? {
            return Ok(Vec::new());
        }

        let body: FeedResponse = resp
            .json()
            .map_err(|e| AppError::new(4, format!("Failed to parse '{}' feed: {e}", feed.path())))?;
        Ok(summaries_from_feed(body))
    }

    fn fetch_squad(&self, match_id: i64) -> Result<(Squad, Squad), AppError> {
        let resp = self
            .get(&format!("mcenter/v1/{match_id}"), SQUAD_TIMEOUT)
            .send()
            .map_err(|e| AppError::new(4, format!("Match centre request for {match_id} failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(AppError::new(
                4,
                format!("Match centre request for {match_id} failed with status {}.", resp.status()),
            ));
        }

        let body: MatchCenterResponse = resp
            .json()
            .map_err(|e| AppError::new(4, format!("Failed to parse match centre for {match_id}: {e}")))?;
        Ok(squads_from_match_center(body))
    }

    fn fetch_date_of_birth(&self, player_id: i64) -> Option<String> {
        let resp = match self.get(&format!("stats/v1/player/{player_id}"), STATS_TIMEOUT).send() {
            Ok(resp) => resp,
            Err(e) => {
                log::debug!("Player {player_id} stats request failed: {e}");
                return None;
            }
        };
        if !resp.status().is_success() {
            log::debug!("Player {player_id} stats returned {}", resp.status());
            return None;
        }
        match resp.json::<PlayerStats>() {
            Ok(stats) => date_of_birth_from_stats(stats),
            Err(e) => {
                log::debug!("Player {player_id} stats unreadable: {e}");
                None
            }
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FeedResponse {
    #[serde(default)]
    type_matches: Vec<TypeMatches>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TypeMatches {
    #[serde(default)]
    series_matches: Vec<SeriesMatches>,
}

/// Either a series wrapper or an ad slot; ads carry no wrapper.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SeriesMatches {
    series_ad_wrapper: Option<SeriesAdWrapper>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SeriesAdWrapper {
    series_name: Option<String>,
    #[serde(default)]
    matches: Vec<MatchEntry>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MatchEntry {
    match_info: Option<MatchInfo>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MatchInfo {
    match_id: Option<i64>,
    series_name: Option<String>,
    /// Epoch milliseconds, sent as a string by the API (numbers accepted too).
    start_date: Option<serde_json::Value>,
    team1: Option<TeamInfo>,
    team2: Option<TeamInfo>,
}

/// Feeds name teams via `teamName`; the match centre uses `name`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TeamInfo {
    team_name: Option<String>,
    name: Option<String>,
    #[serde(default)]
    player_details: Vec<PlayerDetail>,
}

#[derive(Debug, Default, Deserialize)]
struct PlayerDetail {
    id: Option<i64>,
    name: Option<String>,
    role: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MatchCenterResponse {
    match_info: Option<MatchInfo>,
}

#[derive(Debug, Default, Deserialize)]
struct PlayerStats {
    #[serde(rename = "DoBFormat")]
    dob_format: Option<String>,
    #[serde(rename = "DoB")]
    dob: Option<String>,
}

/// `Ok(false)` when the feed is rate limited and should be treated as empty.
fn feed_has_body(feed: FeedKind, status: StatusCode) -> Result<bool, AppError> {
    if status == StatusCode::TOO_MANY_REQUESTS {
        log::warn!("Rate limited on '{}' feed, skipping.", feed.path());
        return Ok(false);
    }
    if !status.is_success() {
        return Err(AppError::new(
            4,
            format!("Cricbuzz '{}' feed failed with status {status}.", feed.path()),
        ));
    }
    Ok(true)
}

fn summaries_from_feed(body: FeedResponse) -> Vec<MatchSummary> {
    let mut out = Vec::new();
    for type_matches in body.type_matches {
        for series in type_matches.series_matches {
            let Some(wrapper) = series.series_ad_wrapper else {
                continue;
            };
            for entry in wrapper.matches {
                let Some(info) = entry.match_info else {
                    continue;
                };
                let Some(match_id) = info.match_id else {
                    continue;
                };
                let Some(start) = info.start_date.as_ref().and_then(start_from_millis) else {
                    continue;
                };
                let teams = format!(
                    "{} vs {}",
                    team_label(info.team1.as_ref()),
                    team_label(info.team2.as_ref())
                );
                out.push(MatchSummary {
                    match_id,
                    teams,
                    start,
                    series_name: info.series_name.or_else(|| wrapper.series_name.clone()),
                });
            }
        }
    }
    out
}

fn start_from_millis(raw: &serde_json::Value) -> Option<DateTime<Local>> {
    let millis = match raw {
        serde_json::Value::String(s) => s.trim().parse::<i64>().ok()?,
        serde_json::Value::Number(n) => n.as_i64()?,
        _ => return None,
    };
    DateTime::<Utc>::from_timestamp_millis(millis).map(|utc| utc.with_timezone(&Local))
}

fn team_label(team: Option<&TeamInfo>) -> &str {
    team.and_then(|t| t.team_name.as_deref().or(t.name.as_deref()))
        .filter(|s| !s.trim().is_empty())
        .unwrap_or("Unknown")
}

fn squads_from_match_center(body: MatchCenterResponse) -> (Squad, Squad) {
    let info = body.match_info.unwrap_or_default();
    (squad_from_team(info.team1), squad_from_team(info.team2))
}

fn squad_from_team(team: Option<TeamInfo>) -> Squad {
    let team = team.unwrap_or_default();
    let name = team
        .name
        .clone()
        .or(team.team_name.clone())
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| "Unknown".to_string());

    let entries = team
        .player_details
        .into_iter()
        .filter_map(|p| {
            let (Some(id), Some(player)) = (p.id, p.name) else {
                log::debug!("Skipping roster entry without id/name in {name}");
                return None;
            };
            Some(SquadEntry {
                id,
                name: player,
                role: p.role.unwrap_or_else(|| "Player".to_string()).to_lowercase(),
                team: name.clone(),
            })
        })
        .filter(|entry| !entry.is_staff())
        .collect();

    Squad { team: name, entries }
}

fn date_of_birth_from_stats(stats: PlayerStats) -> Option<String> {
    let raw = stats
        .dob_format
        .filter(|s| !s.trim().is_empty())
        .or(stats.dob.filter(|s| !s.trim().is_empty()))?;
    let cleaned = strip_annotation(&raw);
    if cleaned.is_empty() { None } else { Some(cleaned.to_string()) }
}

/// Drop a trailing parenthetical such as `"(36 years)"`.
fn strip_annotation(raw: &str) -> &str {
    raw.split('(').next().unwrap_or("").trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, TimeZone};

    const FEED: &str = r#"{
        "typeMatches": [{
            "matchType": "International",
            "seriesMatches": [
                {"seriesAdWrapper": {
                    "seriesId": 7607,
                    "seriesName": "Indian Premier League 2026",
                    "matches": [
                        {"matchInfo": {
                            "matchId": 101,
                            "startDate": "1781870400000",
                            "team1": {"teamName": "Chennai Super Kings"},
                            "team2": {"teamName": "Mumbai Indians"}
                        }},
                        {"matchInfo": {
                            "matchId": 102,
                            "team1": {"teamName": "A"},
                            "team2": {"teamName": "B"}
                        }}
                    ]
                }},
                {"adDetail": {"name": "native_ad"}}
            ]
        }, {
            "seriesMatches": [
                {"seriesAdWrapper": {
                    "seriesName": "County Championship",
                    "matches": [{"matchInfo": {
                        "matchId": 201,
                        "seriesName": "County Championship Division One",
                        "startDate": 1781870400000,
                        "team1": {"teamName": "Surrey"},
                        "team2": {"teamName": "Kent"}
                    }}]
                }}
            ]
        }]
    }"#;

    #[test]
    fn feed_yields_summaries_and_skips_undated_matches() {
        let body: FeedResponse = serde_json::from_str(FEED).unwrap();
        let summaries = summaries_from_feed(body);

        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].match_id, 101);
        assert_eq!(summaries[0].teams, "Chennai Super Kings vs Mumbai Indians");
        assert_eq!(summaries[0].series_name.as_deref(), Some("Indian Premier League 2026"));

        let expected = Local.timestamp_millis_opt(1_781_870_400_000).unwrap();
        assert_eq!(summaries[0].start, expected);
        assert_eq!(summaries[1].start, expected);
        assert_eq!(
            summaries[1].series_name.as_deref(),
            Some("County Championship Division One")
        );
    }

    #[test]
    fn rate_limited_feed_is_skipped_other_failures_are_fatal() {
        assert!(!feed_has_body(FeedKind::Upcoming, StatusCode::TOO_MANY_REQUESTS).unwrap());
        assert!(feed_has_body(FeedKind::Recent, StatusCode::OK).unwrap());

        let err = feed_has_body(FeedKind::Recent, StatusCode::INTERNAL_SERVER_ERROR).unwrap_err();
        assert_eq!(err.exit_code(), 4);
        assert!(err.to_string().contains("'recent' feed"));
        assert_eq!(feed_has_body(FeedKind::Recent, StatusCode::FORBIDDEN).unwrap_err().exit_code(), 4);
    }

    #[test]
    fn empty_feed_body_is_not_an_error() {
        let body: FeedResponse = serde_json::from_str("{}").unwrap();
        assert!(summaries_from_feed(body).is_empty());
    }

    #[test]
    fn match_center_squads_drop_staff_and_lowercase_roles() {
        let json = r#"{
            "matchInfo": {
                "team1": {"name": "India", "playerDetails": [
                    {"id": 1413, "name": "Virat Kohli", "role": "Batsman"},
                    {"id": 9001, "name": "Gautam Gambhir", "role": "Head Coach"},
                    {"id": 8683, "name": "Jasprit Bumrah"}
                ]},
                "team2": {"name": "Australia", "playerDetails": [
                    {"id": 2250, "name": "Steven Smith", "role": "BATSMAN"},
                    {"name": "No Id", "role": "Bowler"},
                    {"id": 77, "name": "Someone", "role": "Team Mentor"}
                ]}
            }
        }"#;
        let body: MatchCenterResponse = serde_json::from_str(json).unwrap();
        let (a, b) = squads_from_match_center(body);

        assert_eq!(a.team, "India");
        assert_eq!(a.entries.len(), 2);
        assert_eq!(a.entries[0].role, "batsman");
        assert_eq!(a.entries[1].role, "player");
        assert_eq!(a.entries[1].team, "India");

        assert_eq!(b.team, "Australia");
        assert_eq!(b.entries.len(), 1);
        assert_eq!(b.entries[0].name, "Steven Smith");
        assert_eq!(b.entries[0].role, "batsman");
    }

    #[test]
    fn missing_team_info_defaults_to_unknown() {
        let body: MatchCenterResponse = serde_json::from_str(r#"{"matchInfo": {}}"#).unwrap();
        let (a, b) = squads_from_match_center(body);
        assert_eq!(a.team, "Unknown");
        assert!(a.entries.is_empty());
        assert_eq!(b.team, "Unknown");
    }

    #[test]
    fn dob_prefers_formatted_field_and_strips_age() {
        let stats: PlayerStats =
            serde_json::from_str(r#"{"DoBFormat": "November 05, 1988 (37 years)", "DoB": "1988-11-05"}"#)
                .unwrap();
        assert_eq!(date_of_birth_from_stats(stats).as_deref(), Some("November 05, 1988"));

        let stats: PlayerStats = serde_json::from_str(r#"{"DoBFormat": "", "DoB": "Apr 30, 1987"}"#).unwrap();
        assert_eq!(date_of_birth_from_stats(stats).as_deref(), Some("Apr 30, 1987"));

        let stats: PlayerStats = serde_json::from_str(r#"{"name": "X"}"#).unwrap();
        assert_eq!(date_of_birth_from_stats(stats), None);
    }

    #[test]
    fn start_millis_accepts_string_or_number() {
        let a = start_from_millis(&serde_json::json!("1700000000000")).unwrap();
        let b = start_from_millis(&serde_json::json!(1_700_000_000_000_i64)).unwrap();
        assert_eq!(a, b);
        assert!(a.year() >= 2023);
        assert!(start_from_millis(&serde_json::json!("soon")).is_none());
    }
}
