//! Shared "leaderboard pipeline" logic used by the ingest, table, and dashboard front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! feeds -> match selection -> squads -> DOB lookup -> zodiac -> model ranking -> leaderboard
//!
//! The front-ends can then focus on presentation and persistence.

use chrono::NaiveDate;

use crate::data::{CricketFeed, collect_players, select_matches};
use crate::domain::{LeaderboardRow, MatchSummary, PlayerRecord, RunConfig};
use crate::error::AppError;
use crate::rating::{ChatModel, Ranking, rank, signs_present};
use crate::report::assemble;

/// One processed match.
#[derive(Debug, Clone)]
pub struct MatchLeaderboard {
    pub summary: MatchSummary,
    pub players: Vec<PlayerRecord>,
    pub ranking: Ranking,
    pub rows: Vec<LeaderboardRow>,
}

/// All computed outputs of a single ingestion run.
#[derive(Debug, Clone)]
pub struct IngestOutput {
    pub matches: Vec<MatchLeaderboard>,
}

impl IngestOutput {
    /// Every player across all processed matches, in processing order.
    pub fn all_players(&self) -> Vec<PlayerRecord> {
        self.matches.iter().flat_map(|m| m.players.iter().cloned()).collect()
    }
}

/// A ranked leaderboard over an already-known set of players.
#[derive(Debug, Clone)]
pub struct BoardOutput {
    pub ranking: Ranking,
    pub rows: Vec<LeaderboardRow>,
}

/// List every configured feed and keep the matches the run's filter selects.
///
/// Finding nothing is fatal: there is nothing to rank and nothing is written.
pub fn fetch_matches(feed: &dyn CricketFeed, config: &RunConfig, today: NaiveDate) -> Result<Vec<MatchSummary>, AppError> {
    let mut listed = Vec::new();
    for kind in &config.feeds {
        let summaries = feed.list_matches(*kind)?;
        log::debug!("'{}' feed listed {} matches", kind.path(), summaries.len());
        listed.extend(summaries);
    }

    let selected = select_matches(&listed, &config.filter, today);
    if selected.is_empty() {
        return Err(AppError::new(
            3,
            format!("No matches found for {}.", config.filter.describe()),
        ));
    }
    Ok(selected)
}

/// Squads, players, ranking and rows for one match.
pub fn build_match_leaderboard(
    feed: &dyn CricketFeed,
    model: &dyn ChatModel,
    summary: MatchSummary,
) -> Result<MatchLeaderboard, AppError> {
    let (first, second) = feed.fetch_squad(summary.match_id)?;
    let listed = first.entries.len() + second.entries.len();
    let players = collect_players(feed, &[first, second]);
    log::info!(
        "{}: {} of {} squad members have a usable date of birth",
        summary.teams,
        players.len(),
        listed
    );

    let board = rank_players(model, &players);
    Ok(MatchLeaderboard {
        summary,
        players,
        ranking: board.ranking,
        rows: board.rows,
    })
}

/// Execute the full ingestion pipeline and return the computed outputs.
pub fn run_ingest(
    feed: &dyn CricketFeed,
    model: &dyn ChatModel,
    config: &RunConfig,
    today: NaiveDate,
) -> Result<IngestOutput, AppError> {
    let selected = fetch_matches(feed, config, today)?;

    let mut matches = Vec::with_capacity(selected.len());
    for summary in selected {
        log::info!("Processing: {}", summary.teams);
        matches.push(build_match_leaderboard(feed, model, summary)?);
    }
    Ok(IngestOutput { matches })
}

/// Rank the signs present among `players` and assemble the leaderboard.
pub fn rank_players(model: &dyn ChatModel, players: &[PlayerRecord]) -> BoardOutput {
    let ranking = rank(model, &signs_present(players));
    let rows = assemble(players, &ranking.ratings);
    BoardOutput { ranking, rows }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use chrono::{Local, TimeZone};

    use super::*;
    use crate::domain::{FeedKind, MatchFilter, Squad, SquadEntry, ZodiacSign};
    use crate::rating::RankingSource;

    struct StubFeed {
        recent: Vec<MatchSummary>,
        upcoming: Vec<MatchSummary>,
        squads: HashMap<i64, (Squad, Squad)>,
        dobs: HashMap<i64, String>,
    }

    impl CricketFeed for StubFeed {
        fn list_matches(&self, feed: FeedKind) -> Result<Vec<MatchSummary>, AppError> {
            Ok(match feed {
                FeedKind::Recent => self.recent.clone(),
                FeedKind::Upcoming => self.upcoming.clone(),
            })
        }

        fn fetch_squad(&self, match_id: i64) -> Result<(Squad, Squad), AppError> {
            self.squads
                .get(&match_id)
                .cloned()
                .ok_or_else(|| AppError::new(4, format!("no squad for {match_id}")))
        }

        fn fetch_date_of_birth(&self, player_id: i64) -> Option<String> {
            self.dobs.get(&player_id).cloned()
        }
    }

    struct StubModel(&'static str);

    impl ChatModel for StubModel {
        fn complete(&self, _system: &str, _prompt: &str) -> Result<String, AppError> {
            Ok(self.0.to_string())
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn summary(id: i64, day: u32) -> MatchSummary {
        MatchSummary {
            match_id: id,
            teams: "India vs Australia".to_string(),
            start: Local.with_ymd_and_hms(2026, 10, day, 13, 30, 0).unwrap(),
            series_name: Some("Border-Gavaskar Trophy".to_string()),
        }
    }

    fn squad(team: &str, ids: &[(i64, &str)]) -> Squad {
        Squad {
            team: team.to_string(),
            entries: ids
                .iter()
                .map(|(id, name)| SquadEntry {
                    id: *id,
                    name: name.to_string(),
                    role: "batsman".to_string(),
                    team: team.to_string(),
                })
                .collect(),
        }
    }

    fn feed() -> StubFeed {
        StubFeed {
            recent: vec![summary(1, 18)],
            upcoming: vec![summary(2, 19), summary(2, 19)],
            squads: HashMap::from([(
                2,
                (
                    squad("India", &[(10, "Virat Kohli"), (11, "Rohit Sharma"), (12, "Unknown Age")]),
                    squad("Australia", &[(20, "Steven Smith"), (21, "Pat Cummins")]),
                ),
            )]),
            dobs: HashMap::from([
                (10, "November 05, 1988".to_string()),
                (11, "April 30, 1987".to_string()),
                (12, "n/a".to_string()),
                (20, "Jun 02, 1989".to_string()),
            ]),
        }
    }

    fn config(filter: MatchFilter) -> RunConfig {
        RunConfig {
            filter,
            feeds: FeedKind::ALL.to_vec(),
            out_dir: None,
            db_path: None,
        }
    }

    #[test]
    fn ingest_builds_sorted_leaderboard_for_todays_match() {
        let model = StubModel(r#"{"order":["Gemini","Scorpio","Taurus"]}"#);
        let out = run_ingest(&feed(), &model, &config(MatchFilter::Today), today()).unwrap();

        assert_eq!(out.matches.len(), 1);
        let m = &out.matches[0];
        assert_eq!(m.summary.match_id, 2);
        assert_eq!(m.ranking.source, RankingSource::Model);

        let got: Vec<(&str, ZodiacSign, Option<u32>)> =
            m.rows.iter().map(|r| (r.player.as_str(), r.zodiac, r.rating)).collect();
        assert_eq!(
            got,
            vec![
                ("Steven Smith", ZodiacSign::Gemini, Some(3)),
                ("Virat Kohli", ZodiacSign::Scorpio, Some(2)),
                ("Rohit Sharma", ZodiacSign::Taurus, Some(1)),
            ]
        );
        assert_eq!(out.all_players().len(), 3);
    }

    #[test]
    fn players_without_dob_never_reach_the_leaderboard() {
        let model = StubModel("no idea");
        let out = run_ingest(&feed(), &model, &config(MatchFilter::Today), today()).unwrap();
        let names: Vec<&str> = out.matches[0].rows.iter().map(|r| r.player.as_str()).collect();
        assert!(!names.contains(&"Unknown Age"));
        assert!(!names.contains(&"Pat Cummins"));
        assert!(out.matches[0].ranking.warning().is_some());
    }

    #[test]
    fn no_matches_today_is_fatal() {
        let mut f = feed();
        f.upcoming.clear();
        let err = run_ingest(&f, &StubModel("{}"), &config(MatchFilter::Today), today()).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn league_filter_ignores_the_date() {
        let mut f = feed();
        let same = f.squads[&2].clone();
        f.squads.insert(1, same);
        let out = run_ingest(
            &f,
            &StubModel("{}"),
            &config(MatchFilter::League("border-gavaskar".to_string())),
            today(),
        )
        .unwrap();
        let ids: Vec<i64> = out.matches.iter().map(|m| m.summary.match_id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn squad_failure_propagates() {
        let mut f = feed();
        f.squads.clear();
        let err = run_ingest(&f, &StubModel("{}"), &config(MatchFilter::Today), today()).unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }
}
