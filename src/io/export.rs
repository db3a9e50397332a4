//! JSON exports consumed by the static web front-end.
//!
//! - `leaderboard-{matchId}.json`: one match's rows
//! - `matches.json`: the matches processed by the last ingestion run
//! - `leaderboard.json`: the dashboard/table leaderboard

use std::fs::{File, create_dir_all};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::domain::{BoardRow, LeaderboardRow, MatchSummary};
use crate::error::AppError;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MatchIndexEntry<'a> {
    match_id: i64,
    teams: &'a str,
}

/// Write `leaderboard-{match_id}.json` into `dir`, returning its path.
pub fn write_match_leaderboard(dir: &Path, match_id: i64, rows: &[LeaderboardRow]) -> Result<PathBuf, AppError> {
    ensure_dir(dir)?;
    let path = dir.join(format!("leaderboard-{match_id}.json"));
    write_json(&path, rows)?;
    Ok(path)
}

/// Write `matches.json` into `dir`, returning its path.
pub fn write_match_index(dir: &Path, matches: &[MatchSummary]) -> Result<PathBuf, AppError> {
    ensure_dir(dir)?;
    let entries: Vec<MatchIndexEntry<'_>> = matches
        .iter()
        .map(|m| MatchIndexEntry {
            match_id: m.match_id,
            teams: &m.teams,
        })
        .collect();
    let path = dir.join("matches.json");
    write_json(&path, &entries)?;
    Ok(path)
}

/// Write the dashboard/table leaderboard to an explicit path.
pub fn write_leaderboard_json(path: &Path, rows: &[LeaderboardRow]) -> Result<(), AppError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir(parent)?;
    }
    let rows: Vec<BoardRow> = rows.iter().map(BoardRow::from).collect();
    write_json(path, &rows)
}

fn ensure_dir(dir: &Path) -> Result<(), AppError> {
    create_dir_all(dir)
        .map_err(|e| AppError::new(2, format!("Failed to create output dir '{}': {e}", dir.display())))
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create '{}': {e}", path.display())))?;
    serde_json::to_writer_pretty(file, value)
        .map_err(|e| AppError::new(2, format!("Failed to write '{}': {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ZodiacSign;
    use chrono::{Local, NaiveDate, TimeZone};

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("horo-export-{}-{name}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn match_files_use_front_end_shape() {
        let dir = scratch_dir("match");
        let rows = vec![LeaderboardRow {
            player: "Shubman Gill".to_string(),
            team: "India".to_string(),
            dob: NaiveDate::from_ymd_opt(1999, 9, 8).unwrap(),
            zodiac: ZodiacSign::Virgo,
            rating: Some(5),
        }];
        let path = write_match_leaderboard(&dir, 4242, &rows).unwrap();
        assert!(path.ends_with("leaderboard-4242.json"));

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written[0]["Player"], "Shubman Gill");
        assert_eq!(written[0]["DOB"], "08/09/99");
        assert_eq!(written[0]["PredictionScale"], 5);

        let matches = vec![MatchSummary {
            match_id: 4242,
            teams: "India vs England".to_string(),
            start: Local.with_ymd_and_hms(2026, 10, 19, 9, 30, 0).unwrap(),
            series_name: None,
        }];
        let index = write_match_index(&dir, &matches).unwrap();
        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&index).unwrap()).unwrap();
        assert_eq!(written, serde_json::json!([{"matchId": 4242, "teams": "India vs England"}]));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn board_leaderboard_uses_home_page_keys() {
        let dir = scratch_dir("board");
        let path = dir.join("nested").join("leaderboard.json");
        let rows = vec![
            LeaderboardRow {
                player: "A".to_string(),
                team: "B".to_string(),
                dob: NaiveDate::from_ymd_opt(2001, 2, 3).unwrap(),
                zodiac: ZodiacSign::Aquarius,
                rating: Some(2),
            },
            LeaderboardRow {
                player: "C".to_string(),
                team: "D".to_string(),
                dob: NaiveDate::from_ymd_opt(1999, 7, 30).unwrap(),
                zodiac: ZodiacSign::Leo,
                rating: None,
            },
        ];
        write_leaderboard_json(&path, &rows).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();

        let written: serde_json::Value = serde_json::from_str(&text).unwrap();
        let keys: Vec<&str> = written[0].as_object().unwrap().keys().map(String::as_str).collect();
        assert!(keys.contains(&"Rating"));
        assert!(!keys.contains(&"PredictionScale"));
        assert_eq!(written[0]["Rating"], 2);
        assert!(written[1]["Rating"].is_null());

        let back: Vec<BoardRow> = serde_json::from_str(&text).unwrap();
        let expected: Vec<BoardRow> = rows.iter().map(BoardRow::from).collect();
        assert_eq!(back, expected);
        let _ = std::fs::remove_dir_all(&dir);
    }
}
