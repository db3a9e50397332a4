//! Formatted terminal output for the leaderboard and the stored players.
//!
//! Formatting lives in one place so output changes stay localized.

use crate::domain::{LeaderboardRow, MatchSummary, PlayerRecord};
use crate::rating::{Ranking, RankingSource};

/// Header line describing where the ratings came from.
pub fn format_ranking_summary(ranking: &Ranking) -> String {
    let source = match &ranking.source {
        RankingSource::Model => "model".to_string(),
        RankingSource::ModelWithoutOrder => "model (no order given, alphabetical)".to_string(),
        RankingSource::Fallback(reason) => format!("fallback, alphabetical ({reason})"),
        RankingSource::Empty => "none (no signs)".to_string(),
    };
    let order: Vec<String> = ranking
        .ratings
        .ranked()
        .iter()
        .map(|(sign, rating)| format!("{sign}={rating}"))
        .collect();
    format!("Ranking: {source}\nOrder: {}\n", order.join(" "))
}

/// Fixed-width leaderboard table.
pub fn format_leaderboard(rows: &[LeaderboardRow]) -> String {
    let mut out = String::new();
    out.push_str(
        format!(
            "{:<28} {:<24} {:<12} {:<10} {:>6}",
            "Player", "Team", "Zodiac", "DOB", "Rating"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(format!("{:-<28} {:-<24} {:-<12} {:-<10} {:-<6}", "", "", "", "", "").trim_end());
    out.push('\n');

    for r in rows {
        out.push_str(
            format!(
                "{:<28} {:<24} {:<12} {:<10} {:>6}",
                truncate(&r.player, 28),
                truncate(&r.team, 24),
                r.zodiac.label(),
                r.dob.format("%d/%m/%y").to_string(),
                fmt_rating(r.rating),
            )
            .trim_end(),
        );
        out.push('\n');
    }

    out
}

/// Plain dump of stored players.
pub fn format_players(players: &[PlayerRecord]) -> String {
    let mut out = String::new();
    out.push_str(format!("{:<28} {:<24} {:<10} {:<12}", "player", "team", "dob", "zodiac").trim_end());
    out.push('\n');
    for p in players {
        out.push_str(
            format!(
                "{:<28} {:<24} {:<10} {:<12}",
                truncate(&p.name, 28),
                truncate(&p.team, 24),
                p.date_of_birth.to_string(),
                p.zodiac.label()
            )
            .trim_end(),
        );
        out.push('\n');
    }
    out
}

pub fn format_match_line(summary: &MatchSummary) -> String {
    format!(
        "{} | {} | {}",
        summary.match_id,
        summary.teams,
        summary.start.format("%Y-%m-%d %H:%M")
    )
}

pub fn fmt_rating(rating: Option<u32>) -> String {
    rating.map(|r| r.to_string()).unwrap_or_else(|| "N/A".to_string())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RatingMap, ZodiacSign};
    use chrono::NaiveDate;

    fn row(player: &str, zodiac: ZodiacSign, rating: Option<u32>) -> LeaderboardRow {
        LeaderboardRow {
            player: player.to_string(),
            team: "Royal Challengers Bengaluru".to_string(),
            dob: NaiveDate::from_ymd_opt(1988, 11, 5).unwrap(),
            zodiac,
            rating,
        }
    }

    #[test]
    fn leaderboard_table_shows_na_for_unrated() {
        let table = format_leaderboard(&[row("Virat Kohli", ZodiacSign::Scorpio, Some(3)), row("X", ZodiacSign::Unknown, None)]);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Player"));
        assert!(lines[2].contains("Scorpio"));
        assert!(lines[2].contains("05/11/88"));
        assert!(lines[2].ends_with('3'));
        assert!(lines[3].ends_with("N/A"));
    }

    #[test]
    fn long_names_are_truncated() {
        assert_eq!(truncate("abcdef", 4), "abc.");
        assert_eq!(truncate("abc", 4), "abc");
    }

    #[test]
    fn summary_lists_ratings_highest_first() {
        let ranking = Ranking {
            order: vec![ZodiacSign::Leo, ZodiacSign::Aries],
            ratings: RatingMap::from_order(&[ZodiacSign::Leo, ZodiacSign::Aries], 2),
            source: RankingSource::Model,
        };
        let text = format_ranking_summary(&ranking);
        assert!(text.contains("Ranking: model"));
        assert!(text.contains("Leo=2 Aries=1"));
    }
}
