//! Reporting utilities: leaderboard assembly and terminal formatting.

use std::cmp::Ordering;

use crate::domain::{LeaderboardRow, PlayerRecord, RatingMap};

pub mod format;

pub use format::*;

/// Join players with their sign's rating and sort best-first.
///
/// Rows whose sign has no rating carry `None` and sort after every rated row.
/// Ties keep input order.
pub fn assemble(players: &[PlayerRecord], ratings: &RatingMap) -> Vec<LeaderboardRow> {
    let mut rows: Vec<LeaderboardRow> = players
        .iter()
        .map(|p| LeaderboardRow {
            player: p.name.clone(),
            team: p.team.clone(),
            dob: p.date_of_birth,
            zodiac: p.zodiac,
            rating: ratings.get(p.zodiac),
        })
        .collect();

    rows.sort_by(|a, b| compare_ratings(a.rating, b.rating));
    rows
}

fn compare_ratings(a: Option<u32>, b: Option<u32>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ZodiacSign;
    use chrono::NaiveDate;

    fn player(name: &str, zodiac: ZodiacSign) -> PlayerRecord {
        PlayerRecord {
            name: name.to_string(),
            team: "T".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            zodiac,
        }
    }

    #[test]
    fn unrated_rows_sort_last() {
        let players = vec![
            player("U", ZodiacSign::Unknown),
            player("V", ZodiacSign::Virgo),
            player("L", ZodiacSign::Leo),
        ];
        let ratings = RatingMap::from_order(&[ZodiacSign::Leo, ZodiacSign::Virgo], 2);

        let rows = assemble(&players, &ratings);
        let got: Vec<(&str, Option<u32>)> = rows.iter().map(|r| (r.player.as_str(), r.rating)).collect();
        assert_eq!(got, vec![("L", Some(2)), ("V", Some(1)), ("U", None)]);
    }

    #[test]
    fn ties_keep_input_order() {
        let players = vec![
            player("first", ZodiacSign::Leo),
            player("unrated", ZodiacSign::Pisces),
            player("second", ZodiacSign::Leo),
            player("top", ZodiacSign::Aries),
        ];
        let ratings = RatingMap::from_order(&[ZodiacSign::Aries, ZodiacSign::Leo], 2);

        let rows = assemble(&players, &ratings);
        let names: Vec<&str> = rows.iter().map(|r| r.player.as_str()).collect();
        assert_eq!(names, vec!["top", "first", "second", "unrated"]);
    }

    #[test]
    fn inputs_are_left_untouched() {
        let players = vec![player("A", ZodiacSign::Leo)];
        let before = players.clone();
        let _ = assemble(&players, &RatingMap::default());
        assert_eq!(players, before);
    }
}
