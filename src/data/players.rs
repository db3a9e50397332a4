//! Turning roster entries into player records.

use chrono::NaiveDate;

use crate::data::CricketFeed;
use crate::domain::{PlayerRecord, Squad};

/// Parse a date of birth like `"November 5, 1988"` or `"Nov 5, 1988"`.
pub fn parse_date_of_birth(raw: &str) -> Option<NaiveDate> {
    const FMTS: [&str; 2] = ["%B %d, %Y", "%b %d, %Y"];
    let trimmed = raw.trim();
    FMTS.iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
}

/// Look up each squad member's DOB and build records.
///
/// Players whose DOB is unavailable or unparseable are left out.
pub fn collect_players(feed: &dyn CricketFeed, squads: &[Squad]) -> Vec<PlayerRecord> {
    let mut out = Vec::new();
    for squad in squads {
        for entry in &squad.entries {
            let Some(raw) = feed.fetch_date_of_birth(entry.id) else {
                log::debug!("No DOB for {} ({}), skipping", entry.name, entry.id);
                continue;
            };
            let Some(dob) = parse_date_of_birth(&raw) else {
                log::debug!("Unparseable DOB '{raw}' for {}, skipping", entry.name);
                continue;
            };
            out.push(PlayerRecord::new(entry.name.clone(), entry.team.clone(), dob));
        }
    }
    out
}
