//! Match selection: which listed matches an ingestion run processes.

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::domain::{MatchFilter, MatchSummary};

/// Matches starting on `today` (local calendar date).
pub fn filter_today(summaries: &[MatchSummary], today: NaiveDate) -> Vec<MatchSummary> {
    summaries
        .iter()
        .filter(|m| m.start.date_naive() == today)
        .cloned()
        .collect()
}

/// Matches whose series name contains `league`, ignoring case.
pub fn filter_by_league(summaries: &[MatchSummary], league: &str) -> Vec<MatchSummary> {
    let needle = league.trim().to_lowercase();
    summaries
        .iter()
        .filter(|m| {
            m.series_name
                .as_deref()
                .is_some_and(|name| name.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect()
}

/// Keep the first listing of each match id (a match can be on several feeds).
pub fn dedupe_matches(summaries: Vec<MatchSummary>) -> Vec<MatchSummary> {
    let mut seen = HashSet::new();
    summaries
        .into_iter()
        .filter(|m| seen.insert(m.match_id))
        .collect()
}

/// Apply a run's filter, then de-duplicate.
pub fn select_matches(summaries: &[MatchSummary], filter: &MatchFilter, today: NaiveDate) -> Vec<MatchSummary> {
    let selected = match filter {
        MatchFilter::Today => filter_today(summaries, today),
        MatchFilter::League(name) => filter_by_league(summaries, name),
    };
    dedupe_matches(selected)
}
