//! Zodiac ranking via a hosted language model.
//!
//! The model is asked to order the signs present in today's squads by "career
//! outlook". Whatever happens on the way (network failure, prose instead of
//! JSON, unknown labels) the run continues: a failed ranking falls back to the
//! alphabetical order of the input signs.

use std::collections::BTreeSet;

use serde_json::Value;

use crate::domain::{PlayerRecord, RatingMap, ZodiacSign};
use crate::error::AppError;

pub mod deepinfra;
pub mod extract;

pub use deepinfra::DeepInfraClient;
pub use extract::{ExtractError, parse_first_json};

pub const SYSTEM_PROMPT: &str =
    "You are a JSON generator. Always respond with exactly one JSON object matching the asked schema. No extra text.";

/// A chat-completion style language model.
pub trait ChatModel {
    /// Send a system instruction and a user prompt, returning the reply text.
    fn complete(&self, system: &str, prompt: &str) -> Result<String, AppError>;
}

/// Where a ranking's order came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RankingSource {
    Model,
    /// The reply parsed but had no `order` field.
    ModelWithoutOrder,
    /// The call or the parse failed; carries the reason shown to the operator.
    Fallback(String),
    /// Nothing to rank.
    Empty,
}

/// Ranked signs plus the ratings derived from them.
#[derive(Debug, Clone)]
pub struct Ranking {
    pub order: Vec<ZodiacSign>,
    pub ratings: RatingMap,
    pub source: RankingSource,
}

impl Ranking {
    pub fn warning(&self) -> Option<&str> {
        match &self.source {
            RankingSource::Fallback(reason) => Some(reason),
            _ => None,
        }
    }
}

/// Distinct known signs among `players`, alphabetically.
pub fn signs_present(players: &[PlayerRecord]) -> Vec<ZodiacSign> {
    players
        .iter()
        .map(|p| p.zodiac)
        .filter(|z| z.is_known())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// The user prompt for a set of signs.
pub fn build_prompt(signs: &[ZodiacSign]) -> String {
    let listed: Vec<&str> = signs.iter().map(|s| s.label()).collect();
    let quoted: Vec<String> = listed.iter().map(|s| format!("\"{s}\"")).collect();
    format!(
        "Rank these zodiac signs by today's career outlook descending: {}. Respond JSON {{\"order\":[{}]}}.",
        listed.join(", "),
        quoted.join(",")
    )
}

/// Rank `signs` (already distinct) with the model, falling back on any failure.
pub fn rank(model: &dyn ChatModel, signs: &[ZodiacSign]) -> Ranking {
    let mut input: Vec<ZodiacSign> = signs.to_vec();
    input.sort();
    input.dedup();

    if input.is_empty() {
        return Ranking {
            order: Vec::new(),
            ratings: RatingMap::default(),
            source: RankingSource::Empty,
        };
    }

    let (order, source) = match request_order(model, &input) {
        Ok(Some(order)) => (order, RankingSource::Model),
        Ok(None) => (input.clone(), RankingSource::ModelWithoutOrder),
        Err(reason) => {
            log::warn!("Could not get ranking from the model: {reason}");
            (input.clone(), RankingSource::Fallback(reason))
        }
    };

    let ratings = RatingMap::from_order(&order, input.len());
    Ranking { order, ratings, source }
}

/// `Ok(None)` when the reply had no `order` field.
fn request_order(model: &dyn ChatModel, input: &[ZodiacSign]) -> Result<Option<Vec<ZodiacSign>>, String> {
    let reply = model
        .complete(SYSTEM_PROMPT, &build_prompt(input))
        .map_err(|e| e.to_string())?;
    log::debug!("Model reply: {reply}");

    let parsed = parse_first_json(&reply).map_err(|e| e.to_string())?;
    order_from_reply(&parsed, input)
}

/// Read `order`, keeping only the first mention of each input sign.
fn order_from_reply(parsed: &Value, input: &[ZodiacSign]) -> Result<Option<Vec<ZodiacSign>>, String> {
    let Some(order) = parsed.get("order") else {
        return Ok(None);
    };
    let items = order
        .as_array()
        .ok_or_else(|| format!("`order` is not a list: {order}"))?;

    let mut out: Vec<ZodiacSign> = Vec::with_capacity(input.len());
    for item in items {
        let label = item
            .as_str()
            .ok_or_else(|| format!("`order` entry is not a string: {item}"))?;
        match label.parse::<ZodiacSign>() {
            Ok(sign) if input.contains(&sign) && !out.contains(&sign) => out.push(sign),
            _ => log::debug!("Ignoring ranked label '{label}'"),
        }
    }
    Ok(Some(out))
}
