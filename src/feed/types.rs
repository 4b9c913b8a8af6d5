//! Normalized feed types and the raw JSON shapes they are parsed from.

use crate::engine::matchup::MatchupRecord;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

// ── Normalized types (provider-agnostic) ─────────────────────────────

/// One scheduled game with both starters and every batter-vs-starter record.
#[derive(Debug, Clone)]
pub struct GameReport {
    pub matchup: String,
    pub away_team: String,
    pub home_team: String,
    pub away_pitcher: PitcherProfile,
    pub home_pitcher: PitcherProfile,
    pub records: Vec<MatchupRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PitcherProfile {
    /// Raw feed name ("Last, First"); matchup records key on this.
    pub name: String,
    /// Sorted by usage, most-thrown first.
    pub arsenal: Vec<Pitch>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pitch {
    pub code: String,
    pub name: String,
    /// Fraction of pitches thrown, 0-1.
    pub usage_rate: f64,
    pub avg_speed: f64,
}

/// Home-plate umpire for one game, with multipliers relative to 1.0.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UmpireAssignment {
    pub umpire: String,
    pub matchup: String,
    pub k_boost: f64,
    pub bb_boost: f64,
}

// ── Matchup API ──────────────────────────────────────────────────────

/// Matchup API response: `{"reports": [...]}`.
#[derive(Debug, Deserialize)]
pub struct SavantResponse {
    #[serde(default)]
    pub reports: Vec<SavantReport>,
}

#[derive(Debug, Deserialize)]
pub struct SavantReport {
    #[serde(default)]
    pub matchup: String,
    pub pitchers: SavantPitchers,
    #[serde(default)]
    pub key_matchups: Vec<SavantKeyMatchup>,
}

#[derive(Debug, Deserialize)]
pub struct SavantPitchers {
    pub away: SavantPitcher,
    pub home: SavantPitcher,
}

#[derive(Debug, Deserialize)]
pub struct SavantPitcher {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub arsenal: BTreeMap<String, SavantPitch>,
}

#[derive(Debug, Deserialize)]
pub struct SavantPitch {
    pub name: Option<String>,
    #[serde(default)]
    pub usage_rate: f64,
    #[serde(default)]
    pub avg_speed: f64,
}

#[derive(Debug, Deserialize)]
pub struct SavantKeyMatchup {
    #[serde(default)]
    pub batter: String,
    #[serde(default)]
    pub vs_pitcher: String,
    #[serde(default)]
    pub reliability: String,
    pub baseline_stats: Option<SavantBaseline>,
    pub weighted_est_ba: Option<f64>,
    pub weighted_k_rate: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct SavantBaseline {
    pub season_avg: Option<f64>,
    pub season_k_pct: Option<f64>,
}

// ── Umpire API ───────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct UmpireEntry {
    #[serde(default)]
    pub umpire: String,
    #[serde(default)]
    pub matchup: String,
    #[serde(default = "neutral_multiplier", deserialize_with = "multiplier")]
    pub k_boost: f64,
    #[serde(default = "neutral_multiplier", deserialize_with = "multiplier")]
    pub bb_boost: f64,
}

fn neutral_multiplier() -> f64 {
    1.0
}

/// Multipliers arrive as `"1.15x"` strings or bare numbers. Anything
/// unparseable is treated as neutral.
fn multiplier<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n.as_f64().unwrap_or(1.0),
        serde_json::Value::String(s) => parse_multiplier(&s).unwrap_or(1.0),
        _ => 1.0,
    })
}

/// Parse `"1.15x"`, `"0.92X"` or `"1.0"`.
pub fn parse_multiplier(s: &str) -> Option<f64> {
    s.trim().trim_end_matches(['x', 'X']).trim().parse::<f64>().ok()
}
