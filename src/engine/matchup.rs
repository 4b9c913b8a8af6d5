//! Per-batter matchup records with league-average fallbacks for missing stats.

use super::stats::{Average, Percentage};
use serde::Serialize;

/// League-average batting average used when a figure is missing.
pub const LEAGUE_AVG_BA: Average = Average(0.250);
/// League-average strikeout rate used when a figure is missing.
pub const LEAGUE_AVG_K_PCT: Percentage = Percentage(22.5);

/// How much history backs a matchup projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Reliability {
    Low,
    Medium,
    High,
}

impl Reliability {
    /// Case-insensitive parse. Unknown or malformed tags count as `Low`.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_uppercase().as_str() {
            "HIGH" => Reliability::High,
            "MEDIUM" => Reliability::Medium,
            _ => Reliability::Low,
        }
    }

    pub fn is_reliable(self) -> bool {
        matches!(self, Reliability::Medium | Reliability::High)
    }
}

/// One batter's projected performance against one pitcher's arsenal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchupRecord {
    pub batter: String,
    pub vs_pitcher: String,
    pub reliability: Reliability,
    pub season_batting_average: Average,
    pub season_strikeout_pct: Percentage,
    pub arsenal_batting_average: Average,
    pub arsenal_strikeout_pct: Percentage,
}

impl MatchupRecord {
    /// Build a record from feed values, filling missing figures with the
    /// league-average fallbacks instead of dropping the record.
    pub fn from_feed(
        batter: &str,
        vs_pitcher: &str,
        reliability: &str,
        season_ba: Option<f64>,
        season_k_pct: Option<f64>,
        arsenal_ba: Option<f64>,
        arsenal_k_pct: Option<f64>,
    ) -> Self {
        Self {
            batter: batter.to_string(),
            vs_pitcher: vs_pitcher.to_string(),
            reliability: Reliability::from_tag(reliability),
            season_batting_average: season_ba.map(Average).unwrap_or(LEAGUE_AVG_BA),
            season_strikeout_pct: season_k_pct.map(Percentage).unwrap_or(LEAGUE_AVG_K_PCT),
            arsenal_batting_average: arsenal_ba.map(Average).unwrap_or(LEAGUE_AVG_BA),
            arsenal_strikeout_pct: arsenal_k_pct.map(Percentage).unwrap_or(LEAGUE_AVG_K_PCT),
        }
    }

    pub fn is_usable(&self) -> bool {
        !self.vs_pitcher.trim().is_empty()
    }

    pub fn batting_average_diff(&self) -> Average {
        self.arsenal_batting_average - self.season_batting_average
    }

    /// Positive means more strikeouts against this arsenal.
    pub fn strikeout_pct_diff(&self) -> Percentage {
        self.arsenal_strikeout_pct - self.season_strikeout_pct
    }
}

/// Feed names arrive as "Last, First"; render them "First Last".
pub fn display_name(raw: &str) -> String {
    let parts: Vec<&str> = raw.split(", ").collect();
    match parts.as_slice() {
        [last, first] if !last.is_empty() && !first.is_empty() => {
            format!("{} {}", first.trim(), last.trim())
        }
        _ => raw.trim().to_string(),
    }
}
