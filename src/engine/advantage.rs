//! Team-level matchup advantage against one opposing starter.

use super::matchup::{MatchupRecord, LEAGUE_AVG_BA, LEAGUE_AVG_K_PCT};
use super::stats::{Average, Percentage};
use serde::{Deserialize, Serialize};

/// Standout thresholds and league fallbacks used by the aggregator.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AdvantageConfig {
    /// A batter is a standout when |arsenal BA - season BA| exceeds this.
    pub standout_ba_diff: Average,
    /// ... or when |arsenal K% - season K%| exceeds this.
    pub standout_k_diff: Percentage,
    pub league_avg_ba: Average,
    pub league_avg_k_pct: Percentage,
}

impl Default for AdvantageConfig {
    fn default() -> Self {
        Self {
            standout_ba_diff: Average(0.020),
            standout_k_diff: Percentage(3.0),
            league_avg_ba: LEAGUE_AVG_BA,
            league_avg_k_pct: LEAGUE_AVG_K_PCT,
        }
    }
}

/// Why an individual batter stands out against this arsenal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvantageKind {
    StrongBa,
    PoorBa,
    /// Less likely to strike out.
    LowK,
    /// More likely to strike out.
    HighK,
    Moderate,
    None,
}

impl AdvantageKind {
    /// First match wins: StrongBa, PoorBa, LowK, HighK.
    pub fn classify(ba_diff: Average, k_diff: Percentage, config: &AdvantageConfig) -> Self {
        let ba_gate = config.standout_ba_diff;
        let k_gate = config.standout_k_diff;
        if ba_diff.abs() <= ba_gate && k_diff.abs() <= k_gate {
            return AdvantageKind::None;
        }
        if ba_diff > ba_gate {
            AdvantageKind::StrongBa
        } else if ba_diff < Average(-ba_gate.value()) {
            AdvantageKind::PoorBa
        } else if k_diff < Percentage(-k_gate.value()) {
            AdvantageKind::LowK
        } else if k_diff > k_gate {
            AdvantageKind::HighK
        } else {
            AdvantageKind::Moderate
        }
    }
}

/// A batter whose personal split against this arsenal is newsworthy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StandoutBatter {
    pub batter: String,
    pub season_batting_average: Average,
    pub arsenal_batting_average: Average,
    pub season_strikeout_pct: Percentage,
    pub arsenal_strikeout_pct: Percentage,
    pub ba_diff: Average,
    pub k_diff: Percentage,
    pub advantage: AdvantageKind,
}

impl StandoutBatter {
    pub fn display_name(&self) -> String {
        super::matchup::display_name(&self.batter)
    }
}

/// Aggregate for one lineup facing one opposing pitcher. Derived fresh per
/// request and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamAdvantageSummary {
    pub pitcher: String,
    pub sample_size: usize,
    pub batting_average_delta: Average,
    /// Positive means more strikeouts, which is worse for the lineup.
    pub strikeout_pct_delta: Percentage,
    pub season_batting_average: Average,
    pub arsenal_batting_average: Average,
    pub season_strikeout_pct: Percentage,
    pub arsenal_strikeout_pct: Percentage,
    pub standout_batters: Vec<StandoutBatter>,
}

impl TeamAdvantageSummary {
    /// Summary used when no reliable records match the pitcher.
    pub fn fallback(pitcher: &str, config: &AdvantageConfig) -> Self {
        Self {
            pitcher: pitcher.to_string(),
            sample_size: 0,
            batting_average_delta: Average(0.0),
            strikeout_pct_delta: Percentage(0.0),
            season_batting_average: config.league_avg_ba,
            arsenal_batting_average: config.league_avg_ba,
            season_strikeout_pct: config.league_avg_k_pct,
            arsenal_strikeout_pct: config.league_avg_k_pct,
            standout_batters: Vec::new(),
        }
    }
}

pub fn aggregate(records: &[MatchupRecord], pitcher_id: &str) -> TeamAdvantageSummary {
    aggregate_with(records, pitcher_id, &AdvantageConfig::default())
}

/// Reduce a lineup's records against `pitcher_id` to a team summary.
///
/// Only records for that pitcher with MEDIUM or HIGH reliability count; LOW
/// records are discarded as noise. Standouts keep input order.
pub fn aggregate_with(
    records: &[MatchupRecord],
    pitcher_id: &str,
    config: &AdvantageConfig,
) -> TeamAdvantageSummary {
    let reliable: Vec<&MatchupRecord> = records
        .iter()
        .filter(|r| r.is_usable() && r.vs_pitcher == pitcher_id)
        .filter(|r| r.reliability.is_reliable())
        .collect();

    let (Some(season_ba), Some(season_k), Some(arsenal_ba), Some(arsenal_k)) = (
        Average::mean(reliable.iter().map(|r| r.season_batting_average)),
        Percentage::mean(reliable.iter().map(|r| r.season_strikeout_pct)),
        Average::mean(reliable.iter().map(|r| r.arsenal_batting_average)),
        Percentage::mean(reliable.iter().map(|r| r.arsenal_strikeout_pct)),
    ) else {
        tracing::debug!(pitcher = pitcher_id, total = records.len(), "no reliable matchups, using league fallback");
        return TeamAdvantageSummary::fallback(pitcher_id, config);
    };

    let standout_batters = reliable
        .iter()
        .filter_map(|r| {
            let ba_diff = r.batting_average_diff();
            let k_diff = r.strikeout_pct_diff();
            match AdvantageKind::classify(ba_diff, k_diff, config) {
                AdvantageKind::None => None,
                advantage => Some(StandoutBatter {
                    batter: r.batter.clone(),
                    season_batting_average: r.season_batting_average,
                    arsenal_batting_average: r.arsenal_batting_average,
                    season_strikeout_pct: r.season_strikeout_pct,
                    arsenal_strikeout_pct: r.arsenal_strikeout_pct,
                    ba_diff,
                    k_diff,
                    advantage,
                }),
            }
        })
        .collect();

    TeamAdvantageSummary {
        pitcher: pitcher_id.to_string(),
        sample_size: reliable.len(),
        batting_average_delta: arsenal_ba - season_ba,
        strikeout_pct_delta: arsenal_k - season_k,
        season_batting_average: season_ba,
        arsenal_batting_average: arsenal_ba,
        season_strikeout_pct: season_k,
        arsenal_strikeout_pct: arsenal_k,
        standout_batters,
    }
}
