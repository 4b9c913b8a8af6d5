//! Betting lean selection: at most one actionable lean per game, chosen from
//! the standout batters and both lineups' strikeout shifts.

use super::advantage::{StandoutBatter, TeamAdvantageSummary};
use super::matchup::display_name;
use super::stats::{Average, Percentage};
use serde::{Deserialize, Serialize};

pub const NO_EDGE_RATIONALE: &str =
    "No significant statistical edges meet our betting threshold in this matchup.";

/// Gates a statistical edge must clear before it becomes a lean.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LeanThresholds {
    pub batter_min_arsenal_ba: Average,
    pub batter_min_boost: Average,
    pub strikeout_over_min_pct: Percentage,
    pub strikeout_under_max_pct: Percentage,
    pub strikeout_min_delta: Percentage,
}

impl Default for LeanThresholds {
    fn default() -> Self {
        Self {
            batter_min_arsenal_ba: Average(0.300),
            batter_min_boost: Average(0.020),
            strikeout_over_min_pct: Percentage(25.0),
            strikeout_under_max_pct: Percentage(15.0),
            strikeout_min_delta: Percentage(4.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LeanKind {
    None,
    BatterProp,
    StrikeoutOver,
    StrikeoutUnder,
}

/// The exact figures behind a lean.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LeanEvidence {
    None,
    Batter {
        team: String,
        season_batting_average: Average,
        arsenal_batting_average: Average,
        boost: Average,
    },
    Strikeout {
        team: String,
        pitcher: String,
        season_strikeout_pct: Percentage,
        arsenal_strikeout_pct: Percentage,
        delta: Percentage,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BettingLean {
    pub kind: LeanKind,
    pub subject: String,
    pub supporting_numbers: LeanEvidence,
    pub rationale: String,
}

impl BettingLean {
    pub fn none() -> Self {
        Self {
            kind: LeanKind::None,
            subject: String::new(),
            supporting_numbers: LeanEvidence::None,
            rationale: NO_EDGE_RATIONALE.to_string(),
        }
    }

    pub fn is_actionable(&self) -> bool {
        self.kind != LeanKind::None
    }
}

struct BatterCandidate<'a> {
    team: &'a str,
    batter: &'a StandoutBatter,
    boost: Average,
}

struct StrikeoutCandidate<'a> {
    team: &'a str,
    summary: &'a TeamAdvantageSummary,
    kind: LeanKind,
}

/// Flatten each lineup's standouts into `(team, batter)` pairs for `decide`.
pub fn standouts_of<'a>(
    summaries: &[(&'a str, &'a TeamAdvantageSummary)],
) -> Vec<(&'a str, &'a StandoutBatter)> {
    summaries
        .iter()
        .flat_map(|(team, summary)| summary.standout_batters.iter().map(move |b| (*team, b)))
        .collect()
}

pub fn decide(
    summaries: &[(&str, &TeamAdvantageSummary)],
    standouts: &[(&str, &StandoutBatter)],
) -> BettingLean {
    decide_with(summaries, standouts, &LeanThresholds::default())
}

/// Pick the single strongest lean across both lineups, or `LeanKind::None`.
///
/// Batter props need xBA over the absolute gate *and* a boost over the
/// minimum; strikeout props need the projected K% past the over/under gate
/// *and* a shift of more than the minimum delta. Every comparison is strict.
///
/// When both kinds qualify, the leaders' raw margins over their thresholds
/// (`boost - min_boost` against `|delta| - min_delta`) are compared and the
/// larger wins. Ties go to the batter. Within a kind, the first leader in
/// input order wins ties.
pub fn decide_with(
    summaries: &[(&str, &TeamAdvantageSummary)],
    standouts: &[(&str, &StandoutBatter)],
    thresholds: &LeanThresholds,
) -> BettingLean {
    let best_batter = standouts
        .iter()
        .filter(|(_, b)| {
            b.arsenal_batting_average > thresholds.batter_min_arsenal_ba
                && (b.arsenal_batting_average - b.season_batting_average) > thresholds.batter_min_boost
        })
        .map(|&(team, batter)| BatterCandidate {
            team,
            batter,
            boost: batter.arsenal_batting_average - batter.season_batting_average,
        })
        .reduce(|best, c| if c.boost > best.boost { c } else { best });

    let best_strikeout = summaries
        .iter()
        .filter_map(|&(team, summary)| {
            strikeout_kind(summary, thresholds).map(|kind| StrikeoutCandidate { team, summary, kind })
        })
        .reduce(|best, c| {
            if c.summary.strikeout_pct_delta.abs() > best.summary.strikeout_pct_delta.abs() {
                c
            } else {
                best
            }
        });

    match (best_batter, best_strikeout) {
        (None, None) => BettingLean::none(),
        (Some(b), None) => batter_lean(&b),
        (None, Some(k)) => strikeout_lean(&k),
        (Some(b), Some(k)) => {
            let batter_margin = (b.boost - thresholds.batter_min_boost).value();
            let k_margin = (k.summary.strikeout_pct_delta.abs() - thresholds.strikeout_min_delta).value();
            if batter_margin >= k_margin {
                batter_lean(&b)
            } else {
                strikeout_lean(&k)
            }
        }
    }
}

fn strikeout_kind(summary: &TeamAdvantageSummary, thresholds: &LeanThresholds) -> Option<LeanKind> {
    let arsenal_k = summary.arsenal_strikeout_pct;
    let delta = summary.strikeout_pct_delta;
    if arsenal_k > thresholds.strikeout_over_min_pct && delta > thresholds.strikeout_min_delta {
        Some(LeanKind::StrikeoutOver)
    } else if arsenal_k < thresholds.strikeout_under_max_pct
        && delta < Percentage(-thresholds.strikeout_min_delta.value())
    {
        Some(LeanKind::StrikeoutUnder)
    } else {
        None
    }
}

fn batter_lean(c: &BatterCandidate) -> BettingLean {
    let name = c.batter.display_name();
    BettingLean {
        kind: LeanKind::BatterProp,
        rationale: format!(
            "{} ({}) projects to a {} xBA against this arsenal, {} points over a {} season average.",
            name,
            c.team,
            c.batter.arsenal_batting_average,
            c.boost.points(),
            c.batter.season_batting_average,
        ),
        subject: name,
        supporting_numbers: LeanEvidence::Batter {
            team: c.team.to_string(),
            season_batting_average: c.batter.season_batting_average,
            arsenal_batting_average: c.batter.arsenal_batting_average,
            boost: c.boost,
        },
    }
}

fn strikeout_lean(c: &StrikeoutCandidate) -> BettingLean {
    let pitcher = display_name(&c.summary.pitcher);
    let s = c.summary;
    let (direction, side) = match c.kind {
        LeanKind::StrikeoutUnder => ("down", "UNDER"),
        _ => ("up", "OVER"),
    };
    BettingLean {
        kind: c.kind,
        subject: format!("{} vs {}", c.team, pitcher),
        supporting_numbers: LeanEvidence::Strikeout {
            team: c.team.to_string(),
            pitcher: s.pitcher.clone(),
            season_strikeout_pct: s.season_strikeout_pct,
            arsenal_strikeout_pct: s.arsenal_strikeout_pct,
            delta: s.strikeout_pct_delta,
        },
        rationale: format!(
            "The {} projected K-rate is {} vs {}, {} {} from their {} season average. Lean {} on {} strikeouts.",
            c.team,
            s.arsenal_strikeout_pct,
            pitcher,
            direction,
            s.strikeout_pct_delta.abs(),
            s.season_strikeout_pct,
            side,
            pitcher,
        ),
    }
}
