//! Per-game preview assembly: both lineup summaries, the lean, the umpire,
//! and the topic/keyword metadata handed to the downstream writer.

use crate::engine::advantage::{aggregate_with, AdvantageConfig, StandoutBatter, TeamAdvantageSummary};
use crate::engine::lean::{decide_with, standouts_of, BettingLean, LeanThresholds};
use crate::engine::matchup::display_name;
use crate::engine::stats::{Average, Percentage};
use crate::feed::types::{GameReport, PitcherProfile, UmpireAssignment};
use crate::feed::umpire::{find_game_umpire, UmpireTendency};
use crate::feed::{MatchupFeed, UmpireFeed};
use anyhow::{Context, Result};
use futures_util::future::join;
use serde::Serialize;

/// Team BA shift that earns the "matchup edge" keywords.
const KEYWORD_BA_SHIFT: Average = Average(0.015);
/// Team K% shift that earns the strikeout keywords.
const KEYWORD_K_SHIFT: Percentage = Percentage(3.0);
/// Individual swings smaller than this are not headlined.
const HEADLINE_MIN_SWING: Average = Average(0.015);

#[derive(Debug, Clone, Serialize)]
pub struct PitcherCard {
    pub name: String,
    pub feed_name: String,
    pub arsenal: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct UmpireCard {
    pub name: String,
    pub k_boost: f64,
    pub bb_boost: f64,
    pub tendency: Option<UmpireTendency>,
    /// `+11% strikeouts`; `None` while the umpire is TBA.
    pub strikeout_label: Option<String>,
    pub walk_label: Option<String>,
}

impl UmpireCard {
    fn unassigned() -> Self {
        Self {
            name: "TBA".to_string(),
            k_boost: 1.0,
            bb_boost: 1.0,
            tendency: None,
            strikeout_label: None,
            walk_label: None,
        }
    }

    pub fn is_assigned(&self) -> bool {
        self.tendency.is_some()
    }
}

/// Biggest individual xBA gain and drop for one lineup.
#[derive(Debug, Clone, Default, Serialize)]
pub struct HeadlineSwings {
    pub biggest_gain: Option<StandoutBatter>,
    pub biggest_drop: Option<StandoutBatter>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LineupReport {
    pub team: String,
    pub summary: TeamAdvantageSummary,
    pub headlines: HeadlineSwings,
}

#[derive(Debug, Clone, Serialize)]
pub struct GamePreview {
    pub topic: String,
    pub keywords: Vec<String>,
    pub matchup: String,
    pub away_team: String,
    pub home_team: String,
    pub away_pitcher: PitcherCard,
    pub home_pitcher: PitcherCard,
    /// Away lineup against the home starter.
    pub away_lineup: LineupReport,
    /// Home lineup against the away starter.
    pub home_lineup: LineupReport,
    pub umpire: UmpireCard,
    pub lean: BettingLean,
}

pub fn build_preview(
    report: &GameReport,
    umpires: &[UmpireAssignment],
    advantage: &AdvantageConfig,
    thresholds: &LeanThresholds,
) -> GamePreview {
    let away_summary = aggregate_with(&report.records, &report.home_pitcher.name, advantage);
    let home_summary = aggregate_with(&report.records, &report.away_pitcher.name, advantage);

    let summaries = [
        (report.away_team.as_str(), &away_summary),
        (report.home_team.as_str(), &home_summary),
    ];
    let lean = decide_with(&summaries, &standouts_of(&summaries), thresholds);

    let umpire = match find_game_umpire(umpires, &report.matchup) {
        Some(u) => UmpireCard {
            name: u.umpire.clone(),
            k_boost: u.k_boost,
            bb_boost: u.bb_boost,
            tendency: Some(u.tendency()),
            strikeout_label: Some(u.strikeout_label()),
            walk_label: Some(u.walk_label()),
        },
        None => UmpireCard::unassigned(),
    };

    let away_pitcher = pitcher_card(&report.away_pitcher);
    let home_pitcher = pitcher_card(&report.home_pitcher);
    let keywords = keywords(report, &away_pitcher, &home_pitcher, &away_summary, &home_summary, &umpire);

    tracing::debug!(
        matchup = %report.matchup,
        away_sample = away_summary.sample_size,
        home_sample = home_summary.sample_size,
        lean = ?lean.kind,
        "preview built"
    );

    GamePreview {
        topic: format!("{} vs {} MLB Betting Preview", report.away_team, report.home_team),
        keywords,
        matchup: report.matchup.clone(),
        away_team: report.away_team.clone(),
        home_team: report.home_team.clone(),
        away_pitcher,
        home_pitcher,
        away_lineup: LineupReport {
            team: report.away_team.clone(),
            headlines: headline_swings(&away_summary.standout_batters),
            summary: away_summary,
        },
        home_lineup: LineupReport {
            team: report.home_team.clone(),
            headlines: headline_swings(&home_summary.standout_batters),
            summary: home_summary,
        },
        umpire,
        lean,
    }
}

/// Fetch today's reports and umpires concurrently and build every preview.
///
/// A failed umpire fetch is not fatal: every game shows its umpire as TBA.
/// A failed matchup fetch is, since there is nothing to preview.
pub async fn build_slate(
    matchups: &dyn MatchupFeed,
    umpires: &dyn UmpireFeed,
    advantage: &AdvantageConfig,
    thresholds: &LeanThresholds,
) -> Result<Vec<GamePreview>> {
    let (reports, umps) = join(matchups.fetch_reports(), umpires.fetch_umpires()).await;
    let reports = reports.context("matchup feed unavailable")?;
    let umps = umps.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "umpire feed failed, umpires will show as TBA");
        Vec::new()
    });
    tracing::info!(games = reports.len(), umpires = umps.len(), "slate fetched");

    let previews: Vec<GamePreview> = reports
        .iter()
        .map(|r| build_preview(r, &umps, advantage, thresholds))
        .collect();

    for p in previews.iter().filter(|p| p.lean.is_actionable()) {
        tracing::info!(matchup = %p.matchup, kind = ?p.lean.kind, subject = %p.lean.subject, "lean found");
    }
    Ok(previews)
}

fn pitcher_card(profile: &PitcherProfile) -> PitcherCard {
    PitcherCard {
        name: display_name(&profile.name),
        feed_name: profile.name.clone(),
        arsenal: format_arsenal(profile),
    }
}

/// `Slider (45% usage, 79.1 mph); Four-Seam Fastball (35% usage, 94.8 mph)`.
pub fn format_arsenal(profile: &PitcherProfile) -> String {
    if profile.arsenal.is_empty() {
        return "Mixed arsenal".to_string();
    }
    profile
        .arsenal
        .iter()
        .map(|p| format!("{} ({:.0}% usage, {:.1} mph)", p.name, p.usage_rate * 100.0, p.avg_speed))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Biggest xBA gain and biggest drop, ignoring swings under 15 points.
/// The first batter wins ties.
pub fn headline_swings(standouts: &[StandoutBatter]) -> HeadlineSwings {
    let mut out = HeadlineSwings::default();
    for b in standouts {
        if b.ba_diff >= HEADLINE_MIN_SWING
            && out.biggest_gain.as_ref().map_or(true, |g| b.ba_diff > g.ba_diff)
        {
            out.biggest_gain = Some(b.clone());
        }
        if b.ba_diff <= Average(-HEADLINE_MIN_SWING.value())
            && out.biggest_drop.as_ref().map_or(true, |d| b.ba_diff < d.ba_diff)
        {
            out.biggest_drop = Some(b.clone());
        }
    }
    out
}

fn keywords(
    report: &GameReport,
    away_pitcher: &PitcherCard,
    home_pitcher: &PitcherCard,
    away: &TeamAdvantageSummary,
    home: &TeamAdvantageSummary,
    umpire: &UmpireCard,
) -> Vec<String> {
    let mut out: Vec<String> = vec![
        report.away_team.to_lowercase(),
        report.home_team.to_lowercase(),
        "mlb betting".into(),
        "baseball preview".into(),
        "pitcher analysis".into(),
        away_pitcher.name.to_lowercase().replace(' ', "-"),
        home_pitcher.name.to_lowercase().replace(' ', "-"),
        "lineup matchups".into(),
        "umpire analysis".into(),
    ];

    if away.batting_average_delta.abs() > KEYWORD_BA_SHIFT || home.batting_average_delta.abs() > KEYWORD_BA_SHIFT {
        out.extend(["pitcher advantage".to_string(), "matchup edge".to_string()]);
    }
    if away.strikeout_pct_delta.abs() > KEYWORD_K_SHIFT || home.strikeout_pct_delta.abs() > KEYWORD_K_SHIFT {
        out.extend(["strikeout props".to_string(), "contact advantage".to_string()]);
    }
    if umpire.is_assigned() {
        if umpire.k_boost > 1.1 {
            out.extend(["strikeout props".to_string(), "pitcher friendly umpire".to_string()]);
        } else if umpire.k_boost < 0.9 {
            out.extend(["hitter friendly umpire".to_string(), "contact plays".to_string()]);
        }
    }

    let mut seen = std::collections::HashSet::new();
    out.retain(|k| seen.insert(k.clone()));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::advantage::AdvantageKind;
    use crate::engine::matchup::MatchupRecord;
    use crate::engine::LeanKind;
    use crate::feed::types::Pitch;

    fn pitcher(name: &str) -> PitcherProfile {
        PitcherProfile {
            name: name.to_string(),
            arsenal: vec![
                Pitch { code: "FF".into(), name: "Four-Seam Fastball".into(), usage_rate: 0.35, avg_speed: 97.1 },
                Pitch { code: "SL".into(), name: "Slider".into(), usage_rate: 0.18, avg_speed: 87.0 },
            ],
        }
    }

    fn report(records: Vec<MatchupRecord>) -> GameReport {
        GameReport {
            matchup: "Mets @ Braves".to_string(),
            away_team: "Mets".to_string(),
            home_team: "Braves".to_string(),
            away_pitcher: pitcher("Senga, Kodai"),
            home_pitcher: pitcher("Sale, Chris"),
            records,
        }
    }

    fn rec(batter: &str, vs: &str, season_ba: f64, arsenal_ba: f64, season_k: f64, arsenal_k: f64) -> MatchupRecord {
        MatchupRecord::from_feed(batter, vs, "HIGH", Some(season_ba), Some(season_k), Some(arsenal_ba), Some(arsenal_k))
    }

    fn standout(name: &str, ba_diff: f64) -> StandoutBatter {
        StandoutBatter {
            batter: name.to_string(),
            season_batting_average: Average(0.250),
            arsenal_batting_average: Average(0.250 + ba_diff),
            season_strikeout_pct: Percentage(20.0),
            arsenal_strikeout_pct: Percentage(20.0),
            ba_diff: Average(ba_diff),
            k_diff: Percentage(0.0),
            advantage: AdvantageKind::StrongBa,
        }
    }

    #[test]
    fn test_format_arsenal() {
        assert_eq!(
            format_arsenal(&pitcher("Sale, Chris")),
            "Four-Seam Fastball (35% usage, 97.1 mph); Slider (18% usage, 87.0 mph)"
        );
        let empty = PitcherProfile { name: "X".into(), arsenal: vec![] };
        assert_eq!(format_arsenal(&empty), "Mixed arsenal");
    }

    #[test]
    fn test_lineups_face_the_opposing_starter() {
        let records = vec![
            rec("Soto, Juan", "Sale, Chris", 0.263, 0.369, 20.0, 18.0),
            rec("Acuna, Ronald", "Senga, Kodai", 0.280, 0.250, 22.0, 22.0),
        ];
        let p = build_preview(&report(records), &[], &AdvantageConfig::default(), &LeanThresholds::default());
        assert_eq!(p.away_lineup.summary.pitcher, "Sale, Chris");
        assert_eq!(p.away_lineup.summary.standout_batters[0].batter, "Soto, Juan");
        assert_eq!(p.home_lineup.summary.pitcher, "Senga, Kodai");
        assert_eq!(p.home_lineup.summary.standout_batters[0].advantage, AdvantageKind::PoorBa);
        assert_eq!(p.lean.kind, LeanKind::BatterProp);
        assert_eq!(p.lean.subject, "Juan Soto");
    }

    #[test]
    fn test_unassigned_umpire_is_tba() {
        let p = build_preview(&report(vec![]), &[], &AdvantageConfig::default(), &LeanThresholds::default());
        assert_eq!(p.umpire.name, "TBA");
        assert!(!p.umpire.is_assigned());
        assert!(p.umpire.strikeout_label.is_none());
        assert!(p.umpire.walk_label.is_none());
        assert_eq!(p.lean.kind, LeanKind::None);
    }

    #[test]
    fn test_topic_and_base_keywords() {
        let p = build_preview(&report(vec![]), &[], &AdvantageConfig::default(), &LeanThresholds::default());
        assert_eq!(p.topic, "Mets vs Braves MLB Betting Preview");
        assert_eq!(p.away_pitcher.name, "Kodai Senga");
        assert!(p.keywords.contains(&"kodai-senga".to_string()));
        assert!(p.keywords.contains(&"chris-sale".to_string()));
        assert!(!p.keywords.contains(&"matchup edge".to_string()));
    }

    #[test]
    fn test_situational_keywords_are_deduplicated() {
        let records = vec![rec("Riley, Austin", "Senga, Kodai", 0.270, 0.240, 22.0, 28.0)];
        let umps = vec![UmpireAssignment {
            umpire: "Pat Hoberg".into(),
            matchup: "Mets @ Braves".into(),
            k_boost: 1.15,
            bb_boost: 0.95,
        }];
        let p = build_preview(&report(records), &umps, &AdvantageConfig::default(), &LeanThresholds::default());
        assert!(p.keywords.contains(&"matchup edge".to_string()));
        assert!(p.keywords.contains(&"pitcher friendly umpire".to_string()));
        let k_props = p.keywords.iter().filter(|k| k.as_str() == "strikeout props").count();
        assert_eq!(k_props, 1);
        assert_eq!(p.umpire.tendency, Some(UmpireTendency::PitcherFriendly));
        assert_eq!(p.umpire.strikeout_label.as_deref(), Some("+15% strikeouts"));
        assert_eq!(p.umpire.walk_label.as_deref(), Some("-5% walks"));
    }

    #[test]
    fn test_headline_swings() {
        let batters = vec![
            standout("A, Small", 0.010),
            standout("B, Up", 0.040),
            standout("C, Upper", 0.090),
            standout("D, Down", -0.030),
        ];
        let h = headline_swings(&batters);
        assert_eq!(h.biggest_gain.unwrap().batter, "C, Upper");
        assert_eq!(h.biggest_drop.unwrap().batter, "D, Down");
    }

    #[test]
    fn test_headline_swings_skip_small_changes() {
        let h = headline_swings(&[standout("A, Small", 0.012), standout("B, Small", -0.014)]);
        assert!(h.biggest_gain.is_none());
        assert!(h.biggest_drop.is_none());
    }

    #[test]
    fn test_headline_swings_include_fifteen_points() {
        let up = StandoutBatter {
            ba_diff: Average(0.265) - Average(0.250),
            ..standout("Up, Fifteen", 0.015)
        };
        let down = StandoutBatter {
            ba_diff: Average(0.250) - Average(0.265),
            ..standout("Down, Fifteen", -0.015)
        };
        let h = headline_swings(&[up, down]);
        assert_eq!(h.biggest_gain.unwrap().batter, "Up, Fifteen");
        assert_eq!(h.biggest_drop.unwrap().batter, "Down, Fifteen");
    }

    #[test]
    fn test_preview_serializes() {
        let p = build_preview(&report(vec![]), &[], &AdvantageConfig::default(), &LeanThresholds::default());
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["lean"]["kind"], "NONE");
        assert_eq!(json["away_lineup"]["summary"]["season_batting_average"], 0.25);
        assert_eq!(json["umpire"]["name"], "TBA");
    }
}
