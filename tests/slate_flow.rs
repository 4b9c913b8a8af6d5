//! Slate assembly against stub feeds.

use anyhow::Result;
use async_trait::async_trait;
use mlb_edge::engine::{AdvantageConfig, LeanKind, LeanThresholds};
use mlb_edge::feed::savant::parse_reports;
use mlb_edge::feed::types::{GameReport, UmpireAssignment};
use mlb_edge::feed::umpire::parse_umpires;
use mlb_edge::feed::{MatchupFeed, UmpireFeed};
use mlb_edge::preview::build_slate;

const REPORTS: &str = r#"{
    "reports": [
        {
            "matchup": "Braves @ Mariners",
            "pitchers": {
                "away": {"name": "Sale, Chris", "arsenal": {"SL": {"name": "Slider", "usage_rate": 0.45, "avg_speed": 79.1}}},
                "home": {"name": "Kikuchi, Yusei", "arsenal": {"FF": {"name": "Four-Seam Fastball", "usage_rate": 0.40, "avg_speed": 95.2}}}
            },
            "key_matchups": [
                {"batter": "Riley, Austin", "vs_pitcher": "Kikuchi, Yusei", "reliability": "HIGH",
                 "baseline_stats": {"season_avg": 0.262, "season_k_pct": 23.4},
                 "weighted_est_ba": 0.255, "weighted_k_rate": 27.6},
                {"batter": "Raleigh, Cal", "vs_pitcher": "Sale, Chris", "reliability": "medium",
                 "baseline_stats": {"season_avg": 0.240, "season_k_pct": 27.0},
                 "weighted_est_ba": 0.244, "weighted_k_rate": 26.0}
            ]
        },
        {
            "matchup": "Mets @ Phillies",
            "pitchers": {"away": {"name": "Senga, Kodai"}, "home": {"name": "Wheeler, Zack"}},
            "key_matchups": [
                {"batter": "Soto, Juan", "vs_pitcher": "Wheeler, Zack", "reliability": "HIGH",
                 "baseline_stats": {"season_avg": 0.263, "season_k_pct": 19.0},
                 "weighted_est_ba": 0.369, "weighted_k_rate": 18.0}
            ]
        }
    ]
}"#;

const UMPIRES: &str = r#"[
    {"umpire": "Pat Hoberg", "matchup": "Braves @ Mariners", "k_boost": "1.12x", "bb_boost": "0.95x"}
]"#;

struct StubMatchups(Vec<GameReport>);

#[async_trait]
impl MatchupFeed for StubMatchups {
    async fn fetch_reports(&self) -> Result<Vec<GameReport>> {
        Ok(self.0.clone())
    }
}

struct StubUmpires(Option<Vec<UmpireAssignment>>);

#[async_trait]
impl UmpireFeed for StubUmpires {
    async fn fetch_umpires(&self) -> Result<Vec<UmpireAssignment>> {
        match &self.0 {
            Some(u) => Ok(u.clone()),
            None => anyhow::bail!("umpire API (503 Service Unavailable): down"),
        }
    }
}

struct FailingMatchups;

#[async_trait]
impl MatchupFeed for FailingMatchups {
    async fn fetch_reports(&self) -> Result<Vec<GameReport>> {
        anyhow::bail!("matchup API (500 Internal Server Error)")
    }
}

#[tokio::test]
async fn test_slate_builds_one_preview_per_game() {
    let matchups = StubMatchups(parse_reports(REPORTS).unwrap());
    let umpires = StubUmpires(Some(parse_umpires(UMPIRES).unwrap()));
    let previews = build_slate(&matchups, &umpires, &AdvantageConfig::default(), &LeanThresholds::default())
        .await
        .unwrap();

    assert_eq!(previews.len(), 2);

    let braves = &previews[0];
    assert_eq!(braves.umpire.name, "Pat Hoberg");
    assert_eq!(braves.umpire.strikeout_label.as_deref(), Some("+12% strikeouts"));
    assert_eq!(braves.umpire.walk_label.as_deref(), Some("-5% walks"));
    assert_eq!(braves.lean.kind, LeanKind::StrikeoutOver);
    assert_eq!(braves.lean.subject, "Braves vs Yusei Kikuchi");
    assert!(braves.keywords.contains(&"pitcher friendly umpire".to_string()));

    let mets = &previews[1];
    assert_eq!(mets.umpire.name, "TBA");
    assert!(mets.umpire.strikeout_label.is_none());
    assert_eq!(mets.lean.kind, LeanKind::BatterProp);
    assert_eq!(mets.lean.subject, "Juan Soto");
    assert_eq!(mets.away_pitcher.arsenal, "Mixed arsenal");
}

#[tokio::test]
async fn test_umpire_outage_is_not_fatal() {
    let matchups = StubMatchups(parse_reports(REPORTS).unwrap());
    let umpires = StubUmpires(None);
    let previews = build_slate(&matchups, &umpires, &AdvantageConfig::default(), &LeanThresholds::default())
        .await
        .unwrap();
    assert_eq!(previews.len(), 2);
    assert!(previews.iter().all(|p| p.umpire.name == "TBA"));
}

#[tokio::test]
async fn test_matchup_outage_is_an_error() {
    let umpires = StubUmpires(Some(Vec::new()));
    let result = build_slate(&FailingMatchups, &umpires, &AdvantageConfig::default(), &LeanThresholds::default()).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_stricter_thresholds_suppress_leans() {
    let matchups = StubMatchups(parse_reports(REPORTS).unwrap());
    let umpires = StubUmpires(Some(Vec::new()));
    let strict = LeanThresholds {
        batter_min_arsenal_ba: mlb_edge::engine::Average(0.400),
        strikeout_min_delta: mlb_edge::engine::Percentage(5.0),
        ..LeanThresholds::default()
    };
    let previews = build_slate(&matchups, &umpires, &AdvantageConfig::default(), &strict)
        .await
        .unwrap();
    assert!(previews.iter().all(|p| p.lean.kind == LeanKind::None));
}
