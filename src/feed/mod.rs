//! Data providers: the daily matchup report and the plate-umpire assignments.

pub mod savant;
pub mod types;
pub mod umpire;

use anyhow::Result;
use async_trait::async_trait;
use types::{GameReport, UmpireAssignment};

/// Source of per-game batter-vs-starter matchup reports.
#[async_trait]
pub trait MatchupFeed: Send + Sync {
    async fn fetch_reports(&self) -> Result<Vec<GameReport>>;
}

/// Source of plate-umpire assignments and their K/BB multipliers.
#[async_trait]
pub trait UmpireFeed: Send + Sync {
    async fn fetch_umpires(&self) -> Result<Vec<UmpireAssignment>>;
}
