//! Plate-umpire API client, game lookup, and strikeout/walk tendencies.

use super::types::*;
use super::UmpireFeed;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

pub struct UmpireApi {
    client: Client,
    url: String,
}

impl UmpireApi {
    pub fn new(url: &str, request_timeout_ms: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(request_timeout_ms))
            .user_agent(concat!("mlb-edge/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("failed to build umpire API client")?;
        Ok(Self {
            client,
            url: url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl UmpireFeed for UmpireApi {
    async fn fetch_umpires(&self) -> Result<Vec<UmpireAssignment>> {
        let resp = self.client.get(&self.url).send().await
            .context("umpire API request failed")?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("umpire API ({}): {}", status, body);
        }

        let body = resp.text().await
            .context("failed to read umpire API response")?;
        parse_umpires(&body)
    }
}

pub fn parse_umpires(json: &str) -> Result<Vec<UmpireAssignment>> {
    let entries: Vec<UmpireEntry> = serde_json::from_str(json)
        .context("failed to parse umpire API response")?;
    Ok(entries
        .into_iter()
        .map(|e| UmpireAssignment {
            umpire: e.umpire,
            matchup: e.matchup,
            k_boost: e.k_boost,
            bb_boost: e.bb_boost,
        })
        .collect())
}

/// Find the plate umpire for `matchup` ("Away @ Home").
///
/// Exact key match first; otherwise any assignment whose key mentions both
/// team names.
pub fn find_game_umpire<'a>(umpires: &'a [UmpireAssignment], matchup: &str) -> Option<&'a UmpireAssignment> {
    if let Some(exact) = umpires.iter().find(|u| u.matchup == matchup) {
        return Some(exact);
    }
    let (away, home) = matchup.split_once(" @ ")?;
    umpires
        .iter()
        .find(|u| u.matchup.contains(away) && u.matchup.contains(home))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum UmpireTendency {
    PitcherFriendly,
    HitterFriendly,
    Mixed,
    Neutral,
}

impl UmpireAssignment {
    pub fn tendency(&self) -> UmpireTendency {
        match (self.k_boost > 1.0, self.bb_boost > 1.0, self.k_boost < 1.0, self.bb_boost < 1.0) {
            (true, true, _, _) => UmpireTendency::Mixed,
            (true, _, _, true) => UmpireTendency::PitcherFriendly,
            (_, true, true, _) => UmpireTendency::HitterFriendly,
            _ => UmpireTendency::Neutral,
        }
    }

    /// `1.11` -> `+11% strikeouts`.
    pub fn strikeout_label(&self) -> String {
        format!("{} strikeouts", boost_pct(self.k_boost))
    }

    pub fn walk_label(&self) -> String {
        format!("{} walks", boost_pct(self.bb_boost))
    }
}

fn boost_pct(multiplier: f64) -> String {
    format!("{:+}%", ((multiplier - 1.0) * 100.0).round() as i64)
}
