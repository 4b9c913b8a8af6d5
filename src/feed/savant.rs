//! Matchup API client. Each report becomes a `GameReport` with both
//! starters' arsenals and every batter-vs-starter record.

use super::types::*;
use super::MatchupFeed;
use crate::engine::matchup::MatchupRecord;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Client for the Savant-derived daily matchup report API.
pub struct SavantMatchupApi {
    client: Client,
    url: String,
}

impl SavantMatchupApi {
    pub fn new(url: &str, request_timeout_ms: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(request_timeout_ms))
            .user_agent(concat!("mlb-edge/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("failed to build matchup API client")?;
        Ok(Self {
            client,
            url: url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl MatchupFeed for SavantMatchupApi {
    async fn fetch_reports(&self) -> Result<Vec<GameReport>> {
        let resp = self.client.get(&self.url).send().await
            .context("matchup API request failed")?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("matchup API ({}): {}", status, body);
        }

        let body = resp.text().await
            .context("failed to read matchup API response")?;
        parse_reports(&body)
    }
}

pub fn parse_reports(json: &str) -> Result<Vec<GameReport>> {
    let response: SavantResponse = serde_json::from_str(json)
        .context("failed to parse matchup API response")?;

    let mut reports = Vec::with_capacity(response.reports.len());
    for report in response.reports {
        let Some((away_team, home_team)) = report.matchup.split_once(" @ ") else {
            tracing::warn!(matchup = %report.matchup, "skipping report without away @ home matchup");
            continue;
        };

        let records = report
            .key_matchups
            .iter()
            .map(|km| {
                let baseline = km.baseline_stats.as_ref();
                MatchupRecord::from_feed(
                    &km.batter,
                    &km.vs_pitcher,
                    &km.reliability,
                    baseline.and_then(|b| b.season_avg),
                    baseline.and_then(|b| b.season_k_pct),
                    km.weighted_est_ba,
                    km.weighted_k_rate,
                )
            })
            .collect();

        reports.push(GameReport {
            away_team: away_team.trim().to_string(),
            home_team: home_team.trim().to_string(),
            away_pitcher: pitcher_profile(report.pitchers.away),
            home_pitcher: pitcher_profile(report.pitchers.home),
            matchup: report.matchup,
            records,
        });
    }
    Ok(reports)
}

fn pitcher_profile(raw: SavantPitcher) -> PitcherProfile {
    let mut arsenal: Vec<Pitch> = raw
        .arsenal
        .into_iter()
        .map(|(code, p)| Pitch {
            name: p.name.unwrap_or_else(|| code.clone()),
            code,
            usage_rate: p.usage_rate,
            avg_speed: p.avg_speed,
        })
        .collect();
    // Stable sort keeps code order for equal usage.
    arsenal.sort_by(|a, b| b.usage_rate.total_cmp(&a.usage_rate));
    PitcherProfile {
        name: raw.name,
        arsenal,
    }
}
