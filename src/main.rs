use anyhow::{Context, Result};
use mlb_edge::config::Config;
use mlb_edge::engine::LeanKind;
use mlb_edge::feed::{savant::SavantMatchupApi, umpire::UmpireApi};
use mlb_edge::preview::{build_slate, GamePreview, LineupReport};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

struct Args {
    json: bool,
    config: PathBuf,
}

fn parse_args() -> Result<Args> {
    let mut args = Args {
        json: false,
        config: PathBuf::from("config.toml"),
    };
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--json" => args.json = true,
            "--config" => {
                let path = iter.next().context("--config needs a path")?;
                args.config = PathBuf::from(path);
            }
            other => anyhow::bail!("unknown argument: {} (usage: mlb-edge [--json] [--config PATH])", other),
        }
    }
    Ok(args)
}

fn print_lineup(lineup: &LineupReport, pitcher: &str) {
    let s = &lineup.summary;
    println!(
        "    {} vs {}: BA {} -> {} ({} pts), K {} -> {} ({:+.1}), {} reliable",
        lineup.team,
        pitcher,
        s.season_batting_average,
        s.arsenal_batting_average,
        s.batting_average_delta.points(),
        s.season_strikeout_pct,
        s.arsenal_strikeout_pct,
        s.strikeout_pct_delta.value(),
        s.sample_size,
    );
    if let Some(b) = &lineup.headlines.biggest_gain {
        println!("      up:   {} {} -> {} ({})", b.display_name(), b.season_batting_average, b.arsenal_batting_average, b.ba_diff.points());
    }
    if let Some(b) = &lineup.headlines.biggest_drop {
        println!("      down: {} {} -> {} ({})", b.display_name(), b.season_batting_average, b.arsenal_batting_average, b.ba_diff.points());
    }
}

fn print_preview(p: &GamePreview) {
    println!("  {}", p.topic);
    println!("    Pitching: {} vs {}", p.away_pitcher.name, p.home_pitcher.name);
    print_lineup(&p.away_lineup, &p.home_pitcher.name);
    print_lineup(&p.home_lineup, &p.away_pitcher.name);
    match (&p.umpire.strikeout_label, &p.umpire.walk_label) {
        (Some(k), Some(bb)) => println!("    Umpire: {} ({}, {})", p.umpire.name, k, bb),
        _ => println!("    Umpire: {}", p.umpire.name),
    }
    let label = match p.lean.kind {
        LeanKind::None => "NO LEAN",
        LeanKind::BatterProp => "BATTER PROP",
        LeanKind::StrikeoutOver => "K OVER",
        LeanKind::StrikeoutUnder => "K UNDER",
    };
    println!("    [{}] {}", label, p.lean.rationale);
    println!();
}

#[tokio::main]
async fn main() -> Result<()> {
    let log_file = std::fs::File::create("mlb-edge.log")?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("mlb_edge=info")),
        )
        .with_ansi(false)
        .with_writer(log_file)
        .init();

    let args = parse_args()?;

    // Load saved overrides from .env (real env vars take precedence)
    Config::load_env_file();
    let config = Config::load(&args.config)?;

    let matchups = SavantMatchupApi::new(&config.feed.matchup_api_url, config.feed.request_timeout_ms)?;
    let umpires = UmpireApi::new(&config.feed.umpire_api_url, config.feed.request_timeout_ms)?;

    let previews = match build_slate(&matchups, &umpires, &config.advantage, &config.lean).await {
        Ok(p) => p,
        Err(e) => {
            tracing::error!("slate fetch failed: {:#}", e);
            Vec::new()
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&previews)?);
        return Ok(());
    }

    let date = chrono::Local::now().format("%Y-%m-%d");
    println!();
    println!("  MLB Matchup Edges {}", date);
    println!("  ============================");
    println!();

    if previews.is_empty() {
        println!("  No games available (see mlb-edge.log)");
        return Ok(());
    }

    for p in &previews {
        print_preview(p);
    }

    let leans = previews.iter().filter(|p| p.lean.is_actionable()).count();
    println!("  {} games, {} with a lean", previews.len(), leans);
    tracing::debug!("done");
    Ok(())
}
