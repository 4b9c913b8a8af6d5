pub mod advantage;
pub mod lean;
pub mod matchup;
pub mod stats;

pub use advantage::{aggregate, aggregate_with, AdvantageConfig, AdvantageKind, StandoutBatter, TeamAdvantageSummary};
pub use lean::{decide, decide_with, BettingLean, LeanEvidence, LeanKind, LeanThresholds};
pub use matchup::{MatchupRecord, Reliability};
pub use stats::{Average, Percentage};
