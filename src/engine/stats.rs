//! Scale-safe stat types.
//!
//! Batting averages live on a 0-1 scale and strikeout rates on a 0-100 scale.
//! Keeping them in separate types means a `.300` average can never be compared
//! against a `25.0` percent threshold by accident.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Sub;

/// Batting average (or a difference between two), 0-1 scale.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Average(pub f64);

/// Rate in percentage points (or a difference between two), 0-100 scale.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Percentage(pub f64);

impl Average {
    pub fn value(self) -> f64 {
        self.0
    }

    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }

    /// Arithmetic mean, or `None` for an empty iterator.
    pub fn mean<I: IntoIterator<Item = Average>>(values: I) -> Option<Self> {
        mean(values.into_iter().map(|v| v.0)).map(Self)
    }

    /// Difference expressed in batting-average points: `+0.106` -> `+106`.
    pub fn points(self) -> String {
        format!("{:+}", (self.0 * 1000.0).round() as i64)
    }
}

impl Percentage {
    pub fn value(self) -> f64 {
        self.0
    }

    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }

    pub fn mean<I: IntoIterator<Item = Percentage>>(values: I) -> Option<Self> {
        mean(values.into_iter().map(|v| v.0)).map(Self)
    }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// Differences are snapped to 1e-9 so that threshold gates see `.321 - .301`
/// as exactly `.020` rather than `.020000000000000018`.
fn settle(v: f64) -> f64 {
    (v * 1e9).round() / 1e9
}

impl Sub for Average {
    type Output = Average;

    fn sub(self, rhs: Self) -> Self::Output {
        Average(settle(self.0 - rhs.0))
    }
}

impl Sub for Percentage {
    type Output = Percentage;

    fn sub(self, rhs: Self) -> Self::Output {
        Percentage(settle(self.0 - rhs.0))
    }
}

/// Baseball style: `.369`, `1.000`, `-.012`.
impl fmt::Display for Average {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let raw = format!("{:.3}", self.0.abs());
        let trimmed = raw.strip_prefix('0').unwrap_or(&raw);
        if self.0 < 0.0 && trimmed != ".000" {
            write!(f, "-{}", trimmed)
        } else {
            write!(f, "{}", trimmed)
        }
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}%", self.0)
    }
}
