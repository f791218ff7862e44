use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::prediction::Prediction;

/// Discrete severity derived from a continuous failure-risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskBucket {
    Minimal,
    Low,
    Medium,
    High,
    Critical,
}

impl RiskBucket {
    /// Classify a risk score. Highest matching threshold wins; out-of-range
    /// scores are not clamped, they land in the nearest bucket.
    pub fn from_risk(risk: f64) -> Self {
        if risk >= 0.8 {
            RiskBucket::Critical
        } else if risk >= 0.6 {
            RiskBucket::High
        } else if risk >= 0.4 {
            RiskBucket::Medium
        } else if risk >= 0.2 {
            RiskBucket::Low
        } else {
            RiskBucket::Minimal
        }
    }

    /// The binary operational status shown next to the bucket.
    pub fn status(self) -> OperationalStatus {
        match self {
            RiskBucket::Critical | RiskBucket::High => OperationalStatus::Attention,
            _ => OperationalStatus::Normal,
        }
    }
}

impl fmt::Display for RiskBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RiskBucket::Minimal => "Minimal",
            RiskBucket::Low => "Low",
            RiskBucket::Medium => "Medium",
            RiskBucket::High => "High",
            RiskBucket::Critical => "Critical",
        };
        f.write_str(label)
    }
}

/// Binary operational status. High and Critical both demand attention and
/// share the same textual label; the severity distinction is carried by the
/// bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OperationalStatus {
    Normal,
    Attention,
}

impl fmt::Display for OperationalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationalStatus::Normal => f.write_str("NORMAL"),
            OperationalStatus::Attention => f.write_str("ATTENTION"),
        }
    }
}

/// Coarse status counts for the summary cards.
///
/// Counted independently of `RiskBucket`: warning covers the 0.6..0.8 band
/// and normal is everything below 0.6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct StatusSummary {
    pub critical: usize,
    pub warning: usize,
    pub normal: usize,
}

/// Count predictions into the coarse summary bands.
pub fn status_summary(predictions: &[Prediction]) -> StatusSummary {
    let mut summary = StatusSummary::default();
    for prediction in predictions {
        if prediction.risk >= 0.8 {
            summary.critical += 1;
        } else if prediction.risk >= 0.6 {
            summary.warning += 1;
        } else {
            summary.normal += 1;
        }
    }
    summary
}
