use serde::{Deserialize, Serialize};

/// Operational status reported for an asset.
///
/// The service emits capitalized labels; anything unrecognized maps to
/// `Unknown` instead of failing the whole inventory payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssetStatus {
    Online,
    Offline,
    Warning,
    Maintenance,
    #[serde(other)]
    Unknown,
}

/// A monitored piece of equipment placed on the plant floor plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub id: i64,
    pub name: String,
    /// Category label, e.g. "Hydraulic Pump". Wire field is `type`.
    #[serde(rename = "type")]
    pub kind: String,
    pub status: AssetStatus,
    /// Horizontal position as a percentage of the floor plan (0-100).
    pub x_pct: f64,
    /// Vertical position as a percentage of the floor plan (0-100).
    pub y_pct: f64,
}
