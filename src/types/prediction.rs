use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// A failure-risk score produced by the prediction service for one machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub id: i64,
    pub machine_id: String,
    /// ISO-8601 timestamp; the sole ordering key for the prediction stream.
    pub timestamp: String,
    /// Failure risk in [0, 1]. Out-of-range scores are classified
    /// defensively rather than rejected.
    pub risk: f64,
}

/// Request payload for an on-demand prediction.
///
/// Field casing matches the feature frame the service's model pipeline
/// consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub machine_id: String,
    #[serde(rename = "Temperature")]
    pub temperature: f64,
    #[serde(rename = "Vibration")]
    pub vibration: f64,
    #[serde(rename = "Power_Usage")]
    pub power_usage: f64,
    #[serde(rename = "Humidity")]
    pub humidity: f64,
    #[serde(rename = "Pressure")]
    pub pressure: f64,
    #[serde(rename = "Machine_Type")]
    pub machine_type: String,
}

/// Current time as an ISO-8601 string, the format the service emits.
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
