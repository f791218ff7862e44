use serde::{Deserialize, Serialize};

/// One telemetry sample from the plant sensor feed.
///
/// `timestamp` is the sole ordering key. Any metric may be absent on a
/// given sample; the aggregator treats missing values as zero rather than
/// propagating the absence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    /// ISO-8601 timestamp of the sample.
    pub timestamp: String,
    pub temperature: Option<f64>,
    pub vibration: Option<f64>,
    pub power_consumption: Option<f64>,
    pub humidity: Option<f64>,
    pub pressure: Option<f64>,
}
