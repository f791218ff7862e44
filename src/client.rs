use serde::de::DeserializeOwned;
use tracing::warn;

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::types::asset::{Asset, AssetStatus};
use crate::types::prediction::{now_timestamp, Prediction, PredictionRequest};
use crate::types::sensor::SensorReading;

/// Client for the telemetry service.
///
/// Read paths never fail: transport errors, non-success statuses, and
/// malformed bodies all collapse into a locally-defined fallback so the
/// dashboard stays populated while the service is degraded. The submission
/// path is the opposite: every failure is surfaced, because acting on a
/// fabricated risk value would be worse than showing an error.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url,
        }
    }

    /// Build a client configured from the environment.
    pub fn from_env() -> Self {
        Self::new(ApiConfig::from_env())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Server {
                status: status.as_u16(),
            });
        }
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::MalformedResponse(e.to_string()))
    }

    /// Fetch the asset inventory, substituting the built-in sample set on
    /// any failure.
    pub async fn fetch_assets(&self) -> Vec<Asset> {
        match self.get_json("/assets").await {
            Ok(assets) => assets,
            Err(err) => {
                warn!("asset fetch failed ({err}); serving sample assets");
                sample_assets()
            }
        }
    }

    /// Fetch recent sensor readings, substituting an empty collection on
    /// any failure.
    pub async fn fetch_sensor_readings(&self) -> Vec<SensorReading> {
        match self.get_json("/sensors").await {
            Ok(readings) => readings,
            Err(err) => {
                warn!("sensor fetch failed ({err}); serving no readings");
                Vec::new()
            }
        }
    }

    /// Fetch the failure-risk prediction stream, substituting the built-in
    /// sample set on any failure.
    pub async fn fetch_predictions(&self) -> Vec<Prediction> {
        match self.get_json("/predict").await {
            Ok(predictions) => predictions,
            Err(err) => {
                warn!("prediction fetch failed ({err}); serving sample predictions");
                sample_predictions()
            }
        }
    }

    /// Request a prediction for one machine's current readings.
    ///
    /// Unlike the read paths this propagates every failure. Services that
    /// serialize the score as a numeric string are tolerated; anything else
    /// in the `prediction` field is malformed.
    pub async fn submit_prediction(&self, request: &PredictionRequest) -> Result<f64, ApiError> {
        let response = self
            .http
            .post(format!("{}/predict", self.base_url))
            .json(request)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Server {
                status: status.as_u16(),
            });
        }
        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ApiError::MalformedResponse(e.to_string()))?;
        let value = body
            .get("prediction")
            .ok_or_else(|| ApiError::MalformedResponse("missing `prediction` field".to_string()))?;
        prediction_value(value)
    }
}

/// Normalize the `prediction` field of a submission response.
///
/// Accepts a JSON number or a string holding a finite float; everything
/// else is malformed.
pub fn prediction_value(value: &serde_json::Value) -> Result<f64, ApiError> {
    let parsed = match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match parsed {
        Some(risk) if risk.is_finite() => Ok(risk),
        _ => Err(ApiError::MalformedResponse(format!(
            "`prediction` is not a number: {value}"
        ))),
    }
}

/// Built-in asset inventory served while the service is unreachable.
pub fn sample_assets() -> Vec<Asset> {
    vec![
        Asset {
            id: 1,
            name: "Pump A1".to_string(),
            kind: "Hydraulic Pump".to_string(),
            status: AssetStatus::Online,
            x_pct: 20.0,
            y_pct: 30.0,
        },
        Asset {
            id: 2,
            name: "Motor B2".to_string(),
            kind: "Electric Motor".to_string(),
            status: AssetStatus::Warning,
            x_pct: 45.0,
            y_pct: 55.0,
        },
        Asset {
            id: 3,
            name: "Valve C3".to_string(),
            kind: "Control Valve".to_string(),
            status: AssetStatus::Offline,
            x_pct: 70.0,
            y_pct: 25.0,
        },
        Asset {
            id: 4,
            name: "Fan D4".to_string(),
            kind: "Cooling Fan".to_string(),
            status: AssetStatus::Online,
            x_pct: 80.0,
            y_pct: 75.0,
        },
    ]
}

/// Built-in prediction stream served while the service is unreachable.
pub fn sample_predictions() -> Vec<Prediction> {
    let timestamp = now_timestamp();
    vec![
        Prediction {
            id: 1,
            machine_id: "A101".to_string(),
            timestamp: timestamp.clone(),
            risk: 0.25,
        },
        Prediction {
            id: 2,
            machine_id: "B202".to_string(),
            timestamp: timestamp.clone(),
            risk: 0.78,
        },
        Prediction {
            id: 3,
            machine_id: "C303".to_string(),
            timestamp,
            risk: 0.12,
        },
    ]
}
