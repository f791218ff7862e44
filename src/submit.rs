//! Submission pipeline for on-demand predictions.

use std::sync::atomic::{AtomicI64, Ordering};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::types::prediction::{now_timestamp, Prediction, PredictionRequest};

static SUBMISSION_SEQ: AtomicI64 = AtomicI64::new(1);

/// Submit a prediction request and materialize the accepted score as a
/// `Prediction` record.
///
/// Failures propagate unchanged so callers can tell `Transport`, `Server`
/// and `MalformedResponse` apart and present each differently. No fallback
/// value is ever substituted on this path.
pub async fn submit(
    client: &ApiClient,
    request: PredictionRequest,
) -> Result<Prediction, ApiError> {
    let risk = client.submit_prediction(&request).await?;
    Ok(Prediction {
        id: SUBMISSION_SEQ.fetch_add(1, Ordering::SeqCst),
        machine_id: request.machine_id,
        timestamp: now_timestamp(),
        risk,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::test_server::{serve_once, unreachable};
    use crate::config::ApiConfig;

    fn request() -> PredictionRequest {
        PredictionRequest {
            machine_id: "B202".to_string(),
            temperature: 76.0,
            vibration: 2.1,
            power_usage: 0.27,
            humidity: 52.0,
            pressure: 33.0,
            machine_type: "Type_B".to_string(),
        }
    }

    #[tokio::test]
    async fn accepted_submission_becomes_a_prediction_record() {
        let base = serve_once("200 OK", r#"{"prediction":"0.42"}"#).await;
        let client = ApiClient::new(ApiConfig::new(base));

        let prediction = submit(&client, request()).await.unwrap();
        assert_eq!(prediction.machine_id, "B202");
        assert_eq!(prediction.risk, 0.42);
        assert!(chrono::DateTime::parse_from_rfc3339(&prediction.timestamp).is_ok());
    }

    #[tokio::test]
    async fn record_ids_increase_across_submissions() {
        let base = serve_once("200 OK", r#"{"prediction":0.1}"#).await;
        let client = ApiClient::new(ApiConfig::new(base));
        let first = submit(&client, request()).await.unwrap();

        let base = serve_once("200 OK", r#"{"prediction":0.2}"#).await;
        let client = ApiClient::new(ApiConfig::new(base));
        let second = submit(&client, request()).await.unwrap();

        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn transport_failures_propagate() {
        let client = ApiClient::new(ApiConfig::new(unreachable()));
        let result = submit(&client, request()).await;
        assert!(matches!(result, Err(ApiError::Transport(_))));
    }

    #[tokio::test]
    async fn malformed_scores_propagate() {
        let base = serve_once("200 OK", r#"{"prediction":"abc"}"#).await;
        let client = ApiClient::new(ApiConfig::new(base));
        let result = submit(&client, request()).await;
        assert!(matches!(result, Err(ApiError::MalformedResponse(_))));
    }
}
