//! Data feeds bridging the service client to the pollers.
//!
//! A feed is one pollable resource kind. Fetching is infallible by
//! contract: the fallback policy lives in the client underneath, so a feed
//! always yields a collection.

use std::future::Future;
use std::sync::Arc;

use chrono::NaiveDateTime;

use crate::client::ApiClient;
use crate::types::asset::Asset;
use crate::types::prediction::Prediction;
use crate::types::sensor::SensorReading;

/// Maximum number of records kept from the prediction stream.
pub const PREDICTION_CAP: usize = 10;

/// A pollable resource kind.
pub trait DataFeed: Send + Sync + 'static {
    type Item: Clone + PartialEq + Send + Sync + 'static;

    /// Retrieve the current collection from the service.
    fn fetch(&self) -> impl Future<Output = Vec<Self::Item>> + Send;

    /// Shape a raw batch before change detection. Defaults to identity.
    fn normalize(&self, batch: Vec<Self::Item>) -> Vec<Self::Item> {
        batch
    }
}

/// Feed over `GET /assets`.
#[derive(Debug, Clone)]
pub struct AssetFeed {
    client: Arc<ApiClient>,
}

impl AssetFeed {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

impl DataFeed for AssetFeed {
    type Item = Asset;

    async fn fetch(&self) -> Vec<Asset> {
        self.client.fetch_assets().await
    }
}

/// Feed over `GET /sensors`.
#[derive(Debug, Clone)]
pub struct SensorFeed {
    client: Arc<ApiClient>,
}

impl SensorFeed {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

impl DataFeed for SensorFeed {
    type Item = SensorReading;

    async fn fetch(&self) -> Vec<SensorReading> {
        self.client.fetch_sensor_readings().await
    }
}

/// Feed over `GET /predict`. Batches are capped to the newest
/// [`PREDICTION_CAP`] records, newest first.
#[derive(Debug, Clone)]
pub struct PredictionFeed {
    client: Arc<ApiClient>,
}

impl PredictionFeed {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

impl DataFeed for PredictionFeed {
    type Item = Prediction;

    async fn fetch(&self) -> Vec<Prediction> {
        self.client.fetch_predictions().await
    }

    fn normalize(&self, batch: Vec<Prediction>) -> Vec<Prediction> {
        cap_newest(batch, PREDICTION_CAP)
    }
}

/// Keep the newest `cap` predictions, newest first.
///
/// Sorting happens before truncation so the records dropped beyond the cap
/// are the oldest ones. Timestamps that fail to parse order last.
pub fn cap_newest(mut batch: Vec<Prediction>, cap: usize) -> Vec<Prediction> {
    batch.sort_by(|a, b| parse_timestamp(&b.timestamp).cmp(&parse_timestamp(&a.timestamp)));
    batch.truncate(cap);
    batch
}

/// Parse the service's timestamps: RFC 3339 or the backend's naive
/// `%Y-%m-%dT%H:%M:%S%.f` without an offset.
pub(crate) fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    chrono::DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.naive_utc())
        .ok()
        .or_else(|| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").ok())
}
