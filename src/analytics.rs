//! Derived views over sensor-reading collections.
//!
//! Everything here is a pure function over a snapshot slice; callers may
//! aggregate while a refresh is replacing the held collection.

use serde::Serialize;

use crate::types::sensor::SensorReading;

/// Number of trailing readings shown in the comparison table.
pub const COMPARISON_WINDOW: usize = 6;

/// Per-metric means over a reading collection, rounded to one decimal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Default)]
pub struct MetricAverages {
    pub temperature: f64,
    pub vibration: f64,
    pub power_consumption: f64,
    pub humidity: f64,
    pub pressure: f64,
}

/// One row of the recent-readings comparison table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    /// Positional label ("Reading 1".."Reading N"), never timestamp-derived.
    pub label: String,
    pub temperature: f64,
    pub vibration: f64,
    pub power: f64,
    pub humidity: f64,
    pub pressure: f64,
}

/// The latest reading's metrics, `None` where the field was absent or the
/// collection is empty.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Default)]
pub struct MetricSnapshot {
    pub temperature: Option<f64>,
    pub vibration: Option<f64>,
    pub power_consumption: Option<f64>,
    pub humidity: Option<f64>,
    pub pressure: Option<f64>,
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Mean of each metric with absent values counted as zero.
///
/// An empty collection yields all zeroes rather than NaN.
pub fn averages(readings: &[SensorReading]) -> MetricAverages {
    if readings.is_empty() {
        return MetricAverages::default();
    }
    let count = readings.len() as f64;
    let mut totals = MetricAverages::default();
    for reading in readings {
        totals.temperature += reading.temperature.unwrap_or(0.0);
        totals.vibration += reading.vibration.unwrap_or(0.0);
        totals.power_consumption += reading.power_consumption.unwrap_or(0.0);
        totals.humidity += reading.humidity.unwrap_or(0.0);
        totals.pressure += reading.pressure.unwrap_or(0.0);
    }
    MetricAverages {
        temperature: round1(totals.temperature / count),
        vibration: round1(totals.vibration / count),
        power_consumption: round1(totals.power_consumption / count),
        humidity: round1(totals.humidity / count),
        pressure: round1(totals.pressure / count),
    }
}

/// The last `window` readings in stored order, oldest of the window first,
/// labeled by position within the window. Needs at least two readings to be
/// worth comparing.
pub fn recent_comparison(readings: &[SensorReading], window: usize) -> Vec<ComparisonRow> {
    if readings.len() < 2 {
        return Vec::new();
    }
    let start = readings.len().saturating_sub(window);
    readings[start..]
        .iter()
        .enumerate()
        .map(|(index, reading)| ComparisonRow {
            label: format!("Reading {}", index + 1),
            temperature: reading.temperature.unwrap_or(0.0),
            vibration: reading.vibration.unwrap_or(0.0),
            power: reading.power_consumption.unwrap_or(0.0),
            humidity: reading.humidity.unwrap_or(0.0),
            pressure: reading.pressure.unwrap_or(0.0),
        })
        .collect()
}

/// Metrics of the most recent reading, for the current-value cards.
pub fn current_snapshot(readings: &[SensorReading]) -> MetricSnapshot {
    match readings.last() {
        Some(reading) => MetricSnapshot {
            temperature: reading.temperature,
            vibration: reading.vibration,
            power_consumption: reading.power_consumption,
            humidity: reading.humidity,
            pressure: reading.pressure,
        },
        None => MetricSnapshot::default(),
    }
}

/// Render a snapshot metric with fixed precision, "N/A" when absent.
pub fn format_metric(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) => format!("{v:.decimals$}"),
        None => "N/A".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(timestamp: &str, temperature: Option<f64>) -> SensorReading {
        SensorReading {
            timestamp: timestamp.to_string(),
            temperature,
            vibration: None,
            power_consumption: None,
            humidity: None,
            pressure: None,
        }
    }

    fn full_reading(timestamp: &str, base: f64) -> SensorReading {
        SensorReading {
            timestamp: timestamp.to_string(),
            temperature: Some(base),
            vibration: Some(base + 1.0),
            power_consumption: Some(base + 2.0),
            humidity: Some(base + 3.0),
            pressure: Some(base + 4.0),
        }
    }

    #[test]
    fn averages_of_empty_input_is_all_zero() {
        let result = averages(&[]);
        assert_eq!(result, MetricAverages::default());
        assert!(!result.temperature.is_nan());
    }

    #[test]
    fn averages_treat_absent_metrics_as_zero() {
        let readings = vec![
            reading("2025-05-29T10:00:00.000000", Some(10.0)),
            reading("2025-05-29T10:01:00.000000", Some(20.0)),
        ];
        let result = averages(&readings);
        assert_eq!(result.temperature, 15.0);
        assert_eq!(result.vibration, 0.0);
        assert_eq!(result.power_consumption, 0.0);
        assert_eq!(result.humidity, 0.0);
        assert_eq!(result.pressure, 0.0);
    }

    #[test]
    fn averages_round_to_one_decimal() {
        let readings = vec![
            reading("a", Some(10.0)),
            reading("b", Some(10.0)),
            reading("c", Some(10.1)),
        ];
        // 30.1 / 3 = 10.033...
        assert_eq!(averages(&readings).temperature, 10.0);
    }

    #[test]
    fn comparison_needs_at_least_two_readings() {
        assert!(recent_comparison(&[], COMPARISON_WINDOW).is_empty());
        let one = vec![reading("a", Some(1.0))];
        assert!(recent_comparison(&one, COMPARISON_WINDOW).is_empty());
    }

    #[test]
    fn comparison_labels_are_positional_within_the_window() {
        let readings: Vec<SensorReading> = (0..10)
            .map(|i| full_reading(&format!("2025-05-29T10:{i:02}:00.000000"), i as f64))
            .collect();
        let rows = recent_comparison(&readings, COMPARISON_WINDOW);
        assert_eq!(rows.len(), 6);
        assert_eq!(rows[0].label, "Reading 1");
        assert_eq!(rows[5].label, "Reading 6");
        // Oldest of the window first: readings 4..10 in stored order.
        assert_eq!(rows[0].temperature, 4.0);
        assert_eq!(rows[5].temperature, 9.0);
    }

    #[test]
    fn comparison_with_fewer_readings_than_window_takes_them_all() {
        let readings: Vec<SensorReading> = (0..3)
            .map(|i| full_reading(&format!("t{i}"), i as f64))
            .collect();
        let rows = recent_comparison(&readings, COMPARISON_WINDOW);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2].label, "Reading 3");
    }

    #[test]
    fn snapshot_of_empty_collection_is_all_absent() {
        let snapshot = current_snapshot(&[]);
        assert_eq!(snapshot, MetricSnapshot::default());
        assert_eq!(format_metric(snapshot.temperature, 1), "N/A");
    }

    #[test]
    fn snapshot_takes_the_last_reading() {
        let readings = vec![
            full_reading("2025-05-29T10:00:00.000000", 1.0),
            reading("2025-05-29T10:01:00.000000", Some(42.5)),
        ];
        let snapshot = current_snapshot(&readings);
        assert_eq!(snapshot.temperature, Some(42.5));
        assert_eq!(snapshot.vibration, None);
    }

    #[test]
    fn format_metric_fixes_precision() {
        assert_eq!(format_metric(Some(42.567), 1), "42.6");
        assert_eq!(format_metric(Some(1.0), 2), "1.00");
        assert_eq!(format_metric(None, 2), "N/A");
    }
}
