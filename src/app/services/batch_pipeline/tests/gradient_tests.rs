//! Tests for the gradient spike stage

use super::*;
use crate::app::services::batch_pipeline::gradient;
use crate::config::FilterConfig;
use std::collections::BTreeMap;

fn indices_for(readings: &[crate::app::models::ProcessedReading]) -> BTreeMap<String, Vec<usize>> {
    let mut map = BTreeMap::new();
    map.insert(TEST_SENSOR.to_string(), (0..readings.len()).collect());
    map
}

#[test]
fn test_spike_rejected() {
    // 300 mm depth change over 60 seconds: 300 mm/min, over the 254 threshold
    let mut readings = vec![processed_at(0, 0.0)];
    let mut second = processed_at(0, 300.0);
    second.received_at = base_time() + chrono::Duration::seconds(60);
    readings.push(second);
    let indices = indices_for(&readings);
    let config = FilterConfig::default();

    let rejected = gradient::apply(&mut readings, &indices, &config);

    assert_eq!(rejected, 1);
    assert!(readings[1].filtered_gradient);
    assert!(!readings[1].nyc_valid);
    assert_eq!(readings[1].depth_mm, None);
    assert_eq!(readings[1].gradient_rate_mm_per_min, Some(300.0));
}

#[test]
fn test_gradual_change_accepted() {
    // 100 mm over 10 minutes: 10 mm/min
    let mut readings = vec![processed_at(0, 0.0), processed_at(10, 100.0)];
    let indices = indices_for(&readings);
    let config = FilterConfig::default();

    let rejected = gradient::apply(&mut readings, &indices, &config);

    assert_eq!(rejected, 0);
    assert_eq!(readings[1].depth_mm, Some(100.0));
    assert_eq!(readings[1].gradient_rate_mm_per_min, Some(10.0));
}

#[test]
fn test_rejected_point_does_not_poison_next_comparison() {
    // The middle spike is rejected; the third point must be measured against
    // the first point, not the rejected one
    let mut readings = vec![
        processed_at(0, 0.0),
        processed_at(1, 500.0),
        processed_at(2, 40.0),
    ];
    let indices = indices_for(&readings);
    let config = FilterConfig::default();

    let rejected = gradient::apply(&mut readings, &indices, &config);

    assert_eq!(rejected, 1);
    assert!(readings[1].filtered_gradient);
    // Third point: |40 - 0| / 2 min = 20 mm/min against the first point
    assert!(!readings[2].filtered_gradient);
    assert_eq!(readings[2].gradient_rate_mm_per_min, Some(20.0));
}

#[test]
fn test_coincident_timestamps_not_compared() {
    let mut readings = vec![processed_at(0, 0.0), processed_at(0, 500.0)];
    let indices = indices_for(&readings);
    let config = FilterConfig::default();

    let rejected = gradient::apply(&mut readings, &indices, &config);

    assert_eq!(rejected, 0);
    assert_eq!(readings[1].gradient_rate_mm_per_min, None);
    assert!(readings[1].nyc_valid);
}

#[test]
fn test_first_point_has_no_rate() {
    let mut readings = vec![processed_at(0, 50.0)];
    let indices = indices_for(&readings);
    let config = FilterConfig::default();

    gradient::apply(&mut readings, &indices, &config);

    assert_eq!(readings[0].gradient_rate_mm_per_min, None);
    assert!(readings[0].nyc_valid);
}

#[test]
fn test_points_rejected_upstream_are_skipped() {
    let mut readings = vec![processed_at(0, 0.0), processed_at(10, 100.0)];
    reject(&mut readings[0]);
    let indices = indices_for(&readings);
    let config = FilterConfig::default();

    let rejected = gradient::apply(&mut readings, &indices, &config);

    // No accepted prior point, so no comparison happens
    assert_eq!(rejected, 0);
    assert_eq!(readings[1].gradient_rate_mm_per_min, None);
}

#[test]
fn test_sensors_do_not_interact() {
    let mut readings = vec![processed_at(0, 0.0)];
    let mut other = processed_at(1, 500.0);
    other.sensor_id = "sensor-b".to_string();
    readings.push(other);

    let mut indices = BTreeMap::new();
    indices.insert(TEST_SENSOR.to_string(), vec![0]);
    indices.insert("sensor-b".to_string(), vec![1]);
    let config = FilterConfig::default();

    let rejected = gradient::apply(&mut readings, &indices, &config);

    // Each sensor sees only its own chain; neither has a prior point
    assert_eq!(rejected, 0);
}
