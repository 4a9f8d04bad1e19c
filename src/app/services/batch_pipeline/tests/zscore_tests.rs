//! Tests for the batch z-score stage

use super::*;
use crate::app::services::batch_pipeline::zscore;
use crate::config::FilterConfig;

#[test]
fn test_small_sample_outlier_below_threshold() {
    // [10, 10, 10, 10, 100]: mean 28, sample std ~40.25, z(100) ~1.79
    let (mut readings, indices) = arena_from_depths(&[10.0, 10.0, 10.0, 10.0, 100.0]);
    let config = FilterConfig::default();

    let anomalies = zscore::apply(&mut readings, &indices, &config);

    assert_eq!(anomalies, 0);
    let z = readings[4].z_score.unwrap();
    assert!(z > 1.7 && z < 1.9, "z = {z}");
    assert!(!readings[4].z_anomaly);
    assert!(readings[4].is_clean());
}

#[test]
fn test_clear_outlier_flagged() {
    // [0 x9, 100]: mean 10, sample std ~31.6, z(100) ~2.85
    let mut depths = vec![0.0; 9];
    depths.push(100.0);
    let (mut readings, indices) = arena_from_depths(&depths);
    let config = FilterConfig::default();

    let anomalies = zscore::apply(&mut readings, &indices, &config);

    assert_eq!(anomalies, 1);
    assert!(readings[9].z_anomaly);
    // Flagged readings stay nyc_valid but leave the clean set
    assert!(readings[9].nyc_valid);
    assert!(!readings[9].is_clean());
    assert_eq!(readings[9].depth_mm, Some(100.0));
}

#[test]
fn test_signed_scores_stored() {
    let (mut readings, indices) = arena_from_depths(&[0.0, 50.0, 100.0]);
    let config = FilterConfig::default();

    zscore::apply(&mut readings, &indices, &config);

    assert!(readings[0].z_score.unwrap() < 0.0);
    assert_eq!(readings[1].z_score, Some(0.0));
    assert!(readings[2].z_score.unwrap() > 0.0);
}

#[test]
fn test_single_surviving_depth_skipped() {
    let (mut readings, indices) = arena_from_depths(&[10.0, 20.0]);
    reject(&mut readings[0]);
    let config = FilterConfig::default();

    let anomalies = zscore::apply(&mut readings, &indices, &config);

    assert_eq!(anomalies, 0);
    assert_eq!(readings[1].z_score, None);
}

#[test]
fn test_zero_variance_skipped() {
    let (mut readings, indices) = arena_from_depths(&[5.0, 5.0, 5.0, 5.0]);
    let config = FilterConfig::default();

    let anomalies = zscore::apply(&mut readings, &indices, &config);

    assert_eq!(anomalies, 0);
    assert!(readings.iter().all(|r| r.z_score.is_none()));
}

#[test]
fn test_rejected_readings_excluded_from_statistics() {
    // With the 500 rejected upstream, the remaining [0, 0, 10, 10] have no
    // outlier; if the 500 leaked into the stats everything would shift
    let (mut readings, indices) = arena_from_depths(&[0.0, 0.0, 500.0, 10.0, 10.0]);
    reject(&mut readings[2]);
    let config = FilterConfig::default();

    let anomalies = zscore::apply(&mut readings, &indices, &config);

    assert_eq!(anomalies, 0);
    assert_eq!(readings[2].z_score, None);
    assert!(readings[0].z_score.is_some());
}
