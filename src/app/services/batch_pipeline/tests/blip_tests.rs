//! Tests for the blip stage

use super::*;
use crate::app::services::batch_pipeline::blip;
use crate::config::FilterConfig;

#[test]
fn test_spike_and_return_marks_middle_point() {
    // D1=0, D2=50, D3=2: delta 50 > 2, metric |2-0|/50 = 0.04 < 0.1
    let (mut readings, indices) = arena_from_depths(&[0.0, 50.0, 2.0]);
    let config = FilterConfig::default();

    let rejected = blip::apply(&mut readings, &indices, &config);

    assert_eq!(rejected, 1);
    assert!(readings[1].filtered_blip);
    assert!(!readings[1].nyc_valid);
    assert_eq!(readings[1].depth_mm, None);
    assert!(readings[0].nyc_valid);
    assert!(readings[2].nyc_valid);
}

#[test]
fn test_small_rising_edge_not_a_candidate() {
    // delta = 2 is not strictly greater than the 2 mm minimum
    let (mut readings, indices) = arena_from_depths(&[0.0, 2.0, 0.0]);
    let config = FilterConfig::default();

    let rejected = blip::apply(&mut readings, &indices, &config);

    assert_eq!(rejected, 0);
}

#[test]
fn test_sustained_rise_kept() {
    // D3 stays elevated: metric |45-0|/50 = 0.9
    let (mut readings, indices) = arena_from_depths(&[0.0, 50.0, 45.0]);
    let config = FilterConfig::default();

    let rejected = blip::apply(&mut readings, &indices, &config);

    assert_eq!(rejected, 0);
    assert!(!readings[1].filtered_blip);
}

#[test]
fn test_triplet_with_invalid_point_skipped() {
    // The window never re-closes around a rejected point: with the middle
    // point invalid, neither surrounding triplet fires even though
    // (D0, D2, D3) would qualify on its own
    let (mut readings, indices) = arena_from_depths(&[0.0, 10.0, 50.0, 2.0]);
    reject(&mut readings[1]);
    let config = FilterConfig::default();

    let rejected = blip::apply(&mut readings, &indices, &config);

    assert_eq!(rejected, 0);
    assert!(!readings[2].filtered_blip);
}

#[test]
fn test_consecutive_blips_share_no_points() {
    // After the first blip fires, triplets containing the rejected point are
    // skipped, so a chain of spikes collapses one at a time
    let (mut readings, indices) = arena_from_depths(&[0.0, 50.0, 1.0, 60.0, 2.0]);
    let config = FilterConfig::default();

    let rejected = blip::apply(&mut readings, &indices, &config);

    // (0, 50, 1) fires on index 1 and (50, 1, 60) is skipped, but the
    // next intact triplet (1, 60, 2) fires on index 3
    assert_eq!(rejected, 2);
    assert!(readings[1].filtered_blip);
    assert!(readings[3].filtered_blip);
    assert!(readings[2].nyc_valid);
    assert!(readings[4].nyc_valid);
}

#[test]
fn test_falling_edge_never_a_blip() {
    let (mut readings, indices) = arena_from_depths(&[50.0, 0.0, 48.0]);
    let config = FilterConfig::default();

    let rejected = blip::apply(&mut readings, &indices, &config);

    assert_eq!(rejected, 0);
}
