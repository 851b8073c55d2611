use app_core::detect::{detect_sides, Detector};
use app_core::constants::DETECT_TOLERANCE_DEG;
use glam::Vec2;

#[test]
fn exact_turn_angles_detect_every_supported_count() {
    for sides in 3..=12u32 {
        let turn = 360.0 / sides as f32;
        assert_eq!(detect_sides(turn, DETECT_TOLERANCE_DEG), Some(sides));
    }
}

#[test]
fn detection_survives_small_wobble_inside_the_tolerance() {
    for sides in 3..=12u32 {
        let turn = 360.0 / sides as f32;
        for off in [-2.0f32, -0.5, 0.5, 2.0] {
            // The nearest integer estimate can shift for the tightest
            // polygons, but within the band it must detect *something*
            // consistent; at +-0.5 deg it must be the exact count.
            if off.abs() <= 0.5 {
                assert_eq!(
                    detect_sides(turn + off, DETECT_TOLERANCE_DEG),
                    Some(sides),
                    "sides {sides} off {off}"
                );
            }
        }
    }
}

#[test]
fn turn_far_from_any_regular_polygon_is_rejected() {
    // 100 degrees rounds to a square's 90 but misses by 10.
    assert_eq!(detect_sides(100.0, DETECT_TOLERANCE_DEG), None);
    // Halfway between hexagon (60) and pentagon (72).
    assert_eq!(detect_sides(66.0, DETECT_TOLERANCE_DEG), None);
}

#[test]
fn out_of_range_and_degenerate_turns_are_rejected() {
    assert_eq!(detect_sides(180.0, DETECT_TOLERANCE_DEG), None); // 2 sides
    assert_eq!(detect_sides(360.0 / 13.0, DETECT_TOLERANCE_DEG), None); // 13 sides
    assert_eq!(detect_sides(0.0, DETECT_TOLERANCE_DEG), None);
    assert_eq!(detect_sides(-60.0, DETECT_TOLERANCE_DEG), None);
    assert_eq!(detect_sides(f32::NAN, DETECT_TOLERANCE_DEG), None);
    assert_eq!(detect_sides(f32::INFINITY, DETECT_TOLERANCE_DEG), None);
}

#[test]
fn detector_blooms_only_on_change() {
    let mut detector = Detector::default();
    let points = vec![Vec2::ZERO, Vec2::new(100.0, 0.0), Vec2::new(50.0, 80.0)];

    let changed = detector.observe(Some(3), &points, 1.0);
    assert!(changed);
    assert_eq!(detector.detected, Some(3));
    assert!((detector.bloom - 1.0).abs() < 1e-6);

    detector.decay(0.5);
    let bloom_after_decay = detector.bloom;
    assert!(bloom_after_decay < 1.0);

    // Same detection again: no re-bloom, no new memory.
    let changed = detector.observe(Some(3), &points, 2.0);
    assert!(!changed);
    assert!((detector.bloom - bloom_after_decay).abs() < 1e-6);
    assert_eq!(detector.memories.len(), 1);
}

#[test]
fn detector_bloom_decays_to_zero() {
    let mut detector = Detector::default();
    detector.observe(Some(4), &[Vec2::ZERO; 4], 0.0);
    for _ in 0..200 {
        detector.decay(0.016);
    }
    assert_eq!(detector.bloom, 0.0);
}

#[test]
fn detector_keeps_at_most_three_memories_newest_first() {
    let mut detector = Detector::default();
    let mut points = vec![Vec2::ZERO, Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0)];
    for (i, sides) in [3u32, 4, 5, 6].iter().enumerate() {
        points.push(Vec2::new(i as f32, i as f32));
        detector.observe(Some(*sides), &points, i as f64);
    }
    assert_eq!(detector.memories.len(), 3);
    // Newest memory first, the triangle fell off the end.
    assert_eq!(detector.memories[0].points.len(), 7);
    assert!((detector.memories[0].at - 3.0).abs() < 1e-9);
    assert_eq!(detector.memories[2].points.len(), 5);
}

#[test]
fn losing_detection_also_counts_as_a_change() {
    let mut detector = Detector::default();
    detector.observe(Some(5), &[Vec2::ZERO; 5], 0.0);
    let changed = detector.observe(None, &[Vec2::ZERO; 5], 1.0);
    assert!(changed);
    assert_eq!(detector.detected, None);
}
