use app_core::effects::Portal;
use app_core::energy::SweepImpulse;
use app_core::tracer::{Tracer, Trail};
use glam::Vec2;
use std::f32::consts::TAU;

const NO_SWEEP: SweepImpulse = SweepImpulse {
    strength: 0.0,
    angle: 0.0,
};

fn walk(tracer: &mut Tracer, angles: &[f32], steps: &[f32], advance: f32) -> Option<f32> {
    tracer
        .advance(advance, angles, steps, 1e6, 1e6, &NO_SWEEP, None)
        .completed_turn_deg
}

#[test]
fn triangle_program_returns_to_the_initial_heading() {
    let mut tracer = Tracer::default();
    tracer.reset(Vec2::new(5000.0, 5000.0), 100.0, 0.3);
    let start_heading = tracer.heading;

    let angles = [60.0; 3];
    let steps = [100.0; 3];
    let mut turns = 0;
    let mut guard = 0;
    while turns < 3 {
        if walk(&mut tracer, &angles, &steps, 10.0).is_some() {
            turns += 1;
        }
        guard += 1;
        assert!(guard < 100, "triangle walk never completed");
    }
    // Three 120 degree exterior turns make one full revolution.
    assert!(((tracer.heading - start_heading) - TAU).abs() < 1e-3);
}

#[test]
fn completed_steps_report_angles_in_cyclic_order() {
    let mut tracer = Tracer::default();
    tracer.reset(Vec2::new(5000.0, 5000.0), 50.0, 0.0);
    let angles = [100.0, 90.0, 80.0];
    let steps = [50.0; 3];

    let mut seen = Vec::new();
    for _ in 0..4 {
        // One full step per call.
        seen.push(walk(&mut tracer, &angles, &steps, 50.0));
    }
    assert_eq!(
        seen,
        vec![Some(100.0), Some(90.0), Some(80.0), Some(100.0)]
    );
    assert_eq!(tracer.step_progress, 0.0);
}

#[test]
fn empty_profile_is_ignored() {
    let mut tracer = Tracer::default();
    tracer.reset(Vec2::new(100.0, 100.0), 50.0, 0.0);
    let before = tracer.position;
    let result = tracer.advance(10.0, &[], &[], 1000.0, 1000.0, &NO_SWEEP, None);
    assert_eq!(result.completed_turn_deg, None);
    assert_eq!(tracer.position, before);
}

#[test]
fn leaving_the_screen_wraps_toroidally() {
    let mut tracer = Tracer {
        position: Vec2::new(95.0, 50.0),
        heading: 0.0,
        step_index: 0,
        step_progress: 0.0,
    };
    let result = tracer.advance(10.0, &[60.0; 3], &[1000.0; 3], 100.0, 100.0, &NO_SWEEP, None);
    assert_eq!(result.wraps.len(), 1);
    assert_eq!(result.wraps[0], Vec2::new(100.0, 50.0));
    assert_eq!(tracer.position.x, 0.0);
    assert!((tracer.position.y - 50.0).abs() < 1e-4);
}

#[test]
fn sweep_impulse_bends_the_heading() {
    let mut tracer = Tracer {
        position: Vec2::new(500.0, 500.0),
        heading: 0.0,
        step_index: 0,
        step_progress: 0.0,
    };
    let sweep = SweepImpulse {
        strength: 1.0,
        angle: 0.5,
    };
    tracer.advance(1.0, &[60.0; 3], &[1000.0; 3], 1000.0, 1000.0, &sweep, None);
    // turn gain 0.04 plus bias toward the sweep angle: 0.5 * 0.02.
    assert!((tracer.heading - 0.05).abs() < 1e-4);
}

#[test]
fn portal_field_pulls_the_heading_toward_it() {
    let mut tracer = Tracer {
        position: Vec2::new(0.0, 0.0),
        heading: 0.0,
        step_index: 0,
        step_progress: 0.0,
    };
    let portal = Portal {
        pos: Vec2::new(0.0, 100.0),
        radius: 50.0,
        spawned: 0.0,
        life: 1.1,
    };
    tracer.advance(
        1.0,
        &[60.0; 3],
        &[1000.0; 3],
        1000.0,
        1000.0,
        &NO_SWEEP,
        Some(&portal),
    );
    assert!(tracer.heading > 0.0, "heading should bend toward the portal");

    // Out of field range there is no pull.
    let mut far = Tracer {
        position: Vec2::new(0.0, 0.0),
        heading: 0.0,
        step_index: 0,
        step_progress: 0.0,
    };
    let distant = Portal {
        pos: Vec2::new(0.0, 500.0),
        ..portal
    };
    far.advance(
        1.0,
        &[60.0; 3],
        &[1000.0; 3],
        1000.0,
        1000.0,
        &NO_SWEEP,
        Some(&distant),
    );
    assert_eq!(far.heading, 0.0);
}

#[test]
fn trail_is_capped() {
    let mut trail = Trail::default();
    for i in 0..1000 {
        trail.push(Vec2::new(i as f32, 0.0), i as f64 * 0.016);
    }
    assert_eq!(trail.len(), 900);
    // Oldest samples were dropped.
    let first = trail.iter().next().unwrap();
    assert_eq!(first.pos.x, 100.0);
}

#[test]
fn loop_hit_ignores_the_recent_tail() {
    let mut trail = Trail::default();
    let spot = Vec2::new(40.0, 40.0);
    for i in 0..200 {
        trail.push(spot, i as f64 * 0.016);
    }
    // Everything is recent; nothing old enough to count as a loop.
    assert!(!trail.loop_hit(spot, 100.0));

    for i in 200..600 {
        trail.push(spot, i as f64 * 0.016);
    }
    assert!(trail.loop_hit(spot, 100.0));
}

#[test]
fn loop_hit_respects_the_radius() {
    let mut trail = Trail::default();
    for i in 0..600 {
        trail.push(Vec2::ZERO, i as f64 * 0.016);
    }
    // Loop radius is 0.6 * base_step.
    assert!(trail.loop_hit(Vec2::new(50.0, 0.0), 100.0));
    assert!(!trail.loop_hit(Vec2::new(70.0, 0.0), 100.0));
}
