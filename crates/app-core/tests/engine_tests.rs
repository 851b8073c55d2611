//! End-to-end frame-loop scenarios against the engine clock.

use app_core::engine::EngineState;
use app_core::input::{PointerKind, PointerMods};
use app_core::music::PulseEvent;
use app_core::polygon::ShapePolygon;
use glam::Vec2;

const DT: f64 = 0.016;

fn touch() -> PointerMods {
    PointerMods {
        kind: PointerKind::Touch,
        ..PointerMods::default()
    }
}

struct Run {
    engine: EngineState,
    now: f64,
    pulses: Vec<PulseEvent>,
}

impl Run {
    fn new(width: f32, height: f32) -> Self {
        let mut engine = EngineState::new(42);
        engine.resize(width, height);
        Self {
            engine,
            now: 0.0,
            pulses: Vec::new(),
        }
    }

    fn tick(&mut self) {
        self.now += DT;
        self.engine.tick(self.now, &mut self.pulses);
    }

    fn run_for(&mut self, seconds: f64) {
        let ticks = (seconds / DT).ceil() as usize;
        for _ in 0..ticks {
            self.tick();
        }
    }
}

#[test]
fn idle_triangle_stays_detected_and_the_bloom_fades() {
    let mut run = Run::new(1200.0, 800.0);
    run.tick();
    assert_eq!(run.engine.detector.detected, Some(3));
    assert!((run.engine.detector.bloom - 1.0).abs() < 0.05);

    for _ in 0..999 {
        run.tick();
        assert_eq!(run.engine.detector.detected, Some(3));
    }
    assert_eq!(run.engine.detector.bloom, 0.0);
    assert!(run.engine.symmetry > 0.95, "symmetry {}", run.engine.symmetry);
    assert!(!run.pulses.is_empty(), "an idle walk should still pulse");
    assert_eq!(run.engine.trail.len(), 900);
}

#[test]
fn displaced_pentagon_relaxes_back_toward_regularity() {
    let mut run = Run::new(1600.0, 1600.0);
    run.engine.polygon = ShapePolygon::regular(run.engine.center, 600.0, 5);
    run.tick();

    // Grab the top vertex and pull it 200px further out, in small moves the
    // way a real pointer reports them.
    let grab = run.engine.polygon.vertex(0).unwrap().pos;
    run.engine.pointer_down(grab, PointerMods::default());
    for i in 1..=10 {
        let pos = grab + Vec2::new(0.0, -20.0 * i as f32);
        run.engine.pointer_move(pos, PointerMods::default());
    }
    run.run_for(1.2);
    // A final zero-length move so the release carries no wobble impulse.
    let end = grab + Vec2::new(0.0, -200.0);
    run.engine.pointer_move(end, PointerMods::default());
    run.engine.pointer_up(end, PointerMods::default());

    run.tick();
    let after_release = run.engine.symmetry;
    assert!(after_release > 0.45, "stretched pentagon still coherent");

    run.run_for(5.0);
    assert!(
        run.engine.symmetry > 0.8,
        "symmetry {} after settling",
        run.engine.symmetry
    );
    assert!(run.engine.symmetry > after_release - 0.01);
    // The soft constraint regularizes; it does not undo the edit.
    let settled = run.engine.polygon.vertex(0).unwrap().pos;
    assert!(settled.distance(grab) > 50.0);
}

#[test]
fn double_click_near_an_edge_inserts_a_vertex() {
    let mut run = Run::new(1200.0, 800.0);
    run.tick();
    let before = run.engine.polygon.positions();
    let midpoint = (before[0] + before[1]) * 0.5;

    run.engine.double_click(midpoint);
    assert_eq!(run.engine.polygon.len(), 4);
    let after = run.engine.polygon.positions();
    assert!(after[1].distance(midpoint) < 1e-3);
    assert_eq!(after[0], before[0]);
    assert_eq!(after[2], before[1]);
    assert!((run.engine.energy.phase_bloom - 1.0).abs() < 1e-6);
}

#[test]
fn double_click_far_from_every_edge_does_nothing() {
    let mut run = Run::new(1200.0, 800.0);
    run.tick();
    run.engine.double_click(Vec2::new(30.0, 30.0));
    assert_eq!(run.engine.polygon.len(), 3);
}

#[test]
fn context_delete_respects_the_minimum_vertex_count() {
    let mut run = Run::new(1200.0, 800.0);
    run.tick();
    let target = run.engine.polygon.positions()[0];
    run.engine.context_delete(target);
    assert_eq!(run.engine.polygon.len(), 3);

    // With four vertices the same gesture removes one.
    let before = run.engine.polygon.positions();
    run.engine.double_click((before[0] + before[1]) * 0.5);
    assert_eq!(run.engine.polygon.len(), 4);
    run.engine.context_delete(run.engine.polygon.positions()[2]);
    assert_eq!(run.engine.polygon.len(), 3);
}

#[test]
fn long_press_on_a_vertex_deletes_it() {
    let mut run = Run::new(1200.0, 800.0);
    run.engine.polygon = ShapePolygon::regular(run.engine.center, 250.0, 4);
    run.tick();

    let target = run.engine.polygon.positions()[0];
    run.engine.pointer_down(target, touch());
    // Touch long-press fires after 0.65s of stillness.
    run.run_for(0.8);
    assert_eq!(run.engine.polygon.len(), 3);
    assert!(run.engine.drag.is_none());
}

#[test]
fn movement_cancels_the_long_press() {
    let mut run = Run::new(1200.0, 800.0);
    run.engine.polygon = ShapePolygon::regular(run.engine.center, 250.0, 4);
    run.tick();

    let target = run.engine.polygon.positions()[0];
    run.engine.pointer_down(target, touch());
    run.engine.pointer_move(target + Vec2::new(10.0, 0.0), touch());
    run.run_for(1.5);
    assert_eq!(run.engine.polygon.len(), 4);
}

#[test]
fn long_press_at_minimum_count_is_consumed_without_deleting() {
    let mut run = Run::new(1200.0, 800.0);
    run.tick();
    let target = run.engine.polygon.positions()[0];
    run.engine.pointer_down(target, touch());
    run.run_for(2.0);
    assert_eq!(run.engine.polygon.len(), 3);
}

#[test]
fn two_quick_taps_synthesize_an_edge_insert() {
    let mut run = Run::new(1200.0, 800.0);
    run.tick();
    let points = run.engine.polygon.positions();
    let midpoint = (points[0] + points[1]) * 0.5;

    run.engine.pointer_down(midpoint, touch());
    run.engine.pointer_up(midpoint, touch());
    run.run_for(0.1);
    run.engine.pointer_down(midpoint, touch());
    assert_eq!(run.engine.polygon.len(), 4);
}

#[test]
fn slow_second_tap_does_not_insert() {
    let mut run = Run::new(1200.0, 800.0);
    run.tick();
    let points = run.engine.polygon.positions();
    let midpoint = (points[0] + points[1]) * 0.5;

    run.engine.pointer_down(midpoint, touch());
    run.engine.pointer_up(midpoint, touch());
    run.run_for(0.5);
    run.engine.pointer_down(midpoint, touch());
    assert_eq!(run.engine.polygon.len(), 3);
}

#[test]
fn background_drag_rotates_the_walk() {
    let mut run = Run::new(1200.0, 800.0);
    run.tick();
    let empty = Vec2::new(60.0, 60.0);
    run.engine.pointer_down(empty, PointerMods::default());
    run.engine.pointer_move(empty + Vec2::new(100.0, 0.0), PointerMods::default());
    run.engine.pointer_up(empty + Vec2::new(100.0, 0.0), PointerMods::default());
    assert!((run.engine.rotation - 0.2).abs() < 1e-4);
}

#[test]
fn a_still_background_press_plants_a_seed() {
    let mut run = Run::new(1200.0, 800.0);
    run.tick();
    let empty = Vec2::new(60.0, 60.0);
    run.engine.pointer_down(empty, PointerMods::default());
    run.engine.pointer_up(empty, PointerMods::default());
    assert_eq!(run.engine.effects.seeds(run.now).count(), 1);
}

#[test]
fn holding_a_still_press_breathes_until_release() {
    let mut run = Run::new(1200.0, 800.0);
    run.tick();
    let empty = Vec2::new(60.0, 60.0);
    run.engine.pointer_down(empty, PointerMods::default());
    assert!(!run.engine.breathing);
    run.run_for(0.5);
    assert!(run.engine.breathing);

    run.engine.pointer_up(empty, PointerMods::default());
    assert!(!run.engine.breathing);
    // A breath hold is not a seed tap.
    assert_eq!(run.engine.effects.seeds(run.now).count(), 0);
}

#[test]
fn stalls_are_clamped_to_one_simulation_step() {
    let mut run = Run::new(1200.0, 800.0);
    run.run_for(0.2);
    let before = run.engine.polygon.positions();

    // A five second stall must not apply five seconds of force at once.
    run.now += 5.0;
    run.engine.tick(run.now, &mut run.pulses);
    let after = run.engine.polygon.positions();
    let worst = before
        .iter()
        .zip(&after)
        .map(|(a, b)| a.distance(*b))
        .fold(0.0_f32, f32::max);
    assert!(worst < 5.0, "single tick moved a vertex {worst}px");
    assert_eq!(run.engine.detector.detected, Some(3));
}
