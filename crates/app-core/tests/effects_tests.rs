use app_core::effects::{EffectKind, Effects};
use app_core::energy::EnergyField;
use glam::Vec2;

#[test]
fn transients_expire_once_and_stay_gone() {
    let mut effects = Effects::default();
    effects.spawn(Vec2::ZERO, 0.0, EffectKind::Burst { radius: 80.0 });
    effects.spawn(Vec2::ZERO, 0.0, EffectKind::Sparkle { angle: 1.0, radius: 40.0 });

    effects.sweep(0.5);
    assert_eq!(effects.transients.len(), 2);

    // Sparkles live 0.7s, bursts 1.4s.
    effects.sweep(0.8);
    assert_eq!(effects.transients.len(), 1);
    assert!(matches!(effects.transients[0].kind, EffectKind::Burst { .. }));

    effects.sweep(1.5);
    assert!(effects.transients.is_empty());
    effects.sweep(1.6);
    assert!(effects.transients.is_empty());
}

#[test]
fn effect_progress_is_clamped() {
    let mut effects = Effects::default();
    effects.spawn(Vec2::ZERO, 10.0, EffectKind::Whisper);
    let e = effects.transients[0];
    assert_eq!(e.progress(9.0), 0.0);
    assert!((e.progress(10.6) - 0.5).abs() < 1e-4);
    assert_eq!(e.progress(20.0), 1.0);
}

#[test]
fn whispers_are_rate_limited() {
    let mut effects = Effects::default();
    assert!(effects.try_whisper(Vec2::ZERO, 0.0));
    assert!(!effects.try_whisper(Vec2::ZERO, 0.2));
    assert!(effects.try_whisper(Vec2::ZERO, 0.33));
    assert_eq!(effects.transients.len(), 2);
}

#[test]
fn loop_bursts_share_a_refractory_window() {
    let mut effects = Effects::default();
    assert!(effects.burst_allowed(0.0));
    effects.note_burst(0.0);
    assert!(!effects.burst_allowed(1.0));
    assert!(effects.burst_allowed(1.9));
}

#[test]
fn portal_is_singular_and_interval_gated() {
    let mut effects = Effects::default();
    assert!(effects.portal_allowed(0.0));
    effects.spawn_portal(Vec2::new(100.0, 100.0), 50.0, 0.0);
    assert!(!effects.portal_allowed(0.5));

    // Portal lives 1.1s; even after it dies the 6s interval still holds.
    effects.sweep(1.2);
    assert!(effects.portal.is_none());
    assert!(!effects.portal_allowed(2.0));
    assert!(effects.portal_allowed(6.1));
}

#[test]
fn seeds_stop_attracting_after_their_duration() {
    let mut effects = Effects::default();
    effects.spawn_seed(Vec2::new(5.0, 5.0), 0.0);
    assert_eq!(effects.seeds(1.0).count(), 1);
    assert_eq!(effects.seeds(3.0).count(), 0);
}

#[test]
fn drag_energy_tracks_speed_and_decays() {
    let mut field = EnergyField::default();
    field.note_pointer_speed(20.0, 0.0);
    assert!((field.drag_energy - 0.5).abs() < 1e-5);
    // Never raised past the clamp, never lowered by a slow sample.
    field.note_pointer_speed(200.0, 0.0);
    assert_eq!(field.drag_energy, 1.0);
    field.note_pointer_speed(2.0, 0.0);
    assert_eq!(field.drag_energy, 1.0);

    field.decay(0.5, 0.0);
    assert!((field.drag_energy - 0.6).abs() < 1e-4);
}

#[test]
fn slow_moves_do_not_feed_the_sweep() {
    let mut field = EnergyField::default();
    field.note_pointer_speed(10.0, 1.0);
    assert_eq!(field.sweep.strength, 0.0);
    field.note_pointer_speed(30.0, 1.0);
    assert!(field.sweep.strength > 0.0);
    assert!((field.sweep.angle - 1.0).abs() < 1e-6);
}

#[test]
fn emission_wave_fires_once_when_the_hand_goes_quiet() {
    let mut field = EnergyField::default();
    let dt = 1.0 / 60.0;
    let mut now = 0.0f64;
    let mut waves = 0;

    // A second of fast dragging charges the excited scalar.
    for _ in 0..60 {
        field.note_pointer_speed(60.0, 0.0);
        if field.decay(dt, now) {
            waves += 1;
        }
        now += dt as f64;
    }
    assert_eq!(waves, 0);
    assert!(field.excited > 0.9);

    // Let go: energy drains, excited falls through the edge exactly once.
    for _ in 0..180 {
        if field.decay(dt, now) {
            waves += 1;
        }
        now += dt as f64;
    }
    assert_eq!(waves, 1);
    assert!(field.excited < 0.5);
}

#[test]
fn symmetry_hold_accumulates_above_the_gate() {
    let mut field = EnergyField::default();
    for _ in 0..100 {
        field.note_symmetry(0.95, 0.05);
    }
    assert!((field.symmetry_hold - 2.0).abs() < 1e-4, "capped at 2s");
    field.note_symmetry(0.5, 1.0);
    assert!((field.symmetry_hold - 1.4).abs() < 1e-4, "falls at 0.6/s");
}
