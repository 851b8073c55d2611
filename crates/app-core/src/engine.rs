//! The per-world engine state and its frame tick.
//!
//! One `EngineState` is one independent instance of the whole sketch: the
//! polygon, the tracer and trail, the transient effects, the detector and
//! the energy scalars. The host supplies a monotonically increasing clock in
//! seconds; everything time-like is a stored timestamp compared against it.

use crate::constants::*;
use crate::detect::{detect_sides, Detector};
use crate::effects::{EffectKind, Effects};
use crate::energy::EnergyField;
use crate::geometry;
use crate::input::{DragState, PointerKind, PointerMods};
use crate::music::{mood_for_points, PulseEvent, PulseShaper};
use crate::polygon::{ShapePolygon, Wobble};
use crate::tracer::{Tracer, Trail};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub struct EngineState {
    pub width: f32,
    pub height: f32,
    pub center: Vec2,
    /// Base turtle step, derived from the viewport on resize.
    pub base_step: f32,
    /// Tracer speed in px/sec before calm damping.
    pub speed: f32,

    pub polygon: ShapePolygon,
    pub tracer: Tracer,
    pub trail: Trail,
    pub effects: Effects,
    pub detector: Detector,
    pub energy: EnergyField,

    pub drag: Option<DragState>,
    pub rotation: f32,
    pub breathing: bool,
    breath: f32,
    breath_scale: f32,

    /// Coherence scalar from the last tick's soft constraint; zero while the
    /// polygon is below the correction floor.
    pub symmetry: f32,
    pub mood: f32,
    /// Interior angles from the last tick, for the render layer.
    pub last_angles: Vec<f32>,
    pub last_touch: Option<(usize, f64)>,

    last_tap: Option<(Vec2, f64)>,
    shaper: PulseShaper,
    rng: StdRng,
    now: f64,
}

impl EngineState {
    pub fn new(seed: u64) -> Self {
        Self {
            width: 0.0,
            height: 0.0,
            center: Vec2::ZERO,
            base_step: 60.0,
            speed: 60.0 * TRACER_SPEED_FACTOR,
            polygon: ShapePolygon::new(),
            tracer: Tracer::default(),
            trail: Trail::default(),
            effects: Effects::default(),
            detector: Detector::default(),
            energy: EnergyField::default(),
            drag: None,
            rotation: 0.0,
            breathing: false,
            breath: 0.0,
            breath_scale: 1.0,
            symmetry: 0.0,
            mood: 0.0,
            last_angles: Vec::new(),
            last_touch: None,
            last_tap: None,
            shaper: PulseShaper::default(),
            rng: StdRng::seed_from_u64(seed),
            now: 0.0,
        }
    }

    pub fn now(&self) -> f64 {
        self.now
    }

    /// Adopt a new viewport. Seeds the default equilateral triangle on the
    /// first call and restarts the tracer walk.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        self.center = Vec2::new(width * 0.5, height * CENTER_Y_FACTOR);
        let min_side = width.min(height);
        self.base_step = min_side * BASE_STEP_FACTOR;
        self.speed = self.base_step * TRACER_SPEED_FACTOR;
        if self.polygon.is_empty() {
            self.polygon =
                ShapePolygon::regular(self.center, min_side * INITIAL_RADIUS_FACTOR, 3);
        }
        self.reset_tracer();
    }

    pub fn reset_tracer(&mut self) {
        self.tracer.reset(self.center, self.base_step, self.rotation);
        self.trail.clear();
    }

    /// One frame. `now` is the external monotonic clock in seconds; the
    /// simulated step is clamped so stalls cannot destabilize the forces.
    /// Completed tracer turns that survive the pulse rate limit land in
    /// `out_pulses` for the caller's synthesizer.
    pub fn tick(&mut self, now: f64, out_pulses: &mut Vec<PulseEvent>) {
        let delta = ((now - self.now) as f32).clamp(0.0, DELTA_MAX_SEC);
        self.now = now;

        self.detector.decay(delta);
        self.poll_hold_gestures(now);

        // Forces, in load-bearing order: seeds, soft symmetry, inertia,
        // balance, breathing. Balance reads the coherence computed by the
        // soft constraint in this same tick.
        crate::relax::apply_seeds(&mut self.polygon, &self.effects, delta, now);
        let drag_point = self.drag.as_ref().map_or(false, |d| d.is_point());
        let coherence = crate::relax::apply_soft_symmetry(
            &mut self.polygon,
            delta,
            drag_point,
            self.energy.symmetry_hold,
        );
        self.symmetry = coherence.unwrap_or(0.0);
        self.energy.note_symmetry(self.symmetry, delta);
        crate::relax::apply_inertia(&mut self.polygon, delta, now, drag_point);
        crate::relax::apply_balance(
            &mut self.polygon,
            delta,
            now,
            drag_point,
            &self.energy,
            self.symmetry,
            self.last_touch,
            &mut self.effects,
        );
        crate::relax::apply_breath(
            &mut self.polygon,
            self.breathing,
            &mut self.breath,
            &mut self.breath_scale,
            delta,
        );
        self.mood = mood_for_points(self.polygon.len());

        // Angle/edge profile feeding the tracer and the detector.
        let points = self.polygon.positions();
        let angles = geometry::polygon_angles(&points);
        let edges = geometry::polygon_edge_lengths(&points);
        let step_lengths: Vec<f32> = edges
            .iter()
            .map(|e| e.clamp(self.base_step * STEP_MIN_FACTOR, self.base_step * STEP_MAX_FACTOR))
            .collect();

        let calm_speed = 1.0
            - (self.energy.calm * CALM_SPEED_WEIGHT
                + self.energy.loop_settle * LOOP_SETTLE_SPEED_WEIGHT)
                * SUBTLETY;
        let advance = self.speed * delta * calm_speed;
        let step = self.tracer.advance(
            advance,
            &angles,
            &step_lengths,
            self.width,
            self.height,
            &self.energy.sweep,
            self.effects.portal.as_ref(),
        );
        for wrap in &step.wraps {
            self.effects.spawn(
                *wrap,
                now,
                EffectKind::WrapPortal {
                    radius: WRAP_PORTAL_RADIUS_PX,
                },
            );
        }
        self.trail.push(self.tracer.position, now);

        if self.effects.burst_allowed(now)
            && self.trail.loop_hit(self.tracer.position, self.base_step)
        {
            self.effects.note_burst(now);
            self.effects.spawn(
                self.tracer.position,
                now,
                EffectKind::Burst {
                    radius: self.base_step * BURST_RADIUS_FACTOR,
                },
            );
            for _ in 0..LOOP_SPARKLE_COUNT {
                let angle = self.rng.gen::<f32>() * std::f32::consts::TAU;
                self.effects.spawn(
                    self.tracer.position,
                    now,
                    EffectKind::Sparkle {
                        angle,
                        radius: self.base_step * SPARKLE_RADIUS_FACTOR,
                    },
                );
            }
            self.energy.loop_settle = 1.0;
        }

        let turns: Vec<f32> = angles.iter().map(|a| 180.0 - a).collect();
        let avg_turn = geometry::weighted_average_turn(&turns, &step_lengths);
        let detected = detect_sides(avg_turn, DETECT_TOLERANCE_DEG);
        if self.detector.observe(detected, &points, now) {
            log::debug!("[engine] detection -> {:?}", self.detector.detected);
        }

        if self.energy.symmetry_hold > PORTAL_HOLD_GATE_SEC && self.effects.portal_allowed(now) {
            let centroid = geometry::polygon_centroid(&points);
            let offset = self.base_step * PORTAL_JITTER_FACTOR;
            let jitter = Vec2::new(
                (self.rng.gen::<f32>() - 0.5) * offset,
                (self.rng.gen::<f32>() - 0.5) * offset,
            );
            self.effects.spawn_portal(
                centroid + jitter,
                self.base_step * PORTAL_RADIUS_FACTOR,
                now,
            );
        }

        if let Some(turn) = step.completed_turn_deg {
            if let Some(pulse) = self.shaper.shape(
                now,
                turn,
                self.polygon.len(),
                self.symmetry,
                self.energy.excited,
                self.energy.drag_energy,
                &mut self.rng,
            ) {
                out_pulses.push(pulse);
            }
        }
        self.last_angles = angles;

        if self.energy.decay(delta, now) {
            self.effects.spawn(
                self.tracer.position,
                now,
                EffectKind::Wave {
                    radius: self.base_step * WAVE_RADIUS_FACTOR,
                },
            );
        }
        self.effects.sweep(now);
        self.polygon.age_all(delta);
    }

    /// Polled stand-ins for host timers: the long-press delete deadline and
    /// the held rotate gesture that flips on breathing. The delete deadline
    /// fires once; it is consumed even when the polygon is at its minimum.
    fn poll_hold_gestures(&mut self, now: f64) {
        let mut delete_index = None;
        match &mut self.drag {
            Some(DragState::Point {
                index,
                moved: false,
                hold_deadline,
                ..
            }) => {
                if let Some(deadline) = *hold_deadline {
                    if now >= deadline {
                        *hold_deadline = None;
                        delete_index = Some(*index);
                    }
                }
            }
            Some(DragState::Rotate {
                moved: false,
                is_breath,
                started,
                ..
            }) => {
                if now - *started > BREATH_GESTURE_HOLD_SEC {
                    self.breathing = true;
                    *is_breath = true;
                }
            }
            _ => {}
        }
        if let Some(index) = delete_index {
            if self.polygon.try_remove(index) {
                self.forget_touch(index);
                self.drag = None;
            }
        }
    }

    pub fn pointer_down(&mut self, pos: Vec2, mods: PointerMods) {
        self.breathing = false;

        // Touch has no native double-click; synthesize it from two quick
        // taps landing close together.
        if mods.kind == PointerKind::Touch {
            if let Some((tap_pos, tap_at)) = self.last_tap {
                if self.now - tap_at < DOUBLE_TAP_WINDOW_SEC
                    && tap_pos.distance(pos) < DOUBLE_TAP_RADIUS_PX
                {
                    self.last_tap = None;
                    self.double_click(pos);
                    return;
                }
            }
            self.last_tap = Some((pos, self.now));
        }

        let points = self.polygon.positions();
        if let Some(index) = geometry::pick_vertex(pos, &points, PICK_RADIUS_PX) {
            self.drag = Some(DragState::Point {
                index,
                moved: false,
                last: pos,
                last_delta: Vec2::ZERO,
                hold_deadline: Some(self.now + mods.kind.hold_delete_delay()),
            });
        } else {
            self.drag = Some(DragState::Rotate {
                origin: pos,
                start_rotation: self.rotation,
                last: pos,
                moved: false,
                is_breath: false,
                started: self.now,
            });
        }
    }

    pub fn pointer_move(&mut self, pos: Vec2, mods: PointerMods) {
        let now = self.now;
        let Some(drag) = self.drag.as_mut() else {
            return;
        };
        match drag {
            DragState::Point {
                index,
                moved,
                last,
                last_delta,
                hold_deadline,
            } => {
                let step = pos - *last;
                let speed = step.length();
                *last_delta = step;
                *last = pos;
                if speed > mods.kind.move_threshold() {
                    *moved = true;
                    *hold_deadline = None;
                }
                let index = *index;
                self.energy.note_pointer_speed(speed, step.y.atan2(step.x));
                let bounded = clamp_to_margin(pos, self.width, self.height);
                if let Some(v) = self.polygon.vertex_mut(index) {
                    v.target = Some(bounded);
                }
                self.breathing = false;
                self.last_touch = Some((index, now));
            }
            DragState::Rotate {
                origin,
                start_rotation,
                last,
                moved,
                is_breath,
                ..
            } => {
                let step = pos - *last;
                let speed = step.length();
                *last = pos;
                if speed > mods.kind.move_threshold() {
                    *moved = true;
                    *is_breath = false;
                    self.breathing = false;
                }
                self.rotation = *start_rotation + (pos.x - origin.x) * ROTATE_GAIN;
                self.energy.note_pointer_speed(speed, step.y.atan2(step.x));
            }
        }
    }

    pub fn pointer_up(&mut self, pos: Vec2, _mods: PointerMods) {
        let now = self.now;
        let was_breath = matches!(
            self.drag,
            Some(DragState::Rotate { is_breath: true, .. })
        );
        self.breathing = false;
        match self.drag.take() {
            Some(DragState::Point {
                index, last_delta, ..
            }) => {
                self.detector.remember(&self.polygon.positions(), now);
                if let Some(v) = self.polygon.vertex_mut(index) {
                    v.target = None;
                    v.wobble = if v.age > WOBBLE_MIN_AGE_SEC {
                        Some(Wobble {
                            impulse: last_delta * WOBBLE_IMPULSE_SCALE,
                            start: now,
                        })
                    } else {
                        None
                    };
                }
                self.last_touch = Some((index, now));
            }
            Some(DragState::Rotate { origin, last, .. }) => {
                // A still, short rotate press plants a seed; a real rotation
                // leaves a shape memory instead.
                if origin.distance(last) < ROTATE_TAP_EPS_PX && !was_breath {
                    self.effects.spawn_seed(pos, now);
                } else {
                    self.detector.remember(&self.polygon.positions(), now);
                }
            }
            None => {}
        }
    }

    /// Edge-insert: a double click close enough to an edge splits it at the
    /// click, preserving cyclic order.
    pub fn double_click(&mut self, pos: Vec2) {
        let points = self.polygon.positions();
        let Some(hit) = geometry::closest_edge(pos, &points) else {
            return;
        };
        if hit.dist < EDGE_INSERT_MAX_PX {
            let bounded = clamp_to_margin(pos, self.width, self.height);
            self.polygon.insert_at(hit.index, bounded);
            self.energy.phase_bloom = 1.0;
        }
    }

    /// Right-click / context-menu delete of a picked vertex; the minimum
    /// vertex count guard lives in the polygon itself.
    pub fn context_delete(&mut self, pos: Vec2) {
        let points = self.polygon.positions();
        if let Some(index) = geometry::pick_vertex(pos, &points, PICK_RADIUS_PX) {
            if self.polygon.try_remove(index) {
                self.forget_touch(index);
            }
        }
    }

    fn forget_touch(&mut self, index: usize) {
        if matches!(self.last_touch, Some((i, _)) if i == index) {
            self.last_touch = None;
        }
    }
}

fn clamp_to_margin(pos: Vec2, width: f32, height: f32) -> Vec2 {
    Vec2::new(
        pos.x.clamp(DRAG_MARGIN_PX, (width - DRAG_MARGIN_PX).max(DRAG_MARGIN_PX)),
        pos.y.clamp(DRAG_MARGIN_PX, (height - DRAG_MARGIN_PX).max(DRAG_MARGIN_PX)),
    )
}
