//! The turtle walker and its trail.
//!
//! The tracer consumes only the numeric angle/edge-length profile derived
//! from the polygon, never vertex identity, so edits to the polygon bend its
//! path instead of teleporting it. Screen edges wrap toroidally.

use crate::constants::*;
use crate::effects::Portal;
use crate::energy::SweepImpulse;
use crate::geometry::angle_delta;
use glam::Vec2;
use smallvec::SmallVec;
use std::collections::VecDeque;

#[derive(Clone, Debug, Default)]
pub struct Tracer {
    pub position: Vec2,
    /// Radians.
    pub heading: f32,
    pub step_index: usize,
    pub step_progress: f32,
}

/// What one advance produced: a completed turn (degrees, fed to the pulse
/// mapper) and any screen-wrap crossing points.
#[derive(Clone, Debug, Default)]
pub struct StepResult {
    pub completed_turn_deg: Option<f32>,
    pub wraps: SmallVec<[Vec2; 2]>,
}

impl Tracer {
    pub fn reset(&mut self, center: Vec2, base_step: f32, heading: f32) {
        self.position = center + Vec2::new(base_step * 1.2, 0.0);
        self.heading = heading;
        self.step_index = 0;
        self.step_progress = 0.0;
    }

    /// Advance along the current heading by `advance_px`, applying the sweep
    /// bias and any portal field every frame. Completing the current edge's
    /// step length snaps progress, turns by the current vertex's exterior
    /// angle and moves to the next angle index cyclically.
    pub fn advance(
        &mut self,
        advance_px: f32,
        angles: &[f32],
        step_lengths: &[f32],
        width: f32,
        height: f32,
        sweep: &SweepImpulse,
        portal: Option<&Portal>,
    ) -> StepResult {
        let mut result = StepResult::default();
        if angles.is_empty() || step_lengths.is_empty() {
            return result;
        }
        let current_angle = angles[self.step_index % angles.len()];
        let step_length = step_lengths[self.step_index % step_lengths.len()];

        self.heading += sweep.strength * SWEEP_TURN_GAIN
            + angle_delta(sweep.angle, self.heading) * sweep.strength * SWEEP_BIAS_GAIN;
        if let Some(p) = portal {
            let to_portal = p.pos - self.position;
            let dist = to_portal.length();
            let field = p.radius * PORTAL_FIELD_FACTOR;
            if dist < field {
                let target_angle = to_portal.y.atan2(to_portal.x);
                let pull = (1.0 - dist / field) * PORTAL_PULL * SUBTLETY;
                self.heading += angle_delta(target_angle, self.heading) * pull;
            }
        }

        self.position += Vec2::new(self.heading.cos(), self.heading.sin()) * advance_px;
        self.step_progress += advance_px;

        if self.step_progress >= step_length {
            self.step_progress = 0.0;
            self.heading += (180.0 - current_angle).to_radians();
            self.step_index = (self.step_index + 1) % angles.len();
            result.completed_turn_deg = Some(current_angle);
            return result;
        }

        if self.position.x < 0.0 {
            result.wraps.push(Vec2::new(0.0, self.position.y));
            self.position.x = width;
        }
        if self.position.x > width {
            result.wraps.push(Vec2::new(width, self.position.y));
            self.position.x = 0.0;
        }
        if self.position.y < 0.0 {
            result.wraps.push(Vec2::new(self.position.x, 0.0));
            self.position.y = height;
        }
        if self.position.y > height {
            result.wraps.push(Vec2::new(self.position.x, height));
            self.position.y = 0.0;
        }
        result
    }
}

#[derive(Clone, Copy, Debug)]
pub struct TrailSample {
    pub pos: Vec2,
    pub at: f64,
}

/// Bounded FIFO of tracer positions, one sample per tick.
#[derive(Clone, Debug, Default)]
pub struct Trail {
    samples: VecDeque<TrailSample>,
}

impl Trail {
    pub fn push(&mut self, pos: Vec2, now: f64) {
        self.samples.push_back(TrailSample { pos, at: now });
        while self.samples.len() > TRAIL_CAP {
            self.samples.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TrailSample> {
        self.samples.iter()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Coarse self-intersection probe: sample every `LOOP_SCAN_STRIDE`-th
    /// entry older than the most recent `LOOP_SCAN_SKIP_RECENT`, and report
    /// whether any lies within the loop radius of the current position.
    pub fn loop_hit(&self, position: Vec2, base_step: f32) -> bool {
        let cutoff = self.samples.len().saturating_sub(LOOP_SCAN_SKIP_RECENT);
        let radius = base_step * LOOP_RADIUS_FACTOR;
        (0..cutoff)
            .step_by(LOOP_SCAN_STRIDE)
            .any(|i| self.samples[i].pos.distance(position) < radius)
    }
}
