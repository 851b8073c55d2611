//! Pointer-driven energy scalars and the moods derived from them.
//!
//! Drag energy follows recent pointer speed and decays on its own; "excited"
//! and "calm" are slewed toward gates on it. A falling edge of excited while
//! the hand has gone quiet fires an emission wave, the audible release cue.

use crate::constants::*;

/// Decaying heading impulse from fast pointer motion, consumed by the tracer.
#[derive(Clone, Copy, Debug, Default)]
pub struct SweepImpulse {
    pub strength: f32,
    pub angle: f32,
}

#[derive(Clone, Debug)]
pub struct EnergyField {
    pub drag_energy: f32,
    pub calm: f32,
    pub excited: f32,
    prev_excited: f32,
    pub sweep: SweepImpulse,
    /// Set to 1 on vertex insertion, decays; widens the trace rendering.
    pub phase_bloom: f32,
    /// Set to 1 on loop detection, decays; slows and emphasizes the tracer.
    pub loop_settle: f32,
    /// Seconds the symmetry scalar has stayed above its high gate.
    pub symmetry_hold: f32,
    last_wave: f64,
}

impl Default for EnergyField {
    fn default() -> Self {
        Self {
            drag_energy: 0.0,
            calm: 0.0,
            excited: 0.0,
            prev_excited: 0.0,
            sweep: SweepImpulse::default(),
            phase_bloom: 0.0,
            loop_settle: 0.0,
            symmetry_hold: 0.0,
            last_wave: f64::NEG_INFINITY,
        }
    }
}

impl EnergyField {
    /// Feed one pointer-move sample (per-event pixel delta). Drag energy is
    /// only ever raised to the instantaneous speed, never eagerly past it.
    pub fn note_pointer_speed(&mut self, speed_px: f32, angle: f32) {
        self.drag_energy = self
            .drag_energy
            .max((speed_px / DRAG_ENERGY_SPEED_NORM_PX).clamp(0.0, 1.0));
        if speed_px > SWEEP_MIN_SPEED_PX {
            self.sweep.strength =
                (self.sweep.strength + speed_px * SWEEP_SPEED_GAIN).min(SWEEP_STRENGTH_MAX);
            self.sweep.angle = angle;
        }
    }

    pub fn note_symmetry(&mut self, symmetry: f32, delta: f32) {
        if symmetry > SYMMETRY_HOLD_GATE {
            self.symmetry_hold = (self.symmetry_hold + delta).min(SYMMETRY_HOLD_MAX_SEC);
        } else {
            self.symmetry_hold =
                (self.symmetry_hold - delta * SYMMETRY_HOLD_FALL_PER_SEC).max(0.0);
        }
    }

    /// Per-tick decay pass. Returns true when the excited scalar fell through
    /// the wave edge with low drag energy, respecting the refractory window;
    /// the caller spawns the emission wave at the tracer's position.
    pub fn decay(&mut self, delta: f32, now: f64) -> bool {
        self.sweep.strength = (self.sweep.strength - delta * SWEEP_DECAY_PER_SEC).max(0.0);
        self.drag_energy = (self.drag_energy - delta * DRAG_ENERGY_DECAY_PER_SEC).max(0.0);
        let calm_step = if self.drag_energy < CALM_ENERGY_FLOOR {
            delta * CALM_RISE_PER_SEC
        } else {
            -delta * CALM_FALL_PER_SEC
        };
        self.calm = (self.calm + calm_step).clamp(0.0, 1.0);
        self.phase_bloom = (self.phase_bloom - delta * PHASE_BLOOM_DECAY_PER_SEC).max(0.0);
        self.loop_settle = (self.loop_settle - delta * LOOP_SETTLE_DECAY_PER_SEC).max(0.0);

        let excited_step = if self.drag_energy > EXCITED_ENERGY_GATE {
            delta * EXCITED_RISE_PER_SEC
        } else {
            -delta * EXCITED_FALL_PER_SEC
        };
        self.excited = (self.excited + excited_step).clamp(0.0, 1.0);

        let release = self.prev_excited > WAVE_EDGE
            && self.excited <= WAVE_EDGE
            && self.drag_energy < WAVE_ENERGY_CEIL
            && now - self.last_wave > WAVE_INTERVAL_SEC;
        if release {
            self.last_wave = now;
        }
        self.prev_excited = self.excited;
        release
    }
}
