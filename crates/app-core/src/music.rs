//! Maps polygon state to tonal pulse parameters.
//!
//! This is the whole sound interface: the engine emits rate-limited
//! `PulseEvent`s from its tick and makes no assumption about synthesis
//! beyond fire-and-forget playback of these parameters.

use crate::constants::*;
use rand::Rng;
use smallvec::{smallvec, SmallVec};

/// Scale degrees cycled through by the vertex count.
pub const MINOR_PENTATONIC: [i32; 5] = [0, 3, 5, 7, 10];

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Partial {
    /// Frequency ratio against the pulse base.
    pub ratio: f32,
    pub detune_cents: f32,
}

/// One tonal pulse, fully parameterized for an external synthesizer.
#[derive(Clone, Debug)]
pub struct PulseEvent {
    pub base_hz: f32,
    pub partials: SmallVec<[Partial; 6]>,
    pub cutoff_hz: f32,
    pub filter_q: f32,
    pub peak_gain: f32,
    pub attack_sec: f64,
    pub release_sec: f64,
}

/// Semitone ratio for the scale degree selected by the vertex count.
pub fn key_ratio_for_points(count: usize) -> f32 {
    let degree = MINOR_PENTATONIC[count.saturating_sub(3) % MINOR_PENTATONIC.len()];
    2.0_f32.powf(degree as f32 / 12.0)
}

/// Mood scalar in [0, 1]: more vertices, brighter mood.
pub fn mood_for_points(count: usize) -> f32 {
    ((count.saturating_sub(3)) as f32 / 7.0).clamp(0.0, 1.0)
}

/// Rate-limited pulse mapper: at most one pulse per interval.
#[derive(Clone, Debug)]
pub struct PulseShaper {
    last_pulse: f64,
}

impl Default for PulseShaper {
    fn default() -> Self {
        Self {
            last_pulse: f64::NEG_INFINITY,
        }
    }
}

impl PulseShaper {
    /// Shape a pulse for a completed tracer turn. Higher symmetry selects
    /// fewer, more consonant partials; excitement adds a partial on top;
    /// drag energy brightens the filter and lifts the peak gain.
    pub fn shape<R: Rng>(
        &mut self,
        now: f64,
        turn_angle_deg: f32,
        point_count: usize,
        symmetry: f32,
        excited: f32,
        drag_energy: f32,
        rng: &mut R,
    ) -> Option<PulseEvent> {
        if now - self.last_pulse < PULSE_INTERVAL_SEC {
            return None;
        }
        self.last_pulse = now;

        let key_ratio = key_ratio_for_points(point_count);
        let base_hz =
            (PULSE_BASE_HZ + (turn_angle_deg / 180.0) * PULSE_ANGLE_SPAN_HZ) * key_ratio;

        let mut ratios: SmallVec<[f32; 6]> = if symmetry > 0.95 {
            smallvec![1.0]
        } else if symmetry > 0.9 {
            smallvec![1.0, 1.2, 1.333, 1.5, 1.8]
        } else {
            smallvec![1.0, 2.15, 2.9]
        };
        if excited > EXCITED_ENERGY_GATE {
            ratios.push(2.6);
        }

        let partials = ratios
            .into_iter()
            .enumerate()
            .map(|(i, ratio)| Partial {
                ratio,
                detune_cents: (rng.gen::<f32>() - 0.5) * PULSE_DETUNE_SPREAD_CENTS
                    + i as f32 * 2.0,
            })
            .collect();

        let energy = drag_energy.clamp(0.0, 1.0);
        Some(PulseEvent {
            base_hz,
            partials,
            cutoff_hz: PULSE_CUTOFF_BASE_HZ + energy * PULSE_CUTOFF_ENERGY_SPAN_HZ,
            filter_q: PULSE_FILTER_Q,
            peak_gain: PULSE_GAIN_BASE + energy * PULSE_GAIN_ENERGY_SPAN,
            attack_sec: PULSE_ATTACK_SEC,
            release_sec: PULSE_RELEASE_SEC,
        })
    }
}
