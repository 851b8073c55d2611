//! Best-fit regular-polygon detection and its transition bookkeeping.

use crate::constants::*;
use glam::Vec2;

/// Guess the side count of the regular polygon whose turn profile best fits
/// `avg_turn` (degrees). Returns `None` for non-finite or non-positive input,
/// side counts outside [3, 12], or fits worse than `tolerance` degrees.
pub fn detect_sides(avg_turn: f32, tolerance: f32) -> Option<u32> {
    if !avg_turn.is_finite() || avg_turn <= 0.0 {
        return None;
    }
    let rounded = (360.0 / avg_turn).round();
    if rounded < DETECT_MIN_SIDES as f32 || rounded > DETECT_MAX_SIDES as f32 {
        return None;
    }
    let sides = rounded as u32;
    let target_turn = 360.0 / sides as f32;
    if (avg_turn - target_turn).abs() > tolerance {
        return None;
    }
    Some(sides)
}

/// Point snapshot kept for after-the-fact ghost rendering.
#[derive(Clone, Debug)]
pub struct ShapeMemory {
    pub points: Vec<Vec2>,
    pub at: f64,
}

/// Tracks the current detection, the bloom highlight it triggers, and the
/// short memory stack of recently detected shapes.
#[derive(Clone, Debug, Default)]
pub struct Detector {
    pub detected: Option<u32>,
    /// Decaying highlight intensity, reset to 1 whenever `detected` changes.
    pub bloom: f32,
    /// Most-recent-first, capped at `MEMORY_CAP`.
    pub memories: Vec<ShapeMemory>,
}

impl Detector {
    /// Record a recompute result. Any change of detection, including to and
    /// from `None`, resets the bloom and snapshots the current points.
    pub fn observe(&mut self, sides: Option<u32>, points: &[Vec2], now: f64) -> bool {
        if sides == self.detected {
            return false;
        }
        self.detected = sides;
        self.bloom = 1.0;
        self.remember(points, now);
        true
    }

    pub fn remember(&mut self, points: &[Vec2], now: f64) {
        self.memories.insert(
            0,
            ShapeMemory {
                points: points.to_vec(),
                at: now,
            },
        );
        self.memories.truncate(MEMORY_CAP);
    }

    pub fn decay(&mut self, delta: f32) {
        self.bloom = (self.bloom - delta * BLOOM_DECAY_PER_SEC).max(0.0);
    }
}
