//! Per-frame relaxation forces pulling the polygon toward symmetry.
//!
//! Order matters: seeds run first, then the global soft constraint, then
//! per-point inertia, then the local balance field, then breathing. Later
//! steps read the coherence computed by earlier ones in the same tick.
//! Every step is a no-op at zero delta and below three vertices.

use crate::constants::*;
use crate::effects::Effects;
use crate::energy::EnergyField;
use crate::geometry;
use crate::polygon::ShapePolygon;
use glam::Vec2;

/// Active transient seeds each pull the single nearest vertex toward them,
/// fading linearly over the seed's duration.
pub fn apply_seeds(poly: &mut ShapePolygon, effects: &Effects, delta: f32, now: f64) {
    for seed in effects.seeds(now) {
        let duration = seed.lifetime();
        let time_left = duration - seed.age(now);
        if time_left <= 0.0 {
            continue;
        }
        let mut closest = 0;
        let mut closest_dist = f32::INFINITY;
        for (i, v) in poly.iter().enumerate() {
            let d = v.pos.distance(seed.pos);
            if d < closest_dist {
                closest_dist = d;
                closest = i;
            }
        }
        let influence = (time_left / duration).clamp(0.0, 1.0);
        let pull = SEED_PULL * influence * delta;
        if let Some(v) = poly.vertex_mut(closest) {
            v.pos += (seed.pos - v.pos) * pull;
        }
    }
}

/// Global soft symmetry constraint. Measures coherence from the worst edge
/// and angle deviations; below the floor the polygon is left as the user
/// shaped it and `None` is returned. Above it, every vertex eases toward an
/// idealized regular polygon sharing the centroid, mean radius and vertex
/// zero's current bearing.
pub fn apply_soft_symmetry(
    poly: &mut ShapePolygon,
    delta: f32,
    drag_point_active: bool,
    symmetry_hold: f32,
) -> Option<f32> {
    if poly.len() < 3 {
        return None;
    }
    let points = poly.positions();
    let angles = geometry::polygon_angles(&points);
    let edges = geometry::polygon_edge_lengths(&points);
    let avg_edge: f32 = edges.iter().sum::<f32>() / edges.len() as f32;
    let avg_angle: f32 = angles.iter().sum::<f32>() / angles.len() as f32;
    let edge_dev = edges
        .iter()
        .map(|e| (e - avg_edge).abs())
        .fold(0.0_f32, f32::max)
        / avg_edge;
    let angle_dev = angles
        .iter()
        .map(|a| (a - avg_angle).abs())
        .fold(0.0_f32, f32::max)
        / avg_angle;
    let coherence = (1.0 - (edge_dev + angle_dev) * 0.5).clamp(0.0, 1.0);
    if !coherence.is_finite() || coherence < COHERENCE_FLOOR {
        return None;
    }

    let settle_fade = if drag_point_active {
        (1.0 - coherence).clamp(0.7, 1.0)
    } else {
        (1.0 - coherence).clamp(0.5, 1.0)
    };
    let hold_fade = hold_fade(symmetry_hold);
    let drag_boost = if drag_point_active {
        if coherence > SOFT_NEAR_COHERENCE {
            SOFT_DRAG_BOOST_NEAR
        } else {
            SOFT_DRAG_BOOST_FAR
        }
    } else {
        1.0
    };
    let strength = ((coherence - COHERENCE_FLOOR) / (1.0 - COHERENCE_FLOOR))
        * delta
        * SOFT_STRENGTH
        * SUBTLETY
        * settle_fade
        * hold_fade
        * drag_boost;

    let centroid = geometry::polygon_centroid(&points);
    let first = points[0] - centroid;
    let base_angle = first.y.atan2(first.x);
    let radius: f32 =
        points.iter().map(|p| p.distance(centroid)).sum::<f32>() / points.len() as f32;
    let n = poly.len();
    for (i, v) in poly.iter_mut().enumerate() {
        let target_angle = base_angle + (std::f32::consts::TAU / n as f32) * i as f32;
        let target = centroid + Vec2::new(target_angle.cos(), target_angle.sin()) * radius;
        v.pos += (target - v.pos) * strength;
    }
    Some(coherence)
}

/// Vertices with a pending target ease toward it exponentially; post-release
/// wobble impulses add a decaying sinusoidal offset for a short while.
pub fn apply_inertia(poly: &mut ShapePolygon, delta: f32, now: f64, drag_point_active: bool) {
    let ease = (1.0 - (-INERTIA_RATE_PER_SEC * delta).exp())
        * if drag_point_active {
            INERTIA_DRAG_SCALE
        } else {
            1.0
        };
    for v in poly.iter_mut() {
        if let Some(target) = v.target {
            v.pos += (target - v.pos) * ease * SUBTLETY;
            if v.pos.distance(target) < TARGET_REACHED_PX {
                v.target = None;
            }
        }
        if let Some(w) = v.wobble {
            let age = (now - w.start) as f32;
            if age < WOBBLE_LIFE_SEC {
                let decay = (-WOBBLE_DECAY_PER_SEC * age).exp();
                let osc = (age * WOBBLE_FREQ_RAD_PER_SEC).sin();
                v.pos += w.impulse * decay * osc;
            }
        }
    }
}

/// Discrete curvature smoothing: a vertex whose adjacent edges are already
/// near-balanced eases toward its neighbors' midpoint. When the correction
/// is both active and tiny while symmetry is high, a whisper transient marks
/// the midpoint.
#[allow(clippy::too_many_arguments)]
pub fn apply_balance(
    poly: &mut ShapePolygon,
    delta: f32,
    now: f64,
    drag_point_active: bool,
    energy: &EnergyField,
    symmetry: f32,
    last_touch: Option<(usize, f64)>,
    effects: &mut Effects,
) {
    if poly.len() < 3 {
        return;
    }
    let points = poly.positions();
    let edges = geometry::polygon_edge_lengths(&points);
    let avg_edge: f32 = edges.iter().sum::<f32>() / edges.len() as f32;
    let drag_boost = if drag_point_active {
        if symmetry > WHISPER_MIN_SYMMETRY {
            BALANCE_DRAG_BOOST_HIGH
        } else {
            BALANCE_DRAG_BOOST_LOW
        }
    } else {
        1.0
    };
    let hold_fade = hold_fade(energy.symmetry_hold);
    let settle_fade = if drag_point_active {
        (1.0 - symmetry).clamp(0.7, 1.0)
    } else {
        (1.0 - symmetry).clamp(0.5, 1.0)
    };
    let n = points.len();
    for i in 0..n {
        let prev = points[(i + n - 1) % n];
        let next = points[(i + 1) % n];
        let prev_len = edges[(i + n - 1) % n];
        let next_len = edges[i];
        let diff = if avg_edge > 0.0 {
            (prev_len - next_len).abs() / avg_edge
        } else {
            0.0
        };
        if diff > BALANCE_WINDOW {
            continue;
        }
        let midpoint = (prev + next) * 0.5;
        let recent_touch = last_touch.map_or(false, |(idx, t)| {
            idx == i && now - t < RECENT_TOUCH_WINDOW_SEC as f64
        });
        let age_boost = if poly.vertex(i).map_or(false, |v| v.age > RELEASE_AGE_SEC) {
            RELEASE_BOOST_SETTLED
        } else {
            RELEASE_BOOST_FRESH
        };
        let release_boost = if !drag_point_active && recent_touch {
            age_boost
        } else {
            1.0
        };
        let strength = (BALANCE_WINDOW - diff)
            * delta
            * BALANCE_STRENGTH
            * SUBTLETY
            * settle_fade
            * hold_fade
            * drag_boost
            * release_boost;
        if let Some(v) = poly.vertex_mut(i) {
            v.pos += (midpoint - v.pos) * strength;
        }
        if symmetry > WHISPER_MIN_SYMMETRY && diff < WHISPER_WINDOW {
            effects.try_whisper(midpoint, now);
        }
    }
}

/// Uniform scale about the centroid toward the breath ceiling while the
/// breathing flag is held, back to baseline otherwise. The persistent scale
/// is tracked so repeated ratios do not compound error.
pub fn apply_breath(
    poly: &mut ShapePolygon,
    breathing: bool,
    breath: &mut f32,
    breath_scale: &mut f32,
    delta: f32,
) {
    let step = if breathing {
        BREATH_IN_PER_SEC * delta
    } else {
        -BREATH_OUT_PER_SEC * delta
    };
    *breath = (*breath + step).clamp(0.0, 1.0);
    let scale = 1.0 + *breath * BREATH_SCALE_SPAN;
    let ratio = scale / *breath_scale;
    if (ratio - 1.0).abs() < 1e-4 {
        return;
    }
    let centroid = poly.centroid();
    for v in poly.iter_mut() {
        v.pos = centroid + (v.pos - centroid) * ratio;
    }
    *breath_scale = scale;
}

fn hold_fade(symmetry_hold: f32) -> f32 {
    if symmetry_hold > HOLD_FADE_START_SEC {
        (1.0 - (symmetry_hold - HOLD_FADE_START_SEC) / HOLD_FADE_SPAN_SEC)
            .clamp(HOLD_FADE_MIN, 1.0)
    } else {
        1.0
    }
}
