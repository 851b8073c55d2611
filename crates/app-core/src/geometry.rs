//! Pure polygon math shared by the relaxation engine, detector and tracer.
//!
//! Everything here operates on plain position slices so callers can hand in
//! either live vertex positions or snapshots. Angles are in degrees to match
//! the turtle-program convention; headings are radians.

use glam::Vec2;

const DEGENERATE_EDGE_EPS: f32 = 1e-6;
/// Interior angle reported for a vertex whose adjacent edges collapse.
const DEGENERATE_ANGLE_DEG: f32 = 60.0;

/// Interior angle at every vertex, degrees, cyclic. One value per input point.
pub fn polygon_angles(points: &[Vec2]) -> Vec<f32> {
    let n = points.len();
    let mut angles = Vec::with_capacity(n);
    for i in 0..n {
        let prev = points[(i + n - 1) % n];
        let curr = points[i];
        let next = points[(i + 1) % n];
        let v1 = prev - curr;
        let v2 = next - curr;
        let mag = v1.length() * v2.length();
        if mag < DEGENERATE_EDGE_EPS {
            angles.push(DEGENERATE_ANGLE_DEG);
            continue;
        }
        let cos = (v1.dot(v2) / mag).clamp(-1.0, 1.0);
        angles.push(cos.acos().to_degrees());
    }
    angles
}

/// Consecutive edge lengths, cyclic: entry `i` is the edge leaving vertex `i`.
pub fn polygon_edge_lengths(points: &[Vec2]) -> Vec<f32> {
    let n = points.len();
    (0..n)
        .map(|i| points[i].distance(points[(i + 1) % n]))
        .collect()
}

/// Length-weighted mean of per-vertex exterior turns. A zero total length
/// yields NaN, which the detector rejects via its finiteness check.
pub fn weighted_average_turn(turns: &[f32], lengths: &[f32]) -> f32 {
    let total: f32 = lengths.iter().sum();
    let weighted: f32 = turns
        .iter()
        .zip(lengths)
        .map(|(turn, len)| turn * len)
        .sum();
    weighted / total
}

#[derive(Clone, Copy, Debug)]
pub struct EdgeHit {
    /// Index of the endpoint that follows the closest edge, which is also the
    /// insertion index for a new vertex on that edge.
    pub index: usize,
    pub dist: f32,
}

/// Project `point` onto every edge segment and return the closest hit.
pub fn closest_edge(point: Vec2, poly: &[Vec2]) -> Option<EdgeHit> {
    if poly.len() < 2 {
        return None;
    }
    let n = poly.len();
    let mut best: Option<EdgeHit> = None;
    for i in 0..n {
        let next = (i + 1) % n;
        let a = poly[i];
        let b = poly[next];
        let ab = b - a;
        let len_sq = ab.length_squared();
        let proj = if len_sq < DEGENERATE_EDGE_EPS {
            a
        } else {
            let t = ((point - a).dot(ab) / len_sq).clamp(0.0, 1.0);
            a + ab * t
        };
        let d = point.distance(proj);
        if best.map_or(true, |hit| d < hit.dist) {
            best = Some(EdgeHit { index: next, dist: d });
        }
    }
    best
}

pub fn polygon_centroid(points: &[Vec2]) -> Vec2 {
    let sum: Vec2 = points.iter().copied().sum();
    sum / points.len().max(1) as f32
}

/// Shortest signed difference `target - source`, wrapped to (-PI, PI].
pub fn angle_delta(target: f32, source: f32) -> f32 {
    let tau = std::f32::consts::TAU;
    let mut diff = target - source;
    while diff > std::f32::consts::PI {
        diff -= tau;
    }
    while diff < -std::f32::consts::PI {
        diff += tau;
    }
    diff
}

/// First vertex within `radius` of `position`, if any.
pub fn pick_vertex(position: Vec2, points: &[Vec2], radius: f32) -> Option<usize> {
    points
        .iter()
        .position(|p| p.distance(position) < radius)
}
