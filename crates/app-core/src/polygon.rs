//! The editable closed polygon: an ordered, cyclic vertex sequence.
//!
//! The polygon owns its vertices exclusively; every other component works on
//! read-only position snapshots or indices. The vertex count never drops
//! below three.

use crate::constants::*;
use crate::geometry;
use glam::Vec2;

/// Decaying oscillation impulse applied to a vertex after release.
#[derive(Clone, Copy, Debug)]
pub struct Wobble {
    pub impulse: Vec2,
    pub start: f64,
}

#[derive(Clone, Debug)]
pub struct ShapeVertex {
    pub pos: Vec2,
    /// Pending movement destination, cleared once reached within an epsilon.
    pub target: Option<Vec2>,
    /// Seconds since this vertex was last touched.
    pub age: f32,
    pub wobble: Option<Wobble>,
}

impl ShapeVertex {
    fn settled(pos: Vec2) -> Self {
        Self {
            pos,
            target: None,
            age: 999.0,
            wobble: None,
        }
    }

    fn fresh(pos: Vec2) -> Self {
        Self {
            pos,
            target: None,
            age: 0.0,
            wobble: None,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct ShapePolygon {
    verts: Vec<ShapeVertex>,
}

impl ShapePolygon {
    pub fn new() -> Self {
        Self::default()
    }

    /// Regular n-gon around `center`, first vertex pointing up.
    pub fn regular(center: Vec2, radius: f32, sides: usize) -> Self {
        let mut verts = Vec::with_capacity(sides);
        for i in 0..sides {
            let angle =
                (i as f32 / sides as f32) * std::f32::consts::TAU - std::f32::consts::FRAC_PI_2;
            verts.push(ShapeVertex::settled(
                center + Vec2::new(angle.cos(), angle.sin()) * radius,
            ));
        }
        Self { verts }
    }

    pub fn len(&self) -> usize {
        self.verts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verts.is_empty()
    }

    pub fn vertex(&self, index: usize) -> Option<&ShapeVertex> {
        self.verts.get(index)
    }

    pub fn vertex_mut(&mut self, index: usize) -> Option<&mut ShapeVertex> {
        self.verts.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ShapeVertex> {
        self.verts.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut ShapeVertex> {
        self.verts.iter_mut()
    }

    /// Read-only position snapshot in cyclic order.
    pub fn positions(&self) -> Vec<Vec2> {
        self.verts.iter().map(|v| v.pos).collect()
    }

    pub fn centroid(&self) -> Vec2 {
        geometry::polygon_centroid(&self.positions())
    }

    /// Insert a new vertex between its two chosen neighbors. `index` is the
    /// following-endpoint index reported by `geometry::closest_edge`, so
    /// cyclic order is preserved.
    pub fn insert_at(&mut self, index: usize, pos: Vec2) {
        let index = index.min(self.verts.len());
        self.verts.insert(index, ShapeVertex::fresh(pos));
    }

    /// Remove a vertex. No-op when the polygon is already at its minimum of
    /// three vertices; returns whether a removal happened.
    pub fn try_remove(&mut self, index: usize) -> bool {
        if self.verts.len() <= 3 || index >= self.verts.len() {
            return false;
        }
        self.verts.remove(index);
        true
    }

    pub fn age_all(&mut self, delta: f32) {
        for v in &mut self.verts {
            v.age += delta;
        }
    }
}
