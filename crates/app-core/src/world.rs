//! The world protocol: what the host shell needs from any interactive
//! sketch, plus the crossfade switcher between worlds.
//!
//! Worlds avoid platform APIs entirely; rendering stays host-side, reading
//! world state through whatever concrete access the frontend has. The trait
//! covers the shell protocol only (construction plays the init role).

use crate::engine::EngineState;
use crate::input::{PointerMods, PointerKind};
use crate::music::PulseEvent;
use crate::polygon::ShapePolygon;
use glam::Vec2;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    DoubleClick,
    ContextDelete,
}

/// Labels for the host HUD sink.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HudInfo {
    pub world: &'static str,
    pub points: usize,
    /// Detected regular-polygon side count, if any.
    pub signal: Option<u32>,
}

/// A point snapshot a world can be persisted from and restored into.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WorldSnapshot {
    pub points: Vec<[f32; 2]>,
    pub detected: Option<u32>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("snapshot needs at least 3 points, got {0}")]
    TooFewPoints(usize),
    #[error("snapshot contains non-finite coordinates")]
    NonFinite,
}

pub trait World {
    fn id(&self) -> &'static str;
    fn on_resize(&mut self, width: f32, height: f32, ratio: f32);
    fn on_enter(&mut self);
    fn on_exit(&mut self);
    /// One frame against the host clock; emitted pulses go to the host's
    /// sound generator.
    fn update(&mut self, now_sec: f64, out_pulses: &mut Vec<PulseEvent>);
    fn on_pointer(&mut self, phase: PointerPhase, x: f32, y: f32, mods: &PointerMods);
    fn hud(&self) -> HudInfo;
    fn snapshot(&self) -> WorldSnapshot;
    fn load_snapshot(&mut self, snap: &WorldSnapshot) -> Result<(), SnapshotError>;
}

impl World for EngineState {
    fn id(&self) -> &'static str {
        "geometry"
    }

    fn on_resize(&mut self, width: f32, height: f32, _ratio: f32) {
        self.resize(width, height);
    }

    fn on_enter(&mut self) {
        log::info!("[world] geometry enter, {} points", self.polygon.len());
    }

    fn on_exit(&mut self) {}

    fn update(&mut self, now_sec: f64, out_pulses: &mut Vec<PulseEvent>) {
        self.tick(now_sec, out_pulses);
    }

    fn on_pointer(&mut self, phase: PointerPhase, x: f32, y: f32, mods: &PointerMods) {
        let pos = Vec2::new(x, y);
        match phase {
            PointerPhase::Down => self.pointer_down(pos, *mods),
            PointerPhase::Move => self.pointer_move(pos, *mods),
            PointerPhase::Up => self.pointer_up(pos, *mods),
            PointerPhase::DoubleClick => self.double_click(pos),
            PointerPhase::ContextDelete => {
                // Context delete comes from a right click or a synthesized
                // long press; touch never reports it directly.
                if mods.kind != PointerKind::Touch {
                    self.context_delete(pos);
                }
            }
        }
    }

    fn hud(&self) -> HudInfo {
        HudInfo {
            world: "shape",
            points: self.polygon.len(),
            signal: self.detector.detected,
        }
    }

    fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            points: self
                .polygon
                .iter()
                .map(|v| [v.pos.x, v.pos.y])
                .collect(),
            detected: self.detector.detected,
        }
    }

    fn load_snapshot(&mut self, snap: &WorldSnapshot) -> Result<(), SnapshotError> {
        if snap.points.len() < 3 {
            return Err(SnapshotError::TooFewPoints(snap.points.len()));
        }
        if snap
            .points
            .iter()
            .any(|p| !p[0].is_finite() || !p[1].is_finite())
        {
            return Err(SnapshotError::NonFinite);
        }
        let mut polygon = ShapePolygon::new();
        for (i, p) in snap.points.iter().enumerate() {
            polygon.insert_at(i, Vec2::new(p[0], p[1]));
        }
        self.polygon = polygon;
        self.drag = None;
        self.last_touch = None;
        self.reset_tracer();
        Ok(())
    }
}

/// Host-side crossfade between the current and the next world. The overlay
/// pulses over 0.8 seconds; the actual swap happens at the halfway point.
#[derive(Clone, Copy, Debug, Default)]
pub struct Switcher {
    pub active: bool,
    pub t: f32,
    pub overlay: f32,
    swapped: bool,
}

/// What the host should do after stepping the transition this frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwitchPhase {
    Idle,
    Fading,
    /// Halfway point: exit the current world and enter the next one now.
    SwapNow,
}

const TRANSITION_SEC: f32 = 0.8;
const OVERLAY_PEAK: f32 = 0.35;

impl Switcher {
    pub fn begin(&mut self) {
        self.active = true;
        self.t = 0.0;
        self.overlay = 0.0;
        self.swapped = false;
    }

    pub fn step(&mut self, delta: f32) -> SwitchPhase {
        if !self.active {
            return SwitchPhase::Idle;
        }
        self.t += delta / TRANSITION_SEC;
        self.overlay = (self.t.min(1.0) * std::f32::consts::PI).sin() * OVERLAY_PEAK;
        if self.t >= 1.0 {
            self.active = false;
            self.t = 0.0;
            self.overlay = 0.0;
            return SwitchPhase::Idle;
        }
        if self.t >= 0.5 && !self.swapped {
            self.swapped = true;
            return SwitchPhase::SwapNow;
        }
        SwitchPhase::Fading
    }
}

// Keep the HUD signal formatting next to the protocol so both native tests
// and the web frontend agree on it.
pub fn signal_label(signal: Option<u32>) -> String {
    match signal {
        Some(sides) => format!("{sides}-gon"),
        None => "—".to_string(),
    }
}
