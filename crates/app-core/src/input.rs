//! Pointer interaction state.
//!
//! Exactly one drag is active at a time. Long-press delete is a polled
//! deadline on the drag state rather than a host-scheduled callback: it is
//! checked every tick and cleared synchronously when movement is detected or
//! the pointer is released.

use crate::constants::*;
use glam::Vec2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerKind {
    Mouse,
    Touch,
    Pen,
}

impl PointerKind {
    /// Touch gets a tighter moved threshold and a shorter long-press delay.
    pub fn move_threshold(self) -> f32 {
        match self {
            PointerKind::Touch => MOVE_THRESHOLD_TOUCH_PX,
            _ => MOVE_THRESHOLD_PX,
        }
    }

    pub fn hold_delete_delay(self) -> f64 {
        match self {
            PointerKind::Touch => HOLD_DELETE_TOUCH_SEC,
            _ => HOLD_DELETE_MOUSE_SEC,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct PointerMods {
    pub kind: PointerKind,
    pub alt: bool,
    pub shift: bool,
    pub button: i16,
}

impl Default for PointerMods {
    fn default() -> Self {
        Self {
            kind: PointerKind::Mouse,
            alt: false,
            shift: false,
            button: 0,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub enum DragState {
    /// Dragging a single vertex. `hold_deadline` schedules the long-press
    /// delete; it is `None` once movement cancels it.
    Point {
        index: usize,
        moved: bool,
        last: Vec2,
        last_delta: Vec2,
        hold_deadline: Option<f64>,
    },
    /// Background drag rotating the tracer start, or a held breath gesture.
    Rotate {
        origin: Vec2,
        start_rotation: f32,
        last: Vec2,
        moved: bool,
        is_breath: bool,
        started: f64,
    },
}

impl DragState {
    pub fn is_point(&self) -> bool {
        matches!(self, DragState::Point { .. })
    }
}
