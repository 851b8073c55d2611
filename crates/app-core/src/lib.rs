//! Core engine for polygong: a pointer-editable polygon that relaxes toward
//! regular shapes, a regular-polygon detector driving pulse events, and a
//! turtle tracer walking the polygon's angle program.
//!
//! Everything here is platform-free and suitable for both native tests and
//! the wasm frontend. Rendering, synthesis and DOM wiring live in `app-web`.

pub mod constants;
pub mod detect;
pub mod effects;
pub mod energy;
pub mod engine;
pub mod geometry;
pub mod input;
pub mod music;
pub mod polygon;
pub mod relax;
pub mod tracer;
pub mod world;

pub use detect::{detect_sides, Detector, ShapeMemory};
pub use effects::{Effect, EffectKind, Effects, Portal};
pub use energy::{EnergyField, SweepImpulse};
pub use engine::EngineState;
pub use input::{DragState, PointerKind, PointerMods};
pub use music::{key_ratio_for_points, mood_for_points, Partial, PulseEvent, PulseShaper};
pub use polygon::{ShapePolygon, ShapeVertex, Wobble};
pub use tracer::{StepResult, Tracer, Trail, TrailSample};
pub use world::{
    signal_label, HudInfo, PointerPhase, SnapshotError, SwitchPhase, Switcher, World,
    WorldSnapshot,
};
