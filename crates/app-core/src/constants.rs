//! Engine tuning constants.
//!
//! Most of these are aesthetic parameters, not physical law: they were tuned
//! by eye and ear. Keep them named here rather than re-deriving them.

/// Global restraint multiplier applied to most visual/force strengths.
pub const SUBTLETY: f32 = 0.55;

/// Largest simulation step accepted per tick (seconds). Stalls clamp here.
pub const DELTA_MAX_SEC: f32 = 0.033;

// ---------------- Layout ----------------
pub const BASE_STEP_FACTOR: f32 = 0.07; // of min(width, height)
pub const TRACER_SPEED_FACTOR: f32 = 1.3; // of base step, px/sec
pub const CENTER_Y_FACTOR: f32 = 0.52;
pub const INITIAL_RADIUS_FACTOR: f32 = 0.18;

// ---------------- Regular-polygon detector ----------------
pub const DETECT_TOLERANCE_DEG: f32 = 2.5;
pub const DETECT_MIN_SIDES: u32 = 3;
pub const DETECT_MAX_SIDES: u32 = 12;
pub const MEMORY_CAP: usize = 3;
pub const BLOOM_DECAY_PER_SEC: f32 = 0.6;

// ---------------- Soft symmetry constraint ----------------
pub const COHERENCE_FLOOR: f32 = 0.45;
pub const SOFT_STRENGTH: f32 = 0.22;
// While dragging, pull harder when the shape is already near regular so a
// near-miss snaps, without fighting a user who is far from regular.
pub const SOFT_DRAG_BOOST_NEAR: f32 = 1.6;
pub const SOFT_DRAG_BOOST_FAR: f32 = 1.35;
pub const SOFT_NEAR_COHERENCE: f32 = 0.85;
pub const HOLD_FADE_START_SEC: f32 = 1.2;
pub const HOLD_FADE_SPAN_SEC: f32 = 0.8;
pub const HOLD_FADE_MIN: f32 = 0.35;
pub const SYMMETRY_HOLD_GATE: f32 = 0.92;
pub const SYMMETRY_HOLD_MAX_SEC: f32 = 2.0;
pub const SYMMETRY_HOLD_FALL_PER_SEC: f32 = 0.6;

// ---------------- Point inertia / wobble ----------------
pub const INERTIA_RATE_PER_SEC: f32 = 10.0;
pub const INERTIA_DRAG_SCALE: f32 = 0.85;
pub const TARGET_REACHED_PX: f32 = 0.5;
pub const WOBBLE_LIFE_SEC: f32 = 0.7;
pub const WOBBLE_DECAY_PER_SEC: f32 = 5.0;
pub const WOBBLE_FREQ_RAD_PER_SEC: f32 = 10.0;
pub const WOBBLE_IMPULSE_SCALE: f32 = 0.9;
pub const WOBBLE_MIN_AGE_SEC: f32 = 1.5;

// ---------------- Local balance field ----------------
pub const BALANCE_WINDOW: f32 = 0.08; // relative adjacent-edge deviation
pub const BALANCE_STRENGTH: f32 = 0.36;
pub const BALANCE_DRAG_BOOST_HIGH: f32 = 1.4;
pub const BALANCE_DRAG_BOOST_LOW: f32 = 1.2;
pub const RELEASE_AGE_SEC: f32 = 1.5;
pub const RELEASE_BOOST_SETTLED: f32 = 1.4;
pub const RELEASE_BOOST_FRESH: f32 = 1.12;
pub const RECENT_TOUCH_WINDOW_SEC: f32 = 1.2;
pub const WHISPER_MIN_SYMMETRY: f32 = 0.85;
pub const WHISPER_WINDOW: f32 = 0.04;
pub const WHISPER_INTERVAL_SEC: f64 = 0.32;

// ---------------- Breathing ----------------
pub const BREATH_IN_PER_SEC: f32 = 0.8;
pub const BREATH_OUT_PER_SEC: f32 = 0.5;
pub const BREATH_SCALE_SPAN: f32 = 0.075;
pub const BREATH_GESTURE_HOLD_SEC: f64 = 0.18;

// ---------------- Seeds ----------------
pub const SEED_DURATION_SEC: f32 = 2.6;
pub const SEED_PULL: f32 = 0.6;
pub const SEED_RADIUS_PX: f32 = 10.0;

// ---------------- Tracer ----------------
pub const STEP_MIN_FACTOR: f32 = 0.4;
pub const STEP_MAX_FACTOR: f32 = 2.0;
pub const SWEEP_TURN_GAIN: f32 = 0.04;
pub const SWEEP_BIAS_GAIN: f32 = 0.02;
pub const SWEEP_DECAY_PER_SEC: f32 = 1.2;
pub const SWEEP_STRENGTH_MAX: f32 = 2.0;
pub const SWEEP_SPEED_GAIN: f32 = 0.01;
pub const SWEEP_MIN_SPEED_PX: f32 = 18.0;
pub const PORTAL_FIELD_FACTOR: f32 = 2.2; // of portal radius
pub const PORTAL_PULL: f32 = 0.025;
pub const WRAP_PORTAL_RADIUS_PX: f32 = 8.0;
pub const CALM_SPEED_WEIGHT: f32 = 0.65;
pub const LOOP_SETTLE_SPEED_WEIGHT: f32 = 0.45;

// ---------------- Trail / loop detection ----------------
pub const TRAIL_CAP: usize = 900;
pub const LOOP_SCAN_SKIP_RECENT: usize = 240;
pub const LOOP_SCAN_STRIDE: usize = 30;
pub const LOOP_RADIUS_FACTOR: f32 = 0.6; // of base step
pub const LOOP_INTERVAL_SEC: f64 = 1.8;
pub const LOOP_SPARKLE_COUNT: usize = 6;
pub const BURST_RADIUS_FACTOR: f32 = 0.4;
pub const SPARKLE_RADIUS_FACTOR: f32 = 0.6;

// ---------------- Transient lifetimes (seconds) ----------------
pub const BURST_LIFE_SEC: f32 = 1.4;
pub const SPARKLE_LIFE_SEC: f32 = 0.7;
pub const WHISPER_LIFE_SEC: f32 = 1.2;
pub const WAVE_LIFE_SEC: f32 = 1.2;
pub const WRAP_LIFE_SEC: f32 = 1.2;
pub const PORTAL_LIFE_SEC: f32 = 1.1;
pub const PORTAL_INTERVAL_SEC: f64 = 6.0;
pub const PORTAL_HOLD_GATE_SEC: f32 = 1.2;
pub const PORTAL_JITTER_FACTOR: f32 = 0.6; // of base step
pub const PORTAL_RADIUS_FACTOR: f32 = 0.7;
pub const WAVE_RADIUS_FACTOR: f32 = 0.7;

// ---------------- Drag energy and derived moods ----------------
pub const DRAG_ENERGY_DECAY_PER_SEC: f32 = 0.8;
pub const DRAG_ENERGY_SPEED_NORM_PX: f32 = 40.0;
pub const CALM_RISE_PER_SEC: f32 = 1.0;
pub const CALM_FALL_PER_SEC: f32 = 2.0;
pub const CALM_ENERGY_FLOOR: f32 = 0.15;
pub const EXCITED_RISE_PER_SEC: f32 = 1.2;
pub const EXCITED_FALL_PER_SEC: f32 = 0.8;
pub const EXCITED_ENERGY_GATE: f32 = 0.6;
pub const WAVE_EDGE: f32 = 0.5; // excited falling through here fires a wave
pub const WAVE_ENERGY_CEIL: f32 = 0.4;
pub const WAVE_INTERVAL_SEC: f64 = 0.35;
pub const PHASE_BLOOM_DECAY_PER_SEC: f32 = 0.8;
pub const LOOP_SETTLE_DECAY_PER_SEC: f32 = 0.4;

// ---------------- Pointer thresholds ----------------
pub const PICK_RADIUS_PX: f32 = 18.0;
pub const EDGE_INSERT_MAX_PX: f32 = 40.0;
pub const MOVE_THRESHOLD_PX: f32 = 6.0;
pub const MOVE_THRESHOLD_TOUCH_PX: f32 = 2.5;
pub const HOLD_DELETE_TOUCH_SEC: f64 = 0.65;
pub const HOLD_DELETE_MOUSE_SEC: f64 = 0.9;
pub const DOUBLE_TAP_WINDOW_SEC: f64 = 0.32;
pub const DOUBLE_TAP_RADIUS_PX: f32 = 25.0;
pub const DRAG_MARGIN_PX: f32 = 24.0;
pub const ROTATE_GAIN: f32 = 0.002; // radians per dragged px
pub const ROTATE_TAP_EPS_PX: f32 = 6.0;

// ---------------- Pulse mapping ----------------
pub const PULSE_INTERVAL_SEC: f64 = 0.52;
pub const PULSE_BASE_HZ: f32 = 150.0;
pub const PULSE_ANGLE_SPAN_HZ: f32 = 180.0;
pub const PULSE_CUTOFF_BASE_HZ: f32 = 900.0;
pub const PULSE_CUTOFF_ENERGY_SPAN_HZ: f32 = 1200.0;
pub const PULSE_FILTER_Q: f32 = 0.8;
pub const PULSE_GAIN_BASE: f32 = 0.06;
pub const PULSE_GAIN_ENERGY_SPAN: f32 = 0.05;
pub const PULSE_ATTACK_SEC: f64 = 0.08;
pub const PULSE_RELEASE_SEC: f64 = 3.0;
pub const PULSE_DETUNE_SPREAD_CENTS: f32 = 12.0;
