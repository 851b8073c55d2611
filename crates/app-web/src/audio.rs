//! WebAudio pulse synthesis.
//!
//! The audio graph is built lazily on the first pointer gesture so the
//! context starts in a running state. Until then every pulse is silently
//! dropped; the engine keeps emitting them regardless.

use app_core::PulseEvent;
use web_sys as web;

const MASTER_VOLUME_SCALE: f32 = 0.1;
const PULSE_FLOOR_GAIN: f32 = 0.0001;
const PULSE_STOP_PAD_SEC: f64 = 0.2;

pub struct SoundBank {
    ctx: Option<web::AudioContext>,
    master: Option<web::GainNode>,
    /// Slider value in [0, 1], remembered for when the graph comes up.
    volume: f32,
}

impl SoundBank {
    pub fn new(volume: f32) -> Self {
        Self {
            ctx: None,
            master: None,
            volume,
        }
    }

    /// Build the context and master gain if they do not exist yet. Safe to
    /// call on every gesture.
    pub fn ensure(&mut self) {
        if self.ctx.is_some() {
            return;
        }
        let ctx = match web::AudioContext::new() {
            Ok(ctx) => ctx,
            Err(e) => {
                log::error!("[audio] AudioContext error: {:?}", e);
                return;
            }
        };
        let master = match ctx.create_gain() {
            Ok(g) => g,
            Err(e) => {
                log::error!("[audio] master GainNode error: {:?}", e);
                return;
            }
        };
        master.gain().set_value(self.volume * MASTER_VOLUME_SCALE);
        if let Err(e) = master.connect_with_audio_node(&ctx.destination()) {
            log::error!("[audio] connect error: {:?}", e);
            return;
        }
        log::info!("[audio] context started");
        self.ctx = Some(ctx);
        self.master = Some(master);
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
        if let Some(master) = &self.master {
            master.gain().set_value(volume * MASTER_VOLUME_SCALE);
        }
    }

    /// Fire-and-forget playback of one pulse: sine partials through a shared
    /// lowpass into an attack/release envelope. No-op before `ensure`.
    pub fn play(&self, pulse: &PulseEvent) {
        let (Some(ctx), Some(master)) = (&self.ctx, &self.master) else {
            return;
        };
        let t0 = ctx.current_time();

        let Ok(filter) = ctx.create_biquad_filter() else {
            return;
        };
        filter.set_type(web::BiquadFilterType::Lowpass);
        filter.frequency().set_value(pulse.cutoff_hz);
        filter.q().set_value(pulse.filter_q);

        let Ok(gain) = ctx.create_gain() else {
            return;
        };
        let envelope = gain.gain();
        let _ = envelope.set_value_at_time(PULSE_FLOOR_GAIN, t0);
        let _ = envelope
            .exponential_ramp_to_value_at_time(pulse.peak_gain, t0 + pulse.attack_sec);
        let _ = envelope
            .exponential_ramp_to_value_at_time(PULSE_FLOOR_GAIN, t0 + pulse.release_sec);

        for partial in &pulse.partials {
            let Ok(osc) = ctx.create_oscillator() else {
                continue;
            };
            osc.set_type(web::OscillatorType::Sine);
            osc.frequency().set_value(pulse.base_hz * partial.ratio);
            osc.detune().set_value(partial.detune_cents);
            let _ = osc.connect_with_audio_node(&filter);
            let _ = osc.start();
            let _ = osc.stop_with_when(t0 + pulse.release_sec + PULSE_STOP_PAD_SEC);
        }

        let _ = filter.connect_with_audio_node(&gain);
        let _ = gain.connect_with_audio_node(master);
    }
}
