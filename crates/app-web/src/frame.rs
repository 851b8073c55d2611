//! The host frame loop: tick the active world, feed its pulses to the sound
//! bank, paint, step the world switcher and keep the HUD current.

use crate::audio::SoundBank;
use crate::dom::{self, Hud};
use crate::render;
use crate::storage;
use app_core::{signal_label, EngineState, PulseEvent, SwitchPhase, Switcher, World};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Worlds the `.domain-card` buttons can switch to.
pub const WORLD_IDS: &[&str] = &["geometry"];

/// Minimum pause between gallery saves of freshly detected shapes.
const GALLERY_SAVE_INTERVAL_SEC: f64 = 2.0;

pub struct FrameContext {
    pub engine: Rc<RefCell<EngineState>>,
    pub sound: Rc<RefCell<SoundBank>>,
    pub switcher: Switcher,
    pub pending_world: Option<&'static str>,

    pub canvas: web::HtmlCanvasElement,
    pub ctx: web::CanvasRenderingContext2d,
    pub hud: Hud,
    pub document: web::Document,

    pub started: Instant,
    pub last: f64,
    pub width: f32,
    pub height: f32,

    pub pulses: Vec<PulseEvent>,
    pub saved_signal: Option<u32>,
    pub last_save: f64,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let now = self.started.elapsed().as_secs_f64();
        let delta = ((now - self.last) as f32).min(0.033);
        self.last = now;

        self.pulses.clear();
        self.engine.borrow_mut().update(now, &mut self.pulses);
        {
            let sound = self.sound.borrow();
            for pulse in &self.pulses {
                sound.play(pulse);
            }
        }

        if self.switcher.step(delta) == SwitchPhase::SwapNow {
            self.swap_world();
        }

        let hud_info = {
            let engine = self.engine.borrow();
            render::draw(&self.ctx, &engine, now);
            engine.hud()
        };
        render::draw_transition(
            &self.ctx,
            self.width,
            self.height,
            self.switcher.t,
            self.switcher.overlay,
        );

        // A freshly detected shape lands in the gallery, rate limited so a
        // wavering detector does not spam storage.
        if hud_info.signal != self.saved_signal {
            if hud_info.signal.is_some() && now - self.last_save > GALLERY_SAVE_INTERVAL_SEC {
                let engine = self.engine.borrow();
                storage::save_gallery_snapshot(engine.id(), &engine.snapshot());
                self.last_save = now;
            }
            self.saved_signal = hud_info.signal;
        }

        self.hud
            .set(hud_info.world, hud_info.points, &signal_label(hud_info.signal));
    }

    /// Begin the crossfade toward `id`. Unknown ids and the already-active
    /// world are ignored.
    pub fn switch_world(&mut self, id: &str) {
        let Some(next) = WORLD_IDS.iter().find(|w| **w == id) else {
            return;
        };
        if self.engine.borrow().id() == *next {
            return;
        }
        self.pending_world = Some(next);
        self.switcher.begin();
    }

    /// Halfway through the crossfade: archive the outgoing world and bring
    /// the next one in at the current viewport.
    fn swap_world(&mut self) {
        if self.pending_world.take().is_none() {
            return;
        }
        let (width, height) = (self.width, self.height);
        {
            let mut engine = self.engine.borrow_mut();
            storage::save_gallery_snapshot(engine.id(), &engine.snapshot());
            engine.on_exit();
            engine.on_enter();
            engine.on_resize(width, height, 1.0);
        }
        dom::set_active_card(&self.document, self.engine.borrow().id());
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        if let Some(w) = web::window() {
            if let Some(cb) = tick_clone.borrow().as_ref() {
                let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
            }
        }
    }) as Box<dyn FnMut()>));
    if let Some(w) = web::window() {
        if let Some(cb) = tick.borrow().as_ref() {
            let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }
}
