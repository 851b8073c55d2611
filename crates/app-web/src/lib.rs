#![cfg(target_arch = "wasm32")]
//! Browser host for the polygon sketch: canvas2d rendering, WebAudio pulse
//! playback, DOM wiring and the world switcher shell around `app-core`.

mod audio;
mod dom;
mod events;
mod frame;
mod render;
mod storage;

use app_core::{EngineState, Switcher, World};
use audio::SoundBank;
use frame::FrameContext;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("app-web starting");

    if let Err(e) = init() {
        log::error!("init error: {:?}", e);
    }
    Ok(())
}

fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas = dom::stage_canvas(&document)?;
    let ctx = dom::context_2d(&canvas)?;
    let (width, height, ratio) = dom::sync_canvas_backing_size(&canvas, &ctx);
    let hud = dom::Hud::new(&document);

    let volume = document
        .get_element_by_id("volumeControl")
        .and_then(|el| el.dyn_into::<web::HtmlInputElement>().ok())
        .and_then(|input| input.value().parse::<f32>().ok())
        .unwrap_or(0.5);
    let sound = Rc::new(RefCell::new(SoundBank::new(volume)));

    let mut engine = EngineState::new(js_sys::Date::now() as u64);
    engine.on_resize(width, height, ratio);
    engine.on_enter();
    let engine = Rc::new(RefCell::new(engine));
    dom::set_active_card(&document, engine.borrow().id());

    let frame_ctx = Rc::new(RefCell::new(FrameContext {
        engine,
        sound,
        switcher: Switcher::default(),
        pending_world: None,
        canvas,
        ctx,
        hud,
        document,
        started: Instant::now(),
        last: 0.0,
        width,
        height,
        pulses: Vec::new(),
        saved_signal: None,
        last_save: f64::NEG_INFINITY,
    }));

    events::install(&frame_ctx);
    frame::start_loop(frame_ctx);
    Ok(())
}
