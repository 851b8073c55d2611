//! DOM event wiring: pointer forwarding into the world protocol, the volume
//! slider, the world cards and window resize.

use crate::dom;
use crate::frame::FrameContext;
use app_core::{PointerKind, PointerMods, PointerPhase, World};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

fn pointer_mods(ev: &web::PointerEvent) -> PointerMods {
    let kind = match ev.pointer_type().as_str() {
        "touch" => PointerKind::Touch,
        "pen" => PointerKind::Pen,
        _ => PointerKind::Mouse,
    };
    PointerMods {
        kind,
        alt: ev.alt_key(),
        shift: ev.shift_key(),
        button: ev.button(),
    }
}

fn mouse_mods(ev: &web::MouseEvent) -> PointerMods {
    PointerMods {
        kind: PointerKind::Mouse,
        alt: ev.alt_key(),
        shift: ev.shift_key(),
        button: ev.button(),
    }
}

fn forward(frame: &Rc<RefCell<FrameContext>>, phase: PointerPhase, x: f32, y: f32, mods: &PointerMods) {
    frame
        .borrow()
        .engine
        .borrow_mut()
        .on_pointer(phase, x, y, mods);
}

pub fn install(frame_ctx: &Rc<RefCell<FrameContext>>) {
    let (document, canvas) = {
        let f = frame_ctx.borrow();
        (f.document.clone(), f.canvas.clone())
    };

    {
        let frame = frame_ctx.clone();
        let capture = canvas.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            if ev.pointer_type() == "touch" {
                ev.prevent_default();
            }
            let _ = capture.set_pointer_capture(ev.pointer_id());
            // First gesture is the only chance to start WebAudio.
            frame.borrow().sound.borrow_mut().ensure();
            let mods = pointer_mods(&ev);
            forward(
                &frame,
                PointerPhase::Down,
                ev.client_x() as f32,
                ev.client_y() as f32,
                &mods,
            );
        }) as Box<dyn FnMut(_)>);
        canvas
            .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref())
            .ok();
        closure.forget();
    }

    {
        let frame = frame_ctx.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            if ev.pointer_type() == "touch" {
                ev.prevent_default();
            }
            let mods = pointer_mods(&ev);
            forward(
                &frame,
                PointerPhase::Move,
                ev.client_x() as f32,
                ev.client_y() as f32,
                &mods,
            );
        }) as Box<dyn FnMut(_)>);
        canvas
            .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref())
            .ok();
        closure.forget();
    }

    {
        let frame = frame_ctx.clone();
        let capture = canvas.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            if ev.pointer_type() == "touch" {
                ev.prevent_default();
            }
            let _ = capture.release_pointer_capture(ev.pointer_id());
            let mods = pointer_mods(&ev);
            forward(
                &frame,
                PointerPhase::Up,
                ev.client_x() as f32,
                ev.client_y() as f32,
                &mods,
            );
        }) as Box<dyn FnMut(_)>);
        canvas
            .add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref())
            .ok();
        closure.forget();
    }

    {
        let frame = frame_ctx.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::MouseEvent| {
            let mods = mouse_mods(&ev);
            forward(
                &frame,
                PointerPhase::DoubleClick,
                ev.client_x() as f32,
                ev.client_y() as f32,
                &mods,
            );
        }) as Box<dyn FnMut(_)>);
        canvas
            .add_event_listener_with_callback("dblclick", closure.as_ref().unchecked_ref())
            .ok();
        closure.forget();
    }

    {
        let frame = frame_ctx.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::MouseEvent| {
            ev.prevent_default();
            let mods = mouse_mods(&ev);
            forward(
                &frame,
                PointerPhase::ContextDelete,
                ev.client_x() as f32,
                ev.client_y() as f32,
                &mods,
            );
        }) as Box<dyn FnMut(_)>);
        canvas
            .add_event_listener_with_callback("contextmenu", closure.as_ref().unchecked_ref())
            .ok();
        closure.forget();
    }

    if let Some(input) = document
        .get_element_by_id("volumeControl")
        .and_then(|el| el.dyn_into::<web::HtmlInputElement>().ok())
    {
        let frame = frame_ctx.clone();
        let slider = input.clone();
        let closure = Closure::wrap(Box::new(move || {
            if let Ok(volume) = slider.value().parse::<f32>() {
                frame.borrow().sound.borrow_mut().set_volume(volume);
            }
        }) as Box<dyn FnMut()>);
        input
            .add_event_listener_with_callback("input", closure.as_ref().unchecked_ref())
            .ok();
        closure.forget();
    }

    if let Ok(cards) = document.query_selector_all(".domain-card") {
        for i in 0..cards.length() {
            let Some(card) = cards.item(i).and_then(|n| n.dyn_into::<web::Element>().ok())
            else {
                continue;
            };
            let Some(id) = card.get_attribute("data-domain") else {
                continue;
            };
            let frame = frame_ctx.clone();
            let closure = Closure::wrap(Box::new(move || {
                frame.borrow_mut().switch_world(&id);
            }) as Box<dyn FnMut()>);
            card.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
                .ok();
            closure.forget();
        }
    }

    {
        let frame = frame_ctx.clone();
        let closure = Closure::wrap(Box::new(move || {
            let mut f = frame.borrow_mut();
            let (width, height, ratio) = dom::sync_canvas_backing_size(&f.canvas, &f.ctx);
            f.width = width;
            f.height = height;
            f.engine.borrow_mut().on_resize(width, height, ratio);
        }) as Box<dyn FnMut()>);
        if let Some(window) = web::window() {
            window
                .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())
                .ok();
        }
        closure.forget();
    }
}
