//! DOM lookups, canvas sizing and the HUD sink.

use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

pub fn stage_canvas(document: &web::Document) -> anyhow::Result<web::HtmlCanvasElement> {
    document
        .get_element_by_id("stage")
        .ok_or_else(|| anyhow::anyhow!("missing #stage"))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))
}

pub fn context_2d(
    canvas: &web::HtmlCanvasElement,
) -> anyhow::Result<web::CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?
        .ok_or_else(|| anyhow::anyhow!("no 2d context"))?
        .dyn_into::<web::CanvasRenderingContext2d>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))
}

/// Viewport size in CSS pixels plus the device pixel ratio.
pub fn viewport() -> (f32, f32, f32) {
    let Some(window) = web::window() else {
        return (0.0, 0.0, 1.0);
    };
    let width = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0) as f32;
    let height = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0) as f32;
    let ratio = window.device_pixel_ratio() as f32;
    (width, height, ratio)
}

/// Match the canvas backing store to the viewport and scale the 2d context so
/// everything downstream works in CSS pixels.
pub fn sync_canvas_backing_size(
    canvas: &web::HtmlCanvasElement,
    ctx: &web::CanvasRenderingContext2d,
) -> (f32, f32, f32) {
    let (width, height, ratio) = viewport();
    canvas.set_width(((width * ratio) as u32).max(1));
    canvas.set_height(((height * ratio) as u32).max(1));
    let style = canvas.style();
    let _ = style.set_property("width", &format!("{width}px"));
    let _ = style.set_property("height", &format!("{height}px"));
    let _ = ctx.set_transform(ratio as f64, 0.0, 0.0, ratio as f64, 0.0, 0.0);
    (width, height, ratio)
}

/// The three HUD labels the shell writes every frame.
pub struct Hud {
    mode: Option<web::Element>,
    points: Option<web::Element>,
    signal: Option<web::Element>,
}

impl Hud {
    pub fn new(document: &web::Document) -> Self {
        Self {
            mode: document.get_element_by_id("modeLabel"),
            points: document.get_element_by_id("pointsLabel"),
            signal: document.get_element_by_id("signalLabel"),
        }
    }

    pub fn set(&self, world: &str, points: usize, signal: &str) {
        if let Some(el) = &self.mode {
            el.set_text_content(Some(world));
        }
        if let Some(el) = &self.points {
            el.set_text_content(Some(&points.to_string()));
        }
        if let Some(el) = &self.signal {
            el.set_text_content(Some(signal));
        }
    }
}

/// Highlight the `.domain-card` matching the active world id.
pub fn set_active_card(document: &web::Document, id: &str) {
    let Ok(cards) = document.query_selector_all(".domain-card") else {
        return;
    };
    for i in 0..cards.length() {
        let Some(card) = cards.item(i).and_then(|n| n.dyn_into::<web::Element>().ok()) else {
            continue;
        };
        let is_active = card.get_attribute("data-domain").as_deref() == Some(id);
        let _ = card.class_list().toggle_with_force("is-active", is_active);
    }
}
