//! localStorage snapshot gallery.
//!
//! Each world keeps its own newest-first list of saved point sets under
//! `origamo:gallery:<id>`. Storage can be unavailable or full; every failure
//! here is silently ignored.

use app_core::WorldSnapshot;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

const GALLERY_CAP: u32 = 12;

fn local_storage() -> Option<web::Storage> {
    web::window()?.local_storage().ok().flatten()
}

pub fn save_gallery_snapshot(world_id: &str, snap: &WorldSnapshot) {
    let Some(storage) = local_storage() else {
        return;
    };
    let key = format!("origamo:gallery:{world_id}");
    let list = storage
        .get_item(&key)
        .ok()
        .flatten()
        .and_then(|raw| js_sys::JSON::parse(&raw).ok())
        .and_then(|v| v.dyn_into::<js_sys::Array>().ok())
        .unwrap_or_else(js_sys::Array::new);

    let entry = js_sys::Object::new();
    let _ = js_sys::Reflect::set(&entry, &"t".into(), &js_sys::Date::now().into());
    let points = js_sys::Array::new();
    for p in &snap.points {
        let pair = js_sys::Array::of2(
            &JsValue::from_f64(p[0] as f64),
            &JsValue::from_f64(p[1] as f64),
        );
        points.push(&pair);
    }
    let _ = js_sys::Reflect::set(&entry, &"points".into(), &points);
    let detected = match snap.detected {
        Some(sides) => JsValue::from_f64(sides as f64),
        None => JsValue::NULL,
    };
    let _ = js_sys::Reflect::set(&entry, &"detected".into(), &detected);

    list.unshift(&entry);
    while list.length() > GALLERY_CAP {
        list.pop();
    }
    if let Ok(raw) = js_sys::JSON::stringify(&list) {
        if let Some(raw) = raw.as_string() {
            let _ = storage.set_item(&key, &raw);
        }
    }
}
