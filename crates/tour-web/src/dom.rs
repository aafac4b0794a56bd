use wasm_bindgen::JsCast;
use web_sys as web;

use crate::constants::{
    LOADING_PERCENTAGE_ID, LOADING_SCREEN_SELECTOR, MAIN_CONTENT_SELECTOR, PROGRESS_BAR_FILL_ID,
};

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
        let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

/// Reflect a load fraction in [0, 1] into the progress bar.
pub fn set_loading_progress(document: &web::Document, fraction: f32) {
    let percent = (fraction.clamp(0.0, 1.0) * 100.0).round() as u32;
    if let Some(el) = document.get_element_by_id(LOADING_PERCENTAGE_ID) {
        el.set_text_content(Some(&percent.to_string()));
    }
    if let Some(el) = document.get_element_by_id(PROGRESS_BAR_FILL_ID) {
        let _ = el.set_attribute("style", &format!("width:{}%", percent));
    }
}

/// Fade the loading screen out and the main content in.
pub fn finish_loading(document: &web::Document) {
    if let Ok(Some(el)) = document.query_selector(LOADING_SCREEN_SELECTOR) {
        let _ = el.class_list().add_1("fade-out");
    }
    if let Ok(Some(el)) = document.query_selector(MAIN_CONTENT_SELECTOR) {
        let _ = el.class_list().add_1("fade-in");
    }
}
