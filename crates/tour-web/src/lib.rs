#![cfg(target_arch = "wasm32")]
//! WASM entry point: wires the DOM, input events, asset loading, and the
//! render loop around a [`tour_core::TourSession`].

use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

use instant::Instant;
use tour_core::{TourSession, ViewpointCatalog};

mod constants;
mod dom;
mod events;
mod frame;
mod loader;
mod overlay;
mod render;

use constants::{CANVAS_ID, CLOSE_POPUP_ID, MODEL_URL};

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

fn wire_overlay(document: &web::Document) {
    overlay::show_popup(document);
    let doc = document.clone();
    dom::add_click_listener(document, CLOSE_POPUP_ID, move || {
        overlay::hide_popup(&doc);
    });
    overlay::create_home_button(document);
}

/// Kick off the museum model download; on completion upload it to the GPU,
/// reveal the main content, and generate the initial markers.
fn spawn_model_load(
    session: Rc<RefCell<TourSession>>,
    frame_ctx: Rc<RefCell<frame::FrameContext>>,
) {
    spawn_local(async move {
        let progress_doc = dom::window_document();
        let bytes = match loader::fetch_bytes(MODEL_URL, move |fraction| {
            if let Some(doc) = &progress_doc {
                dom::set_loading_progress(doc, fraction);
            }
        })
        .await
        {
            Ok(b) => b,
            Err(e) => {
                log::error!("[loader] fetch error: {:?}", e);
                return;
            }
        };
        let model = match loader::parse_model(&bytes) {
            Ok(m) => m,
            Err(e) => {
                log::error!("[loader] parse error: {:?}", e);
                return;
            }
        };
        if let Some(g) = frame_ctx.borrow_mut().gpu.as_mut() {
            g.upload_model(&model);
        }
        if let Some(doc) = dom::window_document() {
            dom::finish_loading(&doc);
        }
        session.borrow_mut().regenerate_markers();
        log::info!("[loader] model ready, initial markers generated");
    });
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("tour-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas_el = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", CANVAS_ID))?;
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    wire_canvas_resize(&canvas);
    wire_overlay(&document);

    let session = Rc::new(RefCell::new(TourSession::new(ViewpointCatalog::museum())));

    events::wire_click_handler(session.clone(), canvas.clone());
    events::wire_movement_keys(session.clone());

    let gpu = frame::init_gpu(&canvas).await;

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        session: session.clone(),
        canvas,
        gpu,
        last_instant: Instant::now(),
        blink: None,
    }));
    frame_ctx.borrow_mut().blink = frame::start_blink(session.clone());

    spawn_model_load(session, frame_ctx.clone());
    frame::start_loop(frame_ctx);

    Ok(())
}
