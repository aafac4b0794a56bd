use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

use tour_core::TourSession;

/// Whether a key event corresponds to the forward-movement key.
#[inline]
pub fn is_movement_key(key: &str) -> bool {
    matches!(key, "w" | "W")
}

/// Wire window keydown/keyup so holding the movement key sets the
/// session's continuous forward-walk flag. Independent of the navigator;
/// the per-frame loop applies the actual translation.
pub fn wire_movement_keys(session: Rc<RefCell<TourSession>>) {
    let Some(window) = web::window() else {
        return;
    };

    let session_down = session.clone();
    let down = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
        if is_movement_key(&ev.key()) {
            session_down.borrow_mut().set_moving_forward(true);
        }
    }) as Box<dyn FnMut(_)>);
    let _ = window.add_event_listener_with_callback("keydown", down.as_ref().unchecked_ref());
    down.forget();

    let up = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
        if is_movement_key(&ev.key()) {
            session.borrow_mut().set_moving_forward(false);
        }
    }) as Box<dyn FnMut(_)>);
    let _ = window.add_event_listener_with_callback("keyup", up.as_ref().unchecked_ref());
    up.forget();
}
