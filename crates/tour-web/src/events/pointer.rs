use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

use glam::Vec2;
use tour_core::TourSession;

/// Convert a mouse event to canvas backing-store pixel coordinates.
#[inline]
pub fn click_canvas_px(ev: &web::MouseEvent, canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    let x_css = ev.client_x() as f32 - rect.left() as f32;
    let y_css = ev.client_y() as f32 - rect.top() as f32;
    let sx = (x_css / rect.width().max(1.0) as f32) * canvas.width() as f32;
    let sy = (y_css / rect.height().max(1.0) as f32) * canvas.height() as f32;
    Vec2::new(sx, sy)
}

/// Wire the window click handler: resolve the click to a marker via the
/// session's ray pick and start navigation. Clicks during a transition are
/// dropped inside the session.
pub fn wire_click_handler(session: Rc<RefCell<TourSession>>, canvas: web::HtmlCanvasElement) {
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::MouseEvent| {
        let pos = click_canvas_px(&ev, &canvas);
        let width = canvas.width() as f32;
        let height = canvas.height() as f32;
        session
            .borrow_mut()
            .handle_click(pos.x, pos.y, width, height);
    }) as Box<dyn FnMut(_)>);
    if let Some(wnd) = web::window() {
        let _ = wnd.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}
