use web_sys as web;

use crate::constants::{HOME_BUTTON_ID, HOME_URL, INSTRUCTION_POPUP_ID};

#[inline]
pub fn show_popup(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(INSTRUCTION_POPUP_ID) {
        let _ = el.set_attribute("style", "display:flex");
    }
}

#[inline]
pub fn hide_popup(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(INSTRUCTION_POPUP_ID) {
        let _ = el.set_attribute("style", "display:none");
    }
}

/// Create the floating home button and wire it back to the archive site.
pub fn create_home_button(document: &web::Document) {
    if document.get_element_by_id(HOME_BUTTON_ID).is_some() {
        return;
    }
    let Ok(button) = document.create_element("div") else {
        return;
    };
    button.set_id(HOME_BUTTON_ID);
    button.set_inner_html("Home");
    let _ = button.set_attribute("title", "Return to homepage");
    if let Some(body) = document.body() {
        let _ = body.append_child(&button);
    }
    crate::dom::add_click_listener(document, HOME_BUTTON_ID, move || {
        if let Some(w) = web::window() {
            let _ = w.location().set_href(HOME_URL);
        }
    });
}
