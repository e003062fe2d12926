use crate::dom;
use crate::input;
use showcase_core::LoadProgress;
use web_sys as web;

pub const PROGRESS_BAR_ID: &str = "progress-bar";
pub const LOAD_ERROR_ID: &str = "load-error";
pub const INFO_ID: &str = "info";
pub const INFO_TOGGLE_ID: &str = "info-toggle";

#[inline]
pub fn show(document: &web::Document, id: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        let _ = el.set_attribute("style", "");
    }
}

#[inline]
pub fn hide(document: &web::Document, id: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        let _ = el.set_attribute("style", "display:none");
    }
}

#[inline]
pub fn is_hidden(document: &web::Document, id: &str) -> bool {
    document
        .get_element_by_id(id)
        .and_then(|el| el.get_attribute("style"))
        .map(|s| s.contains("display:none"))
        .unwrap_or(false)
}

#[inline]
pub fn toggle(document: &web::Document, id: &str) {
    if is_hidden(document, id) {
        show(document, id);
    } else {
        hide(document, id);
    }
}

pub fn set_progress(document: &web::Document, progress: LoadProgress) {
    if let Some(bar) = document.get_element_by_id(PROGRESS_BAR_ID) {
        dom::set_style_property(&bar, "--progress", &input::progress_css(progress));
    }
}

/// Settles the loading UI: hides the bar when everything arrived, otherwise
/// lists what failed.
pub fn finish_loading(document: &web::Document, failures: &[String]) {
    if failures.is_empty() {
        hide(document, PROGRESS_BAR_ID);
    } else {
        show_error(
            document,
            &format!("Some assets failed to load:\n{}", failures.join("\n")),
        );
    }
}

pub fn show_error(document: &web::Document, message: &str) {
    hide(document, PROGRESS_BAR_ID);
    if let Some(el) = document.get_element_by_id(LOAD_ERROR_ID) {
        el.set_text_content(Some(message));
        let _ = el.set_attribute("style", "");
    }
}

pub fn wire_info_toggle(document: &web::Document) {
    let doc = document.clone();
    dom::add_click_listener(document, INFO_TOGGLE_ID, move || {
        toggle(&doc, INFO_ID);
    });
}
