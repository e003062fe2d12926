//! Debug panel: one labelled input per bound parameter. Starts hidden.

use crate::dom;
use crate::input;
use crate::overlay;
use showcase_core::{ParamKey, ParamKind, ParamValue, Viewer};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub const PANEL_ID: &str = "debug-panel";

fn js_err(e: wasm_bindgen::JsValue) -> anyhow::Error {
    anyhow::anyhow!(format!("{:?}", e))
}

pub fn build(document: &web::Document, viewer: Rc<RefCell<Viewer>>) -> anyhow::Result<()> {
    let body = document
        .body()
        .ok_or_else(|| anyhow::anyhow!("no body"))?;
    let panel = document.create_element("div").map_err(js_err)?;
    panel.set_id(PANEL_ID);
    panel.set_class_name("debug-panel");
    panel
        .set_attribute("style", "display:none")
        .map_err(js_err)?;

    let keys = viewer.borrow().scene().bound_keys();
    for key in keys {
        let row = control_row(document, key, viewer.clone())?;
        panel.append_child(&row).map_err(js_err)?;
    }
    body.append_child(&panel).map_err(js_err)?;

    let background = viewer.borrow().params().fog_color.clone();
    dom::set_body_background(document, &background);
    Ok(())
}

fn control_row(
    document: &web::Document,
    key: ParamKey,
    viewer: Rc<RefCell<Viewer>>,
) -> anyhow::Result<web::Element> {
    let spec = key.spec();
    let row = document.create_element("label").map_err(js_err)?;
    row.set_class_name("debug-row");
    let caption = document.create_element("span").map_err(js_err)?;
    caption.set_text_content(Some(spec.label));
    row.append_child(&caption).map_err(js_err)?;

    let control: web::HtmlInputElement = document
        .create_element("input")
        .map_err(js_err)?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    control.set_id(key.id());
    match spec.kind {
        ParamKind::Number { min, max, step } => {
            control.set_type("range");
            control.set_min(&min.to_string());
            control.set_max(&max.to_string());
            control.set_step(&step.to_string());
        }
        ParamKind::Color => control.set_type("color"),
    }
    control.set_value(&input::param_input_value(&viewer.borrow().params().get(key)));

    let doc = document.clone();
    let source = control.clone();
    let closure = Closure::wrap(Box::new(move || {
        let Some(value) = input::param_value_from_input(spec.kind, &source.value()) else {
            log::warn!("[panel] ignoring {:?} = {:?}", key, source.value());
            return;
        };
        let background = match (key, &value) {
            (ParamKey::FogColor, ParamValue::Color(hex)) => Some(hex.clone()),
            _ => None,
        };
        match viewer.borrow_mut().set_param(key, value) {
            Ok(()) => {
                if let Some(hex) = background {
                    dom::set_body_background(&doc, &hex);
                }
            }
            Err(e) => log::warn!("[panel] {e}"),
        }
    }) as Box<dyn FnMut()>);
    control
        .add_event_listener_with_callback("input", closure.as_ref().unchecked_ref())
        .map_err(js_err)?;
    closure.forget();

    row.append_child(&control).map_err(js_err)?;
    Ok(row)
}

#[inline]
pub fn toggle(document: &web::Document) {
    overlay::toggle(document, PANEL_ID);
}
