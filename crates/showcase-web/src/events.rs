use crate::audio::Narration;
use crate::dom;
use crate::input;
use crate::panel;
use showcase_core::{Clock, ControlEvent, ControlResponse, SystemClock, Viewer};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Everything canvas input handlers need to reach.
#[derive(Clone)]
pub struct InputContext {
    pub canvas: web::HtmlCanvasElement,
    pub viewer: Rc<RefCell<Viewer>>,
    pub clock: Rc<SystemClock>,
    pub narration: Rc<RefCell<Option<Narration>>>,
}

impl InputContext {
    fn respond(&self, response: ControlResponse) {
        if !response.play_narration {
            return;
        }
        match self.narration.borrow().as_ref() {
            Some(narration) => narration.play(),
            None => log::warn!("[audio] narration requested before it loaded"),
        }
    }
}

fn add_pointer_listener(
    canvas: &web::HtmlCanvasElement,
    event: &str,
    handler: impl FnMut(web::PointerEvent) + 'static,
) {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::PointerEvent)>);
    let _ = canvas.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    closure.forget();
}

pub fn wire_pointer_controls(ctx: &InputContext) {
    {
        let ctx = ctx.clone();
        add_pointer_listener(&ctx.canvas.clone(), "pointerdown", move |ev| {
            let _ = ctx.canvas.set_pointer_capture(ev.pointer_id());
            let now = ctx.clock.now();
            let response = ctx.viewer.borrow_mut().pointer_down(
                ev.offset_x() as f32,
                ev.offset_y() as f32,
                now,
            );
            dom::set_cursor(&ctx.canvas, input::cursor_for(ControlEvent::Start));
            ctx.respond(response);
        });
    }
    {
        let ctx = ctx.clone();
        add_pointer_listener(&ctx.canvas.clone(), "pointermove", move |ev| {
            let height = ctx.canvas.client_height() as f32;
            ctx.viewer.borrow_mut().pointer_move(
                ev.offset_x() as f32,
                ev.offset_y() as f32,
                height,
            );
        });
    }
    for name in ["pointerup", "pointercancel"] {
        let ctx = ctx.clone();
        add_pointer_listener(&ctx.canvas.clone(), name, move |ev| {
            let _ = ctx.canvas.release_pointer_capture(ev.pointer_id());
            let now = ctx.clock.now();
            ctx.viewer.borrow_mut().pointer_up(now);
            dom::set_cursor(&ctx.canvas, input::cursor_for(ControlEvent::End));
        });
    }
    {
        let ctx = ctx.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::WheelEvent| {
            let now = ctx.clock.now();
            let response = ctx.viewer.borrow_mut().wheel(ev.delta_y() as f32, now);
            ctx.respond(response);
        }) as Box<dyn FnMut(web::WheelEvent)>);
        let _ = ctx
            .canvas
            .add_event_listener_with_callback("wheel", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

/// `h` shows or hides the debug panel.
pub fn wire_panel_toggle_h(window: &web::Window, document: &web::Document) {
    let doc = document.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
        if ev.repeat() || !input::is_panel_toggle_key(&ev.key()) {
            return;
        }
        panel::toggle(&doc);
    }) as Box<dyn FnMut(web::KeyboardEvent)>);
    let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
    closure.forget();
}

/// Keeps the canvas backing store in step with its CSS box. The frame loop
/// picks up the new size.
pub fn wire_resize(window: &web::Window, canvas: &web::HtmlCanvasElement) {
    let canvas = canvas.clone();
    let closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas);
    }) as Box<dyn FnMut()>);
    let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
    closure.forget();
}
