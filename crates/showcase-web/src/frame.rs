use showcase_core::{Clock, SystemClock, Viewer};
use showcase_render::GpuState;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub canvas: web::HtmlCanvasElement,
    pub viewer: Rc<RefCell<Viewer>>,
    pub gpu: Rc<RefCell<GpuState<'static>>>,
    pub clock: Rc<SystemClock>,
}

impl FrameContext {
    /// Advances the viewer one tick and presents it.
    pub fn frame(&mut self) {
        let size = (self.canvas.width(), self.canvas.height());
        let mut gpu = self.gpu.borrow_mut();
        if size != gpu.size() {
            gpu.resize_if_needed(size.0, size.1);
            self.viewer.borrow_mut().resize(size.0, size.1);
        }

        let snapshot = self.viewer.borrow_mut().frame(self.clock.now());
        match gpu.render(&snapshot) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => gpu.reconfigure(),
            Err(wgpu::SurfaceError::Timeout) => log::warn!("[frame] surface timeout"),
            Err(e) => log::error!("[frame] render error: {:?}", e),
        }
    }
}

/// Drives `ctx` from `requestAnimationFrame` for the lifetime of the page.
pub fn start_loop(mut ctx: FrameContext) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        ctx.frame();
        if let (Some(w), Some(cb)) = (web::window(), tick_clone.borrow().as_ref()) {
            let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut()>));
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
