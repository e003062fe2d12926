#![cfg(target_arch = "wasm32")]
mod audio;
mod dom;
mod events;
mod frame;
mod input;
mod loader;
mod overlay;
mod panel;

use audio::Narration;
use showcase_core::{AssetKey, AssetRequest, Clock, LoadOutcome, SystemClock, Viewer};
use showcase_render::GpuState;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("showcase-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
            if let Some(document) = dom::window_document() {
                overlay::show_error(&document, &format!("{e}"));
            }
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id("app-canvas")
        .ok_or_else(|| anyhow::anyhow!("missing #app-canvas"))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    let (width, height) = dom::sync_canvas_backing_size(&canvas);
    events::wire_resize(&window, &canvas);

    let search = window.location().search().unwrap_or_default();
    let preset = input::preset_from_search(&search);
    log::info!("[init] preset {}", preset.name());
    let viewer = Rc::new(RefCell::new(Viewer::new(preset.config(), width, height)));
    let clock = Rc::new(SystemClock::new());
    let narration: Rc<RefCell<Option<Narration>>> = Rc::new(RefCell::new(None));

    overlay::wire_info_toggle(&document);
    panel::build(&document, viewer.clone())?;
    events::wire_panel_toggle_h(&window, &document);
    overlay::set_progress(&document, viewer.borrow().progress());

    let instance = wgpu::Instance::default();
    let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
    let gpu = Rc::new(RefCell::new(
        GpuState::new(&instance, surface, width, height).await?,
    ));

    events::wire_pointer_controls(&events::InputContext {
        canvas: canvas.clone(),
        viewer: viewer.clone(),
        clock: clock.clone(),
        narration: narration.clone(),
    });
    frame::start_loop(frame::FrameContext {
        canvas,
        viewer: viewer.clone(),
        gpu: gpu.clone(),
        clock: clock.clone(),
    });

    let requests = viewer.borrow().requests();
    for request in requests {
        let assets = Assets {
            document: document.clone(),
            viewer: viewer.clone(),
            gpu: gpu.clone(),
            clock: clock.clone(),
            narration: narration.clone(),
        };
        spawn_local(async move { assets.load(request).await });
    }
    Ok(())
}

/// Handles shared by the asset fetch tasks.
struct Assets {
    document: web::Document,
    viewer: Rc<RefCell<Viewer>>,
    gpu: Rc<RefCell<GpuState<'static>>>,
    clock: Rc<SystemClock>,
    narration: Rc<RefCell<Option<Narration>>>,
}

impl Assets {
    async fn load(self, request: AssetRequest) {
        match request.key {
            AssetKey::Product | AssetKey::Case => {
                let Some(url) = request.urls.first() else {
                    return;
                };
                let node = {
                    let viewer = self.viewer.borrow();
                    let assets = &viewer.config().assets;
                    match request.key {
                        AssetKey::Product => assets.product.node,
                        _ => assets.case.as_ref().and_then(|c| c.node),
                    }
                };
                let outcome = LoadOutcome::from(loader::load_model(url, node).await);
                let now = self.clock.now();
                let attached = self
                    .viewer
                    .borrow_mut()
                    .on_model_loaded(request.key, url, outcome, now);
                if let Some(model) = attached {
                    self.gpu.borrow_mut().attach_model(request.key, &model);
                }
            }
            AssetKey::Environment => {
                let result = match loader::load_environment(&request.urls).await {
                    Ok(faces) => {
                        self.gpu.borrow_mut().set_environment(&faces);
                        Ok(())
                    }
                    Err(e) => Err(e),
                };
                let mut viewer = self.viewer.borrow_mut();
                for url in &request.urls {
                    viewer.on_asset_loaded(url, result.clone());
                }
            }
            AssetKey::Narration => {
                for url in &request.urls {
                    let result = match loader::fetch_bytes(url).await {
                        Ok(bytes) => Narration::from_bytes(&bytes, input::audio_mime_type(url))
                            .map_err(|e| showcase_core::LoadError::Unsupported(e.to_string())),
                        Err(e) => Err(e),
                    };
                    let result = result.map(|n| {
                        *self.narration.borrow_mut() = Some(n);
                    });
                    self.viewer.borrow_mut().on_asset_loaded(url, result);
                }
            }
        }
        self.report_progress();
    }

    fn report_progress(&self) {
        let viewer = self.viewer.borrow();
        let loads = viewer.loads();
        overlay::set_progress(&self.document, loads.progress());
        if loads.is_settled() {
            let failures: Vec<String> = loads
                .failed()
                .into_iter()
                .map(|(url, e)| format!("{url}: {e}"))
                .collect();
            overlay::finish_loading(&self.document, &failures);
            log::info!("[load] settled, {} failure(s)", failures.len());
        }
    }
}
