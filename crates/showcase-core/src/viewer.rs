//! The viewer: owns every piece of per-showcase state and advances it once
//! per frame.
//!
//! Hosts feed it input and load completions, call [`Viewer::frame`] once per
//! display refresh and render the returned [`FrameSnapshot`]. Hosts without
//! their own frame driver can use [`RenderLoop`].

use crate::camera::Camera;
use crate::clock::FrameScheduler;
use crate::interaction::Interaction;
use crate::loader::{AssetKey, AssetRequest, LoadError, LoadOutcome, LoadProgress, LoadTracker};
use crate::model::ModelData;
use crate::orbit::{ControlEvent, OrbitControls};
use crate::params::{ParamError, ParamKey, ParamValue, Rgb, ShowcaseParams};
use crate::preset::ShowcaseConfig;
use crate::scene::{AmbientLight, DirectionalLight, Fog, LiveScene, PointLight, SceneNode, SpotLight};
use crate::tween::Tween;
use glam::{Mat4, Vec3};
use std::time::Duration;

/// Everything the renderer needs for one frame.
#[derive(Clone, Debug)]
pub struct FrameSnapshot {
    pub index: u64,
    pub view: Mat4,
    pub projection: Mat4,
    pub eye: Vec3,
    pub ambient: Option<AmbientLight>,
    pub points: Vec<PointLight>,
    pub directional: Option<DirectionalLight>,
    pub spot: Option<SpotLight>,
    pub fog: Fog,
    pub pedestal_color: Rgb,
    pub glass_opacity: f32,
    pub product: Option<Mat4>,
    pub case: Option<Mat4>,
    pub controlled: bool,
}

impl FrameSnapshot {
    pub fn view_proj(&self) -> Mat4 {
        self.projection * self.view
    }
}

/// What the host should do in response to a control event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ControlResponse {
    pub play_narration: bool,
}

pub struct Viewer {
    config: ShowcaseConfig,
    params: ShowcaseParams,
    scene: LiveScene,
    interaction: Interaction,
    loads: LoadTracker,
    orbit: OrbitControls,
    camera: Camera,
    intro: Option<Tween>,
    frame_index: u64,
}

impl Viewer {
    pub fn new(config: ShowcaseConfig, width: u32, height: u32) -> Self {
        let scene = LiveScene::assemble(&config);
        let mut camera = Camera::from_config(&config.camera, 1.0);
        camera.set_viewport(width, height);
        let loads = LoadTracker::new(&AssetRequest::from_manifest(&config.assets));
        log::info!(
            "[viewer] showcase '{}' with {} point light(s)",
            config.name,
            scene.points.len()
        );
        Self {
            params: config.params.clone(),
            config,
            scene,
            interaction: Interaction::default(),
            loads,
            orbit: OrbitControls::default(),
            camera,
            intro: None,
            frame_index: 0,
        }
    }

    pub fn config(&self) -> &ShowcaseConfig {
        &self.config
    }

    pub fn params(&self) -> &ShowcaseParams {
        &self.params
    }

    pub fn scene(&self) -> &LiveScene {
        &self.scene
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    pub fn requests(&self) -> Vec<AssetRequest> {
        AssetRequest::from_manifest(&self.config.assets)
    }

    /// The product model is attached to the scene.
    pub fn is_ready(&self) -> bool {
        self.scene.product.is_some()
    }

    /// The narration clip, if one is configured, has finished loading.
    pub fn narration_loaded(&self) -> bool {
        self.config
            .assets
            .narration
            .as_deref()
            .map_or(true, |url| self.loads.is_loaded(url))
    }

    pub fn is_controlled(&self, now: Duration) -> bool {
        self.interaction.is_controlled(now)
    }

    pub fn progress(&self) -> LoadProgress {
        self.loads.progress()
    }

    pub fn loads(&self) -> &LoadTracker {
        &self.loads
    }

    // ---------------- Input ----------------

    pub fn control_event(&mut self, event: ControlEvent, now: Duration) -> ControlResponse {
        match event {
            ControlEvent::Start => {
                let ready = self.is_ready() && self.narration_loaded();
                let effect = self.interaction.drag_start(now, ready);
                ControlResponse {
                    play_narration: effect.play_narration,
                }
            }
            ControlEvent::End => {
                self.interaction.drag_end(now);
                ControlResponse::default()
            }
        }
    }

    pub fn pointer_down(&mut self, x: f32, y: f32, now: Duration) -> ControlResponse {
        match self.orbit.pointer_down(x, y) {
            Some(ev) => self.control_event(ev, now),
            None => ControlResponse::default(),
        }
    }

    pub fn pointer_move(&mut self, x: f32, y: f32, viewport_height: f32) {
        self.orbit.pointer_move(x, y, viewport_height);
    }

    pub fn pointer_up(&mut self, now: Duration) {
        if let Some(ev) = self.orbit.pointer_up() {
            self.control_event(ev, now);
        }
    }

    pub fn wheel(&mut self, delta_y: f32, now: Duration) -> ControlResponse {
        let mut response = ControlResponse::default();
        for ev in self.orbit.wheel(delta_y) {
            let r = self.control_event(ev, now);
            response.play_narration |= r.play_narration;
        }
        response
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera.set_viewport(width, height);
    }

    pub fn set_param(&mut self, key: ParamKey, value: ParamValue) -> Result<(), ParamError> {
        self.params.set(key, value)?;
        self.scene.apply_param(key, &self.params);
        Ok(())
    }

    // ---------------- Load completions ----------------

    /// Completion handler for model assets. Returns the model for GPU upload
    /// when it was attached to the scene.
    pub fn on_model_loaded(
        &mut self,
        key: AssetKey,
        url: &str,
        outcome: LoadOutcome<ModelData>,
        now: Duration,
    ) -> Option<ModelData> {
        let model = match outcome {
            LoadOutcome::Loaded(model) => model,
            LoadOutcome::Failed(err) => {
                self.loads.item_failed(url, err);
                return None;
            }
        };
        self.loads.item_loaded(url);
        match key {
            AssetKey::Product => {
                let mut node = SceneNode::new(self.config.assets.product.scale);
                node.position.y = self.params.product_position_y;
                self.scene.product = Some(node);
                let duration =
                    Duration::try_from_secs_f32(self.params.intro_duration_secs.max(0.0))
                        .unwrap_or(Duration::ZERO);
                self.intro = Some(Tween::new(
                    self.camera.eye,
                    Vec3::from(self.config.camera.intro_target),
                    now,
                    duration,
                ));
                log::info!(
                    "[viewer] product ready: {} triangles",
                    model.triangle_count()
                );
            }
            AssetKey::Case => {
                let scale = self.config.assets.case.as_ref().map_or(1.0, |c| c.scale);
                self.scene.case = Some(SceneNode::new(scale));
            }
            AssetKey::Environment | AssetKey::Narration => {
                log::warn!("[viewer] {key:?} is not a model asset");
                return None;
            }
        }
        Some(model)
    }

    /// Completion handler for non-model assets (environment faces, audio).
    pub fn on_asset_loaded(&mut self, url: &str, result: Result<(), LoadError>) -> LoadProgress {
        match result {
            Ok(()) => self.loads.item_loaded(url),
            Err(e) => self.loads.item_failed(url, e),
        }
    }

    // ---------------- Frame ----------------

    /// Advances one frame: idle spin, intro tween, orbit damping. The caller
    /// renders the returned snapshot exactly once.
    pub fn frame(&mut self, now: Duration) -> FrameSnapshot {
        self.interaction.poll(now);
        let controlled = self.interaction.is_controlled(now);
        if !controlled {
            if let Some(product) = &mut self.scene.product {
                product.rotate(self.config.spin.axis, self.config.spin.step_radians);
            }
        }

        if let Some(intro) = &self.intro {
            let (eye, done) = intro.sample(now);
            self.camera.eye = eye;
            if done {
                self.intro = None;
            }
        }
        self.orbit.update(&mut self.camera.eye);

        self.frame_index += 1;
        self.snapshot(controlled)
    }

    fn snapshot(&self, controlled: bool) -> FrameSnapshot {
        FrameSnapshot {
            index: self.frame_index,
            view: self.camera.view_matrix(),
            projection: self.camera.projection_matrix(),
            eye: self.camera.eye,
            ambient: self.scene.ambient.clone(),
            points: self.scene.points.clone(),
            directional: self.scene.directional.clone(),
            spot: self.scene.spot.clone(),
            fog: self.scene.fog.clone(),
            pedestal_color: self.scene.pedestal.color,
            glass_opacity: self.scene.glass.opacity,
            product: self.scene.product.as_ref().map(SceneNode::matrix),
            case: self.scene.case.as_ref().map(SceneNode::matrix),
            controlled,
        }
    }
}

/// Receives each frame's snapshot; one call per frame.
pub trait FrameSink {
    type Error;
    fn present(&mut self, frame: &FrameSnapshot) -> Result<(), Self::Error>;
}

/// Run-until-stopped frame loop for hosts that do not drive frames themselves.
pub struct RenderLoop;

impl RenderLoop {
    /// Returns the number of frames presented.
    pub fn run<S, K>(viewer: &mut Viewer, scheduler: &mut S, sink: &mut K) -> Result<u64, K::Error>
    where
        S: FrameScheduler,
        K: FrameSink,
    {
        let mut frames = 0;
        while let Some(now) = scheduler.next_frame() {
            let snapshot = viewer.frame(now);
            sink.present(&snapshot)?;
            frames += 1;
        }
        Ok(frames)
    }
}
