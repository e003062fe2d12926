pub mod gpu;
pub mod helpers;
pub mod mesh;
mod skybox;
pub mod uniforms;

pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");
pub static SKYBOX_WGSL: &str = include_str!("../shaders/skybox.wgsl");

pub use gpu::GpuState;
pub use uniforms::*;
