pub mod camera;
pub mod clock;
pub mod constants;
pub mod interaction;
pub mod loader;
pub mod model;
pub mod orbit;
pub mod params;
pub mod preset;
pub mod scene;
pub mod tween;
pub mod viewer;

pub use camera::*;
pub use clock::*;
pub use interaction::*;
pub use loader::*;
pub use model::*;
pub use orbit::*;
pub use params::*;
pub use preset::*;
pub use scene::*;
pub use tween::*;
pub use viewer::*;
