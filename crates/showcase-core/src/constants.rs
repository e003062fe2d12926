use std::time::Duration;

// Shared viewer tuning constants used by both web and native frontends.

// Interaction
pub const IDLE_DELAY: Duration = Duration::from_millis(2000); // grace period after drag-end
pub const DEFAULT_SPIN_STEP: f32 = 0.01; // radians added to the product per idle frame

// Orbit controls
pub const ORBIT_DAMPING_FACTOR: f32 = 0.05;
pub const ORBIT_ROTATE_SPEED: f32 = 1.0;
pub const ORBIT_ZOOM_SCALE: f32 = 0.95; // distance multiplier per wheel notch
pub const ORBIT_MIN_DISTANCE: f32 = 1.0;
pub const ORBIT_MAX_DISTANCE: f32 = 40.0;
pub const ORBIT_POLAR_EPSILON: f32 = 1e-4; // keeps the camera off the poles
pub const ORBIT_SETTLE_EPSILON: f32 = 1e-7; // per-frame angle below which damping stops

// Camera
pub const DEFAULT_FOV_DEGREES: f32 = 75.0;
pub const DEFAULT_ZNEAR: f32 = 0.01;
pub const DEFAULT_ZFAR: f32 = 100.0;
pub const CAMERA_START: [f32; 3] = [0.0, 3.0, 20.0];
pub const CAMERA_INTRO_TARGET: [f32; 3] = [0.0, 3.6, 5.8];
pub const MAX_PIXEL_RATIO: f64 = 2.0;

// Scene layout
pub const FOG_NEAR: f32 = 1.0;
pub const FOG_FAR: f32 = 20.0;
pub const POINT_LIGHT_POSITIONS: [[f32; 3]; 2] = [[2.0, 3.0, 0.0], [-2.0, 3.0, 0.0]];
pub const DIRECTIONAL_LIGHT_DIRECTION: [f32; 3] = [-1.0, -2.0, -1.5];
pub const SPOT_LIGHT_POSITION: [f32; 3] = [0.0, 8.0, 2.0];
pub const SPOT_LIGHT_ANGLE: f32 = 0.45; // radians, outer cone half-angle
pub const SPOT_LIGHT_PENUMBRA: f32 = 0.3; // fraction of the cone that fades

// Pedestal geometry
pub const PEDESTAL_BASE_RADIUS: f32 = 3.0;
pub const PEDESTAL_TOP_RADIUS: f32 = 2.5;
pub const PEDESTAL_HEIGHT: f32 = 0.2;
pub const PEDESTAL_TOP_OFFSET_Y: f32 = 0.2;
pub const PEDESTAL_SEGMENTS: u32 = 50;

// Renderer limits shared with the WGSL uniforms
pub const MAX_POINT_LIGHTS: usize = 4;
