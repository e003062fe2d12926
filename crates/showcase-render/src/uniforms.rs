//! CPU-side packing of GPU uniform blocks. Layouts mirror `shaders/*.wgsl`.

use glam::{Mat4, Vec3};
use showcase_core::constants::MAX_POINT_LIGHTS;
use showcase_core::{FrameSnapshot, Rgb};

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PointLightPacked {
    pub position: [f32; 4],
    /// Linear rgb pre-multiplied by intensity.
    pub color: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub eye: [f32; 4],
    pub ambient: [f32; 4],
    pub fog_color: [f32; 4],
    // x: fog near, y: fog far, z: point light count, w: glass opacity
    pub params: [f32; 4],
    pub points: [PointLightPacked; MAX_POINT_LIGHTS],
    pub dir_direction: [f32; 4],
    // w: 1 when enabled
    pub dir_color: [f32; 4],
    // w: cos of outer cone angle
    pub spot_position: [f32; 4],
    // w: cos of inner cone angle
    pub spot_direction: [f32; 4],
    // w: 1 when enabled
    pub spot_color: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectUniforms {
    pub model: [[f32; 4]; 4],
    pub normal: [[f32; 4]; 4],
    pub color: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SkyUniforms {
    pub inv_view_proj: [[f32; 4]; 4],
    pub eye: [f32; 4],
}

/// sRGB-encoded channel to linear.
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

pub fn linear_rgb(rgb: Rgb) -> [f32; 3] {
    rgb.0.map(srgb_to_linear)
}

fn scaled(rgb: Rgb, intensity: f32, w: f32) -> [f32; 4] {
    let [r, g, b] = linear_rgb(rgb);
    [r * intensity, g * intensity, b * intensity, w]
}

fn vec4(v: Vec3, w: f32) -> [f32; 4] {
    [v.x, v.y, v.z, w]
}

impl SceneUniforms {
    pub fn from_snapshot(frame: &FrameSnapshot) -> Self {
        let mut points = [PointLightPacked::default(); MAX_POINT_LIGHTS];
        let count = frame.points.len().min(MAX_POINT_LIGHTS);
        if frame.points.len() > MAX_POINT_LIGHTS {
            log::warn!(
                "[render] {} point lights, only {MAX_POINT_LIGHTS} are shaded",
                frame.points.len()
            );
        }
        for (slot, light) in points.iter_mut().zip(&frame.points) {
            *slot = PointLightPacked {
                position: vec4(light.position, 1.0),
                color: scaled(light.color, light.intensity, 1.0),
            };
        }

        let (dir_direction, dir_color) = match &frame.directional {
            Some(d) => (vec4(d.direction, 0.0), scaled(d.color, d.intensity, 1.0)),
            None => ([0.0, -1.0, 0.0, 0.0], [0.0; 4]),
        };
        let (spot_position, spot_direction, spot_color) = match &frame.spot {
            Some(s) => {
                let dir = (s.target - s.position).normalize_or_zero();
                let outer = s.angle.cos();
                let inner = (s.angle * (1.0 - s.penumbra)).cos();
                (
                    vec4(s.position, outer),
                    vec4(dir, inner),
                    scaled(s.color, s.intensity, 1.0),
                )
            }
            None => ([0.0; 4], [0.0, -1.0, 0.0, 1.0], [0.0; 4]),
        };

        let ambient = frame
            .ambient
            .as_ref()
            .map_or([0.0; 4], |a| scaled(a.color, a.intensity, 1.0));
        let [fr, fg, fb] = linear_rgb(frame.fog.color);
        Self {
            view_proj: frame.view_proj().to_cols_array_2d(),
            eye: vec4(frame.eye, 1.0),
            ambient,
            fog_color: [fr, fg, fb, 1.0],
            params: [
                frame.fog.near,
                frame.fog.far,
                count as f32,
                frame.glass_opacity.clamp(0.0, 1.0),
            ],
            points,
            dir_direction,
            dir_color,
            spot_position,
            spot_direction,
            spot_color,
        }
    }
}

impl ObjectUniforms {
    pub fn new(model: Mat4, color: [f32; 4]) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            normal: model.inverse().transpose().to_cols_array_2d(),
            color,
        }
    }
}

impl SkyUniforms {
    /// Rotation-only view so the sky stays at infinity.
    pub fn from_snapshot(frame: &FrameSnapshot) -> Self {
        let mut view = frame.view;
        view.w_axis = glam::Vec4::W;
        Self {
            inv_view_proj: (frame.projection * view).inverse().to_cols_array_2d(),
            eye: [0.0, 0.0, 0.0, 1.0],
        }
    }
}

/// Background clear colour; matches the fog.
pub fn clear_color(frame: &FrameSnapshot) -> [f64; 4] {
    let [r, g, b] = linear_rgb(frame.fog.color);
    [r as f64, g as f64, b as f64, 1.0]
}

/// Pedestal material colour for this frame, linear rgba.
pub fn pedestal_color(frame: &FrameSnapshot) -> [f32; 4] {
    let [r, g, b] = linear_rgb(frame.pedestal_color);
    [r, g, b, 1.0]
}
