//! Scene assembly.
//!
//! Builds the live light, fog and material objects from a
//! [`ShowcaseConfig`] and keeps them in sync with the configuration table.
//! Everything here is plain data; the renderer reads it through
//! [`crate::viewer::FrameSnapshot`].

use crate::constants::*;
use crate::model::{cylinder_mesh, MeshData};
use crate::params::{ParamKey, Rgb, ShowcaseParams};
use crate::preset::{ShowcaseConfig, SpinAxis};
use glam::{EulerRot, Mat4, Quat, Vec3};

#[derive(Clone, Debug, PartialEq)]
pub struct AmbientLight {
    pub color: Rgb,
    pub intensity: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PointLight {
    pub color: Rgb,
    pub intensity: f32,
    pub position: Vec3,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DirectionalLight {
    pub color: Rgb,
    pub intensity: f32,
    pub direction: Vec3,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SpotLight {
    pub color: Rgb,
    pub intensity: f32,
    pub position: Vec3,
    pub target: Vec3,
    pub angle: f32,
    pub penumbra: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Fog {
    pub color: Rgb,
    pub near: f32,
    pub far: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    pub color: Rgb,
    pub opacity: f32,
}

/// Transform of a model attached to the pedestal group.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneNode {
    pub position: Vec3,
    /// Euler angles in radians, applied X then Y then Z.
    pub rotation: Vec3,
    pub scale: f32,
}

impl SceneNode {
    pub fn new(scale: f32) -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale,
        }
    }

    pub fn rotate(&mut self, axis: SpinAxis, radians: f32) {
        match axis {
            SpinAxis::X => self.rotation.x += radians,
            SpinAxis::Y => self.rotation.y += radians,
            SpinAxis::Z => self.rotation.z += radians,
        }
    }

    pub fn matrix(&self) -> Mat4 {
        let r = Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        );
        Mat4::from_scale_rotation_translation(Vec3::splat(self.scale), r, self.position)
    }
}

#[derive(Clone, Debug)]
pub struct LiveScene {
    pub ambient: Option<AmbientLight>,
    pub points: Vec<PointLight>,
    pub directional: Option<DirectionalLight>,
    pub spot: Option<SpotLight>,
    pub fog: Fog,
    pub pedestal: Material,
    pub glass: Material,
    /// Product model; `None` until its load completes.
    pub product: Option<SceneNode>,
    pub case: Option<SceneNode>,
}

const WHITE: Rgb = Rgb([1.0, 1.0, 1.0]);

impl LiveScene {
    pub fn assemble(config: &ShowcaseConfig) -> Self {
        let p = &config.params;
        let lights = &config.lights;

        let ambient = lights.ambient.then(|| AmbientLight {
            color: WHITE,
            intensity: p.ambient_intensity,
        });
        // The second point light is a clone of the first, mirrored across X.
        let points = if lights.point {
            POINT_LIGHT_POSITIONS
                .iter()
                .map(|pos| PointLight {
                    color: WHITE,
                    intensity: p.point_intensity,
                    position: Vec3::from(*pos),
                })
                .collect()
        } else {
            Vec::new()
        };
        let directional = lights.directional.then(|| DirectionalLight {
            color: WHITE,
            intensity: p.directional_intensity,
            direction: Vec3::from(DIRECTIONAL_LIGHT_DIRECTION).normalize(),
        });
        let spot = lights.spot.then(|| SpotLight {
            color: WHITE,
            intensity: p.spot_intensity,
            position: Vec3::from(SPOT_LIGHT_POSITION),
            target: Vec3::ZERO,
            angle: SPOT_LIGHT_ANGLE,
            penumbra: SPOT_LIGHT_PENUMBRA,
        });

        Self {
            ambient,
            points,
            directional,
            spot,
            fog: Fog {
                color: p.fog_rgb(),
                near: FOG_NEAR,
                far: FOG_FAR,
            },
            pedestal: Material {
                color: p.pedestal_rgb(),
                opacity: 1.0,
            },
            glass: Material {
                color: WHITE,
                opacity: p.glass_opacity,
            },
            product: None,
            case: None,
        }
    }

    /// Pushes one configuration value into the live objects it drives.
    pub fn apply_param(&mut self, key: ParamKey, params: &ShowcaseParams) {
        match key {
            ParamKey::FogColor => self.fog.color = params.fog_rgb(),
            ParamKey::PedestalColor => self.pedestal.color = params.pedestal_rgb(),
            ParamKey::ProductPositionY => {
                if let Some(node) = &mut self.product {
                    node.position.y = params.product_position_y;
                }
            }
            ParamKey::AmbientIntensity => {
                if let Some(light) = &mut self.ambient {
                    light.intensity = params.ambient_intensity;
                }
            }
            ParamKey::PointIntensity => {
                for light in &mut self.points {
                    light.intensity = params.point_intensity;
                }
            }
            ParamKey::DirectionalIntensity => {
                if let Some(light) = &mut self.directional {
                    light.intensity = params.directional_intensity;
                }
            }
            ParamKey::SpotIntensity => {
                if let Some(light) = &mut self.spot {
                    light.intensity = params.spot_intensity;
                }
            }
            ParamKey::GlassOpacity => self.glass.opacity = params.glass_opacity,
            // Read when the intro tween starts; no live object.
            ParamKey::IntroDurationSecs => {}
        }
    }

    /// Keys that have a live binding in this scene. Panels skip the rest.
    pub fn bound_keys(&self) -> Vec<ParamKey> {
        ParamKey::ALL
            .into_iter()
            .filter(|k| match k {
                ParamKey::AmbientIntensity => self.ambient.is_some(),
                ParamKey::PointIntensity => !self.points.is_empty(),
                ParamKey::DirectionalIntensity => self.directional.is_some(),
                ParamKey::SpotIntensity => self.spot.is_some(),
                _ => true,
            })
            .collect()
    }
}

/// Pedestal group geometry: a wide base disc with a narrower disc on top.
pub fn pedestal_meshes(color: Rgb) -> Vec<MeshData> {
    let rgba = [color.0[0], color.0[1], color.0[2], 1.0];
    let base = cylinder_mesh(
        PEDESTAL_BASE_RADIUS,
        PEDESTAL_HEIGHT,
        PEDESTAL_SEGMENTS,
        rgba,
    );
    let mut top = cylinder_mesh(
        PEDESTAL_TOP_RADIUS,
        PEDESTAL_HEIGHT,
        PEDESTAL_SEGMENTS,
        rgba,
    );
    for v in &mut top.vertices {
        v.position[1] += PEDESTAL_TOP_OFFSET_Y;
    }
    vec![base, top]
}
