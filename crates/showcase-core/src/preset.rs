//! Showcase variants.
//!
//! The five shipped showcases differ only in the lights they enable, the
//! assets they load and a little animation tuning, so each one is a
//! [`ShowcaseConfig`] value. A config can also be read from JSON.

use crate::constants::*;
use crate::params::ShowcaseParams;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown preset {0:?}")]
    UnknownPreset(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpinAxis {
    X,
    Y,
    Z,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpinConfig {
    pub axis: SpinAxis,
    pub step_radians: f32,
}

impl Default for SpinConfig {
    fn default() -> Self {
        Self {
            axis: SpinAxis::Y,
            step_radians: DEFAULT_SPIN_STEP,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub start: [f32; 3],
    pub intro_target: [f32; 3],
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: DEFAULT_FOV_DEGREES,
            near: DEFAULT_ZNEAR,
            far: DEFAULT_ZFAR,
            start: CAMERA_START,
            intro_target: CAMERA_INTRO_TARGET,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightToggles {
    pub ambient: bool,
    pub point: bool,
    pub directional: bool,
    pub spot: bool,
}

impl Default for LightToggles {
    fn default() -> Self {
        Self {
            ambient: true,
            point: true,
            directional: false,
            spot: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModelAsset {
    pub url: String,
    #[serde(default = "unit_scale")]
    pub scale: f32,
    /// Root node of the default scene to display; `None` shows the whole scene.
    #[serde(default)]
    pub node: Option<usize>,
}

fn unit_scale() -> f32 {
    1.0
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AssetManifest {
    pub product: ModelAsset,
    #[serde(default)]
    pub case: Option<ModelAsset>,
    /// Cube faces in +x, -x, +y, -y, +z, -z order.
    #[serde(default)]
    pub environment: Option<[String; 6]>,
    #[serde(default)]
    pub narration: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShowcaseConfig {
    pub name: String,
    #[serde(default)]
    pub lights: LightToggles,
    pub assets: AssetManifest,
    #[serde(default)]
    pub params: ShowcaseParams,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub spin: SpinConfig,
}

impl ShowcaseConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Preset {
    Recon,
    GlassCase,
    Spotlight,
    Environment,
    Studio,
}

impl Preset {
    pub const ALL: [Preset; 5] = [
        Preset::Recon,
        Preset::GlassCase,
        Preset::Spotlight,
        Preset::Environment,
        Preset::Studio,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Preset::Recon => "recon",
            Preset::GlassCase => "glass-case",
            Preset::Spotlight => "spotlight",
            Preset::Environment => "environment",
            Preset::Studio => "studio",
        }
    }

    pub fn from_name(name: &str) -> Result<Self, ConfigError> {
        Self::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| ConfigError::UnknownPreset(name.to_string()))
    }

    pub fn config(self) -> ShowcaseConfig {
        let product = |url: &str, scale: f32| ModelAsset {
            url: url.to_string(),
            scale,
            node: Some(0),
        };
        let glass_case = || ModelAsset {
            url: "/models/glass-case/scene.gltf".to_string(),
            scale: 1.0,
            node: None,
        };
        match self {
            // Two point lights over the pedestal; the scan is Z-up so it spins on Z.
            Preset::Recon => ShowcaseConfig {
                name: self.name().to_string(),
                lights: LightToggles::default(),
                assets: AssetManifest {
                    product: product("/models/recon/scene.gltf", 0.1),
                    case: None,
                    environment: None,
                    narration: None,
                },
                params: ShowcaseParams {
                    fog_color: "#21222c".to_string(),
                    ..ShowcaseParams::default()
                },
                camera: CameraConfig::default(),
                spin: SpinConfig {
                    axis: SpinAxis::Z,
                    step_radians: DEFAULT_SPIN_STEP,
                },
            },
            Preset::GlassCase => ShowcaseConfig {
                name: self.name().to_string(),
                lights: LightToggles {
                    ambient: true,
                    point: false,
                    directional: true,
                    spot: false,
                },
                assets: AssetManifest {
                    product: product("/models/watch/scene.gltf", 0.5),
                    case: Some(glass_case()),
                    environment: None,
                    narration: Some("/audio/narration.wav".to_string()),
                },
                params: ShowcaseParams {
                    ambient_intensity: 1.5,
                    product_position_y: 0.9,
                    ..ShowcaseParams::default()
                },
                camera: CameraConfig::default(),
                spin: SpinConfig::default(),
            },
            Preset::Spotlight => ShowcaseConfig {
                name: self.name().to_string(),
                lights: LightToggles {
                    ambient: true,
                    point: false,
                    directional: false,
                    spot: true,
                },
                assets: AssetManifest {
                    product: product("/models/sneaker/scene.gltf", 2.0),
                    case: None,
                    environment: None,
                    narration: Some("/audio/narration.wav".to_string()),
                },
                params: ShowcaseParams {
                    ambient_intensity: 0.6,
                    spot_intensity: 6.0,
                    fog_color: "#262837".to_string(),
                    ..ShowcaseParams::default()
                },
                camera: CameraConfig::default(),
                spin: SpinConfig {
                    axis: SpinAxis::Y,
                    step_radians: 0.005,
                },
            },
            Preset::Environment => ShowcaseConfig {
                name: self.name().to_string(),
                lights: LightToggles {
                    ambient: true,
                    point: false,
                    directional: true,
                    spot: false,
                },
                assets: AssetManifest {
                    product: product("/models/camera/scene.gltf", 1.0),
                    case: Some(glass_case()),
                    environment: Some(
                        ["px", "nx", "py", "ny", "pz", "nz"]
                            .map(|face| format!("/textures/environment/{face}.jpg")),
                    ),
                    narration: Some("/audio/narration.wav".to_string()),
                },
                params: ShowcaseParams {
                    ambient_intensity: 1.0,
                    directional_intensity: 3.0,
                    ..ShowcaseParams::default()
                },
                camera: CameraConfig::default(),
                spin: SpinConfig::default(),
            },
            Preset::Studio => ShowcaseConfig {
                name: self.name().to_string(),
                lights: LightToggles {
                    ambient: true,
                    point: true,
                    directional: true,
                    spot: true,
                },
                assets: AssetManifest {
                    product: product("/models/headphones/scene.gltf", 1.5),
                    case: None,
                    environment: None,
                    narration: Some("/audio/narration.wav".to_string()),
                },
                params: ShowcaseParams {
                    ambient_intensity: 1.2,
                    point_intensity: 2.0,
                    ..ShowcaseParams::default()
                },
                camera: CameraConfig {
                    intro_target: [0.0, 2.8, 6.5],
                    ..CameraConfig::default()
                },
                spin: SpinConfig {
                    axis: SpinAxis::Y,
                    step_radians: 0.008,
                },
            },
        }
    }
}
