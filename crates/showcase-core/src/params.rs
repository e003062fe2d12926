//! Runtime-tunable configuration table.
//!
//! Every field here can be bound to a debug-panel control. Numeric bounds in
//! [`ParamSpec`] are hints for the UI; programmatic writes go through
//! [`ShowcaseParams::set`] unchanged.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ParamError {
    #[error("invalid colour {0:?}, expected #rrggbb or #rgb")]
    InvalidColor(String),
    #[error("{key:?} expects a {expected} value")]
    KindMismatch { key: ParamKey, expected: &'static str },
}

/// Colour in 0..1 components.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Rgb(pub [f32; 3]);

impl Rgb {
    pub fn from_hex(hex: &str) -> Result<Self, ParamError> {
        let err = || ParamError::InvalidColor(hex.to_string());
        let digits = hex.strip_prefix('#').ok_or_else(err)?;
        if !digits.is_ascii() {
            return Err(err());
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| err());
        let bytes = match digits.len() {
            6 => [
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            ],
            3 => {
                // #abc is shorthand for #aabbcc
                let c = |i: usize| channel(&digits[i..i + 1]).map(|v| v * 17);
                [c(0)?, c(1)?, c(2)?]
            }
            _ => return Err(err()),
        };
        Ok(Self(bytes.map(|b| b as f32 / 255.0)))
    }

    pub fn to_hex(self) -> String {
        let [r, g, b] = self.0.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8);
        format!("#{r:02x}{g:02x}{b:02x}")
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParamKey {
    FogColor,
    PedestalColor,
    ProductPositionY,
    AmbientIntensity,
    PointIntensity,
    DirectionalIntensity,
    SpotIntensity,
    GlassOpacity,
    IntroDurationSecs,
}

impl ParamKey {
    pub const ALL: [ParamKey; 9] = [
        ParamKey::FogColor,
        ParamKey::PedestalColor,
        ParamKey::ProductPositionY,
        ParamKey::AmbientIntensity,
        ParamKey::PointIntensity,
        ParamKey::DirectionalIntensity,
        ParamKey::SpotIntensity,
        ParamKey::GlassOpacity,
        ParamKey::IntroDurationSecs,
    ];

    /// Stable identifier, also used for DOM ids of panel controls.
    pub fn id(self) -> &'static str {
        match self {
            ParamKey::FogColor => "fog-color",
            ParamKey::PedestalColor => "pedestal-color",
            ParamKey::ProductPositionY => "product-position-y",
            ParamKey::AmbientIntensity => "ambient-intensity",
            ParamKey::PointIntensity => "point-intensity",
            ParamKey::DirectionalIntensity => "directional-intensity",
            ParamKey::SpotIntensity => "spot-intensity",
            ParamKey::GlassOpacity => "glass-opacity",
            ParamKey::IntroDurationSecs => "intro-duration",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.id() == id)
    }

    pub fn spec(self) -> ParamSpec {
        let number = |label, min, max, step| ParamSpec {
            key: self,
            label,
            kind: ParamKind::Number { min, max, step },
        };
        match self {
            ParamKey::FogColor => ParamSpec {
                key: self,
                label: "Fog Color",
                kind: ParamKind::Color,
            },
            ParamKey::PedestalColor => ParamSpec {
                key: self,
                label: "Pedestal Color",
                kind: ParamKind::Color,
            },
            ParamKey::ProductPositionY => number("Product Position", 2.0, 20.0, 0.1),
            ParamKey::AmbientIntensity => number("Ambient Light", 0.1, 6.0, 0.01),
            ParamKey::PointIntensity => number("Point Light", 0.1, 6.0, 0.01),
            ParamKey::DirectionalIntensity => number("Directional Light", 0.0, 6.0, 0.01),
            ParamKey::SpotIntensity => number("Spot Light", 0.0, 10.0, 0.01),
            ParamKey::GlassOpacity => number("Glass Opacity", 0.0, 1.0, 0.01),
            ParamKey::IntroDurationSecs => number("Intro Duration", 0.0, 10.0, 0.1),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParamKind {
    Number { min: f32, max: f32, step: f32 },
    Color,
}

/// UI description of a bindable parameter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParamSpec {
    pub key: ParamKey,
    pub label: &'static str,
    pub kind: ParamKind,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ParamValue {
    Number(f32),
    Color(String),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShowcaseParams {
    pub fog_color: String,
    pub pedestal_color: String,
    pub product_position_y: f32,
    pub ambient_intensity: f32,
    pub point_intensity: f32,
    pub directional_intensity: f32,
    pub spot_intensity: f32,
    pub glass_opacity: f32,
    pub intro_duration_secs: f32,
}

impl Default for ShowcaseParams {
    fn default() -> Self {
        Self {
            fog_color: "#21222c".to_string(),
            pedestal_color: "#0b080c".to_string(),
            product_position_y: 0.5,
            ambient_intensity: 3.0,
            point_intensity: 3.0,
            directional_intensity: 2.0,
            spot_intensity: 4.0,
            glass_opacity: 0.25,
            intro_duration_secs: 2.0,
        }
    }
}

impl ShowcaseParams {
    pub fn get(&self, key: ParamKey) -> ParamValue {
        match key {
            ParamKey::FogColor => ParamValue::Color(self.fog_color.clone()),
            ParamKey::PedestalColor => ParamValue::Color(self.pedestal_color.clone()),
            ParamKey::ProductPositionY => ParamValue::Number(self.product_position_y),
            ParamKey::AmbientIntensity => ParamValue::Number(self.ambient_intensity),
            ParamKey::PointIntensity => ParamValue::Number(self.point_intensity),
            ParamKey::DirectionalIntensity => ParamValue::Number(self.directional_intensity),
            ParamKey::SpotIntensity => ParamValue::Number(self.spot_intensity),
            ParamKey::GlassOpacity => ParamValue::Number(self.glass_opacity),
            ParamKey::IntroDurationSecs => ParamValue::Number(self.intro_duration_secs),
        }
    }

    pub fn set(&mut self, key: ParamKey, value: ParamValue) -> Result<(), ParamError> {
        match (key.spec().kind, value) {
            (ParamKind::Color, ParamValue::Color(hex)) => {
                Rgb::from_hex(&hex)?;
                match key {
                    ParamKey::FogColor => self.fog_color = hex,
                    _ => self.pedestal_color = hex,
                }
                Ok(())
            }
            (ParamKind::Number { .. }, ParamValue::Number(v)) => {
                if let Some(slot) = self.number_mut(key) {
                    *slot = v;
                }
                Ok(())
            }
            (ParamKind::Color, _) => Err(ParamError::KindMismatch {
                key,
                expected: "colour",
            }),
            (ParamKind::Number { .. }, _) => Err(ParamError::KindMismatch {
                key,
                expected: "numeric",
            }),
        }
    }

    fn number_mut(&mut self, key: ParamKey) -> Option<&mut f32> {
        match key {
            ParamKey::ProductPositionY => Some(&mut self.product_position_y),
            ParamKey::AmbientIntensity => Some(&mut self.ambient_intensity),
            ParamKey::PointIntensity => Some(&mut self.point_intensity),
            ParamKey::DirectionalIntensity => Some(&mut self.directional_intensity),
            ParamKey::SpotIntensity => Some(&mut self.spot_intensity),
            ParamKey::GlassOpacity => Some(&mut self.glass_opacity),
            ParamKey::IntroDurationSecs => Some(&mut self.intro_duration_secs),
            ParamKey::FogColor | ParamKey::PedestalColor => None,
        }
    }

    /// Parsed fog colour; falls back to black for a malformed config value.
    pub fn fog_rgb(&self) -> Rgb {
        Rgb::from_hex(&self.fog_color).unwrap_or_default()
    }

    pub fn pedestal_rgb(&self) -> Rgb {
        Rgb::from_hex(&self.pedestal_color).unwrap_or_default()
    }
}
