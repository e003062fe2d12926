//! Orbit camera control with damping.
//!
//! Pointer drags rotate the camera around `target` on a sphere, the wheel
//! dollies in and out. Panning is disabled. The control emits
//! [`ControlEvent::Start`] / [`ControlEvent::End`] around every interaction,
//! which is what the idle state machine listens to.

use crate::constants::*;
use glam::{Vec2, Vec3};
use std::f32::consts::{PI, TAU};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlEvent {
    Start,
    End,
}

#[derive(Clone, Debug)]
pub struct OrbitControls {
    pub target: Vec3,
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub zoom_scale: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    delta_theta: f32,
    delta_phi: f32,
    scale: f32,
    last_pointer: Option<Vec2>,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            enable_damping: true,
            damping_factor: ORBIT_DAMPING_FACTOR,
            rotate_speed: ORBIT_ROTATE_SPEED,
            zoom_scale: ORBIT_ZOOM_SCALE,
            min_distance: ORBIT_MIN_DISTANCE,
            max_distance: ORBIT_MAX_DISTANCE,
            delta_theta: 0.0,
            delta_phi: 0.0,
            scale: 1.0,
            last_pointer: None,
        }
    }
}

impl OrbitControls {
    pub fn is_rotating(&self) -> bool {
        self.last_pointer.is_some()
    }

    pub fn pointer_down(&mut self, x: f32, y: f32) -> Option<ControlEvent> {
        let was_rotating = self.is_rotating();
        self.last_pointer = Some(Vec2::new(x, y));
        (!was_rotating).then_some(ControlEvent::Start)
    }

    /// `viewport_height` is in the same units as the pointer coordinates.
    pub fn pointer_move(&mut self, x: f32, y: f32, viewport_height: f32) {
        let Some(last) = self.last_pointer else {
            return;
        };
        let pos = Vec2::new(x, y);
        let delta = (pos - last) * self.rotate_speed;
        let h = viewport_height.max(1.0);
        self.delta_theta -= TAU * delta.x / h;
        self.delta_phi -= TAU * delta.y / h;
        self.last_pointer = Some(pos);
    }

    pub fn pointer_up(&mut self) -> Option<ControlEvent> {
        self.last_pointer.take().map(|_| ControlEvent::End)
    }

    /// Wheel notches; negative values zoom in. Emits a start/end pair, or
    /// nothing while a drag is already in progress.
    pub fn wheel(&mut self, delta_y: f32) -> Vec<ControlEvent> {
        if delta_y < 0.0 {
            self.scale *= self.zoom_scale;
        } else if delta_y > 0.0 {
            self.scale /= self.zoom_scale;
        }
        if self.is_rotating() {
            Vec::new()
        } else {
            vec![ControlEvent::Start, ControlEvent::End]
        }
    }

    /// Integrates pending rotation/zoom into `eye`. Returns true if it moved.
    pub fn update(&mut self, eye: &mut Vec3) -> bool {
        let offset = *eye - self.target;
        let mut radius = offset.length();
        if radius <= f32::EPSILON {
            return false;
        }
        let (d_theta, d_phi) = if self.enable_damping {
            (
                self.delta_theta * self.damping_factor,
                self.delta_phi * self.damping_factor,
            )
        } else {
            (self.delta_theta, self.delta_phi)
        };
        let settled = d_theta.abs() < ORBIT_SETTLE_EPSILON
            && d_phi.abs() < ORBIT_SETTLE_EPSILON
            && self.scale == 1.0
            && (self.min_distance..=self.max_distance).contains(&radius);
        if settled {
            self.delta_theta = 0.0;
            self.delta_phi = 0.0;
            return false;
        }

        let theta = offset.x.atan2(offset.z) + d_theta;
        let phi = ((offset.y / radius).clamp(-1.0, 1.0).acos() + d_phi)
            .clamp(ORBIT_POLAR_EPSILON, PI - ORBIT_POLAR_EPSILON);
        radius = (radius * self.scale).clamp(self.min_distance, self.max_distance);

        let sin_phi = phi.sin();
        let new_eye = self.target
            + Vec3::new(
                radius * sin_phi * theta.sin(),
                radius * phi.cos(),
                radius * sin_phi * theta.cos(),
            );

        if self.enable_damping {
            self.delta_theta *= 1.0 - self.damping_factor;
            self.delta_phi *= 1.0 - self.damping_factor;
        } else {
            self.delta_theta = 0.0;
            self.delta_phi = 0.0;
        }
        self.scale = 1.0;

        let moved = new_eye.distance_squared(*eye) > 1e-12;
        *eye = new_eye;
        moved
    }
}
