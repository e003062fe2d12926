// Host-side tests for uniform packing; no GPU needed.

use showcase_core::{ParamKey, ParamValue, Preset, Viewer};
use showcase_render::{
    clear_color, linear_rgb, pedestal_color, srgb_to_linear, ObjectUniforms, SceneUniforms,
    SkyUniforms,
};
use std::time::Duration;

#[test]
fn uniform_blocks_match_wgsl_sizes() {
    // WGSL: mat4 + 4 vec4 + 4 * (2 vec4) + 5 vec4
    assert_eq!(std::mem::size_of::<SceneUniforms>(), 336);
    assert_eq!(std::mem::size_of::<ObjectUniforms>(), 144);
    assert_eq!(std::mem::size_of::<SkyUniforms>(), 80);
}

#[test]
fn srgb_conversion_endpoints() {
    assert_eq!(srgb_to_linear(0.0), 0.0);
    assert!((srgb_to_linear(1.0) - 1.0).abs() < 1e-6);
    assert!((srgb_to_linear(0.5) - 0.214).abs() < 1e-3);
}

#[test]
fn recon_packs_two_point_lights_and_no_spot() {
    let mut viewer = Viewer::new(Preset::Recon.config(), 800, 600);
    let frame = viewer.frame(Duration::from_millis(16));
    let u = SceneUniforms::from_snapshot(&frame);
    assert_eq!(u.params[2], 2.0);
    assert_eq!(u.points[0].position, [2.0, 3.0, 0.0, 1.0]);
    assert_eq!(u.points[1].position, [-2.0, 3.0, 0.0, 1.0]);
    // White light, intensity 3.
    assert!((u.points[0].color[0] - 3.0).abs() < 1e-5);
    assert_eq!(u.spot_color[3], 0.0);
    assert_eq!(u.dir_color[3], 0.0);
    assert_eq!(u.params[0], 1.0);
    assert_eq!(u.params[1], 20.0);
}

#[test]
fn spotlight_cone_is_encoded_as_cosines() {
    let mut viewer = Viewer::new(Preset::Spotlight.config(), 800, 600);
    let frame = viewer.frame(Duration::from_millis(16));
    let spot = frame.spot.clone().unwrap();
    let u = SceneUniforms::from_snapshot(&frame);
    assert_eq!(u.spot_color[3], 1.0);
    assert!((u.spot_position[3] - spot.angle.cos()).abs() < 1e-6);
    // Inner cone is narrower, so its cosine is larger.
    assert!(u.spot_direction[3] > u.spot_position[3]);
}

#[test]
fn fog_and_pedestal_colours_follow_params() {
    let mut viewer = Viewer::new(Preset::Recon.config(), 800, 600);
    viewer
        .set_param(ParamKey::FogColor, ParamValue::Color("#ffffff".into()))
        .unwrap();
    viewer
        .set_param(ParamKey::PedestalColor, ParamValue::Color("#000000".into()))
        .unwrap();
    let frame = viewer.frame(Duration::from_millis(16));
    assert!(clear_color(&frame)
        .iter()
        .all(|c| (c - 1.0).abs() < 1e-5));
    assert_eq!(pedestal_color(&frame), [0.0, 0.0, 0.0, 1.0]);
    let u = SceneUniforms::from_snapshot(&frame);
    assert_eq!(&u.fog_color[..3], &linear_rgb(frame.fog.color));
}

#[test]
fn object_normal_matrix_undoes_non_uniform_scale() {
    let model = glam::Mat4::from_scale(glam::Vec3::new(2.0, 1.0, 1.0));
    let u = ObjectUniforms::new(model, [1.0; 4]);
    assert!((u.normal[0][0] - 0.5).abs() < 1e-6);
    assert_eq!(u.model[0][0], 2.0);
}

#[test]
fn sky_ignores_camera_translation() {
    let mut viewer = Viewer::new(Preset::Environment.config(), 800, 600);
    let a = SkyUniforms::from_snapshot(&viewer.frame(Duration::from_millis(16)));
    let mut frame = viewer.frame(Duration::from_millis(32));
    frame.view = frame.view * glam::Mat4::from_translation(glam::Vec3::new(0.0, 0.0, -5.0));
    let b = SkyUniforms::from_snapshot(&frame);
    for (ca, cb) in a.inv_view_proj.iter().zip(b.inv_view_proj.iter()) {
        for (x, y) in ca.iter().zip(cb.iter()) {
            assert!((x - y).abs() < 1e-3);
        }
    }
}
