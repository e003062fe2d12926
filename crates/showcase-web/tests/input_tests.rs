// Host-side tests for pure input helpers.
// The web crate is wasm-only, so the module is included directly.

#![allow(dead_code)]
mod input {
    include!("../src/input.rs");
}

use input::*;
use showcase_core::{ControlEvent, LoadProgress, ParamKind, ParamValue, Preset};

#[test]
fn pixel_ratio_is_capped_at_two() {
    assert_eq!(pixel_ratio(1.0), 1.0);
    assert_eq!(pixel_ratio(1.5), 1.5);
    assert_eq!(pixel_ratio(3.0), 2.0);
    assert_eq!(pixel_ratio(0.0), 1.0);
    assert_eq!(pixel_ratio(f64::NAN), 1.0);
}

#[test]
fn backing_size_scales_css_box() {
    assert_eq!(backing_size(800.0, 600.0, 1.0), (800, 600));
    assert_eq!(backing_size(800.0, 600.0, 3.0), (1600, 1200));
    assert_eq!(backing_size(0.0, 0.0, 2.0), (1, 1));
}

#[test]
fn preset_query_reads_named_parameter() {
    assert_eq!(preset_query("?preset=spotlight"), Some("spotlight"));
    assert_eq!(preset_query("?a=1&preset=glass-case&b=2"), Some("glass-case"));
    assert_eq!(preset_query("?preset="), None);
    assert_eq!(preset_query(""), None);
    assert_eq!(preset_query("?presets=recon"), None);
}

#[test]
fn unknown_or_missing_preset_falls_back_to_recon() {
    assert_eq!(preset_from_search(""), Preset::Recon);
    assert_eq!(preset_from_search("?preset=nope"), Preset::Recon);
    assert_eq!(preset_from_search("?preset=environment"), Preset::Environment);
}

#[test]
fn only_h_toggles_the_panel() {
    assert!(is_panel_toggle_key("h"));
    assert!(is_panel_toggle_key("H"));
    assert!(!is_panel_toggle_key("j"));
    assert!(!is_panel_toggle_key("Home"));
}

#[test]
fn cursor_follows_control_events() {
    assert_eq!(cursor_for(ControlEvent::Start), "grab");
    assert_eq!(cursor_for(ControlEvent::End), "default");
}

#[test]
fn progress_css_is_a_percentage() {
    let half = LoadProgress {
        loaded: 1,
        total: 2,
    };
    assert_eq!(progress_css(half), "50%");
    let done = LoadProgress {
        loaded: 3,
        total: 3,
    };
    assert_eq!(progress_css(done), "100%");
}

#[test]
fn panel_inputs_parse_by_kind() {
    let number = ParamKind::Number {
        min: 0.0,
        max: 1.0,
        step: 0.01,
    };
    assert_eq!(
        param_value_from_input(number, "0.25"),
        Some(ParamValue::Number(0.25))
    );
    assert_eq!(param_value_from_input(number, "abc"), None);
    assert_eq!(param_value_from_input(number, "inf"), None);
    assert_eq!(
        param_value_from_input(ParamKind::Color, "#ff0000"),
        Some(ParamValue::Color("#ff0000".into()))
    );
}

#[test]
fn colour_inputs_get_long_hex() {
    assert_eq!(
        param_input_value(&ParamValue::Color("#abc".into())),
        "#aabbcc"
    );
    assert_eq!(param_input_value(&ParamValue::Number(0.5)), "0.5");
}

#[test]
fn narration_mime_follows_the_extension() {
    assert_eq!(audio_mime_type("/audio/narration.wav"), "audio/wav");
    assert_eq!(audio_mime_type("/audio/Intro.MP3?v=2"), "audio/mpeg");
    assert_eq!(audio_mime_type("clip.ogg#t=1"), "audio/ogg");
    assert_eq!(audio_mime_type("/audio/narration"), "application/octet-stream");
}
