use showcase_core::{ControlEvent, LoadProgress, ParamKind, ParamValue, Preset, Rgb};

/// Upper bound on the device pixel ratio used for the canvas backing store.
pub const MAX_PIXEL_RATIO: f64 = 2.0;

#[inline]
pub fn pixel_ratio(device_pixel_ratio: f64) -> f64 {
    if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
        device_pixel_ratio.min(MAX_PIXEL_RATIO)
    } else {
        1.0
    }
}

/// Canvas backing size in device pixels for a CSS box.
#[inline]
pub fn backing_size(css_width: f64, css_height: f64, device_pixel_ratio: f64) -> (u32, u32) {
    let ratio = pixel_ratio(device_pixel_ratio);
    let w = (css_width.max(0.0) * ratio) as u32;
    let h = (css_height.max(0.0) * ratio) as u32;
    (w.max(1), h.max(1))
}

/// Value of `preset=` in a `location.search` string.
pub fn preset_query(search: &str) -> Option<&str> {
    search
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(k, v)| *k == "preset" && !v.is_empty())
        .map(|(_, v)| v)
}

/// Preset requested by the page URL; unknown or missing names fall back to recon.
pub fn preset_from_search(search: &str) -> Preset {
    match preset_query(search) {
        None => Preset::Recon,
        Some(name) => Preset::from_name(name).unwrap_or_else(|e| {
            log::warn!("[preset] {e}; using {}", Preset::Recon.name());
            Preset::Recon
        }),
    }
}

#[inline]
pub fn is_panel_toggle_key(key: &str) -> bool {
    key.eq_ignore_ascii_case("h")
}

#[inline]
pub fn cursor_for(event: ControlEvent) -> &'static str {
    match event {
        ControlEvent::Start => "grab",
        ControlEvent::End => "default",
    }
}

/// CSS value for the `--progress` custom property.
pub fn progress_css(progress: LoadProgress) -> String {
    format!("{:.0}%", progress.percent())
}

/// Parses the raw value of a panel input.
pub fn param_value_from_input(kind: ParamKind, raw: &str) -> Option<ParamValue> {
    match kind {
        ParamKind::Number { .. } => raw
            .trim()
            .parse::<f32>()
            .ok()
            .filter(|v| v.is_finite())
            .map(ParamValue::Number),
        ParamKind::Color => Some(ParamValue::Color(raw.to_string())),
    }
}

/// Initial `value` attribute for a panel input. Colour inputs only accept
/// the long `#rrggbb` form.
pub fn param_input_value(value: &ParamValue) -> String {
    match value {
        ParamValue::Number(v) => v.to_string(),
        ParamValue::Color(hex) => Rgb::from_hex(hex)
            .map(Rgb::to_hex)
            .unwrap_or_else(|_| hex.clone()),
    }
}

/// MIME type for a narration clip, from the URL's extension.
pub fn audio_mime_type(url: &str) -> &'static str {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let ext = path
        .rsplit_once('.')
        .map(|(_, e)| e.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "wav" => "audio/wav",
        "mp3" => "audio/mpeg",
        "ogg" | "oga" => "audio/ogg",
        "m4a" | "aac" => "audio/mp4",
        "webm" => "audio/webm",
        _ => "application/octet-stream",
    }
}
