//! Browser side of asset loading: HTTP fetches feeding the core decoders.

use showcase_core::{external_buffer_uris, resolve_relative, CubeFaces, LoadError, ModelData};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

pub async fn fetch_bytes(url: &str) -> Result<Vec<u8>, LoadError> {
    let fail = |reason: String| LoadError::Fetch {
        url: url.to_string(),
        reason,
    };
    let window = web::window().ok_or_else(|| fail("no window".into()))?;
    let opts = web::RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(web::RequestMode::Cors);
    let request = web::Request::new_with_str_and_init(url, &opts)
        .map_err(|e| fail(format!("{:?}", e)))?;
    let response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| fail(format!("{:?}", e)))?;
    let response: web::Response = response
        .dyn_into()
        .map_err(|e| fail(format!("not a Response: {:?}", e)))?;
    if !response.ok() {
        return Err(fail(format!("HTTP {}", response.status())));
    }
    let buffer = response
        .array_buffer()
        .map_err(|e| fail(format!("{:?}", e)))?;
    let buffer = JsFuture::from(buffer)
        .await
        .map_err(|e| fail(format!("{:?}", e)))?;
    Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}

/// Fetches a `.gltf`/`.glb` file and any external buffers it references.
pub async fn load_model(url: &str, node: Option<usize>) -> Result<ModelData, LoadError> {
    let bytes = fetch_bytes(url).await?;
    let gltf = gltf::Gltf::from_slice(&bytes)?;
    let uris = external_buffer_uris(&gltf.document);
    if uris.iter().all(Option::is_none) {
        let buffers = gltf::import_buffers(&gltf.document, None, gltf.blob)?;
        return ModelData::from_gltf(&gltf.document, &buffers, node);
    }

    let mut blob = gltf.blob;
    let mut buffers = Vec::with_capacity(uris.len());
    for (buffer, uri) in gltf.document.buffers().zip(uris) {
        let mut data = match (uri, buffer.source()) {
            (Some(uri), _) => fetch_bytes(&resolve_relative(url, &uri)).await?,
            (None, gltf::buffer::Source::Bin) => blob
                .take()
                .ok_or_else(|| LoadError::Parse("missing GLB binary chunk".into()))?,
            (None, gltf::buffer::Source::Uri(_)) => {
                return Err(LoadError::Unsupported(
                    "data URI buffers mixed with external buffers".into(),
                ))
            }
        };
        if data.len() < buffer.length() {
            return Err(LoadError::Parse(format!(
                "buffer {} is {} bytes, expected {}",
                buffer.index(),
                data.len(),
                buffer.length()
            )));
        }
        while data.len() % 4 != 0 {
            data.push(0);
        }
        buffers.push(gltf::buffer::Data(data));
    }
    ModelData::from_gltf(&gltf.document, &buffers, node)
}

pub async fn load_environment(urls: &[String]) -> Result<CubeFaces, LoadError> {
    if urls.len() != 6 {
        return Err(LoadError::Unsupported(format!(
            "cube map needs 6 faces, got {}",
            urls.len()
        )));
    }
    let mut faces: Vec<Vec<u8>> = Vec::with_capacity(6);
    for url in urls {
        faces.push(fetch_bytes(url).await?);
    }
    CubeFaces::decode([
        &faces[0], &faces[1], &faces[2], &faces[3], &faces[4], &faces[5],
    ])
}
