//! Loads a showcase's assets from a local directory and reports each
//! completion to the viewer.

use crate::wav::{self, Wav};
use showcase_core::{AssetKey, CubeFaces, LoadError, LoadOutcome, ModelData, Viewer};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// What the GPU and audio output still need after the viewer took its share.
#[derive(Default)]
pub struct LoadedAssets {
    pub models: Vec<(AssetKey, ModelData)>,
    pub environment: Option<CubeFaces>,
    pub narration: Option<Wav>,
}

/// Maps a site-absolute asset URL onto `root`.
pub fn asset_path(root: &Path, url: &str) -> PathBuf {
    root.join(url.trim_start_matches('/'))
}

fn read(root: &Path, url: &str) -> Result<Vec<u8>, LoadError> {
    let path = asset_path(root, url);
    std::fs::read(&path).map_err(|e| LoadError::Fetch {
        url: url.to_string(),
        reason: format!("{}: {e}", path.display()),
    })
}

pub fn load_model(root: &Path, url: &str, node: Option<usize>) -> Result<ModelData, LoadError> {
    let path = asset_path(root, url);
    let (document, buffers, _images) = gltf::import(&path).map_err(|e| match e {
        gltf::Error::Io(io) => LoadError::Fetch {
            url: url.to_string(),
            reason: format!("{}: {io}", path.display()),
        },
        other => LoadError::from(other),
    })?;
    ModelData::from_gltf(&document, &buffers, node)
}

pub fn load_environment(root: &Path, urls: &[String]) -> Result<CubeFaces, LoadError> {
    let faces = urls
        .iter()
        .map(|url| read(root, url))
        .collect::<Result<Vec<_>, _>>()?;
    let faces: [Vec<u8>; 6] = faces.try_into().map_err(|v: Vec<Vec<u8>>| {
        LoadError::Unsupported(format!("cube map needs 6 faces, got {}", v.len()))
    })?;
    CubeFaces::decode([
        &faces[0], &faces[1], &faces[2], &faces[3], &faces[4], &faces[5],
    ])
}

pub fn load_narration(root: &Path, url: &str) -> Result<Wav, LoadError> {
    let bytes = read(root, url)?;
    wav::parse(&bytes).map_err(|e| LoadError::Unsupported(e.to_string()))
}

/// Loads every asset the viewer requests, in request order.
pub fn load_all(viewer: &mut Viewer, root: &Path, now: Duration) -> LoadedAssets {
    let mut out = LoadedAssets::default();
    for request in viewer.requests() {
        match request.key {
            AssetKey::Product | AssetKey::Case => {
                let Some(url) = request.urls.first() else {
                    continue;
                };
                let assets = &viewer.config().assets;
                let node = match request.key {
                    AssetKey::Product => assets.product.node,
                    _ => assets.case.as_ref().and_then(|c| c.node),
                };
                let outcome = LoadOutcome::from(load_model(root, url, node));
                if let Some(model) = viewer.on_model_loaded(request.key, url, outcome, now) {
                    out.models.push((request.key, model));
                }
            }
            AssetKey::Environment => {
                let result = load_environment(root, &request.urls).map(|faces| {
                    out.environment = Some(faces);
                });
                for url in &request.urls {
                    viewer.on_asset_loaded(url, result.clone());
                }
            }
            AssetKey::Narration => {
                for url in &request.urls {
                    let result = load_narration(root, url).map(|clip| {
                        out.narration = Some(clip);
                    });
                    viewer.on_asset_loaded(url, result);
                }
            }
        }
    }
    log::info!(
        "[load] settled, {} failure(s)",
        viewer.loads().failed().len()
    );
    out
}
