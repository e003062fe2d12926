use showcase_core::{AssetKey, LoadError, ModelAsset, Preset, ShowcaseConfig, Viewer};
use showcase_native::assets::{asset_path, load_all};
use showcase_native::sim;
use std::path::Path;
use std::time::Duration;

const TRIANGLE_GLTF: &str = r#"{
  "asset": { "version": "2.0" },
  "scene": 0,
  "scenes": [ { "nodes": [0] } ],
  "nodes": [
    { "children": [1] },
    { "name": "tri", "mesh": 0 }
  ],
  "meshes": [ { "primitives": [ { "attributes": { "POSITION": 0 } } ] } ],
  "accessors": [ {
    "bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3",
    "min": [0.0, 0.0, 0.0], "max": [1.0, 1.0, 0.0]
  } ],
  "bufferViews": [ { "buffer": 0, "byteLength": 36 } ],
  "buffers": [ {
    "byteLength": 36,
    "uri": "data:application/octet-stream;base64,AAAAAAAAAAAAAAAAAACAPwAAAAAAAAAAAAAAAAAAgD8AAAAA"
  } ]
}"#;

fn mono_wav(samples: &[i16]) -> Vec<u8> {
    let data: Vec<u8> = samples.iter().flat_map(|s| s.to_le_bytes()).collect();
    let mut out = b"RIFF".to_vec();
    out.extend_from_slice(&(36 + data.len() as u32).to_le_bytes());
    out.extend_from_slice(b"WAVEfmt ");
    out.extend_from_slice(&16u32.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&8_000u32.to_le_bytes());
    out.extend_from_slice(&16_000u32.to_le_bytes());
    out.extend_from_slice(&2u16.to_le_bytes());
    out.extend_from_slice(&16u16.to_le_bytes());
    out.extend_from_slice(b"data");
    out.extend_from_slice(&(data.len() as u32).to_le_bytes());
    out.extend_from_slice(&data);
    out
}

fn site(root: &Path) -> ShowcaseConfig {
    std::fs::create_dir_all(root.join("models")).unwrap();
    std::fs::create_dir_all(root.join("audio")).unwrap();
    std::fs::write(root.join("models/tri.gltf"), TRIANGLE_GLTF).unwrap();
    std::fs::write(root.join("audio/intro.wav"), mono_wav(&[0, 1000, -1000])).unwrap();

    let mut config = Preset::Recon.config();
    config.assets.product = ModelAsset {
        url: "/models/tri.gltf".into(),
        scale: 0.1,
        node: Some(0),
    };
    config.assets.narration = Some("/audio/intro.wav".into());
    config
}

#[test]
fn asset_urls_resolve_under_root() {
    let root = Path::new("public");
    assert_eq!(
        asset_path(root, "/models/recon/scene.gltf"),
        root.join("models/recon/scene.gltf")
    );
    assert_eq!(asset_path(root, "a.wav"), root.join("a.wav"));
}

#[test]
fn loads_product_and_narration_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let mut viewer = Viewer::new(site(dir.path()), 800, 600);
    let loaded = load_all(&mut viewer, dir.path(), Duration::ZERO);

    assert!(viewer.is_ready());
    assert!(viewer.loads().all_loaded());
    assert_eq!(viewer.progress().loaded, 2);
    assert_eq!(loaded.models.len(), 1);
    assert_eq!(loaded.models[0].0, AssetKey::Product);
    assert_eq!(loaded.models[0].1.triangle_count(), 1);
    let clip = loaded.narration.unwrap();
    assert_eq!(clip.samples, vec![0, 1000, -1000]);
    assert!(loaded.environment.is_none());
}

#[test]
fn missing_files_are_reported_as_fetch_failures() {
    let dir = tempfile::tempdir().unwrap();
    let mut viewer = Viewer::new(Preset::Recon.config(), 800, 600);
    let loaded = load_all(&mut viewer, dir.path(), Duration::ZERO);

    assert!(!viewer.is_ready());
    assert!(viewer.loads().is_settled());
    assert!(loaded.models.is_empty());
    let failed = viewer.loads().failed();
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].0, "/models/recon/scene.gltf");
    assert!(matches!(failed[0].1, LoadError::Fetch { .. }));
}

#[test]
fn simulation_spins_the_loaded_product() {
    let dir = tempfile::tempdir().unwrap();
    let mut viewer = Viewer::new(site(dir.path()), 800, 600);
    load_all(&mut viewer, dir.path(), Duration::ZERO);

    let sink = sim::simulate(&mut viewer, Duration::ZERO, 30);
    let last = sink.last.unwrap();
    assert_eq!(last.index, 30);
    assert!(!last.controlled);
    // 30 idle frames of 0.01 rad about Z on a 0.1-scaled product.
    let product = last.product.unwrap();
    let x_axis = product.x_axis.truncate() / 0.1;
    assert!((x_axis.x - 0.3f32.cos()).abs() < 1e-4);
    assert!((x_axis.y - 0.3f32.sin()).abs() < 1e-4);
}
