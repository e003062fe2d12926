// Host-side tests for load tracking and model extraction.

use showcase_core::{
    cylinder_mesh, external_buffer_uris, resolve_relative, AssetKey, AssetRequest, CubeFaces,
    LoadError, LoadTracker, ModelData, Preset,
};

#[test]
fn manifest_lists_product_first() {
    let reqs = AssetRequest::from_manifest(&Preset::Environment.config().assets);
    assert_eq!(reqs[0].key, AssetKey::Product);
    let env = reqs
        .iter()
        .find(|r| r.key == AssetKey::Environment)
        .unwrap();
    assert_eq!(env.urls.len(), 6);
    assert!(reqs.iter().any(|r| r.key == AssetKey::Narration));
}

#[test]
fn progress_counts_each_url() {
    let reqs = AssetRequest::from_manifest(&Preset::Environment.config().assets);
    let mut tracker = LoadTracker::new(&reqs);
    let total = tracker.progress().total;
    assert_eq!(total, 1 + 1 + 6 + 1);

    let first = reqs[0].urls[0].clone();
    let p = tracker.item_loaded(&first);
    assert_eq!(p.loaded, 1);
    // Repeats and strangers do not move the counter.
    assert_eq!(tracker.item_loaded(&first).loaded, 1);
    assert_eq!(tracker.item_loaded("/elsewhere.gltf").loaded, 1);
    assert!(!tracker.is_settled());
}

#[test]
fn failures_settle_but_are_not_success() {
    let reqs = AssetRequest::from_manifest(&Preset::Recon.config().assets);
    let mut tracker = LoadTracker::new(&reqs);
    let url = reqs[0].urls[0].clone();
    let err = LoadError::Fetch {
        url: url.clone(),
        reason: "404".into(),
    };
    let p = tracker.item_failed(&url, err.clone());
    assert!((p.percent() - 100.0).abs() < 1e-4);
    assert!(tracker.is_settled());
    assert!(!tracker.all_loaded());
    assert_eq!(tracker.failed(), vec![(url.as_str(), &err)]);
}

#[test]
fn empty_tracker_is_complete() {
    let tracker = LoadTracker::new(&[]);
    assert!((tracker.progress().fraction() - 1.0).abs() < 1e-6);
    assert!(tracker.is_settled());
}

#[test]
fn relative_uris_resolve_against_the_document() {
    assert_eq!(
        resolve_relative("/models/recon/scene.gltf", "scene.bin"),
        "/models/recon/scene.bin"
    );
    assert_eq!(resolve_relative("/a/b.gltf", "/abs.bin"), "/abs.bin");
    assert_eq!(
        resolve_relative("/a/b.gltf", "https://cdn/x.bin"),
        "https://cdn/x.bin"
    );
    assert_eq!(resolve_relative("b.gltf", "c.bin"), "c.bin");
}

// One triangle with an embedded base64 buffer: 3 f32x3 positions, no normals.
const TRIANGLE_GLTF: &str = r#"{
  "asset": { "version": "2.0" },
  "scene": 0,
  "scenes": [ { "nodes": [0] } ],
  "nodes": [
    { "name": "scan", "children": [1], "scale": [2.0, 2.0, 2.0] },
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

#[test]
fn gltf_root_node_is_extracted_with_its_subtree() {
    let (doc, buffers, _) = gltf::import_slice(TRIANGLE_GLTF.as_bytes()).unwrap();
    assert_eq!(external_buffer_uris(&doc), vec![None]);
    let model = ModelData::from_gltf(&doc, &buffers, Some(0)).unwrap();
    assert_eq!(model.name.as_deref(), Some("scan"));
    assert_eq!(model.triangle_count(), 1);
    let (lo, hi) = model.bounds().unwrap();
    assert_eq!(lo.to_array(), [0.0, 0.0, 0.0]);
    assert_eq!(hi.to_array(), [2.0, 2.0, 0.0]);
    // Generated normal faces +Z for a counter-clockwise triangle.
    let n = model.meshes[0].vertices[0].normal;
    assert!((n[2] - 1.0).abs() < 1e-5);
}

#[test]
fn missing_node_is_reported() {
    let (doc, buffers, _) = gltf::import_slice(TRIANGLE_GLTF.as_bytes()).unwrap();
    assert_eq!(
        ModelData::from_gltf(&doc, &buffers, Some(3)),
        Err(LoadError::MissingNode(3))
    );
}

// Two childless roots sharing the triangle mesh; the second sits at x = 5.
const TWO_ROOTS_GLTF: &str = r#"{
  "asset": { "version": "2.0" },
  "scene": 0,
  "scenes": [ { "nodes": [0, 1] } ],
  "nodes": [
    { "name": "left", "mesh": 0 },
    { "name": "right", "mesh": 0, "translation": [5.0, 0.0, 0.0] }
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

#[test]
fn node_index_selects_among_scene_roots() {
    let (doc, buffers, _) = gltf::import_slice(TWO_ROOTS_GLTF.as_bytes()).unwrap();

    let left = ModelData::from_gltf(&doc, &buffers, Some(0)).unwrap();
    assert_eq!(left.name.as_deref(), Some("left"));
    assert_eq!(left.bounds().unwrap().1.x, 1.0);

    let right = ModelData::from_gltf(&doc, &buffers, Some(1)).unwrap();
    assert_eq!(right.name.as_deref(), Some("right"));
    let (lo, hi) = right.bounds().unwrap();
    assert_eq!((lo.x, hi.x), (5.0, 6.0));

    assert_eq!(ModelData::from_gltf(&doc, &buffers, None).unwrap().meshes.len(), 2);
    assert_eq!(
        ModelData::from_gltf(&doc, &buffers, Some(2)),
        Err(LoadError::MissingNode(2))
    );
}

// NORMAL accessor is one entry short of POSITION.
const SHORT_NORMALS_GLTF: &str = r#"{
  "asset": { "version": "2.0" },
  "scene": 0,
  "scenes": [ { "nodes": [0] } ],
  "nodes": [ { "mesh": 0 } ],
  "meshes": [ { "primitives": [ { "attributes": { "POSITION": 0, "NORMAL": 1 } } ] } ],
  "accessors": [
    {
      "bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3",
      "min": [0.0, 0.0, 0.0], "max": [1.0, 1.0, 0.0]
    },
    { "bufferView": 0, "componentType": 5126, "count": 2, "type": "VEC3" }
  ],
  "bufferViews": [ { "buffer": 0, "byteLength": 36 } ],
  "buffers": [ {
    "byteLength": 36,
    "uri": "data:application/octet-stream;base64,AAAAAAAAAAAAAAAAAACAPwAAAAAAAAAAAAAAAAAAgD8AAAAA"
  } ]
}"#;

#[test]
fn short_normal_accessor_is_a_parse_error() {
    let (doc, buffers, _) = gltf::import_slice(SHORT_NORMALS_GLTF.as_bytes()).unwrap();
    assert!(matches!(
        ModelData::from_gltf(&doc, &buffers, None),
        Err(LoadError::Parse(_))
    ));
}

#[test]
fn cylinder_is_closed_and_sized() {
    let mesh = cylinder_mesh(3.0, 0.2, 50, [1.0; 4]);
    // 50 side quads + 2 caps of 50 triangles.
    assert_eq!(mesh.indices.len() / 3, 50 * 2 + 50 * 2);
    let (lo, hi) = mesh.bounds().unwrap();
    assert!((hi.y - 0.1).abs() < 1e-6 && (lo.y + 0.1).abs() < 1e-6);
    assert!((hi.x - 3.0).abs() < 1e-3 && (lo.x + 3.0).abs() < 1e-3);
    assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertices.len()));
}

#[test]
fn cube_faces_reject_garbage() {
    let junk: &[u8] = b"not an image";
    assert!(matches!(
        CubeFaces::decode([junk; 6]),
        Err(LoadError::Image(_))
    ));
}

#[test]
fn cube_faces_decode_png() {
    let img = image::RgbaImage::from_pixel(2, 2, image::Rgba([10, 20, 30, 255]));
    let mut png = Vec::new();
    img.write_to(
        &mut std::io::Cursor::new(&mut png),
        image::ImageOutputFormat::Png,
    )
    .unwrap();
    let faces = CubeFaces::decode([png.as_slice(); 6]).unwrap();
    assert_eq!(faces.size, 2);
    assert_eq!(faces.faces[5].len(), 2 * 2 * 4);
    assert_eq!(&faces.faces[0][..4], &[10, 20, 30, 255]);
}
