//! Unit tests for texture.rs
//!
//! Uses a synchronous loader double so event ordering is deterministic.

use std::path::PathBuf;
use std::time::{Duration, Instant};
use crate::error::Error;
use crate::resource::material::{MaterialDesc, ShadingModel, TextureChannel};
use crate::resource::texture::*;
use crate::scene::Scene;

// ============================================================================
// TEST HELPERS
// ============================================================================

/// Answers every request immediately; paths containing "missing" fail
#[derive(Default)]
struct ImmediateLoader {
    requests: Vec<PathBuf>,
}

impl TextureLoader for ImmediateLoader {
    fn request(&mut self, request: TextureRequest, sender: TextureEventSender) {
        self.requests.push(request.path.clone());
        let event = if request.path.to_string_lossy().contains("missing") {
            TextureEvent::Failed {
                reason: Error::ResourceLoad(format!("{}: not found", request.path.display())),
                path: request.path,
            }
        } else {
            TextureEvent::Loaded {
                texture: TextureHandle::new(request.path.clone(), TextureData::solid([255, 0, 0, 255])),
                path: request.path,
            }
        };
        sender.send(event).unwrap();
    }
}

/// Accepts requests and never answers
#[derive(Default)]
struct SilentLoader {
    count: usize,
}

impl TextureLoader for SilentLoader {
    fn request(&mut self, _request: TextureRequest, _sender: TextureEventSender) {
        self.count += 1;
    }
}

fn scene_with_phong() -> (Scene, crate::resource::MaterialKey) {
    let mut scene = Scene::new();
    let key = scene.add_material(MaterialDesc::new("core", ShadingModel::Phong)).unwrap();
    (scene, key)
}

// ============================================================================
// TEXTURE DATA / HANDLE
// ============================================================================

#[test]
fn test_texture_data_validates_size() {
    assert!(TextureData::from_rgba8(2, 2, vec![0; 16]).is_ok());
    assert!(matches!(TextureData::from_rgba8(2, 2, vec![0; 15]), Err(Error::InvalidResource(_))));
    assert!(matches!(TextureData::from_rgba8(0, 2, vec![]), Err(Error::InvalidResource(_))));
}

#[test]
fn test_handles_compare_by_identity() {
    let a = TextureHandle::new("a.png", TextureData::solid([0, 0, 0, 255]));
    let b = TextureHandle::new("a.png", TextureData::solid([0, 0, 0, 255]));
    assert_eq!(a, a.clone());
    assert_ne!(a, b);
    assert_ne!(a.id(), b.id());
    assert_eq!(a.path(), std::path::Path::new("a.png"));
    assert_eq!(a.data().pixels(), &[0, 0, 0, 255]);
}

// ============================================================================
// BINDINGS
// ============================================================================

#[test]
fn test_requests_each_file_once() {
    let (_scene, key) = scene_with_phong();
    let mut bindings = TextureBindings::new();
    bindings.bind("earth.jpg", key, TextureChannel::Map);
    bindings.bind("earth.jpg", key, TextureChannel::SpecularMap);
    bindings.bind("bump.jpg", key, TextureChannel::BumpMap);

    let mut loader = SilentLoader::default();
    assert_eq!(bindings.request_all(&mut loader), 2);
    assert_eq!(bindings.request_all(&mut loader), 0);
    assert_eq!(loader.count, 2);
    assert_eq!(bindings.pending_count(), 2);
}

#[test]
fn test_material_is_untextured_until_event_is_applied() {
    let (mut scene, key) = scene_with_phong();
    let mut bindings = TextureBindings::new();
    bindings.bind("earth.jpg", key, TextureChannel::Map);
    bindings.request_all(&mut ImmediateLoader::default());

    assert!(scene.material(key).unwrap().texture(TextureChannel::Map).is_none());

    let update = bindings.apply_events(&mut scene);
    assert_eq!(update, TextureUpdate { bound: 1, failed: 0 });
    let texture = scene.material(key).unwrap().texture(TextureChannel::Map).unwrap();
    assert_eq!(texture.path(), std::path::Path::new("earth.jpg"));
    assert_eq!(bindings.pending_count(), 0);
}

#[test]
fn test_one_file_binds_every_waiting_channel() {
    let (mut scene, key) = scene_with_phong();
    let mut bindings = TextureBindings::new();
    bindings.bind("earth.jpg", key, TextureChannel::Map);
    bindings.bind("earth.jpg", key, TextureChannel::SpecularMap);
    bindings.request_all(&mut ImmediateLoader::default());

    assert_eq!(bindings.apply_events(&mut scene).bound, 2);
    let material = scene.material(key).unwrap();
    assert!(material.texture(TextureChannel::Map).is_some());
    assert!(material.texture(TextureChannel::SpecularMap).is_some());
}

#[test]
fn test_failed_load_keeps_fallback() {
    let (mut scene, key) = scene_with_phong();
    let mut bindings = TextureBindings::new();
    bindings.bind("missing/clouds.png", key, TextureChannel::AlphaMap);
    bindings.bind("earth.jpg", key, TextureChannel::Map);
    bindings.request_all(&mut ImmediateLoader::default());

    let update = bindings.apply_events(&mut scene);
    assert_eq!(update, TextureUpdate { bound: 1, failed: 1 });
    assert_eq!(bindings.failed(), &[PathBuf::from("missing/clouds.png")]);
    let material = scene.material(key).unwrap();
    assert!(material.texture(TextureChannel::AlphaMap).is_none());
    assert!(material.is_complete());
}

#[test]
fn test_apply_events_without_events_is_noop() {
    let (mut scene, _key) = scene_with_phong();
    let mut bindings = TextureBindings::new();
    assert_eq!(bindings.apply_events(&mut scene), TextureUpdate::default());
}

#[test]
fn test_unrequested_event_is_ignored() {
    let (mut scene, _key) = scene_with_phong();
    let mut bindings = TextureBindings::new();
    bindings.sender().send(TextureEvent::Loaded {
        path: PathBuf::from("stray.png"),
        texture: TextureHandle::new("stray.png", TextureData::solid([1, 2, 3, 4])),
    }).unwrap();
    assert_eq!(bindings.apply_events(&mut scene).bound, 0);
}

// ============================================================================
// THREADED LOADER
// ============================================================================

#[test]
fn test_decode_file_reads_png() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tiny.png");
    image::RgbaImage::from_pixel(3, 2, image::Rgba([9, 8, 7, 255])).save(&path).unwrap();

    let data = ThreadedTextureLoader::decode_file(&path).unwrap();
    assert_eq!((data.width(), data.height()), (3, 2));
    assert_eq!(&data.pixels()[..4], &[9, 8, 7, 255]);
}

#[test]
fn test_decode_missing_file_is_resource_load_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = ThreadedTextureLoader::decode_file(&dir.path().join("absent.png"));
    assert!(matches!(result, Err(Error::ResourceLoad(_))));
}

#[test]
fn test_threaded_loader_reports_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sky.png");
    image::RgbaImage::from_pixel(2, 2, image::Rgba([0, 0, 40, 255])).save(&path).unwrap();

    let (mut scene, key) = scene_with_phong();
    let mut bindings = TextureBindings::new();
    bindings.bind(path.clone(), key, TextureChannel::Map);
    bindings.request_all(&mut ThreadedTextureLoader::new());

    let deadline = Instant::now() + Duration::from_secs(10);
    let mut bound = 0;
    while bound == 0 && Instant::now() < deadline {
        bound += bindings.apply_events(&mut scene).bound;
        std::thread::sleep(Duration::from_millis(5));
    }
    assert_eq!(bound, 1);
    assert!(scene.material(key).unwrap().texture(TextureChannel::Map).is_some());
}
