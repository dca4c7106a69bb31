//! Unit tests for context.rs

use glam::Vec3;
use crate::config::SceneConfig;
use crate::context::RenderContext;
use crate::error::Error;
use crate::renderer::{MockRenderer, MockRendererHandle};
use crate::scene::SceneBuilder;
use crate::shader::GlowUniforms;

fn context_with(config: &SceneConfig) -> (RenderContext, MockRendererHandle) {
    let renderer = MockRenderer::new();
    let handle = renderer.handle();
    let built = SceneBuilder::new(config).build().unwrap();
    (RenderContext::new(built, config, Box::new(renderer)).unwrap(), handle)
}

fn small_config() -> SceneConfig {
    let mut config = SceneConfig::default();
    config.stars.count = 5;
    config
}

#[test]
fn test_new_sizes_camera_and_renderer() {
    let mut config = small_config();
    config.viewport.device_pixel_ratio = 3.0;
    let (context, handle) = context_with(&config);

    assert_eq!(context.camera.aspect(), 800.0 / 600.0);
    assert_eq!(context.controls.target(), Vec3::ZERO);
    let size = handle.last_output_size().unwrap();
    assert_eq!((size.width, size.height), (1600, 1200));
}

#[test]
fn test_new_rejects_bad_viewport() {
    let mut config = small_config();
    config.viewport.height = 0.0;
    let built = SceneBuilder::new(&config).build().unwrap();
    let result = RenderContext::new(built, &config, Box::new(MockRenderer::new()));
    assert!(matches!(result, Err(Error::InvalidViewport(_))));
}

#[test]
fn test_resize_keeps_aspect_in_step() {
    let (mut context, handle) = context_with(&small_config());
    for (w, h) in [(1920.0, 1080.0), (300.0, 900.0), (1.0, 1.0)] {
        context.resize(w, h, 1.0).unwrap();
        assert_eq!(context.camera.aspect(), w / h);
        assert_eq!(context.viewport.aspect(), w / h);
    }
    assert_eq!(handle.lock().output_sizes.len(), 4);
}

#[test]
fn test_rejected_resize_changes_nothing() {
    let (mut context, handle) = context_with(&small_config());
    let aspect = context.camera.aspect();
    assert!(context.resize(-1.0, 600.0, 1.0).is_err());
    assert_eq!(context.camera.aspect(), aspect);
    assert_eq!(context.viewport.width(), 800.0);
    assert_eq!(handle.lock().output_sizes.len(), 1);
}

#[test]
fn test_glow_view_vector_follows_camera() {
    let (mut context, _handle) = context_with(&small_config());
    assert_eq!(context.update_glow_view_vector().unwrap(), Vec3::new(0.0, 0.0, 10.0));

    context.camera.set_position(Vec3::new(3.0, 4.0, 0.0));
    let view = context.update_glow_view_vector().unwrap();
    assert_eq!(view, Vec3::new(3.0, 4.0, 0.0));

    let material = context.scene.material(context.materials.glow).unwrap();
    assert_eq!(GlowUniforms::from_material(material).unwrap().view_vector(), view);
}

#[test]
fn test_glow_view_vector_tracks_moved_planet() {
    let (mut context, _handle) = context_with(&small_config());
    let group = context.nodes.planet_group;
    context.scene.transform_mut(group).unwrap().position = Vec3::new(0.0, 2.0, 0.0);
    assert_eq!(context.update_glow_view_vector().unwrap(), Vec3::new(0.0, -2.0, 10.0));
}

#[test]
fn test_missing_glow_node_is_an_error() {
    let (mut context, _handle) = context_with(&small_config());
    let glow = context.nodes.glow;
    context.scene.remove_node(glow).unwrap();
    assert!(matches!(context.update_glow_view_vector(), Err(Error::InvalidResource(_))));
}

#[test]
fn test_camera_anchor_sync_and_submit() {
    let (mut context, handle) = context_with(&small_config());
    context.camera.set_position(Vec3::new(1.0, 2.0, 3.0));
    context.sync_camera_anchor();
    let anchor = context.nodes.camera_anchor;
    assert_eq!(context.scene.transform(anchor).unwrap().position, Vec3::new(1.0, 2.0, 3.0));

    context.submit(42).unwrap();
    let frame = handle.last_frame().unwrap();
    assert_eq!(frame.frame_index, 42);
    assert_eq!(frame.camera.position, Vec3::new(1.0, 2.0, 3.0));
    assert!(frame.glow.is_some());
    assert_eq!(frame.draw_count(), 5 + 5);
}
