//! Unit tests for material.rs

use glam::Vec3;
use crate::error::Error;
use crate::resource::material::*;
use crate::resource::texture::{TextureData, TextureHandle};
use crate::shader::glow_program;

// ============================================================================
// RENDER STATE
// ============================================================================

#[test]
fn test_render_state_presets() {
    assert!(!RenderState::opaque().contains(RenderState::TRANSPARENT));
    assert!(RenderState::opaque().contains(RenderState::DEPTH_WRITE));

    assert!(RenderState::translucent().contains(RenderState::TRANSPARENT));
    assert!(!RenderState::translucent().contains(RenderState::ADDITIVE_BLEND));

    let additive = RenderState::additive();
    assert!(additive.contains(RenderState::TRANSPARENT | RenderState::ADDITIVE_BLEND));
    assert!(!additive.contains(RenderState::DEPTH_WRITE));
}

#[test]
fn test_texture_channel_param_names() {
    assert_eq!(TextureChannel::Map.param_name(), "map");
    assert_eq!(TextureChannel::BumpMap.param_name(), "bumpMap");
    assert_eq!(TextureChannel::SpecularMap.param_name(), "specularMap");
    assert_eq!(TextureChannel::AlphaMap.param_name(), "alphaMap");
}

// ============================================================================
// CREATION
// ============================================================================

#[test]
fn test_phong_missing_params_get_defaults() {
    let material = Material::from_desc(
        MaterialDesc::new("core", ShadingModel::Phong)
            .with_param("color", ParamValue::Color(Vec3::new(0.2, 0.4, 0.8))),
    )
    .unwrap();

    assert!(material.is_complete());
    assert_eq!(material.vec3("color"), Some(Vec3::new(0.2, 0.4, 0.8)));
    assert!(material.vec3("specular").is_some());
    assert!(material.float("shininess").is_some());
    assert!(material.float("bumpScale").is_some());
    assert_eq!(material.param_count(), 4);
}

#[test]
fn test_basic_material_defaults_to_white() {
    let material = Material::from_desc(MaterialDesc::new("star", ShadingModel::Basic)).unwrap();
    assert_eq!(material.vec3("color"), Some(Vec3::ONE));
    assert_eq!(material.shading().name(), "basic");
    assert_eq!(material.side(), Side::Front);
    assert!(!material.is_transparent());
}

#[test]
fn test_shader_material_takes_uniform_defaults() {
    let program = glow_program(Vec3::new(0.0, 0.7, 1.0), 1.0, 6.0).unwrap();
    let material = Material::from_desc(MaterialDesc::new("glow", ShadingModel::Shader(program))).unwrap();

    assert!(material.is_complete());
    assert_eq!(material.float("p"), Some(6.0));
    assert_eq!(material.float("c"), Some(1.0));
    assert_eq!(material.vec3("glowColor"), Some(Vec3::new(0.0, 0.7, 1.0)));
    assert!(material.vec3("viewVector").is_some());
}

#[test]
fn test_rejects_duplicate_param() {
    let result = Material::from_desc(
        MaterialDesc::new("dup", ShadingModel::Basic)
            .with_param("color", ParamValue::Color(Vec3::ONE))
            .with_param("color", ParamValue::Color(Vec3::ZERO)),
    );
    assert!(matches!(result, Err(Error::InvalidResource(_))));
}

#[test]
fn test_rejects_opacity_out_of_range() {
    let result = Material::from_desc(MaterialDesc::new("x", ShadingModel::Basic).with_opacity(1.5));
    assert!(matches!(result, Err(Error::InvalidResource(_))));
}

#[test]
fn test_set_param_replaces_in_place() {
    let mut material = Material::from_desc(MaterialDesc::new("star", ShadingModel::Basic)).unwrap();
    assert_eq!(material.resolve_defaults(), 0);

    material.set_param("color", ParamValue::Float(1.0));
    assert!(material.vec3("color").is_none());
    assert!(material.is_complete());
}

// ============================================================================
// TEXTURES
// ============================================================================

#[test]
fn test_absent_texture_channel_is_untextured() {
    let material = Material::from_desc(MaterialDesc::new("core", ShadingModel::Phong)).unwrap();
    assert!(material.texture(TextureChannel::Map).is_none());
    assert!(material.texture(TextureChannel::BumpMap).is_none());
}

#[test]
fn test_bind_and_clear_texture() {
    let mut material = Material::from_desc(MaterialDesc::new("core", ShadingModel::Phong)).unwrap();
    let handle = TextureHandle::new("earth.jpg", TextureData::solid([10, 20, 30, 255]));

    material.bind_texture(TextureChannel::Map, handle.clone());
    assert_eq!(material.texture(TextureChannel::Map), Some(&handle));
    assert!(material.texture(TextureChannel::SpecularMap).is_none());

    assert!(material.clear_texture(TextureChannel::Map));
    assert!(!material.clear_texture(TextureChannel::Map));
    assert!(material.texture(TextureChannel::Map).is_none());
}

#[test]
fn test_set_opacity_clamps() {
    let mut material = Material::from_desc(
        MaterialDesc::new("clouds", ShadingModel::Phong).with_state(RenderState::translucent()),
    )
    .unwrap();
    material.set_opacity(2.0);
    assert_eq!(material.opacity(), 1.0);
    material.set_opacity(-1.0);
    assert_eq!(material.opacity(), 0.0);
    assert!(material.is_transparent());
}
