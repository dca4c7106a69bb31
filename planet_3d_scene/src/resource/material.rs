/// Resource-level material type.
///
/// A Material is a pure data description of a surface: a shading model,
/// render state (side, blending, transparency) and named parameters.
///
/// Architecture:
/// - Shading model: Phong (diffuse+specular+bump), Basic (unlit) or a custom
///   shader program with declared uniforms
/// - Parameters: named colors, scalars, vectors and texture handles
/// - Texture channels are optional; an absent channel renders as solid color

use bitflags::bitflags;
use glam::Vec3;
use rustc_hash::FxHashMap;
use slotmap::new_key_type;
use crate::error::Result;
use crate::engine_bail;
use crate::resource::texture::TextureHandle;
use crate::shader::{ShaderProgram, UniformValue};

new_key_type! {
    /// Stable key for a material stored in a Scene.
    pub struct MaterialKey;
}

// ===== PARAMETER VALUES =====

/// A typed material parameter
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Float(f32),
    Color(Vec3),
    Vec3(Vec3),
    Texture(TextureHandle),
}

impl ParamValue {
    pub fn as_float(&self) -> Option<f32> {
        match self {
            ParamValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Color or vector payload
    pub fn as_vec3(&self) -> Option<Vec3> {
        match self {
            ParamValue::Color(v) | ParamValue::Vec3(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_texture(&self) -> Option<&TextureHandle> {
        match self {
            ParamValue::Texture(t) => Some(t),
            _ => None,
        }
    }
}

impl From<UniformValue> for ParamValue {
    fn from(value: UniformValue) -> Self {
        match value {
            UniformValue::Float(v) => ParamValue::Float(v),
            UniformValue::Vec3(v) => ParamValue::Vec3(v),
            UniformValue::Color(v) => ParamValue::Color(v),
        }
    }
}

// ===== RENDER STATE =====

bitflags! {
    /// Blending and depth flags consumed by the drawing backend
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct RenderState: u32 {
        /// Drawn in the transparent pass, back to front
        const TRANSPARENT    = 1 << 0;
        /// Writes to the depth buffer
        const DEPTH_WRITE    = 1 << 1;
        /// Tested against the depth buffer
        const DEPTH_TEST     = 1 << 2;
        /// Colors accumulate instead of overwrite
        const ADDITIVE_BLEND = 1 << 3;
    }
}

impl RenderState {
    /// Depth-tested, depth-writing, opaque
    pub fn opaque() -> Self {
        RenderState::DEPTH_TEST | RenderState::DEPTH_WRITE
    }

    /// Depth-tested, alpha-blended
    pub fn translucent() -> Self {
        RenderState::DEPTH_TEST | RenderState::DEPTH_WRITE | RenderState::TRANSPARENT
    }

    /// Depth-tested, additive, never writes depth
    pub fn additive() -> Self {
        RenderState::DEPTH_TEST | RenderState::TRANSPARENT | RenderState::ADDITIVE_BLEND
    }
}

/// Which faces are shaded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Outward-facing triangles only
    Front,
    /// Inward-facing triangles only
    Back,
    Double,
}

// ===== SHADING =====

/// How a surface is shaded
#[derive(Debug, Clone, PartialEq)]
pub enum ShadingModel {
    /// Diffuse + specular + bump
    Phong,
    /// Unlit color
    Basic,
    /// Custom program with declared uniforms
    Shader(ShaderProgram),
}

impl ShadingModel {
    /// Parameters that must be present before the first draw, with fallbacks
    pub fn required_params(&self) -> Vec<(String, ParamValue)> {
        match self {
            ShadingModel::Phong => vec![
                ("color".to_string(), ParamValue::Color(Vec3::ONE)),
                ("specular".to_string(), ParamValue::Color(Vec3::splat(0.067))),
                ("shininess".to_string(), ParamValue::Float(30.0)),
                ("bumpScale".to_string(), ParamValue::Float(1.0)),
            ],
            ShadingModel::Basic => vec![
                ("color".to_string(), ParamValue::Color(Vec3::ONE)),
            ],
            ShadingModel::Shader(program) => program
                .uniforms()
                .iter()
                .map(|u| (u.name.clone(), ParamValue::from(u.default)))
                .collect(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            ShadingModel::Phong => "phong",
            ShadingModel::Basic => "basic",
            ShadingModel::Shader(program) => program.name(),
        }
    }
}

/// Optional texture inputs of a material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureChannel {
    Map,
    BumpMap,
    SpecularMap,
    AlphaMap,
}

impl TextureChannel {
    /// Parameter name the channel is stored under
    pub fn param_name(&self) -> &'static str {
        match self {
            TextureChannel::Map => "map",
            TextureChannel::BumpMap => "bumpMap",
            TextureChannel::SpecularMap => "specularMap",
            TextureChannel::AlphaMap => "alphaMap",
        }
    }
}

// ===== MATERIAL =====

/// Material creation descriptor
#[derive(Debug, Clone)]
pub struct MaterialDesc {
    pub name: String,
    pub shading: ShadingModel,
    pub side: Side,
    pub state: RenderState,
    pub opacity: f32,
    pub params: Vec<(String, ParamValue)>,
}

impl MaterialDesc {
    /// Opaque, front-sided, fully opaque descriptor with no parameters
    pub fn new(name: &str, shading: ShadingModel) -> Self {
        Self {
            name: name.to_string(),
            shading,
            side: Side::Front,
            state: RenderState::opaque(),
            opacity: 1.0,
            params: Vec::new(),
        }
    }

    pub fn with_side(mut self, side: Side) -> Self {
        self.side = side;
        self
    }

    pub fn with_state(mut self, state: RenderState) -> Self {
        self.state = state;
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn with_param(mut self, name: &str, value: ParamValue) -> Self {
        self.params.push((name.to_string(), value));
        self
    }
}

/// Material resource: visual description of a surface
#[derive(Debug, Clone)]
pub struct Material {
    name: String,
    shading: ShadingModel,
    side: Side,
    state: RenderState,
    opacity: f32,
    params: FxHashMap<String, ParamValue>,
}

impl Material {
    /// Create a material, rejecting duplicate parameters and filling
    /// every missing required parameter with its fallback.
    pub fn from_desc(desc: MaterialDesc) -> Result<Self> {
        if !(0.0..=1.0).contains(&desc.opacity) {
            engine_bail!(InvalidResource; "planet3d::Material",
                "Material '{}': opacity {} out of [0, 1]", desc.name, desc.opacity);
        }

        let mut params = FxHashMap::default();
        for (name, value) in desc.params {
            if params.contains_key(&name) {
                engine_bail!(InvalidResource; "planet3d::Material",
                    "Material '{}': duplicate parameter name '{}'", desc.name, name);
            }
            params.insert(name, value);
        }

        let mut material = Self {
            name: desc.name,
            shading: desc.shading,
            side: desc.side,
            state: desc.state,
            opacity: desc.opacity,
            params,
        };
        material.resolve_defaults();
        Ok(material)
    }

    /// Insert fallbacks for required parameters that are absent.
    ///
    /// Returns how many parameters were filled in.
    pub fn resolve_defaults(&mut self) -> usize {
        let mut filled = 0;
        for (name, fallback) in self.shading.required_params() {
            if !self.params.contains_key(&name) {
                crate::engine_debug!("planet3d::Material",
                    "Material '{}': '{}' missing, using default", self.name, name);
                self.params.insert(name, fallback);
                filled += 1;
            }
        }
        filled
    }

    /// Whether every required parameter is present
    pub fn is_complete(&self) -> bool {
        self.shading
            .required_params()
            .iter()
            .all(|(name, _)| self.params.contains_key(name))
    }

    // ===== GETTERS =====

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn shading(&self) -> &ShadingModel {
        &self.shading
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn state(&self) -> RenderState {
        self.state
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn is_transparent(&self) -> bool {
        self.state.contains(RenderState::TRANSPARENT)
    }

    pub fn param(&self, name: &str) -> Option<&ParamValue> {
        self.params.get(name)
    }

    pub fn param_count(&self) -> usize {
        self.params.len()
    }

    pub fn float(&self, name: &str) -> Option<f32> {
        self.param(name).and_then(ParamValue::as_float)
    }

    pub fn vec3(&self, name: &str) -> Option<Vec3> {
        self.param(name).and_then(ParamValue::as_vec3)
    }

    /// Texture bound to a channel, `None` while unloaded or failed
    pub fn texture(&self, channel: TextureChannel) -> Option<&TextureHandle> {
        self.param(channel.param_name()).and_then(ParamValue::as_texture)
    }

    // ===== SETTERS =====

    /// Set or replace a parameter in place
    pub fn set_param(&mut self, name: &str, value: ParamValue) {
        self.params.insert(name.to_string(), value);
    }

    pub fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity.clamp(0.0, 1.0);
    }

    /// Bind a loaded texture to a channel
    pub fn bind_texture(&mut self, channel: TextureChannel, texture: TextureHandle) {
        self.params.insert(channel.param_name().to_string(), ParamValue::Texture(texture));
    }

    /// Drop a channel back to the untextured default
    pub fn clear_texture(&mut self, channel: TextureChannel) -> bool {
        self.params.remove(channel.param_name()).is_some()
    }
}

#[cfg(test)]
#[path = "material_tests.rs"]
mod tests;
