/// Atmospheric glow: view-dependent rim falloff on the glow shell.
///
/// intensity = max(0, c * dot(normalize(viewVector), worldNormal)) ^ p
/// color     = glowColor * intensity, alpha 1, additive, back faces only
///
/// `viewVector` is camera position minus glow shell center, refreshed once
/// per frame by the animation driver. The same formula lives in the GLSL
/// blobs and in `glow_intensity`, which tests evaluate directly.

use bytemuck::{Pod, Zeroable};
use glam::{Mat3, Mat4, Vec3, Vec4};
use crate::error::Result;
use crate::resource::material::{Material, ParamValue};
use super::program::{ShaderProgram, UniformDesc};

pub const UNIFORM_VIEW_VECTOR: &str = "viewVector";
pub const UNIFORM_GLOW_COLOR: &str = "glowColor";
pub const UNIFORM_C: &str = "c";
pub const UNIFORM_P: &str = "p";

pub const DEFAULT_C: f32 = 1.0;
pub const DEFAULT_P: f32 = 6.0;

const GLOW_VERTEX_SOURCE: &str = r#"
uniform vec3 viewVector;
uniform float c;
uniform float p;
varying float intensity;

void main() {
    vec3 worldNormal = normalize(mat3(modelMatrix) * normal);
    vec3 viewDir = normalize(viewVector);
    intensity = pow(max(0.0, c * dot(viewDir, worldNormal)), p);
    gl_Position = projectionMatrix * modelViewMatrix * vec4(position, 1.0);
}
"#;

const GLOW_FRAGMENT_SOURCE: &str = r#"
uniform vec3 glowColor;
varying float intensity;

void main() {
    gl_FragColor = vec4(glowColor * intensity, 1.0);
}
"#;

/// The glow program with its uniform table
pub fn glow_program(glow_color: Vec3, c: f32, p: f32) -> Result<ShaderProgram> {
    ShaderProgram::new(
        "atmosphere_glow",
        GLOW_VERTEX_SOURCE,
        GLOW_FRAGMENT_SOURCE,
        vec![
            UniformDesc::float(UNIFORM_C, c),
            UniformDesc::float(UNIFORM_P, p),
            UniformDesc::color(UNIFORM_GLOW_COLOR, glow_color),
            UniformDesc::vec3(UNIFORM_VIEW_VECTOR, Vec3::Z),
        ],
    )
}

/// Falloff intensity for one surface point.
///
/// Zero when the normal faces away from the camera (dot <= 0) or either
/// vector has zero length.
pub fn glow_intensity(view_vector: Vec3, world_normal: Vec3, c: f32, p: f32) -> f32 {
    let view = view_vector.normalize_or_zero();
    let normal = world_normal.normalize_or_zero();
    let facing = (c * view.dot(normal)).max(0.0);
    if facing == 0.0 {
        return 0.0;
    }
    facing.powf(p)
}

/// GPU-ready uniform block (std140 compatible: vec3 + float, twice)
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct GlowUniforms {
    pub view_vector: [f32; 3],
    pub c: f32,
    pub glow_color: [f32; 3],
    pub p: f32,
}

impl GlowUniforms {
    pub fn new(view_vector: Vec3, glow_color: Vec3, c: f32, p: f32) -> Self {
        Self {
            view_vector: view_vector.to_array(),
            c,
            glow_color: glow_color.to_array(),
            p,
        }
    }

    /// Read the uniform block from a glow material, `None` if a uniform is missing
    pub fn from_material(material: &Material) -> Option<Self> {
        Some(Self::new(
            material.vec3(UNIFORM_VIEW_VECTOR)?,
            material.vec3(UNIFORM_GLOW_COLOR)?,
            material.float(UNIFORM_C)?,
            material.float(UNIFORM_P)?,
        ))
    }

    pub fn view_vector(&self) -> Vec3 {
        Vec3::from_array(self.view_vector)
    }

    pub fn glow_color(&self) -> Vec3 {
        Vec3::from_array(self.glow_color)
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

/// Store the per-frame view vector on the glow material
pub fn set_view_vector(material: &mut Material, view_vector: Vec3) {
    material.set_param(UNIFORM_VIEW_VECTOR, ParamValue::Vec3(view_vector));
}

/// CPU evaluation of the glow shader
#[derive(Debug, Clone, Copy)]
pub struct GlowEvaluator {
    uniforms: GlowUniforms,
}

impl GlowEvaluator {
    pub fn new(uniforms: GlowUniforms) -> Self {
        Self { uniforms }
    }

    pub fn uniforms(&self) -> &GlowUniforms {
        &self.uniforms
    }

    /// Rotate a local normal into world space (translation ignored)
    pub fn world_normal(local_normal: Vec3, model: &Mat4) -> Vec3 {
        (Mat3::from_mat4(*model) * local_normal).normalize_or_zero()
    }

    pub fn intensity(&self, local_normal: Vec3, model: &Mat4) -> f32 {
        glow_intensity(
            self.uniforms.view_vector(),
            Self::world_normal(local_normal, model),
            self.uniforms.c,
            self.uniforms.p,
        )
    }

    /// RGBA output for one surface point
    pub fn shade(&self, local_normal: Vec3, model: &Mat4) -> Vec4 {
        let intensity = self.intensity(local_normal, model);
        (self.uniforms.glow_color() * intensity).extend(1.0)
    }
}

#[cfg(test)]
#[path = "glow_tests.rs"]
mod tests;
