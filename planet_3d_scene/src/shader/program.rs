/// Data-described shader programs.
///
/// A program is two source blobs plus a list of named, typed uniforms with
/// defaults. The backend compiles the sources; the rest of the crate only
/// deals with the uniform table, which is what materials validate against.

use glam::Vec3;
use crate::error::Result;
use crate::engine_bail;

/// Uniform type as declared by a program
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniformType {
    Float,
    Vec3,
    Color,
}

/// Uniform value (also used as declared default)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Float(f32),
    Vec3(Vec3),
    Color(Vec3),
}

impl UniformValue {
    pub fn ty(&self) -> UniformType {
        match self {
            UniformValue::Float(_) => UniformType::Float,
            UniformValue::Vec3(_) => UniformType::Vec3,
            UniformValue::Color(_) => UniformType::Color,
        }
    }
}

/// One declared uniform
#[derive(Debug, Clone, PartialEq)]
pub struct UniformDesc {
    pub name: String,
    pub ty: UniformType,
    pub default: UniformValue,
}

impl UniformDesc {
    pub fn float(name: &str, default: f32) -> Self {
        Self { name: name.to_string(), ty: UniformType::Float, default: UniformValue::Float(default) }
    }

    pub fn vec3(name: &str, default: Vec3) -> Self {
        Self { name: name.to_string(), ty: UniformType::Vec3, default: UniformValue::Vec3(default) }
    }

    pub fn color(name: &str, default: Vec3) -> Self {
        Self { name: name.to_string(), ty: UniformType::Color, default: UniformValue::Color(default) }
    }
}

/// Vertex + fragment source with its uniform table
#[derive(Debug, Clone, PartialEq)]
pub struct ShaderProgram {
    name: String,
    vertex_source: String,
    fragment_source: String,
    uniforms: Vec<UniformDesc>,
}

impl ShaderProgram {
    /// Create a program.
    ///
    /// Rejects empty sources, duplicate uniform names, defaults whose type
    /// differs from the declaration, and uniforms neither source mentions.
    pub fn new(
        name: &str,
        vertex_source: &str,
        fragment_source: &str,
        uniforms: Vec<UniformDesc>,
    ) -> Result<Self> {
        if vertex_source.trim().is_empty() || fragment_source.trim().is_empty() {
            engine_bail!(InvalidResource; "planet3d::ShaderProgram",
                "Program '{}' has an empty source", name);
        }

        for (i, uniform) in uniforms.iter().enumerate() {
            if uniforms[..i].iter().any(|u| u.name == uniform.name) {
                engine_bail!(InvalidResource; "planet3d::ShaderProgram",
                    "Program '{}': duplicate uniform '{}'", name, uniform.name);
            }
            if uniform.default.ty() != uniform.ty {
                engine_bail!(InvalidResource; "planet3d::ShaderProgram",
                    "Program '{}': uniform '{}' declared {:?} but default is {:?}",
                    name, uniform.name, uniform.ty, uniform.default.ty());
            }
            if !vertex_source.contains(&uniform.name) && !fragment_source.contains(&uniform.name) {
                engine_bail!(InvalidResource; "planet3d::ShaderProgram",
                    "Program '{}': uniform '{}' is not used by either source", name, uniform.name);
            }
        }

        Ok(Self {
            name: name.to_string(),
            vertex_source: vertex_source.to_string(),
            fragment_source: fragment_source.to_string(),
            uniforms,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vertex_source(&self) -> &str {
        &self.vertex_source
    }

    pub fn fragment_source(&self) -> &str {
        &self.fragment_source
    }

    pub fn uniforms(&self) -> &[UniformDesc] {
        &self.uniforms
    }

    pub fn uniform(&self, name: &str) -> Option<&UniformDesc> {
        self.uniforms.iter().find(|u| u.name == name)
    }
}

#[cfg(test)]
#[path = "program_tests.rs"]
mod tests;
