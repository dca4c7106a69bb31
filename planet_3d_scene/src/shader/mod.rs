//! Shader module
//!
//! Data-described programs and the atmospheric glow evaluator.

mod program;
pub mod glow;

pub use program::{ShaderProgram, UniformDesc, UniformType, UniformValue};
pub use glow::{glow_intensity, glow_program, GlowEvaluator, GlowUniforms};
