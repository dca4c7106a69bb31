//! Resource-level geometry types.
//!
//! Geometry is described parametrically and tessellated on demand, so many
//! nodes (every star, for instance) can share one `GeometryKey` in the scene.

use glam::{Vec2, Vec3};
use slotmap::new_key_type;
use crate::error::Result;
use crate::engine_bail;

new_key_type! {
    /// Stable key for a geometry stored in a Scene.
    pub struct GeometryKey;
}

/// One tessellated vertex
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryVertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub uv: Vec2,
}

/// Triangle list produced by tessellation
#[derive(Debug, Clone, Default)]
pub struct GeometryData {
    pub vertices: Vec<GeometryVertex>,
    pub indices: Vec<u32>,
}

impl GeometryData {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// UV sphere centred on the origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereGeometry {
    radius: f32,
    width_segments: u32,
    height_segments: u32,
}

impl SphereGeometry {
    /// Create a sphere description.
    ///
    /// Fails for a non-positive radius or fewer than 3 width / 2 height segments.
    pub fn new(radius: f32, width_segments: u32, height_segments: u32) -> Result<Self> {
        if !(radius > 0.0) || !radius.is_finite() {
            engine_bail!(InvalidResource; "planet3d::SphereGeometry",
                "Sphere radius must be positive and finite, got {}", radius);
        }
        if width_segments < 3 || height_segments < 2 {
            engine_bail!(InvalidResource; "planet3d::SphereGeometry",
                "Sphere needs at least 3x2 segments, got {}x{}", width_segments, height_segments);
        }
        Ok(Self { radius, width_segments, height_segments })
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn width_segments(&self) -> u32 {
        self.width_segments
    }

    pub fn height_segments(&self) -> u32 {
        self.height_segments
    }

    /// Number of vertices `tessellate()` produces
    pub fn vertex_count(&self) -> usize {
        ((self.width_segments + 1) * (self.height_segments + 1)) as usize
    }

    /// Latitude/longitude tessellation.
    ///
    /// Rows run from the north pole (v = 0) to the south pole (v = 1).
    /// Degenerate triangles at the poles are skipped.
    pub fn tessellate(&self) -> GeometryData {
        let mut data = GeometryData {
            vertices: Vec::with_capacity(self.vertex_count()),
            indices: Vec::new(),
        };

        for iy in 0..=self.height_segments {
            let v = iy as f32 / self.height_segments as f32;
            let theta = v * std::f32::consts::PI;
            for ix in 0..=self.width_segments {
                let u = ix as f32 / self.width_segments as f32;
                let phi = u * std::f32::consts::TAU;
                let normal = Vec3::new(
                    -phi.cos() * theta.sin(),
                    theta.cos(),
                    phi.sin() * theta.sin(),
                );
                data.vertices.push(GeometryVertex {
                    position: normal * self.radius,
                    normal,
                    uv: Vec2::new(u, 1.0 - v),
                });
            }
        }

        let row = self.width_segments + 1;
        for iy in 0..self.height_segments {
            for ix in 0..self.width_segments {
                let a = iy * row + ix + 1;
                let b = iy * row + ix;
                let c = (iy + 1) * row + ix;
                let d = (iy + 1) * row + ix + 1;
                if iy != 0 {
                    data.indices.extend_from_slice(&[a, b, d]);
                }
                if iy != self.height_segments - 1 {
                    data.indices.extend_from_slice(&[b, c, d]);
                }
            }
        }

        data
    }
}

/// Geometry stored in a scene
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Sphere(SphereGeometry),
}

impl Geometry {
    /// Radius of the bounding sphere around the local origin
    pub fn bounding_radius(&self) -> f32 {
        match self {
            Geometry::Sphere(sphere) => sphere.radius(),
        }
    }

    pub fn tessellate(&self) -> GeometryData {
        match self {
            Geometry::Sphere(sphere) => sphere.tessellate(),
        }
    }

    pub fn as_sphere(&self) -> Option<&SphereGeometry> {
        match self {
            Geometry::Sphere(sphere) => Some(sphere),
        }
    }
}

#[cfg(test)]
#[path = "geometry_tests.rs"]
mod tests;
