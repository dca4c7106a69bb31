/// Frame submission builder.
///
/// Walks the visible scene once, resolves world matrices, and produces a
/// flat draw list. Opaque draws are sorted front to back (nearest surface
/// first). Transparent draws are sorted back to front by their farthest
/// extent, which puts the skydome before the glow shell before the clouds
/// even though all three share the same center.

use glam::{Mat4, Vec3};
use crate::camera::{OutputSize, PerspectiveCamera, Viewport};
use crate::error::Result;
use crate::engine_bail;
use crate::resource::{GeometryKey, MaterialKey, RenderState, Side};
use crate::scene::{Light, NodeKey, NodeKind, Scene};
use crate::shader::GlowUniforms;

/// Camera state frozen for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraSnapshot {
    pub view: Mat4,
    pub projection: Mat4,
    pub position: Vec3,
}

impl CameraSnapshot {
    pub fn capture(camera: &PerspectiveCamera) -> Self {
        Self {
            view: camera.view_matrix(),
            projection: camera.projection_matrix(),
            position: camera.position(),
        }
    }
}

/// One mesh draw
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub node: NodeKey,
    pub geometry: GeometryKey,
    pub material: MaterialKey,
    pub world: Mat4,
    pub side: Side,
    pub state: RenderState,
    pub opacity: f32,
    /// Distance from the camera to the mesh center
    pub depth: f32,
    /// World-space bounding radius
    pub radius: f32,
}

impl DrawItem {
    pub fn is_transparent(&self) -> bool {
        self.state.contains(RenderState::TRANSPARENT)
    }
}

/// One light in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightItem {
    pub node: NodeKey,
    pub light: Light,
    pub position: Vec3,
}

/// Everything the backend needs to draw one frame
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSubmission {
    pub frame_index: u64,
    pub output_size: OutputSize,
    pub camera: CameraSnapshot,
    /// Opaque draws first, then transparent draws
    pub draws: Vec<DrawItem>,
    pub lights: Vec<LightItem>,
    pub glow: Option<GlowUniforms>,
}

impl FrameSubmission {
    pub fn opaque_draws(&self) -> impl Iterator<Item = &DrawItem> {
        self.draws.iter().filter(|d| !d.is_transparent())
    }

    pub fn transparent_draws(&self) -> impl Iterator<Item = &DrawItem> {
        self.draws.iter().filter(|d| d.is_transparent())
    }

    pub fn draw_count(&self) -> usize {
        self.draws.len()
    }

    pub fn draw_for(&self, node: NodeKey) -> Option<&DrawItem> {
        self.draws.iter().find(|d| d.node == node)
    }
}

/// Builds frame submissions from scene state
pub struct Drawer;

impl Drawer {
    /// Snapshot the scene for one frame
    ///
    /// # Arguments
    ///
    /// * `glow_material` - Material whose uniform block is attached to the frame
    pub fn build(
        frame_index: u64,
        scene: &Scene,
        camera: &PerspectiveCamera,
        viewport: &Viewport,
        glow_material: Option<MaterialKey>,
    ) -> Result<FrameSubmission> {
        let snapshot = CameraSnapshot::capture(camera);
        let mut opaque = Vec::new();
        let mut transparent = Vec::new();
        let mut lights = Vec::new();
        let mut missing = None;

        scene.visit_world(|key, node, world| match *node.kind() {
            NodeKind::Mesh { geometry, material } => {
                let (Some(geo), Some(mat)) = (scene.geometry(geometry), scene.material(material)) else {
                    missing.get_or_insert_with(|| node.name().to_string());
                    return;
                };
                let center = world.w_axis.truncate();
                let scale = world.x_axis.truncate().length()
                    .max(world.y_axis.truncate().length())
                    .max(world.z_axis.truncate().length());
                let item = DrawItem {
                    node: key,
                    geometry,
                    material,
                    world: *world,
                    side: mat.side(),
                    state: mat.state(),
                    opacity: mat.opacity(),
                    depth: (center - snapshot.position).length(),
                    radius: geo.bounding_radius() * scale,
                };
                if item.is_transparent() {
                    transparent.push(item);
                } else {
                    opaque.push(item);
                }
            }
            NodeKind::Light(light) => lights.push(LightItem {
                node: key,
                light,
                position: world.w_axis.truncate(),
            }),
            NodeKind::Group | NodeKind::CameraAnchor => {}
        });

        if let Some(name) = missing {
            engine_bail!(InvalidResource; "planet3d::Drawer",
                "Mesh '{}' references a missing geometry or material", name);
        }

        opaque.sort_by(|a, b| (a.depth - a.radius).total_cmp(&(b.depth - b.radius)));
        transparent.sort_by(|a, b| (b.depth + b.radius).total_cmp(&(a.depth + a.radius)));
        opaque.extend(transparent);

        let glow = glow_material
            .and_then(|key| scene.material(key))
            .and_then(GlowUniforms::from_material);

        Ok(FrameSubmission {
            frame_index,
            output_size: viewport.output_size(),
            camera: snapshot,
            draws: opaque,
            lights,
            glow,
        })
    }
}

#[cfg(test)]
#[path = "drawer_tests.rs"]
mod tests;
