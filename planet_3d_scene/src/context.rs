/// Render context: all mutable state of one running visualization.
///
/// Owned by the animation driver and passed explicitly to every step, so
/// several independent scenes can live side by side (one per test, for
/// instance).

use glam::Vec3;
use crate::camera::{OrbitControls, PerspectiveCamera, Viewport};
use crate::config::SceneConfig;
use crate::error::Result;
use crate::engine_bail;
use crate::overlay::Overlay;
use crate::renderer::{Drawer, Renderer};
use crate::resource::TextureBindings;
use crate::scene::{BuiltScene, PlanetMaterials, PlanetNodes, Scene};
use crate::shader::glow::set_view_vector;

const SOURCE: &str = "planet3d::RenderContext";

pub struct RenderContext {
    pub scene: Scene,
    pub nodes: PlanetNodes,
    pub materials: PlanetMaterials,
    pub camera: PerspectiveCamera,
    pub viewport: Viewport,
    pub controls: OrbitControls,
    pub overlay: Overlay,
    pub textures: TextureBindings,
    renderer: Box<dyn Renderer>,
}

impl RenderContext {
    /// Wrap a built scene, size the viewport and tell the renderer its output size
    pub fn new(built: BuiltScene, config: &SceneConfig, mut renderer: Box<dyn Renderer>) -> Result<Self> {
        let vp = &config.viewport;
        let viewport = Viewport::new(vp.width, vp.height, vp.device_pixel_ratio)?
            .with_max_pixel_ratio(vp.max_pixel_ratio);
        let camera = PerspectiveCamera::from_config(&config.camera, viewport.aspect());
        let mut controls = OrbitControls::new(&config.controls, Vec3::from_array(config.camera.target));
        controls.set_viewport_height(viewport.height());
        renderer.set_output_size(viewport.output_size())?;

        Ok(Self {
            scene: built.scene,
            nodes: built.nodes,
            materials: built.materials,
            camera,
            viewport,
            controls,
            overlay: Overlay::new(),
            textures: built.textures,
            renderer,
        })
    }

    pub fn renderer(&self) -> &dyn Renderer {
        self.renderer.as_ref()
    }

    pub fn renderer_mut(&mut self) -> &mut dyn Renderer {
        self.renderer.as_mut()
    }

    /// Display-size change: viewport, camera aspect, drag scale and renderer
    /// output are all updated before returning. A rejected size changes nothing.
    pub fn resize(&mut self, width: f32, height: f32, device_pixel_ratio: f32) -> Result<()> {
        self.viewport.resize(width, height, device_pixel_ratio)?;
        self.camera.set_aspect(self.viewport.aspect());
        self.controls.set_viewport_height(height);
        let output = self.viewport.output_size();
        self.renderer.set_output_size(output)?;
        crate::engine_debug!(SOURCE, "Resized to {}x{} (output {}x{} @{})",
            width, height, output.width, output.height, output.pixel_ratio);
        Ok(())
    }

    /// Point the glow shader's `viewVector` from the glow shell to the camera
    pub fn update_glow_view_vector(&mut self) -> Result<Vec3> {
        let Some(glow_position) = self.scene.world_position(self.nodes.glow) else {
            engine_bail!(InvalidResource; SOURCE, "Glow node is missing from the scene");
        };
        let view_vector = self.camera.position() - glow_position;
        let Some(material) = self.scene.material_mut(self.materials.glow) else {
            engine_bail!(InvalidResource; SOURCE, "Glow material is missing from the scene");
        };
        set_view_vector(material, view_vector);
        Ok(view_vector)
    }

    /// Copy the camera position onto the scene's camera node
    pub fn sync_camera_anchor(&mut self) {
        let position = self.camera.position();
        if let Some(transform) = self.scene.transform_mut(self.nodes.camera_anchor) {
            transform.position = position;
        }
    }

    /// Build this frame's draw list and hand it to the renderer
    pub fn submit(&mut self, frame_index: u64) -> Result<()> {
        let frame = Drawer::build(
            frame_index,
            &self.scene,
            &self.camera,
            &self.viewport,
            Some(self.materials.glow),
        )?;
        self.renderer.render(&frame)
    }
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
