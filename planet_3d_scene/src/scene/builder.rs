/// Scene Graph Builder: turns a `SceneConfig` into a fully linked tree.
///
/// Layout:
///
/// ```text
/// root
/// ├── planet                 (group: spins, scaled in by the entrance timeline)
/// │   ├── planet_core        (Phong, front faces)
/// │   ├── planet_inner       (Phong, back faces, darkened tint)
/// │   ├── planet_clouds      (Phong, translucent)
/// │   └── planet_glow        (glow shader, back faces, additive)
/// ├── skydome                (Basic, back faces, low opacity)
/// ├── star_field             (group)
/// │   └── star × N           (shared sphere + shared white Basic material)
/// ├── point_light
/// ├── ambient_light
/// └── camera
/// ```
///
/// The configuration is validated before anything is created, and the scene
/// is only returned once every node and material exists.

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use crate::config::SceneConfig;
use crate::error::Result;
use crate::resource::{
    Geometry, MaterialDesc, MaterialKey, ParamValue, RenderState, ShadingModel, Side,
    SphereGeometry, TextureBindings, TextureChannel,
};
use crate::shader::glow_program;
use super::node::{Light, Node, NodeKey};
use super::scene::Scene;
use super::starfield::StarFieldGenerator;

const SOURCE: &str = "planet3d::SceneBuilder";

/// Keys of the nodes the driver animates or reads every frame
#[derive(Debug, Clone)]
pub struct PlanetNodes {
    pub planet_group: NodeKey,
    pub core: NodeKey,
    pub inner_shell: NodeKey,
    pub clouds: NodeKey,
    pub glow: NodeKey,
    pub skydome: NodeKey,
    pub star_field: NodeKey,
    pub stars: Vec<NodeKey>,
    pub point_light: NodeKey,
    pub ambient_light: NodeKey,
    pub camera_anchor: NodeKey,
}

/// Keys of the materials created by the builder
#[derive(Debug, Clone, Copy)]
pub struct PlanetMaterials {
    pub core: MaterialKey,
    pub inner_shell: MaterialKey,
    pub clouds: MaterialKey,
    pub glow: MaterialKey,
    pub skydome: MaterialKey,
    pub star: MaterialKey,
}

/// Builder output
pub struct BuiltScene {
    pub scene: Scene,
    pub nodes: PlanetNodes,
    pub materials: PlanetMaterials,
    /// Material channels waiting on configured texture files
    pub textures: TextureBindings,
}

/// Builds the layered planet scene
pub struct SceneBuilder<'a> {
    config: &'a SceneConfig,
}

impl<'a> SceneBuilder<'a> {
    pub fn new(config: &'a SceneConfig) -> Self {
        Self { config }
    }

    /// Build with the configured seed, or the thread RNG when none is set
    pub fn build(&self) -> Result<BuiltScene> {
        match self.config.stars.seed {
            Some(seed) => self.build_with_rng(&mut ChaCha8Rng::seed_from_u64(seed)),
            None => self.build_with_rng(&mut rand::rng()),
        }
    }

    /// Build with stars drawn from `rng`
    pub fn build_with_rng<R: Rng>(&self, rng: &mut R) -> Result<BuiltScene> {
        let config = self.config;
        config.validate()?;

        let mut scene = Scene::new();
        let root = scene.root();
        let materials = Self::create_materials(&mut scene, config)?;

        // ========== PLANET SHELLS ==========
        let planet = &config.planet;
        let segments = planet.segments;
        let core_geometry = scene.add_geometry(Geometry::Sphere(
            SphereGeometry::new(planet.radius, segments, segments)?));
        let inner_geometry = scene.add_geometry(Geometry::Sphere(
            SphereGeometry::new(planet.inner_radius(), segments, segments)?));
        let cloud_geometry = scene.add_geometry(Geometry::Sphere(
            SphereGeometry::new(planet.cloud_radius(), segments, segments)?));
        let glow_geometry = scene.add_geometry(Geometry::Sphere(
            SphereGeometry::new(config.glow.radius, segments, segments)?));

        let planet_group = scene.add_node(root, Node::group("planet"))?;
        let core = scene.add_node(planet_group,
            Node::mesh("planet_core", core_geometry, materials.core))?;
        let inner_shell = scene.add_node(planet_group,
            Node::mesh("planet_inner", inner_geometry, materials.inner_shell))?;
        let clouds = scene.add_node(planet_group,
            Node::mesh("planet_clouds", cloud_geometry, materials.clouds))?;
        let glow = scene.add_node(planet_group,
            Node::mesh("planet_glow", glow_geometry, materials.glow))?;

        // ========== SKYDOME ==========
        let sky = &config.skydome;
        let sky_geometry = scene.add_geometry(Geometry::Sphere(
            SphereGeometry::new(sky.radius, sky.segments, sky.segments)?));
        let skydome = scene.add_node(root, Node::mesh("skydome", sky_geometry, materials.skydome))?;

        // ========== STARS ==========
        let star_geometry = scene.add_geometry(Geometry::Sphere(
            SphereGeometry::new(config.stars.radius, 24, 24)?));
        let star_field = scene.add_node(root, Node::group("star_field"))?;
        let positions = StarFieldGenerator::generate_with(rng, config.stars.count, config.stars.spread);
        let mut stars = Vec::with_capacity(positions.len());
        for star in positions {
            let node = Node::mesh("star", star_geometry, materials.star).with_position(star.position);
            stars.push(scene.add_node(star_field, node)?);
        }

        // ========== LIGHTS & CAMERA ==========
        let lights = &config.lights;
        let point_light = scene.add_node(root, Node::light("point_light", Light::Point {
            color: Vec3::from_array(lights.point_color),
            intensity: lights.point_intensity,
            distance: lights.point_distance,
        }).with_position(Vec3::from_array(lights.point_position)))?;
        let ambient_light = scene.add_node(root, Node::light("ambient_light", Light::Ambient {
            color: Vec3::from_array(lights.ambient_color),
            intensity: lights.ambient_intensity,
        }))?;
        let camera_anchor = scene.add_node(root,
            Node::camera_anchor("camera").with_position(Vec3::from_array(config.camera.position)))?;

        let textures = Self::texture_bindings(config, &materials);

        crate::engine_info!(SOURCE,
            "Scene built: {} nodes, {} stars, {} materials, {} textures pending",
            scene.node_count(), stars.len(), scene.material_count(), textures.pending_count());

        Ok(BuiltScene {
            scene,
            nodes: PlanetNodes {
                planet_group,
                core,
                inner_shell,
                clouds,
                glow,
                skydome,
                star_field,
                stars,
                point_light,
                ambient_light,
                camera_anchor,
            },
            materials,
            textures,
        })
    }

    fn create_materials(scene: &mut Scene, config: &SceneConfig) -> Result<PlanetMaterials> {
        let planet = &config.planet;
        let color = Vec3::from_array(planet.color);

        let core = scene.add_material(
            MaterialDesc::new("planet_core", ShadingModel::Phong)
                .with_param("color", ParamValue::Color(color))
                .with_param("specular", ParamValue::Color(Vec3::from_array(planet.specular)))
                .with_param("shininess", ParamValue::Float(planet.shininess))
                .with_param("bumpScale", ParamValue::Float(planet.bump_scale)),
        )?;

        let inner_shell = scene.add_material(
            MaterialDesc::new("planet_inner", ShadingModel::Phong)
                .with_side(Side::Back)
                .with_param("color", ParamValue::Color(color * planet.inner_tint))
                .with_param("shininess", ParamValue::Float(0.0)),
        )?;

        let clouds = scene.add_material(
            MaterialDesc::new("planet_clouds", ShadingModel::Phong)
                .with_state(RenderState::translucent())
                .with_opacity(planet.cloud_opacity)
                .with_param("color", ParamValue::Color(Vec3::ONE)),
        )?;

        let glow_config = &config.glow;
        let program = glow_program(Vec3::from_array(glow_config.color), glow_config.c, glow_config.p)?;
        let glow = scene.add_material(
            MaterialDesc::new("planet_glow", ShadingModel::Shader(program))
                .with_side(Side::Back)
                .with_state(RenderState::additive()),
        )?;

        let skydome = scene.add_material(
            MaterialDesc::new("skydome", ShadingModel::Basic)
                .with_side(Side::Back)
                .with_state(RenderState::translucent())
                .with_opacity(config.skydome.opacity)
                .with_param("color", ParamValue::Color(Vec3::ONE)),
        )?;

        let star = scene.add_material(
            MaterialDesc::new("star", ShadingModel::Basic)
                .with_param("color", ParamValue::Color(Vec3::ONE)),
        )?;

        Ok(PlanetMaterials { core, inner_shell, clouds, glow, skydome, star })
    }

    fn texture_bindings(config: &SceneConfig, materials: &PlanetMaterials) -> TextureBindings {
        let mut bindings = TextureBindings::new();
        let textures = &config.textures;
        let plan = [
            (&textures.diffuse, materials.core, TextureChannel::Map),
            (&textures.bump, materials.core, TextureChannel::BumpMap),
            (&textures.specular, materials.core, TextureChannel::SpecularMap),
            (&textures.clouds, materials.clouds, TextureChannel::Map),
            (&textures.background, materials.skydome, TextureChannel::Map),
        ];
        for (path, material, channel) in plan {
            if let Some(path) = path {
                bindings.bind(path.clone(), material, channel);
            }
        }
        bindings
    }
}

#[cfg(test)]
#[path = "builder_tests.rs"]
mod tests;
