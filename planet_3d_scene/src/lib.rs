/*!
# Planet 3D Scene

Scene composition and per-frame animation for an interactive layered-planet
visualization: a solid planet with an inner shell, a translucent cloud shell
and an atmospheric glow, a procedural star field, a background skydome and an
orbiting camera.

## Architecture

- **SceneBuilder**: validates a `SceneConfig` and builds the node tree
- **StarFieldGenerator**: uniformly scattered stars from an injectable RNG
- **GlowEvaluator**: view-dependent rim glow, evaluated on the CPU or shipped
  as uniforms to a shader backend
- **Viewport / OrbitControls**: output size, aspect ratio and damped orbiting
- **AnimationDriver**: per-frame loop over an explicit `RenderContext`
- **EntranceTimeline**: one-shot startup tweens
- **Renderer**: backend trait consuming one `FrameSubmission` per frame

Drawing backends implement `Renderer`; `MockRenderer` runs headless.
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod config;
pub mod resource;
pub mod shader;
pub mod scene;
pub mod camera;
pub mod animation;
pub mod renderer;
pub mod overlay;
pub mod context;
pub mod host;

// Main planet3d namespace module
pub mod planet3d {
    // Error types
    pub use crate::error::{Error, Result};

    // Logger registry
    pub use crate::engine::Engine;

    // Configuration root
    pub use crate::config::SceneConfig;

    // Per-frame loop
    pub use crate::animation::AnimationDriver;
    pub use crate::context::RenderContext;

    // Drawing backend trait
    pub use crate::renderer::Renderer;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    pub mod camera {
        pub use crate::camera::*;
    }

    pub mod scene {
        pub use crate::scene::*;
    }

    pub mod resource {
        pub use crate::resource::*;
    }

    pub mod shader {
        pub use crate::shader::*;
    }

    pub mod animation {
        pub use crate::animation::*;
    }

    pub mod render {
        pub use crate::renderer::*;
    }

    pub mod host {
        pub use crate::host::*;
    }

    pub mod overlay {
        pub use crate::overlay::*;
    }
}

// Re-export math library at crate root
pub use glam;
