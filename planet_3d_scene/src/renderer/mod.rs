/// Renderer module
///
/// Backend trait, frame submission builder and the headless mock backend.

mod renderer;
mod drawer;
mod mock_renderer;

pub use renderer::Renderer;
pub use drawer::{CameraSnapshot, DrawItem, Drawer, FrameSubmission, LightItem};
pub use mock_renderer::{MockRenderer, MockRendererHandle, MockRendererState};
