/// Camera, viewport and orbit controls

mod camera;
mod viewport;
mod orbit_controls;

pub use camera::PerspectiveCamera;
pub use viewport::{OutputSize, Viewport, DEFAULT_MAX_PIXEL_RATIO};
pub use orbit_controls::{ControlState, OrbitControls};
