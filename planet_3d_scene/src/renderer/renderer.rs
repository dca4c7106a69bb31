/// Drawing backend interface.
///
/// The scene side never talks to a graphics API directly. It hands the
/// backend one `FrameSubmission` per tick and tells it when the output
/// resolution changes.

use crate::camera::OutputSize;
use crate::error::Result;
use super::drawer::FrameSubmission;

/// Backend that draws submitted frames
pub trait Renderer {
    /// Resize the output surface (physical pixels)
    ///
    /// # Arguments
    ///
    /// * `size` - New output size and the pixel ratio it was derived from
    fn set_output_size(&mut self, size: OutputSize) -> Result<()>;

    /// Draw one frame
    ///
    /// # Errors
    ///
    /// A failure here is treated as a lost drawing context: the animation
    /// driver stops scheduling frames.
    fn render(&mut self, frame: &FrameSubmission) -> Result<()>;
}
