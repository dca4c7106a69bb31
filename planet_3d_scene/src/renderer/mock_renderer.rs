/// Mock Renderer (no GPU required)
///
/// Records every submitted frame and output size so tests and headless
/// runs can inspect what would have been drawn. State lives behind an
/// `Arc<Mutex>` so a handle stays readable after the renderer has been
/// boxed into a render context.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use crate::camera::OutputSize;
use crate::error::Result;
use crate::engine_bail;
use super::drawer::FrameSubmission;
use super::renderer::Renderer;

/// Recorded renderer activity
#[derive(Debug, Default)]
pub struct MockRendererState {
    pub frames: Vec<FrameSubmission>,
    pub output_sizes: Vec<OutputSize>,
    /// Number of `render` calls, failed ones included
    pub render_calls: u64,
    /// `render` call (1-based) that returns an error
    pub fail_on_call: Option<u64>,
}

/// Shared view of a `MockRenderer`'s recorded state
#[derive(Debug, Clone)]
pub struct MockRendererHandle {
    state: Arc<Mutex<MockRendererState>>,
}

impl MockRendererHandle {
    pub fn lock(&self) -> MutexGuard<'_, MockRendererState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn frame_count(&self) -> usize {
        self.lock().frames.len()
    }

    pub fn render_calls(&self) -> u64 {
        self.lock().render_calls
    }

    pub fn last_frame(&self) -> Option<FrameSubmission> {
        self.lock().frames.last().cloned()
    }

    pub fn last_output_size(&self) -> Option<OutputSize> {
        self.lock().output_sizes.last().copied()
    }
}

/// Headless renderer
#[derive(Debug, Default)]
pub struct MockRenderer {
    state: Arc<Mutex<MockRendererState>>,
}

impl MockRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renderer whose `call`-th render (1-based) fails, simulating a lost context
    pub fn failing_on(call: u64) -> Self {
        let renderer = Self::new();
        renderer.handle().lock().fail_on_call = Some(call);
        renderer
    }

    pub fn handle(&self) -> MockRendererHandle {
        MockRendererHandle { state: Arc::clone(&self.state) }
    }
}

impl Renderer for MockRenderer {
    fn set_output_size(&mut self, size: OutputSize) -> Result<()> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.output_sizes.push(size);
        Ok(())
    }

    fn render(&mut self, frame: &FrameSubmission) -> Result<()> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.render_calls += 1;
        if state.fail_on_call == Some(state.render_calls) {
            let call = state.render_calls;
            drop(state);
            engine_bail!(BackendError; "planet3d::MockRenderer",
                "Drawing context lost on render call {}", call);
        }
        state.frames.push(frame.clone());
        Ok(())
    }
}

#[cfg(test)]
#[path = "mock_renderer_tests.rs"]
mod tests;
