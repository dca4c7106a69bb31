/// Animation driver: the per-frame update loop.
///
/// One `tick` per frame-ready signal, in this order:
///
/// 1. apply finished texture loads
/// 2. orbit controls step (damping, auto-rotation)
/// 3. entrance timeline (dropped once complete)
/// 4. constant per-tick spins
/// 5. glow `viewVector` from the current camera position
/// 6. camera node sync
/// 7. frame submission
///
/// The timeline writes before the drawer reads, so a frame never shows a
/// half-applied entrance step. Any error stops the driver for good.

use std::time::Duration;
use crate::config::SceneConfig;
use crate::context::RenderContext;
use crate::error::{Error, Result};
use crate::host::HostEvent;
use crate::renderer::Renderer;
use crate::resource::TextureLoader;
use crate::scene::SceneBuilder;
use super::frame_source::{FrameSource, FrameTick};
use super::spin::Spin;
use super::timeline::EntranceTimeline;

const SOURCE: &str = "planet3d::AnimationDriver";

/// Whether the driver still accepts frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Running,
    Stopped,
}

/// Owns the render context and advances it once per frame
pub struct AnimationDriver {
    context: RenderContext,
    spins: Vec<Spin>,
    timeline: Option<EntranceTimeline>,
    state: DriverState,
    frames_rendered: u64,
    last_timestamp: Option<Duration>,
}

impl AnimationDriver {
    pub fn new(context: RenderContext, spins: Vec<Spin>, timeline: Option<EntranceTimeline>) -> Self {
        Self {
            context,
            spins,
            timeline,
            state: DriverState::Running,
            frames_rendered: 0,
            last_timestamp: None,
        }
    }

    /// Build the scene, request its textures and wire the default spins and
    /// entrance timeline. Texture loads complete in the background.
    pub fn from_config(
        config: &SceneConfig,
        renderer: Box<dyn Renderer>,
        loader: &mut dyn TextureLoader,
    ) -> Result<Self> {
        let mut built = SceneBuilder::new(config).build()?;
        let requested = built.textures.request_all(loader);
        let context = RenderContext::new(built, config, renderer)?;

        let nodes = &context.nodes;
        let animation = &config.animation;
        let spins = vec![
            Spin::about_y(nodes.planet_group, animation.planet_spin),
            Spin::about_y(nodes.clouds, animation.cloud_spin),
            Spin::about_y(nodes.skydome, animation.skydome_spin),
        ];
        let timeline = config.entrance.enabled
            .then(|| EntranceTimeline::entrance(&config.entrance, nodes, &context.overlay));

        crate::engine_info!(SOURCE, "Driver ready: {} spins, {} textures requested, entrance {}",
            spins.len(), requested, if timeline.is_some() { "on" } else { "off" });
        Ok(Self::new(context, spins, timeline))
    }

    // ===== GETTERS =====

    pub fn context(&self) -> &RenderContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut RenderContext {
        &mut self.context
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == DriverState::Running
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    /// Entrance timeline, `None` once it has finished
    pub fn timeline(&self) -> Option<&EntranceTimeline> {
        self.timeline.as_ref()
    }

    pub fn spins(&self) -> &[Spin] {
        &self.spins
    }

    /// Unregister from the frame signal
    pub fn stop(&mut self) {
        self.state = DriverState::Stopped;
    }

    // ===== FRAME LOOP =====

    /// Advance one frame
    ///
    /// # Errors
    ///
    /// `FrameLoopStopped` once stopped, otherwise whatever failed this frame
    /// (after which the driver is stopped).
    pub fn tick(&mut self, frame: FrameTick) -> Result<()> {
        if self.state == DriverState::Stopped {
            return Err(Error::FrameLoopStopped);
        }
        match self.step(frame) {
            Ok(()) => {
                self.frames_rendered += 1;
                Ok(())
            }
            Err(error) => {
                self.state = DriverState::Stopped;
                crate::engine_error!(SOURCE, "Frame {} failed, stopping: {}", frame.index, error);
                Err(error)
            }
        }
    }

    /// Consume ticks until the source runs dry or a frame fails.
    /// Returns the number of frames rendered by this call.
    pub fn run(&mut self, source: &mut dyn FrameSource) -> Result<u64> {
        let before = self.frames_rendered;
        while let Some(frame) = source.next_frame() {
            self.tick(frame)?;
        }
        Ok(self.frames_rendered - before)
    }

    /// Apply one host signal synchronously
    pub fn handle_event(&mut self, event: HostEvent) -> Result<()> {
        let context = &mut self.context;
        match event {
            HostEvent::Resized { width, height, device_pixel_ratio } => {
                context.resize(width, height, device_pixel_ratio)?;
            }
            HostEvent::PointerDown { x, y } => context.controls.pointer_down(x, y),
            HostEvent::PointerMove { x, y } => context.controls.pointer_move(x, y),
            HostEvent::PointerUp => context.controls.pointer_up(),
            HostEvent::Wheel { delta } => {
                context.controls.wheel(delta);
            }
        }
        Ok(())
    }

    fn step(&mut self, frame: FrameTick) -> Result<()> {
        let dt = match self.last_timestamp {
            Some(last) => frame.timestamp.saturating_sub(last).as_secs_f32(),
            None => 0.0,
        };
        self.last_timestamp = Some(frame.timestamp);
        let context = &mut self.context;

        let textures = context.textures.apply_events(&mut context.scene);
        if textures.bound > 0 {
            crate::engine_debug!(SOURCE, "Frame {}: {} texture(s) bound", frame.index, textures.bound);
        }

        context.controls.update(&mut context.camera);

        let entrance_done = match self.timeline.as_mut() {
            Some(timeline) => {
                timeline.advance(dt, &mut context.scene, &mut context.overlay)?;
                timeline.is_complete()
            }
            None => false,
        };
        if entrance_done {
            self.timeline = None;
        }

        for spin in &self.spins {
            spin.apply(&mut context.scene)?;
        }

        context.update_glow_view_vector()?;
        context.sync_camera_anchor();
        context.submit(frame.index)
    }
}

#[cfg(test)]
#[path = "driver_tests.rs"]
mod tests;
