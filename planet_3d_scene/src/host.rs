//! Host event adapter.
//!
//! The scene reacts to a small set of input signals expressed in
//! device-independent pixels. `WinitEventTranslator` turns winit window
//! events (physical pixels) into those signals.

use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};

/// Input signal consumed by the animation driver
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostEvent {
    /// Display surface changed size (logical pixels)
    Resized { width: f32, height: f32, device_pixel_ratio: f32 },
    PointerDown { x: f32, y: f32 },
    PointerMove { x: f32, y: f32 },
    PointerUp,
    /// Positive scrolls away from the target
    Wheel { delta: f32 },
}

/// Stateful winit → `HostEvent` converter.
///
/// Tracks the scale factor, the physical surface size and the cursor
/// position, since winit reports button presses without coordinates.
#[derive(Debug, Clone)]
pub struct WinitEventTranslator {
    scale_factor: f64,
    physical_size: PhysicalSize<u32>,
    cursor: Option<(f32, f32)>,
}

impl WinitEventTranslator {
    pub fn new(physical_size: PhysicalSize<u32>, scale_factor: f64) -> Self {
        Self {
            scale_factor: sanitize_scale(scale_factor),
            physical_size,
            cursor: None,
        }
    }

    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    /// Last known cursor position in logical pixels
    pub fn cursor(&self) -> Option<(f32, f32)> {
        self.cursor
    }

    /// Translate one window event; `None` for events the scene ignores
    pub fn translate(&mut self, event: &WindowEvent) -> Option<HostEvent> {
        match event {
            WindowEvent::Resized(size) => Some(self.resized(*size)),
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                Some(self.scale_factor_changed(*scale_factor))
            }
            WindowEvent::CursorMoved { position, .. } => Some(self.cursor_moved(*position)),
            WindowEvent::CursorLeft { .. } => {
                self.cursor = None;
                None
            }
            WindowEvent::MouseInput { state, button, .. } => self.mouse_input(*state, *button),
            WindowEvent::MouseWheel { delta, .. } => self.mouse_wheel(*delta),
            _ => None,
        }
    }

    pub fn resized(&mut self, size: PhysicalSize<u32>) -> HostEvent {
        self.physical_size = size;
        self.current_size()
    }

    pub fn scale_factor_changed(&mut self, scale_factor: f64) -> HostEvent {
        self.scale_factor = sanitize_scale(scale_factor);
        self.current_size()
    }

    pub fn cursor_moved(&mut self, position: PhysicalPosition<f64>) -> HostEvent {
        let logical = position.to_logical::<f32>(self.scale_factor);
        self.cursor = Some((logical.x, logical.y));
        HostEvent::PointerMove { x: logical.x, y: logical.y }
    }

    /// Left button only; a press before any cursor position is known is dropped
    pub fn mouse_input(&mut self, state: ElementState, button: MouseButton) -> Option<HostEvent> {
        if button != MouseButton::Left {
            return None;
        }
        match state {
            ElementState::Pressed => self.cursor.map(|(x, y)| HostEvent::PointerDown { x, y }),
            ElementState::Released => Some(HostEvent::PointerUp),
        }
    }

    pub fn mouse_wheel(&mut self, delta: MouseScrollDelta) -> Option<HostEvent> {
        let delta = match delta {
            MouseScrollDelta::LineDelta(_, y) => -y,
            MouseScrollDelta::PixelDelta(position) => -(position.y / self.scale_factor) as f32,
        };
        (delta != 0.0).then_some(HostEvent::Wheel { delta })
    }

    fn current_size(&self) -> HostEvent {
        let logical = self.physical_size.to_logical::<f32>(self.scale_factor);
        HostEvent::Resized {
            width: logical.width,
            height: logical.height,
            device_pixel_ratio: self.scale_factor as f32,
        }
    }
}

fn sanitize_scale(scale_factor: f64) -> f64 {
    if scale_factor > 0.0 && scale_factor.is_finite() { scale_factor } else { 1.0 }
}

#[cfg(test)]
#[path = "host_tests.rs"]
mod tests;
