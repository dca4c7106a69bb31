/// Frame-ready signal abstraction.
///
/// The host decides when a frame happens; the driver only consumes ticks.
/// A windowed host yields one tick per redraw, tests step a fixed number.

use std::time::Duration;

/// One frame-ready signal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameTick {
    /// Zero-based frame counter
    pub index: u64,
    /// Monotonic host time of this frame
    pub timestamp: Duration,
}

/// Source of frame ticks
pub trait FrameSource {
    /// Next frame, or `None` once the host stops signalling
    fn next_frame(&mut self) -> Option<FrameTick>;
}

/// Yields `count` ticks spaced `step` apart, starting at time zero
#[derive(Debug, Clone)]
pub struct FixedStepFrameSource {
    step: Duration,
    count: u64,
    next: u64,
}

impl FixedStepFrameSource {
    pub fn new(step: Duration, count: u64) -> Self {
        Self { step, count, next: 0 }
    }

    /// `count` ticks at 60 frames per second
    pub fn at_60_fps(count: u64) -> Self {
        Self::new(Duration::from_secs_f64(1.0 / 60.0), count)
    }

    pub fn remaining(&self) -> u64 {
        self.count - self.next
    }
}

impl FrameSource for FixedStepFrameSource {
    fn next_frame(&mut self) -> Option<FrameTick> {
        if self.next >= self.count {
            return None;
        }
        let index = self.next;
        self.next += 1;
        let timestamp = self.step.saturating_mul(u32::try_from(index).unwrap_or(u32::MAX));
        Some(FrameTick { index, timestamp })
    }
}
