//! Easing curves for timeline entries.

use serde::{Deserialize, Serialize};

/// Maps linear progress `t` in [0, 1] to eased progress.
///
/// Every curve satisfies `apply(0) == 0` and `apply(1) == 1`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Easing {
    Linear,
    /// Decelerating quadratic
    #[default]
    QuadOut,
    CubicOut,
    QuadInOut,
}

impl Easing {
    /// Eased progress; `t` is clamped to [0, 1] first
    pub fn apply(self, t: f32) -> f32 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Easing::Linear => t,
            Easing::QuadOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::CubicOut => 1.0 - (1.0 - t).powi(3),
            Easing::QuadInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "easing_tests.rs"]
mod tests;
