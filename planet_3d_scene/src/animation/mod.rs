//! Animation module
//!
//! Per-frame driver, frame sources, spins and the entrance timeline.

mod easing;
pub mod frame_source;
pub mod spin;
pub mod timeline;
pub mod driver;

pub use easing::Easing;
pub use frame_source::{FixedStepFrameSource, FrameSource, FrameTick};
pub use spin::Spin;
pub use timeline::{EntranceTimeline, Placement, Tween, TweenTarget, TweenValue};
pub use driver::{AnimationDriver, DriverState};
