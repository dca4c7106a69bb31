/// Entrance timeline: one-shot interpolated property changes.
///
/// Entries are placed on a shared clock when pushed. `advance` moves the
/// clock and writes interpolated values into the scene and the overlay.
/// An entry that reaches its end writes the exact end value, so a finished
/// timeline never leaves a property a rounding error short.
///
/// Explicit start values are written on the first `advance`, before any
/// entry runs, so elements scheduled later do not flash at their resting
/// value while they wait.

use glam::Vec3;
use crate::config::EntranceConfig;
use crate::error::Result;
use crate::engine_bail;
use crate::overlay::{Overlay, OverlayElementId, NAV, TITLE};
use crate::scene::{NodeKey, PlanetNodes, Scene};
use super::easing::Easing;

const SOURCE: &str = "planet3d::EntranceTimeline";

/// Property a tween writes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TweenTarget {
    NodeScale(NodeKey),
    OverlayOffsetY(OverlayElementId),
    OverlayOpacity(OverlayElementId),
}

/// Interpolated value. A scalar written to a scale sets all three axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TweenValue {
    Scalar(f32),
    Vector(Vec3),
}

impl TweenValue {
    pub fn to_vec3(self) -> Vec3 {
        match self {
            TweenValue::Scalar(s) => Vec3::splat(s),
            TweenValue::Vector(v) => v,
        }
    }

    /// Scalar value, or the x component of a vector
    pub fn to_scalar(self) -> f32 {
        match self {
            TweenValue::Scalar(s) => s,
            TweenValue::Vector(v) => v.x,
        }
    }

    pub fn lerp(self, to: TweenValue, t: f32) -> TweenValue {
        match (self, to) {
            (TweenValue::Scalar(a), TweenValue::Scalar(b)) => TweenValue::Scalar(a + (b - a) * t),
            (a, b) => TweenValue::Vector(a.to_vec3().lerp(b.to_vec3(), t)),
        }
    }
}

/// Where an entry starts on the timeline clock (seconds)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum Placement {
    /// When everything pushed so far has finished
    #[default]
    Sequential,
    /// Absolute offset from timeline start
    At(f32),
    /// Offset from the start of the previously pushed entry
    WithPrevious(f32),
}

/// One timeline entry
#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    pub target: TweenTarget,
    /// `None` captures the property's value when the entry starts
    pub from: Option<TweenValue>,
    pub to: TweenValue,
    /// Seconds
    pub duration: f32,
    pub placement: Placement,
    pub easing: Easing,
}

impl Tween {
    pub fn new(target: TweenTarget, to: TweenValue, duration: f32) -> Self {
        Self {
            target,
            from: None,
            to,
            duration,
            placement: Placement::Sequential,
            easing: Easing::default(),
        }
    }

    pub fn from_value(mut self, from: TweenValue) -> Self {
        self.from = Some(from);
        self
    }

    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }
}

#[derive(Debug, Clone)]
struct Entry {
    tween: Tween,
    start: f32,
    from: Option<TweenValue>,
    done: bool,
}

impl Entry {
    fn end(&self) -> f32 {
        self.start + self.tween.duration.max(0.0)
    }
}

/// Time-ordered set of tweens played once
#[derive(Debug, Clone, Default)]
pub struct EntranceTimeline {
    entries: Vec<Entry>,
    elapsed: f32,
    primed: bool,
}

impl EntranceTimeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Default entrance: planet scales in, then the navigation slides down,
    /// then the title fades in.
    pub fn entrance(config: &EntranceConfig, nodes: &PlanetNodes, overlay: &Overlay) -> Self {
        let mut timeline = Self::new();
        timeline.push(
            Tween::new(TweenTarget::NodeScale(nodes.planet_group), TweenValue::Scalar(1.0), config.duration)
                .from_value(TweenValue::Scalar(config.planet_scale_from))
                .with_easing(config.easing),
        );
        if let Some(nav) = overlay.find(NAV) {
            timeline.push(
                Tween::new(TweenTarget::OverlayOffsetY(nav), TweenValue::Scalar(0.0), config.duration)
                    .from_value(TweenValue::Scalar(config.nav_offset_from))
                    .with_easing(config.easing),
            );
        }
        if let Some(title) = overlay.find(TITLE) {
            timeline.push(
                Tween::new(TweenTarget::OverlayOpacity(title), TweenValue::Scalar(1.0), config.duration)
                    .from_value(TweenValue::Scalar(config.title_opacity_from))
                    .with_easing(config.easing),
            );
        }
        timeline
    }

    /// Place an entry on the clock according to its `placement`
    pub fn push(&mut self, tween: Tween) {
        let start = match tween.placement {
            Placement::Sequential => self.duration(),
            Placement::At(offset) => offset,
            Placement::WithPrevious(offset) => self.entries.last().map_or(0.0, |e| e.start) + offset,
        }
        .max(0.0);
        let from = tween.from;
        self.entries.push(Entry { tween, start, from, done: false });
    }

    /// Time at which the last entry ends
    pub fn duration(&self) -> f32 {
        self.entries.iter().map(Entry::end).fold(0.0, f32::max)
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Start offset of each entry, in push order
    pub fn start_times(&self) -> Vec<f32> {
        self.entries.iter().map(|e| e.start).collect()
    }

    pub fn is_complete(&self) -> bool {
        self.entries.iter().all(|e| e.done)
    }

    /// Move the clock by `dt` seconds and write every active entry
    pub fn advance(&mut self, dt: f32, scene: &mut Scene, overlay: &mut Overlay) -> Result<()> {
        if !self.primed {
            self.prime(scene, overlay)?;
        }
        let was_complete = self.is_complete();
        if dt.is_finite() && dt > 0.0 {
            self.elapsed += dt;
        }

        for entry in self.entries.iter_mut().filter(|e| !e.done) {
            if self.elapsed < entry.start {
                continue;
            }
            let from = match entry.from {
                Some(from) => from,
                None => {
                    let current = read(entry.tween.target, scene, overlay)?;
                    entry.from = Some(current);
                    current
                }
            };
            let duration = entry.tween.duration;
            let progress = if duration > 0.0 { (self.elapsed - entry.start) / duration } else { 1.0 };
            if progress >= 1.0 {
                write(entry.tween.target, entry.tween.to, scene, overlay)?;
                entry.done = true;
            } else {
                let value = from.lerp(entry.tween.to, entry.tween.easing.apply(progress));
                write(entry.tween.target, value, scene, overlay)?;
            }
        }

        if !was_complete && self.is_complete() {
            crate::engine_info!(SOURCE, "Entrance timeline finished after {:.3}s", self.elapsed);
        }
        Ok(())
    }

    /// Write explicit start values. Iterates in reverse so the earliest entry
    /// on a shared property wins.
    fn prime(&mut self, scene: &mut Scene, overlay: &mut Overlay) -> Result<()> {
        for entry in self.entries.iter().rev() {
            if let Some(from) = entry.tween.from {
                write(entry.tween.target, from, scene, overlay)?;
            }
        }
        self.primed = true;
        Ok(())
    }
}

fn read(target: TweenTarget, scene: &Scene, overlay: &Overlay) -> Result<TweenValue> {
    match target {
        TweenTarget::NodeScale(key) => match scene.transform(key) {
            Some(transform) => Ok(TweenValue::Vector(transform.scale)),
            None => engine_bail!(InvalidResource; SOURCE, "Tween target node no longer exists"),
        },
        TweenTarget::OverlayOffsetY(id) => match overlay.element(id) {
            Some(element) => Ok(TweenValue::Scalar(element.offset_y_percent())),
            None => engine_bail!(InvalidResource; SOURCE, "Tween target overlay element does not exist"),
        },
        TweenTarget::OverlayOpacity(id) => match overlay.element(id) {
            Some(element) => Ok(TweenValue::Scalar(element.opacity())),
            None => engine_bail!(InvalidResource; SOURCE, "Tween target overlay element does not exist"),
        },
    }
}

fn write(target: TweenTarget, value: TweenValue, scene: &mut Scene, overlay: &mut Overlay) -> Result<()> {
    match target {
        TweenTarget::NodeScale(key) => match scene.transform_mut(key) {
            Some(transform) => {
                transform.scale = value.to_vec3();
                Ok(())
            }
            None => engine_bail!(InvalidResource; SOURCE, "Tween target node no longer exists"),
        },
        TweenTarget::OverlayOffsetY(id) => overlay.set_offset_y(id, value.to_scalar()),
        TweenTarget::OverlayOpacity(id) => overlay.set_opacity(id, value.to_scalar()),
    }
}

#[cfg(test)]
#[path = "timeline_tests.rs"]
mod tests;
