//! Constant per-tick rotation of a node.

use std::f32::consts::TAU;
use glam::Vec3;
use crate::error::Result;
use crate::engine_bail;
use crate::scene::{NodeKey, Scene};

/// Adds `delta` (Euler radians) to a node's rotation every tick.
///
/// The increment is per tick, not per second, so the apparent speed follows
/// the host's frame rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spin {
    pub node: NodeKey,
    pub delta: Vec3,
}

impl Spin {
    /// Rotation about +Y
    pub fn about_y(node: NodeKey, delta: f32) -> Self {
        Self { node, delta: Vec3::new(0.0, delta, 0.0) }
    }

    /// Advance one tick, keeping every angle in [0, 2π)
    pub fn apply(&self, scene: &mut Scene) -> Result<()> {
        let Some(transform) = scene.transform_mut(self.node) else {
            engine_bail!(InvalidResource; "planet3d::Spin", "Spin target node no longer exists");
        };
        let r = transform.rotation + self.delta;
        transform.rotation = Vec3::new(r.x.rem_euclid(TAU), r.y.rem_euclid(TAU), r.z.rem_euclid(TAU));
        Ok(())
    }
}
