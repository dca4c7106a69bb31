//! Scene module
//!
//! Node tree, procedural star field and the layered-planet scene builder.

mod node;
mod scene;
pub mod starfield;
pub mod builder;

pub use node::{Light, Node, NodeFlags, NodeKey, NodeKind, Transform};
pub use scene::Scene;
pub use starfield::{Star, StarFieldGenerator};
pub use builder::{BuiltScene, PlanetMaterials, PlanetNodes, SceneBuilder};
