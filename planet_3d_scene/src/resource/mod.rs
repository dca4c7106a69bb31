//! Resource module
//!
//! Geometry, materials and textures referenced by scene nodes.

pub mod geometry;
pub mod material;
pub mod texture;

pub use geometry::{Geometry, GeometryData, GeometryKey, GeometryVertex, SphereGeometry};
pub use material::{
    Material, MaterialDesc, MaterialKey, ParamValue, RenderState, ShadingModel, Side,
    TextureChannel,
};
pub use texture::{
    TextureBindings, TextureData, TextureEvent, TextureEventSender, TextureHandle,
    TextureLoader, TextureRequest, TextureUpdate, ThreadedTextureLoader,
};
