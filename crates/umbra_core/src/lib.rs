//! Umbra Core - scene files and textures for the Umbra ray tracer.
//!
//! This crate provides:
//!
//! - **Scene files**: a line-oriented reader that validates every entry
//!   against its motif and yields typed [`SceneRecord`]s
//! - **Textures**: image loading, caching and sampling
//!
//! # Example
//!
//! ```ignore
//! use umbra_core::load_scene_file;
//!
//! let records = load_scene_file("scenes/room.scene")?;
//! println!("Loaded {} entries", records.len());
//! ```

pub mod scene_file;
pub mod texture;

// Re-export commonly used types
pub use scene_file::{
    load_scene_file, parse_scene, CameraRecord, CylinderRecord, LightRecord, ParseError,
    PlaneRecord, SceneRecord, SphereRecord, Surface,
};
pub use texture::{Texture, TextureCache, TextureError};

/// RGB color with components nominally in [0, 1].
pub type Color = umbra_math::DVec3;
