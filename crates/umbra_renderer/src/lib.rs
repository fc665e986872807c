//! Umbra Renderer - CPU ray tracing with hard shadows.
//!
//! One ray per pixel, nearest-hit search over planes, spheres and
//! cylinders, a single shadow ray toward the point light, and distance
//! based light falloff. The image is split into row blocks rendered in
//! parallel, each block writing only its own rows.

mod block;
mod camera;
mod cylinder;
mod light;
mod plane;
mod primitive;
mod renderer;
mod scene;
mod sphere;
mod tracer;

pub use block::{generate_row_blocks, render_block, RowBlock};
pub use camera::Camera;
pub use cylinder::Cylinder;
pub use light::{Light, LightModel};
pub use plane::Plane;
pub use primitive::{Appearance, Hit, Primitive, PrimitiveRef};
pub use renderer::{
    color_to_rgb, render, render_with_workers, ImageBuffer, RenderError, RenderResult, Rgb8,
};
pub use scene::{RenderSettings, Scene, SceneError, SceneResult};
pub use sphere::Sphere;
pub use tracer::{trace_ray, EPSILON};

/// Re-export math and color types
pub use umbra_core::{Color, Texture};
pub use umbra_math::{Interval, Ray, Vector3};
