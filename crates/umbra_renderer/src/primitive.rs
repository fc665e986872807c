//! Primitive trait and hit records for ray-object intersection.

use std::sync::Arc;

use umbra_core::{Color, Texture};
use umbra_math::{DVec3, Interval, Ray};

use crate::{Cylinder, Plane, Sphere};

/// How a primitive is colored.
#[derive(Clone, Debug)]
pub enum Appearance {
    /// Same color everywhere
    Flat(Color),
    /// Color looked up in a shared texture
    Textured(Arc<Texture>),
}

impl Appearance {
    pub fn is_textured(&self) -> bool {
        matches!(self, Appearance::Textured(_))
    }
}

/// Capabilities shared by every renderable primitive.
pub trait Primitive: Send + Sync {
    /// Distance along `ray` to the surface, if it lies inside `window`.
    fn solve(&self, ray: &Ray, window: Interval) -> Option<f64>;

    /// Unit surface normal at a point on the surface.
    fn normal(&self, hit: DVec3) -> DVec3;

    /// Unshadowed surface color at a point with its normal.
    fn shade(&self, hit: DVec3, normal: DVec3) -> Color;

    /// Reflectance in [0, 1]. Stored for scene files that set it; the
    /// direct-lighting tracer does not use it.
    fn reflectance(&self) -> f64;
}

/// Tagged reference to one primitive of the scene.
#[derive(Clone, Copy, Debug)]
pub enum PrimitiveRef<'a> {
    Plane(&'a Plane),
    Sphere(&'a Sphere),
    Cylinder(&'a Cylinder),
}

impl<'a> PrimitiveRef<'a> {
    /// The referenced primitive behind the shared trait.
    pub fn as_primitive(&self) -> &'a dyn Primitive {
        match *self {
            PrimitiveRef::Plane(plane) => plane,
            PrimitiveRef::Sphere(sphere) => sphere,
            PrimitiveRef::Cylinder(cylinder) => cylinder,
        }
    }

    /// Kind name, for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            PrimitiveRef::Plane(_) => "plane",
            PrimitiveRef::Sphere(_) => "sphere",
            PrimitiveRef::Cylinder(_) => "cylinder",
        }
    }

    #[inline]
    pub fn solve(&self, ray: &Ray, window: Interval) -> Option<f64> {
        self.as_primitive().solve(ray, window)
    }
}

/// Nearest intersection found along a ray.
#[derive(Clone, Copy, Debug)]
pub struct Hit<'a> {
    /// Distance along the ray
    pub t: f64,
    /// What was hit
    pub primitive: PrimitiveRef<'a>,
}
