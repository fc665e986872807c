//! Infinite plane primitive.

use umbra_core::Color;
use umbra_math::{DVec3, Interval, Ray, VectorExt};

use crate::primitive::{Appearance, Primitive};

/// An infinite plane through `center` with a fixed normal.
#[derive(Debug, Clone)]
pub struct Plane {
    center: DVec3,
    normal: DVec3,
    /// World units covered by one texture tile
    scale: f64,
    reflect: f64,
    appearance: Appearance,
    // Texture basis, only meaningful when textured
    texture_x: DVec3,
    texture_y: DVec3,
}

impl Plane {
    /// Create a new plane. The normal is normalized here.
    pub fn new(
        center: DVec3,
        normal: DVec3,
        scale: f64,
        reflect: f64,
        appearance: Appearance,
    ) -> Self {
        let mut normal = normal;
        normal.normalize_in_place();

        let (texture_x, texture_y) = if appearance.is_textured() {
            let seed = normal.generate_unit_vector();
            let mut texture_x = seed.cross(normal);
            texture_x.normalize_in_place();
            let mut texture_y = normal.cross(texture_x);
            texture_y.normalize_in_place();
            (texture_x, texture_y)
        } else {
            (DVec3::ZERO, DVec3::ZERO)
        };

        Self {
            center,
            normal,
            scale,
            reflect,
            appearance,
            texture_x,
            texture_y,
        }
    }

    pub fn center(&self) -> DVec3 {
        self.center
    }
}

impl Primitive for Plane {
    fn solve(&self, ray: &Ray, window: Interval) -> Option<f64> {
        let denom = ray.direction().dot(self.normal);
        if denom == 0.0 {
            return None;
        }

        let t = -(ray.origin() - self.center).dot(self.normal) / denom;
        window.contains(t).then_some(t)
    }

    fn normal(&self, _hit: DVec3) -> DVec3 {
        self.normal
    }

    fn shade(&self, hit: DVec3, _normal: DVec3) -> Color {
        match &self.appearance {
            Appearance::Flat(color) => *color,
            Appearance::Textured(texture) => {
                let offset = hit - self.center;
                let u = offset.dot(self.texture_x);
                let v = offset.dot(self.texture_y);
                texture.sample(u, v, self.scale)
            }
        }
    }

    fn reflectance(&self) -> f64 {
        self.reflect
    }
}
