//! Cylinder primitive, infinite or clipped to a span around its origin.

use std::f64::consts::PI;

use umbra_core::Color;
use umbra_math::{solve_quadratic, DVec3, Interval, Ray, VectorExt};

use crate::primitive::{Appearance, Primitive};

/// An open cylinder around the axis `origin + alpha * axis`.
///
/// With a positive `span` the surface is limited to `|alpha| <= span`,
/// otherwise it extends forever. There are no end caps.
#[derive(Debug, Clone)]
pub struct Cylinder {
    origin: DVec3,
    axis: DVec3,
    radius: f64,
    span: f64,
    reflect: f64,
    appearance: Appearance,
    // Zero angle reference, perpendicular to the axis
    texture_x: DVec3,
}

impl Cylinder {
    /// Create a new cylinder. The direction is normalized here.
    pub fn new(
        origin: DVec3,
        direction: DVec3,
        radius: f64,
        span: f64,
        reflect: f64,
        appearance: Appearance,
    ) -> Self {
        let mut axis = direction;
        axis.normalize_in_place();

        let texture_x = if appearance.is_textured() {
            let mut texture_x = axis.generate_unit_vector().cross(axis);
            texture_x.normalize_in_place();
            texture_x
        } else {
            DVec3::ZERO
        };

        Self {
            origin,
            axis,
            radius,
            span,
            reflect,
            appearance,
            texture_x,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.span > 0.0
    }

    /// Signed distance along the axis from the origin to the foot of `point`.
    fn axial(&self, point: DVec3) -> f64 {
        (point - self.origin).dot(self.axis)
    }
}

impl Primitive for Cylinder {
    fn solve(&self, ray: &Ray, window: Interval) -> Option<f64> {
        if self.axis == DVec3::ZERO {
            return None;
        }

        // With T = O - A and the hit X = A + alpha * B on the axis:
        //   (P - X) . B = 0 and |P - X|² = r²
        // which reduces to a quadratic in t with alpha = d + t * b.
        let offset = ray.origin() - self.origin;
        let a = offset.dot(ray.direction());
        let b = self.axis.dot(ray.direction());
        let d = offset.dot(self.axis);
        let f = self.radius * self.radius - offset.dot(offset);

        let aa = 1.0 - b * b;
        let bb = 2.0 * (a - b * d);
        let cc = -(d * d) - f;

        let t = solve_quadratic(aa, bb, cc, window)?;

        if self.is_finite() {
            let alpha = d + t * b;
            if alpha < -self.span || alpha > self.span {
                return None;
            }
        }
        Some(t)
    }

    fn normal(&self, hit: DVec3) -> DVec3 {
        let foot = self.origin + self.axis * self.axial(hit);
        let mut normal = hit - foot;
        normal.normalize_in_place();
        normal
    }

    fn shade(&self, hit: DVec3, normal: DVec3) -> Color {
        match &self.appearance {
            Appearance::Flat(color) => *color,
            Appearance::Textured(texture) => {
                let u = self.texture_x.dot(normal).clamp(-1.0, 1.0).acos() / PI;
                let v = self.axial(hit) / (2.0 * PI * self.radius);
                texture.sample(u, v, 1.0)
            }
        }
    }

    fn reflectance(&self) -> f64 {
        self.reflect
    }
}
