//! Sphere primitive for ray tracing.

use std::f64::consts::PI;

use umbra_core::Color;
use umbra_math::{solve_quadratic, DVec3, Interval, Ray, VectorExt};

use crate::primitive::{Appearance, Primitive};

/// A sphere primitive.
#[derive(Debug, Clone)]
pub struct Sphere {
    center: DVec3,
    radius: f64,
    reflect: f64,
    appearance: Appearance,
    // Texture frame: texture_y is the pole axis
    texture_x: DVec3,
    texture_y: DVec3,
    texture_z: DVec3,
}

impl Sphere {
    /// Create a new sphere. `axis` orients the texture and defaults to +Z in
    /// scene files.
    pub fn new(
        center: DVec3,
        radius: f64,
        axis: DVec3,
        reflect: f64,
        appearance: Appearance,
    ) -> Self {
        let (texture_x, texture_y, texture_z) = if appearance.is_textured() {
            let mut texture_y = axis;
            texture_y.normalize_in_place();

            let seed = texture_y.generate_unit_vector();
            let mut texture_x = seed.cross(texture_y);
            texture_x.normalize_in_place();

            let mut texture_z = texture_y.cross(texture_x);
            texture_z.normalize_in_place();
            (texture_x, texture_y, texture_z)
        } else {
            (DVec3::ZERO, DVec3::ZERO, DVec3::ZERO)
        };

        Self {
            center,
            radius,
            reflect,
            appearance,
            texture_x,
            texture_y,
            texture_z,
        }
    }

    pub fn center(&self) -> DVec3 {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Fractional texture coordinates for a unit normal.
    ///
    /// Latitude runs from the pole opposite `texture_y` (v = 0) to the pole
    /// along it (v = 1). Longitude is unwrapped with `acos`, which leaves a
    /// seam where `texture_z · normal` changes sign.
    fn texture_coords(&self, normal: DVec3) -> (f64, f64) {
        let phi = (-self.texture_y.dot(normal)).clamp(-1.0, 1.0).acos();
        let v = phi / PI;

        let sin_phi = phi.sin();
        let theta = if sin_phi.abs() < 1e-12 {
            0.0
        } else {
            (normal.dot(self.texture_x) / sin_phi).clamp(-1.0, 1.0).acos() / (2.0 * PI)
        };

        let u = if self.texture_z.dot(normal) > 0.0 {
            theta
        } else {
            1.0 - theta
        };
        (u, v)
    }
}

impl Primitive for Sphere {
    fn solve(&self, ray: &Ray, window: Interval) -> Option<f64> {
        let oc = ray.origin() - self.center;
        let a = ray.direction().dot(ray.direction());
        let b = 2.0 * ray.direction().dot(oc);
        let c = oc.dot(oc) - self.radius * self.radius;

        solve_quadratic(a, b, c, window)
    }

    fn normal(&self, hit: DVec3) -> DVec3 {
        let mut normal = hit - self.center;
        normal.normalize_in_place();
        normal
    }

    fn shade(&self, _hit: DVec3, normal: DVec3) -> Color {
        match &self.appearance {
            Appearance::Flat(color) => *color,
            Appearance::Textured(texture) => {
                let (u, v) = self.texture_coords(normal);
                texture.sample(u, v, 1.0)
            }
        }
    }

    fn reflectance(&self) -> f64 {
        self.reflect
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use umbra_core::Texture;

    const WINDOW: Interval = Interval {
        min: 1e-6,
        max: 1e6,
    };

    fn ball() -> Sphere {
        Sphere::new(
            DVec3::new(0.0, 0.0, -10.0),
            2.0,
            DVec3::Z,
            0.0,
            Appearance::Flat(Color::new(0.5, 0.5, 0.5)),
        )
    }

    #[test]
    fn test_sphere_hit_reports_near_side() {
        let sphere = ball();
        let ray = Ray::new(DVec3::ZERO, DVec3::NEG_Z);
        // Roots at d - r = 8 and d + r = 12
        let t = sphere.solve(&ray, WINDOW).unwrap();
        assert!((t - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_sphere_hit_with_unnormalized_direction() {
        let sphere = ball();
        let ray = Ray::new(DVec3::ZERO, DVec3::new(0.0, 0.0, -2.0));
        let t = sphere.solve(&ray, WINDOW).unwrap();
        assert!((ray.at(t) - DVec3::new(0.0, 0.0, -8.0)).length() < 1e-9);
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = ball();
        let ray = Ray::new(DVec3::ZERO, DVec3::Y);
        assert_eq!(sphere.solve(&ray, WINDOW), None);
    }

    #[test]
    fn test_sphere_behind_ray() {
        let sphere = ball();
        let ray = Ray::new(DVec3::ZERO, DVec3::Z);
        assert_eq!(sphere.solve(&ray, WINDOW), None);
    }

    #[test]
    fn test_ray_from_inside_misses() {
        // The near root is behind the origin and the far root is never tried.
        let sphere = ball();
        let ray = Ray::new(sphere.center(), DVec3::X);
        assert_eq!(sphere.solve(&ray, WINDOW), None);
    }

    #[test]
    fn test_tangent_ray() {
        let sphere = ball();
        let ray = Ray::new(DVec3::new(2.0, 0.0, 0.0), DVec3::NEG_Z);
        let t = sphere.solve(&ray, WINDOW).unwrap();
        assert!((t - 10.0).abs() < 1e-6);
    }

    #[test]
    fn test_sphere_normals_are_unit() {
        let sphere = ball();
        let directions = [
            DVec3::X,
            DVec3::NEG_Y,
            DVec3::new(1.0, 2.0, -3.0).normalize(),
            DVec3::new(-0.3, 0.1, 0.9).normalize(),
        ];
        for d in directions {
            let hit = sphere.center() + d * sphere.radius();
            let n = sphere.normal(hit);
            assert!((n.length() - 1.0).abs() < 1e-12);
            assert!((n - d).length() < 1e-12);
        }
    }

    #[test]
    fn test_texture_coords_poles_and_equator() {
        let texture = Arc::new(Texture::solid_color(Color::ONE));
        let sphere = Sphere::new(DVec3::ZERO, 1.0, DVec3::Z, 0.0, Appearance::Textured(texture));

        let (_, v_south) = sphere.texture_coords(DVec3::NEG_Z);
        let (u_north, v_north) = sphere.texture_coords(DVec3::Z);
        assert!(v_south.abs() < 1e-12);
        assert!((v_north - 1.0).abs() < 1e-12);
        assert!(u_north.is_finite());

        for n in [DVec3::X, DVec3::Y, DVec3::NEG_X, DVec3::NEG_Y] {
            let (u, v) = sphere.texture_coords(n);
            assert!((v - 0.5).abs() < 1e-12);
            assert!((0.0..=1.0).contains(&u), "u = {}", u);
        }
    }

    #[test]
    fn test_textured_shade_samples_texture() {
        let texture = Arc::new(Texture::solid_color(Color::new(0.3, 0.6, 0.9)));
        let sphere = Sphere::new(DVec3::ZERO, 1.0, DVec3::Y, 0.25, Appearance::Textured(texture));
        let n = DVec3::new(0.6, 0.0, 0.8);
        assert_eq!(sphere.shade(n, n), Color::new(0.3, 0.6, 0.9));
        assert_eq!(sphere.reflectance(), 0.25);
    }
}
