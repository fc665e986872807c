//! Direct illumination: one primary ray, one shadow ray.

use umbra_core::Color;
use umbra_math::{DVec3, Interval, Ray};

use crate::Scene;

/// Offset used to keep rays from hitting the surface they start on.
pub const EPSILON: f64 = 1e-5;

/// Color seen along a primary ray.
pub fn trace_ray(scene: &Scene, ray: &Ray) -> Color {
    let settings = scene.settings();

    let window = Interval::new(EPSILON, settings.cutoff_distance);
    let Some(hit) = scene.nearest_hit(ray, window) else {
        return settings.background;
    };

    let primitive = hit.primitive.as_primitive();
    let point = ray.at(hit.t);
    let outward = primitive.normal(point);
    let surface = primitive.shade(point, outward);

    // Light the side the ray arrived from
    let normal = if outward.dot(ray.direction()) > 0.0 {
        -outward
    } else {
        outward
    };

    let to_light = scene.light().vector_to(point);
    let distance = to_light.length();
    let attenuation = settings
        .light_model
        .attenuation(distance, settings.max_distance);

    let visibility = if in_shadow(scene, point, normal, to_light, distance) {
        settings.shadow_factor
    } else {
        1.0
    };

    surface * attenuation * visibility
}

/// Whether `point` gets no direct light.
fn in_shadow(scene: &Scene, point: DVec3, normal: DVec3, to_light: DVec3, distance: f64) -> bool {
    if normal.dot(to_light) <= 0.0 {
        return true;
    }

    // Shadow rays stop at the cutoff like primary rays.
    let reach = distance.min(scene.settings().cutoff_distance);
    let shadow_ray = Ray::new(point + EPSILON * normal, to_light / distance);
    scene.occluded(&shadow_ray, Interval::new(EPSILON, reach))
}
