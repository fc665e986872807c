//! Pinhole camera for primary ray generation.

use umbra_math::{DVec3, Ray, VectorExt};

/// Camera looking from `position` toward `target` in a Z-up world.
///
/// The field of view is horizontal. `roll` turns the image around the
/// viewing direction, in degrees.
#[derive(Debug, Clone)]
pub struct Camera {
    // Image settings
    pub image_width: u32,
    pub image_height: u32,

    // Placement
    position: DVec3,
    target: DVec3,
    roll: f64,
    fov: f64,

    // Cached computed values (set by initialize())
    pixel00_loc: DVec3,
    pixel_delta_u: DVec3,
    pixel_delta_v: DVec3,
    right: DVec3,
    up: DVec3,
    forward: DVec3,
}

impl Camera {
    /// Create a camera with a 640x480 image and a 60 degree field of view.
    pub fn new(position: DVec3, target: DVec3, roll: f64) -> Self {
        Self {
            image_width: 640,
            image_height: 480,
            position,
            target,
            roll,
            fov: 60.0,
            pixel00_loc: DVec3::ZERO,
            pixel_delta_u: DVec3::ZERO,
            pixel_delta_v: DVec3::ZERO,
            right: DVec3::X,
            up: DVec3::Z,
            forward: DVec3::Y,
        }
    }

    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.image_width = width;
        self.image_height = height;
        self
    }

    /// Set the horizontal field of view in degrees.
    pub fn with_fov(mut self, fov: f64) -> Self {
        self.fov = fov;
        self
    }

    pub fn position(&self) -> DVec3 {
        self.position
    }

    pub fn fov(&self) -> f64 {
        self.fov
    }

    /// Initialize the camera basis (must be called before generating rays).
    pub fn initialize(&mut self) {
        let mut forward = self.target - self.position;
        forward.normalize_in_place();
        if forward == DVec3::ZERO {
            forward = DVec3::Y;
        }

        // World up is +Z unless the camera looks straight along it
        let mut right = forward.cross(DVec3::Z);
        if right.length_squared() < 1e-12 {
            right = forward.cross(forward.generate_unit_vector());
        }
        right.normalize_in_place();
        let up = right.cross(forward);

        let (sin_roll, cos_roll) = self.roll.to_radians().sin_cos();
        self.right = right * cos_roll + up * sin_roll;
        self.up = up * cos_roll - right * sin_roll;
        self.forward = forward;

        let width = self.image_width.max(1) as f64;
        let height = self.image_height.max(1) as f64;

        // Viewport one unit in front of the camera
        let viewport_width = 2.0 * (self.fov.to_radians() / 2.0).tan();
        let viewport_height = viewport_width * height / width;

        let viewport_u = viewport_width * self.right;
        let viewport_v = -viewport_height * self.up;

        self.pixel_delta_u = viewport_u / width;
        self.pixel_delta_v = viewport_v / height;

        let viewport_upper_left =
            self.position + self.forward - viewport_u / 2.0 - viewport_v / 2.0;
        self.pixel00_loc = viewport_upper_left + 0.5 * (self.pixel_delta_u + self.pixel_delta_v);
    }

    /// Primary ray through the center of pixel (i, j), with a unit direction.
    pub fn ray_for_pixel(&self, i: u32, j: u32) -> Ray {
        let pixel_center =
            self.pixel00_loc + (i as f64) * self.pixel_delta_u + (j as f64) * self.pixel_delta_v;

        let mut direction = pixel_center - self.position;
        direction.normalize_in_place();
        Ray::new(self.position, direction)
    }
}
