//! Extra vector operations on top of glam's `DVec3`.

use glam::DVec3;

/// Vector helpers used to build orthonormal frames.
pub trait VectorExt {
    /// Normalize in place. The zero vector stays the zero vector.
    fn normalize_in_place(&mut self);

    /// Produce a unit vector that is never parallel to `self`.
    ///
    /// The coordinate of smallest magnitude is dropped and the other two are
    /// swapped with one sign flipped, which always yields a perpendicular
    /// vector. Returns zero for the zero vector.
    fn generate_unit_vector(&self) -> Self;
}

impl VectorExt for DVec3 {
    fn normalize_in_place(&mut self) {
        *self = self.normalize_or_zero();
    }

    fn generate_unit_vector(&self) -> Self {
        let abs = self.abs();
        let perpendicular = if abs.x <= abs.y && abs.x <= abs.z {
            DVec3::new(0.0, -self.z, self.y)
        } else if abs.y <= abs.z {
            DVec3::new(self.z, 0.0, -self.x)
        } else {
            DVec3::new(-self.y, self.x, 0.0)
        };
        perpendicular.normalize_or_zero()
    }
}
