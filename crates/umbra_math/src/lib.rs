// Re-export glam for convenience
pub use glam::*;

// Umbra math types
mod interval;
mod quadratic;
mod ray;
mod vector;

pub use interval::Interval;
pub use quadratic::solve_quadratic;
pub use ray::Ray;
pub use vector::VectorExt;

/// Scene-space vector. All geometry runs in double precision.
pub type Vector3 = DVec3;
