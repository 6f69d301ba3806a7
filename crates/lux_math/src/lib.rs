// Re-export glam for convenience
pub use glam::*;

// Lux math types
mod interval;
mod ray;
mod transform;

pub use interval::Interval;
pub use ray::Ray;
pub use transform::{euler_rotation_degrees, rotation_between, ALIGNMENT_EPSILON};
