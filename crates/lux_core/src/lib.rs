//! Lux Core - scene data and shading for the Lux ray tracer.
//!
//! This crate provides:
//!
//! - **Geometry**: `Mesh`, `Face` and the `Geometry` trait, plus procedural
//!   spheres, boxes and planes
//! - **Lighting**: point `Light`s and the additive shading model
//! - **Scene**: the borrowed `Scene` container and nearest-hit queries
//! - **OBJ support**: Wavefront OBJ loading
//!
//! # Example
//!
//! ```
//! use lux_core::{Color, Light, Material, Mesh, Ray, Scene, SceneError, Vec3};
//!
//! # fn main() -> Result<(), SceneError> {
//! let sphere = Mesh::sphere(Vec3::new(5.0, 0.0, 0.0), 1.0, 32, 16, Material::default());
//! let light = Light::new(Vec3::new(-3.0, 5.0, 0.0), Color::WHITE, 1.0, 1.0)?;
//!
//! let mut scene = Scene::new();
//! scene.add_geometry(&sphere);
//! scene.add_light(&light);
//!
//! let ray = Ray::new(Vec3::ZERO, Vec3::new(1.0, 0.01, 0.013).normalize());
//! let hit = scene.intersect(&ray);
//! assert!(hit.is_some_and(|hit| (hit.distance - 4.0).abs() < 0.05));
//! # Ok(())
//! # }
//! ```

pub mod color;
pub mod error;
pub mod face;
pub mod light;
pub mod material;
pub mod mesh;
pub mod obj;
pub mod primitives;
pub mod scene;

// Re-export commonly used types
pub use color::Color;
pub use error::{GeometryError, MeshAttribute, SceneError};
pub use face::{Face, FaceHit};
pub use light::Light;
pub use material::Material;
pub use mesh::{Geometry, Mesh};
pub use obj::{load_obj, load_obj_from_reader, LoadError};
pub use scene::{Intersection, Scene};

/// Re-export the math types used throughout the public API
pub use lux_math::{Ray, Vec2, Vec3};
