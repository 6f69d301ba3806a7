//! Scene container and nearest-hit queries.
//!
//! The scene borrows its geometries and lights from the caller; nothing is
//! copied and the scene cannot outlive what it references.

use lux_math::{Interval, Ray, Vec3};

use crate::face::HIT_EPSILON;
use crate::{Face, Geometry, Light, Material};

/// Record of the nearest ray-face intersection.
#[derive(Clone, Copy)]
pub struct Intersection<'a> {
    /// Point of intersection
    pub point: Vec3,
    /// Ray parameter t where the intersection occurs
    pub distance: f32,
    /// The face that was hit
    pub face: &'a Face,
    /// The geometry owning `face`
    pub geometry: &'a dyn Geometry,
    /// Material of `face`
    pub material: &'a Material,
}

/// An insertion-ordered collection of geometries and lights.
#[derive(Default)]
pub struct Scene<'a> {
    geometries: Vec<&'a dyn Geometry>,
    lights: Vec<&'a Light>,
}

impl<'a> Scene<'a> {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a geometry. Insertion order breaks ties between equally
    /// distant hits.
    pub fn add_geometry(&mut self, geometry: &'a dyn Geometry) {
        self.geometries.push(geometry);
    }

    /// Append a light.
    pub fn add_light(&mut self, light: &'a Light) {
        self.lights.push(light);
    }

    pub fn geometries(&self) -> &[&'a dyn Geometry] {
        &self.geometries
    }

    pub fn lights(&self) -> &[&'a Light] {
        &self.lights
    }

    /// Get total triangle count across all geometries.
    pub fn total_triangle_count(&self) -> usize {
        self.geometries
            .iter()
            .map(|g| g.geometry_data().triangle_count())
            .sum()
    }

    /// Find the nearest intersection along `ray`.
    ///
    /// Every face of every geometry is tested against that geometry's own
    /// vertices. The smallest `t` wins; on a tie the first hit in insertion
    /// order is kept.
    pub fn intersect(&self, ray: &Ray) -> Option<Intersection<'a>> {
        let mut closest: Option<Intersection<'a>> = None;
        let mut ray_t = Interval::new(HIT_EPSILON, f32::INFINITY);

        for &geometry in &self.geometries {
            let mesh = geometry.geometry_data();
            for face in mesh.faces() {
                // The window is exclusive, so an equal t never replaces an earlier hit
                if let Some(hit) = face.intersect_within(ray, mesh.vertices(), ray_t) {
                    ray_t = ray_t.with_max(hit.t);
                    closest = Some(Intersection {
                        point: hit.point,
                        distance: hit.t,
                        face,
                        geometry,
                        material: &face.material,
                    });
                }
            }
        }

        closest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Color, Mesh};

    /// A single triangle facing +Z at depth `z`, large enough to cover the
    /// Z axis.
    fn wall(z: f32, color: Vec3) -> Mesh {
        let vertices = vec![
            Vec3::new(-1.0, -1.0, z),
            Vec3::new(1.0, -1.0, z),
            Vec3::new(0.0, 1.0, z),
        ];
        let face = Face::new([0, 1, 2]).with_material(Material::new(color));
        Mesh::new(vertices, vec![], vec![], vec![face]).unwrap()
    }

    #[test]
    fn test_scene_creation() {
        let near = wall(-1.0, Vec3::X);
        let light = Light::new(Vec3::Z, Color::WHITE, 1.0, 1.0).unwrap();

        let mut scene = Scene::new();
        scene.add_geometry(&near);
        scene.add_light(&light);

        assert_eq!(scene.geometries().len(), 1);
        assert_eq!(scene.lights().len(), 1);
        assert_eq!(scene.total_triangle_count(), 1);
    }

    #[test]
    fn test_nearest_hit_wins_regardless_of_order() {
        let far = wall(-3.0, Vec3::Y);
        let near = wall(-1.0, Vec3::X);

        let mut scene = Scene::new();
        scene.add_geometry(&far);
        scene.add_geometry(&near);

        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let hit = scene.intersect(&ray).unwrap();

        assert!((hit.distance - 1.0).abs() < 1e-5);
        assert_eq!(hit.material.diffuse_color, Vec3::X);
        assert!(std::ptr::eq(hit.geometry.geometry_data(), &near));
    }

    #[test]
    fn test_tie_keeps_first_inserted() {
        let first = wall(-2.0, Vec3::X);
        let second = wall(-2.0, Vec3::Y);

        let mut scene = Scene::new();
        scene.add_geometry(&first);
        scene.add_geometry(&second);

        let hit = scene.intersect(&Ray::new(Vec3::ZERO, Vec3::NEG_Z)).unwrap();
        assert_eq!(hit.material.diffuse_color, Vec3::X);
    }

    #[test]
    fn test_miss_returns_none() {
        let near = wall(-1.0, Vec3::X);
        let mut scene = Scene::new();
        scene.add_geometry(&near);

        assert!(scene.intersect(&Ray::new(Vec3::ZERO, Vec3::Z)).is_none());
    }

    #[test]
    fn test_empty_scene_never_hits() {
        let scene = Scene::new();
        assert!(scene.intersect(&Ray::new(Vec3::ZERO, Vec3::NEG_Z)).is_none());
        assert_eq!(scene.total_triangle_count(), 0);
    }

    #[test]
    fn test_faces_use_their_own_mesh_vertices() {
        // Both meshes use local indices 0..3; only the second is in front of the ray
        let off_axis = {
            let vertices = vec![
                Vec3::new(10.0, 10.0, -1.0),
                Vec3::new(11.0, 10.0, -1.0),
                Vec3::new(10.0, 11.0, -1.0),
            ];
            Mesh::new(vertices, vec![], vec![], vec![Face::new([0, 1, 2])]).unwrap()
        };
        let on_axis = wall(-4.0, Vec3::Z);

        let mut scene = Scene::new();
        scene.add_geometry(&off_axis);
        scene.add_geometry(&on_axis);

        let hit = scene.intersect(&Ray::new(Vec3::ZERO, Vec3::NEG_Z)).unwrap();
        assert!((hit.distance - 4.0).abs() < 1e-5);
    }
}
