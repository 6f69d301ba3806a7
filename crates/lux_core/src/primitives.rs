//! Procedural primitives.
//!
//! Each constructor produces an ordinary triangle [`Mesh`] whose origin is
//! the shape's center, with outward per-vertex normals and texture
//! coordinates.

use std::f32::consts::PI;

use lux_math::{Vec2, Vec3};

use crate::{Face, Material, Mesh};

impl Mesh {
    /// A UV sphere tessellated into `segments` slices around Y and `rings`
    /// stacks from pole to pole.
    ///
    /// `segments` is raised to at least 3 and `rings` to at least 2.
    pub fn sphere(center: Vec3, radius: f32, segments: u32, rings: u32, material: Material) -> Mesh {
        let segments = segments.max(3) as usize;
        let rings = rings.max(2) as usize;
        let radius = radius.abs();

        let mut vertices = Vec::with_capacity((rings + 1) * (segments + 1));
        let mut normals = Vec::with_capacity(vertices.capacity());
        let mut texcoords = Vec::with_capacity(vertices.capacity());

        // The seam column is duplicated so texture coordinates wrap cleanly
        for ring in 0..=rings {
            let theta = PI * ring as f32 / rings as f32;
            let (sin_theta, cos_theta) = theta.sin_cos();

            for segment in 0..=segments {
                let phi = 2.0 * PI * segment as f32 / segments as f32;
                let (sin_phi, cos_phi) = phi.sin_cos();

                let direction = Vec3::new(sin_theta * cos_phi, cos_theta, sin_theta * sin_phi);
                vertices.push(center + direction * radius);
                normals.push(direction);
                texcoords.push(Vec2::new(
                    segment as f32 / segments as f32,
                    ring as f32 / rings as f32,
                ));
            }
        }

        let stride = segments + 1;
        let mut faces = Vec::with_capacity(2 * rings * segments);
        for ring in 0..rings {
            for segment in 0..segments {
                let a = ring * stride + segment;
                let b = a + stride;
                let c = b + 1;
                let d = a + 1;

                // Skip the zero-area triangles that collapse onto the poles
                if ring != 0 {
                    faces.push(triangle([a, d, b], &material));
                }
                if ring != rings - 1 {
                    faces.push(triangle([d, c, b], &material));
                }
            }
        }

        Mesh::assemble(vertices, normals, texcoords, faces, center)
    }

    /// An axis-aligned box centered on `center` with the given edge lengths
    /// (width along X, height along Y, depth along Z).
    ///
    /// Each side has its own four vertices so normals stay flat.
    pub fn cuboid(center: Vec3, size: Vec3, material: Material) -> Mesh {
        let half = size.abs() * 0.5;

        // (normal, tangent u, tangent v) with u x v = normal
        let sides = [
            (Vec3::X, Vec3::NEG_Z, Vec3::Y),
            (Vec3::NEG_X, Vec3::Z, Vec3::Y),
            (Vec3::Y, Vec3::X, Vec3::NEG_Z),
            (Vec3::NEG_Y, Vec3::X, Vec3::Z),
            (Vec3::Z, Vec3::X, Vec3::Y),
            (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
        ];

        let mut vertices = Vec::with_capacity(24);
        let mut normals = Vec::with_capacity(6);
        let mut texcoords = Vec::with_capacity(4);
        let mut faces = Vec::with_capacity(12);

        texcoords.extend([
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
        ]);

        for (side, (normal, u, v)) in sides.into_iter().enumerate() {
            let base = vertices.len();
            for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
                let offset = normal + u * su + v * sv;
                vertices.push(center + offset * half);
            }
            normals.push(normal);

            for corners in [[0, 1, 2], [0, 2, 3]] {
                faces.push(
                    Face::new(corners.map(|c| base + c))
                        .with_normals([side; 3])
                        .with_texcoords(corners)
                        .with_material(material.clone()),
                );
            }
        }

        Mesh::assemble(vertices, normals, texcoords, faces, center)
    }

    /// A square of side `size` centered on `origin`, facing `normal`.
    pub fn plane(origin: Vec3, normal: Vec3, size: f32, material: Material) -> Mesh {
        let normal = normal.try_normalize().unwrap_or(Vec3::Y);
        let helper = if normal.y.abs() < 0.999 { Vec3::Y } else { Vec3::X };
        let u = helper.cross(normal).normalize();
        let v = normal.cross(u);
        let half = size.abs() * 0.5;

        let vertices = vec![
            origin + (-u - v) * half,
            origin + (u - v) * half,
            origin + (u + v) * half,
            origin + (-u + v) * half,
        ];
        let texcoords = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
        ];
        let faces = [[0, 1, 2], [0, 2, 3]]
            .into_iter()
            .map(|corners| {
                Face::new(corners)
                    .with_normals([0; 3])
                    .with_texcoords(corners)
                    .with_material(material.clone())
            })
            .collect();

        Mesh::assemble(vertices, vec![normal], texcoords, faces, origin)
    }
}

fn triangle(corners: [usize; 3], material: &Material) -> Face {
    Face::new(corners)
        .with_normals(corners)
        .with_texcoords(corners)
        .with_material(material.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lux_math::Ray;

    #[test]
    fn test_sphere_vertices_on_surface() {
        let center = Vec3::new(5.0, 0.0, 0.0);
        let mesh = Mesh::sphere(center, 2.0, 16, 8, Material::default());

        for v in mesh.vertices() {
            assert!(((*v - center).length() - 2.0).abs() < 1e-4);
        }
        for n in mesh.normals() {
            assert!((n.length() - 1.0).abs() < 1e-4);
        }
        assert_eq!(mesh.origin(), center);
    }

    #[test]
    fn test_sphere_face_count() {
        let mesh = Mesh::sphere(Vec3::ZERO, 1.0, 8, 4, Material::default());
        // Pole rings contribute one triangle per segment, middle rings two
        assert_eq!(mesh.triangle_count(), 8 * 2 + 8 * 2 * 2);
    }

    #[test]
    fn test_sphere_is_hit_along_axis() {
        let mesh = Mesh::sphere(Vec3::new(5.0, 0.0, 0.0), 1.0, 32, 16, Material::default());
        // Slightly off-axis so the ray does not pass exactly through a vertex
        let ray = Ray::new(Vec3::ZERO, Vec3::new(1.0, 0.01, 0.013).normalize());

        let nearest = mesh
            .faces()
            .iter()
            .filter_map(|f| f.intersect(&ray, mesh.vertices()))
            .map(|hit| hit.t)
            .fold(f32::INFINITY, f32::min);

        // Tessellation pulls the surface slightly inside the true sphere
        assert!(nearest > 3.99 && nearest < 4.05, "nearest hit at {nearest}");
    }

    #[test]
    fn test_cuboid_layout() {
        let mesh = Mesh::cuboid(Vec3::ZERO, Vec3::new(2.0, 4.0, 6.0), Material::default());

        assert_eq!(mesh.vertex_count(), 24);
        assert_eq!(mesh.triangle_count(), 12);
        for v in mesh.vertices() {
            assert_eq!(v.abs(), Vec3::new(1.0, 2.0, 3.0));
        }
    }

    #[test]
    fn test_cuboid_normals_match_winding() {
        let mesh = Mesh::cuboid(Vec3::new(1.0, 1.0, 1.0), Vec3::ONE, Material::default());

        for face in mesh.faces() {
            let flat = face.flat_normal(mesh.vertices()).unwrap();
            let stored = mesh.normals()[face.normal_indices[0]];
            assert!((flat - stored).length() < 1e-5);
        }
    }

    #[test]
    fn test_plane_faces_normal() {
        let mesh = Mesh::plane(Vec3::new(0.0, -1.0, 0.0), Vec3::Y, 10.0, Material::default());

        assert_eq!(mesh.triangle_count(), 2);
        for face in mesh.faces() {
            let flat = face.flat_normal(mesh.vertices()).unwrap();
            assert!((flat - Vec3::Y).length() < 1e-5);
        }

        let ray = Ray::new(Vec3::new(1.0, 3.0, 2.0), Vec3::NEG_Y);
        let hit = mesh
            .faces()
            .iter()
            .find_map(|f| f.intersect(&ray, mesh.vertices()))
            .unwrap();
        assert!((hit.t - 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_plane_with_zero_normal_falls_back_to_up() {
        let mesh = Mesh::plane(Vec3::ZERO, Vec3::ZERO, 1.0, Material::default());
        assert_eq!(mesh.normals()[0], Vec3::Y);
    }
}
