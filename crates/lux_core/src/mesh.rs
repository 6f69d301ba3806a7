//! Mesh geometry representation for the Lux scene.
//!
//! A mesh owns flat arrays of positions, normals and texture coordinates,
//! and a list of faces indexing into them. Faces never own geometry data.

use lux_math::{euler_rotation_degrees, Vec2, Vec3};

use crate::error::{GeometryError, MeshAttribute};
use crate::{Face, Material};

/// Anything the renderer can intersect.
///
/// Procedural shapes are `Mesh` constructors rather than separate
/// implementors, so every geometry ends up as the same triangle soup.
pub trait Geometry: Send + Sync {
    /// The triangle data to intersect and shade.
    fn geometry_data(&self) -> &Mesh;

    /// Assign `material` to every face.
    fn set_material(&mut self, material: Material);
}

/// A triangle mesh with per-mesh attribute arrays.
///
/// Invariants, checked by [`Mesh::new`]:
/// - every face index lies within the matching array;
/// - non-empty normal/texcoord index lists have one entry per corner;
/// - no face has more than three corners;
/// - every non-degenerate face has normal indices (flat normals are
///   generated for faces that arrive without them);
/// - normals are unit length.
#[derive(Clone, Debug, PartialEq)]
pub struct Mesh {
    vertices: Vec<Vec3>,
    normals: Vec<Vec3>,
    texcoords: Vec<Vec2>,
    faces: Vec<Face>,
    /// Pivot point for rotations
    origin: Vec3,
}

impl Mesh {
    /// Build and validate a mesh.
    ///
    /// Supplied normals are normalized. Faces without normal indices get the
    /// flat face normal on all three corners.
    pub fn new(
        vertices: Vec<Vec3>,
        normals: Vec<Vec3>,
        texcoords: Vec<Vec2>,
        faces: Vec<Face>,
    ) -> Result<Self, GeometryError> {
        let mut mesh = Self {
            vertices,
            normals: normals.into_iter().map(Vec3::normalize_or_zero).collect(),
            texcoords,
            faces,
            origin: Vec3::ZERO,
        };
        mesh.validate()?;
        mesh.ensure_normals();
        Ok(mesh)
    }

    /// Assemble a mesh whose indices are correct by construction.
    pub(crate) fn assemble(
        vertices: Vec<Vec3>,
        normals: Vec<Vec3>,
        texcoords: Vec<Vec2>,
        faces: Vec<Face>,
        origin: Vec3,
    ) -> Self {
        debug_assert!(faces.iter().all(|f| f.vertex_indices.len() == 3));
        Self {
            vertices,
            normals,
            texcoords,
            faces,
            origin,
        }
    }

    /// Set the pivot point used by [`Mesh::rotate`].
    pub fn with_origin(mut self, origin: Vec3) -> Self {
        self.origin = origin;
        self
    }

    fn validate(&self) -> Result<(), GeometryError> {
        for (face_index, face) in self.faces.iter().enumerate() {
            let corners = face.vertex_indices.len();
            if corners > 3 {
                return Err(GeometryError::NotATriangle {
                    face: face_index,
                    corners,
                });
            }

            let streams = [
                (MeshAttribute::Vertex, &face.vertex_indices, self.vertices.len()),
                (MeshAttribute::Normal, &face.normal_indices, self.normals.len()),
                (MeshAttribute::TexCoord, &face.texcoord_indices, self.texcoords.len()),
            ];

            for (attribute, indices, len) in streams {
                if !indices.is_empty() && indices.len() != corners {
                    return Err(GeometryError::CornerMismatch {
                        face: face_index,
                        attribute,
                        expected: corners,
                        found: indices.len(),
                    });
                }
                if let Some(&index) = indices.iter().find(|&&i| i >= len) {
                    return Err(GeometryError::IndexOutOfRange {
                        face: face_index,
                        attribute,
                        index,
                        len,
                    });
                }
            }
        }
        Ok(())
    }

    /// Give every triangle without normal indices its flat face normal.
    fn ensure_normals(&mut self) {
        let mut generated = 0;

        for face in &mut self.faces {
            if !face.normal_indices.is_empty() || face.is_degenerate() {
                continue;
            }
            let Some(normal) = face.flat_normal(&self.vertices) else {
                continue;
            };
            let index = self.normals.len();
            self.normals.push(normal);
            face.normal_indices = vec![index; 3];
            generated += 1;
        }

        if generated > 0 {
            log::debug!("Generated flat normals for {} of {} faces", generated, self.faces.len());
        }
    }

    /// Rotate vertices and normals by Euler angles in degrees, applied
    /// X, then Y, then Z, about the mesh origin.
    pub fn rotate(&mut self, x_degrees: f32, y_degrees: f32, z_degrees: f32) {
        let rotation = euler_rotation_degrees(x_degrees, y_degrees, z_degrees);
        let origin = self.origin;

        for vertex in &mut self.vertices {
            *vertex = rotation * (*vertex - origin) + origin;
        }
        for normal in &mut self.normals {
            *normal = (rotation * *normal).normalize_or_zero();
        }
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    pub fn texcoords(&self) -> &[Vec2] {
        &self.texcoords
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Get the number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.faces.len()
    }

    /// Get the number of vertices in the mesh.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }
}

impl Geometry for Mesh {
    fn geometry_data(&self) -> &Mesh {
        self
    }

    fn set_material(&mut self, material: Material) {
        for face in &mut self.faces {
            face.material = material.clone();
        }
    }
}
