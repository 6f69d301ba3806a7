//! Triangle faces referencing a mesh's shared attribute arrays.
//!
//! Uses the Möller-Trumbore algorithm for ray-triangle intersection.

use lux_math::{Interval, Ray, Vec3};

use crate::Material;

/// Determinant magnitude below which a ray is treated as parallel to the
/// triangle plane.
pub const PARALLEL_EPSILON: f32 = 1e-8;

/// Smallest accepted ray parameter. Hits at or behind the origin are rejected.
pub const HIT_EPSILON: f32 = 1e-6;

/// A triangle defined by indices into its owning mesh.
///
/// Texture coordinate and normal index lists are empty when absent.
#[derive(Clone, Debug, PartialEq)]
pub struct Face {
    pub vertex_indices: Vec<usize>,
    pub texcoord_indices: Vec<usize>,
    pub normal_indices: Vec<usize>,
    pub material: Material,
}

/// Result of a successful ray-face test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceHit {
    /// Ray parameter of the hit
    pub t: f32,
    /// World-space hit point
    pub point: Vec3,
}

impl Face {
    /// Create a triangle with the default material and no normals or
    /// texture coordinates.
    pub fn new(vertex_indices: [usize; 3]) -> Self {
        Self::from_indices(vertex_indices.to_vec(), Vec::new(), Vec::new())
    }

    /// Create a face from raw index lists, as produced by mesh ingestion.
    pub fn from_indices(
        vertex_indices: Vec<usize>,
        texcoord_indices: Vec<usize>,
        normal_indices: Vec<usize>,
    ) -> Self {
        Self {
            vertex_indices,
            texcoord_indices,
            normal_indices,
            material: Material::default(),
        }
    }

    pub fn with_normals(mut self, normal_indices: [usize; 3]) -> Self {
        self.normal_indices = normal_indices.to_vec();
        self
    }

    pub fn with_texcoords(mut self, texcoord_indices: [usize; 3]) -> Self {
        self.texcoord_indices = texcoord_indices.to_vec();
        self
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    /// Faces with fewer than three vertex indices can never be hit.
    pub fn is_degenerate(&self) -> bool {
        self.vertex_indices.len() < 3
    }

    /// The three corner positions, or `None` for degenerate faces or
    /// indices outside `vertices`.
    pub fn corners(&self, vertices: &[Vec3]) -> Option<[Vec3; 3]> {
        if self.is_degenerate() {
            return None;
        }
        Some([
            *vertices.get(self.vertex_indices[0])?,
            *vertices.get(self.vertex_indices[1])?,
            *vertices.get(self.vertex_indices[2])?,
        ])
    }

    /// Unit normal of the triangle plane from the winding `v0, v1, v2`.
    ///
    /// Zero for zero-area triangles.
    pub fn flat_normal(&self, vertices: &[Vec3]) -> Option<Vec3> {
        let [v0, v1, v2] = self.corners(vertices)?;
        Some((v1 - v0).cross(v2 - v0).normalize_or_zero())
    }

    /// Intersect a ray with this face, accepting any `t > HIT_EPSILON`.
    pub fn intersect(&self, ray: &Ray, vertices: &[Vec3]) -> Option<FaceHit> {
        self.intersect_within(ray, vertices, Interval::new(HIT_EPSILON, f32::INFINITY))
    }

    /// Möller-Trumbore ray-triangle intersection restricted to `ray_t`
    /// (exclusive on both ends).
    pub fn intersect_within(
        &self,
        ray: &Ray,
        vertices: &[Vec3],
        ray_t: Interval,
    ) -> Option<FaceHit> {
        let [v0, v1, v2] = self.corners(vertices)?;

        let edge1 = v1 - v0;
        let edge2 = v2 - v0;

        let pvec = ray.direction().cross(edge2);
        let det = edge1.dot(pvec);

        // Ray is parallel to triangle
        if det.abs() < PARALLEL_EPSILON {
            return None;
        }

        let inv_det = 1.0 / det;
        let tvec = ray.origin() - v0;
        let u = tvec.dot(pvec) * inv_det;

        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let qvec = tvec.cross(edge1);
        let v = ray.direction().dot(qvec) * inv_det;

        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = edge2.dot(qvec) * inv_det;

        if !ray_t.surrounds(t) {
            return None;
        }

        Some(FaceHit {
            t,
            point: ray.at(t),
        })
    }

    /// Barycentric weights of `point` for the corners `v0, v1, v2`.
    ///
    /// Projects `point - v0` onto the edge basis `(v1 - v0, v2 - v0)`.
    /// Returns `None` for degenerate triangles.
    pub fn barycentric(&self, point: Vec3, vertices: &[Vec3]) -> Option<[f32; 3]> {
        let [v0, v1, v2] = self.corners(vertices)?;

        let e0 = v1 - v0;
        let e1 = v2 - v0;
        let vp = point - v0;

        let d00 = e0.dot(e0);
        let d01 = e0.dot(e1);
        let d11 = e1.dot(e1);
        let d20 = vp.dot(e0);
        let d21 = vp.dot(e1);

        let denom = d00 * d11 - d01 * d01;
        if denom.abs() <= f32::EPSILON * d00 * d11 {
            return None;
        }

        let w1 = (d11 * d20 - d01 * d21) / denom;
        let w2 = (d00 * d21 - d01 * d20) / denom;
        Some([1.0 - w1 - w2, w1, w2])
    }

    /// Surface normal at `point`, blended from the three corner normals
    /// by barycentric weight and renormalized.
    ///
    /// Returns `None` when the face has no usable normals.
    pub fn interpolated_normal(
        &self,
        point: Vec3,
        vertices: &[Vec3],
        normals: &[Vec3],
    ) -> Option<Vec3> {
        if self.normal_indices.len() < 3 {
            return None;
        }
        let weights = self.barycentric(point, vertices)?;

        let mut normal = Vec3::ZERO;
        for (weight, &index) in weights.iter().zip(&self.normal_indices) {
            normal += *normals.get(index)? * *weight;
        }
        Some(normal.normalize_or_zero())
    }
}
