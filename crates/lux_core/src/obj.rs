//! Wavefront OBJ loading.
//!
//! Files are read through `tobj` with triangulation on and separate index
//! streams for positions, normals and texture coordinates. Every model in the
//! file is merged into one [`Mesh`]; MTL libraries are ignored since materials
//! are assigned through [`Geometry::set_material`](crate::Geometry::set_material).

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use lux_math::{Vec2, Vec3};
use thiserror::Error;

use crate::error::GeometryError;
use crate::{Face, Mesh};

/// Errors that can occur during OBJ loading.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("OBJ parse error: {0}")]
    Parse(#[from] tobj::LoadError),

    #[error("No geometry found in OBJ file")]
    NoGeometry,

    #[error("Invalid geometry: {0}")]
    Geometry(#[from] GeometryError),
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

fn load_options() -> tobj::LoadOptions {
    tobj::LoadOptions {
        single_index: false,
        triangulate: true,
        ignore_points: true,
        ignore_lines: true,
        ..Default::default()
    }
}

/// Load an OBJ file into a single mesh.
pub fn load_obj<P: AsRef<Path>>(path: P) -> LoadResult<Mesh> {
    let path = path.as_ref();
    let mut reader = BufReader::new(File::open(path)?);
    let mesh = load_obj_from_reader(&mut reader)?;

    log::info!(
        "Loaded {}: {} vertices, {} normals, {} triangles",
        path.display(),
        mesh.vertex_count(),
        mesh.normals().len(),
        mesh.triangle_count()
    );
    Ok(mesh)
}

/// Load OBJ text from any buffered reader.
pub fn load_obj_from_reader<R: BufRead>(reader: &mut R) -> LoadResult<Mesh> {
    let (models, _materials) = tobj::load_obj_buf(reader, &load_options(), |mtl_path| {
        log::debug!("Ignoring material library {}", mtl_path.display());
        Ok(Default::default())
    })?;

    mesh_from_models(&models)
}

/// Merge `tobj` models into one mesh, offsetting each model's indices past
/// the attributes of the models before it.
fn mesh_from_models(models: &[tobj::Model]) -> LoadResult<Mesh> {
    let mut vertices = Vec::new();
    let mut normals = Vec::new();
    let mut texcoords = Vec::new();
    let mut faces = Vec::new();

    for model in models {
        let mesh = &model.mesh;
        if mesh.indices.is_empty() {
            continue;
        }

        let vertex_offset = vertices.len();
        let normal_offset = normals.len();
        let texcoord_offset = texcoords.len();

        vertices.extend(
            mesh.positions
                .chunks_exact(3)
                .map(|p| Vec3::new(p[0], p[1], p[2])),
        );
        normals.extend(
            mesh.normals
                .chunks_exact(3)
                .map(|n| Vec3::new(n[0], n[1], n[2])),
        );
        texcoords.extend(mesh.texcoords.chunks_exact(2).map(|t| Vec2::new(t[0], t[1])));

        // Corners without a normal or texcoord leave the whole stream empty
        let has_normals = mesh.normal_indices.len() == mesh.indices.len();
        let has_texcoords = mesh.texcoord_indices.len() == mesh.indices.len();

        let offset = |indices: &[u32], base: usize| -> Vec<usize> {
            indices.iter().map(|&i| i as usize + base).collect()
        };

        for (triangle_index, triangle) in mesh.indices.chunks(3).enumerate() {
            let start = triangle_index * 3;
            let range = start..start + triangle.len();

            faces.push(Face::from_indices(
                offset(triangle, vertex_offset),
                if has_texcoords {
                    offset(&mesh.texcoord_indices[range.clone()], texcoord_offset)
                } else {
                    Vec::new()
                },
                if has_normals {
                    offset(&mesh.normal_indices[range], normal_offset)
                } else {
                    Vec::new()
                },
            ));
        }

        log::debug!(
            "OBJ model '{}': {} triangles",
            model.name,
            mesh.indices.len() / 3
        );
    }

    if faces.is_empty() {
        return Err(LoadError::NoGeometry);
    }

    Ok(Mesh::new(vertices, normals, texcoords, faces)?)
}
