//! Error types for scene construction.

use std::fmt;

use thiserror::Error;

/// Per-corner attribute stream a face index points into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshAttribute {
    Vertex,
    Normal,
    TexCoord,
}

impl fmt::Display for MeshAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MeshAttribute::Vertex => "vertex",
            MeshAttribute::Normal => "normal",
            MeshAttribute::TexCoord => "texture coordinate",
        };
        f.write_str(name)
    }
}

/// Errors raised when a mesh fails validation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("Face {face} references {attribute} {index}, but the mesh only has {len}")]
    IndexOutOfRange {
        face: usize,
        attribute: MeshAttribute,
        index: usize,
        len: usize,
    },

    #[error("Face {face} has {found} {attribute} indices for {expected} corners")]
    CornerMismatch {
        face: usize,
        attribute: MeshAttribute,
        expected: usize,
        found: usize,
    },

    #[error("Face {face} has {corners} corners; only triangles are supported")]
    NotATriangle { face: usize, corners: usize },
}

/// Errors raised when building scene elements.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    #[error("Light attenuation must be positive and finite, got {0}")]
    InvalidAttenuation(f32),

    #[error("Light intensity must be finite, got {0}")]
    InvalidIntensity(f32),
}
