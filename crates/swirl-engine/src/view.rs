//! Read-only views of session buffers for presentation and export.

use swirl_grid::{ColorField, GridSize, ScalarField, VectorField};

use crate::registry::BufferKind;

/// A borrowed buffer, typed by what it holds.
#[derive(Clone, Copy, Debug)]
pub enum BufferView<'a> {
    /// An RGBA colour layer.
    Color(&'a ColorField),
    /// The velocity field.
    Vector(&'a VectorField),
    /// The pressure field.
    Scalar(&'a ScalarField),
}

impl<'a> BufferView<'a> {
    /// What the viewed buffer holds.
    pub fn kind(&self) -> BufferKind {
        match *self {
            Self::Color(_) => BufferKind::Color,
            Self::Vector(_) => BufferKind::Vector,
            Self::Scalar(_) => BufferKind::Scalar,
        }
    }

    /// Grid size of the viewed buffer.
    pub fn size(&self) -> GridSize {
        match *self {
            Self::Color(f) => f.size(),
            Self::Vector(f) => f.size(),
            Self::Scalar(f) => f.size(),
        }
    }

    /// Texel components flattened row-major, `kind().components()` per cell.
    pub fn as_flat(&self) -> &'a [f32] {
        match *self {
            Self::Color(f) => f.as_flat(),
            Self::Vector(f) => f.as_flat(),
            Self::Scalar(f) => f.as_flat(),
        }
    }

    /// The colour field, if this is a colour view.
    pub fn as_color(&self) -> Option<&'a ColorField> {
        match *self {
            Self::Color(f) => Some(f),
            _ => None,
        }
    }

    /// The velocity field, if this is a vector view.
    pub fn as_vector(&self) -> Option<&'a VectorField> {
        match *self {
            Self::Vector(f) => Some(f),
            _ => None,
        }
    }

    /// The scalar field, if this is a scalar view.
    pub fn as_scalar(&self) -> Option<&'a ScalarField> {
        match *self {
            Self::Scalar(f) => Some(f),
            _ => None,
        }
    }
}
