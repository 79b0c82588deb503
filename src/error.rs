use thiserror::Error;

use crate::grid::FaceDir;

/// Fatal precondition violations reported by the pinch processor and the
/// reference grid builder.
///
/// None of these are recoverable by retrying: the inputs are rejected before
/// any connection is produced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PinchError {
    /// A threshold is negative or not a finite number.
    #[error("{name} must be a finite non-negative number, got {value}")]
    InvalidThreshold { name: &'static str, value: f64 },

    /// An input array does not match the grid size it is indexed by.
    #[error("{array} has {actual} entries, expected {expected}")]
    LengthMismatch {
        array: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A cell property array is neither cartesian-sized nor grid-cell-sized.
    #[error(
        "{array} has {actual} entries, expected {cartesian} (cartesian) or {cells} (grid cells)"
    )]
    PropertyLength {
        array: &'static str,
        actual: usize,
        cartesian: usize,
        cells: usize,
    },

    /// A grid cell maps to a global index outside the cartesian extent.
    #[error("cell {cell} has global index {global}, cartesian size is {cartesian_size}")]
    GlobalIndexOutOfRange {
        cell: usize,
        global: usize,
        cartesian_size: usize,
    },

    /// A half-face points outside the half-transmissibility array.
    #[error("cell {cell} has half-face index {index}, grid has {num_cell_faces} cell-faces")]
    HalfFaceOutOfRange {
        cell: usize,
        index: usize,
        num_cell_faces: usize,
    },

    /// A cell bounding a pinched run has no half-face in the vertical direction.
    #[error("cell {cell} has no {dir:?} half-face")]
    MissingVerticalFace { cell: usize, dir: FaceDir },

    /// Geometry handed to the reference grid builder is unusable.
    #[error("invalid grid geometry: {0}")]
    InvalidGeometry(String),
}
