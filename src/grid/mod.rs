//! Grid interface consumed by the pinch processor.
//!
//! The processor only needs a few things from a grid: the cell count, the
//! half-face count (the length of the half-transmissibility array), the
//! cartesian extent, the local → cartesian index map and, per cell, its
//! half-faces tagged by direction.
//!
//! ```text
//! GridGeometry ──► build_cartesian_grid() ──► CartesianGrid ──► half_transmissibilities()
//!                                                  │
//!                                          impl PinchGrid ──► PinchProcessor::process()
//! ```
//!
//! Corner-point grids built elsewhere plug in by implementing [`PinchGrid`].

pub mod cartesian;
pub mod htrans;

pub use cartesian::{CartesianGrid, GridGeometry, build_cartesian_grid};
pub use htrans::half_transmissibilities;

/// Face direction relative to the owning cell.
///
/// `ZMinus` points towards smaller `k` (up), `ZPlus` towards larger `k`
/// (down).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaceDir {
    XMinus,
    XPlus,
    YMinus,
    YPlus,
    ZMinus,
    ZPlus,
}

impl FaceDir {
    pub const ALL: [FaceDir; 6] = [
        FaceDir::XMinus,
        FaceDir::XPlus,
        FaceDir::YMinus,
        FaceDir::YPlus,
        FaceDir::ZMinus,
        FaceDir::ZPlus,
    ];

    /// Axis of the face normal: 0 for x, 1 for y, 2 for z.
    pub fn axis(self) -> usize {
        match self {
            FaceDir::XMinus | FaceDir::XPlus => 0,
            FaceDir::YMinus | FaceDir::YPlus => 1,
            FaceDir::ZMinus | FaceDir::ZPlus => 2,
        }
    }

    pub fn opposite(self) -> FaceDir {
        match self {
            FaceDir::XMinus => FaceDir::XPlus,
            FaceDir::XPlus => FaceDir::XMinus,
            FaceDir::YMinus => FaceDir::YPlus,
            FaceDir::YPlus => FaceDir::YMinus,
            FaceDir::ZMinus => FaceDir::ZPlus,
            FaceDir::ZPlus => FaceDir::ZMinus,
        }
    }
}

/// One side of a face, as seen from the cell that owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HalfFace {
    /// Position of this half-face in the flat cell-face numbering; indexes
    /// the half-transmissibility array.
    pub index: usize,
    pub dir: FaceDir,
    /// Cell on the other side of the face, or `None` on the grid boundary.
    pub neighbor: Option<usize>,
}

/// Read-only view of a structured grid.
pub trait PinchGrid {
    /// Number of grid (active) cells.
    fn num_cells(&self) -> usize;

    /// Total number of half-faces over all cells.
    fn num_cell_faces(&self) -> usize;

    /// Cartesian extent `[nx, ny, nz]`.
    fn cart_dims(&self) -> [usize; 3];

    /// Cartesian index of grid cell `cell`.
    fn global_cell(&self, cell: usize) -> usize;

    /// Half-faces owned by `cell`.
    fn cell_faces(&self, cell: usize) -> &[HalfFace];

    fn cartesian_size(&self) -> usize {
        let [nx, ny, nz] = self.cart_dims();
        nx * ny * nz
    }

    /// First half-face of `cell` facing `dir`.
    fn half_face(&self, cell: usize, dir: FaceDir) -> Option<HalfFace> {
        self.cell_faces(cell).iter().find(|f| f.dir == dir).copied()
    }

    /// True if `a` and `b` share a face.
    fn are_neighbors(&self, a: usize, b: usize) -> bool {
        self.cell_faces(a).iter().any(|f| f.neighbor == Some(b))
    }
}

/// Cartesian index of `(i, j, k)` with `i` fastest.
#[inline]
pub fn cartesian_index(i: usize, j: usize, k: usize, dims: [usize; 3]) -> usize {
    debug_assert!(i < dims[0] && j < dims[1] && k < dims[2]);
    i + dims[0] * (j + dims[1] * k)
}

/// Inverse of [`cartesian_index`].
#[inline]
pub fn cartesian_ijk(index: usize, dims: [usize; 3]) -> [usize; 3] {
    let layer = dims[0] * dims[1];
    let k = index / layer;
    let rem = index % layer;
    [rem % dims[0], rem / dims[0], k]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cartesian_index_roundtrip_corners() {
        let dims = [4, 3, 5];
        assert_eq!(cartesian_index(0, 0, 0, dims), 0);
        assert_eq!(cartesian_index(1, 0, 3, dims), 1 + 4 * 3 * 3);
        assert_eq!(cartesian_index(3, 2, 4, dims), 4 * 3 * 5 - 1);
        assert_eq!(cartesian_ijk(1 + 4 * 3 * 3, dims), [1, 0, 3]);
        assert_eq!(cartesian_ijk(4 * 3 * 5 - 1, dims), [3, 2, 4]);
    }

    #[test]
    fn test_face_dir_opposite_and_axis() {
        for dir in FaceDir::ALL {
            assert_eq!(dir.opposite().opposite(), dir);
            assert_eq!(dir.opposite().axis(), dir.axis());
        }
        assert_eq!(FaceDir::ZPlus.axis(), 2);
    }
}
