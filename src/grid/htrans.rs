use crate::error::PinchError;
use crate::grid::{CartesianGrid, PinchGrid};

/// Two-point flux half-transmissibilities for every half-face of `grid`.
///
/// `permeability` holds `[kx, ky, kz]` per grid cell. For a box cell the
/// half-transmissibility of a face is `k_dir * A / d`, where `A` is the face
/// area and `d` the cell-centre-to-face distance along the face normal.
///
/// The result is indexed by [`HalfFace::index`](crate::grid::HalfFace::index)
/// and has length [`PinchGrid::num_cell_faces`].
pub fn half_transmissibilities(
    grid: &CartesianGrid,
    permeability: &[[f64; 3]],
) -> Result<Vec<f64>, PinchError> {
    if permeability.len() != grid.num_cells() {
        return Err(PinchError::LengthMismatch {
            array: "permeability",
            expected: grid.num_cells(),
            actual: permeability.len(),
        });
    }

    let mut htrans = vec![0.0; grid.num_cell_faces()];
    for (cell, perm) in permeability.iter().enumerate() {
        for face in grid.cell_faces(cell) {
            let k = perm[face.dir.axis()];
            htrans[face.index] = k * grid.face_area(face.index) / grid.face_distance(face.index);
        }
    }
    Ok(htrans)
}
