use crate::error::PinchError;
use crate::grid::{FaceDir, HalfFace, PinchGrid, cartesian_ijk, cartesian_index};

/// Box-cell description of a structured grid.
///
/// Cells have a uniform footprint `dx × dy` and a per-cartesian-cell
/// thickness `dz`. A cartesian cell becomes a grid cell when it is active and
/// has positive thickness.
#[derive(Debug, Clone)]
pub struct GridGeometry {
    /// Cartesian extent `[nx, ny, nz]`.
    pub dims: [usize; 3],
    /// Cell size along x in m.
    pub dx: f64,
    /// Cell size along y in m.
    pub dy: f64,
    /// Thickness per cartesian cell in m (length `nx*ny*nz`).
    pub dz: Vec<f64>,
    /// ACTNUM per cartesian cell. Empty means all active.
    pub actnum: Vec<bool>,
    /// If true, vertical faces join cells across a stack of zero-thickness
    /// cells, so the cells above and below touch directly.
    pub bridge_collapsed: bool,
}

impl GridGeometry {
    /// All-active grid with uniform cell sizes.
    pub fn uniform(dims: [usize; 3], dx: f64, dy: f64, dz: f64) -> Self {
        Self {
            dims,
            dx,
            dy,
            dz: vec![dz; dims[0] * dims[1] * dims[2]],
            actnum: Vec::new(),
            bridge_collapsed: false,
        }
    }

    pub fn with_dz(mut self, dz: Vec<f64>) -> Self {
        self.dz = dz;
        self
    }

    pub fn with_actnum(mut self, actnum: Vec<bool>) -> Self {
        self.actnum = actnum;
        self
    }

    pub fn bridge_collapsed(mut self, bridge: bool) -> Self {
        self.bridge_collapsed = bridge;
        self
    }

    pub fn cartesian_size(&self) -> usize {
        self.dims[0] * self.dims[1] * self.dims[2]
    }

    fn is_active(&self, global: usize) -> bool {
        self.actnum.is_empty() || self.actnum[global]
    }
}

/// Structured grid of box cells with flat half-face storage.
///
/// Every cell owns six half-faces stored contiguously; boundary half-faces
/// have no neighbor. A half-face's position in the flat storage is its
/// cell-face index.
#[derive(Debug, Clone)]
pub struct CartesianGrid {
    dims: [usize; 3],
    global_cell: Vec<usize>,
    cart_to_local: Vec<Option<usize>>,
    facepos: Vec<usize>,
    faces: Vec<HalfFace>,
    /// Face area per half-face in m^2.
    face_areas: Vec<f64>,
    /// Cell-centre-to-face distance per half-face in m.
    face_distances: Vec<f64>,
    volumes: Vec<f64>,
}

impl CartesianGrid {
    /// Grid cell at cartesian index `global`, if it exists.
    pub fn local_cell(&self, global: usize) -> Option<usize> {
        self.cart_to_local.get(global).copied().flatten()
    }

    /// Cell volume in m^3.
    pub fn volume(&self, cell: usize) -> f64 {
        self.volumes[cell]
    }

    /// Area of half-face `index` in m^2.
    pub fn face_area(&self, index: usize) -> f64 {
        self.face_areas[index]
    }

    /// Cell-centre-to-face distance of half-face `index` in m.
    pub fn face_distance(&self, index: usize) -> f64 {
        self.face_distances[index]
    }
}

impl PinchGrid for CartesianGrid {
    fn num_cells(&self) -> usize {
        self.global_cell.len()
    }

    fn num_cell_faces(&self) -> usize {
        self.faces.len()
    }

    fn cart_dims(&self) -> [usize; 3] {
        self.dims
    }

    fn global_cell(&self, cell: usize) -> usize {
        self.global_cell[cell]
    }

    fn cell_faces(&self, cell: usize) -> &[HalfFace] {
        &self.faces[self.facepos[cell]..self.facepos[cell + 1]]
    }
}

/// Build a [`CartesianGrid`] from a [`GridGeometry`].
///
/// - One grid cell per active cartesian cell with `dz > 0`, numbered in
///   cartesian order.
/// - Six half-faces per cell in [`FaceDir::ALL`] order.
/// - Lateral neighbors are the adjacent `i`/`j` cells when they exist.
/// - Vertical neighbors are the adjacent `k` cells; with `bridge_collapsed`
///   the search skips over zero-thickness cartesian cells.
pub fn build_cartesian_grid(geometry: &GridGeometry) -> Result<CartesianGrid, PinchError> {
    let dims = geometry.dims;
    let n = geometry.cartesian_size();
    if n == 0 {
        return Err(PinchError::InvalidGeometry(format!(
            "cartesian dimensions {dims:?} contain a zero extent"
        )));
    }
    for (name, size) in [("dx", geometry.dx), ("dy", geometry.dy)] {
        if !(size.is_finite() && size > 0.0) {
            return Err(PinchError::InvalidGeometry(format!(
                "{name} must be positive, got {size}"
            )));
        }
    }
    if geometry.dz.len() != n {
        return Err(PinchError::LengthMismatch {
            array: "dz",
            expected: n,
            actual: geometry.dz.len(),
        });
    }
    if !geometry.actnum.is_empty() && geometry.actnum.len() != n {
        return Err(PinchError::LengthMismatch {
            array: "actnum",
            expected: n,
            actual: geometry.actnum.len(),
        });
    }
    if let Some((g, dz)) = geometry
        .dz
        .iter()
        .enumerate()
        .find(|(_, dz)| !(dz.is_finite() && **dz >= 0.0))
    {
        return Err(PinchError::InvalidGeometry(format!(
            "cell {g} has invalid thickness {dz}"
        )));
    }

    let mut global_cell = Vec::new();
    let mut cart_to_local = vec![None; n];
    for g in 0..n {
        if geometry.is_active(g) && geometry.dz[g] > 0.0 {
            cart_to_local[g] = Some(global_cell.len());
            global_cell.push(g);
        }
    }

    let nc = global_cell.len();
    let mut facepos = Vec::with_capacity(nc + 1);
    let mut faces = Vec::with_capacity(6 * nc);
    let mut face_areas = Vec::with_capacity(6 * nc);
    let mut face_distances = Vec::with_capacity(6 * nc);
    let mut volumes = Vec::with_capacity(nc);

    facepos.push(0);
    for &g in &global_cell {
        let dz = geometry.dz[g];
        let sizes = [geometry.dx, geometry.dy, dz];
        volumes.push(geometry.dx * geometry.dy * dz);

        for dir in FaceDir::ALL {
            let axis = dir.axis();
            let area = sizes[(axis + 1) % 3] * sizes[(axis + 2) % 3];
            faces.push(HalfFace {
                index: faces.len(),
                dir,
                neighbor: neighbor_of(geometry, &cart_to_local, g, dir),
            });
            face_areas.push(area);
            face_distances.push(0.5 * sizes[axis]);
        }
        facepos.push(faces.len());
    }

    Ok(CartesianGrid {
        dims,
        global_cell,
        cart_to_local,
        facepos,
        faces,
        face_areas,
        face_distances,
        volumes,
    })
}

fn neighbor_of(
    geometry: &GridGeometry,
    cart_to_local: &[Option<usize>],
    global: usize,
    dir: FaceDir,
) -> Option<usize> {
    let dims = geometry.dims;
    let [i, j, k] = cartesian_ijk(global, dims);
    match dir {
        FaceDir::XMinus if i > 0 => cart_to_local[cartesian_index(i - 1, j, k, dims)],
        FaceDir::XPlus if i + 1 < dims[0] => cart_to_local[cartesian_index(i + 1, j, k, dims)],
        FaceDir::YMinus if j > 0 => cart_to_local[cartesian_index(i, j - 1, k, dims)],
        FaceDir::YPlus if j + 1 < dims[1] => cart_to_local[cartesian_index(i, j + 1, k, dims)],
        FaceDir::ZMinus => (0..k)
            .rev()
            .map(|kk| cartesian_index(i, j, kk, dims))
            .find_map(|g| vertical_step(geometry, cart_to_local, g))
            .flatten(),
        FaceDir::ZPlus => (k + 1..dims[2])
            .map(|kk| cartesian_index(i, j, kk, dims))
            .find_map(|g| vertical_step(geometry, cart_to_local, g))
            .flatten(),
        _ => None,
    }
}

/// Outcome of stepping onto cartesian cell `g` while searching vertically:
/// `None` keeps searching, `Some(x)` stops with result `x`.
fn vertical_step(
    geometry: &GridGeometry,
    cart_to_local: &[Option<usize>],
    g: usize,
) -> Option<Option<usize>> {
    match cart_to_local[g] {
        Some(cell) => Some(Some(cell)),
        None if geometry.bridge_collapsed && geometry.dz[g] == 0.0 => None,
        None => Some(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_active_grid_counts() {
        let grid = build_cartesian_grid(&GridGeometry::uniform([2, 1, 3], 10.0, 10.0, 1.0)).unwrap();
        assert_eq!(grid.num_cells(), 6);
        assert_eq!(grid.num_cell_faces(), 36);
        assert_eq!(grid.cartesian_size(), 6);

        // Cell 0 is (0,0,0): x+ neighbor is cell 1, z+ neighbor is cell 2.
        assert_eq!(grid.half_face(0, FaceDir::XPlus).unwrap().neighbor, Some(1));
        assert_eq!(grid.half_face(0, FaceDir::ZPlus).unwrap().neighbor, Some(2));
        assert_eq!(grid.half_face(0, FaceDir::ZMinus).unwrap().neighbor, None);
        assert!(grid.are_neighbors(0, 2));
        assert!(!grid.are_neighbors(0, 4));
    }

    #[test]
    fn test_half_face_indices_are_flat_positions() {
        let grid = build_cartesian_grid(&GridGeometry::uniform([1, 1, 2], 1.0, 1.0, 1.0)).unwrap();
        let mut expected = 0;
        for cell in 0..grid.num_cells() {
            for face in grid.cell_faces(cell) {
                assert_eq!(face.index, expected);
                expected += 1;
            }
        }
        assert_eq!(expected, grid.num_cell_faces());
    }

    #[test]
    fn test_inactive_and_zero_thickness_cells_are_removed() {
        // Column of 4: k=1 inactive, k=2 zero thickness.
        let geometry = GridGeometry::uniform([1, 1, 4], 1.0, 1.0, 2.0)
            .with_dz(vec![2.0, 2.0, 0.0, 2.0])
            .with_actnum(vec![true, false, true, true]);
        let grid = build_cartesian_grid(&geometry).unwrap();

        assert_eq!(grid.num_cells(), 2);
        assert_eq!(grid.global_cell(0), 0);
        assert_eq!(grid.global_cell(1), 3);
        assert_eq!(grid.local_cell(1), None);
        assert_eq!(grid.local_cell(3), Some(1));
        assert!(!grid.are_neighbors(0, 1));
    }

    #[test]
    fn test_bridge_collapsed_joins_across_zero_thickness() {
        let geometry = GridGeometry::uniform([1, 1, 4], 1.0, 1.0, 2.0)
            .with_dz(vec![2.0, 0.0, 0.0, 2.0])
            .bridge_collapsed(true);
        let grid = build_cartesian_grid(&geometry).unwrap();

        assert_eq!(grid.num_cells(), 2);
        assert!(grid.are_neighbors(0, 1));
        assert!(grid.are_neighbors(1, 0));
    }

    #[test]
    fn test_bridge_stops_at_inactive_thick_cell() {
        let geometry = GridGeometry::uniform([1, 1, 3], 1.0, 1.0, 2.0)
            .with_actnum(vec![true, false, true])
            .bridge_collapsed(true);
        let grid = build_cartesian_grid(&geometry).unwrap();
        assert!(!grid.are_neighbors(0, 1));
    }

    #[test]
    fn test_face_geometry() {
        let geometry = GridGeometry::uniform([1, 1, 1], 2.0, 3.0, 4.0);
        let grid = build_cartesian_grid(&geometry).unwrap();
        let top = grid.half_face(0, FaceDir::ZMinus).unwrap();
        let east = grid.half_face(0, FaceDir::XPlus).unwrap();
        assert!((grid.face_area(top.index) - 6.0).abs() < 1e-12);
        assert!((grid.face_distance(top.index) - 2.0).abs() < 1e-12);
        assert!((grid.face_area(east.index) - 12.0).abs() < 1e-12);
        assert!((grid.face_distance(east.index) - 1.0).abs() < 1e-12);
        assert!((grid.volume(0) - 24.0).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_bad_geometry() {
        let bad_dz = GridGeometry::uniform([1, 1, 2], 1.0, 1.0, 1.0).with_dz(vec![1.0]);
        assert!(matches!(
            build_cartesian_grid(&bad_dz),
            Err(PinchError::LengthMismatch { array: "dz", .. })
        ));

        let negative = GridGeometry::uniform([1, 1, 2], 1.0, 1.0, 1.0).with_dz(vec![1.0, -1.0]);
        assert!(matches!(
            build_cartesian_grid(&negative),
            Err(PinchError::InvalidGeometry(_))
        ));

        let empty = GridGeometry::uniform([0, 1, 2], 1.0, 1.0, 1.0);
        assert!(build_cartesian_grid(&empty).is_err());
    }
}
