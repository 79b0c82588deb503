//! Column layout and run detection.
//!
//! Grid cells live in a flat array; their column membership follows from the
//! cartesian decomposition of their global index. [`ColumnIndex`] groups them
//! once per `process` call, and [`find_runs`] scans a single column.

use std::ops::Range;

use super::classify::CellStatus;
use crate::error::PinchError;
use crate::grid::{PinchGrid, cartesian_ijk, cartesian_index};

/// Grid cells of every `(i, j)` column, ordered by `k`.
#[derive(Debug, Clone)]
pub struct ColumnIndex {
    dims: [usize; 3],
    /// `(k, local cell)` pairs per column id `i + nx * j`.
    columns: Vec<Vec<(usize, usize)>>,
}

impl ColumnIndex {
    pub fn new<G: PinchGrid + ?Sized>(grid: &G) -> Result<Self, PinchError> {
        let dims = grid.cart_dims();
        let cartesian_size = grid.cartesian_size();
        let mut columns = vec![Vec::new(); dims[0] * dims[1]];

        for cell in 0..grid.num_cells() {
            let global = grid.global_cell(cell);
            if global >= cartesian_size {
                return Err(PinchError::GlobalIndexOutOfRange {
                    cell,
                    global,
                    cartesian_size,
                });
            }
            let [i, j, k] = cartesian_ijk(global, dims);
            columns[i + dims[0] * j].push((k, cell));
        }
        for column in &mut columns {
            column.sort_unstable();
        }

        Ok(Self { dims, columns })
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Number of grid cells in `column`.
    pub fn len(&self, column: usize) -> usize {
        self.columns[column].len()
    }

    /// Cells of `column` from its first to its last grid cell, top to bottom.
    ///
    /// Cartesian layers between two grid cells that have no grid cell of their
    /// own appear as pinch candidates with `local == None`. Layers above the
    /// first or below the last grid cell are left out: a run there has no
    /// bound on one side.
    pub fn cells<F>(&self, column: usize, mut status: F) -> Vec<ColumnCell>
    where
        F: FnMut(usize, usize) -> CellStatus,
    {
        let [nx, _, _] = self.dims;
        let (i, j) = (column % nx, column / nx);
        let entries = &self.columns[column];

        let mut out = Vec::with_capacity(entries.len());
        let mut prev_k: Option<usize> = None;
        for &(k, local) in entries {
            if let Some(prev) = prev_k {
                for gap in prev + 1..k {
                    out.push(ColumnCell {
                        global: cartesian_index(i, j, gap, self.dims),
                        local: None,
                        status: CellStatus::PinchCandidate,
                    });
                }
            }
            let global = cartesian_index(i, j, k, self.dims);
            out.push(ColumnCell {
                global,
                local: Some(local),
                status: status(local, global),
            });
            prev_k = Some(k);
        }
        out
    }
}

/// One cartesian cell of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnCell {
    /// Cartesian index.
    pub global: usize,
    /// Grid cell, if the cartesian cell is part of the grid.
    pub local: Option<usize>,
    pub status: CellStatus,
}

/// A run of pinch candidates bounded by active cells, as positions in the
/// scanned column slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinchRun {
    pub above: usize,
    pub below: usize,
    pub bypassed: Range<usize>,
}

#[derive(Debug, Clone, Copy)]
enum ScanState {
    SeekingAbove,
    HaveAbove { above: usize },
    RunOpen { above: usize, start: usize },
}

/// Maximal runs of pinch candidates with an active cell on both sides.
///
/// Single top-to-bottom pass. Runs touching either end of the column are
/// dropped, and so is everything in a column without active cells.
pub fn find_runs(column: &[ColumnCell]) -> Vec<PinchRun> {
    let mut runs = Vec::new();
    let mut state = ScanState::SeekingAbove;

    for (pos, cell) in column.iter().enumerate() {
        state = match (state, cell.status) {
            (ScanState::SeekingAbove, CellStatus::PinchCandidate) => ScanState::SeekingAbove,
            (ScanState::SeekingAbove | ScanState::HaveAbove { .. }, CellStatus::Active) => {
                ScanState::HaveAbove { above: pos }
            }
            (ScanState::HaveAbove { above }, CellStatus::PinchCandidate) => {
                ScanState::RunOpen { above, start: pos }
            }
            (open @ ScanState::RunOpen { .. }, CellStatus::PinchCandidate) => open,
            (ScanState::RunOpen { above, start }, CellStatus::Active) => {
                runs.push(PinchRun {
                    above,
                    below: pos,
                    bypassed: start..pos,
                });
                ScanState::HaveAbove { above: pos }
            }
        };
    }
    runs
}
