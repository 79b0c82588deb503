use log::{debug, info, trace, warn};
use rayon::prelude::*;

use super::classify::PinchClassifier;
use super::column::{ColumnCell, ColumnIndex, PinchRun, find_runs};
use super::config::PinchConfig;
use super::mode::{PinchMode, TopBotMultz};
use crate::error::PinchError;
use crate::grid::{FaceDir, PinchGrid};
use crate::nnc::{Nnc, NncEntry};

/// Cell and face arrays consumed by [`PinchProcessor::process`].
#[derive(Debug, Clone, Copy)]
pub struct PinchInput<'a> {
    /// Half-transmissibility per half-face (length `num_cell_faces`).
    pub htrans: &'a [f64],
    /// ACTNUM per cartesian cell. Empty means all active, which is only
    /// accepted when every cartesian cell is a grid cell.
    pub actnum: &'a [bool],
    /// Vertical multiplier per grid cell. Empty means 1 everywhere.
    pub multz: &'a [f64],
    /// Pore volume, cartesian-sized or grid-cell-sized.
    pub porv: &'a [f64],
    /// Cell thickness, indexed like `porv`.
    pub dz: &'a [f64],
}

impl<'a> PinchInput<'a> {
    pub fn new(
        htrans: &'a [f64],
        actnum: &'a [bool],
        multz: &'a [f64],
        porv: &'a [f64],
        dz: &'a [f64],
    ) -> Self {
        Self {
            htrans,
            actnum,
            multz,
            porv,
            dz,
        }
    }
}

/// How a property array is indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Indexing {
    Cartesian,
    Local,
}

impl Indexing {
    fn resolve(
        array: &'static str,
        len: usize,
        cartesian: usize,
        cells: usize,
    ) -> Result<Self, PinchError> {
        if len == cartesian {
            Ok(Indexing::Cartesian)
        } else if len == cells {
            Ok(Indexing::Local)
        } else {
            Err(PinchError::PropertyLength {
                array,
                actual: len,
                cartesian,
                cells,
            })
        }
    }

    #[inline]
    fn pick(self, local: usize, global: usize) -> usize {
        match self {
            Indexing::Cartesian => global,
            Indexing::Local => local,
        }
    }
}

/// Validated view of a [`PinchInput`] against one grid.
struct CheckedInput<'a> {
    input: PinchInput<'a>,
    porv: Indexing,
    dz: Indexing,
}

impl<'a> CheckedInput<'a> {
    fn new<G: PinchGrid + ?Sized>(grid: &G, input: PinchInput<'a>) -> Result<Self, PinchError> {
        let cells = grid.num_cells();
        let cartesian = grid.cartesian_size();

        if input.htrans.len() != grid.num_cell_faces() {
            return Err(PinchError::LengthMismatch {
                array: "htrans",
                expected: grid.num_cell_faces(),
                actual: input.htrans.len(),
            });
        }
        if input.actnum.is_empty() {
            if cells != cartesian {
                return Err(PinchError::LengthMismatch {
                    array: "actnum",
                    expected: cartesian,
                    actual: 0,
                });
            }
        } else if input.actnum.len() != cartesian {
            return Err(PinchError::LengthMismatch {
                array: "actnum",
                expected: cartesian,
                actual: input.actnum.len(),
            });
        }
        if !input.multz.is_empty() && input.multz.len() != cells {
            return Err(PinchError::LengthMismatch {
                array: "multz",
                expected: cells,
                actual: input.multz.len(),
            });
        }

        check_cell_faces(grid)?;

        let porv = Indexing::resolve("porv", input.porv.len(), cartesian, cells)?;
        let dz = Indexing::resolve("dz", input.dz.len(), cartesian, cells)?;
        Ok(Self { input, porv, dz })
    }

    fn is_active(&self, global: usize) -> bool {
        self.input.actnum.is_empty() || self.input.actnum[global]
    }

    fn porv(&self, local: usize, global: usize) -> f64 {
        self.input.porv[self.porv.pick(local, global)]
    }

    fn dz(&self, local: usize, global: usize) -> f64 {
        self.input.dz[self.dz.pick(local, global)]
    }

    fn multz(&self, local: usize) -> f64 {
        self.input.multz.get(local).copied().unwrap_or(1.0)
    }
}

/// Every half-face must index into the half-transmissibility array.
fn check_cell_faces<G: PinchGrid + ?Sized>(grid: &G) -> Result<(), PinchError> {
    let num_cell_faces = grid.num_cell_faces();
    for cell in 0..grid.num_cells() {
        let faces = grid.cell_faces(cell);
        if let Some(face) = faces.iter().find(|f| f.index >= num_cell_faces) {
            return Err(PinchError::HalfFaceOutOfRange {
                cell,
                index: face.index,
                num_cell_faces,
            });
        }
    }
    Ok(())
}

/// Builds non-neighbor connections across pinched-out layers.
///
/// For every vertical column the processor looks for runs of pinch
/// candidates (see [`PinchClassifier`]) with an active cell on both sides,
/// and connects the two active cells. The connection's transmissibility is
/// the series combination of the half-transmissibilities selected by
/// `trans_mode`, scaled by the vertical multipliers selected by
/// `multz_mode`.
#[derive(Debug, Clone, Copy)]
pub struct PinchProcessor {
    config: PinchConfig,
    classifier: PinchClassifier,
}

impl PinchProcessor {
    pub fn new(
        min_pore_volume: f64,
        thickness: f64,
        trans_mode: PinchMode,
        multz_mode: PinchMode,
    ) -> Result<Self, PinchError> {
        Self::from_config(PinchConfig::new(
            min_pore_volume,
            thickness,
            trans_mode,
            multz_mode,
        ))
    }

    pub fn from_config(config: PinchConfig) -> Result<Self, PinchError> {
        config.validate()?;
        Ok(Self {
            config,
            classifier: PinchClassifier::new(config.min_pore_volume, config.thickness),
        })
    }

    pub fn config(&self) -> &PinchConfig {
        &self.config
    }

    pub fn trans_mode(&self) -> PinchMode {
        self.config.trans_mode
    }

    pub fn multz_mode(&self) -> PinchMode {
        self.config.multz_mode
    }

    pub fn topbot_multz(&self) -> TopBotMultz {
        self.config.topbot_multz
    }

    pub fn classifier(&self) -> &PinchClassifier {
        &self.classifier
    }

    /// Scan every column of `grid` and return the pinch connections.
    ///
    /// Connections are ordered by column (`i` fastest, then `j`) and top to
    /// bottom within a column; `nnc1` is always the upper cell. All inputs
    /// are checked before scanning; on error nothing is produced.
    pub fn process<G>(&self, grid: &G, input: &PinchInput<'_>) -> Result<Nnc, PinchError>
    where
        G: PinchGrid + Sync + ?Sized,
    {
        let input = CheckedInput::new(grid, *input)?;
        let columns = ColumnIndex::new(grid)?;

        let per_column = (0..columns.num_columns())
            .into_par_iter()
            .map(|column| self.scan_column(grid, &input, &columns, column))
            .collect::<Result<Vec<_>, _>>()?;

        let nnc: Nnc = per_column.into_iter().flatten().collect();
        info!(
            "pinch: {} connection(s) over {} column(s) (trans {}, multz {})",
            nnc.num_nnc(),
            columns.num_columns(),
            self.config.trans_mode,
            self.config.multz_mode
        );
        Ok(nnc)
    }

    fn scan_column<G: PinchGrid + ?Sized>(
        &self,
        grid: &G,
        input: &CheckedInput<'_>,
        columns: &ColumnIndex,
        column: usize,
    ) -> Result<Vec<NncEntry>, PinchError> {
        if columns.len(column) < 2 {
            return Ok(Vec::new());
        }

        let cells = columns.cells(column, |local, global| {
            self.classifier.classify(
                input.is_active(global),
                input.porv(local, global),
                input.dz(local, global),
            )
        });
        let runs = find_runs(&cells);
        trace!(
            "pinch: column {column} has {} cell(s), {} bounded run(s)",
            cells.len(),
            runs.len()
        );

        let mut entries = Vec::with_capacity(runs.len());
        for run in &runs {
            if let Some(entry) = self.connect(grid, input, &cells, run)? {
                entries.push(entry);
            }
        }
        Ok(entries)
    }

    fn connect<G: PinchGrid + ?Sized>(
        &self,
        grid: &G,
        input: &CheckedInput<'_>,
        cells: &[ColumnCell],
        run: &PinchRun,
    ) -> Result<Option<NncEntry>, PinchError> {
        let (top, bottom) = (cells[run.above], cells[run.below]);
        let (Some(above), Some(below)) = (top.local, bottom.local) else {
            return Ok(None);
        };
        if grid.are_neighbors(above, below) {
            debug!(
                "pinch: {} and {} already share a face, no connection",
                top.global, bottom.global
            );
            return Ok(None);
        }

        let bypassed = &cells[run.bypassed.clone()];
        let base = self.base_transmissibility(grid, input.input.htrans, above, below, bypassed)?;
        let multiplier = self.multiplier(input, above, below, bypassed);
        let trans = base * multiplier;

        if trans == 0.0 {
            warn!(
                "pinch: connection {} -> {} has zero transmissibility",
                top.global, bottom.global
            );
        } else {
            debug!(
                "pinch: connection {} -> {} across {} layer(s), trans {trans:.6e}",
                top.global,
                bottom.global,
                bypassed.len()
            );
        }

        Ok(Some(NncEntry {
            cell1: top.global,
            cell2: bottom.global,
            trans,
        }))
    }

    fn base_transmissibility<G: PinchGrid + ?Sized>(
        &self,
        grid: &G,
        htrans: &[f64],
        above: usize,
        below: usize,
        bypassed: &[ColumnCell],
    ) -> Result<f64, PinchError> {
        let half = |cell: usize, dir: FaceDir| -> Result<f64, PinchError> {
            grid.half_face(cell, dir)
                .map(|face| htrans[face.index])
                .ok_or(PinchError::MissingVerticalFace { cell, dir })
        };

        let mut halves = vec![half(above, FaceDir::ZPlus)?];
        match self.config.trans_mode {
            PinchMode::Top => {}
            PinchMode::TopBot => halves.push(half(below, FaceDir::ZMinus)?),
            PinchMode::All => {
                for cell in bypassed.iter().filter_map(|c| c.local) {
                    halves.push(half(cell, FaceDir::ZMinus)?);
                    halves.push(half(cell, FaceDir::ZPlus)?);
                }
                halves.push(half(below, FaceDir::ZMinus)?);
            }
        }
        Ok(series_transmissibility(halves))
    }

    fn multiplier(
        &self,
        input: &CheckedInput<'_>,
        above: usize,
        below: usize,
        bypassed: &[ColumnCell],
    ) -> f64 {
        match self.config.multz_mode {
            PinchMode::Top => input.multz(above),
            PinchMode::TopBot => self
                .config
                .topbot_multz
                .combine(input.multz(above), input.multz(below)),
            PinchMode::All => bypassed
                .iter()
                .filter_map(|c| c.local)
                .map(|cell| input.multz(cell))
                .product(),
        }
    }
}

/// Conductance of half-transmissibilities in series: `1 / Σ 1/h`.
///
/// A non-positive (or NaN) term blocks the path and the result is 0, as is
/// the result for no terms at all.
pub fn series_transmissibility<I: IntoIterator<Item = f64>>(halves: I) -> f64 {
    let mut resistance = 0.0;
    let mut terms = 0usize;
    for h in halves {
        if !(h > 0.0) {
            return 0.0;
        }
        resistance += 1.0 / h;
        terms += 1;
    }
    if terms == 0 { 0.0 } else { 1.0 / resistance }
}
