use anyhow::{Context, Result};
use log::info;
use pinchout::grid::{GridGeometry, PinchGrid, build_cartesian_grid, half_transmissibilities};
use pinchout::io::read_pinch_config;
use pinchout::{PinchConfig, PinchInput, PinchMode, PinchProcessor};
use std::path::Path;

/// Darcy in m^2.
const DARCY: f64 = 9.869_233e-13;
const POROSITY: f64 = 0.2;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => read_pinch_config(Path::new(&path))?,
        None => PinchConfig::new(0.001, 0.001, PinchMode::TopBot, PinchMode::Top),
    };
    info!("pinch config: {config:?}");

    // 3x2x4 box grid, column (1, 0) loses layers 1 and 2.
    let dims = [3, 2, 4];
    let n = dims[0] * dims[1] * dims[2];
    let mut actnum = vec![true; n];
    let gap = 1 + dims[0] * dims[1];
    actnum[gap] = false;

    let geometry = GridGeometry::uniform(dims, 100.0, 100.0, 5.0).with_actnum(actnum.clone());
    let grid = build_cartesian_grid(&geometry)?;

    // Pore volume per grid cell; the cell under the gap is nearly cemented.
    let mut porv: Vec<f64> = (0..grid.num_cells())
        .map(|cell| POROSITY * grid.volume(cell))
        .collect();
    let tight = grid
        .local_cell(gap + dims[0] * dims[1])
        .context("tight cell is not in the grid")?;
    porv[tight] = 1e-5;
    let perm = vec![[0.1 * DARCY, 0.1 * DARCY, 0.01 * DARCY]; grid.num_cells()];
    let htrans = half_transmissibilities(&grid, &perm)?;

    let processor = PinchProcessor::from_config(config)?;
    let nnc = processor
        .process(
            &grid,
            &PinchInput::new(&htrans, &actnum, &[], &porv, &geometry.dz),
        )
        .context("pinch processing failed")?;

    println!("{} pinch connection(s)", nnc.num_nnc());
    for entry in nnc.iter() {
        println!(
            "{:>6} -> {:<6} trans = {:.6e} m^3",
            entry.cell1, entry.cell2, entry.trans
        );
    }
    Ok(())
}
