//! Pinch-out processing.
//!
//! ```text
//! PinchConfig ──► PinchProcessor ──► process(grid, PinchInput) ──► Nnc
//!                      │
//!        PinchClassifier (per cell) ─► ColumnIndex / find_runs (per column)
//! ```

pub mod classify;
pub mod column;
pub mod config;
pub mod mode;
pub mod processor;

pub use classify::{CellStatus, PinchClassifier};
pub use column::{ColumnCell, ColumnIndex, PinchRun, find_runs};
pub use config::PinchConfig;
pub use mode::{PinchMode, TopBotMultz};
pub use processor::{PinchInput, PinchProcessor, series_transmissibility};
