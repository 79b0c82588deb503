//! Pinch-out non-neighbor connections for structured reservoir grids.
//!
//! Thin or low-pore-volume layers are taken out of the flow grid; the cells
//! above and below them are then no longer connected. [`PinchProcessor`]
//! walks every vertical column, finds the pinched runs, and returns an
//! [`Nnc`] registry connecting the active cells around each run.
//!
//! ```
//! use pinchout::grid::{GridGeometry, build_cartesian_grid, half_transmissibilities};
//! use pinchout::{PinchInput, PinchMode, PinchProcessor};
//!
//! // One column of three layers; the middle one is inactive.
//! let actnum = vec![true, false, true];
//! let geometry = GridGeometry::uniform([1, 1, 3], 10.0, 10.0, 2.0).with_actnum(actnum.clone());
//! let grid = build_cartesian_grid(&geometry).unwrap();
//! let htrans = half_transmissibilities(&grid, &[[1.0, 1.0, 0.1]; 2]).unwrap();
//! let porv = vec![50.0; 3];
//!
//! let processor = PinchProcessor::new(0.001, 0.001, PinchMode::TopBot, PinchMode::Top).unwrap();
//! let nnc = processor
//!     .process(&grid, &PinchInput::new(&htrans, &actnum, &[], &porv, &geometry.dz))
//!     .unwrap();
//! assert_eq!(nnc.num_nnc(), 1);
//! assert_eq!((nnc.nnc1()[0], nnc.nnc2()[0]), (0, 2));
//! ```

pub mod error;
pub mod grid;
pub mod io;
pub mod nnc;
pub mod pinch;

// Prelude
pub use error::PinchError;
pub use grid::{FaceDir, HalfFace, PinchGrid};
pub use nnc::{Nnc, NncEntry};
pub use pinch::{PinchConfig, PinchInput, PinchMode, PinchProcessor, TopBotMultz};
