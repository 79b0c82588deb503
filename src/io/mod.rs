//! File I/O for pinch connections and processor configuration.
//!
//! Both are stored as JSON.

pub mod config;
pub mod nnc_json;

pub use config::{read_pinch_config, write_pinch_config};
pub use nnc_json::{from_nnc_string, read_nnc_json, to_nnc_string, write_nnc_json};
