//! Widget implementations for the Tessera widget toolkit.

pub mod config;
pub mod label_toggle;
pub mod toggle_matrix;

pub use config::{CellLabel, ToggleMatrixConfig, MAX_CELLS};
pub use label_toggle::{LabeledToggle, ToggleChanged};
pub use toggle_matrix::{ToggleMatrix, ToggleMatrixChanged, ToggleMatrixPainted, DEFAULT_PADDING};
