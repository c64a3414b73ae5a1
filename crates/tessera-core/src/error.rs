//! Error types for tessera widgets.

use thiserror::Error;

/// Errors returned by widget operations and configuration loading.
#[derive(Debug, Error)]
pub enum WidgetError {
    /// Operation notifies a parent but none is attached.
    #[error("Widget '{widget}' has no parent attached")]
    NoParent {
        /// Name of the widget missing a parent.
        widget: String,
    },

    /// Cell coordinates outside the grid.
    #[error("Cell ({row}, {col}) out of bounds for {rows}x{cols} grid")]
    CellOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    /// Configuration is syntactically valid but semantically wrong.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// YAML parse error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// JSON parse error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias for widget operations.
pub type WidgetResult<T> = Result<T, WidgetError>;
