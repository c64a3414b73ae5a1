//! Declarative matrix description loaded from YAML or JSON.
//!
//! ```
//! use tessera_widgets::{ToggleMatrix, ToggleMatrixConfig};
//!
//! let config = ToggleMatrixConfig::from_yaml(
//!     r#"
//! name: Steps
//! rows: 2
//! cols: 8
//! toggle_width: 12
//! toggle_height: 12
//! allow_multiple: false
//! labels:
//!   - { row: 0, col: 0, text: kick }
//! "#,
//! )
//! .expect("valid config");
//!
//! let matrix = ToggleMatrix::from_config(&config).expect("valid config");
//! assert_eq!(matrix.toggles().len(), 16);
//! assert!(!matrix.allows_multiple());
//! ```

use crate::toggle_matrix::{ToggleMatrix, DEFAULT_PADDING};
use serde::{Deserialize, Serialize};
use tessera_core::{FontSize, ModifierKey, Point, Size, WidgetError, WidgetResult};
use tracing::debug;

/// Largest grid a configuration may describe.
pub const MAX_CELLS: usize = 65_536;

/// Caption override for a single cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellLabel {
    /// Row of the cell
    pub row: usize,
    /// Column of the cell
    pub col: usize,
    /// Caption text
    pub text: String,
}

/// Serializable description of a [`ToggleMatrix`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToggleMatrixConfig {
    /// Matrix name; cells are named `<name><index>`
    pub name: String,
    /// Number of rows
    pub rows: usize,
    /// Number of columns
    pub cols: usize,
    /// Cell width
    pub toggle_width: f32,
    /// Cell height
    pub toggle_height: f32,
    /// Top-left corner
    #[serde(default)]
    pub position: Option<Point>,
    /// Spacing between cells
    #[serde(default = "default_padding")]
    pub padding: f32,
    /// Whether several cells may be on at once
    #[serde(default = "default_allow_multiple")]
    pub allow_multiple: bool,
    /// Caption size class
    #[serde(default)]
    pub font_size: FontSize,
    /// Key that makes drag painting turn cells on
    #[serde(default)]
    pub paint_modifier: ModifierKey,
    /// Caption overrides
    #[serde(default)]
    pub labels: Vec<CellLabel>,
}

const fn default_padding() -> f32 {
    DEFAULT_PADDING
}

const fn default_allow_multiple() -> bool {
    true
}

impl ToggleMatrixConfig {
    /// Parse and validate a YAML description.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::Yaml`] on malformed input and
    /// [`WidgetError::Config`] if validation fails.
    pub fn from_yaml(yaml: &str) -> WidgetResult<Self> {
        let config: Self = serde_yaml_ng::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON description.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::Json`] on malformed input and
    /// [`WidgetError::Config`] if validation fails.
    pub fn from_json(json: &str) -> WidgetResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_yaml(&self) -> WidgetResult<String> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Check sizes and label coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::Config`] describing the first problem found,
    /// or [`WidgetError::CellOutOfBounds`] for a label outside the grid.
    pub fn validate(&self) -> WidgetResult<()> {
        if self.name.is_empty() {
            return Err(WidgetError::Config("name must not be empty".to_string()));
        }
        match self.rows.checked_mul(self.cols) {
            Some(cells) if cells <= MAX_CELLS => {}
            _ => {
                return Err(WidgetError::Config(format!(
                    "{} x {} grid exceeds the {MAX_CELLS} cell limit",
                    self.rows, self.cols
                )));
            }
        }
        for (field, value) in [
            ("toggle_width", self.toggle_width),
            ("toggle_height", self.toggle_height),
            ("padding", self.padding),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(WidgetError::Config(format!(
                    "{field} must be a finite non-negative number, got {value}"
                )));
            }
        }
        if let Some(position) = self.position {
            if !position.x.is_finite() || !position.y.is_finite() {
                return Err(WidgetError::Config("position must be finite".to_string()));
            }
        }
        if let Some(label) = self
            .labels
            .iter()
            .find(|l| l.row >= self.rows || l.col >= self.cols)
        {
            return Err(WidgetError::CellOutOfBounds {
                row: label.row,
                col: label.col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(())
    }
}

impl ToggleMatrix {
    /// Build a matrix from a configuration.
    ///
    /// # Errors
    ///
    /// Returns the validation error if `config` is invalid.
    pub fn from_config(config: &ToggleMatrixConfig) -> WidgetResult<Self> {
        config.validate()?;

        let mut matrix = Self::with_position(
            config.position.unwrap_or(Point::ORIGIN),
            Size::new(config.toggle_width, config.toggle_height),
            config.rows,
            config.cols,
            config.name.clone(),
            config.font_size,
        )
        .padding(config.padding)
        .paint_modifier(config.paint_modifier);
        matrix.set_allow_multiple(config.allow_multiple);

        for label in &config.labels {
            matrix.set_label_text_at(&label.text, label.col, label.row)?;
        }

        debug!(
            matrix = %config.name,
            rows = config.rows,
            cols = config.cols,
            labels = config.labels.len(),
            "built matrix from config"
        );
        Ok(matrix)
    }
}
