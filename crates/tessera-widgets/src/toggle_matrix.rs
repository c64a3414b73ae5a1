//! `ToggleMatrix` widget: a rows x cols grid of label toggles.
//!
//! The matrix owns its toggles in row-major order (`index = row * cols + col`)
//! and never resizes the grid after construction. Each toggle is named
//! `<matrix name><index>`.
//!
//! Changes bubble: a toggle flipped by input is reported to the matrix
//! through [`Composite::trigger_event`], which enforces exclusive selection
//! when multiple selection is off and then forwards the event to the
//! attached parent sink.
//!
//! # Examples
//!
//! ```
//! use tessera_core::{Composite, EventLog, FontSize, Size};
//! use tessera_widgets::ToggleMatrix;
//!
//! let mut grid = ToggleMatrix::new(Size::new(10.0, 10.0), 2, 3, "Grid", FontSize::Small);
//! let log = EventLog::shared();
//! grid.set_parent(log.clone());
//!
//! grid.set_toggle(1, 1, true, false).expect("parent attached");
//! assert!(grid.get_state(1, 1));
//! assert_eq!(grid.get_toggle(1, 1).map(|t| t.name()), Some("Grid4"));
//! assert_eq!(log.len(), 1);
//! ```

use crate::label_toggle::{LabeledToggle, ToggleChanged};
use std::any::Any;
use std::fmt;
use tessera_core::{
    widget::{AccessibleRole, LayoutResult},
    Canvas, Color, Composite, Constraints, Event, Font, FontSize, InteractionState, KeyTracker,
    ModifierKey, ParentHandle, Point, Rect, Size, TypeId, Widget, WidgetError, WidgetEvent,
    WidgetKind, WidgetResult,
};
use tracing::{debug, trace, warn};

/// Spacing between cells when none is configured.
pub const DEFAULT_PADDING: f32 = 2.0;

/// Message emitted when a click flips a cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleMatrixChanged {
    /// Name of the cell that was clicked
    pub name: String,
    /// Row of the cell
    pub row: usize,
    /// Column of the cell
    pub col: usize,
    /// Value of the cell after bubbling
    pub value: bool,
}

/// Message emitted when a drag paints one or more cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleMatrixPainted {
    /// Cells whose value changed, as (row, col)
    pub cells: Vec<(usize, usize)>,
    /// Value painted into them
    pub value: bool,
}

/// Grid of label toggles with optional exclusive selection.
#[derive(Clone)]
pub struct ToggleMatrix {
    name: String,
    /// Bounding rectangle; sized to the grid footprint once arranged
    rect: Rect,
    /// `rect` grown by `padding` on every side
    padding_rect: Rect,
    padding: f32,
    rows: usize,
    cols: usize,
    toggle_size: Size,
    toggles: Vec<LabeledToggle>,
    allow_multiple: bool,
    parent: Option<ParentHandle>,
    hit: bool,
    state: InteractionState,
    visible: bool,
    font: Font,
    draw_back: bool,
    draw_fill_highlight: bool,
    draw_outline_highlight: bool,
    back_color: Color,
    highlight_color: Color,
    keys: KeyTracker,
    paint_modifier: ModifierKey,
    accessible_name_value: Option<String>,
    test_id_value: Option<String>,
}

impl fmt::Debug for ToggleMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToggleMatrix")
            .field("name", &self.name)
            .field("rect", &self.rect)
            .field("rows", &self.rows)
            .field("cols", &self.cols)
            .field("toggle_size", &self.toggle_size)
            .field("allow_multiple", &self.allow_multiple)
            .field("has_parent", &self.parent.is_some())
            .field("hit", &self.hit)
            .field("state", &self.state)
            .field("visible", &self.visible)
            .finish_non_exhaustive()
    }
}

impl ToggleMatrix {
    /// Create a matrix at the origin.
    ///
    /// `toggle_size` is the size of every cell.
    #[must_use]
    pub fn new(
        toggle_size: Size,
        rows: usize,
        cols: usize,
        name: impl Into<String>,
        font_size: FontSize,
    ) -> Self {
        Self::with_position(Point::ORIGIN, toggle_size, rows, cols, name, font_size)
    }

    /// Create a matrix at the given position.
    ///
    /// # Panics
    ///
    /// Panics if `rows * cols` overflows `usize`. Use
    /// [`ToggleMatrix::from_config`] for untrusted dimensions.
    #[must_use]
    pub fn with_position(
        position: Point,
        toggle_size: Size,
        rows: usize,
        cols: usize,
        name: impl Into<String>,
        font_size: FontSize,
    ) -> Self {
        let name = name.into();
        let toggles = (0..rows * cols)
            .map(|index| {
                LabeledToggle::new(format!("{name}{index}"), false, toggle_size, font_size)
            })
            .collect();

        let rect = Rect::from_origin_size(position, toggle_size);
        Self {
            rect,
            padding_rect: rect.expand(DEFAULT_PADDING),
            padding: DEFAULT_PADDING,
            rows,
            cols,
            toggle_size,
            toggles,
            allow_multiple: true,
            parent: None,
            hit: false,
            state: InteractionState::Normal,
            visible: true,
            font: Font::sized(font_size),
            draw_back: false,
            draw_fill_highlight: false,
            draw_outline_highlight: false,
            back_color: Color::from_rgba8(0, 0, 0, 75),
            highlight_color: Color::from_rgba8(255, 255, 255, 255),
            keys: KeyTracker::new(),
            paint_modifier: ModifierKey::default(),
            accessible_name_value: None,
            test_id_value: None,
            name,
        }
    }

    /// Set the spacing between cells.
    #[must_use]
    pub fn padding(mut self, padding: f32) -> Self {
        self.padding = padding.max(0.0);
        self.padding_rect = self.rect.expand(self.padding);
        self
    }

    /// Set the key that makes drag painting turn cells on.
    #[must_use]
    pub const fn paint_modifier(mut self, key: ModifierKey) -> Self {
        self.paint_modifier = key;
        self
    }

    /// Set whether a background is drawn behind the grid.
    #[must_use]
    pub const fn draw_back(mut self, draw_back: bool) -> Self {
        self.draw_back = draw_back;
        self
    }

    /// Set the accessible name.
    #[must_use]
    pub fn accessible_name(mut self, name: impl Into<String>) -> Self {
        self.accessible_name_value = Some(name.into());
        self
    }

    /// Set the test ID.
    #[must_use]
    pub fn test_id(mut self, id: impl Into<String>) -> Self {
        self.test_id_value = Some(id.into());
        self
    }

    // ===== Accessors =====

    /// Get the matrix name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Widget kind tag.
    #[must_use]
    pub const fn kind(&self) -> WidgetKind {
        WidgetKind::ToggleMatrix
    }

    /// Number of rows.
    #[must_use]
    pub const fn row_count(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[must_use]
    pub const fn column_count(&self) -> usize {
        self.cols
    }

    /// Size of each cell.
    #[must_use]
    pub const fn toggle_size(&self) -> Size {
        self.toggle_size
    }

    /// Spacing between cells.
    #[must_use]
    pub const fn get_padding(&self) -> f32 {
        self.padding
    }

    /// Bounding rectangle.
    #[must_use]
    pub const fn rect(&self) -> Rect {
        self.rect
    }

    /// Bounding rectangle grown by the padding.
    #[must_use]
    pub const fn padding_rect(&self) -> Rect {
        self.padding_rect
    }

    /// All toggles in row-major order.
    #[must_use]
    pub fn toggles(&self) -> &[LabeledToggle] {
        &self.toggles
    }

    /// All toggles in row-major order, mutably. The grid size stays fixed.
    pub fn toggles_mut(&mut self) -> &mut [LabeledToggle] {
        &mut self.toggles
    }

    /// Whether several cells may be on at once.
    #[must_use]
    pub const fn allows_multiple(&self) -> bool {
        self.allow_multiple
    }

    /// Whether a press landed inside the matrix and has not been released.
    #[must_use]
    pub const fn is_pressed(&self) -> bool {
        self.hit
    }

    /// Current interaction state.
    #[must_use]
    pub const fn state(&self) -> InteractionState {
        self.state
    }

    /// Whether the matrix is visible.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Font shared by all cells.
    #[must_use]
    pub const fn font(&self) -> &Font {
        &self.font
    }

    /// Whether the press highlight is drawn.
    #[must_use]
    pub const fn is_fill_highlighted(&self) -> bool {
        self.draw_fill_highlight
    }

    /// Whether the outline highlight is drawn.
    #[must_use]
    pub const fn is_outline_highlighted(&self) -> bool {
        self.draw_outline_highlight
    }

    /// Keyboard state consulted while drag painting.
    #[must_use]
    pub const fn keys(&self) -> &KeyTracker {
        &self.keys
    }

    /// Keyboard state, mutably, for hosts that track keys themselves.
    pub fn keys_mut(&mut self) -> &mut KeyTracker {
        &mut self.keys
    }

    // ===== Lookup =====

    /// Row-major index of a cell, or `None` when out of range.
    #[must_use]
    pub const fn index_of(&self, row: usize, col: usize) -> Option<usize> {
        if row < self.rows && col < self.cols {
            Some(row * self.cols + col)
        } else {
            None
        }
    }

    /// Toggle at (row, col), or `None` when out of range.
    #[must_use]
    pub fn get_toggle(&self, row: usize, col: usize) -> Option<&LabeledToggle> {
        self.index_of(row, col).and_then(|i| self.toggles.get(i))
    }

    /// Toggle at (row, col), mutably.
    pub fn get_toggle_mut(&mut self, row: usize, col: usize) -> Option<&mut LabeledToggle> {
        self.index_of(row, col).and_then(|i| self.toggles.get_mut(i))
    }

    /// Toggle with the given name.
    #[must_use]
    pub fn toggle_by_name(&self, name: &str) -> Option<&LabeledToggle> {
        self.toggles.iter().find(|t| t.name() == name)
    }

    /// Value at (row, col); `false` when out of range.
    #[must_use]
    pub fn get_state(&self, row: usize, col: usize) -> bool {
        self.get_toggle(row, col).is_some_and(LabeledToggle::value)
    }

    /// Names of the cells that are on, in row-major order.
    #[must_use]
    pub fn selected_names(&self) -> Vec<&str> {
        self.toggles
            .iter()
            .filter(|t| t.value())
            .map(LabeledToggle::name)
            .collect()
    }

    // ===== Selection =====

    /// Turn the named cell on and every other cell off.
    pub fn activate_toggle(&mut self, name: &str) {
        for toggle in &mut self.toggles {
            toggle.set_value(toggle.name() == name);
        }
        trace!(matrix = %self.name, active = name, "activated toggle");
    }

    /// Set every cell to `value`.
    ///
    /// With `trigger`, each cell's change is sent to the parent. A single
    /// notification for the matrix itself is always sent afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::NoParent`] if no parent is attached; no cell is
    /// modified in that case.
    pub fn set_all_toggles(&mut self, value: bool, trigger: bool) -> WidgetResult<()> {
        let parent = self.require_parent()?;
        for toggle in &mut self.toggles {
            toggle.set_value(value);
            if trigger {
                parent.trigger_event(&toggle.change_event());
            }
        }
        parent.trigger_event(&self.change_event());
        debug!(matrix = %self.name, value, trigger, "set all toggles");
        Ok(())
    }

    /// Set the cell at (row, col) to `value`.
    ///
    /// With `trigger`, the cell's change is sent to the parent when the cell
    /// exists. A notification for the matrix itself is always sent, even
    /// for out-of-range coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::NoParent`] if no parent is attached.
    pub fn set_toggle(
        &mut self,
        row: usize,
        col: usize,
        value: bool,
        trigger: bool,
    ) -> WidgetResult<()> {
        let parent = self.require_parent()?;
        match self.index_of(row, col) {
            Some(index) => {
                let toggle = &mut self.toggles[index];
                toggle.set_value(value);
                if trigger {
                    parent.trigger_event(&toggle.change_event());
                }
            }
            None => debug!(matrix = %self.name, row, col, "set_toggle outside grid"),
        }
        parent.trigger_event(&self.change_event());
        Ok(())
    }

    /// Allow or forbid several cells being on at once.
    pub fn set_allow_multiple(&mut self, allow_multiple: bool) {
        self.allow_multiple = allow_multiple;
    }

    // ===== Appearance =====

    /// Show or hide every cell body. Cell captions are always hidden.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        for toggle in &mut self.toggles {
            toggle.set_visible(visible);
            toggle.set_label_visible(false);
        }
    }

    /// Use `font` for the matrix and every cell.
    pub fn set_font(&mut self, font: Font) {
        for toggle in &mut self.toggles {
            toggle.set_font(font.clone());
        }
        self.font = font;
    }

    /// Show or hide every cell caption.
    pub fn set_label_visible(&mut self, visible: bool) {
        for toggle in &mut self.toggles {
            toggle.set_label_visible(visible);
        }
    }

    /// Set the caption of the cell with the given name.
    ///
    /// Returns `false` if no cell has that name.
    pub fn set_label_text(&mut self, name: &str, text: &str) -> bool {
        let mut found = false;
        for toggle in self.toggles.iter_mut().filter(|t| t.name() == name) {
            toggle.set_label_text(text);
            found = true;
        }
        if !found {
            debug!(matrix = %self.name, cell = name, "no cell with that name");
        }
        found
    }

    /// Set the caption of the cell at column `x`, row `y`.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::CellOutOfBounds`] if (x, y) is outside the grid.
    pub fn set_label_text_at(&mut self, text: &str, x: usize, y: usize) -> WidgetResult<()> {
        let (rows, cols) = (self.rows, self.cols);
        let toggle = self
            .get_toggle_mut(y, x)
            .ok_or(WidgetError::CellOutOfBounds {
                row: y,
                col: x,
                rows,
                cols,
            })?;
        toggle.set_label_text(text);
        Ok(())
    }

    // ===== Pointer Interaction =====

    /// Handle a press: inside the matrix it starts an interaction.
    pub fn mouse_pressed(&mut self, position: Point) {
        if self.rect.contains_point(&position) {
            self.hit = true;
            self.state = InteractionState::Down;
        } else {
            self.state = InteractionState::Normal;
        }
        self.state_change();
    }

    /// Handle a drag: paint every cell under the pointer.
    ///
    /// Cells are turned on while the paint modifier is held and off
    /// otherwise. Returns the row-major indices whose value changed.
    pub fn mouse_dragged(&mut self, position: Point) -> Vec<usize> {
        if !self.hit {
            return Vec::new();
        }

        let value = self.keys.is_held(self.paint_modifier);
        let mut changed = Vec::new();
        for (index, toggle) in self.toggles.iter_mut().enumerate() {
            if toggle.is_hit(position) {
                if toggle.value() != value {
                    changed.push(index);
                }
                toggle.set_value(value);
            }
        }
        changed
    }

    /// Handle a release: ends the interaction.
    pub fn mouse_released(&mut self) {
        self.hit = false;
    }

    fn state_change(&mut self) {
        match self.state {
            InteractionState::Normal => {
                self.draw_fill_highlight = false;
                self.draw_outline_highlight = false;
            }
            InteractionState::Down => {
                self.draw_fill_highlight = true;
                self.draw_outline_highlight = false;
            }
        }
        trace!(matrix = %self.name, state = ?self.state, "state change");
    }

    // ===== Internals =====

    fn require_parent(&self) -> WidgetResult<ParentHandle> {
        self.parent.clone().ok_or_else(|| {
            warn!(matrix = %self.name, "operation requires an attached parent");
            WidgetError::NoParent {
                widget: self.name.clone(),
            }
        })
    }

    fn change_event(&self) -> WidgetEvent {
        WidgetEvent::without_value(self.name.clone(), WidgetKind::ToggleMatrix)
    }

    /// Grid footprint: cells plus the padding between them.
    fn footprint(&self) -> Size {
        let span = |count: usize, cell: f32| {
            let count = count as f32;
            (count - 1.0).mul_add(self.padding, count * cell).max(0.0)
        };
        Size::new(
            span(self.cols, self.toggle_size.width),
            span(self.rows, self.toggle_size.height),
        )
    }

    /// Place cells in raster order from the matrix origin.
    fn arrange(&mut self) {
        let origin = self.rect.origin();
        let step_x = self.toggle_size.width + self.padding;
        let step_y = self.toggle_size.height + self.padding;
        let cols = self.cols;
        for (index, toggle) in self.toggles.iter_mut().enumerate() {
            let (row, col) = (index / cols, index % cols);
            toggle.set_position(Point::new(
                (col as f32).mul_add(step_x, origin.x),
                (row as f32).mul_add(step_y, origin.y),
            ));
        }
        self.rect = self.rect.with_size(self.footprint());
        self.padding_rect = self.rect.expand(self.padding);
    }

    fn cell_of(&self, index: usize) -> (usize, usize) {
        (index / self.cols, index % self.cols)
    }
}

impl Composite for ToggleMatrix {
    fn trigger_event(&mut self, child: &WidgetEvent) {
        if !self.allow_multiple {
            self.activate_toggle(&child.name);
        }
        match &self.parent {
            Some(parent) => parent.trigger_event(child),
            None => trace!(matrix = %self.name, child = %child.name, "no parent; event dropped"),
        }
    }

    /// Attach to a parent and lay the cells out.
    ///
    /// Cell captions are hidden and every cell records this matrix as its
    /// owner.
    fn set_parent(&mut self, parent: ParentHandle) {
        self.parent = Some(parent);
        for toggle in &mut self.toggles {
            toggle.set_label_visible(false);
            toggle.set_parent_name(self.name.clone());
        }
        self.arrange();
        debug!(
            matrix = %self.name,
            rows = self.rows,
            cols = self.cols,
            width = self.rect.width,
            height = self.rect.height,
            "attached to parent"
        );
    }

    fn parent(&self) -> Option<&ParentHandle> {
        self.parent.as_ref()
    }
}

impl Widget for ToggleMatrix {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn measure(&self, constraints: Constraints) -> Size {
        constraints.constrain(self.footprint())
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        self.rect = self.rect.with_origin(bounds.origin());
        self.arrange();
        LayoutResult {
            size: self.rect.size(),
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        if !self.visible {
            return;
        }

        canvas.push_clip(self.padding_rect);
        if self.draw_back {
            canvas.fill_rect(self.rect, self.back_color);
        }
        for toggle in &self.toggles {
            toggle.paint(canvas);
        }
        if self.draw_fill_highlight || self.draw_outline_highlight {
            canvas.stroke_rect(self.padding_rect, self.highlight_color, 1.0);
        }
        canvas.pop_clip();
    }

    fn event(&mut self, event: &Event) -> Option<Box<dyn Any + Send>> {
        if self.keys.handle(event) || !self.visible {
            return None;
        }

        match event {
            Event::MouseDown { position, .. } => {
                self.mouse_pressed(*position);

                let (index, changed) = self
                    .toggles
                    .iter_mut()
                    .enumerate()
                    .find_map(|(i, t)| t.event(event).map(|msg| (i, msg)))?;
                let ToggleChanged { name, value } = *changed.downcast::<ToggleChanged>().ok()?;

                let child = WidgetEvent::with_value(name, WidgetKind::LabelToggle, value);
                self.trigger_event(&child);

                let (row, col) = self.cell_of(index);
                Some(Box::new(ToggleMatrixChanged {
                    value: self.toggles[index].value(),
                    name: child.name,
                    row,
                    col,
                }))
            }
            Event::MouseMove { position } => {
                let value = self.keys.is_held(self.paint_modifier);
                let cells: Vec<_> = self
                    .mouse_dragged(*position)
                    .into_iter()
                    .map(|i| self.cell_of(i))
                    .collect();
                if cells.is_empty() {
                    None
                } else {
                    Some(Box::new(ToggleMatrixPainted { cells, value }))
                }
            }
            Event::MouseUp { .. } => {
                self.mouse_released();
                None
            }
            _ => None,
        }
    }

    fn children(&self) -> Vec<&dyn Widget> {
        self.toggles.iter().map(|t| t as &dyn Widget).collect()
    }

    fn is_interactive(&self) -> bool {
        self.visible
    }

    fn accessible_name(&self) -> Option<&str> {
        self.accessible_name_value
            .as_deref()
            .or(Some(self.name.as_str()))
    }

    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::Grid
    }

    fn test_id(&self) -> Option<&str> {
        self.test_id_value.as_deref()
    }

    fn bounds(&self) -> Rect {
        self.rect
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::sync::Arc;
    use tessera_core::draw::DrawCommand;
    use tessera_core::{EventLog, Key, MouseButton, RecordingCanvas};

    fn grid() -> ToggleMatrix {
        ToggleMatrix::new(Size::new(10.0, 10.0), 2, 3, "Grid", FontSize::Small)
    }

    fn attached() -> (ToggleMatrix, Arc<EventLog>) {
        let mut matrix = grid();
        let log = EventLog::shared();
        matrix.set_parent(log.clone());
        (matrix, log)
    }

    fn press(x: f32, y: f32) -> Event {
        Event::MouseDown {
            position: Point::new(x, y),
            button: MouseButton::Left,
        }
    }

    // ===== Construction Tests =====

    #[test]
    fn test_matrix_new_creates_named_cells() {
        let m = grid();
        assert_eq!(m.toggles().len(), 6);
        let names: Vec<_> = m.toggles().iter().map(LabeledToggle::name).collect();
        assert_eq!(names, vec!["Grid0", "Grid1", "Grid2", "Grid3", "Grid4", "Grid5"]);
        assert!(m.allows_multiple());
        assert_eq!(m.row_count(), 2);
        assert_eq!(m.column_count(), 3);
        assert_eq!(m.kind(), WidgetKind::ToggleMatrix);
        assert_eq!(m.state(), InteractionState::Normal);
        assert!(!m.is_pressed());
        assert!(m.parent().is_none());
    }

    #[test]
    fn test_matrix_cells_sized_to_toggle_size() {
        let m = ToggleMatrix::new(Size::new(24.0, 16.0), 1, 2, "S", FontSize::Medium);
        for t in m.toggles() {
            assert_eq!(t.rect().size(), Size::new(24.0, 16.0));
            assert_eq!(t.font().size, FontSize::Medium.pixels());
            assert!(!t.value());
        }
    }

    #[test]
    fn test_matrix_with_position() {
        let m = ToggleMatrix::with_position(
            Point::new(30.0, 40.0),
            Size::new(10.0, 10.0),
            1,
            1,
            "P",
            FontSize::Small,
        );
        assert_eq!(m.rect().origin(), Point::new(30.0, 40.0));
    }

    #[test]
    fn test_matrix_empty_grid() {
        let m = ToggleMatrix::new(Size::new(10.0, 10.0), 0, 4, "E", FontSize::Small);
        assert!(m.toggles().is_empty());
        assert!(m.get_toggle(0, 0).is_none());
    }

    #[test]
    fn test_matrix_debug_hides_parent() {
        let (m, _log) = attached();
        let debug = format!("{m:?}");
        assert!(debug.contains("ToggleMatrix"));
        assert!(debug.contains("has_parent: true"));
    }

    // ===== Layout Tests =====

    #[test]
    fn test_set_parent_lays_out_raster_order() {
        let (m, _log) = attached();
        let expected = [
            (0.0, 0.0),
            (12.0, 0.0),
            (24.0, 0.0),
            (0.0, 12.0),
            (12.0, 12.0),
            (24.0, 12.0),
        ];
        for (t, (x, y)) in m.toggles().iter().zip(expected) {
            assert_eq!(t.rect().origin(), Point::new(x, y), "{}", t.name());
        }
    }

    #[test]
    fn test_set_parent_computes_footprint() {
        let (m, _log) = attached();
        // 3*10 + 2*2 by 2*10 + 1*2
        assert_eq!(m.rect().size(), Size::new(34.0, 22.0));
        assert_eq!(m.padding_rect(), Rect::new(-2.0, -2.0, 38.0, 26.0));
    }

    #[test]
    fn test_set_parent_hides_labels_and_records_owner() {
        let mut m = grid();
        assert!(m.toggles().iter().all(LabeledToggle::is_label_visible));
        m.set_parent(EventLog::shared());
        for t in m.toggles() {
            assert!(!t.is_label_visible());
            assert_eq!(t.parent_name(), Some("Grid"));
        }
    }

    #[test]
    fn test_custom_padding_footprint() {
        let mut m = ToggleMatrix::new(Size::new(10.0, 5.0), 3, 2, "Pad", FontSize::Small)
            .padding(4.0);
        m.set_parent(EventLog::shared());
        assert_eq!(m.get_padding(), 4.0);
        assert_eq!(m.rect().size(), Size::new(24.0, 23.0));
        assert_eq!(
            m.get_toggle(2, 1).map(LabeledToggle::rect),
            Some(Rect::new(14.0, 18.0, 10.0, 5.0))
        );
    }

    #[test]
    fn test_layout_moves_grid() {
        let (mut m, _log) = attached();
        let result = m.layout(Rect::new(100.0, 50.0, 500.0, 500.0));
        assert_eq!(result.size, Size::new(34.0, 22.0));
        assert_eq!(m.rect().origin(), Point::new(100.0, 50.0));
        assert_eq!(
            m.get_toggle(1, 2).map(|t| t.rect().origin()),
            Some(Point::new(124.0, 62.0))
        );
    }

    #[test]
    fn test_measure_reports_footprint() {
        let m = grid();
        assert_eq!(m.measure(Constraints::unbounded()), Size::new(34.0, 22.0));
        assert_eq!(
            m.measure(Constraints::loose(Size::new(20.0, 20.0))),
            Size::new(20.0, 20.0)
        );
    }

    #[test]
    fn test_empty_grid_footprint_is_zero() {
        let mut m = ToggleMatrix::new(Size::new(10.0, 10.0), 0, 0, "E", FontSize::Small);
        m.set_parent(EventLog::shared());
        assert_eq!(m.rect().size(), Size::ZERO);
    }

    // ===== Visibility Tests =====

    #[test]
    fn test_set_visible_false_hides_bodies_and_labels() {
        let mut m = grid();
        m.set_label_visible(true);
        m.set_visible(false);
        assert!(!m.is_visible());
        for t in m.toggles() {
            assert!(!t.is_visible());
            assert!(!t.is_label_visible());
        }
    }

    #[test]
    fn test_set_visible_true_still_hides_labels() {
        let mut m = grid();
        m.set_visible(false);
        m.set_visible(true);
        for t in m.toggles() {
            assert!(t.is_visible());
            assert!(!t.is_label_visible());
        }
    }

    #[test]
    fn test_set_label_visible_propagates() {
        let (mut m, _log) = attached();
        m.set_label_visible(true);
        assert!(m.toggles().iter().all(LabeledToggle::is_label_visible));
    }

    // ===== Lookup Tests =====

    #[test]
    fn test_get_toggle_row_major() {
        let m = grid();
        assert_eq!(m.get_toggle(0, 0).map(LabeledToggle::name), Some("Grid0"));
        assert_eq!(m.get_toggle(0, 2).map(LabeledToggle::name), Some("Grid2"));
        assert_eq!(m.get_toggle(1, 0).map(LabeledToggle::name), Some("Grid3"));
        assert_eq!(m.get_toggle(1, 2).map(LabeledToggle::name), Some("Grid5"));
    }

    #[test]
    fn test_get_toggle_out_of_range() {
        let m = grid();
        assert!(m.get_toggle(2, 0).is_none());
        assert!(m.get_toggle(0, 3).is_none());
        // (0, 5) has row*col == 0 but is still outside a 3-column grid
        assert!(m.get_toggle(0, 5).is_none());
        assert!(m.get_toggle(usize::MAX, usize::MAX).is_none());
    }

    #[test]
    fn test_get_state_out_of_range_is_false() {
        let mut m = grid();
        for t in m.toggles_mut() {
            t.set_value(true);
        }
        assert!(m.get_state(1, 1));
        assert!(!m.get_state(2, 1));
        assert!(!m.get_state(1, 3));
    }

    #[test]
    fn test_toggle_by_name_and_selected_names() {
        let mut m = grid();
        m.activate_toggle("Grid4");
        assert_eq!(m.toggle_by_name("Grid4").map(LabeledToggle::value), Some(true));
        assert!(m.toggle_by_name("Nope").is_none());
        assert_eq!(m.selected_names(), vec!["Grid4"]);
    }

    // ===== Selection Tests =====

    #[test]
    fn test_activate_toggle_is_exclusive() {
        let mut m = ToggleMatrix::new(Size::new(10.0, 10.0), 1, 4, "R", FontSize::Small);
        for t in m.toggles_mut() {
            t.set_value(true);
        }
        m.activate_toggle("R0");
        let values: Vec<_> = m.toggles().iter().map(LabeledToggle::value).collect();
        assert_eq!(values, vec![true, false, false, false]);
    }

    #[test]
    fn test_activate_unknown_name_clears_all() {
        let mut m = grid();
        m.activate_toggle("Grid1");
        m.activate_toggle("missing");
        assert!(m.selected_names().is_empty());
    }

    #[test]
    fn test_set_all_toggles_without_trigger_sends_one_event() {
        let (mut m, log) = attached();
        m.set_all_toggles(true, false).expect("parent attached");
        assert!(m.toggles().iter().all(LabeledToggle::value));

        let events = log.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].name, "Grid");
        assert_eq!(events[0].kind, WidgetKind::ToggleMatrix);
        assert_eq!(events[0].value, None);
    }

    #[test]
    fn test_set_all_toggles_with_trigger_sends_each_then_matrix() {
        let (mut m, log) = attached();
        m.set_all_toggles(true, true).expect("parent attached");

        let names: Vec<_> = log.events().into_iter().map(|e| e.name).collect();
        assert_eq!(
            names,
            vec!["Grid0", "Grid1", "Grid2", "Grid3", "Grid4", "Grid5", "Grid"]
        );
        assert!(log.events()[..6].iter().all(|e| e.value == Some(true)));
    }

    #[test]
    fn test_set_all_toggles_empty_grid_still_notifies() {
        let mut m = ToggleMatrix::new(Size::new(10.0, 10.0), 0, 0, "E", FontSize::Small);
        let log = EventLog::shared();
        m.set_parent(log.clone());
        m.set_all_toggles(false, true).expect("parent attached");
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_set_all_toggles_requires_parent() {
        let mut m = grid();
        let err = m.set_all_toggles(true, false).expect_err("no parent");
        assert!(matches!(err, WidgetError::NoParent { ref widget } if widget == "Grid"));
        assert!(m.selected_names().is_empty());
    }

    #[test]
    fn test_set_toggle_with_trigger() {
        let (mut m, log) = attached();
        m.set_toggle(0, 1, true, true).expect("parent attached");
        assert!(m.get_state(0, 1));

        let events = log.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0], WidgetEvent::with_value("Grid1", WidgetKind::LabelToggle, true));
        assert_eq!(events[1].name, "Grid");
    }

    #[test]
    fn test_set_toggle_without_trigger_sends_only_matrix_event() {
        let (mut m, log) = attached();
        m.set_toggle(0, 1, true, false).expect("parent attached");
        assert!(m.get_state(0, 1));
        assert_eq!(log.len(), 1);
        assert_eq!(
            log.events()[0],
            WidgetEvent::without_value("Grid", WidgetKind::ToggleMatrix)
        );
    }

    #[test]
    fn test_set_toggle_out_of_range_still_notifies_matrix() {
        let (mut m, log) = attached();
        m.set_toggle(5, 5, true, true).expect("parent attached");
        assert!(m.selected_names().is_empty());
        assert_eq!(log.len(), 1);
        assert_eq!(log.count_for("Grid"), 1);
    }

    #[test]
    fn test_set_toggle_requires_parent() {
        let mut m = grid();
        assert!(matches!(
            m.set_toggle(0, 0, true, false),
            Err(WidgetError::NoParent { .. })
        ));
        assert!(!m.get_state(0, 0));
    }

    // ===== Bubbling Tests =====

    #[test]
    fn test_trigger_event_forwards_to_parent() {
        let (mut m, log) = attached();
        let child = WidgetEvent::with_value("Grid2", WidgetKind::LabelToggle, true);
        m.trigger_event(&child);
        assert_eq!(log.events(), vec![child]);
    }

    #[test]
    fn test_trigger_event_exclusive_when_multiple_disallowed() {
        let (mut m, log) = attached();
        m.set_all_toggles(true, false).expect("parent attached");
        log.take();

        m.set_allow_multiple(false);
        assert!(!m.allows_multiple());
        m.trigger_event(&WidgetEvent::with_value("Grid3", WidgetKind::LabelToggle, true));

        assert_eq!(m.selected_names(), vec!["Grid3"]);
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_trigger_event_without_parent_is_dropped() {
        let mut m = grid();
        m.set_allow_multiple(false);
        m.trigger_event(&WidgetEvent::with_value("Grid0", WidgetKind::LabelToggle, true));
        assert_eq!(m.selected_names(), vec!["Grid0"]);
    }

    // ===== Label and Font Tests =====

    #[test]
    fn test_set_label_text_by_name() {
        let mut m = grid();
        assert!(m.set_label_text("Grid4", "X"));
        for (i, t) in m.toggles().iter().enumerate() {
            let expected = if i == 4 { "X".to_string() } else { format!("Grid{i}") };
            assert_eq!(t.label_text(), expected);
        }
        assert_eq!(m.get_toggle(1, 1).map(LabeledToggle::label_text), Some("X"));
    }

    #[test]
    fn test_set_label_text_unknown_name() {
        let mut m = grid();
        assert!(!m.set_label_text("Other0", "X"));
    }

    #[test]
    fn test_set_label_text_at() {
        let mut m = grid();
        m.set_label_text_at("kick", 2, 1).expect("in range");
        assert_eq!(m.get_toggle(1, 2).map(LabeledToggle::label_text), Some("kick"));
    }

    #[test]
    fn test_set_label_text_at_out_of_bounds() {
        let mut m = grid();
        let err = m.set_label_text_at("x", 3, 0).expect_err("column 3 outside");
        assert!(matches!(
            err,
            WidgetError::CellOutOfBounds {
                row: 0,
                col: 3,
                rows: 2,
                cols: 3
            }
        ));
    }

    #[test]
    fn test_set_font_propagates() {
        let mut m = grid();
        let font = Font::new("Mono", 14.0);
        m.set_font(font.clone());
        assert_eq!(m.font(), &font);
        assert!(m.toggles().iter().all(|t| t.font() == &font));
    }

    // ===== Pointer Tests =====

    #[test]
    fn test_mouse_pressed_inside_goes_down() {
        let (mut m, _log) = attached();
        m.mouse_pressed(Point::new(5.0, 5.0));
        assert!(m.is_pressed());
        assert_eq!(m.state(), InteractionState::Down);
        assert!(m.is_fill_highlighted());
        assert!(!m.is_outline_highlighted());
    }

    #[test]
    fn test_mouse_pressed_outside_goes_normal() {
        let (mut m, _log) = attached();
        m.mouse_pressed(Point::new(5.0, 5.0));
        m.mouse_released();
        m.mouse_pressed(Point::new(500.0, 5.0));
        assert!(!m.is_pressed());
        assert_eq!(m.state(), InteractionState::Normal);
        assert!(!m.is_fill_highlighted());
    }

    #[test]
    fn test_mouse_released_clears_hit() {
        let (mut m, _log) = attached();
        m.mouse_pressed(Point::new(1.0, 1.0));
        m.mouse_released();
        assert!(!m.is_pressed());
    }

    #[test]
    fn test_drag_without_press_does_nothing() {
        let (mut m, _log) = attached();
        m.keys_mut().press(Key::ShiftLeft);
        assert!(m.mouse_dragged(Point::new(5.0, 5.0)).is_empty());
        assert!(!m.get_state(0, 0));
    }

    #[test]
    fn test_drag_with_modifier_paints_on() {
        let (mut m, _log) = attached();
        m.mouse_pressed(Point::new(5.0, 5.0));
        m.keys_mut().press(Key::ShiftRight);

        assert_eq!(m.mouse_dragged(Point::new(5.0, 5.0)), vec![0]);
        assert_eq!(m.mouse_dragged(Point::new(17.0, 5.0)), vec![1]);
        // already on
        assert!(m.mouse_dragged(Point::new(17.0, 5.0)).is_empty());
        assert_eq!(m.selected_names(), vec!["Grid0", "Grid1"]);
    }

    #[test]
    fn test_drag_without_modifier_paints_off() {
        let (mut m, _log) = attached();
        m.set_all_toggles(true, false).expect("parent attached");
        m.mouse_pressed(Point::new(5.0, 5.0));

        assert_eq!(m.mouse_dragged(Point::new(29.0, 17.0)), vec![5]);
        assert!(!m.get_state(1, 2));
        assert!(m.get_state(1, 1));
    }

    #[test]
    fn test_drag_in_gap_touches_nothing() {
        let (mut m, _log) = attached();
        m.mouse_pressed(Point::new(5.0, 5.0));
        m.keys_mut().press(Key::ShiftLeft);
        // x = 11 is in the padding between column 0 and column 1
        assert!(m.mouse_dragged(Point::new(11.0, 5.0)).is_empty());
    }

    #[test]
    fn test_paint_modifier_any_key() {
        let (m, _log) = attached();
        let mut m = m.paint_modifier(ModifierKey::AnyKey);
        m.mouse_pressed(Point::new(5.0, 5.0));
        m.keys_mut().press(Key::Char('p'));
        assert_eq!(m.mouse_dragged(Point::new(5.0, 5.0)), vec![0]);
    }

    // ===== Event Routing Tests =====

    #[test]
    fn test_event_click_flips_cell_and_bubbles() {
        let (mut m, log) = attached();
        let msg = m.event(&press(17.0, 17.0)).expect("message");
        let changed = msg.downcast::<ToggleMatrixChanged>().expect("ToggleMatrixChanged");
        assert_eq!(
            *changed,
            ToggleMatrixChanged {
                name: "Grid4".to_string(),
                row: 1,
                col: 1,
                value: true,
            }
        );
        assert_eq!(log.events(), vec![WidgetEvent::with_value("Grid4", WidgetKind::LabelToggle, true)]);
        assert_eq!(m.state(), InteractionState::Down);
    }

    #[test]
    fn test_event_click_exclusive_keeps_cell_on() {
        let (mut m, _log) = attached();
        m.set_allow_multiple(false);

        m.event(&press(5.0, 5.0));
        m.event(&Event::MouseUp {
            position: Point::new(5.0, 5.0),
            button: MouseButton::Left,
        });
        assert_eq!(m.selected_names(), vec!["Grid0"]);

        m.event(&press(17.0, 5.0));
        assert_eq!(m.selected_names(), vec!["Grid1"]);

        // Clicking the active cell in exclusive mode leaves it selected.
        let msg = m.event(&press(17.0, 5.0)).expect("message");
        let changed = msg.downcast::<ToggleMatrixChanged>().expect("ToggleMatrixChanged");
        assert!(changed.value);
        assert_eq!(m.selected_names(), vec!["Grid1"]);
    }

    #[test]
    fn test_event_click_in_gap_returns_none() {
        let (mut m, log) = attached();
        assert!(m.event(&press(11.0, 5.0)).is_none());
        assert!(m.is_pressed());
        assert!(log.is_empty());
    }

    #[test]
    fn test_event_right_click_presses_without_flipping() {
        let (mut m, _log) = attached();
        let event = Event::MouseDown {
            position: Point::new(5.0, 5.0),
            button: MouseButton::Right,
        };
        assert!(m.event(&event).is_none());
        assert!(m.is_pressed());
        assert!(!m.get_state(0, 0));
    }

    #[test]
    fn test_event_drag_paints_with_key_events() {
        let (mut m, _log) = attached();
        m.event(&Event::KeyDown {
            key: Key::ShiftLeft,
        });
        // the press flips cell 0 on; dragging over cell 2 paints it on
        m.event(&press(5.0, 5.0));
        let msg = m
            .event(&Event::MouseMove {
                position: Point::new(29.0, 5.0),
            })
            .expect("message");
        let painted = msg.downcast::<ToggleMatrixPainted>().expect("ToggleMatrixPainted");
        assert_eq!(
            *painted,
            ToggleMatrixPainted {
                cells: vec![(0, 2)],
                value: true
            }
        );

        m.event(&Event::KeyUp {
            key: Key::ShiftLeft,
        });
        let msg = m
            .event(&Event::MouseMove {
                position: Point::new(5.0, 5.0),
            })
            .expect("message");
        let painted = msg.downcast::<ToggleMatrixPainted>().expect("ToggleMatrixPainted");
        assert_eq!(painted.cells, vec![(0, 0)]);
        assert!(!painted.value);
    }

    #[test]
    fn test_event_move_after_release_is_ignored() {
        let (mut m, _log) = attached();
        m.event(&press(5.0, 5.0));
        m.event(&Event::MouseUp {
            position: Point::new(5.0, 5.0),
            button: MouseButton::Left,
        });
        assert!(m
            .event(&Event::MouseMove {
                position: Point::new(17.0, 5.0)
            })
            .is_none());
    }

    #[test]
    fn test_event_hidden_matrix_ignores_pointer() {
        let (mut m, log) = attached();
        m.set_visible(false);
        assert!(m.event(&press(5.0, 5.0)).is_none());
        assert!(!m.is_pressed());
        assert!(log.is_empty());
    }

    // ===== Widget Trait Tests =====

    #[test]
    fn test_matrix_widget_metadata() {
        let m = grid().accessible_name("Step sequencer").test_id("seq");
        assert_eq!(Widget::type_id(&m), TypeId::of::<ToggleMatrix>());
        assert_eq!(m.accessible_role(), AccessibleRole::Grid);
        assert_eq!(Widget::accessible_name(&m), Some("Step sequencer"));
        assert_eq!(Widget::test_id(&m), Some("seq"));
        assert_eq!(m.children().len(), 6);
        assert!(m.is_interactive());
    }

    #[test]
    fn test_matrix_accessible_name_defaults_to_name() {
        assert_eq!(Widget::accessible_name(&grid()), Some("Grid"));
    }

    // ===== Paint Tests =====

    #[test]
    fn test_paint_draws_every_cell_without_labels() {
        let (m, _log) = attached();
        let mut canvas = RecordingCanvas::new();
        m.paint(&mut canvas);
        // back + outline per cell
        assert_eq!(canvas.command_count(), 12);
        assert_eq!(canvas.texts().count(), 0);
    }

    #[test]
    fn test_paint_draw_back_and_highlight() {
        let (m, _log) = attached();
        let mut m = m.draw_back(true);
        m.mouse_pressed(Point::new(5.0, 5.0));

        let mut canvas = RecordingCanvas::new();
        m.paint(&mut canvas);
        assert_eq!(canvas.command_count(), 14);
        assert_eq!(canvas.commands()[0].rect_bounds(), Some(m.rect()));
        assert!(matches!(
            canvas.commands().last(),
            Some(DrawCommand::StrokeRect { bounds, .. }) if *bounds == m.padding_rect()
        ));
    }

    #[test]
    fn test_paint_clips_to_padding_rect() {
        let (m, _log) = attached();
        let m = m.draw_back(true);
        let mut canvas = RecordingCanvas::new();
        m.paint(&mut canvas);

        assert_eq!(canvas.command_count(), 13);
        for i in 0..canvas.command_count() {
            assert_eq!(canvas.clip_at(i), Some(m.padding_rect()));
        }
        assert_eq!(canvas.max_clip_depth(), 1);
        assert!(canvas.current_clip().is_none());
    }

    #[test]
    fn test_paint_hidden_matrix_draws_nothing() {
        let (mut m, _log) = attached();
        m.set_visible(false);
        let mut canvas = RecordingCanvas::new();
        m.paint(&mut canvas);
        assert!(canvas.is_empty());
    }

    // ===== Property Tests =====

    proptest! {
        #[test]
        fn prop_get_toggle_name_matches_row_major_index(rows in 1usize..8, cols in 1usize..8) {
            let m = ToggleMatrix::new(Size::new(5.0, 5.0), rows, cols, "M", FontSize::Small);
            prop_assert_eq!(m.toggles().len(), rows * cols);
            for row in 0..rows {
                for col in 0..cols {
                    let expected = format!("M{}", row * cols + col);
                    prop_assert_eq!(m.get_toggle(row, col).map(LabeledToggle::name), Some(expected.as_str()));
                }
            }
        }

        #[test]
        fn prop_get_state_out_of_range_is_false(
            rows in 0usize..6, cols in 0usize..6, row in 0usize..20, col in 0usize..20
        ) {
            let mut m = ToggleMatrix::new(Size::new(5.0, 5.0), rows, cols, "M", FontSize::Small);
            for t in m.toggles_mut() {
                t.set_value(true);
            }
            prop_assert_eq!(m.get_state(row, col), row < rows && col < cols);
        }

        #[test]
        fn prop_footprint_matches_formula(
            rows in 1usize..10, cols in 1usize..10,
            w in 1.0f32..50.0, h in 1.0f32..50.0, pad in 0.0f32..10.0
        ) {
            let mut m = ToggleMatrix::new(Size::new(w, h), rows, cols, "M", FontSize::Small).padding(pad);
            m.set_parent(EventLog::shared());
            let expected_w = cols as f32 * w + (cols as f32 - 1.0) * pad;
            let expected_h = rows as f32 * h + (rows as f32 - 1.0) * pad;
            prop_assert!((m.rect().width - expected_w).abs() < 1e-3);
            prop_assert!((m.rect().height - expected_h).abs() < 1e-3);
        }

        #[test]
        fn prop_exclusive_mode_leaves_one_selected(
            clicks in prop::collection::vec((0usize..3, 0usize..4), 1..20)
        ) {
            let mut m = ToggleMatrix::new(Size::new(10.0, 10.0), 3, 4, "X", FontSize::Small);
            m.set_parent(EventLog::shared());
            m.set_allow_multiple(false);
            for (row, col) in clicks {
                let center = Point::new(col as f32 * 12.0 + 5.0, row as f32 * 12.0 + 5.0);
                m.event(&press(center.x, center.y));
                m.event(&Event::MouseUp { position: center, button: MouseButton::Left });
                prop_assert_eq!(m.selected_names().len(), 1);
            }
        }
    }
}
