//! Toggle button with a text caption drawn inside its body.

use serde::{Deserialize, Serialize};
use std::any::Any;
use tessera_core::{
    widget::{AccessibleRole, LayoutResult},
    Canvas, Color, Constraints, Event, Font, FontSize, MouseButton, Point, Rect, Size, TextStyle,
    TypeId, Widget, WidgetEvent, WidgetKind,
};

/// Message emitted when a toggle's value changes from input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleChanged {
    /// Name of the toggle
    pub name: String,
    /// The new value
    pub value: bool,
}

/// Toggle button with a label.
///
/// The label defaults to the toggle's name and is drawn centred inside the
/// body. Hidden toggles neither paint nor report hits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabeledToggle {
    /// Identifier, unique among siblings
    name: String,
    /// Current value
    value: bool,
    /// Caption text
    label_text: String,
    /// Whether the caption is drawn
    label_visible: bool,
    /// Whether the body is drawn and hit-testable
    visible: bool,
    /// Body rectangle
    rect: Rect,
    /// Caption font
    font: Font,
    /// Body color when off
    back_color: Color,
    /// Body color when on
    fill_color: Color,
    /// Outline color
    outline_color: Color,
    /// Caption color
    label_color: Color,
    /// Name of the owning composite, if any
    parent_name: Option<String>,
    /// Accessible name
    accessible_name_value: Option<String>,
    /// Test ID
    test_id_value: Option<String>,
}

impl LabeledToggle {
    /// Create a toggle of the given size at the origin.
    #[must_use]
    pub fn new(name: impl Into<String>, value: bool, size: Size, font_size: FontSize) -> Self {
        let name = name.into();
        Self {
            label_text: name.clone(),
            name,
            value,
            label_visible: true,
            visible: true,
            rect: Rect::from_origin_size(Point::ORIGIN, size),
            font: Font::sized(font_size),
            back_color: Color::from_rgba8(0, 0, 0, 75),
            fill_color: Color::from_rgba8(255, 255, 255, 200),
            outline_color: Color::from_rgba8(255, 255, 255, 100),
            label_color: Color::WHITE,
            parent_name: None,
            accessible_name_value: None,
            test_id_value: None,
        }
    }

    /// Set the body color when off.
    #[must_use]
    pub const fn back_color(mut self, color: Color) -> Self {
        self.back_color = color;
        self
    }

    /// Set the body color when on.
    #[must_use]
    pub const fn fill_color(mut self, color: Color) -> Self {
        self.fill_color = color;
        self
    }

    /// Set the outline color.
    #[must_use]
    pub const fn outline_color(mut self, color: Color) -> Self {
        self.outline_color = color;
        self
    }

    /// Set the caption color.
    #[must_use]
    pub const fn label_color(mut self, color: Color) -> Self {
        self.label_color = color;
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

    /// Get the name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the current value.
    #[must_use]
    pub const fn value(&self) -> bool {
        self.value
    }

    /// Set the value.
    pub fn set_value(&mut self, value: bool) {
        self.value = value;
    }

    /// Flip the value.
    pub fn toggle(&mut self) {
        self.value = !self.value;
    }

    /// Get the caption text.
    #[must_use]
    pub fn label_text(&self) -> &str {
        &self.label_text
    }

    /// Set the caption text.
    pub fn set_label_text(&mut self, text: impl Into<String>) {
        self.label_text = text.into();
    }

    /// Whether the caption is drawn.
    #[must_use]
    pub const fn is_label_visible(&self) -> bool {
        self.label_visible
    }

    /// Show or hide the caption.
    pub fn set_label_visible(&mut self, visible: bool) {
        self.label_visible = visible;
    }

    /// Whether the body is drawn.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Show or hide the body.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Get the caption font.
    #[must_use]
    pub const fn font(&self) -> &Font {
        &self.font
    }

    /// Replace the caption font.
    pub fn set_font(&mut self, font: Font) {
        self.font = font;
    }

    /// Get the body rectangle.
    #[must_use]
    pub const fn rect(&self) -> Rect {
        self.rect
    }

    /// Move the body, keeping its size.
    pub fn set_position(&mut self, position: Point) {
        self.rect = self.rect.with_origin(position);
    }

    /// Name of the owning composite.
    #[must_use]
    pub fn parent_name(&self) -> Option<&str> {
        self.parent_name.as_deref()
    }

    /// Record the owning composite.
    pub fn set_parent_name(&mut self, name: impl Into<String>) {
        self.parent_name = Some(name.into());
    }

    /// Check if a point lands on the visible body.
    #[must_use]
    pub fn is_hit(&self, point: Point) -> bool {
        self.visible && self.rect.contains_point(&point)
    }

    /// Change notification describing the current value.
    #[must_use]
    pub fn change_event(&self) -> WidgetEvent {
        WidgetEvent::with_value(self.name.clone(), WidgetKind::LabelToggle, self.value)
    }

    fn label_origin(&self) -> Point {
        let width = self.font.text_width(&self.label_text);
        Point::new(
            self.rect.x + (self.rect.width - width) / 2.0,
            self.rect.y + (self.rect.height + self.font.size) / 2.0,
        )
    }
}

impl Widget for LabeledToggle {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn measure(&self, constraints: Constraints) -> Size {
        constraints.constrain(self.rect.size())
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        self.rect = bounds;
        LayoutResult {
            size: bounds.size(),
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        if !self.visible {
            return;
        }

        canvas.fill_rect(self.rect, self.back_color);
        if self.value {
            canvas.fill_rect(self.rect, self.fill_color);
        }
        canvas.stroke_rect(self.rect, self.outline_color, 1.0);

        if self.label_visible && !self.label_text.is_empty() {
            let style = TextStyle {
                size: self.font.size,
                color: if self.value {
                    Color::BLACK
                } else {
                    self.label_color
                },
                ..TextStyle::default()
            };
            canvas.draw_text(&self.label_text, self.label_origin(), &style);
        }
    }

    fn event(&mut self, event: &Event) -> Option<Box<dyn Any + Send>> {
        if let Event::MouseDown {
            position,
            button: MouseButton::Left,
        } = event
        {
            if self.is_hit(*position) {
                self.toggle();
                return Some(Box::new(ToggleChanged {
                    name: self.name.clone(),
                    value: self.value,
                }));
            }
        }

        None
    }

    fn is_interactive(&self) -> bool {
        self.visible
    }

    fn accessible_name(&self) -> Option<&str> {
        self.accessible_name_value.as_deref().or_else(|| {
            if self.label_text.is_empty() {
                None
            } else {
                Some(&self.label_text)
            }
        })
    }

    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::Checkbox
    }

    fn test_id(&self) -> Option<&str> {
        self.test_id_value.as_deref()
    }

    fn bounds(&self) -> Rect {
        self.rect
    }
}
