//! Canvas implementations for rendering.

use crate::draw::DrawCommand;
use crate::widget::{Canvas, TextStyle};
use crate::{Color, Point, Rect};

/// Canvas that records draw operations as [`DrawCommand`]s.
///
/// Each recorded command carries the clip region active when it was drawn,
/// so paint tests can check what a widget confines its output to.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    commands: Vec<DrawCommand>,
    clips: Vec<Option<Rect>>,
    clip_stack: Vec<Rect>,
    max_clip_depth: usize,
}

impl RecordingCanvas {
    /// Create a new empty recording canvas.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the recorded draw commands.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Get the number of recorded commands.
    #[must_use]
    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    /// Check if no commands have been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Clear all recorded commands and clip state.
    pub fn clear(&mut self) {
        self.commands.clear();
        self.clips.clear();
        self.clip_stack.clear();
        self.max_clip_depth = 0;
    }

    /// Get the current clip bounds (None if no clips pushed).
    #[must_use]
    pub fn current_clip(&self) -> Option<Rect> {
        self.clip_stack.last().copied()
    }

    /// Clip region that was active when command `index` was recorded.
    #[must_use]
    pub fn clip_at(&self, index: usize) -> Option<Rect> {
        self.clips.get(index).copied().flatten()
    }

    /// Deepest clip nesting reached since creation or the last `clear`.
    #[must_use]
    pub const fn max_clip_depth(&self) -> usize {
        self.max_clip_depth
    }

    fn record(&mut self, command: DrawCommand) {
        self.clips.push(self.current_clip());
        self.commands.push(command);
    }

    /// Iterate the text runs painted so far.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(DrawCommand::text)
    }
}

impl Canvas for RecordingCanvas {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.record(DrawCommand::FillRect {
            bounds: rect,
            color,
        });
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f32) {
        self.record(DrawCommand::StrokeRect {
            bounds: rect,
            color,
            width,
        });
    }

    fn draw_text(&mut self, text: &str, position: Point, style: &TextStyle) {
        self.record(DrawCommand::Text {
            content: text.to_string(),
            position,
            style: style.clone(),
        });
    }

    fn push_clip(&mut self, rect: Rect) {
        self.clip_stack.push(rect);
        self.max_clip_depth = self.max_clip_depth.max(self.clip_stack.len());
    }

    fn pop_clip(&mut self) {
        self.clip_stack.pop();
    }
}
