//! Core types and traits for the Tessera widget toolkit.
//!
//! This crate provides foundational types used throughout Tessera:
//! - Geometric primitives: [`Point`], [`Size`], [`Rect`]
//! - Color representation: [`Color`]
//! - Layout constraints: [`Constraints`]
//! - Input: [`Event`], [`Key`], [`KeyTracker`]
//! - Widgets and painting: [`Widget`], [`Canvas`], [`RecordingCanvas`]
//! - Change bubbling: [`WidgetEvent`], [`EventSink`], [`Composite`]

mod bubble;
mod canvas;
mod color;
mod constraints;
pub mod draw;
mod error;
mod event;
mod font;
mod geometry;
mod keyboard;
pub mod widget;

pub use bubble::{Composite, EventLog, EventSink, ParentHandle, WidgetEvent};
pub use canvas::RecordingCanvas;
pub use color::Color;
pub use constraints::Constraints;
pub use error::{WidgetError, WidgetResult};
pub use event::{Event, Key, MouseButton};
pub use font::{Font, FontSize};
pub use geometry::{Point, Rect, Size};
pub use keyboard::{KeyTracker, ModifierKey, Modifiers};
pub use widget::{
    AccessibleRole, Canvas, InteractionState, LayoutResult, TextStyle, TypeId, Widget, WidgetKind,
};
