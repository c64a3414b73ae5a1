//! Change notifications bubbling up the widget tree.
//!
//! A leaf widget that changes value reports a [`WidgetEvent`] to the
//! composite that owns it. The composite may react (for example by
//! enforcing exclusive selection) and then forwards the event to its own
//! parent, an [`EventSink`]. Parents are held as `Arc<dyn EventSink>` so a
//! container can hand the same sink to several children.

use crate::widget::WidgetKind;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, PoisonError};

/// A change notification for a single widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetEvent {
    /// Name of the widget that changed
    pub name: String,
    /// Kind of the widget that changed
    pub kind: WidgetKind,
    /// Boolean value after the change, for value-carrying widgets
    pub value: Option<bool>,
}

impl WidgetEvent {
    /// Create an event for a value-carrying widget.
    #[must_use]
    pub fn with_value(name: impl Into<String>, kind: WidgetKind, value: bool) -> Self {
        Self {
            name: name.into(),
            kind,
            value: Some(value),
        }
    }

    /// Create an event for a widget without a single value.
    #[must_use]
    pub fn without_value(name: impl Into<String>, kind: WidgetKind) -> Self {
        Self {
            name: name.into(),
            kind,
            value: None,
        }
    }
}

/// Receiver of bubbled change notifications.
pub trait EventSink: Send + Sync {
    /// Handle a change in one of this sink's descendants.
    fn trigger_event(&self, event: &WidgetEvent);
}

impl<F> EventSink for F
where
    F: Fn(&WidgetEvent) + Send + Sync,
{
    fn trigger_event(&self, event: &WidgetEvent) {
        self(event);
    }
}

/// Shared handle to a parent sink.
pub type ParentHandle = Arc<dyn EventSink>;

/// A composite widget: handles child changes and bubbles them upward.
pub trait Composite {
    /// React to a change in an owned child, then forward it to the parent.
    fn trigger_event(&mut self, child: &WidgetEvent);

    /// Attach this widget to a parent.
    fn set_parent(&mut self, parent: ParentHandle);

    /// Currently attached parent, if any.
    fn parent(&self) -> Option<&ParentHandle>;
}

/// Sink that records every event it receives, in order.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Mutex<Vec<WidgetEvent>>,
}

impl EventLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty log behind an `Arc`, ready to attach as a parent.
    #[must_use]
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Snapshot of received events.
    #[must_use]
    pub fn events(&self) -> Vec<WidgetEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of received events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Check if nothing was received.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of received events whose source has the given name.
    #[must_use]
    pub fn count_for(&self, name: &str) -> usize {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|e| e.name == name)
            .count()
    }

    /// Drain received events.
    pub fn take(&self) -> Vec<WidgetEvent> {
        std::mem::take(&mut *self.events.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl EventSink for EventLog {
    fn trigger_event(&self, event: &WidgetEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
    }
}
