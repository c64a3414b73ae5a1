//! Keyboard state tracking.
//!
//! Widgets that react to "is a modifier held right now" (drag painting,
//! multi-select) keep a [`KeyTracker`] fed from `KeyDown`/`KeyUp` events
//! and query it through [`KeyTracker::modifiers`] or
//! [`KeyTracker::is_held`].

use crate::event::{Event, Key};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Modifier keys currently held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    /// Control key (Cmd on Mac).
    pub ctrl: bool,
    /// Alt key (Option on Mac).
    pub alt: bool,
    /// Shift key.
    pub shift: bool,
    /// Meta key (Windows key, Cmd on Mac).
    pub meta: bool,
}

impl Modifiers {
    /// Create custom modifiers.
    pub const fn new(ctrl: bool, alt: bool, shift: bool, meta: bool) -> Self {
        Self {
            ctrl,
            alt,
            shift,
            meta,
        }
    }
}

/// A designated key whose held state a widget consults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModifierKey {
    /// Either shift key
    #[default]
    Shift,
    /// Either control key
    Control,
    /// Either alt key
    Alt,
    /// Either meta key
    Meta,
    /// Any key at all, modifier or not
    AnyKey,
}

/// Tracks which keys are currently held.
#[derive(Debug, Clone, Default)]
pub struct KeyTracker {
    held: HashSet<Key>,
}

impl KeyTracker {
    /// Create a tracker with no keys held.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Update state from an event. Returns `true` if the event was a key event.
    pub fn handle(&mut self, event: &Event) -> bool {
        match event {
            Event::KeyDown { key } => {
                self.press(*key);
                true
            }
            Event::KeyUp { key } => {
                self.release(*key);
                true
            }
            // Held keys are unknowable once focus leaves.
            Event::FocusOut => {
                self.clear();
                false
            }
            _ => false,
        }
    }

    /// Mark a key as held.
    pub fn press(&mut self, key: Key) {
        self.held.insert(key);
    }

    /// Mark a key as released.
    pub fn release(&mut self, key: Key) {
        self.held.remove(&key);
    }

    /// Release every key.
    pub fn clear(&mut self) {
        self.held.clear();
    }

    /// Check if a specific key is held.
    #[must_use]
    pub fn is_pressed(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// Check if any key is held.
    #[must_use]
    pub fn any_pressed(&self) -> bool {
        !self.held.is_empty()
    }

    /// Current modifier state.
    #[must_use]
    pub fn modifiers(&self) -> Modifiers {
        self.held
            .iter()
            .filter(|key| key.is_modifier())
            .fold(Modifiers::default(), |mut m, key| {
                match key {
                    Key::ControlLeft | Key::ControlRight => m.ctrl = true,
                    Key::AltLeft | Key::AltRight => m.alt = true,
                    Key::ShiftLeft | Key::ShiftRight => m.shift = true,
                    _ => m.meta = true,
                }
                m
            })
    }

    /// Check if the designated key is held.
    #[must_use]
    pub fn is_held(&self, key: ModifierKey) -> bool {
        let modifiers = self.modifiers();
        match key {
            ModifierKey::Shift => modifiers.shift,
            ModifierKey::Control => modifiers.ctrl,
            ModifierKey::Alt => modifiers.alt,
            ModifierKey::Meta => modifiers.meta,
            ModifierKey::AnyKey => self.any_pressed(),
        }
    }
}
