//! Debounced-keystroke text field.
//!
//! The client half reports every keystroke, collapsed by a debounce
//! delay; the server half tracks the value and informs key-press
//! listeners. A negative delay disables key-press events entirely.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// Default debounce delay between the start of a typing burst and the
/// client's send.
pub const DEFAULT_DELAY_MS: i32 = 300;

/// Inbound variable bundle from the client half.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextInput {
    pub text: String,
    pub keypressed: bool,
}

/// Attribute bundle painted to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextFieldState {
    pub value: String,
    pub delay_ms: i32,
}

/// Server half of the text field.
pub struct ImmediateTextField {
    value: String,
    delay_ms: i32,
    listeners: Vec<Box<dyn FnMut(&str) + Send>>,
    dirty: bool,
}

impl ImmediateTextField {
    pub fn new() -> Self {
        Self {
            value: String::new(),
            delay_ms: DEFAULT_DELAY_MS,
            listeners: Vec::new(),
            dirty: true,
        }
    }

    pub fn with_value(value: impl Into<String>) -> Self {
        let mut field = Self::new();
        field.value = value.into();
        field
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Server-side value write; schedules a repaint.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.dirty = true;
    }

    pub fn delay_ms(&self) -> i32 {
        self.delay_ms
    }

    /// Set the debounce delay. Negative disables key-press events.
    pub fn set_delay_ms(&mut self, delay_ms: i32) {
        self.delay_ms = delay_ms;
        self.dirty = true;
    }

    /// Register a key-press listener, called with the field's value.
    pub fn on_keypress<F>(&mut self, listener: F)
    where
        F: FnMut(&str) + Send + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// Apply an inbound client update. Fires listeners when the update
    /// carries a keystroke and events are enabled.
    pub fn apply_input(&mut self, input: TextInput) {
        self.value = input.text;
        if input.keypressed && self.delay_ms >= 0 {
            for listener in &mut self.listeners {
                listener(&self.value);
            }
        }
    }

    /// Encode the outbound state if anything changed.
    pub fn encode(&mut self) -> Option<TextFieldState> {
        if !self.dirty {
            return None;
        }
        self.dirty = false;
        Some(TextFieldState {
            value: self.value.clone(),
            delay_ms: self.delay_ms,
        })
    }
}

impl Default for ImmediateTextField {
    fn default() -> Self {
        Self::new()
    }
}

/// Client-side keystroke debouncer.
///
/// Collapses a typing burst into one send: the clock starts at the
/// first unsent keystroke, and the burst is sent once the configured
/// delay has elapsed.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending_since: Option<Instant>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending_since: None,
        }
    }

    /// Record a keystroke at `now`.
    pub fn key_pressed(&mut self, now: Instant) {
        if self.pending_since.is_none() {
            self.pending_since = Some(now);
        }
    }

    pub fn has_pending(&self) -> bool {
        self.pending_since.is_some()
    }

    /// Whether the pending burst should be sent at `now`. Consumes the
    /// pending state when it answers yes.
    pub fn should_send(&mut self, now: Instant) -> bool {
        match self.pending_since {
            Some(since) if now.duration_since(since) >= self.delay => {
                self.pending_since = None;
                true
            }
            _ => false,
        }
    }
}
