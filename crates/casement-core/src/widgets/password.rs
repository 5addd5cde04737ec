//! Swappable password field: a text input plus a "secret" checkbox
//! that swaps the input between masked and plain rendering.

use serde::{Deserialize, Serialize};

/// Attribute bundle painted to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordFieldState {
    pub caption: Option<String>,
    pub value: String,
    pub secret: bool,
}

/// Inbound checkbox change from the client half.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckboxInput {
    pub secret: bool,
}

/// Composite field; starts masked.
#[derive(Debug)]
pub struct SwappablePasswordField {
    caption: Option<String>,
    value: String,
    secret: bool,
    dirty: bool,
}

impl SwappablePasswordField {
    pub fn new() -> Self {
        Self {
            caption: None,
            value: String::new(),
            secret: true,
            dirty: true,
        }
    }

    pub fn with_caption(caption: impl Into<String>) -> Self {
        let mut field = Self::new();
        field.caption = Some(caption.into());
        field
    }

    pub fn caption(&self) -> Option<&str> {
        self.caption.as_deref()
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.dirty = true;
    }

    pub fn is_secret(&self) -> bool {
        self.secret
    }

    /// Swap between masked and plain rendering.
    pub fn set_secret(&mut self, secret: bool) {
        if self.secret != secret {
            self.secret = secret;
            self.dirty = true;
        }
    }

    /// Apply the client's checkbox change.
    pub fn apply_checkbox(&mut self, input: CheckboxInput) {
        self.set_secret(input.secret);
    }

    /// Encode the outbound state if anything changed.
    pub fn encode(&mut self) -> Option<PasswordFieldState> {
        if !self.dirty {
            return None;
        }
        self.dirty = false;
        Some(PasswordFieldState {
            caption: self.caption.clone(),
            value: self.value.clone(),
            secret: self.secret,
        })
    }
}

impl Default for SwappablePasswordField {
    fn default() -> Self {
        Self::new()
    }
}
