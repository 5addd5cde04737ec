//! Visual representation of the managed window list.

use tracing::{debug, warn};

use casement_common::{Command, ProtocolError, SyncSnapshot};

/// Style name of the view's root element.
pub const CLASSNAME: &str = "cm-windowmanager";

/// Style name of one window box.
pub const WINDOWBOX_CLASSNAME: &str = "cm-windowmanager-windowbox";

/// Style name of a minimized window box. Mutually exclusive with
/// [`WINDOWBOX_CLASSNAME`].
pub const WINDOWBOX_CLASSNAME_MINIMIZED: &str = "cm-windowmanager-windowbox-minimized";

/// One rendered box, index-aligned with the snapshot it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowBox {
    pub caption: String,
    pub minimized: bool,
}

impl WindowBox {
    /// The box's current style state.
    pub fn class_name(&self) -> &'static str {
        if self.minimized {
            WINDOWBOX_CLASSNAME_MINIMIZED
        } else {
            WINDOWBOX_CLASSNAME
        }
    }
}

/// Pointer button of an activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// Primary click: request a minimize toggle.
    Primary,
    /// Secondary/context click: request a close.
    Secondary,
}

/// A pointer activation on the box at `index`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    pub index: usize,
    pub button: PointerButton,
}

/// Result of handling a pointer activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Activation {
    /// Command to send to the server, if the activation was valid.
    pub command: Option<Command>,
    /// Whether the platform's native default behavior (the context
    /// menu, for secondary activation) must be suppressed.
    pub suppress_default: bool,
}

/// Client view of the window manager.
///
/// Server-authoritative: pointer activations only emit commands, they
/// never change local state. Each snapshot fully replaces the rendered
/// children; window counts are expected to stay small.
#[derive(Debug, Default)]
pub struct WindowManagerView {
    boxes: Vec<WindowBox>,
}

impl WindowManagerView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn boxes(&self) -> &[WindowBox] {
        &self.boxes
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// Replace all rendered children from a new snapshot.
    pub fn apply_snapshot(&mut self, snapshot: &SyncSnapshot) -> Result<(), ProtocolError> {
        snapshot.validate()?;
        self.boxes = snapshot
            .window_names
            .iter()
            .zip(&snapshot.minimized_flags)
            .map(|(caption, flag)| WindowBox {
                caption: caption.clone(),
                minimized: *flag != 0,
            })
            .collect();
        debug!(len = self.boxes.len(), "view redrawn");
        Ok(())
    }

    /// Handle a pointer activation on a rendered box.
    ///
    /// Primary maps to `toggleMinimize(index)`, secondary to
    /// `close(index)` with the native context menu suppressed. An
    /// index outside the rendered boxes emits nothing.
    pub fn pointer(&self, event: PointerEvent) -> Activation {
        let suppress_default = matches!(event.button, PointerButton::Secondary);
        if event.index >= self.boxes.len() {
            warn!(index = event.index, len = self.boxes.len(), "activation outside rendered boxes");
            return Activation {
                command: None,
                suppress_default,
            };
        }
        let command = match event.button {
            PointerButton::Primary => Command::ToggleMinimize { index: event.index },
            PointerButton::Secondary => Command::Close { index: event.index },
        };
        Activation {
            command: Some(command),
            suppress_default,
        }
    }
}
