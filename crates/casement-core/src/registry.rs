//! Ordered, position-addressed collection of managed windows.

use std::fmt;
use std::sync::Arc;

use tracing::warn;

use casement_common::{HostError, WindowHandle};

use crate::host::TerminateWindow;

/// One child window's tracked state.
///
/// Lifecycle: created and attached by the manager, then minimized /
/// restored any number of times, until closed (terminal). A closed
/// window is removed from the registry and never reappears.
pub struct ManagedWindow {
    handle: WindowHandle,
    caption: String,
    minimized: bool,
    terminate: Arc<dyn TerminateWindow>,
}

impl ManagedWindow {
    pub(crate) fn new(
        handle: WindowHandle,
        caption: String,
        terminate: Arc<dyn TerminateWindow>,
    ) -> Self {
        Self {
            handle,
            caption,
            minimized: false,
            terminate,
        }
    }

    pub fn handle(&self) -> WindowHandle {
        self.handle
    }

    pub fn caption(&self) -> &str {
        &self.caption
    }

    pub fn is_minimized(&self) -> bool {
        self.minimized
    }

    /// Flip the minimized flag, returning the new value.
    pub(crate) fn toggle_minimize(&mut self) -> bool {
        self.minimized = !self.minimized;
        self.minimized
    }

    /// Invoke the host's termination capability for this window.
    pub(crate) fn terminate(&self) -> Result<(), HostError> {
        self.terminate.terminate()
    }
}

impl fmt::Debug for ManagedWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManagedWindow")
            .field("handle", &self.handle)
            .field("caption", &self.caption)
            .field("minimized", &self.minimized)
            .finish()
    }
}

/// Ordered sequence of [`ManagedWindow`], unique by handle.
///
/// An entry's index is its current position and is not stable across
/// removals: removing entry `k` shifts all later entries down by one.
#[derive(Default)]
pub struct WindowRegistry {
    entries: Vec<ManagedWindow>,
}

impl WindowRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry. Rejects a handle that is already tracked.
    pub(crate) fn push(&mut self, entry: ManagedWindow) -> bool {
        if self.contains(entry.handle()) {
            warn!(handle = %entry.handle(), "duplicate handle rejected");
            return false;
        }
        self.entries.push(entry);
        true
    }

    /// Remove the entry for `handle`, shifting later entries down.
    pub(crate) fn remove(&mut self, handle: WindowHandle) -> Option<ManagedWindow> {
        let index = self.position(handle)?;
        Some(self.entries.remove(index))
    }

    pub fn contains(&self, handle: WindowHandle) -> bool {
        self.position(handle).is_some()
    }

    pub fn position(&self, handle: WindowHandle) -> Option<usize> {
        self.entries.iter().position(|e| e.handle() == handle)
    }

    pub fn get(&self, handle: WindowHandle) -> Option<&ManagedWindow> {
        self.entries.iter().find(|e| e.handle() == handle)
    }

    pub(crate) fn get_mut(&mut self, handle: WindowHandle) -> Option<&mut ManagedWindow> {
        self.entries.iter_mut().find(|e| e.handle() == handle)
    }

    /// Handle at the given current position.
    pub fn handle_at(&self, index: usize) -> Option<WindowHandle> {
        self.entries.get(index).map(|e| e.handle())
    }

    /// Snapshot copy of all handles in registry order.
    pub fn handles(&self) -> Vec<WindowHandle> {
        self.entries.iter().map(|e| e.handle()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ManagedWindow> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
