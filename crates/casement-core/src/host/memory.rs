//! In-process host implementation.
//!
//! `MemoryHost` stands in for a real windowing framework: it tracks
//! the windows it has created, honors attach/detach of the application
//! root, and fires each window's [`CloseSignal`] on every close path.
//! Used by the demo binary and throughout the test suite.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tracing::debug;

use casement_common::{HostError, WindowHandle};

use super::{CloseSignal, TerminateWindow, WindowHost};

struct MemoryWindow {
    caption: String,
    signal: CloseSignal,
    live: bool,
}

type WindowTable = Arc<Mutex<HashMap<WindowHandle, MemoryWindow>>>;

/// A headless host: windows exist only as bookkeeping entries.
pub struct MemoryHost {
    attached: bool,
    windows: WindowTable,
}

impl MemoryHost {
    /// A host with an application root already bound.
    pub fn new() -> Self {
        Self {
            attached: true,
            windows: Arc::default(),
        }
    }

    /// A host with no application root bound yet.
    pub fn detached() -> Self {
        Self {
            attached: false,
            windows: Arc::default(),
        }
    }

    /// Bind or unbind the application root.
    pub fn set_attached(&mut self, attached: bool) {
        self.attached = attached;
    }

    /// Number of windows currently alive host-side.
    pub fn live_count(&self) -> usize {
        self.windows
            .lock()
            .map(|w| w.values().filter(|w| w.live).count())
            .unwrap_or(0)
    }

    /// Whether the window is alive host-side.
    pub fn is_live(&self, handle: WindowHandle) -> bool {
        self.windows
            .lock()
            .ok()
            .and_then(|w| w.get(&handle).map(|w| w.live))
            .unwrap_or(false)
    }

    /// Caption the window was created with.
    pub fn caption(&self, handle: WindowHandle) -> Option<String> {
        self.windows
            .lock()
            .ok()
            .and_then(|w| w.get(&handle).map(|w| w.caption.clone()))
    }

    /// Close a window from outside the registry (e.g. the user closing
    /// it through the host's own controls). Fires the close signal.
    pub fn close_out_of_band(&self, handle: WindowHandle) -> bool {
        let signal = {
            let mut windows = match self.windows.lock() {
                Ok(w) => w,
                Err(_) => return false,
            };
            match windows.get_mut(&handle) {
                Some(window) if window.live => {
                    window.live = false;
                    window.signal.clone()
                }
                _ => return false,
            }
        };
        debug!(handle = %handle, "out-of-band close");
        signal.fire();
        true
    }

    /// Re-deliver a close notification for a window that is already
    /// gone. Simulates the host defect the reconciler must flag.
    pub fn fire_duplicate_close(&self, handle: WindowHandle) -> bool {
        let signal = self
            .windows
            .lock()
            .ok()
            .and_then(|w| w.get(&handle).map(|w| w.signal.clone()));
        match signal {
            Some(signal) => {
                signal.fire();
                true
            }
            None => false,
        }
    }
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

impl WindowHost for MemoryHost {
    fn is_attached(&self) -> bool {
        self.attached
    }

    fn create_window(
        &mut self,
        handle: WindowHandle,
        caption: &str,
        on_close: CloseSignal,
    ) -> Result<Arc<dyn TerminateWindow>, HostError> {
        if !self.attached {
            return Err(HostError::Detached);
        }
        let mut windows = self
            .windows
            .lock()
            .map_err(|_| HostError::Terminate("window table poisoned".into()))?;
        windows.insert(
            handle,
            MemoryWindow {
                caption: caption.to_string(),
                signal: on_close,
                live: true,
            },
        );
        debug!(handle = %handle, caption, "host window created");
        Ok(Arc::new(MemoryTerminate {
            handle,
            windows: Arc::clone(&self.windows),
        }))
    }
}

/// Termination capability for one `MemoryHost` window.
struct MemoryTerminate {
    handle: WindowHandle,
    windows: WindowTable,
}

impl TerminateWindow for MemoryTerminate {
    fn terminate(&self) -> Result<(), HostError> {
        let signal = {
            let mut windows = self
                .windows
                .lock()
                .map_err(|_| HostError::Terminate("window table poisoned".into()))?;
            match windows.get_mut(&self.handle) {
                Some(window) if window.live => {
                    window.live = false;
                    Some(window.signal.clone())
                }
                // Already closed host-side; terminating again is a no-op.
                Some(_) => None,
                None => {
                    return Err(HostError::Terminate(format!(
                        "unknown window {}",
                        self.handle
                    )))
                }
            }
        };
        if let Some(signal) = signal {
            debug!(handle = %self.handle, "host window terminated");
            signal.fire();
        }
        Ok(())
    }
}
