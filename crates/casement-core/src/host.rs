//! Host windowing framework boundary.
//!
//! The real windowing/session framework lives outside this crate; the
//! manager talks to it through two narrow seams: [`WindowHost`] for
//! creating windows under the current attachment root, and
//! [`TerminateWindow`], the per-window termination capability handed
//! out at creation time. Close notifications flow back through a
//! [`CloseSignal`] into a shared sink the manager drains once per turn.

use std::sync::{Arc, Mutex};

use tracing::debug;

use casement_common::{HostError, WindowHandle};

pub mod memory;

/// Narrowly-scoped capability to terminate one host window.
///
/// Supplied at window-creation time. Holding this is the only way the
/// registry reaches into the host's close lifecycle; there is no
/// privileged access path around it.
pub trait TerminateWindow: Send + Sync {
    /// Close the window through the host's own lifecycle.
    ///
    /// The host must deliver the resulting close notification through
    /// the window's [`CloseSignal`], the same as any other close path.
    fn terminate(&self) -> Result<(), HostError>;
}

/// Notifications pushed by the host, consumed by the reconciler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    /// The window closed, through any path.
    Closed { handle: WindowHandle },
}

/// Shared sink host events are pushed into, drained once per turn.
pub(crate) type EventSink = Arc<Mutex<Vec<HostEvent>>>;

/// Per-window close notifier handed to the host at creation.
///
/// The host fires it whenever the window closes, regardless of who
/// initiated the close.
#[derive(Clone)]
pub struct CloseSignal {
    sink: EventSink,
    handle: WindowHandle,
}

impl CloseSignal {
    pub(crate) fn new(sink: EventSink, handle: WindowHandle) -> Self {
        Self { sink, handle }
    }

    /// The window this signal reports for.
    pub fn handle(&self) -> WindowHandle {
        self.handle
    }

    /// Notify that the window has closed.
    pub fn fire(&self) {
        debug!(handle = %self.handle, "close notification");
        if let Ok(mut events) = self.sink.lock() {
            events.push(HostEvent::Closed {
                handle: self.handle,
            });
        }
    }
}

/// The host application/session the manager is attached to.
pub trait WindowHost {
    /// Whether an attachment root is currently bound. While `false`,
    /// the manager reports not-ready instead of creating windows.
    fn is_attached(&self) -> bool;

    /// Create a window attached under the current root, wire
    /// `on_close` to fire when the window closes through any path,
    /// and return its termination capability.
    fn create_window(
        &mut self,
        handle: WindowHandle,
        caption: &str,
        on_close: CloseSignal,
    ) -> Result<Arc<dyn TerminateWindow>, HostError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn close_signal_delivers_into_sink() {
        let sink: EventSink = Arc::default();
        let signal = CloseSignal::new(Arc::clone(&sink), WindowHandle(5));

        signal.fire();

        let events = sink.lock().unwrap();
        assert_eq!(
            *events,
            vec![HostEvent::Closed {
                handle: WindowHandle(5)
            }]
        );
    }

    #[test]
    fn close_signal_can_fire_twice() {
        // Duplicate notifications are a host defect; the signal itself
        // just reports what the host tells it.
        let sink: EventSink = Arc::default();
        let signal = CloseSignal::new(Arc::clone(&sink), WindowHandle(1));

        signal.fire();
        signal.fire();

        assert_eq!(sink.lock().unwrap().len(), 2);
    }
}
