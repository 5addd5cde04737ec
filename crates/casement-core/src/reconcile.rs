//! Reconciliation of out-of-band window closes.
//!
//! Every window the manager creates gets a [`CloseSignal`] wired into
//! this reconciler's sink. Whatever path a window closes through, the
//! notification lands here and the registry is brought back in line
//! at the next drain.

use std::sync::{Arc, Mutex};

use tracing::debug;

use casement_common::{ReconcileError, WindowHandle};

use crate::host::{CloseSignal, EventSink, HostEvent};
use crate::registry::WindowRegistry;

/// Subscribes to host close notifications and reconciles the registry.
#[derive(Default)]
pub struct CloseReconciler {
    sink: EventSink,
}

impl CloseReconciler {
    pub fn new() -> Self {
        Self {
            sink: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Close notifier for a window about to be created.
    pub(crate) fn signal_for(&self, handle: WindowHandle) -> CloseSignal {
        CloseSignal::new(Arc::clone(&self.sink), handle)
    }

    /// Drain all pending notifications.
    fn drain(&self) -> Vec<HostEvent> {
        match self.sink.lock() {
            Ok(mut events) => std::mem::take(&mut *events),
            Err(_) => Vec::new(),
        }
    }

    /// Apply pending close notifications to the registry.
    ///
    /// Returns whether anything was removed. A notification for a
    /// window the registry does not track means registry and host have
    /// desynchronized; that is signaled as an explicit defect, never
    /// silently ignored.
    pub(crate) fn reconcile(
        &self,
        registry: &mut WindowRegistry,
    ) -> Result<bool, ReconcileError> {
        let mut changed = false;
        for event in self.drain() {
            let HostEvent::Closed { handle } = event;
            if registry.remove(handle).is_some() {
                debug!(handle = %handle, "reconciled closed window");
                changed = true;
            } else {
                return Err(ReconcileError::UntrackedWindow(handle));
            }
        }
        Ok(changed)
    }
}
