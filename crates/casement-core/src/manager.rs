//! Server-authoritative window manager.
//!
//! `WindowManager` owns the registry and every mutation path into it:
//! explicit add/close/toggle, inbound client commands (see the sync
//! impl in `sync.rs`), reconciliation of out-of-band closes, and the
//! external-mutation queue drained at the start of each turn.

use tracing::{debug, warn};

use casement_common::{Result, WindowHandle};

use crate::host::WindowHost;
use crate::queue::{ExternalMutation, MutationQueue};
use crate::reconcile::CloseReconciler;
use crate::registry::{ManagedWindow, WindowRegistry};

pub struct WindowManager<H: WindowHost> {
    pub(crate) host: H,
    pub(crate) registry: WindowRegistry,
    pub(crate) reconciler: CloseReconciler,
    pub(crate) external: MutationQueue,
    /// Set by every mutation; cleared when a snapshot is encoded.
    pub(crate) dirty: bool,
}

impl<H: WindowHost> WindowManager<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            registry: WindowRegistry::new(),
            reconciler: CloseReconciler::new(),
            external: MutationQueue::new(),
            dirty: false,
        }
    }

    pub fn registry(&self) -> &WindowRegistry {
        &self.registry
    }

    pub fn window_count(&self) -> usize {
        self.registry.len()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Clonable handle for cross-thread mutation requests.
    pub fn external_queue(&self) -> MutationQueue {
        self.external.clone()
    }

    /// Create a new host window under the current application root and
    /// start tracking it.
    ///
    /// Returns `Ok(None)` when the manager itself is not attached to an
    /// application root yet: a normal not-ready signal, not an error.
    pub fn add(&mut self, caption: impl Into<String>) -> Result<Option<WindowHandle>> {
        if !self.host.is_attached() {
            debug!("add before attachment, manager not ready");
            return Ok(None);
        }
        let caption = caption.into();
        let handle = WindowHandle::next();
        let signal = self.reconciler.signal_for(handle);
        let terminate = self.host.create_window(handle, &caption, signal)?;
        self.registry
            .push(ManagedWindow::new(handle, caption, terminate));
        self.dirty = true;
        debug!(handle = %handle, "window added");
        Ok(Some(handle))
    }

    /// Close a tracked window through its termination capability.
    ///
    /// Returns `Ok(false)` for a handle that is not tracked; closing
    /// twice is not an error. Removal happens through reconciliation,
    /// which is the single removal path: the host delivers the close
    /// notification synchronously and it is drained before returning.
    pub fn close(&mut self, handle: WindowHandle) -> Result<bool> {
        let Some(entry) = self.registry.get(handle) else {
            debug!(handle = %handle, "close on untracked handle, no-op");
            return Ok(false);
        };
        entry.terminate()?;
        self.reconcile()?;
        Ok(true)
    }

    /// Close every currently-tracked window.
    ///
    /// Iterates a snapshot copy of the handles taken before the first
    /// close: each close reconciles and shrinks the live registry.
    pub fn close_all(&mut self) -> Result<()> {
        for handle in self.registry.handles() {
            self.close(handle)?;
        }
        Ok(())
    }

    /// Flip a window's minimized flag, returning the new value.
    ///
    /// `None` when the handle is not tracked. Not idempotent under
    /// duplicate delivery: applying the same toggle twice flips the
    /// flag back to its original value. That is intentional current
    /// behavior; the protocol carries no sequence numbers.
    pub fn toggle_minimize(&mut self, handle: WindowHandle) -> Option<bool> {
        match self.registry.get_mut(handle) {
            Some(entry) => {
                let minimized = entry.toggle_minimize();
                self.dirty = true;
                debug!(handle = %handle, minimized, "minimize toggled");
                Some(minimized)
            }
            None => {
                warn!(handle = %handle, "toggle on untracked handle");
                None
            }
        }
    }

    /// Apply pending close notifications to the registry.
    pub fn reconcile(&mut self) -> Result<()> {
        if self.reconciler.reconcile(&mut self.registry)? {
            self.dirty = true;
        }
        Ok(())
    }

    /// Start a processing turn: drain the external-mutation queue,
    /// then reconcile. Runs before any inbound command is applied.
    pub fn begin_turn(&mut self) -> Result<()> {
        for op in self.external.drain() {
            self.apply_external(op)?;
        }
        self.reconcile()
    }

    fn apply_external(&mut self, op: ExternalMutation) -> Result<()> {
        match op {
            ExternalMutation::Add { caption } => {
                self.add(caption)?;
            }
            ExternalMutation::Close(handle) => {
                self.close(handle)?;
            }
            ExternalMutation::ToggleMinimize(handle) => {
                self.toggle_minimize(handle);
            }
        }
        Ok(())
    }
}
