//! Thread-safe entry point for cross-thread mutation requests.
//!
//! The registry is only ever mutated within a single logical
//! processing turn; background work (timers, workers) must not write
//! into it directly. Instead it enqueues an [`ExternalMutation`] here,
//! and the manager drains the queue at the start of each turn, before
//! the next encode.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use tracing::debug;

use casement_common::WindowHandle;

/// A mutation requested from outside the session's processing turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExternalMutation {
    Add { caption: String },
    Close(WindowHandle),
    ToggleMinimize(WindowHandle),
}

/// Clonable, `Send` handle to the manager's external-mutation queue.
#[derive(Clone, Default)]
pub struct MutationQueue {
    inner: Arc<Mutex<VecDeque<ExternalMutation>>>,
}

impl MutationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue a mutation for the next processing turn.
    pub fn enqueue(&self, op: ExternalMutation) {
        debug!(?op, "external mutation enqueued");
        if let Ok(mut ops) = self.inner.lock() {
            ops.push_back(op);
        }
    }

    /// Drain all pending mutations in enqueue order.
    pub fn drain(&self) -> Vec<ExternalMutation> {
        match self.inner.lock() {
            Ok(mut ops) => ops.drain(..).collect(),
            Err(_) => Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.lock().map(|ops| ops.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
