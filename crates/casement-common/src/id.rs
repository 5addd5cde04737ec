use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

static NEXT_HANDLE: AtomicU64 = AtomicU64::new(1);

/// Opaque, stable identity of a managed window.
///
/// Identity is the handle, never the positional index: an entry's index
/// shifts when earlier entries are removed, the handle does not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WindowHandle(pub u64);

impl WindowHandle {
    /// Allocate a fresh, process-unique handle.
    pub fn next() -> Self {
        Self(NEXT_HANDLE.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for WindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "window-{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_are_unique() {
        let a = WindowHandle::next();
        let b = WindowHandle::next();
        assert_ne!(a, b);
    }

    #[test]
    fn handles_are_monotonic() {
        let a = WindowHandle::next();
        let b = WindowHandle::next();
        assert!(b.0 > a.0);
    }

    #[test]
    fn handle_display() {
        let h = WindowHandle(7);
        assert_eq!(h.to_string(), "window-7");
    }

    #[test]
    fn handle_serialization_roundtrip() {
        let h = WindowHandle(42);
        let json = serde_json::to_string(&h).unwrap();
        let back: WindowHandle = serde_json::from_str(&json).unwrap();
        assert_eq!(h, back);
    }

    #[test]
    fn handle_hash_identity() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        let h = WindowHandle(3);
        set.insert(h);
        set.insert(h);
        assert_eq!(set.len(), 1);
    }
}
