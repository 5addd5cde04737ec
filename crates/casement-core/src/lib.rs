//! Server half of the casement widget library.
//!
//! The centerpiece is [`WindowManager`]: a server-authoritative
//! registry of child windows, kept consistent with a client view
//! through an index-addressed snapshot/command protocol. The peer
//! widgets (polling refresher, debounced text field, swappable
//! password field) live under [`widgets`].

pub mod host;
pub mod manager;
pub mod queue;
pub mod reconcile;
pub mod registry;
pub mod widgets;

mod sync;

pub use host::memory::MemoryHost;
pub use host::{CloseSignal, HostEvent, TerminateWindow, WindowHost};
pub use manager::WindowManager;
pub use queue::{ExternalMutation, MutationQueue};
pub use reconcile::CloseReconciler;
pub use registry::{ManagedWindow, WindowRegistry};
