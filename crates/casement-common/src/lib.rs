pub mod errors;
pub mod id;
pub mod wire;

pub use errors::{CasementError, HostError, ProtocolError, ReconcileError};
pub use id::WindowHandle;
pub use wire::{Command, SyncSnapshot};

pub type Result<T> = std::result::Result<T, CasementError>;
