use crate::id::WindowHandle;

/// Violations of the client/server sync protocol.
///
/// These are discard-and-log failures: state is left untouched and
/// nothing is raised back to the remote caller.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    #[error("command index {index} out of range (registry length {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("malformed command: {0}")]
    Malformed(String),

    #[error("misaligned snapshot: {names} names, {flags} flags")]
    MisalignedSnapshot { names: usize, flags: usize },
}

/// Failures at the host windowing framework boundary.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("no application root is bound")]
    Detached,

    #[error("terminate failed: {0}")]
    Terminate(String),
}

/// State desynchronization between the registry and the host.
///
/// Unlike [`ProtocolError`], this is non-recoverable locally and is
/// raised to the hosting application's error handling.
#[derive(Debug, thiserror::Error)]
pub enum ReconcileError {
    #[error("close notification for untracked window {0}")]
    UntrackedWindow(WindowHandle),
}

#[derive(Debug, thiserror::Error)]
pub enum CasementError {
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error(transparent)]
    Host(#[from] HostError),

    #[error(transparent)]
    Reconcile(#[from] ReconcileError),

    #[error("{0}")]
    Other(String),
}
