//! Wire types exchanged between the server half and the client view.
//!
//! Messages flow in both directions:
//! - **server -> client**: a [`SyncSnapshot`], an index-aligned
//!   serialization of the window registry at the instant of encoding.
//! - **client -> server**: a [`Command`], addressing an entry by its
//!   current position in the snapshot the client last rendered.

use serde::{Deserialize, Serialize};

use crate::errors::ProtocolError;

/// Index-aligned snapshot of the window registry.
///
/// `window_names[i]` and `minimized_flags[i]` describe the window at
/// position `i`; the two lists are always equal length. Minimized
/// state travels as `0|1` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncSnapshot {
    pub window_names: Vec<String>,
    pub minimized_flags: Vec<u8>,
}

impl SyncSnapshot {
    pub fn len(&self) -> usize {
        self.window_names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window_names.is_empty()
    }

    /// Minimized state at `index`, `None` when out of range.
    pub fn minimized(&self, index: usize) -> Option<bool> {
        self.minimized_flags.get(index).map(|flag| *flag != 0)
    }

    /// Check the index-alignment invariant of the two lists.
    pub fn validate(&self) -> Result<(), ProtocolError> {
        if self.window_names.len() == self.minimized_flags.len() {
            Ok(())
        } else {
            Err(ProtocolError::MisalignedSnapshot {
                names: self.window_names.len(),
                flags: self.minimized_flags.len(),
            })
        }
    }
}

/// An inbound, index-addressed command from the client view.
///
/// The index refers to the entry's position in the snapshot the client
/// acted on; it is re-validated against the current registry at apply
/// time, since the registry may have shrunk in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum Command {
    Close { index: usize },
    ToggleMinimize { index: usize },
}

impl Command {
    /// Parse a command from its raw JSON transport form.
    pub fn from_json(raw: &str) -> Result<Self, ProtocolError> {
        serde_json::from_str(raw).map_err(|e| ProtocolError::Malformed(e.to_string()))
    }

    /// The positional index the command addresses.
    pub fn index(&self) -> usize {
        match self {
            Command::Close { index } => *index,
            Command::ToggleMinimize { index } => *index,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_wire_field_names() {
        let snapshot = SyncSnapshot {
            window_names: vec!["W1".into(), "W2".into()],
            minimized_flags: vec![0, 1],
        };
        let json = serde_json::to_string(&snapshot).unwrap();
        assert_eq!(json, r#"{"windowNames":["W1","W2"],"minimizedFlags":[0,1]}"#);
    }

    #[test]
    fn snapshot_minimized_accessor() {
        let snapshot = SyncSnapshot {
            window_names: vec!["a".into(), "b".into()],
            minimized_flags: vec![0, 1],
        };
        assert_eq!(snapshot.minimized(0), Some(false));
        assert_eq!(snapshot.minimized(1), Some(true));
        assert_eq!(snapshot.minimized(2), None);
    }

    #[test]
    fn snapshot_validate_alignment() {
        let aligned = SyncSnapshot {
            window_names: vec!["a".into()],
            minimized_flags: vec![0],
        };
        assert!(aligned.validate().is_ok());

        let misaligned = SyncSnapshot {
            window_names: vec!["a".into()],
            minimized_flags: vec![0, 1],
        };
        assert!(matches!(
            misaligned.validate(),
            Err(ProtocolError::MisalignedSnapshot { names: 1, flags: 2 })
        ));
    }

    #[test]
    fn command_wire_tags() {
        let close = Command::Close { index: 0 };
        assert_eq!(
            serde_json::to_string(&close).unwrap(),
            r#"{"command":"close","index":0}"#
        );

        let toggle = Command::ToggleMinimize { index: 3 };
        assert_eq!(
            serde_json::to_string(&toggle).unwrap(),
            r#"{"command":"toggleMinimize","index":3}"#
        );
    }

    #[test]
    fn command_from_json() {
        let cmd = Command::from_json(r#"{"command":"close","index":2}"#).unwrap();
        assert_eq!(cmd, Command::Close { index: 2 });

        let cmd = Command::from_json(r#"{"command":"toggleMinimize","index":0}"#).unwrap();
        assert_eq!(cmd, Command::ToggleMinimize { index: 0 });
    }

    #[test]
    fn command_from_json_malformed() {
        let err = Command::from_json("not json at all").unwrap_err();
        assert!(matches!(err, ProtocolError::Malformed(_)));

        let err = Command::from_json(r#"{"command":"resize","index":0}"#).unwrap_err();
        assert!(matches!(err, ProtocolError::Malformed(_)));

        let err = Command::from_json(r#"{"command":"close"}"#).unwrap_err();
        assert!(matches!(err, ProtocolError::Malformed(_)));
    }

    #[test]
    fn command_index_accessor() {
        assert_eq!(Command::Close { index: 4 }.index(), 4);
        assert_eq!(Command::ToggleMinimize { index: 9 }.index(), 9);
    }
}
