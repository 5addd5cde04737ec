//! Sync protocol: registry -> snapshot encoding and inbound command
//! application.
//!
//! Encoding is pull-based and coalescing: mutations mark the manager
//! dirty, and the next [`WindowManager::encode_snapshot`] emits one
//! snapshot covering all of them. Inbound command indices are
//! re-validated against the *current* registry, not the snapshot the
//! client acted on, since the registry may have shrunk in between.

use tracing::{debug, warn};

use casement_common::{Command, Result, SyncSnapshot};

use crate::host::WindowHost;
use crate::manager::WindowManager;

impl<H: WindowHost> WindowManager<H> {
    /// Encode the registry into an index-aligned snapshot.
    ///
    /// `None` unless a mutation has scheduled a re-sync since the last
    /// encode; intermediate states between two encodes are never
    /// individually transmitted.
    pub fn encode_snapshot(&mut self) -> Option<SyncSnapshot> {
        if !self.dirty {
            return None;
        }
        self.dirty = false;
        let snapshot = SyncSnapshot {
            window_names: self
                .registry
                .iter()
                .map(|w| w.caption().to_string())
                .collect(),
            minimized_flags: self
                .registry
                .iter()
                .map(|w| u8::from(w.is_minimized()))
                .collect(),
        };
        debug!(len = snapshot.len(), "snapshot encoded");
        Some(snapshot)
    }

    /// Apply one inbound client command.
    ///
    /// An out-of-range index is a protocol violation: the command is
    /// discarded with a log line, state is untouched, and nothing is
    /// raised back to the remote caller. Only host/invariant failures
    /// propagate.
    pub fn apply_command(&mut self, cmd: Command) -> Result<()> {
        let len = self.registry.len();
        let Some(handle) = self.registry.handle_at(cmd.index()) else {
            warn!(
                index = cmd.index(),
                len, "protocol violation: command index out of range, discarded"
            );
            return Ok(());
        };
        match cmd {
            Command::Close { .. } => {
                self.close(handle)?;
            }
            Command::ToggleMinimize { .. } => {
                self.toggle_minimize(handle);
            }
        }
        Ok(())
    }

    /// Run one full logical processing turn.
    ///
    /// Drains external mutations, reconciles out-of-band closes,
    /// applies the inbound command if any, and encodes the outbound
    /// snapshot if anything changed.
    pub fn process_turn(&mut self, inbound: Option<Command>) -> Result<Option<SyncSnapshot>> {
        self.begin_turn()?;
        if let Some(cmd) = inbound {
            self.apply_command(cmd)?;
        }
        Ok(self.encode_snapshot())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::memory::MemoryHost;

    fn manager() -> WindowManager<MemoryHost> {
        WindowManager::new(MemoryHost::new())
    }

    #[test]
    fn encode_only_after_mutation() {
        let mut mgr = manager();
        assert!(mgr.encode_snapshot().is_none());

        mgr.add("W").unwrap();
        let snapshot = mgr.encode_snapshot().unwrap();
        assert_eq!(snapshot.window_names, vec!["W"]);
        assert_eq!(snapshot.minimized_flags, vec![0]);

        // Dirty flag cleared; nothing changed since.
        assert!(mgr.encode_snapshot().is_none());
    }

    #[test]
    fn multiple_mutations_coalesce_into_one_snapshot() {
        let mut mgr = manager();
        let a = mgr.add("A").unwrap().unwrap();
        mgr.add("B").unwrap();
        mgr.toggle_minimize(a);

        let snapshot = mgr.encode_snapshot().unwrap();
        assert_eq!(snapshot.window_names, vec!["A", "B"]);
        assert_eq!(snapshot.minimized_flags, vec![1, 0]);
        assert!(mgr.encode_snapshot().is_none());
    }

    #[test]
    fn snapshot_is_index_aligned_with_registry() {
        let mut mgr = manager();
        for caption in ["one", "two", "three"] {
            mgr.add(caption).unwrap();
        }
        let snapshot = mgr.encode_snapshot().unwrap();
        assert_eq!(snapshot.len(), mgr.window_count());
        snapshot.validate().unwrap();
    }

    #[test]
    fn minimize_then_close_renumbers() {
        // Three windows, toggle index 1, then close index 0.
        let mut mgr = manager();
        for caption in ["W1", "W2", "W3"] {
            mgr.add(caption).unwrap();
        }
        assert_eq!(
            mgr.encode_snapshot().unwrap().minimized_flags,
            vec![0, 0, 0]
        );

        mgr.apply_command(Command::ToggleMinimize { index: 1 }).unwrap();
        assert_eq!(
            mgr.encode_snapshot().unwrap().minimized_flags,
            vec![0, 1, 0]
        );

        mgr.apply_command(Command::Close { index: 0 }).unwrap();
        let snapshot = mgr.encode_snapshot().unwrap();
        assert_eq!(mgr.window_count(), 2);
        assert_eq!(snapshot.window_names, vec!["W2", "W3"]);
        // W2 is now index 0 and still minimized.
        assert_eq!(snapshot.minimized_flags, vec![1, 0]);
    }

    #[test]
    fn close_command_removes_exactly_one_position() {
        let mut mgr = manager();
        for caption in ["A", "B", "C"] {
            mgr.add(caption).unwrap();
        }

        mgr.apply_command(Command::Close { index: 1 }).unwrap();

        let snapshot = mgr.encode_snapshot().unwrap();
        assert_eq!(snapshot.window_names, vec!["A", "C"]);
    }

    #[test]
    fn out_of_range_command_is_discarded() {
        let mut mgr = manager();
        mgr.add("A").unwrap();
        mgr.encode_snapshot();

        // Stale index from a snapshot the client held before a shrink.
        mgr.apply_command(Command::Close { index: 5 }).unwrap();
        mgr.apply_command(Command::ToggleMinimize { index: 1 }).unwrap();

        // No state change, no re-sync scheduled.
        assert_eq!(mgr.window_count(), 1);
        assert!(!mgr.registry().iter().next().unwrap().is_minimized());
        assert!(mgr.encode_snapshot().is_none());
    }

    #[test]
    fn stale_index_after_shrink_is_revalidated() {
        let mut mgr = manager();
        mgr.add("A").unwrap();
        let b = mgr.add("B").unwrap().unwrap();
        mgr.encode_snapshot();

        // Client issued against a 2-entry snapshot; B disappears first.
        mgr.host().close_out_of_band(b);
        mgr.begin_turn().unwrap();

        mgr.apply_command(Command::Close { index: 1 }).unwrap();
        assert_eq!(mgr.window_count(), 1);
    }

    #[test]
    fn out_of_band_close_renumbers_with_flags_intact() {
        let mut mgr = manager();
        let a = mgr.add("A").unwrap().unwrap();
        mgr.add("B").unwrap();
        let c = mgr.add("C").unwrap().unwrap();
        mgr.toggle_minimize(a);
        mgr.encode_snapshot();

        // The window at index 2 closes through the host, not through a
        // client command.
        mgr.host().close_out_of_band(c);

        let snapshot = mgr.process_turn(None).unwrap().unwrap();
        assert_eq!(snapshot.window_names, vec!["A", "B"]);
        assert_eq!(snapshot.minimized_flags, vec![1, 0]);
    }

    #[test]
    fn duplicate_toggle_delivery_flips_twice() {
        // Documented risk, not a guarantee: toggle is not idempotent.
        let mut mgr = manager();
        mgr.add("A").unwrap();

        mgr.apply_command(Command::ToggleMinimize { index: 0 }).unwrap();
        mgr.apply_command(Command::ToggleMinimize { index: 0 }).unwrap();

        assert!(!mgr.registry().iter().next().unwrap().is_minimized());
    }

    #[test]
    fn process_turn_runs_queue_reconcile_command_encode() {
        let mut mgr = manager();
        let a = mgr.add("A").unwrap().unwrap();
        let b = mgr.add("B").unwrap().unwrap();
        mgr.add("C").unwrap();
        mgr.encode_snapshot();

        mgr.external_queue()
            .enqueue(crate::queue::ExternalMutation::ToggleMinimize(a));
        mgr.host().close_out_of_band(b);

        // By apply time B is reconciled away, so index 1 addresses C.
        let snapshot = mgr
            .process_turn(Some(Command::Close { index: 1 }))
            .unwrap()
            .unwrap();

        assert_eq!(snapshot.window_names, vec!["A"]);
        assert_eq!(snapshot.minimized_flags, vec![1]);
    }

    #[test]
    fn process_turn_without_changes_sends_nothing() {
        let mut mgr = manager();
        mgr.add("A").unwrap();
        mgr.encode_snapshot();

        assert!(mgr.process_turn(None).unwrap().is_none());
    }
}
