//! Bounded snapshot stack for undo/redo.

use garmentkit_core::constants::HISTORY_DEPTH;

use super::types::Snapshot;

/// Linear history of committed snapshots with a pointer at the current
/// state. Entry 0 is the document's state at creation, so the pointer is
/// always valid and `0 <= pointer < len`.
#[derive(Debug, Clone)]
pub struct HistoryStack {
    snapshots: Vec<Snapshot>,
    pointer: usize,
}

impl HistoryStack {
    pub fn new(initial: Snapshot) -> Self {
        Self {
            snapshots: vec![initial],
            pointer: 0,
        }
    }

    pub fn pointer(&self) -> usize {
        self.pointer
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn current(&self) -> &Snapshot {
        &self.snapshots[self.pointer]
    }

    /// Commits a snapshot: drops any redo tail, appends, and evicts the
    /// oldest entry once the depth cap is reached.
    pub fn commit(&mut self, snapshot: Snapshot) {
        self.snapshots.truncate(self.pointer + 1);
        self.snapshots.push(snapshot);
        self.pointer = self.snapshots.len() - 1;

        if self.snapshots.len() > HISTORY_DEPTH {
            self.snapshots.remove(0);
            self.pointer -= 1;
        }
    }

    /// Steps back one snapshot. Returns `None` at the oldest entry.
    pub fn undo(&mut self) -> Option<&Snapshot> {
        if self.pointer == 0 {
            return None;
        }
        self.pointer -= 1;
        Some(&self.snapshots[self.pointer])
    }

    /// Steps forward one snapshot. Returns `None` at the newest entry.
    pub fn redo(&mut self) -> Option<&Snapshot> {
        if self.pointer + 1 >= self.snapshots.len() {
            return None;
        }
        self.pointer += 1;
        Some(&self.snapshots[self.pointer])
    }

    pub fn can_undo(&self) -> bool {
        self.pointer > 0
    }

    pub fn can_redo(&self) -> bool {
        self.pointer + 1 < self.snapshots.len()
    }
}
