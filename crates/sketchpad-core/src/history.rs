//! Snapshot-based undo/redo history.

use std::fmt;
use std::sync::Arc;

/// An encoded full-canvas image captured at a commit point.
///
/// Immutable once created; clones share the same bytes.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Snapshot(Arc<[u8]>);

impl Snapshot {
    pub fn new(bytes: impl Into<Arc<[u8]>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Size of the encoded image in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Snapshot({} bytes)", self.0.len())
    }
}

impl From<Vec<u8>> for Snapshot {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

/// History and redo stacks of committed snapshots.
///
/// The top of the history stack is the canvas as of the last commit. Growth
/// is unbounded: every commit keeps a full encoded raster.
#[derive(Debug, Clone, Default)]
pub struct History {
    /// Committed snapshots, most recent last.
    undo_stack: Vec<Snapshot>,
    /// Snapshots popped by undo, most recently undone last.
    redo_stack: Vec<Snapshot>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a new snapshot and discard everything that could be redone.
    pub fn commit(&mut self, snapshot: Snapshot) {
        log::debug!(
            "Commit {:?} (history {}, dropping {} redo)",
            snapshot,
            self.undo_stack.len() + 1,
            self.redo_stack.len()
        );
        self.undo_stack.push(snapshot);
        self.redo_stack.clear();
    }

    /// Move the top snapshot to the redo stack.
    /// Returns true if undo was performed, false if nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.undo_stack.pop() {
            Some(snapshot) => {
                self.redo_stack.push(snapshot);
                true
            }
            None => false,
        }
    }

    /// Move the most recently undone snapshot back onto the history.
    /// Returns true if redo was performed, false if nothing to redo.
    pub fn redo(&mut self) -> bool {
        match self.redo_stack.pop() {
            Some(snapshot) => {
                self.undo_stack.push(snapshot);
                true
            }
            None => false,
        }
    }

    /// The snapshot the canvas should currently show, or `None` for a blank canvas.
    pub fn top(&self) -> Option<&Snapshot> {
        self.undo_stack.last()
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Number of committed snapshots.
    pub fn len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.undo_stack.is_empty()
    }

    /// Number of snapshots available to redo.
    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }
}
