//! Undo and redo stacks of extracted design trees.

use crate::options::OptionBag;

/// Snapshots of a design, most recent last.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct History {
    undo: Vec<OptionBag>,
    redo: Vec<OptionBag>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a snapshot to return to, discarding any redo states.
    pub fn record(&mut self, snapshot: OptionBag) {
        self.undo.push(snapshot);
        self.redo.clear();
    }

    /// Steps back from `current`, returning the snapshot to restore.
    pub fn undo(&mut self, current: OptionBag) -> Option<OptionBag> {
        let prev = self.undo.pop()?;
        self.redo.push(current);
        Some(prev)
    }

    /// Steps forward from `current`, returning the snapshot to restore.
    pub fn redo(&mut self, current: OptionBag) -> Option<OptionBag> {
        let next = self.redo.pop()?;
        self.undo.push(current);
        Some(next)
    }

    #[inline]
    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    #[inline]
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }
}
