use serde::{Deserialize, Serialize};

use crate::*;

/// State of a single grid cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    open: bool,
    marked: bool,
    has_mine: bool,
}

impl Cell {
    pub const fn is_open(self) -> bool {
        self.open
    }

    pub const fn is_marked(self) -> bool {
        self.marked
    }

    pub const fn has_mine(self) -> bool {
        self.has_mine
    }

    /// Closed and unmarked, the only state that a cascade will open.
    pub const fn is_shaded(self) -> bool {
        !self.open && !self.marked
    }

    /// Returns `false` when the cell already held a mine.
    pub(crate) fn place_mine(&mut self) -> bool {
        !core::mem::replace(&mut self.has_mine, true)
    }

    pub(crate) fn remove_mine(&mut self) {
        self.has_mine = false;
    }

    pub(crate) fn toggle_mark(&mut self) -> Result<MarkOutcome> {
        if self.open {
            return Err(GameError::AlreadyOpen);
        }
        self.marked = !self.marked;
        Ok(if self.marked {
            MarkOutcome::Marked
        } else {
            MarkOutcome::Unmarked
        })
    }

    /// Opens a closed, unmarked cell. Returns whether anything changed.
    pub(crate) fn open(&mut self) -> Result<bool> {
        if self.marked {
            return Err(GameError::AlreadyMarked);
        }
        Ok(!core::mem::replace(&mut self.open, true))
    }

    /// Opens regardless of marks, used when revealing the solution.
    pub(crate) fn force_open(&mut self) {
        self.open = true;
    }
}
