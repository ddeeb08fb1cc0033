//! Highlight cursor over the filtered option list.
//!
//! The cursor is either `None` (nothing highlighted) or an index strictly
//! below the length of the current filtered list. It is never left stale:
//! whenever the list is re-filtered or the layer opens or closes, the owner
//! calls [`Highlight::revalidate`], which snaps it to `0` (open, non-empty) or
//! `None` (closed or empty).
//!
//! Movement wraps in both directions.

/// Keyboard highlight within the filtered list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Highlight {
    index: Option<usize>,
}

impl Highlight {
    /// A cursor with nothing highlighted.
    pub fn new() -> Self {
        Self::default()
    }

    /// The highlighted index, if any.
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// Re-derives the cursor after the list or the open state changed.
    ///
    /// Returns true if the index changed.
    pub fn revalidate(&mut self, open: bool, len: usize) -> bool {
        let next = if open && len > 0 { Some(0) } else { None };
        self.replace(next)
    }

    /// Moves down one row, wrapping from the last row to the first.
    ///
    /// From `None` the first row is highlighted. No-op on an empty list.
    pub fn next(&mut self, len: usize) -> bool {
        if len == 0 {
            return self.replace(None);
        }
        let next = match self.index {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.replace(Some(next))
    }

    /// Moves up one row, wrapping from the first row to the last.
    ///
    /// From `None` the last row is highlighted. No-op on an empty list.
    pub fn previous(&mut self, len: usize) -> bool {
        if len == 0 {
            return self.replace(None);
        }
        let next = match self.index {
            Some(i) if i > 0 && i < len => i - 1,
            _ => len - 1,
        };
        self.replace(Some(next))
    }

    /// Highlights a specific row, e.g. under the pointer. Out of range
    /// indices clear the highlight.
    pub fn set(&mut self, index: usize, len: usize) -> bool {
        self.replace((index < len).then_some(index))
    }

    /// Clears the highlight.
    pub fn clear(&mut self) -> bool {
        self.replace(None)
    }

    fn replace(&mut self, next: Option<usize>) -> bool {
        let changed = self.index != next;
        self.index = next;
        changed
    }
}
