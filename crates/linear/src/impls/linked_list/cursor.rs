use std::fmt;

use super::{Id, LinkedList, Position};
use crate::{Result, SequenceError};

/// Read-only node handle into a [`LinkedList`].
///
/// Every step is bounds-checked: reading the sentinel, moving past it, or
/// moving before the head fails with [`SequenceError::OutOfRange`].
pub struct Cursor<'a, T> {
    list: &'a LinkedList<T>,
    id: Id,
}

impl<'a, T> Cursor<'a, T> {
    pub(super) fn new(list: &'a LinkedList<T>, id: Id) -> Self {
        Self { list, id }
    }

    pub fn position(&self) -> Position {
        self.list.position_of(self.id)
    }

    pub fn is_end(&self) -> bool {
        self.id == Id::SENTINEL
    }

    pub fn get(&self) -> Result<&'a T> {
        let list = self.list;
        list.nodes[self.id.idx()]
            .value
            .as_ref()
            .ok_or(SequenceError::OutOfRange)
    }

    pub fn move_next(&mut self) -> Result<()> {
        self.id = self.list.step_next(self.id)?;
        Ok(())
    }

    pub fn move_prev(&mut self) -> Result<()> {
        self.id = self.list.step_prev(self.id)?;
        Ok(())
    }

    /// Steps `n` nodes forward one at a time; the cursor does not move on failure.
    pub fn advance(&mut self, n: usize) -> Result<()> {
        let mut id = self.id;
        for _ in 0..n {
            id = self.list.step_next(id)?;
        }
        self.id = id;
        Ok(())
    }

    /// Steps `n` nodes backward one at a time; the cursor does not move on failure.
    pub fn retreat(&mut self, n: usize) -> Result<()> {
        let mut id = self.id;
        for _ in 0..n {
            id = self.list.step_prev(id)?;
        }
        self.id = id;
        Ok(())
    }
}

impl<T> Clone for Cursor<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Cursor<'_, T> {}

impl<T> PartialEq for Cursor<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.list, other.list) && self.id == other.id
    }
}

impl<T> Eq for Cursor<'_, T> {}

impl<T> fmt::Debug for Cursor<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor").field("node", &self.id.0).finish()
    }
}

/// Node handle into a [`LinkedList`] with write access and splicing.
pub struct CursorMut<'a, T> {
    list: &'a mut LinkedList<T>,
    id: Id,
}

impl<'a, T> CursorMut<'a, T> {
    pub(super) fn new(list: &'a mut LinkedList<T>, id: Id) -> Self {
        Self { list, id }
    }

    pub fn position(&self) -> Position {
        self.list.position_of(self.id)
    }

    pub fn is_end(&self) -> bool {
        self.id == Id::SENTINEL
    }

    pub fn as_cursor(&self) -> Cursor<'_, T> {
        Cursor::new(&*self.list, self.id)
    }

    pub fn get(&self) -> Result<&T> {
        self.list.nodes[self.id.idx()]
            .value
            .as_ref()
            .ok_or(SequenceError::OutOfRange)
    }

    pub fn get_mut(&mut self) -> Result<&mut T> {
        self.list.nodes[self.id.idx()]
            .value
            .as_mut()
            .ok_or(SequenceError::OutOfRange)
    }

    pub fn into_mut(self) -> Result<&'a mut T> {
        let list = self.list;
        list.nodes[self.id.idx()]
            .value
            .as_mut()
            .ok_or(SequenceError::OutOfRange)
    }

    pub fn move_next(&mut self) -> Result<()> {
        self.id = self.list.step_next(self.id)?;
        Ok(())
    }

    pub fn move_prev(&mut self) -> Result<()> {
        self.id = self.list.step_prev(self.id)?;
        Ok(())
    }

    pub fn advance(&mut self, n: usize) -> Result<()> {
        let mut cursor = self.as_cursor();
        cursor.advance(n)?;
        self.id = cursor.id;
        Ok(())
    }

    pub fn retreat(&mut self, n: usize) -> Result<()> {
        let mut cursor = self.as_cursor();
        cursor.retreat(n)?;
        self.id = cursor.id;
        Ok(())
    }

    /// Splices `item` in front of the current node; the cursor stays put.
    pub fn insert_before(&mut self, item: T) {
        self.list.link_before(self.id, item);
    }

    /// Unlinks the current node and moves onto its successor.
    pub fn remove_current(&mut self) -> Result<T> {
        if self.id == Id::SENTINEL {
            return Err(SequenceError::OutOfRange);
        }
        let next = self.list.nodes[self.id.idx()].next;
        let value = self.list.unlink(self.id);
        self.id = next;
        value.ok_or(SequenceError::OutOfRange)
    }
}

impl<T> fmt::Debug for CursorMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CursorMut").field("node", &self.id.0).finish()
    }
}
