use std::fmt;

use super::{Position, Vector};
use crate::{Result, Sequence, SequenceError};

/// Read-only position inside a [`Vector`].
///
/// Two cursors are equal when they point at the same slot of the same vector.
pub struct Cursor<'a, T> {
    vector: &'a Vector<T>,
    index: usize,
}

impl<'a, T> Cursor<'a, T> {
    pub(super) fn new(vector: &'a Vector<T>, index: usize) -> Self {
        Self { vector, index }
    }

    pub fn position(&self) -> Position {
        Position { index: self.index }
    }

    pub fn is_end(&self) -> bool {
        self.index == self.vector.len()
    }

    pub fn get(&self) -> Result<&'a T> {
        self.vector
            .as_slice()
            .get(self.index)
            .ok_or(SequenceError::OutOfRange)
    }

    pub fn move_next(&mut self) -> Result<()> {
        self.index = self.vector.step_next(self.index)?;
        Ok(())
    }

    pub fn move_prev(&mut self) -> Result<()> {
        self.index = self.vector.step_prev(self.index)?;
        Ok(())
    }

    /// Steps `n` slots forward; the cursor does not move on failure.
    pub fn advance(&mut self, n: usize) -> Result<()> {
        self.index = self.vector.advance(self.position(), n)?.index;
        Ok(())
    }

    /// Steps `n` slots backward; the cursor does not move on failure.
    pub fn retreat(&mut self, n: usize) -> Result<()> {
        self.index = self.vector.retreat(self.position(), n)?.index;
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
        std::ptr::eq(self.vector, other.vector) && self.index == other.index
    }
}

impl<T> Eq for Cursor<'_, T> {}

impl<T> fmt::Debug for Cursor<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor").field("index", &self.index).finish()
    }
}

/// Position inside a [`Vector`] with write access to the element under it.
pub struct CursorMut<'a, T> {
    vector: &'a mut Vector<T>,
    index: usize,
}

impl<'a, T> CursorMut<'a, T> {
    pub(super) fn new(vector: &'a mut Vector<T>, index: usize) -> Self {
        Self { vector, index }
    }

    pub fn position(&self) -> Position {
        Position { index: self.index }
    }

    pub fn is_end(&self) -> bool {
        self.index == self.vector.len()
    }

    pub fn as_cursor(&self) -> Cursor<'_, T> {
        Cursor::new(&*self.vector, self.index)
    }

    pub fn get(&self) -> Result<&T> {
        self.vector
            .as_slice()
            .get(self.index)
            .ok_or(SequenceError::OutOfRange)
    }

    pub fn get_mut(&mut self) -> Result<&mut T> {
        self.vector
            .as_mut_slice()
            .get_mut(self.index)
            .ok_or(SequenceError::OutOfRange)
    }

    pub fn into_mut(self) -> Result<&'a mut T> {
        let vector = self.vector;
        vector
            .as_mut_slice()
            .get_mut(self.index)
            .ok_or(SequenceError::OutOfRange)
    }

    pub fn move_next(&mut self) -> Result<()> {
        self.index = self.vector.step_next(self.index)?;
        Ok(())
    }

    pub fn move_prev(&mut self) -> Result<()> {
        self.index = self.vector.step_prev(self.index)?;
        Ok(())
    }

    pub fn advance(&mut self, n: usize) -> Result<()> {
        self.index = self.vector.advance(self.position(), n)?.index;
        Ok(())
    }

    pub fn retreat(&mut self, n: usize) -> Result<()> {
        self.index = self.vector.retreat(self.position(), n)?.index;
        Ok(())
    }

    /// Inserts `item` before the current element; the cursor stays on that element.
    pub fn insert_before(&mut self, item: T) {
        let position = self.position();
        // Cursor index is always within [0, len].
        if self.vector.insert(position, item).is_ok() {
            self.index += 1;
        }
    }

    /// Removes the current element and moves onto the one that followed it.
    pub fn remove_current(&mut self) -> Result<T> {
        self.vector.remove(self.position())
    }
}

impl<T> fmt::Debug for CursorMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CursorMut").field("index", &self.index).finish()
    }
}
