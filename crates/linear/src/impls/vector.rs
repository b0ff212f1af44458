use std::fmt;
use std::mem::MaybeUninit;
use std::ptr;

use crate::{Result, Sequence, SequenceError};

mod cursor;
mod iter;

pub use cursor::{Cursor, CursorMut};
pub use iter::{IntoIter, Iter, IterMut};

pub const MIN_CAPACITY: usize = 4;
pub const GROWTH_FACTOR: usize = 2;

/// Slot index into a [`Vector`]. `end()` is the index one past the last element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    index: usize,
}

impl Position {
    pub fn index(self) -> usize {
        self.index
    }
}

/// Sequence backed by a single contiguous block.
///
/// The block holds `capacity` slots of which the first `len` are initialized.
/// Capacity starts at [`MIN_CAPACITY`], multiplies by [`GROWTH_FACTOR`] when an
/// insertion finds the block full, and is never given back on removal.
pub struct Vector<T> {
    buf: Box<[MaybeUninit<T>]>,
    len: usize,
}

impl<T> Vector<T> {
    pub fn new() -> Self {
        Self::with_capacity(MIN_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Box::new_uninit_slice(capacity),
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    pub fn as_slice(&self) -> &[T] {
        // First `len` slots are initialized.
        unsafe { std::slice::from_raw_parts(self.as_ptr(), self.len) }
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe { std::slice::from_raw_parts_mut(self.as_mut_ptr(), self.len) }
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.as_slice())
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut::new(self.as_mut_slice())
    }

    pub fn cursor_begin(&self) -> Cursor<'_, T> {
        Cursor::new(self, 0)
    }

    pub fn cursor_end(&self) -> Cursor<'_, T> {
        Cursor::new(self, self.len)
    }

    pub fn cursor_begin_mut(&mut self) -> CursorMut<'_, T> {
        CursorMut::new(self, 0)
    }

    pub fn cursor_end_mut(&mut self) -> CursorMut<'_, T> {
        let len = self.len;
        CursorMut::new(self, len)
    }

    pub fn cursor_at(&self, position: Position) -> Result<Cursor<'_, T>> {
        self.check_position(position)?;
        Ok(Cursor::new(self, position.index))
    }

    pub fn cursor_mut_at(&mut self, position: Position) -> Result<CursorMut<'_, T>> {
        self.check_position(position)?;
        Ok(CursorMut::new(self, position.index))
    }

    /// Removes the element at `position` and hands it back.
    pub fn remove(&mut self, position: Position) -> Result<T> {
        let index = position.index;
        if index >= self.len {
            return Err(SequenceError::OutOfRange);
        }
        let tail = self.len - index - 1;
        let p = self.as_mut_ptr();
        let value = unsafe {
            let value = ptr::read(p.add(index));
            ptr::copy(p.add(index + 1), p.add(index), tail);
            value
        };
        self.len -= 1;
        Ok(value)
    }

    pub fn clear(&mut self) {
        let len = self.len;
        // Shrink first so a panicking destructor leaks instead of double dropping.
        self.len = 0;
        unsafe {
            ptr::drop_in_place(std::ptr::slice_from_raw_parts_mut(self.as_mut_ptr(), len));
        }
    }

    fn as_ptr(&self) -> *const T {
        self.buf.as_ptr().cast::<T>()
    }

    fn as_mut_ptr(&mut self) -> *mut T {
        self.buf.as_mut_ptr().cast::<T>()
    }

    fn check_position(&self, position: Position) -> Result<()> {
        if position.index > self.len {
            Err(SequenceError::OutOfRange)
        } else {
            Ok(())
        }
    }

    pub(crate) fn step_next(&self, index: usize) -> Result<usize> {
        if index < self.len {
            Ok(index + 1)
        } else {
            Err(SequenceError::OutOfRange)
        }
    }

    pub(crate) fn step_prev(&self, index: usize) -> Result<usize> {
        if index == 0 || index > self.len {
            Err(SequenceError::OutOfRange)
        } else {
            Ok(index - 1)
        }
    }

    fn grow_if_full(&mut self) {
        if self.len < self.buf.len() {
            return;
        }
        let new_capacity = (self.buf.len() * GROWTH_FACTOR).max(MIN_CAPACITY);
        let mut new_buf = Box::<[T]>::new_uninit_slice(new_capacity);
        // Bitwise move; the old block is released without dropping anything.
        unsafe {
            ptr::copy_nonoverlapping(self.as_ptr(), new_buf.as_mut_ptr().cast::<T>(), self.len);
        }
        self.buf = new_buf;
    }

    /// Opens a hole at `index` by shifting `[index, len)` one slot right and
    /// writes `item` into it. Caller guarantees `index <= len`.
    fn write_at(&mut self, index: usize, item: T) {
        debug_assert!(index <= self.len);
        self.grow_if_full();
        let p = self.as_mut_ptr();
        unsafe {
            ptr::copy(p.add(index), p.add(index + 1), self.len - index);
            ptr::write(p.add(index), item);
        }
        self.len += 1;
    }

    #[cfg(test)]
    pub(crate) fn check_invariants(&self) {
        assert!(self.len <= self.buf.len(), "len exceeds capacity");
    }
}

impl<T> Drop for Vector<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T> Default for Vector<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for Vector<T> {
    fn clone(&self) -> Self {
        let mut out = Self::with_capacity(self.capacity());
        for item in self.iter() {
            out.append(item.clone());
        }
        out
    }

    /// Reuses the existing block when it is large enough.
    fn clone_from(&mut self, source: &Self) {
        self.clear();
        for item in source.iter() {
            self.append(item.clone());
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Vector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for Vector<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for Vector<T> {}

impl<T> Extend<T> for Vector<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.append(item);
        }
    }
}

/// Capacity equals the number of collected elements.
impl<T> FromIterator<T> for Vector<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<T>>())
    }
}

impl<T> From<Vec<T>> for Vector<T> {
    fn from(items: Vec<T>) -> Self {
        let mut out = Self::with_capacity(items.len());
        for item in items {
            out.append(item);
        }
        out
    }
}

impl<T, const N: usize> From<[T; N]> for Vector<T> {
    fn from(items: [T; N]) -> Self {
        let mut out = Self::with_capacity(N);
        for item in items {
            out.append(item);
        }
        out
    }
}

impl<T> Sequence for Vector<T> {
    type Item = T;
    type Position = Position;

    fn new() -> Self {
        Self::with_capacity(MIN_CAPACITY)
    }

    fn len(&self) -> usize {
        self.len
    }

    fn append(&mut self, item: T) {
        self.grow_if_full();
        self.buf[self.len].write(item);
        self.len += 1;
    }

    fn prepend(&mut self, item: T) {
        self.write_at(0, item);
    }

    fn insert(&mut self, position: Position, item: T) -> Result<Position> {
        self.check_position(position)?;
        self.write_at(position.index, item);
        Ok(position)
    }

    fn pop_first(&mut self) -> Result<T> {
        if self.len == 0 {
            return Err(SequenceError::EmptyContainer);
        }
        self.remove(Position { index: 0 })
    }

    fn pop_last(&mut self) -> Result<T> {
        if self.len == 0 {
            return Err(SequenceError::EmptyContainer);
        }
        self.len -= 1;
        Ok(unsafe { self.buf[self.len].assume_init_read() })
    }

    fn erase(&mut self, position: Position) -> Result<Position> {
        drop(self.remove(position)?);
        Ok(position)
    }

    fn erase_range(&mut self, first: Position, last: Position) -> Result<Position> {
        if first.index > last.index || last.index > self.len {
            return Err(SequenceError::OutOfRange);
        }
        let count = last.index - first.index;
        if count == 0 {
            return Ok(first);
        }
        let old_len = self.len;
        self.len = first.index;
        let p = self.as_mut_ptr();
        unsafe {
            ptr::drop_in_place(std::ptr::slice_from_raw_parts_mut(p.add(first.index), count));
            ptr::copy(p.add(last.index), p.add(first.index), old_len - last.index);
        }
        self.len = old_len - count;
        Ok(first)
    }

    fn begin(&self) -> Position {
        Position { index: 0 }
    }

    fn end(&self) -> Position {
        Position { index: self.len }
    }

    fn next_position(&self, position: Position) -> Result<Position> {
        let index = self.step_next(position.index)?;
        Ok(Position { index })
    }

    fn prev_position(&self, position: Position) -> Result<Position> {
        let index = self.step_prev(position.index)?;
        Ok(Position { index })
    }

    fn advance(&self, position: Position, n: usize) -> Result<Position> {
        match position.index.checked_add(n) {
            Some(index) if index <= self.len => Ok(Position { index }),
            _ => Err(SequenceError::OutOfRange),
        }
    }

    fn retreat(&self, position: Position, n: usize) -> Result<Position> {
        if position.index > self.len {
            return Err(SequenceError::OutOfRange);
        }
        position
            .index
            .checked_sub(n)
            .map(|index| Position { index })
            .ok_or(SequenceError::OutOfRange)
    }

    fn position_at(&self, index: usize) -> Result<Position> {
        let position = Position { index };
        self.check_position(position)?;
        Ok(position)
    }

    fn get(&self, position: Position) -> Result<&T> {
        self.as_slice()
            .get(position.index)
            .ok_or(SequenceError::OutOfRange)
    }

    fn get_mut(&mut self, position: Position) -> Result<&mut T> {
        self.as_mut_slice()
            .get_mut(position.index)
            .ok_or(SequenceError::OutOfRange)
    }
}
