pub mod error;
pub mod impls;

pub use error::{Result, SequenceError};
pub use impls::{LinkedList, Vector};

/// Ordered sequence interface.
///
/// - `begin()` names the first element, `end()` the slot one past the last;
///   they are equal exactly when the sequence is empty.
/// - Positions are `Copy` tokens compared by identity, never by value.
///   A structural mutation may leave older positions stale.
/// - Stepping, dereferencing and positional edits are bounds-checked and fail
///   with [`SequenceError::OutOfRange`] without touching the sequence.
/// - `pop_first`/`pop_last` on an empty sequence fail with
///   [`SequenceError::EmptyContainer`].
pub trait Sequence {
    type Item;
    type Position: Copy + Eq + std::fmt::Debug;

    fn new() -> Self;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn append(&mut self, item: Self::Item);

    fn prepend(&mut self, item: Self::Item);

    /// Inserts `item` immediately before `position` and returns the position
    /// of the new element.
    fn insert(&mut self, position: Self::Position, item: Self::Item) -> Result<Self::Position>;

    fn pop_first(&mut self) -> Result<Self::Item>;

    fn pop_last(&mut self) -> Result<Self::Item>;

    /// Removes the element at `position`; returns the position of the element
    /// that followed it.
    fn erase(&mut self, position: Self::Position) -> Result<Self::Position>;

    /// Removes the half-open range `[first, last)`; returns the position of
    /// the element at `last`.
    fn erase_range(&mut self, first: Self::Position, last: Self::Position)
    -> Result<Self::Position>;

    fn begin(&self) -> Self::Position;

    fn end(&self) -> Self::Position;

    fn next_position(&self, position: Self::Position) -> Result<Self::Position>;

    fn prev_position(&self, position: Self::Position) -> Result<Self::Position>;

    fn advance(&self, mut position: Self::Position, n: usize) -> Result<Self::Position> {
        for _ in 0..n {
            position = self.next_position(position)?;
        }
        Ok(position)
    }

    fn retreat(&self, mut position: Self::Position, n: usize) -> Result<Self::Position> {
        for _ in 0..n {
            position = self.prev_position(position)?;
        }
        Ok(position)
    }

    /// Position of the `index`-th element; `index == len()` gives `end()`.
    fn position_at(&self, index: usize) -> Result<Self::Position> {
        self.advance(self.begin(), index)
    }

    fn get(&self, position: Self::Position) -> Result<&Self::Item>;

    fn get_mut(&mut self, position: Self::Position) -> Result<&mut Self::Item>;
}
