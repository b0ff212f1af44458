use std::fmt;

use crate::{Result, Sequence, SequenceError};

mod cursor;
mod iter;

pub use cursor::{Cursor, CursorMut};
pub use iter::{IntoIter, Iter, IterMut};

#[repr(transparent)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct Id(u32);

impl Id {
    const NIL: Self = Self(u32::MAX);
    const SENTINEL: Self = Self(0);

    #[inline(always)]
    fn is_nil(self) -> bool {
        self.0 == u32::MAX
    }

    #[inline(always)]
    fn idx(self) -> usize {
        self.0 as usize
    }
}

#[inline(always)]
fn id(v: usize) -> Id {
    debug_assert!(v < u32::MAX as usize);
    Id(v as u32)
}

/// Arena slot. Live nodes hold `Some`; the sentinel and vacated slots hold
/// `None`. Vacated slots are chained through `next` on the free list.
struct Node<T> {
    value: Option<T>,
    prev: Id,
    next: Id,
    generation: u32,
}

impl<T> Node<T> {
    fn sentinel() -> Self {
        Self {
            value: None,
            prev: Id::NIL,
            next: Id::NIL,
            generation: 0,
        }
    }
}

/// Node handle into a [`LinkedList`]. `end()` names the sentinel.
///
/// The slot generation is part of the handle, so a position whose node has
/// been removed is reported as out of range even after the slot is reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    id: Id,
    generation: u32,
}

/// Doubly linked sequence terminated by a permanent, valueless sentinel.
///
/// Nodes live in an arena owned by the list; `prev`/`next` are plain handles
/// used only for traversal. Slot 0 is the sentinel: its `next` is always NIL
/// and its `prev` is the last real node (NIL when empty). `head` is the first
/// real node, or the sentinel when the list is empty.
pub struct LinkedList<T> {
    nodes: Vec<Node<T>>,
    head: Id,
    free: Id,
    len: usize,
}

impl<T> LinkedList<T> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Reserves arena room for `capacity` nodes besides the sentinel.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut nodes = Vec::with_capacity(capacity + 1);
        nodes.push(Node::sentinel());
        Self {
            nodes,
            head: Id::SENTINEL,
            free: Id::NIL,
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut::new(self)
    }

    pub fn cursor_begin(&self) -> Cursor<'_, T> {
        Cursor::new(self, self.head)
    }

    pub fn cursor_end(&self) -> Cursor<'_, T> {
        Cursor::new(self, Id::SENTINEL)
    }

    pub fn cursor_begin_mut(&mut self) -> CursorMut<'_, T> {
        let head = self.head;
        CursorMut::new(self, head)
    }

    pub fn cursor_end_mut(&mut self) -> CursorMut<'_, T> {
        CursorMut::new(self, Id::SENTINEL)
    }

    pub fn cursor_at(&self, position: Position) -> Result<Cursor<'_, T>> {
        let id = self.resolve(position)?;
        Ok(Cursor::new(self, id))
    }

    pub fn cursor_mut_at(&mut self, position: Position) -> Result<CursorMut<'_, T>> {
        let id = self.resolve(position)?;
        Ok(CursorMut::new(self, id))
    }

    /// Unlinks the node at `position` and hands its value back.
    pub fn remove(&mut self, position: Position) -> Result<T> {
        let id = self.resolve(position)?;
        if id == Id::SENTINEL {
            return Err(SequenceError::OutOfRange);
        }
        self.unlink(id).ok_or(SequenceError::OutOfRange)
    }

    /// Drops every element. Slots stay allocated for reuse.
    pub fn clear(&mut self) {
        let mut cur = self.head;
        while cur != Id::SENTINEL {
            let next = self.nodes[cur.idx()].next;
            drop(self.vacate(cur));
            cur = next;
        }
        self.head = Id::SENTINEL;
        self.nodes[Id::SENTINEL.idx()].prev = Id::NIL;
        self.len = 0;
    }

    fn position_of(&self, id: Id) -> Position {
        Position {
            id,
            generation: self.nodes[id.idx()].generation,
        }
    }

    /// Maps a position to a node of this list: the sentinel or a live node
    /// whose generation still matches.
    fn resolve(&self, position: Position) -> Result<Id> {
        let node = self
            .nodes
            .get(position.id.idx())
            .ok_or(SequenceError::OutOfRange)?;
        let live = position.id == Id::SENTINEL || node.value.is_some();
        if live && node.generation == position.generation {
            Ok(position.id)
        } else {
            Err(SequenceError::OutOfRange)
        }
    }

    fn claim(&mut self, value: T, prev: Id, next: Id) -> Id {
        if self.free.is_nil() {
            let id = id(self.nodes.len());
            self.nodes.push(Node {
                value: Some(value),
                prev,
                next,
                generation: 0,
            });
            return id;
        }
        let id = self.free;
        let node = &mut self.nodes[id.idx()];
        self.free = node.next;
        node.value = Some(value);
        node.prev = prev;
        node.next = next;
        id
    }

    /// Takes the value out of `id` and pushes the slot onto the free list.
    /// The generation bump invalidates every outstanding position to it.
    fn vacate(&mut self, id: Id) -> Option<T> {
        debug_assert!(id != Id::SENTINEL);
        let node = &mut self.nodes[id.idx()];
        node.generation = node.generation.wrapping_add(1);
        node.prev = Id::NIL;
        node.next = self.free;
        self.free = id;
        node.value.take()
    }

    /// Splices a new node in front of `at`, which may be the sentinel.
    fn link_before(&mut self, at: Id, value: T) -> Id {
        let prev = self.nodes[at.idx()].prev;
        let id = self.claim(value, prev, at);
        self.nodes[at.idx()].prev = id;
        if prev.is_nil() {
            self.head = id;
        } else {
            self.nodes[prev.idx()].next = id;
        }
        self.len += 1;
        id
    }

    fn unlink(&mut self, id: Id) -> Option<T> {
        debug_assert!(id != Id::SENTINEL);
        let (prev, next) = {
            let node = &self.nodes[id.idx()];
            (node.prev, node.next)
        };
        // Real nodes always have a successor; the chain ends at the sentinel.
        self.nodes[next.idx()].prev = prev;
        if prev.is_nil() {
            self.head = next;
        } else {
            self.nodes[prev.idx()].next = next;
        }
        self.len -= 1;
        self.vacate(id)
    }

    fn last(&self) -> Id {
        self.nodes[Id::SENTINEL.idx()].prev
    }

    fn step_next(&self, id: Id) -> Result<Id> {
        let next = self.nodes[id.idx()].next;
        if next.is_nil() {
            Err(SequenceError::OutOfRange)
        } else {
            Ok(next)
        }
    }

    fn step_prev(&self, id: Id) -> Result<Id> {
        let prev = self.nodes[id.idx()].prev;
        if prev.is_nil() {
            Err(SequenceError::OutOfRange)
        } else {
            Ok(prev)
        }
    }

    #[cfg(test)]
    pub(crate) fn check_invariants(&self) {
        let sentinel = &self.nodes[Id::SENTINEL.idx()];
        assert!(sentinel.value.is_none(), "sentinel holds a value");
        assert!(sentinel.next.is_nil(), "sentinel has a successor");
        assert!(self.nodes[self.head.idx()].prev.is_nil(), "head has a predecessor");

        let mut cur = self.head;
        let mut steps = 0;
        while cur != Id::SENTINEL {
            let node = &self.nodes[cur.idx()];
            assert!(node.value.is_some(), "vacated node in chain");
            assert_eq!(self.nodes[node.next.idx()].prev, cur, "broken back link");
            cur = node.next;
            steps += 1;
            assert!(steps <= self.len, "forward chain longer than len");
        }
        assert_eq!(steps, self.len);

        let mut cur = Id::SENTINEL;
        let mut steps = 0;
        while !self.nodes[cur.idx()].prev.is_nil() {
            cur = self.nodes[cur.idx()].prev;
            steps += 1;
            assert!(steps <= self.len, "backward chain longer than len");
        }
        assert_eq!(steps, self.len);
        assert_eq!(cur, self.head);

        let mut vacated = 0;
        let mut cur = self.free;
        while !cur.is_nil() {
            assert!(self.nodes[cur.idx()].value.is_none(), "live node on free list");
            cur = self.nodes[cur.idx()].next;
            vacated += 1;
        }
        assert_eq!(vacated + self.len + 1, self.nodes.len());
    }
}

impl<T> Default for LinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for LinkedList<T> {
    fn clone(&self) -> Self {
        let mut out = Self::with_capacity(self.len);
        for item in self.iter() {
            out.append(item.clone());
        }
        out
    }

    fn clone_from(&mut self, source: &Self) {
        self.clear();
        self.extend(source.iter().cloned());
    }
}

impl<T: fmt::Debug> fmt::Debug for LinkedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for LinkedList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for LinkedList<T> {}

impl<T> Extend<T> for LinkedList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.append(item);
        }
    }
}

impl<T> FromIterator<T> for LinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut out = Self::new();
        out.extend(iter);
        out
    }
}

impl<T> From<Vec<T>> for LinkedList<T> {
    fn from(items: Vec<T>) -> Self {
        let mut out = Self::with_capacity(items.len());
        out.extend(items);
        out
    }
}

impl<T, const N: usize> From<[T; N]> for LinkedList<T> {
    fn from(items: [T; N]) -> Self {
        let mut out = Self::with_capacity(N);
        out.extend(items);
        out
    }
}

impl<T> Sequence for LinkedList<T> {
    type Item = T;
    type Position = Position;

    fn new() -> Self {
        Self::with_capacity(0)
    }

    fn len(&self) -> usize {
        self.len
    }

    fn append(&mut self, item: T) {
        self.link_before(Id::SENTINEL, item);
    }

    fn prepend(&mut self, item: T) {
        let head = self.head;
        self.link_before(head, item);
    }

    fn insert(&mut self, position: Position, item: T) -> Result<Position> {
        let at = self.resolve(position)?;
        let id = self.link_before(at, item);
        Ok(self.position_of(id))
    }

    fn pop_first(&mut self) -> Result<T> {
        if self.len == 0 {
            return Err(SequenceError::EmptyContainer);
        }
        let head = self.head;
        self.unlink(head).ok_or(SequenceError::EmptyContainer)
    }

    fn pop_last(&mut self) -> Result<T> {
        if self.len == 0 {
            return Err(SequenceError::EmptyContainer);
        }
        let last = self.last();
        self.unlink(last).ok_or(SequenceError::EmptyContainer)
    }

    fn erase(&mut self, position: Position) -> Result<Position> {
        let id = self.resolve(position)?;
        if id == Id::SENTINEL {
            return Err(SequenceError::OutOfRange);
        }
        let next = self.nodes[id.idx()].next;
        drop(self.unlink(id));
        Ok(self.position_of(next))
    }

    fn erase_range(&mut self, first: Position, last: Position) -> Result<Position> {
        let first = self.resolve(first)?;
        let last = self.resolve(last)?;
        if first == last {
            return Ok(self.position_of(last));
        }

        // `last` must be reachable from `first` before anything is unlinked.
        let mut count = 0;
        let mut cur = first;
        while cur != last {
            if cur == Id::SENTINEL {
                return Err(SequenceError::OutOfRange);
            }
            cur = self.nodes[cur.idx()].next;
            count += 1;
        }

        let before = self.nodes[first.idx()].prev;
        self.nodes[last.idx()].prev = before;
        if before.is_nil() {
            self.head = last;
        } else {
            self.nodes[before.idx()].next = last;
        }
        self.len -= count;

        let mut cur = first;
        while cur != last {
            let next = self.nodes[cur.idx()].next;
            drop(self.vacate(cur));
            cur = next;
        }
        Ok(self.position_of(last))
    }

    fn begin(&self) -> Position {
        self.position_of(self.head)
    }

    fn end(&self) -> Position {
        self.position_of(Id::SENTINEL)
    }

    fn next_position(&self, position: Position) -> Result<Position> {
        let id = self.resolve(position)?;
        let next = self.step_next(id)?;
        Ok(self.position_of(next))
    }

    fn prev_position(&self, position: Position) -> Result<Position> {
        let id = self.resolve(position)?;
        let prev = self.step_prev(id)?;
        Ok(self.position_of(prev))
    }

    fn get(&self, position: Position) -> Result<&T> {
        let id = self.resolve(position)?;
        self.nodes[id.idx()]
            .value
            .as_ref()
            .ok_or(SequenceError::OutOfRange)
    }

    fn get_mut(&mut self, position: Position) -> Result<&mut T> {
        let id = self.resolve(position)?;
        self.nodes[id.idx()]
            .value
            .as_mut()
            .ok_or(SequenceError::OutOfRange)
    }
}
