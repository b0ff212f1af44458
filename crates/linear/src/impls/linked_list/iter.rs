use std::iter::FusedIterator;
use std::marker::PhantomData;

use super::{Id, LinkedList, Node};
use crate::Sequence;

/// Walks `next` links from the head; `back` is the exclusive end, starting at
/// the sentinel.
pub struct Iter<'a, T> {
    nodes: &'a [Node<T>],
    front: Id,
    back: Id,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(super) fn new(list: &'a LinkedList<T>) -> Self {
        Self {
            nodes: &list.nodes,
            front: list.head,
            back: Id::SENTINEL,
            remaining: list.len,
        }
    }
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let nodes = self.nodes;
        let node = &nodes[self.front.idx()];
        self.front = node.next;
        self.remaining -= 1;
        node.value.as_ref()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let nodes = self.nodes;
        self.back = nodes[self.back.idx()].prev;
        self.remaining -= 1;
        nodes[self.back.idx()].value.as_ref()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

/// Mutable walk over the chain.
///
/// Holds the arena as a raw pointer so that each yielded `&mut T` can borrow a
/// different slot. `remaining` keeps the two ends from crossing, so no slot is
/// yielded twice.
pub struct IterMut<'a, T> {
    nodes: *mut Node<T>,
    front: Id,
    back: Id,
    remaining: usize,
    _marker: PhantomData<&'a mut Node<T>>,
}

impl<'a, T> IterMut<'a, T> {
    pub(super) fn new(list: &'a mut LinkedList<T>) -> Self {
        Self {
            front: list.head,
            back: Id::SENTINEL,
            remaining: list.len,
            nodes: list.nodes.as_mut_ptr(),
            _marker: PhantomData,
        }
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = unsafe { &mut *self.nodes.add(self.front.idx()) };
        self.front = node.next;
        self.remaining -= 1;
        node.value.as_mut()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for IterMut<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let prev = unsafe { (*self.nodes.add(self.back.idx())).prev };
        self.back = prev;
        self.remaining -= 1;
        let node = unsafe { &mut *self.nodes.add(prev.idx()) };
        node.value.as_mut()
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}
impl<T> FusedIterator for IterMut<'_, T> {}

pub struct IntoIter<T> {
    list: LinkedList<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.list.pop_first().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len, Some(self.list.len))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.list.pop_last().ok()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
impl<T> FusedIterator for IntoIter<T> {}

impl<T> IntoIterator for LinkedList<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { list: self }
    }
}

impl<'a, T> IntoIterator for &'a LinkedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut LinkedList<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use crate::{LinkedList, Sequence};

    #[test]
    fn follows_links_not_slots() {
        let mut list = LinkedList::new();
        list.append(2);
        list.prepend(1);
        list.append(4);
        let end = list.end();
        let at = list.prev_position(end).unwrap();
        list.insert(at, 3).unwrap();
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3, 4]);
        assert_eq!(list.iter().rev().copied().collect::<Vec<_>>(), vec![4, 3, 2, 1]);
    }

    #[test]
    fn ends_meet_in_the_middle() {
        let list = LinkedList::from([1, 2, 3, 4, 5]);
        let mut iter = list.iter();
        assert_eq!(iter.next(), Some(&1));
        assert_eq!(iter.next_back(), Some(&5));
        assert_eq!(iter.next_back(), Some(&4));
        assert_eq!(iter.len(), 2);
        assert_eq!(iter.next(), Some(&2));
        assert_eq!(iter.next(), Some(&3));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
    }

    #[test]
    fn iter_mut_from_both_ends() {
        let mut list = LinkedList::from([1, 2, 3, 4]);
        let mut iter = list.iter_mut();
        *iter.next().unwrap() += 10;
        *iter.next_back().unwrap() += 40;
        for item in iter {
            *item = 0;
        }
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![11, 0, 0, 44]);
    }

    #[test]
    fn owning_iteration() {
        let list = LinkedList::from(vec![String::from("a"), String::from("b"), String::from("c")]);
        let mut iter = list.into_iter();
        assert_eq!(iter.len(), 3);
        assert_eq!(iter.next_back().as_deref(), Some("c"));
        assert_eq!(iter.collect::<Vec<_>>(), vec!["a", "b"]);
    }
}
