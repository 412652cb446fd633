use super::RingBuffer;
use std::fmt;
use std::iter::{Chain, FusedIterator, Take};
use std::slice;

/// Forward cursor over the logical order of a [`RingBuffer`].
///
/// Tracks a physical slot and the number of elements already visited. Two
/// cursors are equal when they have visited the same number of elements; the
/// physical slot cannot be used for this because `begin()` and `end()` share
/// a slot whenever the buffer is full.
pub struct Cursor<'a, T, const N: usize> {
    buffer: &'a RingBuffer<T, N>,
    pos: usize,
    visited: usize,
}

impl<'a, T, const N: usize> Cursor<'a, T, N> {
    pub(super) fn new(buffer: &'a RingBuffer<T, N>, pos: usize, visited: usize) -> Self {
        Self {
            buffer,
            pos,
            visited,
        }
    }

    /// Element under the cursor, or `None` once the cursor has reached `end()`.
    pub fn get(&self) -> Option<&'a T> {
        if self.visited >= self.buffer.len() {
            return None;
        }
        self.buffer.slots[self.pos].as_ref()
    }

    /// Step to the next slot, wrapping at the end of the storage.
    pub fn advance(&mut self) {
        self.pos = (self.pos + 1) % N;
        self.visited += 1;
    }

    pub fn visited(&self) -> usize {
        self.visited
    }

    pub fn position(&self) -> usize {
        self.pos
    }
}

impl<T, const N: usize> Clone for Cursor<'_, T, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, const N: usize> Copy for Cursor<'_, T, N> {}

impl<T, const N: usize> PartialEq for Cursor<'_, T, N> {
    fn eq(&self, other: &Self) -> bool {
        self.visited == other.visited
    }
}

impl<T, const N: usize> Eq for Cursor<'_, T, N> {}

impl<T, const N: usize> fmt::Debug for Cursor<'_, T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("pos", &self.pos)
            .field("visited", &self.visited)
            .finish()
    }
}

/// Iterator over shared references, oldest to newest.
pub struct Iter<'a, T, const N: usize> {
    front: Cursor<'a, T, N>,
    end: Cursor<'a, T, N>,
}

impl<'a, T, const N: usize> Iter<'a, T, N> {
    pub(super) fn new(begin: Cursor<'a, T, N>, end: Cursor<'a, T, N>) -> Self {
        Self { front: begin, end }
    }
}

impl<'a, T, const N: usize> Iterator for Iter<'a, T, N> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front == self.end {
            return None;
        }
        let item = self.front.get();
        self.front.advance();
        item
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end.visited - self.front.visited;
        (remaining, Some(remaining))
    }
}

impl<T, const N: usize> ExactSizeIterator for Iter<'_, T, N> {}

impl<T, const N: usize> FusedIterator for Iter<'_, T, N> {}

impl<T, const N: usize> Clone for Iter<'_, T, N> {
    fn clone(&self) -> Self {
        Self {
            front: self.front,
            end: self.end,
        }
    }
}

impl<T, const N: usize> fmt::Debug for Iter<'_, T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("front", &self.front)
            .field("end", &self.end)
            .finish()
    }
}

type SlotsMut<'a, T> = Take<slice::IterMut<'a, Option<T>>>;

/// Iterator over mutable references, oldest to newest.
///
/// The live window is split into the run from `head` to the end of storage
/// and the wrapped run from slot 0, which are disjoint borrows.
pub struct IterMut<'a, T> {
    inner: Chain<SlotsMut<'a, T>, SlotsMut<'a, T>>,
    remaining: usize,
}

impl<'a, T> IterMut<'a, T> {
    pub(super) fn new(slots: &'a mut [Option<T>], head: usize, len: usize) -> Self {
        let (wrapped, from_head) = slots.split_at_mut(head);
        let first = from_head.len().min(len);
        let inner = from_head
            .iter_mut()
            .take(first)
            .chain(wrapped.iter_mut().take(len - first));
        Self {
            inner,
            remaining: len,
        }
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        let slot = self.inner.next()?;
        self.remaining -= 1;
        slot.as_mut()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

impl<T> FusedIterator for IterMut<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for IterMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IterMut")
            .field("remaining", &self.remaining)
            .finish()
    }
}

/// Owning iterator that pops elements oldest first.
#[derive(Clone, Debug)]
pub struct IntoIter<T, const N: usize> {
    buffer: RingBuffer<T, N>,
}

impl<T, const N: usize> IntoIter<T, N> {
    pub(super) fn new(buffer: RingBuffer<T, N>) -> Self {
        Self { buffer }
    }
}

impl<T, const N: usize> Iterator for IntoIter<T, N> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.buffer.pop().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.buffer.len();
        (len, Some(len))
    }
}

impl<T, const N: usize> ExactSizeIterator for IntoIter<T, N> {}

impl<T, const N: usize> FusedIterator for IntoIter<T, N> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_equals_end_on_empty_buffer() {
        let rb: RingBuffer<u8, 3> = RingBuffer::new();
        assert_eq!(rb.begin(), rb.end());
        assert_eq!(rb.begin().get(), None);
    }

    #[test]
    fn full_buffer_begin_and_end_share_slot_but_differ() {
        let rb: RingBuffer<u8, 3> = [1, 2, 3].into_iter().collect();
        let begin = rb.begin();
        let end = rb.end();
        assert_eq!(begin.position(), end.position());
        assert_ne!(begin, end);
    }

    #[test]
    fn advancing_len_times_reaches_end() {
        let rb: RingBuffer<u8, 4> = [1, 2, 3, 4, 5, 6].into_iter().collect();
        let mut cursor = rb.begin();
        let mut seen = Vec::new();
        while cursor != rb.end() {
            seen.push(*cursor.get().expect("before end"));
            cursor.advance();
        }
        assert_eq!(seen, vec![3, 4, 5, 6]);
        assert_eq!(cursor.visited(), rb.len());
        assert_eq!(cursor.get(), None);
    }

    #[test]
    fn fresh_cursors_restart_traversal() {
        let rb: RingBuffer<u8, 2> = [1, 2].into_iter().collect();
        let first: Vec<u8> = rb.iter().copied().collect();
        let second: Vec<u8> = rb.iter().copied().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn iter_reports_exact_len() {
        let mut rb: RingBuffer<u8, 4> = RingBuffer::new();
        rb.extend([1, 2, 3]);
        let mut it = rb.iter();
        assert_eq!(it.len(), 3);
        it.next();
        assert_eq!(it.len(), 2);
        assert_eq!(it.by_ref().count(), 2);
        assert_eq!(it.next(), None);
    }

    #[test]
    fn for_loop_over_reference() {
        let rb: RingBuffer<u8, 3> = [9, 8, 7, 6].into_iter().collect();
        let mut sum = 0u32;
        for v in &rb {
            sum += u32::from(*v);
        }
        assert_eq!(sum, 8 + 7 + 6);
    }

    #[test]
    fn iter_mut_without_wrap() {
        let mut rb: RingBuffer<u8, 5> = RingBuffer::new();
        rb.extend([1, 2]);
        for v in &mut rb {
            *v += 1;
        }
        assert_eq!(rb.iter().copied().collect::<Vec<_>>(), vec![2, 3]);
    }

    #[test]
    fn into_iter_drains_oldest_first() {
        let rb: RingBuffer<u8, 3> = [1, 2, 3, 4].into_iter().collect();
        let mut it = rb.into_iter();
        assert_eq!(it.len(), 3);
        assert_eq!(it.next(), Some(2));
        assert_eq!(it.collect::<Vec<_>>(), vec![3, 4]);
    }
}
