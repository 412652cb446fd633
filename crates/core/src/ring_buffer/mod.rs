//! A fixed-capacity FIFO over inline storage that overwrites its oldest
//! element when full.
//!
//! The buffer never allocates: all `N` slots live inside the value itself.
//! `head` and `tail` alone cannot tell an empty buffer from a full one (both
//! have `head == tail`), so a `full` flag breaks the tie.

mod iter;
mod serialize;

use std::fmt;

pub use iter::{Cursor, IntoIter, Iter, IterMut};

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RingBufferError {
    #[error("ring buffer is empty")]
    EmptyContainer,
}

/// Bounded FIFO of `N` elements with overwrite-on-full insertion.
///
/// Pushing onto a full buffer silently evicts the oldest element; the evicted
/// value is handed back to the caller. Removing from or peeking into an empty
/// buffer is reported as [`RingBufferError::EmptyContainer`].
#[derive(Clone)]
pub struct RingBuffer<T, const N: usize> {
    slots: [Option<T>; N],
    head: usize,
    tail: usize,
    full: bool,
}

impl<T, const N: usize> RingBuffer<T, N> {
    const NONZERO_CAPACITY: () = assert!(N > 0, "ring buffer capacity must be > 0");

    pub fn new() -> Self {
        let () = Self::NONZERO_CAPACITY;
        Self {
            slots: std::array::from_fn(|_| None),
            head: 0,
            tail: 0,
            full: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        !self.full && self.head == self.tail
    }

    pub fn is_full(&self) -> bool {
        self.full
    }

    /// Number of live elements, in `0..=N`.
    pub fn len(&self) -> usize {
        if self.full {
            N
        } else if self.tail >= self.head {
            self.tail - self.head
        } else {
            N - self.head + self.tail
        }
    }

    pub fn capacity(&self) -> usize {
        N
    }

    /// Append `value` as the newest element.
    ///
    /// If the buffer was already full the oldest element is overwritten and
    /// returned.
    pub fn push(&mut self, value: T) -> Option<T> {
        let was_full = self.full;
        let overwritten = self.slots[self.tail].replace(value);
        self.tail = (self.tail + 1) % N;

        if was_full {
            self.head = (self.head + 1) % N;
            tracing::trace!(capacity = N, "ring buffer full, evicted oldest element");
            overwritten
        } else {
            if self.tail == self.head {
                self.full = true;
            }
            None
        }
    }

    /// Remove and return the oldest element.
    pub fn pop(&mut self) -> Result<T, RingBufferError> {
        if self.is_empty() {
            return Err(RingBufferError::EmptyContainer);
        }
        let value = self.slots[self.head]
            .take()
            .ok_or(RingBufferError::EmptyContainer)?;
        self.head = (self.head + 1) % N;
        self.full = false;
        Ok(value)
    }

    /// Oldest element, without removing it.
    pub fn front(&self) -> Result<&T, RingBufferError> {
        if self.is_empty() {
            return Err(RingBufferError::EmptyContainer);
        }
        self.slots[self.head]
            .as_ref()
            .ok_or(RingBufferError::EmptyContainer)
    }

    pub fn front_mut(&mut self) -> Result<&mut T, RingBufferError> {
        if self.is_empty() {
            return Err(RingBufferError::EmptyContainer);
        }
        self.slots[self.head]
            .as_mut()
            .ok_or(RingBufferError::EmptyContainer)
    }

    /// Newest element, if any.
    pub fn back(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        self.slots[(self.tail + N - 1) % N].as_ref()
    }

    /// Element at logical position `index_from_oldest` (0 is the front).
    pub fn get(&self, index_from_oldest: usize) -> Option<&T> {
        if index_from_oldest >= self.len() {
            return None;
        }
        self.slots[self.physical(index_from_oldest)].as_ref()
    }

    pub fn get_mut(&mut self, index_from_oldest: usize) -> Option<&mut T> {
        if index_from_oldest >= self.len() {
            return None;
        }
        let idx = self.physical(index_from_oldest);
        self.slots[idx].as_mut()
    }

    /// Drop every live element and return to the freshly constructed state.
    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
        self.head = 0;
        self.tail = 0;
        self.full = false;
    }

    /// Cursor on the oldest element.
    pub fn begin(&self) -> Cursor<'_, T, N> {
        Cursor::new(self, self.head, 0)
    }

    /// Sentinel cursor one past the newest element.
    ///
    /// Cursors compare by how many elements they have visited, so `end()` is
    /// distinct from `begin()` on a full buffer even though both sit on the
    /// same slot.
    pub fn end(&self) -> Cursor<'_, T, N> {
        Cursor::new(self, self.tail, self.len())
    }

    /// Iterate oldest to newest.
    pub fn iter(&self) -> Iter<'_, T, N> {
        Iter::new(self.begin(), self.end())
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        let len = self.len();
        IterMut::new(&mut self.slots, self.head, len)
    }

    fn physical(&self, index_from_oldest: usize) -> usize {
        (self.head + index_from_oldest) % N
    }
}

impl<T, const N: usize> Default for RingBuffer<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug, const N: usize> fmt::Debug for RingBuffer<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Equality looks at the logical contents only; two buffers holding the same
/// elements in the same order are equal whatever their physical layout.
impl<T: PartialEq, const N: usize> PartialEq for RingBuffer<T, N> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq, const N: usize> Eq for RingBuffer<T, N> {}

impl<T, const N: usize> Extend<T> for RingBuffer<T, N> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

impl<'a, T: Copy + 'a, const N: usize> Extend<&'a T> for RingBuffer<T, N> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        for value in iter {
            self.push(*value);
        }
    }
}

impl<T, const N: usize> FromIterator<T> for RingBuffer<T, N> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut buffer = Self::new();
        for value in iter {
            buffer.push(value);
        }
        buffer
    }
}

impl<'a, T, const N: usize> IntoIterator for &'a RingBuffer<T, N> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, N>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, const N: usize> IntoIterator for &'a mut RingBuffer<T, N> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T, const N: usize> IntoIterator for RingBuffer<T, N> {
    type Item = T;
    type IntoIter = IntoIter<T, N>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self)
    }
}
