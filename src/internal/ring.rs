//! Fixed-capacity FIFO backing each descriptor ring and the beacon batch.

/// Circular FIFO with a compile-time capacity.
///
/// Slots are `Option<T>` so frames move in and out by value; nothing is
/// copied or cloned.
pub struct FrameRing<T, const N: usize> {
    /// Slot storage
    slots: [Option<T>; N],
    /// Index of the oldest entry
    head: usize,
    /// Number of occupied slots
    len: usize,
}

impl<T, const N: usize> FrameRing<T, N> {
    /// Create an empty ring. Const-compatible.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slots: [const { None }; N],
            head: 0,
            len: 0,
        }
    }

    /// Number of occupied slots
    #[inline(always)]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Check whether no slot is occupied
    #[inline(always)]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Check whether every slot is occupied
    #[inline(always)]
    #[must_use]
    pub const fn is_full(&self) -> bool {
        self.len == N
    }

    /// Append at the tail, handing the item back if the ring is full.
    pub fn push_back(&mut self, item: T) -> Result<(), T> {
        if self.is_full() {
            return Err(item);
        }
        let tail = (self.head + self.len) % N;
        self.slots[tail] = Some(item);
        self.len += 1;
        Ok(())
    }

    /// Remove the entry at the head.
    pub fn pop_front(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let item = self.slots[self.head].take();
        self.head = (self.head + 1) % N;
        self.len -= 1;
        item
    }

    /// Get the entry `offset` positions behind the head
    #[inline]
    pub fn get(&self, offset: usize) -> Option<&T> {
        if offset >= self.len {
            return None;
        }
        self.slots[(self.head + offset) % N].as_ref()
    }

    /// Get a mutable reference to the entry `offset` positions behind the head
    #[inline]
    pub fn get_mut(&mut self, offset: usize) -> Option<&mut T> {
        if offset >= self.len {
            return None;
        }
        self.slots[(self.head + offset) % N].as_mut()
    }

    /// Iterate from head to tail
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        (0..self.len).filter_map(move |offset| self.get(offset))
    }
}

impl<T, const N: usize> Default for FrameRing<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================
