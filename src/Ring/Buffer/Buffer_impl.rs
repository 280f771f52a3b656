use parking_lot::Mutex;

use super::layout::{RingLayout, TERMINATOR};
use super::Buffer::{RingChannel, RingState};
use crate::Ring::Structs::Buffer_Structs::{Consumed, Cursors};

impl RingChannel {
    /// Create an empty channel with all slots zeroed and
    /// `head = tail = count = 0`.
    pub fn new(layout: RingLayout) -> Self {
        Self {
            layout,
            state: Mutex::new(RingState {
                arena: vec![TERMINATOR; layout.arena_len()].into_boxed_slice(),
                cursors: Cursors::default(),
            }),
        }
    }

    /// Channel with the default shape (10 slots of 64 bytes).
    pub fn with_defaults() -> Self {
        Self::new(RingLayout::default())
    }

    /// Append one record, overwriting the oldest one if the ring is full.
    ///
    /// Input longer than `record_size - 1` bytes is cut silently. The return
    /// value is always `data.len()`, so callers cannot see the truncation.
    pub fn append(&self, data: &[u8]) -> usize {
        let len = data.len().min(self.layout.max_record_len());

        let mut guard = self.state.lock();
        let state = &mut *guard;
        let head = state.cursors.head;

        let slot = &mut state.arena[self.layout.slot_range(head)];
        slot[..len].copy_from_slice(&data[..len]);
        slot[len] = TERMINATOR;

        state.cursors.head = self.layout.next(head);
        if state.cursors.count < self.layout.capacity {
            state.cursors.count += 1;
        } else {
            // full: the old tail record is gone
            state.cursors.tail = self.layout.next(state.cursors.tail);
            tracing::trace!(slot = head, "ring full, oldest record overwritten");
        }

        data.len()
    }

    /// Remove and return the oldest unread record, or `Empty`.
    pub fn consume(&self) -> Consumed {
        let taken: Result<Option<Vec<u8>>, std::convert::Infallible> =
            self.consume_with(|record| Ok(record.to_vec()));
        match taken {
            Ok(Some(bytes)) => Consumed::Record(bytes),
            Ok(None) => Consumed::Empty,
            Err(never) => match never {},
        }
    }

    /// Hand the oldest unread record to `f` and remove it only if `f`
    /// succeeds.
    ///
    /// `f` runs under the channel lock and should do nothing but copy. On
    /// `Err` the cursors are left as they were and the record stays queued.
    /// Returns `Ok(None)` when the ring is empty, without calling `f`.
    pub fn consume_with<T, E, F>(&self, f: F) -> Result<Option<T>, E>
    where
        F: FnOnce(&[u8]) -> Result<T, E>,
    {
        let mut guard = self.state.lock();
        let state = &mut *guard;

        if state.cursors.count == 0 {
            return Ok(None);
        }

        let tail = state.cursors.tail;
        let slot = &state.arena[self.layout.slot_range(tail)];
        let len = slot
            .iter()
            .position(|&b| b == TERMINATOR)
            .unwrap_or(self.layout.max_record_len());

        let out = f(&slot[..len])?;

        state.cursors.tail = self.layout.next(tail);
        state.cursors.count -= 1;
        Ok(Some(out))
    }

    /// Drop every unread record. Slot bytes are left as they are.
    pub fn clear(&self) {
        let mut state = self.state.lock();
        state.cursors = Cursors::default();
    }

    /// Current `(head, tail, count)`.
    pub fn cursors(&self) -> Cursors {
        self.state.lock().cursors
    }

    /// Number of unread records.
    pub fn len(&self) -> usize {
        self.state.lock().cursors.count
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_full(&self) -> bool {
        self.len() == self.layout.capacity
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.layout.capacity
    }

    /// Slot size in bytes, terminator included.
    #[inline]
    pub fn record_size(&self) -> usize {
        self.layout.record_size
    }

    #[inline]
    pub fn layout(&self) -> RingLayout {
        self.layout
    }
}

impl Default for RingChannel {
    fn default() -> Self {
        Self::with_defaults()
    }
}
