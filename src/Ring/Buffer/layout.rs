use crate::Core::error::{ChannelError, Result};

/// Default number of record slots in a channel.
pub const DEFAULT_CAPACITY: usize = 10;

/// Default size of one slot in bytes, terminator included.
pub const DEFAULT_RECORD_SIZE: usize = 64;

/// Terminator written after every stored record.
pub const TERMINATOR: u8 = 0;

/// Shape of a channel's arena: `capacity` slots of `record_size` bytes each,
/// laid out back to back in one allocation.
///
/// A stored record occupies at most `record_size - 1` bytes so that the
/// terminator always fits inside its slot.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RingLayout {
    /// Number of slots (N).
    pub capacity: usize,

    /// Bytes per slot including the terminator (L).
    pub record_size: usize,
}

impl Default for RingLayout {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            record_size: DEFAULT_RECORD_SIZE,
        }
    }
}

impl RingLayout {
    /// Validate and build a layout.
    ///
    /// Both dimensions must be at least 1. A record size of 1 leaves room for
    /// the terminator only, so every record is stored empty.
    pub fn new(capacity: usize, record_size: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(ChannelError::InvalidConfig(
                "capacity must be at least 1 slot".into(),
            ));
        }
        if record_size == 0 {
            return Err(ChannelError::InvalidConfig(
                "record size must be at least 1 byte (terminator)".into(),
            ));
        }
        if capacity.checked_mul(record_size).is_none() {
            return Err(ChannelError::InvalidConfig(format!(
                "arena of {capacity} x {record_size} bytes overflows usize"
            )));
        }
        Ok(Self {
            capacity,
            record_size,
        })
    }

    /// Longest record a slot can hold (L - 1).
    #[inline]
    pub fn max_record_len(&self) -> usize {
        self.record_size - 1
    }

    /// Total arena size in bytes.
    #[inline]
    pub fn arena_len(&self) -> usize {
        self.capacity * self.record_size
    }

    /// Byte range of slot `index` inside the arena.
    #[inline]
    pub fn slot_range(&self, index: usize) -> std::ops::Range<usize> {
        let start = index * self.record_size;
        start..start + self.record_size
    }

    /// Advance a slot index by one, wrapping at `capacity`.
    #[inline]
    pub fn next(&self, index: usize) -> usize {
        (index + 1) % self.capacity
    }
}
