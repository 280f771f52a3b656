// The record ring behind a channel entry - one fixed arena, one lock

use super::layout::RingLayout;
use crate::Ring::Structs::Buffer_Structs::Cursors;

use parking_lot::Mutex;

/// Mutable part of a channel: the slot arena and its cursors.
///
/// Only `RingChannel` touches this, and only while holding its lock.
pub(crate) struct RingState {
    /// `capacity * record_size` bytes. Slot `i` lives at
    /// `layout.slot_range(i)`; each record is followed by a terminator.
    /// Allocated once in `RingChannel::new` and never resized.
    pub(crate) arena: Box<[u8]>,

    pub(crate) cursors: Cursors,
}

/// A fixed-capacity ring of short text records with overwrite-on-full
/// insertion and destructive, FIFO removal.
///
/// ### Concurrency Design:
/// - **Append**: takes the lock, copies at most `record_size - 1` bytes into
///   the head slot and advances `head`. When full it also advances `tail`,
///   dropping the oldest record. Never waits for space.
/// - **Consume**: takes the lock, hands the tail record out and advances
///   `tail`. Returns `Empty` instead of waiting when nothing is unread.
///
/// The lock is held only for the copy and index update, never across calls.
pub struct RingChannel {
    pub(crate) layout: RingLayout,
    pub(crate) state: Mutex<RingState>,
}
