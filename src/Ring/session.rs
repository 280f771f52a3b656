// src/Ring/session.rs

use crate::Core::boundary::{UserBuffer, UserSource};
use crate::Core::error::{ChannelError, Result};
use crate::Ring::Buffer::RingChannel;
use crate::Ring::Structs::Buffer_Structs::{AccessMode, ReadCursor};
use std::sync::Arc;

/// One open-read-close interaction with a channel entry.
///
/// A session hands out at most one record: the first `read` consumes the
/// oldest unread record, and every later `read` reports EOF without touching
/// the channel. Open a new session to get the next record. Writes are not
/// limited and do not move the read cursor.
pub struct Session {
    name: Arc<str>,
    channel: Arc<RingChannel>,
    access: AccessMode,
    cursor: ReadCursor,
    /// Staging area for writes, sized once to `record_size - 1`.
    scratch: Vec<u8>,
}

impl Session {
    pub(crate) fn new(name: Arc<str>, channel: Arc<RingChannel>, access: AccessMode) -> Self {
        let scratch = Vec::with_capacity(channel.layout().max_record_len());
        Self {
            name,
            channel,
            access,
            cursor: ReadCursor::default(),
            scratch,
        }
    }

    /// Reads the session's record into `dst`.
    ///
    /// # Returns
    /// * `Ok(n)` with `n > 0` (or `n == 0` for an empty record) when a record
    ///   was delivered
    /// * `Ok(0)` at EOF: the session already had its record, or the channel
    ///   is empty
    /// * `Err(BufferTooSmall)` if `dst` cannot hold the record; the record
    ///   stays queued
    /// * `Err(TransferFault)` if the copy into `dst` failed; the record stays
    ///   queued
    pub fn read<B: UserBuffer + ?Sized>(&mut self, dst: &mut B) -> Result<usize> {
        if !self.access.readable() {
            return Err(self.denied("read"));
        }
        if self.cursor.is_exhausted() {
            return Ok(0);
        }

        let delivered = self.channel.consume_with(|record| {
            let available = dst.capacity();
            if record.len() > available {
                return Err(ChannelError::BufferTooSmall {
                    needed: record.len(),
                    available,
                });
            }
            dst.copy_to_user(record)?;
            Ok(record.len())
        })?;

        match delivered {
            Some(len) => {
                self.cursor.advance(len);
                tracing::debug!(entry = %self.name, len, "record read");
                Ok(len)
            }
            None => {
                tracing::warn!(entry = %self.name, "read from empty ring");
                Ok(0)
            }
        }
    }

    /// Reads the session's record into a fresh `Vec`, `None` at EOF.
    pub fn read_record(&mut self) -> Result<Option<Vec<u8>>> {
        if !self.access.readable() {
            return Err(self.denied("read"));
        }
        let was_exhausted = self.cursor.is_exhausted();
        let mut out = Vec::new();
        self.read(&mut out)?;
        if was_exhausted || !self.cursor.is_exhausted() {
            return Ok(None);
        }
        Ok(Some(out))
    }

    /// Appends one record copied from `src`.
    ///
    /// Only the first `record_size - 1` bytes cross the boundary; the rest
    /// is dropped. Returns `src.len()` on success. A failed copy leaves the
    /// channel untouched. The bytes are staged in a buffer owned by the
    /// session, so repeated writes do not allocate.
    pub fn write<S: UserSource + ?Sized>(&mut self, src: &S) -> Result<usize> {
        if !self.access.writable() {
            return Err(self.denied("write"));
        }

        let count = src.len();
        let len = count.min(self.channel.layout().max_record_len());
        self.scratch.clear();
        self.scratch.resize(len, 0);
        src.copy_from_user(&mut self.scratch)?;

        self.channel.append(&self.scratch);
        tracing::debug!(entry = %self.name, len, requested = count, "record written");
        Ok(count)
    }

    /// Current read cursor.
    pub fn position(&self) -> ReadCursor {
        self.cursor
    }

    pub fn access(&self) -> AccessMode {
        self.access
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn channel(&self) -> &Arc<RingChannel> {
        &self.channel
    }

    fn denied(&self, access: &'static str) -> ChannelError {
        ChannelError::PermissionDenied {
            name: self.name.to_string(),
            access,
        }
    }
}
