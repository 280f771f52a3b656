// Plain value types passed in and out of the ring channel

/// Snapshot of a channel's cursors, taken under its lock.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Cursors {
    /// Slot the next appended record will be written to.
    pub head: usize,
    /// Slot holding the oldest unread record.
    pub tail: usize,
    /// Number of unread records.
    pub count: usize,
}

/// Outcome of a destructive read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Consumed {
    /// The oldest unread record, exactly as stored (without terminator).
    Record(Vec<u8>),
    /// Nothing unread. Not an error.
    Empty,
}

impl Consumed {
    pub fn is_empty(&self) -> bool {
        matches!(self, Consumed::Empty)
    }

    /// `(bytes, found)` form of the outcome.
    pub fn into_parts(self) -> (Vec<u8>, bool) {
        match self {
            Consumed::Record(bytes) => (bytes, true),
            Consumed::Empty => (Vec::new(), false),
        }
    }

    pub fn into_option(self) -> Option<Vec<u8>> {
        match self {
            Consumed::Record(bytes) => Some(bytes),
            Consumed::Empty => None,
        }
    }
}

/// Per-session read position.
///
/// A session may consume at most one record. `offset` counts the bytes
/// already handed to the caller; `delivered` also covers zero-length records,
/// which leave the offset at 0.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ReadCursor {
    pub offset: u64,
    pub delivered: bool,
}

impl ReadCursor {
    /// True once the session has had its record (or hit EOF).
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.offset > 0 || self.delivered
    }

    pub(crate) fn advance(&mut self, len: usize) {
        self.offset += len as u64;
        self.delivered = true;
    }
}

/// How a session was opened.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum AccessMode {
    ReadOnly = 0,
    WriteOnly = 1,
    ReadWrite = 2,
}

impl AccessMode {
    pub fn readable(self) -> bool {
        matches!(self, AccessMode::ReadOnly | AccessMode::ReadWrite)
    }

    pub fn writable(self) -> bool {
        matches!(self, AccessMode::WriteOnly | AccessMode::ReadWrite)
    }

    pub fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            0 => Some(AccessMode::ReadOnly),
            1 => Some(AccessMode::WriteOnly),
            2 => Some(AccessMode::ReadWrite),
            _ => None,
        }
    }
}

/// Unix-style permission bits of a registered entry (e.g. `0o666`).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Permissions(pub u16);

impl Permissions {
    pub const DEFAULT: Permissions = Permissions(0o666);

    pub fn allows_read(self) -> bool {
        self.0 & 0o444 != 0
    }

    pub fn allows_write(self) -> bool {
        self.0 & 0o222 != 0
    }

    pub fn allows(self, access: AccessMode) -> bool {
        (!access.readable() || self.allows_read()) && (!access.writable() || self.allows_write())
    }
}

impl Default for Permissions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permission_bits_gate_access() {
        assert!(Permissions(0o666).allows(AccessMode::ReadWrite));
        assert!(Permissions(0o444).allows(AccessMode::ReadOnly));
        assert!(!Permissions(0o444).allows(AccessMode::ReadWrite));
        assert!(Permissions(0o200).allows(AccessMode::WriteOnly));
        assert!(!Permissions(0o200).allows(AccessMode::ReadOnly));
    }

    #[test]
    fn cursor_exhausts_on_empty_record() {
        let mut cursor = ReadCursor::default();
        assert!(!cursor.is_exhausted());
        cursor.advance(0);
        assert_eq!(cursor.offset, 0);
        assert!(cursor.is_exhausted());
    }
}
