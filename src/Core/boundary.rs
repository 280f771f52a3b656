// Copies between the channel and caller-owned memory.
//
// Everything a session reads or writes crosses one of these two traits, so a
// caller buffer that cannot be accessed surfaces as `TransferFault` instead of
// corrupting channel state.

use crate::Core::error::{ChannelError, Result};

/// Destination of a read.
pub trait UserBuffer {
    /// Bytes the destination can take.
    fn capacity(&self) -> usize;

    /// Copy `src` into the start of the destination. `src.len()` never
    /// exceeds `capacity()`.
    fn copy_to_user(&mut self, src: &[u8]) -> Result<()>;
}

/// Source of a write.
pub trait UserSource {
    /// Bytes the caller asked to write.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fill `dst` from the start of the source. `dst.len()` never exceeds
    /// `len()`.
    fn copy_from_user(&self, dst: &mut [u8]) -> Result<()>;
}

impl UserBuffer for [u8] {
    fn capacity(&self) -> usize {
        self.len()
    }

    fn copy_to_user(&mut self, src: &[u8]) -> Result<()> {
        self.get_mut(..src.len())
            .ok_or(ChannelError::TransferFault)?
            .copy_from_slice(src);
        Ok(())
    }
}

/// A `Vec` grows to fit, so reads into it never come up short.
impl UserBuffer for Vec<u8> {
    fn capacity(&self) -> usize {
        usize::MAX
    }

    fn copy_to_user(&mut self, src: &[u8]) -> Result<()> {
        self.clear();
        self.extend_from_slice(src);
        Ok(())
    }
}

impl UserSource for [u8] {
    fn len(&self) -> usize {
        <[u8]>::len(self)
    }

    fn copy_from_user(&self, dst: &mut [u8]) -> Result<()> {
        let src = self.get(..dst.len()).ok_or(ChannelError::TransferFault)?;
        dst.copy_from_slice(src);
        Ok(())
    }
}

impl UserSource for str {
    fn len(&self) -> usize {
        str::len(self)
    }

    fn copy_from_user(&self, dst: &mut [u8]) -> Result<()> {
        self.as_bytes().copy_from_user(dst)
    }
}

impl UserSource for Vec<u8> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn copy_from_user(&self, dst: &mut [u8]) -> Result<()> {
        self.as_slice().copy_from_user(dst)
    }
}
