//! Error taxonomy for the ring channel and its host layer.
//!
//! An empty channel is not an error: reads report it as EOF (`Ok(0)`) and
//! `RingChannel::consume` as `Consumed::Empty`. Truncation of oversized
//! records is silent and never shows up here either.

use std::io;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ChannelError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChannelError {
    /// The copy across the caller boundary failed (e.g. an inaccessible
    /// caller buffer). Channel state is untouched when this is returned.
    #[error("transfer fault while copying across the caller boundary")]
    TransferFault,

    /// The caller's destination cannot hold the oldest record. The record
    /// stays queued; `needed` is its length in bytes.
    #[error("destination too small: record needs {needed} bytes, buffer holds {available}")]
    BufferTooSmall { needed: usize, available: usize },

    /// Rejected channel shape or registration parameters.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("entry not found: {0}")]
    NotFound(String),

    #[error("entry already exists: {0}")]
    AlreadyExists(String),

    /// The entry's mode bits (or the session's open mode) do not grant the
    /// requested access.
    #[error("permission denied: {access} on {name}")]
    PermissionDenied { name: String, access: &'static str },
}

impl ChannelError {
    /// Positive errno value used by the C ABI.
    pub fn errno(&self) -> i32 {
        match self {
            ChannelError::TransferFault => libc::EFAULT,
            ChannelError::BufferTooSmall { .. } => libc::EINVAL,
            ChannelError::InvalidConfig(_) => libc::EINVAL,
            ChannelError::NotFound(_) => libc::ENOENT,
            ChannelError::AlreadyExists(_) => libc::EEXIST,
            ChannelError::PermissionDenied { .. } => libc::EACCES,
        }
    }
}

impl From<ChannelError> for io::Error {
    fn from(err: ChannelError) -> Self {
        let kind = match &err {
            ChannelError::TransferFault => io::ErrorKind::InvalidData,
            ChannelError::BufferTooSmall { .. } => io::ErrorKind::InvalidInput,
            ChannelError::InvalidConfig(_) => io::ErrorKind::InvalidInput,
            ChannelError::NotFound(_) => io::ErrorKind::NotFound,
            ChannelError::AlreadyExists(_) => io::ErrorKind::AlreadyExists,
            ChannelError::PermissionDenied { .. } => io::ErrorKind::PermissionDenied,
        };
        io::Error::new(kind, err)
    }
}
