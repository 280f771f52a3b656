use super::Buffer::layout::{RingLayout, DEFAULT_CAPACITY, DEFAULT_RECORD_SIZE};
use super::Buffer::RingChannel;
use super::Structs::Buffer_Structs::Permissions;
use crate::Core::error::Result;

/// Default name a channel is registered under.
pub const DEFAULT_ENTRY_NAME: &str = "ouroboros";

/// Shape and registration settings for one channel.
#[derive(Debug, Clone)]
pub struct ChannelBuilder {
    capacity: usize,
    record_size: usize,
    name: String,
    mode: Permissions,
}

impl Default for ChannelBuilder {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            record_size: DEFAULT_RECORD_SIZE,
            name: DEFAULT_ENTRY_NAME.to_string(),
            mode: Permissions::DEFAULT,
        }
    }
}

impl ChannelBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of record slots.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Slot size in bytes, terminator included.
    pub fn with_record_size(mut self, record_size: usize) -> Self {
        self.record_size = record_size;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Permission bits for the registered entry, e.g. `0o644`.
    pub fn with_mode(mut self, mode: u16) -> Self {
        self.mode = Permissions(mode);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mode(&self) -> Permissions {
        self.mode
    }

    pub fn layout(&self) -> Result<RingLayout> {
        RingLayout::new(self.capacity, self.record_size)
    }

    /// Build an empty, unregistered channel.
    pub fn build(&self) -> Result<RingChannel> {
        Ok(RingChannel::new(self.layout()?))
    }
}
