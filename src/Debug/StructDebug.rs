use std::fmt;
use crate::Core::module::Module;
use crate::Core::registry::{ChannelEntry, Registry};
use crate::Ring::Buffer::RingChannel;
use crate::Ring::Session;

/// Debug function for RingChannel
///
/// Shows the shape and a cursor snapshot. Record bytes are not printed.
pub fn debug_ring_channel(channel: &RingChannel, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let cursors = channel.cursors();
    f.debug_struct("RingChannel")
        .field("capacity", &channel.capacity())
        .field("record_size", &channel.record_size())
        .field("head", &cursors.head)
        .field("tail", &cursors.tail)
        .field("count", &cursors.count)
        .finish_non_exhaustive()
}

/// Debug function for Session
pub fn debug_session(session: &Session, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Session")
        .field("name", &session.name())
        .field("access", &session.access())
        .field("position", &session.position())
        .finish_non_exhaustive()
}

/// Debug function for ChannelEntry
pub fn debug_channel_entry(entry: &ChannelEntry, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("ChannelEntry")
        .field("name", &entry.name())
        .field("mode", &format_args!("{:o}", entry.mode().0))
        .field("channel", entry.channel())
        .finish()
}

/// Debug function for Registry
///
/// Lists entry names only; taking each channel's lock here is avoided.
pub fn debug_registry(registry: &Registry, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Registry")
        .field("entries", &registry.entry_names())
        .finish()
}

/// Debug function for Module
pub fn debug_module(module: &Module, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Module")
        .field("name", &module.name())
        .field("loaded", &module.is_loaded())
        .field("channel", module.channel())
        .finish_non_exhaustive()
}
