use super::StructDebug;
use crate::Core::module::Module;
use crate::Core::registry::{ChannelEntry, Registry};
use crate::Ring::Buffer::RingChannel;
use crate::Ring::Session;
use std::fmt;

// Debug proxy implementations that call the standalone debug functions
impl fmt::Debug for RingChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        StructDebug::debug_ring_channel(self, f)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        StructDebug::debug_session(self, f)
    }
}

impl fmt::Debug for ChannelEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        StructDebug::debug_channel_entry(self, f)
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        StructDebug::debug_registry(self, f)
    }
}

impl fmt::Debug for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        StructDebug::debug_module(self, f)
    }
}

#[cfg(test)]
mod tests {
    use crate::Core::module::Module;

    #[test]
    fn debug_output_shows_cursors_not_records() {
        let module = Module::load_default().unwrap();
        module.channel().append(b"secret");
        let out = format!("{module:?}");
        assert!(out.contains("count: 1"));
        assert!(out.contains("ouroboros"));
        assert!(!out.contains("secret"));
    }
}
