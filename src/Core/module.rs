use crate::Core::error::{ChannelError, Result};
use crate::Core::registry::Registry;
use crate::Ring::Buffer::RingChannel;
use crate::Ring::{ChannelBuilder, Session};
use crate::Ring::Structs::Buffer_Structs::AccessMode;
use std::sync::Arc;

/// A loaded channel: owns the ring and its registry entry.
///
/// Loading builds the channel and publishes it; unloading (explicitly or on
/// drop) removes the entry and discards the records. The channel lives as
/// long as the module, or as long as the last session still holding it.
pub struct Module {
    registry: Arc<Registry>,
    name: String,
    channel: Arc<RingChannel>,
    loaded: bool,
}

impl Module {
    /// Build the channel described by `builder` and register it.
    pub fn load(registry: Arc<Registry>, builder: ChannelBuilder) -> Result<Self> {
        let channel = Arc::new(builder.build()?);
        registry.create_entry(builder.name(), builder.mode(), channel.clone())?;

        tracing::info!(
            entry = builder.name(),
            capacity = channel.capacity(),
            record_size = channel.record_size(),
            "module loaded"
        );

        Ok(Self {
            registry,
            name: builder.name().to_string(),
            channel,
            loaded: true,
        })
    }

    /// Load with the default shape into a private registry.
    pub fn load_default() -> Result<Self> {
        Self::load(Arc::new(Registry::new()), ChannelBuilder::new())
    }

    /// Remove the entry and discard any unread records. Safe to call twice.
    pub fn unload(&mut self) {
        if !self.loaded {
            return;
        }
        self.loaded = false;

        if !self.registry.remove_entry_if(&self.name, &self.channel) {
            tracing::warn!(entry = %self.name, "entry gone or taken over before unload");
        }
        self.channel.clear();
        tracing::info!(entry = %self.name, "module unloaded");
    }

    /// Open a session on this module's entry. Fails with `NotFound` once
    /// the name no longer points at this module's channel.
    pub fn open(&self, access: AccessMode) -> Result<Session> {
        let entry = self
            .registry
            .get_entry(&self.name)
            .filter(|entry| Arc::ptr_eq(entry.channel(), &self.channel))
            .ok_or_else(|| ChannelError::NotFound(self.name.clone()))?;
        Registry::open_entry(&entry, access)
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn channel(&self) -> &Arc<RingChannel> {
        &self.channel
    }
}

impl Drop for Module {
    fn drop(&mut self) {
        self.unload();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_registers_and_unload_removes() {
        let registry = Arc::new(Registry::new());
        let mut module = Module::load(registry.clone(), ChannelBuilder::new()).unwrap();
        assert_eq!(registry.entry_names(), vec!["ouroboros".to_string()]);

        module.open(AccessMode::WriteOnly).unwrap().write("x").unwrap();
        assert_eq!(module.channel().len(), 1);

        module.unload();
        assert!(!module.is_loaded());
        assert!(registry.entry_names().is_empty());
        assert!(module.channel().is_empty());
        assert!(matches!(
            module.open(AccessMode::ReadOnly),
            Err(ChannelError::NotFound(_))
        ));

        module.unload();
    }

    #[test]
    fn drop_unloads() {
        let registry = Arc::new(Registry::new());
        {
            let _module = Module::load(
                registry.clone(),
                ChannelBuilder::new().with_name("scoped"),
            )
            .unwrap();
            assert!(registry.get_entry("scoped").is_some());
        }
        assert!(registry.get_entry("scoped").is_none());
    }

    #[test]
    fn stale_module_leaves_successor_entry_alone() {
        let registry = Arc::new(Registry::new());
        let first = Module::load(registry.clone(), ChannelBuilder::new()).unwrap();
        registry.remove_entry("ouroboros").unwrap();

        let second = Module::load(registry.clone(), ChannelBuilder::new()).unwrap();
        second.channel().append(b"kept");

        assert!(matches!(
            first.open(AccessMode::ReadOnly),
            Err(ChannelError::NotFound(_))
        ));
        drop(first);

        assert_eq!(registry.entry_names(), vec!["ouroboros".to_string()]);
        assert_eq!(second.channel().len(), 1);
        let mut session = registry.open("ouroboros", AccessMode::ReadOnly).unwrap();
        assert_eq!(session.read_record().unwrap(), Some(b"kept".to_vec()));
    }

    #[test]
    fn second_load_under_same_name_fails() {
        let registry = Arc::new(Registry::new());
        let _first = Module::load(registry.clone(), ChannelBuilder::new()).unwrap();
        assert!(matches!(
            Module::load(registry, ChannelBuilder::new()),
            Err(ChannelError::AlreadyExists(_))
        ));
    }
}
