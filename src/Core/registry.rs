use crate::Core::error::{ChannelError, Result};
use crate::Ring::Buffer::RingChannel;
use crate::Ring::Session;
use crate::Ring::Structs::Buffer_Structs::{AccessMode, Permissions};
use std::collections::HashMap;
use std::sync::Arc;

// Use parking_lot's Mutex for better performance
use parking_lot::Mutex;

/// A named channel published in a `Registry`.
pub struct ChannelEntry {
    pub(crate) name: Arc<str>,
    pub(crate) mode: Permissions,
    pub(crate) channel: Arc<RingChannel>,
}

impl ChannelEntry {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mode(&self) -> Permissions {
        self.mode
    }

    pub fn channel(&self) -> &Arc<RingChannel> {
        &self.channel
    }
}

/// Table of published channel entries, keyed by name.
///
/// Callers reach a channel only through `open`, which checks the entry's
/// permission bits and hands back a fresh `Session`.
#[derive(Default)]
pub struct Registry {
    pub(crate) entries: Mutex<HashMap<String, Arc<ChannelEntry>>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish `channel` under `name` with permission bits `mode`.
    pub fn create_entry(
        &self,
        name: &str,
        mode: Permissions,
        channel: Arc<RingChannel>,
    ) -> Result<Arc<ChannelEntry>> {
        if name.is_empty() || name.contains('/') {
            return Err(ChannelError::InvalidConfig(format!(
                "invalid entry name {name:?}"
            )));
        }

        let mut entries = self.entries.lock();
        if entries.contains_key(name) {
            return Err(ChannelError::AlreadyExists(name.to_string()));
        }

        let entry = Arc::new(ChannelEntry {
            name: Arc::from(name),
            mode,
            channel,
        });
        entries.insert(name.to_string(), entry.clone());
        tracing::info!(entry = name, mode = %format_args!("{:o}", mode.0), "entry created");
        Ok(entry)
    }

    pub fn get_entry(&self, name: &str) -> Option<Arc<ChannelEntry>> {
        self.entries.lock().get(name).cloned()
    }

    /// Unpublish `name`. Sessions already open keep their channel alive
    /// until they are dropped.
    pub fn remove_entry(&self, name: &str) -> Result<()> {
        match self.entries.lock().remove(name) {
            Some(_) => {
                tracing::info!(entry = name, "entry removed");
                Ok(())
            }
            None => Err(ChannelError::NotFound(name.to_string())),
        }
    }

    /// Unpublish `name` only if it still points at `channel`.
    ///
    /// Returns `false` when the name is gone or now belongs to another
    /// channel; that entry is left alone.
    pub fn remove_entry_if(&self, name: &str, channel: &Arc<RingChannel>) -> bool {
        let mut entries = self.entries.lock();
        match entries.get(name) {
            Some(entry) if Arc::ptr_eq(&entry.channel, channel) => {
                entries.remove(name);
                tracing::info!(entry = name, "entry removed");
                true
            }
            _ => false,
        }
    }

    /// Names of all published entries, sorted.
    pub fn entry_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.entries.lock().keys().cloned().collect();
        names.sort();
        names
    }

    /// Open a session on `name` with the requested access.
    pub fn open(&self, name: &str, access: AccessMode) -> Result<Session> {
        let entry = self
            .get_entry(name)
            .ok_or_else(|| ChannelError::NotFound(name.to_string()))?;
        Self::open_entry(&entry, access)
    }

    pub(crate) fn open_entry(entry: &ChannelEntry, access: AccessMode) -> Result<Session> {
        if !entry.mode.allows(access) {
            return Err(ChannelError::PermissionDenied {
                name: entry.name.to_string(),
                access: match access {
                    AccessMode::ReadOnly => "read",
                    AccessMode::WriteOnly => "write",
                    AccessMode::ReadWrite => "read/write",
                },
            });
        }

        Ok(Session::new(entry.name.clone(), entry.channel.clone(), access))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn channel() -> Arc<RingChannel> {
        Arc::new(RingChannel::with_defaults())
    }

    #[test]
    fn create_lookup_remove() {
        let reg = Registry::new();
        reg.create_entry("ouroboros", Permissions::DEFAULT, channel())
            .unwrap();
        assert_eq!(reg.entry_names(), vec!["ouroboros".to_string()]);
        assert!(reg.get_entry("ouroboros").is_some());

        reg.remove_entry("ouroboros").unwrap();
        assert!(reg.get_entry("ouroboros").is_none());
        assert_eq!(
            reg.remove_entry("ouroboros"),
            Err(ChannelError::NotFound("ouroboros".into()))
        );
    }

    #[test]
    fn conditional_remove_spares_other_channel() {
        let reg = Registry::new();
        let old = channel();
        reg.create_entry("ouroboros", Permissions::DEFAULT, old.clone())
            .unwrap();
        reg.remove_entry("ouroboros").unwrap();
        reg.create_entry("ouroboros", Permissions::DEFAULT, channel())
            .unwrap();

        assert!(!reg.remove_entry_if("ouroboros", &old));
        assert!(reg.get_entry("ouroboros").is_some());
        assert!(!reg.remove_entry_if("missing", &old));

        let current = reg.get_entry("ouroboros").unwrap().channel().clone();
        assert!(reg.remove_entry_if("ouroboros", &current));
        assert!(reg.entry_names().is_empty());
    }

    #[test]
    fn duplicate_and_bad_names_rejected() {
        let reg = Registry::new();
        reg.create_entry("a", Permissions::DEFAULT, channel()).unwrap();
        assert!(matches!(
            reg.create_entry("a", Permissions::DEFAULT, channel()),
            Err(ChannelError::AlreadyExists(_))
        ));
        assert!(matches!(
            reg.create_entry("", Permissions::DEFAULT, channel()),
            Err(ChannelError::InvalidConfig(_))
        ));
        assert!(matches!(
            reg.create_entry("a/b", Permissions::DEFAULT, channel()),
            Err(ChannelError::InvalidConfig(_))
        ));
    }

    #[test]
    fn open_checks_mode_bits() {
        let reg = Registry::new();
        reg.create_entry("ro", Permissions(0o444), channel()).unwrap();
        assert!(reg.open("ro", AccessMode::ReadOnly).is_ok());
        assert!(matches!(
            reg.open("ro", AccessMode::WriteOnly),
            Err(ChannelError::PermissionDenied { .. })
        ));
        assert!(matches!(
            reg.open("missing", AccessMode::ReadOnly),
            Err(ChannelError::NotFound(_))
        ));
    }

    #[test]
    fn sessions_share_the_entry_channel() {
        let reg = Registry::new();
        reg.create_entry("ouroboros", Permissions::DEFAULT, channel())
            .unwrap();

        let mut w = reg.open("ouroboros", AccessMode::WriteOnly).unwrap();
        w.write("hola").unwrap();

        let mut r = reg.open("ouroboros", AccessMode::ReadOnly).unwrap();
        assert_eq!(r.read_record().unwrap(), Some(b"hola".to_vec()));
    }
}
