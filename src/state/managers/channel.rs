//! Channel directory.
//!
//! This module contains the `ChannelManager` struct, which isolates all
//! channel-related state from the main Matrix struct.

use crate::state::Channel;
use crate::state::dashmap_ext::DashMapExt;
use dashmap::DashMap;
use std::sync::Arc;

/// One row of a LIST reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    pub name: String,
    pub visible: usize,
}

/// Tracks every live channel by exact name.
///
/// Channels are created on first join. They outlive their last member
/// unless the server is configured to reclaim them.
pub struct ChannelManager {
    pub channels: DashMap<String, Arc<Channel>>,
}

impl ChannelManager {
    pub fn new() -> Self {
        Self {
            channels: DashMap::new(),
        }
    }

    /// Get an existing channel or create an empty one.
    pub fn get_or_create(&self, name: &str) -> Arc<Channel> {
        let entry = self
            .channels
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(Channel::new(name)));
        Arc::clone(entry.value())
    }

    pub fn get(&self, name: &str) -> Option<Arc<Channel>> {
        self.channels.get_cloned(name)
    }

    /// Drop the channel if it has no members left.
    pub fn reclaim_if_empty(&self, name: &str) -> bool {
        self.channels
            .remove_if(name, |_, channel| channel.is_empty())
            .is_some()
    }

    /// Name and member count of every channel, sorted by name.
    pub fn list(&self) -> Vec<ListEntry> {
        let mut entries: Vec<ListEntry> = self
            .channels
            .iter_cloned()
            .into_iter()
            .map(|(_, channel)| ListEntry {
                name: channel.name().to_string(),
                visible: channel.member_count(),
            })
            .collect();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        entries
    }
}

impl Default for ChannelManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::SessionId;

    #[test]
    fn test_get_or_create_reuses_channel() {
        let channels = ChannelManager::new();
        let a = channels.get_or_create("#x");
        a.join(SessionId::new(2));
        let b = channels.get_or_create("#x");
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(channels.channels.len(), 1);
    }

    #[test]
    fn test_reclaim_only_when_empty() {
        let channels = ChannelManager::new();
        let chan = channels.get_or_create("#x");
        chan.join(SessionId::new(2));
        assert!(!channels.reclaim_if_empty("#x"));

        chan.leave(SessionId::new(2));
        assert!(channels.reclaim_if_empty("#x"));
        assert!(channels.get("#x").is_none());
        assert!(channels.channels.is_empty());
    }

    #[test]
    fn test_list_sorted_with_counts() {
        let channels = ChannelManager::new();
        channels.get_or_create("#zeta").join(SessionId::new(2));
        let alpha = channels.get_or_create("#alpha");
        alpha.join(SessionId::new(2));
        alpha.join(SessionId::new(3));

        let list = channels.list();
        assert_eq!(
            list,
            vec![
                ListEntry { name: "#alpha".into(), visible: 2 },
                ListEntry { name: "#zeta".into(), visible: 1 },
            ]
        );
    }
}
