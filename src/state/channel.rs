//! Channel membership.

use dashmap::DashSet;

use super::SessionId;

/// A named channel and its current members.
///
/// Membership is the channel-side half of a two-way relation; the session
/// side lives in [`Session`](super::Session). Handlers and the disconnect
/// path always update both.
#[derive(Debug)]
pub struct Channel {
    name: String,
    members: DashSet<SessionId>,
}

impl Channel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: DashSet::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add a member. Returns false if it was already present.
    pub fn join(&self, id: SessionId) -> bool {
        self.members.insert(id)
    }

    /// Remove a member. Returns false if it was not present.
    pub fn leave(&self, id: SessionId) -> bool {
        self.members.remove(&id).is_some()
    }

    #[cfg(test)]
    pub fn contains(&self, id: SessionId) -> bool {
        self.members.contains(&id)
    }

    /// Snapshot of current members, in id order.
    pub fn members(&self) -> Vec<SessionId> {
        let mut members: Vec<SessionId> = self.members.iter().map(|m| *m).collect();
        members.sort_unstable();
        members
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
