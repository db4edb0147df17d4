//! Input limits configuration.

use serde::Deserialize;

/// Input limits configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LimitsConfig {
    /// Longest accepted inbound line in bytes, terminator excluded.
    /// 0 (the default) disables the cap.
    #[serde(default)]
    pub max_line_bytes: usize,
    /// Drop a channel as soon as its last member leaves. Off by default, so
    /// emptied channels stay listed with zero members.
    #[serde(default)]
    pub reclaim_empty_channels: bool,
}

impl LimitsConfig {
    /// The framer cap, if one is configured.
    pub fn line_cap(&self) -> Option<usize> {
        (self.max_line_bytes > 0).then_some(self.max_line_bytes)
    }
}
