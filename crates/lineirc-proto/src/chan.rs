//! Channel name utilities.
//!
//! This dialect only knows one kind of channel, introduced by `#`.

/// Leading character that distinguishes a channel name from a nickname.
pub const CHANNEL_SIGIL: char = '#';

/// Extension trait for classifying message targets.
pub trait ChannelExt {
    /// Whether this target is addressed to a channel (starts with the sigil).
    fn is_channel_target(&self) -> bool;

    /// Whether this string can name a channel created by JOIN.
    ///
    /// Valid names start with the sigil, have at least one more character,
    /// and contain no comma, whitespace or control characters.
    fn is_channel_name(&self) -> bool;
}

impl ChannelExt for str {
    fn is_channel_target(&self) -> bool {
        self.starts_with(CHANNEL_SIGIL)
    }

    fn is_channel_name(&self) -> bool {
        let mut chars = self.chars();
        if chars.next() != Some(CHANNEL_SIGIL) {
            return false;
        }

        let rest = chars.as_str();
        !rest.is_empty()
            && !rest
                .chars()
                .any(|c| c == ',' || c.is_whitespace() || c.is_control())
    }
}

impl ChannelExt for String {
    fn is_channel_target(&self) -> bool {
        self.as_str().is_channel_target()
    }

    fn is_channel_name(&self) -> bool {
        self.as_str().is_channel_name()
    }
}
