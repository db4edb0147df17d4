//! Default values for serde deserialization.

use std::net::{Ipv4Addr, SocketAddr};

// =============================================================================
// Server Defaults
// =============================================================================

pub fn default_server_name() -> String {
    "irc.server".to_string()
}

pub fn default_welcome() -> Vec<String> {
    vec![
        "Welcome to lineircd!".to_string(),
        "Pick a nickname first: NICK <nickname>".to_string(),
        "Type HELP to see the available commands.".to_string(),
    ]
}

// =============================================================================
// Listen Defaults
// =============================================================================

pub fn default_listen_address() -> SocketAddr {
    SocketAddr::from((Ipv4Addr::UNSPECIFIED, 6667))
}
