//! Connection banner.

use crate::state::{Matrix, PLACEHOLDER_NICK, SessionId};
use lineirc_proto::Reply;

/// Queue the configured banner for a freshly accepted session.
///
/// Each banner line goes out as a server NOTICE addressed to `*`, since
/// the client has no nickname yet.
pub fn send_welcome(matrix: &Matrix, id: SessionId) {
    let server = matrix.server_name();
    for text in &matrix.server_info.welcome {
        matrix.send_to(id, &Reply::notice(server, PLACEHOLDER_NICK, text.as_str()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::testing::Harness;

    #[test]
    fn test_banner_lines_are_notices() {
        let mut h = Harness::new();
        let a = h.connect();
        send_welcome(&h.matrix, a);
        let lines = h.lines(a);
        assert!(!lines.is_empty());
        assert!(lines.iter().all(|l| l.starts_with(":irc.test NOTICE * :")));
    }
}
