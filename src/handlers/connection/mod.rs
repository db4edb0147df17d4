//! Connection handlers.
//!
//! Handles NICK, PING, PONG, QUIT commands and the connect banner.

mod nick;
mod ping;
mod quit;
mod welcome;

pub use nick::NickHandler;
pub use ping::{PingHandler, PongHandler};
pub use quit::QuitHandler;
pub use welcome::send_welcome;
