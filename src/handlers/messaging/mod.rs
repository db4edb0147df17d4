//! Message relay handlers.

mod privmsg;

pub use privmsg::PrivmsgHandler;
