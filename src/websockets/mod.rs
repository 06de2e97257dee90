// Public API
pub use handler::{game_websocket_handler, router};
pub use session::GameSession;
pub use sink::SocketSink;
pub use socket::{SocketError, SocketWrapper};

// Internal modules
mod handler;
mod session;
mod sink;
mod socket;
