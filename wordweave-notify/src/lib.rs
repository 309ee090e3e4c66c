#![deny(missing_docs)]
//! WebSocket subscriber registry and event broadcaster, grounded on
//! `websocket_utils.py`.

mod error;
mod message;
mod notifier;
mod registry;

pub use error::NotifyError;
pub use message::{vocab_word_key, Notification};
pub use notifier::Notifier;
pub use registry::ConnectionRegistry;
