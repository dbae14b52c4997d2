//! Session and conversation state machine for peerchat
//!
//! This crate holds the client-side core: the session store (who is
//! signed in, with what credential), the peer directory, the
//! conversation cache for the selected peer, and the controller that
//! mediates every transition between them. Network access goes through
//! the `ChatApi` trait from peerchat-api so the whole machine can run
//! against a test double.

pub mod controller;
pub mod conversation;
pub mod directory;
pub mod events;
pub mod session;
pub mod token_store;

mod error;

pub use controller::{ChatController, SendOutcome, StartupStatus};
pub use conversation::ConversationCache;
pub use directory::PeerDirectory;
pub use error::ClientError;
pub use events::StateEvent;
pub use session::SessionStore;
pub use token_store::TokenStore;
