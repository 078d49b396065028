//! # mm-chat
//!
//! Application state for one MarketMind session: the message stream, the
//! welcome/chat view, the single in-flight flag and the persisted watchlist.
//!
//! A send is two-phase. [`Conversation::begin_send`] appends the user turn and
//! a pending placeholder and hands back what the model needs;
//! [`Conversation::complete`] settles that placeholder by id. While a send is
//! outstanding every other send is rejected. [`Conversation::send`] does both
//! around a [`ModelGateway`] call.

mod conversation;
mod send;

pub use conversation::Conversation;
pub use send::{FAILURE_TEXT, PendingSend, SendOrigin, SendOutcome};

pub use mm_gateway::ModelGateway;
