//! Telegram Bot API client.
//!
//! Every endpoint is reached through a manager (`client.games()`, `client.payments()`,
//! ...) whose methods return a [`Call`]. A call is sent once, over a pluggable
//! [`Transport`]; [`HttpTransport`] is the `reqwest` implementation.

pub mod api;
pub mod managers;
pub mod params;
pub mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use api::{ApiClient, Call, Reply, ReturnFormat};
pub use managers::*;
pub use params::Params;
pub use transport::{ApiRequest, HttpTransport, Transport, Verb};
