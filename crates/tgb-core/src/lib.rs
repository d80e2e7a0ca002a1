//! Typed model layer for the Telegram Bot API.
//!
//! Everything here is transport-agnostic: the records decode from / encode to
//! `serde_json::Value`, and the HTTP side lives in `tgb-client`.

pub mod config;
pub mod decode;
pub mod domain;
pub mod errors;
pub mod logging;
pub mod response;
pub mod types;

pub use decode::TelegramType;
pub use errors::{Error, Result};
