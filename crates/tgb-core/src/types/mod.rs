//! Bot API records, grouped the way the Bot API documentation groups them.
//!
//! Conventions for every record:
//! - optional fields are `Option<_>` and are omitted when encoding;
//! - arrays are `Vec<_>`, an absent or `null` array decodes to `[]`;
//! - ids are `i64`, timestamps are raw epoch seconds with a `*_time()` accessor.

mod callback;
mod chat;
mod chat_member;
mod commands;
mod games;
mod inline;
mod input_content;
mod input_file;
mod keyboard;
mod media;
mod message;
mod passport;
mod payments;
mod sticker;
mod update;
mod user;

pub use callback::*;
pub use chat::*;
pub use chat_member::*;
pub use commands::*;
pub use games::*;
pub use inline::*;
pub use input_content::*;
pub use input_file::*;
pub use keyboard::*;
pub use media::*;
pub use message::*;
pub use passport::*;
pub use payments::*;
pub use sticker::*;
pub use update::*;
pub use user::*;
