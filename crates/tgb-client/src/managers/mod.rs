//! One manager per group of Bot API methods.
//!
//! Method arguments are the parameters Telegram requires; optional parameters go
//! through [`Call::param`](crate::Call::param).

mod bot;
mod chats;
mod games;
mod inline;
mod messages;
mod passport;
mod payments;
mod stickers;
mod updates;

pub use bot::BotManager;
pub use chats::ChatsManager;
pub use games::GamesManager;
pub use inline::InlineManager;
pub use messages::MessagesManager;
pub use passport::PassportManager;
pub use payments::PaymentsManager;
pub use stickers::{StickerFile, StickersManager};
pub use updates::UpdatesManager;
