use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use super::{Message, User};

/// Press of an inline keyboard button.
///
/// `message` is set when the button belongs to a message sent by the bot,
/// `inline_message_id` when it was sent via inline mode.
#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CallbackQuery {
    pub id: String,
    pub from: User,
    pub message: Option<Box<Message>>,
    pub inline_message_id: Option<String>,
    pub chat_instance: String,
    pub data: Option<String>,
    pub game_short_name: Option<String>,
}

impl CallbackQuery {
    pub fn is_game(&self) -> bool {
        self.game_short_name.is_some()
    }
}
