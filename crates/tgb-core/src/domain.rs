use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{Chat, User};

/// Target chat of a request: numeric id or `@channelusername`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChatId {
    Id(i64),
    Username(String),
}

impl From<i64> for ChatId {
    fn from(id: i64) -> Self {
        ChatId::Id(id)
    }
}

impl From<&str> for ChatId {
    fn from(username: &str) -> Self {
        ChatId::Username(username.to_string())
    }
}

impl From<String> for ChatId {
    fn from(username: String) -> Self {
        ChatId::Username(username)
    }
}

impl From<&Chat> for ChatId {
    fn from(chat: &Chat) -> Self {
        ChatId::Id(chat.id)
    }
}

/// Private chats share the user's id.
impl From<&User> for ChatId {
    fn from(user: &User) -> Self {
        ChatId::Id(user.id)
    }
}

impl From<UserId> for ChatId {
    fn from(user: UserId) -> Self {
        ChatId::Id(user.0)
    }
}

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatId::Id(id) => write!(f, "{id}"),
            ChatId::Username(name) => f.write_str(name),
        }
    }
}

/// Telegram user id (numeric).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        UserId(id)
    }
}

impl From<&User> for UserId {
    fn from(user: &User) -> Self {
        UserId(user.id)
    }
}

/// Message addressed either by chat + id or by the id of an inline message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MessageTarget {
    Chat { chat_id: ChatId, message_id: i64 },
    Inline(String),
}

impl MessageTarget {
    pub fn chat(chat_id: impl Into<ChatId>, message_id: i64) -> Self {
        MessageTarget::Chat {
            chat_id: chat_id.into(),
            message_id,
        }
    }

    pub fn inline(inline_message_id: impl Into<String>) -> Self {
        MessageTarget::Inline(inline_message_id.into())
    }
}
