use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::decode::unix_time;

use super::{Chat, ChatAdministratorRights, ChatInviteLink, User};

/// Membership of a user in a chat, selected by the wire `status` field.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum ChatMember {
    #[serde(rename = "creator")]
    Owner(ChatMemberOwner),
    #[serde(rename = "administrator")]
    Administrator(ChatMemberAdministrator),
    #[serde(rename = "member")]
    Member(ChatMemberMember),
    #[serde(rename = "restricted")]
    Restricted(ChatMemberRestricted),
    #[serde(rename = "left")]
    Left(ChatMemberLeft),
    #[serde(rename = "kicked")]
    Banned(ChatMemberBanned),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChatMemberStatus {
    Owner,
    Administrator,
    Member,
    Restricted,
    Left,
    Banned,
}

impl ChatMemberStatus {
    pub fn as_wire_str(self) -> &'static str {
        match self {
            ChatMemberStatus::Owner => "creator",
            ChatMemberStatus::Administrator => "administrator",
            ChatMemberStatus::Member => "member",
            ChatMemberStatus::Restricted => "restricted",
            ChatMemberStatus::Left => "left",
            ChatMemberStatus::Banned => "kicked",
        }
    }
}

impl ChatMember {
    pub fn user(&self) -> &User {
        match self {
            ChatMember::Owner(m) => &m.user,
            ChatMember::Administrator(m) => &m.user,
            ChatMember::Member(m) => &m.user,
            ChatMember::Restricted(m) => &m.user,
            ChatMember::Left(m) => &m.user,
            ChatMember::Banned(m) => &m.user,
        }
    }

    pub fn status(&self) -> ChatMemberStatus {
        match self {
            ChatMember::Owner(_) => ChatMemberStatus::Owner,
            ChatMember::Administrator(_) => ChatMemberStatus::Administrator,
            ChatMember::Member(_) => ChatMemberStatus::Member,
            ChatMember::Restricted(_) => ChatMemberStatus::Restricted,
            ChatMember::Left(_) => ChatMemberStatus::Left,
            ChatMember::Banned(_) => ChatMemberStatus::Banned,
        }
    }

    /// Whether the user currently belongs to the chat.
    pub fn is_member(&self) -> bool {
        match self {
            ChatMember::Owner(_) | ChatMember::Administrator(_) | ChatMember::Member(_) => true,
            ChatMember::Restricted(m) => m.is_member,
            ChatMember::Left(_) | ChatMember::Banned(_) => false,
        }
    }

    pub fn is_privileged(&self) -> bool {
        matches!(self, ChatMember::Owner(_) | ChatMember::Administrator(_))
    }

    pub fn custom_title(&self) -> Option<&str> {
        match self {
            ChatMember::Owner(m) => m.custom_title.as_deref(),
            ChatMember::Administrator(m) => m.custom_title.as_deref(),
            _ => None,
        }
    }
}

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatMemberOwner {
    pub user: User,
    #[serde(default)]
    pub is_anonymous: bool,
    pub custom_title: Option<String>,
}

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatMemberAdministrator {
    pub user: User,
    #[serde(default)]
    pub can_be_edited: bool,
    #[serde(flatten)]
    pub rights: ChatAdministratorRights,
    pub custom_title: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatMemberMember {
    pub user: User,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatMemberRestricted {
    pub user: User,
    #[serde(default)]
    pub is_member: bool,
    #[serde(default)]
    pub can_send_messages: bool,
    #[serde(default)]
    pub can_send_media_messages: bool,
    #[serde(default)]
    pub can_send_polls: bool,
    #[serde(default)]
    pub can_send_other_messages: bool,
    #[serde(default)]
    pub can_add_web_page_previews: bool,
    #[serde(default)]
    pub can_change_info: bool,
    #[serde(default)]
    pub can_invite_users: bool,
    #[serde(default)]
    pub can_pin_messages: bool,
    #[serde(default)]
    pub can_manage_topics: bool,
    /// 0 means restricted forever.
    #[serde(default)]
    pub until_date: i64,
}

impl ChatMemberRestricted {
    pub fn until_time(&self) -> Option<DateTime<Utc>> {
        (self.until_date > 0).then(|| unix_time(self.until_date)).flatten()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatMemberLeft {
    pub user: User,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatMemberBanned {
    pub user: User,
    /// 0 means banned forever.
    #[serde(default)]
    pub until_date: i64,
}

impl ChatMemberBanned {
    pub fn until_time(&self) -> Option<DateTime<Utc>> {
        (self.until_date > 0).then(|| unix_time(self.until_date)).flatten()
    }
}

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatMemberUpdated {
    pub chat: Chat,
    pub from: User,
    pub date: i64,
    pub old_chat_member: ChatMember,
    pub new_chat_member: ChatMember,
    pub invite_link: Option<ChatInviteLink>,
}

impl ChatMemberUpdated {
    pub fn date_time(&self) -> Option<DateTime<Utc>> {
        unix_time(self.date)
    }
}
