use chrono::{DateTime, Utc};
use serde::{de, ser::SerializeMap, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use serde_with::skip_serializing_none;

use crate::decode::{nullable_vec, unix_time};

use super::{
    CallbackQuery, ChatJoinRequest, ChatMemberUpdated, ChosenInlineResult, InlineQuery,
    Message, Poll, PollAnswer, PreCheckoutQuery, ShippingQuery, User,
};

/// Incoming update. At most one payload is present in any given update.
///
/// Payloads this crate has no type for decode to [`UpdateKind::Unknown`], so a
/// `getUpdates` batch always yields every `update_id`.
#[derive(Clone, Debug, PartialEq)]
pub struct Update {
    pub update_id: i64,
    pub kind: UpdateKind,
}

/// The payload of an [`Update`], keyed on the wire by its field name.
#[derive(Clone, Debug, PartialEq)]
pub enum UpdateKind {
    Message(Message),
    EditedMessage(Message),
    ChannelPost(Message),
    EditedChannelPost(Message),
    InlineQuery(InlineQuery),
    ChosenInlineResult(ChosenInlineResult),
    CallbackQuery(CallbackQuery),
    ShippingQuery(ShippingQuery),
    PreCheckoutQuery(PreCheckoutQuery),
    Poll(Poll),
    PollAnswer(PollAnswer),
    MyChatMember(ChatMemberUpdated),
    ChatMember(ChatMemberUpdated),
    ChatJoinRequest(ChatJoinRequest),
    /// Every field except `update_id`, as received. Empty when the update had none.
    Unknown(Map<String, Value>),
}

/// Names accepted in `allowed_updates`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateType {
    Message,
    EditedMessage,
    ChannelPost,
    EditedChannelPost,
    InlineQuery,
    ChosenInlineResult,
    CallbackQuery,
    ShippingQuery,
    PreCheckoutQuery,
    Poll,
    PollAnswer,
    MyChatMember,
    ChatMember,
    ChatJoinRequest,
}

impl UpdateType {
    pub const ALL: [UpdateType; 14] = [
        UpdateType::Message,
        UpdateType::EditedMessage,
        UpdateType::ChannelPost,
        UpdateType::EditedChannelPost,
        UpdateType::InlineQuery,
        UpdateType::ChosenInlineResult,
        UpdateType::CallbackQuery,
        UpdateType::ShippingQuery,
        UpdateType::PreCheckoutQuery,
        UpdateType::Poll,
        UpdateType::PollAnswer,
        UpdateType::MyChatMember,
        UpdateType::ChatMember,
        UpdateType::ChatJoinRequest,
    ];

    /// Field name of the payload in an update.
    pub fn key(self) -> &'static str {
        match self {
            UpdateType::Message => "message",
            UpdateType::EditedMessage => "edited_message",
            UpdateType::ChannelPost => "channel_post",
            UpdateType::EditedChannelPost => "edited_channel_post",
            UpdateType::InlineQuery => "inline_query",
            UpdateType::ChosenInlineResult => "chosen_inline_result",
            UpdateType::CallbackQuery => "callback_query",
            UpdateType::ShippingQuery => "shipping_query",
            UpdateType::PreCheckoutQuery => "pre_checkout_query",
            UpdateType::Poll => "poll",
            UpdateType::PollAnswer => "poll_answer",
            UpdateType::MyChatMember => "my_chat_member",
            UpdateType::ChatMember => "chat_member",
            UpdateType::ChatJoinRequest => "chat_join_request",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.key() == key)
    }
}

impl UpdateKind {
    fn from_payload(kind: UpdateType, payload: Value) -> serde_json::Result<Self> {
        use serde_json::from_value as decode;

        Ok(match kind {
            UpdateType::Message => UpdateKind::Message(decode(payload)?),
            UpdateType::EditedMessage => UpdateKind::EditedMessage(decode(payload)?),
            UpdateType::ChannelPost => UpdateKind::ChannelPost(decode(payload)?),
            UpdateType::EditedChannelPost => UpdateKind::EditedChannelPost(decode(payload)?),
            UpdateType::InlineQuery => UpdateKind::InlineQuery(decode(payload)?),
            UpdateType::ChosenInlineResult => UpdateKind::ChosenInlineResult(decode(payload)?),
            UpdateType::CallbackQuery => UpdateKind::CallbackQuery(decode(payload)?),
            UpdateType::ShippingQuery => UpdateKind::ShippingQuery(decode(payload)?),
            UpdateType::PreCheckoutQuery => UpdateKind::PreCheckoutQuery(decode(payload)?),
            UpdateType::Poll => UpdateKind::Poll(decode(payload)?),
            UpdateType::PollAnswer => UpdateKind::PollAnswer(decode(payload)?),
            UpdateType::MyChatMember => UpdateKind::MyChatMember(decode(payload)?),
            UpdateType::ChatMember => UpdateKind::ChatMember(decode(payload)?),
            UpdateType::ChatJoinRequest => UpdateKind::ChatJoinRequest(decode(payload)?),
        })
    }
}

impl<'de> Deserialize<'de> for Update {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut fields = Map::<String, Value>::deserialize(deserializer)?;
        let update_id = fields
            .remove("update_id")
            .ok_or_else(|| <D::Error as de::Error>::missing_field("update_id"))?;
        let update_id = i64::deserialize(update_id).map_err(<D::Error as de::Error>::custom)?;

        let known = fields.keys().find_map(|k| UpdateType::from_key(k));
        let kind = match known {
            // A known payload that does not match its type is still an error.
            Some(t) => {
                let payload = fields.remove(t.key()).unwrap_or_default();
                UpdateKind::from_payload(t, payload).map_err(<D::Error as de::Error>::custom)?
            }
            None => UpdateKind::Unknown(fields),
        };
        Ok(Update { update_id, kind })
    }
}

impl Serialize for Update {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("update_id", &self.update_id)?;
        let key = self.update_type().map(UpdateType::key);
        match (&self.kind, key) {
            (UpdateKind::Unknown(fields), _) => {
                for (k, v) in fields {
                    map.serialize_entry(k, v)?;
                }
            }
            (
                UpdateKind::Message(m)
                | UpdateKind::EditedMessage(m)
                | UpdateKind::ChannelPost(m)
                | UpdateKind::EditedChannelPost(m),
                Some(k),
            ) => map.serialize_entry(k, m)?,
            (UpdateKind::InlineQuery(q), Some(k)) => map.serialize_entry(k, q)?,
            (UpdateKind::ChosenInlineResult(r), Some(k)) => map.serialize_entry(k, r)?,
            (UpdateKind::CallbackQuery(q), Some(k)) => map.serialize_entry(k, q)?,
            (UpdateKind::ShippingQuery(q), Some(k)) => map.serialize_entry(k, q)?,
            (UpdateKind::PreCheckoutQuery(q), Some(k)) => map.serialize_entry(k, q)?,
            (UpdateKind::Poll(p), Some(k)) => map.serialize_entry(k, p)?,
            (UpdateKind::PollAnswer(a), Some(k)) => map.serialize_entry(k, a)?,
            (UpdateKind::MyChatMember(u) | UpdateKind::ChatMember(u), Some(k)) => {
                map.serialize_entry(k, u)?
            }
            (UpdateKind::ChatJoinRequest(r), Some(k)) => map.serialize_entry(k, r)?,
            (_, None) => {}
        }
        map.end()
    }
}

impl Update {
    /// `None` for payloads this crate has no type for.
    pub fn update_type(&self) -> Option<UpdateType> {
        Some(match &self.kind {
            UpdateKind::Message(_) => UpdateType::Message,
            UpdateKind::EditedMessage(_) => UpdateType::EditedMessage,
            UpdateKind::ChannelPost(_) => UpdateType::ChannelPost,
            UpdateKind::EditedChannelPost(_) => UpdateType::EditedChannelPost,
            UpdateKind::InlineQuery(_) => UpdateType::InlineQuery,
            UpdateKind::ChosenInlineResult(_) => UpdateType::ChosenInlineResult,
            UpdateKind::CallbackQuery(_) => UpdateType::CallbackQuery,
            UpdateKind::ShippingQuery(_) => UpdateType::ShippingQuery,
            UpdateKind::PreCheckoutQuery(_) => UpdateType::PreCheckoutQuery,
            UpdateKind::Poll(_) => UpdateType::Poll,
            UpdateKind::PollAnswer(_) => UpdateType::PollAnswer,
            UpdateKind::MyChatMember(_) => UpdateType::MyChatMember,
            UpdateKind::ChatMember(_) => UpdateType::ChatMember,
            UpdateKind::ChatJoinRequest(_) => UpdateType::ChatJoinRequest,
            UpdateKind::Unknown(_) => return None,
        })
    }

    /// The message of message-like updates, new or edited.
    pub fn message(&self) -> Option<&Message> {
        match &self.kind {
            UpdateKind::Message(m)
            | UpdateKind::EditedMessage(m)
            | UpdateKind::ChannelPost(m)
            | UpdateKind::EditedChannelPost(m) => Some(m),
            UpdateKind::CallbackQuery(q) => q.message.as_deref(),
            _ => None,
        }
    }

    /// The user that caused the update, when there is one.
    pub fn from(&self) -> Option<&User> {
        match &self.kind {
            UpdateKind::Message(m)
            | UpdateKind::EditedMessage(m)
            | UpdateKind::ChannelPost(m)
            | UpdateKind::EditedChannelPost(m) => m.from.as_ref(),
            UpdateKind::InlineQuery(q) => Some(&q.from),
            UpdateKind::ChosenInlineResult(r) => Some(&r.from),
            UpdateKind::CallbackQuery(q) => Some(&q.from),
            UpdateKind::ShippingQuery(q) => Some(&q.from),
            UpdateKind::PreCheckoutQuery(q) => Some(&q.from),
            UpdateKind::Poll(_) | UpdateKind::Unknown(_) => None,
            UpdateKind::PollAnswer(a) => Some(&a.user),
            UpdateKind::MyChatMember(u) | UpdateKind::ChatMember(u) => Some(&u.from),
            UpdateKind::ChatJoinRequest(r) => Some(&r.from),
        }
    }
}

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookInfo {
    /// Empty when no webhook is set.
    pub url: String,
    #[serde(default)]
    pub has_custom_certificate: bool,
    #[serde(default)]
    pub pending_update_count: u32,
    pub ip_address: Option<String>,
    pub last_error_date: Option<i64>,
    pub last_error_message: Option<String>,
    pub last_synchronization_error_date: Option<i64>,
    pub max_connections: Option<u32>,
    #[serde(
        default,
        deserialize_with = "nullable_vec",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub allowed_updates: Vec<UpdateType>,
}

impl WebhookInfo {
    pub fn is_set(&self) -> bool {
        !self.url.is_empty()
    }

    pub fn last_error_time(&self) -> Option<DateTime<Utc>> {
        self.last_error_date.and_then(unix_time)
    }
}
