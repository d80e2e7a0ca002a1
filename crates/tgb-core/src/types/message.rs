use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::decode::{nullable_vec, unix_time};

use super::{
    Animation, Audio, Chat, Contact, Dice, Document, Game, InlineKeyboardMarkup, Invoice,
    Location, PassportData, PhotoSize, Poll, ProximityAlertTriggered, Sticker,
    SuccessfulPayment, User, Venue, Video, VideoNote, Voice, WebAppData,
};

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub message_thread_id: Option<i64>,
    pub from: Option<User>,
    pub sender_chat: Option<Chat>,
    pub date: i64,
    pub chat: Chat,

    // Forwarding
    pub forward_from: Option<User>,
    pub forward_from_chat: Option<Chat>,
    pub forward_from_message_id: Option<i64>,
    pub forward_signature: Option<String>,
    pub forward_sender_name: Option<String>,
    pub forward_date: Option<i64>,
    pub is_topic_message: Option<bool>,
    pub is_automatic_forward: Option<bool>,
    pub reply_to_message: Option<Box<Message>>,
    pub via_bot: Option<User>,
    pub edit_date: Option<i64>,
    pub has_protected_content: Option<bool>,
    pub media_group_id: Option<String>,
    pub author_signature: Option<String>,

    // Content
    pub text: Option<String>,
    #[serde(
        default,
        deserialize_with = "nullable_vec",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub entities: Vec<MessageEntity>,
    pub animation: Option<Animation>,
    pub audio: Option<Audio>,
    pub document: Option<Document>,
    #[serde(
        default,
        deserialize_with = "nullable_vec",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub photo: Vec<PhotoSize>,
    pub sticker: Option<Sticker>,
    pub video: Option<Video>,
    pub video_note: Option<VideoNote>,
    pub voice: Option<Voice>,
    pub caption: Option<String>,
    #[serde(
        default,
        deserialize_with = "nullable_vec",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub caption_entities: Vec<MessageEntity>,
    pub has_media_spoiler: Option<bool>,
    pub contact: Option<Contact>,
    pub dice: Option<Dice>,
    pub game: Option<Game>,
    pub poll: Option<Poll>,
    pub venue: Option<Venue>,
    pub location: Option<Location>,

    // Service messages
    #[serde(
        default,
        deserialize_with = "nullable_vec",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub new_chat_members: Vec<User>,
    pub left_chat_member: Option<User>,
    pub new_chat_title: Option<String>,
    #[serde(
        default,
        deserialize_with = "nullable_vec",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub new_chat_photo: Vec<PhotoSize>,
    pub delete_chat_photo: Option<bool>,
    pub group_chat_created: Option<bool>,
    pub supergroup_chat_created: Option<bool>,
    pub channel_chat_created: Option<bool>,
    pub migrate_to_chat_id: Option<i64>,
    pub migrate_from_chat_id: Option<i64>,
    pub pinned_message: Option<Box<Message>>,
    pub invoice: Option<Invoice>,
    pub successful_payment: Option<SuccessfulPayment>,
    pub connected_website: Option<String>,
    pub passport_data: Option<PassportData>,
    pub proximity_alert_triggered: Option<ProximityAlertTriggered>,
    pub web_app_data: Option<WebAppData>,
    pub reply_markup: Option<InlineKeyboardMarkup>,
}

impl Message {
    /// Minimal message: id, date and chat; everything else empty.
    pub fn new(message_id: i64, date: i64, chat: Chat) -> Self {
        Self {
            message_id,
            message_thread_id: None,
            from: None,
            sender_chat: None,
            date,
            chat,
            forward_from: None,
            forward_from_chat: None,
            forward_from_message_id: None,
            forward_signature: None,
            forward_sender_name: None,
            forward_date: None,
            is_topic_message: None,
            is_automatic_forward: None,
            reply_to_message: None,
            via_bot: None,
            edit_date: None,
            has_protected_content: None,
            media_group_id: None,
            author_signature: None,
            text: None,
            entities: Vec::new(),
            animation: None,
            audio: None,
            document: None,
            photo: Vec::new(),
            sticker: None,
            video: None,
            video_note: None,
            voice: None,
            caption: None,
            caption_entities: Vec::new(),
            has_media_spoiler: None,
            contact: None,
            dice: None,
            game: None,
            poll: None,
            venue: None,
            location: None,
            new_chat_members: Vec::new(),
            left_chat_member: None,
            new_chat_title: None,
            new_chat_photo: Vec::new(),
            delete_chat_photo: None,
            group_chat_created: None,
            supergroup_chat_created: None,
            channel_chat_created: None,
            migrate_to_chat_id: None,
            migrate_from_chat_id: None,
            pinned_message: None,
            invoice: None,
            successful_payment: None,
            connected_website: None,
            passport_data: None,
            proximity_alert_triggered: None,
            web_app_data: None,
            reply_markup: None,
        }
    }

    pub fn date_time(&self) -> Option<DateTime<Utc>> {
        unix_time(self.date)
    }

    pub fn edit_date_time(&self) -> Option<DateTime<Utc>> {
        self.edit_date.and_then(unix_time)
    }

    pub fn forward_date_time(&self) -> Option<DateTime<Utc>> {
        self.forward_date.and_then(unix_time)
    }

    pub fn is_forwarded(&self) -> bool {
        self.forward_date.is_some()
    }

    /// Text of a text message, caption of a media message.
    pub fn text_or_caption(&self) -> Option<&str> {
        self.text.as_deref().or(self.caption.as_deref())
    }

    /// Entities that apply to `text_or_caption`.
    pub fn entities_or_caption_entities(&self) -> &[MessageEntity] {
        if self.text.is_some() {
            &self.entities
        } else {
            &self.caption_entities
        }
    }

    /// Bot command at the start of the text, without the leading `/` and `@botname`.
    pub fn command(&self) -> Option<&str> {
        let text = self.text.as_deref()?;
        let entity = self
            .entities
            .iter()
            .find(|e| e.kind == MessageEntityType::BotCommand && e.offset == 0)?;
        let raw = entity.extract(text)?;
        let name = raw.strip_prefix('/')?;
        Some(name.split('@').next().unwrap_or(name))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageEntityType {
    Mention,
    Hashtag,
    Cashtag,
    BotCommand,
    Url,
    Email,
    PhoneNumber,
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Spoiler,
    Code,
    Pre,
    TextLink,
    TextMention,
    CustomEmoji,
    /// Entity type added to the Bot API after this crate; the entity is kept, its
    /// type is not. Encodes as `"unknown"`.
    #[serde(other)]
    Unknown,
}

/// A special entity in a text: hashtag, url, formatting, ...
#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MessageEntity {
    #[serde(rename = "type")]
    pub kind: MessageEntityType,
    /// In UTF-16 code units.
    pub offset: usize,
    /// In UTF-16 code units.
    pub length: usize,
    pub url: Option<String>,
    pub user: Option<User>,
    pub language: Option<String>,
    pub custom_emoji_id: Option<String>,
}

impl MessageEntity {
    pub fn new(kind: MessageEntityType, offset: usize, length: usize) -> Self {
        Self {
            kind,
            offset,
            length,
            url: None,
            user: None,
            language: None,
            custom_emoji_id: None,
        }
    }

    /// Slice of `text` covered by this entity. Offsets are UTF-16 based.
    pub fn extract<'a>(&self, text: &'a str) -> Option<&'a str> {
        let mut units = 0usize;
        let mut start = None;
        let end_units = self.offset + self.length;
        for (idx, ch) in text.char_indices() {
            if units == self.offset && start.is_none() {
                start = Some(idx);
            }
            if units == end_units {
                return start.map(|s| &text[s..idx]);
            }
            units += ch.len_utf16();
        }
        if units == end_units {
            let s = start.or((self.offset == units).then_some(text.len()))?;
            return Some(&text[s..]);
        }
        None
    }
}

/// Result of `copyMessage`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageId {
    pub message_id: i64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParseMode {
    #[serde(rename = "HTML")]
    Html,
    #[serde(rename = "Markdown")]
    Markdown,
    #[serde(rename = "MarkdownV2")]
    MarkdownV2,
}

impl ParseMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ParseMode::Html => "HTML",
            ParseMode::Markdown => "Markdown",
            ParseMode::MarkdownV2 => "MarkdownV2",
        }
    }
}

/// Edit endpoints return the edited message, or `true` for inline messages.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageOrTrue {
    Message(Box<Message>),
    True(bool),
}

impl MessageOrTrue {
    pub fn message(&self) -> Option<&Message> {
        match self {
            MessageOrTrue::Message(m) => Some(m),
            MessageOrTrue::True(_) => None,
        }
    }
}
