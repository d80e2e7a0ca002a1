//! Inline mode: incoming queries and the results a bot answers them with.

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::decode::nullable_vec;

use super::{InlineKeyboardMarkup, InputMessageContent, Location, MessageEntity, ParseMode, User};

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InlineQuery {
    pub id: String,
    pub from: User,
    pub query: String,
    pub offset: String,
    /// `sender`, `private`, `group`, `supergroup` or `channel`.
    pub chat_type: Option<String>,
    pub location: Option<Location>,
}

/// Result chosen by a user; needs inline feedback enabled in @BotFather.
#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChosenInlineResult {
    pub result_id: String,
    pub from: User,
    pub location: Option<Location>,
    pub inline_message_id: Option<String>,
    pub query: String,
}

#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentWebAppMessage {
    pub inline_message_id: Option<String>,
}

/// One result of an inline query, tagged by `type`.
///
/// Media kinds come in two shapes: a file already stored on Telegram (`<kind>_file_id`)
/// or a URL. The shape is picked from the presence of the file id key.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InlineQueryResult {
    Article(InlineQueryResultArticle),
    Photo(InlineQueryResultPhoto),
    Gif(InlineQueryResultGif),
    Mpeg4Gif(InlineQueryResultMpeg4Gif),
    Video(InlineQueryResultVideo),
    Audio(InlineQueryResultAudio),
    Voice(InlineQueryResultVoice),
    Document(InlineQueryResultDocument),
    Location(InlineQueryResultLocation),
    Venue(InlineQueryResultVenue),
    Contact(InlineQueryResultContact),
    Game(InlineQueryResultGame),
    Sticker(InlineQueryResultCachedSticker),
}

impl InlineQueryResult {
    pub fn id(&self) -> &str {
        match self {
            InlineQueryResult::Article(r) => &r.id,
            InlineQueryResult::Photo(InlineQueryResultPhoto::Cached(r)) => &r.id,
            InlineQueryResult::Photo(InlineQueryResultPhoto::Url(r)) => &r.id,
            InlineQueryResult::Gif(InlineQueryResultGif::Cached(r)) => &r.id,
            InlineQueryResult::Gif(InlineQueryResultGif::Url(r)) => &r.id,
            InlineQueryResult::Mpeg4Gif(InlineQueryResultMpeg4Gif::Cached(r)) => &r.id,
            InlineQueryResult::Mpeg4Gif(InlineQueryResultMpeg4Gif::Url(r)) => &r.id,
            InlineQueryResult::Video(InlineQueryResultVideo::Cached(r)) => &r.id,
            InlineQueryResult::Video(InlineQueryResultVideo::Url(r)) => &r.id,
            InlineQueryResult::Audio(InlineQueryResultAudio::Cached(r)) => &r.id,
            InlineQueryResult::Audio(InlineQueryResultAudio::Url(r)) => &r.id,
            InlineQueryResult::Voice(InlineQueryResultVoice::Cached(r)) => &r.id,
            InlineQueryResult::Voice(InlineQueryResultVoice::Url(r)) => &r.id,
            InlineQueryResult::Document(InlineQueryResultDocument::Cached(r)) => &r.id,
            InlineQueryResult::Document(InlineQueryResultDocument::Url(r)) => &r.id,
            InlineQueryResult::Location(r) => &r.id,
            InlineQueryResult::Venue(r) => &r.id,
            InlineQueryResult::Contact(r) => &r.id,
            InlineQueryResult::Game(r) => &r.id,
            InlineQueryResult::Sticker(r) => &r.id,
        }
    }

    /// Whether the result points at a file stored on Telegram servers.
    pub fn is_cached(&self) -> bool {
        matches!(
            self,
            InlineQueryResult::Photo(InlineQueryResultPhoto::Cached(_))
                | InlineQueryResult::Gif(InlineQueryResultGif::Cached(_))
                | InlineQueryResult::Mpeg4Gif(InlineQueryResultMpeg4Gif::Cached(_))
                | InlineQueryResult::Video(InlineQueryResultVideo::Cached(_))
                | InlineQueryResult::Audio(InlineQueryResultAudio::Cached(_))
                | InlineQueryResult::Voice(InlineQueryResultVoice::Cached(_))
                | InlineQueryResult::Document(InlineQueryResultDocument::Cached(_))
                | InlineQueryResult::Sticker(_)
        )
    }
}

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InlineQueryResultArticle {
    pub id: String,
    pub title: String,
    pub input_message_content: InputMessageContent,
    pub reply_markup: Option<InlineKeyboardMarkup>,
    pub url: Option<String>,
    pub hide_url: Option<bool>,
    pub description: Option<String>,
    pub thumb_url: Option<String>,
    pub thumb_width: Option<u32>,
    pub thumb_height: Option<u32>,
}

impl InlineQueryResultArticle {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<InputMessageContent>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            input_message_content: content.into(),
            reply_markup: None,
            url: None,
            hide_url: None,
            description: None,
            thumb_url: None,
            thumb_width: None,
            thumb_height: None,
        }
    }
}

// Photo

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InlineQueryResultPhoto {
    Cached(InlineQueryResultCachedPhoto),
    Url(InlineQueryResultPhotoUrl),
}

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InlineQueryResultPhotoUrl {
    pub id: String,
    /// JPEG, at most 5 MB.
    pub photo_url: String,
    pub thumb_url: String,
    pub photo_width: Option<u32>,
    pub photo_height: Option<u32>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub caption: Option<String>,
    pub parse_mode: Option<ParseMode>,
    #[serde(
        default,
        deserialize_with = "nullable_vec",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub caption_entities: Vec<MessageEntity>,
    pub reply_markup: Option<InlineKeyboardMarkup>,
    pub input_message_content: Option<InputMessageContent>,
}

impl InlineQueryResultPhotoUrl {
    pub fn new(
        id: impl Into<String>,
        photo_url: impl Into<String>,
        thumb_url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            photo_url: photo_url.into(),
            thumb_url: thumb_url.into(),
            photo_width: None,
            photo_height: None,
            title: None,
            description: None,
            caption: None,
            parse_mode: None,
            caption_entities: Vec::new(),
            reply_markup: None,
            input_message_content: None,
        }
    }
}

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InlineQueryResultCachedPhoto {
    pub id: String,
    pub photo_file_id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub caption: Option<String>,
    pub parse_mode: Option<ParseMode>,
    #[serde(
        default,
        deserialize_with = "nullable_vec",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub caption_entities: Vec<MessageEntity>,
    pub reply_markup: Option<InlineKeyboardMarkup>,
    pub input_message_content: Option<InputMessageContent>,
}

impl InlineQueryResultCachedPhoto {
    pub fn new(id: impl Into<String>, photo_file_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            photo_file_id: photo_file_id.into(),
            title: None,
            description: None,
            caption: None,
            parse_mode: None,
            caption_entities: Vec::new(),
            reply_markup: None,
            input_message_content: None,
        }
    }
}

// GIF

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InlineQueryResultGif {
    Cached(InlineQueryResultCachedGif),
    Url(InlineQueryResultGifUrl),
}

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InlineQueryResultGifUrl {
    pub id: String,
    pub gif_url: String,
    pub gif_width: Option<u32>,
    pub gif_height: Option<u32>,
    pub gif_duration: Option<u32>,
    pub thumb_url: String,
    /// `image/jpeg`, `image/gif` or `video/mp4`.
    pub thumb_mime_type: Option<String>,
    pub title: Option<String>,
    pub caption: Option<String>,
    pub parse_mode: Option<ParseMode>,
    #[serde(
        default,
        deserialize_with = "nullable_vec",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub caption_entities: Vec<MessageEntity>,
    pub reply_markup: Option<InlineKeyboardMarkup>,
    pub input_message_content: Option<InputMessageContent>,
}

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InlineQueryResultCachedGif {
    pub id: String,
    pub gif_file_id: String,
    pub title: Option<String>,
    pub caption: Option<String>,
    pub parse_mode: Option<ParseMode>,
    #[serde(
        default,
        deserialize_with = "nullable_vec",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub caption_entities: Vec<MessageEntity>,
    pub reply_markup: Option<InlineKeyboardMarkup>,
    pub input_message_content: Option<InputMessageContent>,
}

// MPEG-4 GIF

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InlineQueryResultMpeg4Gif {
    Cached(InlineQueryResultCachedMpeg4Gif),
    Url(InlineQueryResultMpeg4GifUrl),
}

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InlineQueryResultMpeg4GifUrl {
    pub id: String,
    pub mpeg4_url: String,
    pub mpeg4_width: Option<u32>,
    pub mpeg4_height: Option<u32>,
    pub mpeg4_duration: Option<u32>,
    pub thumb_url: String,
    pub thumb_mime_type: Option<String>,
    pub title: Option<String>,
    pub caption: Option<String>,
    pub parse_mode: Option<ParseMode>,
    #[serde(
        default,
        deserialize_with = "nullable_vec",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub caption_entities: Vec<MessageEntity>,
    pub reply_markup: Option<InlineKeyboardMarkup>,
    pub input_message_content: Option<InputMessageContent>,
}

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InlineQueryResultCachedMpeg4Gif {
    pub id: String,
    pub mpeg4_file_id: String,
    pub title: Option<String>,
    pub caption: Option<String>,
    pub parse_mode: Option<ParseMode>,
    #[serde(
        default,
        deserialize_with = "nullable_vec",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub caption_entities: Vec<MessageEntity>,
    pub reply_markup: Option<InlineKeyboardMarkup>,
    pub input_message_content: Option<InputMessageContent>,
}

// Video

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InlineQueryResultVideo {
    Cached(InlineQueryResultCachedVideo),
    Url(InlineQueryResultVideoUrl),
}

/// An embedded page (e.g. YouTube) needs `input_message_content` replacing the video.
#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InlineQueryResultVideoUrl {
    pub id: String,
    pub video_url: String,
    /// `text/html` or `video/mp4`.
    pub mime_type: String,
    pub thumb_url: String,
    pub title: String,
    pub caption: Option<String>,
    pub parse_mode: Option<ParseMode>,
    #[serde(
        default,
        deserialize_with = "nullable_vec",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub caption_entities: Vec<MessageEntity>,
    pub video_width: Option<u32>,
    pub video_height: Option<u32>,
    pub video_duration: Option<u32>,
    pub description: Option<String>,
    pub reply_markup: Option<InlineKeyboardMarkup>,
    pub input_message_content: Option<InputMessageContent>,
}

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InlineQueryResultCachedVideo {
    pub id: String,
    pub video_file_id: String,
    pub title: String,
    pub description: Option<String>,
    pub caption: Option<String>,
    pub parse_mode: Option<ParseMode>,
    #[serde(
        default,
        deserialize_with = "nullable_vec",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub caption_entities: Vec<MessageEntity>,
    pub reply_markup: Option<InlineKeyboardMarkup>,
    pub input_message_content: Option<InputMessageContent>,
}

// Audio

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InlineQueryResultAudio {
    Cached(InlineQueryResultCachedAudio),
    Url(InlineQueryResultAudioUrl),
}

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InlineQueryResultAudioUrl {
    pub id: String,
    pub audio_url: String,
    pub title: String,
    pub caption: Option<String>,
    pub parse_mode: Option<ParseMode>,
    #[serde(
        default,
        deserialize_with = "nullable_vec",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub caption_entities: Vec<MessageEntity>,
    pub performer: Option<String>,
    pub audio_duration: Option<u32>,
    pub reply_markup: Option<InlineKeyboardMarkup>,
    pub input_message_content: Option<InputMessageContent>,
}

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InlineQueryResultCachedAudio {
    pub id: String,
    pub audio_file_id: String,
    pub caption: Option<String>,
    pub parse_mode: Option<ParseMode>,
    #[serde(
        default,
        deserialize_with = "nullable_vec",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub caption_entities: Vec<MessageEntity>,
    pub reply_markup: Option<InlineKeyboardMarkup>,
    pub input_message_content: Option<InputMessageContent>,
}

// Voice

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InlineQueryResultVoice {
    Cached(InlineQueryResultCachedVoice),
    Url(InlineQueryResultVoiceUrl),
}

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InlineQueryResultVoiceUrl {
    pub id: String,
    /// OGG encoded with OPUS.
    pub voice_url: String,
    pub title: String,
    pub caption: Option<String>,
    pub parse_mode: Option<ParseMode>,
    #[serde(
        default,
        deserialize_with = "nullable_vec",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub caption_entities: Vec<MessageEntity>,
    pub voice_duration: Option<u32>,
    pub reply_markup: Option<InlineKeyboardMarkup>,
    pub input_message_content: Option<InputMessageContent>,
}

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InlineQueryResultCachedVoice {
    pub id: String,
    pub voice_file_id: String,
    pub title: String,
    pub caption: Option<String>,
    pub parse_mode: Option<ParseMode>,
    #[serde(
        default,
        deserialize_with = "nullable_vec",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub caption_entities: Vec<MessageEntity>,
    pub reply_markup: Option<InlineKeyboardMarkup>,
    pub input_message_content: Option<InputMessageContent>,
}

// Document

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InlineQueryResultDocument {
    Cached(InlineQueryResultCachedDocument),
    Url(InlineQueryResultDocumentUrl),
}

/// Only `.PDF` and `.ZIP` can be sent by URL.
#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InlineQueryResultDocumentUrl {
    pub id: String,
    pub title: String,
    pub caption: Option<String>,
    pub parse_mode: Option<ParseMode>,
    #[serde(
        default,
        deserialize_with = "nullable_vec",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub caption_entities: Vec<MessageEntity>,
    pub document_url: String,
    /// `application/pdf` or `application/zip`.
    pub mime_type: String,
    pub description: Option<String>,
    pub reply_markup: Option<InlineKeyboardMarkup>,
    pub input_message_content: Option<InputMessageContent>,
    pub thumb_url: Option<String>,
    pub thumb_width: Option<u32>,
    pub thumb_height: Option<u32>,
}

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InlineQueryResultCachedDocument {
    pub id: String,
    pub title: String,
    pub document_file_id: String,
    pub description: Option<String>,
    pub caption: Option<String>,
    pub parse_mode: Option<ParseMode>,
    #[serde(
        default,
        deserialize_with = "nullable_vec",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub caption_entities: Vec<MessageEntity>,
    pub reply_markup: Option<InlineKeyboardMarkup>,
    pub input_message_content: Option<InputMessageContent>,
}

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InlineQueryResultLocation {
    pub id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub title: String,
    pub horizontal_accuracy: Option<f64>,
    pub live_period: Option<u32>,
    pub heading: Option<u16>,
    pub proximity_alert_radius: Option<u32>,
    pub reply_markup: Option<InlineKeyboardMarkup>,
    pub input_message_content: Option<InputMessageContent>,
    pub thumb_url: Option<String>,
    pub thumb_width: Option<u32>,
    pub thumb_height: Option<u32>,
}

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InlineQueryResultVenue {
    pub id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub title: String,
    pub address: String,
    pub foursquare_id: Option<String>,
    pub foursquare_type: Option<String>,
    pub google_place_id: Option<String>,
    pub google_place_type: Option<String>,
    pub reply_markup: Option<InlineKeyboardMarkup>,
    pub input_message_content: Option<InputMessageContent>,
    pub thumb_url: Option<String>,
    pub thumb_width: Option<u32>,
    pub thumb_height: Option<u32>,
}

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InlineQueryResultContact {
    pub id: String,
    pub phone_number: String,
    pub first_name: String,
    pub last_name: Option<String>,
    pub vcard: Option<String>,
    pub reply_markup: Option<InlineKeyboardMarkup>,
    pub input_message_content: Option<InputMessageContent>,
    pub thumb_url: Option<String>,
    pub thumb_width: Option<u32>,
    pub thumb_height: Option<u32>,
}

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InlineQueryResultGame {
    pub id: String,
    pub game_short_name: String,
    pub reply_markup: Option<InlineKeyboardMarkup>,
}

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InlineQueryResultCachedSticker {
    pub id: String,
    pub sticker_file_id: String,
    pub reply_markup: Option<InlineKeyboardMarkup>,
    pub input_message_content: Option<InputMessageContent>,
}
