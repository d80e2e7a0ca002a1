use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::{
    config::ClientConfig,
    decode::{nullable_vec, round_to, unix_time},
};

use super::{MessageEntity, User};

/// Identity fields shared by every downloadable file, embedded by value.
#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileFields {
    /// Usable to download or reuse the file.
    pub file_id: String,
    /// Stable across bots and time, but not usable for downloads.
    pub file_unique_id: String,
    pub file_size: Option<u64>,
}

impl FileFields {
    pub fn new(file_id: impl Into<String>, file_unique_id: impl Into<String>) -> Self {
        Self {
            file_id: file_id.into(),
            file_unique_id: file_unique_id.into(),
            file_size: None,
        }
    }
}

/// One size of a photo, or a file/sticker thumbnail.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhotoSize {
    #[serde(flatten)]
    pub file: FileFields,
    pub width: u32,
    pub height: u32,
}

impl PhotoSize {
    /// Largest size of a photo; Telegram sends them smallest first.
    pub fn largest(sizes: &[PhotoSize]) -> Option<&PhotoSize> {
        sizes
            .iter()
            .max_by_key(|p| u64::from(p.width) * u64::from(p.height))
    }
}

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Audio {
    #[serde(flatten)]
    pub file: FileFields,
    pub duration: u32,
    pub performer: Option<String>,
    pub title: Option<String>,
    pub file_name: Option<String>,
    pub mime_type: Option<String>,
    pub thumb: Option<PhotoSize>,
}

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(flatten)]
    pub file: FileFields,
    pub thumb: Option<PhotoSize>,
    pub file_name: Option<String>,
    pub mime_type: Option<String>,
}

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Video {
    #[serde(flatten)]
    pub file: FileFields,
    pub width: u32,
    pub height: u32,
    pub duration: u32,
    pub thumb: Option<PhotoSize>,
    pub file_name: Option<String>,
    pub mime_type: Option<String>,
}

/// GIF or H.264/MPEG-4 AVC video without sound.
#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Animation {
    #[serde(flatten)]
    pub file: FileFields,
    pub width: u32,
    pub height: u32,
    pub duration: u32,
    pub thumb: Option<PhotoSize>,
    pub file_name: Option<String>,
    pub mime_type: Option<String>,
}

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Voice {
    #[serde(flatten)]
    pub file: FileFields,
    pub duration: u32,
    pub mime_type: Option<String>,
}

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VideoNote {
    #[serde(flatten)]
    pub file: FileFields,
    /// Width and height (video notes are square).
    pub length: u32,
    pub duration: u32,
    pub thumb: Option<PhotoSize>,
}

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub phone_number: String,
    pub first_name: String,
    pub last_name: Option<String>,
    pub user_id: Option<i64>,
    pub vcard: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dice {
    pub emoji: String,
    pub value: u8,
}

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub longitude: f64,
    pub latitude: f64,
    /// Radius of uncertainty in meters, 0-1500.
    pub horizontal_accuracy: Option<f64>,
    pub live_period: Option<u32>,
    pub heading: Option<u16>,
    pub proximity_alert_radius: Option<u32>,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            longitude,
            latitude,
            horizontal_accuracy: None,
            live_period: None,
            heading: None,
            proximity_alert_radius: None,
        }
    }

    pub fn latitude_rounded(&self, places: u32) -> f64 {
        round_to(self.latitude, places)
    }

    pub fn longitude_rounded(&self, places: u32) -> f64 {
        round_to(self.longitude, places)
    }

    pub fn horizontal_accuracy_rounded(&self, places: u32) -> Option<f64> {
        self.horizontal_accuracy.map(|a| round_to(a, places))
    }
}

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    pub location: Location,
    pub title: String,
    pub address: String,
    pub foursquare_id: Option<String>,
    pub foursquare_type: Option<String>,
    pub google_place_id: Option<String>,
    pub google_place_type: Option<String>,
}

/// A file ready to be downloaded, as returned by `getFile`.
#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct File {
    #[serde(flatten)]
    pub file: FileFields,
    pub file_path: Option<String>,
}

impl File {
    /// Link valid for at least one hour after `getFile`.
    pub fn download_url(&self, cfg: &ClientConfig) -> Option<String> {
        self.file_path.as_deref().map(|p| cfg.file_url(p))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PollType {
    Regular,
    Quiz,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollOption {
    pub text: String,
    #[serde(default)]
    pub voter_count: u32,
}

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Poll {
    pub id: String,
    pub question: String,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub options: Vec<PollOption>,
    #[serde(default)]
    pub total_voter_count: u32,
    #[serde(default)]
    pub is_closed: bool,
    #[serde(default)]
    pub is_anonymous: bool,
    #[serde(rename = "type")]
    pub kind: PollType,
    #[serde(default)]
    pub allows_multiple_answers: bool,
    pub correct_option_id: Option<u32>,
    pub explanation: Option<String>,
    #[serde(
        default,
        deserialize_with = "nullable_vec",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub explanation_entities: Vec<MessageEntity>,
    pub open_period: Option<u32>,
    pub close_date: Option<i64>,
}

impl Poll {
    pub fn close_time(&self) -> Option<DateTime<Utc>> {
        self.close_date.and_then(unix_time)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PollAnswer {
    pub poll_id: String,
    pub user: User,
    /// Empty when the user retracted the vote.
    #[serde(default, deserialize_with = "nullable_vec")]
    pub option_ids: Vec<u32>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebAppData {
    pub data: String,
    pub button_text: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProximityAlertTriggered {
    pub traveler: User,
    pub watcher: User,
    pub distance: u32,
}
