use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::decode::{nullable_vec, round_to};

use super::{File, FileFields, PhotoSize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StickerType {
    #[default]
    Regular,
    Mask,
    CustomEmoji,
}

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sticker {
    #[serde(flatten)]
    pub file: FileFields,
    #[serde(rename = "type", default)]
    pub kind: StickerType,
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub is_animated: bool,
    #[serde(default)]
    pub is_video: bool,
    pub thumb: Option<PhotoSize>,
    pub emoji: Option<String>,
    pub set_name: Option<String>,
    pub premium_animation: Option<File>,
    pub mask_position: Option<MaskPosition>,
    pub custom_emoji_id: Option<String>,
}

impl Sticker {
    /// `.tgs`, `.webm` or `.webp`, following the animation flags.
    pub fn format(&self) -> StickerFormat {
        if self.is_animated {
            StickerFormat::Animated
        } else if self.is_video {
            StickerFormat::Video
        } else {
            StickerFormat::Static
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StickerFormat {
    Static,
    Animated,
    Video,
}

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StickerSet {
    pub name: String,
    pub title: String,
    #[serde(default)]
    pub sticker_type: StickerType,
    #[serde(default)]
    pub is_animated: bool,
    #[serde(default)]
    pub is_video: bool,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub stickers: Vec<Sticker>,
    pub thumb: Option<PhotoSize>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaskPoint {
    Forehead,
    Eyes,
    Mouth,
    Chin,
}

/// Where a mask is placed on faces by default.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MaskPosition {
    pub point: MaskPoint,
    /// Shift by X-axis measured in widths of the mask scaled to the face size.
    pub x_shift: f64,
    pub y_shift: f64,
    pub scale: f64,
}

impl MaskPosition {
    pub fn new(point: MaskPoint, x_shift: f64, y_shift: f64, scale: f64) -> Self {
        Self {
            point,
            x_shift,
            y_shift,
            scale,
        }
    }

    pub fn x_shift_rounded(&self, places: u32) -> f64 {
        round_to(self.x_shift, places)
    }

    pub fn y_shift_rounded(&self, places: u32) -> f64 {
        round_to(self.y_shift, places)
    }

    pub fn scale_rounded(&self, places: u32) -> f64 {
        round_to(self.scale, places)
    }
}
