use tgb_core::{
    domain::{ChatId, UserId},
    types::{File, InputFile, Message, Sticker, StickerSet},
};

use crate::api::{ApiClient, Call};

/// Sticker file for a set, by format. Exactly one is sent per request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StickerFile {
    /// PNG, one side exactly 512 px.
    Png(InputFile),
    /// Animated TGS.
    Tgs(InputFile),
    /// Video WEBM.
    Webm(InputFile),
}

impl StickerFile {
    pub fn field_name(&self) -> &'static str {
        match self {
            StickerFile::Png(_) => "png_sticker",
            StickerFile::Tgs(_) => "tgs_sticker",
            StickerFile::Webm(_) => "webm_sticker",
        }
    }

    fn into_file(self) -> InputFile {
        match self {
            StickerFile::Png(f) | StickerFile::Tgs(f) | StickerFile::Webm(f) => f,
        }
    }
}

#[derive(Clone, Debug)]
pub struct StickersManager {
    client: ApiClient,
}

impl StickersManager {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn send_sticker(&self, chat_id: impl Into<ChatId>, sticker: InputFile) -> Call<Message> {
        self.client
            .post("sendSticker")
            .arg("chat_id", chat_id.into())
            .attach("sticker", sticker)
    }

    pub fn get_sticker_set(&self, name: impl Into<String>) -> Call<StickerSet> {
        self.client.get("getStickerSet").arg("name", name.into())
    }

    pub fn get_custom_emoji_stickers(&self, custom_emoji_ids: Vec<String>) -> Call<Vec<Sticker>> {
        self.client
            .post("getCustomEmojiStickers")
            .arg("custom_emoji_ids", custom_emoji_ids)
    }

    /// PNG to reuse later in `createNewStickerSet` / `addStickerToSet`.
    pub fn upload_sticker_file(
        &self,
        user_id: impl Into<UserId>,
        png_sticker: InputFile,
    ) -> Call<File> {
        self.client
            .post("uploadStickerFile")
            .arg("user_id", user_id.into())
            .attach("png_sticker", png_sticker)
    }

    /// `name` must end in `_by_<bot_username>`.
    /// Optional: `sticker_type`, `mask_position`.
    pub fn create_new_sticker_set(
        &self,
        user_id: impl Into<UserId>,
        name: impl Into<String>,
        title: impl Into<String>,
        emojis: impl Into<String>,
        sticker: StickerFile,
    ) -> Call<bool> {
        let field = sticker.field_name();
        self.client
            .post("createNewStickerSet")
            .arg("user_id", user_id.into())
            .arg("name", name.into())
            .arg("title", title.into())
            .arg("emojis", emojis.into())
            .attach(field, sticker.into_file())
    }

    pub fn add_sticker_to_set(
        &self,
        user_id: impl Into<UserId>,
        name: impl Into<String>,
        emojis: impl Into<String>,
        sticker: StickerFile,
    ) -> Call<bool> {
        let field = sticker.field_name();
        self.client
            .post("addStickerToSet")
            .arg("user_id", user_id.into())
            .arg("name", name.into())
            .arg("emojis", emojis.into())
            .attach(field, sticker.into_file())
    }

    /// `position` is zero-based.
    pub fn set_sticker_position_in_set(
        &self,
        sticker: impl Into<String>,
        position: u32,
    ) -> Call<bool> {
        self.client
            .post("setStickerPositionInSet")
            .arg("sticker", sticker.into())
            .arg("position", position)
    }

    pub fn delete_sticker_from_set(&self, sticker: impl Into<String>) -> Call<bool> {
        self.client
            .post("deleteStickerFromSet")
            .arg("sticker", sticker.into())
    }

    /// Without `thumb` the first sticker becomes the thumbnail.
    pub fn set_sticker_set_thumb(
        &self,
        name: impl Into<String>,
        user_id: impl Into<UserId>,
        thumb: Option<InputFile>,
    ) -> Call<bool> {
        let call = self
            .client
            .post("setStickerSetThumb")
            .arg("name", name.into())
            .arg("user_id", user_id.into());
        match thumb {
            Some(file) => call.attach("thumb", file),
            None => call,
        }
    }
}
