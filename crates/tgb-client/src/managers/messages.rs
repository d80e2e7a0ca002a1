use tgb_core::{
    domain::{ChatId, MessageTarget, UserId},
    types::{File, InlineKeyboardMarkup, Message, MessageId, MessageOrTrue, UserProfilePhotos},
};

use crate::api::{ApiClient, Call};

/// Sending, editing and deleting messages, plus file lookups.
#[derive(Clone, Debug)]
pub struct MessagesManager {
    client: ApiClient,
}

impl MessagesManager {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Optional: `parse_mode`, `entities`, `disable_web_page_preview`,
    /// `disable_notification`, `protect_content`, `reply_to_message_id`, `reply_markup`.
    pub fn send_message(
        &self,
        chat_id: impl Into<ChatId>,
        text: impl Into<String>,
    ) -> Call<Message> {
        self.client
            .post("sendMessage")
            .arg("chat_id", chat_id.into())
            .arg("text", text.into())
    }

    pub fn forward_message(
        &self,
        chat_id: impl Into<ChatId>,
        from_chat_id: impl Into<ChatId>,
        message_id: i64,
    ) -> Call<Message> {
        self.client
            .post("forwardMessage")
            .arg("chat_id", chat_id.into())
            .arg("from_chat_id", from_chat_id.into())
            .arg("message_id", message_id)
    }

    /// Like forwarding, without the link to the original message.
    pub fn copy_message(
        &self,
        chat_id: impl Into<ChatId>,
        from_chat_id: impl Into<ChatId>,
        message_id: i64,
    ) -> Call<MessageId> {
        self.client
            .post("copyMessage")
            .arg("chat_id", chat_id.into())
            .arg("from_chat_id", from_chat_id.into())
            .arg("message_id", message_id)
    }

    pub fn send_location(
        &self,
        chat_id: impl Into<ChatId>,
        latitude: f64,
        longitude: f64,
    ) -> Call<Message> {
        self.client
            .post("sendLocation")
            .arg("chat_id", chat_id.into())
            .arg("latitude", latitude)
            .arg("longitude", longitude)
    }

    pub fn send_venue(
        &self,
        chat_id: impl Into<ChatId>,
        latitude: f64,
        longitude: f64,
        title: impl Into<String>,
        address: impl Into<String>,
    ) -> Call<Message> {
        self.client
            .post("sendVenue")
            .arg("chat_id", chat_id.into())
            .arg("latitude", latitude)
            .arg("longitude", longitude)
            .arg("title", title.into())
            .arg("address", address.into())
    }

    pub fn send_contact(
        &self,
        chat_id: impl Into<ChatId>,
        phone_number: impl Into<String>,
        first_name: impl Into<String>,
    ) -> Call<Message> {
        self.client
            .post("sendContact")
            .arg("chat_id", chat_id.into())
            .arg("phone_number", phone_number.into())
            .arg("first_name", first_name.into())
    }

    /// Optional: `emoji` (🎲 by default).
    pub fn send_dice(&self, chat_id: impl Into<ChatId>) -> Call<Message> {
        self.client.post("sendDice").arg("chat_id", chat_id.into())
    }

    pub fn edit_message_text(
        &self,
        target: MessageTarget,
        text: impl Into<String>,
    ) -> Call<MessageOrTrue> {
        self.client
            .post("editMessageText")
            .target(target)
            .arg("text", text.into())
    }

    /// `None` removes the inline keyboard.
    pub fn edit_message_reply_markup(
        &self,
        target: MessageTarget,
        markup: Option<InlineKeyboardMarkup>,
    ) -> Call<MessageOrTrue> {
        let call = self.client.post("editMessageReplyMarkup").target(target);
        match markup {
            Some(markup) => call.arg("reply_markup", markup),
            None => call,
        }
    }

    pub fn delete_message(&self, chat_id: impl Into<ChatId>, message_id: i64) -> Call<bool> {
        self.client
            .post("deleteMessage")
            .arg("chat_id", chat_id.into())
            .arg("message_id", message_id)
    }

    /// Optional: `text`, `show_alert`, `url`, `cache_time`.
    pub fn answer_callback_query(&self, callback_query_id: impl Into<String>) -> Call<bool> {
        self.client
            .post("answerCallbackQuery")
            .arg("callback_query_id", callback_query_id.into())
    }

    /// File metadata and a `file_path` for downloading; see [`File::download_url`].
    pub fn get_file(&self, file_id: impl Into<String>) -> Call<File> {
        self.client.get("getFile").arg("file_id", file_id.into())
    }

    /// Optional: `offset`, `limit`.
    pub fn get_user_profile_photos(&self, user_id: impl Into<UserId>) -> Call<UserProfilePhotos> {
        self.client
            .get("getUserProfilePhotos")
            .arg("user_id", user_id.into())
    }
}

#[cfg(test)]
mod tests {
    use crate::{testing::FakeTransport, transport::Verb};
    use serde_json::json;
    use tgb_core::{
        domain::MessageTarget,
        types::{Chat, ChatType, InlineKeyboardButton, InlineKeyboardMarkup, ParseMode, User},
    };

    const SENT: &str = r#"{"ok":true,"result":{"message_id":77,"date":1700000000,"chat":{"id":5,"type":"private"},"text":"<b>hi</b>"}}"#;

    #[tokio::test]
    async fn send_message_with_markup() {
        let (client, fake) = FakeTransport::client([SENT]);
        let markup =
            InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::callback("Yes", "y")]]);
        let msg = client
            .messages()
            .send_message(5, "<b>hi</b>")
            .parse_mode(ParseMode::Html)
            .reply_markup(markup)
            .send()
            .await
            .unwrap();
        assert_eq!(msg.message_id, 77);

        let req = fake.last_request();
        assert_eq!(req.method, "sendMessage");
        assert_eq!(req.params.get("parse_mode"), Some(&json!("HTML")));
        assert_eq!(
            req.params.get("reply_markup"),
            Some(&json!({"inline_keyboard": [[{"text": "Yes", "callback_data": "y"}]]}))
        );
    }

    #[tokio::test]
    async fn chat_user_and_number_resolve_to_same_chat_id() {
        let (client, fake) = FakeTransport::client([SENT, SENT, SENT]);
        let chat = Chat::new(5, ChatType::Private);
        let user = User::new(5, "Ann");
        let messages = client.messages();

        messages.send_message(5, "a").send().await.unwrap();
        messages.send_message(&chat, "b").send().await.unwrap();
        messages.send_message(&user, "c").send().await.unwrap();

        for req in fake.requests() {
            assert_eq!(req.params.get("chat_id"), Some(&json!(5)));
        }
    }

    #[tokio::test]
    async fn channel_username_is_a_string() {
        let (client, fake) = FakeTransport::client([SENT]);
        client
            .messages()
            .forward_message("@channel", -100_200, 9)
            .send()
            .await
            .unwrap();
        let req = fake.last_request();
        assert_eq!(req.params.get("chat_id"), Some(&json!("@channel")));
        assert_eq!(req.params.get("from_chat_id"), Some(&json!(-100_200)));
    }

    #[tokio::test]
    async fn inline_edit_returns_true() {
        let (client, fake) = FakeTransport::client([r#"{"ok":true,"result":true}"#]);
        let result = client
            .messages()
            .edit_message_text(MessageTarget::inline("BAAA"), "updated")
            .send()
            .await
            .unwrap();
        assert!(result.message().is_none());
        assert_eq!(fake.last_request().params.get("inline_message_id"), Some(&json!("BAAA")));
    }

    #[tokio::test]
    async fn chat_edit_returns_message() {
        let (client, _fake) = FakeTransport::client([SENT]);
        let result = client
            .messages()
            .edit_message_reply_markup(MessageTarget::chat(5, 77), None)
            .send()
            .await
            .unwrap();
        assert_eq!(result.message().unwrap().message_id, 77);
    }

    #[tokio::test]
    async fn get_file_uses_get() {
        let (client, fake) = FakeTransport::client([
            r#"{"ok":true,"result":{"file_id":"BQAC","file_unique_id":"AgAD","file_size":1024,"file_path":"documents/file_1.txt"}}"#,
        ]);
        let file = client.messages().get_file("BQAC").send().await.unwrap();
        assert_eq!(
            file.download_url(client.config()).as_deref(),
            Some("https://api.telegram.org/file/bot123:test/documents/file_1.txt")
        );
        let req = fake.last_request();
        assert_eq!(req.verb, Verb::Get);
        assert_eq!(req.params.get("file_id"), Some(&json!("BQAC")));
    }

    #[tokio::test]
    async fn copy_message_returns_id() {
        let (client, _fake) = FakeTransport::client([r#"{"ok":true,"result":{"message_id":101}}"#]);
        let id = client.messages().copy_message(1, 2, 3).send().await.unwrap();
        assert_eq!(id.message_id, 101);
    }
}
