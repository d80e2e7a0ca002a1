use tgb_core::types::{InputFile, Update, WebhookInfo};

use crate::api::{ApiClient, Call};

/// Long polling and webhook management. Mutually exclusive on Telegram's side.
#[derive(Clone, Debug)]
pub struct UpdatesManager {
    client: ApiClient,
}

impl UpdatesManager {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Optional: `offset`, `limit`, `timeout`, `allowed_updates`.
    pub fn get_updates(&self) -> Call<Vec<Update>> {
        self.client.post("getUpdates")
    }

    /// Updates after `offset`, waiting up to `timeout_secs` for new ones.
    pub fn poll(&self, offset: i64, timeout_secs: u32) -> Call<Vec<Update>> {
        self.get_updates()
            .param("offset", offset)
            .param("timeout", timeout_secs)
    }

    /// An empty `url` removes the webhook.
    pub fn set_webhook(&self, url: impl Into<String>) -> Call<bool> {
        self.client.post("setWebhook").arg("url", url.into())
    }

    /// Webhook with a self-signed public key certificate.
    pub fn set_webhook_with_certificate(
        &self,
        url: impl Into<String>,
        certificate: InputFile,
    ) -> Call<bool> {
        self.set_webhook(url).attach("certificate", certificate)
    }

    pub fn delete_webhook(&self) -> Call<bool> {
        self.client.post("deleteWebhook")
    }

    pub fn get_webhook_info(&self) -> Call<WebhookInfo> {
        self.client.get("getWebhookInfo")
    }
}

#[cfg(test)]
mod tests {
    use crate::{testing::FakeTransport, transport::Verb};
    use serde_json::json;
    use tgb_core::types::{InputFile, UpdateType};

    #[tokio::test]
    async fn poll_sets_offset_and_timeout() {
        let (client, fake) = FakeTransport::client([
            r#"{"ok":true,"result":[{"update_id":10,"callback_query":{"id":"c","from":{"id":1,"is_bot":false,"first_name":"A"},"chat_instance":"i","data":"x"}}]}"#,
        ]);
        let updates = client
            .updates()
            .poll(10, 30)
            .param("allowed_updates", [UpdateType::CallbackQuery])
            .send()
            .await
            .unwrap();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].update_type(), Some(UpdateType::CallbackQuery));

        let req = fake.last_request();
        assert_eq!(req.method, "getUpdates");
        assert_eq!(req.params.get("offset"), Some(&json!(10)));
        assert_eq!(req.params.get("timeout"), Some(&json!(30)));
        assert_eq!(req.params.get("allowed_updates"), Some(&json!(["callback_query"])));
    }

    #[tokio::test]
    async fn unknown_update_kind_still_advances_offset() {
        let (client, _fake) = FakeTransport::client([
            r#"{"ok":true,"result":[{"update_id":41,"message_reaction":{"chat":{"id":5,"type":"private"}}},{"update_id":42,"poll":{"id":"p","question":"q","options":[],"total_voter_count":0,"is_closed":true,"is_anonymous":true,"type":"regular","allows_multiple_answers":false}}]}"#,
        ]);
        let updates = client.updates().poll(41, 0).send().await.unwrap();
        let next = updates.iter().map(|u| u.update_id).max().unwrap() + 1;
        assert_eq!(next, 43);
        assert_eq!(updates[0].update_type(), None);
        assert_eq!(updates[1].update_type(), Some(UpdateType::Poll));
    }

    #[tokio::test]
    async fn webhook_info_uses_get() {
        let (client, fake) = FakeTransport::client([
            r#"{"ok":true,"result":{"url":"https://bot.example.org/hook","has_custom_certificate":false,"pending_update_count":3,"max_connections":40}}"#,
        ]);
        let info = client.updates().get_webhook_info().send().await.unwrap();
        assert!(info.is_set());
        assert_eq!(info.pending_update_count, 3);
        assert_eq!(fake.last_request().verb, Verb::Get);
    }

    #[tokio::test]
    async fn certificate_upload_is_a_file_part() {
        let (client, fake) = FakeTransport::client([r#"{"ok":true,"result":true}"#]);
        client
            .updates()
            .set_webhook_with_certificate(
                "https://bot.example.org/hook",
                InputFile::upload("cert.pem", b"-----BEGIN CERTIFICATE-----".to_vec()),
            )
            .send()
            .await
            .unwrap();

        let req = fake.last_request();
        assert_eq!(req.verb, Verb::Post);
        assert_eq!(req.files.len(), 1);
        assert_eq!(req.files[0].0, "certificate");
        assert!(!req.params.contains("certificate"));
    }

    #[tokio::test]
    async fn delete_webhook_returns_true() {
        let (client, _fake) = FakeTransport::client([
            r#"{"ok":true,"result":true,"description":"Webhook was deleted"}"#,
        ]);
        assert!(client.updates().delete_webhook().send().await.unwrap());
    }
}
