use tgb_core::{
    domain::{ChatId, UserId},
    types::{Chat, ChatAdministratorRights, ChatMember, ChatPermissions},
};

use crate::api::{ApiClient, Call};

/// Chat lookups and member administration.
#[derive(Clone, Debug)]
pub struct ChatsManager {
    client: ApiClient,
}

impl ChatsManager {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn get_chat(&self, chat_id: impl Into<ChatId>) -> Call<Chat> {
        self.client.get("getChat").arg("chat_id", chat_id.into())
    }

    /// Administrators other than bots.
    pub fn get_chat_administrators(&self, chat_id: impl Into<ChatId>) -> Call<Vec<ChatMember>> {
        self.client
            .get("getChatAdministrators")
            .arg("chat_id", chat_id.into())
    }

    pub fn get_chat_member(
        &self,
        chat_id: impl Into<ChatId>,
        user_id: impl Into<UserId>,
    ) -> Call<ChatMember> {
        self.client
            .get("getChatMember")
            .arg("chat_id", chat_id.into())
            .arg("user_id", user_id.into())
    }

    pub fn get_chat_member_count(&self, chat_id: impl Into<ChatId>) -> Call<u32> {
        self.client
            .get("getChatMemberCount")
            .arg("chat_id", chat_id.into())
    }

    /// Optional: `until_date`, `revoke_messages`.
    pub fn ban_chat_member(
        &self,
        chat_id: impl Into<ChatId>,
        user_id: impl Into<UserId>,
    ) -> Call<bool> {
        self.client
            .post("banChatMember")
            .arg("chat_id", chat_id.into())
            .arg("user_id", user_id.into())
    }

    /// Optional: `only_if_banned`.
    pub fn unban_chat_member(
        &self,
        chat_id: impl Into<ChatId>,
        user_id: impl Into<UserId>,
    ) -> Call<bool> {
        self.client
            .post("unbanChatMember")
            .arg("chat_id", chat_id.into())
            .arg("user_id", user_id.into())
    }

    /// Optional: `until_date`, `use_independent_chat_permissions`.
    pub fn restrict_chat_member(
        &self,
        chat_id: impl Into<ChatId>,
        user_id: impl Into<UserId>,
        permissions: ChatPermissions,
    ) -> Call<bool> {
        self.client
            .post("restrictChatMember")
            .arg("chat_id", chat_id.into())
            .arg("user_id", user_id.into())
            .arg("permissions", permissions)
    }

    /// Every right is sent as its own parameter; all `false` demotes the user.
    pub fn promote_chat_member(
        &self,
        chat_id: impl Into<ChatId>,
        user_id: impl Into<UserId>,
        rights: &ChatAdministratorRights,
    ) -> Call<bool> {
        self.client
            .post("promoteChatMember")
            .args_from(rights)
            .arg("chat_id", chat_id.into())
            .arg("user_id", user_id.into())
    }

    pub fn leave_chat(&self, chat_id: impl Into<ChatId>) -> Call<bool> {
        self.client.post("leaveChat").arg("chat_id", chat_id.into())
    }

    /// Revokes the previous primary link.
    pub fn export_chat_invite_link(&self, chat_id: impl Into<ChatId>) -> Call<String> {
        self.client
            .post("exportChatInviteLink")
            .arg("chat_id", chat_id.into())
    }
}

#[cfg(test)]
mod tests {
    use crate::{testing::FakeTransport, transport::Verb, ReturnFormat};
    use serde_json::json;
    use tgb_core::{
        types::{ChatAdministratorRights, ChatMemberStatus, ChatPermissions},
        Error,
    };

    #[tokio::test]
    async fn administrators_decode_by_status() {
        let (client, fake) = FakeTransport::client([
            r#"{"ok":true,"result":[
                {"status":"creator","user":{"id":1,"is_bot":false,"first_name":"Owner"},"is_anonymous":false},
                {"status":"administrator","user":{"id":2,"is_bot":false,"first_name":"Mod"},"can_be_edited":false,"can_delete_messages":true}
            ]}"#,
        ]);
        let admins = client
            .chats()
            .get_chat_administrators(-100_123)
            .send()
            .await
            .unwrap();
        let statuses: Vec<_> = admins.iter().map(|m| m.status()).collect();
        assert_eq!(statuses, [ChatMemberStatus::Owner, ChatMemberStatus::Administrator]);
        assert_eq!(fake.last_request().verb, Verb::Get);
    }

    #[tokio::test]
    async fn member_count_in_every_format() {
        let (client, _fake) = FakeTransport::client([
            r#"{"ok":true,"result":17}"#,
            r#"{"ok":true,"result":17}"#,
        ]);
        let chats = client.chats();
        assert_eq!(chats.get_chat_member_count("@group").send().await.unwrap(), 17);
        let text = chats
            .get_chat_member_count("@group")
            .send_as(ReturnFormat::Text)
            .await
            .unwrap();
        assert_eq!(text.as_text(), Some("17"));
    }

    #[tokio::test]
    async fn chat_not_found() {
        let (client, _fake) = FakeTransport::client([
            r#"{"ok":false,"error_code":400,"description":"Bad Request: chat not found"}"#,
        ]);
        let err = client.chats().get_chat_member(1, 2).send().await.unwrap_err();
        assert_eq!(err.api_code(), Some(400));
        assert!(matches!(
            err,
            Error::Api { ref description, .. } if description == "Bad Request: chat not found"
        ));
    }

    #[tokio::test]
    async fn promote_flattens_rights() {
        let (client, fake) = FakeTransport::client([r#"{"ok":true,"result":true}"#]);
        let rights = ChatAdministratorRights {
            can_delete_messages: true,
            can_pin_messages: Some(true),
            ..Default::default()
        };
        client.chats().promote_chat_member(-1, 9, &rights).send().await.unwrap();

        let req = fake.last_request();
        assert_eq!(req.params.get("user_id"), Some(&json!(9)));
        assert_eq!(req.params.get("can_delete_messages"), Some(&json!(true)));
        assert_eq!(req.params.get("can_pin_messages"), Some(&json!(true)));
        assert_eq!(req.params.get("can_promote_members"), Some(&json!(false)));
        assert!(!req.params.contains("can_post_messages"));
    }

    #[tokio::test]
    async fn restrict_sends_permissions_object() {
        let (client, fake) = FakeTransport::client([r#"{"ok":true,"result":true}"#]);
        let permissions = ChatPermissions {
            can_send_messages: Some(false),
            ..Default::default()
        };
        client
            .chats()
            .restrict_chat_member(-1, 9, permissions)
            .param("until_date", 1_800_000_000)
            .send()
            .await
            .unwrap();
        let req = fake.last_request();
        assert_eq!(req.params.get("permissions"), Some(&json!({"can_send_messages": false})));
        assert_eq!(req.params.get("until_date"), Some(&json!(1_800_000_000)));
    }
}
