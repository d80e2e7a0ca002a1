use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::decode::nullable_vec;

use super::PhotoSize;

/// A Telegram user or bot.
#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub is_bot: bool,
    pub first_name: String,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub language_code: Option<String>,
    pub is_premium: Option<bool>,
    pub added_to_attachment_menu: Option<bool>,
    /// Only returned by `getMe`.
    pub can_join_groups: Option<bool>,
    pub can_read_all_group_messages: Option<bool>,
    pub supports_inline_queries: Option<bool>,
}

impl User {
    pub fn new(id: i64, first_name: impl Into<String>) -> Self {
        Self {
            id,
            is_bot: false,
            first_name: first_name.into(),
            last_name: None,
            username: None,
            language_code: None,
            is_premium: None,
            added_to_attachment_menu: None,
            can_join_groups: None,
            can_read_all_group_messages: None,
            supports_inline_queries: None,
        }
    }

    pub fn full_name(&self) -> String {
        match &self.last_name {
            Some(last) => format!("{} {}", self.first_name, last),
            None => self.first_name.clone(),
        }
    }

    /// `@username`, if the user has one.
    pub fn mention(&self) -> Option<String> {
        self.username.as_ref().map(|u| format!("@{u}"))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserProfilePhotos {
    pub total_count: i64,
    /// Up to 4 sizes per photo.
    #[serde(default, deserialize_with = "nullable_vec")]
    pub photos: Vec<Vec<PhotoSize>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TelegramType;
    use serde_json::json;

    #[test]
    fn large_ids_survive_round_trip() {
        let json = json!({"id": 9223372036854775000i64, "is_bot": false, "first_name": "Big"});
        let user = User::decode(&json).unwrap().unwrap();
        assert_eq!(user.id, 9223372036854775000);
        assert_eq!(user.encode().unwrap()["id"], json!(9223372036854775000i64));
    }

    #[test]
    fn optional_fields_are_omitted_on_encode() {
        let user = User::new(1, "A");
        assert_eq!(
            user.encode().unwrap(),
            json!({"id": 1, "is_bot": false, "first_name": "A"})
        );
    }

    #[test]
    fn names_and_mentions() {
        let mut user = User::new(1, "Ada");
        assert_eq!(user.full_name(), "Ada");
        assert_eq!(user.mention(), None);
        user.last_name = Some("Lovelace".to_string());
        user.username = Some("ada".to_string());
        assert_eq!(user.full_name(), "Ada Lovelace");
        assert_eq!(user.mention().as_deref(), Some("@ada"));
    }

    #[test]
    fn null_photo_matrix_is_empty() {
        let photos = UserProfilePhotos::decode(&json!({"total_count": 0, "photos": null}))
            .unwrap()
            .unwrap();
        assert!(photos.photos.is_empty());
    }
}
