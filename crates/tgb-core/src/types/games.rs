use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::decode::nullable_vec;

use super::{Animation, MessageEntity, PhotoSize, User};

/// A game; game short names are set up through @BotFather.
#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub title: String,
    pub description: String,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub photo: Vec<PhotoSize>,
    /// Set by `setGameScore` or edited by the bot, up to 4096 characters.
    pub text: Option<String>,
    #[serde(
        default,
        deserialize_with = "nullable_vec",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub text_entities: Vec<MessageEntity>,
    pub animation: Option<Animation>,
}

/// One row of the high score table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameHighScore {
    pub position: u32,
    pub user: User,
    pub score: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TelegramType;
    use serde_json::json;

    #[test]
    fn high_score_table_keeps_order() {
        let scores = GameHighScore::decode_list(&json!([
            {"position": 1, "user": {"id": 5, "is_bot": false, "first_name": "Ann"}, "score": 42},
            {"position": 2, "user": {"id": 6, "is_bot": false, "first_name": "Bo"}, "score": 17}
        ]))
        .unwrap();
        assert_eq!(scores.len(), 2);
        assert_eq!(scores[0].score, 42);
        assert_eq!(scores[0].user.id, 5);
        assert_eq!(scores[1].position, 2);
    }

    #[test]
    fn game_without_text_omits_it() {
        let game = Game::decode(&json!({
            "title": "Snake",
            "description": "Eat apples",
            "photo": [{"file_id": "p", "file_unique_id": "u", "width": 640, "height": 360}]
        }))
        .unwrap()
        .unwrap();
        assert_eq!(game.photo.len(), 1);
        assert!(game.text_entities.is_empty());

        let encoded = game.encode().unwrap();
        assert!(encoded.get("text").is_none());
        assert!(encoded.get("text_entities").is_none());
        assert_eq!(encoded["photo"][0]["width"], 640);
    }
}
