use tgb_core::{
    domain::{ChatId, MessageTarget, UserId},
    types::{GameHighScore, Message, MessageOrTrue},
};

use crate::api::{ApiClient, Call};

#[derive(Clone, Debug)]
pub struct GamesManager {
    client: ApiClient,
}

impl GamesManager {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// `game_short_name` is the name set up through @BotFather.
    pub fn send_game(
        &self,
        chat_id: impl Into<ChatId>,
        game_short_name: impl Into<String>,
    ) -> Call<Message> {
        self.client
            .post("sendGame")
            .arg("chat_id", chat_id.into())
            .arg("game_short_name", game_short_name.into())
    }

    /// Optional: `force`, `disable_edit_message`.
    ///
    /// Returns the edited message, or `true` for inline messages.
    pub fn set_game_score(
        &self,
        user_id: impl Into<UserId>,
        score: i64,
        target: MessageTarget,
    ) -> Call<MessageOrTrue> {
        self.client
            .post("setGameScore")
            .arg("user_id", user_id.into())
            .arg("score", score)
            .target(target)
    }

    /// Scores of the user and a few of their neighbours in the table.
    pub fn get_game_high_scores(
        &self,
        user_id: impl Into<UserId>,
        target: MessageTarget,
    ) -> Call<Vec<GameHighScore>> {
        self.client
            .post("getGameHighScores")
            .arg("user_id", user_id.into())
            .target(target)
    }
}
