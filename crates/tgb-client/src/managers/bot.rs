use tgb_core::types::{BotCommand, User};

use crate::api::{ApiClient, Call};

/// The bot's own identity, session and command menu.
#[derive(Clone, Debug)]
pub struct BotManager {
    client: ApiClient,
}

impl BotManager {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn get_me(&self) -> Call<User> {
        self.client.get("getMe")
    }

    /// Log out from the cloud Bot API server before switching to a local one.
    pub fn log_out(&self) -> Call<bool> {
        self.client.post("logOut")
    }

    pub fn close(&self) -> Call<bool> {
        self.client.post("close")
    }

    /// Optional: `scope` ([`BotCommandScope`](tgb_core::types::BotCommandScope)), `language_code`.
    pub fn set_my_commands(&self, commands: Vec<BotCommand>) -> Call<bool> {
        self.client.post("setMyCommands").arg("commands", commands)
    }

    pub fn get_my_commands(&self) -> Call<Vec<BotCommand>> {
        self.client.post("getMyCommands")
    }

    pub fn delete_my_commands(&self) -> Call<bool> {
        self.client.post("deleteMyCommands")
    }
}
