use std::{future::Future, pin::Pin};

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::decode::nullable_vec;

/// Inline keyboard attached to a message.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct InlineKeyboardMarkup {
    #[serde(deserialize_with = "nullable_vec")]
    pub inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
}

impl InlineKeyboardMarkup {
    pub fn new(rows: Vec<Vec<InlineKeyboardButton>>) -> Self {
        Self {
            inline_keyboard: rows,
        }
    }

    /// Append a row.
    pub fn row(mut self, buttons: Vec<InlineKeyboardButton>) -> Self {
        self.inline_keyboard.push(buttons);
        self
    }

    /// Every button on its own row.
    pub fn single_column(buttons: impl IntoIterator<Item = InlineKeyboardButton>) -> Self {
        Self::new(buttons.into_iter().map(|b| vec![b]).collect())
    }
}

/// One button of an inline keyboard. Exactly one of the optional fields should be set.
#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InlineKeyboardButton {
    pub text: String,
    pub url: Option<String>,
    pub callback_data: Option<String>,
    pub web_app: Option<WebAppInfo>,
    pub login_url: Option<LoginUrl>,
    pub switch_inline_query: Option<String>,
    pub switch_inline_query_current_chat: Option<String>,
    pub callback_game: Option<CallbackGame>,
    pub pay: Option<bool>,
}

impl InlineKeyboardButton {
    pub fn builder(text: impl Into<String>) -> InlineKeyboardButtonBuilder {
        InlineKeyboardButtonBuilder {
            button: InlineKeyboardButton {
                text: text.into(),
                url: None,
                callback_data: None,
                web_app: None,
                login_url: None,
                switch_inline_query: None,
                switch_inline_query_current_chat: None,
                callback_game: None,
                pay: None,
            },
        }
    }

    pub fn url(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self::builder(text).url(url).build()
    }

    pub fn callback(text: impl Into<String>, data: impl Into<String>) -> Self {
        Self::builder(text).callback_data(data).build()
    }

    /// Must be the first button of the first row of a game message.
    pub fn game(text: impl Into<String>) -> Self {
        Self::builder(text).callback_game().build()
    }

    /// Must be the first button of the first row of an invoice message.
    pub fn pay(text: impl Into<String>) -> Self {
        Self::builder(text).pay().build()
    }
}

/// Future handed back by [`InlineKeyboardButtonBuilder::build_with_hook`].
///
/// Nothing runs until the caller polls or spawns it.
pub type CallbackHook = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

#[derive(Clone, Debug)]
pub struct InlineKeyboardButtonBuilder {
    button: InlineKeyboardButton,
}

impl InlineKeyboardButtonBuilder {
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.button.url = Some(url.into());
        self
    }

    pub fn callback_data(mut self, data: impl Into<String>) -> Self {
        self.button.callback_data = Some(data.into());
        self
    }

    pub fn web_app(mut self, url: impl Into<String>) -> Self {
        self.button.web_app = Some(WebAppInfo { url: url.into() });
        self
    }

    pub fn login_url(mut self, login_url: LoginUrl) -> Self {
        self.button.login_url = Some(login_url);
        self
    }

    pub fn switch_inline_query(mut self, query: impl Into<String>) -> Self {
        self.button.switch_inline_query = Some(query.into());
        self
    }

    pub fn switch_inline_query_current_chat(mut self, query: impl Into<String>) -> Self {
        self.button.switch_inline_query_current_chat = Some(query.into());
        self
    }

    pub fn callback_game(mut self) -> Self {
        self.button.callback_game = Some(CallbackGame {});
        self
    }

    pub fn pay(mut self) -> Self {
        self.button.pay = Some(true);
        self
    }

    pub fn build(self) -> InlineKeyboardButton {
        self.button
    }

    /// Build the button and prepare `hook` to run with a copy of it.
    ///
    /// The returned future is inert; schedule it yourself (e.g. `tokio::spawn`).
    /// No ordering is promised relative to requests that carry the button.
    pub fn build_with_hook<F, Fut>(self, hook: F) -> (InlineKeyboardButton, CallbackHook)
    where
        F: FnOnce(InlineKeyboardButton) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let button = self.button;
        let fut = hook(button.clone());
        (button, Box::pin(fut))
    }
}

/// Placeholder; the game is configured through @BotFather.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallbackGame {}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebAppInfo {
    pub url: String,
}

/// Seamless login through Telegram Login.
#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginUrl {
    pub url: String,
    pub forward_text: Option<String>,
    pub bot_username: Option<String>,
    pub request_write_access: Option<bool>,
}

impl LoginUrl {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            forward_text: None,
            bot_username: None,
            request_write_access: None,
        }
    }
}

/// Custom reply keyboard.
#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ReplyKeyboardMarkup {
    #[serde(deserialize_with = "nullable_vec")]
    pub keyboard: Vec<Vec<KeyboardButton>>,
    pub is_persistent: Option<bool>,
    pub resize_keyboard: Option<bool>,
    pub one_time_keyboard: Option<bool>,
    pub input_field_placeholder: Option<String>,
    pub selective: Option<bool>,
}

impl ReplyKeyboardMarkup {
    pub fn new(rows: Vec<Vec<KeyboardButton>>) -> Self {
        Self {
            keyboard: rows,
            ..Default::default()
        }
    }

    pub fn resized(mut self) -> Self {
        self.resize_keyboard = Some(true);
        self
    }

    pub fn one_time(mut self) -> Self {
        self.one_time_keyboard = Some(true);
        self
    }
}

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KeyboardButton {
    pub text: String,
    pub request_contact: Option<bool>,
    pub request_location: Option<bool>,
    pub request_poll: Option<KeyboardButtonPollType>,
    pub web_app: Option<WebAppInfo>,
}

impl KeyboardButton {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            request_contact: None,
            request_location: None,
            request_poll: None,
            web_app: None,
        }
    }

    pub fn request_contact(text: impl Into<String>) -> Self {
        Self {
            request_contact: Some(true),
            ..Self::new(text)
        }
    }

    pub fn request_location(text: impl Into<String>) -> Self {
        Self {
            request_location: Some(true),
            ..Self::new(text)
        }
    }
}

/// `type` is `"quiz"`, `"regular"`, or absent for any poll.
#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyboardButtonPollType {
    #[serde(rename = "type")]
    pub kind: Option<super::PollType>,
}

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyKeyboardRemove {
    pub remove_keyboard: bool,
    pub selective: Option<bool>,
}

impl Default for ReplyKeyboardRemove {
    fn default() -> Self {
        Self {
            remove_keyboard: true,
            selective: None,
        }
    }
}

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForceReply {
    pub force_reply: bool,
    pub input_field_placeholder: Option<String>,
    pub selective: Option<bool>,
}

impl Default for ForceReply {
    fn default() -> Self {
        Self {
            force_reply: true,
            input_field_placeholder: None,
            selective: None,
        }
    }
}

/// Any of the markups accepted by `reply_markup`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReplyMarkup {
    InlineKeyboard(InlineKeyboardMarkup),
    Keyboard(ReplyKeyboardMarkup),
    Remove(ReplyKeyboardRemove),
    ForceReply(ForceReply),
}

impl From<InlineKeyboardMarkup> for ReplyMarkup {
    fn from(m: InlineKeyboardMarkup) -> Self {
        ReplyMarkup::InlineKeyboard(m)
    }
}

impl From<ReplyKeyboardMarkup> for ReplyMarkup {
    fn from(m: ReplyKeyboardMarkup) -> Self {
        ReplyMarkup::Keyboard(m)
    }
}

impl From<ReplyKeyboardRemove> for ReplyMarkup {
    fn from(m: ReplyKeyboardRemove) -> Self {
        ReplyMarkup::Remove(m)
    }
}

impl From<ForceReply> for ReplyMarkup {
    fn from(m: ForceReply) -> Self {
        ReplyMarkup::ForceReply(m)
    }
}
