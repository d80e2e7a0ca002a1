use std::{fmt, marker::PhantomData, sync::Arc};

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use tgb_core::{
    config::ClientConfig,
    domain::MessageTarget,
    response::ApiResponse,
    types::{InputFile, ParseMode, ReplyMarkup},
    Error, Result,
};

use crate::{
    managers::{
        BotManager, ChatsManager, GamesManager, InlineManager, MessagesManager, PassportManager,
        PaymentsManager, StickersManager, UpdatesManager,
    },
    params::Params,
    transport::{ApiRequest, HttpTransport, Transport, Verb},
};

/// Entry point: configuration plus the transport every manager shares.
#[derive(Clone)]
pub struct ApiClient {
    config: Arc<ClientConfig>,
    transport: Arc<dyn Transport>,
}

impl ApiClient {
    /// Client over HTTP with its own copy of `config`.
    pub fn new(config: ClientConfig) -> Result<Self> {
        Self::from_shared(Arc::new(config))
    }

    pub fn from_shared(config: Arc<ClientConfig>) -> Result<Self> {
        let transport = HttpTransport::new(config.clone())?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    pub fn with_transport(config: Arc<ClientConfig>, transport: Arc<dyn Transport>) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Raw GET call, for methods without a manager wrapper.
    pub fn get<T>(&self, method: &'static str) -> Call<T> {
        Call::new(self.clone(), method, Verb::Get)
    }

    /// Raw POST call, for methods without a manager wrapper.
    pub fn post<T>(&self, method: &'static str) -> Call<T> {
        Call::new(self.clone(), method, Verb::Post)
    }

    pub fn bot(&self) -> BotManager {
        BotManager::new(self.clone())
    }

    pub fn updates(&self) -> UpdatesManager {
        UpdatesManager::new(self.clone())
    }

    pub fn messages(&self) -> MessagesManager {
        MessagesManager::new(self.clone())
    }

    pub fn chats(&self) -> ChatsManager {
        ChatsManager::new(self.clone())
    }

    pub fn games(&self) -> GamesManager {
        GamesManager::new(self.clone())
    }

    pub fn payments(&self) -> PaymentsManager {
        PaymentsManager::new(self.clone())
    }

    pub fn stickers(&self) -> StickersManager {
        StickersManager::new(self.clone())
    }

    pub fn inline(&self) -> InlineManager {
        InlineManager::new(self.clone())
    }

    pub fn passport(&self) -> PassportManager {
        PassportManager::new(self.clone())
    }
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("api_url", &self.config.api_url)
            .finish_non_exhaustive()
    }
}

/// How a call hands back its result.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReturnFormat {
    /// The `result` payload as a JSON value.
    Json,
    /// The payload decoded into the method's typed result.
    #[default]
    Object,
    /// The payload as text: a JSON string unquoted, anything else as JSON text.
    Text,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Reply<T> {
    Json(Value),
    Object(T),
    Text(String),
}

impl<T> Reply<T> {
    pub fn into_object(self) -> Option<T> {
        match self {
            Reply::Object(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Reply::Json(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Reply::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

/// A prepared request, sent by one of the `send*` methods.
///
/// Parameters given through [`Call::param`] and [`Call::params`] never replace the
/// parameters the manager method set itself.
#[must_use = "a Call does nothing until it is sent"]
pub struct Call<T> {
    client: ApiClient,
    method: &'static str,
    verb: Verb,
    required: Params,
    extra: Params,
    files: Vec<(String, InputFile)>,
    checks: Vec<&'static str>,
    deferred: Option<Error>,
    _result: PhantomData<fn() -> T>,
}

impl<T> fmt::Debug for Call<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Call")
            .field("method", &self.method)
            .field("verb", &self.verb)
            .field("required", &self.required)
            .field("extra", &self.extra)
            .field("files", &self.files)
            .finish_non_exhaustive()
    }
}

impl<T> Call<T> {
    pub(crate) fn new(client: ApiClient, method: &'static str, verb: Verb) -> Self {
        Self {
            client,
            method,
            verb,
            required: Params::new(),
            extra: Params::new(),
            files: Vec::new(),
            checks: Vec::new(),
            deferred: None,
            _result: PhantomData,
        }
    }

    pub fn method(&self) -> &'static str {
        self.method
    }

    pub fn verb(&self) -> Verb {
        self.verb
    }

    fn defer(&mut self, err: Error) {
        if self.deferred.is_none() {
            self.deferred = Some(err);
        }
    }

    /// Set a parameter the method itself requires.
    pub(crate) fn arg(mut self, key: &'static str, value: impl Serialize) -> Self {
        let set = self.required.set_serialized(key, &value).map(|_| ());
        if let Err(e) = set {
            self.defer(e);
        }
        self
    }

    /// Copy every field of a record into the parameters.
    pub(crate) fn args_from(mut self, record: &impl Serialize) -> Self {
        match serde_json::to_value(record) {
            Ok(Value::Object(map)) => {
                for (k, v) in map {
                    self.required.set(k, v);
                }
            }
            Ok(other) => {
                let msg = format!("{} expects an object of parameters, got {other}", self.method);
                self.defer(Error::Decode(serde::ser::Error::custom(msg)));
            }
            Err(e) => self.defer(e.into()),
        }
        self
    }

    /// Chat + message id, or inline message id.
    pub(crate) fn target(self, target: MessageTarget) -> Self {
        match target {
            MessageTarget::Chat {
                chat_id,
                message_id,
            } => self.arg("chat_id", chat_id).arg("message_id", message_id),
            MessageTarget::Inline(id) => self.arg("inline_message_id", id),
        }
    }

    /// Fail with `MissingParameter(key)` before sending when `key` ends up absent.
    pub(crate) fn require(mut self, key: &'static str) -> Self {
        self.checks.push(key);
        self
    }

    /// Attach a file: uploads become multipart parts, ids and URLs plain parameters.
    pub fn attach(mut self, field: &'static str, file: InputFile) -> Self {
        if file.is_upload() {
            self.files.push((field.to_string(), file));
        } else {
            self.required.set(field, file.wire_value());
        }
        self
    }

    /// Extra optional parameter.
    pub fn param(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        match serde_json::to_value(value) {
            Ok(v) => {
                self.extra.set(key, v);
            }
            Err(e) => self.defer(e.into()),
        }
        self
    }

    /// Extra optional parameters; later calls win over earlier ones.
    pub fn params(mut self, bag: Params) -> Self {
        for (k, v) in bag {
            self.extra.set(k, v);
        }
        self
    }

    pub fn parse_mode(self, mode: ParseMode) -> Self {
        self.param("parse_mode", mode)
    }

    pub fn reply_markup(self, markup: impl Into<ReplyMarkup>) -> Self {
        self.param("reply_markup", markup.into())
    }

    /// The request as it would go on the wire, after merging and validation.
    pub fn build(self) -> Result<ApiRequest> {
        if let Some(err) = self.deferred {
            return Err(err);
        }

        let mut params = self.required;
        params.merge(self.extra);

        for key in self.checks {
            let uploaded = self.files.iter().any(|(field, _)| field == key);
            if !params.contains(key) && !uploaded {
                return Err(Error::MissingParameter(key));
            }
        }

        Ok(ApiRequest {
            method: self.method.to_string(),
            verb: self.verb,
            params,
            files: self.files,
        })
    }

    async fn execute(self) -> Result<Value> {
        let client = self.client.clone();
        let req = self.build()?;
        let method = req.method.clone();

        debug!(
            method = %method,
            verb = %req.verb,
            params = req.params.len(),
            files = req.files.len(),
            "telegram api call"
        );

        let body = match client.transport.execute(req).await {
            Ok(body) => body,
            Err(Error::Transport(raw)) => {
                warn!(method = %method, error = %raw, "telegram transport failure");
                let msg = client.config.default_error_message.clone().unwrap_or(raw);
                return Err(Error::Transport(msg));
            }
            Err(e) => return Err(e),
        };

        let result = ApiResponse::parse(&body)?.into_result();
        if let Err(Error::Api {
            code,
            description,
            retry_after,
            ..
        }) = &result
        {
            warn!(
                method = %method,
                code,
                description = %description,
                retry_after = ?retry_after,
                "telegram api error"
            );
        }
        result
    }

    /// The `result` payload as JSON.
    pub async fn send_json(self) -> Result<Value> {
        self.execute().await
    }

    /// The `result` payload as text.
    pub async fn send_text(self) -> Result<String> {
        Ok(match self.execute().await? {
            Value::String(s) => s,
            other => other.to_string(),
        })
    }
}

impl<T: DeserializeOwned> Call<T> {
    /// The `result` payload decoded into `T`.
    pub async fn send(self) -> Result<T> {
        let value = self.execute().await?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn send_as(self, format: ReturnFormat) -> Result<Reply<T>> {
        match format {
            ReturnFormat::Json => self.send_json().await.map(Reply::Json),
            ReturnFormat::Object => self.send().await.map(Reply::Object),
            ReturnFormat::Text => self.send_text().await.map(Reply::Text),
        }
    }
}
