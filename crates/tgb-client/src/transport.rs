//! Wire access: one HTTP request per Bot API call.

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use tracing::debug;

use tgb_core::{config::ClientConfig, types::InputFile, Error, Result};

use crate::params::{form_value, Params};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Verb {
    Get,
    Post,
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Verb::Get => "GET",
            Verb::Post => "POST",
        })
    }
}

/// A fully prepared Bot API request.
#[derive(Clone, Debug)]
pub struct ApiRequest {
    pub method: String,
    pub verb: Verb,
    pub params: Params,
    /// Multipart file fields, sent only with POST.
    pub files: Vec<(String, InputFile)>,
}

/// Executes a request and hands back the raw response body.
///
/// Non-2xx answers are not errors at this level: Telegram puts its error envelope in
/// the body of 4xx responses. Only failures to obtain a body are `Error::Transport`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, req: ApiRequest) -> Result<String>;
}

/// `reqwest` implementation talking to `<api_url>/bot<token>/<method>`.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    config: Arc<ClientConfig>,
    http: reqwest::Client,
}

impl HttpTransport {
    pub fn new(config: Arc<ClientConfig>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| Error::Transport(format!("http client build failed: {e}")))?;
        Ok(Self { config, http })
    }

    fn form(params: Params, files: Vec<(String, InputFile)>) -> Form {
        let mut form = Form::new();
        for (key, value) in params.iter() {
            if !value.is_null() {
                form = form.text(key.to_string(), form_value(value));
            }
        }
        for (field, file) in files {
            form = match file {
                InputFile::Upload { file_name, bytes } => {
                    form.part(field, Part::bytes(bytes).file_name(file_name))
                }
                other => form.text(field, other.wire_value()),
            };
        }
        form
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, req: ApiRequest) -> Result<String> {
        let url = self.config.endpoint(&req.method);

        let builder = match req.verb {
            Verb::Get => self.http.get(&url).query(&req.params.to_form()),
            Verb::Post if req.files.is_empty() => self.http.post(&url).json(&req.params.to_json()),
            Verb::Post => self.http.post(&url).multipart(Self::form(req.params, req.files)),
        };

        let resp = builder.send().await.map_err(transport_error)?;

        let status = resp.status();
        if !status.is_success() {
            debug!(method = %req.method, status = status.as_u16(), "non-success http status");
        }

        resp.text().await.map_err(transport_error)
    }
}

// without_url: the URL carries the bot token.
fn transport_error(e: reqwest::Error) -> Error {
    let timed_out = e.is_timeout();
    let e = e.without_url();
    if timed_out {
        Error::Transport(format!("request timed out: {e}"))
    } else {
        Error::Transport(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    fn transport(server_url: &str) -> HttpTransport {
        let cfg = ClientConfig::new("42:abc").unwrap().with_api_url(server_url);
        HttpTransport::new(Arc::new(cfg)).unwrap()
    }

    fn request(method: &str, verb: Verb, params: Params) -> ApiRequest {
        ApiRequest {
            method: method.to_string(),
            verb,
            params,
            files: Vec::new(),
        }
    }

    #[tokio::test]
    async fn get_sends_query_string() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/bot42:abc/getChat")
            .match_query(Matcher::UrlEncoded("chat_id".into(), "@news".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"ok":true,"result":{"id":-100,"type":"channel"}}"#)
            .create_async()
            .await;

        let mut params = Params::new();
        params.set("chat_id", "@news");
        let body = transport(&server.url())
            .execute(request("getChat", Verb::Get, params))
            .await
            .unwrap();

        mock.assert_async().await;
        assert!(body.contains("channel"));
    }

    #[tokio::test]
    async fn post_sends_json_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/bot42:abc/sendMessage")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(json!({"chat_id": 7, "text": "hello"})))
            .with_status(200)
            .with_body(r#"{"ok":true,"result":true}"#)
            .create_async()
            .await;

        let mut params = Params::new();
        params.set("chat_id", 7).set("text", "hello");
        transport(&server.url())
            .execute(request("sendMessage", Verb::Post, params))
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn uploads_go_multipart() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/bot42:abc/sendSticker")
            .match_header("content-type", Matcher::Regex("^multipart/form-data".into()))
            .match_body(Matcher::AllOf(vec![
                Matcher::Regex(r#"name="chat_id""#.into()),
                Matcher::Regex(r#"name="sticker"; filename="hi.webp""#.into()),
            ]))
            .with_status(200)
            .with_body(r#"{"ok":true,"result":true}"#)
            .create_async()
            .await;

        let mut params = Params::new();
        params.set("chat_id", 7);
        let mut req = request("sendSticker", Verb::Post, params);
        req.files
            .push(("sticker".to_string(), InputFile::upload("hi.webp", b"RIFF".to_vec())));
        transport(&server.url()).execute(req).await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn error_status_still_returns_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/bot42:abc/getChatMember")
            .with_status(400)
            .with_body(r#"{"ok":false,"error_code":400,"description":"Bad Request: chat not found"}"#)
            .create_async()
            .await;

        let body = transport(&server.url())
            .execute(request("getChatMember", Verb::Post, Params::new()))
            .await
            .unwrap();
        assert!(body.contains("chat not found"));
    }

    #[tokio::test]
    async fn unreachable_host_is_transport_error() {
        let cfg = ClientConfig::new("42:abc")
            .unwrap()
            .with_api_url("http://127.0.0.1:1")
            .with_request_timeout(std::time::Duration::from_secs(2));
        let transport = HttpTransport::new(Arc::new(cfg)).unwrap();

        let err = transport
            .execute(request("getMe", Verb::Get, Params::new()))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Transport(_)));
        assert!(!err.to_string().contains("42:abc"));
    }

    #[tokio::test]
    async fn silent_server_hits_request_timeout() {
        // Accepts connections and never writes a byte.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });

        let cfg = ClientConfig::new("42:abc")
            .unwrap()
            .with_api_url(format!("http://{addr}"))
            .with_request_timeout(std::time::Duration::from_millis(200));
        let transport = Arc::new(HttpTransport::new(Arc::new(cfg.clone())).unwrap());

        let started = std::time::Instant::now();
        let err = transport
            .execute(request("getMe", Verb::Get, Params::new()))
            .await
            .unwrap_err();
        assert!(started.elapsed() < std::time::Duration::from_secs(5));
        match &err {
            Error::Transport(msg) => {
                assert!(msg.starts_with("request timed out"), "{msg}");
                assert!(!msg.contains("42:abc"));
            }
            other => panic!("unexpected error {other:?}"),
        }

        let cfg = Arc::new(cfg.with_default_error_message("Telegram is not answering"));
        let client = crate::api::ApiClient::with_transport(cfg, transport);
        let err = client.bot().get_me().send().await.unwrap_err();
        assert!(matches!(err, Error::Transport(msg) if msg == "Telegram is not answering"));
    }
}
