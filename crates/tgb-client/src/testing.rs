use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;

use tgb_core::{config::ClientConfig, Error, Result};

use crate::{
    api::ApiClient,
    transport::{ApiRequest, Transport},
};

/// Records every request and answers with canned bodies, in order.
#[derive(Default)]
pub(crate) struct FakeTransport {
    bodies: Mutex<VecDeque<String>>,
    requests: Mutex<Vec<ApiRequest>>,
    failure: Option<String>,
}

impl FakeTransport {
    pub(crate) fn new<I, S>(bodies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            bodies: Mutex::new(bodies.into_iter().map(Into::into).collect()),
            ..Default::default()
        }
    }

    pub(crate) fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Default::default()
        }
    }

    /// Client over a fresh fake, plus a handle to inspect what was sent.
    pub(crate) fn client<I, S>(bodies: I) -> (ApiClient, Arc<FakeTransport>)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fake = Arc::new(Self::new(bodies));
        let config = ClientConfig::new("123:test").unwrap();
        let client = ApiClient::with_transport(Arc::new(config), fake.clone());
        (client, fake)
    }

    pub(crate) fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn last_request(&self) -> ApiRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request recorded")
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn execute(&self, req: ApiRequest) -> Result<String> {
        self.requests.lock().unwrap().push(req);
        if let Some(msg) = &self.failure {
            return Err(Error::Transport(msg.clone()));
        }
        Ok(self
            .bodies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| r#"{"ok":true,"result":true}"#.to_string()))
    }
}
