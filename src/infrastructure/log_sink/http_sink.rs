//! HTTP log sink posting events to the remote evaluation endpoint.

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use super::service::{LogReceipt, LogSink, SinkError};
use crate::domain::log_event::LogEvent;

/// Posts each event as JSON to a fixed endpoint.
///
/// When a token is configured it is sent as `Authorization: Bearer <token>`.
/// No timeout or retry is applied.
#[derive(Debug, Clone)]
pub struct HttpLogSink {
    client: Client,
    endpoint: Url,
    token: Option<String>,
}

impl HttpLogSink {
    pub fn new(endpoint: Url, token: Option<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint,
            token: token.filter(|t| !t.is_empty()),
        }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl LogSink for HttpLogSink {
    async fn send(&self, event: &LogEvent) -> Result<LogReceipt, SinkError> {
        let mut request = self.client.post(self.endpoint.clone()).json(event);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(SinkError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(SinkError::Status(status.as_u16()));
        }

        response.json::<LogReceipt>().await.map_err(SinkError::Decode)
    }
}
