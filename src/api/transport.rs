use async_trait::async_trait;
use reqwest::Url;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use super::error::ApiError;
use super::request::{ApiRequest, ApiResponse};
use crate::error::Result;

/// Moves a fully prepared request over the wire.
///
/// Implementations return `Ok` for every response that arrived, whatever
/// its status; `Err` is reserved for calls that never got an answer.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, url: Url, request: ApiRequest) -> std::result::Result<ApiResponse, ApiError>;
}

pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| crate::error::TicketDeskError::Config(format!("Invalid HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, url: Url, request: ApiRequest) -> std::result::Result<ApiResponse, ApiError> {
        let mut builder = self
            .client
            .request(request.method, url)
            .headers(request.headers);
        if let Some(body) = &request.body {
            // Content-Type comes from the client's default headers.
            let bytes = serde_json::to_vec(body).map_err(|e| ApiError::serialization(e.to_string()))?;
            builder = builder.body(bytes);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let text = response.text().await?;

        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).unwrap_or(Value::String(text))
        };

        Ok(ApiResponse {
            status,
            headers,
            body,
        })
    }
}

/// Hands out queued results in order and remembers what was sent.
/// An exhausted script answers with a transport failure.
#[derive(Default)]
pub struct ScriptedTransport {
    replies: Mutex<VecDeque<std::result::Result<ApiResponse, ApiError>>>,
    sent: Mutex<Vec<(Url, ApiRequest)>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, status: u16, body: Value) -> Self {
        self.push(Ok(ApiResponse::new(status, body)));
        self
    }

    pub fn fail(self, message: &str) -> Self {
        self.push(Err(ApiError::transport(message)));
        self
    }

    pub fn push(&self, reply: std::result::Result<ApiResponse, ApiError>) {
        self.replies
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .push_back(reply);
    }

    pub fn sent(&self) -> Vec<(Url, ApiRequest)> {
        self.sent.lock().unwrap_or_else(|p| p.into_inner()).clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, url: Url, request: ApiRequest) -> std::result::Result<ApiResponse, ApiError> {
        self.sent
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .push((url, request));
        self.replies
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::transport("no scripted reply left")))
    }
}
