use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Method, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use super::error::ApiError;
use super::interceptors::{attach_auth, handle_response};
use super::request::{ApiRequest, ApiResponse};
use super::transport::{ReqwestTransport, Transport};
use crate::error::{Result, TicketDeskError};
use crate::navigation::Navigator;
use crate::session::SessionStore;

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Client bound to one backend. Cloning is cheap and clones share the
/// session store, navigator and connection pool.
#[derive(Clone)]
pub struct ApiClient {
    base_url: Url,
    default_headers: HeaderMap,
    session: Arc<dyn SessionStore>,
    navigator: Arc<dyn Navigator>,
    transport: Arc<dyn Transport>,
}

impl ApiClient {
    pub fn new(
        base_address: &str,
        default_headers: HeaderMap,
        session: Arc<dyn SessionStore>,
        navigator: Arc<dyn Navigator>,
        timeout: Duration,
    ) -> Result<Self> {
        let transport = Arc::new(ReqwestTransport::new(timeout)?);
        Self::with_transport(base_address, default_headers, session, navigator, transport)
    }

    /// Fails right away on an unusable base address; nothing touches the
    /// network until the first call.
    pub fn with_transport(
        base_address: &str,
        mut default_headers: HeaderMap,
        session: Arc<dyn SessionStore>,
        navigator: Arc<dyn Navigator>,
        transport: Arc<dyn Transport>,
    ) -> Result<Self> {
        let base_url = parse_base_address(base_address)?;
        if !default_headers.contains_key(CONTENT_TYPE) {
            default_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }

        Ok(Self {
            base_url,
            default_headers,
            session,
            navigator,
            transport,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn session(&self) -> &Arc<dyn SessionStore> {
        &self.session
    }

    pub fn navigator(&self) -> &Arc<dyn Navigator> {
        &self.navigator
    }

    /// Run one request through both interceptors.
    ///
    /// The session is read once, when headers are attached. The transport
    /// call and the response interceptor run on their own task, so a 401
    /// still invalidates the session if the caller stops waiting.
    pub async fn send(&self, request: ApiRequest) -> ApiResult<ApiResponse> {
        let mut url = self.resolve(&request.path)?;
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&request.query);
        }

        let mut headers = self.default_headers.clone();
        // Per-call values replace defaults of the same name.
        headers.extend(request.headers.clone());
        let request = attach_auth(request.with_headers(headers), &self.session.read());

        debug!(method = %request.method, url = %url, "sending request");

        let transport = Arc::clone(&self.transport);
        let session = Arc::clone(&self.session);
        let navigator = Arc::clone(&self.navigator);
        let call = tokio::spawn(async move {
            let method = request.method.clone();
            let result = transport
                .send(url.clone(), request)
                .await
                .and_then(ApiResponse::into_result);
            match &result {
                Ok(response) => debug!(%method, %url, status = response.status, "request completed"),
                Err(e) => debug!(%method, %url, error = %e, "request failed"),
            }
            handle_response(result, session.as_ref(), navigator.as_ref())
        });

        call.await
            .map_err(|e| ApiError::transport(format!("request task failed: {}", e)))?
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        headers: Option<HeaderMap>,
    ) -> ApiResult<T> {
        self.call(Method::GET, path, None, headers).await
    }

    /// GET with query parameters, encoded by the client.
    pub async fn get_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        headers: Option<HeaderMap>,
    ) -> ApiResult<T> {
        let request = ApiRequest::new(Method::GET, path)
            .with_query(query)
            .with_headers(headers.unwrap_or_default());
        self.send(request).await?.json()
    }

    pub async fn post<B, T>(&self, path: &str, body: &B, headers: Option<HeaderMap>) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.call(Method::POST, path, Some(encode(body)?), headers)
            .await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B, headers: Option<HeaderMap>) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.call(Method::PUT, path, Some(encode(body)?), headers)
            .await
    }

    /// `body` may be omitted for bodiless state changes such as
    /// `PATCH /notifications/{id}/read`.
    pub async fn patch<B, T>(
        &self,
        path: &str,
        body: Option<&B>,
        headers: Option<HeaderMap>,
    ) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = body.map(encode).transpose()?;
        self.call(Method::PATCH, path, body, headers).await
    }

    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        headers: Option<HeaderMap>,
    ) -> ApiResult<T> {
        self.call(Method::DELETE, path, None, headers).await
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
        headers: Option<HeaderMap>,
    ) -> ApiResult<T> {
        let mut request = ApiRequest::new(method, path).with_headers(headers.unwrap_or_default());
        request.body = body;
        self.send(request).await?.json()
    }

    fn resolve(&self, path: &str) -> ApiResult<Url> {
        let joined = if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!(
                "{}/{}",
                self.base_url.as_str().trim_end_matches('/'),
                path.trim_start_matches('/')
            )
        };
        Url::parse(&joined).map_err(|e| ApiError::transport(format!("invalid request URL {}: {}", joined, e)))
    }
}

fn encode<B: Serialize + ?Sized>(body: &B) -> ApiResult<serde_json::Value> {
    serde_json::to_value(body).map_err(|e| ApiError::serialization(e.to_string()))
}

fn parse_base_address(base_address: &str) -> Result<Url> {
    let trimmed = base_address.trim();
    if trimmed.is_empty() {
        return Err(TicketDeskError::Config(
            "API base address must not be empty".to_string(),
        ));
    }
    let url = Url::parse(trimmed).map_err(|e| {
        TicketDeskError::Config(format!("Invalid API base address '{}': {}", trimmed, e))
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(TicketDeskError::Config(format!(
            "API base address must use http or https: {}",
            trimmed
        )));
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ScriptedTransport;
    use crate::navigation::RecordingNavigator;
    use crate::session::MemorySessionStore;

    fn client_for(base: &str) -> Result<ApiClient> {
        ApiClient::with_transport(
            base,
            HeaderMap::new(),
            Arc::new(MemorySessionStore::new()),
            Arc::new(RecordingNavigator::new()),
            Arc::new(ScriptedTransport::new()),
        )
    }

    #[test]
    fn rejects_empty_base_address() {
        let err = client_for("   ").err().unwrap();
        assert!(matches!(err, TicketDeskError::Config(_)));
    }

    #[test]
    fn rejects_non_http_base_address() {
        assert!(client_for("ftp://example.com").is_err());
        assert!(client_for("not a url").is_err());
    }

    #[test]
    fn joins_paths_against_base() {
        let client = client_for("http://localhost:8080/api/").unwrap();
        assert_eq!(
            client.resolve("/admin/tasks").unwrap().as_str(),
            "http://localhost:8080/api/admin/tasks"
        );
        assert_eq!(
            client.resolve("tickets?email=u@x.com").unwrap().as_str(),
            "http://localhost:8080/api/tickets?email=u@x.com"
        );
        assert_eq!(
            client.resolve("https://other.example/x").unwrap().as_str(),
            "https://other.example/x"
        );
    }

    #[test]
    fn default_content_type_is_json() {
        let client = client_for("http://localhost:8080").unwrap();
        assert_eq!(client.default_headers.get(CONTENT_TYPE).unwrap(), "application/json");
    }
}
