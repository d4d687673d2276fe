//! Main client implementation.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use crate::api::{
    AgentsApi, ChatsApi, ChunksApi, DatasetsApi, DocumentsApi, RetrievalApi, SessionsApi,
};
use crate::error::{Error, Result};
use crate::types::Envelope;

/// Default timeout for requests.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default timeout for streaming requests.
const DEFAULT_STREAM_TIMEOUT: Duration = Duration::from_secs(300);

/// Address of a RAGFlow server started with its stock configuration.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:9380";

/// RAGFlow API client.
///
/// Provides typed access to the `/api/v1` endpoints. Cloning is cheap; all
/// clones share one connection pool and may be used from several tasks.
///
/// # Example
///
/// ```no_run
/// use ragflow_client::RagflowClient;
///
/// # async fn example() -> ragflow_client::Result<()> {
/// let client = RagflowClient::builder()
///     .base_url("http://localhost:9380")
///     .api_key("ragflow-xxxx")
///     .build()?;
///
/// let datasets = client.datasets().list_by_name("manuals").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct RagflowClient {
    /// Inner shared state.
    inner: Arc<ClientInner>,
}

impl std::fmt::Debug for RagflowClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RagflowClient")
            .field("base_url", &self.inner.base_url.as_str())
            .field("timeout", &self.inner.timeout)
            .finish_non_exhaustive()
    }
}

/// Inner client state (shared across clones).
struct ClientInner {
    http: reqwest::Client,
    base_url: Url,
    timeout: Duration,
    stream_timeout: Duration,
}

impl RagflowClient {
    /// Create a new client builder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Create a client pointing at a local server with no API key.
    pub fn localhost() -> Result<Self> {
        Self::builder().base_url(DEFAULT_BASE_URL).build()
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    // ─────────────────────────────────────────────────────────────────────────
    // API accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Access the datasets API.
    pub fn datasets(&self) -> DatasetsApi {
        DatasetsApi::new(self.clone())
    }

    /// Access the documents of one dataset.
    pub fn documents(&self, dataset_id: impl Into<String>) -> DocumentsApi {
        DocumentsApi::new(self.clone(), dataset_id.into())
    }

    /// Access the chunks of one document.
    pub fn chunks(
        &self,
        dataset_id: impl Into<String>,
        document_id: impl Into<String>,
    ) -> ChunksApi {
        ChunksApi::new(self.clone(), dataset_id.into(), document_id.into())
    }

    /// Access the retrieval API.
    pub fn retrieval(&self) -> RetrievalApi {
        RetrievalApi::new(self.clone())
    }

    /// Access the chat assistants API.
    pub fn chats(&self) -> ChatsApi {
        ChatsApi::new(self.clone())
    }

    /// Access the sessions of one chat assistant.
    pub fn sessions(&self, chat_id: impl Into<String>) -> SessionsApi {
        SessionsApi::new(self.clone(), chat_id.into())
    }

    /// Access the agents API.
    pub fn agents(&self) -> AgentsApi {
        AgentsApi::new(self.clone())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Internal HTTP methods
    // ─────────────────────────────────────────────────────────────────────────

    /// Build a URL for an API path.
    pub(crate) fn url(&self, path: &str) -> Result<Url> {
        let path = path.trim_start_matches('/');
        self.inner
            .base_url
            .join(&format!("api/v1/{}", path))
            .map_err(Error::from)
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let url = self.url(path)?;
        tracing::debug!(%method, %url, "sending request");
        Ok(self
            .inner
            .http
            .request(method, url)
            .timeout(self.inner.timeout))
    }

    /// Make a GET request with query parameters.
    pub(crate) async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T>
    where
        T: DeserializeOwned,
        Q: serde::Serialize + ?Sized,
    {
        let response = self.request(Method::GET, path)?.query(query).send().await?;
        self.handle_response(response).await
    }

    /// Make a GET request for a raw body (file download).
    pub(crate) async fn get_bytes(&self, path: &str) -> Result<Vec<u8>> {
        let response = self.request(Method::GET, path)?.send().await?;
        let status = response.status();
        tracing::debug!(status = status.as_u16(), "received response");

        let json_body = is_json(&response);
        let body = response.bytes().await?;

        if !status.is_success() || (json_body && is_error_envelope(&body)) {
            decode_unit(status, &body)?;
        }
        Ok(body.to_vec())
    }

    /// Make a POST request.
    pub(crate) async fn post<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: serde::Serialize + ?Sized,
    {
        let response = self.request(Method::POST, path)?.json(body).send().await?;
        self.handle_response(response).await
    }

    /// Make a POST request whose response carries no data.
    pub(crate) async fn post_unit<B>(&self, path: &str, body: &B) -> Result<()>
    where
        B: serde::Serialize + ?Sized,
    {
        let response = self.request(Method::POST, path)?.json(body).send().await?;
        self.handle_unit(response).await
    }

    /// Make a multipart POST request.
    pub(crate) async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<T> {
        let response = self
            .request(Method::POST, path)?
            .multipart(form)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Make a POST request for streaming (returns the response directly).
    pub(crate) async fn post_stream<B>(&self, path: &str, body: &B) -> Result<reqwest::Response>
    where
        B: serde::Serialize + ?Sized,
    {
        let response = self
            .request(Method::POST, path)?
            .timeout(self.inner.stream_timeout)
            .json(body)
            .send()
            .await?;

        let status = response.status();

        // Rejections before the stream starts come back as a plain envelope.
        if !status.is_success() || is_json(&response) {
            let body = response.bytes().await?;
            decode_unit(status, &body)?;
            return Err(Error::Stream(
                "server answered with JSON instead of an event stream".to_string(),
            ));
        }

        Ok(response)
    }

    /// Make a PUT request whose response carries no data.
    pub(crate) async fn put<B>(&self, path: &str, body: &B) -> Result<()>
    where
        B: serde::Serialize + ?Sized,
    {
        let response = self.request(Method::PUT, path)?.json(body).send().await?;
        self.handle_unit(response).await
    }

    /// Make a DELETE request with a JSON body.
    pub(crate) async fn delete<B>(&self, path: &str, body: &B) -> Result<()>
    where
        B: serde::Serialize + ?Sized,
    {
        let response = self.request(Method::DELETE, path)?.json(body).send().await?;
        self.handle_unit(response).await
    }

    /// Handle a response, extracting the envelope data or error.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();
        tracing::debug!(status = status.as_u16(), "received response");
        let body = response.bytes().await?;
        decode_data(status, &body)
    }

    /// Handle a response where only success matters.
    async fn handle_unit(&self, response: reqwest::Response) -> Result<()> {
        let status = response.status();
        tracing::debug!(status = status.as_u16(), "received response");
        let body = response.bytes().await?;
        decode_unit(status, &body)
    }
}

fn is_json(response: &reqwest::Response) -> bool {
    response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"))
}

/// Whether a JSON download body is a failed envelope rather than file content.
///
/// Server errors always carry both a non-zero `code` and a `message`; a JSON
/// document that merely has a `code` field is returned as-is.
fn is_error_envelope(body: &[u8]) -> bool {
    serde_json::from_slice::<Envelope<serde_json::Value>>(body)
        .is_ok_and(|envelope| envelope.code != 0 && envelope.message.is_some())
}

/// Decode an envelope and return its `data`.
pub(crate) fn decode_data<T: DeserializeOwned>(status: StatusCode, body: &[u8]) -> Result<T> {
    let envelope = parse_envelope::<serde_json::Value>(status, body)?;
    let data = envelope.data.unwrap_or(serde_json::Value::Null);
    Ok(serde_json::from_value(data)?)
}

/// Decode an envelope, discarding any `data`.
pub(crate) fn decode_unit(status: StatusCode, body: &[u8]) -> Result<()> {
    parse_envelope::<serde_json::Value>(status, body).map(|_| ())
}

/// Parse the `{code, message, data}` wrapper, turning failures into errors.
fn parse_envelope<T: DeserializeOwned>(status: StatusCode, body: &[u8]) -> Result<Envelope<T>> {
    match serde_json::from_slice::<Envelope<T>>(body) {
        Ok(envelope) if status.is_success() && envelope.code == 0 => Ok(envelope),
        Ok(envelope) => Err(Error::Api {
            status: status.as_u16(),
            code: if envelope.code == 0 {
                i64::from(status.as_u16())
            } else {
                envelope.code
            },
            message: envelope
                .message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| format!("HTTP {}", status.as_u16())),
        }),
        Err(_) if !status.is_success() => Err(Error::Api {
            status: status.as_u16(),
            code: i64::from(status.as_u16()),
            message: format!("HTTP {}", status.as_u16()),
        }),
        Err(e) => Err(Error::Json(e)),
    }
}

/// Builder for creating a [`RagflowClient`].
#[derive(Debug)]
pub struct ClientBuilder {
    base_url: Option<String>,
    api_key: Option<String>,
    timeout: Duration,
    stream_timeout: Duration,
    user_agent: Option<String>,
}

impl ClientBuilder {
    /// Create a new builder with defaults.
    pub fn new() -> Self {
        Self {
            base_url: None,
            api_key: None,
            timeout: DEFAULT_TIMEOUT,
            stream_timeout: DEFAULT_STREAM_TIMEOUT,
            user_agent: None,
        }
    }

    /// Set the base URL for the server (without `/api/v1`).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the API key sent as a bearer token.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the streaming request timeout.
    pub fn stream_timeout(mut self, timeout: Duration) -> Self {
        self.stream_timeout = timeout;
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<RagflowClient> {
        let base_url = self
            .base_url
            .ok_or_else(|| Error::Config("base_url is required".to_string()))?;

        // Parse and normalize base URL
        let mut base_url = Url::parse(&base_url)?;
        if !base_url.path().ends_with('/') {
            base_url.set_path(&format!("{}/", base_url.path()));
        }

        let mut headers = HeaderMap::new();
        if let Some(key) = &self.api_key {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", key))
                .map_err(|_| Error::Config("Invalid API key".to_string()))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("ragflow-client/{}", env!("CARGO_PKG_VERSION")));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(user_agent)
            .build()?;

        Ok(RagflowClient {
            inner: Arc::new(ClientInner {
                http,
                base_url,
                timeout: self.timeout,
                stream_timeout: self.stream_timeout,
            }),
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
