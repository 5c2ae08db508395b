//! HTTP client for the rental API.
//!
//! - [`categories`] - `GET /api/categories`
//! - [`products`] - `POST /api/products`
//! - [`cache`] - in-memory query cache shared across form mounts

pub mod cache;
pub mod categories;
pub mod products;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::Config;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("http client setup failed: {0}")]
    Client(#[source] reqwest::Error),
    #[error("request to {url} failed: {source}")]
    Request { url: String, source: reqwest::Error },
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("invalid response from {url}: {source}")]
    Decode { url: String, source: serde_json::Error },
}

/// Shared handle to the API. Cheap to clone into background tasks.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(ApiError::Client)?;

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an API path such as `/api/categories`
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Turn a response into `T`, mapping non-2xx and bad JSON to errors
    async fn read_json<T: DeserializeOwned>(url: &str, response: reqwest::Response) -> Result<T, ApiError> {
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status { url: url.to_string(), status: status.as_u16() });
        }

        let body = response
            .text()
            .await
            .map_err(|source| ApiError::Request { url: url.to_string(), source })?;
        debug!(url, bytes = body.len(), "received response");

        serde_json::from_str(&body).map_err(|source| ApiError::Decode { url: url.to_string(), source })
    }
}

/// An axum server that records every request and answers each one
/// with the same canned status and JSON body
#[cfg(test)]
pub(crate) mod test_server {
    use axum::body::Bytes;
    use axum::extract::State;
    use axum::http::{header, Method, StatusCode, Uri};
    use axum::response::IntoResponse;
    use axum::Router;
    use std::sync::{Arc, Mutex};
    use tokio::net::TcpListener;

    #[derive(Debug, Clone)]
    pub struct RecordedRequest {
        pub method: Method,
        pub path: String,
        pub body: String,
    }

    #[derive(Clone)]
    struct Canned {
        status: StatusCode,
        body: &'static str,
        log: Arc<Mutex<Vec<RecordedRequest>>>,
    }

    pub struct TestServer {
        pub base_url: String,
        requests: Arc<Mutex<Vec<RecordedRequest>>>,
    }

    impl TestServer {
        pub fn recorded(&self) -> Vec<RecordedRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    async fn respond(State(canned): State<Canned>, method: Method, uri: Uri, body: Bytes) -> impl IntoResponse {
        canned.log.lock().unwrap().push(RecordedRequest {
            method,
            path: uri.path().to_string(),
            body: String::from_utf8_lossy(&body).into_owned(),
        });

        (canned.status, [(header::CONTENT_TYPE, "application/json")], canned.body)
    }

    pub async fn serve(status: StatusCode, body: &'static str) -> TestServer {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));

        let app = Router::new().fallback(respond).with_state(Canned {
            status,
            body,
            log: requests.clone(),
        });
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        TestServer { base_url: format!("http://{addr}"), requests }
    }
}
