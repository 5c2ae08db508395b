use tracing::info;

use super::{ApiClient, ApiError};
use crate::state::data::Category;

pub const CATEGORIES_PATH: &str = "/api/categories";

impl ApiClient {
    /// Fetch every category in server order
    pub async fn fetch_categories(&self) -> Result<Vec<Category>, ApiError> {
        let url = self.url(CATEGORIES_PATH);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|source| ApiError::Request { url: url.clone(), source })?;

        let categories: Vec<Category> = Self::read_json(&url, response).await?;
        info!(count = categories.len(), "fetched categories");

        Ok(categories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_server;
    use crate::config::Config;
    use axum::http::{Method, StatusCode};

    fn client_for(base_url: &str) -> ApiClient {
        ApiClient::new(&Config {
            api_base_url: base_url.to_string(),
            ..Config::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_fetch_returns_categories_in_server_order() {
        let server = test_server::serve(
            StatusCode::OK,
            r#"[{"categoryId":"b","title":"Camping"},{"categoryId":"a","title":"Hiking"}]"#,
        )
        .await;

        let categories = client_for(&server.base_url).fetch_categories().await.unwrap();

        let titles: Vec<&str> = categories.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["Camping", "Hiking"]);

        let requests = server.recorded();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, Method::GET);
        assert_eq!(requests[0].path, "/api/categories");
    }

    #[tokio::test]
    async fn test_fetch_maps_server_error_to_status() {
        let server = test_server::serve(StatusCode::INTERNAL_SERVER_ERROR, "{}").await;

        let err = client_for(&server.base_url).fetch_categories().await.unwrap_err();

        assert!(matches!(err, ApiError::Status { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_fetch_maps_bad_json_to_decode() {
        let server = test_server::serve(StatusCode::OK, r#"{"categories": []}"#).await;

        let err = client_for(&server.base_url).fetch_categories().await.unwrap_err();

        assert!(matches!(err, ApiError::Decode { .. }));
    }

    #[tokio::test]
    async fn test_fetch_maps_refused_connection_to_request() {
        // Bind then drop to get a port nobody listens on
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client_for(&format!("http://{addr}")).fetch_categories().await.unwrap_err();

        assert!(matches!(err, ApiError::Request { .. }));
    }
}
