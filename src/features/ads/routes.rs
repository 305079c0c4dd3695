use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::ads::handlers;
use crate::features::ads::services::AdService;

/// Create routes for the ads feature
///
/// Listing and creation are public; detail requires authentication and
/// mutations pass the permission gate inside the handlers.
pub fn routes(service: Arc<AdService>) -> Router {
    Router::new()
        .route("/ad/", get(handlers::list_ads))
        .route("/ad/create/", post(handlers::create_ad))
        .route(
            "/ad/{id}/",
            get(handlers::get_ad)
                .put(handlers::update_ad)
                .patch(handlers::update_ad)
                .delete(handlers::delete_ad),
        )
        .route(
            "/ad/{id}/upload_image/",
            post(handlers::upload_ad_image).patch(handlers::upload_ad_image),
        )
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::http::{HeaderName, HeaderValue, StatusCode};
    use axum::middleware::from_fn_with_state;
    use axum_test::TestServer;

    use super::routes;
    use crate::core::config::StorageConfig;
    use crate::core::middleware::auth_middleware;
    use crate::features::ads::services::AdService;
    use crate::features::auth::token::TokenVerifier;
    use crate::modules::storage::ImageStore;
    use crate::shared::test_helpers::lazy_test_pool;

    /// Router wired exactly as in main, minus the database: every request
    /// below is rejected before a query would run.
    async fn test_server() -> TestServer {
        let store_dir = std::env::temp_dir().join(format!("adboard-routes-{}", uuid::Uuid::new_v4()));
        let images = Arc::new(
            ImageStore::new(StorageConfig {
                media_root: store_dir.to_string_lossy().into_owned(),
                media_base_url: "http://localhost:3000/media".to_string(),
            })
            .await
            .unwrap(),
        );

        let service = Arc::new(AdService::new(lazy_test_pool(), 10, images));
        let verifier = Arc::new(TokenVerifier::new("test-secret", Duration::from_secs(60)));
        let app = routes(service).layer(from_fn_with_state(verifier, auth_middleware));

        TestServer::new(app).unwrap()
    }

    #[tokio::test]
    async fn ad_detail_without_token_is_401() {
        let server = test_server().await;
        let response = server.get("/ad/1/").await;
        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn garbage_bearer_token_is_401() {
        let server = test_server().await;
        let response = server
            .get("/ad/1/")
            .add_header(
                HeaderName::from_static("authorization"),
                HeaderValue::from_static("Bearer not-a-jwt"),
            )
            .await;
        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn non_bearer_authorization_is_401() {
        let server = test_server().await;
        let response = server
            .get("/ad/1/")
            .add_header(
                HeaderName::from_static("authorization"),
                HeaderValue::from_static("Basic dXNlcjpwYXNz"),
            )
            .await;
        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn malformed_price_filter_is_400() {
        let server = test_server().await;
        let response = server.get("/ad/?price_from=cheap").await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn invalid_create_body_is_422() {
        let server = test_server().await;
        let response = server
            .post("/ad/create/")
            .json(&serde_json::json!({
                "name": "",
                "author_id": 1,
                "price": 5,
                "description": "d",
                "category_id": 1
            }))
            .await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

        let body: serde_json::Value = response.json();
        assert!(body.get("name").is_some());
    }

    #[tokio::test]
    async fn non_json_body_is_400() {
        let server = test_server().await;
        let response = server.post("/ad/create/").text("{not json").await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }
}
