use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::selections::handlers;
use crate::features::selections::services::SelectionService;

/// Resource-style routes for the selections feature
pub fn routes(service: Arc<SelectionService>) -> Router {
    Router::new()
        .route(
            "/selection/",
            get(handlers::list_selections).post(handlers::create_selection),
        )
        .route(
            "/selection/{id}/",
            get(handlers::get_selection)
                .put(handlers::update_selection)
                .patch(handlers::update_selection)
                .delete(handlers::delete_selection),
        )
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;
    use std::time::{SystemTime, UNIX_EPOCH};

    use axum::http::{HeaderName, HeaderValue, StatusCode};
    use axum::middleware::from_fn_with_state;
    use axum_test::TestServer;
    use jsonwebtoken::{encode, EncodingKey, Header};

    use super::routes;
    use crate::core::config::StorageConfig;
    use crate::core::middleware::auth_middleware;
    use crate::features::auth::model::{Claims, Role};
    use crate::features::auth::token::TokenVerifier;
    use crate::features::selections::services::SelectionService;
    use crate::modules::storage::ImageStore;
    use crate::shared::test_helpers::lazy_test_pool;

    const SECRET: &str = "test-secret";

    async fn test_server() -> TestServer {
        let store_dir =
            std::env::temp_dir().join(format!("adboard-selections-{}", uuid::Uuid::new_v4()));
        let images = Arc::new(
            ImageStore::new(StorageConfig {
                media_root: store_dir.to_string_lossy().into_owned(),
                media_base_url: "http://localhost:3000/media".to_string(),
            })
            .await
            .unwrap(),
        );

        let service = Arc::new(SelectionService::new(lazy_test_pool(), 10, images));
        let verifier = Arc::new(TokenVerifier::new(SECRET, Duration::from_secs(60)));
        let app = routes(service).layer(from_fn_with_state(verifier, auth_middleware));

        TestServer::new(app).unwrap()
    }

    fn bearer(user_id: i64) -> HeaderValue {
        let exp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs()
            + 3600;
        let token = encode(
            &Header::default(),
            &Claims {
                sub: user_id,
                username: format!("user{}", user_id),
                role: Role::Member,
                exp,
            },
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();
        HeaderValue::from_str(&format!("Bearer {}", token)).unwrap()
    }

    #[tokio::test]
    async fn create_without_token_is_401() {
        let server = test_server().await;
        let response = server
            .post("/selection/")
            .json(&serde_json::json!({"name": "Wheels", "items": []}))
            .await;
        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn update_without_token_is_401() {
        let server = test_server().await;
        let response = server
            .put("/selection/1/")
            .json(&serde_json::json!({"name": "Wheels"}))
            .await;
        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn authenticated_create_with_bad_name_is_422() {
        let server = test_server().await;
        let response = server
            .post("/selection/")
            .add_header(HeaderName::from_static("authorization"), bearer(7))
            .json(&serde_json::json!({"name": "", "items": []}))
            .await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

        let body: serde_json::Value = response.json();
        assert!(body.get("name").is_some());
    }
}
