use std::sync::Arc;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::features::categories::handlers;
use crate::features::categories::services::CategoryService;

/// Create routes for the categories feature
///
/// Note: The category surface is public; mutation endpoints use the
/// dedicated `create`/`update`/`delete` paths rather than resource verbs.
pub fn routes(service: Arc<CategoryService>) -> Router {
    Router::new()
        .route("/cat/", get(handlers::list_categories))
        .route("/cat/create/", post(handlers::create_category))
        .route("/cat/{id}/", get(handlers::get_category))
        .route(
            "/cat/{id}/update/",
            post(handlers::update_category).patch(handlers::update_category),
        )
        .route("/cat/{id}/delete/", delete(handlers::delete_category))
        .with_state(service)
}
