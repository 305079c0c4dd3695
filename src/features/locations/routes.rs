use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::locations::handlers;
use crate::features::locations::services::LocationService;

/// Resource-style routes for the locations feature
pub fn routes(service: Arc<LocationService>) -> Router {
    Router::new()
        .route(
            "/location/",
            get(handlers::list_locations).post(handlers::create_location),
        )
        .route(
            "/location/{id}/",
            get(handlers::get_location)
                .put(handlers::update_location)
                .patch(handlers::update_location)
                .delete(handlers::delete_location),
        )
        .with_state(service)
}
