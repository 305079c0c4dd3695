mod core;
mod features;
mod modules;
mod shared;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::middleware::from_fn_with_state;
use axum::{routing::get, Json, Router};
use tower::ServiceBuilder;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::core::config::Config;
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::core::{database, middleware};
use crate::features::ads::{routes as ad_routes, AdService};
use crate::features::auth::token::TokenVerifier;
use crate::features::categories::{routes as category_routes, CategoryService};
use crate::features::locations::{routes as location_routes, LocationService};
use crate::features::selections::{routes as selection_routes, SelectionService};
use crate::modules::storage::ImageStore;
use crate::shared::types::StatusResponse;

fn main() -> anyhow::Result<()> {
    // Build Tokio runtime with configurable worker threads
    let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
        });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .enable_all()
        .build()?;

    runtime.block_on(async_main())
}

async fn async_main() -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;
    tracing::info!("Configuration loaded successfully");

    let pool = database::create_pool(&config.database).await?;
    tracing::info!("Database connection pool created");

    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;
    tracing::info!("Database migrations completed");

    // Bearer token verification; tokens are issued by the external auth
    // subsystem that owns the user lifecycle
    let token_verifier = Arc::new(TokenVerifier::new(
        &config.auth.jwt_secret,
        config.auth.jwt_leeway,
    ));

    // Filesystem store for ad images, served back under /media
    let image_store = Arc::new(ImageStore::new(config.storage.clone()).await?);
    tracing::info!("Image store ready at {}", config.storage.media_root);

    let page_size = config.app.page_size;
    let category_service = Arc::new(CategoryService::new(pool.clone(), page_size));
    let location_service = Arc::new(LocationService::new(pool.clone(), page_size));
    let ad_service = Arc::new(AdService::new(
        pool.clone(),
        page_size,
        Arc::clone(&image_store),
    ));
    let selection_service = Arc::new(SelectionService::new(
        pool.clone(),
        page_size,
        Arc::clone(&image_store),
    ));
    tracing::info!("Services initialized (page size {})", page_size);

    // OpenAPI document with configured info
    let mut openapi = ApiDoc::openapi();
    SwaggerInfoModifier(&config.swagger).modify(&mut openapi);

    let swagger = if let Some(credentials) = config.swagger.credentials() {
        tracing::info!("Swagger UI basic auth enabled");
        Router::new()
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
            .layer(axum::middleware::from_fn(middleware::basic_auth_middleware(
                Arc::new(credentials),
            )))
    } else {
        tracing::info!("Swagger UI basic auth disabled (no credentials configured)");
        Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
    };

    async fn index() -> Json<StatusResponse> {
        Json(StatusResponse::ok())
    }

    async fn health_check() -> axum::http::StatusCode {
        axum::http::StatusCode::OK
    }

    let app = Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .merge(swagger)
        .merge(category_routes(category_service))
        .merge(ad_routes(ad_service))
        .merge(location_routes(location_service))
        .merge(selection_routes(selection_service))
        .nest_service("/media", ServeDir::new(image_store.media_root()))
        .layer(
            ServiceBuilder::new()
                // Generate X-Request-Id using UUID v7 (or keep a client-provided one)
                .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(middleware::MakeSpanWithRequestId)
                        .on_request(DefaultOnRequest::new().level(Level::INFO))
                        .on_response(DefaultOnResponse::new().level(Level::INFO)),
                )
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(middleware::cors_layer(
                    config.app.cors_allowed_origins.clone(),
                ))
                .layer(DefaultBodyLimit::max(config.app.max_request_body_size))
                .layer(from_fn_with_state(
                    Arc::clone(&token_verifier),
                    middleware::auth_middleware,
                )),
        );

    // Start server on a tuned listener
    let addr = config.app.server_address();
    let socket_addr: std::net::SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

    let socket = socket2::Socket::new(
        socket2::Domain::for_address(socket_addr),
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;
    socket.set_reuse_address(true)?;
    socket.set_nodelay(true)?;
    socket.set_tcp_keepalive(
        &socket2::TcpKeepalive::new().with_time(std::time::Duration::from_secs(60)),
    )?;
    socket.set_nonblocking(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(1024)?;

    let listener = tokio::net::TcpListener::from_std(socket.into())?;
    tracing::info!("Server listening on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
