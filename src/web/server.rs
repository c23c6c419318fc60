use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderName, HeaderValue, StatusCode},
    routing::any,
    Router,
};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::limit::ConcurrencyLimitLayer;
use tower::ServiceBuilder;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::web::handlers::{about_handler, not_found_handler, root_handler};

/// Largest request body accepted, matching common form parser limits.
pub const MAX_BODY_SIZE: usize = 10 * 1024 * 1024; // 10MB

/// Shared application state
pub struct AppState {
    pub config: ServerConfig,
}

/// Run the web server until Ctrl+C.
///
/// # Errors
///
/// Returns an error if the tokio runtime cannot be created, the listen address
/// cannot be bound, or the server fails while running.
pub fn run(config: ServerConfig) -> anyhow::Result<()> {
    // Build tokio runtime
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move { run_server(config).await })
}

/// Create the application router with all routes and middleware configured.
pub fn create_router(config: ServerConfig) -> Router {
    let request_timeout = config.request_timeout;
    let max_concurrency = config.max_concurrency;
    let state = Arc::new(AppState { config });

    Router::new()
        .route("/", any(root_handler))
        .route("/about", any(about_handler))
        .fallback(not_found_handler)
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                // Request/response spans, visible with --verbose
                .layer(TraceLayer::new_for_http())
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("x-content-type-options"),
                    HeaderValue::from_static("nosniff"),
                ))
                // Bounds the time spent reading the body and writing the response
                .layer(TimeoutLayer::with_status_code(
                    StatusCode::REQUEST_TIMEOUT,
                    request_timeout,
                ))
                .layer(ConcurrencyLimitLayer::new(max_concurrency))
                .layer(DefaultBodyLimit::max(MAX_BODY_SIZE)),
        )
}

/// Serve requests from `listener` until `shutdown` resolves.
///
/// # Errors
///
/// Returns an error if accepting connections fails.
pub async fn serve<F>(listener: TcpListener, config: ServerConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = create_router(config);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    let addr = config.listen_address();
    let listener = TcpListener::bind(&addr).await?;
    println!("Listening on {addr}");
    tracing::info!(address = %addr, force_https = config.force_https, "casecmp server starting");

    serve(listener, config, shutdown_signal()).await
}

/// Wait for Ctrl+C. If the handler cannot be installed the server runs until killed.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install Ctrl+C handler: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
