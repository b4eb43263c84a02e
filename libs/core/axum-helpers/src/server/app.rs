use super::shutdown::{ShutdownCoordinator, coordinated_shutdown};
use crate::errors::handlers::not_found;
use axum::Router;
use core_config::server::ServerConfig;
use std::io;
use std::time::Duration;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info};
use utoipa::OpenApi;

/// Wrap an app's routes with the shared middleware and documentation UIs.
///
/// The returned router carries:
/// - Swagger UI, ReDoc, RapiDoc, and Scalar, all rendering `T::openapi()`
/// - the `apis` routes merged at the root, since their paths are the
///   public contract and must not gain a prefix
/// - request tracing, CORS, and response compression
/// - a JSON 404 fallback
///
/// Health endpoints are the app's job; see `health_router()`.
///
/// # CORS
///
/// `CORS_ALLOWED_ORIGIN` may hold a comma-separated origin list, e.g.
/// `http://localhost:3000,http://localhost:5173` locally or
/// `https://app.example.com` in a deployment. With a list set, the layer
/// allows GET/POST/PUT/DELETE/PATCH/OPTIONS, the Content-Type,
/// Authorization and Accept headers, credentials, and caches preflights
/// for an hour. Unset means a permissive layer.
///
/// # Errors
/// Fails when `CORS_ALLOWED_ORIGIN` is set but holds no parseable origin.
pub async fn create_router<T>(apis: Router) -> io::Result<Router>
where
    T: OpenApi + 'static,
{
    use utoipa_rapidoc::RapiDoc;
    use utoipa_redoc::{Redoc, Servable as RedocServable};
    use utoipa_scalar::{Scalar, Servable as ScalarServable};
    use utoipa_swagger_ui::SwaggerUi;

    let cors_layer = build_cors_layer()?;

    let router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", T::openapi()))
        .merge(Redoc::with_url("/redoc", T::openapi()))
        .merge(RapiDoc::new("/api-docs/openapi.json").path("/rapidoc"))
        .merge(Scalar::with_url("/scalar", T::openapi()))
        .merge(apis)
        .fallback(not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors_layer)
        // Honors Accept-Encoding on the way out
        .layer(CompressionLayer::new());

    Ok(router)
}

/// CORS layer from `CORS_ALLOWED_ORIGIN`, permissive when the var is unset
fn build_cors_layer() -> io::Result<CorsLayer> {
    use axum::http::{HeaderValue, Method};
    use tower_http::cors::AllowOrigin;

    let Ok(origins_raw) = std::env::var("CORS_ALLOWED_ORIGIN") else {
        info!("CORS_ALLOWED_ORIGIN unset, falling back to permissive CORS");
        return Ok(CorsLayer::permissive());
    };

    let origins: Vec<HeaderValue> = origins_raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("CORS_ALLOWED_ORIGIN holds an invalid origin: {}", e),
            )
        })?;

    if origins.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "CORS_ALLOWED_ORIGIN is set but lists no origins",
        ));
    }

    info!(origins = %origins_raw, "CORS restricted to configured origins");

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::AUTHORIZATION,
            axum::http::header::ACCEPT,
        ])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600)))
}

/// Bind the listener and serve until a shutdown signal arrives.
///
/// The server drains in-flight requests once SIGINT or SIGTERM arrives,
/// then runs `cleanup` with `shutdown_timeout` as its deadline. Resources
/// like database clients belong in `cleanup` so they close after the last
/// request, not during it.
///
/// # Example
/// ```ignore
/// use std::time::Duration;
/// use axum_helpers::server::create_production_app;
///
/// let cleanup = async move {
///     drop(mongo_client);
/// };
///
/// create_production_app(router, &config, Duration::from_secs(30), cleanup).await?;
/// ```
pub async fn create_production_app<F>(
    router: Router,
    server_config: &ServerConfig,
    shutdown_timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let (coordinator, _rx) = ShutdownCoordinator::new();
    let signal_watcher = coordinator.clone();

    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;
    info!(addr = %listener.local_addr()?, "Server listening");

    let cleanup_task = tokio::spawn(async move {
        signal_watcher.wait_for_signal().await;

        info!(timeout = ?shutdown_timeout, "Running cleanup");
        if tokio::time::timeout(shutdown_timeout, cleanup).await.is_ok() {
            info!("Cleanup finished");
        } else {
            tracing::warn!(timeout = ?shutdown_timeout, "Cleanup hit its deadline, exiting anyway");
        }
    });

    let serve_result = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(coordinated_shutdown(coordinator))
        .await
        .inspect_err(|e| {
            tracing::error!("Server error: {:?}", e);
        });

    cleanup_task.await.ok();

    serve_result
}
