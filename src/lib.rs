//! Account service manages account profiles and their postal address.

#![forbid(unsafe_code)]
pub mod config;
mod database;
pub mod error;
pub mod profile;
mod router;
pub mod telemetry;

use std::sync::Arc;
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::FromRef;
use axum::http::{HeaderValue, Method, StatusCode, header};
use axum::routing::get;
use axum::{Router, middleware as AxumMiddleware};
use metrics_exporter_prometheus::PrometheusHandle;
use tower::ServiceBuilder;
use tower_http::LatencyUnit;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::sensitive_headers::SetSensitiveHeadersLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{
    DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer,
};

pub use error::ServerError;
use profile::{
    MemoryProfileRepository, PgProfileRepository, ProfileRepository,
    ProfileService,
};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// MUST NEVER be used in production.
#[cfg(test)]
pub async fn make_request(
    app: Router,
    method: Method,
    path: &str,
    body: String,
) -> axum::http::Response<axum::body::Body> {
    use axum::extract::Request;
    use tower::util::ServiceExt;

    app.oneshot(
        Request::builder()
            .method(method)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json")
            .body(axum::body::Body::from(body))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// State sharing between routes.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<config::Configuration>,
    pub profiles: ProfileService,
    pub metrics: Option<PrometheusHandle>,
}

impl FromRef<AppState> for ProfileService {
    fn from_ref(state: &AppState) -> ProfileService {
        state.profiles.clone()
    }
}

fn cors(config: &config::Configuration) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors
        .allowed_origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();

    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any);

    if origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(AllowOrigin::list(origins))
    }
}

/// Create router.
pub fn app(state: AppState) -> Router {
    let middleware = ServiceBuilder::new()
        // Add high level tracing/logging to all requests.
        .layer(
            TraceLayer::new_for_http()
                .on_body_chunk(|chunk: &Bytes, latency: Duration, _span: &tracing::Span| {
                    tracing::trace!(size_bytes = chunk.len(), latency = ?latency, "sending body chunk")
                })
                .make_span_with(DefaultMakeSpan::new().include_headers(true).level(tracing::Level::INFO))
                .on_request(DefaultOnRequest::new())
                .on_response(DefaultOnResponse::new().include_headers(true).latency_unit(LatencyUnit::Micros)),
        )
        // Set a timeout.
        .layer(TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, Duration::from_secs(10)))
        // Remove senstive headers from trace.
        .layer(SetSensitiveHeadersLayer::new([header::AUTHORIZATION, header::COOKIE]))
        // Add CORS preflight support.
        .layer(cors(&state.config));

    let mut router = Router::new()
        // `GET /status.json` goes to `status`.
        .route("/status.json", get(router::status::status))
        .merge(router::accounts::router());

    if let Some(handle) = state.metrics.clone() {
        // `GET /metrics` exposes Prometheus metrics.
        router = router.route(
            "/metrics",
            get(move || std::future::ready(handle.render())),
        );
    }

    router
        .with_state(state)
        .route_layer(AxumMiddleware::from_fn(telemetry::track))
        .layer(middleware)
}

/// Initialize the application state.
pub async fn initialize_state(
    config: Arc<config::Configuration>,
) -> Result<AppState, BoxError> {
    let repo: Arc<dyn ProfileRepository> = match config.postgres {
        Some(ref postgres) => {
            let db = database::Database::new(
                &postgres.address,
                postgres
                    .username
                    .as_deref()
                    .unwrap_or(database::DEFAULT_CREDENTIALS),
                postgres
                    .password
                    .as_deref()
                    .unwrap_or(database::DEFAULT_CREDENTIALS),
                postgres
                    .database
                    .as_deref()
                    .unwrap_or(database::DEFAULT_DATABASE_NAME),
                postgres.pool_size.unwrap_or(database::DEFAULT_POOL_SIZE),
            )
            .await?;

            // execute migrations scripts on start.
            db.migrate().await?;

            Arc::new(PgProfileRepository::new(db.postgres))
        },
        None => {
            tracing::warn!(
                "missing `postgres` entry on `config.yaml` file, profiles are kept in memory"
            );
            Arc::new(MemoryProfileRepository::new())
        },
    };

    let metrics = if config.metrics {
        Some(telemetry::setup_metrics_recorder()?)
    } else {
        None
    };

    Ok(AppState {
        config,
        profiles: ProfileService::new(repo),
        metrics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Request;
    use tower::util::ServiceExt;

    #[tokio::test]
    async fn test_cors_preflight() {
        let app = app(router::state());

        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/accounts")
                    .header(header::ORIGIN, "https://example.com")
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                    .body(axum::body::Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "*"
        );
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let app = app(router::state());

        let response =
            make_request(app, Method::GET, "/unknown", String::default()).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_metrics_route_disabled_by_default() {
        let app = app(router::state());

        let response =
            make_request(app, Method::GET, "/metrics", String::default()).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
