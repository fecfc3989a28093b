//! # uniapi: University courses API
//!
//! `uniapi` is a small REST service for a university's records: students, the courses they can
//! take, and the enrollments linking the two. It accepts JSON over HTTP, checks that every
//! required field was supplied, runs a single parameterized statement per request against
//! PostgreSQL, and answers with a JSON envelope and a conventional status code.
//!
//! ## Architecture
//!
//! The HTTP layer is built on [Axum](https://github.com/tokio-rs/axum). Handlers in [`api`] never
//! hold a connection pool; they call the [`UniversityStore`](db::store::UniversityStore) trait
//! object kept in [`AppState`]. In production that is a [`PgStore`](db::store::PgStore), which
//! checks a connection out of the pool and delegates to the per-table repositories in
//! [`db::handlers`]. Setting `database: { type: memory }` swaps in
//! [`MemoryStore`](db::memory::MemoryStore), which is also what the HTTP tests run against.
//!
//! Every endpoint lives under `/api/v1`:
//!
//! | Method | Path | Input |
//! |---|---|---|
//! | POST | `/create/student` | body: `name`, `age`, `main_way` |
//! | GET | `/get/students` | |
//! | GET | `/get-enrollment-students` | |
//! | DELETE | `/delete/student` | query: `student_id` |
//! | POST | `/create/course` | body: `course_name`, `teacher`, `course_table`, `max_students` |
//! | GET | `/get/course` | query: `teacher_name` (optional) |
//! | PUT | `/update/course` | query: `course_id`; body as for create |
//! | DELETE | `/delete/course` | query: `course_id` |
//! | POST | `/create/enrollment` | body: `student_id`, `course_id`, `enrollment_date` |
//! | GET | `/get-all/enrollments` | |
//!
//! Reads and creates answer `{"data": ...}`. Failures are described in [`errors`].
//!
//! ## Quick Start
//!
//! ```no_run
//! use clap::Parser;
//! use uniapi::{Application, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let args = uniapi::config::Args::parse();
//!     let config = Config::load(&args)?;
//!
//!     uniapi::telemetry::init_telemetry(config.enable_otel_export)?;
//!
//!     let app = Application::new(config).await?;
//!     app.serve(async {
//!         let _ = tokio::signal::ctrl_c().await;
//!     })
//!     .await
//! }
//! ```
//!
//! Migrations in `migrations/` run automatically when an external database is configured. They
//! can also be applied directly:
//!
//! ```no_run
//! # use sqlx::PgPool;
//! # async fn example(pool: PgPool) -> Result<(), sqlx::migrate::MigrateError> {
//! uniapi::migrator().run(&pool).await?;
//! # Ok(())
//! # }
//! ```
pub mod api;
pub mod config;
pub mod db;
pub mod errors;
mod openapi;
pub mod telemetry;
#[cfg(test)]
mod test_utils;
pub mod types;

use std::sync::Arc;

use axum::{
    Json, Router,
    http::{self, HeaderValue, Method},
    routing::{delete, get, post, put},
};
use axum_prometheus::PrometheusMetricLayer;
use bon::Builder;
use sqlx::{PgPool, postgres::PgPoolOptions};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{Level, debug, info};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

pub use config::Config;

use crate::{
    config::{CorsOrigin, DatabaseConfig, PoolSettings},
    db::{memory::MemoryStore, store::PgStore, store::UniversityStore},
    openapi::ApiDoc,
};

/// Shared state handed to every handler
#[derive(Clone, Builder)]
pub struct AppState {
    pub store: Arc<dyn UniversityStore>,
    pub config: Config,
}

/// Get the uniapi database migrator
pub fn migrator() -> sqlx::migrate::Migrator {
    sqlx::migrate!("./migrations")
}

/// Connect to PostgreSQL with the configured pool settings and bring the schema up to date
async fn setup_database(url: &str, settings: &PoolSettings) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .min_connections(settings.min_connections)
        .acquire_timeout(settings.acquire_timeout())
        .idle_timeout(settings.idle_timeout())
        .max_lifetime(settings.max_lifetime())
        .connect(url)
        .await?;

    migrator().run(&pool).await?;
    Ok(pool)
}

/// Build the store selected by `config.database`. The pool is returned too so it can be closed
/// on shutdown.
async fn setup_store(config: &Config) -> anyhow::Result<(Arc<dyn UniversityStore>, Option<PgPool>)> {
    match &config.database {
        DatabaseConfig::External { url, pool } => {
            info!("Using external database");
            let pool = setup_database(url, pool).await?;
            Ok((Arc::new(PgStore::new(pool.clone())), Some(pool)))
        }
        DatabaseConfig::Memory => {
            info!("Using in-memory store: data will be lost on shutdown");
            Ok((Arc::new(MemoryStore::new()), None))
        }
    }
}

fn create_cors_layer(config: &Config) -> anyhow::Result<CorsLayer> {
    let origins = &config.cors.allowed_origins;

    // A literal "*" cannot be mixed into an origin list
    let allow_origin = if origins.iter().any(|origin| matches!(origin, CorsOrigin::Wildcard)) {
        AllowOrigin::any()
    } else {
        let mut values = Vec::with_capacity(origins.len());
        for origin in origins {
            if let CorsOrigin::Url(url) = origin {
                values.push(url.origin().ascii_serialization().parse::<HeaderValue>()?);
            }
        }
        AllowOrigin::list(values)
    };

    let mut cors = CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([http::header::CONTENT_TYPE]);

    if let Some(max_age) = config.cors.max_age {
        cors = cors.max_age(std::time::Duration::from_secs(max_age));
    }

    Ok(cors)
}

/// Build the application router.
///
/// Mounts `/healthz`, the `/api/v1` routes, the API docs (when `docs.enabled`) and the
/// Prometheus endpoint (when `enable_metrics`), then wraps everything in CORS and request
/// tracing.
pub fn build_router(state: AppState) -> anyhow::Result<Router> {
    let api_routes = Router::new()
        // Students
        .route("/create/student", post(api::handlers::students::create_student))
        .route("/get/students", get(api::handlers::students::list_students))
        .route("/get-enrollment-students", get(api::handlers::students::list_enrolled_students))
        .route("/delete/student", delete(api::handlers::students::delete_student))
        // Courses
        .route("/create/course", post(api::handlers::courses::create_course))
        .route("/get/course", get(api::handlers::courses::list_courses))
        .route("/update/course", put(api::handlers::courses::update_course))
        .route("/delete/course", delete(api::handlers::courses::delete_course))
        // Enrollments
        .route("/create/enrollment", post(api::handlers::enrollments::create_enrollment))
        .route("/get-all/enrollments", get(api::handlers::enrollments::list_enrollments))
        .with_state(state.clone());

    let mut router = Router::new()
        .route("/healthz", get(|| async { "OK" }))
        .nest("/api/v1", api_routes);

    if state.config.docs.enabled {
        let doc = ApiDoc::openapi();
        router = router
            .route(&state.config.docs.openapi_json_path(), get({
                let doc = doc.clone();
                move || async move { Json(doc) }
            }))
            .merge(Scalar::with_url(state.config.docs.path.clone(), doc));
    }

    let mut router = router.layer(create_cors_layer(&state.config)?);

    if state.config.enable_metrics {
        let (prometheus_layer, metric_handle) = PrometheusMetricLayer::pair();
        router = router
            .route("/internal/metrics", get(|| async move { metric_handle.render() }))
            .layer(prometheus_layer);
    }

    let router = router.layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO)),
    );

    Ok(router)
}

pub struct Application {
    router: Router,
    config: Config,
    pool: Option<PgPool>,
}

impl Application {
    /// Create a new application instance, connecting to and migrating the configured database
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        debug!("Starting university API with configuration: {:#?}", config);

        let (store, pool) = setup_store(&config).await?;
        let mut app = Self::new_with_store(config, store)?;
        app.pool = pool;
        Ok(app)
    }

    /// Create an application over an already constructed store
    pub fn new_with_store(config: Config, store: Arc<dyn UniversityStore>) -> anyhow::Result<Self> {
        let state = AppState::builder().store(store).config(config.clone()).build();
        let router = build_router(state)?;

        Ok(Self {
            router,
            config,
            pool: None,
        })
    }

    /// Convert application into a test server (for tests)
    #[cfg(test)]
    pub fn into_test_server(self) -> axum_test::TestServer {
        axum_test::TestServer::new(self.router.into_make_service()).expect("Failed to create test server")
    }

    /// Serve until `shutdown` resolves, then release the pool and flush telemetry
    pub async fn serve<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let bind_addr = self.config.bind_address();
        let listener = TcpListener::bind(&bind_addr).await?;
        info!(
            "University API listening on http://{}, available at http://localhost:{}",
            bind_addr, self.config.port
        );
        if self.config.docs.enabled {
            info!("API docs at http://localhost:{}{}", self.config.port, self.config.docs.path);
        }

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown)
            .await?;

        if let Some(pool) = self.pool {
            info!("Closing database connections...");
            pool.close().await;
        }

        info!("Shutting down telemetry...");
        telemetry::shutdown_telemetry();

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::CorsConfig;
    use crate::test_utils::create_test_config;
    use axum::body::Body;
    use tower::ServiceExt;

    fn test_router(config: Config) -> Router {
        let state = AppState::builder()
            .store(Arc::new(MemoryStore::new()))
            .config(config)
            .build();
        build_router(state).expect("Failed to build router")
    }

    fn preflight(origin: &str) -> http::Request<Body> {
        http::Request::builder()
            .method(Method::OPTIONS)
            .uri("/api/v1/delete/course")
            .header(http::header::ORIGIN, origin)
            .header(http::header::ACCESS_CONTROL_REQUEST_METHOD, "DELETE")
            .body(Body::empty())
            .unwrap()
    }

    #[test_log::test(tokio::test)]
    async fn test_healthz() {
        let server = Application::new_with_store(create_test_config(), Arc::new(MemoryStore::new()))
            .unwrap()
            .into_test_server();

        let response = server.get("/healthz").await;
        response.assert_status_ok();
        response.assert_text("OK");
    }

    #[test_log::test(tokio::test)]
    async fn test_docs_are_served() {
        let server = Application::new_with_store(create_test_config(), Arc::new(MemoryStore::new()))
            .unwrap()
            .into_test_server();

        let response = server.get("/api/docs/openapi.json").await;
        response.assert_status_ok();
        let doc: serde_json::Value = response.json();
        assert_eq!(doc["info"]["title"], "University courses api");
        assert!(doc["paths"]["/api/v1/update/course"]["put"].is_object());

        server.get("/api/docs").await.assert_status_ok();
    }

    #[test_log::test(tokio::test)]
    async fn test_docs_can_be_disabled() {
        let mut config = create_test_config();
        config.docs.enabled = false;
        let server = Application::new_with_store(config, Arc::new(MemoryStore::new()))
            .unwrap()
            .into_test_server();

        server.get("/api/docs/openapi.json").await.assert_status_not_found();
        server.get("/api/docs").await.assert_status_not_found();
    }

    #[test_log::test(tokio::test)]
    async fn test_metrics_endpoint() {
        let mut config = create_test_config();
        config.enable_metrics = true;
        let server = Application::new_with_store(config, Arc::new(MemoryStore::new()))
            .unwrap()
            .into_test_server();

        server.get("/api/v1/get/students").await.assert_status_ok();
        server.get("/internal/metrics").await.assert_status_ok();
    }

    #[test_log::test(tokio::test)]
    async fn test_metrics_disabled_by_default() {
        let server = Application::new_with_store(create_test_config(), Arc::new(MemoryStore::new()))
            .unwrap()
            .into_test_server();

        server.get("/internal/metrics").await.assert_status_not_found();
    }

    #[tokio::test]
    async fn test_cors_wildcard() {
        let router = test_router(create_test_config());

        let response = router.oneshot(preflight("https://anywhere.example")).await.unwrap();
        assert_eq!(
            response.headers().get(http::header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "*"
        );
    }

    #[tokio::test]
    async fn test_cors_origin_list() {
        let mut config = create_test_config();
        config.cors = CorsConfig {
            allowed_origins: vec![CorsOrigin::Url("https://app.example.com".parse().unwrap())],
            max_age: None,
        };
        let router = test_router(config);

        let response = router.clone().oneshot(preflight("https://app.example.com")).await.unwrap();
        assert_eq!(
            response.headers().get(http::header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "https://app.example.com"
        );

        let response = router.oneshot(preflight("https://evil.example")).await.unwrap();
        assert!(response.headers().get(http::header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
    }
}
