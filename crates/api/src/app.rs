use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use domain::services::{CalendarService, NoopCalendarService};

use crate::config::Config;
use crate::middleware::{
    metrics_handler, metrics_middleware, require_family_auth, security_headers_middleware,
    trace_id,
};
use crate::routes::{chore_instances, chores, health};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub calendar: Arc<dyn CalendarService>,
}

/// Builds the application with the default no-op calendar collaborator.
pub fn create_app(config: Config, pool: PgPool) -> Router {
    create_app_with_calendar(config, pool, Arc::new(NoopCalendarService::new()))
}

pub fn create_app_with_calendar(
    config: Config,
    pool: PgPool,
    calendar: Arc<dyn CalendarService>,
) -> Router {
    let config = Arc::new(config);

    let state = AppState {
        pool,
        config: config.clone(),
        calendar,
    };

    // Build CORS layer based on configuration
    let cors = if config.security.cors_origins.is_empty() {
        // Default: allow any origin (for development)
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        // Production: only allow specified origins
        use tower_http::cors::AllowOrigin;
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // Protected routes (require a valid family JWT)
    // Using /api/v1 prefix for versioned API
    let protected_routes = Router::new()
        // Chore routes (v1)
        .route(
            "/api/v1/chores",
            post(chores::create_chore).get(chores::list_chores),
        )
        .route("/api/v1/chores/stats", get(chores::get_stats))
        .route("/api/v1/chores/generate", post(chores::generate_instances))
        .route(
            "/api/v1/chores/:chore_id",
            get(chores::get_chore)
                .patch(chores::update_chore)
                .delete(chores::delete_chore),
        )
        .route(
            "/api/v1/chores/:chore_id/instances",
            get(chores::list_chore_instances),
        )
        // Chore instance routes (v1)
        .route(
            "/api/v1/chore-instances",
            get(chore_instances::list_instances),
        )
        .route(
            "/api/v1/chore-instances/:instance_id",
            get(chore_instances::get_instance),
        )
        .route(
            "/api/v1/chore-instances/:instance_id/complete",
            post(chore_instances::complete_instance),
        )
        .route(
            "/api/v1/chore-instances/:instance_id/verify",
            post(chore_instances::verify_instance),
        )
        // Auth runs first (outermost layer = runs first)
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_family_auth,
        ));

    // Public routes (no authentication required)
    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/metrics", get(metrics_handler));

    // Merge all routes
    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(middleware::from_fn(security_headers_middleware)) // Security headers
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware)) // Prometheus metrics
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id)) // Request ID and logging
        .layer(cors)
        .with_state(state)
}
