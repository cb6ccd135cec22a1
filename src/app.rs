use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    middleware::from_fn_with_state,
    routing::get,
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::auth::{AuthError, JwtKeys};
use crate::config::{AppConfig, SecurityConfig};
use crate::database::TaskStore;
use crate::handlers::{protected, public};
use crate::middleware::jwt_auth_middleware;
use crate::services::TaskService;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub tasks: TaskService,
    pub jwt: Arc<JwtKeys>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(config: AppConfig, store: Arc<dyn TaskStore>) -> Result<Self, AuthError> {
        let jwt = JwtKeys::from_config(&config.security)?;

        Ok(Self {
            tasks: TaskService::new(store),
            jwt: Arc::new(jwt),
            config: Arc::new(config),
        })
    }
}

/// Build the full router: public endpoints plus the JWT-protected task API
pub fn app(state: AppState) -> Router {
    let api = &state.config.api;
    let security = &state.config.security;

    let mut router = Router::new()
        // Public
        .route("/", get(public::root))
        .route("/health", get(public::health))
        // Protected
        .merge(task_routes(state.clone()))
        .layer(DefaultBodyLimit::max(api.max_request_size_bytes));

    if security.enable_cors {
        router = router.layer(cors_layer(security));
    }
    if api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    router.with_state(state)
}

fn task_routes(state: AppState) -> Router<AppState> {
    use protected::tasks;

    Router::new()
        .route("/api/tasks", get(tasks::list).post(tasks::create))
        // Static segment; matched ahead of the :task_id capture
        .route("/api/tasks/filtered", get(tasks::filtered))
        .route(
            "/api/tasks/:task_id",
            get(tasks::get).put(tasks::update).delete(tasks::delete),
        )
        .route_layer(from_fn_with_state(state, jwt_auth_middleware))
}

fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    if security.cors_origins.iter().any(|origin| origin == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}
