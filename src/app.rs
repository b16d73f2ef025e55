use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, State},
    http::{HeaderValue, StatusCode},
    middleware,
    response::IntoResponse,
    routing::{delete, get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::auth::TokenVerifier;
use crate::config::{ApiConfig, SecurityConfig};
use crate::database::PostStore;
use crate::handlers::{protected, public};
use crate::middleware::jwt_auth_middleware;

/// Per-process dependencies handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PostStore>,
    pub verifier: Arc<TokenVerifier>,
}

impl AppState {
    pub fn new(store: Arc<dyn PostStore>, verifier: TokenVerifier) -> Self {
        Self {
            store,
            verifier: Arc::new(verifier),
        }
    }
}

/// Full application router: service routes at the root, post routes under
/// `api.mount_path`.
pub fn app(state: AppState, api: &ApiConfig, cors: Option<CorsLayer>) -> Router {
    let posts = post_routes(state.clone());

    let router = Router::new()
        .route("/", get(root))
        .route("/health", get(health));

    let router = if api.mount_path.is_empty() {
        router.merge(posts)
    } else {
        router.nest(&api.mount_path, posts)
    };

    let mut router = router
        .layer(DefaultBodyLimit::max(api.max_request_size_bytes))
        .with_state(state);

    if let Some(cors) = cors {
        router = router.layer(cors);
    }
    if api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }
    router
}

/// The five post endpoints. Reads of all posts or one post are public; the
/// rest go through bearer authentication.
pub fn post_routes(state: AppState) -> Router<AppState> {
    let auth = middleware::from_fn_with_state(state, jwt_auth_middleware);

    Router::new()
        .route("/posts", get(public::list_posts))
        .route("/post", post(protected::create_post).route_layer(auth.clone()))
        .route(
            "/post/:id",
            get(public::get_post)
                .merge(delete(protected::delete_post).route_layer(auth.clone())),
        )
        .route(
            "/posts/user/:userid",
            get(protected::list_user_posts).route_layer(auth),
        )
}

/// CORS from security settings. `None` when disabled; `*` allows any origin.
pub fn cors_layer(security: &SecurityConfig) -> Option<CorsLayer> {
    if !security.enable_cors {
        return None;
    }
    if security.cors_origins.iter().any(|o| o == "*") {
        return Some(CorsLayer::permissive());
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", o);
                None
            }
        })
        .collect();

    Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any),
    )
}

async fn root() -> Json<Value> {
    Json(json!({
        "name": "Posts API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "list": "GET /posts (public)",
            "show": "GET /post/:id (public)",
            "create": "POST /post (bearer)",
            "delete": "DELETE /post/:id (bearer, owner only)",
            "by_user": "GET /posts/user/:userid (bearer)",
            "health": "GET /health (public)",
        }
    }))
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.store.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "timestamp": now,
                    "database": "unavailable"
                })),
            )
        }
    }
}
