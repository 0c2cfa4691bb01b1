pub mod middleware;
pub mod routes;

use std::sync::Arc;

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use warden_application::AuthService;
use warden_core::{HealthProbe, SessionStore, TokenAuthority};

/// Shared handles, constructed once at startup and injected everywhere.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub sessions: Arc<dyn SessionStore>,
    pub tokens: Arc<dyn TokenAuthority>,
    pub probe: Arc<dyn HealthProbe>,
}

/// Assemble the full HTTP surface.
pub fn router(state: AppState) -> Router {
    let guarded = Router::new()
        .route("/protected", get(routes::protected::protected))
        .route_layer(from_fn_with_state(state.clone(), middleware::require_session));

    Router::new()
        .route("/auth/register", post(routes::register::register))
        .route("/auth/login", post(routes::login::login))
        .route("/auth/logout", post(routes::logout::logout))
        .route("/health", get(routes::health::health))
        .merge(guarded)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
