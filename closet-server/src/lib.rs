//! closet-server library - HTTP surface for the closet service
//!
//! Public routes: health, register, login. Everything else requires a
//! bearer token issued by register/login.

use axum::Router;
use closet_common::db::SqliteStore;
use sqlx::SqlitePool;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod api;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Item, outfit, user and session storage
    pub store: SqliteStore,
    /// Lifetime of newly issued session tokens
    pub session_ttl_seconds: i64,
}

impl AppState {
    pub fn new(pool: SqlitePool, session_ttl_seconds: i64) -> Self {
        Self {
            store: SqliteStore::new(pool),
            session_ttl_seconds,
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::middleware;
    use axum::routing::{delete, get, patch, post, put};

    // Protected routes (require a session token)
    let protected = Router::new()
        .route("/api/auth/me", get(api::me))
        .route("/api/auth/logout", post(api::logout))
        .route("/api/users", delete(api::delete_account))
        .route(
            "/api/users/profile",
            get(api::get_profile).put(api::update_profile),
        )
        .route("/api/users/change-password", put(api::change_password))
        .route(
            "/api/clothing",
            get(api::list_clothing).post(api::add_clothing),
        )
        .route("/api/clothing/clean-all", patch(api::clean_all_clothing))
        .route("/api/clothing/:id", delete(api::delete_clothing))
        .route("/api/clothing/:id/status", patch(api::update_clothing_status))
        .route(
            "/api/outfits",
            get(api::list_outfits).post(api::create_outfit),
        )
        .route("/api/outfits/random", get(api::random_outfit))
        .route("/api/outfits/:id", delete(api::delete_outfit))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            api::auth_middleware,
        ));

    // Public routes (no authentication)
    let public = Router::new()
        .route("/api/auth/register", post(api::register))
        .route("/api/auth/login", post(api::login))
        .merge(api::health_routes());

    Router::new()
        .merge(protected)
        .merge(public)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
