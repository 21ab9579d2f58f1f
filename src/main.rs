//! Family Tree Backend
//!
//! REST backend for a shared family tree: members browse the tree, comment on
//! profiles and request edits; administrators curate persons and
//! relationships. Sign-in is handled by an upstream gateway.

mod api;
mod auth;
mod config;
mod db;
mod errors;
mod models;
mod tree;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use db::Repository;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    let (json_layer, plain_layer) = if config.log_json {
        (Some(fmt::layer().json()), None)
    } else {
        (None, Some(fmt::layer()))
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(plain_layer)
        .init();

    tracing::info!("Starting Family Tree Backend");
    tracing::info!("Database path: {:?}", config.db_path);
    tracing::info!("Bind address: {}", config.bind_addr);

    if config.api_psk.is_none() {
        tracing::warn!("No API PSK configured (FAMTREE_API_PSK). Gateway authentication is disabled!");
    }

    // Initialize database
    let pool = db::init_database(&config.db_path).await?;
    let repo = Arc::new(Repository::new(pool));

    let state = AppState {
        repo,
        config: Arc::new(config.clone()),
    };

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Clone PSK for the auth layer
    let psk = state.config.api_psk.clone();

    let api_routes = Router::new()
        // Tree
        .route("/tree", get(api::get_tree))
        // Persons
        .route("/persons", get(api::list_persons).post(api::create_person))
        .route(
            "/persons/{id}",
            get(api::get_person)
                .put(api::update_person)
                .delete(api::delete_person),
        )
        .route("/persons/{id}/note", put(api::update_person_note))
        .route("/persons/{id}/default-root", put(api::set_default_root))
        .route(
            "/persons/{id}/comments",
            get(api::list_comments).post(api::create_comment),
        )
        .route(
            "/persons/{id}/edit-requests",
            post(api::submit_edit_request),
        )
        // Relationships
        .route(
            "/relationships",
            get(api::list_relationships).post(api::create_relationship),
        )
        .route(
            "/relationships/{id}",
            delete(api::delete_relationship),
        )
        // Comments
        .route("/comments/{id}", delete(api::delete_comment))
        // Edit requests
        .route("/edit-requests", get(api::list_edit_requests))
        .route("/edit-requests/{id}/approve", put(api::approve_edit_request))
        .route("/edit-requests/{id}/reject", put(api::reject_edit_request))
        // Current user
        .route("/me", get(api::get_me).put(api::update_me))
        .route(
            "/me/root-node",
            get(api::get_my_root_node)
                .put(api::set_my_root_node)
                .delete(api::clear_my_root_node),
        )
        .route("/me/edit-requests", get(api::list_own_edit_requests))
        // Profiles
        .route("/profiles", get(api::list_profiles))
        .route("/profiles/{id}", put(api::update_profile))
        // Apply PSK auth middleware
        .layer(middleware::from_fn(move |req, next| {
            auth::psk_auth_layer(psk.clone(), req, next)
        }));

    // Health check (no auth required)
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests;
