//! Route definitions for the URL shortener API
//!
//! This module configures all HTTP routes and maps them to their respective
//! handlers. It creates the Axum router with the application state.

use axum::routing::{get, post};
use axum::Router;

use crate::database::AppState;
use crate::handler::{redirect_url, register_user, shorten_url, url_history, user_info};

/// Creates and configures the Axum application router with all routes
///
/// # Route Definitions
///
/// - `POST /user/register` - Registers a user with a quota tier
/// - `GET /user/info` - Reports tier, usage and remaining quota
/// - `POST /url/shorten` - Shortens a URL behind the quota gate
/// - `GET /url/history` - Lists a user's shortened URLs
/// - `GET /{short_id}` - Redirects to the original URL (public endpoint)
///
/// # Arguments
///
/// * `state` - Application state containing the shared database instance
///
/// # Returns
///
/// Configured Axum Router ready to handle requests
///
/// # Example Usage
///
/// ```no_run
/// # use std::sync::Arc;
/// # use shortlink::database::{init_db, AppState};
/// # use shortlink::route::create_app;
/// # let db = init_db("data.db").unwrap();
/// let state = AppState { db: Arc::new(db) };
/// let app = create_app(state);
/// // axum::serve(listener, app).await.unwrap();
/// ```
pub fn create_app(state: AppState) -> Router {
    let user_routes = Router::new()
        .route("/register", post(register_user))
        .route("/info", get(user_info));

    let url_routes = Router::new()
        .route("/shorten", post(shorten_url))
        .route("/history", get(url_history));

    Router::new()
        // Public redirect endpoint - resolves a short identifier
        .route("/{short_id}", get(redirect_url))
        .nest("/user", user_routes)
        .nest("/url", url_routes)
        // Inject the application state into all handlers
        .with_state(state)
}
