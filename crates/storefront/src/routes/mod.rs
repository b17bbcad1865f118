//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Health check
//! GET  /home                   - Trending, categories and free games
//!
//! # Games
//! GET  /games                  - Browse (?q=&genre=&sort=popularity|price_asc|price_desc)
//! GET  /games/deals            - Discounted games
//! GET  /games/free             - Free-to-play games
//! GET  /games/{slug}           - Game detail
//!
//! # Cart
//! GET  /cart                   - Cart with totals
//! POST /cart/add               - Add one copy ({slug}); 409 when out of stock
//! POST /cart/update            - Set quantity ({gameId, quantity})
//! POST /cart/remove            - Remove line ({gameId})
//! POST /cart/clear             - Empty the cart
//! GET  /cart/count             - Cart count badge
//!
//! # Checkout
//! POST /checkout               - Validate and place the order
//!
//! # Auth
//! GET  /auth/me                - Current identity
//! POST /auth/login             - Demo account login
//! POST /auth/signup            - Signup (signs in directly)
//! POST /auth/logout            - Logout
//!
//! # Mock API
//! GET  /api/games              - Every game
//! GET  /api/games/{slug}       - One game, 404 when absent
//! POST /api/checkout           - Simulated payment processor
//! ```

pub mod api;
pub mod auth;
pub mod cart;
pub mod checkout;
pub mod games;
pub mod home;

use axum::{
    Router,
    http::{HeaderName, Request},
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::middleware::{REQUEST_ID_HEADER, request_id_middleware};
use crate::state::AppState;

/// Create the game routes router.
pub fn game_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(games::index))
        .route("/deals", get(games::deals))
        .route("/free", get(games::free))
        .route("/{slug}", get(games::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
        .route("/count", get(cart::count))
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/me", get(auth::me))
        .route("/login", post(auth::login))
        .route("/signup", post(auth::signup))
        .route("/logout", post(auth::logout))
}

/// Create the mock API routes router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/games", get(api::list_games))
        .route("/games/{slug}", get(api::get_game))
        .route("/checkout", post(api::checkout))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/home", get(home::home))
        .nest("/games", game_routes())
        .nest("/cart", cart_routes())
        .route("/checkout", post(checkout::place_order))
        .nest("/auth", auth_routes())
        .nest("/api", api_routes())
}

/// Build the complete application with its middleware stack.
pub fn app(state: AppState) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    routes()
        .with_state(state)
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = tracing::field::Empty,
                )
            }),
        )
        .layer(CorsLayer::permissive().expose_headers([request_id]))
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}
