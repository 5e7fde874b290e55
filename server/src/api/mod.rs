//! API routes for bookstore-server

pub mod accounts;
pub mod announcements;
pub mod bookmarks;
pub mod books;
pub mod cart;
pub mod health;
pub mod live;
pub mod orders;
pub mod reviews;

use axum::routing::{delete, get, patch, post};
use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::middleware::{auth_middleware, require_admin, require_staff};
use crate::state::AppState;

/// Create the combined router
pub fn router(state: AppState) -> Router {
    // Public: catalog browsing, reviews, announcements, registration
    let public = Router::new()
        .route("/api/register", post(accounts::register))
        .route("/api/login", post(accounts::login))
        .route("/api/books", get(books::list))
        .route("/api/books/{id}", get(books::get))
        .route("/api/books/{id}/reviews", get(reviews::list))
        .route("/api/genres", get(books::genres))
        .route("/api/announcements", get(announcements::active));

    // Member: anything acting as the signed-in user
    let member = Router::new()
        .route("/api/me", get(accounts::me))
        .route("/api/cart", get(cart::get).post(cart::add))
        .route("/api/cart/{book_id}", delete(cart::remove))
        .route("/api/bookmarks", get(bookmarks::list).post(bookmarks::add))
        .route("/api/bookmarks/{book_id}", delete(bookmarks::remove))
        .route("/api/orders", get(orders::mine).post(orders::place))
        .route("/api/orders/{id}/cancel", post(orders::cancel))
        .route("/api/reviews", post(reviews::create))
        .route("/api/reviews/{id}", delete(reviews::delete))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Staff: pickup desk
    let staff = Router::new()
        .route("/api/staff/orders/pending", get(orders::pending))
        .route("/api/staff/orders/claim/{code}", get(orders::by_claim_code))
        .route("/api/staff/orders/complete", post(orders::complete))
        .route("/api/staff/pickups/live", get(live::pickup_stream))
        .layer(middleware::from_fn(require_staff))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Admin: catalog and announcement management
    let admin = Router::new()
        .route("/api/admin/books", post(books::create))
        .route(
            "/api/admin/books/{id}",
            patch(books::update).delete(books::delete),
        )
        .route(
            "/api/admin/announcements",
            get(announcements::all).post(announcements::create),
        )
        .route(
            "/api/admin/announcements/{id}",
            patch(announcements::update).delete(announcements::delete),
        )
        .layer(middleware::from_fn(require_admin))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/health", get(health::health_check))
        .merge(public)
        .merge(member)
        .merge(staff)
        .merge(admin)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
