use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::handlers::{
    AppState, add_book, borrow_history, get_books, register, request_book, return_book,
};

/// Creates the API router with all lending endpoints
///
/// Public:
/// - POST /register - Register a user
///
/// Basic-authenticated:
/// - GET /getBooks - List the catalog
/// - POST /addBook - Add a book (librarian)
/// - POST /requestBook - Request a book for a date range
/// - POST /requests/:id/return - Mark a request returned (librarian)
/// - GET /user/borrow_history - The caller's own requests
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check endpoint
        .route("/health", get(health_check))
        .route("/register", post(register))
        .route("/getBooks", get(get_books))
        .route("/addBook", post(add_book))
        .route("/requestBook", post(request_book))
        .route("/requests/:id/return", post(return_book))
        .route("/user/borrow_history", get(borrow_history))
        // Add tracing middleware
        .layer(TraceLayer::new_for_http())
        // Add application state
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
