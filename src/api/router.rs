use axum::{Router, middleware::from_fn_with_state, routing::get};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::handlers::{
    AppState, create_book, delete_book, get_book, get_log_level, health_check, list_books,
    set_log_level, total_books, update_book_price,
};
use super::middleware::track_request;

/// Creates the API router with all book store endpoints
///
/// - GET /books/health - Health check
/// - POST /book - Create a book
/// - GET /book?id= - Get a book
/// - PUT /book?id=&price= - Update a book's price
/// - DELETE /book?id= - Delete a book
/// - GET /books/total - Count books matching filters
/// - GET /books - List books matching filters, sorted by title
/// - GET /logs/level, PUT /logs/level - Inspect or change a logger's level
///
/// Every route passes through the request tracking middleware.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check endpoint
        .route("/books/health", get(health_check))
        // Single book endpoints
        .route(
            "/book",
            get(get_book)
                .post(create_book)
                .put(update_book_price)
                .delete(delete_book),
        )
        // Collection queries
        .route("/books/total", get(total_books))
        .route("/books", get(list_books))
        // Logger administration
        .route("/logs/level", get(get_log_level).put(set_log_level))
        // Request numbering and request log
        .layer(from_fn_with_state(state.clone(), track_request))
        // Add tracing middleware
        .layer(TraceLayer::new_for_http())
        // Add application state
        .with_state(state)
}
