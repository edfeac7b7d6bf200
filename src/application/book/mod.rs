mod book_service;
mod errors;

pub use book_service::{
    ServiceDependencies, count_books, create_book, delete_book, ensure_book_exists, get_book,
    list_books, update_book_price,
};
pub use errors::{BookApplicationError, Result};
