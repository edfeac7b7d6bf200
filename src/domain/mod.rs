pub mod book;
pub mod catalog;
pub mod commands;
pub mod errors;
pub mod filter;
pub mod value_objects;

pub use book::Book;
pub use catalog::{BookCatalog, PriceChange};
pub use errors::*;
pub use filter::BookFilter;
pub use value_objects::*;
