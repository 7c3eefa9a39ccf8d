//! Data models for Bookshelf

pub mod book;
pub mod book_id;

// Re-export commonly used types
pub use book::{Book, BookStatus};
pub use book_id::BookId;
