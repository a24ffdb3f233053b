//! Data models for bookshelf.
//!
//! These are the documents as they are persisted in the store:
//!
//! - [`Book`]: a book, referencing its author by id
//! - [`Author`]: an author, identified externally by name

mod author;
mod book;

pub use author::Author;
pub use book::Book;
