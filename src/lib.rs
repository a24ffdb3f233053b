//! # Bookshelf - a GraphQL API for books and authors
//!
//! Books and authors are stored as documents in MongoDB and exposed through a
//! small GraphQL schema. Adding a book creates its author on the fly when no
//! author with that name exists yet.
//!
//! ## Quick Start
//!
//! ```bash
//! # Point at a MongoDB deployment (or put it in .env)
//! export MONGODB_URI=mongodb://localhost:27017
//!
//! # Start the server on port 4000
//! bookshelf serve
//!
//! # Try it without a database
//! BOOKSHELF_STORE=memory bookshelf query '{ bookCount authorCount }'
//! ```
//!
//! ## Modules
//!
//! - [`cli`]: Command-line interface definitions and handlers
//! - [`config`]: Configuration loading from file and environment
//! - [`error`]: Error types and result aliases
//! - [`graphql`]: GraphQL schema and resolvers
//! - [`model`]: Stored documents (Book, Author)
//! - [`storage`]: Store gateway and its backends
//! - [`validation`]: Input validation utilities

/// Command-line interface definitions using clap.
pub mod cli;

/// Configuration loading and management.
///
/// Reads `.bookshelf.yml` and environment overrides such as `MONGODB_URI`.
pub mod config;

/// Error types and result aliases.
///
/// Defines `BookshelfError` enum and `Result<T>` type alias.
pub mod error;

/// GraphQL schema and resolvers.
pub mod graphql;

/// Data models for books and authors.
pub mod model;

/// Document store gateway.
///
/// The `Store` trait with MongoDB and in-memory implementations.
pub mod storage;

/// Input validation utilities.
pub mod validation;

pub mod logging;
pub mod server;
