//! GraphQL schema and resolvers for bookshelf.
//!
//! ## Usage
//!
//! ```bash
//! # Start the GraphQL server
//! bookshelf serve --port 4000
//!
//! # Execute a query from CLI
//! bookshelf query '{ bookCount allAuthors { name bookCount } }'
//!
//! # Execute a mutation from CLI
//! bookshelf mutate 'editAuthor(name: "Robert Martin", setBornTo: 1952) { name born }'
//! ```
//!
//! ## Schema
//!
//! - **Queries**: `bookCount`, `authorCount`, `allBooks`, `allAuthors`
//! - **Mutations**: `addBook`, `editAuthor`

pub mod errors;
mod loaders;
mod schema;
mod types;

pub use loaders::AuthorLoader;
pub use schema::{BookshelfSchema, MutationRoot, QueryRoot, build_schema, schema_sdl};
pub use types::*;
