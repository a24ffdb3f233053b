//! DataLoaders for batching store lookups.
//!
//! `Book.author` is resolved lazily when the book was not produced by a query
//! that already joined its author (e.g. the result of `addBook`). All such
//! lookups issued while executing one request are collected by the loader and
//! served with a single `_id $in [...]` query.

use std::collections::HashMap;
use std::sync::Arc;

use async_graphql::dataloader::Loader;
use mongodb::bson::oid::ObjectId;

use crate::error::BookshelfError;
use crate::model::Author;
use crate::storage::SharedStore;

pub struct AuthorLoader {
    store: SharedStore,
}

impl AuthorLoader {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }
}

impl Loader<ObjectId> for AuthorLoader {
    type Value = Author;
    type Error = Arc<BookshelfError>;

    async fn load(&self, keys: &[ObjectId]) -> Result<HashMap<ObjectId, Author>, Self::Error> {
        tracing::debug!(count = keys.len(), "Loading authors");
        let authors = self.store.find_authors_by_ids(keys).await.map_err(Arc::new)?;
        Ok(authors.into_iter().map(|a| (a.id, a)).collect())
    }
}
