use super::{BookFilter, Store};
use crate::{
    error::{BookshelfError, Result},
    model::{Author, Book},
};
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use std::collections::HashMap;

/// Store used when the process started without a usable database connection.
pub struct UnavailableStore {
    reason: String,
}

impl UnavailableStore {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    fn fail<T>(&self) -> Result<T> {
        Err(BookshelfError::StoreUnavailable(self.reason.clone()))
    }
}

#[async_trait]
impl Store for UnavailableStore {
    async fn count_books(&self, _filter: &BookFilter) -> Result<u64> {
        self.fail()
    }

    async fn count_authors(&self) -> Result<u64> {
        self.fail()
    }

    async fn find_books(&self, _filter: &BookFilter) -> Result<Vec<Book>> {
        self.fail()
    }

    async fn find_book_by_title(&self, _title: &str) -> Result<Option<Book>> {
        self.fail()
    }

    async fn find_author_by_name(&self, _name: &str) -> Result<Option<Author>> {
        self.fail()
    }

    async fn find_authors_by_ids(&self, _ids: &[ObjectId]) -> Result<Vec<Author>> {
        self.fail()
    }

    async fn list_authors(&self) -> Result<Vec<Author>> {
        self.fail()
    }

    async fn count_books_by_author(&self) -> Result<HashMap<ObjectId, u64>> {
        self.fail()
    }

    async fn insert_author(&self, _author: &Author) -> Result<()> {
        self.fail()
    }

    async fn insert_book(&self, _book: &Book) -> Result<()> {
        self.fail()
    }

    async fn delete_author(&self, _id: ObjectId) -> Result<bool> {
        self.fail()
    }

    async fn set_author_born(&self, _name: &str, _born: i32) -> Result<Option<Author>> {
        self.fail()
    }

    async fn close(&self) -> Result<()> {
        Ok(())
    }
}
