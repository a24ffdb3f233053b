use super::{AUTHORS_COLLECTION, BOOKS_COLLECTION, BookFilter, Store};
use crate::{
    error::Result,
    model::{Author, Book},
};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    Client, Collection, Database, IndexModel,
    bson::{Bson, Document, doc, oid::ObjectId},
    options::{IndexOptions, ReturnDocument},
};
use std::collections::HashMap;

pub struct MongoStore {
    client: Client,
    database: Database,
    books: Collection<Book>,
    authors: Collection<Author>,
}

impl MongoStore {
    /// Parses the connection string and creates the client.
    ///
    /// The driver connects lazily, so an unreachable server only shows up on
    /// the first operation; use [`MongoStore::ping`] to check eagerly.
    pub async fn connect(uri: &str, database: &str) -> Result<Self> {
        let client = Client::with_uri_str(uri).await?;
        let database = client.database(database);
        Ok(Self {
            books: database.collection(BOOKS_COLLECTION),
            authors: database.collection(AUTHORS_COLLECTION),
            database,
            client,
        })
    }

    pub async fn ping(&self) -> Result<()> {
        self.database.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }

    /// Book titles and author names are unique keys.
    pub async fn ensure_indexes(&self) -> Result<()> {
        let unique = IndexOptions::builder().unique(true).build();

        self.books
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "title": 1 })
                    .options(unique.clone())
                    .build(),
            )
            .await?;
        self.books
            .create_index(IndexModel::builder().keys(doc! { "author": 1 }).build())
            .await?;
        self.authors
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "name": 1 })
                    .options(unique)
                    .build(),
            )
            .await?;

        tracing::debug!("Indexes ensured");
        Ok(())
    }
}

fn book_filter_document(filter: &BookFilter) -> Document {
    let mut document = Document::new();
    if let Some(author) = filter.author {
        document.insert("author", author);
    }
    if let Some(ref genre) = filter.genre {
        document.insert("genres", doc! { "$in": [genre.as_str()] });
    }
    document
}

fn count_from(value: Option<&Bson>) -> u64 {
    match value {
        Some(Bson::Int32(n)) => (*n).max(0) as u64,
        Some(Bson::Int64(n)) => (*n).max(0) as u64,
        Some(Bson::Double(n)) => n.max(0.0) as u64,
        _ => 0,
    }
}

#[async_trait]
impl Store for MongoStore {
    async fn count_books(&self, filter: &BookFilter) -> Result<u64> {
        Ok(self
            .books
            .count_documents(book_filter_document(filter))
            .await?)
    }

    async fn count_authors(&self) -> Result<u64> {
        Ok(self.authors.count_documents(doc! {}).await?)
    }

    async fn find_books(&self, filter: &BookFilter) -> Result<Vec<Book>> {
        let cursor = self
            .books
            .find(book_filter_document(filter))
            .sort(doc! { "_id": 1 })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_book_by_title(&self, title: &str) -> Result<Option<Book>> {
        Ok(self.books.find_one(doc! { "title": title }).await?)
    }

    async fn find_author_by_name(&self, name: &str) -> Result<Option<Author>> {
        Ok(self.authors.find_one(doc! { "name": name }).await?)
    }

    async fn find_authors_by_ids(&self, ids: &[ObjectId]) -> Result<Vec<Author>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let cursor = self
            .authors
            .find(doc! { "_id": { "$in": ids.to_vec() } })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn list_authors(&self) -> Result<Vec<Author>> {
        let cursor = self.authors.find(doc! {}).sort(doc! { "_id": 1 }).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn count_books_by_author(&self) -> Result<HashMap<ObjectId, u64>> {
        let pipeline = vec![doc! {
            "$group": { "_id": "$author", "count": { "$sum": 1 } }
        }];
        let groups: Vec<Document> = self.books.aggregate(pipeline).await?.try_collect().await?;

        let mut counts = HashMap::with_capacity(groups.len());
        for group in groups {
            match group.get_object_id("_id") {
                Ok(author) => {
                    counts.insert(author, count_from(group.get("count")));
                }
                Err(_) => tracing::warn!(group = %group, "Skipping book group without author id"),
            }
        }
        Ok(counts)
    }

    async fn insert_author(&self, author: &Author) -> Result<()> {
        self.authors.insert_one(author).await?;
        Ok(())
    }

    async fn insert_book(&self, book: &Book) -> Result<()> {
        self.books.insert_one(book).await?;
        Ok(())
    }

    async fn delete_author(&self, id: ObjectId) -> Result<bool> {
        let result = self.authors.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }

    async fn set_author_born(&self, name: &str, born: i32) -> Result<Option<Author>> {
        Ok(self
            .authors
            .find_one_and_update(doc! { "name": name }, doc! { "$set": { "born": born } })
            .return_document(ReturnDocument::After)
            .await?)
    }

    async fn close(&self) -> Result<()> {
        self.client.clone().shutdown().await;
        tracing::info!("MongoDB connection closed");
        Ok(())
    }
}
