use super::{BookFilter, Store};
use crate::{
    error::{BookshelfError, Result},
    model::{Author, Book},
};
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Default)]
struct Collections {
    authors: Vec<Author>,
    books: Vec<Book>,
}

/// Process-local store. Documents are kept in insertion order and the
/// unique keys (book title, author name) are checked under the write lock.
#[derive(Default)]
pub struct InMemoryStore {
    state: RwLock<Collections>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for InMemoryStore {
    async fn count_books(&self, filter: &BookFilter) -> Result<u64> {
        let state = self.state.read().await;
        Ok(state.books.iter().filter(|b| filter.matches(b)).count() as u64)
    }

    async fn count_authors(&self) -> Result<u64> {
        Ok(self.state.read().await.authors.len() as u64)
    }

    async fn find_books(&self, filter: &BookFilter) -> Result<Vec<Book>> {
        let state = self.state.read().await;
        Ok(state
            .books
            .iter()
            .filter(|b| filter.matches(b))
            .cloned()
            .collect())
    }

    async fn find_book_by_title(&self, title: &str) -> Result<Option<Book>> {
        let state = self.state.read().await;
        Ok(state.books.iter().find(|b| b.title == title).cloned())
    }

    async fn find_author_by_name(&self, name: &str) -> Result<Option<Author>> {
        let state = self.state.read().await;
        Ok(state.authors.iter().find(|a| a.name == name).cloned())
    }

    async fn find_authors_by_ids(&self, ids: &[ObjectId]) -> Result<Vec<Author>> {
        let state = self.state.read().await;
        Ok(state
            .authors
            .iter()
            .filter(|a| ids.contains(&a.id))
            .cloned()
            .collect())
    }

    async fn list_authors(&self) -> Result<Vec<Author>> {
        Ok(self.state.read().await.authors.clone())
    }

    async fn count_books_by_author(&self) -> Result<HashMap<ObjectId, u64>> {
        let state = self.state.read().await;
        let mut counts = HashMap::new();
        for book in &state.books {
            *counts.entry(book.author).or_insert(0) += 1;
        }
        Ok(counts)
    }

    async fn insert_author(&self, author: &Author) -> Result<()> {
        let mut state = self.state.write().await;
        if state.authors.iter().any(|a| a.name == author.name) {
            return Err(BookshelfError::Duplicate(format!(
                "author name '{}' already exists",
                author.name
            )));
        }
        state.authors.push(author.clone());
        Ok(())
    }

    async fn insert_book(&self, book: &Book) -> Result<()> {
        let mut state = self.state.write().await;
        if state.books.iter().any(|b| b.title == book.title) {
            return Err(BookshelfError::Duplicate(format!(
                "book title '{}' already exists",
                book.title
            )));
        }
        state.books.push(book.clone());
        Ok(())
    }

    async fn delete_author(&self, id: ObjectId) -> Result<bool> {
        let mut state = self.state.write().await;
        let before = state.authors.len();
        state.authors.retain(|a| a.id != id);
        Ok(state.authors.len() != before)
    }

    async fn set_author_born(&self, name: &str, born: i32) -> Result<Option<Author>> {
        let mut state = self.state.write().await;
        Ok(state.authors.iter_mut().find(|a| a.name == name).map(|author| {
            author.born = Some(born);
            author.clone()
        }))
    }

    async fn close(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_and_find() {
        let store = InMemoryStore::new();
        let author = Author::new("Robert Martin");
        store.insert_author(&author).await.unwrap();

        let book = Book::new("Clean Code", 2008, author.id, vec!["dev".into()]);
        store.insert_book(&book).await.unwrap();

        assert_eq!(store.count_authors().await.unwrap(), 1);
        assert_eq!(store.count_books(&BookFilter::default()).await.unwrap(), 1);
        assert_eq!(
            store.find_author_by_name("Robert Martin").await.unwrap(),
            Some(author.clone())
        );
        assert_eq!(
            store.find_book_by_title("Clean Code").await.unwrap(),
            Some(book)
        );
        assert!(store.find_book_by_title("clean code").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unique_keys() {
        let store = InMemoryStore::new();
        let author = Author::new("Joshua Kerievsky");
        store.insert_author(&author).await.unwrap();

        let err = store
            .insert_author(&Author::new("Joshua Kerievsky"))
            .await
            .unwrap_err();
        assert!(err.is_duplicate());

        let book = Book::new("Refactoring to patterns", 2008, author.id, Vec::new());
        store.insert_book(&book).await.unwrap();
        let again = Book::new("Refactoring to patterns", 2010, author.id, Vec::new());
        assert!(store.insert_book(&again).await.unwrap_err().is_duplicate());
        assert_eq!(store.count_books(&BookFilter::default()).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_count_books_by_author() {
        let store = InMemoryStore::new();
        let fowler = Author::new("Martin Fowler");
        let beck = Author::new("Kent Beck");
        store.insert_author(&fowler).await.unwrap();
        store.insert_author(&beck).await.unwrap();

        for title in ["Refactoring", "Patterns of Enterprise Application Architecture"] {
            let book = Book::new(title, 2002, fowler.id, Vec::new());
            store.insert_book(&book).await.unwrap();
        }

        let counts = store.count_books_by_author().await.unwrap();
        assert_eq!(counts.get(&fowler.id), Some(&2));
        assert_eq!(counts.get(&beck.id), None);
    }

    #[tokio::test]
    async fn test_set_author_born_and_delete() {
        let store = InMemoryStore::new();
        let author = Author::new("Fyodor Dostoevsky");
        store.insert_author(&author).await.unwrap();

        let updated = store
            .set_author_born("Fyodor Dostoevsky", 1821)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.born, Some(1821));
        assert!(store.set_author_born("Nobody", 1900).await.unwrap().is_none());

        assert!(store.delete_author(author.id).await.unwrap());
        assert!(!store.delete_author(author.id).await.unwrap());
        assert_eq!(store.count_authors().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_find_authors_by_ids_skips_unknown() {
        let store = InMemoryStore::new();
        let author = Author::new("Sandi Metz").with_born(1954);
        store.insert_author(&author).await.unwrap();

        let found = store
            .find_authors_by_ids(&[author.id, ObjectId::new()])
            .await
            .unwrap();
        assert_eq!(found, vec![author]);
    }
}
