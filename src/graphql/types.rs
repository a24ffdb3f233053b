use crate::error::BookshelfError;
use crate::model::{Author as ModelAuthor, Book as ModelBook};
use async_graphql::{ComplexObject, Context, ID, SimpleObject, dataloader::DataLoader};
use mongodb::bson::oid::ObjectId;

use super::loaders::AuthorLoader;

/// Converts a stored count to a GraphQL `Int`, saturating at `i32::MAX`.
pub(crate) fn to_int(count: u64) -> i32 {
    i32::try_from(count).unwrap_or(i32::MAX)
}

#[derive(SimpleObject, Clone, Debug, PartialEq)]
pub struct Author {
    pub name: String,
    pub id: ID,
    pub born: Option<i32>,
    pub book_count: Option<i32>,
}

impl Author {
    pub fn with_book_count(mut self, count: u64) -> Self {
        self.book_count = Some(to_int(count));
        self
    }
}

impl From<ModelAuthor> for Author {
    fn from(a: ModelAuthor) -> Self {
        Self {
            name: a.name,
            id: ID::from(a.id.to_hex()),
            born: a.born,
            book_count: None,
        }
    }
}

#[derive(SimpleObject, Clone, Debug)]
#[graphql(complex)]
pub struct Book {
    pub title: String,
    pub published: i32,
    pub genres: Vec<String>,
    pub id: ID,

    #[graphql(skip)]
    pub author_id: ObjectId,

    /// Set when the author was joined in by the query that produced the book.
    #[graphql(skip)]
    pub populated_author: Option<Author>,
}

impl Book {
    pub fn with_author(mut self, author: Author) -> Self {
        self.populated_author = Some(author);
        self
    }
}

#[ComplexObject]
impl Book {
    async fn author(&self, ctx: &Context<'_>) -> async_graphql::Result<Author> {
        if let Some(ref author) = self.populated_author {
            return Ok(author.clone());
        }

        let loader = ctx.data::<DataLoader<AuthorLoader>>()?;
        let author = loader.load_one(self.author_id).await?.ok_or_else(|| {
            BookshelfError::NotFound(format!("Author {} of book '{}'", self.author_id, self.title))
        })?;
        Ok(author.into())
    }
}

impl From<ModelBook> for Book {
    fn from(b: ModelBook) -> Self {
        Self {
            title: b.title,
            published: b.published,
            genres: b.genres,
            id: ID::from(b.id.to_hex()),
            author_id: b.author,
            populated_author: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_int_saturates() {
        assert_eq!(to_int(0), 0);
        assert_eq!(to_int(42), 42);
        assert_eq!(to_int(u64::MAX), i32::MAX);
    }

    #[test]
    fn test_author_conversion() {
        let model = ModelAuthor::new("Robert Martin").with_born(1952);
        let id = model.id.to_hex();
        let author: Author = model.into();

        assert_eq!(author.name, "Robert Martin");
        assert_eq!(author.id, ID::from(id));
        assert_eq!(author.born, Some(1952));
        assert_eq!(author.book_count, None);
        assert_eq!(author.with_book_count(3).book_count, Some(3));
    }

    #[test]
    fn test_book_conversion_keeps_author_reference() {
        let author_id = ObjectId::new();
        let model = ModelBook::new("Clean Code", 2008, author_id, vec!["dev".into()]);
        let book: Book = model.into();

        assert_eq!(book.author_id, author_id);
        assert!(book.populated_author.is_none());
        assert_eq!(book.genres, vec!["dev".to_string()]);
    }
}
