use std::collections::{HashMap, HashSet};

use async_graphql::{
    Context, EmptySubscription, Object, Schema, dataloader::DataLoader, extensions::Tracing,
};

use crate::model::{Author as ModelAuthor, Book as ModelBook};
use crate::storage::{BookFilter, SharedStore};
use crate::validation;

use super::errors;
use super::loaders::AuthorLoader;
use super::types::*;

pub type BookshelfSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Builds the executable schema. The author loader is shared by all requests;
/// it does not cache, so every request reads current documents.
pub fn build_schema(store: SharedStore) -> BookshelfSchema {
    let author_loader = DataLoader::new(AuthorLoader::new(store.clone()), tokio::spawn);

    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(store)
        .data(author_loader)
        .extension(Tracing)
        .finish()
}

/// SDL of the schema, without needing a store.
pub fn schema_sdl() -> String {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .finish()
        .sdl()
}

fn get_store<'a>(ctx: &'a Context<'_>) -> async_graphql::Result<&'a SharedStore> {
    ctx.data::<SharedStore>()
}

/// Looks up the author by name, saving `candidate` when missing. The flag
/// tells whether this call created the author.
async fn find_or_create_author(
    store: &SharedStore,
    candidate: ModelAuthor,
) -> async_graphql::Result<(ModelAuthor, bool)> {
    if let Some(existing) = store.find_author_by_name(&candidate.name).await? {
        return Ok((existing, false));
    }

    match store.insert_author(&candidate).await {
        Ok(()) => {
            tracing::info!(author = %candidate.name, id = %candidate.id, "Created author");
            Ok((candidate, true))
        }
        Err(e) => {
            // Another request created the same author in the meantime.
            if e.is_duplicate()
                && let Some(existing) = store.find_author_by_name(&candidate.name).await?
            {
                return Ok((existing, false));
            }
            tracing::warn!(author = %candidate.name, error = %e, "Saving author failed");
            Err(errors::saving_author_failed(&candidate.name, &e))
        }
    }
}

/// Compensates an author created for a book that could not be saved. The
/// author is kept if a concurrent request attached a book to it meanwhile.
///
/// Counting and deleting are separate round trips, so after the delete the
/// books are counted again and the author is restored if one appeared.
/// Linking requests do the mirror check in [`ensure_author_exists`].
async fn remove_unused_author(store: &SharedStore, author: &ModelAuthor) {
    let filter = BookFilter::by_author(author.id);
    let result = match store.count_books(&filter).await {
        Ok(0) => store.delete_author(author.id).await,
        Ok(_) => return,
        Err(e) => Err(e),
    };
    match result {
        Ok(_) => tracing::info!(author = %author.name, "Removed author created for failed book"),
        Err(e) => {
            tracing::error!(
                author = %author.name,
                error = %e,
                "Failed to remove author created for failed book"
            );
            return;
        }
    }

    match store.count_books(&filter).await {
        Ok(0) => {}
        Ok(_) => restore_author(store, author).await,
        Err(e) => tracing::error!(author = %author.name, error = %e, "Failed to recount books"),
    }
}

/// Re-inserts an author whose document was removed while a book still
/// references it.
async fn ensure_author_exists(store: &SharedStore, author: &ModelAuthor) {
    match store.find_authors_by_ids(&[author.id]).await {
        Ok(found) if found.is_empty() => restore_author(store, author).await,
        Ok(_) => {}
        Err(e) => tracing::error!(author = %author.name, error = %e, "Failed to check author"),
    }
}

async fn restore_author(store: &SharedStore, author: &ModelAuthor) {
    match store.insert_author(author).await {
        Ok(()) => tracing::warn!(author = %author.name, id = %author.id, "Restored author"),
        Err(e) => tracing::error!(
            author = %author.name,
            id = %author.id,
            error = %e,
            "Failed to restore author"
        ),
    }
}

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Total number of books
    async fn book_count(&self, ctx: &Context<'_>) -> async_graphql::Result<i32> {
        let store = get_store(ctx)?;
        Ok(to_int(store.count_books(&BookFilter::default()).await?))
    }

    /// Total number of authors
    async fn author_count(&self, ctx: &Context<'_>) -> async_graphql::Result<i32> {
        let store = get_store(ctx)?;
        Ok(to_int(store.count_authors().await?))
    }

    /// List books, optionally only those by `author` (exact name) and/or in `genre`
    async fn all_books(
        &self,
        ctx: &Context<'_>,
        author: Option<String>,
        genre: Option<String>,
    ) -> async_graphql::Result<Option<Vec<Book>>> {
        let store = get_store(ctx)?;
        let mut filter = BookFilter::default().with_genre(genre);

        if let Some(name) = author {
            match store.find_author_by_name(&name).await? {
                Some(author) => filter.author = Some(author.id),
                None => {
                    tracing::debug!(author = %name, "No author with this name, no books to list");
                    return Ok(Some(Vec::new()));
                }
            }
        }

        let books = store.find_books(&filter).await?;

        // Join the referenced authors in one lookup.
        let author_ids: Vec<_> = books
            .iter()
            .map(|b| b.author)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let authors: HashMap<_, Author> = store
            .find_authors_by_ids(&author_ids)
            .await?
            .into_iter()
            .map(|a| (a.id, a.into()))
            .collect();

        let books = books
            .into_iter()
            .map(|b| {
                let author = authors.get(&b.author).cloned();
                let book: Book = b.into();
                match author {
                    Some(author) => book.with_author(author),
                    None => book,
                }
            })
            .collect();

        Ok(Some(books))
    }

    /// List authors with the number of books each has written
    async fn all_authors(
        &self,
        ctx: &Context<'_>,
    ) -> async_graphql::Result<Option<Vec<Author>>> {
        let store = get_store(ctx)?;
        let authors = store.list_authors().await?;
        let counts = store.count_books_by_author().await?;

        Ok(Some(
            authors
                .into_iter()
                .map(|a| {
                    let count = counts.get(&a.id).copied().unwrap_or(0);
                    Author::from(a).with_book_count(count)
                })
                .collect(),
        ))
    }
}

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Add a book, creating its author if no author with that name exists yet
    async fn add_book(
        &self,
        ctx: &Context<'_>,
        title: String,
        author: String,
        published: i32,
        genres: Vec<String>,
    ) -> async_graphql::Result<Option<Book>> {
        let store = get_store(ctx)?;

        if store.find_book_by_title(&title).await?.is_some() {
            return Err(errors::duplicate_title(&title));
        }

        // Bad input is rejected before anything is written.
        let candidate = ModelAuthor::new(author);
        if let Err(e) = validation::validate_author(&candidate) {
            return Err(errors::saving_author_failed(&candidate.name, &e));
        }
        let mut book = ModelBook::new(title, published, candidate.id, genres);
        if let Err(e) = validation::validate_book(&book) {
            return Err(errors::saving_book_failed(&book.title, &e));
        }

        let (author, created_author) = find_or_create_author(store, candidate).await?;
        book.author = author.id;

        if let Err(e) = store.insert_book(&book).await {
            tracing::warn!(title = %book.title, error = %e, "Saving book failed");
            if created_author {
                remove_unused_author(store, &author).await;
            }
            if e.is_duplicate() {
                return Err(errors::duplicate_title(&book.title));
            }
            return Err(errors::saving_book_failed(&book.title, &e));
        }

        // A failed request that created this author may have removed it.
        if !created_author {
            ensure_author_exists(store, &author).await;
        }

        tracing::info!(id = %book.id, title = %book.title, author = %author.name, "Added book");
        Ok(Some(book.into()))
    }

    /// Set the born year of an author; returns null if no author has that name
    async fn edit_author(
        &self,
        ctx: &Context<'_>,
        name: String,
        set_born_to: i32,
    ) -> async_graphql::Result<Option<Author>> {
        let store = get_store(ctx)?;

        let Some(updated) = store.set_author_born(&name, set_born_to).await? else {
            tracing::debug!(author = %name, "No author to edit");
            return Ok(None);
        };

        let count = store.count_books(&BookFilter::by_author(updated.id)).await?;
        tracing::info!(author = %updated.name, born = set_born_to, "Updated author");
        Ok(Some(Author::from(updated).with_book_count(count)))
    }
}
