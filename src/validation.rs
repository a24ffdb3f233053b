//! Input validation for books and authors.

use crate::error::{BookshelfError, Result};
use crate::model::{Author, Book};

/// Maximum allowed length for a book title.
pub const MAX_TITLE_LENGTH: usize = 200;

/// Maximum allowed length for an author name.
pub const MAX_NAME_LENGTH: usize = 100;

/// Maximum allowed length for a single genre.
pub const MAX_GENRE_LENGTH: usize = 50;

/// Validates a book title.
pub fn validate_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(BookshelfError::Validation("Title cannot be empty".to_string()));
    }
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(BookshelfError::Validation(format!(
            "Title exceeds maximum length of {} characters",
            MAX_TITLE_LENGTH
        )));
    }
    Ok(())
}

/// Validates an author name.
pub fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(BookshelfError::Validation(
            "Author name cannot be empty".to_string(),
        ));
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(BookshelfError::Validation(format!(
            "Author name exceeds maximum length of {} characters",
            MAX_NAME_LENGTH
        )));
    }
    Ok(())
}

/// Validates a genre name.
pub fn validate_genre(genre: &str) -> Result<()> {
    if genre.trim().is_empty() {
        return Err(BookshelfError::Validation("Genre cannot be empty".to_string()));
    }
    if genre.chars().count() > MAX_GENRE_LENGTH {
        return Err(BookshelfError::Validation(format!(
            "Genre exceeds maximum length of {} characters",
            MAX_GENRE_LENGTH
        )));
    }
    Ok(())
}

pub fn validate_author(author: &Author) -> Result<()> {
    validate_name(&author.name)
}

pub fn validate_book(book: &Book) -> Result<()> {
    validate_title(&book.title)?;
    for genre in &book.genres {
        validate_genre(genre)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;

    #[test]
    fn test_validate_title_empty() {
        assert!(validate_title("").is_err());
        assert!(validate_title("   ").is_err());
    }

    #[test]
    fn test_validate_title_valid() {
        assert!(validate_title("Clean Code").is_ok());
    }

    #[test]
    fn test_validate_title_too_long() {
        let long_title = "a".repeat(MAX_TITLE_LENGTH + 1);
        assert!(validate_title(&long_title).is_err());
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("Robert Martin").is_ok());
        assert!(validate_name("").is_err());
        assert!(validate_name(&"x".repeat(MAX_NAME_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_validate_book_genres() {
        let author = ObjectId::new();
        let book = Book::new("Refactoring", 2018, author, vec!["refactoring".into()]);
        assert!(validate_book(&book).is_ok());

        let book = Book::new("Refactoring", 2018, author, vec!["".into()]);
        assert!(matches!(
            validate_book(&book),
            Err(BookshelfError::Validation(_))
        ));
    }

    #[test]
    fn test_validate_book_without_genres() {
        let book = Book::new("The Demon", 1970, ObjectId::new(), Vec::new());
        assert!(validate_book(&book).is_ok());
    }
}
