use async_graphql::{Error, ErrorExtensions};

use crate::error::BookshelfError;

/// Extension code attached to every input-related failure.
pub const BAD_USER_INPUT: &str = "BAD_USER_INPUT";

pub const DUPLICATE_TITLE_MESSAGE: &str = "Book title must be unique";
pub const SAVING_AUTHOR_MESSAGE: &str = "Saving author failed";
pub const SAVING_BOOK_MESSAGE: &str = "Saving book failed";

/// Builds a `BAD_USER_INPUT` error naming the offending argument value and,
/// when present, the underlying store or validation error.
pub fn bad_user_input(
    message: &str,
    invalid_args: &str,
    cause: Option<&BookshelfError>,
) -> Error {
    let invalid_args = invalid_args.to_string();
    let cause = cause.map(|e| e.to_string());

    Error::new(message).extend_with(|_, e| {
        e.set("code", BAD_USER_INPUT);
        e.set("invalidArgs", invalid_args);
        if let Some(cause) = cause {
            e.set("error", cause);
        }
    })
}

pub fn duplicate_title(title: &str) -> Error {
    bad_user_input(DUPLICATE_TITLE_MESSAGE, title, None)
}

pub fn saving_author_failed(name: &str, cause: &BookshelfError) -> Error {
    bad_user_input(SAVING_AUTHOR_MESSAGE, name, Some(cause))
}

pub fn saving_book_failed(title: &str, cause: &BookshelfError) -> Error {
    bad_user_input(SAVING_BOOK_MESSAGE, title, Some(cause))
}
