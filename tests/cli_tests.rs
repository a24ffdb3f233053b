use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn bookshelf_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("bookshelf"))
}

/// Command running in an empty directory against the in-memory store.
fn memory_cmd(dir: &TempDir) -> Command {
    let mut cmd = bookshelf_cmd();
    cmd.current_dir(dir.path())
        .env("BOOKSHELF_STORE", "memory")
        .env_remove("MONGODB_URI")
        .env_remove("RUST_LOG");
    cmd
}

// =============================================================================
// Basic CLI
// =============================================================================

#[test]
fn test_help() {
    bookshelf_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("GraphQL API for books and authors"));
}

#[test]
fn test_version() {
    bookshelf_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("bookshelf"));
}

#[test]
fn test_schema_prints_sdl() {
    bookshelf_cmd()
        .arg("schema")
        .assert()
        .success()
        .stdout(predicate::str::contains("type Book"))
        .stdout(predicate::str::contains("addBook("))
        .stdout(predicate::str::contains("editAuthor("));
}

// =============================================================================
// Query / mutate
// =============================================================================

#[test]
fn test_query_counts_on_empty_store() {
    let temp_dir = TempDir::new().unwrap();

    memory_cmd(&temp_dir)
        .arg("query")
        .arg("{ bookCount authorCount }")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"bookCount\": 0"))
        .stdout(predicate::str::contains("\"authorCount\": 0"));
}

#[test]
fn test_mutate_add_book() {
    let temp_dir = TempDir::new().unwrap();

    memory_cmd(&temp_dir)
        .arg("mutate")
        .arg(r#"addBook(title: "Clean Code", author: "Robert Martin", published: 2008, genres: ["dev"]) { title author { name } }"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"title\": \"Clean Code\""))
        .stdout(predicate::str::contains("\"name\": \"Robert Martin\""));
}

#[test]
fn test_query_with_variables() {
    let temp_dir = TempDir::new().unwrap();

    memory_cmd(&temp_dir)
        .arg("query")
        .arg("query Books($genre: String) { allBooks(genre: $genre) { title } }")
        .arg("--variables")
        .arg(r#"{"genre": "crime"}"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"allBooks\": []"));
}

#[test]
fn test_invalid_variables() {
    let temp_dir = TempDir::new().unwrap();

    memory_cmd(&temp_dir)
        .arg("query")
        .arg("{ bookCount }")
        .arg("--variables")
        .arg("not json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Variables must be a JSON object"));
}

#[test]
fn test_missing_uri_keeps_running() {
    let temp_dir = TempDir::new().unwrap();

    bookshelf_cmd()
        .current_dir(temp_dir.path())
        .env("BOOKSHELF_STORE", "mongodb")
        .env_remove("MONGODB_URI")
        .arg("query")
        .arg("{ bookCount }")
        .assert()
        .success()
        .stdout(predicate::str::contains("Store unavailable"));
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn test_config_file_selects_backend() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(
        temp_dir.path().join(".bookshelf.yml"),
        "store:\n  backend: memory\n",
    )
    .unwrap();

    bookshelf_cmd()
        .current_dir(temp_dir.path())
        .env_remove("BOOKSHELF_STORE")
        .env_remove("MONGODB_URI")
        .arg("query")
        .arg("{ authorCount }")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"authorCount\": 0"));
}

#[test]
fn test_missing_explicit_config() {
    let temp_dir = TempDir::new().unwrap();

    memory_cmd(&temp_dir)
        .arg("--config")
        .arg("does-not-exist.yml")
        .arg("query")
        .arg("{ bookCount }")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config file not found"));
}

#[test]
fn test_invalid_backend_env() {
    let temp_dir = TempDir::new().unwrap();

    bookshelf_cmd()
        .current_dir(temp_dir.path())
        .env("BOOKSHELF_STORE", "sqlite")
        .arg("query")
        .arg("{ bookCount }")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown store backend"));
}
