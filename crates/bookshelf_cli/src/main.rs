//! CLI entry point for database bootstrap and quick status checks.
//!
//! # Responsibility
//! - Create (or upgrade) the catalog schema in a database file.
//! - Print deterministic row counts for local sanity checks.

use bookshelf_core::{
    AuthorRepository, BookRepository, CatalogStore, GenreRepository, RepoResult,
    SqliteAuthorRepository, SqliteBookRepository, SqliteGenreRepository,
};
use std::process::ExitCode;

const DEFAULT_DB_PATH: &str = "library.db";

struct Counts {
    books: i64,
    authors: i64,
    genres: i64,
}

fn main() -> ExitCode {
    let db_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_DB_PATH.to_string());

    println!("bookshelf_core ping={}", bookshelf_core::ping());
    println!("bookshelf_core version={}", bookshelf_core::core_version());

    match run(&db_path) {
        Ok(counts) => {
            println!("database={db_path} status=ready");
            println!(
                "books={} authors={} genres={}",
                counts.books, counts.authors, counts.genres
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("database={db_path} status=error error={err}");
            ExitCode::FAILURE
        }
    }
}

fn run(db_path: &str) -> RepoResult<Counts> {
    let store = CatalogStore::open(db_path)?;
    let mut conn = store.connect()?;

    let books = SqliteBookRepository::try_new(&mut conn)?.count_books()?;
    let authors = SqliteAuthorRepository::try_new(&mut conn)?.count_authors()?;
    let genres = SqliteGenreRepository::try_new(&mut conn)?.count_genres()?;
    Ok(Counts {
        books,
        authors,
        genres,
    })
}
