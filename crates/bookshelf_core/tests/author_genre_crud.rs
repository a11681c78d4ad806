use bookshelf_core::db::open_db_in_memory;
use bookshelf_core::{
    AuthorRepository, BookDraft, BookRepository, EntityKind, GenreRepository, RepoError,
    SqliteAuthorRepository, SqliteBookRepository, SqliteGenreRepository, ValidationError,
};
use std::collections::BTreeSet;

#[test]
fn author_crud_roundtrip() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteAuthorRepository::try_new(&mut conn).unwrap();

    let id = repo.create_author("Mary Shelley").unwrap();
    assert_eq!(repo.get_author(id).unwrap().unwrap().name, "Mary Shelley");

    repo.update_author(id, "Mary Wollstonecraft Shelley").unwrap();
    let listed = repo.list_authors().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].name, "Mary Wollstonecraft Shelley");

    repo.delete_author(id).unwrap();
    assert!(repo.get_author(id).unwrap().is_none());
    assert_eq!(repo.count_authors().unwrap(), 0);
}

#[test]
fn duplicate_names_are_allowed() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteGenreRepository::try_new(&mut conn).unwrap();

    let first = repo.create_genre("Mystery").unwrap();
    let second = repo.create_genre("Mystery").unwrap();
    assert_ne!(first, second);
    assert_eq!(repo.count_genres().unwrap(), 2);
}

#[test]
fn blank_names_are_rejected() {
    let mut conn = open_db_in_memory().unwrap();
    {
        let mut authors = SqliteAuthorRepository::try_new(&mut conn).unwrap();
        let err = authors.create_author("  ").unwrap_err();
        assert!(matches!(
            err,
            RepoError::Validation(ValidationError::BlankField {
                entity: EntityKind::Author,
                field: "name"
            })
        ));
        assert_eq!(authors.count_authors().unwrap(), 0);
    }

    let mut genres = SqliteGenreRepository::try_new(&mut conn).unwrap();
    let id = genres.create_genre("Essay").unwrap();
    let err = genres.update_genre(id, "").unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
    assert_eq!(genres.get_genre(id).unwrap().unwrap().name, "Essay");
}

#[test]
fn update_and_delete_missing_rows_are_not_found() {
    let mut conn = open_db_in_memory().unwrap();
    let mut authors = SqliteAuthorRepository::try_new(&mut conn).unwrap();
    assert!(matches!(
        authors.update_author(3, "Nobody").unwrap_err(),
        RepoError::NotFound {
            entity: EntityKind::Author,
            id: 3
        }
    ));
    assert!(matches!(
        authors.delete_author(3).unwrap_err(),
        RepoError::NotFound { .. }
    ));
}

#[test]
fn deleting_author_removes_it_from_books_but_keeps_books() {
    let mut conn = open_db_in_memory().unwrap();
    let (keep, drop_me) = {
        let mut authors = SqliteAuthorRepository::try_new(&mut conn).unwrap();
        (
            authors.create_author("Keep").unwrap(),
            authors.create_author("Drop").unwrap(),
        )
    };

    let (first, second) = {
        let mut books = SqliteBookRepository::try_new(&mut conn).unwrap();
        (
            books
                .create_book(&BookDraft::new("First", [keep, drop_me], []))
                .unwrap(),
            books
                .create_book(&BookDraft::new("Second", [drop_me], []))
                .unwrap(),
        )
    };

    SqliteAuthorRepository::try_new(&mut conn)
        .unwrap()
        .delete_author(drop_me)
        .unwrap();

    let books = SqliteBookRepository::try_new(&mut conn).unwrap();
    assert_eq!(books.count_books().unwrap(), 2);
    assert_eq!(books.get_book_author_ids(first).unwrap(), BTreeSet::from([keep]));
    assert!(books.get_book_author_ids(second).unwrap().is_empty());
}

#[test]
fn deleting_genre_removes_it_from_books_but_keeps_books() {
    let mut conn = open_db_in_memory().unwrap();
    let genre = SqliteGenreRepository::try_new(&mut conn)
        .unwrap()
        .create_genre("Horror")
        .unwrap();
    let book = SqliteBookRepository::try_new(&mut conn)
        .unwrap()
        .create_book(&BookDraft::new("Carmilla", [], [genre]))
        .unwrap();

    SqliteGenreRepository::try_new(&mut conn)
        .unwrap()
        .delete_genre(genre)
        .unwrap();

    let books = SqliteBookRepository::try_new(&mut conn).unwrap();
    assert!(books.get_book(book).unwrap().is_some());
    assert!(books.get_book_genre_ids(book).unwrap().is_empty());
}

#[test]
fn list_for_book_returns_linked_names() {
    let mut conn = open_db_in_memory().unwrap();
    let (borges, casares) = {
        let mut authors = SqliteAuthorRepository::try_new(&mut conn).unwrap();
        authors.create_author("Unrelated").unwrap();
        (
            authors.create_author("Jorge Luis Borges").unwrap(),
            authors.create_author("Adolfo Bioy Casares").unwrap(),
        )
    };
    let book = SqliteBookRepository::try_new(&mut conn)
        .unwrap()
        .create_book(&BookDraft::new("Chronicles of Bustos Domecq", [casares, borges], []))
        .unwrap();

    let authors = SqliteAuthorRepository::try_new(&mut conn).unwrap();
    let names: Vec<_> = authors
        .list_authors_for_book(book)
        .unwrap()
        .into_iter()
        .map(|author| author.name)
        .collect();
    assert_eq!(names, vec!["Jorge Luis Borges", "Adolfo Bioy Casares"]);

    let genres = SqliteGenreRepository::try_new(&mut conn).unwrap();
    assert!(genres.list_genres_for_book(book).unwrap().is_empty());
}

#[test]
fn repository_rejects_connection_without_schema() {
    let mut conn = rusqlite::Connection::open_in_memory().unwrap();
    let err = SqliteAuthorRepository::try_new(&mut conn)
        .err()
        .expect("bare connection must be rejected");
    assert!(matches!(err, RepoError::MissingRequiredTable("books")));
}
