use actix_web::web;
use bookshelf_core::{
    Author, AuthorRepository, Book, BookDraft, BookId, BookRepository, BookService, CatalogStore,
    EntityKind, Genre, GenreRepository, RepoError, SqliteAuthorRepository, SqliteBookRepository,
    SqliteGenreRepository,
};
use rusqlite::Connection;
use std::collections::{BTreeSet, HashMap};

use crate::error::WebError;
use crate::form::FormFields;
use crate::template::{
    escape_html, render, render_page, BOOK_FORM_TEMPLATE, BOOK_LIST_TEMPLATE, BOOK_ROW_TEMPLATE,
    CHECKBOX_TEMPLATE,
};
use crate::{html_ok, see_other, with_connection, ServerResult};

const BOOKS_PATH: &str = "/books";

struct BookRow {
    book: Book,
    authors: Vec<Author>,
    genres: Vec<Genre>,
}

struct FormChoices {
    authors: Vec<Author>,
    genres: Vec<Genre>,
}

pub(crate) async fn list(store: web::Data<CatalogStore>) -> ServerResult {
    let rows = with_connection(store, |conn| {
        let books = SqliteBookRepository::try_new(conn)?.list_books()?;
        let authors = SqliteAuthorRepository::try_new(conn)?;
        let mut rows = Vec::with_capacity(books.len());
        for book in books {
            rows.push(BookRow {
                authors: authors.list_authors_for_book(book.id)?,
                genres: Vec::new(),
                book,
            });
        }
        let genres = SqliteGenreRepository::try_new(conn)?;
        for row in &mut rows {
            row.genres = genres.list_genres_for_book(row.book.id)?;
        }
        Ok(rows)
    })
    .await?;

    let rendered_rows: String = rows.iter().map(render_row).collect();
    let mut vars = HashMap::new();
    vars.insert("rows", rendered_rows);
    Ok(html_ok(render_page("Books", &render(BOOK_LIST_TEMPLATE, &vars))))
}

pub(crate) async fn new_form(store: web::Data<CatalogStore>) -> ServerResult {
    let choices = with_connection(store, load_choices).await?;
    let html = render_form(
        "New book",
        "/books/new",
        "",
        &choices,
        &BTreeSet::new(),
        &BTreeSet::new(),
    );
    Ok(html_ok(html))
}

pub(crate) async fn create(store: web::Data<CatalogStore>, body: web::Bytes) -> ServerResult {
    let draft = parse_draft(&body)?;
    let detail = with_connection(store, move |conn| {
        let mut service = BookService::new(SqliteBookRepository::try_new(conn)?);
        Ok(service.create_book(&draft)?)
    })
    .await?;

    log::info!(
        "event=book_create module=web status=ok book_id={} authors={} genres={}",
        detail.book.id,
        detail.author_ids.len(),
        detail.genre_ids.len()
    );
    Ok(see_other(BOOKS_PATH))
}

pub(crate) async fn edit_form(
    store: web::Data<CatalogStore>,
    path: web::Path<BookId>,
) -> ServerResult {
    let id = path.into_inner();
    let (detail, choices) = with_connection(store, move |conn| {
        let detail = BookService::new(SqliteBookRepository::try_new(conn)?)
            .book_detail(id)?
            .ok_or(RepoError::NotFound {
                entity: EntityKind::Book,
                id,
            })?;
        Ok((detail, load_choices(conn)?))
    })
    .await?;

    let html = render_form(
        "Edit book",
        &format!("/books/{id}/edit"),
        &detail.book.title,
        &choices,
        &detail.author_ids,
        &detail.genre_ids,
    );
    Ok(html_ok(html))
}

pub(crate) async fn update(
    store: web::Data<CatalogStore>,
    path: web::Path<BookId>,
    body: web::Bytes,
) -> ServerResult {
    let id = path.into_inner();
    let draft = parse_draft(&body)?;
    with_connection(store, move |conn| {
        let mut service = BookService::new(SqliteBookRepository::try_new(conn)?);
        service.update_book(id, &draft)?;
        Ok(())
    })
    .await?;

    log::info!("event=book_update module=web status=ok book_id={id}");
    Ok(see_other(BOOKS_PATH))
}

pub(crate) async fn delete(
    store: web::Data<CatalogStore>,
    path: web::Path<BookId>,
) -> ServerResult {
    let id = path.into_inner();
    with_connection(store, move |conn| {
        let mut service = BookService::new(SqliteBookRepository::try_new(conn)?);
        Ok(service.delete_book(id)?)
    })
    .await?;

    log::info!("event=book_delete module=web status=ok book_id={id}");
    Ok(see_other(BOOKS_PATH))
}

fn parse_draft(body: &[u8]) -> Result<BookDraft, WebError> {
    let form = FormFields::parse(body);
    Ok(BookDraft {
        title: form.text("title"),
        author_ids: form.ids("authors")?,
        genre_ids: form.ids("genres")?,
    })
}

fn load_choices(conn: &mut Connection) -> Result<FormChoices, WebError> {
    let authors = SqliteAuthorRepository::try_new(conn)?.list_authors()?;
    let genres = SqliteGenreRepository::try_new(conn)?.list_genres()?;
    Ok(FormChoices { authors, genres })
}

fn render_row(row: &BookRow) -> String {
    let mut vars = HashMap::new();
    vars.insert("id", row.book.id.to_string());
    vars.insert("title", escape_html(&row.book.title));
    vars.insert(
        "authors",
        join_names(row.authors.iter().map(|a| a.name.as_str())),
    );
    vars.insert(
        "genres",
        join_names(row.genres.iter().map(|g| g.name.as_str())),
    );
    render(BOOK_ROW_TEMPLATE, &vars)
}

fn join_names<'a>(names: impl Iterator<Item = &'a str>) -> String {
    escape_html(&names.collect::<Vec<_>>().join(", "))
}

fn render_form(
    heading: &str,
    action: &str,
    title: &str,
    choices: &FormChoices,
    author_ids: &BTreeSet<i64>,
    genre_ids: &BTreeSet<i64>,
) -> String {
    let authors: String = choices
        .authors
        .iter()
        .map(|a| render_checkbox("authors", a.id, &a.name, author_ids))
        .collect();
    let genres: String = choices
        .genres
        .iter()
        .map(|g| render_checkbox("genres", g.id, &g.name, genre_ids))
        .collect();

    let mut vars = HashMap::new();
    vars.insert("action", escape_html(action));
    vars.insert("title", escape_html(title));
    vars.insert("authors", authors);
    vars.insert("genres", genres);
    render_page(heading, &render(BOOK_FORM_TEMPLATE, &vars))
}

fn render_checkbox(field: &str, id: i64, name: &str, selected: &BTreeSet<i64>) -> String {
    let mut vars = HashMap::new();
    vars.insert("field", field.to_string());
    vars.insert("id", id.to_string());
    vars.insert("name", escape_html(name));
    vars.insert(
        "checked",
        if selected.contains(&id) {
            " checked".to_string()
        } else {
            String::new()
        },
    );
    render(CHECKBOX_TEMPLATE, &vars)
}
