//! Author and genre pages.
//!
//! Both entities are a bare `(id, name)` row, so one set of generic handlers
//! serves `/authors` and `/genres`; [`NamedResource`] supplies the labels and
//! the repository calls.

use actix_web::web;
use bookshelf_core::{
    AuthorRepository, CatalogStore, EntityKind, GenreRepository, RepoError, RepoResult,
    SqliteAuthorRepository, SqliteGenreRepository,
};
use rusqlite::Connection;
use std::collections::HashMap;

use crate::form::FormFields;
use crate::template::{
    escape_html, render, render_page, NAMED_FORM_TEMPLATE, NAMED_LIST_TEMPLATE, NAMED_ROW_TEMPLATE,
};
use crate::{html_ok, see_other, with_connection, ServerResult};

pub(crate) trait NamedResource: 'static {
    const KIND: EntityKind;
    /// URL segment and page title source, e.g. `authors`.
    const COLLECTION: &'static str;
    const HEADING: &'static str;

    fn list(conn: &mut Connection) -> RepoResult<Vec<(i64, String)>>;
    fn get(conn: &mut Connection, id: i64) -> RepoResult<Option<String>>;
    fn create(conn: &mut Connection, name: &str) -> RepoResult<i64>;
    fn update(conn: &mut Connection, id: i64, name: &str) -> RepoResult<()>;
    fn delete(conn: &mut Connection, id: i64) -> RepoResult<()>;
}

pub(crate) struct Authors;
pub(crate) struct Genres;

impl NamedResource for Authors {
    const KIND: EntityKind = EntityKind::Author;
    const COLLECTION: &'static str = "authors";
    const HEADING: &'static str = "Authors";

    fn list(conn: &mut Connection) -> RepoResult<Vec<(i64, String)>> {
        let rows = SqliteAuthorRepository::try_new(conn)?.list_authors()?;
        Ok(rows.into_iter().map(|a| (a.id, a.name)).collect())
    }

    fn get(conn: &mut Connection, id: i64) -> RepoResult<Option<String>> {
        let row = SqliteAuthorRepository::try_new(conn)?.get_author(id)?;
        Ok(row.map(|a| a.name))
    }

    fn create(conn: &mut Connection, name: &str) -> RepoResult<i64> {
        SqliteAuthorRepository::try_new(conn)?.create_author(name)
    }

    fn update(conn: &mut Connection, id: i64, name: &str) -> RepoResult<()> {
        SqliteAuthorRepository::try_new(conn)?.update_author(id, name)
    }

    fn delete(conn: &mut Connection, id: i64) -> RepoResult<()> {
        SqliteAuthorRepository::try_new(conn)?.delete_author(id)
    }
}

impl NamedResource for Genres {
    const KIND: EntityKind = EntityKind::Genre;
    const COLLECTION: &'static str = "genres";
    const HEADING: &'static str = "Genres";

    fn list(conn: &mut Connection) -> RepoResult<Vec<(i64, String)>> {
        let rows = SqliteGenreRepository::try_new(conn)?.list_genres()?;
        Ok(rows.into_iter().map(|g| (g.id, g.name)).collect())
    }

    fn get(conn: &mut Connection, id: i64) -> RepoResult<Option<String>> {
        let row = SqliteGenreRepository::try_new(conn)?.get_genre(id)?;
        Ok(row.map(|g| g.name))
    }

    fn create(conn: &mut Connection, name: &str) -> RepoResult<i64> {
        SqliteGenreRepository::try_new(conn)?.create_genre(name)
    }

    fn update(conn: &mut Connection, id: i64, name: &str) -> RepoResult<()> {
        SqliteGenreRepository::try_new(conn)?.update_genre(id, name)
    }

    fn delete(conn: &mut Connection, id: i64) -> RepoResult<()> {
        SqliteGenreRepository::try_new(conn)?.delete_genre(id)
    }
}

fn collection_path<R: NamedResource>() -> String {
    format!("/{}", R::COLLECTION)
}

pub(crate) async fn list<R: NamedResource>(store: web::Data<CatalogStore>) -> ServerResult {
    let rows = with_connection(store, |conn| Ok(R::list(conn)?)).await?;

    let rendered_rows: String = rows
        .iter()
        .map(|(id, name)| {
            let mut vars = HashMap::new();
            vars.insert("collection", R::COLLECTION.to_string());
            vars.insert("id", id.to_string());
            vars.insert("name", escape_html(name));
            render(NAMED_ROW_TEMPLATE, &vars)
        })
        .collect();

    let mut vars = HashMap::new();
    vars.insert("collection", R::COLLECTION.to_string());
    vars.insert("noun", R::KIND.as_str().to_string());
    vars.insert("rows", rendered_rows);
    Ok(html_ok(render_page(
        R::HEADING,
        &render(NAMED_LIST_TEMPLATE, &vars),
    )))
}

pub(crate) async fn new_form<R: NamedResource>() -> ServerResult {
    let action = format!("/{}/new", R::COLLECTION);
    Ok(html_ok(render_form(
        &format!("New {}", R::KIND),
        &action,
        "",
    )))
}

pub(crate) async fn create<R: NamedResource>(
    store: web::Data<CatalogStore>,
    body: web::Bytes,
) -> ServerResult {
    let name = FormFields::parse(&body).text("name");
    let id = with_connection(store, move |conn| Ok(R::create(conn, &name)?)).await?;

    log::info!(
        "event={}_create module=web status=ok id={}",
        R::KIND,
        id
    );
    Ok(see_other(&collection_path::<R>()))
}

pub(crate) async fn edit_form<R: NamedResource>(
    store: web::Data<CatalogStore>,
    path: web::Path<i64>,
) -> ServerResult {
    let id = path.into_inner();
    let name = with_connection(store, move |conn| {
        R::get(conn, id)?.ok_or_else(|| {
            RepoError::NotFound {
                entity: R::KIND,
                id,
            }
            .into()
        })
    })
    .await?;

    let action = format!("/{}/{id}/edit", R::COLLECTION);
    Ok(html_ok(render_form(
        &format!("Edit {}", R::KIND),
        &action,
        &name,
    )))
}

pub(crate) async fn update<R: NamedResource>(
    store: web::Data<CatalogStore>,
    path: web::Path<i64>,
    body: web::Bytes,
) -> ServerResult {
    let id = path.into_inner();
    let name = FormFields::parse(&body).text("name");
    with_connection(store, move |conn| Ok(R::update(conn, id, &name)?)).await?;

    log::info!("event={}_update module=web status=ok id={}", R::KIND, id);
    Ok(see_other(&collection_path::<R>()))
}

pub(crate) async fn delete<R: NamedResource>(
    store: web::Data<CatalogStore>,
    path: web::Path<i64>,
) -> ServerResult {
    let id = path.into_inner();
    with_connection(store, move |conn| Ok(R::delete(conn, id)?)).await?;

    log::info!("event={}_delete module=web status=ok id={}", R::KIND, id);
    Ok(see_other(&collection_path::<R>()))
}

fn render_form(heading: &str, action: &str, name: &str) -> String {
    let mut vars = HashMap::new();
    vars.insert("action", escape_html(action));
    vars.insert("name", escape_html(name));
    render_page(heading, &render(NAMED_FORM_TEMPLATE, &vars))
}
