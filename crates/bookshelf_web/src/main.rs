#![warn(clippy::dbg_macro)]

use actix_web::http::header;
use actix_web::{middleware, web, App, HttpResponse, HttpServer};
use bookshelf_core::{init_logging, CatalogStore};
use error::{StartupError, WebError};
use rusqlite::Connection;

mod books;
mod config;
mod error;
mod form;
mod named;
mod template;


use named::{Authors, Genres};

type ServerResult = Result<HttpResponse, WebError>;

/// Runs `f` on the blocking pool with a connection scoped to this request.
///
/// The connection is dropped when `f` returns, whatever the outcome.
async fn with_connection<T, F>(store: web::Data<CatalogStore>, f: F) -> Result<T, WebError>
where
    F: FnOnce(&mut Connection) -> Result<T, WebError> + Send + 'static,
    T: Send + 'static,
{
    web::block(move || {
        let mut conn = store.connect()?;
        f(&mut conn)
    })
    .await
    .map_err(|_| WebError::Blocking)?
}

fn html_ok(html: String) -> HttpResponse {
    HttpResponse::Ok()
        .insert_header(header::ContentType(mime::TEXT_HTML_UTF_8))
        .body(html)
}

/// Post/redirect/get: every successful write answers with 303 to a list page.
fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

async fn index() -> HttpResponse {
    see_other("/books")
}

async fn health() -> HttpResponse {
    HttpResponse::Ok().body("ok")
}

fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index))
        .route("/health", web::get().to(health))
        .route("/books", web::get().to(books::list))
        .route("/books/new", web::get().to(books::new_form))
        .route("/books/new", web::post().to(books::create))
        .route("/books/{id}/edit", web::get().to(books::edit_form))
        .route("/books/{id}/edit", web::post().to(books::update))
        .route("/books/{id}/delete", web::post().to(books::delete))
        .route("/authors", web::get().to(named::list::<Authors>))
        .route("/authors/new", web::get().to(named::new_form::<Authors>))
        .route("/authors/new", web::post().to(named::create::<Authors>))
        .route("/authors/{id}/edit", web::get().to(named::edit_form::<Authors>))
        .route("/authors/{id}/edit", web::post().to(named::update::<Authors>))
        .route("/authors/{id}/delete", web::post().to(named::delete::<Authors>))
        .route("/genres", web::get().to(named::list::<Genres>))
        .route("/genres/new", web::get().to(named::new_form::<Genres>))
        .route("/genres/new", web::post().to(named::create::<Genres>))
        .route("/genres/{id}/edit", web::get().to(named::edit_form::<Genres>))
        .route("/genres/{id}/edit", web::post().to(named::update::<Genres>))
        .route("/genres/{id}/delete", web::post().to(named::delete::<Genres>));
}

async fn inner_main() -> Result<(), StartupError> {
    let config = config::load()?;
    init_logging(&config.log_level, config.log_dir.as_deref())?;

    let store = web::Data::new(CatalogStore::open(&config.database_path)?);

    log::info!(
        "event=server_start module=web status=ok bind={} workers={} database={}",
        config.bind,
        config.workers,
        config.database_path.display()
    );
    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(store.clone())
            .configure(configure_routes)
    })
    .workers(config.workers)
    .bind(config.bind.as_str())?
    .run()
    .await?;

    Ok(())
}

#[actix_web::main]
async fn main() {
    if let Err(e) = inner_main().await {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
