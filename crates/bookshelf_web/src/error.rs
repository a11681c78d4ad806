use actix_web::http::{header::ContentType, StatusCode};
use actix_web::{HttpResponse, ResponseError};
use bookshelf_core::{DbError, LoggingError, RepoError};
use std::collections::HashMap;
use thiserror::Error;

use crate::template::{escape_html, render, render_page, ERROR_TEMPLATE};

/// Failure while handling one request.
#[derive(Error, Debug)]
pub enum WebError {
    #[error("{0}")]
    Repo(#[from] RepoError),

    #[error("{0}")]
    Db(#[from] DbError),

    #[error("invalid form field `{field}`: {reason}")]
    BadForm { field: &'static str, reason: String },

    #[error("storage task was cancelled")]
    Blocking,
}

impl ResponseError for WebError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Repo(RepoError::Validation(_)) => StatusCode::BAD_REQUEST,
            Self::Repo(RepoError::NotFound { .. }) => StatusCode::NOT_FOUND,
            Self::BadForm { .. } => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!(
                "event=request_failed module=web status=error http_status={} error={}",
                status.as_u16(),
                self
            );
        } else {
            log::info!(
                "event=request_rejected module=web status=error http_status={} error={}",
                status.as_u16(),
                self
            );
        }

        let mut vars = HashMap::new();
        vars.insert("message", escape_html(&self.to_string()));
        vars.insert("back", "/".to_string());
        let html = render_page(
            status.canonical_reason().unwrap_or("Error"),
            &render(ERROR_TEMPLATE, &vars),
        );

        HttpResponse::build(status)
            .insert_header(ContentType(mime::TEXT_HTML_UTF_8))
            .body(html)
    }
}

/// Failure before the server starts accepting requests.
#[derive(Error, Debug)]
pub enum StartupError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    #[error("Store error: {0}")]
    Store(#[from] DbError),

    #[error("Server error: {0}")]
    Server(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Invalid configuration: {reason}")]
    Invalid { reason: String },
}
