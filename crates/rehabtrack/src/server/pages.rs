//! HTML page handlers.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::Form;
use tracing::debug;

use super::{api, today, AppState};
use crate::dispatch::{self, PageView};
use crate::error::Error;
use crate::form::FormFields;
use crate::page::Page;
use crate::store::lock_store;
use crate::view::html;

pub(crate) async fn home(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    show_page(&state, &headers, Page::Home)
}

pub(crate) async fn show(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    headers: HeaderMap,
) -> Response {
    match slug.parse::<Page>() {
        Ok(page) => show_page(&state, &headers, page),
        Err(e) => error_page(&e),
    }
}

pub(crate) async fn submit(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    headers: HeaderMap,
    Form(fields): Form<FormFields>,
) -> Response {
    let page = match slug.parse::<Page>() {
        Ok(page) => page,
        Err(e) => return error_page(&e),
    };
    debug!(%page, "Form submitted");

    let session = state.open_session(&headers);
    let outcome = {
        let mut store = lock_store(&session.store);
        dispatch::submit(page, &mut store, fields, today())
    };

    let response = match outcome {
        Ok(view) => {
            let status = match &view.submission {
                Some(submission) if !submission.is_accepted() => StatusCode::UNPROCESSABLE_ENTITY,
                _ => StatusCode::OK,
            };
            document(&state, &view, status)
        }
        Err(e) => error_page(&e),
    };
    session.finish(response)
}

fn show_page(state: &AppState, headers: &HeaderMap, page: Page) -> Response {
    let session = state.open_session(headers);
    let view = dispatch::render(page, &lock_store(&session.store), today());
    let response = document(state, &view, StatusCode::OK);
    session.finish(response)
}

fn document(state: &AppState, view: &PageView, status: StatusCode) -> Response {
    let body = html::render_document(view, &state.config.ui);
    (status, Html(body)).into_response()
}

fn error_page(err: &Error) -> Response {
    let status = api::status_for(err);
    let body = format!(
        "<!DOCTYPE html><html><body><h1>{}</h1><p>{}</p><p><a href=\"/\">Home</a></p></body></html>",
        status,
        html::escape(&err.to_string())
    );
    (status, Html(body)).into_response()
}
