//! JSON read endpoints.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use super::session::existing_store;
use super::AppState;
use crate::error::Error;
use crate::store::{lock_store, RecordStore};
use crate::view;

/// HTTP status for an error surfaced to a client.
pub(crate) fn status_for(err: &Error) -> StatusCode {
    if err.is_not_found() {
        StatusCode::NOT_FOUND
    } else if err.is_input_error() {
        StatusCode::UNPROCESSABLE_ENTITY
    } else if matches!(err, Error::NoForm { .. }) {
        StatusCode::METHOD_NOT_ALLOWED
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

/// An error rendered as `{"error": "..."}`.
#[derive(Debug)]
pub(crate) struct ApiError(Error);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "error": self.0.to_string() }));
        (status_for(&self.0), body).into_response()
    }
}

/// Run `read` against the request's session store.
///
/// A request without a live session reads empty tables; no session is
/// started for it.
fn read_session<T>(
    state: &AppState,
    headers: &HeaderMap,
    read: impl FnOnce(&RecordStore) -> T,
) -> T {
    let cookie_name = &state.config.session.cookie_name;
    match existing_store(&state.registry, headers, cookie_name) {
        Some(store) => read(&lock_store(&store)),
        None => read(&RecordStore::new()),
    }
}

pub(crate) async fn table(
    State(state): State<Arc<AppState>>,
    Path(table): Path<String>,
    headers: HeaderMap,
) -> Response {
    read_session(&state, &headers, |store| match store.read_named(&table) {
        Ok(rows) => Json(rows).into_response(),
        Err(e) => ApiError(e).into_response(),
    })
}

pub(crate) async fn summary(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    read_session(&state, &headers, |store| Json(store.summary()).into_response())
}

pub(crate) async fn goal_progress(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Response {
    read_session(&state, &headers, |store| {
        Json(view::progress(store.goals())).into_response()
    })
}

pub(crate) async fn duration_chart(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Response {
    read_session(&state, &headers, |store| {
        Json(view::duration_chart(store.exercises())).into_response()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_for() {
        assert_eq!(
            status_for(&Error::invalid_table("payments")),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_for(&Error::coercion("reps", "ten", "a whole number")),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status_for(&Error::NoForm { page: "home" }),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(
            status_for(&Error::ConfigValidation {
                message: "bad".to_string()
            }),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
